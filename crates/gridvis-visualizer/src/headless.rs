//! Off-screen toolkit.
//!
//! Windows are tiny-skia pixmaps painted on a dedicated render thread. Used
//! when no display server is available, by the CLI's PNG export, and by
//! tests that inspect rendered pixels.

use crate::raster::RasterSurface;
use crate::surface::DrawSurface;
use crate::toolkit::{Toolkit, Window};
use crate::visualization::Visualization;
use gridvis_core::constants::RENDER_THREAD_NAME;
use gridvis_core::{
    invoke_and_wait, Color, DispatchError, Dispatcher, RenderThread, Size, ToolkitError,
};
use image::RgbaImage;
use parking_lot::Mutex;
use std::path::Path;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Weak};
use tracing::{debug, trace};

/// Display size reported to visualizations when none is configured.
pub const DEFAULT_DISPLAY_BOUNDS: Size = Size::new(1920, 1080);

pub struct HeadlessToolkit {
    render_thread: Arc<RenderThread>,
    display_bounds: Size,
    windows: Mutex<Vec<Arc<HeadlessWindow>>>,
}

impl HeadlessToolkit {
    pub fn new() -> Result<Arc<Self>, DispatchError> {
        Self::with_display_bounds(DEFAULT_DISPLAY_BOUNDS)
    }

    pub fn with_display_bounds(display_bounds: Size) -> Result<Arc<Self>, DispatchError> {
        let render_thread = Arc::new(RenderThread::spawn_named(RENDER_THREAD_NAME)?);
        debug!("Headless toolkit started, display {}", display_bounds);
        Ok(Arc::new(Self {
            render_thread,
            display_bounds,
            windows: Mutex::new(Vec::new()),
        }))
    }

    pub fn display_bounds(&self) -> Size {
        self.display_bounds
    }

    /// Every window created so far, oldest first.
    pub fn windows(&self) -> Vec<Arc<HeadlessWindow>> {
        self.windows.lock().clone()
    }

    pub fn render_thread(&self) -> &RenderThread {
        &self.render_thread
    }
}

impl Toolkit for HeadlessToolkit {
    fn name(&self) -> &'static str {
        "headless"
    }

    fn dispatcher(&self) -> Arc<dyn Dispatcher> {
        self.render_thread.clone()
    }

    fn create_window(
        &self,
        content: Weak<dyn Visualization>,
        size: Size,
    ) -> Result<Arc<dyn Window>, ToolkitError> {
        let surface = RasterSurface::with_display_bounds(size, self.display_bounds).map_err(
            |e| ToolkitError::WindowCreation {
                reason: e.to_string(),
            },
        )?;
        let window = Arc::new(HeadlessWindow {
            content,
            surface: Mutex::new(surface),
            dispatcher: Arc::clone(&self.render_thread),
            visible: AtomicBool::new(false),
            frames: AtomicU64::new(0),
        });
        self.windows.lock().push(Arc::clone(&window));
        debug!("Created headless window {}", size);
        Ok(window)
    }
}

/// A window whose content is an in-memory pixmap.
pub struct HeadlessWindow {
    content: Weak<dyn Visualization>,
    surface: Mutex<RasterSurface>,
    dispatcher: Arc<RenderThread>,
    visible: AtomicBool,
    frames: AtomicU64,
}

impl HeadlessWindow {
    /// Number of completed paints.
    pub fn frame_count(&self) -> u64 {
        self.frames.load(Ordering::SeqCst)
    }

    /// Copy of the last painted frame.
    pub fn capture(&self) -> RgbaImage {
        self.surface.lock().to_image()
    }

    pub fn pixel(&self, x: u32, y: u32) -> Option<Color> {
        self.surface.lock().pixel(x, y)
    }

    pub fn save_png(&self, path: &Path) -> Result<(), ToolkitError> {
        self.surface.lock().save_png(path)
    }

    /// Turn anti-aliasing off for pixel-exact output.
    pub fn set_anti_alias(&self, anti_alias: bool) {
        self.surface.lock().set_anti_alias(anti_alias);
    }

    /// Resize the content area, as a user dragging the window edge would,
    /// and repaint at the new size.
    pub fn resize(self: &Arc<Self>, size: Size) -> gridvis_core::Result<()> {
        let window = Arc::clone(self);
        invoke_and_wait(self.dispatcher.as_ref(), move || {
            window.surface.lock().resize(size)?;
            debug!("Headless window resized to {}", size);
            window.repaint()
        })??;
        Ok(())
    }

    fn paint_now(&self, content: &Weak<dyn Visualization>) -> Result<(), ToolkitError> {
        let Some(content) = content.upgrade() else {
            return Ok(());
        };
        let mut surface = self.surface.lock();
        content.paint(&mut *surface)?;
        let frame = self.frames.fetch_add(1, Ordering::SeqCst) + 1;
        trace!("Painted headless frame {}", frame);
        Ok(())
    }
}

impl Window for HeadlessWindow {
    fn content_size(&self) -> Size {
        self.surface.lock().size()
    }

    fn set_visible(&self, visible: bool) -> Result<(), ToolkitError> {
        let was_visible = self.visible.swap(visible, Ordering::SeqCst);
        if visible && !was_visible {
            self.repaint()?;
        }
        Ok(())
    }

    fn is_visible(&self) -> bool {
        self.visible.load(Ordering::SeqCst)
    }

    fn repaint(&self) -> Result<(), ToolkitError> {
        if !self.is_visible() {
            return Ok(());
        }
        self.paint_now(&self.content)
    }
}

impl std::fmt::Debug for HeadlessWindow {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HeadlessWindow")
            .field("size", &self.content_size())
            .field("visible", &self.is_visible())
            .field("frames", &self.frame_count())
            .finish()
    }
}

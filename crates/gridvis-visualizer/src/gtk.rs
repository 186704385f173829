//! GTK4 toolkit.
//!
//! GTK runs on its own thread with a glib main loop; that thread is the
//! render-control thread. Widgets are not `Send`, so they live in a
//! thread-local registry on the GTK thread and the `Window` handles handed
//! out to other threads only carry an id plus atomics.
//!
//! Repaints are coalesced by GTK into the next frame via `queue_draw`.

use crate::surface::{DrawSurface, SurfaceResult};
use crate::toolkit::{Toolkit, Window};
use crate::visualization::Visualization;
use glam::DAffine2;
use gridvis_core::{
    thread_safe, Color, DispatchError, Dispatcher, GridLine, GridRect, Job, Size, ThreadSafe,
    ToolkitError,
};
use gtk4 as gtk;
use gtk4::prelude::*;
use gtk4::{cairo, gdk, glib};
use std::cell::RefCell;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{mpsc, Arc, Weak};
use std::thread::{self, ThreadId};
use tracing::{debug, error, info, warn};

const GTK_THREAD_NAME: &str = "gridvis-gtk";
const WINDOW_TITLE: &str = "gridvis";
const LINE_WIDTH: f64 = 1.0;
const FALLBACK_DISPLAY_BOUNDS: Size = Size::new(1920, 1080);

thread_local! {
    static WINDOWS: RefCell<HashMap<u64, (gtk::Window, gtk::DrawingArea)>> =
        RefCell::new(HashMap::new());
}

/// Posts jobs onto the GTK thread's main context.
///
/// `running` is cleared when the main loop returns or unwinds; after that
/// nothing would ever run a posted job, so `post` refuses it.
pub struct GlibDispatcher {
    context: glib::MainContext,
    thread: ThreadId,
    running: Arc<AtomicBool>,
}

impl Dispatcher for GlibDispatcher {
    fn is_dispatch_thread(&self) -> bool {
        thread::current().id() == self.thread
    }

    fn post(&self, job: Job) -> Result<(), DispatchError> {
        if !self.running.load(Ordering::SeqCst) {
            return Err(DispatchError::Disconnected);
        }
        self.context.invoke(job);
        Ok(())
    }
}

/// Marks the main loop as stopped when dropped.
struct MainLoopGuard(Arc<AtomicBool>);

impl Drop for MainLoopGuard {
    fn drop(&mut self) {
        self.0.store(false, Ordering::SeqCst);
        warn!("GTK main loop stopped");
    }
}

pub struct GtkToolkit {
    dispatcher: Arc<GlibDispatcher>,
    display_bounds: Size,
    next_window_id: AtomicU64,
}

impl GtkToolkit {
    /// Start GTK on a dedicated thread and wait until its main loop runs.
    pub fn start() -> Result<Arc<Self>, ToolkitError> {
        let (tx, rx) = mpsc::sync_channel(1);
        let running = Arc::new(AtomicBool::new(true));
        let loop_running = Arc::clone(&running);
        thread::Builder::new()
            .name(GTK_THREAD_NAME.to_string())
            .spawn(move || {
                let _guard = MainLoopGuard(loop_running);
                if let Err(e) = gtk::init() {
                    let _ = tx.send(Err(ToolkitError::Init {
                        reason: e.to_string(),
                    }));
                    return;
                }
                let context = glib::MainContext::default();
                let main_loop = glib::MainLoop::new(Some(&context), false);
                let bounds = primary_monitor_bounds();
                let _ = tx.send(Ok((context, thread::current().id(), bounds)));
                main_loop.run();
            })
            .map_err(|e| ToolkitError::Init {
                reason: e.to_string(),
            })?;

        let (context, thread, display_bounds) = rx.recv().map_err(|_| ToolkitError::Init {
            reason: "GTK thread exited during startup".to_string(),
        })??;
        info!("GTK toolkit started, display {}", display_bounds);

        Ok(Arc::new(Self {
            dispatcher: Arc::new(GlibDispatcher {
                context,
                thread,
                running,
            }),
            display_bounds,
            next_window_id: AtomicU64::new(1),
        }))
    }
}

fn primary_monitor_bounds() -> Size {
    gdk::Display::default()
        .and_then(|display| display.monitors().item(0))
        .and_downcast::<gdk::Monitor>()
        .map(|monitor| {
            let geometry = monitor.geometry();
            Size::new(geometry.width().max(0) as u32, geometry.height().max(0) as u32)
        })
        .unwrap_or(FALLBACK_DISPLAY_BOUNDS)
}

impl Toolkit for GtkToolkit {
    fn name(&self) -> &'static str {
        "gtk"
    }

    fn dispatcher(&self) -> Arc<dyn Dispatcher> {
        self.dispatcher.clone()
    }

    fn create_window(
        &self,
        content: Weak<dyn Visualization>,
        size: Size,
    ) -> Result<Arc<dyn Window>, ToolkitError> {
        if !self.dispatcher.is_dispatch_thread() {
            return Err(ToolkitError::WindowCreation {
                reason: "windows must be created on the GTK thread".to_string(),
            });
        }

        let id = self.next_window_id.fetch_add(1, Ordering::SeqCst);
        let content_size = thread_safe(size);
        let visible = Arc::new(AtomicBool::new(false));
        let display_bounds = self.display_bounds;

        let area = gtk::DrawingArea::new();
        area.set_content_width(size.width as i32);
        area.set_content_height(size.height as i32);
        area.set_hexpand(true);
        area.set_vexpand(true);

        let draw_size = Arc::clone(&content_size);
        area.set_draw_func(move |_, cr, width, height| {
            let size = Size::new(width.max(0) as u32, height.max(0) as u32);
            *draw_size.lock() = size;
            let Some(content) = content.upgrade() else {
                return;
            };
            let mut surface = CairoSurface::new(cr, size, display_bounds);
            if let Err(e) = content.paint(&mut surface) {
                error!("Paint failed: {}", e);
            }
        });

        let resize_size = Arc::clone(&content_size);
        area.connect_resize(move |_, width, height| {
            *resize_size.lock() = Size::new(width.max(0) as u32, height.max(0) as u32);
        });

        let window = gtk::Window::builder()
            .title(WINDOW_TITLE)
            .resizable(true)
            .child(&area)
            .build();

        let closed = Arc::clone(&visible);
        window.connect_close_request(move |_| {
            closed.store(false, Ordering::SeqCst);
            WINDOWS.with(|windows| windows.borrow_mut().remove(&id));
            debug!("Window {} closed", id);
            glib::Propagation::Proceed
        });

        WINDOWS.with(|windows| windows.borrow_mut().insert(id, (window, area)));
        debug!("Created GTK window {} ({})", id, size);

        Ok(Arc::new(GtkWindow {
            id,
            content_size,
            visible,
        }))
    }
}

/// Handle to a GTK window living on the GTK thread.
pub struct GtkWindow {
    id: u64,
    content_size: ThreadSafe<Size>,
    visible: Arc<AtomicBool>,
}

impl GtkWindow {
    fn widgets(&self) -> Result<(gtk::Window, gtk::DrawingArea), ToolkitError> {
        WINDOWS
            .with(|windows| windows.borrow().get(&self.id).cloned())
            .ok_or_else(|| ToolkitError::surface(format!("window {} is gone", self.id)))
    }
}

impl Window for GtkWindow {
    fn content_size(&self) -> Size {
        *self.content_size.lock()
    }

    fn set_visible(&self, visible: bool) -> Result<(), ToolkitError> {
        let (window, _) = self.widgets()?;
        if visible {
            window.present();
        } else {
            window.set_visible(false);
        }
        self.visible.store(visible, Ordering::SeqCst);
        Ok(())
    }

    fn is_visible(&self) -> bool {
        self.visible.load(Ordering::SeqCst)
    }

    fn repaint(&self) -> Result<(), ToolkitError> {
        if !self.is_visible() {
            return Ok(());
        }
        match self.widgets() {
            Ok((_, area)) => {
                area.queue_draw();
                Ok(())
            }
            Err(e) => {
                debug!("Repaint ignored: {}", e);
                Ok(())
            }
        }
    }
}

/// Cairo context adapter used inside the draw callback.
struct CairoSurface<'a> {
    cr: &'a cairo::Context,
    size: Size,
    display_bounds: Size,
    transform: DAffine2,
    color: Color,
}

impl<'a> CairoSurface<'a> {
    fn new(cr: &'a cairo::Context, size: Size, display_bounds: Size) -> Self {
        let m = cr.matrix();
        let transform = DAffine2::from_cols_array(&[m.xx(), m.yx(), m.xy(), m.yy(), m.x0(), m.y0()]);
        Self {
            cr,
            size,
            display_bounds,
            transform,
            color: Color::BLACK,
        }
    }

    fn apply_color(&self) {
        let [r, g, b, a] = self.color.to_f64_components();
        self.cr.set_source_rgba(r, g, b, a);
    }
}

fn cairo_error(e: cairo::Error) -> ToolkitError {
    ToolkitError::surface(e.to_string())
}

impl DrawSurface for CairoSurface<'_> {
    fn size(&self) -> Size {
        self.size
    }

    fn display_bounds(&self) -> Size {
        self.display_bounds
    }

    fn transform(&self) -> DAffine2 {
        self.transform
    }

    fn set_transform(&mut self, transform: DAffine2) {
        let [xx, yx, xy, yy, x0, y0] = transform.to_cols_array();
        self.cr
            .set_matrix(cairo::Matrix::new(xx, yx, xy, yy, x0, y0));
        self.transform = transform;
    }

    fn color(&self) -> Color {
        self.color
    }

    fn set_color(&mut self, color: Color) {
        self.color = color;
    }

    fn clear(&mut self, color: Color) -> SurfaceResult {
        let [r, g, b, a] = color.to_f64_components();
        self.cr.set_source_rgba(r, g, b, a);
        self.cr.paint().map_err(cairo_error)
    }

    fn fill_rect(&mut self, rect: &GridRect) -> SurfaceResult {
        if rect.is_degenerate() {
            return Ok(());
        }
        self.apply_color();
        self.cr.rectangle(rect.x, rect.y, rect.width, rect.height);
        self.cr.fill().map_err(cairo_error)
    }

    fn draw_line(&mut self, line: &GridLine) -> SurfaceResult {
        self.apply_color();
        self.cr.set_line_width(LINE_WIDTH);
        self.cr.move_to(line.start.x, line.start.y);
        self.cr.line_to(line.end.x, line.end.y);
        self.cr.stroke().map_err(cairo_error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gridvis_core::invoke_and_wait;

    fn dispatcher() -> (GlibDispatcher, MainLoopGuard) {
        let running = Arc::new(AtomicBool::new(true));
        let dispatcher = GlibDispatcher {
            context: glib::MainContext::new(),
            thread: thread::current().id(),
            running: Arc::clone(&running),
        };
        (dispatcher, MainLoopGuard(running))
    }

    #[test]
    fn test_post_fails_after_main_loop_stops() {
        let (dispatcher, guard) = dispatcher();
        assert!(dispatcher.post(Box::new(|| {})).is_ok());

        drop(guard);
        assert_eq!(
            dispatcher.post(Box::new(|| {})),
            Err(DispatchError::Disconnected)
        );
    }

    #[test]
    fn test_invoke_from_other_thread_fails_after_main_loop_stops() {
        let (dispatcher, guard) = dispatcher();
        let dispatcher: Arc<dyn Dispatcher> = Arc::new(dispatcher);
        drop(guard);

        let result = thread::spawn(move || invoke_and_wait(dispatcher.as_ref(), || 1))
            .join()
            .unwrap();
        assert_eq!(result, Err(DispatchError::Disconnected));
    }

    #[test]
    fn test_guard_clears_flag_on_unwind() {
        let running = Arc::new(AtomicBool::new(true));
        let flag = Arc::clone(&running);
        let outcome = thread::spawn(move || {
            let _guard = MainLoopGuard(flag);
            panic!("main loop died");
        })
        .join();
        assert!(outcome.is_err());
        assert!(!running.load(Ordering::SeqCst));
    }
}

//! Visualizer session: window preferences plus the single bound window.

use crate::toolkit::{default_toolkit, Toolkit, Window};
use crate::view::ViewPreferences;
use crate::visualization::Visualization;
use gridvis_core::constants::{DEFAULT_WINDOW_HEIGHT, DEFAULT_WINDOW_WIDTH};
use gridvis_core::{invoke_and_wait, Error, Result, Size, ToolkitError, YPreference};
use parking_lot::{Mutex, RwLock};
use std::sync::Arc;
use tracing::{debug, error, info};

#[derive(Debug, Clone, Copy)]
struct SessionPrefs {
    window_width: u32,
    window_height: u32,
    y_preference: YPreference,
    center_visualization: bool,
}

impl Default for SessionPrefs {
    fn default() -> Self {
        Self {
            window_width: DEFAULT_WINDOW_WIDTH,
            window_height: DEFAULT_WINDOW_HEIGHT,
            y_preference: YPreference::Up,
            center_visualization: true,
        }
    }
}

/// Application session.
///
/// Preferences can be changed at any time and are read on every repaint.
/// A session binds at most one window over its lifetime.
pub struct Visualizer {
    toolkit: Arc<dyn Toolkit>,
    prefs: RwLock<SessionPrefs>,
    window: Mutex<Option<Arc<dyn Window>>>,
}

impl Visualizer {
    /// Open a session with default preferences on the default toolkit.
    pub fn open() -> Result<Arc<Self>> {
        Ok(Self::with_toolkit(default_toolkit()?))
    }

    /// Open a session on a specific toolkit.
    pub fn with_toolkit(toolkit: Arc<dyn Toolkit>) -> Arc<Self> {
        debug!("Opening session on {} toolkit", toolkit.name());
        Arc::new(Self {
            toolkit,
            prefs: RwLock::new(SessionPrefs::default()),
            window: Mutex::new(None),
        })
    }

    pub fn toolkit(&self) -> Arc<dyn Toolkit> {
        Arc::clone(&self.toolkit)
    }

    pub fn set_window_width(&self, width: u32) {
        self.prefs.write().window_width = width;
    }

    /// Content width of the bound window, or the configured width before
    /// a window exists.
    pub fn window_width(&self) -> u32 {
        match self.window.lock().as_ref() {
            Some(window) => window.content_size().width,
            None => self.prefs.read().window_width,
        }
    }

    pub fn set_window_height(&self, height: u32) {
        self.prefs.write().window_height = height;
    }

    /// Content height of the bound window, or the configured height before
    /// a window exists.
    pub fn window_height(&self) -> u32 {
        match self.window.lock().as_ref() {
            Some(window) => window.content_size().height,
            None => self.prefs.read().window_height,
        }
    }

    pub fn window_size(&self) -> Size {
        match self.window.lock().as_ref() {
            Some(window) => window.content_size(),
            None => {
                let prefs = self.prefs.read();
                Size::new(prefs.window_width, prefs.window_height)
            }
        }
    }

    pub fn set_y_preference(&self, preference: YPreference) {
        self.prefs.write().y_preference = preference;
    }

    pub fn y_preference(&self) -> YPreference {
        self.prefs.read().y_preference
    }

    pub fn set_center_visualization(&self, centered: bool) {
        self.prefs.write().center_visualization = centered;
    }

    pub fn visualization_centered(&self) -> bool {
        self.prefs.read().center_visualization
    }

    /// Snapshot of the preferences the paint routine needs.
    pub fn view_preferences(&self) -> ViewPreferences {
        let prefs = self.prefs.read();
        ViewPreferences {
            y_preference: prefs.y_preference,
            centered: prefs.center_visualization,
        }
    }

    pub fn window(&self) -> Option<Arc<dyn Window>> {
        self.window.lock().clone()
    }

    pub fn is_displayed(&self) -> bool {
        self.window.lock().is_some()
    }

    /// Show `visualization` in a new top-level window.
    ///
    /// Window creation runs on the toolkit's render-control thread and has
    /// completed when this returns. Fails with [`Error::AlreadyDisplayed`]
    /// if this session already has a window; the existing window is left
    /// untouched.
    pub fn display_frame(&self, visualization: Arc<dyn Visualization>) -> Result<()> {
        let mut slot = self.window.lock();
        if slot.is_some() {
            error!("display_frame called on a session that already has a window");
            return Err(Error::AlreadyDisplayed);
        }

        let size = visualization.panel().preferred_size();
        let toolkit = Arc::clone(&self.toolkit);
        let dispatcher = toolkit.dispatcher();
        let panel_dispatcher = Arc::clone(&dispatcher);

        let window = invoke_and_wait(
            dispatcher.as_ref(),
            move || -> std::result::Result<Arc<dyn Window>, ToolkitError> {
                let window = toolkit.create_window(Arc::downgrade(&visualization), size)?;
                visualization
                    .panel()
                    .attach(Arc::downgrade(&window), panel_dispatcher);
                window.set_visible(true)?;
                Ok(window)
            },
        )??;

        info!(
            "Displayed visualization in {} window ({})",
            self.toolkit.name(),
            size
        );
        *slot = Some(window);
        Ok(())
    }
}

impl std::fmt::Debug for Visualizer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Visualizer")
            .field("toolkit", &self.toolkit.name())
            .field("prefs", &*self.prefs.read())
            .field("displayed", &self.is_displayed())
            .finish()
    }
}

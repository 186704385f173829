//! The drawable area of a visualization.
//!
//! A panel knows its preferred size and, once displayed, the window it lives
//! in. Repaint requests from any thread are marshaled onto that window's
//! render-control thread and waited for.

use crate::toolkit::Window;
use gridvis_core::{invoke_and_wait, Dispatcher, Result, Size};
use parking_lot::Mutex;
use std::sync::{Arc, Weak};
use tracing::trace;

#[derive(Clone)]
struct HostBinding {
    window: Weak<dyn Window>,
    dispatcher: Arc<dyn Dispatcher>,
}

pub struct Panel {
    preferred_size: Size,
    host: Mutex<Option<HostBinding>>,
}

impl Panel {
    pub fn new(preferred_size: Size) -> Self {
        Self {
            preferred_size,
            host: Mutex::new(None),
        }
    }

    pub fn preferred_size(&self) -> Size {
        self.preferred_size
    }

    /// Bind to the window that displays this panel.
    pub fn attach(&self, window: Weak<dyn Window>, dispatcher: Arc<dyn Dispatcher>) {
        *self.host.lock() = Some(HostBinding { window, dispatcher });
    }

    pub fn is_attached(&self) -> bool {
        self.host
            .lock()
            .as_ref()
            .is_some_and(|h| h.window.strong_count() > 0)
    }

    /// Repaint the hosting window and wait for it.
    ///
    /// A no-op while the panel is not displayed or its window is gone.
    pub fn repaint(&self) -> Result<()> {
        let Some(host) = self.host.lock().clone() else {
            return Ok(());
        };
        let Some(window) = host.window.upgrade() else {
            return Ok(());
        };
        trace!("Repaint requested");
        invoke_and_wait(host.dispatcher.as_ref(), move || window.repaint())??;
        Ok(())
    }
}

impl std::fmt::Debug for Panel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Panel")
            .field("preferred_size", &self.preferred_size())
            .field("attached", &self.is_attached())
            .finish()
    }
}

//! Windowing toolkit boundary.
//!
//! A toolkit owns one render-control thread (its [`Dispatcher`]) and creates
//! top-level windows for visualizations. Window creation, visibility changes
//! and repaints are only ever invoked on that thread.

use crate::visualization::Visualization;
use gridvis_core::{Dispatcher, Result, Size, ToolkitError};
use std::sync::{Arc, Weak};

pub trait Toolkit: Send + Sync {
    /// Short backend name used in logs.
    fn name(&self) -> &'static str;

    /// The render-control thread.
    fn dispatcher(&self) -> Arc<dyn Dispatcher>;

    /// Create a hidden top-level window showing `content`, sized so its
    /// content area is `size`. Called on the dispatch thread.
    fn create_window(
        &self,
        content: Weak<dyn Visualization>,
        size: Size,
    ) -> std::result::Result<Arc<dyn Window>, ToolkitError>;
}

/// A top-level window created by a [`Toolkit`].
pub trait Window: Send + Sync {
    /// Live size of the content area.
    fn content_size(&self) -> Size;

    /// Show or hide the window. Called on the dispatch thread.
    fn set_visible(&self, visible: bool) -> std::result::Result<(), ToolkitError>;

    fn is_visible(&self) -> bool;

    /// Repaint the content. Called on the dispatch thread. Toolkits with
    /// their own frame scheduling may coalesce this into the next frame.
    ///
    /// A hidden or closed window ignores the request and returns `Ok`.
    /// Errors are reserved for failures while painting.
    fn repaint(&self) -> std::result::Result<(), ToolkitError>;
}

/// The toolkit used by [`crate::Visualizer::open`].
///
/// GTK when built with the `gtk` feature, otherwise the headless backend.
pub fn default_toolkit() -> Result<Arc<dyn Toolkit>> {
    #[cfg(feature = "gtk")]
    {
        let toolkit: Arc<dyn Toolkit> = crate::gtk::GtkToolkit::start()?;
        Ok(toolkit)
    }
    #[cfg(not(feature = "gtk"))]
    {
        let toolkit: Arc<dyn Toolkit> = crate::headless::HeadlessToolkit::new()?;
        Ok(toolkit)
    }
}

//! Renderable capability shared by every visualization kind.

use crate::panel::Panel;
use crate::session::Visualizer;
use crate::surface::DrawSurface;
use gridvis_core::ToolkitError;
use std::sync::Arc;

/// A visualization to be rendered in a session's window.
pub trait Visualization: Send + Sync {
    /// The session this visualization was created for.
    fn session(&self) -> Arc<Visualizer>;

    /// The panel in which to render.
    fn panel(&self) -> &Panel;

    /// Paint the complete scene onto `surface`.
    ///
    /// Leaves the surface transform as it found it.
    fn paint(&self, surface: &mut dyn DrawSurface) -> Result<(), ToolkitError>;
}

//! Drawing surface contract.
//!
//! A surface is whatever a toolkit paints into: a cairo context inside a
//! window, an off-screen pixmap, or a recorder for tests. Geometry passed to
//! [`DrawSurface::fill_rect`] and [`DrawSurface::draw_line`] is in user space
//! and goes through the current transform; [`DrawSurface::clear`] ignores it.

use glam::DAffine2;
use gridvis_core::{Color, GridLine, GridRect, Size, ToolkitError};

/// Result of a surface operation.
pub type SurfaceResult = std::result::Result<(), ToolkitError>;

pub trait DrawSurface {
    /// Pixel size of the drawable area.
    fn size(&self) -> Size;

    /// Size of the display the surface is shown on. Axes span this extent so
    /// they reach past any visible edge.
    fn display_bounds(&self) -> Size;

    /// Current user-to-device transform.
    fn transform(&self) -> DAffine2;

    fn set_transform(&mut self, transform: DAffine2);

    /// Current draw color.
    fn color(&self) -> Color;

    fn set_color(&mut self, color: Color);

    /// Fill the whole surface with `color`, in device space.
    fn clear(&mut self, color: Color) -> SurfaceResult;

    /// Fill `rect` with the current color.
    fn fill_rect(&mut self, rect: &GridRect) -> SurfaceResult;

    /// Stroke `line` one user-space unit wide with the current color.
    fn draw_line(&mut self, line: &GridLine) -> SurfaceResult;
}

//! Shared defaults for sessions and grids.

/// Default content width of a session window, in pixels.
pub const DEFAULT_WINDOW_WIDTH: u32 = 730;

/// Default content height of a session window, in pixels.
pub const DEFAULT_WINDOW_HEIGHT: u32 = 470;

/// Default grid scale factor (1.0 = 100%).
pub const DEFAULT_SCALE_FACTOR: f64 = 1.0;

/// Default size of one grid unit, in pixels before scaling.
pub const DEFAULT_UNIT_PX: i32 = 10;

/// Multiplier applied to a grid point when re-centering on it.
///
/// Fixed at 10 and independent of the configurable grid unit.
pub const CENTER_POINT_SCALE: f64 = 10.0;

/// Name given to the dedicated render-control thread.
pub const RENDER_THREAD_NAME: &str = "gridvis-render";

//! # gridvis Visualizer
//!
//! Grid visualization, sessions and toolkit backends for gridvis.
//!
//! A [`Visualizer`] session holds window preferences and binds exactly one
//! [`Visualization`] into one top-level window. [`GridVisualization`] keeps
//! colored rectangles and lines in grid units and replays them through a
//! composed view transform on every repaint. Drawing goes through the
//! [`DrawSurface`] trait; windows come from a [`Toolkit`], whose render-control
//! thread receives every window and paint operation.

pub mod grid;
pub mod headless;
pub mod panel;
pub mod raster;
pub mod recording;
pub mod session;
pub mod shapes;
pub mod surface;
pub mod toolkit;
pub mod view;
pub mod visualization;

#[cfg(feature = "gtk")]
pub mod gtk;

pub use grid::GridVisualization;
pub use headless::{HeadlessToolkit, HeadlessWindow, DEFAULT_DISPLAY_BOUNDS};
pub use panel::Panel;
pub use raster::RasterSurface;
pub use recording::{DrawOp, RecordingSurface};
pub use session::Visualizer;
pub use shapes::{ShapeCollection, ShapeEntry, ShapeId};
pub use surface::{DrawSurface, SurfaceResult};
pub use toolkit::{default_toolkit, Toolkit, Window};
pub use view::{compose_view_transform, AxisStyle, ViewPreferences, ViewState};
pub use visualization::Visualization;

#[cfg(feature = "gtk")]
pub use gtk::GtkToolkit;

//! # gridvis
//!
//! Render a 2D coordinate grid with user-added rectangles and lines inside a
//! window, with zoom, pan, axes and a choice of Y orientation.
//!
//! ## Architecture
//!
//! gridvis is organized as a workspace with multiple crates:
//!
//! 1. **gridvis-core** - Colors, geometry, errors and the render-thread dispatcher
//! 2. **gridvis-visualizer** - Sessions, the grid, draw surfaces and toolkit backends
//! 3. **gridvis-settings** - Configuration file handling
//! 4. **gridvis** - Facade and demo binary that integrates all crates

pub use gridvis_core::{
    invoke_and_wait, Color, DispatchError, Dispatcher, Error, GridLine, GridPoint, GridRect,
    RenderThread, Result, Shape, Size, ToolkitError, YPreference,
};
pub use gridvis_settings::{Config, SettingsError};
pub use gridvis_visualizer::{
    default_toolkit, DrawSurface, GridVisualization, HeadlessToolkit, RasterSurface,
    RecordingSurface, ShapeId, Toolkit, Visualization, Visualizer, Window,
    DEFAULT_DISPLAY_BOUNDS,
};

use std::path::Path;
use std::sync::Arc;
use tracing::{debug, info};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Build date (set at compile time)
pub const BUILD_DATE: &str = env!("BUILD_DATE");

/// Initialize logging with the default configuration
///
/// Pretty console output on stderr, filtered by `RUST_LOG` (default `info`).
pub fn init_logging() -> anyhow::Result<()> {
    use tracing_subscriber::filter::LevelFilter;
    use tracing_subscriber::fmt;
    use tracing_subscriber::prelude::*;
    use tracing_subscriber::EnvFilter;

    let env_filter = EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .from_env_lossy();

    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_level(true)
        .with_thread_ids(true)
        .with_thread_names(true)
        .with_line_number(true)
        .pretty();

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .try_init()?;

    Ok(())
}

/// Apply the `[window]` section to a session.
pub fn configure_session(session: &Visualizer, config: &Config) {
    session.set_window_width(config.window.width);
    session.set_window_height(config.window.height);
    session.set_y_preference(config.window.y_axis);
    session.set_center_visualization(config.window.centered);
}

/// Apply the `[grid]` and `[axes]` sections to a grid.
pub fn configure_grid(grid: &GridVisualization, config: &Config) -> Result<()> {
    grid.set_scale_factor(config.grid.scale_factor)?;
    grid.set_unit(config.grid.unit)?;
    grid.set_default_object_color(config.grid.default_object_color);
    grid.set_background_color(config.grid.background_color)?;
    grid.set_axes_color(config.axes.color)?;
    grid.show_axes(config.axes.visible)?;
    Ok(())
}

/// Open a session on `toolkit` and a grid for it, both set up from `config`.
///
/// Nothing is displayed yet.
pub fn open_configured_with(
    toolkit: Arc<dyn Toolkit>,
    config: &Config,
) -> Result<(Arc<Visualizer>, Arc<GridVisualization>)> {
    let session = Visualizer::with_toolkit(toolkit);
    configure_session(&session, config);
    let grid = GridVisualization::new(&session);
    configure_grid(&grid, config)?;
    debug!("Opened configured session {:?}", session);
    Ok((session, grid))
}

/// [`open_configured_with`] on the default toolkit.
pub fn open_configured(config: &Config) -> Result<(Arc<Visualizer>, Arc<GridVisualization>)> {
    open_configured_with(default_toolkit()?, config)
}

/// Paint `grid` off-screen at `size` and write it as a PNG.
pub fn render_to_png(grid: &GridVisualization, size: Size, path: &Path) -> Result<()> {
    let mut surface = RasterSurface::with_display_bounds(size, DEFAULT_DISPLAY_BOUNDS)?;
    grid.paint(&mut surface)?;
    surface.save_png(path)?;
    info!("Wrote {} capture to {}", size, path.display());
    Ok(())
}

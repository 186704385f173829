use clap::Parser;
use gridvis::{
    init_logging, open_configured, render_to_png, Color, Config, GridLine, GridRect,
    GridVisualization, YPreference, BUILD_DATE, VERSION,
};
use std::path::PathBuf;
use tracing::{info, warn};

#[derive(Debug, Parser)]
#[command(name = "gridvis", version, about = "Show a sample scene on a 2D grid")]
struct Args {
    /// Configuration file (.toml or .json). Defaults to the platform config dir.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Also write the rendered scene to this PNG file.
    #[arg(long)]
    output: Option<PathBuf>,

    /// Scale factor, overriding the configuration.
    #[arg(long)]
    scale: Option<f64>,

    /// Pixels per grid unit, overriding the configuration.
    #[arg(long)]
    unit: Option<i32>,

    /// Screen orientation: increasing Y moves down.
    #[arg(long = "y-down")]
    y_down: bool,

    /// Keep the grid origin in the top-left corner.
    #[arg(long = "no-center")]
    no_center: bool,

    /// Draw the X and Y axes.
    #[arg(long)]
    axes: bool,
}

fn load_config(args: &Args) -> anyhow::Result<Config> {
    let mut config = match &args.config {
        Some(path) => Config::load_from_file(path)?,
        None => match Config::default_path() {
            Ok(path) => Config::load_or_default(&path)?,
            Err(e) => {
                warn!("Using default configuration: {}", e);
                Config::default()
            }
        },
    };

    if let Some(scale) = args.scale {
        config.grid.scale_factor = scale;
    }
    if let Some(unit) = args.unit {
        config.grid.unit = unit;
    }
    if args.y_down {
        config.window.y_axis = YPreference::Down;
    }
    if args.no_center {
        config.window.centered = false;
    }
    if args.axes {
        config.axes.visible = true;
    }
    config.validate()?;
    Ok(config)
}

fn add_sample_scene(grid: &GridVisualization) -> gridvis::Result<()> {
    grid.add_grid_rectangle(GridRect::new(0.0, 0.0, 1.0, 1.0))?;
    grid.add_grid_rectangle_with_color(GridRect::new(2.0, 1.0, 3.0, 2.0), Color::BLUE)?;
    grid.add_grid_rectangle_with_color(GridRect::new(-6.0, -4.0, 2.0, 2.0), Color::RED)?;
    grid.add_grid_line(GridLine::from_coords(-8.0, -2.0, 8.0, 6.0))?;
    grid.add_grid_line_with_color(GridLine::from_coords(0.0, 5.0, 6.0, 5.0), Color::GREEN)?;
    Ok(())
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    init_logging()?;
    info!("gridvis {} (built {})", VERSION, BUILD_DATE);

    let config = load_config(&args)?;
    let (session, grid) = open_configured(&config)?;
    add_sample_scene(&grid)?;
    grid.display()?;

    if let Some(path) = &args.output {
        render_to_png(&grid, session.window_size(), path)?;
    }

    // Keep the process alive until the GTK window is closed.
    #[cfg(feature = "gtk")]
    {
        use gridvis::Window;
        while session.window().is_some_and(|window| window.is_visible()) {
            std::thread::sleep(std::time::Duration::from_millis(200));
        }
    }

    Ok(())
}

//! Rendering tests: what the grid paints for a given scene and view.

use glam::{DAffine2, DVec2};
use gridvis_core::{Color, GridLine, GridRect, Size, YPreference};
use gridvis_visualizer::{
    DrawOp, GridVisualization, HeadlessToolkit, RecordingSurface, Visualization, Visualizer,
};
use std::sync::Arc;

fn session() -> (Arc<HeadlessToolkit>, Arc<Visualizer>) {
    let toolkit = HeadlessToolkit::new().unwrap();
    let session = Visualizer::with_toolkit(toolkit.clone());
    (toolkit, session)
}

fn record(grid: &GridVisualization, size: Size) -> RecordingSurface {
    let mut surface = RecordingSurface::new(size);
    grid.paint(&mut surface).unwrap();
    surface
}

#[test]
fn test_unit_square_lands_right_of_and_above_center() {
    let (_toolkit, session) = session();
    let grid = GridVisualization::new(&session);
    grid.set_scale_factor(2.0).unwrap();
    grid.add_grid_rectangle(GridRect::new(0.0, 0.0, 1.0, 1.0))
        .unwrap();

    let surface = record(&grid, Size::new(730, 470));
    let bounds = surface.fills().next().and_then(DrawOp::device_rect);
    assert_eq!(bounds, Some(GridRect::new(365.0, 215.0, 20.0, 20.0)));
}

#[test]
fn test_unit_square_pixels_in_headless_window() {
    let (toolkit, session) = session();
    let grid = GridVisualization::new(&session);
    grid.set_scale_factor(2.0).unwrap();
    grid.display().unwrap();

    let window = toolkit.windows()[0].clone();
    window.set_anti_alias(false);
    grid.add_grid_rectangle_with_color(GridRect::new(0.0, 0.0, 1.0, 1.0), Color::RED)
        .unwrap();

    assert_eq!(window.pixel(375, 225), Some(Color::RED));
    assert_eq!(window.pixel(395, 225), Some(Color::PANEL_BACKGROUND));
    assert_eq!(window.pixel(375, 245), Some(Color::PANEL_BACKGROUND));
    assert_eq!(window.pixel(355, 225), Some(Color::PANEL_BACKGROUND));
}

#[test]
fn test_clear_leaves_only_axes() {
    let (_toolkit, session) = session();
    let grid = GridVisualization::new(&session);
    grid.show_axes(true).unwrap();
    grid.add_grid_rectangle(GridRect::new(1.0, 1.0, 2.0, 2.0)).unwrap();
    grid.add_grid_line(GridLine::from_coords(0.0, 0.0, 3.0, 4.0)).unwrap();
    grid.clear().unwrap();

    let surface = record(&grid, Size::new(200, 100));
    assert!(grid.is_empty());
    assert_eq!(surface.fills().count(), 0);
    let lines: Vec<_> = surface.lines().collect();
    assert_eq!(lines.len(), 2);
    assert!(lines.iter().all(|op| op.color() == Color::BLACK));
}

#[test]
fn test_default_color_applies_only_to_later_shapes() {
    let (_toolkit, session) = session();
    let grid = GridVisualization::new(&session);
    grid.add_grid_rectangle(GridRect::new(0.0, 0.0, 1.0, 1.0)).unwrap();
    grid.set_default_object_color(Color::BLUE);
    grid.add_grid_rectangle(GridRect::new(2.0, 0.0, 1.0, 1.0)).unwrap();
    grid.add_grid_line_with_color(GridLine::from_coords(0.0, 0.0, 1.0, 0.0), Color::GREEN)
        .unwrap();

    let colors: Vec<_> = grid.rectangles().into_iter().map(|(_, c)| c).collect();
    assert_eq!(colors, vec![Color::DARK_GRAY, Color::BLUE]);
    assert_eq!(grid.lines()[0].1, Color::GREEN);

    let surface = record(&grid, Size::new(100, 100));
    let painted: Vec<_> = surface.fills().map(DrawOp::color).collect();
    assert_eq!(painted, vec![Color::DARK_GRAY, Color::BLUE]);
}

#[test]
fn test_duplicate_shapes_are_kept() {
    let (_toolkit, session) = session();
    let grid = GridVisualization::new(&session);
    let rect = GridRect::new(0.0, 0.0, 1.0, 1.0);
    let first = grid.add_grid_rectangle(rect).unwrap();
    let second = grid.add_grid_rectangle_with_color(rect, Color::RED).unwrap();
    assert_ne!(first, second);
    assert_eq!(grid.shapes().len(), 2);
}

#[test]
fn test_degenerate_shapes_paint_without_error() {
    let (_toolkit, session) = session();
    let grid = GridVisualization::new(&session);
    grid.add_grid_rectangle(GridRect::new(0.0, 0.0, 0.0, 5.0)).unwrap();
    grid.add_grid_rectangle(GridRect::new(0.0, 0.0, -2.0, 1.0)).unwrap();
    grid.add_grid_line(GridLine::from_coords(1.0, 1.0, 1.0, 1.0)).unwrap();
    grid.display().unwrap();
}

#[test]
fn test_y_down_with_pan() {
    let (_toolkit, session) = session();
    session.set_y_preference(YPreference::Down);
    let grid = GridVisualization::new(&session);
    grid.center_on_grid_point(DVec2::new(1.0, 1.0)).unwrap();
    grid.add_grid_line(GridLine::from_coords(1.0, 1.0, 2.0, 1.0)).unwrap();

    // Pan is -10 per grid point regardless of unit: (10,10) - (10,10) = origin.
    let surface = record(&grid, Size::new(100, 100));
    let line = surface.lines().next().and_then(DrawOp::device_line);
    assert_eq!(line, Some(GridLine::from_coords(50.0, 50.0, 60.0, 50.0)));
}

#[test]
fn test_uncentered_y_up_flips_about_top_edge() {
    let (_toolkit, session) = session();
    session.set_center_visualization(false);
    let grid = GridVisualization::new(&session);
    grid.add_grid_rectangle(GridRect::new(0.0, 0.0, 1.0, 1.0)).unwrap();

    let surface = record(&grid, Size::new(100, 100));
    let bounds = surface.fills().next().and_then(DrawOp::device_rect);
    assert_eq!(bounds, Some(GridRect::new(0.0, -10.0, 10.0, 10.0)));
}

#[test]
fn test_native_transform_is_respected() {
    let (_toolkit, session) = session();
    let grid = GridVisualization::new(&session);
    grid.add_grid_rectangle(GridRect::new(0.0, 0.0, 1.0, 1.0)).unwrap();

    let native = DAffine2::from_scale(DVec2::splat(2.0));
    let mut surface = RecordingSurface::new(Size::new(100, 100)).with_native_transform(native);
    grid.paint(&mut surface).unwrap();

    let bounds = surface.fills().next().and_then(DrawOp::device_rect);
    assert_eq!(bounds, Some(GridRect::new(100.0, 80.0, 20.0, 20.0)));
    assert_eq!(
        grid.view_transform(native, Size::new(100, 100)),
        native * DAffine2::from_translation(DVec2::new(50.0, 50.0))
            * DAffine2::from_scale(DVec2::new(1.0, -1.0))
    );
}

#[test]
fn test_save_png_writes_capture() {
    let (toolkit, session) = session();
    let grid = GridVisualization::new(&session);
    grid.add_grid_rectangle(GridRect::new(0.0, 0.0, 3.0, 3.0)).unwrap();
    grid.display().unwrap();

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("grid.png");
    toolkit.windows()[0].save_png(&path).unwrap();

    let image = image::open(&path).unwrap().to_rgba8();
    assert_eq!(image.dimensions(), (730, 470));
}

//! Integration tests for building sessions from configuration.

use gridvis::{
    open_configured_with, render_to_png, Color, Config, GridRect, HeadlessToolkit, Size,
    YPreference,
};
use tempfile::TempDir;

#[test]
fn test_config_applies_to_session_and_grid() {
    let mut config = Config::default();
    config.window.width = 320;
    config.window.height = 200;
    config.window.y_axis = YPreference::Down;
    config.window.centered = false;
    config.grid.scale_factor = 3.0;
    config.grid.unit = 4;
    config.grid.default_object_color = Color::RED;
    config.axes.visible = true;
    config.axes.color = Color::BLUE;

    let toolkit = HeadlessToolkit::new().unwrap();
    let (session, grid) = open_configured_with(toolkit, &config).unwrap();

    assert_eq!(session.window_size(), Size::new(320, 200));
    assert_eq!(session.y_preference(), YPreference::Down);
    assert!(!session.visualization_centered());
    assert_eq!(grid.scale_factor(), 3.0);
    assert_eq!(grid.unit(), 4);
    assert_eq!(grid.default_object_color(), Color::RED);
    assert!(grid.axes_shown());
    assert_eq!(grid.axes_color(), Color::BLUE);
    assert!(!session.is_displayed());
}

#[test]
fn test_configured_grid_displays_at_configured_size() {
    let mut config = Config::default();
    config.window.width = 120;
    config.window.height = 90;

    let toolkit = HeadlessToolkit::new().unwrap();
    let (_session, grid) = open_configured_with(toolkit.clone(), &config).unwrap();
    grid.display().unwrap();

    let windows = toolkit.windows();
    assert_eq!(windows.len(), 1);
    assert_eq!(windows[0].capture().dimensions(), (120, 90));
}

#[test]
fn test_render_to_png_from_saved_config() {
    let dir = TempDir::new().unwrap();
    let config_path = dir.path().join("config.toml");
    let mut config = Config::default();
    config.grid.background_color = Color::WHITE;
    config.save_to_file(&config_path).unwrap();

    let loaded = Config::load_from_file(&config_path).unwrap();
    let toolkit = HeadlessToolkit::new().unwrap();
    let (session, grid) = open_configured_with(toolkit, &loaded).unwrap();
    grid.add_grid_rectangle(GridRect::new(0.0, 0.0, 2.0, 2.0)).unwrap();

    let png = dir.path().join("scene.png");
    render_to_png(&grid, session.window_size(), &png).unwrap();

    let image = image::open(&png).unwrap().to_rgba8();
    assert_eq!(image.dimensions(), (730, 470));
    assert_eq!(image.get_pixel(0, 0).0, [255, 255, 255, 255]);
}

//! A configurable grid onto which rectangles and lines are drawn.
//!
//! Shapes are given in grid units. Each paint replays the whole scene:
//! background, then the composed view transform (center, Y flip, scale,
//! pan), then axes, rectangles and lines in insertion order.
//!
//! All state sits behind one lock. Mutators release it before requesting a
//! repaint, and paint works on a snapshot, so a repaint never observes a
//! half-applied mutation and never blocks a caller mid-iteration.
//!
//! Scale factors and units are not validated: zero or negative values give
//! empty or mirrored output, never an error.

use crate::panel::Panel;
use crate::session::Visualizer;
use crate::shapes::{ShapeCollection, ShapeEntry, ShapeId};
use crate::surface::{DrawSurface, SurfaceResult};
use crate::view::{compose_view_transform, AxisStyle, ViewState};
use crate::visualization::Visualization;
use glam::{DAffine2, DVec2};
use gridvis_core::{
    Color, ColorStack, GridLine, GridPoint, GridRect, Result, Shape, Size, ToolkitError,
};
use parking_lot::Mutex;
use std::sync::Arc;
use tracing::{debug, trace};

#[derive(Debug, Clone)]
struct GridState {
    view: ViewState,
    shapes: ShapeCollection,
    default_object_color: Color,
    axes: AxisStyle,
    background: Color,
}

impl Default for GridState {
    fn default() -> Self {
        Self {
            view: ViewState::default(),
            shapes: ShapeCollection::new(),
            default_object_color: Color::DARK_GRAY,
            axes: AxisStyle::default(),
            background: Color::PANEL_BACKGROUND,
        }
    }
}

pub struct GridVisualization {
    session: Arc<Visualizer>,
    panel: Panel,
    state: Mutex<GridState>,
}

impl GridVisualization {
    /// Create a grid for `session`, sized to the session's window size.
    pub fn new(session: &Arc<Visualizer>) -> Arc<Self> {
        let panel = Panel::new(session.window_size());
        Arc::new(Self {
            session: Arc::clone(session),
            panel,
            state: Mutex::new(GridState::default()),
        })
    }

    /// Show this grid in its session's window.
    pub fn display(self: &Arc<Self>) -> Result<()> {
        let visualization: Arc<dyn Visualization> = self.clone();
        self.session.display_frame(visualization)
    }

    fn redraw(&self) -> Result<()> {
        self.panel.repaint()
    }

    /// Sets how much to zoom into the grid.
    pub fn set_scale_factor(&self, scale_factor: f64) -> Result<()> {
        self.state.lock().view.scale_factor = scale_factor;
        debug!("Scale factor set to {}", scale_factor);
        self.redraw()
    }

    pub fn scale_factor(&self) -> f64 {
        self.state.lock().view.scale_factor
    }

    /// Multiplies the current scale factor by `multiplier`.
    pub fn zoom(&self, multiplier: f64) -> Result<()> {
        let scale = {
            let mut state = self.state.lock();
            state.view.zoom(multiplier);
            state.view.scale_factor
        };
        debug!("Zoomed by {} to {}", multiplier, scale);
        self.redraw()
    }

    /// Sets how wide, in pixels before scaling, each grid unit is.
    pub fn set_unit(&self, unit: i32) -> Result<()> {
        self.state.lock().view.unit = unit;
        debug!("Grid unit set to {}px", unit);
        self.redraw()
    }

    pub fn unit(&self) -> i32 {
        self.state.lock().view.unit
    }

    /// Color for shapes added without one. Already-added shapes keep theirs.
    pub fn set_default_object_color(&self, color: Color) {
        self.state.lock().default_object_color = color;
    }

    pub fn default_object_color(&self) -> Color {
        self.state.lock().default_object_color
    }

    pub fn set_background_color(&self, color: Color) -> Result<()> {
        self.state.lock().background = color;
        self.redraw()
    }

    pub fn background_color(&self) -> Color {
        self.state.lock().background
    }

    fn add_shape(&self, shape: Shape, color: Option<Color>) -> Result<ShapeId> {
        let id = {
            let mut state = self.state.lock();
            let color = color.unwrap_or(state.default_object_color);
            state.shapes.add(shape, color)
        };
        debug!("Added {:?} as {}", shape, id);
        self.redraw()?;
        Ok(id)
    }

    /// Add a rectangle in grid units, in the default object color.
    pub fn add_grid_rectangle(&self, rect: GridRect) -> Result<ShapeId> {
        self.add_shape(Shape::Rectangle(rect), None)
    }

    pub fn add_grid_rectangle_with_color(&self, rect: GridRect, color: Color) -> Result<ShapeId> {
        self.add_shape(Shape::Rectangle(rect), Some(color))
    }

    /// Add a line in grid units, in the default object color.
    pub fn add_grid_line(&self, line: GridLine) -> Result<ShapeId> {
        self.add_shape(Shape::Line(line), None)
    }

    pub fn add_grid_line_with_color(&self, line: GridLine, color: Color) -> Result<ShapeId> {
        self.add_shape(Shape::Line(line), Some(color))
    }

    /// Remove one shape. Returns whether it was present.
    pub fn remove(&self, id: ShapeId) -> Result<bool> {
        let removed = self.state.lock().shapes.remove(id).is_some();
        if removed {
            debug!("Removed {}", id);
            self.redraw()?;
        }
        Ok(removed)
    }

    /// Clears all shapes from the grid.
    pub fn clear(&self) -> Result<()> {
        self.state.lock().shapes.clear();
        debug!("Cleared grid");
        self.redraw()
    }

    /// Pan so that `point` moves towards the origin.
    ///
    /// Offsets accumulate: the pan grows by `-10 * point` on each call,
    /// independent of the grid unit.
    pub fn center_on_grid_point(&self, point: GridPoint) -> Result<()> {
        self.state.lock().view.center_on(point);
        debug!("Centered on grid point ({}, {})", point.x, point.y);
        self.redraw()
    }

    /// Reset the pan offset.
    pub fn re_center(&self) -> Result<()> {
        self.state.lock().view.re_center();
        self.redraw()
    }

    pub fn pan_offset(&self) -> DVec2 {
        self.state.lock().view.pan
    }

    pub fn show_axes(&self, shown: bool) -> Result<()> {
        self.state.lock().axes.visible = shown;
        self.redraw()
    }

    pub fn axes_shown(&self) -> bool {
        self.state.lock().axes.visible
    }

    /// Set the axis color. Repaints only while the axes are shown.
    pub fn set_axes_color(&self, color: Color) -> Result<()> {
        let shown = {
            let mut state = self.state.lock();
            state.axes.color = color;
            state.axes.visible
        };
        if shown {
            self.redraw()?;
        }
        Ok(())
    }

    /// Set the axis color from 0-255 components.
    pub fn set_axes_rgb(&self, red: u8, green: u8, blue: u8) -> Result<()> {
        self.set_axes_color(Color::from_rgb(red, green, blue))
    }

    pub fn axes_color(&self) -> Color {
        self.state.lock().axes.color
    }

    /// Every shape, in insertion order.
    pub fn shapes(&self) -> Vec<ShapeEntry> {
        self.state.lock().shapes.entries().to_vec()
    }

    pub fn rectangles(&self) -> Vec<(GridRect, Color)> {
        self.state
            .lock()
            .shapes
            .rectangles()
            .map(|(r, c)| (*r, c))
            .collect()
    }

    pub fn lines(&self) -> Vec<(GridLine, Color)> {
        self.state
            .lock()
            .shapes
            .lines()
            .map(|(l, c)| (*l, c))
            .collect()
    }

    pub fn is_empty(&self) -> bool {
        self.state.lock().shapes.is_empty()
    }

    /// The transform a paint onto a surface of `surface_size` would use.
    pub fn view_transform(&self, native: DAffine2, surface_size: Size) -> DAffine2 {
        let view = self.state.lock().view;
        compose_view_transform(native, surface_size, self.session.view_preferences(), &view)
    }

    fn paint_scene(
        surface: &mut dyn DrawSurface,
        scene: &GridState,
        colors: &mut ColorStack,
    ) -> SurfaceResult {
        if scene.axes.visible {
            colors.push(surface.color());
            surface.set_color(scene.axes.color);
            let bounds = surface.display_bounds();
            let (w, h) = (f64::from(bounds.width), f64::from(bounds.height));
            let result = surface
                .draw_line(&GridLine::from_coords(-w, 0.0, w, 0.0))
                .and_then(|_| surface.draw_line(&GridLine::from_coords(0.0, -h, 0.0, h)));
            restore_color(surface, colors);
            result?;
        }

        let unit = scene.view.unit_scale();
        for (rect, color) in scene.shapes.rectangles() {
            colors.push(surface.color());
            surface.set_color(color);
            let result = surface.fill_rect(&rect.scaled(unit));
            restore_color(surface, colors);
            result?;
        }
        for (line, color) in scene.shapes.lines() {
            colors.push(surface.color());
            surface.set_color(color);
            let result = surface.draw_line(&line.scaled(unit));
            restore_color(surface, colors);
            result?;
        }
        Ok(())
    }
}

fn restore_color(surface: &mut dyn DrawSurface, colors: &mut ColorStack) {
    if let Some(color) = colors.pop() {
        surface.set_color(color);
    }
}

impl Visualization for GridVisualization {
    fn session(&self) -> Arc<Visualizer> {
        Arc::clone(&self.session)
    }

    fn panel(&self) -> &Panel {
        &self.panel
    }

    fn paint(&self, surface: &mut dyn DrawSurface) -> std::result::Result<(), ToolkitError> {
        let scene = self.state.lock().clone();
        let prefs = self.session.view_preferences();
        trace!(
            "Painting {} shapes on {} surface",
            scene.shapes.len(),
            surface.size()
        );

        surface.clear(scene.background)?;

        let saved = surface.transform();
        surface.set_transform(compose_view_transform(
            saved,
            surface.size(),
            prefs,
            &scene.view,
        ));
        let mut colors = ColorStack::new();
        let result = Self::paint_scene(surface, &scene, &mut colors);
        surface.set_transform(saved);
        result
    }
}

impl std::fmt::Debug for GridVisualization {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GridVisualization")
            .field("panel", &self.panel)
            .field("state", &*self.state.lock())
            .finish()
    }
}

//! A surface that records draw operations instead of rasterizing them.
//!
//! Every fill and stroke is stored with the transform and color in effect at
//! the time, which makes the render algorithm checkable without pixels.

use crate::surface::{DrawSurface, SurfaceResult};
use glam::DAffine2;
use gridvis_core::{Color, GridLine, GridRect, Size};

/// One recorded draw call.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawOp {
    Clear {
        color: Color,
    },
    FillRect {
        rect: GridRect,
        transform: DAffine2,
        color: Color,
    },
    Line {
        line: GridLine,
        transform: DAffine2,
        color: Color,
    },
}

impl DrawOp {
    pub fn color(&self) -> Color {
        match self {
            DrawOp::Clear { color }
            | DrawOp::FillRect { color, .. }
            | DrawOp::Line { color, .. } => *color,
        }
    }

    /// Device-space bounds of a fill, `None` for other operations.
    pub fn device_rect(&self) -> Option<GridRect> {
        match self {
            DrawOp::FillRect {
                rect, transform, ..
            } => Some(rect.transformed_bounds(transform)),
            _ => None,
        }
    }

    /// Device-space endpoints of a line, `None` for other operations.
    pub fn device_line(&self) -> Option<GridLine> {
        match self {
            DrawOp::Line {
                line, transform, ..
            } => Some(line.transformed(transform)),
            _ => None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct RecordingSurface {
    size: Size,
    display_bounds: Size,
    transform: DAffine2,
    color: Color,
    ops: Vec<DrawOp>,
}

impl RecordingSurface {
    /// Recorder of `size` whose display is the same size.
    pub fn new(size: Size) -> Self {
        Self::with_display_bounds(size, size)
    }

    pub fn with_display_bounds(size: Size, display_bounds: Size) -> Self {
        Self {
            size,
            display_bounds,
            transform: DAffine2::IDENTITY,
            color: Color::BLACK,
            ops: Vec::new(),
        }
    }

    /// Start from a non-identity native transform, as a HiDPI toolkit would.
    pub fn with_native_transform(mut self, transform: DAffine2) -> Self {
        self.transform = transform;
        self
    }

    pub fn ops(&self) -> &[DrawOp] {
        &self.ops
    }

    pub fn fills(&self) -> impl Iterator<Item = &DrawOp> {
        self.ops
            .iter()
            .filter(|op| matches!(op, DrawOp::FillRect { .. }))
    }

    pub fn lines(&self) -> impl Iterator<Item = &DrawOp> {
        self.ops.iter().filter(|op| matches!(op, DrawOp::Line { .. }))
    }
}

impl DrawSurface for RecordingSurface {
    fn size(&self) -> Size {
        self.size
    }

    fn display_bounds(&self) -> Size {
        self.display_bounds
    }

    fn transform(&self) -> DAffine2 {
        self.transform
    }

    fn set_transform(&mut self, transform: DAffine2) {
        self.transform = transform;
    }

    fn color(&self) -> Color {
        self.color
    }

    fn set_color(&mut self, color: Color) {
        self.color = color;
    }

    fn clear(&mut self, color: Color) -> SurfaceResult {
        self.ops.push(DrawOp::Clear { color });
        Ok(())
    }

    fn fill_rect(&mut self, rect: &GridRect) -> SurfaceResult {
        self.ops.push(DrawOp::FillRect {
            rect: *rect,
            transform: self.transform,
            color: self.color,
        });
        Ok(())
    }

    fn draw_line(&mut self, line: &GridLine) -> SurfaceResult {
        self.ops.push(DrawOp::Line {
            line: *line,
            transform: self.transform,
            color: self.color,
        });
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::DVec2;

    #[test]
    fn test_records_transform_and_color() {
        let mut surface = RecordingSurface::new(Size::new(100, 100));
        surface.set_color(Color::RED);
        surface.set_transform(DAffine2::from_translation(DVec2::new(10.0, 0.0)));
        surface.fill_rect(&GridRect::new(0.0, 0.0, 5.0, 5.0)).unwrap();

        let op = &surface.ops()[0];
        assert_eq!(op.color(), Color::RED);
        assert_eq!(op.device_rect(), Some(GridRect::new(10.0, 0.0, 5.0, 5.0)));
        assert_eq!(op.device_line(), None);
    }

    #[test]
    fn test_filters() {
        let mut surface = RecordingSurface::new(Size::new(10, 10));
        surface.clear(Color::WHITE).unwrap();
        surface
            .draw_line(&GridLine::from_coords(0.0, 0.0, 1.0, 1.0))
            .unwrap();
        surface.fill_rect(&GridRect::new(0.0, 0.0, 1.0, 1.0)).unwrap();

        assert_eq!(surface.fills().count(), 1);
        assert_eq!(surface.lines().count(), 1);
        assert_eq!(surface.ops().len(), 3);
        assert!(matches!(surface.ops()[0], DrawOp::Clear { .. }));
    }

    #[test]
    fn test_native_transform() {
        let native = DAffine2::from_scale(DVec2::splat(2.0));
        let surface = RecordingSurface::new(Size::new(10, 10)).with_native_transform(native);
        assert_eq!(surface.transform(), native);
    }
}

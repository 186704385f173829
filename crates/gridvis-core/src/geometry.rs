//! Grid-space geometry.
//!
//! Shapes are stored in grid units and scaled to pixels by the grid unit at
//! paint time. Points are `glam::DVec2`.

use glam::{DAffine2, DVec2};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A point in grid space.
pub type GridPoint = DVec2;

/// Integer pixel size of a window or surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Size {
    pub width: u32,
    pub height: u32,
}

impl Size {
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Integer center, truncating odd dimensions.
    pub fn half(&self) -> DVec2 {
        DVec2::new(f64::from(self.width / 2), f64::from(self.height / 2))
    }

    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }
}

impl fmt::Display for Size {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

/// Axis-aligned rectangle anchored at `(x, y)`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GridRect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl GridRect {
    pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Rectangle multiplied by `factor` about the origin.
    pub fn scaled(&self, factor: f64) -> Self {
        Self::new(
            self.x * factor,
            self.y * factor,
            self.width * factor,
            self.height * factor,
        )
    }

    /// Zero or negative extent; fills of such rectangles paint nothing.
    pub fn is_degenerate(&self) -> bool {
        !(self.width > 0.0 && self.height > 0.0)
    }

    pub fn corners(&self) -> [DVec2; 4] {
        [
            DVec2::new(self.x, self.y),
            DVec2::new(self.x + self.width, self.y),
            DVec2::new(self.x + self.width, self.y + self.height),
            DVec2::new(self.x, self.y + self.height),
        ]
    }

    /// Axis-aligned bounds of this rectangle after `transform`.
    pub fn transformed_bounds(&self, transform: &DAffine2) -> GridRect {
        let mut min = DVec2::splat(f64::INFINITY);
        let mut max = DVec2::splat(f64::NEG_INFINITY);
        for corner in self.corners() {
            let p = transform.transform_point2(corner);
            min = min.min(p);
            max = max.max(p);
        }
        GridRect::new(min.x, min.y, max.x - min.x, max.y - min.y)
    }
}

/// Line segment between two grid points.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GridLine {
    pub start: GridPoint,
    pub end: GridPoint,
}

impl GridLine {
    pub const fn new(start: GridPoint, end: GridPoint) -> Self {
        Self { start, end }
    }

    pub fn from_coords(x1: f64, y1: f64, x2: f64, y2: f64) -> Self {
        Self::new(DVec2::new(x1, y1), DVec2::new(x2, y2))
    }

    pub fn scaled(&self, factor: f64) -> Self {
        Self::new(self.start * factor, self.end * factor)
    }

    pub fn transformed(&self, transform: &DAffine2) -> GridLine {
        GridLine::new(
            transform.transform_point2(self.start),
            transform.transform_point2(self.end),
        )
    }
}

/// A drawable primitive.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Shape {
    /// Filled rectangle
    Rectangle(GridRect),
    /// Stroked line
    Line(GridLine),
}

impl From<GridRect> for Shape {
    fn from(rect: GridRect) -> Self {
        Shape::Rectangle(rect)
    }
}

impl From<GridLine> for Shape {
    fn from(line: GridLine) -> Self {
        Shape::Line(line)
    }
}

//! Ordered shape storage.
//!
//! Entries keep insertion order and get a fresh [`ShapeId`] each, so two
//! entries with identical geometry stay distinct.

use gridvis_core::{Color, GridLine, GridRect, Shape};
use std::fmt;

/// Identity of one added shape, increasing with insertion order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ShapeId(u64);

impl fmt::Display for ShapeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Shape({})", self.0)
    }
}

/// A shape with the color it is painted in.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShapeEntry {
    pub id: ShapeId,
    pub shape: Shape,
    pub color: Color,
}

#[derive(Debug, Clone, Default)]
pub struct ShapeCollection {
    entries: Vec<ShapeEntry>,
    next_id: u64,
}

impl ShapeCollection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, shape: Shape, color: Color) -> ShapeId {
        let id = ShapeId(self.next_id);
        self.next_id += 1;
        self.entries.push(ShapeEntry { id, shape, color });
        id
    }

    pub fn remove(&mut self, id: ShapeId) -> Option<ShapeEntry> {
        let index = self.entries.iter().position(|e| e.id == id)?;
        Some(self.entries.remove(index))
    }

    /// Drop every entry. Ids keep increasing afterwards.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn entries(&self) -> &[ShapeEntry] {
        &self.entries
    }

    /// Rectangles in insertion order.
    pub fn rectangles(&self) -> impl Iterator<Item = (&GridRect, Color)> {
        self.entries.iter().filter_map(|e| match &e.shape {
            Shape::Rectangle(rect) => Some((rect, e.color)),
            Shape::Line(_) => None,
        })
    }

    /// Lines in insertion order.
    pub fn lines(&self) -> impl Iterator<Item = (&GridLine, Color)> {
        self.entries.iter().filter_map(|e| match &e.shape {
            Shape::Line(line) => Some((line, e.color)),
            Shape::Rectangle(_) => None,
        })
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

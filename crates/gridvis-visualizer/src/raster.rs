//! Off-screen surface rasterized with tiny-skia.
//!
//! Features:
//! - Anti-aliased fills and strokes (switchable for pixel-exact tests)
//! - Affine user-to-device transform shared with every backend
//! - Capture to `image::RgbaImage` and PNG

use crate::surface::{DrawSurface, SurfaceResult};
use glam::DAffine2;
use gridvis_core::{Color, GridLine, GridRect, Size, ToolkitError};
use image::RgbaImage;
use std::path::Path;
use tiny_skia::{Paint, PathBuilder, Pixmap, Rect, Stroke, Transform};

const LINE_WIDTH: f32 = 1.0;

pub struct RasterSurface {
    pixmap: Pixmap,
    transform: DAffine2,
    color: Color,
    display_bounds: Size,
    anti_alias: bool,
}

impl RasterSurface {
    /// Surface of `size` on a display of the same size.
    pub fn new(size: Size) -> Result<Self, ToolkitError> {
        Self::with_display_bounds(size, size)
    }

    pub fn with_display_bounds(size: Size, display_bounds: Size) -> Result<Self, ToolkitError> {
        let pixmap = Pixmap::new(size.width, size.height)
            .ok_or_else(|| ToolkitError::surface(format!("Cannot allocate {} pixmap", size)))?;
        Ok(Self {
            pixmap,
            transform: DAffine2::IDENTITY,
            color: Color::BLACK,
            display_bounds,
            anti_alias: true,
        })
    }

    pub fn set_anti_alias(&mut self, anti_alias: bool) {
        self.anti_alias = anti_alias;
    }

    /// Reallocate to `size`, discarding the current content.
    pub fn resize(&mut self, size: Size) -> Result<(), ToolkitError> {
        self.pixmap = Pixmap::new(size.width, size.height)
            .ok_or_else(|| ToolkitError::surface(format!("Cannot allocate {} pixmap", size)))?;
        Ok(())
    }

    /// Color of the pixel at `(x, y)`, `None` outside the surface.
    pub fn pixel(&self, x: u32, y: u32) -> Option<Color> {
        let c = self.pixmap.pixel(x, y)?.demultiply();
        Some(Color::from_rgba(c.red(), c.green(), c.blue(), c.alpha()))
    }

    pub fn to_image(&self) -> RgbaImage {
        let data: Vec<u8> = self
            .pixmap
            .pixels()
            .iter()
            .flat_map(|p| {
                let c = p.demultiply();
                [c.red(), c.green(), c.blue(), c.alpha()]
            })
            .collect();
        RgbaImage::from_raw(self.pixmap.width(), self.pixmap.height(), data)
            .unwrap_or_else(|| RgbaImage::new(self.pixmap.width(), self.pixmap.height()))
    }

    pub fn save_png(&self, path: &Path) -> Result<(), ToolkitError> {
        self.to_image()
            .save(path)
            .map_err(|e| ToolkitError::Capture {
                reason: format!("{}: {}", path.display(), e),
            })
    }

    fn paint(&self) -> Paint<'static> {
        let mut paint = Paint::default();
        paint.set_color_rgba8(self.color.r, self.color.g, self.color.b, self.color.a);
        paint.anti_alias = self.anti_alias;
        paint
    }

    fn skia_transform(&self) -> Transform {
        let [sx, ky, kx, sy, tx, ty] = self.transform.to_cols_array();
        Transform::from_row(
            sx as f32, ky as f32, kx as f32, sy as f32, tx as f32, ty as f32,
        )
    }
}

impl DrawSurface for RasterSurface {
    fn size(&self) -> Size {
        Size::new(self.pixmap.width(), self.pixmap.height())
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
        self.pixmap
            .fill(tiny_skia::Color::from_rgba8(color.r, color.g, color.b, color.a));
        Ok(())
    }

    fn fill_rect(&mut self, rect: &GridRect) -> SurfaceResult {
        // Zero or negative extents paint nothing.
        if rect.is_degenerate() {
            return Ok(());
        }
        let Some(r) = Rect::from_xywh(
            rect.x as f32,
            rect.y as f32,
            rect.width as f32,
            rect.height as f32,
        ) else {
            return Ok(());
        };
        let paint = self.paint();
        let transform = self.skia_transform();
        self.pixmap.fill_rect(r, &paint, transform, None);
        Ok(())
    }

    fn draw_line(&mut self, line: &GridLine) -> SurfaceResult {
        let mut pb = PathBuilder::new();
        pb.move_to(line.start.x as f32, line.start.y as f32);
        pb.line_to(line.end.x as f32, line.end.y as f32);
        let Some(path) = pb.finish() else {
            return Ok(());
        };
        let stroke = Stroke {
            width: LINE_WIDTH,
            ..Default::default()
        };
        let paint = self.paint();
        let transform = self.skia_transform();
        self.pixmap
            .stroke_path(&path, &paint, &stroke, transform, None);
        Ok(())
    }
}

impl std::fmt::Debug for RasterSurface {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RasterSurface")
            .field("size", &self.size())
            .field("display_bounds", &self.display_bounds)
            .field("anti_alias", &self.anti_alias)
            .finish()
    }
}

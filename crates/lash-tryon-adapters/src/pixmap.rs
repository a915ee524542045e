//! Raster display surface backed by tiny-skia.
#![allow(clippy::cast_precision_loss)]

use std::path::Path;

use anyhow::{Context, Result};
use image::{Rgba, RgbaImage};
use lash_tryon_core::domain::{Point2, Size2};
use lash_tryon_core::ports::DisplaySurface;
use tiny_skia::{FillRule, FilterQuality, Paint, PathBuilder, Pixmap, PixmapPaint, Transform};
use tracing::warn;

/// Display surface that rasterizes into an in-memory pixmap.
///
/// Drawing is bilinear-filtered and alpha-composited; the same draw
/// sequence always produces the same pixel bytes, so a composed frame can
/// be compared or re-encoded byte for byte.
pub struct PixmapSurface {
    pixmap: Pixmap,
}

impl PixmapSurface {
    /// Creates a transparent surface of the given pixel size.
    ///
    /// # Errors
    ///
    /// Returns an error if either dimension is zero.
    pub fn new(width: u32, height: u32) -> Result<Self> {
        let pixmap = Pixmap::new(width, height)
            .with_context(|| format!("Invalid surface size {width}x{height}"))?;
        Ok(Self { pixmap })
    }

    /// The backing pixmap.
    #[must_use]
    pub fn pixmap(&self) -> &Pixmap {
        &self.pixmap
    }

    /// Encodes the surface content as PNG.
    ///
    /// # Errors
    ///
    /// Returns an error if PNG encoding fails.
    pub fn encode_png(&self) -> Result<Vec<u8>> {
        self.pixmap
            .encode_png()
            .context("Failed to encode surface as PNG")
    }

    /// Writes the surface content to a PNG file.
    ///
    /// # Errors
    ///
    /// Returns an error if encoding or the write fails.
    pub fn save_png(&self, path: &Path) -> Result<()> {
        self.pixmap
            .save_png(path)
            .with_context(|| format!("Failed to write {}", path.display()))
    }
}

impl DisplaySurface for PixmapSurface {
    fn size(&self) -> Size2 {
        Size2::new(self.pixmap.width(), self.pixmap.height())
    }

    fn clear(&mut self) {
        self.pixmap.fill(tiny_skia::Color::TRANSPARENT);
    }

    fn draw_image(&mut self, pixels: &RgbaImage, x: f32, y: f32, width: f32, height: f32) {
        let (src_w, src_h) = pixels.dimensions();
        if src_w == 0 || src_h == 0 || width <= 0.0 || height <= 0.0 {
            return;
        }
        let Some(source) = raster_to_pixmap(pixels) else {
            warn!("source raster {src_w}x{src_h} not drawable");
            return;
        };

        let transform = Transform::from_row(
            width / src_w as f32,
            0.0,
            0.0,
            height / src_h as f32,
            x,
            y,
        );
        let paint = PixmapPaint {
            quality: FilterQuality::Bilinear,
            ..PixmapPaint::default()
        };
        self.pixmap
            .draw_pixmap(0, 0, source.as_ref(), &paint, transform, None);
    }

    fn fill_circle(&mut self, center: Point2, radius: f32, color: Rgba<u8>) {
        if radius <= 0.0 {
            return;
        }
        let Some(path) = PathBuilder::from_circle(center.x, center.y, radius) else {
            return;
        };
        let mut paint = Paint::default();
        paint.set_color_rgba8(color.0[0], color.0[1], color.0[2], color.0[3]);
        paint.anti_alias = true;
        self.pixmap
            .fill_path(&path, &paint, FillRule::Winding, Transform::identity(), None);
    }
}

/// Copies a straight-alpha raster into a premultiplied pixmap.
fn raster_to_pixmap(pixels: &RgbaImage) -> Option<Pixmap> {
    let (width, height) = pixels.dimensions();
    let mut pixmap = Pixmap::new(width, height)?;
    for (source, target) in pixels.pixels().zip(pixmap.pixels_mut()) {
        let [r, g, b, a] = source.0;
        *target = tiny_skia::ColorU8::from_rgba(r, g, b, a).premultiply();
    }
    Some(pixmap)
}

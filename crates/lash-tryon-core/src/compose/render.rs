//! Painting the composed frame onto a display surface.

#![allow(clippy::cast_precision_loss)]

use image::Rgba;
use tracing::debug;

use super::{FitTransform, OverlayPlacement};
use crate::domain::{LandmarkSet, OverlayAsset, SourceImage};
use crate::ports::DisplaySurface;

/// Style of the landmark debug markers.
#[derive(Debug, Clone, PartialEq)]
pub struct MarkerStyle {
    /// Marker radius in surface pixels.
    pub radius: f32,
    /// Marker fill color.
    pub color: Rgba<u8>,
}

impl Default for MarkerStyle {
    fn default() -> Self {
        Self {
            radius: 2.0,
            color: Rgba([255, 0, 0, 255]),
        }
    }
}

/// Options controlling what [`render`] paints beyond the photo itself.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RenderOptions {
    /// Draw a marker on every landmark point.
    pub draw_landmarks: bool,
    /// Marker style used when `draw_landmarks` is set.
    pub marker: MarkerStyle,
}

/// Paints a composed frame: photo, optional landmark markers, optional
/// overlay.
///
/// The surface is cleared first, then the photo is drawn at the
/// transform's offset scaled by its factor, then markers for each landmark
/// (when enabled), then the overlay at its placement. All side effects are
/// confined to `surface`; re-invoking with identical inputs reproduces the
/// identical surface content.
///
/// A degenerate transform only clears the surface; nothing else is drawn.
pub fn render(
    surface: &mut dyn DisplaySurface,
    image: &SourceImage,
    transform: FitTransform,
    landmarks: Option<&LandmarkSet>,
    overlay: Option<(&OverlayAsset, OverlayPlacement)>,
    options: &RenderOptions,
) {
    surface.clear();

    if transform.is_degenerate() {
        debug!("degenerate fit transform, nothing to draw");
        return;
    }

    surface.draw_image(
        &image.pixels,
        transform.offset_x,
        transform.offset_y,
        image.width as f32 * transform.scale,
        image.height as f32 * transform.scale,
    );

    if options.draw_landmarks {
        if let Some(points) = landmarks {
            for point in points.iter() {
                surface.fill_circle(
                    transform.to_surface(point),
                    options.marker.radius,
                    options.marker.color,
                );
            }
        }
    }

    if let Some((asset, placement)) = overlay {
        surface.draw_image(
            &asset.pixels,
            placement.x,
            placement.y,
            placement.width,
            placement.height,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Point2, Size2};
    use image::RgbaImage;

    /// Minimal surface that counts primitive calls.
    #[derive(Default)]
    struct CountingSurface {
        size: Size2,
        clears: usize,
        images: usize,
        circles: usize,
    }

    impl DisplaySurface for CountingSurface {
        fn size(&self) -> Size2 {
            self.size
        }

        fn clear(&mut self) {
            self.clears += 1;
        }

        fn draw_image(&mut self, _: &RgbaImage, _: f32, _: f32, _: f32, _: f32) {
            self.images += 1;
        }

        fn fill_circle(&mut self, _: Point2, _: f32, _: Rgba<u8>) {
            self.circles += 1;
        }
    }

    fn photo() -> SourceImage {
        SourceImage::new("test.jpg", RgbaImage::new(4, 4))
    }

    #[test]
    fn test_degenerate_transform_only_clears() {
        let mut surface = CountingSurface::default();
        let degenerate = FitTransform {
            scale: 0.0,
            offset_x: 0.0,
            offset_y: 0.0,
        };

        render(&mut surface, &photo(), degenerate, None, None, &RenderOptions::default());

        assert_eq!(surface.clears, 1);
        assert_eq!(surface.images, 0);
        assert_eq!(surface.circles, 0);
    }

    #[test]
    fn test_markers_only_drawn_in_debug_mode() {
        let transform = FitTransform {
            scale: 1.0,
            offset_x: 0.0,
            offset_y: 0.0,
        };
        let landmarks = LandmarkSet::new(vec![Point2::new(1.0, 1.0), Point2::new(2.0, 2.0)]);

        let mut plain = CountingSurface::default();
        render(
            &mut plain,
            &photo(),
            transform,
            Some(&landmarks),
            None,
            &RenderOptions::default(),
        );
        assert_eq!(plain.circles, 0);

        let mut debug = CountingSurface::default();
        let options = RenderOptions {
            draw_landmarks: true,
            ..RenderOptions::default()
        };
        render(&mut debug, &photo(), transform, Some(&landmarks), None, &options);
        assert_eq!(debug.circles, 2);
    }

    #[test]
    fn test_overlay_adds_second_image_draw() {
        let transform = FitTransform {
            scale: 1.0,
            offset_x: 0.0,
            offset_y: 0.0,
        };
        let asset = OverlayAsset::new("natural", RgbaImage::new(2, 1));
        let placement = OverlayPlacement {
            x: 1.0,
            y: 1.0,
            width: 2.0,
            height: 1.0,
        };

        let mut surface = CountingSurface::default();
        render(
            &mut surface,
            &photo(),
            transform,
            None,
            Some((&asset, placement)),
            &RenderOptions::default(),
        );

        assert_eq!(surface.clears, 1);
        assert_eq!(surface.images, 2);
    }

    #[test]
    fn test_default_marker_is_small_red_dot() {
        let marker = MarkerStyle::default();
        assert!((marker.radius - 2.0).abs() < f32::EPSILON);
        assert_eq!(marker.color, Rgba([255, 0, 0, 255]));
    }
}

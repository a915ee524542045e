//! Scale-to-fit transform between image space and surface space.

#![allow(clippy::cast_precision_loss)]

use tracing::debug;

use crate::domain::{Point2, Size2};

/// Mapping from source image space into surface space.
///
/// The image is scaled uniformly by `scale` and centered with the two
/// offsets (letterbox or pillarbox margins appear when the aspect ratios
/// differ). The same mapping applies to the drawn image and to every
/// landmark, so landmarks stay visually aligned with image features at any
/// surface size.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FitTransform {
    /// Uniform scale factor, `min(W/w, H/h)`.
    pub scale: f32,
    /// Horizontal offset of the scaled image, in surface pixels.
    pub offset_x: f32,
    /// Vertical offset of the scaled image, in surface pixels.
    pub offset_y: f32,
}

impl FitTransform {
    /// Maps a point from source image space into surface space.
    #[must_use]
    pub fn to_surface(&self, point: Point2) -> Point2 {
        Point2::new(
            self.offset_x + point.x * self.scale,
            self.offset_y + point.y * self.scale,
        )
    }

    /// True when the transform collapses everything to nothing; rendering
    /// with a degenerate transform is a defined no-op, not an error.
    #[must_use]
    pub fn is_degenerate(&self) -> bool {
        self.scale <= 0.0
    }
}

/// Computes the transform that fits a source image into a surface.
///
/// The scale is the minimum of the horizontal and vertical ratios, so the
/// aspect ratio is preserved and nothing is cropped. A surface with a zero
/// dimension yields scale 0. The result depends only on the two sizes;
/// identical inputs always produce identical output.
#[must_use]
pub fn compute_fit_transform(source: Size2, surface: Size2) -> FitTransform {
    if source.is_empty() {
        // Outside the provider contract; map it to the degenerate no-op
        // rather than dividing by zero.
        return FitTransform {
            scale: 0.0,
            offset_x: 0.0,
            offset_y: 0.0,
        };
    }

    let scale = f32::min(
        surface.width as f32 / source.width as f32,
        surface.height as f32 / source.height as f32,
    );

    let transform = FitTransform {
        scale,
        offset_x: (surface.width as f32 - source.width as f32 * scale) / 2.0,
        offset_y: (surface.height as f32 - source.height as f32 * scale) / 2.0,
    };

    debug!(
        "fit {source} into {surface}: scale={:.4} offset=({:.1}, {:.1})",
        transform.scale, transform.offset_x, transform.offset_y
    );

    transform
}

#[cfg(test)]
#[allow(clippy::float_cmp)]
mod tests {
    use super::*;

    const EPS: f32 = 1e-4;

    // === Fit Scale ===

    #[test]
    fn test_wide_surface_pillarboxes() {
        // 400x300 into 800x300: height limits the scale.
        let t = compute_fit_transform(Size2::new(400, 300), Size2::new(800, 300));
        assert_eq!(t.scale, 1.0);
        assert_eq!(t.offset_x, 200.0);
        assert_eq!(t.offset_y, 0.0);
    }

    #[test]
    fn test_tall_surface_letterboxes() {
        let t = compute_fit_transform(Size2::new(200, 100), Size2::new(200, 400));
        assert_eq!(t.scale, 1.0);
        assert_eq!(t.offset_x, 0.0);
        assert_eq!(t.offset_y, 150.0);
    }

    #[test]
    fn test_exact_fit_has_no_margins() {
        let t = compute_fit_transform(Size2::new(320, 240), Size2::new(640, 480));
        assert_eq!(t.scale, 2.0);
        assert_eq!(t.offset_x, 0.0);
        assert_eq!(t.offset_y, 0.0);
    }

    #[test]
    fn test_downscale() {
        let t = compute_fit_transform(Size2::new(4000, 3000), Size2::new(400, 300));
        assert!((t.scale - 0.1).abs() < EPS);
    }

    #[test]
    fn test_never_overflows_surface() {
        let sizes = [
            (Size2::new(13, 977), Size2::new(640, 480)),
            (Size2::new(3024, 4032), Size2::new(375, 667)),
            (Size2::new(1, 1), Size2::new(999, 7)),
            (Size2::new(800, 600), Size2::new(800, 600)),
        ];
        for (source, surface) in sizes {
            let t = compute_fit_transform(source, surface);
            let w = source.width as f32 * t.scale;
            let h = source.height as f32 * t.scale;
            assert!(w <= surface.width as f32 + EPS, "{source} in {surface}");
            assert!(h <= surface.height as f32 + EPS, "{source} in {surface}");
            // At least one dimension fits exactly.
            let exact_w = (w - surface.width as f32).abs() < EPS;
            let exact_h = (h - surface.height as f32).abs() < EPS;
            assert!(exact_w || exact_h, "{source} in {surface}");
        }
    }

    #[test]
    fn test_determinism() {
        let a = compute_fit_transform(Size2::new(1234, 777), Size2::new(390, 844));
        let b = compute_fit_transform(Size2::new(1234, 777), Size2::new(390, 844));
        assert_eq!(a, b);
    }

    // === Degenerate Surfaces ===

    #[test]
    fn test_zero_width_surface_is_degenerate() {
        let t = compute_fit_transform(Size2::new(400, 300), Size2::new(0, 300));
        assert_eq!(t.scale, 0.0);
        assert!(t.is_degenerate());
    }

    #[test]
    fn test_zero_height_surface_is_degenerate() {
        let t = compute_fit_transform(Size2::new(400, 300), Size2::new(800, 0));
        assert_eq!(t.scale, 0.0);
        assert!(t.is_degenerate());
    }

    #[test]
    fn test_empty_source_is_degenerate() {
        let t = compute_fit_transform(Size2::new(0, 300), Size2::new(800, 600));
        assert!(t.is_degenerate());
    }

    // === Point Mapping ===

    #[test]
    fn test_to_surface_applies_scale_and_offset() {
        let t = FitTransform {
            scale: 2.0,
            offset_x: 10.0,
            offset_y: 20.0,
        };
        let p = t.to_surface(Point2::new(5.0, 7.0));
        assert_eq!(p, Point2::new(20.0, 34.0));
    }

    #[test]
    fn test_to_surface_is_linear() {
        let t = compute_fit_transform(Size2::new(640, 480), Size2::new(360, 800));
        let p1 = Point2::new(123.0, 45.0);
        let p2 = Point2::new(17.5, 400.25);

        let lhs = t.to_surface(p1) - t.to_surface(p2);
        let rhs = (p1 - p2) * t.scale;

        assert!((lhs.x - rhs.x).abs() < EPS);
        assert!((lhs.y - rhs.y).abs() < EPS);
    }

    #[test]
    fn test_image_corners_map_inside_surface() {
        let source = Size2::new(400, 300);
        let surface = Size2::new(800, 300);
        let t = compute_fit_transform(source, surface);

        let top_left = t.to_surface(Point2::new(0.0, 0.0));
        let bottom_right = t.to_surface(Point2::new(400.0, 300.0));

        assert_eq!(top_left, Point2::new(200.0, 0.0));
        assert_eq!(bottom_right, Point2::new(600.0, 300.0));
    }
}

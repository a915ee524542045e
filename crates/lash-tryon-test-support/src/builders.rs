//! Synthetic fixture builders for testing.
#![allow(clippy::cast_precision_loss)]

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as BASE64;
use image::{Rgba, RgbaImage};
use lash_tryon_core::domain::{
    FaceMesh, LandmarkSet, OverlayAsset, Point2, SourceImage, landmark_index,
};

/// Builder for synthetic test fixtures.
///
/// Provides portraits, landmark sets with known eye positions, overlay
/// rasters, and the encoded payloads providers deliver them in.
pub struct SyntheticFixtures;

impl SyntheticFixtures {
    /// Points in the full face-mesh topology.
    pub const MESH_POINT_COUNT: usize = 468;

    // === Portraits ===

    /// Creates a portrait-like raster: a warm base with a darker band at
    /// eye height, so the image is visibly not a flat fill.
    #[must_use]
    pub fn portrait(width: u32, height: u32) -> RgbaImage {
        let eye_band = height / 3;
        let band_rows = height.div_ceil(12).max(1);
        RgbaImage::from_fn(width, height, |_, y| {
            if y >= eye_band && y < eye_band + band_rows {
                Rgba([96, 64, 48, 255])
            } else {
                Rgba([224, 188, 154, 255])
            }
        })
    }

    /// Creates a portrait wrapped as a decoded source photo.
    #[must_use]
    pub fn portrait_image(uri: &str, width: u32, height: u32) -> SourceImage {
        SourceImage::new(uri, Self::portrait(width, height))
    }

    /// PNG encoding of a portrait.
    #[must_use]
    pub fn portrait_png(width: u32, height: u32) -> Vec<u8> {
        Self::png_bytes(&Self::portrait(width, height))
    }

    /// Base64 of a portrait PNG, as a capture provider would deliver it.
    #[must_use]
    pub fn portrait_base64(width: u32, height: u32) -> String {
        BASE64.encode(Self::portrait_png(width, height))
    }

    // === Landmark Sets ===

    /// Creates a full-topology landmark set with the left-eye reference
    /// corners at the given image-space positions.
    ///
    /// The remaining points sit on a neutral grid, with the right-eye
    /// corners mirrored from the left so the set reads like a face.
    #[must_use]
    pub fn landmarks_with_eyes(left_ref: (f32, f32), right_ref: (f32, f32)) -> LandmarkSet {
        let mut points: Vec<Point2> = (0..Self::MESH_POINT_COUNT)
            .map(|i| {
                let col = (i % 24) as f32;
                let row = (i / 24) as f32;
                Point2::new(col * 4.0, row * 4.0)
            })
            .collect();

        let eye_width = right_ref.0 - left_ref.0;
        points[landmark_index::LEFT_EYE_OUTER] = Point2::new(left_ref.0, left_ref.1);
        points[landmark_index::LEFT_EYE_INNER] = Point2::new(right_ref.0, right_ref.1);
        points[landmark_index::RIGHT_EYE_INNER] = Point2::new(right_ref.0 + eye_width, right_ref.1);
        points[landmark_index::RIGHT_EYE_OUTER] =
            Point2::new(right_ref.0 + 2.0 * eye_width, right_ref.1);
        LandmarkSet::new(points)
    }

    /// Creates one detected face with the given eye reference corners.
    #[must_use]
    pub fn face_with_eyes(left_ref: (f32, f32), right_ref: (f32, f32)) -> FaceMesh {
        FaceMesh {
            points: Self::landmarks_with_eyes(left_ref, right_ref),
        }
    }

    /// Creates a landmark set too short to contain the overlay reference
    /// indices.
    #[must_use]
    pub fn sparse_landmarks(count: usize) -> LandmarkSet {
        (0..count)
            .map(|i| Point2::new(i as f32, 0.0))
            .collect::<Vec<_>>()
            .into()
    }

    // === Overlays ===

    /// Creates an eyelash-like raster: an opaque dark fringe along the top
    /// edge, transparent below.
    #[must_use]
    pub fn lash_raster(width: u32, height: u32) -> RgbaImage {
        let fringe_rows = height.div_ceil(3).max(1);
        RgbaImage::from_fn(width, height, |_, y| {
            if y < fringe_rows {
                Rgba([20, 12, 10, 255])
            } else {
                Rgba([0, 0, 0, 0])
            }
        })
    }

    /// Creates a catalog-style overlay asset around a lash raster.
    #[must_use]
    pub fn lash_overlay(name: &str, width: u32, height: u32) -> OverlayAsset {
        OverlayAsset::new(name, Self::lash_raster(width, height))
    }

    // === Encoded Payloads ===

    /// PNG-encodes a raster.
    ///
    /// # Panics
    ///
    /// Panics if the raster cannot be PNG-encoded (zero-sized rasters).
    #[must_use]
    pub fn png_bytes(pixels: &RgbaImage) -> Vec<u8> {
        let mut encoded = Vec::new();
        image::DynamicImage::ImageRgba8(pixels.clone())
            .write_to(
                &mut std::io::Cursor::new(&mut encoded),
                image::ImageFormat::Png,
            )
            .expect("PNG-encode in-memory raster");
        encoded
    }

    /// Base64 of the PNG encoding, as a capture provider would deliver it.
    #[must_use]
    pub fn png_base64(pixels: &RgbaImage) -> String {
        BASE64.encode(Self::png_bytes(pixels))
    }

    /// Sidecar-file JSON for the given faces.
    ///
    /// # Panics
    ///
    /// Panics if serialization fails, which the landmark types do not do.
    #[must_use]
    pub fn sidecar_json(faces: &[FaceMesh]) -> String {
        serde_json::to_string_pretty(faces).expect("serialize landmark sidecar")
    }
}

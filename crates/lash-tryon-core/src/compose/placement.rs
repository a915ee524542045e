//! Landmark-relative overlay placement.

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use super::FitTransform;
use crate::domain::{LandmarkSet, Point2};

/// Tuning values for the overlay placement.
///
/// These reproduce empirically chosen constants, not derived geometry;
/// they are kept as data so they can be adjusted without touching the
/// placement math.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct OverlayTuning {
    /// Fraction of the overlay width by which the asset leads past the
    /// outer reference corner.
    pub lead_fraction: f32,
    /// Fraction of the overlay height used to center it vertically on the
    /// reference landmark.
    pub vertical_anchor: f32,
    /// Overlay height as a fraction of its width.
    pub aspect_ratio: f32,
}

impl Default for OverlayTuning {
    fn default() -> Self {
        Self {
            lead_fraction: 0.25,
            vertical_anchor: 0.5,
            aspect_ratio: 0.5,
        }
    }
}

/// Where and how large an overlay asset is drawn, in surface space.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OverlayPlacement {
    /// Left edge of the overlay rectangle.
    pub x: f32,
    /// Top edge of the overlay rectangle.
    pub y: f32,
    /// Overlay width; never negative.
    pub width: f32,
    /// Overlay height; never negative.
    pub height: f32,
}

/// Caller-contract violations around overlay placement.
///
/// These indicate placement was attempted before landmarks were ready; a
/// logic fault to fix, not a runtime condition to show the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum PlacementError {
    /// The landmark set does not contain the requested reference index.
    #[error("reference landmark {index} missing (set has {available} points)")]
    MissingReferenceLandmark {
        /// Topology index that was looked up.
        index: usize,
        /// Number of points actually in the set.
        available: usize,
    },
}

/// Looks up the overlay's two reference landmarks in a set.
///
/// The caller is responsible for checking landmark availability before
/// placing an overlay; a set that lacks a reference index is reported as
/// [`PlacementError::MissingReferenceLandmark`] rather than guessed around.
///
/// # Errors
///
/// Returns an error if either index is beyond the end of the set.
pub fn reference_points(
    landmarks: &LandmarkSet,
    pair: (usize, usize),
) -> Result<(Point2, Point2), PlacementError> {
    let lookup = |index: usize| {
        landmarks
            .point(index)
            .ok_or(PlacementError::MissingReferenceLandmark {
                index,
                available: landmarks.len(),
            })
    };
    Ok((lookup(pair.0)?, lookup(pair.1)?))
}

/// Computes the overlay rectangle from two reference landmarks.
///
/// The reference points are in source image space; the result is in
/// surface space under the given transform. The width follows the measured
/// eye width (normalized to non-negative, since providers do not guarantee
/// the corner ordering), the height follows the configured aspect ratio,
/// and the rectangle is anchored on the outer corner shifted by the tuning
/// fractions.
///
/// Pure function of its inputs; no hidden state.
#[must_use]
pub fn compute_overlay_placement(
    left_ref: Point2,
    right_ref: Point2,
    transform: FitTransform,
    tuning: &OverlayTuning,
) -> OverlayPlacement {
    let width = (right_ref.x - left_ref.x).abs() * transform.scale;
    let height = width * tuning.aspect_ratio;
    let anchor = transform.to_surface(left_ref);

    let placement = OverlayPlacement {
        x: anchor.x - width * tuning.lead_fraction,
        y: anchor.y - height * tuning.vertical_anchor,
        width,
        height,
    };

    debug!(
        "overlay placement: ({:.1}, {:.1}) {:.1}x{:.1}",
        placement.x, placement.y, placement.width, placement.height
    );

    placement
}

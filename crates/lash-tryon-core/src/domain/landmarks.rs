//! Facial landmark sets and the anatomical index table.

use serde::{Deserialize, Serialize};

use super::Point2;

/// Named indices into the face-mesh landmark topology.
///
/// The landmark provider emits points in a fixed topology order; the index
/// of a point is its stable identity. These constants name the anatomical
/// references the compositor uses, from the viewer's perspective, so the
/// mapping stays documented and swappable if the provider's index scheme
/// ever changes.
pub mod landmark_index {
    /// Outer corner of the viewer-left eye.
    pub const LEFT_EYE_OUTER: usize = 33;
    /// Inner corner of the viewer-left eye.
    pub const LEFT_EYE_INNER: usize = 133;
    /// Inner corner of the viewer-right eye.
    pub const RIGHT_EYE_INNER: usize = 362;
    /// Outer corner of the viewer-right eye.
    pub const RIGHT_EYE_OUTER: usize = 263;

    /// Reference pair the eyelash overlay anchors to: (outer, inner) corner
    /// of the viewer-left eye.
    pub const OVERLAY_REFERENCE: (usize, usize) = (LEFT_EYE_OUTER, LEFT_EYE_INNER);
}

/// An ordered, index-addressable sequence of landmark points.
///
/// Produced once per processed image and replaced wholesale on the next
/// capture; never mutated in place. A set is only meaningful paired with
/// the exact image it was computed from.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LandmarkSet {
    points: Vec<Point2>,
}

impl LandmarkSet {
    /// Creates a landmark set from points in topology order.
    #[must_use]
    pub const fn new(points: Vec<Point2>) -> Self {
        Self { points }
    }

    /// Returns the point at the given topology index, if the set is long
    /// enough to contain it.
    #[must_use]
    pub fn point(&self, index: usize) -> Option<Point2> {
        self.points.get(index).copied()
    }

    /// Number of points in the set.
    #[must_use]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Returns true if the set contains no points.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Iterates over all points in topology order.
    pub fn iter(&self) -> impl Iterator<Item = Point2> + '_ {
        self.points.iter().copied()
    }
}

impl From<Vec<Point2>> for LandmarkSet {
    fn from(points: Vec<Point2>) -> Self {
        Self::new(points)
    }
}

/// One detected face: its full landmark set in topology order.
///
/// The serde shape doubles as the sidecar file schema, one object per face
/// with its `points` array.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FaceMesh {
    /// All landmark points for this face.
    pub points: LandmarkSet,
}

/// Picks the face the compositor should work with.
///
/// Providers return one mesh per detected face, in provider order. The
/// try-on flow uses the first one; this policy is a plain function so it
/// can be swapped or tested independently of any provider.
#[must_use]
pub fn select_primary_face(faces: &[FaceMesh]) -> Option<&FaceMesh> {
    faces.first()
}

#[cfg(test)]
#[allow(clippy::cast_precision_loss)]
mod tests {
    use super::*;

    fn mesh(n: usize) -> FaceMesh {
        FaceMesh {
            points: (0..n)
                .map(|i| Point2::new(i as f32, i as f32))
                .collect::<Vec<_>>()
                .into(),
        }
    }

    #[test]
    fn test_point_lookup_in_range() {
        let set = LandmarkSet::new(vec![Point2::new(1.0, 2.0), Point2::new(3.0, 4.0)]);
        assert_eq!(set.point(1), Some(Point2::new(3.0, 4.0)));
    }

    #[test]
    fn test_point_lookup_out_of_range() {
        let set = LandmarkSet::new(vec![Point2::new(1.0, 2.0)]);
        assert_eq!(set.point(1), None);
        assert_eq!(set.point(landmark_index::LEFT_EYE_INNER), None);
    }

    #[test]
    fn test_empty_set() {
        let set = LandmarkSet::default();
        assert!(set.is_empty());
        assert_eq!(set.len(), 0);
        assert_eq!(set.point(0), None);
    }

    #[test]
    fn test_select_primary_face_takes_first() {
        let faces = vec![mesh(3), mesh(5)];
        let primary = select_primary_face(&faces);
        assert_eq!(primary.map(|f| f.points.len()), Some(3));
    }

    #[test]
    fn test_select_primary_face_empty() {
        assert!(select_primary_face(&[]).is_none());
    }

    #[test]
    fn test_overlay_reference_pair_is_left_eye() {
        let (outer, inner) = landmark_index::OVERLAY_REFERENCE;
        assert_eq!(outer, landmark_index::LEFT_EYE_OUTER);
        assert_eq!(inner, landmark_index::LEFT_EYE_INNER);
    }
}

//! Core domain types for the lash try-on session.

mod geometry;
mod image;
mod landmarks;
mod session;

pub use geometry::{Point2, Size2};
pub use image::{OverlayAsset, SourceImage};
pub use landmarks::{FaceMesh, LandmarkSet, landmark_index, select_primary_face};
pub use session::{Session, SessionPhase};

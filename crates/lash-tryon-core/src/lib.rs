//! Lash Tryon Core - Domain logic and the image compositor
//!
//! This crate contains the core domain types, the pure compositing math
//! (fit transform, overlay placement, rendering), the port traits for the
//! platform capabilities (capture, storage, landmark detection, display
//! surface, notices), and the session controller driving the try-on flow.

pub mod compose;
pub mod controller;
pub mod domain;
pub mod ports;

pub use compose::{
    FitTransform, MarkerStyle, OverlayPlacement, OverlayTuning, PlacementError, RenderOptions,
    compute_fit_transform, compute_overlay_placement, reference_points, render,
};
pub use controller::{CaptureOutcome, SessionConfig, SessionController};
pub use domain::{
    FaceMesh, LandmarkSet, OverlayAsset, Point2, Session, SessionPhase, Size2, SourceImage,
    landmark_index, select_primary_face,
};
pub use ports::{
    CaptureError, CapturePort, CapturedPhoto, DEFAULT_CAPTURE_QUALITY, DetectError, DisplaySurface,
    LandmarkPort, Notice, NoticeSink, PhotoSource, StorageError, StoragePort, StoredPhoto,
};

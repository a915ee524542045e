//! Port definitions for the platform capabilities.
//!
//! These traits define the boundaries between the compositor core and the
//! external providers it delegates to: photo capture, file persistence,
//! landmark inference, the paintable display surface, and user notices.

mod capture;
mod detector;
mod notice;
mod storage;
mod surface;

pub use capture::{
    CaptureError, CapturePort, CapturedPhoto, DEFAULT_CAPTURE_QUALITY, PhotoSource,
};
pub use detector::{DetectError, LandmarkPort};
pub use notice::{Notice, NoticeSink};
pub use storage::{StorageError, StoragePort, StoredPhoto};
pub use surface::DisplaySurface;

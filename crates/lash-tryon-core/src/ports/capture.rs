//! Capture port for obtaining a photo from the camera or library.

use thiserror::Error;

/// Capture quality hint passed to the provider when none is configured.
pub const DEFAULT_CAPTURE_QUALITY: u8 = 90;

/// Where the capture provider should take the photo from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PhotoSource {
    /// Take a new photo with the device camera.
    Camera,
    /// Pick an existing photo from the library.
    Library,
}

/// A photo as delivered by the capture provider.
#[derive(Debug, Clone)]
pub struct CapturedPhoto {
    /// Base64-encoded image payload (JPEG or PNG).
    pub base64_data: String,
}

/// Why a capture produced no photo.
#[derive(Debug, Clone, Error)]
pub enum CaptureError {
    /// The user dismissed the picker without choosing a photo.
    #[error("capture cancelled by user")]
    Cancelled,
    /// The camera or picker failed.
    #[error("capture device failed: {0}")]
    Device(String),
}

/// Port for the platform photo capture capability.
///
/// The call blocks until the provider returns a photo or a failure; there
/// is no cancellation of an in-flight capture beyond the user dismissing
/// the picker, which surfaces as [`CaptureError::Cancelled`].
pub trait CapturePort: Send + Sync {
    /// Obtains a photo from the given source.
    ///
    /// # Arguments
    ///
    /// * `source` - Camera or library
    /// * `quality` - Encoder quality hint, 0-100
    ///
    /// # Errors
    ///
    /// Returns [`CaptureError::Cancelled`] if the user backed out, or
    /// [`CaptureError::Device`] if the capability failed.
    fn capture_photo(&self, source: PhotoSource, quality: u8)
    -> Result<CapturedPhoto, CaptureError>;
}

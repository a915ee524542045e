//! Landmark detection port.

use thiserror::Error;

use crate::domain::FaceMesh;

/// Why landmark detection produced no result.
#[derive(Debug, Clone, Error)]
pub enum DetectError {
    /// Inference ran successfully but found no face in the image.
    #[error("no face detected")]
    NoFaceDetected,
    /// The landmark model itself failed.
    #[error("landmark model failed: {0}")]
    Model(String),
}

/// Port for the on-device face-mesh inference capability.
pub trait LandmarkPort: Send + Sync {
    /// Detects facial landmarks in a stored image.
    ///
    /// Returns one mesh per detected face, in provider order; the try-on
    /// flow consumes only the primary face.
    ///
    /// # Errors
    ///
    /// Returns [`DetectError::NoFaceDetected`] if inference succeeded but
    /// found nothing, or [`DetectError::Model`] if the model failed.
    fn detect_landmarks(&self, uri: &str) -> Result<Vec<FaceMesh>, DetectError>;
}

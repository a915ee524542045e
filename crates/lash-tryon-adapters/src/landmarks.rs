//! Sidecar-file landmark detection adapter.

use std::path::PathBuf;

use lash_tryon_core::domain::FaceMesh;
use lash_tryon_core::ports::{DetectError, LandmarkPort};
use tracing::debug;

/// Suffix appended to an image path to find its landmark sidecar.
pub const SIDECAR_SUFFIX: &str = ".landmarks.json";

/// Landmark adapter that reads detections from a JSON sidecar file.
///
/// Stands in for the on-device face-mesh model: landmarks computed
/// elsewhere are dropped next to the image as `<image>.landmarks.json`, an
/// array of faces each carrying its `points`. A missing sidecar or an
/// empty face array reads as no face detected; an unreadable or malformed
/// sidecar reads as a model failure.
pub struct SidecarLandmarks {
    override_path: Option<PathBuf>,
}

impl SidecarLandmarks {
    /// Creates an adapter that derives the sidecar path from the image URI.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            override_path: None,
        }
    }

    /// Creates an adapter that always reads the given sidecar, regardless
    /// of which image detection is requested for.
    ///
    /// The capture flow detects on the stored copy of a photo, not the
    /// original input; an explicit sidecar path keeps the two associated.
    #[must_use]
    pub fn with_override(path: impl Into<PathBuf>) -> Self {
        Self {
            override_path: Some(path.into()),
        }
    }

    fn sidecar_for(&self, uri: &str) -> PathBuf {
        self.override_path
            .clone()
            .unwrap_or_else(|| PathBuf::from(format!("{uri}{SIDECAR_SUFFIX}")))
    }
}

impl Default for SidecarLandmarks {
    fn default() -> Self {
        Self::new()
    }
}

impl LandmarkPort for SidecarLandmarks {
    fn detect_landmarks(&self, uri: &str) -> Result<Vec<FaceMesh>, DetectError> {
        let path = self.sidecar_for(uri);
        if !path.exists() {
            debug!("no landmark sidecar at {}", path.display());
            return Err(DetectError::NoFaceDetected);
        }

        let raw = std::fs::read_to_string(&path)
            .map_err(|e| DetectError::Model(format!("read {}: {e}", path.display())))?;
        let faces: Vec<FaceMesh> = serde_json::from_str(&raw)
            .map_err(|e| DetectError::Model(format!("parse {}: {e}", path.display())))?;

        if faces.is_empty() {
            return Err(DetectError::NoFaceDetected);
        }
        debug!("loaded {} face(s) from {}", faces.len(), path.display());
        Ok(faces)
    }
}

//! Session controller: drives the capture / select / render action flows.

use std::sync::Arc;

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as BASE64;
use tracing::{debug, info, warn};

use crate::compose::{
    OverlayPlacement, OverlayTuning, PlacementError, RenderOptions, compute_fit_transform,
    compute_overlay_placement, reference_points, render,
};
use crate::domain::{
    OverlayAsset, Session, SessionPhase, Size2, SourceImage, landmark_index, select_primary_face,
};
use crate::ports::{
    CaptureError, CapturePort, DEFAULT_CAPTURE_QUALITY, DetectError, DisplaySurface, LandmarkPort,
    Notice, NoticeSink, PhotoSource, StorageError, StoragePort,
};

/// Configuration for the session controller.
#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// Quality hint passed to the capture provider (0-100).
    pub quality: u8,
    /// Overlay placement tuning.
    pub tuning: OverlayTuning,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            quality: DEFAULT_CAPTURE_QUALITY,
            tuning: OverlayTuning::default(),
        }
    }
}

/// What a capture action flow ended with.
///
/// Failures never escape the flow as errors; they are converted to notices
/// and summarized here so a caller can report without re-deriving state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CaptureOutcome {
    /// A new photo is loaded with landmarks attached.
    Loaded,
    /// The user backed out of the picker; the session is unchanged.
    Cancelled,
    /// The new photo is loaded but no face was found in it.
    NoFace,
    /// A provider failed; the session is unchanged.
    Failed,
}

/// Owns the capability ports and the current session, and runs the action
/// flows of the try-on screen.
///
/// Each flow calls into its providers synchronously and ends by swapping
/// the session record in whole, so a new photo is never transiently paired
/// with stale landmarks.
pub struct SessionController {
    capture: Arc<dyn CapturePort>,
    storage: Arc<dyn StoragePort>,
    detector: Arc<dyn LandmarkPort>,
    notices: Arc<dyn NoticeSink>,
    config: SessionConfig,
    session: Session,
}

impl SessionController {
    /// Creates a controller over the given providers with an empty session.
    #[must_use]
    pub fn new(
        capture: Arc<dyn CapturePort>,
        storage: Arc<dyn StoragePort>,
        detector: Arc<dyn LandmarkPort>,
        notices: Arc<dyn NoticeSink>,
        config: SessionConfig,
    ) -> Self {
        Self {
            capture,
            storage,
            detector,
            notices,
            config,
            session: Session::empty(),
        }
    }

    /// The current session record.
    #[must_use]
    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Derived phase of the current session.
    #[must_use]
    pub fn phase(&self) -> SessionPhase {
        self.session.phase()
    }

    /// Runs the full capture flow: obtain a photo, persist it, detect
    /// landmarks, and swap the session.
    ///
    /// Every failure is caught here and converted to a notice per the
    /// taxonomy; a cancelled picker is silent. The session is only touched
    /// once the flow knows what the replacement record looks like.
    pub fn capture(&mut self, source: PhotoSource) -> CaptureOutcome {
        let photo = match self.capture.capture_photo(source, self.config.quality) {
            Ok(photo) => photo,
            Err(CaptureError::Cancelled) => {
                debug!("capture cancelled, keeping current session");
                return CaptureOutcome::Cancelled;
            }
            Err(CaptureError::Device(message)) => {
                warn!("capture failed: {message}");
                self.notices.notify(Notice::DeviceError { message });
                return CaptureOutcome::Failed;
            }
        };

        let bytes = match BASE64.decode(&photo.base64_data) {
            Ok(bytes) => bytes,
            Err(e) => {
                let message = format!("unreadable capture payload: {e}");
                warn!("{message}");
                self.notices.notify(Notice::DeviceError { message });
                return CaptureOutcome::Failed;
            }
        };

        let stored = match self
            .storage
            .write_photo(&capture_file_name(), &photo.base64_data)
        {
            Ok(stored) => stored,
            Err(StorageError::Io(message)) => {
                warn!("storage failed: {message}");
                self.notices.notify(Notice::IoError { message });
                return CaptureOutcome::Failed;
            }
        };
        info!("stored capture as {}", stored.uri);

        let image = match SourceImage::from_bytes(&stored.uri, &bytes) {
            Ok(image) => image,
            Err(e) => {
                let message = format!("{e:#}");
                warn!("decode failed: {message}");
                self.notices.notify(Notice::DeviceError { message });
                return CaptureOutcome::Failed;
            }
        };

        match self.detector.detect_landmarks(&stored.uri) {
            Ok(faces) => match select_primary_face(&faces) {
                Some(face) => {
                    debug!(
                        "primary face has {} landmark points ({} faces total)",
                        face.points.len(),
                        faces.len()
                    );
                    let points = face.points.clone();
                    self.session = std::mem::take(&mut self.session)
                        .with_image(image)
                        .with_landmarks(points);
                    CaptureOutcome::Loaded
                }
                None => self.keep_image_without_face(image),
            },
            Err(DetectError::NoFaceDetected) => self.keep_image_without_face(image),
            Err(DetectError::Model(message)) => {
                warn!("landmark model failed: {message}");
                self.notices.notify(Notice::ModelError { message });
                CaptureOutcome::Failed
            }
        }
    }

    /// Detection found nothing: keep the new photo on screen without
    /// landmarks and tell the user.
    fn keep_image_without_face(&mut self, image: SourceImage) -> CaptureOutcome {
        info!("no face detected in {}", image.uri);
        self.notices.notify(Notice::NoFaceDetected);
        self.session = std::mem::take(&mut self.session).with_image(image);
        CaptureOutcome::NoFace
    }

    /// Selects an overlay asset; the selection persists across captures.
    pub fn select_overlay(&mut self, overlay: OverlayAsset) {
        debug!("overlay selected: {}", overlay.name);
        self.session = std::mem::take(&mut self.session).with_overlay(overlay);
    }

    /// Clears the overlay selection.
    pub fn clear_overlay(&mut self) {
        debug!("overlay cleared");
        self.session = std::mem::take(&mut self.session).without_overlay();
    }

    /// The overlay rectangle that would be drawn on a surface of the given
    /// size, or `None` while the session has no overlay ready to anchor.
    ///
    /// # Errors
    ///
    /// Fails under the same conditions as [`Self::render_to`].
    pub fn overlay_placement(
        &self,
        surface: Size2,
    ) -> Result<Option<OverlayPlacement>, PlacementError> {
        let (Some(image), Some(landmarks), Some(_)) = (
            self.session.image(),
            self.session.landmarks(),
            self.session.overlay(),
        ) else {
            return Ok(None);
        };

        let transform = compute_fit_transform(image.size(), surface);
        let (left, right) = reference_points(landmarks, landmark_index::OVERLAY_REFERENCE)?;
        Ok(Some(compute_overlay_placement(
            left,
            right,
            transform,
            &self.config.tuning,
        )))
    }

    /// Renders the current session onto a surface.
    ///
    /// The fit transform and overlay placement are recomputed from the
    /// surface's current size on every call, so a resized surface never
    /// sees a stale placement. An empty session just clears the surface.
    ///
    /// # Errors
    ///
    /// Returns [`PlacementError`] if an overlay is selected and landmarks
    /// are present but the set lacks the reference indices. That combination
    /// means the landmark provider and the placement table disagree, which
    /// is a programming fault rather than a user-facing condition.
    pub fn render_to(
        &self,
        surface: &mut dyn DisplaySurface,
        options: &RenderOptions,
    ) -> Result<(), PlacementError> {
        let Some(image) = self.session.image() else {
            surface.clear();
            return Ok(());
        };

        let transform = compute_fit_transform(image.size(), surface.size());

        let overlay = match (self.session.landmarks(), self.session.overlay()) {
            (Some(landmarks), Some(asset)) => {
                let (left, right) =
                    reference_points(landmarks, landmark_index::OVERLAY_REFERENCE)?;
                let placement =
                    compute_overlay_placement(left, right, transform, &self.config.tuning);
                Some((asset, placement))
            }
            _ => None,
        };

        render(
            surface,
            image,
            transform,
            self.session.landmarks(),
            overlay,
            options,
        );
        Ok(())
    }
}

/// Capture file name: millisecond timestamp with a `.jpg` extension, the
/// same shape the storage provider expects for pruning.
fn capture_file_name() -> String {
    let millis = time::OffsetDateTime::now_utc().unix_timestamp_nanos() / 1_000_000;
    format!("{millis}.jpg")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_capture_file_name_shape() {
        let name = capture_file_name();
        assert!(name.ends_with(".jpg"));
        let stem = name.trim_end_matches(".jpg");
        assert!(!stem.is_empty());
        assert!(stem.chars().all(|c| c.is_ascii_digit()));
    }

    #[test]
    fn test_default_config() {
        let config = SessionConfig::default();
        assert_eq!(config.quality, DEFAULT_CAPTURE_QUALITY);
        assert_eq!(config.tuning, OverlayTuning::default());
    }
}

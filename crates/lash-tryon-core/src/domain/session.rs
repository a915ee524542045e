//! The immutable per-image session record.

use super::{LandmarkSet, OverlayAsset, SourceImage};

/// Derived phase of a session, matching the try-on state machine.
///
/// `Empty → ImageLoaded → LandmarksReady → OverlaySelected`, with overlay
/// selection toggling between `OverlaySelected` and `LandmarksReady`. A new
/// capture resets to a fresh record and moves forward again; there is no
/// other path back.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionPhase {
    /// No photo loaded yet.
    Empty,
    /// A photo is loaded but no landmarks are available for it.
    ImageLoaded,
    /// Photo and landmarks are paired; no overlay is active.
    LandmarksReady,
    /// Photo, landmarks, and an overlay selection are all present.
    OverlaySelected,
}

/// The current try-on state: photo, its landmarks, and the overlay choice.
///
/// The record is immutable; every transition builds a new `Session` and the
/// holder swaps it in whole. That keeps the photo/landmark pairing atomic
/// from a consumer's perspective: a new photo can never be observed next to
/// the previous photo's landmarks.
#[derive(Debug, Clone, Default)]
pub struct Session {
    image: Option<SourceImage>,
    landmarks: Option<LandmarkSet>,
    overlay: Option<OverlayAsset>,
}

impl Session {
    /// A session with nothing loaded.
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// Replaces the photo, dropping any landmarks from the previous photo.
    ///
    /// The overlay selection survives photo changes; it re-attaches once
    /// landmarks for the new photo arrive.
    #[must_use]
    pub fn with_image(self, image: SourceImage) -> Self {
        Self {
            image: Some(image),
            landmarks: None,
            overlay: self.overlay,
        }
    }

    /// Attaches landmarks computed from the current photo.
    ///
    /// Landmarks are only meaningful paired with the photo they were
    /// computed from; without a photo the call leaves the session unchanged.
    #[must_use]
    pub fn with_landmarks(self, landmarks: LandmarkSet) -> Self {
        if self.image.is_none() {
            return self;
        }
        Self {
            landmarks: Some(landmarks),
            ..self
        }
    }

    /// Selects an overlay asset.
    #[must_use]
    pub fn with_overlay(self, overlay: OverlayAsset) -> Self {
        Self {
            overlay: Some(overlay),
            ..self
        }
    }

    /// Clears the overlay selection.
    #[must_use]
    pub fn without_overlay(self) -> Self {
        Self {
            overlay: None,
            ..self
        }
    }

    /// The loaded photo, if any.
    #[must_use]
    pub fn image(&self) -> Option<&SourceImage> {
        self.image.as_ref()
    }

    /// Landmarks for the loaded photo, if detection succeeded.
    #[must_use]
    pub fn landmarks(&self) -> Option<&LandmarkSet> {
        self.landmarks.as_ref()
    }

    /// The active overlay selection, if any.
    #[must_use]
    pub fn overlay(&self) -> Option<&OverlayAsset> {
        self.overlay.as_ref()
    }

    /// Derives the current phase from the record's contents.
    ///
    /// An overlay selection without landmarks does not count as
    /// `OverlaySelected`: the selection is retained but has nothing to
    /// anchor to until landmarks arrive.
    #[must_use]
    pub fn phase(&self) -> SessionPhase {
        match (&self.image, &self.landmarks, &self.overlay) {
            (None, ..) => SessionPhase::Empty,
            (Some(_), None, _) => SessionPhase::ImageLoaded,
            (Some(_), Some(_), None) => SessionPhase::LandmarksReady,
            (Some(_), Some(_), Some(_)) => SessionPhase::OverlaySelected,
        }
    }
}

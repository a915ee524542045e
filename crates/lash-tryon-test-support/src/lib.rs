//! Test support utilities for lash-tryon.
//!
//! Provides scripted port mocks, a call-recording display surface, and
//! synthetic fixture builders (portraits, landmark sets, overlay rasters)
//! for testing the try-on session flows.
//!
//! # Example
//!
//! ```
//! use lash_tryon_test_support::{MockCapture, SyntheticFixtures};
//!
//! // A portrait photo as the capture provider would deliver it.
//! let capture = MockCapture::with_photo(&SyntheticFixtures::portrait_base64(64, 48));
//!
//! // A full landmark set with the eye corners placed explicitly.
//! let landmarks = SyntheticFixtures::landmarks_with_eyes((10.0, 20.0), (30.0, 20.0));
//! ```

mod builders;
mod mocks;

pub use builders::SyntheticFixtures;
pub use mocks::{
    DrawCall, MockCapture, MockLandmarks, MockStorage, RecordingNotices, RecordingSurface,
};

//! Mock implementations of core port traits.

use std::collections::VecDeque;
use std::sync::{Mutex, PoisonError};

use image::{Rgba, RgbaImage};
use lash_tryon_core::domain::{FaceMesh, Point2, Size2};
use lash_tryon_core::ports::{
    CaptureError, CapturePort, CapturedPhoto, DetectError, DisplaySurface, LandmarkPort, Notice,
    NoticeSink, PhotoSource, StorageError, StoragePort, StoredPhoto,
};

/// Mock implementation of `CapturePort` with scripted responses.
///
/// Responses are consumed in order; once the script is exhausted further
/// calls fail with a device error naming the mock, so a flow that captures
/// more often than the test scripted fails visibly.
pub struct MockCapture {
    responses: Mutex<VecDeque<Result<CapturedPhoto, CaptureError>>>,
    calls: Mutex<Vec<(PhotoSource, u8)>>,
}

impl MockCapture {
    /// Creates a mock that plays back the given responses in order.
    #[must_use]
    pub fn new(responses: Vec<Result<CapturedPhoto, CaptureError>>) -> Self {
        Self {
            responses: Mutex::new(responses.into()),
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Creates a mock that delivers one photo with the given payload.
    #[must_use]
    pub fn with_photo(base64_data: &str) -> Self {
        Self::new(vec![Ok(CapturedPhoto {
            base64_data: base64_data.to_string(),
        })])
    }

    /// Creates a mock whose single response is a user cancellation.
    #[must_use]
    pub fn cancelled() -> Self {
        Self::new(vec![Err(CaptureError::Cancelled)])
    }

    /// Creates a mock whose single response is a device failure.
    #[must_use]
    pub fn failing(message: &str) -> Self {
        Self::new(vec![Err(CaptureError::Device(message.to_string()))])
    }

    /// Returns all `(source, quality)` pairs the mock was called with.
    #[must_use]
    pub fn calls(&self) -> Vec<(PhotoSource, u8)> {
        self.calls
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Returns the number of capture calls made.
    #[must_use]
    pub fn call_count(&self) -> usize {
        self.calls
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }
}

impl CapturePort for MockCapture {
    fn capture_photo(
        &self,
        source: PhotoSource,
        quality: u8,
    ) -> Result<CapturedPhoto, CaptureError> {
        self.calls
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push((source, quality));
        self.responses
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .pop_front()
            .unwrap_or_else(|| {
                Err(CaptureError::Device(String::from(
                    "mock capture script exhausted",
                )))
            })
    }
}

/// Mock implementation of `StoragePort`.
///
/// Accepts every write, records it, and hands back a `mock://` URI built
/// from the file name, or fails every write with a fixed message.
pub struct MockStorage {
    failure: Option<String>,
    writes: Mutex<Vec<(String, String)>>,
}

impl MockStorage {
    /// Creates a mock that accepts every write.
    #[must_use]
    pub fn new() -> Self {
        Self {
            failure: None,
            writes: Mutex::new(Vec::new()),
        }
    }

    /// Creates a mock that fails every write with the given message.
    #[must_use]
    pub fn failing(message: &str) -> Self {
        Self {
            failure: Some(message.to_string()),
            writes: Mutex::new(Vec::new()),
        }
    }

    /// Returns all `(name, base64_data)` pairs written so far.
    #[must_use]
    pub fn writes(&self) -> Vec<(String, String)> {
        self.writes
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Returns the number of successful writes.
    #[must_use]
    pub fn write_count(&self) -> usize {
        self.writes
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    /// Returns the URI of the most recent write, if any.
    #[must_use]
    pub fn last_uri(&self) -> Option<String> {
        self.writes
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .last()
            .map(|(name, _)| format!("mock://{name}"))
    }
}

impl Default for MockStorage {
    fn default() -> Self {
        Self::new()
    }
}

impl StoragePort for MockStorage {
    fn write_photo(&self, name: &str, base64_data: &str) -> Result<StoredPhoto, StorageError> {
        if let Some(message) = &self.failure {
            return Err(StorageError::Io(message.clone()));
        }
        self.writes
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push((name.to_string(), base64_data.to_string()));
        Ok(StoredPhoto {
            uri: format!("mock://{name}"),
        })
    }
}

/// Mock implementation of `LandmarkPort` with scripted responses.
pub struct MockLandmarks {
    responses: Mutex<VecDeque<Result<Vec<FaceMesh>, DetectError>>>,
    requests: Mutex<Vec<String>>,
}

impl MockLandmarks {
    /// Creates a mock that plays back the given responses in order.
    #[must_use]
    pub fn new(responses: Vec<Result<Vec<FaceMesh>, DetectError>>) -> Self {
        Self {
            responses: Mutex::new(responses.into()),
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Creates a mock whose single response is the given faces.
    #[must_use]
    pub fn with_faces(faces: Vec<FaceMesh>) -> Self {
        Self::new(vec![Ok(faces)])
    }

    /// Creates a mock whose single response reports no face.
    #[must_use]
    pub fn no_face() -> Self {
        Self::new(vec![Err(DetectError::NoFaceDetected)])
    }

    /// Creates a mock whose single response is a model failure.
    #[must_use]
    pub fn failing(message: &str) -> Self {
        Self::new(vec![Err(DetectError::Model(message.to_string()))])
    }

    /// Returns the URIs detection was requested for, in order.
    #[must_use]
    pub fn requests(&self) -> Vec<String> {
        self.requests
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl LandmarkPort for MockLandmarks {
    fn detect_landmarks(&self, uri: &str) -> Result<Vec<FaceMesh>, DetectError> {
        self.requests
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(uri.to_string());
        self.responses
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .pop_front()
            .unwrap_or_else(|| {
                Err(DetectError::Model(String::from(
                    "mock landmark script exhausted",
                )))
            })
    }
}

/// Mock implementation of `NoticeSink` that records every notice.
pub struct RecordingNotices {
    notices: Mutex<Vec<Notice>>,
}

impl RecordingNotices {
    /// Creates an empty recorder.
    #[must_use]
    pub fn new() -> Self {
        Self {
            notices: Mutex::new(Vec::new()),
        }
    }

    /// Returns all captured notices in delivery order.
    #[must_use]
    pub fn notices(&self) -> Vec<Notice> {
        self.notices
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Returns the number of notices delivered.
    #[must_use]
    pub fn count(&self) -> usize {
        self.notices
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }
}

impl Default for RecordingNotices {
    fn default() -> Self {
        Self::new()
    }
}

impl NoticeSink for RecordingNotices {
    fn notify(&self, notice: Notice) {
        self.notices
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(notice);
    }
}

/// One primitive issued against a [`RecordingSurface`].
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCall {
    /// The surface was cleared.
    Clear,
    /// An image was drawn into the given surface-space rectangle.
    Image {
        /// Left edge in surface space.
        x: f32,
        /// Top edge in surface space.
        y: f32,
        /// Drawn width in surface space.
        width: f32,
        /// Drawn height in surface space.
        height: f32,
        /// Intrinsic size of the source raster.
        source_size: Size2,
    },
    /// A filled circle was drawn.
    Circle {
        /// Center in surface space.
        center: Point2,
        /// Radius in surface pixels.
        radius: f32,
        /// Fill color.
        color: Rgba<u8>,
    },
}

/// Mock implementation of `DisplaySurface` that records draw calls
/// instead of rasterizing.
///
/// Comparing two recorded call sequences checks render determinism
/// without touching pixels.
pub struct RecordingSurface {
    size: Size2,
    calls: Vec<DrawCall>,
}

impl RecordingSurface {
    /// Creates a surface of the given pixel size.
    #[must_use]
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            size: Size2::new(width, height),
            calls: Vec::new(),
        }
    }

    /// All calls recorded so far, in order.
    #[must_use]
    pub fn calls(&self) -> &[DrawCall] {
        &self.calls
    }

    /// Drains the recorded calls, leaving the surface empty for reuse.
    pub fn take_calls(&mut self) -> Vec<DrawCall> {
        std::mem::take(&mut self.calls)
    }

    /// Returns the number of image draws recorded.
    #[must_use]
    pub fn image_count(&self) -> usize {
        self.calls
            .iter()
            .filter(|c| matches!(c, DrawCall::Image { .. }))
            .count()
    }

    /// Returns the number of circle fills recorded.
    #[must_use]
    pub fn circle_count(&self) -> usize {
        self.calls
            .iter()
            .filter(|c| matches!(c, DrawCall::Circle { .. }))
            .count()
    }
}

impl DisplaySurface for RecordingSurface {
    fn size(&self) -> Size2 {
        self.size
    }

    fn clear(&mut self) {
        self.calls.push(DrawCall::Clear);
    }

    fn draw_image(&mut self, pixels: &RgbaImage, x: f32, y: f32, width: f32, height: f32) {
        self.calls.push(DrawCall::Image {
            x,
            y,
            width,
            height,
            source_size: Size2::new(pixels.width(), pixels.height()),
        });
    }

    fn fill_circle(&mut self, center: Point2, radius: f32, color: Rgba<u8>) {
        self.calls.push(DrawCall::Circle {
            center,
            radius,
            color,
        });
    }
}

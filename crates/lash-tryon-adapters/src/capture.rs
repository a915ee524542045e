//! File-backed capture adapter.

use std::path::PathBuf;

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as BASE64;
use lash_tryon_core::ports::{CaptureError, CapturePort, CapturedPhoto, PhotoSource};
use tracing::debug;

/// Capture adapter that delivers a file from disk.
///
/// Stands in for the platform camera or picker: every capture returns the
/// configured file, base64-encoded the way a device provider would deliver
/// it. The quality hint is ignored since the file is already encoded.
pub struct FileCapture {
    path: PathBuf,
}

impl FileCapture {
    /// Creates a capture adapter delivering the given file.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl CapturePort for FileCapture {
    fn capture_photo(
        &self,
        source: PhotoSource,
        _quality: u8,
    ) -> Result<CapturedPhoto, CaptureError> {
        debug!(
            "delivering {} as a {:?} capture",
            self.path.display(),
            source
        );
        let bytes = std::fs::read(&self.path)
            .map_err(|e| CaptureError::Device(format!("{}: {e}", self.path.display())))?;
        Ok(CapturedPhoto {
            base64_data: BASE64.encode(bytes),
        })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use lash_tryon_test_support::SyntheticFixtures;
    use std::io::Write as _;

    #[test]
    fn test_delivers_file_as_base64() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("input.png");
        let png = SyntheticFixtures::portrait_png(16, 12);
        std::fs::File::create(&path)
            .unwrap()
            .write_all(&png)
            .unwrap();

        let capture = FileCapture::new(&path);
        let photo = capture.capture_photo(PhotoSource::Library, 90).unwrap();

        assert_eq!(BASE64.decode(photo.base64_data).unwrap(), png);
    }

    #[test]
    fn test_missing_file_is_device_error() {
        let capture = FileCapture::new("/nonexistent/input.png");
        let err = capture.capture_photo(PhotoSource::Camera, 90).unwrap_err();
        assert!(matches!(err, CaptureError::Device(_)));
    }
}

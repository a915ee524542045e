//! Storage port for persisting captured photos.

use thiserror::Error;

/// Handle to a photo the storage provider persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredPhoto {
    /// URI of the stored file, usable by the landmark provider.
    pub uri: String,
}

/// Why persisting a capture failed.
#[derive(Debug, Clone, Error)]
pub enum StorageError {
    /// The payload could not be decoded or written.
    #[error("storage write failed: {0}")]
    Io(String),
}

/// Port for the platform file persistence capability.
pub trait StoragePort: Send + Sync {
    /// Persists a base64-encoded photo under the given file name.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::Io`] if the payload is malformed or the
    /// write fails.
    fn write_photo(&self, name: &str, base64_data: &str) -> Result<StoredPhoto, StorageError>;
}

//! Data-directory storage adapter with bounded retention.

use std::path::{Path, PathBuf};

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as BASE64;
use lash_tryon_core::ports::{StorageError, StoragePort, StoredPhoto};
use tracing::{debug, warn};

/// Captures kept on disk before the oldest are pruned.
pub const DEFAULT_RETAIN_LAST: usize = 16;

/// Storage adapter that persists captures into a data directory.
///
/// File names are millisecond timestamps, so lexicographic order on the
/// managed files is capture order. After each write the oldest captures
/// beyond the retention bound are deleted; prune failures are logged and
/// never fail the write that triggered them.
pub struct DataDirStorage {
    dir: PathBuf,
    retain_last: usize,
}

impl DataDirStorage {
    /// Creates a storage adapter over the given directory.
    ///
    /// # Arguments
    ///
    /// * `dir` - Directory to write captures into (created on first write)
    /// * `retain_last` - Captures to keep; `0` disables pruning
    #[must_use]
    pub fn new(dir: impl Into<PathBuf>, retain_last: usize) -> Self {
        Self {
            dir: dir.into(),
            retain_last,
        }
    }

    /// Creates a storage adapter over the user data directory.
    ///
    /// Uses `XDG_DATA_HOME/lash-tryon/captures` or
    /// `~/.local/share/lash-tryon/captures`.
    #[must_use]
    pub fn in_data_dir(retain_last: usize) -> Self {
        let dir = dirs::data_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("lash-tryon")
            .join("captures");
        Self::new(dir, retain_last)
    }

    /// The directory captures are written into.
    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Deletes managed captures beyond the retention bound, oldest first.
    fn prune(&self) {
        if self.retain_last == 0 {
            return;
        }

        let entries = match std::fs::read_dir(&self.dir) {
            Ok(entries) => entries,
            Err(e) => {
                warn!("Failed to read capture directory for pruning: {e}");
                return;
            }
        };

        let mut managed: Vec<PathBuf> = entries
            .flatten()
            .map(|entry| entry.path())
            .filter(|path| is_managed_capture(path))
            .collect();
        if managed.len() <= self.retain_last {
            return;
        }

        // Timestamp names: sorting by name sorts by capture time.
        managed.sort();
        let excess = managed.len() - self.retain_last;
        for path in managed.into_iter().take(excess) {
            match std::fs::remove_file(&path) {
                Ok(()) => debug!("pruned old capture {}", path.display()),
                Err(e) => warn!("Failed to prune {}: {e}", path.display()),
            }
        }
    }
}

impl StoragePort for DataDirStorage {
    fn write_photo(&self, name: &str, base64_data: &str) -> Result<StoredPhoto, StorageError> {
        let bytes = BASE64
            .decode(base64_data)
            .map_err(|e| StorageError::Io(format!("invalid base64 payload: {e}")))?;

        std::fs::create_dir_all(&self.dir)
            .map_err(|e| StorageError::Io(format!("create {}: {e}", self.dir.display())))?;

        let path = self.dir.join(name);
        std::fs::write(&path, &bytes)
            .map_err(|e| StorageError::Io(format!("write {}: {e}", path.display())))?;
        debug!("stored {} ({} bytes)", path.display(), bytes.len());

        self.prune();

        Ok(StoredPhoto {
            uri: path.to_string_lossy().into_owned(),
        })
    }
}

/// Whether a path is a capture this adapter manages: a timestamp stem with
/// a `.jpg` extension. Anything else in the directory is left alone.
fn is_managed_capture(path: &Path) -> bool {
    let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
        return false;
    };
    name.strip_suffix(".jpg")
        .is_some_and(|stem| !stem.is_empty() && stem.chars().all(|c| c.is_ascii_digit()))
}

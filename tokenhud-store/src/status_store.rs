//! The status store: one JSON record shared by writer and reader.
//!
//! The writer replaces the record wholesale; the reader only ever reads it.
//! No lock is taken on either side.

use std::path::{Path, PathBuf};
use std::time::Duration;

use tokenhud_core::{SnapshotPatch, UsageSnapshot};
use tracing::{debug, info};

use crate::error::StoreError;
use crate::persistence::{default_status_path, read_with_timeout, save_json};

/// Read timeout used when none is configured.
pub const DEFAULT_READ_TIMEOUT: Duration = Duration::from_millis(250);

/// Handle to the status record on disk.
#[derive(Debug, Clone)]
pub struct StatusStore {
    path: PathBuf,
    read_timeout: Duration,
}

impl Default for StatusStore {
    fn default() -> Self {
        Self::new(default_status_path())
    }
}

impl StatusStore {
    /// Creates a store backed by `path`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            read_timeout: DEFAULT_READ_TIMEOUT,
        }
    }

    /// Sets the upper bound on a single read.
    #[must_use]
    pub fn with_read_timeout(mut self, timeout: Duration) -> Self {
        self.read_timeout = timeout;
        self
    }

    /// Path of the record.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Upper bound on a single read.
    pub fn read_timeout(&self) -> Duration {
        self.read_timeout
    }

    // ========================================================================
    // Writer
    // ========================================================================

    /// Computes a snapshot from `used`/`total` and replaces the record.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Core` with `InvalidArgument` if `total` is zero
    /// (nothing is written), or an I/O error if the replace fails. A failed
    /// write leaves the previous record intact.
    pub async fn write_snapshot(&self, used: u64, total: u64) -> Result<UsageSnapshot, StoreError> {
        let snapshot = UsageSnapshot::new(used, total)?;
        save_json(&self.path, &snapshot).await?;

        info!(
            path = %self.path.display(),
            used = snapshot.used,
            total = snapshot.total,
            remaining = snapshot.remaining,
            "Status record written"
        );
        Ok(snapshot)
    }

    // ========================================================================
    // Reader
    // ========================================================================

    /// Reads the record as a patch; fields may be missing.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::StoreUnavailable` if the file is missing,
    /// unreadable or slower than the read timeout, and
    /// `StoreError::StoreMalformed` if its content is not a valid record.
    pub async fn load(&self) -> Result<SnapshotPatch, StoreError> {
        let content = read_with_timeout(&self.path, self.read_timeout).await?;

        let patch = SnapshotPatch::from_json(&content).map_err(|e| StoreError::StoreMalformed {
            path: self.path.clone(),
            reason: e.to_string(),
        })?;

        debug!(path = %self.path.display(), complete = patch.is_complete(), "Status record read");
        Ok(patch)
    }

    /// Reads the record and merges it over the boot snapshot.
    ///
    /// # Errors
    ///
    /// Same as [`StatusStore::load`].
    pub async fn load_snapshot(&self) -> Result<UsageSnapshot, StoreError> {
        let patch = self.load().await?;
        let mut snapshot = UsageSnapshot::initial();
        snapshot.apply(&patch);
        Ok(snapshot)
    }
}

//! File persistence helpers.
//!
//! Handles default locations, bounded reads and atomic JSON writes.

use serde::{Serialize, de::DeserializeOwned};
use std::io;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;
use tracing::{debug, warn};

use crate::error::StoreError;

// ============================================================================
// Default Paths
// ============================================================================

/// File name of the status record.
pub const STATUS_FILE_NAME: &str = "token_status.json";

/// File name of the HUD configuration.
pub const CONFIG_FILE_NAME: &str = "config.json";

/// Returns the directory holding the status record (`~/.claude`).
pub fn default_status_dir() -> PathBuf {
    dirs::home_dir()
        .map(|h| h.join(".claude"))
        .unwrap_or_else(|| PathBuf::from("."))
}

/// Returns the default status record path (`~/.claude/token_status.json`).
pub fn default_status_path() -> PathBuf {
    default_status_dir().join(STATUS_FILE_NAME)
}

/// Returns the default configuration directory.
///
/// - Linux: `~/.config/tokenhud`
/// - macOS: `~/Library/Application Support/tokenhud`
/// - Windows: `%APPDATA%\tokenhud`
pub fn default_config_dir() -> PathBuf {
    dirs::config_dir()
        .map(|c| c.join("tokenhud"))
        .unwrap_or_else(|| PathBuf::from("."))
}

/// Returns the default configuration file path.
pub fn default_config_path() -> PathBuf {
    default_config_dir().join(CONFIG_FILE_NAME)
}

// ============================================================================
// File Operations
// ============================================================================

static TEMP_COUNTER: AtomicU64 = AtomicU64::new(0);

/// Temporary sibling used while replacing `path`.
///
/// Lives in the same directory so the final rename stays on one filesystem.
/// The process id and a per-call counter keep concurrent writers, in this
/// process or another, from sharing a temp file.
pub(crate) fn temp_path_for(path: &Path) -> PathBuf {
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "record".to_string());
    let seq = TEMP_COUNTER.fetch_add(1, Ordering::Relaxed);
    path.with_file_name(format!(".{name}.{}.{seq}.tmp", std::process::id()))
}

/// Saves data to a JSON file, replacing any previous content atomically.
///
/// Creates parent directories if they don't exist, writes the full document
/// to a temporary sibling, then renames it over `path`. A concurrent reader
/// sees either the old document or the new one, never a partial write.
pub async fn save_json<T: Serialize>(path: &Path, data: &T) -> Result<(), StoreError> {
    debug!(path = %path.display(), "Saving JSON file");

    // Serialize before touching the filesystem so a failure leaves nothing behind
    let json = serde_json::to_string_pretty(data)?;

    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            ensure_dir(parent).await?;
        }
    }

    let temp_path = temp_path_for(path);
    tokio::fs::write(&temp_path, &json).await?;

    if let Err(e) = tokio::fs::rename(&temp_path, path).await {
        if let Err(cleanup) = tokio::fs::remove_file(&temp_path).await {
            warn!(path = %temp_path.display(), error = %cleanup, "Failed to remove temp file");
        }
        return Err(e.into());
    }

    debug!(path = %path.display(), "JSON file saved");
    Ok(())
}

/// Reads a file to a string, giving up after `timeout`.
///
/// Any failure, including the timeout, is reported as
/// [`StoreError::StoreUnavailable`].
pub async fn read_with_timeout(path: &Path, timeout: Duration) -> Result<String, StoreError> {
    let unavailable = |source: io::Error| StoreError::StoreUnavailable {
        path: path.to_path_buf(),
        source,
    };

    match tokio::time::timeout(timeout, tokio::fs::read_to_string(path)).await {
        Ok(Ok(content)) => Ok(content),
        Ok(Err(e)) => Err(unavailable(e)),
        Err(_) => Err(unavailable(io::Error::new(
            io::ErrorKind::TimedOut,
            format!("read did not finish within {}ms", timeout.as_millis()),
        ))),
    }
}

/// Loads data from a JSON file.
pub async fn load_json<T: DeserializeOwned>(path: &Path) -> Result<T, StoreError> {
    debug!(path = %path.display(), "Loading JSON file");

    let content = tokio::fs::read_to_string(path).await?;
    let data = serde_json::from_str(&content)?;

    debug!(path = %path.display(), "JSON file loaded");
    Ok(data)
}

/// Ensures a directory exists.
pub async fn ensure_dir(path: &Path) -> Result<(), StoreError> {
    if !tokio::fs::try_exists(path).await.unwrap_or(false) {
        debug!(path = %path.display(), "Creating directory");
        tokio::fs::create_dir_all(path).await?;
    }
    Ok(())
}

// ============================================================================
// Tests
// ============================================================================

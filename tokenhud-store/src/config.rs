//! Configuration management.

use crate::error::StoreError;
use crate::persistence::{default_config_path, default_status_path};
use crate::poller::PollerConfig;
use crate::status_store::StatusStore;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tokenhud_core::DEFAULT_TOTAL;
use tracing::{debug, info};

/// Shortest poll interval accepted.
pub const MIN_POLL_INTERVAL_MS: u64 = 100;

/// Shortest read timeout accepted.
pub const MIN_READ_TIMEOUT_MS: u64 = 10;

/// HUD configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HudConfig {
    /// Status record location. Defaults to `~/.claude/token_status.json`.
    pub status_path: Option<PathBuf>,
    /// Poll interval in milliseconds.
    pub poll_interval_ms: u64,
    /// Upper bound on one status read, in milliseconds.
    pub read_timeout_ms: u64,
    /// Budget used by the writer when none is given.
    pub default_total: u64,
    /// Show a stale marker after this many seconds without a good read.
    pub stale_after_secs: Option<u64>,
    /// Whether to color terminal output.
    pub use_colors: bool,
    /// Progress bar width in cells.
    pub bar_width: usize,
}

impl Default for HudConfig {
    fn default() -> Self {
        Self {
            status_path: None,
            poll_interval_ms: 1000,
            read_timeout_ms: 250,
            default_total: DEFAULT_TOTAL,
            stale_after_secs: None,
            use_colors: true,
            bar_width: 20,
        }
    }
}

impl HudConfig {
    /// Returns the default configuration file path.
    pub fn default_path() -> PathBuf {
        default_config_path()
    }

    /// Loads configuration from the default path.
    pub fn load() -> Result<Self, StoreError> {
        Self::load_from(&Self::default_path())
    }

    /// Loads configuration from a specific path.
    ///
    /// A missing file yields defaults; an unparsable one is an error.
    pub fn load_from(path: &Path) -> Result<Self, StoreError> {
        if !path.exists() {
            debug!(path = %path.display(), "Config file not found, using defaults");
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)?;
        let config: HudConfig = serde_json::from_str(&content)
            .map_err(|e| StoreError::Config(format!("{}: {e}", path.display())))?;
        config.validate()?;

        info!(path = %path.display(), "Loaded configuration");
        Ok(config)
    }

    /// Saves configuration to a specific path.
    pub fn save_to(&self, path: &Path) -> Result<(), StoreError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;

        info!(path = %path.display(), "Saved configuration");
        Ok(())
    }

    /// Rejects values the writer or HUD cannot use.
    pub fn validate(&self) -> Result<(), StoreError> {
        if self.default_total == 0 {
            return Err(StoreError::Config(
                "default_total must be greater than zero".to_string(),
            ));
        }
        if self.bar_width == 0 {
            return Err(StoreError::Config(
                "bar_width must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }

    /// Resolved status record path.
    pub fn status_path(&self) -> PathBuf {
        self.status_path.clone().unwrap_or_else(default_status_path)
    }

    /// Poll interval, floored at [`MIN_POLL_INTERVAL_MS`].
    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms.max(MIN_POLL_INTERVAL_MS))
    }

    /// Read timeout, floored at [`MIN_READ_TIMEOUT_MS`].
    pub fn read_timeout(&self) -> Duration {
        Duration::from_millis(self.read_timeout_ms.max(MIN_READ_TIMEOUT_MS))
    }

    /// Stale threshold, if enabled.
    pub fn stale_after(&self) -> Option<Duration> {
        self.stale_after_secs.map(Duration::from_secs)
    }

    /// Store handle for the configured path and timeout.
    pub fn status_store(&self) -> StatusStore {
        StatusStore::new(self.status_path()).with_read_timeout(self.read_timeout())
    }

    /// Poll loop settings; runs until stopped.
    pub fn poller_config(&self) -> PollerConfig {
        PollerConfig {
            interval: self.poll_interval(),
            stale_after: self.stale_after(),
            max_ticks: None,
        }
    }
}

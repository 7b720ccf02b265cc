// Lint configuration for this crate
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

//! # TokenHUD Store
//!
//! The status store and its reader for TokenHUD.
//!
//! This crate provides:
//!
//! - **StatusStore**: the single JSON record, written by atomic replace
//! - **Poller**: the fixed-interval reader that holds the last good snapshot
//! - **HudConfig**: user configuration with persistence
//! - **Persistence**: default paths and file I/O helpers
//!
//! ## Usage
//!
//! ```ignore
//! use tokenhud_store::{Poller, PollerConfig, StatusStore};
//!
//! // Writer
//! let store = StatusStore::default();
//! store.write_snapshot(25_000, 200_000).await?;
//!
//! // Reader
//! let mut poller = Poller::new(store, PollerConfig::default());
//! poller.run(renderer).await;
//! ```

pub mod config;
pub mod error;
pub mod persistence;
pub mod poller;
pub mod status_store;

pub use config::HudConfig;
pub use error::StoreError;
pub use persistence::{
    default_config_dir, default_config_path, default_status_dir, default_status_path, ensure_dir,
    load_json, read_with_timeout, save_json,
};
pub use poller::{DEFAULT_POLL_INTERVAL, Poller, PollerConfig, TickOutcome};
pub use status_store::{DEFAULT_READ_TIMEOUT, StatusStore};

#[cfg(test)]
mod persistence_tests;

// Lint configuration for this crate
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

//! # TokenHUD Core
//!
//! Core types and the pure display mapping for TokenHUD.
//!
//! This crate has no I/O. It provides:
//!
//! - The persisted usage record ([`UsageSnapshot`]) and its partial,
//!   reader-side form ([`SnapshotPatch`])
//! - The stateless mapping from a snapshot to what a surface shows
//!   ([`DisplayState`], [`Tier`])
//! - Poll bookkeeping shown alongside the snapshot ([`PollStatus`])
//! - The [`Renderer`] seam implemented by display surfaces
//!
//! ## Example
//!
//! ```
//! use tokenhud_core::{DisplayState, Tier, UsageSnapshot};
//!
//! let snapshot = UsageSnapshot::compute(180_000, 200_000);
//! let display = DisplayState::from_snapshot(&snapshot);
//!
//! assert_eq!(display.headline_text, "20,000");
//! assert_eq!(display.detail_text, "180,000 / 200,000 (10.0%)");
//! assert_eq!(display.tier, Tier::Warning);
//! ```

pub mod error;
pub mod models;
pub mod traits;

pub use error::CoreError;

pub use models::{
    // Snapshot
    DEFAULT_TOTAL,
    SnapshotPatch,
    UsageSnapshot,
    compute_percentage,
    parse_total,
    parse_used,
    // Display
    DisplayState,
    Rgb,
    Tier,
    format_thousands,
    // Poll bookkeeping
    PollStatus,
};

pub use traits::Renderer;

//! Domain models for TokenHUD.
//!
//! ## Submodules
//!
//! - [`snapshot`] - The persisted usage record and its partial form
//! - [`display`] - Snapshot to display-state mapping and tiers
//! - [`status`] - Poll loop bookkeeping

mod display;
mod snapshot;
mod status;

pub use display::{DisplayState, Rgb, Tier, format_thousands};
pub use snapshot::{
    DEFAULT_TOTAL, SnapshotPatch, UsageSnapshot, compute_percentage, parse_total, parse_used,
};
pub use status::PollStatus;

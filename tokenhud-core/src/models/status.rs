//! Poll loop bookkeeping.

use serde::Serialize;

/// Health of the poll loop at the time of a render.
///
/// Rendered alongside the snapshot so a surface can mark held data, but it
/// never changes the snapshot itself.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PollStatus {
    /// Ticks observed so far.
    pub ticks: u64,
    /// Failed loads since the last successful one.
    pub consecutive_failures: u32,
    /// Message of the most recent failure, cleared on success.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_error: Option<String>,
    /// True once no load has succeeded for longer than the stale threshold.
    /// Always false when no threshold is configured.
    pub stale: bool,
}

impl PollStatus {
    /// Returns true if the last tick loaded successfully.
    pub fn is_healthy(&self) -> bool {
        self.consecutive_failures == 0
    }

    /// Returns true if the displayed snapshot is being held after failures.
    pub fn is_holding(&self) -> bool {
        self.consecutive_failures > 0
    }
}

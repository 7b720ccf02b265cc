//! JSON output formatting.

use anyhow::Result;
use serde::Serialize;
use tokenhud_core::{DisplayState, PollStatus, UsageSnapshot};

// ============================================================================
// Output Types
// ============================================================================

/// Display state as emitted on the command line.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DisplayOutput {
    pub headline: String,
    pub detail: String,
    pub progress: f64,
    pub tier: String,
    pub accent: String,
}

impl From<&DisplayState> for DisplayOutput {
    fn from(display: &DisplayState) -> Self {
        Self {
            headline: display.headline_text.clone(),
            detail: display.detail_text.clone(),
            progress: display.progress_value,
            tier: display.tier.label().to_string(),
            accent: display.accent_color().hex(),
        }
    }
}

/// Poll health as emitted on the command line.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusOutput {
    pub ticks: u64,
    pub consecutive_failures: u32,
    pub stale: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl From<&PollStatus> for StatusOutput {
    fn from(status: &PollStatus) -> Self {
        Self {
            ticks: status.ticks,
            consecutive_failures: status.consecutive_failures,
            stale: status.stale,
            error: status.last_error.clone(),
        }
    }
}

/// One HUD frame.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FrameOutput {
    pub display: DisplayOutput,
    pub status: StatusOutput,
}

/// Result of `show`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ShowOutput<'a> {
    pub snapshot: &'a UsageSnapshot,
    pub display: DisplayOutput,
    pub status: StatusOutput,
}

// ============================================================================
// Formatter
// ============================================================================

/// JSON formatter.
pub struct JsonFormatter {
    pretty: bool,
}

impl JsonFormatter {
    /// Creates a new JSON formatter.
    pub fn new(pretty: bool) -> Self {
        Self { pretty }
    }

    fn to_string<T: Serialize>(&self, value: &T) -> Result<String> {
        if self.pretty {
            Ok(serde_json::to_string_pretty(value)?)
        } else {
            Ok(serde_json::to_string(value)?)
        }
    }

    /// Formats a written snapshot.
    pub fn format_snapshot(&self, snapshot: &UsageSnapshot) -> Result<String> {
        self.to_string(snapshot)
    }

    /// Formats one HUD frame.
    pub fn format_frame(&self, display: &DisplayState, status: &PollStatus) -> Result<String> {
        self.to_string(&FrameOutput {
            display: display.into(),
            status: status.into(),
        })
    }

    /// Formats the `show` result.
    pub fn format_show(
        &self,
        snapshot: &UsageSnapshot,
        display: &DisplayState,
        status: &PollStatus,
    ) -> Result<String> {
        self.to_string(&ShowOutput {
            snapshot,
            display: display.into(),
            status: status.into(),
        })
    }
}

//! Usage snapshot types.
//!
//! This module contains the persisted record and helpers around it:
//! - [`UsageSnapshot`] - The complete `{used, total, remaining, percentage}` record
//! - [`SnapshotPatch`] - A possibly partial record as read back from disk
//! - [`parse_used`] / [`parse_total`] - Writer argument validation

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// Budget ceiling used when the writer is not given one.
pub const DEFAULT_TOTAL: u64 = 200_000;

// ============================================================================
// Derived Values
// ============================================================================

/// Computes `100 * remaining / total`.
///
/// Returns `0.0` when `total` is zero instead of dividing by zero. The result
/// is not clamped: over-budget snapshots yield negative percentages.
#[allow(clippy::cast_precision_loss)]
pub fn compute_percentage(remaining: i64, total: u64) -> f64 {
    if total == 0 {
        return 0.0;
    }
    100.0 * remaining as f64 / total as f64
}

/// `total - used`, saturating at the `i64` bounds.
fn compute_remaining(used: u64, total: u64) -> i64 {
    let diff = i128::from(total) - i128::from(used);
    i64::try_from(diff).unwrap_or(if diff < 0 { i64::MIN } else { i64::MAX })
}

// ============================================================================
// Usage Snapshot
// ============================================================================

/// One point-in-time usage measurement.
///
/// `remaining` and `percentage` are derived from `used` and `total` by
/// [`UsageSnapshot::compute`]; they are stored alongside so readers never
/// need to recompute them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UsageSnapshot {
    /// Consumed units.
    pub used: u64,
    /// Budget ceiling.
    pub total: u64,
    /// `total - used`; negative when over budget.
    pub remaining: i64,
    /// `100 * remaining / total`, or `0.0` when `total` is zero.
    pub percentage: f64,
}

impl UsageSnapshot {
    /// Builds a snapshot with derived fields computed from `used`/`total`.
    ///
    /// Accepts a zero `total` (percentage becomes `0.0`); use
    /// [`UsageSnapshot::new`] for validated input.
    pub fn compute(used: u64, total: u64) -> Self {
        let remaining = compute_remaining(used, total);
        Self {
            used,
            total,
            remaining,
            percentage: compute_percentage(remaining, total),
        }
    }

    /// Builds a snapshot from validated writer input.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::InvalidArgument` if `total` is zero.
    pub fn new(used: u64, total: u64) -> Result<Self, CoreError> {
        if total == 0 {
            return Err(CoreError::invalid("total must be greater than zero"));
        }
        Ok(Self::compute(used, total))
    }

    /// The boot snapshot shown before any successful read.
    pub fn initial() -> Self {
        Self::compute(0, DEFAULT_TOTAL)
    }

    /// Returns true if more units were used than budgeted.
    pub fn is_over_budget(&self) -> bool {
        self.remaining < 0
    }

    /// Returns true if the derived fields agree with `used`/`total`.
    pub fn is_consistent(&self) -> bool {
        let expected = Self::compute(self.used, self.total);
        self.remaining == expected.remaining
            && (self.percentage - expected.percentage).abs() < 1e-9
    }

    /// Overwrites the fields present in `patch`, keeping the rest.
    ///
    /// Stored values are taken as-is; nothing is recomputed.
    pub fn apply(&mut self, patch: &SnapshotPatch) {
        if let Some(used) = patch.used {
            self.used = used;
        }
        if let Some(total) = patch.total {
            self.total = total;
        }
        if let Some(remaining) = patch.remaining {
            self.remaining = remaining;
        }
        if let Some(percentage) = patch.percentage {
            self.percentage = percentage;
        }
    }
}

impl Default for UsageSnapshot {
    fn default() -> Self {
        Self::initial()
    }
}

// ============================================================================
// Snapshot Patch
// ============================================================================

/// A status record as read back from disk, where every field is optional.
///
/// Unknown fields are ignored. Present fields must have the right type,
/// otherwise parsing fails and the record counts as malformed.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SnapshotPatch {
    /// Consumed units.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub used: Option<u64>,
    /// Budget ceiling.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total: Option<u64>,
    /// Stored remaining value.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub remaining: Option<i64>,
    /// Stored percentage value.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub percentage: Option<f64>,
}

impl SnapshotPatch {
    /// Parses a patch from JSON text.
    ///
    /// Only a JSON object is a record; arrays would otherwise be mapped onto
    /// the fields by position.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::Serialization` if the text is not valid JSON or a
    /// field has the wrong type, and `CoreError::InvalidArgument` if the
    /// document is not an object.
    pub fn from_json(content: &str) -> Result<Self, CoreError> {
        let value: serde_json::Value = serde_json::from_str(content)?;
        if !value.is_object() {
            return Err(CoreError::invalid(format!(
                "status record must be a JSON object, got {}",
                json_kind(&value)
            )));
        }
        Ok(serde_json::from_value(value)?)
    }

    /// Returns true if no field is present.
    pub fn is_empty(&self) -> bool {
        self.used.is_none()
            && self.total.is_none()
            && self.remaining.is_none()
            && self.percentage.is_none()
    }

    /// Returns true if all four fields are present.
    pub fn is_complete(&self) -> bool {
        self.used.is_some()
            && self.total.is_some()
            && self.remaining.is_some()
            && self.percentage.is_some()
    }
}

fn json_kind(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "a boolean",
        serde_json::Value::Number(_) => "a number",
        serde_json::Value::String(_) => "a string",
        serde_json::Value::Array(_) => "an array",
        serde_json::Value::Object(_) => "an object",
    }
}

impl From<&UsageSnapshot> for SnapshotPatch {
    fn from(snapshot: &UsageSnapshot) -> Self {
        Self {
            used: Some(snapshot.used),
            total: Some(snapshot.total),
            remaining: Some(snapshot.remaining),
            percentage: Some(snapshot.percentage),
        }
    }
}

// ============================================================================
// Writer Argument Parsing
// ============================================================================

fn parse_integer(name: &str, raw: &str) -> Result<i128, CoreError> {
    raw.trim()
        .parse::<i128>()
        .map_err(|_| CoreError::invalid(format!("{name} must be an integer, got {raw:?}")))
}

/// Parses the writer's `used` argument.
///
/// # Errors
///
/// Returns `CoreError::InvalidArgument` if `raw` is not an integer, is
/// negative, or does not fit in a `u64`.
pub fn parse_used(raw: &str) -> Result<u64, CoreError> {
    let value = parse_integer("used", raw)?;
    if value < 0 {
        return Err(CoreError::invalid(format!(
            "used must be non-negative, got {value}"
        )));
    }
    u64::try_from(value).map_err(|_| CoreError::invalid(format!("used is too large: {value}")))
}

/// Parses an explicitly supplied `total` argument.
///
/// # Errors
///
/// Returns `CoreError::InvalidArgument` if `raw` is not an integer, is not
/// positive, or does not fit in a `u64`.
pub fn parse_total(raw: &str) -> Result<u64, CoreError> {
    let value = parse_integer("total", raw)?;
    if value <= 0 {
        return Err(CoreError::invalid(format!(
            "total must be greater than zero, got {value}"
        )));
    }
    u64::try_from(value).map_err(|_| CoreError::invalid(format!("total is too large: {value}")))
}

// ============================================================================
// Tests
// ============================================================================

//! Display-state mapping.
//!
//! Turns a [`UsageSnapshot`] into the strings, progress value and accent
//! tier a surface shows. Everything here is pure, so the same snapshot always
//! produces the same [`DisplayState`].

use serde::{Deserialize, Serialize};
use std::fmt;

use super::snapshot::UsageSnapshot;

// ============================================================================
// Tier
// ============================================================================

/// Presentation band selected from the remaining percentage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tier {
    /// Less than 10% remaining.
    Alert,
    /// At least 10% but less than 25% remaining.
    Warning,
    /// 25% or more remaining.
    Nominal,
}

impl Tier {
    /// Lower bound (inclusive) of the warning tier.
    pub const WARNING_THRESHOLD: f64 = 10.0;
    /// Lower bound (inclusive) of the nominal tier.
    pub const NOMINAL_THRESHOLD: f64 = 25.0;

    /// Selects the tier for a remaining percentage.
    ///
    /// NaN compares false against both thresholds and lands in `Nominal`.
    pub fn for_percentage(percentage: f64) -> Self {
        if percentage < Self::WARNING_THRESHOLD {
            Self::Alert
        } else if percentage < Self::NOMINAL_THRESHOLD {
            Self::Warning
        } else {
            Self::Nominal
        }
    }

    /// Accent color for this tier.
    pub const fn color(self) -> Rgb {
        match self {
            Self::Alert => Rgb::new(0xff, 0x55, 0x55),
            Self::Warning => Rgb::new(0xff, 0xaa, 0x00),
            Self::Nominal => Rgb::new(0x4e, 0xc9, 0xb0),
        }
    }

    /// Short lowercase label.
    pub const fn label(self) -> &'static str {
        match self {
            Self::Alert => "alert",
            Self::Warning => "warning",
            Self::Nominal => "nominal",
        }
    }
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

// ============================================================================
// Color
// ============================================================================

/// A 24-bit color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rgb {
    /// Red channel.
    pub r: u8,
    /// Green channel.
    pub g: u8,
    /// Blue channel.
    pub b: u8,
}

impl Rgb {
    /// Creates a color from its channels.
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// `#rrggbb` form.
    pub fn hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.hex())
    }
}

// ============================================================================
// Number Formatting
// ============================================================================

/// Formats an integer with `,` thousands separators (`-1,234,567`).
pub fn format_thousands(value: impl Into<i128>) -> String {
    let value: i128 = value.into();
    let digits = value.unsigned_abs().to_string();

    let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    if value < 0 {
        out.push('-');
    }
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

// ============================================================================
// Display State
// ============================================================================

/// What a surface shows for one snapshot.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DisplayState {
    /// Remaining units, thousands-separated.
    pub headline_text: String,
    /// `"{used} / {total} ({percentage}%)"`.
    pub detail_text: String,
    /// The snapshot percentage, unclamped.
    pub progress_value: f64,
    /// Accent tier.
    pub tier: Tier,
}

impl DisplayState {
    /// Maps a snapshot to its display state.
    pub fn from_snapshot(snapshot: &UsageSnapshot) -> Self {
        Self {
            headline_text: format_thousands(snapshot.remaining),
            detail_text: format!(
                "{} / {} ({:.1}%)",
                format_thousands(snapshot.used),
                format_thousands(snapshot.total),
                snapshot.percentage
            ),
            progress_value: snapshot.percentage,
            tier: Tier::for_percentage(snapshot.percentage),
        }
    }

    /// Accent color of the current tier.
    pub fn accent_color(&self) -> Rgb {
        self.tier.color()
    }

    /// Progress clamped to `[0, 100]` for surfaces with a fixed range.
    pub fn clamped_progress(&self) -> f64 {
        if self.progress_value.is_nan() {
            return 0.0;
        }
        self.progress_value.clamp(0.0, 100.0)
    }
}

impl From<&UsageSnapshot> for DisplayState {
    fn from(snapshot: &UsageSnapshot) -> Self {
        Self::from_snapshot(snapshot)
    }
}

// ============================================================================
// Tests
// ============================================================================

//! Text output formatting with progress bars and colors.

use tokenhud_core::{DisplayState, PollStatus, Rgb, UsageSnapshot, format_thousands};

// ============================================================================
// ANSI Colors
// ============================================================================

const RESET: &str = "\x1b[0m";
const BOLD: &str = "\x1b[1m";
const DIM: &str = "\x1b[2m";

// Progress bar characters
const BAR_FULL: char = '█';
const BAR_EMPTY: char = '░';

/// Text formatter with optional colors.
pub struct TextFormatter {
    use_colors: bool,
    bar_width: usize,
}

impl TextFormatter {
    /// Creates a new text formatter.
    pub fn new(use_colors: bool) -> Self {
        Self {
            use_colors,
            bar_width: 20,
        }
    }

    /// Set the progress bar width.
    pub fn with_bar_width(mut self, width: usize) -> Self {
        self.bar_width = width.max(1);
        self
    }

    /// Formats the HUD body for one frame.
    ///
    /// ```text
    /// Tokens remaining
    ///   20,000
    ///   ████░░░░░░░░░░░░░░░░
    ///   180,000 / 200,000 (10.0%)
    /// ```
    pub fn format_hud(&self, display: &DisplayState, status: &PollStatus) -> String {
        let accent = display.accent_color();
        let mut lines = Vec::with_capacity(5);

        lines.push(self.bold("Tokens remaining"));
        lines.push(format!(
            "  {}",
            self.bold(&self.colored(&display.headline_text, accent))
        ));
        lines.push(format!(
            "  {}",
            self.progress_bar(display.clamped_progress(), accent)
        ));

        let mut detail = format!("  {}", self.dim(&display.detail_text));
        if status.stale {
            detail.push_str(&format!("  {}", self.dim("[stale]")));
        }
        lines.push(detail);

        lines.join("\n")
    }

    /// Formats the writer's confirmation line.
    pub fn format_confirmation(&self, snapshot: &UsageSnapshot) -> String {
        format!(
            "Token count updated: {} remaining ({:.1}%)",
            format_thousands(snapshot.remaining),
            snapshot.percentage
        )
    }

    /// Formats a progress bar for a percentage already clamped to `[0, 100]`.
    #[allow(
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss,
        clippy::cast_precision_loss
    )]
    pub fn progress_bar(&self, percent: f64, color: Rgb) -> String {
        let filled = ((percent / 100.0) * self.bar_width as f64).round() as usize;
        let filled = filled.min(self.bar_width);
        let empty = self.bar_width - filled;

        let bar = format!(
            "{}{}",
            BAR_FULL.to_string().repeat(filled),
            BAR_EMPTY.to_string().repeat(empty)
        );

        self.colored(&bar, color)
    }

    // ========================================================================
    // Color Helpers
    // ========================================================================

    fn colored(&self, text: &str, color: Rgb) -> String {
        if self.use_colors {
            format!(
                "\x1b[38;2;{};{};{}m{}{}",
                color.r, color.g, color.b, text, RESET
            )
        } else {
            text.to_string()
        }
    }

    fn bold(&self, text: &str) -> String {
        if self.use_colors {
            format!("{BOLD}{text}{RESET}")
        } else {
            text.to_string()
        }
    }

    fn dim(&self, text: &str) -> String {
        if self.use_colors {
            format!("{DIM}{text}{RESET}")
        } else {
            text.to_string()
        }
    }
}

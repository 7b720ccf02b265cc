//! Terminal surface for the poll loop.

use std::io::{self, Write};
use std::path::PathBuf;
use std::time::Duration;

use tokenhud_core::{DisplayState, PollStatus, Renderer};

use super::json::JsonFormatter;
use super::text::TextFormatter;

const CLEAR_SCREEN: &str = "\x1b[2J\x1b[H";

/// How frames are written.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderMode {
    /// Clear the screen and redraw the whole HUD.
    Frame,
    /// One JSON object per line, no screen control.
    JsonLines,
}

/// Header shown above each full-screen frame.
struct Header {
    status_path: PathBuf,
    interval: Duration,
}

/// Draws HUD frames to a writer.
pub struct TerminalRenderer<W: Write> {
    out: W,
    mode: RenderMode,
    text: TextFormatter,
    json: JsonFormatter,
    header: Option<Header>,
}

impl<W: Write> TerminalRenderer<W> {
    /// Creates a renderer without a header.
    pub fn new(out: W, mode: RenderMode, text: TextFormatter) -> Self {
        Self {
            out,
            mode,
            text,
            json: JsonFormatter::new(false),
            header: None,
        }
    }

    /// Adds the clock/path header to full-screen frames.
    pub fn with_header(mut self, status_path: PathBuf, interval: Duration) -> Self {
        self.header = Some(Header {
            status_path,
            interval,
        });
        self
    }

    /// Returns the underlying writer.
    #[cfg(test)]
    pub fn into_inner(self) -> W {
        self.out
    }

    fn write_frame(&mut self, state: &DisplayState, status: &PollStatus) -> io::Result<()> {
        write!(self.out, "{CLEAR_SCREEN}")?;

        if let Some(header) = &self.header {
            let now = chrono::Local::now();
            writeln!(
                self.out,
                "TokenHUD - {} (refresh: {}ms)",
                now.format("%H:%M:%S"),
                header.interval.as_millis()
            )?;
            writeln!(self.out, "{}", header.status_path.display())?;
            writeln!(self.out, "{}", "─".repeat(40))?;
            writeln!(self.out)?;
        }

        writeln!(self.out, "{}", self.text.format_hud(state, status))?;

        if self.header.is_some() {
            writeln!(self.out)?;
            writeln!(self.out, "Press Ctrl+C to exit")?;
        }
        Ok(())
    }

    fn write_json_line(&mut self, state: &DisplayState, status: &PollStatus) -> io::Result<()> {
        let line = self
            .json
            .format_frame(state, status)
            .map_err(io::Error::other)?;
        writeln!(self.out, "{line}")
    }
}

impl<W: Write> Renderer for TerminalRenderer<W> {
    type Error = io::Error;

    fn render(&mut self, state: &DisplayState, status: &PollStatus) -> io::Result<()> {
        match self.mode {
            RenderMode::Frame => self.write_frame(state, status)?,
            RenderMode::JsonLines => self.write_json_line(state, status)?,
        }
        self.out.flush()
    }
}

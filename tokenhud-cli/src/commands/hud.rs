//! Hud command - live display of the status record.

use std::io::{Write, stdout};

use anyhow::Result;
use clap::Args;
use tokenhud_store::{HudConfig, Poller};
use tracing::info;

use crate::output::{RenderMode, TerminalRenderer, TextFormatter};
use crate::{Cli, OutputFormat};

/// Arguments for the hud command.
#[derive(Args, Default)]
pub struct HudArgs {
    /// Poll interval in milliseconds.
    #[arg(long, short, value_name = "MS")]
    pub interval_ms: Option<u64>,

    /// Upper bound on one status read, in milliseconds.
    #[arg(long, value_name = "MS")]
    pub read_timeout_ms: Option<u64>,

    /// Mark the display stale after this many seconds without a good read.
    #[arg(long, value_name = "SECS")]
    pub stale_after: Option<u64>,

    /// Exit after this many ticks instead of running until interrupted.
    #[arg(long)]
    pub ticks: Option<u64>,

    /// Progress bar width in cells.
    #[arg(long, value_name = "CELLS")]
    pub bar_width: Option<usize>,
}

impl HudArgs {
    /// Applies command-line overrides on top of the loaded config.
    fn apply(&self, mut config: HudConfig) -> HudConfig {
        if let Some(ms) = self.interval_ms {
            config.poll_interval_ms = ms;
        }
        if let Some(ms) = self.read_timeout_ms {
            config.read_timeout_ms = ms;
        }
        if let Some(secs) = self.stale_after {
            config.stale_after_secs = Some(secs);
        }
        if let Some(width) = self.bar_width {
            config.bar_width = width.max(1);
        }
        config
    }
}

/// Runs the hud command.
pub async fn run(args: &HudArgs, cli: &Cli, config: HudConfig) -> Result<()> {
    let config = args.apply(config);

    let mut poller_config = config.poller_config();
    poller_config.max_ticks = args.ticks;

    let mode = match cli.format {
        OutputFormat::Text => RenderMode::Frame,
        OutputFormat::Json => RenderMode::JsonLines,
    };

    info!(
        path = %config.status_path().display(),
        interval = ?config.poll_interval(),
        "Starting HUD"
    );

    let formatter = TextFormatter::new(config.use_colors).with_bar_width(config.bar_width);
    let renderer = TerminalRenderer::new(stdout(), mode, formatter)
        .with_header(config.status_path(), config.poll_interval());

    let mut poller = Poller::new(config.status_store(), poller_config);

    tokio::select! {
        _ = poller.run(renderer) => {}
        _ = tokio::signal::ctrl_c() => {
            info!("Interrupted, stopping HUD");
        }
    }

    if mode == RenderMode::Frame {
        println!();
        stdout().flush()?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_overrides_apply_to_config() {
        let args = HudArgs {
            interval_ms: Some(250),
            read_timeout_ms: Some(40),
            stale_after: Some(60),
            ticks: Some(3),
            bar_width: Some(0),
        };
        let config = args.apply(HudConfig::default());

        assert_eq!(config.poll_interval(), Duration::from_millis(250));
        assert_eq!(config.read_timeout(), Duration::from_millis(40));
        assert_eq!(config.stale_after(), Some(Duration::from_secs(60)));
        assert_eq!(config.bar_width, 1);
    }

    #[test]
    fn test_no_overrides_keep_config() {
        let config = HudArgs::default().apply(HudConfig::default());
        assert_eq!(config, HudConfig::default());
    }
}

//! Show command - read the status record once.

use anyhow::Result;
use tokenhud_store::{HudConfig, Poller};

use crate::output::{JsonFormatter, TextFormatter};
use crate::{Cli, OutputFormat};

/// Runs the show command.
///
/// Goes through one poll tick, so an unreadable record shows the boot
/// snapshot (with a logged warning) exactly as the HUD would.
pub async fn run(cli: &Cli, config: &HudConfig) -> Result<()> {
    let mut poller = Poller::new(config.status_store(), config.poller_config());
    poller.tick().await;

    let display = poller.display();

    match cli.format {
        OutputFormat::Text => {
            let formatter = TextFormatter::new(config.use_colors).with_bar_width(config.bar_width);
            println!("{}", formatter.format_hud(&display, poller.status()));
        }
        OutputFormat::Json => {
            let formatter = JsonFormatter::new(cli.pretty);
            println!(
                "{}",
                formatter.format_show(poller.snapshot(), &display, poller.status())?
            );
        }
    }

    Ok(())
}

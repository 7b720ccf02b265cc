//! Set command - the status record writer.

use anyhow::Result;
use clap::Args;
use tokenhud_core::{parse_total, parse_used};
use tokenhud_store::HudConfig;

use crate::output::{JsonFormatter, TextFormatter};
use crate::{Cli, OutputFormat};

/// Arguments for the set command.
#[derive(Args)]
pub struct SetArgs {
    /// Tokens used so far.
    #[arg(value_name = "USED", allow_hyphen_values = true)]
    pub used: String,

    /// Token budget. Defaults to the configured default_total (200000).
    #[arg(value_name = "TOTAL", allow_hyphen_values = true)]
    pub total: Option<String>,
}

/// Runs the set command.
pub async fn run(args: &SetArgs, cli: &Cli, config: &HudConfig) -> Result<()> {
    // Validate everything before touching the record
    let used = parse_used(&args.used)?;
    let total = match &args.total {
        Some(raw) => parse_total(raw)?,
        None => config.default_total,
    };

    let snapshot = config.status_store().write_snapshot(used, total).await?;

    match cli.format {
        OutputFormat::Text => {
            if !cli.quiet {
                let formatter = TextFormatter::new(config.use_colors);
                println!("{}", formatter.format_confirmation(&snapshot));
            }
        }
        OutputFormat::Json => {
            let formatter = JsonFormatter::new(cli.pretty);
            println!("{}", formatter.format_snapshot(&snapshot)?);
        }
    }

    Ok(())
}

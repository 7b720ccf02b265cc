//! Path command - show where the record and config live.

use anyhow::Result;
use serde_json::json;
use tokenhud_store::HudConfig;

use crate::{Cli, OutputFormat};

/// Runs the path command.
pub fn run(cli: &Cli, config: &HudConfig) -> Result<()> {
    let status_path = config.status_path();
    let config_path = cli.config.clone().unwrap_or_else(HudConfig::default_path);

    match cli.format {
        OutputFormat::Text => {
            println!("Status record: {}", status_path.display());
            println!("Config file:   {}", config_path.display());
        }
        OutputFormat::Json => {
            let value = json!({
                "statusPath": status_path,
                "configPath": config_path,
            });
            let out = if cli.pretty {
                serde_json::to_string_pretty(&value)?
            } else {
                serde_json::to_string(&value)?
            };
            println!("{out}");
        }
    }

    Ok(())
}

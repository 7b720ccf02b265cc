// Lint configuration for this crate
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

//! TokenHUD CLI - write token usage and watch it live.
//!
//! # Examples
//!
//! ```bash
//! # Record usage (total defaults to 200000)
//! tokenhud set 25000
//! tokenhud set 180000 200000
//!
//! # Live HUD, polling once per second
//! tokenhud hud
//!
//! # One-shot view, JSON output
//! tokenhud show --format json --pretty
//!
//! # Where things live
//! tokenhud path
//! ```

mod commands;
mod output;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use tokenhud_core::CoreError;
use tokenhud_store::{HudConfig, StoreError};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use commands::{hud, path, set, show};

// ============================================================================
// CLI Definition
// ============================================================================

/// TokenHUD CLI - token budget status file writer and live display.
#[derive(Parser)]
#[command(name = "tokenhud")]
#[command(about = "Token budget status writer and live HUD")]
#[command(long_about = r#"
TokenHUD keeps a single status record with tokens used, the budget, what
remains and the remaining percentage. One process writes it, another polls
it and shows the remaining count, colored by how much is left.

Examples:
  tokenhud set 25000             # Record usage against the default budget
  tokenhud set 180000 200000     # Record usage against an explicit budget
  tokenhud hud                   # Live display, refreshed every second
  tokenhud show --format json    # One-shot read
"#)]
#[command(version)]
pub struct Cli {
    /// Subcommand to run. If none, runs 'show'.
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Output format (text or json).
    #[arg(long, short = 'f', default_value = "text", global = true)]
    pub format: OutputFormat,

    /// Pretty-print JSON output.
    #[arg(long, global = true)]
    pub pretty: bool,

    /// Status record path (overrides the configured one).
    #[arg(long, global = true, value_name = "PATH")]
    pub file: Option<PathBuf>,

    /// Configuration file path.
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Verbose output (show debug info).
    #[arg(long, short, global = true)]
    pub verbose: bool,

    /// Disable colored output.
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Quiet mode (minimal output).
    #[arg(long, short, global = true)]
    pub quiet: bool,
}

/// CLI commands.
#[derive(Subcommand)]
pub enum Commands {
    /// Write a new usage snapshot to the status record.
    #[command(visible_alias = "update")]
    Set(set::SetArgs),

    /// Poll the status record and display it live.
    #[command(visible_alias = "watch")]
    Hud(hud::HudArgs),

    /// Read the status record once and display it.
    Show,

    /// Show status record and configuration paths.
    Path,
}

/// Output format options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Default)]
pub enum OutputFormat {
    /// Human-readable text with colors.
    #[default]
    Text,
    /// JSON output for scripting.
    Json,
}

/// CLI exit codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum ExitCode {
    /// Success.
    Success = 0,
    /// General error.
    Error = 1,
    /// A value on the command line was rejected.
    InvalidArgument = 2,
}

impl ExitCode {
    /// Picks the exit code for a failed command.
    fn for_error(err: &anyhow::Error) -> Self {
        let invalid = err
            .downcast_ref::<CoreError>()
            .is_some_and(|e| matches!(e, CoreError::InvalidArgument(_)))
            || err
                .downcast_ref::<StoreError>()
                .is_some_and(StoreError::is_invalid_argument);
        if invalid {
            ExitCode::InvalidArgument
        } else {
            ExitCode::Error
        }
    }
}

// ============================================================================
// Logging Setup
// ============================================================================

fn setup_logging(verbose: bool, quiet: bool) {
    if quiet {
        return; // No logging in quiet mode
    }

    let filter = if verbose {
        EnvFilter::new("tokenhud=debug,tokenhud_store=debug,info")
    } else {
        EnvFilter::new("tokenhud=warn,tokenhud_store=warn")
    };

    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_target(false)
                .without_time()
                .with_writer(std::io::stderr),
        )
        .with(filter)
        .init();
}

// ============================================================================
// Configuration
// ============================================================================

/// Loads the config file and applies global flag overrides.
fn load_config(cli: &Cli) -> Result<HudConfig> {
    let mut config = match &cli.config {
        Some(path) => HudConfig::load_from(path)?,
        None => HudConfig::load()?,
    };

    if let Some(file) = &cli.file {
        config.status_path = Some(file.clone());
    }
    if cli.no_color {
        config.use_colors = false;
    }
    Ok(config)
}

// ============================================================================
// Main Entry Point
// ============================================================================

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet);

    let result = match load_config(&cli) {
        Ok(config) => match &cli.command {
            Some(Commands::Set(args)) => set::run(args, &cli, &config).await,
            Some(Commands::Hud(args)) => hud::run(args, &cli, config).await,
            Some(Commands::Show) | None => show::run(&cli, &config).await,
            Some(Commands::Path) => path::run(&cli, &config),
        },
        Err(e) => Err(e),
    };

    if let Err(e) = result {
        if !cli.quiet {
            eprintln!("Error: {e}");
        }
        std::process::exit(ExitCode::for_error(&e) as i32);
    }

    Ok(())
}

// ============================================================================
// Tests
// ============================================================================

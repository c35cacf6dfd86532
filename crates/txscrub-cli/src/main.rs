//! txscrub CLI - transaction-export cleaning pipeline
//!
//! Usage:
//!   txscrub clean --input raw.csv --output cleaned.csv [--summary stats.csv]
//!   txscrub analyze --input cleaned.csv --out-dir reports/
//!   txscrub run --input raw.csv --out-dir out/

mod cli;
mod commands;

#[cfg(test)]
mod tests;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use cli::*;

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Set up logging
    // Priority: RUST_LOG env var > --verbose flag > default (info)
    let filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(false).compact())
        .init();

    match cli.command {
        Commands::Clean {
            input,
            output,
            summary,
            json,
        } => commands::cmd_clean(&input, &output, summary.as_deref(), json),
        Commands::Analyze { input, out_dir } => commands::cmd_analyze(&input, &out_dir),
        Commands::Run {
            input,
            out_dir,
            json,
        } => commands::cmd_run(&input, &out_dir, json),
    }
}

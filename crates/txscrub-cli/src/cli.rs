//! CLI argument definitions using clap
//!
//! This module contains the clap structs and enums for parsing CLI
//! arguments. The actual command implementations are in the `commands`
//! module.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// txscrub - Clean a raw transaction export and roll it up into reports
#[derive(Parser)]
#[command(name = "txscrub")]
#[command(about = "Transaction-export cleaning and reporting pipeline", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Clean and validate a raw export into the canonical table
    Clean {
        /// Raw transaction export CSV
        #[arg(short, long)]
        input: PathBuf,

        /// Where to write the canonical table
        #[arg(short, long)]
        output: PathBuf,

        /// Where to write the per-column statistics summary
        #[arg(short, long)]
        summary: Option<PathBuf>,

        /// Print the row-count stats as JSON instead of text
        #[arg(long)]
        json: bool,
    },

    /// Build the report tables from a canonical table
    Analyze {
        /// Canonical table CSV (output of `clean`)
        #[arg(short, long)]
        input: PathBuf,

        /// Directory for the report CSVs (created if missing)
        #[arg(short, long)]
        out_dir: PathBuf,
    },

    /// Run both stages: clean a raw export, then build all reports
    Run {
        /// Raw transaction export CSV
        #[arg(short, long)]
        input: PathBuf,

        /// Directory for the canonical table and report CSVs
        #[arg(short, long)]
        out_dir: PathBuf,

        /// Print the row-count stats as JSON instead of text
        #[arg(long)]
        json: bool,
    },
}

//! Run command implementation: both pipeline stages end to end

use std::path::Path;

use anyhow::{Context, Result};
use txscrub_core::{clean_records, describe, read_clean, read_raw, write_clean, write_describe};

use super::clean::print_stats;
use super::{create_output, open_input, write_reports};

pub const CLEANED_TABLE: &str = "cleaned.csv";
pub const CLEAN_SUMMARY: &str = "clean_summary.csv";

pub fn cmd_run(input: &Path, out_dir: &Path, json: bool) -> Result<()> {
    std::fs::create_dir_all(out_dir)
        .with_context(|| format!("Failed to create directory: {}", out_dir.display()))?;

    println!("🧹 Cleaning {}...", input.display());
    let raw = read_raw(open_input(input)?)?;
    println!("   Found {} raw records", raw.len());

    let (records, stats) = clean_records(raw)?;

    let cleaned_path = out_dir.join(CLEANED_TABLE);
    write_clean(create_output(&cleaned_path)?, &records)?;
    write_describe(create_output(&out_dir.join(CLEAN_SUMMARY))?, &describe(&records))?;
    print_stats(&stats, json)?;
    println!("   Canonical table written to {}", cleaned_path.display());

    // The analyze stage reads the canonical table back from disk, the same
    // way a standalone `analyze` invocation would.
    println!("📊 Analyzing {}...", cleaned_path.display());
    let reloaded = read_clean(open_input(&cleaned_path)?)?;
    write_reports(&reloaded, out_dir)?;

    println!("✅ Pipeline complete. Outputs saved to {}", out_dir.display());
    Ok(())
}

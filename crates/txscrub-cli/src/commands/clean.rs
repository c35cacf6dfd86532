//! Clean command implementation

use std::path::Path;

use anyhow::Result;
use txscrub_core::{clean_records, describe, read_raw, write_clean, write_describe, CleanStats};

use super::{create_output, open_input};

pub fn cmd_clean(
    input: &Path,
    output: &Path,
    summary: Option<&Path>,
    json: bool,
) -> Result<()> {
    println!("🧹 Cleaning {}...", input.display());

    let raw = read_raw(open_input(input)?)?;
    println!("   Found {} raw records", raw.len());

    let (records, stats) = clean_records(raw)?;
    write_clean(create_output(output)?, &records)?;

    if let Some(summary_path) = summary {
        write_describe(create_output(summary_path)?, &describe(&records))?;
        println!("   Summary written to {}", summary_path.display());
    }

    print_stats(&stats, json)?;
    println!("   Canonical table written to {}", output.display());
    Ok(())
}

pub fn print_stats(stats: &CleanStats, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(stats)?);
    } else {
        println!("✅ Clean complete!");
        println!("   Kept: {}", stats.kept_rows);
        println!("   Dropped (invalid card length): {}", stats.dropped_invalid_card);
    }
    Ok(())
}

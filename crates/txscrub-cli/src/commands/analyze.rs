//! Analyze command implementation

use std::path::Path;

use anyhow::{Context, Result};
use txscrub_core::{read_clean, write_table, CleanRecord, Reports};

use super::{create_output, open_input};

pub const CUSTOMER_REPORT: &str = "customer_transactions.csv";
pub const CATEGORY_REPORT: &str = "category_transactions.csv";
pub const WEEKLY_REPORT: &str = "weekly_patterns.csv";
pub const MONTHLY_REPORT: &str = "monthly_patterns.csv";
pub const TIMESERIES_REPORT: &str = "category_timeseries.csv";

pub fn cmd_analyze(input: &Path, out_dir: &Path) -> Result<()> {
    println!("📊 Analyzing {}...", input.display());

    let records = read_clean(open_input(input)?)?;
    println!("   Loaded {} canonical records", records.len());

    write_reports(&records, out_dir)?;
    println!("✅ Analysis complete. Reports saved to {}", out_dir.display());
    Ok(())
}

/// Build all five reports and write them into `out_dir` (created if missing).
pub fn write_reports(records: &[CleanRecord], out_dir: &Path) -> Result<()> {
    std::fs::create_dir_all(out_dir)
        .with_context(|| format!("Failed to create directory: {}", out_dir.display()))?;

    let reports = Reports::build(records);

    write_table(create_output(&out_dir.join(CUSTOMER_REPORT))?, &reports.customer_summary)?;
    write_table(create_output(&out_dir.join(CATEGORY_REPORT))?, &reports.category_summary)?;
    write_table(create_output(&out_dir.join(WEEKLY_REPORT))?, &reports.weekly_patterns)?;
    write_table(create_output(&out_dir.join(MONTHLY_REPORT))?, &reports.monthly_patterns)?;
    write_table(
        create_output(&out_dir.join(TIMESERIES_REPORT))?,
        &reports.category_timeseries,
    )?;

    println!("   Customers: {} rows", reports.customer_summary.len());
    println!("   Categories: {} rows", reports.category_summary.len());
    println!("   Weekly patterns: {} rows", reports.weekly_patterns.len());
    println!("   Monthly patterns: {} rows", reports.monthly_patterns.len());
    println!("   Time series: {} rows", reports.category_timeseries.len());
    Ok(())
}

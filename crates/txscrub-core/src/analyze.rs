//! The aggregation stage: five report tables over the canonical table
//!
//! Each report is computed independently from the canonical table alone.
//! Rows without a transaction amount are excluded up front; rows without a
//! transaction date additionally drop out of the three date-keyed reports,
//! since no date group can be formed for them.

use std::collections::BTreeMap;

use chrono::Datelike;
use tracing::debug;

use crate::models::{
    CategorySummaryRow, CategoryTimeseriesRow, CleanRecord, CustomerSummaryRow, MonthlyPatternRow,
    WeeklyPatternRow,
};
use crate::text::clean_row_value;

/// All five report tables for one run.
#[derive(Debug, Clone, Default)]
pub struct Reports {
    pub customer_summary: Vec<CustomerSummaryRow>,
    pub category_summary: Vec<CategorySummaryRow>,
    pub weekly_patterns: Vec<WeeklyPatternRow>,
    pub monthly_patterns: Vec<MonthlyPatternRow>,
    pub category_timeseries: Vec<CategoryTimeseriesRow>,
}

impl Reports {
    pub fn build(records: &[CleanRecord]) -> Self {
        let reports = Self {
            customer_summary: customer_summary(records),
            category_summary: category_summary(records),
            weekly_patterns: weekly_patterns(records),
            monthly_patterns: monthly_patterns(records),
            category_timeseries: category_timeseries(records),
        };
        debug!(
            "Built reports: {} customers, {} categories, {} weekly, {} monthly, {} timeseries rows",
            reports.customer_summary.len(),
            reports.category_summary.len(),
            reports.weekly_patterns.len(),
            reports.monthly_patterns.len(),
            reports.category_timeseries.len()
        );
        reports
    }
}

/// Rows that carry an amount, paired with it. Every report starts here.
fn spendable(records: &[CleanRecord]) -> impl Iterator<Item = (&CleanRecord, f64)> {
    records
        .iter()
        .filter_map(|r| r.transaction_amount.map(|amount| (r, amount)))
}

/// "First Last", blank-safe: either half may be empty, the join is trimmed.
fn customer_name(record: &CleanRecord) -> String {
    format!("{} {}", record.first_name, record.last_name)
        .trim()
        .to_string()
}

fn round2(v: f64) -> f64 {
    (v * 100.0).round() / 100.0
}

/// Sort aggregated rows by total spend, highest first. Grouping came out of
/// a BTreeMap, so ties keep key order and the result is deterministic.
fn sort_by_spend_desc<T>(rows: &mut [T], total: impl Fn(&T) -> f64) {
    rows.sort_by(|a, b| {
        total(b)
            .partial_cmp(&total(a))
            .unwrap_or(std::cmp::Ordering::Equal)
    });
}

/// Spending per (card, customer name), sorted by total spend descending.
pub fn customer_summary(records: &[CleanRecord]) -> Vec<CustomerSummaryRow> {
    let mut groups: BTreeMap<(String, String), (f64, u64)> = BTreeMap::new();
    for (record, amount) in spendable(records) {
        let key = (record.credit_card_number.clone(), customer_name(record));
        let entry = groups.entry(key).or_default();
        entry.0 += amount;
        entry.1 += 1;
    }

    let mut rows: Vec<CustomerSummaryRow> = groups
        .into_iter()
        .map(
            |((credit_card_number, customer_name), (total, count))| CustomerSummaryRow {
                credit_card_number,
                customer_name,
                total_spent: total,
                transaction_count: count,
                average_transaction_amount: round2(total / count as f64),
            },
        )
        .collect();
    sort_by_spend_desc(&mut rows, |r| r.total_spent);
    rows
}

/// Spending per merchant category, sorted by total spend descending.
/// Grouping is on the canonical category value; the display value is
/// row-value-cleaned after aggregation.
pub fn category_summary(records: &[CleanRecord]) -> Vec<CategorySummaryRow> {
    let mut groups: BTreeMap<String, (f64, u64)> = BTreeMap::new();
    for (record, amount) in spendable(records) {
        let entry = groups.entry(record.merchant_category.clone()).or_default();
        entry.0 += amount;
        entry.1 += 1;
    }

    let mut rows: Vec<CategorySummaryRow> = groups
        .into_iter()
        .map(|(category, (total, count))| CategorySummaryRow {
            merchant_category: clean_row_value(&category),
            total_spent: total,
            transaction_count: count,
            average_transaction_amount: round2(total / count as f64),
        })
        .collect();
    sort_by_spend_desc(&mut rows, |r| r.total_spent);
    rows
}

/// Spend per (card, category, ISO week of the transaction date).
pub fn weekly_patterns(records: &[CleanRecord]) -> Vec<WeeklyPatternRow> {
    let mut groups: BTreeMap<(String, String, String), f64> = BTreeMap::new();
    for (record, amount) in spendable(records) {
        let Some(date) = record.transaction_date else {
            continue;
        };
        let key = (
            record.credit_card_number.clone(),
            record.merchant_category.clone(),
            iso_week_label(date),
        );
        *groups.entry(key).or_default() += amount;
    }

    groups
        .into_iter()
        .map(|((card, category, week), total)| WeeklyPatternRow {
            credit_card_number: card,
            merchant_category: clean_row_value(&category),
            week,
            transaction_amount: total,
        })
        .collect()
}

/// Spend per (card, category, year, month name).
pub fn monthly_patterns(records: &[CleanRecord]) -> Vec<MonthlyPatternRow> {
    let mut groups: BTreeMap<(String, String, i32, u32), f64> = BTreeMap::new();
    for (record, amount) in spendable(records) {
        let Some(date) = record.transaction_date else {
            continue;
        };
        let key = (
            record.credit_card_number.clone(),
            record.merchant_category.clone(),
            date.year(),
            date.month(),
        );
        *groups.entry(key).or_default() += amount;
    }

    groups
        .into_iter()
        .map(|((card, category, year, month), total)| MonthlyPatternRow {
            credit_card_number: card,
            merchant_category: clean_row_value(&category),
            year,
            month: month_name(month),
            transaction_amount: total,
        })
        .collect()
}

/// Spend per (transaction date, category), sorted by date ascending (the
/// BTreeMap key order).
pub fn category_timeseries(records: &[CleanRecord]) -> Vec<CategoryTimeseriesRow> {
    let mut groups: BTreeMap<(chrono::NaiveDate, String), f64> = BTreeMap::new();
    for (record, amount) in spendable(records) {
        let Some(date) = record.transaction_date else {
            continue;
        };
        *groups
            .entry((date, record.merchant_category.clone()))
            .or_default() += amount;
    }

    groups
        .into_iter()
        .map(|((date, category), total)| CategoryTimeseriesRow {
            transaction_date: date,
            merchant_category: clean_row_value(&category),
            transaction_amount: total,
        })
        .collect()
}

/// ISO calendar week label, e.g. "2020-W25". Uses the ISO week-numbering
/// year, which can differ from the calendar year at year boundaries.
fn iso_week_label(date: chrono::NaiveDate) -> String {
    let week = date.iso_week();
    format!("{}-W{:02}", week.year(), week.week())
}

fn month_name(month: u32) -> String {
    const MONTHS: [&str; 12] = [
        "January",
        "February",
        "March",
        "April",
        "May",
        "June",
        "July",
        "August",
        "September",
        "October",
        "November",
        "December",
    ];
    MONTHS[(month as usize).saturating_sub(1).min(11)].to_string()
}

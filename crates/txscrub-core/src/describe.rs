//! Per-column descriptive statistics over the canonical table
//!
//! Numeric columns get count/mean/std/min/quartiles/max, everything else
//! gets count/unique/top/freq. The result is a stat-by-column table that
//! the export module writes as the clean-summary CSV.

use std::collections::HashMap;

use crate::models::CleanRecord;

/// Statistics for one canonical column. Fields that do not apply to the
/// column's type stay `None` and render as empty cells.
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnSummary {
    pub name: &'static str,
    /// Non-missing values
    pub count: usize,
    pub unique: Option<usize>,
    /// Most frequent value; ties broken by first occurrence
    pub top: Option<String>,
    pub freq: Option<usize>,
    pub mean: Option<f64>,
    /// Sample standard deviation (n-1); missing for fewer than 2 values
    pub std: Option<f64>,
    pub min: Option<f64>,
    pub q25: Option<f64>,
    pub median: Option<f64>,
    pub q75: Option<f64>,
    pub max: Option<f64>,
}

/// The full describe table, one summary per canonical column in column order.
#[derive(Debug, Clone, PartialEq)]
pub struct DescribeTable {
    pub columns: Vec<ColumnSummary>,
}

enum Extractor {
    Numeric(fn(&CleanRecord) -> Option<f64>),
    Text(fn(&CleanRecord) -> Option<String>),
}

fn non_empty(s: &str) -> Option<String> {
    if s.is_empty() {
        None
    } else {
        Some(s.to_string())
    }
}

/// One extractor per canonical column, in output column order.
fn extractors() -> Vec<(&'static str, Extractor)> {
    use Extractor::{Numeric, Text};
    vec![
        ("credit_card_number", Text(|r| non_empty(&r.credit_card_number))),
        ("first_name", Text(|r| non_empty(&r.first_name))),
        ("last_name", Text(|r| non_empty(&r.last_name))),
        ("gender", Text(|r| non_empty(&r.gender))),
        ("date_of_birth", Text(|r| non_empty(&r.date_of_birth))),
        ("job", Text(|r| non_empty(&r.job))),
        ("street_address", Text(|r| non_empty(&r.street_address))),
        ("city", Text(|r| non_empty(&r.city))),
        ("state", Text(|r| non_empty(&r.state))),
        ("zip_code", Text(|r| non_empty(&r.zip_code))),
        ("latitude", Numeric(|r| r.latitude)),
        ("longitude", Numeric(|r| r.longitude)),
        ("city_population", Numeric(|r| r.city_population.map(|v| v as f64))),
        ("merchant_name", Text(|r| non_empty(&r.merchant_name))),
        ("merchant_category", Text(|r| non_empty(&r.merchant_category))),
        ("merchant_latitude", Numeric(|r| r.merchant_latitude)),
        ("merchant_longitude", Numeric(|r| r.merchant_longitude)),
        ("transaction_id", Text(|r| r.transaction_id.clone())),
        ("transaction_amount", Numeric(|r| r.transaction_amount)),
        ("transaction_date", Text(|r| r.transaction_date.map(|d| d.to_string()))),
        ("transaction_time", Text(|r| r.transaction_time.map(|t| t.to_string()))),
        ("unix_timestamp", Numeric(|r| r.unix_timestamp.map(|v| v as f64))),
        ("seconds_since_last_txn", Numeric(|r| r.seconds_since_last_txn)),
        ("is_fraud", Numeric(|r| r.is_fraud.map(|v| v as f64))),
        ("city_population_missing", Text(|r| Some(r.city_population_missing.to_string()))),
        ("transaction_amount_missing", Text(|r| Some(r.transaction_amount_missing.to_string()))),
        ("latlong_missing", Text(|r| Some(r.latlong_missing.to_string()))),
        ("seconds_since_last_txn_missing", Text(|r| Some(r.seconds_since_last_txn_missing.to_string()))),
    ]
}

/// Build the describe table for a canonical table.
pub fn describe(records: &[CleanRecord]) -> DescribeTable {
    let columns = extractors()
        .into_iter()
        .map(|(name, extractor)| match extractor {
            Extractor::Numeric(get) => {
                let values: Vec<f64> = records.iter().filter_map(get).collect();
                numeric_summary(name, &values)
            }
            Extractor::Text(get) => {
                let values: Vec<String> = records.iter().filter_map(get).collect();
                text_summary(name, &values)
            }
        })
        .collect();
    DescribeTable { columns }
}

fn numeric_summary(name: &'static str, values: &[f64]) -> ColumnSummary {
    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));

    let mean = mean(values);
    ColumnSummary {
        name,
        count: values.len(),
        unique: None,
        top: None,
        freq: None,
        mean,
        std: mean.and_then(|m| std_dev(values, m)),
        min: sorted.first().copied(),
        q25: quantile(&sorted, 0.25),
        median: quantile(&sorted, 0.5),
        q75: quantile(&sorted, 0.75),
        max: sorted.last().copied(),
    }
}

fn text_summary(name: &'static str, values: &[String]) -> ColumnSummary {
    // (count, first-seen index) per distinct value
    let mut freqs: HashMap<&str, (usize, usize)> = HashMap::new();
    for (i, value) in values.iter().enumerate() {
        let entry = freqs.entry(value.as_str()).or_insert((0, i));
        entry.0 += 1;
    }

    let top = freqs
        .iter()
        .max_by_key(|(_, (count, first))| (*count, std::cmp::Reverse(*first)))
        .map(|(value, (count, _))| (value.to_string(), *count));

    ColumnSummary {
        name,
        count: values.len(),
        unique: Some(freqs.len()),
        top: top.as_ref().map(|(v, _)| v.clone()),
        freq: top.map(|(_, c)| c),
        mean: None,
        std: None,
        min: None,
        q25: None,
        median: None,
        q75: None,
        max: None,
    }
}

fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    Some(values.iter().sum::<f64>() / values.len() as f64)
}

fn std_dev(values: &[f64], mean: f64) -> Option<f64> {
    if values.len() < 2 {
        return None;
    }
    let ss: f64 = values.iter().map(|v| (v - mean).powi(2)).sum();
    Some((ss / (values.len() - 1) as f64).sqrt())
}

/// Linear-interpolation quantile over a sorted slice.
fn quantile(sorted: &[f64], q: f64) -> Option<f64> {
    if sorted.is_empty() {
        return None;
    }
    let pos = q * (sorted.len() - 1) as f64;
    let lo = pos.floor() as usize;
    let hi = pos.ceil() as usize;
    if lo == hi {
        return Some(sorted[lo]);
    }
    Some(sorted[lo] + (sorted[hi] - sorted[lo]) * (pos - lo as f64))
}

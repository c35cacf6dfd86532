//! Domain models for txscrub

use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

/// One row of the raw transaction export, exactly as it appears on disk.
///
/// Every field is a bare string: the export makes no guarantees about types,
/// ranges or even presence, so all coercion happens in the cleaning stage.
/// Fields are matched by header name; columns not listed here (the export's
/// unnamed leading index column, for one) are dropped on read.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawRecord {
    /// Combined "YYYY-MM-DD HH:MM:SS" date-time field
    #[serde(default)]
    pub trans_date_trans_time: String,
    #[serde(default)]
    pub cc_num: String,
    #[serde(default)]
    pub merchant: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub amt: String,
    #[serde(default)]
    pub first: String,
    #[serde(default)]
    pub last: String,
    #[serde(default)]
    pub gender: String,
    #[serde(default)]
    pub street: String,
    #[serde(default)]
    pub city: String,
    #[serde(default)]
    pub state: String,
    #[serde(default)]
    pub zip: String,
    #[serde(default)]
    pub lat: String,
    #[serde(default)]
    pub long: String,
    #[serde(default)]
    pub city_pop: String,
    #[serde(default)]
    pub job: String,
    #[serde(default)]
    pub dob: String,
    #[serde(default)]
    pub trans_num: String,
    #[serde(default)]
    pub unix_time: String,
    #[serde(default)]
    pub merch_lat: String,
    #[serde(default)]
    pub merch_long: String,
    #[serde(default)]
    pub is_fraud: String,
}

/// One row of the canonical cleaned table.
///
/// Field order is the output column order. `None` serializes as an empty
/// cell; after cleaning every non-`Option` field holds a validated value.
///
/// After the cleaning stage the table is sorted by
/// (`credit_card_number`, `unix_timestamp`) — the order the per-card
/// `seconds_since_last_txn` computation requires — and is written out in
/// that order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CleanRecord {
    /// Masked card number: all but the last 4 digits replaced with `*`
    pub credit_card_number: String,
    pub first_name: String,
    pub last_name: String,
    /// One of "M", "F", "Unknown"
    pub gender: String,
    pub date_of_birth: String,
    pub job: String,
    pub street_address: String,
    /// Never empty; falls back to "Unknown City"
    pub city: String,
    pub state: String,
    /// Digits only, zero-padded to at least 5 characters
    pub zip_code: String,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub city_population: Option<i64>,
    pub merchant_name: String,
    pub merchant_category: String,
    pub merchant_latitude: Option<f64>,
    pub merchant_longitude: Option<f64>,
    pub transaction_id: Option<String>,
    pub transaction_amount: Option<f64>,
    pub transaction_date: Option<NaiveDate>,
    pub transaction_time: Option<NaiveTime>,
    /// Whole seconds since the epoch; fractional raw values are rounded
    pub unix_timestamp: Option<i64>,
    /// Gap to the previous transaction on the same card, in seconds.
    /// Missing for the first transaction of each card.
    pub seconds_since_last_txn: Option<f64>,
    pub is_fraud: Option<u8>,
    pub city_population_missing: bool,
    pub transaction_amount_missing: bool,
    pub latlong_missing: bool,
    pub seconds_since_last_txn_missing: bool,
}

/// Row counts from a cleaning run.
///
/// The dropped count is the only user-visible signal for row rejection;
/// individual field failures degrade to missing values and are not counted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct CleanStats {
    /// Rows read from the raw export
    pub total_rows: usize,
    /// Rows that survived into the canonical table
    pub kept_rows: usize,
    /// Rows rejected for a card-number digit count outside [13, 16]
    pub dropped_invalid_card: usize,
}

/// Per-customer spending summary row (sorted by total spend, descending)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CustomerSummaryRow {
    pub credit_card_number: String,
    pub customer_name: String,
    pub total_spent: f64,
    pub transaction_count: u64,
    /// Mean transaction amount, rounded to 2 decimals
    pub average_transaction_amount: f64,
}

/// Per-category spending summary row (sorted by total spend, descending)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategorySummaryRow {
    pub merchant_category: String,
    pub total_spent: f64,
    pub transaction_count: u64,
    pub average_transaction_amount: f64,
}

/// Spend per (card, category, ISO week)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeeklyPatternRow {
    pub credit_card_number: String,
    pub merchant_category: String,
    /// ISO week label, e.g. "2020-W25"
    pub week: String,
    pub transaction_amount: f64,
}

/// Spend per (card, category, year, month)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthlyPatternRow {
    pub credit_card_number: String,
    pub merchant_category: String,
    pub year: i32,
    /// English month name, e.g. "June"
    pub month: String,
    pub transaction_amount: f64,
}

/// Spend per (date, category), sorted by date ascending
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryTimeseriesRow {
    pub transaction_date: NaiveDate,
    pub merchant_category: String,
    pub transaction_amount: f64,
}

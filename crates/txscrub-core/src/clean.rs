//! The normalizer/validator stage: raw records in, canonical records out
//!
//! Every field coercion failure degrades that one field to missing and the
//! row is kept; the single row-level rejection is the card-number length
//! check. The stage ends with an explicit reorder: the canonical table is
//! sorted by (card, time) because the per-card gap computation needs it,
//! and that order is part of the output contract.

use tracing::debug;

use crate::error::Result;
use crate::models::{CleanRecord, CleanStats, RawRecord};
use crate::text::{pad_zip, strip_non_digits, Profiles};

const LAT_RANGE: (f64, f64) = (-90.0, 90.0);
const LONG_RANGE: (f64, f64) = (-180.0, 180.0);
const CITY_POP_RANGE: (f64, f64) = (50.0, 15_000_000.0);
const MAX_AMOUNT: f64 = 50_000.0;
/// 2000-01-01T00:00:00Z ..= 2025-01-01T00:00:00Z
const UNIX_TS_RANGE: (i64, i64) = (946_684_800, 1_735_689_600);

/// Placeholder for rows whose city canonicalizes to nothing
pub const UNKNOWN_CITY: &str = "Unknown City";

/// Card-number digit counts accepted into the canonical table
const CARD_LEN_RANGE: std::ops::RangeInclusive<usize> = 13..=16;

const DATETIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Clean and validate a raw table into the canonical table.
///
/// Post-condition: the returned records are sorted by
/// (`credit_card_number`, `unix_timestamp`), rows with a missing timestamp
/// last within their card.
pub fn clean_records(raw: Vec<RawRecord>) -> Result<(Vec<CleanRecord>, CleanStats)> {
    let profiles = Profiles::new()?;

    let mut stats = CleanStats {
        total_rows: raw.len(),
        ..Default::default()
    };

    let mut records = Vec::with_capacity(raw.len());
    for row in &raw {
        match clean_row(row, &profiles) {
            Some(record) => records.push(record),
            None => stats.dropped_invalid_card += 1,
        }
    }

    sort_by_card_and_time(&mut records);
    fill_txn_gaps(&mut records);
    set_missing_flags(&mut records);

    stats.kept_rows = records.len();
    debug!(
        "Cleaned {} rows: kept {}, dropped {} (invalid card length)",
        stats.total_rows, stats.kept_rows, stats.dropped_invalid_card
    );
    Ok((records, stats))
}

/// Clean a single row. Returns `None` only when the card-length check fails.
fn clean_row(row: &RawRecord, profiles: &Profiles) -> Option<CleanRecord> {
    let digits = strip_non_digits(&row.cc_num);
    if !CARD_LEN_RANGE.contains(&digits.len()) {
        return None;
    }

    let (transaction_date, transaction_time) = split_datetime(&row.trans_date_trans_time);

    let city = match profiles.city.apply(&row.city) {
        s if s.is_empty() => UNKNOWN_CITY.to_string(),
        s => s,
    };

    // Population range check, plus: a population attached to an unknown city
    // is meaningless, so it is forced missing.
    let city_population = parse_in_range(&row.city_pop, CITY_POP_RANGE)
        .filter(|_| city != UNKNOWN_CITY)
        .map(|v| v.round() as i64);

    // Fractional raw timestamps round to the nearest whole second
    let unix_timestamp = parse_in_range(&row.unix_time, numeric_range(UNIX_TS_RANGE))
        .map(|v| v.round() as i64);

    Some(CleanRecord {
        credit_card_number: mask_card(&digits),
        first_name: profiles.person_name.apply(&row.first),
        last_name: profiles.person_name.apply(&row.last),
        gender: normalize_gender(&row.gender),
        date_of_birth: row.dob.clone(),
        job: profiles.job.apply(&row.job),
        street_address: profiles.street_address.apply(&row.street),
        city,
        state: row.state.trim().to_uppercase(),
        zip_code: pad_zip(&strip_non_digits(&row.zip)),
        latitude: parse_in_range(&row.lat, LAT_RANGE),
        longitude: parse_in_range(&row.long, LONG_RANGE),
        city_population,
        merchant_name: profiles.merchant_name.apply(&row.merchant),
        merchant_category: profiles.merchant_category.apply(&row.category),
        merchant_latitude: parse_in_range(&row.merch_lat, LAT_RANGE),
        merchant_longitude: parse_in_range(&row.merch_long, LONG_RANGE),
        transaction_id: normalize_transaction_id(&row.trans_num),
        transaction_amount: parse_amount(&row.amt),
        transaction_date,
        transaction_time,
        unix_timestamp,
        seconds_since_last_txn: None,
        is_fraud: normalize_fraud_flag(&row.is_fraud),
        city_population_missing: false,
        transaction_amount_missing: false,
        latlong_missing: false,
        seconds_since_last_txn_missing: false,
    })
}

/// Mask a digit-only card number: all but the last 4 digits become `*`.
/// Under 4 digits there is nothing to mask and the digits pass through
/// (such rows are rejected by the length check anyway).
fn mask_card(digits: &str) -> String {
    let masked_len = digits.len().saturating_sub(4);
    let mut out = "*".repeat(masked_len);
    out.push_str(&digits[masked_len..]);
    out
}

/// Split the combined date-time field. Parse failure leaves both halves
/// missing; the row is kept.
fn split_datetime(s: &str) -> (Option<chrono::NaiveDate>, Option<chrono::NaiveTime>) {
    match chrono::NaiveDateTime::parse_from_str(s.trim(), DATETIME_FORMAT) {
        Ok(dt) => (Some(dt.date()), Some(dt.time())),
        Err(_) => (None, None),
    }
}

fn parse_f64(s: &str) -> Option<f64> {
    let t = s.trim();
    if t.is_empty() {
        return None;
    }
    t.parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Numeric coercion with an inclusive range check; out of range is as
/// missing as unparseable.
fn parse_in_range(s: &str, (lo, hi): (f64, f64)) -> Option<f64> {
    parse_f64(s).filter(|v| (lo..=hi).contains(v))
}

fn numeric_range((lo, hi): (i64, i64)) -> (f64, f64) {
    (lo as f64, hi as f64)
}

/// Amounts must be strictly positive and at most 50,000.
fn parse_amount(s: &str) -> Option<f64> {
    parse_f64(s).filter(|v| *v > 0.0 && *v <= MAX_AMOUNT)
}

/// Trim, keep `[A-Za-z0-9_-]`, empty becomes missing.
fn normalize_transaction_id(s: &str) -> Option<String> {
    let cleaned: String = s
        .trim()
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || *c == '_' || *c == '-')
        .collect();
    if cleaned.is_empty() {
        None
    } else {
        Some(cleaned)
    }
}

fn normalize_gender(s: &str) -> String {
    match s.trim().to_lowercase().as_str() {
        "m" | "male" => "M".to_string(),
        "f" | "female" => "F".to_string(),
        _ => "Unknown".to_string(),
    }
}

/// Coerce the fraud flag to 0/1; anything else (including "2" or junk)
/// becomes missing.
fn normalize_fraud_flag(s: &str) -> Option<u8> {
    match parse_f64(s) {
        Some(v) if v == 0.0 => Some(0),
        Some(v) if v == 1.0 => Some(1),
        _ => None,
    }
}

/// Reorder the table by (card, time).
///
/// Post-condition: rows are grouped by `credit_card_number` and
/// chronological within each card, rows with a missing timestamp last.
/// This is the order [`fill_txn_gaps`] requires and the order the canonical
/// table keeps; downstream stages may rely on it.
fn sort_by_card_and_time(records: &mut [CleanRecord]) {
    records.sort_by(|a, b| {
        a.credit_card_number
            .cmp(&b.credit_card_number)
            .then_with(|| match (a.unix_timestamp, b.unix_timestamp) {
                (Some(x), Some(y)) => x.cmp(&y),
                (Some(_), None) => std::cmp::Ordering::Less,
                (None, Some(_)) => std::cmp::Ordering::Greater,
                (None, None) => std::cmp::Ordering::Equal,
            })
    });
}

/// Compute `seconds_since_last_txn` per card over the (card, time)-sorted
/// table. The first row of each card, and any row where either endpoint's
/// timestamp is missing, gets a missing gap.
fn fill_txn_gaps(records: &mut [CleanRecord]) {
    let mut prev_card: Option<String> = None;
    let mut prev_ts: Option<i64> = None;

    for record in records.iter_mut() {
        let same_card = prev_card.as_deref() == Some(record.credit_card_number.as_str());
        record.seconds_since_last_txn = match (same_card, prev_ts, record.unix_timestamp) {
            (true, Some(prev), Some(cur)) => Some((cur - prev) as f64),
            _ => None,
        };
        prev_card = Some(record.credit_card_number.clone());
        prev_ts = record.unix_timestamp;
    }
}

/// Computed last: the flags mirror whatever nullness the earlier steps left
/// behind, not the raw input's.
fn set_missing_flags(records: &mut [CleanRecord]) {
    for record in records.iter_mut() {
        record.city_population_missing = record.city_population.is_none();
        record.transaction_amount_missing = record.transaction_amount.is_none();
        record.latlong_missing = record.latitude.is_none() || record.longitude.is_none();
        record.seconds_since_last_txn_missing = record.seconds_since_last_txn.is_none();
    }
}

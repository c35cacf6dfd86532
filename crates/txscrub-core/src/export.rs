//! CSV writers for the canonical table and the report tables
//!
//! All writers take a `Write` handle; file paths belong to the caller.
//! Record and report rows serialize through serde, so the CSV header row is
//! the struct's field names in declaration order.

use csv::WriterBuilder;
use serde::Serialize;
use std::io::Write;

use crate::describe::DescribeTable;
use crate::error::Result;
use crate::models::{
    CategorySummaryRow, CategoryTimeseriesRow, CleanRecord, CustomerSummaryRow, MonthlyPatternRow,
    WeeklyPatternRow,
};

/// A row type with a known CSV header.
///
/// `HEADERS` must list the struct's serde field names in declaration order:
/// it is what gets written for an empty table, where the serializer has no
/// row to derive the header from.
pub trait TableRow: Serialize {
    const HEADERS: &'static [&'static str];
}

impl TableRow for CleanRecord {
    const HEADERS: &'static [&'static str] = &[
        "credit_card_number",
        "first_name",
        "last_name",
        "gender",
        "date_of_birth",
        "job",
        "street_address",
        "city",
        "state",
        "zip_code",
        "latitude",
        "longitude",
        "city_population",
        "merchant_name",
        "merchant_category",
        "merchant_latitude",
        "merchant_longitude",
        "transaction_id",
        "transaction_amount",
        "transaction_date",
        "transaction_time",
        "unix_timestamp",
        "seconds_since_last_txn",
        "is_fraud",
        "city_population_missing",
        "transaction_amount_missing",
        "latlong_missing",
        "seconds_since_last_txn_missing",
    ];
}

impl TableRow for CustomerSummaryRow {
    const HEADERS: &'static [&'static str] = &[
        "credit_card_number",
        "customer_name",
        "total_spent",
        "transaction_count",
        "average_transaction_amount",
    ];
}

impl TableRow for CategorySummaryRow {
    const HEADERS: &'static [&'static str] = &[
        "merchant_category",
        "total_spent",
        "transaction_count",
        "average_transaction_amount",
    ];
}

impl TableRow for WeeklyPatternRow {
    const HEADERS: &'static [&'static str] = &[
        "credit_card_number",
        "merchant_category",
        "week",
        "transaction_amount",
    ];
}

impl TableRow for MonthlyPatternRow {
    const HEADERS: &'static [&'static str] = &[
        "credit_card_number",
        "merchant_category",
        "year",
        "month",
        "transaction_amount",
    ];
}

impl TableRow for CategoryTimeseriesRow {
    const HEADERS: &'static [&'static str] =
        &["transaction_date", "merchant_category", "transaction_amount"];
}

/// Write the canonical table, header first, one row per record.
pub fn write_clean<W: Write>(writer: W, records: &[CleanRecord]) -> Result<()> {
    write_table(writer, records)
}

/// Write a row table (the canonical table or one of the five reports).
///
/// The header row is always present, even for an empty table.
pub fn write_table<W: Write, S: TableRow>(writer: W, rows: &[S]) -> Result<()> {
    let mut wtr = WriterBuilder::new().has_headers(true).from_writer(writer);
    // The serializer only emits the header alongside the first row, so an
    // empty table needs it written explicitly.
    if rows.is_empty() {
        wtr.write_record(S::HEADERS)?;
    }
    for row in rows {
        wtr.serialize(row)?;
    }
    wtr.flush()?;
    Ok(())
}

/// Write the describe table: one row per statistic, one column per
/// canonical column, pandas-style with the stat name in the first cell.
pub fn write_describe<W: Write>(writer: W, table: &DescribeTable) -> Result<()> {
    let mut wtr = WriterBuilder::new().has_headers(false).from_writer(writer);

    let mut header = vec![String::new()];
    header.extend(table.columns.iter().map(|c| c.name.to_string()));
    wtr.write_record(&header)?;

    let stat_rows: [(&str, fn(&crate::describe::ColumnSummary) -> String); 11] = [
        ("count", |c| c.count.to_string()),
        ("unique", |c| fmt_opt_usize(c.unique)),
        ("top", |c| c.top.clone().unwrap_or_default()),
        ("freq", |c| fmt_opt_usize(c.freq)),
        ("mean", |c| fmt_opt_f64(c.mean)),
        ("std", |c| fmt_opt_f64(c.std)),
        ("min", |c| fmt_opt_f64(c.min)),
        ("25%", |c| fmt_opt_f64(c.q25)),
        ("50%", |c| fmt_opt_f64(c.median)),
        ("75%", |c| fmt_opt_f64(c.q75)),
        ("max", |c| fmt_opt_f64(c.max)),
    ];

    for (stat, cell) in stat_rows {
        let mut row = vec![stat.to_string()];
        row.extend(table.columns.iter().map(cell));
        wtr.write_record(&row)?;
    }

    wtr.flush()?;
    Ok(())
}

fn fmt_opt_usize(v: Option<usize>) -> String {
    v.map(|v| v.to_string()).unwrap_or_default()
}

fn fmt_opt_f64(v: Option<f64>) -> String {
    v.map(|v| v.to_string()).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::describe::describe;
    use crate::models::CategorySummaryRow;

    #[test]
    fn test_write_table_headers_and_rows() {
        let rows = vec![CategorySummaryRow {
            merchant_category: "Travel".to_string(),
            total_spent: 12.0,
            transaction_count: 2,
            average_transaction_amount: 6.0,
        }];

        let mut out = Vec::new();
        write_table(&mut out, &rows).unwrap();
        let csv = String::from_utf8(out).unwrap();
        assert!(csv.starts_with(
            "merchant_category,total_spent,transaction_count,average_transaction_amount\n"
        ));
        assert!(csv.contains("Travel,12.0,2,6.0"));
    }

    #[test]
    fn test_empty_table_still_writes_header() {
        let rows: Vec<CategorySummaryRow> = Vec::new();
        let mut out = Vec::new();
        write_table(&mut out, &rows).unwrap();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "merchant_category,total_spent,transaction_count,average_transaction_amount\n"
        );
    }

    #[test]
    fn test_headers_const_matches_serialized_header() {
        // The explicit header for the empty case must agree with what the
        // serializer derives from the struct.
        let rows = vec![CategorySummaryRow {
            merchant_category: "Travel".to_string(),
            total_spent: 1.0,
            transaction_count: 1,
            average_transaction_amount: 1.0,
        }];
        let mut out = Vec::new();
        write_table(&mut out, &rows).unwrap();
        let csv = String::from_utf8(out).unwrap();
        let header = csv.lines().next().unwrap();
        assert_eq!(header, CategorySummaryRow::HEADERS.join(","));
    }

    #[test]
    fn test_write_describe_shape() {
        let table = describe(&[]);
        let mut out = Vec::new();
        write_describe(&mut out, &table).unwrap();
        let csv = String::from_utf8(out).unwrap();

        let lines: Vec<&str> = csv.lines().collect();
        // Header + 11 stat rows
        assert_eq!(lines.len(), 12);
        assert!(lines[0].starts_with(",credit_card_number,first_name"));
        assert!(lines[1].starts_with("count,0,0"));
        assert!(lines[10].starts_with("75%,"));
        assert!(lines[11].starts_with("max,"));
    }
}

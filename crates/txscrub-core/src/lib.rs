//! txscrub Core Library
//!
//! The transaction-export cleaning pipeline:
//! - CSV readers for the raw export and the canonical table
//! - Normalizer/validator (masking, range checks, text canonicalization,
//!   per-card transaction gaps)
//! - Report aggregation (customer, category, weekly, monthly, time series)
//! - Per-column descriptive statistics
//! - CSV writers for every output table
//!
//! The library works entirely over `Read`/`Write` handles and in-memory
//! record vectors; file paths and console output belong to the CLI.

pub mod analyze;
pub mod clean;
pub mod describe;
pub mod error;
pub mod export;
pub mod import;
pub mod models;
pub mod text;

pub use analyze::{
    category_summary, category_timeseries, customer_summary, monthly_patterns, weekly_patterns,
    Reports,
};
pub use clean::{clean_records, UNKNOWN_CITY};
pub use describe::{describe, ColumnSummary, DescribeTable};
pub use error::{Error, Result};
pub use export::{write_clean, write_describe, write_table, TableRow};
pub use import::{read_clean, read_raw};
pub use models::{
    CategorySummaryRow, CategoryTimeseriesRow, CleanRecord, CleanStats, CustomerSummaryRow,
    MonthlyPatternRow, RawRecord, WeeklyPatternRow,
};

//! CLI command tests
//!
//! This module contains all tests for the CLI commands, run against
//! temp-directory fixtures.

use std::fs;
use std::path::Path;

use crate::commands;

const RAW_CSV: &str = "\
,trans_date_trans_time,cc_num,merchant,category,amt,first,last,gender,street,city,state,zip,lat,long,city_pop,job,dob,trans_num,unix_time,merch_lat,merch_long,is_fraud
0,2020-06-21 12:14:25,4111-1111-1111-1111,fraud_Kirlin and Sons,personal_care,2.86,Jeff,Elliott,M,351 Darlene Green,Columbia,SC,29209,33.9659,-80.9355,333497,Mechanical engineer,1968-03-19,aaa111,1371816865,33.986391,-81.200714,0
1,2020-06-21 13:15:26,4111-1111-1111-1111,fraud_Kirlin and Sons,personal_care,7.14,Jeff,Elliott,M,351 Darlene Green,Columbia,SC,29209,33.9659,-80.9355,333497,Mechanical engineer,1968-03-19,bbb222,1371820526,33.986391,-81.200714,0
2,2020-06-22 09:00:00,123,fraud_Nobody,misc_net,10.00,Ann,Short,F,1 Road,Town,TX,75001,32.0,-96.0,5000,Clerk,1980-05-05,ddd444,1371895200,32.1,-96.1,0
";

fn write_raw_fixture(dir: &Path) -> std::path::PathBuf {
    let path = dir.join("raw.csv");
    fs::write(&path, RAW_CSV).unwrap();
    path
}

#[test]
fn test_cmd_clean_writes_canonical_table() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_raw_fixture(dir.path());
    let output = dir.path().join("cleaned.csv");
    let summary = dir.path().join("clean_summary.csv");

    commands::cmd_clean(&input, &output, Some(&summary), false).unwrap();

    let cleaned = fs::read_to_string(&output).unwrap();
    assert!(cleaned.starts_with("credit_card_number,first_name,last_name,gender"));
    assert!(cleaned.contains("************1111"));
    // Short-card row was dropped: header + 2 rows
    assert_eq!(cleaned.lines().count(), 3);

    let summary = fs::read_to_string(&summary).unwrap();
    assert!(summary.contains("count,2,2"));
}

#[test]
fn test_cmd_clean_json_stats() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_raw_fixture(dir.path());
    let output = dir.path().join("cleaned.csv");

    let result = commands::cmd_clean(&input, &output, None, true);
    assert!(result.is_ok());
}

#[test]
fn test_cmd_clean_missing_input_fails() {
    let dir = tempfile::tempdir().unwrap();
    let result = commands::cmd_clean(
        &dir.path().join("nope.csv"),
        &dir.path().join("out.csv"),
        None,
        false,
    );
    assert!(result.is_err());
}

#[test]
fn test_cmd_run_produces_all_outputs() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_raw_fixture(dir.path());
    let out_dir = dir.path().join("outputs");

    commands::cmd_run(&input, &out_dir, false).unwrap();

    for name in [
        commands::CLEANED_TABLE,
        commands::CLEAN_SUMMARY,
        commands::CUSTOMER_REPORT,
        commands::CATEGORY_REPORT,
        commands::WEEKLY_REPORT,
        commands::MONTHLY_REPORT,
        commands::TIMESERIES_REPORT,
    ] {
        let path = out_dir.join(name);
        assert!(path.exists(), "missing output: {}", name);
    }

    let customers = fs::read_to_string(out_dir.join(commands::CUSTOMER_REPORT)).unwrap();
    assert!(customers
        .starts_with("credit_card_number,customer_name,total_spent,transaction_count,average_transaction_amount"));
    assert!(customers.contains("Jeff Elliott"));
}

#[test]
fn test_cmd_analyze_from_cleaned_table() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_raw_fixture(dir.path());
    let cleaned = dir.path().join("cleaned.csv");
    commands::cmd_clean(&input, &cleaned, None, false).unwrap();

    let reports_dir = dir.path().join("reports");
    commands::cmd_analyze(&cleaned, &reports_dir).unwrap();

    let categories = fs::read_to_string(reports_dir.join(commands::CATEGORY_REPORT)).unwrap();
    assert!(categories.contains("Personal Care,10.0,2,5.0"));
}

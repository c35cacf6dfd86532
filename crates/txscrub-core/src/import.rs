//! CSV readers for the raw export and the canonical table
//!
//! Both readers are header-driven: columns are matched by name, extra
//! columns (such as the raw export's unnamed index column) are ignored, and
//! absent columns deserialize as empty. A run-level read failure (unreadable
//! stream, malformed CSV structure) is fatal; field-level mess is the
//! cleaning stage's problem, not the reader's.

use csv::ReaderBuilder;
use std::io::Read;
use tracing::debug;

use crate::error::Result;
use crate::models::{CleanRecord, RawRecord};

/// Read the raw transaction export.
pub fn read_raw<R: Read>(reader: R) -> Result<Vec<RawRecord>> {
    let mut rdr = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(reader);

    let mut records = Vec::new();
    for result in rdr.deserialize() {
        let record: RawRecord = result?;
        records.push(record);
    }

    debug!("Read {} raw records", records.len());
    Ok(records)
}

/// Read a previously written canonical table back in.
///
/// The analyze stage may run as a separate invocation, so the canonical
/// table round-trips through disk between the two stages.
pub fn read_clean<R: Read>(reader: R) -> Result<Vec<CleanRecord>> {
    let mut rdr = ReaderBuilder::new().has_headers(true).from_reader(reader);

    let mut records = Vec::new();
    for result in rdr.deserialize() {
        let record: CleanRecord = result?;
        records.push(record);
    }

    debug!("Read {} canonical records", records.len());
    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_raw_maps_by_header() {
        let csv = "\
,trans_date_trans_time,cc_num,merchant,category,amt,first,last,gender,street,city,state,zip,lat,long,city_pop,job,dob,trans_num,unix_time,merch_lat,merch_long,is_fraud
0,2020-06-21 12:14:25,4111111111111111,fraud_Kirlin and Sons,personal_care,2.86,Jeff,Elliott,M,351 Darlene Green,Columbia,SC,29209,33.9659,-80.9355,333497,Mechanical engineer,1968-03-19,2da90c7d74bd46a0caf3777415b3ebd3,1371816865,33.986391,-81.200714,0";

        let records = read_raw(csv.as_bytes()).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].cc_num, "4111111111111111");
        assert_eq!(records[0].merchant, "fraud_Kirlin and Sons");
        assert_eq!(records[0].amt, "2.86");
        assert_eq!(records[0].is_fraud, "0");
    }

    #[test]
    fn test_read_raw_missing_columns_default_empty() {
        let csv = "cc_num,amt\n4111111111111111,9.99";
        let records = read_raw(csv.as_bytes()).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].amt, "9.99");
        assert_eq!(records[0].merchant, "");
    }
}

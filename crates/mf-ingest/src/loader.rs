//! CSV record loader.
//!
//! # CSV format
//!
//! One row per (origin, destination, month) aggregate.  Column names follow
//! the upstream data exports: `oc` is the country of origin, `ac` the
//! country of asylum (destination).
//!
//! ```csv
//! oc,ac,count,month,year
//! SYR,DEU,10,3,2016
//! SYR,TUR,2250.5,3,2016
//! AFG,SWE,412,11,2015
//! ```
//!
//! Rows with a malformed country code or a month outside 1–12 fail the whole
//! load.  Well-formed codes that are simply missing from the map are *not*
//! rejected here; ingestion skips those with a warning.

use std::io::Read;
use std::path::Path;

use serde::Deserialize;

use mf_core::CountryCode;

use crate::{AggregateRecord, IngestError};

// ── CSV record ────────────────────────────────────────────────────────────────

#[derive(Deserialize)]
struct RecordRow {
    oc:    String,
    ac:    String,
    count: f64,
    month: u32,
    year:  i32,
}

// ── Public API ────────────────────────────────────────────────────────────────

/// Load aggregate records from a CSV file.
pub fn load_records_csv(path: &Path) -> Result<Vec<AggregateRecord>, IngestError> {
    let file = std::fs::File::open(path)?;
    load_records_reader(file)
}

/// Like [`load_records_csv`] but accepts any `Read` source.
///
/// Useful for testing (pass a `std::io::Cursor`) or embedded data.
pub fn load_records_reader<R: Read>(reader: R) -> Result<Vec<AggregateRecord>, IngestError> {
    let mut csv_reader = csv::Reader::from_reader(reader);
    let mut records = Vec::new();

    for (i, result) in csv_reader.deserialize::<RecordRow>().enumerate() {
        // Header is line 1.
        let line = i + 2;
        let row = result.map_err(|e| IngestError::Parse(format!("line {line}: {e}")))?;
        records.push(parse_row(row, line)?);
    }

    Ok(records)
}

// ── Helpers ───────────────────────────────────────────────────────────────────

fn parse_row(row: RecordRow, line: usize) -> Result<AggregateRecord, IngestError> {
    let code = |s: &str| {
        CountryCode::new(s).map_err(|e| IngestError::Parse(format!("line {line}: {e}")))
    };

    if !(1..=12).contains(&row.month) {
        return Err(IngestError::Parse(format!(
            "line {line}: month {} out of range 1–12",
            row.month
        )));
    }

    Ok(AggregateRecord {
        origin:      code(&row.oc)?,
        destination: code(&row.ac)?,
        count:       row.count,
        month:       row.month,
        year:        row.year,
    })
}

//! CSV output backend.
//!
//! Creates two files in the configured output directory:
//! - `lifecycle_events.csv`
//! - `frame_summaries.csv`

use std::fs::File;
use std::path::Path;

use csv::Writer;

use crate::writer::OutputWriter;
use crate::{EventRow, FrameSummaryRow, OutputResult};

pub const EVENTS_FILE: &str = "lifecycle_events.csv";
pub const SUMMARIES_FILE: &str = "frame_summaries.csv";

/// Writes simulation output to two CSV files.
pub struct CsvWriter {
    events:    Writer<File>,
    summaries: Writer<File>,
    finished:  bool,
}

impl CsvWriter {
    /// Create the two CSV files in `dir` (which must exist) and write the
    /// header rows.
    pub fn new(dir: &Path) -> OutputResult<Self> {
        let mut events = Writer::from_path(dir.join(EVENTS_FILE))?;
        events.write_record(["time_ms", "event", "origin", "destination", "lat", "lon"])?;

        let mut summaries = Writer::from_path(dir.join(SUMMARIES_FILE))?;
        summaries.write_record(["time_ms", "started", "updated", "finished", "active"])?;

        Ok(Self {
            events,
            summaries,
            finished: false,
        })
    }
}

impl OutputWriter for CsvWriter {
    fn write_event(&mut self, row: &EventRow) -> OutputResult<()> {
        self.events.write_record(&[
            row.time.as_millis().to_string(),
            row.event.as_str().to_owned(),
            row.origin.as_str().to_owned(),
            row.destination.as_str().to_owned(),
            format!("{:.5}", row.lat),
            format!("{:.5}", row.lon),
        ])?;
        Ok(())
    }

    fn write_frame_summary(&mut self, row: &FrameSummaryRow) -> OutputResult<()> {
        self.summaries.write_record(&[
            row.time.as_millis().to_string(),
            row.started.to_string(),
            row.updated.to_string(),
            row.finished.to_string(),
            row.active.to_string(),
        ])?;
        Ok(())
    }

    fn finish(&mut self) -> OutputResult<()> {
        if self.finished {
            return Ok(());
        }
        self.finished = true;
        self.events.flush()?;
        self.summaries.flush()?;
        Ok(())
    }
}

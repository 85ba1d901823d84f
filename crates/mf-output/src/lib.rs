//! `mf-output` — writes simulation events to disk.
//!
//! | Backend | Files created                                   |
//! |---------|-------------------------------------------------|
//! | CSV     | `lifecycle_events.csv`, `frame_summaries.csv`   |
//!
//! Backends implement [`OutputWriter`] and are driven by [`EventRecorder`],
//! which implements `mf_sim::LifecycleObserver`.
//!
//! # Usage
//!
//! ```rust,ignore
//! use mf_output::{CsvWriter, EventRecorder};
//!
//! let writer = CsvWriter::new(Path::new("./output"))?;
//! let mut recorder = EventRecorder::new(writer);
//! engine.run(&mut clock, &mut recorder)?;
//! recorder.finish()?;
//! ```

pub mod csv;
pub mod error;
pub mod observer;
pub mod row;
pub mod writer;

#[cfg(test)]
mod tests;

pub use csv::CsvWriter;
pub use error::{OutputError, OutputResult};
pub use observer::EventRecorder;
pub use row::{EventKind, EventRow, FrameSummaryRow};
pub use writer::OutputWriter;

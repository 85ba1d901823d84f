//! The `OutputWriter` trait implemented by backend writers.

use crate::{EventRow, FrameSummaryRow, OutputResult};

/// Sink for recorded events and frame summaries.
///
/// Errors surface through [`EventRecorder::take_error`][crate::EventRecorder::take_error]
/// because observer hooks cannot return them.
pub trait OutputWriter {
    fn write_event(&mut self, row: &EventRow) -> OutputResult<()>;

    fn write_frame_summary(&mut self, row: &FrameSummaryRow) -> OutputResult<()>;

    /// Flush all underlying handles.  Safe to call more than once.
    fn finish(&mut self) -> OutputResult<()>;
}

//! `EventRecorder<W>` — bridges `LifecycleObserver` to an `OutputWriter`.

use mf_core::SimTime;
use mf_motion::Traveller;
use mf_sim::{LifecycleObserver, StepReport};

use crate::row::{EventKind, EventRow, FrameSummaryRow};
use crate::writer::OutputWriter;
use crate::{OutputError, OutputResult};

/// A [`LifecycleObserver`] that writes one row per lifecycle event and one
/// summary per frame to any [`OutputWriter`].
///
/// Errors from the writer are stored internally because observer hooks have
/// no return value.  Only the first error is kept.  After the run, call
/// [`finish`][Self::finish] or check [`take_error`][Self::take_error].
pub struct EventRecorder<W: OutputWriter> {
    writer:         W,
    now:            SimTime,
    record_updates: bool,
    last_error:     Option<OutputError>,
}

impl<W: OutputWriter> EventRecorder<W> {
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            now:            SimTime::EPOCH,
            record_updates: true,
            last_error:     None,
        }
    }

    /// Skip `updated` rows; starts, arrivals and frame summaries are still
    /// written.
    pub fn without_updates(mut self) -> Self {
        self.record_updates = false;
        self
    }

    /// Take the stored write error, if any.
    pub fn take_error(&mut self) -> Option<OutputError> {
        self.last_error.take()
    }

    /// Flush the writer, reporting the first stored error before any flush
    /// error.
    pub fn finish(&mut self) -> OutputResult<()> {
        if let Some(e) = self.last_error.take() {
            return Err(e);
        }
        self.writer.finish()
    }

    pub fn writer(&self) -> &W {
        &self.writer
    }

    pub fn into_writer(self) -> W {
        self.writer
    }

    fn record<E: Traveller>(&mut self, kind: EventKind, entity: &E) {
        let route = entity.route();
        let pos = entity.position();
        let row = EventRow {
            time:        self.now,
            event:       kind,
            origin:      route.origin,
            destination: route.destination,
            lat:         pos.lat,
            lon:         pos.lon,
        };
        let result = self.writer.write_event(&row);
        self.store_err(result);
    }

    fn store_err(&mut self, result: OutputResult<()>) {
        if let Err(e) = result {
            if self.last_error.is_none() {
                self.last_error = Some(e);
            }
        }
    }
}

impl<W: OutputWriter, E: Traveller> LifecycleObserver<E> for EventRecorder<W> {
    fn on_frame_start(&mut self, now: SimTime) {
        self.now = now;
    }

    fn on_started(&mut self, entity: &E) {
        self.record(EventKind::Started, entity);
    }

    fn on_updated(&mut self, entity: &E) {
        if self.record_updates {
            self.record(EventKind::Updated, entity);
        }
    }

    fn on_finished(&mut self, entity: &E) {
        self.record(EventKind::Finished, entity);
    }

    fn on_frame_end(&mut self, now: SimTime, report: &StepReport) {
        let row = FrameSummaryRow {
            time:     now,
            started:  report.started,
            updated:  report.updated,
            finished: report.finished,
            active:   report.updated,
        };
        let result = self.writer.write_frame_summary(&row);
        self.store_err(result);
    }
}

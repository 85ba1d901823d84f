//! Tests for mf-output.

#[cfg(test)]
mod csv_tests {
    use tempfile::TempDir;

    use mf_core::{CountryCode, SimTime};

    use crate::csv::{CsvWriter, EVENTS_FILE, SUMMARIES_FILE};
    use crate::row::{EventKind, EventRow, FrameSummaryRow};
    use crate::writer::OutputWriter;

    fn tmp() -> TempDir {
        tempfile::tempdir().expect("create temp dir")
    }

    fn event(kind: EventKind, t: i64) -> EventRow {
        EventRow {
            time:        SimTime(t),
            event:       kind,
            origin:      CountryCode::new("SYR").unwrap(),
            destination: CountryCode::new("DEU").unwrap(),
            lat:         51.1657,
            lon:         10.45153,
        }
    }

    fn read_all(path: std::path::PathBuf) -> (Vec<String>, Vec<csv::StringRecord>) {
        let mut rdr = csv::Reader::from_path(path).unwrap();
        let headers = rdr.headers().unwrap().iter().map(str::to_owned).collect();
        let rows = rdr.records().map(|r| r.unwrap()).collect();
        (headers, rows)
    }

    #[test]
    fn csv_files_created_with_headers() {
        let dir = tmp();
        let mut w = CsvWriter::new(dir.path()).unwrap();
        w.finish().unwrap();

        let (headers, rows) = read_all(dir.path().join(EVENTS_FILE));
        assert_eq!(headers, ["time_ms", "event", "origin", "destination", "lat", "lon"]);
        assert!(rows.is_empty());

        let (headers, _) = read_all(dir.path().join(SUMMARIES_FILE));
        assert_eq!(headers, ["time_ms", "started", "updated", "finished", "active"]);
    }

    #[test]
    fn csv_event_rows() {
        let dir = tmp();
        let mut w = CsvWriter::new(dir.path()).unwrap();
        w.write_event(&event(EventKind::Started, 1_000)).unwrap();
        w.write_event(&event(EventKind::Finished, 2_000)).unwrap();
        w.finish().unwrap();

        let (_, rows) = read_all(dir.path().join(EVENTS_FILE));
        assert_eq!(rows.len(), 2);
        assert_eq!(&rows[0][0], "1000");
        assert_eq!(&rows[0][1], "started");
        assert_eq!(&rows[0][2], "SYR");
        assert_eq!(&rows[0][3], "DEU");
        assert_eq!(&rows[0][4], "51.16570");
        assert_eq!(&rows[1][1], "finished");
    }

    #[test]
    fn csv_frame_summary_rows() {
        let dir = tmp();
        let mut w = CsvWriter::new(dir.path()).unwrap();
        w.write_frame_summary(&FrameSummaryRow {
            time:     SimTime(3_600_000),
            started:  4,
            updated:  3,
            finished: 1,
            active:   3,
        })
        .unwrap();
        w.finish().unwrap();

        let (_, rows) = read_all(dir.path().join(SUMMARIES_FILE));
        assert_eq!(rows.len(), 1);
        let fields: Vec<&str> = rows[0].iter().collect();
        assert_eq!(fields, ["3600000", "4", "3", "1", "3"]);
    }

    #[test]
    fn csv_finish_idempotent() {
        let dir = tmp();
        let mut w = CsvWriter::new(dir.path()).unwrap();
        w.finish().unwrap();
        w.finish().unwrap();
    }

    #[test]
    fn csv_missing_dir_is_error() {
        let dir = tmp();
        assert!(CsvWriter::new(&dir.path().join("nope")).is_err());
    }
}

#[cfg(test)]
mod recorder_tests {
    use tempfile::TempDir;

    use mf_core::{CountryCode, GeoPoint, RouteKey, SimTime};
    use mf_motion::{Population, Refugee};
    use mf_sim::{LifecycleObserver, SimEngineBuilder, StepReport};

    use crate::csv::{CsvWriter, EVENTS_FILE, SUMMARIES_FILE};
    use crate::row::{EventRow, FrameSummaryRow};
    use crate::writer::OutputWriter;
    use crate::{EventRecorder, OutputError, OutputResult};

    const HOUR: i64 = 3_600_000;

    fn refugee(arrival_hours: i64) -> Refugee {
        let route = RouteKey::new(CountryCode::new("SYR").unwrap(), CountryCode::new("DEU").unwrap());
        Refugee::new(
            route,
            GeoPoint::new(0.0, 0.0),
            GeoPoint::new(0.0, 1.0),
            5.0,
            SimTime(arrival_hours * HOUR),
        )
    }

    /// Fails every event write; counts calls.
    #[derive(Default)]
    struct FailingWriter {
        event_calls:   usize,
        summary_calls: usize,
    }

    impl OutputWriter for FailingWriter {
        fn write_event(&mut self, _row: &EventRow) -> OutputResult<()> {
            self.event_calls += 1;
            Err(OutputError::Io(std::io::Error::other(format!("disk full #{}", self.event_calls))))
        }

        fn write_frame_summary(&mut self, _row: &FrameSummaryRow) -> OutputResult<()> {
            self.summary_calls += 1;
            Ok(())
        }

        fn finish(&mut self) -> OutputResult<()> {
            Ok(())
        }
    }

    #[test]
    fn first_write_error_is_kept() {
        let mut rec = EventRecorder::new(FailingWriter::default());
        let r = refugee(10);
        LifecycleObserver::<Refugee>::on_frame_start(&mut rec, SimTime(0));
        rec.on_started(&r);
        rec.on_updated(&r);
        LifecycleObserver::<Refugee>::on_frame_end(&mut rec, SimTime(0), &StepReport::default());

        let err = rec.take_error().expect("stored error");
        assert!(err.to_string().contains("#1"));
        assert!(rec.take_error().is_none());
        assert_eq!(rec.writer().event_calls, 2);
        assert_eq!(rec.writer().summary_calls, 1);
    }

    #[test]
    fn finish_reports_stored_error() {
        let mut rec = EventRecorder::new(FailingWriter::default());
        rec.on_finished(&refugee(10));
        assert!(rec.finish().is_err());
        assert!(rec.finish().is_ok());
    }

    #[test]
    fn without_updates_skips_updated_rows() {
        let mut rec = EventRecorder::new(FailingWriter::default()).without_updates();
        let r = refugee(10);
        rec.on_updated(&r);
        rec.on_updated(&r);
        assert_eq!(rec.writer().event_calls, 0);
        rec.on_started(&r);
        assert_eq!(rec.writer().event_calls, 1);
    }

    #[test]
    fn integration_csv() {
        let dir: TempDir = tempfile::tempdir().unwrap();
        let population = Population::from_unsorted(vec![refugee(48), refugee(50)]);
        let mut engine = SimEngineBuilder::new(population).build().unwrap();
        let mut clock = engine.make_clock();

        let mut rec = EventRecorder::new(CsvWriter::new(dir.path()).unwrap());
        let total = engine.run(&mut clock, &mut rec).unwrap();
        rec.finish().unwrap();

        let mut rdr = csv::Reader::from_path(dir.path().join(EVENTS_FILE)).unwrap();
        let events: Vec<_> = rdr.records().map(|r| r.unwrap()).collect();
        let count = |kind: &str| events.iter().filter(|r| &r[1] == kind).count();
        assert_eq!(count("started"), 2);
        assert_eq!(count("finished"), 2);
        assert_eq!(count("updated"), total.updated);
        assert_eq!(&events[0][1], "started");
        assert_eq!(&events[events.len() - 1][1], "finished");
        // Arrivals are written at the destination.
        assert_eq!(&events[events.len() - 1][5], "1.00000");

        let mut rdr = csv::Reader::from_path(dir.path().join(SUMMARIES_FILE)).unwrap();
        let summaries: Vec<_> = rdr.records().map(|r| r.unwrap()).collect();
        assert_eq!(summaries.len() as u64, clock.frame);
        assert_eq!(&summaries[summaries.len() - 1][4], "0");
    }
}

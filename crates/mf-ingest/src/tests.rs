//! Unit tests for mf-ingest.

use std::io::Cursor;

use mf_core::{CountryCode, GeoPoint, SimRng, SimTime, month_start};
use mf_geo::{CountryAtlas, CountryFeature, GeoLookup, Polygon};
use mf_motion::Traveller;

use crate::{AggregateRecord, EntityFactory, FactoryConfig};

// ── Helpers ───────────────────────────────────────────────────────────────────

fn code(s: &str) -> CountryCode {
    CountryCode::new(s).unwrap()
}

fn square(c: &str, lon0: f64, lat0: f64, side: f64) -> CountryFeature {
    CountryFeature::new(
        code(c),
        vec![Polygon::new(vec![
            GeoPoint::from_lon_lat(lon0, lat0),
            GeoPoint::from_lon_lat(lon0 + side, lat0),
            GeoPoint::from_lon_lat(lon0 + side, lat0 + side),
            GeoPoint::from_lon_lat(lon0, lat0 + side),
        ])],
    )
    .unwrap()
}

/// Rough boxes around Syria, Germany, and Turkey.
fn atlas() -> CountryAtlas {
    CountryAtlas::from_features([
        square("SYR", 36.0, 32.0, 5.0),
        square("DEU", 6.0, 47.0, 8.0),
        square("TUR", 27.0, 37.0, 6.0),
    ])
}

fn record(o: &str, d: &str, count: f64, month: u32, year: i32) -> AggregateRecord {
    AggregateRecord { origin: code(o), destination: code(d), count, month, year }
}

fn deu_centroid(atlas: &CountryAtlas) -> GeoPoint {
    atlas.centroid_of(atlas.resolve(code("DEU")).unwrap())
}

// ── Loader ────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod loader {
    use super::*;
    use crate::{IngestError, load_records_csv, load_records_reader};

    #[test]
    fn parses_rows() {
        let csv = "oc,ac,count,month,year\nSYR,DEU,10,3,2016\nafg,swe,2.5,11,2015\n";
        let records = load_records_reader(Cursor::new(csv)).unwrap();
        assert_eq!(records, vec![
            record("SYR", "DEU", 10.0, 3, 2016),
            record("AFG", "SWE", 2.5, 11, 2015),
        ]);
    }

    #[test]
    fn rejects_bad_month() {
        let csv = "oc,ac,count,month,year\nSYR,DEU,10,13,2016\n";
        let err = load_records_reader(Cursor::new(csv)).unwrap_err();
        assert!(matches!(err, IngestError::Parse(ref m) if m.contains("line 2")), "{err}");
    }

    #[test]
    fn rejects_malformed_code() {
        let csv = "oc,ac,count,month,year\nSYR,DEU,1,1,2016\nSYRIA,DEU,1,1,2016\n";
        let err = load_records_reader(Cursor::new(csv)).unwrap_err();
        assert!(matches!(err, IngestError::Parse(ref m) if m.contains("line 3")), "{err}");
    }

    #[test]
    fn rejects_non_numeric_count() {
        let csv = "oc,ac,count,month,year\nSYR,DEU,many,1,2016\n";
        assert!(matches!(load_records_reader(Cursor::new(csv)), Err(IngestError::Parse(_))));
    }

    #[test]
    fn loads_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("asylum.csv");
        std::fs::write(&path, "oc,ac,count,month,year\nSYR,TUR,4,1,2016\n").unwrap();
        let records = load_records_csv(&path).unwrap();
        assert_eq!(records.len(), 1);
    }

    #[test]
    fn missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_records_csv(&dir.path().join("nope.csv")).unwrap_err();
        assert!(matches!(err, IngestError::Io(_)));
    }
}

// ── EntityFactory ─────────────────────────────────────────────────────────────

#[cfg(test)]
mod factory {
    use mf_geo::GeoError;

    use super::*;
    use crate::FactoryError;

    #[test]
    fn centroid_to_centroid_by_default() {
        let atlas = atlas();
        let factory = EntityFactory::new(&atlas, FactoryConfig::default());
        let mut rng = SimRng::new(1);
        let r = factory.create(code("SYR"), code("DEU"), 3, 2016, &mut rng).unwrap();

        assert_eq!(r.origin(), atlas.centroid_of(atlas.resolve(code("SYR")).unwrap()));
        assert_eq!(r.destination(), deu_centroid(&atlas));
        assert_eq!(r.route().destination, code("DEU"));
        assert!((4.0..6.0).contains(&r.speed_kmh()));
    }

    #[test]
    fn arrival_within_month() {
        let atlas = atlas();
        let factory = EntityFactory::new(&atlas, FactoryConfig::default());
        let mut rng = SimRng::new(2);
        let lo = month_start(2, 2016).unwrap();
        let hi = month_start(3, 2016).unwrap();
        for _ in 0..500 {
            let t = factory.arrival_time(2, 2016, &mut rng).unwrap();
            assert!(t >= lo && t < hi, "{t}");
        }
    }

    #[test]
    fn start_precedes_arrival_by_travel_time() {
        let atlas = atlas();
        let factory = EntityFactory::new(&atlas, FactoryConfig::default());
        let r = factory.create(code("SYR"), code("DEU"), 3, 2016, &mut SimRng::new(3)).unwrap();
        let hours = (r.arrival_time() - r.start_time()) as f64 / 3_600_000.0;
        let expected = r.distance_km() / r.speed_kmh();
        assert!((hours - expected).abs() < 1e-3, "{hours} vs {expected}");
    }

    #[test]
    fn random_start_point_inside_origin() {
        let atlas = atlas();
        let config = FactoryConfig { random_start_point: true, ..FactoryConfig::default() };
        let factory = EntityFactory::new(&atlas, config);
        let syr = atlas.resolve(code("SYR")).unwrap();
        let mut rng = SimRng::new(4);
        for _ in 0..50 {
            let r = factory.create(code("SYR"), code("TUR"), 1, 2016, &mut rng).unwrap();
            assert!(syr.contains(r.origin()));
            assert_eq!(r.destination(), atlas.centroid_of(atlas.resolve(code("TUR")).unwrap()));
        }
    }

    /// Atlas whose interior sampling never succeeds.
    struct NoInterior(CountryAtlas);

    impl GeoLookup for NoInterior {
        type Feature = CountryFeature;

        fn resolve(&self, code: CountryCode) -> Option<&CountryFeature> {
            self.0.resolve(code)
        }

        fn centroid_of(&self, feature: &CountryFeature) -> GeoPoint {
            self.0.centroid_of(feature)
        }

        fn random_point_within(&self, feature: &CountryFeature, _rng: &mut SimRng) -> mf_geo::GeoResult<GeoPoint> {
            Err(GeoError::NoInteriorPoint(feature.code, 1_000))
        }
    }

    #[test]
    fn random_start_point_falls_back_to_centroid() {
        let lookup = NoInterior(atlas());
        let config = FactoryConfig { random_start_point: true, ..FactoryConfig::default() };
        let factory = EntityFactory::new(&lookup, config);
        let r = factory.create(code("SYR"), code("DEU"), 3, 2016, &mut SimRng::new(4)).unwrap();
        let syr = lookup.resolve(code("SYR")).unwrap();
        assert_eq!(r.origin(), lookup.centroid_of(syr));
    }

    #[test]
    fn unknown_country_fails() {
        let atlas = atlas();
        let factory = EntityFactory::new(&atlas, FactoryConfig::default());
        let err = factory.create(code("XXX"), code("DEU"), 1, 2016, &mut SimRng::new(5)).unwrap_err();
        assert!(matches!(err, FactoryError::Geo(GeoError::UnknownCountry(c)) if c == code("XXX")));
    }

    #[test]
    fn invalid_month_fails() {
        let atlas = atlas();
        let factory = EntityFactory::new(&atlas, FactoryConfig::default());
        let err = factory.create(code("SYR"), code("DEU"), 0, 2016, &mut SimRng::new(6)).unwrap_err();
        assert!(matches!(err, FactoryError::Calendar(_)));
    }

    #[test]
    fn empty_speed_range_uses_start() {
        let atlas = atlas();
        let config = FactoryConfig { speed_kmh: 5.0..5.0, ..FactoryConfig::default() };
        let factory = EntityFactory::new(&atlas, config);
        assert_eq!(factory.speed(&mut SimRng::new(7)), 5.0);
    }

    #[test]
    fn same_seed_same_entity() {
        let atlas = atlas();
        let factory = EntityFactory::new(&atlas, FactoryConfig::default());
        let a = factory.create(code("SYR"), code("DEU"), 3, 2016, &mut SimRng::new(8)).unwrap();
        let b = factory.create(code("SYR"), code("DEU"), 3, 2016, &mut SimRng::new(8)).unwrap();
        assert_eq!(a, b);
    }
}

// ── AggregateIngestor ─────────────────────────────────────────────────────────

#[cfg(test)]
mod ingestor {
    use super::*;
    use crate::{
        AggregateIngestor, IngestError, IngestStats, MAX_ENTITIES_PER_RECORD, RecordSource, ingest, scaled_count,
    };

    fn ingestor(atlas: &CountryAtlas) -> AggregateIngestor<'_, CountryAtlas> {
        let factory = EntityFactory::new(atlas, FactoryConfig::default());
        AggregateIngestor::new(factory, 1.0, SimRng::new(42)).unwrap()
    }

    #[test]
    fn scaled_count_rounds() {
        assert_eq!(scaled_count(10.0, 2.0), 5);
        assert_eq!(scaled_count(5.0, 2.0), 3); // 2.5 rounds up
        assert_eq!(scaled_count(4.9, 2.0), 2);
        assert_eq!(scaled_count(0.4, 1.0), 0);
        assert_eq!(scaled_count(-3.0, 1.0), 0);
    }

    #[test]
    fn syria_germany_march_2016_scenario() {
        let atlas = atlas();
        let factory = EntityFactory::new(&atlas, FactoryConfig::default());
        let pop = ingest(&[record("SYR", "DEU", 10.0, 3, 2016)], 2.0, factory, SimRng::new(9)).unwrap();

        assert_eq!(pop.len(), 5);
        let lo: SimTime = month_start(3, 2016).unwrap();
        let hi: SimTime = month_start(4, 2016).unwrap();
        let deu = deu_centroid(&atlas);
        for r in &pop {
            assert!(r.arrival_time() >= lo && r.arrival_time() < hi);
            assert_eq!(r.destination(), deu);
        }
    }

    #[test]
    fn unresolvable_records_are_skipped() {
        let atlas = atlas();
        let mut ing = ingestor(&atlas);
        let created = ing
            .add_records(RecordSource::Asylum, &[
                record("XXX", "DEU", 7.0, 1, 2016),
                record("SYR", "TUR", 3.0, 1, 2016),
                record("SYR", "YYY", 9.0, 1, 2016),
            ])
            .unwrap();
        assert_eq!(created, 3);
        assert_eq!(ing.stats(), IngestStats { records: 3, unresolved: 2, empty: 0, entities: 3 });

        let pop = ing.finish();
        assert!(pop.iter().all(|r| r.route().origin == code("SYR") && r.route().destination == code("TUR")));
    }

    #[test]
    fn zero_and_negative_counts_create_nothing() {
        let atlas = atlas();
        let mut ing = ingestor(&atlas);
        let created = ing
            .add_records(RecordSource::Regional, &[
                record("SYR", "TUR", 0.0, 1, 2016),
                record("SYR", "TUR", -4.0, 1, 2016),
                record("SYR", "TUR", 0.3, 1, 2016),
            ])
            .unwrap();
        assert_eq!(created, 0);
        assert_eq!(ing.stats().empty, 3);
    }

    #[test]
    fn sources_merge_and_sort() {
        let atlas = atlas();
        let mut ing = ingestor(&atlas);
        ing.add_records(RecordSource::Asylum, &[
            record("SYR", "DEU", 20.0, 6, 2016),
            record("SYR", "DEU", 20.0, 1, 2016),
        ])
        .unwrap();
        ing.add_records(RecordSource::Regional, &[record("SYR", "TUR", 30.0, 3, 2016)])
            .unwrap();

        let pop = ing.finish();
        assert_eq!(pop.len(), 70);
        assert!(pop.is_sorted());
        let starts: Vec<SimTime> = pop.iter().map(|r| r.start_time()).collect();
        assert!(starts.windows(2).all(|w| w[0] <= w[1]));
    }

    #[test]
    fn invalid_divisor_rejected() {
        let atlas = atlas();
        for bad in [0.0, -1.0, f64::NAN, f64::INFINITY] {
            let factory = EntityFactory::new(&atlas, FactoryConfig::default());
            let result = AggregateIngestor::new(factory, bad, SimRng::new(0));
            assert!(matches!(result, Err(IngestError::InvalidDivisor(_))));
        }
    }

    #[test]
    fn invalid_month_aborts_ingestion() {
        let atlas = atlas();
        let mut ing = ingestor(&atlas);
        let err = ing
            .add_records(RecordSource::Asylum, &[record("SYR", "DEU", 1.0, 14, 2016)])
            .unwrap_err();
        assert!(matches!(err, IngestError::InvalidMonth { month: 14, .. }));
        assert!(err.to_string().contains("SYR→DEU"));
        assert_eq!(ing.stats().entities, 0);
    }

    #[test]
    fn huge_count_is_rejected_not_allocated() {
        let atlas = atlas();
        for huge in [1e30, f64::INFINITY, (MAX_ENTITIES_PER_RECORD as f64) * 2.0] {
            let mut ing = ingestor(&atlas);
            let err = ing
                .add_records(RecordSource::Asylum, &[record("SYR", "DEU", huge, 3, 2016)])
                .unwrap_err();
            assert!(
                matches!(err, IngestError::CountTooLarge { origin, count, .. } if origin == code("SYR") && count == huge),
                "{err}"
            );
            assert_eq!(ing.stats().entities, 0);
        }
    }

    #[test]
    fn huge_count_is_fine_once_scaled_down() {
        let atlas = atlas();
        let factory = EntityFactory::new(&atlas, FactoryConfig::default());
        let mut ing = AggregateIngestor::new(factory, 1e9, SimRng::new(1)).unwrap();
        let n = ing
            .add_records(RecordSource::Asylum, &[record("SYR", "DEU", 3e9, 3, 2016)])
            .unwrap();
        assert_eq!(n, 3);
    }

    #[test]
    fn deterministic_for_seed() {
        let atlas = atlas();
        let records = [record("SYR", "DEU", 12.0, 3, 2016), record("SYR", "TUR", 5.0, 4, 2016)];
        let run = || {
            let factory = EntityFactory::new(&atlas, FactoryConfig::default());
            ingest(&records, 1.0, factory, SimRng::new(77)).unwrap().into_vec()
        };
        assert_eq!(run(), run());
    }
}

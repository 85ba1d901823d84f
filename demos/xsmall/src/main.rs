//! xsmall — smallest example for the migration-flow simulator.
//!
//! Five box-shaped countries, two record sources (asylum applications and
//! regional registrations) for early 2016, scaled down by 10.  Every
//! lifecycle event is written to `output/xsmall/`.
//!
//! Set `RUST_LOG=debug` to see ingestion and frame-loop logging.

use std::io::Cursor;
use std::path::Path;
use std::time::Instant;

use anyhow::Result;
use tracing::info;
use tracing_subscriber::EnvFilter;

use mf_core::{SimConfig, SimRng, SimTime};
use mf_geo::{CountryAtlas, DEFAULT_KEY_PROPERTY};
use mf_ingest::{AggregateIngestor, EntityFactory, FactoryConfig, RecordSource, load_records_reader};
use mf_motion::Refugee;
use mf_output::{CsvWriter, EventRecorder, OutputWriter};
use mf_sim::{LifecycleObserver, SimEngineBuilder, StepReport};

// ── Embedded inputs ───────────────────────────────────────────────────────────

const CONFIG_JSON: &str = r#"{
    "seed": 2016,
    "scale_divisor": 10.0,
    "random_start_point": true,
    "frame_duration_ms": 21600000
}"#;

// Boxes, not borders.  TUR is keyed by feature id to exercise the fallback.
const WORLD_GEOJSON: &str = r#"{
  "type": "FeatureCollection",
  "features": [
    { "type": "Feature", "properties": { "ADM0_A3": "SYR" },
      "geometry": { "type": "Polygon", "coordinates":
        [[[36.0, 32.5], [42.0, 32.5], [42.0, 37.0], [36.0, 37.0], [36.0, 32.5]]] } },
    { "type": "Feature", "id": "TUR", "properties": {},
      "geometry": { "type": "Polygon", "coordinates":
        [[[26.0, 37.2], [44.0, 37.2], [44.0, 42.0], [26.0, 42.0], [26.0, 37.2]]] } },
    { "type": "Feature", "properties": { "ADM0_A3": "DEU" },
      "geometry": { "type": "Polygon", "coordinates":
        [[[6.0, 47.5], [15.0, 47.5], [15.0, 55.0], [6.0, 55.0], [6.0, 47.5]]] } },
    { "type": "Feature", "properties": { "ADM0_A3": "AUT" },
      "geometry": { "type": "Polygon", "coordinates":
        [[[9.5, 46.4], [17.0, 46.4], [17.0, 47.4], [9.5, 47.4], [9.5, 46.4]]] } },
    { "type": "Feature", "properties": { "ADM0_A3": "SWE" },
      "geometry": { "type": "MultiPolygon", "coordinates": [
        [[[11.0, 55.3], [24.0, 55.3], [24.0, 69.0], [11.0, 69.0], [11.0, 55.3]]],
        [[[25.0, 57.0], [26.0, 57.0], [26.0, 58.0], [25.0, 58.0], [25.0, 57.0]]]
      ] } }
  ]
}"#;

// AFG is not in the atlas and is skipped.
const ASYLUM_CSV: &str = "\
oc,ac,count,month,year\n\
SYR,DEU,420,1,2016\n\
SYR,DEU,380,2,2016\n\
SYR,SWE,150,1,2016\n\
SYR,AUT,90,2,2016\n\
AFG,DEU,200,1,2016\n\
";

// The second row rounds to zero entities.
const REGIONAL_CSV: &str = "\
oc,ac,count,month,year\n\
SYR,TUR,600,1,2016\n\
SYR,TUR,0.4,2,2016\n\
";

const OUTPUT_DIR: &str = "output/xsmall";

// ── Observer wrapper to count rows ───────────────────────────────────────────

struct CountingObserver<W: OutputWriter> {
    inner:           EventRecorder<W>,
    started:         usize,
    finished:        usize,
    frames:          usize,
    peak_route_load: u32,
    first_start:     Option<SimTime>,
    last_arrival:    Option<SimTime>,
    now:             SimTime,
}

impl<W: OutputWriter> CountingObserver<W> {
    fn new(inner: EventRecorder<W>) -> Self {
        Self {
            inner,
            started:         0,
            finished:        0,
            frames:          0,
            peak_route_load: 0,
            first_start:     None,
            last_arrival:    None,
            now:             SimTime::EPOCH,
        }
    }
}

impl<W: OutputWriter> LifecycleObserver<Refugee> for CountingObserver<W> {
    fn on_frame_start(&mut self, now: SimTime) {
        self.now = now;
        LifecycleObserver::<Refugee>::on_frame_start(&mut self.inner, now);
    }

    fn on_started(&mut self, r: &Refugee) {
        self.started += 1;
        self.peak_route_load = self.peak_route_load.max(r.route_count());
        self.first_start.get_or_insert(self.now);
        self.inner.on_started(r);
    }

    fn on_updated(&mut self, r: &Refugee) {
        self.inner.on_updated(r);
    }

    fn on_finished(&mut self, r: &Refugee) {
        self.finished += 1;
        self.last_arrival = Some(self.now);
        self.inner.on_finished(r);
    }

    fn on_frame_end(&mut self, now: SimTime, report: &StepReport) {
        self.frames += 1;
        LifecycleObserver::<Refugee>::on_frame_end(&mut self.inner, now, report);
    }
}

// ── main ──────────────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    println!("=== xsmall — migration-flow simulator ===");

    // 1. Config.
    let config: SimConfig = serde_json::from_str(CONFIG_JSON)?;
    config.validate()?;
    println!(
        "Seed: {}  |  Scale: 1/{}  |  Frame: {} h  |  Smart spread: {}",
        config.seed,
        config.scale_divisor,
        config.frame_duration_ms / 3_600_000,
        config.smart_spread,
    );

    // 2. Country geometry.
    let atlas = CountryAtlas::from_geojson_str(WORLD_GEOJSON, DEFAULT_KEY_PROPERTY)?;
    let mut codes: Vec<_> = atlas.codes().map(|c| c.to_string()).collect();
    codes.sort();
    println!("Atlas: {} countries ({})", atlas.len(), codes.join(", "));

    // 3. Records.
    let asylum = load_records_reader(Cursor::new(ASYLUM_CSV))?;
    let regional = load_records_reader(Cursor::new(REGIONAL_CSV))?;
    println!("Records: {} asylum, {} regional", asylum.len(), regional.len());

    // 4. Ingest.
    let factory = EntityFactory::new(&atlas, FactoryConfig::from(&config));
    let mut ingestor = AggregateIngestor::new(factory, config.scale_divisor, SimRng::new(config.seed))?;
    ingestor.add_records(RecordSource::Asylum, &asylum)?;
    ingestor.add_records(RecordSource::Regional, &regional)?;
    let stats = ingestor.stats();
    println!(
        "Ingested: {} entities ({} records skipped, {} rounded to zero)",
        stats.entities, stats.unresolved, stats.empty
    );
    let population = ingestor.finish();
    info!(entities = population.len(), first_start = ?population.first_start(), "population ready");

    // 5. Engine.
    let mut engine = SimEngineBuilder::new(population).sim_config(&config).build()?;
    let mut clock = engine.make_clock();
    println!("Start: {}", engine.start_time());
    println!();

    // 6. Output.
    std::fs::create_dir_all(OUTPUT_DIR)?;
    let writer = CsvWriter::new(Path::new(OUTPUT_DIR))?;
    let mut obs = CountingObserver::new(EventRecorder::new(writer));

    // 7. Run.
    let t0 = Instant::now();
    let total = engine.run(&mut clock, &mut obs)?;
    let elapsed = t0.elapsed();
    obs.inner.finish()?;
    info!(dir = OUTPUT_DIR, frames = obs.frames, "output written");

    // 8. Summary.
    println!("Simulation complete in {:.3} s ({} frames)", elapsed.as_secs_f64(), obs.frames);
    println!("  started          : {}", obs.started);
    println!("  finished         : {}", obs.finished);
    println!("  updates          : {}", total.updated);
    println!("  peak route load  : {}", obs.peak_route_load);
    println!("  congestion defects: {}", engine.defects());
    if let (Some(first), Some(last)) = (obs.first_start, obs.last_arrival) {
        println!("  first departure  : {first}");
        println!("  last arrival     : {last}");
    }
    println!();

    // 9. Final congestion table; every route should be back at zero.
    let mut routes: Vec<_> = engine.congestion().iter().collect();
    routes.sort_by_key(|(route, _)| route.to_string());
    println!("{:<12} {:<6}", "Route", "Count");
    println!("{}", "-".repeat(18));
    for (route, count) in routes {
        println!("{:<12} {:<6}", route.to_string(), count);
    }

    Ok(())
}

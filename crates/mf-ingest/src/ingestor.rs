//! `AggregateIngestor` — turns aggregate records into a sorted population.

use tracing::{debug, warn};

use mf_core::SimRng;
use mf_geo::GeoLookup;
use mf_motion::{Population, Refugee};

use crate::{AggregateRecord, EntityFactory, IngestError, IngestResult, RecordSource};

/// Counters accumulated across every `add_records` call.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct IngestStats {
    /// Records examined.
    pub records:    usize,
    /// Records skipped because a country was not in the map.
    pub unresolved: usize,
    /// Records with a non-positive count, or one that scaled to zero.
    pub empty:      usize,
    /// Entities created.
    pub entities:   usize,
}

/// Most entities a single record may expand to.
pub const MAX_ENTITIES_PER_RECORD: usize = 10_000_000;

/// Entity count for one record: `round(count / divisor)`.
///
/// Rounds half away from zero.
#[inline]
pub fn scaled_count(count: f64, divisor: f64) -> usize {
    let scaled = (count / divisor).round();
    if scaled.is_finite() && scaled > 0.0 { scaled as usize } else { 0 }
}

/// Incremental ingestion over one or more record sources.
///
/// Entities accumulate in insertion order; [`finish`][Self::finish] sorts
/// them once into a [`Population`].
pub struct AggregateIngestor<'a, G: GeoLookup> {
    factory:  EntityFactory<'a, G>,
    divisor:  f64,
    rng:      SimRng,
    entities: Vec<Refugee>,
    stats:    IngestStats,
}

impl<'a, G: GeoLookup> AggregateIngestor<'a, G> {
    /// # Errors
    ///
    /// [`IngestError::InvalidDivisor`] unless `scale_divisor` is finite and
    /// positive.
    pub fn new(factory: EntityFactory<'a, G>, scale_divisor: f64, rng: SimRng) -> IngestResult<Self> {
        if !(scale_divisor.is_finite() && scale_divisor > 0.0) {
            return Err(IngestError::InvalidDivisor(scale_divisor));
        }
        Ok(Self {
            factory,
            divisor: scale_divisor,
            rng,
            entities: Vec::new(),
            stats: IngestStats::default(),
        })
    }

    /// Generate entities for every valid record of one source.
    ///
    /// Records naming a country the lookup cannot resolve are skipped with a
    /// warning.  Returns the number of entities created from this batch.
    ///
    /// # Errors
    ///
    /// - [`IngestError::InvalidMonth`] for a month outside 1–12.
    /// - [`IngestError::CountTooLarge`] if the scaled count exceeds
    ///   [`MAX_ENTITIES_PER_RECORD`].
    /// - [`IngestError::Factory`] if entity creation fails for a record that
    ///   passed the checks above.
    pub fn add_records(&mut self, source: RecordSource, records: &[AggregateRecord]) -> IngestResult<usize> {
        let before = self.entities.len();
        let lookup = self.factory.lookup();

        for record in records {
            self.stats.records += 1;

            if !lookup.contains(record.destination) {
                warn!(%source, code = %record.destination, "destination country not in map, skipping");
                self.stats.unresolved += 1;
                continue;
            }
            if !lookup.contains(record.origin) {
                warn!(%source, code = %record.origin, "origin country not in map, skipping");
                self.stats.unresolved += 1;
                continue;
            }

            if !(1..=12).contains(&record.month) {
                return Err(IngestError::InvalidMonth {
                    origin:      record.origin,
                    destination: record.destination,
                    month:       record.month,
                });
            }

            if (record.count / self.divisor).round() > MAX_ENTITIES_PER_RECORD as f64 {
                return Err(IngestError::CountTooLarge {
                    origin:      record.origin,
                    destination: record.destination,
                    count:       record.count,
                });
            }

            let n = if record.count > 0.0 { scaled_count(record.count, self.divisor) } else { 0 };
            if n == 0 {
                self.stats.empty += 1;
                continue;
            }

            self.entities.reserve(n);
            for _ in 0..n {
                let refugee = self.factory.create(
                    record.origin,
                    record.destination,
                    record.month,
                    record.year,
                    &mut self.rng,
                )?;
                self.entities.push(refugee);
            }
        }

        let created = self.entities.len() - before;
        self.stats.entities += created;
        debug!(%source, records = records.len(), created, "ingested record batch");
        Ok(created)
    }

    pub fn stats(&self) -> IngestStats {
        self.stats
    }

    /// Sort everything ingested so far into a population.
    pub fn finish(self) -> Population<Refugee> {
        debug!(
            entities = self.stats.entities,
            unresolved = self.stats.unresolved,
            "sorting population"
        );
        Population::from_unsorted(self.entities)
    }
}

/// One-shot ingestion of a single record batch.
pub fn ingest<G: GeoLookup>(
    records:       &[AggregateRecord],
    scale_divisor: f64,
    factory:       EntityFactory<'_, G>,
    rng:           SimRng,
) -> IngestResult<Population<Refugee>> {
    let mut ingestor = AggregateIngestor::new(factory, scale_divisor, rng)?;
    ingestor.add_records(RecordSource::Asylum, records)?;
    Ok(ingestor.finish())
}

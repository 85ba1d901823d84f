//! `mf-ingest` — from aggregate monthly counts to a sorted population.
//!
//! # Crate layout
//!
//! | Module        | Contents                                                  |
//! |---------------|-----------------------------------------------------------|
//! | [`record`]    | `AggregateRecord`, `RecordSource`                         |
//! | [`loader`]    | `load_records_csv`, `load_records_reader`                 |
//! | [`factory`]   | `FactoryConfig`, `EntityFactory`                          |
//! | [`ingestor`]  | `AggregateIngestor`, `IngestStats`, `ingest`, `scaled_count` |
//! | [`error`]     | `IngestError`, `FactoryError`, `IngestResult<T>`          |
//!
//! # Pipeline (summary)
//!
//! ```text
//! for source in [asylum, regional]:
//!   for record in source:
//!     origin / destination not in map  → warn, skip
//!     count ≤ 0                        → skip
//!     otherwise                        → round(count / divisor) × factory.create(..)
//! population = stable_sort_by_start(all entities)
//! ```

pub mod error;
pub mod factory;
pub mod ingestor;
pub mod loader;
pub mod record;

#[cfg(test)]
mod tests;

pub use error::{FactoryError, IngestError, IngestResult};
pub use factory::{EntityFactory, FactoryConfig};
pub use ingestor::{AggregateIngestor, IngestStats, MAX_ENTITIES_PER_RECORD, ingest, scaled_count};
pub use loader::{load_records_csv, load_records_reader};
pub use record::{AggregateRecord, RecordSource};

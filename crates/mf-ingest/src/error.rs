use thiserror::Error;

use mf_core::{CountryCode, CoreError};
use mf_geo::GeoError;

/// Failure to build a single entity.
#[derive(Debug, Error)]
pub enum FactoryError {
    #[error("geographic lookup failed: {0}")]
    Geo(#[from] GeoError),

    #[error("calendar error: {0}")]
    Calendar(#[from] CoreError),
}

#[derive(Debug, Error)]
pub enum IngestError {
    #[error("scale divisor must be a positive number, got {0}")]
    InvalidDivisor(f64),

    #[error("{origin}→{destination}: month {month} is not in 1..=12")]
    InvalidMonth {
        origin:      CountryCode,
        destination: CountryCode,
        month:       u32,
    },

    #[error("{origin}→{destination}: count {count} exceeds the per-record entity cap")]
    CountTooLarge {
        origin:      CountryCode,
        destination: CountryCode,
        count:       f64,
    },

    #[error("entity creation failed: {0}")]
    Factory(#[from] FactoryError),

    #[error("record parse error: {0}")]
    Parse(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type IngestResult<T> = Result<T, IngestError>;

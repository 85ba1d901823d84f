//! Geography-subsystem error type.

use thiserror::Error;

use mf_core::CountryCode;

/// Errors produced by `mf-geo`.
#[derive(Debug, Error)]
pub enum GeoError {
    #[error("could not find a feature for country {0}")]
    UnknownCountry(CountryCode),

    #[error("country {0} has no usable polygon geometry")]
    EmptyGeometry(CountryCode),

    #[error("no interior point found for country {0} after {1} attempts")]
    NoInteriorPoint(CountryCode, u32),

    #[error("GeoJSON error: {0}")]
    GeoJson(#[from] geojson::Error),

    #[error("GeoJSON structure error: {0}")]
    Parse(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type GeoResult<T> = Result<T, GeoError>;

//! `EntityFactory` — one randomized `Refugee` per call.

use std::ops::Range;

use tracing::warn;

use mf_core::time::MS_PER_DAY;
use mf_core::{CountryCode, CoreResult, GeoPoint, RouteKey, SimConfig, SimRng, SimTime, days_in_month, month_start};
use mf_geo::{GeoError, GeoLookup};
use mf_motion::Refugee;

use crate::FactoryError;

/// Entity-generation toggles and tunables.
#[derive(Clone, Debug, PartialEq)]
pub struct FactoryConfig {
    /// Start at a random interior point of the origin country instead of its
    /// centroid.
    pub random_start_point: bool,
    /// Speed range in km per simulated hour; sampled uniformly, end exclusive.
    pub speed_kmh: Range<f64>,
}

impl Default for FactoryConfig {
    fn default() -> Self {
        Self {
            random_start_point: false,
            speed_kmh:          4.0..6.0,
        }
    }
}

impl From<&SimConfig> for FactoryConfig {
    fn from(config: &SimConfig) -> Self {
        Self {
            random_start_point: config.random_start_point,
            speed_kmh:          config.speed_min_kmh..config.speed_max_kmh,
        }
    }
}

/// Builds refugees from country codes and a calendar month, drawing all
/// randomness from the caller's [`SimRng`].
pub struct EntityFactory<'a, G: GeoLookup> {
    lookup: &'a G,
    config: FactoryConfig,
}

impl<'a, G: GeoLookup> EntityFactory<'a, G> {
    pub fn new(lookup: &'a G, config: FactoryConfig) -> Self {
        Self { lookup, config }
    }

    pub fn lookup(&self) -> &'a G {
        self.lookup
    }

    pub fn config(&self) -> &FactoryConfig {
        &self.config
    }

    /// Create one refugee travelling `origin → destination`, arriving at a
    /// uniformly random instant within `month`/`year`.
    ///
    /// # Errors
    ///
    /// - [`FactoryError::Geo`] with [`GeoError::UnknownCountry`] if either
    ///   country is missing from the lookup.  Callers are expected to have
    ///   filtered those out already.
    /// - [`FactoryError::Calendar`] if `month` is not 1–12.
    pub fn create(
        &self,
        origin:      CountryCode,
        destination: CountryCode,
        month:       u32,
        year:        i32,
        rng:         &mut SimRng,
    ) -> Result<Refugee, FactoryError> {
        let start_point = self.origin_point(origin, rng)?;
        let end_point   = self.centroid(destination)?;
        let speed       = self.speed(rng);
        let arrival     = self.arrival_time(month, year, rng)?;

        Ok(Refugee::new(
            RouteKey::new(origin, destination),
            start_point,
            end_point,
            speed,
            arrival,
        ))
    }

    /// Origin point: centroid, or a random interior point when configured.
    ///
    /// If no interior point is found the centroid is used instead.
    pub fn origin_point(&self, code: CountryCode, rng: &mut SimRng) -> Result<GeoPoint, GeoError> {
        let feature = self.lookup.resolve(code).ok_or(GeoError::UnknownCountry(code))?;
        if !self.config.random_start_point {
            return Ok(self.lookup.centroid_of(feature));
        }
        match self.lookup.random_point_within(feature, rng) {
            Err(e @ GeoError::NoInteriorPoint(..)) => {
                warn!(%e, "falling back to centroid");
                Ok(self.lookup.centroid_of(feature))
            }
            other => other,
        }
    }

    pub fn centroid(&self, code: CountryCode) -> Result<GeoPoint, GeoError> {
        let feature = self.lookup.resolve(code).ok_or(GeoError::UnknownCountry(code))?;
        Ok(self.lookup.centroid_of(feature))
    }

    /// Uniform in the configured range.  An empty range yields its start.
    pub fn speed(&self, rng: &mut SimRng) -> f64 {
        let range = &self.config.speed_kmh;
        if range.start < range.end {
            rng.gen_range(range.clone())
        } else {
            range.start
        }
    }

    /// `month_start + random() * days_in_month * 1 day`, in UTC.
    pub fn arrival_time(&self, month: u32, year: i32, rng: &mut SimRng) -> CoreResult<SimTime> {
        let start = month_start(month, year)?;
        let days  = days_in_month(month, year)?;
        let offset = rng.random::<f64>() * days as f64 * MS_PER_DAY as f64;
        Ok(start + offset as i64)
    }
}

//! Top-level simulation configuration.
//!
//! Loaded from JSON by the application crate (with the `serde` feature) and
//! split into the per-component configs (`FactoryConfig`, `EngineConfig`)
//! those crates define.  Nothing here is global: two simulations with
//! different toggles can run side by side.

use crate::{CoreError, CoreResult};

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SimConfig {
    /// Track per-route congestion and hand the count to each entity on
    /// activation.  Default: `true`.
    pub smart_spread: bool,

    /// Start entities at a random point inside the origin country instead of
    /// its centroid.  Default: `false`.
    pub random_start_point: bool,

    /// Each entity represents this many people.  Default: 1.
    pub scale_divisor: f64,

    /// Master RNG seed.  The same seed always produces identical populations.
    pub seed: u64,

    /// Lower bound (inclusive) of entity speed, km per simulated hour.
    pub speed_min_kmh: f64,

    /// Upper bound (exclusive) of entity speed, km per simulated hour.
    pub speed_max_kmh: f64,

    /// Simulated milliseconds advanced per animation frame.  Default: 1 hour.
    pub frame_duration_ms: i64,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            smart_spread:       true,
            random_start_point: false,
            scale_divisor:      1.0,
            seed:               0,
            speed_min_kmh:      4.0,
            speed_max_kmh:      6.0,
            frame_duration_ms:  3_600_000,
        }
    }
}

impl SimConfig {
    /// Reject values that would make ingestion or the frame loop meaningless.
    pub fn validate(&self) -> CoreResult<()> {
        if !(self.scale_divisor.is_finite() && self.scale_divisor > 0.0) {
            return Err(CoreError::Config(format!(
                "scale_divisor must be a positive number, got {}",
                self.scale_divisor
            )));
        }
        if !(self.speed_min_kmh > 0.0 && self.speed_min_kmh < self.speed_max_kmh) {
            return Err(CoreError::Config(format!(
                "speed range [{}, {}) must be positive and non-empty",
                self.speed_min_kmh, self.speed_max_kmh
            )));
        }
        if self.frame_duration_ms <= 0 {
            return Err(CoreError::Config(format!(
                "frame_duration_ms must be positive, got {}",
                self.frame_duration_ms
            )));
        }
        Ok(())
    }
}

//! Fluent builder for constructing a [`SimEngine`].

use mf_core::{SimConfig, SimTime};
use mf_motion::{Population, Traveller};

use crate::{EngineConfig, SimEngine, SimError, SimResult};

/// Fluent builder for [`SimEngine<E>`].
///
/// # Required inputs
///
/// - [`Population<E>`] — from `mf_ingest::AggregateIngestor::finish` or
///   [`Population::from_unsorted`]
///
/// # Optional inputs (have defaults)
///
/// | Method               | Default                                      |
/// |----------------------|----------------------------------------------|
/// | `.config(c)`         | `EngineConfig::default()` (smart spread on)  |
/// | `.sim_config(&c)`    | — (validates `c`, then derives `EngineConfig`) |
/// | `.start_at(t)`       | Earliest start in the population, else epoch |
///
/// # Example
///
/// ```rust,ignore
/// let mut engine = SimEngineBuilder::new(population)
///     .sim_config(&config)
///     .build()?;
/// ```
pub struct SimEngineBuilder<E: Traveller> {
    population: Population<E>,
    config:     EngineConfig,
    start_at:   Option<SimTime>,
    invalid:    Option<SimError>,
}

impl<E: Traveller> SimEngineBuilder<E> {
    pub fn new(population: Population<E>) -> Self {
        Self {
            population,
            config:   EngineConfig::default(),
            start_at: None,
            invalid:  None,
        }
    }

    pub fn config(mut self, config: EngineConfig) -> Self {
        self.config = config;
        self
    }

    /// Take engine settings from the top-level config.  Validation errors are
    /// reported by [`build`](Self::build).
    pub fn sim_config(mut self, config: &SimConfig) -> Self {
        if let Err(e) = config.validate() {
            self.invalid = Some(e.into());
        }
        self.config = EngineConfig::from(config);
        self
    }

    /// Start the clock from [`SimEngine::make_clock`] at `t`.
    pub fn start_at(mut self, t: SimTime) -> Self {
        self.start_at = Some(t);
        self
    }

    /// Validate inputs and return a ready-to-run [`SimEngine`].
    pub fn build(self) -> SimResult<SimEngine<E>> {
        if let Some(e) = self.invalid {
            return Err(e);
        }
        if self.config.frame_duration_ms <= 0 {
            return Err(SimError::Config(format!(
                "frame_duration_ms must be positive, got {}",
                self.config.frame_duration_ms
            )));
        }

        let start = self
            .start_at
            .or_else(|| self.population.first_start())
            .unwrap_or(SimTime::EPOCH);

        Ok(SimEngine::new(self.population, self.config, start))
    }
}

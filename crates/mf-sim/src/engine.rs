//! The `SimEngine` struct and its frame loop.

use std::ops::AddAssign;

use tracing::{debug, error};

use mf_core::{FrameClock, SimConfig, SimTime};
use mf_motion::{Population, Traveller};

use crate::{LifecycleObserver, RouteCongestionTracker, SimError, SimResult};

// ── Config / report ───────────────────────────────────────────────────────────

/// Engine toggles, normally derived from [`SimConfig`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EngineConfig {
    /// Track per-route congestion and pass counts to entities on activation.
    pub smart_spread: bool,
    /// Simulated milliseconds per frame for [`SimEngine::make_clock`].
    pub frame_duration_ms: i64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            smart_spread:      true,
            frame_duration_ms: 3_600_000,
        }
    }
}

impl From<&SimConfig> for EngineConfig {
    fn from(config: &SimConfig) -> Self {
        Self {
            smart_spread:      config.smart_spread,
            frame_duration_ms: config.frame_duration_ms,
        }
    }
}

/// Lifecycle transitions observed during one or more frames.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct StepReport {
    pub started:  usize,
    pub updated:  usize,
    pub finished: usize,
    /// Congestion underflows detected (should always be 0).
    pub defects:  usize,
}

impl AddAssign for StepReport {
    fn add_assign(&mut self, rhs: StepReport) {
        self.started  += rhs.started;
        self.updated  += rhs.updated;
        self.finished += rhs.finished;
        self.defects  += rhs.defects;
    }
}

// ── SimEngine ─────────────────────────────────────────────────────────────────

/// Drives every entity of a [`Population`] through
/// `pending → active → arrived`.
///
/// Create via [`SimEngineBuilder`][crate::SimEngineBuilder].
pub struct SimEngine<E: Traveller> {
    pub config: EngineConfig,

    /// All entities, sorted by start instant.  Never reordered.
    population: Population<E>,

    /// Index of the next pending entity.  Only ever increases.
    cursor: usize,

    /// Population indices of active entities, in activation order.
    active: Vec<usize>,

    congestion: RouteCongestionTracker,

    /// Instant of the last `advance_to`, `None` before the first frame.
    current_time: Option<SimTime>,

    /// Instant the clock from `make_clock` starts at.
    start_time: SimTime,

    finished: usize,
    defects:  usize,
}

impl<E: Traveller> SimEngine<E> {
    pub(crate) fn new(population: Population<E>, config: EngineConfig, start_time: SimTime) -> Self {
        Self {
            config,
            population,
            cursor: 0,
            active: Vec::new(),
            congestion: RouteCongestionTracker::new(),
            current_time: None,
            start_time,
            finished: 0,
            defects: 0,
        }
    }

    // ── Public API ────────────────────────────────────────────────────────

    /// Advance the simulation to `now`.
    ///
    /// Activates every pending entity whose start instant has been reached,
    /// updates every active entity (those activated this frame included)
    /// exactly once, and retires the ones that arrived.  Observer hooks fire
    /// in that order.
    ///
    /// Time is assumed to move forward.  Repeating an instant is harmless:
    /// nothing is activated or finished twice.  A regressed instant is not
    /// rejected; what `update` does with it is up to the entity.
    pub fn advance_to<O: LifecycleObserver<E>>(&mut self, now: SimTime, observer: &mut O) -> StepReport {
        observer.on_frame_start(now);
        let mut report = StepReport::default();

        // ── Phase 1: activation ───────────────────────────────────────────
        while let Some(entity) = self.population.get_mut(self.cursor) {
            if !entity.is_past_start(now) {
                break;
            }
            if self.config.smart_spread {
                let count = self.congestion.increment(entity.route());
                entity.set_route_count(count);
            }
            self.active.push(self.cursor);
            self.cursor += 1;
            report.started += 1;
            observer.on_started(entity);
        }

        // ── Phase 2: update / arrival ─────────────────────────────────────
        let snapshot = std::mem::take(&mut self.active);
        let mut still_active = Vec::with_capacity(snapshot.len());

        for index in snapshot {
            let Some(entity) = self.population.get_mut(index) else {
                continue;
            };
            entity.update(now);

            if entity.has_arrived() {
                if self.config.smart_spread {
                    if let Err(e) = self.congestion.decrement(entity.route()) {
                        error!(%e, "congestion table out of balance, clamping at zero");
                        report.defects += 1;
                    }
                }
                report.finished += 1;
                observer.on_finished(entity);
            } else {
                still_active.push(index);
                report.updated += 1;
                observer.on_updated(entity);
            }
        }

        // ── Phase 3: retain ───────────────────────────────────────────────
        self.active = still_active;
        self.finished += report.finished;
        self.defects += report.defects;
        self.current_time = Some(now);

        observer.on_frame_end(now, &report);
        report
    }

    /// Advance frame by frame from `clock.current()` until every entity has
    /// arrived.  Returns the summed report.  An empty population returns
    /// immediately.
    ///
    /// # Errors
    ///
    /// [`SimError::Config`] if the clock does not move forward.
    pub fn run<O: LifecycleObserver<E>>(
        &mut self,
        clock:    &mut FrameClock,
        observer: &mut O,
    ) -> SimResult<StepReport> {
        check_clock(clock)?;
        let mut total = StepReport::default();
        while !self.is_complete() {
            total += self.advance_to(clock.current(), observer);
            clock.advance();
        }
        debug!(frames = clock.frame, finished = total.finished, "run complete");
        Ok(total)
    }

    /// Run exactly `n` frames from the clock's current instant.
    ///
    /// Useful for tests and incremental stepping.
    pub fn run_frames<O: LifecycleObserver<E>>(
        &mut self,
        n:        u64,
        clock:    &mut FrameClock,
        observer: &mut O,
    ) -> SimResult<StepReport> {
        check_clock(clock)?;
        let mut total = StepReport::default();
        for _ in 0..n {
            total += self.advance_to(clock.current(), observer);
            clock.advance();
        }
        Ok(total)
    }

    /// A clock starting at this engine's start instant with the configured
    /// frame duration.
    pub fn make_clock(&self) -> FrameClock {
        FrameClock::new(self.start_time, self.config.frame_duration_ms)
    }

    // ── Accessors ─────────────────────────────────────────────────────────

    pub fn population(&self) -> &Population<E> {
        &self.population
    }

    /// Active entities in activation order.
    pub fn active(&self) -> impl Iterator<Item = &E> + '_ {
        self.active.iter().filter_map(|&i| self.population.get(i))
    }

    pub fn active_len(&self) -> usize {
        self.active.len()
    }

    /// Entities not yet activated.
    pub fn pending_len(&self) -> usize {
        self.population.len() - self.cursor
    }

    pub fn finished_len(&self) -> usize {
        self.finished
    }

    /// `true` once every entity has been activated and has arrived.
    pub fn is_complete(&self) -> bool {
        self.cursor == self.population.len() && self.active.is_empty()
    }

    pub fn congestion(&self) -> &RouteCongestionTracker {
        &self.congestion
    }

    pub fn current_time(&self) -> Option<SimTime> {
        self.current_time
    }

    pub fn start_time(&self) -> SimTime {
        self.start_time
    }

    /// Total congestion underflows since construction.
    pub fn defects(&self) -> usize {
        self.defects
    }
}

fn check_clock(clock: &FrameClock) -> SimResult<()> {
    if clock.frame_duration_ms <= 0 {
        return Err(SimError::Config(format!(
            "frame duration must be positive, got {} ms",
            clock.frame_duration_ms
        )));
    }
    Ok(())
}

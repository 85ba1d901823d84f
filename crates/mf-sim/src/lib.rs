//! `mf-sim` — frame loop orchestrator for the migration-flow simulator.
//!
//! # Three-phase frame
//!
//! ```text
//! advance_to(now):
//!   ① Activate — while population[cursor].is_past_start(now):
//!                  congestion.increment(route) → entity.set_route_count
//!                  active.push(cursor); cursor += 1; on_started
//!   ② Update   — for each active entity (including ones just activated):
//!                  entity.update(now)
//!                  arrived → congestion.decrement(route); on_finished
//!                  else    → on_updated
//!   ③ Retain   — active = entities not yet arrived, order preserved
//! ```
//!
//! The population is sorted by start instant and the cursor only moves
//! forward, so activation costs O(entities started this frame) regardless of
//! population size.
//!
//! # Quick-start
//!
//! ```rust,ignore
//! use mf_sim::{NoopObserver, SimEngineBuilder};
//!
//! let mut engine = SimEngineBuilder::new(population)
//!     .sim_config(&config)
//!     .build()?;
//! let mut clock = engine.make_clock();
//! engine.run(&mut clock, &mut NoopObserver)?;
//! ```

pub mod builder;
pub mod congestion;
pub mod engine;
pub mod error;
pub mod observer;


pub use builder::SimEngineBuilder;
pub use congestion::RouteCongestionTracker;
pub use engine::{EngineConfig, SimEngine, StepReport};
pub use error::{SimError, SimResult};
pub use observer::{FnObserver, FnObserverBuilder, LifecycleObserver, NoopObserver};

//! The `Traveller` trait — what the simulation engine needs from an entity.

use mf_core::{GeoPoint, RouteKey, SimTime};

/// A moving entity with a scheduled start, its own motion model, and a
/// terminal arrived state.
///
/// The engine drives the lifecycle `pending → active → arrived` and never
/// inspects motion internals.  Implementations own all position math.
///
/// # Contract
///
/// - `start_time` is fixed for the lifetime of the entity; populations are
///   sorted on it once.
/// - After `update` has set `has_arrived()`, it stays set.
pub trait Traveller {
    /// The (origin, destination) country pair used for congestion tracking.
    fn route(&self) -> RouteKey;

    /// Scheduled instant at which the entity leaves its origin.
    fn start_time(&self) -> SimTime;

    /// `true` once simulated time has reached the scheduled start.
    fn is_past_start(&self, now: SimTime) -> bool {
        now >= self.start_time()
    }

    /// Advance position to `now`; may set the arrived flag.
    fn update(&mut self, now: SimTime);

    fn has_arrived(&self) -> bool;

    fn position(&self) -> GeoPoint;

    /// Number of entities on the same route at this entity's activation
    /// (itself included).  How it maps to visual spread is up to the renderer.
    fn set_route_count(&mut self, count: u32);
}

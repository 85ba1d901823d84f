//! `mf-motion` — per-entity motion and the start-ordered population.
//!
//! # Crate layout
//!
//! | Module         | Contents                                                   |
//! |----------------|------------------------------------------------------------|
//! | [`traveller`]  | `Traveller` — the capability trait the engine drives       |
//! | [`refugee`]    | `Refugee` — straight-line motion between two points        |
//! | [`population`] | `Population<E>` — entities sorted by start instant         |
//!
//! # Motion model (arrival-anchored)
//!
//! Entities are scheduled backwards from their arrival instant:
//!
//! 1. The factory draws an arrival instant and a speed.
//! 2. `Refugee::new` derives `start = arrival − distance / speed`.
//! 3. Between `start` and `arrival` the position is interpolated linearly
//!    from origin to destination.
//! 4. The first `update(now)` with `now >= arrival` snaps to the destination
//!    and sets `arrived`.
//!
//! The engine never looks inside; it only calls the [`Traveller`] methods.

pub mod population;
pub mod refugee;
pub mod traveller;


pub use population::Population;
pub use refugee::Refugee;
pub use traveller::Traveller;

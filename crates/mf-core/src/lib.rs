//! `mf-core` — foundational types for the migration-flow simulator.
//!
//! This crate is a dependency of every other `mf-*` crate.  It has no `mf-*`
//! dependencies and few external ones (`rand`, `thiserror`, `chrono`, plus
//! optional `serde`).
//!
//! # What lives here
//!
//! | Module          | Contents                                              |
//! |-----------------|-------------------------------------------------------|
//! | [`ids`]         | `CountryCode`, `RouteKey`                             |
//! | [`geo`]         | `GeoPoint`, haversine distance, interpolation         |
//! | [`time`]        | `SimTime`, `FrameClock`, calendar helpers             |
//! | [`config`]      | `SimConfig`                                           |
//! | [`rng`]         | `SimRng`                                              |
//! | [`error`]       | `CoreError`, `CoreResult`                             |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to all public types.        |

pub mod config;
pub mod error;
pub mod geo;
pub mod ids;
pub mod rng;
pub mod time;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use config::SimConfig;
pub use error::{CoreError, CoreResult};
pub use geo::GeoPoint;
pub use ids::{CountryCode, RouteKey};
pub use rng::SimRng;
pub use time::{FrameClock, SimTime, days_in_month, month_start};

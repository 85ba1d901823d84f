//! `mf-geo` — country geometry and the geographic lookup capability.
//!
//! # Crate layout
//!
//! | Module      | Contents                                                    |
//! |-------------|-------------------------------------------------------------|
//! | [`lookup`]  | `GeoLookup` trait                                           |
//! | [`polygon`] | `Polygon`: area centroid, bounding box, point-in-polygon    |
//! | [`atlas`]   | `CountryFeature`, `CountryAtlas` (GeoJSON loader)          |
//! | [`error`]   | `GeoError`, `GeoResult<T>`                                  |
//!
//! # Pluggability
//!
//! Entity generation only sees [`GeoLookup`], so a renderer that already
//! holds its own map features can implement the trait directly instead of
//! loading a second copy through [`CountryAtlas`].

pub mod atlas;
pub mod error;
pub mod lookup;
pub mod polygon;


pub use atlas::{CountryAtlas, CountryFeature, DEFAULT_KEY_PROPERTY};
pub use error::{GeoError, GeoResult};
pub use lookup::GeoLookup;
pub use polygon::Polygon;

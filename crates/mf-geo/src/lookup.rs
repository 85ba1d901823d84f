//! The geographic lookup capability consumed by entity generation.

use mf_core::{CountryCode, GeoPoint, SimRng};

use crate::GeoResult;

/// Resolves country codes to map features and derives points from them.
///
/// # Contract
///
/// - [`resolve`][Self::resolve] returns `None` for codes with no feature.
///   Callers filter on this before creating entities.
/// - [`centroid_of`][Self::centroid_of] is infallible for any feature this
///   lookup returned.
/// - [`random_point_within`][Self::random_point_within] draws only from the
///   supplied `rng`, so generation stays reproducible for a fixed seed.
pub trait GeoLookup {
    /// The per-country feature type.
    type Feature;

    fn resolve(&self, code: CountryCode) -> Option<&Self::Feature>;

    fn centroid_of(&self, feature: &Self::Feature) -> GeoPoint;

    fn random_point_within(&self, feature: &Self::Feature, rng: &mut SimRng) -> GeoResult<GeoPoint>;

    /// `true` if `code` resolves to a feature.
    fn contains(&self, code: CountryCode) -> bool {
        self.resolve(code).is_some()
    }
}

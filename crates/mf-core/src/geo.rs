//! Geographic coordinate type and spatial utilities.
//!
//! `GeoPoint` uses `f64` latitude/longitude.  Country-scale journeys span
//! thousands of kilometres and are interpolated over weeks of simulated time,
//! so single precision would make per-frame movement visibly jittery.

/// Mean Earth radius, kilometres.
const EARTH_RADIUS_KM: f64 = 6_371.0;

/// A WGS-84 geographic coordinate.
#[derive(Copy, Clone, Debug, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GeoPoint {
    pub lat: f64,
    pub lon: f64,
}

impl GeoPoint {
    #[inline]
    pub fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }

    /// Build from a GeoJSON-ordered `[lon, lat]` pair.
    #[inline]
    pub fn from_lon_lat(lon: f64, lat: f64) -> Self {
        Self { lat, lon }
    }

    /// Haversine great-circle distance in kilometres.
    pub fn distance_km(self, other: GeoPoint) -> f64 {
        let d_lat = (other.lat - self.lat).to_radians();
        let d_lon = (other.lon - self.lon).to_radians();

        let lat1 = self.lat.to_radians();
        let lat2 = other.lat.to_radians();

        let a = (d_lat * 0.5).sin().powi(2)
            + lat1.cos() * lat2.cos() * (d_lon * 0.5).sin().powi(2);

        let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());
        EARTH_RADIUS_KM * c
    }

    /// Linear interpolation in lat/lon space.  `t` is clamped to `[0, 1]`.
    ///
    /// Not a great-circle path; the renderer projects onto a flat map anyway.
    #[inline]
    pub fn lerp(self, other: GeoPoint, t: f64) -> GeoPoint {
        let t = t.clamp(0.0, 1.0);
        GeoPoint {
            lat: self.lat + (other.lat - self.lat) * t,
            lon: self.lon + (other.lon - self.lon) * t,
        }
    }
}

impl std::fmt::Display for GeoPoint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({:.6}, {:.6})", self.lat, self.lon)
    }
}

//! GeoJSON-backed country atlas.
//!
//! # Input
//!
//! A GeoJSON `FeatureCollection` with one feature per country.  The country
//! code is read from a string property (default [`DEFAULT_KEY_PROPERTY`]),
//! falling back to the feature's string `id`.  `Polygon` and `MultiPolygon`
//! geometries are accepted; anything else is skipped with a warning.
//!
//! # Centroids
//!
//! The centroid of a country is the area centroid of its largest polygon, so
//! small islands don't pull it out to sea.  A handful of countries whose
//! mainland centroid still lands somewhere odd for an arrow endpoint have
//! fixed overrides (see [`CENTROID_OVERRIDES`]).

use std::collections::HashMap;
use std::path::Path;

use geojson::{Feature, GeoJson, Value};
use tracing::{info, warn};

use mf_core::{CountryCode, GeoPoint, SimRng};

use crate::polygon::{BBox, Polygon, bbox_of};
use crate::{GeoError, GeoLookup, GeoResult};

/// Property holding the alpha-3 code in Natural Earth admin-0 exports.
pub const DEFAULT_KEY_PROPERTY: &str = "ADM0_A3";

/// Hand-placed centroids, `(code, lon, lat)`.
const CENTROID_OVERRIDES: &[(&str, f64, f64)] = &[
    ("FRA", 2.449486512892406, 46.62237366531258),
    ("SWE", 15.273817, 59.803497),
    ("FIN", 25.356445, 61.490593),
    ("NOR", 8.506239, 60.975869),
    ("GBR", -1.538086, 52.815213),
];

/// Rejection-sampling budget for [`CountryAtlas::random_point_within`].
const MAX_SAMPLE_ATTEMPTS: u32 = 1_000;

// ── CountryFeature ────────────────────────────────────────────────────────────

/// One country's border geometry with its precomputed centroid and bounds.
#[derive(Clone, Debug)]
pub struct CountryFeature {
    pub code:     CountryCode,
    pub polygons: Vec<Polygon>,
    centroid:     GeoPoint,
    bbox:         BBox,
}

impl CountryFeature {
    /// Build a feature, dropping degenerate polygons.
    ///
    /// # Errors
    ///
    /// [`GeoError::EmptyGeometry`] if no valid polygon remains.
    pub fn new(code: CountryCode, polygons: Vec<Polygon>) -> GeoResult<Self> {
        let polygons: Vec<Polygon> = polygons.into_iter().filter(Polygon::is_valid).collect();

        let largest = polygons
            .iter()
            .max_by(|a, b| a.area().total_cmp(&b.area()))
            .ok_or(GeoError::EmptyGeometry(code))?;

        let centroid = centroid_override(code).unwrap_or_else(|| largest.centroid());

        let bbox = bbox_of(polygons.iter().flat_map(|p| p.exterior.iter().copied()))
            .ok_or(GeoError::EmptyGeometry(code))?;

        Ok(Self { code, polygons, centroid, bbox })
    }

    #[inline]
    pub fn centroid(&self) -> GeoPoint {
        self.centroid
    }

    #[inline]
    pub fn bbox(&self) -> BBox {
        self.bbox
    }

    /// `true` if `p` lies inside any of the country's polygons.
    pub fn contains(&self, p: GeoPoint) -> bool {
        self.polygons.iter().any(|poly| poly.contains(p))
    }
}

fn centroid_override(code: CountryCode) -> Option<GeoPoint> {
    CENTROID_OVERRIDES
        .iter()
        .find(|(c, _, _)| *c == code.as_str())
        .map(|&(_, lon, lat)| GeoPoint::from_lon_lat(lon, lat))
}

// ── CountryAtlas ──────────────────────────────────────────────────────────────

/// All known countries, keyed by code.
#[derive(Clone, Debug, Default)]
pub struct CountryAtlas {
    features: HashMap<CountryCode, CountryFeature>,
}

impl CountryAtlas {
    /// Build from already-constructed features.  Later duplicates replace
    /// earlier ones.
    pub fn from_features(features: impl IntoIterator<Item = CountryFeature>) -> Self {
        Self {
            features: features.into_iter().map(|f| (f.code, f)).collect(),
        }
    }

    /// Load a GeoJSON file from disk.  See [`from_geojson_str`][Self::from_geojson_str].
    pub fn from_geojson_path(path: &Path, key_property: &str) -> GeoResult<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_geojson_str(&text, key_property)
    }

    /// Parse a GeoJSON `FeatureCollection` (or single `Feature`).
    ///
    /// Features without a usable code or polygon geometry are skipped with a
    /// warning; only structural GeoJSON errors fail the load.
    pub fn from_geojson_str(text: &str, key_property: &str) -> GeoResult<Self> {
        let features = match text.parse::<GeoJson>()? {
            GeoJson::FeatureCollection(fc) => fc.features,
            GeoJson::Feature(f) => vec![f],
            GeoJson::Geometry(_) => {
                return Err(GeoError::Parse(
                    "expected a FeatureCollection, found a bare Geometry".into(),
                ));
            }
        };

        let total = features.len();
        let atlas = Self::from_features(
            features
                .iter()
                .filter_map(|f| country_from_feature(f, key_property)),
        );
        info!(countries = atlas.len(), features = total, "loaded country atlas");
        Ok(atlas)
    }

    pub fn get(&self, code: CountryCode) -> Option<&CountryFeature> {
        self.features.get(&code)
    }

    pub fn len(&self) -> usize {
        self.features.len()
    }

    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
    }

    /// Codes of all loaded countries, in no particular order.
    pub fn codes(&self) -> impl Iterator<Item = CountryCode> + '_ {
        self.features.keys().copied()
    }
}

impl GeoLookup for CountryAtlas {
    type Feature = CountryFeature;

    fn resolve(&self, code: CountryCode) -> Option<&CountryFeature> {
        self.get(code)
    }

    fn centroid_of(&self, feature: &CountryFeature) -> GeoPoint {
        feature.centroid()
    }

    /// Uniform in lon/lat over the bounding box, rejected until inside.
    fn random_point_within(&self, feature: &CountryFeature, rng: &mut SimRng) -> GeoResult<GeoPoint> {
        let (min, max) = feature.bbox();
        for _ in 0..MAX_SAMPLE_ATTEMPTS {
            let p = GeoPoint::new(
                min.lat + rng.random::<f64>() * (max.lat - min.lat),
                min.lon + rng.random::<f64>() * (max.lon - min.lon),
            );
            if feature.contains(p) {
                return Ok(p);
            }
        }
        Err(GeoError::NoInteriorPoint(feature.code, MAX_SAMPLE_ATTEMPTS))
    }
}

// ── GeoJSON conversion ────────────────────────────────────────────────────────

fn country_from_feature(feature: &Feature, key_property: &str) -> Option<CountryFeature> {
    let raw = feature
        .property(key_property)
        .and_then(|v| v.as_str())
        .map(str::to_owned)
        .or_else(|| match &feature.id {
            Some(geojson::feature::Id::String(s)) => Some(s.clone()),
            _ => None,
        });

    let Some(raw) = raw else {
        warn!(key_property, "feature has no country code, skipping");
        return None;
    };

    let code = match CountryCode::new(&raw) {
        Ok(c) => c,
        Err(e) => {
            warn!(%e, "skipping feature");
            return None;
        }
    };

    let polygons = match feature.geometry.as_ref().map(|g| &g.value) {
        Some(Value::Polygon(rings)) => vec![polygon_from_rings(rings)],
        Some(Value::MultiPolygon(polys)) => polys.iter().map(|r| polygon_from_rings(r)).collect(),
        _ => {
            warn!(%code, "feature geometry is not a (multi)polygon, skipping");
            return None;
        }
    };

    match CountryFeature::new(code, polygons) {
        Ok(f) => Some(f),
        Err(e) => {
            warn!(%e, "skipping feature");
            None
        }
    }
}

fn polygon_from_rings(rings: &[Vec<Vec<f64>>]) -> Polygon {
    let mut rings = rings.iter().map(|ring| {
        ring.iter()
            .filter(|pos| pos.len() >= 2)
            .map(|pos| GeoPoint::from_lon_lat(pos[0], pos[1]))
            .collect::<Vec<_>>()
    });
    let exterior = rings.next().unwrap_or_default();
    Polygon::with_holes(exterior, rings.collect())
}

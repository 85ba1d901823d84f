//! Planar polygon helpers in lon/lat space.
//!
//! Country borders are treated as planar polygons in degree coordinates.
//! That is wrong near the poles and across the antimeridian, but it matches
//! how the map is drawn (equirectangular-style projection), so centroids and
//! sampled points land where the viewer expects them.

use mf_core::GeoPoint;

/// One polygon: an outer ring and zero or more holes.
///
/// Rings may be open or closed (first point repeated); both work.
#[derive(Clone, Debug, PartialEq)]
pub struct Polygon {
    pub exterior: Vec<GeoPoint>,
    pub holes:    Vec<Vec<GeoPoint>>,
}

/// Axis-aligned bounding box: `(min, max)` corners.
pub type BBox = (GeoPoint, GeoPoint);

impl Polygon {
    pub fn new(exterior: Vec<GeoPoint>) -> Self {
        Self { exterior, holes: Vec::new() }
    }

    pub fn with_holes(exterior: Vec<GeoPoint>, holes: Vec<Vec<GeoPoint>>) -> Self {
        Self { exterior, holes }
    }

    /// A usable polygon needs at least three distinct vertices.
    pub fn is_valid(&self) -> bool {
        self.exterior.len() >= 3
    }

    /// Absolute area of the outer ring, in square degrees.
    pub fn area(&self) -> f64 {
        ring_signed_area(&self.exterior).abs()
    }

    /// Area-weighted centroid of the outer ring.
    ///
    /// Falls back to the vertex average for degenerate (zero-area) rings.
    pub fn centroid(&self) -> GeoPoint {
        let ring = &self.exterior;
        let a = ring_signed_area(ring);
        if a.abs() < f64::EPSILON {
            return vertex_mean(ring);
        }

        let (mut cx, mut cy) = (0.0, 0.0);
        for (p, q) in edges(ring) {
            let cross = p.lon * q.lat - q.lon * p.lat;
            cx += (p.lon + q.lon) * cross;
            cy += (p.lat + q.lat) * cross;
        }
        let k = 1.0 / (6.0 * a);
        GeoPoint::from_lon_lat(cx * k, cy * k)
    }

    pub fn bbox(&self) -> Option<BBox> {
        bbox_of(self.exterior.iter().copied())
    }

    /// Even-odd point-in-polygon test; points inside a hole are outside.
    pub fn contains(&self, p: GeoPoint) -> bool {
        ring_contains(&self.exterior, p) && !self.holes.iter().any(|h| ring_contains(h, p))
    }
}

/// Bounding box of an arbitrary point set, `None` if empty.
pub fn bbox_of(points: impl IntoIterator<Item = GeoPoint>) -> Option<BBox> {
    points.into_iter().fold(None, |acc, p| match acc {
        None => Some((p, p)),
        Some((min, max)) => Some((
            GeoPoint::new(min.lat.min(p.lat), min.lon.min(p.lon)),
            GeoPoint::new(max.lat.max(p.lat), max.lon.max(p.lon)),
        )),
    })
}

// ── Ring helpers ──────────────────────────────────────────────────────────────

/// Consecutive vertex pairs, wrapping from the last vertex back to the first.
fn edges(ring: &[GeoPoint]) -> impl Iterator<Item = (GeoPoint, GeoPoint)> + '_ {
    let n = ring.len();
    (0..n).map(move |i| (ring[i], ring[(i + 1) % n]))
}

/// Shoelace formula.  Positive for counter-clockwise rings.
fn ring_signed_area(ring: &[GeoPoint]) -> f64 {
    if ring.len() < 3 {
        return 0.0;
    }
    0.5 * edges(ring)
        .map(|(p, q)| p.lon * q.lat - q.lon * p.lat)
        .sum::<f64>()
}

fn vertex_mean(ring: &[GeoPoint]) -> GeoPoint {
    if ring.is_empty() {
        return GeoPoint::default();
    }
    let n = ring.len() as f64;
    let (lat, lon) = ring
        .iter()
        .fold((0.0, 0.0), |(lat, lon), p| (lat + p.lat, lon + p.lon));
    GeoPoint::new(lat / n, lon / n)
}

fn ring_contains(ring: &[GeoPoint], p: GeoPoint) -> bool {
    let mut inside = false;
    for (a, b) in edges(ring) {
        if (a.lat > p.lat) != (b.lat > p.lat) {
            let lon_at = a.lon + (p.lat - a.lat) / (b.lat - a.lat) * (b.lon - a.lon);
            if p.lon < lon_at {
                inside = !inside;
            }
        }
    }
    inside
}

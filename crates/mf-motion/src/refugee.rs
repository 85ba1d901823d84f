//! `Refugee` — one simulated person moving in a straight line.

use mf_core::{GeoPoint, RouteKey, SimTime};

use crate::Traveller;

/// A single moving entity travelling from `origin` to `destination` at a
/// constant speed, timed so that it arrives at `arrival_time`.
#[derive(Clone, Debug, PartialEq)]
pub struct Refugee {
    route:        RouteKey,
    origin:       GeoPoint,
    destination:  GeoPoint,
    speed_kmh:    f64,
    start_time:   SimTime,
    arrival_time: SimTime,
    route_count:  u32,
    position:     GeoPoint,
    arrived:      bool,
}

impl Refugee {
    /// Create a refugee scheduled to reach `destination` at `arrival_time`.
    ///
    /// The start instant is back-computed from the haversine distance and
    /// `speed_kmh`.  A non-positive or non-finite speed is treated as
    /// instantaneous travel (start equals arrival).
    pub fn new(
        route:        RouteKey,
        origin:       GeoPoint,
        destination:  GeoPoint,
        speed_kmh:    f64,
        arrival_time: SimTime,
    ) -> Self {
        let hours = if speed_kmh.is_finite() && speed_kmh > 0.0 {
            origin.distance_km(destination) / speed_kmh
        } else {
            0.0
        };
        Self {
            route,
            origin,
            destination,
            speed_kmh,
            start_time: arrival_time.plus_hours(-hours),
            arrival_time,
            route_count: 0,
            position: origin,
            arrived: false,
        }
    }

    #[inline]
    pub fn origin(&self) -> GeoPoint {
        self.origin
    }

    #[inline]
    pub fn destination(&self) -> GeoPoint {
        self.destination
    }

    #[inline]
    pub fn speed_kmh(&self) -> f64 {
        self.speed_kmh
    }

    #[inline]
    pub fn arrival_time(&self) -> SimTime {
        self.arrival_time
    }

    #[inline]
    pub fn route_count(&self) -> u32 {
        self.route_count
    }

    /// Journey length in kilometres.
    pub fn distance_km(&self) -> f64 {
        self.origin.distance_km(self.destination)
    }

    /// Fraction of the journey completed at `now`, in `[0.0, 1.0]`.
    pub fn progress(&self, now: SimTime) -> f64 {
        let total = self.arrival_time - self.start_time;
        if total <= 0 || now >= self.arrival_time {
            return 1.0;
        }
        (now.since(self.start_time) as f64 / total as f64).clamp(0.0, 1.0)
    }
}

impl Traveller for Refugee {
    #[inline]
    fn route(&self) -> RouteKey {
        self.route
    }

    #[inline]
    fn start_time(&self) -> SimTime {
        self.start_time
    }

    fn update(&mut self, now: SimTime) {
        if self.arrived {
            return;
        }
        if now >= self.arrival_time {
            self.position = self.destination;
            self.arrived = true;
        } else {
            self.position = self.origin.lerp(self.destination, self.progress(now));
        }
    }

    #[inline]
    fn has_arrived(&self) -> bool {
        self.arrived
    }

    #[inline]
    fn position(&self) -> GeoPoint {
        self.position
    }

    #[inline]
    fn set_route_count(&mut self, count: u32) {
        self.route_count = count;
    }
}

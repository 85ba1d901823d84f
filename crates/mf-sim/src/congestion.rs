//! `RouteCongestionTracker` — how many entities are on each route right now.
//!
//! Two-level map `origin → destination → count`.  Each activation increments
//! its route and each arrival decrements it, so when the pairing is exact a
//! count always equals the number of active entities on that route.
//!
//! Zero entries are kept after their last entity arrives; consumers treat a
//! missing route and a zero count the same.

use std::collections::HashMap;

use mf_core::{CountryCode, RouteKey};

use crate::{SimError, SimResult};

#[derive(Clone, Debug, Default)]
pub struct RouteCongestionTracker {
    table: HashMap<CountryCode, HashMap<CountryCode, u32>>,
}

impl RouteCongestionTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add one entity to `route` and return the new count (1 for a route
    /// seen for the first time).
    pub fn increment(&mut self, route: RouteKey) -> u32 {
        let count = self
            .table
            .entry(route.origin)
            .or_default()
            .entry(route.destination)
            .or_insert(0);
        *count += 1;
        *count
    }

    /// Remove one entity from `route` and return the new count.
    ///
    /// # Errors
    ///
    /// [`SimError::CongestionUnderflow`] if the route has no entry or is
    /// already at zero.  The table is left unchanged (clamped at zero).
    pub fn decrement(&mut self, route: RouteKey) -> SimResult<u32> {
        match self
            .table
            .get_mut(&route.origin)
            .and_then(|dests| dests.get_mut(&route.destination))
        {
            Some(count) if *count > 0 => {
                *count -= 1;
                Ok(*count)
            }
            _ => Err(SimError::CongestionUnderflow(route)),
        }
    }

    /// Current count for `route`; 0 if never seen.
    pub fn count(&self, route: RouteKey) -> u32 {
        self.table
            .get(&route.origin)
            .and_then(|dests| dests.get(&route.destination))
            .copied()
            .unwrap_or(0)
    }

    /// Sum over all routes.
    pub fn total(&self) -> u64 {
        self.iter().map(|(_, n)| n as u64).sum()
    }

    /// `true` when no route has an entity on it.
    pub fn is_balanced(&self) -> bool {
        self.iter().all(|(_, n)| n == 0)
    }

    /// Every recorded route with its count, zero entries included.
    pub fn iter(&self) -> impl Iterator<Item = (RouteKey, u32)> + '_ {
        self.table.iter().flat_map(|(&origin, dests)| {
            dests
                .iter()
                .map(move |(&destination, &n)| (RouteKey::new(origin, destination), n))
        })
    }
}

// SPDX-License-Identifier: MIT
// Copyright (c) 2026 StarTuz

use crate::catalog::{Airport, Catalog};
use crate::evaluator::EtopsPolicy;
use crate::geo::haversine_km;
use crate::EtopsError;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Airport codes of a flown route, used to steer away from repeats.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RoutePair {
    pub origin: String,
    pub destination: String,
}

impl RoutePair {
    pub fn new(origin: &str, destination: &str) -> Self {
        Self {
            origin: origin.to_string(),
            destination: destination.to_string(),
        }
    }

    /// Same two airports, in either direction.
    pub fn same_airports(&self, other: &RoutePair) -> bool {
        (self.origin == other.origin && self.destination == other.destination)
            || (self.origin == other.destination && self.destination == other.origin)
    }
}

impl fmt::Display for RoutePair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.origin, self.destination)
    }
}

/// One challenge leg. Built once per round and never modified.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Route {
    pub origin: Airport,
    pub destination: Airport,
    pub distance_km: f64,
    /// Worst-case distance to the nearest alternate.
    pub max_diversion_km: f64,
    /// Single-engine minutes needed to cover `max_diversion_km`.
    pub required_minutes: f64,
}

impl Route {
    /// Builds a route for an explicit airport pair, measuring the great-circle distance.
    pub fn between(
        origin: &Airport,
        destination: &Airport,
        policy: &EtopsPolicy,
    ) -> Result<Self, EtopsError> {
        if origin.code.eq_ignore_ascii_case(&destination.code) {
            return Err(EtopsError::InvalidInput(format!(
                "origin and destination are both {}",
                origin.code
            )));
        }
        let distance_km = haversine_km(origin.lat, origin.lon, destination.lat, destination.lon);
        if distance_km <= 0.0 {
            return Err(EtopsError::InvalidInput(format!(
                "{} and {} share the same position",
                origin.code, destination.code
            )));
        }
        Ok(Self::with_distance(
            origin.clone(),
            destination.clone(),
            distance_km,
            policy,
        ))
    }

    /// Builds a route from an already known distance.
    pub fn with_distance(
        origin: Airport,
        destination: Airport,
        distance_km: f64,
        policy: &EtopsPolicy,
    ) -> Self {
        Self {
            origin,
            destination,
            distance_km,
            max_diversion_km: policy.diversion_km(distance_km),
            required_minutes: policy.required_minutes(distance_km),
        }
    }

    pub fn pair(&self) -> RoutePair {
        RoutePair::new(&self.origin.code, &self.destination.code)
    }

    pub fn is_intercontinental(&self) -> bool {
        self.origin.region != self.destination.region
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RoutePolicy {
    /// How many times a repeated or same-region draw is thrown back before
    /// the generator settles for it.
    pub max_redraws: u32,
    pub prefer_intercontinental: bool,
}

impl Default for RoutePolicy {
    fn default() -> Self {
        Self {
            max_redraws: 8,
            prefer_intercontinental: true,
        }
    }
}

pub struct RouteGenerator<R: Rng> {
    rng: R,
    policy: RoutePolicy,
    etops: EtopsPolicy,
}

impl RouteGenerator<StdRng> {
    /// Deterministic generator for replays and tests.
    pub fn seeded(seed: u64, policy: RoutePolicy, etops: EtopsPolicy) -> Self {
        Self::new(StdRng::seed_from_u64(seed), policy, etops)
    }
}

impl<R: Rng> RouteGenerator<R> {
    pub fn new(rng: R, policy: RoutePolicy, etops: EtopsPolicy) -> Self {
        Self { rng, policy, etops }
    }

    /// Draws a fresh route from the catalog.
    ///
    /// Origin and destination are picked independently and uniformly, and a
    /// draw is only ever discarded outright when both ends are the same
    /// airport. Pairs already in `history` (and same-region pairs when
    /// intercontinental routes are preferred) are thrown back at most
    /// `max_redraws` times, so repeats become rare but remain possible.
    pub fn generate_route(
        &mut self,
        catalog: &Catalog,
        history: &[RoutePair],
    ) -> Result<Route, EtopsError> {
        let airports = catalog.airports();
        let mut redraws = 0;
        loop {
            let (origin, destination) = self.draw_distinct(airports);
            let route = Route::between(origin, destination, &self.etops)?;
            if redraws >= self.policy.max_redraws {
                return Ok(route);
            }

            let pair = route.pair();
            let repeated = history.iter().any(|h| h.same_airports(&pair));
            let domestic = self.policy.prefer_intercontinental && !route.is_intercontinental();
            if !repeated && !domestic {
                log::debug!("Drew route {} ({:.0} km)", pair, route.distance_km);
                return Ok(route);
            }

            log::debug!(
                "Redrawing {} (repeated: {}, same region: {})",
                pair,
                repeated,
                domestic
            );
            redraws += 1;
        }
    }

    fn draw_distinct<'a>(&mut self, airports: &'a [Airport]) -> (&'a Airport, &'a Airport) {
        loop {
            let origin = self.rng.gen_range(0..airports.len());
            let destination = self.rng.gen_range(0..airports.len());
            if origin != destination {
                return (&airports[origin], &airports[destination]);
            }
        }
    }
}

/// Draws a route with the default policies from the given random source.
pub fn generate_route<R: Rng>(
    rng: R,
    catalog: &Catalog,
    history: &[RoutePair],
) -> Result<Route, EtopsError> {
    RouteGenerator::new(rng, RoutePolicy::default(), EtopsPolicy::default())
        .generate_route(catalog, history)
}

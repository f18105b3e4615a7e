// SPDX-License-Identifier: MIT
// Copyright (c) 2026 StarTuz

//! ETOPS eligibility: can a given twin legally fly a given route?
//!
//! The diversion model is a teaching simplification. The furthest point from
//! an adequate alternate is taken as a fixed fraction of the route length and
//! flown at a single-engine speed that does not depend on the aircraft type.

use crate::catalog::{is_recognized_rating, Aircraft, RECOGNIZED_ETOPS_RATINGS};
use crate::route::Route;
use crate::EtopsError;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EtopsPolicy {
    /// Share of the route length assumed to separate the worst-case point
    /// from its nearest alternate.
    pub diversion_fraction: f64,
    /// One-engine-inoperative cruise speed used for every aircraft.
    pub single_engine_speed_kmh: f64,
}

impl Default for EtopsPolicy {
    fn default() -> Self {
        Self {
            diversion_fraction: 0.5,
            single_engine_speed_kmh: 800.0,
        }
    }
}

impl EtopsPolicy {
    pub fn validate(&self) -> Result<(), EtopsError> {
        if !(self.diversion_fraction.is_finite() && self.diversion_fraction > 0.0) {
            return Err(EtopsError::Configuration(format!(
                "diversion_fraction must be positive, got {}",
                self.diversion_fraction
            )));
        }
        if !(self.single_engine_speed_kmh.is_finite() && self.single_engine_speed_kmh > 0.0) {
            return Err(EtopsError::Configuration(format!(
                "single_engine_speed_kmh must be positive, got {}",
                self.single_engine_speed_kmh
            )));
        }
        Ok(())
    }

    pub fn diversion_km(&self, distance_km: f64) -> f64 {
        distance_km * self.diversion_fraction
    }

    /// Single-engine minutes needed to reach the alternate on a route of this length.
    pub fn required_minutes(&self, distance_km: f64) -> f64 {
        self.diversion_km(distance_km) / self.single_engine_speed_kmh * 60.0
    }

    /// Radius around an alternate that an aircraft with this rating may stray.
    pub fn etops_radius_km(&self, etops_minutes: u32) -> f64 {
        etops_minutes as f64 / 60.0 * self.single_engine_speed_kmh
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Compliance {
    Compliant,
    NonCompliant,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Verdict {
    pub compliance: Compliance,
    pub required_minutes: f64,
    pub rating_minutes: u32,
    /// Rating minus required time. Negative when the route is out of reach.
    pub margin_minutes: f64,
}

impl Verdict {
    pub fn is_compliant(&self) -> bool {
        self.compliance == Compliance::Compliant
    }

    pub fn describe(&self) -> String {
        match self.compliance {
            Compliance::Compliant => format!(
                "ETOPS {} covers the required {:.0} min with {:.0} min to spare",
                self.rating_minutes, self.required_minutes, self.margin_minutes
            ),
            Compliance::NonCompliant => format!(
                "ETOPS {} falls {:.0} min short of the required {:.0} min",
                self.rating_minutes, -self.margin_minutes, self.required_minutes
            ),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct EtopsEvaluator {
    policy: EtopsPolicy,
}

impl EtopsEvaluator {
    pub fn new(policy: EtopsPolicy) -> Result<Self, EtopsError> {
        policy.validate()?;
        Ok(Self { policy })
    }

    pub fn policy(&self) -> &EtopsPolicy {
        &self.policy
    }

    /// Decides compliance for one aircraft on one route. Pure: the same
    /// inputs always produce the same verdict.
    pub fn evaluate(&self, aircraft: &Aircraft, route: &Route) -> Result<Verdict, EtopsError> {
        if !(route.distance_km.is_finite() && route.distance_km > 0.0) {
            return Err(EtopsError::InvalidInput(format!(
                "route {} has non-positive distance {}",
                route.pair(),
                route.distance_km
            )));
        }
        if !is_recognized_rating(aircraft.etops_minutes) {
            return Err(EtopsError::InvalidInput(format!(
                "{} has unrecognized ETOPS rating {} (expected one of {:?})",
                aircraft.name, aircraft.etops_minutes, RECOGNIZED_ETOPS_RATINGS
            )));
        }

        let required_minutes = self.policy.required_minutes(route.distance_km);
        let rating = aircraft.etops_minutes as f64;
        let compliance = if required_minutes <= rating {
            Compliance::Compliant
        } else {
            Compliance::NonCompliant
        };

        Ok(Verdict {
            compliance,
            required_minutes,
            rating_minutes: aircraft.etops_minutes,
            margin_minutes: rating - required_minutes,
        })
    }
}

/// Evaluates with the default policy.
pub fn evaluate(aircraft: &Aircraft, route: &Route) -> Result<Verdict, EtopsError> {
    EtopsEvaluator::default().evaluate(aircraft, route)
}

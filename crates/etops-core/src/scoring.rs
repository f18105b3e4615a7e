// SPDX-License-Identifier: MIT
// Copyright (c) 2026 StarTuz

use crate::catalog::Aircraft;
use crate::evaluator::{Compliance, Verdict};
use crate::route::Route;
use crate::EtopsError;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Co2Tier {
    Low,
    Medium,
    High,
}

impl fmt::Display for Co2Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Co2Tier::Low => "LOW",
            Co2Tier::Medium => "MEDIUM",
            Co2Tier::High => "HIGH",
        })
    }
}

/// Point table for one round. Each round scores its ETOPS result plus a CO₂ bonus.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringPolicy {
    pub compliant_points: i32,
    pub non_compliant_points: i32,
    pub low_co2_points: i32,
    pub medium_co2_points: i32,
    pub high_co2_points: i32,
    /// Total CO₂ below this is LOW.
    pub low_max_kg: f64,
    /// Total CO₂ below this (and not LOW) is MEDIUM; anything else is HIGH.
    pub medium_max_kg: f64,
}

impl Default for ScoringPolicy {
    fn default() -> Self {
        Self {
            compliant_points: 10,
            non_compliant_points: -5,
            low_co2_points: 10,
            medium_co2_points: 5,
            high_co2_points: 0,
            low_max_kg: 60_000.0,
            medium_max_kg: 150_000.0,
        }
    }
}

impl ScoringPolicy {
    pub fn validate(&self) -> Result<(), EtopsError> {
        if !(self.low_max_kg.is_finite() && self.low_max_kg > 0.0) {
            return Err(EtopsError::Configuration(format!(
                "low_max_kg must be positive, got {}",
                self.low_max_kg
            )));
        }
        if !(self.medium_max_kg.is_finite() && self.medium_max_kg >= self.low_max_kg) {
            return Err(EtopsError::Configuration(format!(
                "medium_max_kg ({}) must not be below low_max_kg ({})",
                self.medium_max_kg, self.low_max_kg
            )));
        }
        Ok(())
    }

    pub fn tier_for(&self, total_co2_kg: f64) -> Co2Tier {
        if total_co2_kg < self.low_max_kg {
            Co2Tier::Low
        } else if total_co2_kg < self.medium_max_kg {
            Co2Tier::Medium
        } else {
            Co2Tier::High
        }
    }

    pub fn etops_points(&self, compliance: Compliance) -> i32 {
        match compliance {
            Compliance::Compliant => self.compliant_points,
            Compliance::NonCompliant => self.non_compliant_points,
        }
    }

    pub fn co2_points(&self, tier: Co2Tier) -> i32 {
        match tier {
            Co2Tier::Low => self.low_co2_points,
            Co2Tier::Medium => self.medium_co2_points,
            Co2Tier::High => self.high_co2_points,
        }
    }

    /// Most a single round can earn under this table.
    pub fn best_round(&self) -> i32 {
        self.etops_points(Compliance::Compliant)
            .max(self.etops_points(Compliance::NonCompliant))
            + self
                .co2_points(Co2Tier::Low)
                .max(self.co2_points(Co2Tier::Medium))
                .max(self.co2_points(Co2Tier::High))
    }

    pub fn classify(&self, aircraft: &Aircraft, route: &Route) -> Co2Tier {
        self.tier_for(aircraft.co2_kg_per_km * route.distance_km)
    }

    pub fn score(&self, verdict: &Verdict, tier: Co2Tier) -> ScoreDelta {
        let etops_points = self.etops_points(verdict.compliance);
        let co2_points = self.co2_points(tier);
        let etops_reason = match verdict.compliance {
            Compliance::Compliant => "ETOPS compliant",
            Compliance::NonCompliant => "ETOPS violation",
        };
        ScoreDelta {
            points: etops_points + co2_points,
            etops_points,
            co2_points,
            rationale: format!(
                "{} ({:+}), {} CO2 ({:+})",
                etops_reason, etops_points, tier, co2_points
            ),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreDelta {
    pub points: i32,
    pub etops_points: i32,
    pub co2_points: i32,
    pub rationale: String,
}

/// CO₂ tier for an aircraft flying a route, with the default thresholds.
pub fn classify_co2(aircraft: &Aircraft, route: &Route) -> Co2Tier {
    ScoringPolicy::default().classify(aircraft, route)
}

/// Applies the default point table.
pub fn score(verdict: &Verdict, tier: Co2Tier) -> ScoreDelta {
    ScoringPolicy::default().score(verdict, tier)
}

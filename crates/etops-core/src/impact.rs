// SPDX-License-Identifier: MIT
// Copyright (c) 2026 StarTuz

//! Sustainability figures shown alongside each round. They feed player
//! feedback only and never change the score.

use crate::catalog::Aircraft;
use crate::evaluator::Verdict;
use serde::{Deserialize, Serialize};

/// Per-passenger CO₂ of driving the same distance.
pub const CAR_CO2_KG_PER_PAX_KM: f64 = 0.12;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImpactReport {
    pub passengers: u32,
    pub total_fuel_l: f64,
    pub total_co2_kg: f64,
    pub co2_per_passenger_kg: f64,
    /// 0..10, falls by one point per 100 kg CO₂ per passenger.
    pub efficiency_score: f64,
    /// Seat utilisation on a 0..10 scale.
    pub utilization_score: f64,
    /// Mean of efficiency, utilisation and the aircraft's own rating.
    pub sdg_score: f64,
    pub car_co2_kg: f64,
    /// Percentage saved against driving. Negative when flying emits more.
    pub reduction_vs_car_pct: f64,
}

impl ImpactReport {
    /// Passenger counts are clamped to `1..=capacity`.
    pub fn compute(aircraft: &Aircraft, distance_km: f64, passengers: u32) -> Self {
        // Aircraft built outside a Catalog may report zero seats.
        let passengers = passengers.clamp(1, aircraft.capacity.max(1));
        let total_fuel_l = distance_km * aircraft.fuel_l_per_km;
        let total_co2_kg = distance_km * aircraft.co2_kg_per_km;
        let co2_per_passenger_kg = total_co2_kg / passengers as f64;

        let efficiency_score = (10.0 - co2_per_passenger_kg / 100.0).max(0.0);
        let utilization_score = passengers as f64 / aircraft.capacity as f64 * 10.0;
        let sdg_score = (efficiency_score + utilization_score + aircraft.sdg_score) / 3.0;

        let car_co2_kg = distance_km * CAR_CO2_KG_PER_PAX_KM * passengers as f64;
        let reduction_vs_car_pct = if car_co2_kg > 0.0 {
            (car_co2_kg - total_co2_kg) / car_co2_kg * 100.0
        } else {
            0.0
        };

        Self {
            passengers,
            total_fuel_l,
            total_co2_kg,
            co2_per_passenger_kg,
            efficiency_score,
            utilization_score,
            sdg_score,
            car_co2_kg,
            reduction_vs_car_pct,
        }
    }

    pub fn utilization_pct(&self) -> f64 {
        self.utilization_score * 10.0
    }

    /// Improvement hints for the flight plan, most pressing last.
    pub fn recommendations(&self, verdict: &Verdict) -> Vec<String> {
        let mut recs = Vec::new();
        if self.utilization_pct() < 70.0 {
            recs.push(
                "Seat utilisation is low. Revisit demand or consider a smaller aircraft."
                    .to_string(),
            );
        }
        if self.co2_per_passenger_kg > 150.0 {
            recs.push(
                "CO2 per passenger is high. Consider a more fuel-efficient aircraft.".to_string(),
            );
        }
        if !verdict.is_compliant() {
            recs.push(
                "ETOPS requirement not met. Add a technical stop or pick a higher-rated aircraft."
                    .to_string(),
            );
        }
        if self.sdg_score < 6.0 {
            recs.push(
                "SDG score is low. Both emissions and load factor need attention.".to_string(),
            );
        }
        recs
    }
}

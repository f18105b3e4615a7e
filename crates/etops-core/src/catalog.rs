// SPDX-License-Identifier: MIT
// Copyright (c) 2026 StarTuz

use crate::geo::{haversine_km, is_valid_coordinate};
use crate::EtopsError;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;

/// ETOPS certifications the game knows about, in minutes.
pub const RECOGNIZED_ETOPS_RATINGS: [u32; 4] = [120, 180, 240, 370];

/// Airports closer than this are treated as the same position.
pub const MIN_SEPARATION_KM: f64 = 0.001;

pub fn is_recognized_rating(minutes: u32) -> bool {
    RECOGNIZED_ETOPS_RATINGS.contains(&minutes)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Region {
    Asia,
    Europe,
    #[serde(rename = "Middle East")]
    MiddleEast,
    Africa,
    #[serde(rename = "North America")]
    NorthAmerica,
    #[serde(rename = "South America")]
    SouthAmerica,
    Oceania,
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Region::Asia => "Asia",
            Region::Europe => "Europe",
            Region::MiddleEast => "Middle East",
            Region::Africa => "Africa",
            Region::NorthAmerica => "North America",
            Region::SouthAmerica => "South America",
            Region::Oceania => "Oceania",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Aircraft {
    pub name: String,
    pub manufacturer: String,
    /// Certified single-engine diversion time in minutes.
    pub etops_minutes: u32,
    pub cruise_speed_kmh: f64,
    /// CO₂ emitted per flight-kilometre, whole aircraft.
    pub co2_kg_per_km: f64,
    pub capacity: u32,
    pub range_km: f64,
    pub fuel_l_per_km: f64,
    /// Sustainability rating, 0 to 10.
    pub sdg_score: f64,
}

impl Aircraft {
    fn check(&self) -> Result<(), String> {
        if self.name.trim().is_empty() {
            return Err("aircraft with empty name".to_string());
        }
        if !is_recognized_rating(self.etops_minutes) {
            return Err(format!(
                "{}: unrecognized ETOPS rating {} (expected one of {:?})",
                self.name, self.etops_minutes, RECOGNIZED_ETOPS_RATINGS
            ));
        }
        if !(self.cruise_speed_kmh.is_finite() && self.cruise_speed_kmh > 0.0) {
            return Err(format!("{}: cruise speed must be positive", self.name));
        }
        if !(self.co2_kg_per_km.is_finite() && self.co2_kg_per_km >= 0.0) {
            return Err(format!("{}: CO2 factor must be non-negative", self.name));
        }
        if !(self.fuel_l_per_km.is_finite() && self.fuel_l_per_km >= 0.0) {
            return Err(format!("{}: fuel burn must be non-negative", self.name));
        }
        if self.capacity == 0 {
            return Err(format!("{}: capacity must be at least one seat", self.name));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Airport {
    pub code: String,
    pub name: String,
    pub lat: f64,
    pub lon: f64,
    pub region: Region,
}

impl Airport {
    pub fn label(&self) -> String {
        format!("{} - {}", self.code, self.name)
    }
}

/// Immutable aircraft and airport reference tables for one game.
#[derive(Debug, Clone)]
pub struct Catalog {
    aircraft: Vec<Aircraft>,
    airports: Vec<Airport>,
}

impl Catalog {
    /// Validates and freezes the reference tables.
    ///
    /// Requires a non-empty fleet with recognized ratings and at least two
    /// airports with distinct codes and distinct positions.
    pub fn new(aircraft: Vec<Aircraft>, airports: Vec<Airport>) -> Result<Self, EtopsError> {
        Self::validate(&aircraft, &airports).map_err(|msg| {
            log::warn!("Rejected catalog: {}", msg);
            EtopsError::Configuration(msg)
        })?;
        log::debug!(
            "Catalog loaded: {} aircraft, {} airports",
            aircraft.len(),
            airports.len()
        );
        Ok(Self { aircraft, airports })
    }

    fn validate(aircraft: &[Aircraft], airports: &[Airport]) -> Result<(), String> {
        if aircraft.is_empty() {
            return Err("aircraft catalog is empty".to_string());
        }
        let mut names = HashSet::new();
        for a in aircraft {
            a.check()?;
            if !names.insert(a.name.to_lowercase()) {
                return Err(format!("duplicate aircraft name '{}'", a.name));
            }
        }

        if airports.len() < 2 {
            return Err(format!(
                "at least two airports are required, got {}",
                airports.len()
            ));
        }
        let mut codes = HashSet::new();
        for (i, apt) in airports.iter().enumerate() {
            if apt.code.trim().is_empty() {
                return Err("airport with empty code".to_string());
            }
            if !is_valid_coordinate(apt.lat, apt.lon) {
                return Err(format!(
                    "{}: invalid coordinates ({}, {})",
                    apt.code, apt.lat, apt.lon
                ));
            }
            if !codes.insert(apt.code.to_uppercase()) {
                return Err(format!("duplicate airport code '{}'", apt.code));
            }
            // Compared by distance: signed zeros and pole longitudes differ in
            // value but not in position.
            if let Some(other) = airports[..i]
                .iter()
                .find(|o| haversine_km(o.lat, o.lon, apt.lat, apt.lon) < MIN_SEPARATION_KM)
            {
                return Err(format!("{}: shares its position with {}", apt.code, other.code));
            }
        }
        Ok(())
    }

    pub fn aircraft(&self) -> &[Aircraft] {
        &self.aircraft
    }

    pub fn airports(&self) -> &[Airport] {
        &self.airports
    }

    /// Case-insensitive lookup by aircraft name.
    pub fn find_aircraft(&self, name: &str) -> Option<&Aircraft> {
        let name = name.trim();
        self.aircraft
            .iter()
            .find(|a| a.name.eq_ignore_ascii_case(name))
    }

    /// Case-insensitive lookup by airport code.
    pub fn find_airport(&self, code: &str) -> Option<&Airport> {
        let code = code.trim();
        self.airports.iter().find(|a| a.code.eq_ignore_ascii_case(code))
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    pub(crate) fn make_aircraft(name: &str, etops: u32, co2: f64) -> Aircraft {
        Aircraft {
            name: name.to_string(),
            manufacturer: "Test".to_string(),
            etops_minutes: etops,
            cruise_speed_kmh: 850.0,
            co2_kg_per_km: co2,
            capacity: 250,
            range_km: 12000.0,
            fuel_l_per_km: 6.0,
            sdg_score: 7.0,
        }
    }

    pub(crate) fn make_airport(code: &str, lat: f64, lon: f64, region: Region) -> Airport {
        Airport {
            code: code.to_string(),
            name: format!("Airport {}", code),
            lat,
            lon,
            region,
        }
    }

    fn two_airports() -> Vec<Airport> {
        vec![
            make_airport("LHR", 51.47, -0.45, Region::Europe),
            make_airport("JFK", 40.64, -73.78, Region::NorthAmerica),
        ]
    }

    #[test]
    fn test_valid_catalog() {
        let fleet = vec![make_aircraft("787-9", 240, 17.6)];
        let catalog = Catalog::new(fleet, two_airports()).unwrap();
        assert_eq!(catalog.aircraft().len(), 1);
        assert_eq!(catalog.airports().len(), 2);
        assert!(catalog.find_aircraft("787-9").is_some());
        assert_eq!(catalog.find_airport("jfk").unwrap().code, "JFK");
        assert!(catalog.find_airport("CDG").is_none());
    }

    #[test]
    fn test_empty_fleet_rejected() {
        let err = Catalog::new(vec![], two_airports()).unwrap_err();
        assert!(matches!(err, EtopsError::Configuration(_)));
    }

    #[test]
    fn test_single_airport_rejected() {
        let airports = vec![make_airport("LHR", 51.47, -0.45, Region::Europe)];
        let err = Catalog::new(vec![make_aircraft("A", 180, 10.0)], airports).unwrap_err();
        assert!(matches!(err, EtopsError::Configuration(_)));
    }

    #[test]
    fn test_unrecognized_rating_rejected() {
        let err = Catalog::new(vec![make_aircraft("A", 330, 10.0)], two_airports()).unwrap_err();
        match err {
            EtopsError::Configuration(msg) => assert!(msg.contains("330")),
            other => panic!("unexpected error {:?}", other),
        }
    }

    #[test]
    fn test_duplicate_codes_rejected() {
        let airports = vec![
            make_airport("LHR", 51.47, -0.45, Region::Europe),
            make_airport("lhr", 40.64, -73.78, Region::NorthAmerica),
        ];
        assert!(Catalog::new(vec![make_aircraft("A", 180, 10.0)], airports).is_err());
    }

    #[test]
    fn test_colocated_airports_rejected() {
        let airports = vec![
            make_airport("AAA", 10.0, 10.0, Region::Africa),
            make_airport("BBB", 10.0, 10.0, Region::Africa),
        ];
        assert!(Catalog::new(vec![make_aircraft("A", 180, 10.0)], airports).is_err());
    }

    #[test]
    fn test_signed_zero_position_rejected() {
        let airports = vec![
            make_airport("AAA", 0.0, 0.0, Region::Africa),
            make_airport("BBB", -0.0, 0.0, Region::Africa),
        ];
        let err = Catalog::new(vec![make_aircraft("A", 180, 10.0)], airports).unwrap_err();
        match err {
            EtopsError::Configuration(msg) => assert!(msg.contains("BBB"), "{}", msg),
            other => panic!("unexpected error {:?}", other),
        }
    }

    #[test]
    fn test_pole_airports_rejected() {
        let airports = vec![
            make_airport("NPA", 90.0, 0.0, Region::Europe),
            make_airport("NPB", 90.0, 120.0, Region::Asia),
        ];
        assert!(matches!(
            Catalog::new(vec![make_aircraft("A", 180, 10.0)], airports),
            Err(EtopsError::Configuration(_))
        ));
    }

    #[test]
    fn test_duplicate_aircraft_rejected() {
        let fleet = vec![make_aircraft("A350", 370, 18.0), make_aircraft("a350", 370, 18.0)];
        assert!(Catalog::new(fleet, two_airports()).is_err());
    }

    #[test]
    fn test_region_display_matches_serde_name() {
        assert_eq!(Region::MiddleEast.to_string(), "Middle East");
        let json = serde_json::to_string(&Region::NorthAmerica).unwrap();
        assert_eq!(json, "\"North America\"");
    }
}

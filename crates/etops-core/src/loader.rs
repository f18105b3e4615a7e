// SPDX-License-Identifier: MIT
// Copyright (c) 2026 StarTuz

//! CSV reference tables for aircraft and airports.

use crate::catalog::{Aircraft, Airport, Catalog, Region};
use crate::EtopsError;
use serde::Deserialize;
use std::fs::File;
use std::io::Read;
use std::path::Path;
use thiserror::Error;

const BUILTIN_AIRCRAFT: &str = include_str!("../data/aircraft.csv");
const BUILTIN_AIRPORTS: &str = include_str!("../data/airports.csv");

#[derive(Error, Debug)]
pub enum LoadError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
    #[error(transparent)]
    Catalog(#[from] EtopsError),
}

#[derive(Debug, Deserialize)]
struct AircraftRecord {
    #[serde(rename = "Model")]
    model: String,
    #[serde(rename = "Manufacturer")]
    manufacturer: String,
    #[serde(rename = "ETOPS")]
    etops: u32,
    #[serde(rename = "Range")]
    range: f64,
    #[serde(rename = "Speed")]
    speed: f64,
    #[serde(rename = "Capacity")]
    capacity: u32,
    #[serde(rename = "Fuel_L_per_km")]
    fuel_l_per_km: f64,
    #[serde(rename = "CO2_kg_per_km")]
    co2_kg_per_km: f64,
    #[serde(rename = "SDG_Score")]
    sdg_score: f64,
}

impl From<AircraftRecord> for Aircraft {
    fn from(r: AircraftRecord) -> Self {
        Aircraft {
            name: r.model.trim().to_string(),
            manufacturer: r.manufacturer.trim().to_string(),
            etops_minutes: r.etops,
            cruise_speed_kmh: r.speed,
            co2_kg_per_km: r.co2_kg_per_km,
            capacity: r.capacity,
            range_km: r.range,
            fuel_l_per_km: r.fuel_l_per_km,
            sdg_score: r.sdg_score,
        }
    }
}

#[derive(Debug, Deserialize)]
struct AirportRecord {
    #[serde(rename = "IATA")]
    iata: String,
    #[serde(rename = "Name")]
    name: String,
    #[serde(rename = "Latitude")]
    latitude: f64,
    #[serde(rename = "Longitude")]
    longitude: f64,
    #[serde(rename = "Region")]
    region: Region,
}

impl From<AirportRecord> for Airport {
    fn from(r: AirportRecord) -> Self {
        Airport {
            code: r.iata.trim().to_uppercase(),
            name: r.name.trim().to_string(),
            lat: r.latitude,
            lon: r.longitude,
            region: r.region,
        }
    }
}

fn csv_reader<R: Read>(reader: R) -> csv::Reader<R> {
    csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader)
}

pub fn parse_aircraft<R: Read>(reader: R) -> Result<Vec<Aircraft>, LoadError> {
    let mut aircraft = Vec::new();
    for record in csv_reader(reader).deserialize::<AircraftRecord>() {
        aircraft.push(record?.into());
    }
    Ok(aircraft)
}

pub fn parse_airports<R: Read>(reader: R) -> Result<Vec<Airport>, LoadError> {
    let mut airports = Vec::new();
    for record in csv_reader(reader).deserialize::<AirportRecord>() {
        airports.push(record?.into());
    }
    Ok(airports)
}

pub fn parse_aircraft_file<P: AsRef<Path>>(path: P) -> Result<Vec<Aircraft>, LoadError> {
    parse_aircraft(File::open(path)?)
}

pub fn parse_airports_file<P: AsRef<Path>>(path: P) -> Result<Vec<Airport>, LoadError> {
    parse_airports(File::open(path)?)
}

/// Reads both tables from disk and validates them into a catalog.
pub fn load_catalog<P: AsRef<Path>, Q: AsRef<Path>>(
    aircraft_csv: P,
    airports_csv: Q,
) -> Result<Catalog, LoadError> {
    let aircraft = parse_aircraft_file(aircraft_csv)?;
    let airports = parse_airports_file(airports_csv)?;
    Ok(Catalog::new(aircraft, airports)?)
}

/// Fleet and airport tables shipped with the game.
pub fn builtin_catalog() -> Result<Catalog, LoadError> {
    let aircraft = parse_aircraft(BUILTIN_AIRCRAFT.as_bytes())?;
    let airports = parse_airports(BUILTIN_AIRPORTS.as_bytes())?;
    Ok(Catalog::new(aircraft, airports)?)
}

// SPDX-License-Identifier: MIT
// Copyright (c) 2026 StarTuz

//! Spherical-earth geometry used for route distances.

/// Mean earth radius. Routes are measured on a sphere, not the WGS84 ellipsoid.
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Great-circle distance between two lat/lon points in kilometres (haversine).
pub fn haversine_km(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    let d_lat = (lat2 - lat1).to_radians();
    let d_lon = (lon2 - lon1).to_radians();
    let a = (d_lat / 2.0).sin().powi(2)
        + lat1.to_radians().cos() * lat2.to_radians().cos() * (d_lon / 2.0).sin().powi(2);
    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());
    EARTH_RADIUS_KM * c
}

/// Returns true if both values are usable decimal-degree coordinates.
pub fn is_valid_coordinate(lat: f64, lon: f64) -> bool {
    lat.is_finite()
        && lon.is_finite()
        && (-90.0..=90.0).contains(&lat)
        && (-180.0..=180.0).contains(&lon)
}

// SPDX-License-Identifier: MIT
// Copyright (c) 2026 StarTuz
//
// Session state machine properties: round counting, terminal closure and
// score conservation across a full ten-route challenge.

use etops_core::catalog::{Aircraft, Airport, Catalog, Region};
use etops_core::loader::builtin_catalog;
use etops_core::{EtopsError, GameConfig, Session, SessionState, ROUTES_PER_SESSION};
use std::sync::Arc;

fn make_aircraft(name: &str, etops: u32, co2: f64) -> Aircraft {
    Aircraft {
        name: name.to_string(),
        manufacturer: "Test".to_string(),
        etops_minutes: etops,
        cruise_speed_kmh: 850.0,
        co2_kg_per_km: co2,
        capacity: 200,
        range_km: 15000.0,
        fuel_l_per_km: 1.0,
        sdg_score: 9.0,
    }
}

fn make_airport(code: &str, lat: f64, lon: f64, region: Region) -> Airport {
    Airport {
        code: code.to_string(),
        name: format!("Airport {}", code),
        lat,
        lon,
        region,
    }
}

/// Airports a few hundred kilometres apart, so any 370-minute twin with a
/// small CO₂ factor is compliant and LOW on every leg.
fn regional_catalog() -> Arc<Catalog> {
    Arc::new(
        Catalog::new(
            vec![make_aircraft("Eco Twin", 370, 1.0)],
            vec![
                make_airport("LHR", 51.47, -0.45, Region::Europe),
                make_airport("CDG", 49.01, 2.55, Region::Europe),
                make_airport("FRA", 50.04, 8.56, Region::Europe),
                make_airport("AMS", 52.31, 4.76, Region::Europe),
                make_airport("DUB", 53.42, -6.27, Region::Europe),
            ],
        )
        .unwrap(),
    )
}

#[test]
fn test_route_index_tracks_submissions() {
    let catalog = Arc::new(builtin_catalog().unwrap());
    for n in 0..=ROUTES_PER_SESSION {
        let mut session =
            Session::seeded(catalog.clone(), GameConfig::default(), n as u64).unwrap();
        session.start("787-9").unwrap();
        for _ in 0..n {
            session.submit_decision().unwrap();
        }
        assert_eq!(session.route_index(), n);
        assert_eq!(session.history().len(), n);
        for (i, event) in session.history().iter().enumerate() {
            assert_eq!(event.route_index, i + 1);
        }
    }
}

#[test]
fn test_terminal_closure() {
    let catalog = Arc::new(builtin_catalog().unwrap());
    let mut session = Session::seeded(catalog, GameConfig::default(), 42).unwrap();
    session.start("A350-900").unwrap();

    for round in 1..=ROUTES_PER_SESSION {
        assert_eq!(session.state(), SessionState::InProgress);
        let outcome = session.submit_decision().unwrap();
        assert_eq!(outcome.event.route_index, round);
    }

    assert_eq!(session.state(), SessionState::Complete);
    assert!(session.is_complete());
    assert!(session.current_route().is_none());
    assert!(matches!(
        session.submit_decision(),
        Err(EtopsError::InvalidState(_))
    ));
    assert!(matches!(
        session.start("A350-900"),
        Err(EtopsError::InvalidState(_))
    ));
    assert_eq!(session.history().len(), ROUTES_PER_SESSION);

    session.reset();
    assert_eq!(session.state(), SessionState::NotStarted);
    session.start("A350-900").unwrap();
}

#[test]
fn test_score_conservation() {
    let catalog = Arc::new(builtin_catalog().unwrap());
    let mut session = Session::seeded(catalog, GameConfig::default(), 7).unwrap();
    session.start("A321neo").unwrap();
    while !session.is_complete() {
        session.submit_decision().unwrap();
    }

    let mut running = 0;
    for event in session.history() {
        running += event.delta;
        assert_eq!(event.cumulative_score, running);
    }
    assert_eq!(session.total_score(), running);
    assert_eq!(session.summary().total_score, running);
}

#[test]
fn test_perfect_session_scores_200() {
    let mut session = Session::seeded(regional_catalog(), GameConfig::default(), 3).unwrap();
    session.start("Eco Twin").unwrap();
    while !session.is_complete() {
        let outcome = session.submit_decision().unwrap();
        assert!(outcome.event.verdict.is_compliant());
        assert_eq!(outcome.delta.points, 20);
    }

    assert_eq!(session.total_score(), 200);
    let summary = session.summary();
    assert_eq!(summary.rounds_played, 10);
    assert_eq!(summary.compliant_rounds, 10);
    assert_eq!(summary.low_co2_rounds, 10);
    assert_eq!(summary.best_possible, 200);
}

#[test]
fn test_same_seed_replays_same_challenge() {
    let catalog = Arc::new(builtin_catalog().unwrap());
    let play = |seed: u64| {
        let mut session = Session::seeded(catalog.clone(), GameConfig::default(), seed).unwrap();
        session.start("767-300ER").unwrap();
        while !session.is_complete() {
            session.submit_decision().unwrap();
        }
        session.history().to_vec()
    };
    assert_eq!(play(11), play(11));
}

#[test]
fn test_outcome_route_matches_event() {
    let catalog = Arc::new(builtin_catalog().unwrap());
    let mut session = Session::seeded(catalog, GameConfig::default(), 5).unwrap();
    let first = session.start("777-300ER").unwrap().clone();

    let outcome = session.submit_decision().unwrap();
    assert_eq!(outcome.route, first);
    assert_eq!(outcome.event.route, first.pair());
    assert_eq!(outcome.impact.passengers, 200);
    assert_ne!(session.current_route(), None);
}

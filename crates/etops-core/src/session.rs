// SPDX-License-Identifier: MIT
// Copyright (c) 2026 StarTuz

use crate::catalog::{Aircraft, Catalog};
use crate::config::GameConfig;
use crate::evaluator::{EtopsEvaluator, Verdict};
use crate::impact::ImpactReport;
use crate::route::{Route, RouteGenerator, RoutePair};
use crate::scoring::{Co2Tier, ScoreDelta};
use crate::{EtopsError, ROUTES_PER_SESSION};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SessionState {
    NotStarted,
    InProgress,
    Complete,
}

/// Record of one scored round. Appended to the history and never rewritten.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreEvent {
    /// 1-based round number.
    pub route_index: usize,
    pub route: RoutePair,
    pub aircraft: String,
    pub distance_km: f64,
    pub verdict: Verdict,
    pub co2_tier: Co2Tier,
    pub delta: i32,
    pub cumulative_score: i32,
}

/// Everything the front end needs to report on a round just played.
#[derive(Debug, Clone, PartialEq)]
pub struct RoundOutcome {
    pub route: Route,
    pub delta: ScoreDelta,
    pub event: ScoreEvent,
    pub impact: ImpactReport,
    pub recommendations: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionSummary {
    pub rounds_played: usize,
    pub total_score: i32,
    pub best_possible: i32,
    pub compliant_rounds: usize,
    pub low_co2_rounds: usize,
    pub medium_co2_rounds: usize,
    pub high_co2_rounds: usize,
}

/// One player's ten-route challenge.
///
/// ```text
/// NotStarted --start--> InProgress --submit x10--> Complete
///      ^                                               |
///      +---------------------- reset ------------------+
/// ```
pub struct Session<R: Rng> {
    catalog: Arc<Catalog>,
    config: GameConfig,
    evaluator: EtopsEvaluator,
    generator: RouteGenerator<R>,
    state: SessionState,
    aircraft: Option<Aircraft>,
    history: Vec<ScoreEvent>,
    current_route: Option<Route>,
}

impl Session<StdRng> {
    pub fn seeded(
        catalog: Arc<Catalog>,
        config: GameConfig,
        seed: u64,
    ) -> Result<Self, EtopsError> {
        Self::new(catalog, config, StdRng::seed_from_u64(seed))
    }
}

impl<R: Rng> Session<R> {
    pub fn new(catalog: Arc<Catalog>, config: GameConfig, rng: R) -> Result<Self, EtopsError> {
        config.validate()?;
        let evaluator = EtopsEvaluator::new(config.etops)?;
        let generator = RouteGenerator::new(rng, config.routing, config.etops);
        Ok(Self {
            catalog,
            config,
            evaluator,
            generator,
            state: SessionState::NotStarted,
            aircraft: None,
            history: Vec::new(),
            current_route: None,
        })
    }

    /// Begins a challenge with the named aircraft and draws round 1.
    pub fn start(&mut self, aircraft_name: &str) -> Result<&Route, EtopsError> {
        if self.state != SessionState::NotStarted {
            log::warn!("start() called in state {:?}", self.state);
            return Err(EtopsError::InvalidState(format!(
                "cannot start a session that is {:?}",
                self.state
            )));
        }
        let aircraft = self.lookup_aircraft(aircraft_name)?;
        let route = self.generator.generate_route(&self.catalog, &[])?;

        log::info!(
            "Session started with {} (ETOPS {})",
            aircraft.name,
            aircraft.etops_minutes
        );
        self.aircraft = Some(aircraft);
        self.history.clear();
        self.state = SessionState::InProgress;
        Ok(&*self.current_route.insert(route))
    }

    /// Swaps the fleet aircraft used for the upcoming round.
    pub fn select_aircraft(&mut self, aircraft_name: &str) -> Result<&Aircraft, EtopsError> {
        if self.state != SessionState::InProgress {
            return Err(EtopsError::InvalidState(format!(
                "cannot change aircraft while {:?}",
                self.state
            )));
        }
        let aircraft = self.lookup_aircraft(aircraft_name)?;
        log::debug!("Aircraft changed to {}", aircraft.name);
        Ok(&*self.aircraft.insert(aircraft))
    }

    /// Flies the current route: evaluates ETOPS, scores it, records the
    /// event and either draws the next route or closes the session.
    ///
    /// Nothing is recorded if any step fails.
    pub fn submit_decision(&mut self) -> Result<RoundOutcome, EtopsError> {
        if self.state != SessionState::InProgress {
            log::warn!("submit_decision() called in state {:?}", self.state);
            return Err(EtopsError::InvalidState(format!(
                "no round to submit while {:?}",
                self.state
            )));
        }
        let (aircraft, route) = match (&self.aircraft, &self.current_route) {
            (Some(a), Some(r)) => (a, r),
            _ => {
                return Err(EtopsError::InvalidState(
                    "session in progress without an aircraft and route".to_string(),
                ))
            }
        };

        let verdict = self.evaluator.evaluate(aircraft, route)?;
        let tier = self.config.scoring.classify(aircraft, route);
        let delta = self.config.scoring.score(&verdict, tier);
        let impact = ImpactReport::compute(aircraft, route.distance_km, self.config.passengers);
        let recommendations = impact.recommendations(&verdict);

        let event = ScoreEvent {
            route_index: self.history.len() + 1,
            route: route.pair(),
            aircraft: aircraft.name.clone(),
            distance_km: route.distance_km,
            verdict,
            co2_tier: tier,
            delta: delta.points,
            cumulative_score: self.total_score() + delta.points,
        };

        let finished = event.route_index >= ROUTES_PER_SESSION;
        let next_route = if finished {
            None
        } else {
            let mut used = self.used_pairs();
            used.push(event.route.clone());
            Some(self.generator.generate_route(&self.catalog, &used)?)
        };

        log::debug!(
            "Round {} {}: {} -> {} pts (total {})",
            event.route_index,
            event.route,
            delta.rationale,
            delta.points,
            event.cumulative_score
        );

        let flown = route.clone();
        self.current_route = next_route;
        self.history.push(event.clone());
        if finished {
            self.state = SessionState::Complete;
            log::info!("Session complete with {} points", event.cumulative_score);
        }

        Ok(RoundOutcome {
            route: flown,
            delta,
            event,
            impact,
            recommendations,
        })
    }

    /// Abandons any progress and returns to `NotStarted`.
    pub fn reset(&mut self) {
        log::info!("Session reset from {:?}", self.state);
        self.state = SessionState::NotStarted;
        self.aircraft = None;
        self.history.clear();
        self.current_route = None;
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn is_complete(&self) -> bool {
        self.state == SessionState::Complete
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn aircraft(&self) -> Option<&Aircraft> {
        self.aircraft.as_ref()
    }

    pub fn current_route(&self) -> Option<&Route> {
        self.current_route.as_ref()
    }

    pub fn history(&self) -> &[ScoreEvent] {
        &self.history
    }

    /// Rounds scored so far.
    pub fn route_index(&self) -> usize {
        self.history.len()
    }

    /// 1-based number of the round waiting to be flown, if any.
    pub fn current_round(&self) -> Option<usize> {
        self.current_route.as_ref().map(|_| self.history.len() + 1)
    }

    pub fn total_score(&self) -> i32 {
        self.history.last().map_or(0, |e| e.cumulative_score)
    }

    pub fn summary(&self) -> SessionSummary {
        let count = |tier: Co2Tier| self.history.iter().filter(|e| e.co2_tier == tier).count();
        SessionSummary {
            rounds_played: self.history.len(),
            total_score: self.total_score(),
            best_possible: self.config.scoring.best_round() * ROUTES_PER_SESSION as i32,
            compliant_rounds: self
                .history
                .iter()
                .filter(|e| e.verdict.is_compliant())
                .count(),
            low_co2_rounds: count(Co2Tier::Low),
            medium_co2_rounds: count(Co2Tier::Medium),
            high_co2_rounds: count(Co2Tier::High),
        }
    }

    fn lookup_aircraft(&self, name: &str) -> Result<Aircraft, EtopsError> {
        self.catalog
            .find_aircraft(name)
            .cloned()
            .ok_or_else(|| EtopsError::InvalidInput(format!("unknown aircraft '{}'", name)))
    }

    fn used_pairs(&self) -> Vec<RoutePair> {
        self.history.iter().map(|e| e.route.clone()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::tests::{make_aircraft, make_airport};
    use crate::catalog::Region;

    fn small_catalog() -> Arc<Catalog> {
        Arc::new(
            Catalog::new(
                vec![make_aircraft("Short", 120, 10.0), make_aircraft("Long", 370, 10.0)],
                vec![
                    make_airport("AAA", 0.0, 0.0, Region::Europe),
                    make_airport("BBB", 5.0, 5.0, Region::Africa),
                    make_airport("CCC", 10.0, -5.0, Region::SouthAmerica),
                ],
            )
            .unwrap(),
        )
    }

    #[test]
    fn test_submit_before_start_fails() {
        let mut session = Session::seeded(small_catalog(), GameConfig::default(), 1).unwrap();
        assert!(matches!(
            session.submit_decision(),
            Err(EtopsError::InvalidState(_))
        ));
        assert_eq!(session.route_index(), 0);
    }

    #[test]
    fn test_start_unknown_aircraft() {
        let mut session = Session::seeded(small_catalog(), GameConfig::default(), 1).unwrap();
        assert!(matches!(
            session.start("Concorde"),
            Err(EtopsError::InvalidInput(_))
        ));
        assert_eq!(session.state(), SessionState::NotStarted);
    }

    #[test]
    fn test_double_start_fails() {
        let mut session = Session::seeded(small_catalog(), GameConfig::default(), 1).unwrap();
        session.start("Short").unwrap();
        assert!(matches!(
            session.start("Long"),
            Err(EtopsError::InvalidState(_))
        ));
        assert_eq!(session.aircraft().unwrap().name, "Short");
    }

    #[test]
    fn test_select_aircraft_between_rounds() {
        let mut session = Session::seeded(small_catalog(), GameConfig::default(), 1).unwrap();
        assert!(session.select_aircraft("Long").is_err());
        session.start("Short").unwrap();
        session.submit_decision().unwrap();
        session.select_aircraft("long").unwrap();
        let outcome = session.submit_decision().unwrap();
        assert_eq!(outcome.event.aircraft, "Long");
        assert_eq!(session.history()[0].aircraft, "Short");
    }

    #[test]
    fn test_current_round_tracks_history() {
        let mut session = Session::seeded(small_catalog(), GameConfig::default(), 9).unwrap();
        assert_eq!(session.current_round(), None);
        session.start("Long").unwrap();
        assert_eq!(session.current_round(), Some(1));
        session.submit_decision().unwrap();
        assert_eq!(session.current_round(), Some(2));
        assert_eq!(session.route_index(), 1);
    }

    #[test]
    fn test_reset_returns_to_not_started() {
        let mut session = Session::seeded(small_catalog(), GameConfig::default(), 2).unwrap();
        session.start("Long").unwrap();
        session.submit_decision().unwrap();
        session.reset();
        assert_eq!(session.state(), SessionState::NotStarted);
        assert!(session.history().is_empty());
        assert!(session.current_route().is_none());
        assert_eq!(session.total_score(), 0);
        session.start("Short").unwrap();
        assert_eq!(session.state(), SessionState::InProgress);
    }

    #[test]
    fn test_invalid_config_rejected() {
        let mut config = GameConfig::default();
        config.etops.single_engine_speed_kmh = 0.0;
        assert!(matches!(
            Session::seeded(small_catalog(), config, 1),
            Err(EtopsError::Configuration(_))
        ));
    }
}

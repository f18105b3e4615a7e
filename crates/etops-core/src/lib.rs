// SPDX-License-Identifier: MIT
// Copyright (c) 2026 StarTuz

pub mod catalog;
pub mod config;
pub mod evaluator;
pub mod geo;
pub mod impact;
pub mod loader;
pub mod route;
pub mod scoring;
pub mod session;

use thiserror::Error;

pub use catalog::{Aircraft, Airport, Catalog, Region};
pub use config::GameConfig;
pub use evaluator::{evaluate, Compliance, EtopsEvaluator, EtopsPolicy, Verdict};
pub use route::{Route, RouteGenerator, RoutePair, RoutePolicy};
pub use scoring::{classify_co2, score, Co2Tier, ScoreDelta, ScoringPolicy};
pub use session::{RoundOutcome, ScoreEvent, Session, SessionState, SessionSummary};

/// Number of routes flown in one challenge session.
pub const ROUTES_PER_SESSION: usize = 10;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum EtopsError {
    #[error("Configuration error: {0}")]
    Configuration(String),
    #[error("Invalid state: {0}")]
    InvalidState(String),
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

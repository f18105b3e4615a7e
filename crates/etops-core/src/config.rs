// SPDX-License-Identifier: MIT
// Copyright (c) 2026 StarTuz

use crate::evaluator::EtopsPolicy;
use crate::route::RoutePolicy;
use crate::scoring::ScoringPolicy;
use crate::EtopsError;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Tunable rules for a challenge. Every field has a default, so a config
/// file only needs to list what it changes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub etops: EtopsPolicy,
    pub scoring: ScoringPolicy,
    pub routing: RoutePolicy,
    /// Passengers booked on every leg, for the impact report.
    pub passengers: u32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            etops: EtopsPolicy::default(),
            scoring: ScoringPolicy::default(),
            routing: RoutePolicy::default(),
            passengers: 200,
        }
    }
}

impl GameConfig {
    pub fn validate(&self) -> Result<(), EtopsError> {
        self.etops.validate()?;
        self.scoring.validate()?;
        Ok(())
    }

    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config {}", path.display()))?;
        let config: GameConfig = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse config {}", path.display()))?;
        config.validate()?;
        log::debug!("Loaded game config from {:?}", path);
        Ok(config)
    }

    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                fs::create_dir_all(parent).context("Failed to create config directory")?;
            }
        }
        let content = serde_json::to_string_pretty(self).context("Failed to serialize config")?;
        fs::write(path, content).context("Failed to write config")
    }
}

//! Named weapon profiles run through all three stages, read from TOML documents.
//!
//! A document holds either a single scenario
//!
//! ```toml
//! name = "bolt rifle"
//!
//! [hit]
//! attacks = 2
//! required_roll = 3
//! reroll = "ONES"
//!
//! [wound]
//! strength = 4
//!
//! [damage]
//! damage_per_wound = 1
//! defender_save = 3
//! ```
//!
//! or several `[[scenario]]` tables of the same shape, which are evaluated side by side.

use std::fs;
use std::path::Path;

use rayon::prelude::*;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::damage::{DamageProfile, DamageStage};
use crate::error::{CombatError, CombatResult};
use crate::hit::{HitProfile, HitStage};
use crate::toughness::ToughnessMap;
use crate::wound::{WoundProfile, WoundStage};

fn parse_toml<T: DeserializeOwned>(content: &str) -> CombatResult<T> {
    toml::from_str(content).map_err(|e| CombatError::Config(e.to_string()))
}

#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub struct Scenario {
    pub name: String,
    pub hit: HitProfile,
    pub wound: WoundProfile,
    pub damage: DamageProfile,
}

/// The expected outcome of one scenario. Per-toughness values follow the toughness sweep.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ScenarioReport {
    pub name: String,
    pub total_hits: f64,
    pub hit_mortal_wounds: f64,
    pub mortal_wounds: ToughnessMap<f64>,
    pub total_damage: ToughnessMap<f64>,
}

impl Scenario {

    pub fn from_toml_str(content: &str) -> CombatResult<Scenario> {
        parse_toml(content)
    }

    /// Feeds the total hits of the hit stage into the wound stage and both into the damage
    /// stage.
    pub fn evaluate(&self) -> CombatResult<ScenarioReport> {
        let hit = HitStage::new(&self.hit)?;
        let wound = WoundStage::new(hit.total_hits(), &self.wound)?;
        let damage = DamageStage::new(&hit, &wound, &self.damage)?;

        let report = ScenarioReport {
            name: self.name.clone(),
            total_hits: hit.total_hits(),
            hit_mortal_wounds: hit.total_mortal_wounds(),
            mortal_wounds: damage.mortal_wounds(),
            total_damage: damage.total_damage(),
        };

        debug!(
            name = %report.name,
            total_hits = report.total_hits,
            total_damage = ?report.total_damage,
            "evaluated scenario"
        );

        Ok(report)
    }
}

#[derive(Clone, Debug, Default, Deserialize, PartialEq, Serialize)]
pub struct ScenarioSet {
    #[serde(rename = "scenario", default)]
    pub scenarios: Vec<Scenario>,
}

impl ScenarioSet {

    pub fn from_toml_str(content: &str) -> CombatResult<ScenarioSet> {
        parse_toml(content)
    }

    pub fn load(path: &Path) -> CombatResult<ScenarioSet> {
        let content = fs::read_to_string(path)
            .map_err(|e| CombatError::Config(format!("{}: {e}", path.display())))?;

        ScenarioSet::from_toml_str(&content)
    }

    /// Evaluates all scenarios in parallel. Reports are returned in the order of the scenarios.
    /// Fails with the error of the first invalid scenario, if any.
    pub fn evaluate_all(&self) -> CombatResult<Vec<ScenarioReport>> {
        debug!(count = self.scenarios.len(), "evaluating scenarios");

        self.scenarios
            .par_iter()
            .map(Scenario::evaluate)
            .collect()
    }
}

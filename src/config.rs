//! Planner tunables.
//!
//! Every knob the planner reads each cycle lives in [`PlannerConfig`]. Values
//! come from the defaults below, optionally overlaid by a JSON file, and can
//! be overridden one at a time through `setoption`.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

/// Errors from loading or overriding configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse config JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("unknown option '{0}'")]
    UnknownOption(String),

    #[error("invalid value '{value}' for option '{name}'")]
    InvalidValue { name: String, value: String },

    #[error("{name} must be within [0, 1], got {value}")]
    OutOfRange { name: &'static str, value: f64 },
}

/// Tunables for one planner instance.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct PlannerConfig {
    /// Columns kept on each side of the home base when building the matrix.
    pub window_half_width: usize,
    /// Seams extracted per cycle.
    pub seam_count: usize,
    /// Cargo share of capacity above which a unit heads for a base.
    pub retreat_fraction: f64,
    /// Cell share of capacity below which a unit looks for a new cell.
    pub depletion_fraction: f64,
    /// Seam cells holding less than this are never targeted.
    pub min_safe_energy: u32,
    /// Chance a relocating unit ignores seams and heads home.
    pub exploration_probability: f64,
    /// Maximum cargo a unit can carry.
    pub unit_capacity: u32,
    pub unit_cost: u32,
    pub base_cost: u32,
    pub max_units: usize,
    pub max_aux_bases: usize,
    /// Auxiliary bases are only built after this turn.
    pub start_base_turn: u32,
    /// Share of `max_turns` after which nothing more is built.
    pub stop_building_fraction: f64,
    pub max_turns: u32,
    /// Wall-clock budget for one cycle, in milliseconds.
    pub turn_budget_ms: u64,
}

impl Default for PlannerConfig {
    fn default() -> Self {
        PlannerConfig {
            window_half_width: 8,
            seam_count: 4,
            retreat_fraction: 0.9,
            depletion_fraction: 0.1,
            min_safe_energy: 100,
            exploration_probability: 0.05,
            unit_capacity: 1000,
            unit_cost: 1000,
            base_cost: 4000,
            max_units: 12,
            max_aux_bases: 1,
            start_base_turn: 100,
            stop_building_fraction: 0.6,
            max_turns: 400,
            turn_budget_ms: 2000,
        }
    }
}

/// Loads a config from a JSON file. Missing fields keep their defaults.
pub fn load_config(path: &Path) -> Result<PlannerConfig, ConfigError> {
    let data = fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    load_config_from_str(&data)
}

/// Loads a config from a JSON string. Missing fields keep their defaults.
pub fn load_config_from_str(json: &str) -> Result<PlannerConfig, ConfigError> {
    let config: PlannerConfig = serde_json::from_str(json)?;
    config.validate()?;
    Ok(config)
}

fn parse_value<T: std::str::FromStr>(name: &str, value: &str) -> Result<T, ConfigError> {
    value.trim().parse::<T>().map_err(|_| ConfigError::InvalidValue {
        name: name.to_string(),
        value: value.to_string(),
    })
}

impl PlannerConfig {
    /// Checks that every fraction and probability lies in `[0, 1]`.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let fractions = [
            ("retreat_fraction", self.retreat_fraction),
            ("depletion_fraction", self.depletion_fraction),
            ("exploration_probability", self.exploration_probability),
            ("stop_building_fraction", self.stop_building_fraction),
        ];
        for (name, value) in fractions {
            if !(0.0..=1.0).contains(&value) {
                return Err(ConfigError::OutOfRange { name, value });
            }
        }
        Ok(())
    }

    /// Applies one `setoption` override. The config is unchanged on error.
    pub fn set_option(&mut self, name: &str, value: &str) -> Result<(), ConfigError> {
        let mut next = self.clone();
        match name {
            "WindowHalfWidth" => next.window_half_width = parse_value(name, value)?,
            "SeamCount" => next.seam_count = parse_value(name, value)?,
            "RetreatFraction" => next.retreat_fraction = parse_value(name, value)?,
            "DepletionFraction" => next.depletion_fraction = parse_value(name, value)?,
            "MinSafeEnergy" => next.min_safe_energy = parse_value(name, value)?,
            "ExplorationProbability" => next.exploration_probability = parse_value(name, value)?,
            "UnitCapacity" => next.unit_capacity = parse_value(name, value)?,
            "UnitCost" => next.unit_cost = parse_value(name, value)?,
            "BaseCost" => next.base_cost = parse_value(name, value)?,
            "MaxUnits" => next.max_units = parse_value(name, value)?,
            "MaxAuxBases" => next.max_aux_bases = parse_value(name, value)?,
            "StartBaseTurn" => next.start_base_turn = parse_value(name, value)?,
            "StopBuildingFraction" => next.stop_building_fraction = parse_value(name, value)?,
            "MaxTurns" => next.max_turns = parse_value(name, value)?,
            "TurnBudget" => next.turn_budget_ms = parse_value(name, value)?,
            other => return Err(ConfigError::UnknownOption(other.to_string())),
        }
        next.validate()?;
        *self = next;
        Ok(())
    }

    /// Cargo above which a unit retreats.
    pub fn retreat_cargo(&self) -> f64 {
        self.unit_capacity as f64 * self.retreat_fraction
    }

    /// Cell energy below which a unit relocates.
    pub fn depletion_energy(&self) -> f64 {
        self.unit_capacity as f64 * self.depletion_fraction
    }

    /// Last turn (exclusive) on which spawning and base building happen.
    pub fn stop_building_turn(&self) -> f64 {
        self.max_turns as f64 * self.stop_building_fraction
    }
}

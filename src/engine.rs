//! Engine state management.
//!
//! Holds the current snapshot, the planner configuration and the random
//! source between host commands, and runs one planning cycle for `go`.

use std::io::{self, Write};
use std::path::Path;

use rand::rngs::SmallRng;
use rand::SeedableRng;
use tracing::warn;

use crate::board::Snapshot;
use crate::config::{load_config, ConfigError, PlannerConfig};
use crate::planner::plan_cycle;
use crate::protocol::commands::format_commands;
use crate::protocol::parser::GoParams;
use crate::protocol::snapshot::{parse_snapshot, SnapshotError};

/// Options advertised during the handshake, with their types.
const ADVERTISED_OPTIONS: &[(&str, &str)] = &[
    ("WindowHalfWidth", "spin"),
    ("SeamCount", "spin"),
    ("RetreatFraction", "float"),
    ("DepletionFraction", "float"),
    ("MinSafeEnergy", "spin"),
    ("ExplorationProbability", "float"),
    ("UnitCapacity", "spin"),
    ("UnitCost", "spin"),
    ("BaseCost", "spin"),
    ("MaxUnits", "spin"),
    ("MaxAuxBases", "spin"),
    ("StartBaseTurn", "spin"),
    ("StopBuildingFraction", "float"),
    ("MaxTurns", "spin"),
    ("TurnBudget", "spin"),
    ("ConfigFile", "string"),
    ("Seed", "spin"),
    ("ResetDefaults", "button"),
];

/// Holds the mutable state of the engine between commands.
pub struct Engine {
    pub snapshot: Option<Snapshot>,
    pub config: PlannerConfig,
    rng: SmallRng,
}

impl Default for Engine {
    fn default() -> Self {
        Engine::new()
    }
}

impl Engine {
    /// Creates an engine with the default configuration and no snapshot.
    pub fn new() -> Self {
        Engine {
            snapshot: None,
            config: PlannerConfig::default(),
            rng: SmallRng::from_entropy(),
        }
    }

    /// Creates an engine with a fixed configuration and seed.
    pub fn with_config(config: PlannerConfig, seed: u64) -> Self {
        Engine {
            snapshot: None,
            config,
            rng: SmallRng::seed_from_u64(seed),
        }
    }

    /// Drops the current snapshot. Configuration survives.
    pub fn new_game(&mut self) {
        self.snapshot = None;
    }

    /// Sets the current snapshot from its notation.
    pub fn set_position(&mut self, notation: &str) -> Result<(), SnapshotError> {
        self.snapshot = Some(parse_snapshot(notation)?);
        Ok(())
    }

    /// Applies a `setoption`. Besides the tunables, accepts `ConfigFile`
    /// (load a JSON config), `Seed` (reseed randomness) and `ResetDefaults`.
    pub fn set_option(&mut self, name: &str, value: Option<&str>) -> Result<(), ConfigError> {
        let value = value.unwrap_or("");
        match name {
            "ConfigFile" => {
                self.config = load_config(Path::new(value))?;
            }
            "Seed" => {
                let seed = value.trim().parse::<u64>().map_err(|_| ConfigError::InvalidValue {
                    name: name.to_string(),
                    value: value.to_string(),
                })?;
                self.rng = SmallRng::seed_from_u64(seed);
            }
            "ResetDefaults" => {
                self.config = PlannerConfig::default();
            }
            _ => self.config.set_option(name, value)?,
        }
        Ok(())
    }

    /// Writes the handshake: id lines, options, then `hellook`.
    pub fn handle_hello<W: Write>(&self, out: &mut W) -> io::Result<()> {
        writeln!(out, "id name seamline")?;
        writeln!(out, "id author seamline")?;
        for (name, kind) in ADVERTISED_OPTIONS {
            writeln!(out, "option name {} type {}", name, kind)?;
        }
        writeln!(out, "hellook")?;
        out.flush()
    }

    pub fn handle_isready<W: Write>(&self, out: &mut W) -> io::Result<()> {
        writeln!(out, "readyok")?;
        out.flush()
    }

    /// Plans one cycle and writes `commands <batch>`. Without a snapshot the
    /// batch is empty.
    pub fn handle_go<W: Write>(&mut self, params: &GoParams, out: &mut W) -> io::Result<()> {
        let Some(snapshot) = &self.snapshot else {
            warn!("go: no position set");
            writeln!(out, "commands -")?;
            return out.flush();
        };

        if let Some(seed) = params.seed {
            self.rng = SmallRng::seed_from_u64(seed);
        }
        let mut config = self.config.clone();
        if let Some(ms) = params.movetime {
            config.turn_budget_ms = ms;
        }

        let plan = plan_cycle(snapshot, &config, &mut self.rng);
        writeln!(out, "commands {}", format_commands(&plan.commands))?;
        out.flush()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::protocol::commands::parse_commands;

    const SAMPLE: &str = "1/5x1/5,5,100,5,5/2.0/-/1@0.0:0/-/0";

    fn go_output(engine: &mut Engine, params: &GoParams) -> String {
        let mut output = Vec::new();
        engine.handle_go(params, &mut output).unwrap();
        String::from_utf8(output).unwrap()
    }

    #[test]
    fn new_engine_has_no_snapshot() {
        let engine = Engine::new();
        assert!(engine.snapshot.is_none());
        assert_eq!(engine.config, PlannerConfig::default());
    }

    #[test]
    fn new_game_keeps_config() {
        let mut engine = Engine::new();
        engine.set_position(SAMPLE).unwrap();
        engine.set_option("SeamCount", Some("2")).unwrap();
        engine.new_game();
        assert!(engine.snapshot.is_none());
        assert_eq!(engine.config.seam_count, 2);
    }

    #[test]
    fn set_position_invalid() {
        let mut engine = Engine::new();
        assert!(engine.set_position("garbage").is_err());
        assert!(engine.snapshot.is_none());
    }

    #[test]
    fn set_option_special_names() {
        let mut engine = Engine::new();
        engine.set_option("MinSafeEnergy", Some("25")).unwrap();
        assert_eq!(engine.config.min_safe_energy, 25);
        engine.set_option("ResetDefaults", None).unwrap();
        assert_eq!(engine.config, PlannerConfig::default());
        assert!(engine.set_option("Seed", Some("abc")).is_err());
        assert!(engine.set_option("Seed", Some("42")).is_ok());
        assert!(matches!(
            engine.set_option("ConfigFile", Some("/nonexistent/seamline.json")),
            Err(ConfigError::Io { .. })
        ));
    }

    #[test]
    fn handle_go_routes_toward_peak() {
        let config = PlannerConfig {
            window_half_width: 2,
            seam_count: 1,
            min_safe_energy: 50,
            exploration_probability: 0.0,
            ..PlannerConfig::default()
        };
        let mut engine = Engine::with_config(config, 1);
        engine.set_position(SAMPLE).unwrap();
        let output = go_output(&mut engine, &GoParams::default());
        let line = output.lines().find(|l| l.starts_with("commands ")).unwrap();
        let batch = parse_commands(line.strip_prefix("commands ").unwrap()).unwrap();
        assert_eq!(format_commands(&batch), "m 1 e");
    }

    #[test]
    fn handle_go_without_position_is_empty_batch() {
        let mut engine = Engine::new();
        assert_eq!(go_output(&mut engine, &GoParams::default()).trim(), "commands -");
    }

    #[test]
    fn handle_go_is_repeatable_with_seed() {
        let mut engine = Engine::new();
        engine
            .set_position("1/6x4/0,0,0,0,0,0;0,300,0,0,200,0;0,0,400,0,0,0;0,0,0,0,0,900/3.1/-/1@0.0:0,2@5.0:0,3@1.3:0/-/0")
            .unwrap();
        let params = GoParams { movetime: None, seed: Some(11) };
        let first = go_output(&mut engine, &params);
        let second = go_output(&mut engine, &params);
        assert_eq!(first, second);
    }

    #[test]
    fn handle_hello_outputs_handshake() {
        let engine = Engine::new();
        let mut output = Vec::new();
        engine.handle_hello(&mut output).unwrap();
        let output = String::from_utf8(output).unwrap();
        assert!(output.contains("id name seamline"));
        assert!(output.contains("option name SeamCount type spin"));
        assert_eq!(output.lines().last(), Some("hellook"));
    }

    #[test]
    fn handle_isready_outputs_readyok() {
        let engine = Engine::new();
        let mut output = Vec::new();
        engine.handle_isready(&mut output).unwrap();
        assert_eq!(String::from_utf8(output).unwrap().trim(), "readyok");
    }
}

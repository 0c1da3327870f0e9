//! Headless single-player games for exercising the planner.
//!
//! A `World` holds the authoritative game state. Each turn it is exported as
//! a `Snapshot`, planned with `plan_cycle`, and the resulting batch applied
//! under simplified harvesting rules. Independent games run in parallel on a
//! rayon pool and are recorded as JSON lines.

use std::collections::{HashMap, HashSet};
use std::io::Write;
use std::sync::atomic::{AtomicUsize, Ordering};

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::Serialize;
use tracing::{debug, info};

use crate::board::{Command, Direction, GameMap, Position, Snapshot, Unit, UnitId};
use crate::config::PlannerConfig;
use crate::planner::plan_cycle;
use crate::protocol::commands::format_commands;

/// Largest quantity a generated cell can hold.
pub const MAX_CELL_HALITE: u32 = 1000;

/// Errors from running or recording simulated games.
#[derive(Debug, thiserror::Error)]
pub enum SimError {
    #[error("failed to build thread pool: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),

    #[error("failed to write records: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to serialize record: {0}")]
    Json(#[from] serde_json::Error),
}

/// Configuration for a batch of simulated games.
#[derive(Debug, Clone)]
pub struct SimConfig {
    pub num_games: usize,
    pub width: usize,
    pub height: usize,
    /// Bank at turn one.
    pub initial_bank: u32,
    /// Worker threads; 1 plays games sequentially.
    pub threads: usize,
    /// Base seed (0 = use entropy). Game `i` uses `seed + i`.
    pub seed: u64,
    /// Keep a per-turn log in each record.
    pub record_turns: bool,
    /// Planner settings; `max_turns` is also the game length.
    pub planner: PlannerConfig,
}

impl Default for SimConfig {
    fn default() -> Self {
        SimConfig {
            num_games: 4,
            width: 32,
            height: 32,
            initial_bank: 5000,
            threads: 4,
            seed: 0,
            record_turns: false,
            planner: PlannerConfig::default(),
        }
    }
}

/// Running totals for one game.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct GameStats {
    pub halite_mined: u64,
    pub halite_deposited: u64,
    pub halite_spent: u64,
    pub units_spawned: u32,
    pub bases_built: u32,
    /// Cells on which two or more own units ended a turn.
    pub collisions: u32,
}

/// One turn of a recorded game.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TurnRecord {
    pub turn: u32,
    pub bank: u32,
    pub units: usize,
    /// The submitted batch in command notation.
    pub commands: String,
}

/// A complete simulated game.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GameRecord {
    pub game_id: usize,
    pub seed: u64,
    pub width: usize,
    pub height: usize,
    pub turns: u32,
    pub initial_halite: u64,
    pub final_bank: u32,
    pub final_units: usize,
    pub stats: GameStats,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub log: Vec<TurnRecord>,
}

/// Authoritative state of a running game.
#[derive(Debug, Clone)]
pub struct World {
    pub turn: u32,
    pub map: GameMap,
    pub home: Position,
    pub aux_bases: Vec<Position>,
    pub units: Vec<Unit>,
    pub bank: u32,
    pub stats: GameStats,
    next_id: u32,
}

impl World {
    pub fn new(map: GameMap, home: Position, bank: u32) -> Self {
        World {
            turn: 0,
            map,
            home,
            aux_bases: Vec::new(),
            units: Vec::new(),
            bank,
            stats: GameStats::default(),
            next_id: 1,
        }
    }

    /// Adds a unit with the next free id and returns that id.
    pub fn add_unit(&mut self, position: Position, cargo: u32) -> UnitId {
        let unit = Unit::new(self.next_id, self.map.normalize(position), cargo);
        self.next_id += 1;
        self.units.push(unit);
        unit.id
    }

    fn is_base(&self, pos: Position) -> bool {
        pos == self.home || self.aux_bases.contains(&pos)
    }

    /// The planner's view of the current turn.
    pub fn snapshot(&self) -> Snapshot {
        let mut snapshot = Snapshot::new(self.turn, self.map.clone(), self.home);
        for &base in &self.aux_bases {
            snapshot.add_aux_base(base);
        }
        for &unit in &self.units {
            if !snapshot.place_unit(unit) {
                debug!(unit = %unit.id, "unit overlaps another in snapshot export");
            }
        }
        snapshot.bank = self.bank;
        snapshot
    }

    /// Applies one command batch: conversions, then moves and mining, then
    /// spawning, then collisions, then deposits.
    pub fn apply(&mut self, commands: &[Command], config: &PlannerConfig) {
        let mut moves: HashMap<UnitId, Direction> = HashMap::new();
        let mut spawn = false;
        for command in commands {
            match *command {
                Command::ConvertToBase { unit } => self.convert(unit, config),
                Command::Move { unit, direction } => {
                    moves.insert(unit, direction);
                }
                Command::Spawn => spawn = true,
            }
        }

        let map = &mut self.map;
        let stats = &mut self.stats;
        for unit in &mut self.units {
            let direction = moves.get(&unit.id).copied().unwrap_or(Direction::Still);
            let cost = map.halite(unit.position) / 10;
            if direction != Direction::Still && unit.cargo >= cost {
                unit.cargo -= cost;
                unit.position = map.normalize(unit.position.offset(direction));
                continue;
            }
            let here = map.halite(unit.position);
            let mined = here.div_ceil(4).min(config.unit_capacity.saturating_sub(unit.cargo));
            unit.cargo += mined;
            map.set_halite(unit.position, here - mined);
            stats.halite_mined += mined as u64;
        }

        if spawn && self.bank >= config.unit_cost {
            self.bank -= config.unit_cost;
            self.stats.halite_spent += config.unit_cost as u64;
            self.stats.units_spawned += 1;
            self.add_unit(self.home, 0);
        }

        self.resolve_collisions();

        for i in 0..self.units.len() {
            let unit = self.units[i];
            if unit.cargo > 0 && self.is_base(unit.position) {
                self.bank = self.bank.saturating_add(unit.cargo);
                self.stats.halite_deposited += unit.cargo as u64;
                self.units[i].cargo = 0;
            }
        }
    }

    /// Builds an auxiliary base under `id` if the bank can cover the cost
    /// left after the unit's cargo and the cell's halite.
    fn convert(&mut self, id: UnitId, config: &PlannerConfig) {
        let Some(index) = self.units.iter().position(|u| u.id == id) else {
            return;
        };
        let unit = self.units[index];
        if self.is_base(unit.position) {
            return;
        }
        let cost = config
            .base_cost
            .saturating_sub(unit.cargo.saturating_add(self.map.halite(unit.position)));
        if self.bank < cost {
            return;
        }
        self.bank -= cost;
        self.stats.halite_spent += cost as u64;
        self.stats.bases_built += 1;
        self.aux_bases.push(unit.position);
        self.map.set_halite(unit.position, 0);
        self.units.remove(index);
    }

    /// Destroys every unit sharing a cell with another, dropping its cargo
    /// onto that cell.
    fn resolve_collisions(&mut self) {
        let mut counts: HashMap<Position, usize> = HashMap::new();
        for unit in &self.units {
            *counts.entry(unit.position).or_insert(0) += 1;
        }
        let crowded: HashSet<Position> = counts
            .into_iter()
            .filter(|&(_, n)| n > 1)
            .map(|(pos, _)| pos)
            .collect();
        if crowded.is_empty() {
            return;
        }

        self.stats.collisions += crowded.len() as u32;
        for unit in self.units.iter().filter(|u| crowded.contains(&u.position)) {
            let dropped = self.map.halite(unit.position).saturating_add(unit.cargo);
            self.map.set_halite(unit.position, dropped);
        }
        self.units.retain(|u| !crowded.contains(&u.position));
    }
}

/// Generates a map of scattered low halite with a few rich hotspots.
pub fn generate_map(width: usize, height: usize, rng: &mut impl Rng) -> GameMap {
    let mut map = GameMap::new(width, height);
    if map.is_empty() {
        return map;
    }

    let hotspot_count = (width * height / 64).max(1);
    let hotspots: Vec<(Position, u32)> = (0..hotspot_count)
        .map(|_| {
            let pos = Position::new(rng.gen_range(0..width as i32), rng.gen_range(0..height as i32));
            (pos, rng.gen_range(300..=MAX_CELL_HALITE))
        })
        .collect();
    let radius = (width.min(height) / 4).max(1) as u32;

    for y in 0..height as i32 {
        for x in 0..width as i32 {
            let pos = Position::new(x, y);
            let mut halite = rng.gen_range(0..=MAX_CELL_HALITE / 10);
            for &(center, peak) in &hotspots {
                let d = map.distance(pos, center);
                if d < radius {
                    halite += peak * (radius - d) / radius;
                }
            }
            map.set_halite(pos, halite.min(MAX_CELL_HALITE));
        }
    }
    map
}

/// Plays one game from `seed` for `config.planner.max_turns` turns.
pub fn play_game(config: &SimConfig, game_id: usize, seed: u64) -> GameRecord {
    let mut rng = StdRng::seed_from_u64(seed);
    let map = generate_map(config.width, config.height, &mut rng);
    let home = Position::new(config.width as i32 / 2, config.height as i32 / 2);
    let mut world = World::new(map, home, config.initial_bank);
    let initial_halite = world.map.total_halite();
    let mut log = Vec::new();

    for turn in 1..=config.planner.max_turns {
        world.turn = turn;
        let snapshot = world.snapshot();
        let plan = plan_cycle(&snapshot, &config.planner, &mut rng);
        if config.record_turns {
            log.push(TurnRecord {
                turn,
                bank: world.bank,
                units: world.units.len(),
                commands: format_commands(&plan.commands),
            });
        }
        world.apply(&plan.commands, &config.planner);
    }

    debug!(
        game_id,
        seed,
        bank = world.bank,
        units = world.units.len(),
        collisions = world.stats.collisions,
        "game finished"
    );

    GameRecord {
        game_id,
        seed,
        width: config.width,
        height: config.height,
        turns: config.planner.max_turns,
        initial_halite,
        final_bank: world.bank,
        final_units: world.units.len(),
        stats: world.stats,
        log,
    }
}

/// Plays `config.num_games` games, in parallel when `config.threads > 1`.
/// Records come back ordered by game id.
pub fn play_games(config: &SimConfig) -> Result<Vec<GameRecord>, SimError> {
    let base_seed = if config.seed != 0 {
        config.seed
    } else {
        rand::thread_rng().gen()
    };
    let completed = AtomicUsize::new(0);
    let run = |i: usize| {
        let game = play_game(config, i, base_seed.wrapping_add(i as u64));
        let n = completed.fetch_add(1, Ordering::Relaxed) + 1;
        info!(
            "game {}/{}: bank {}, {} units, {} collisions",
            n, config.num_games, game.final_bank, game.final_units, game.stats.collisions
        );
        game
    };

    if config.threads <= 1 {
        return Ok((0..config.num_games).map(run).collect());
    }

    use rayon::prelude::*;
    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(config.threads)
        .build()?;
    Ok(pool.install(|| (0..config.num_games).into_par_iter().map(run).collect()))
}

/// Writes game records as JSONL (one JSON object per game, one per line).
pub fn write_jsonl<W: Write>(games: &[GameRecord], out: &mut W) -> Result<(), SimError> {
    for game in games {
        serde_json::to_writer(&mut *out, game)?;
        writeln!(out)?;
    }
    out.flush()?;
    Ok(())
}

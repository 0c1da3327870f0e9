//! One planning cycle, end to end.
//!
//! Snapshot -> energy matrix around home -> K diverse seams -> sequential
//! routing with occupancy booking -> spending decisions -> command batch.

use std::time::{Duration, Instant};

use tracing::{info, warn};

use crate::board::{Command, Direction, Snapshot};
use crate::config::PlannerConfig;
use crate::economy;
use crate::random::UniformSource;
use crate::route::{RoutedMove, UnitRouter};
use crate::seam::{EnergyMatrix, SeamSet};

/// Everything one cycle produced.
#[derive(Debug, Clone)]
pub struct CyclePlan {
    pub seams: SeamSet,
    /// One routed move per unit that was routed, in snapshot order.
    pub moves: Vec<RoutedMove>,
    /// The batch to submit: conversion, then non-still moves, then spawn.
    pub commands: Vec<Command>,
    pub elapsed: Duration,
}

/// Plans one cycle for `snapshot`.
pub fn plan_cycle(snapshot: &Snapshot, config: &PlannerConfig, rng: &mut impl UniformSource) -> CyclePlan {
    let start = Instant::now();

    let matrix = EnergyMatrix::from_map(&snapshot.map, snapshot.home.x, config.window_half_width);
    let seams = SeamSet::build(&matrix, config.seam_count);

    let mut commands = Vec::new();
    let mut bank = snapshot.bank;

    let converter = economy::base_converter(snapshot, config);
    if let Some(unit) = converter {
        commands.push(Command::ConvertToBase { unit });
        bank = bank.saturating_sub(config.base_cost);
    }

    let (moves, home_free) = {
        let mut router = UnitRouter::new(snapshot, &seams, config);
        let routed = snapshot.units.iter().filter(|u| Some(u.id) != converter);
        let moves = router.route_all(routed, rng);
        (moves, !router.book().is_occupied(snapshot.home))
    };

    commands.extend(
        moves
            .iter()
            .filter(|m| m.assignment.direction != Direction::Still)
            .map(|m| Command::Move {
                unit: m.assignment.unit,
                direction: m.assignment.direction,
            }),
    );

    if economy::should_spawn(snapshot, config, bank, home_free) {
        commands.push(Command::Spawn);
    }

    let elapsed = start.elapsed();
    info!(
        turn = snapshot.turn,
        units = snapshot.units.len(),
        matrix_cols = matrix.cols(),
        best_seam = seams.best().map_or(0, |s| s.value()),
        commands = commands.len(),
        elapsed_ms = elapsed.as_millis() as u64,
        "planned cycle"
    );
    if elapsed > Duration::from_millis(config.turn_budget_ms) {
        warn!(
            turn = snapshot.turn,
            elapsed_ms = elapsed.as_millis() as u64,
            budget_ms = config.turn_budget_ms,
            "cycle exceeded its time budget"
        );
    }

    CyclePlan { seams, moves, commands, elapsed }
}

//! Spending decisions: spawning units and building auxiliary bases.
//!
//! These are threshold checks against the config, made once per cycle
//! around routing. They never look at seams.

use crate::board::{Snapshot, UnitId};
use crate::config::PlannerConfig;

/// True while the game is early enough to keep spending.
fn building_window_open(snapshot: &Snapshot, config: &PlannerConfig) -> bool {
    (snapshot.turn as f64) < config.stop_building_turn()
}

/// Picks the unit to convert into an auxiliary base this cycle, if any.
///
/// Converts the unit farthest from home once the base-building window is
/// open, the bank covers the cost, and the base cap is not reached. Units
/// standing on a base are never picked.
pub fn base_converter(snapshot: &Snapshot, config: &PlannerConfig) -> Option<UnitId> {
    if snapshot.turn <= config.start_base_turn
        || !building_window_open(snapshot, config)
        || snapshot.bank < config.base_cost
        || snapshot.aux_bases.len() >= config.max_aux_bases
    {
        return None;
    }

    let mut best: Option<(u32, UnitId)> = None;
    for unit in &snapshot.units {
        if snapshot.is_base(unit.position) {
            continue;
        }
        let d = snapshot.map.distance(snapshot.home, unit.position);
        if best.map_or(true, |(bd, _)| d > bd) {
            best = Some((d, unit.id));
        }
    }
    best.map(|(_, id)| id)
}

/// Decides whether to spawn a unit at home this cycle.
///
/// `bank` is what is left after any conversion this cycle; `home_free` is
/// whether the home cell is still unbooked after routing.
pub fn should_spawn(snapshot: &Snapshot, config: &PlannerConfig, bank: u32, home_free: bool) -> bool {
    building_window_open(snapshot, config)
        && bank >= config.unit_cost
        && snapshot.units.len() < config.max_units
        && home_free
}

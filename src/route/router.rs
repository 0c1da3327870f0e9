//! Per-unit target selection and move resolution.
//!
//! Units are routed one at a time against a shared [`OccupancyBook`]. A unit
//! with a full hold retreats to the nearest base; a unit on a depleted cell
//! either explores toward home or picks the closest safe cell on a random
//! seam and takes one step toward it; anything else keeps mining.

use tracing::debug;

use crate::board::{target_direction, Direction, Occupancy, Position, Snapshot, Unit, UnitId, CARDINALS};
use crate::config::PlannerConfig;
use crate::random::UniformSource;
use crate::seam::{Seam, SeamSet};

use super::book::{navigate, OccupancyBook};

/// A unit paired with its one move for this cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MoveAssignment {
    pub unit: UnitId,
    pub direction: Direction,
}

/// Which branch of the routing policy produced a move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RouteReason {
    /// Cargo over the retreat threshold; heading to the nearest base.
    Retreat,
    /// Random reset; heading home instead of to a seam.
    Explore,
    /// Stepping toward a safe seam cell.
    Seam,
    /// The step toward the seam cell was taken; random cardinal instead.
    Escape,
    /// No seam cell qualified; heading home.
    NoSafeTarget,
    /// The current cell is still rich enough to mine.
    Hold,
}

/// A routed unit: its assignment, why, and the seam cell it aimed for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RoutedMove {
    pub assignment: MoveAssignment,
    pub reason: RouteReason,
    pub target: Option<Position>,
}

/// Finds the seam cell nearest to `source` by Manhattan distance that is not
/// `source` itself, holds at least `min_energy`, and is not occupied or
/// booked. Ties go to the earlier cell on the seam.
pub fn closest_safe_target(
    source: Position,
    seam: &Seam,
    book: &OccupancyBook<'_>,
    min_energy: u32,
) -> Option<Position> {
    let map = book.map();
    seam.cells()
        .iter()
        .copied()
        .filter(|&cell| cell != source)
        .filter(|&cell| map.halite(cell) >= min_energy)
        .filter(|&cell| !book.is_occupied(cell))
        .min_by_key(|&cell| source.manhattan(cell))
}

/// Routes units sequentially for one cycle.
pub struct UnitRouter<'a> {
    snapshot: &'a Snapshot,
    seams: &'a SeamSet,
    config: &'a PlannerConfig,
    book: OccupancyBook<'a>,
}

impl<'a> UnitRouter<'a> {
    pub fn new(snapshot: &'a Snapshot, seams: &'a SeamSet, config: &'a PlannerConfig) -> Self {
        UnitRouter {
            snapshot,
            seams,
            config,
            book: OccupancyBook::new(&snapshot.map),
        }
    }

    pub fn book(&self) -> &OccupancyBook<'a> {
        &self.book
    }

    /// Routes every unit in order. Each unit sees the bookings of all units
    /// routed before it.
    pub fn route_all<'u>(
        &mut self,
        units: impl IntoIterator<Item = &'u Unit>,
        rng: &mut impl UniformSource,
    ) -> Vec<RoutedMove> {
        let mut moves = Vec::new();
        for unit in units {
            moves.push(self.route(unit, rng));
        }
        moves
    }

    /// Chooses one move for `unit` and books the cell it moves onto.
    pub fn route(&mut self, unit: &Unit, rng: &mut impl UniformSource) -> RoutedMove {
        let snapshot = self.snapshot;
        let (direction, reason, target) = if unit.cargo as f64 > self.config.retreat_cargo() {
            let base = snapshot.nearest_base(unit.position);
            (navigate(&mut self.book, unit, base), RouteReason::Retreat, None)
        } else if (snapshot.map.halite(unit.position) as f64) < self.config.depletion_energy() {
            self.relocate(unit, rng)
        } else {
            (Direction::Still, RouteReason::Hold, None)
        };

        debug!(
            unit = %unit.id,
            x = unit.position.x,
            y = unit.position.y,
            ?direction,
            ?reason,
            ?target,
            "routed unit"
        );

        RoutedMove {
            assignment: MoveAssignment { unit: unit.id, direction },
            reason,
            target,
        }
    }

    fn relocate(
        &mut self,
        unit: &Unit,
        rng: &mut impl UniformSource,
    ) -> (Direction, RouteReason, Option<Position>) {
        let home = self.snapshot.home;
        if rng.chance(self.config.exploration_probability) {
            return (navigate(&mut self.book, unit, home), RouteReason::Explore, None);
        }

        let target = self.seams.choose(rng).and_then(|seam| {
            closest_safe_target(unit.position, seam, &self.book, self.config.min_safe_energy)
        });
        let Some(target) = target else {
            return (navigate(&mut self.book, unit, home), RouteReason::NoSafeTarget, None);
        };

        let direction = match target_direction(unit.position, target) {
            (None, None) => Direction::Still,
            (Some(vertical), None) => vertical,
            (None, Some(horizontal)) => horizontal,
            (Some(vertical), Some(horizontal)) => {
                if rng.below(2) == 0 {
                    vertical
                } else {
                    horizontal
                }
            }
        };

        let step = unit.position.offset(direction);
        if self.book.claim(step, Occupancy::Friendly(unit.id)) {
            return (direction, RouteReason::Seam, Some(target));
        }

        let escape = CARDINALS[rng.below(CARDINALS.len())];
        let detour = unit.position.offset(escape);
        (navigate(&mut self.book, unit, detour), RouteReason::Escape, Some(target))
    }
}

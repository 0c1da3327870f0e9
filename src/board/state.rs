//! Per-cycle game snapshot.
//!
//! Holds everything the planner reads in one decision cycle: the grid, our
//! bases, our units, and the bank. A snapshot is immutable once the host has
//! handed it over; routing books cells on a separate occupancy book.

use super::map::{GameMap, Occupancy};
use super::position::Position;
use super::unit::{Unit, UnitId};

/// Complete planner-visible state at the start of a cycle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snapshot {
    pub turn: u32,
    pub map: GameMap,
    /// The home base (shipyard). Spawned units appear here.
    pub home: Position,
    /// Auxiliary drop-off bases, in creation order.
    pub aux_bases: Vec<Position>,
    /// Our units, in the order the host listed them.
    pub units: Vec<Unit>,
    /// Resource stored at our bases and available for spending.
    pub bank: u32,
}

impl Snapshot {
    /// Creates a snapshot with no units, no auxiliary bases and an empty bank.
    pub fn new(turn: u32, map: GameMap, home: Position) -> Self {
        Snapshot {
            turn,
            map,
            home,
            aux_bases: Vec::new(),
            units: Vec::new(),
            bank: 0,
        }
    }

    /// Places one of our units and marks its cell. Returns false if the cell
    /// is already occupied or the id is taken.
    pub fn place_unit(&mut self, unit: Unit) -> bool {
        if self.map.occupancy(unit.position) != Occupancy::Empty || self.unit(unit.id).is_some() {
            return false;
        }
        self.map.set_occupancy(unit.position, Occupancy::Friendly(unit.id));
        self.units.push(unit);
        true
    }

    /// Marks a cell as held by something we do not control.
    pub fn place_hostile(&mut self, pos: Position) -> bool {
        if self.map.occupancy(pos) != Occupancy::Empty {
            return false;
        }
        self.map.set_occupancy(pos, Occupancy::Hostile);
        true
    }

    pub fn add_aux_base(&mut self, pos: Position) {
        let pos = self.map.normalize(pos);
        if !self.aux_bases.contains(&pos) {
            self.aux_bases.push(pos);
        }
    }

    pub fn unit(&self, id: UnitId) -> Option<&Unit> {
        self.units.iter().find(|u| u.id == id)
    }

    /// Positions of all hostile cells, row by row.
    pub fn hostiles(&self) -> Vec<Position> {
        self.map
            .iter()
            .filter(|(_, c)| c.occupancy == Occupancy::Hostile)
            .map(|(p, _)| p)
            .collect()
    }

    pub fn is_base(&self, pos: Position) -> bool {
        let pos = self.map.normalize(pos);
        pos == self.map.normalize(self.home) || self.aux_bases.contains(&pos)
    }

    /// The base nearest to `from` by grid distance. The home base wins ties.
    pub fn nearest_base(&self, from: Position) -> Position {
        let mut best = self.home;
        let mut best_distance = self.map.distance(from, self.home);
        for &base in &self.aux_bases {
            let d = self.map.distance(from, base);
            if d < best_distance {
                best = base;
                best_distance = d;
            }
        }
        best
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snapshot() -> Snapshot {
        Snapshot::new(0, GameMap::new(16, 16), Position::new(8, 8))
    }

    #[test]
    fn new_snapshot_is_empty() {
        let s = snapshot();
        assert!(s.units.is_empty());
        assert!(s.aux_bases.is_empty());
        assert_eq!(s.bank, 0);
        assert!(s.hostiles().is_empty());
    }

    #[test]
    fn place_unit_marks_cell() {
        let mut s = snapshot();
        assert!(s.place_unit(Unit::new(1, Position::new(2, 3), 0)));
        assert_eq!(s.map.occupancy(Position::new(2, 3)), Occupancy::Friendly(UnitId(1)));
    }

    #[test]
    fn place_unit_rejects_duplicates() {
        let mut s = snapshot();
        assert!(s.place_unit(Unit::new(1, Position::new(2, 3), 0)));
        assert!(!s.place_unit(Unit::new(2, Position::new(2, 3), 0)));
        assert!(!s.place_unit(Unit::new(1, Position::new(4, 4), 0)));
        assert!(s.place_hostile(Position::new(5, 5)));
        assert!(!s.place_unit(Unit::new(3, Position::new(5, 5), 0)));
        assert_eq!(s.units.len(), 1);
    }

    #[test]
    fn nearest_base_prefers_home_on_tie() {
        let mut s = snapshot();
        s.add_aux_base(Position::new(12, 8));
        assert_eq!(s.nearest_base(Position::new(10, 8)), Position::new(8, 8));
        assert_eq!(s.nearest_base(Position::new(11, 8)), Position::new(12, 8));
        assert!(s.is_base(Position::new(12, 8)));
        assert!(!s.is_base(Position::new(11, 8)));
    }

    #[test]
    fn aux_bases_are_deduplicated() {
        let mut s = snapshot();
        s.add_aux_base(Position::new(1, 1));
        s.add_aux_base(Position::new(17, 1));
        assert_eq!(s.aux_bases, vec![Position::new(1, 1)]);
    }
}

//! Cycle-scoped occupancy booking and safe navigation.
//!
//! The book starts from the snapshot's occupancy and only ever grows: every
//! cell a unit is sent to is booked before the next unit is routed, so no two
//! units of one cycle end on the same cell.

use std::collections::HashMap;

use crate::board::{Direction, GameMap, Occupancy, Position, Unit};

/// Snapshot occupancy plus this cycle's bookings.
#[derive(Debug, Clone)]
pub struct OccupancyBook<'a> {
    map: &'a GameMap,
    claims: HashMap<Position, Occupancy>,
}

impl<'a> OccupancyBook<'a> {
    pub fn new(map: &'a GameMap) -> Self {
        OccupancyBook { map, claims: HashMap::new() }
    }

    pub fn is_occupied(&self, pos: Position) -> bool {
        self.occupancy(pos) != Occupancy::Empty
    }

    /// Current occupant of a cell: a booking if there is one, otherwise
    /// whatever the snapshot shows.
    pub fn occupancy(&self, pos: Position) -> Occupancy {
        let pos = self.map.normalize(pos);
        self.claims
            .get(&pos)
            .copied()
            .unwrap_or_else(|| self.map.occupancy(pos))
    }

    /// Books a cell. Returns false, leaving the book unchanged, if the cell
    /// is already occupied or booked.
    pub fn claim(&mut self, pos: Position, occupant: Occupancy) -> bool {
        let pos = self.map.normalize(pos);
        if self.is_occupied(pos) {
            return false;
        }
        self.claims.insert(pos, occupant);
        true
    }

    /// Cells booked this cycle, in no particular order.
    pub fn claims(&self) -> impl Iterator<Item = (&Position, &Occupancy)> {
        self.claims.iter()
    }

    pub fn map(&self) -> &'a GameMap {
        self.map
    }
}

/// Steps `unit` toward `destination` along the first free shortest-way
/// direction, booking the cell it steps onto. Stays put if every such
/// direction is blocked or the unit is already there.
pub fn navigate(book: &mut OccupancyBook<'_>, unit: &Unit, destination: Position) -> Direction {
    for direction in book.map().closing_moves(unit.position, destination) {
        let target = unit.position.offset(direction);
        if book.claim(target, Occupancy::Friendly(unit.id)) {
            return direction;
        }
    }
    Direction::Still
}

//! The resource grid and its occupancy.
//!
//! The grid is toroidal: every lookup normalizes coordinates first, and
//! `distance` measures the shorter way around on each axis. Cells are stored
//! row-major for O(1) access.

use super::position::{Direction, Position};
use super::unit::UnitId;

/// Who, if anyone, is standing on (or has booked) a cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Occupancy {
    #[default]
    Empty,
    /// One of our own units.
    Friendly(UnitId),
    /// Anything we do not control.
    Hostile,
}

/// One grid cell: its resource quantity and occupancy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Cell {
    pub halite: u32,
    pub occupancy: Occupancy,
}

impl Cell {
    pub fn is_occupied(&self) -> bool {
        self.occupancy != Occupancy::Empty
    }
}

/// A `width x height` toroidal grid of cells.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameMap {
    pub width: usize,
    pub height: usize,
    cells: Vec<Cell>,
}

impl GameMap {
    /// Creates a grid with every cell empty and holding no resource.
    pub fn new(width: usize, height: usize) -> Self {
        GameMap {
            width,
            height,
            cells: vec![Cell::default(); width * height],
        }
    }

    /// Builds a grid from row-major resource quantities.
    ///
    /// Returns `None` if the rows are ragged.
    pub fn from_rows(rows: &[Vec<u32>]) -> Option<Self> {
        let height = rows.len();
        let width = rows.first().map_or(0, |r| r.len());
        if rows.iter().any(|r| r.len() != width) {
            return None;
        }
        let cells = rows
            .iter()
            .flatten()
            .map(|&halite| Cell { halite, occupancy: Occupancy::Empty })
            .collect();
        Some(GameMap { width, height, cells })
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Returns true if the position lies on the grid without wrapping.
    pub fn contains(&self, pos: Position) -> bool {
        pos.x >= 0 && pos.y >= 0 && (pos.x as usize) < self.width && (pos.y as usize) < self.height
    }

    /// Wraps a position onto the torus. Positions on an empty grid are
    /// returned unchanged.
    pub fn normalize(&self, pos: Position) -> Position {
        if self.is_empty() {
            return pos;
        }
        Position {
            x: pos.x.rem_euclid(self.width as i32),
            y: pos.y.rem_euclid(self.height as i32),
        }
    }

    fn index(&self, pos: Position) -> Option<usize> {
        if self.is_empty() {
            return None;
        }
        let p = self.normalize(pos);
        Some(p.y as usize * self.width + p.x as usize)
    }

    pub fn cell(&self, pos: Position) -> Option<&Cell> {
        self.index(pos).map(|i| &self.cells[i])
    }

    pub fn cell_mut(&mut self, pos: Position) -> Option<&mut Cell> {
        self.index(pos).map(move |i| &mut self.cells[i])
    }

    /// Resource at a position, 0 on an empty grid.
    pub fn halite(&self, pos: Position) -> u32 {
        self.cell(pos).map_or(0, |c| c.halite)
    }

    pub fn set_halite(&mut self, pos: Position, halite: u32) {
        if let Some(cell) = self.cell_mut(pos) {
            cell.halite = halite;
        }
    }

    pub fn occupancy(&self, pos: Position) -> Occupancy {
        self.cell(pos).map_or(Occupancy::Empty, |c| c.occupancy)
    }

    pub fn set_occupancy(&mut self, pos: Position, occupancy: Occupancy) {
        if let Some(cell) = self.cell_mut(pos) {
            cell.occupancy = occupancy;
        }
    }

    /// Iterates all cells with their positions, row by row.
    pub fn iter(&self) -> impl Iterator<Item = (Position, &Cell)> + '_ {
        let width = self.width.max(1);
        self.cells.iter().enumerate().map(move |(i, cell)| {
            (Position::new((i % width) as i32, (i / width) as i32), cell)
        })
    }

    pub fn total_halite(&self) -> u64 {
        self.cells.iter().map(|c| c.halite as u64).sum()
    }

    /// Toroidal Manhattan distance between two positions.
    pub fn distance(&self, a: Position, b: Position) -> u32 {
        if self.is_empty() {
            return a.manhattan(b);
        }
        let a = self.normalize(a);
        let b = self.normalize(b);
        let dx = a.x.abs_diff(b.x);
        let dy = a.y.abs_diff(b.y);
        dx.min(self.width as u32 - dx) + dy.min(self.height as u32 - dy)
    }

    /// Directions that shorten the toroidal distance from `source` to
    /// `destination`, horizontal first. Empty when they coincide.
    pub fn closing_moves(&self, source: Position, destination: Position) -> Vec<Direction> {
        let mut moves = Vec::with_capacity(2);
        if self.is_empty() {
            return moves;
        }
        let s = self.normalize(source);
        let d = self.normalize(destination);
        let dx = s.x.abs_diff(d.x);
        let dy = s.y.abs_diff(d.y);
        let wrapped_dx = self.width as u32 - dx;
        let wrapped_dy = self.height as u32 - dy;

        if s.x < d.x {
            moves.push(if dx > wrapped_dx { Direction::West } else { Direction::East });
        } else if s.x > d.x {
            moves.push(if dx < wrapped_dx { Direction::West } else { Direction::East });
        }

        if s.y < d.y {
            moves.push(if dy > wrapped_dy { Direction::North } else { Direction::South });
        } else if s.y > d.y {
            moves.push(if dy < wrapped_dy { Direction::North } else { Direction::South });
        }

        moves
    }
}

//! Energy-grid extraction.
//!
//! Reduces a snapshot's grid to the rectangular window of resource
//! quantities the seam maximizer works on: every row, and the columns within
//! `half_width` of the home base, clamped to the grid.

use crate::board::{GameMap, Position};

/// A windowed, row-major copy of grid resource quantities.
///
/// Column `c` of the matrix is grid column `c + x_offset`; rows map to grid
/// rows one-to-one. Built fresh every cycle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnergyMatrix {
    rows: usize,
    cols: usize,
    x_offset: usize,
    energy: Vec<u32>,
}

impl EnergyMatrix {
    /// Builds a matrix directly from rows, with no column offset.
    ///
    /// Ragged input is truncated to the shortest row.
    pub fn from_rows(rows: &[Vec<u32>]) -> Self {
        let cols = rows.iter().map(|r| r.len()).min().unwrap_or(0);
        let energy = rows.iter().flat_map(|r| r[..cols].iter().copied()).collect();
        EnergyMatrix {
            rows: if cols == 0 { 0 } else { rows.len() },
            cols,
            x_offset: 0,
            energy,
        }
    }

    /// Extracts columns `[base_x - half_width, base_x + half_width]`,
    /// clamped to `[0, width)`.
    ///
    /// Empty when `half_width` is 0, the grid is empty, or `base_x` is off
    /// the grid.
    pub fn from_map(map: &GameMap, base_x: i32, half_width: usize) -> Self {
        if half_width == 0 || map.is_empty() || base_x < 0 || base_x as usize >= map.width {
            return EnergyMatrix::empty();
        }
        let base_x = base_x as usize;
        let first = base_x.saturating_sub(half_width);
        let last = (base_x + half_width).min(map.width - 1);
        let cols = last - first + 1;

        let mut energy = Vec::with_capacity(cols * map.height);
        for y in 0..map.height {
            for x in first..=last {
                energy.push(map.halite(Position::new(x as i32, y as i32)));
            }
        }

        EnergyMatrix {
            rows: map.height,
            cols,
            x_offset: first,
            energy,
        }
    }

    pub fn empty() -> Self {
        EnergyMatrix { rows: 0, cols: 0, x_offset: 0, energy: Vec::new() }
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn is_empty(&self) -> bool {
        self.rows == 0 || self.cols == 0
    }

    /// Grid column of matrix column 0.
    pub fn x_offset(&self) -> usize {
        self.x_offset
    }

    pub fn get(&self, row: usize, col: usize) -> u32 {
        self.energy[row * self.cols + col]
    }

    /// Grid position of a matrix cell.
    pub fn position(&self, row: usize, col: usize) -> Position {
        Position::new((col + self.x_offset) as i32, row as i32)
    }
}

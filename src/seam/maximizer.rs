//! Dynamic-programming seam extraction.
//!
//! A seam picks exactly one column per row of an [`EnergyMatrix`], moving at
//! most one column between consecutive rows, and maximizes the total energy
//! collected. Extraction is O(rows x cols) in time and space.
//!
//! Repeated extraction from one matrix goes through a [`SuppressionMask`]:
//! cells of seams already taken score a fixed penalty instead of their
//! energy, so later seams branch away from earlier ones. The matrix itself is
//! never modified, and a seam's reported value always uses raw energies.

use crate::board::Position;

use super::energy::EnergyMatrix;

/// Score a suppressed cell contributes to later extractions.
///
/// Strictly below any raw energy, so a path that reuses fewer suppressed
/// cells always beats an otherwise identical one that reuses more.
const SUPPRESSED_SCORE: i64 = -1;

/// A row-continuous path through an energy matrix, top row first.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Seam {
    cells: Vec<Position>,
    columns: Vec<usize>,
    value: u64,
}

impl Seam {
    pub fn empty() -> Self {
        Seam::default()
    }

    /// Builds a seam from matrix columns, one per row starting at row 0.
    pub fn from_columns(matrix: &EnergyMatrix, columns: Vec<usize>) -> Self {
        let cells = columns
            .iter()
            .enumerate()
            .map(|(row, &col)| matrix.position(row, col))
            .collect();
        let value = columns
            .iter()
            .enumerate()
            .map(|(row, &col)| matrix.get(row, col) as u64)
            .sum();
        Seam { cells, columns, value }
    }

    /// Grid positions along the seam, top row first.
    pub fn cells(&self) -> &[Position] {
        &self.cells
    }

    /// Matrix columns along the seam, top row first.
    pub fn columns(&self) -> &[usize] {
        &self.columns
    }

    /// Sum of raw energies along the seam.
    pub fn value(&self) -> u64 {
        self.value
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// True if consecutive rows never drift more than one column.
    pub fn is_continuous(&self) -> bool {
        self.columns.windows(2).all(|w| w[0].abs_diff(w[1]) <= 1)
    }
}

/// Cells already claimed by earlier seams of one matrix.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SuppressionMask {
    rows: usize,
    cols: usize,
    used: Vec<bool>,
}

impl SuppressionMask {
    /// An empty mask sized for `matrix`.
    pub fn for_matrix(matrix: &EnergyMatrix) -> Self {
        SuppressionMask {
            rows: matrix.rows(),
            cols: matrix.cols(),
            used: vec![false; matrix.rows() * matrix.cols()],
        }
    }

    pub fn is_suppressed(&self, row: usize, col: usize) -> bool {
        row < self.rows && col < self.cols && self.used[row * self.cols + col]
    }

    /// Marks every cell of `seam` as used.
    pub fn suppress(&mut self, seam: &Seam) {
        for (row, &col) in seam.columns().iter().enumerate() {
            if row < self.rows && col < self.cols {
                self.used[row * self.cols + col] = true;
            }
        }
    }

    /// Number of suppressed cells.
    pub fn count(&self) -> usize {
        self.used.iter().filter(|&&u| u).count()
    }
}

/// Computes the maximum-energy seam of `matrix`, scoring cells marked in
/// `mask` at a fixed penalty.
///
/// Predecessor ties prefer straight ahead, then left, then right; endpoint
/// ties prefer the lowest column. An empty matrix yields an empty seam.
pub fn maximum_seam(matrix: &EnergyMatrix, mask: &SuppressionMask) -> Seam {
    if matrix.is_empty() {
        return Seam::empty();
    }
    let rows = matrix.rows();
    let cols = matrix.cols();

    let score = |row: usize, col: usize| -> i64 {
        if mask.is_suppressed(row, col) {
            SUPPRESSED_SCORE
        } else {
            matrix.get(row, col) as i64
        }
    };

    let mut gain = vec![0i64; rows * cols];
    let mut from = vec![0usize; rows * cols];

    for col in 0..cols {
        gain[col] = score(0, col);
    }

    for row in 1..rows {
        let prev = (row - 1) * cols;
        for col in 0..cols {
            let mut best_col = col;
            let mut best = gain[prev + col];
            if col > 0 && gain[prev + col - 1] > best {
                best = gain[prev + col - 1];
                best_col = col - 1;
            }
            if col + 1 < cols && gain[prev + col + 1] > best {
                best = gain[prev + col + 1];
                best_col = col + 1;
            }
            gain[row * cols + col] = score(row, col) + best;
            from[row * cols + col] = best_col;
        }
    }

    let last = (rows - 1) * cols;
    let mut end = 0;
    for col in 1..cols {
        if gain[last + col] > gain[last + end] {
            end = col;
        }
    }

    let mut columns = vec![0usize; rows];
    let mut col = end;
    for row in (0..rows).rev() {
        columns[row] = col;
        col = from[row * cols + col];
    }

    Seam::from_columns(matrix, columns)
}

/// Extracts successive, mutually diverse seams from one matrix.
///
/// Owns the suppression state for that matrix; build a new one per cycle.
pub struct SeamMaximizer<'m> {
    matrix: &'m EnergyMatrix,
    mask: SuppressionMask,
}

impl<'m> SeamMaximizer<'m> {
    pub fn new(matrix: &'m EnergyMatrix) -> Self {
        SeamMaximizer {
            matrix,
            mask: SuppressionMask::for_matrix(matrix),
        }
    }

    /// Returns the best seam given everything extracted so far, then
    /// suppresses it.
    pub fn extract(&mut self) -> Seam {
        let seam = maximum_seam(self.matrix, &self.mask);
        self.mask.suppress(&seam);
        seam
    }

    pub fn mask(&self) -> &SuppressionMask {
        &self.mask
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn matrix(rows: &[&[u32]]) -> EnergyMatrix {
        EnergyMatrix::from_rows(&rows.iter().map(|r| r.to_vec()).collect::<Vec<_>>())
    }

    fn best(m: &EnergyMatrix) -> Seam {
        maximum_seam(m, &SuppressionMask::for_matrix(m))
    }

    #[test]
    fn single_row_picks_peak() {
        let m = matrix(&[&[5, 5, 100, 5, 5]]);
        let seam = best(&m);
        assert_eq!(seam.cells(), &[Position::new(2, 0)]);
        assert_eq!(seam.value(), 100);
    }

    #[test]
    fn follows_diagonal_ridge() {
        let m = matrix(&[
            &[9, 0, 0, 0],
            &[0, 9, 0, 0],
            &[0, 0, 9, 0],
            &[0, 0, 0, 9],
        ]);
        let seam = best(&m);
        assert_eq!(seam.columns(), &[0, 1, 2, 3]);
        assert_eq!(seam.value(), 36);
        assert!(seam.is_continuous());
    }

    #[test]
    fn cannot_jump_two_columns() {
        let m = matrix(&[
            &[10, 0, 0],
            &[0, 0, 10],
        ]);
        let seam = best(&m);
        assert!(seam.is_continuous());
        assert_eq!(seam.value(), 10);
    }

    #[test]
    fn uniform_matrix_is_leftmost_straight() {
        let m = matrix(&[&[3, 3, 3], &[3, 3, 3], &[3, 3, 3]]);
        assert_eq!(best(&m).columns(), &[0, 0, 0]);
    }

    #[test]
    fn ties_prefer_straight_then_left() {
        // Row 1 col 1 can come from cols 0, 1 or 2 equally.
        let m = matrix(&[&[4, 4, 4], &[0, 9, 0]]);
        assert_eq!(best(&m).columns(), &[1, 1]);
        // Straight is worse; left and right tie.
        let m = matrix(&[&[4, 0, 4], &[0, 9, 0]]);
        assert_eq!(best(&m).columns(), &[0, 1]);
    }

    #[test]
    fn empty_matrix_yields_empty_seam() {
        let m = EnergyMatrix::empty();
        assert!(best(&m).is_empty());
        let mut maximizer = SeamMaximizer::new(&m);
        assert!(maximizer.extract().is_empty());
    }

    #[test]
    fn extraction_is_deterministic() {
        let m = matrix(&[&[1, 7, 2], &[8, 1, 3], &[2, 2, 9]]);
        assert_eq!(best(&m), best(&m));
    }

    #[test]
    fn repeated_extraction_diversifies() {
        let m = matrix(&[&[1, 7, 2], &[8, 1, 3], &[2, 2, 9]]);
        let mut maximizer = SeamMaximizer::new(&m);
        let first = maximizer.extract();
        let second = maximizer.extract();
        assert_eq!(first, best(&m));
        assert_ne!(first.columns(), second.columns());
        assert!(second.is_continuous());
        assert_eq!(maximizer.mask().count(), 6);
    }

    #[test]
    fn uniform_matrix_second_seam_shifts_right() {
        let m = matrix(&[&[3, 3, 3], &[3, 3, 3]]);
        let mut maximizer = SeamMaximizer::new(&m);
        assert_eq!(maximizer.extract().columns(), &[0, 0]);
        assert_eq!(maximizer.extract().columns(), &[1, 1]);
        assert_eq!(maximizer.extract().columns(), &[2, 2]);
    }

    #[test]
    fn suppressed_seam_reports_raw_value() {
        let m = matrix(&[&[5], &[6]]);
        let mut maximizer = SeamMaximizer::new(&m);
        assert_eq!(maximizer.extract().value(), 11);
        // Only one path exists, so it comes back with its raw value.
        assert_eq!(maximizer.extract().value(), 11);
    }

    #[test]
    fn seam_cells_carry_window_offset() {
        let map = crate::board::GameMap::from_rows(&[vec![0, 0, 0, 50, 0], vec![0, 0, 0, 0, 50]]).unwrap();
        let m = EnergyMatrix::from_map(&map, 3, 1);
        let seam = best(&m);
        assert_eq!(seam.cells(), &[Position::new(3, 0), Position::new(4, 1)]);
    }
}

//! Dense cost matrix storage
//!
//! The solver always works on a square matrix of side `max(rows, cols)`.
//! Cells beyond the caller's rectangular extent stay at infinity and stand
//! for fictitious rows/columns introduced by the padding.

use num_traits::Float;

/// Dense square cost matrix with a precomputed row-offset table.
///
/// Logical cell `(row, col)` lives at flat offset `row * side + col`. The
/// side is fixed at construction and never changes.
#[derive(Debug, Clone)]
pub struct CostMatrix<T> {
    rows: usize,
    cols: usize,
    side: usize,
    cells: Vec<T>,
    offsets: Vec<usize>,
}

impl<T: Float> CostMatrix<T> {
    /// Create a `max(rows, cols)` square matrix filled with infinity.
    pub fn new(rows: usize, cols: usize) -> Self {
        let side = rows.max(cols);
        Self {
            rows,
            cols,
            side,
            cells: vec![T::infinity(); side * side],
            offsets: (0..side).map(|row| row * side).collect(),
        }
    }

    /// Declared (pre-padding) row count.
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Declared (pre-padding) column count.
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Side of the padded square matrix.
    pub fn side(&self) -> usize {
        self.side
    }

    /// Overwrite one cell. Indices must be inside the padded square; the
    /// solver validates against the declared extent before calling.
    pub fn set(&mut self, row: usize, col: usize, value: T) {
        self.cells[self.offsets[row] + col] = value;
    }

    pub fn get(&self, row: usize, col: usize) -> T {
        self.cells[self.offsets[row] + col]
    }

    /// One full padded row.
    pub fn row(&self, row: usize) -> &[T] {
        let base = self.offsets[row];
        &self.cells[base..base + self.side]
    }

    pub fn row_mut(&mut self, row: usize) -> &mut [T] {
        let base = self.offsets[row];
        &mut self.cells[base..base + self.side]
    }

    /// Whole flat buffer, row-major.
    pub fn cells(&self) -> &[T] {
        &self.cells
    }

    pub fn cells_mut(&mut self) -> &mut [T] {
        &mut self.cells
    }

    /// Row-offset table: `offsets()[row] + col` addresses `cells()`.
    pub fn offsets(&self) -> &[usize] {
        &self.offsets
    }
}

//! Kuhn-Munkres solver for rectangular assignment problems
//!
//! The solver pads a rectangular cost matrix up to a square with infinity
//! cells, reduces rows and columns to expose zeros, and then grows one
//! augmenting path of alternating primed/starred zeros per outer iteration
//! until every column is covered. When no uncovered zero remains, new zeros
//! are generated by the partitioned passes in [`crate::parallel`].

use nalgebra::DMatrix;
use num_traits::Float;

use crate::cover::{CoverSet, ZeroCache};
use crate::errors::SolverError;
use crate::matrix::CostMatrix;
use crate::parallel::{apply_cost_update, min_uncovered_cost, WorkerPartition};

/// Solver for the rectangular linear assignment problem.
///
/// Costs are entered through [`set_cost`](HungarianSolver::set_cost) after
/// construction; [`compute`](HungarianSolver::compute) consumes the solver
/// and returns, for every padded row, the assigned column or `None`.
///
/// Cells never written stay at infinity, so a rectangular problem behaves as
/// if padded with fictitious rows or columns that can never win a real
/// pairing. Entering `T::infinity()` explicitly marks a single pairing as
/// forbidden.
#[derive(Debug)]
pub struct HungarianSolver<T> {
    matrix: CostMatrix<T>,
    covers: CoverSet,
    zeros: ZeroCache,
    /// Column of the starred zero in each row; this is the output.
    starred: Vec<Option<usize>>,
    /// Column of the primed zero in each row. Only read after being written
    /// in the same path-construction phase, so it is never cleared.
    primed: Vec<usize>,
    path_rows: Vec<usize>,
    path_cols: Vec<usize>,
    uncovered_cols: Vec<usize>,
    partition: WorkerPartition,
}

impl<T> HungarianSolver<T>
where
    T: Float + Send + Sync,
{
    /// Create a solver for a `rows` x `cols` cost matrix, using the default
    /// worker-slot count for the partitioned passes.
    pub fn new(rows: usize, cols: usize) -> Result<Self, SolverError> {
        Self::with_workers(rows, cols, WorkerPartition::default_workers())
    }

    /// Create a solver with an explicit worker-slot count (clamped to at
    /// least 1). The pairing returned by [`compute`](Self::compute) does not
    /// depend on the worker count, only the wall time does.
    pub fn with_workers(rows: usize, cols: usize, workers: usize) -> Result<Self, SolverError> {
        if rows == 0 || cols == 0 {
            return Err(SolverError::EmptyDimensions { rows, cols });
        }
        let side = rows.max(cols);
        log::debug!(
            "assignment solver: {}x{} padded to {}, {} worker slots",
            rows,
            cols,
            side,
            workers.max(1)
        );
        Ok(Self {
            matrix: CostMatrix::new(rows, cols),
            covers: CoverSet::new(side),
            zeros: ZeroCache::new(side),
            starred: vec![None; side],
            primed: vec![0; side],
            path_rows: Vec::with_capacity(side),
            path_cols: Vec::with_capacity(side),
            uncovered_cols: Vec::with_capacity(side),
            partition: WorkerPartition::new(workers, side),
        })
    }

    /// Overwrite one cell of the declared (pre-padding) matrix.
    ///
    /// `T::infinity()` marks the pairing as forbidden; NaN is rejected
    /// because it cannot be ordered by the reduction passes.
    pub fn set_cost(&mut self, row: usize, col: usize, cost: T) -> Result<(), SolverError> {
        if row >= self.matrix.rows() || col >= self.matrix.cols() {
            return Err(SolverError::IndexOutOfBounds {
                row,
                col,
                rows: self.matrix.rows(),
                cols: self.matrix.cols(),
            });
        }
        if cost.is_nan() {
            return Err(SolverError::InvalidCost { row, col });
        }
        self.matrix.set(row, col, cost);
        Ok(())
    }

    /// Solve the assignment problem.
    ///
    /// Slot `i` of the result holds the column assigned to row `i`, or
    /// `None` if the row ends unmatched. Callers of a rectangular problem
    /// should read slots `[0, rows)` and treat assigned columns at or above
    /// the declared column count as fictitious.
    pub fn compute(mut self) -> Vec<Option<usize>> {
        self.reduce_and_star();
        while !self.covers.all_cols_covered() {
            self.iterate();
        }
        self.starred
    }

    /// Phase 0: row/column reduction, zero discovery and greedy starring.
    fn reduce_and_star(&mut self) {
        let side = self.matrix.side();

        // Subtract each row's minimum (rows of pure padding stay untouched)
        // while accumulating the per-column minimum across all rows.
        let mut col_min = vec![T::infinity(); side];
        for row in 0..side {
            let cells = self.matrix.row_mut(row);
            let row_min = cells
                .iter()
                .fold(T::infinity(), |a, &b| if b < a { b } else { a });
            if row_min.is_finite() {
                for cell in cells.iter_mut() {
                    *cell = *cell - row_min;
                }
            }
            for (col, &cell) in cells.iter().enumerate() {
                if cell < col_min[col] {
                    col_min[col] = cell;
                }
            }
        }

        // Subtract each column's minimum; a column no finite row ever
        // touched reduces by zero.
        for min in col_min.iter_mut() {
            if !min.is_finite() {
                *min = T::zero();
            }
        }
        for row in 0..side {
            let cells = self.matrix.row_mut(row);
            for (cell, &min) in cells.iter_mut().zip(col_min.iter()) {
                *cell = *cell - min;
            }
        }

        // Record every zero and greedily star the first eligible zero per
        // row, scanning in row-major order.
        for row in 0..side {
            for col in 0..side {
                if self.matrix.get(row, col) == T::zero() {
                    self.zeros.push(row, col);
                    if !self.covers.is_row_covered(row) && !self.covers.is_col_covered(col) {
                        self.covers.cover_row(row);
                        self.covers.cover_col(col);
                        self.starred[row] = Some(col);
                    }
                }
            }
        }

        // Initial covering: exactly the columns holding a star.
        self.covers.clear();
        for &star in &self.starred {
            if let Some(col) = star {
                self.covers.cover_col(col);
            }
        }
    }

    /// One outer iteration: prime uncovered zeros until either an
    /// augmenting path is found or the matrix needs new zeros.
    fn iterate(&mut self) {
        while let Some((row, col)) = self.find_uncovered_zero() {
            self.primed[row] = col;
            match self.starred[row] {
                None => {
                    // A row without a star ends the alternating chain:
                    // augmenting the path grows the matching by one.
                    self.augment(row, col);
                    return;
                }
                Some(star_col) => {
                    // Block this row and re-open the star's column so the
                    // search can continue past it.
                    self.covers.cover_row(row);
                    self.covers.uncover_col(star_col);
                }
            }
        }

        // No uncovered zero anywhere: make new ones. The column list and the
        // row partition are rebuilt first since the covers just changed.
        self.covers.uncovered_cols_into(&mut self.uncovered_cols);
        self.partition.rebalance(self.covers.row_flags());

        let delta = min_uncovered_cost(
            &self.partition,
            self.matrix.cells(),
            self.matrix.offsets(),
            self.covers.row_flags(),
            &self.uncovered_cols,
        );
        if !delta.is_finite() {
            // Only fictitious cells remain uncovered; no further real
            // assignment is possible.
            log::debug!("uncovered region exhausted, forcing termination");
            self.covers.cover_all_cols();
            return;
        }

        log::trace!("applying uniform cost update");
        let side = self.matrix.side();
        apply_cost_update(
            &self.partition,
            self.matrix.cells_mut(),
            side,
            self.covers.row_flags(),
            &self.uncovered_cols,
            self.zeros.rows_mut(),
            delta,
        );
    }

    /// First zero in an uncovered row and an uncovered column, scanning rows
    /// in increasing order through the zero cache.
    fn find_uncovered_zero(&self) -> Option<(usize, usize)> {
        for row in 0..self.matrix.side() {
            if self.covers.is_row_covered(row) {
                continue;
            }
            for &col in self.zeros.row(row) {
                if !self.covers.is_col_covered(col) {
                    return Some((row, col));
                }
            }
        }
        None
    }

    fn find_starred_zero_in_col(&self, col: usize) -> Option<usize> {
        self.starred.iter().position(|&star| star == Some(col))
    }

    /// Trace the alternating primed/starred chain from a primed zero in a
    /// star-free row, then star every node on it. Each row on the path has
    /// its star replaced by the path's column, which simultaneously unstars
    /// the old zeros and stars the primed ones.
    fn augment(&mut self, row: usize, col: usize) {
        self.path_rows.clear();
        self.path_cols.clear();
        self.path_rows.push(row);
        self.path_cols.push(col);

        let mut col = col;
        while let Some(star_row) = self.find_starred_zero_in_col(col) {
            col = self.primed[star_row];
            self.path_rows.push(star_row);
            self.path_cols.push(col);
        }

        for (&path_row, &path_col) in self.path_rows.iter().zip(self.path_cols.iter()) {
            self.starred[path_row] = Some(path_col);
        }

        // Drop all covers (primes need no erasing, they are overwritten
        // before their next read) and re-cover the starred columns.
        self.covers.clear();
        for &star in &self.starred {
            if let Some(star_col) = star {
                self.covers.cover_col(star_col);
            }
        }
    }
}

/// A solved assignment over the caller's original matrix extent.
#[derive(Debug, Clone)]
pub struct AssignmentResult {
    /// Assigned column per original row; `None` for unmatched rows and rows
    /// whose only pairing would be fictitious.
    pub pairing: Vec<Option<usize>>,
    /// Total cost of the real pairings.
    pub cost: f64,
}

/// Solve a dense `f64` assignment problem in one call.
///
/// Entries of `f64::INFINITY` mark forbidden pairings. The result is
/// expressed over the original extent: fictitious padding columns are
/// reported as `None`.
pub fn solve(costs: &DMatrix<f64>) -> Result<AssignmentResult, SolverError> {
    let rows = costs.nrows();
    let cols = costs.ncols();
    let mut solver = HungarianSolver::new(rows, cols)?;
    for row in 0..rows {
        for col in 0..cols {
            solver.set_cost(row, col, costs[(row, col)])?;
        }
    }

    let starred = solver.compute();
    let pairing: Vec<Option<usize>> = starred[..rows]
        .iter()
        .map(|&star| star.filter(|&col| col < cols))
        .collect();
    let cost = pairing
        .iter()
        .enumerate()
        .filter_map(|(row, &star)| star.map(|col| costs[(row, col)]))
        .sum();

    Ok(AssignmentResult { pairing, cost })
}

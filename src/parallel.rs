//! Fork-join passes over partitioned rows
//!
//! The two passes that dominate runtime on large matrices (finding the
//! minimum uncovered cost, applying a uniform cost update) are split
//! across worker slots by contiguous row ranges. Ranges are rebalanced over
//! the *uncovered* rows before every parallel region, since the covered set
//! changes throughout the solve and a stale partition skews the load.
//!
//! Workers write only inside their own row chunk of the cost buffer and zero
//! cache, carved out with `split_at_mut`; the coverage flags, the uncovered
//! column list and the delta are read-only for the duration of a region.
//! Both regions are join-before-continue and leave no cross-call state.

use crate::cover::ZeroColumns;
use num_traits::Float;

#[cfg(feature = "rayon")]
use rayon::prelude::*;

/// Contiguous half-open row ranges, one per worker slot.
#[derive(Debug, Clone)]
pub struct WorkerPartition {
    bounds: Vec<usize>,
    workers: usize,
}

impl WorkerPartition {
    pub fn new(workers: usize, side: usize) -> Self {
        let workers = workers.max(1);
        Self {
            bounds: vec![side; workers + 1],
            workers,
        }
    }

    /// Worker-slot count for this build: rayon's thread count when the
    /// feature is on, otherwise 1.
    pub fn default_workers() -> usize {
        #[cfg(feature = "rayon")]
        {
            rayon::current_num_threads().max(1)
        }
        #[cfg(not(feature = "rayon"))]
        {
            1
        }
    }

    pub fn workers(&self) -> usize {
        self.workers
    }

    /// Recompute range boundaries so each slot owns roughly the same number
    /// of uncovered rows.
    pub fn rebalance(&mut self, row_covered: &[bool]) {
        let side = row_covered.len();
        let uncovered = row_covered.iter().filter(|&&covered| !covered).count();
        let per_worker = ((uncovered + self.workers - 1) / self.workers).max(1);

        self.bounds[0] = 0;
        let mut slot = 1;
        let mut seen = 0;
        for (row, &covered) in row_covered.iter().enumerate() {
            if !covered {
                seen += 1;
                if seen == per_worker && slot < self.bounds.len() - 1 {
                    self.bounds[slot] = row + 1;
                    slot += 1;
                    seen = 0;
                }
            }
        }
        // leftover slots collapse to empty ranges at the end
        for bound in &mut self.bounds[slot..] {
            *bound = side;
        }
    }

    /// Non-empty row ranges in ascending order; together they cover
    /// `0..side` exactly once.
    pub fn ranges(&self) -> Vec<(usize, usize)> {
        self.bounds
            .windows(2)
            .map(|w| (w[0], w[1]))
            .filter(|&(lo, hi)| hi > lo)
            .collect()
    }
}

/// Minimum cost over all (uncovered row, uncovered column) cells, or
/// infinity if no such cell remains finite.
pub fn min_uncovered_cost<T>(
    partition: &WorkerPartition,
    cells: &[T],
    offsets: &[usize],
    row_covered: &[bool],
    uncovered_cols: &[usize],
) -> T
where
    T: Float + Send + Sync,
{
    let ranges = partition.ranges();

    #[cfg(feature = "rayon")]
    {
        ranges
            .par_iter()
            .map(|&(lo, hi)| range_min(cells, offsets, row_covered, uncovered_cols, lo, hi))
            .reduce(T::infinity, |a, b| if b < a { b } else { a })
    }

    #[cfg(not(feature = "rayon"))]
    {
        ranges
            .iter()
            .map(|&(lo, hi)| range_min(cells, offsets, row_covered, uncovered_cols, lo, hi))
            .fold(T::infinity(), |a, b| if b < a { b } else { a })
    }
}

fn range_min<T: Float>(
    cells: &[T],
    offsets: &[usize],
    row_covered: &[bool],
    uncovered_cols: &[usize],
    lo: usize,
    hi: usize,
) -> T {
    let mut local = T::infinity();
    for row in lo..hi {
        if row_covered[row] {
            continue;
        }
        let base = offsets[row];
        for &col in uncovered_cols {
            let value = cells[base + col];
            if value < local {
                local = value;
            }
        }
    }
    local
}

/// Add `delta` to every cell of covered rows and subtract it from every
/// uncovered column, refreshing the zero cache of each touched row.
///
/// A covered row's uncovered columns net out to their old value, so its
/// cache is cleared by the addition and re-filled by the subtraction sweep;
/// an uncovered row only gains zeros where a cell lands exactly on zero.
pub fn apply_cost_update<T>(
    partition: &WorkerPartition,
    cells: &mut [T],
    side: usize,
    row_covered: &[bool],
    uncovered_cols: &[usize],
    zeros: &mut [ZeroColumns],
    delta: T,
) where
    T: Float + Send + Sync,
{
    let ranges = partition.ranges();

    #[cfg(feature = "rayon")]
    {
        let mut cells_rest = cells;
        let mut zeros_rest = zeros;
        rayon::scope(|scope| {
            for &(lo, hi) in &ranges {
                let rows = hi - lo;
                let (cell_chunk, tail) = std::mem::take(&mut cells_rest).split_at_mut(rows * side);
                cells_rest = tail;
                let (zero_chunk, tail) = std::mem::take(&mut zeros_rest).split_at_mut(rows);
                zeros_rest = tail;
                scope.spawn(move |_| {
                    update_range(
                        cell_chunk,
                        zero_chunk,
                        lo,
                        hi,
                        side,
                        row_covered,
                        uncovered_cols,
                        delta,
                    );
                });
            }
        });
    }

    #[cfg(not(feature = "rayon"))]
    {
        for &(lo, hi) in &ranges {
            update_range(
                &mut cells[lo * side..hi * side],
                &mut zeros[lo..hi],
                lo,
                hi,
                side,
                row_covered,
                uncovered_cols,
                delta,
            );
        }
    }
}

#[allow(clippy::too_many_arguments)]
fn update_range<T: Float>(
    cells: &mut [T],
    zeros: &mut [ZeroColumns],
    lo: usize,
    hi: usize,
    side: usize,
    row_covered: &[bool],
    uncovered_cols: &[usize],
    delta: T,
) {
    for row in lo..hi {
        let local = row - lo;
        let row_cells = &mut cells[local * side..(local + 1) * side];
        let row_zeros = &mut zeros[local];

        if row_covered[row] {
            for cell in row_cells.iter_mut() {
                *cell = *cell + delta;
            }
            row_zeros.clear();
        }
        for &col in uncovered_cols {
            let value = row_cells[col] - delta;
            row_cells[col] = value;
            if value == T::zero() {
                row_zeros.push(col);
            }
        }
    }
}

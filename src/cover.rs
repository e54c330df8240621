//! Cover flags and zero bookkeeping
//!
//! Rows and columns are covered and uncovered many times per solve, and the
//! zero search runs over the columns so often that keeping a per-row list of
//! zero-valued columns is a measurable win over rescanning cells.

use smallvec::SmallVec;

/// Columns of a single row that currently hold a zero. Rows rarely hold more
/// than a handful of zeros at a time, so the list stays inline.
pub type ZeroColumns = SmallVec<[usize; 8]>;

/// Boolean coverage flags over the padded rows and columns.
#[derive(Debug, Clone)]
pub struct CoverSet {
    rows: Vec<bool>,
    cols: Vec<bool>,
}

impl CoverSet {
    pub fn new(side: usize) -> Self {
        Self {
            rows: vec![false; side],
            cols: vec![false; side],
        }
    }

    pub fn cover_row(&mut self, row: usize) {
        self.rows[row] = true;
    }

    pub fn cover_col(&mut self, col: usize) {
        self.cols[col] = true;
    }

    pub fn uncover_col(&mut self, col: usize) {
        self.cols[col] = false;
    }

    pub fn is_row_covered(&self, row: usize) -> bool {
        self.rows[row]
    }

    pub fn is_col_covered(&self, col: usize) -> bool {
        self.cols[col]
    }

    /// Uncover every row and column.
    pub fn clear(&mut self) {
        self.rows.fill(false);
        self.cols.fill(false);
    }

    /// Cover every column, forcing the outer loop to terminate.
    pub fn cover_all_cols(&mut self) {
        self.cols.fill(true);
    }

    pub fn all_cols_covered(&self) -> bool {
        self.cols.iter().all(|&c| c)
    }

    /// Row flags as a slice, for the partitioned passes.
    pub fn row_flags(&self) -> &[bool] {
        &self.rows
    }

    /// Collect the indices of uncovered columns into `out`.
    pub fn uncovered_cols_into(&self, out: &mut Vec<usize>) {
        out.clear();
        for (col, &covered) in self.cols.iter().enumerate() {
            if !covered {
                out.push(col);
            }
        }
    }
}

/// Per-row cache of zero-valued column indices.
///
/// Entries are only ever read through a coverage filter, so a cached column
/// that has since been covered is harmless; a row's list is cleared and
/// rebuilt whenever the row's values change.
#[derive(Debug, Clone)]
pub struct ZeroCache {
    rows: Vec<ZeroColumns>,
}

impl ZeroCache {
    pub fn new(side: usize) -> Self {
        Self {
            rows: vec![ZeroColumns::new(); side],
        }
    }

    pub fn push(&mut self, row: usize, col: usize) {
        self.rows[row].push(col);
    }

    pub fn row(&self, row: usize) -> &[usize] {
        &self.rows[row]
    }

    /// Mutable row lists, for `split_at_mut` chunking in the update pass.
    pub fn rows_mut(&mut self) -> &mut [ZeroColumns] {
        &mut self.rows
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cover_and_clear() {
        let mut covers = CoverSet::new(3);
        covers.cover_row(1);
        covers.cover_col(2);
        assert!(covers.is_row_covered(1));
        assert!(covers.is_col_covered(2));
        assert!(!covers.is_row_covered(0));

        covers.clear();
        assert!(!covers.is_row_covered(1));
        assert!(!covers.is_col_covered(2));
    }

    #[test]
    fn test_uncovered_cols_collection() {
        let mut covers = CoverSet::new(4);
        covers.cover_col(0);
        covers.cover_col(2);
        let mut cols = Vec::new();
        covers.uncovered_cols_into(&mut cols);
        assert_eq!(cols, vec![1, 3]);
    }

    #[test]
    fn test_cover_all_cols_terminates() {
        let mut covers = CoverSet::new(2);
        assert!(!covers.all_cols_covered());
        covers.cover_all_cols();
        assert!(covers.all_cols_covered());
    }

    #[test]
    fn test_zero_cache_rows() {
        let mut zeros = ZeroCache::new(2);
        zeros.push(0, 1);
        zeros.push(0, 3);
        assert_eq!(zeros.row(0), &[1, 3]);
        assert!(zeros.row(1).is_empty());

        zeros.rows_mut()[0].clear();
        assert!(zeros.row(0).is_empty());
    }
}

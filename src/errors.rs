//! Error types for solver construction and cost entry
//!
//! Infeasible assignments are not errors: the solver reports them through
//! `None` slots in the returned pairing.

use std::fmt;

/// Errors that can occur while building a solver or entering costs
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SolverError {
    /// The requested matrix has a zero row or column count
    EmptyDimensions {
        /// Requested row count
        rows: usize,
        /// Requested column count
        cols: usize,
    },

    /// A cost was addressed outside the declared matrix extent
    IndexOutOfBounds {
        /// Requested row
        row: usize,
        /// Requested column
        col: usize,
        /// Declared row count
        rows: usize,
        /// Declared column count
        cols: usize,
    },

    /// A cost value that cannot be ordered (NaN)
    InvalidCost {
        /// Row of the offending cell
        row: usize,
        /// Column of the offending cell
        col: usize,
    },
}

impl fmt::Display for SolverError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SolverError::EmptyDimensions { rows, cols } => {
                write!(f, "cost matrix must be non-empty, got {}x{}", rows, cols)
            }
            SolverError::IndexOutOfBounds {
                row,
                col,
                rows,
                cols,
            } => {
                write!(
                    f,
                    "cost index ({}, {}) outside declared {}x{} matrix",
                    row, col, rows, cols
                )
            }
            SolverError::InvalidCost { row, col } => {
                write!(f, "cost at ({}, {}) is NaN and cannot be ordered", row, col)
            }
        }
    }
}

impl std::error::Error for SolverError {}

/*!
# parallel-munkres - Rectangular assignment solver

Kuhn-Munkres ("Hungarian") solver for the rectangular linear assignment
problem: given an m x n matrix of non-negative costs, find the one-to-one
pairing of rows to columns with minimum total cost.

## Features

- Rectangular inputs, handled by padding up to a square with infinity cells
- Forbidden pairings via `infinity` costs
- The two dominant inner passes (minimum uncovered cost, uniform cost
  update) partitioned across worker slots (`rayon` feature, on by default)
- Generic over `f32`/`f64` (any `num_traits::Float` with `Send + Sync`)

## Modules

- [`solver`] - the solver itself and the `solve()` convenience entry point
- [`matrix`] - dense padded cost storage
- [`cover`] - coverage flags and zero bookkeeping
- [`parallel`] - worker partition and the fork-join passes
- [`errors`] - construction/input error types

## Example

```rust
use parallel_munkres::HungarianSolver;

let mut solver = HungarianSolver::new(3, 3).unwrap();
for (row, costs) in [[4.0, 1.0, 3.0], [2.0, 0.0, 5.0], [3.0, 2.0, 2.0]]
    .iter()
    .enumerate()
{
    for (col, &cost) in costs.iter().enumerate() {
        solver.set_cost(row, col, cost).unwrap();
    }
}

// One assigned column per row; `None` marks an unmatched row.
let pairing = solver.compute();
assert_eq!(pairing, vec![Some(1), Some(0), Some(2)]);
```
*/

/// Dense padded cost matrix and row-offset indexing
pub mod matrix;

/// Row/column coverage flags and per-row zero caches
pub mod cover;

/// Worker partition and the two fork-join passes
pub mod parallel;

/// The Kuhn-Munkres solver and the one-call `solve()` entry point
pub mod solver;

/// Error types
pub mod errors;

pub use errors::SolverError;
pub use solver::{solve, AssignmentResult, HungarianSolver};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

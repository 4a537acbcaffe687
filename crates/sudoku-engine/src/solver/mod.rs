//! Solving: forced propagation plus randomized backtracking.
//!
//! [`propagate`] handles everything provable without guessing; [`Solver`]
//! wraps it with a recursive search and classifies how many complete
//! fillings the board admits.

mod propagate;

pub use propagate::{propagate, Propagation, PropagationOutcome};

use crate::grid::Grid;
use crate::rng::SimpleRng;
use serde::{Deserialize, Serialize};

/// How many complete fillings a board admits, as far as the search can
/// tell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SolutionKind {
    NoSolution,
    /// Propagation alone completed the board; no unforced choice existed.
    SingleSolution,
    /// At least one guess was needed to finish, meaning an unforced choice
    /// existed somewhere. A conservative proxy, not a combinatorial count:
    /// every truly ambiguous board lands here, at the cost of also
    /// classifying some boards that happen to be unique but need
    /// techniques beyond naked singles.
    MultipleSolutions,
}

/// The board the search ended on, plus its classification. The grid is
/// meaningful only when `kind` is not [`SolutionKind::NoSolution`].
#[derive(Debug, Clone)]
pub struct Solution {
    pub kind: SolutionKind,
    pub grid: Grid,
}

/// Search token used internally to unwind an externally cancelled search.
struct Cancelled;

/// Backtracking solver with an injected randomness source. Guess values
/// are tried in shuffled order, so a seeded solver is fully reproducible
/// and an entropy-seeded one picks a random representative among equally
/// valid completions.
pub struct Solver {
    rng: SimpleRng,
}

impl Default for Solver {
    fn default() -> Self {
        Self::new()
    }
}

impl Solver {
    /// Create a solver seeded from OS entropy.
    pub fn new() -> Self {
        Self {
            rng: SimpleRng::new(),
        }
    }

    /// Create a solver with a fixed seed for reproducible runs.
    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: SimpleRng::with_seed(seed),
        }
    }

    /// Solve the board and classify the result. The input grid is never
    /// modified, and `NoSolution` is an ordinary outcome, not an error.
    pub fn solve(&mut self, grid: &Grid) -> Solution {
        self.solve_with_cancel(grid, &|| false)
            .expect("a never-cancelled search always finishes")
    }

    /// Like [`Solver::solve`], but polls `cancelled` at every branch point
    /// and returns `None` if the probe fires, bounding worst-case latency
    /// for interactive callers.
    pub fn solve_with_cancel(
        &mut self,
        grid: &Grid,
        cancelled: &dyn Fn() -> bool,
    ) -> Option<Solution> {
        // A board that already breaks the one rule is not worth searching.
        if !grid.is_legal() {
            return Some(Solution {
                kind: SolutionKind::NoSolution,
                grid: grid.clone(),
            });
        }

        let mut guessed = false;
        match self.search(grid, &mut guessed, cancelled) {
            Err(Cancelled) => None,
            Ok(None) => Some(Solution {
                kind: SolutionKind::NoSolution,
                grid: grid.clone(),
            }),
            Ok(Some(done)) => {
                let kind = if guessed {
                    SolutionKind::MultipleSolutions
                } else {
                    SolutionKind::SingleSolution
                };
                Some(Solution { kind, grid: done })
            }
        }
    }

    /// Propagate, then branch on the first blank cell. Returns the
    /// completed board, `None` when this subtree is exhausted, or unwinds
    /// on cancellation. Sets `guessed` the moment any unforced assignment
    /// is made anywhere in the tree.
    fn search(
        &mut self,
        grid: &Grid,
        guessed: &mut bool,
        cancelled: &dyn Fn() -> bool,
    ) -> Result<Option<Grid>, Cancelled> {
        if cancelled() {
            return Err(Cancelled);
        }

        let mut board = propagate(grid).grid;
        let Some((row, col)) = board.blank_cells().next() else {
            return Ok(Some(board));
        };

        let mut values = board.candidates(row, col);
        if values.is_empty() {
            return Ok(None);
        }

        *guessed = true;
        self.rng.shuffle(&mut values);
        for value in values {
            board.set(row, col, value);
            if let Some(done) = self.search(&board, guessed, cancelled)? {
                return Ok(Some(done));
            }
            board.clear_cell(row, col);
        }
        Ok(None)
    }
}

#[cfg(test)]
pub(crate) mod test_grids {
    /// The canonical naked-singles-only 9x9 puzzle.
    pub(crate) const CANONICAL_9X9: &[[u8; 9]; 9] = &[
        [5, 3, 0, 0, 7, 0, 0, 0, 0],
        [6, 0, 0, 1, 9, 5, 0, 0, 0],
        [0, 9, 8, 0, 0, 0, 0, 6, 0],
        [8, 0, 0, 0, 6, 0, 0, 0, 3],
        [4, 0, 0, 8, 0, 3, 0, 0, 1],
        [7, 0, 0, 0, 2, 0, 0, 0, 6],
        [0, 6, 0, 0, 0, 0, 2, 8, 0],
        [0, 0, 0, 4, 1, 9, 0, 0, 5],
        [0, 0, 0, 0, 8, 0, 0, 7, 9],
    ];

    /// Its unique completion.
    pub(crate) const CANONICAL_9X9_SOLUTION: &[[u8; 9]; 9] = &[
        [5, 3, 4, 6, 7, 8, 9, 1, 2],
        [6, 7, 2, 1, 9, 5, 3, 4, 8],
        [1, 9, 8, 3, 4, 2, 5, 6, 7],
        [8, 5, 9, 7, 6, 1, 4, 2, 3],
        [4, 2, 6, 8, 5, 3, 7, 9, 1],
        [7, 1, 3, 9, 2, 4, 8, 5, 6],
        [9, 6, 1, 5, 3, 7, 2, 8, 4],
        [2, 8, 7, 4, 1, 9, 6, 3, 5],
        [3, 4, 5, 2, 8, 6, 1, 7, 9],
    ];

    pub(crate) fn to_rows(fixture: &[[u8; 9]; 9]) -> Vec<Vec<u8>> {
        fixture.iter().map(|row| row.to_vec()).collect()
    }
}

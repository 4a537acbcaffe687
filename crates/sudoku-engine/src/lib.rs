//! Rules-and-solving engine for generalized Sudoku.
//!
//! A board is a square grid of side `rank * rank`, partitioned into
//! `rank x rank` blocks, where each row, column, and block may contain
//! each value `1..=size` at most once (the one rule). The engine covers
//! the full life of a game: validating and creating boards ([`Grid`],
//! [`Puzzle`]), enforcing move legality ([`Puzzle::play`]), deterministic
//! forced-value propagation ([`propagate`]), randomized backtracking with
//! uniqueness classification ([`Solver`]), and puzzle generation by
//! reduction of a full solution ([`Generator`]).
//!
//! ```
//! use sudoku_engine::{PlayResult, Puzzle};
//!
//! let rows = vec![
//!     vec![1, 0, 0, 0],
//!     vec![0, 0, 3, 0],
//!     vec![0, 0, 0, 2],
//!     vec![0, 3, 0, 0],
//! ];
//! let mut puzzle = Puzzle::create(&rows).expect("a playable 4x4 board");
//! assert_eq!(puzzle.play(0, 1, 3), PlayResult::ColumnViolation);
//! assert_eq!(puzzle.play(1, 0, 2), PlayResult::Valid);
//! ```

mod generator;
mod grid;
mod puzzle;
mod rng;
mod solver;

pub use generator::Generator;
pub use grid::{Grid, GridError};
pub use puzzle::{PlayResult, Puzzle, PuzzleError};
pub use solver::{propagate, Propagation, PropagationOutcome, Solution, SolutionKind, Solver};

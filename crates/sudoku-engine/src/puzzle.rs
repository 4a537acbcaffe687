//! The playable game: validated construction and rule-checked moves.
//!
//! A [`Puzzle`] owns one [`Grid`] plus the set of given cells captured at
//! construction. Givens are immutable for the puzzle's lifetime, and every
//! successful [`Puzzle::play`] leaves the board satisfying the one rule.

use crate::grid::{Grid, GridError};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Errors from [`Puzzle::create`]. Checks run in declaration order, so
/// structural problems shadow semantic ones.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PuzzleError {
    /// The matrix is not a usable board at all.
    Grid(GridError),
    /// A cell holds a value larger than the board size.
    ValueOutOfRange,
    /// Every cell is blank; there is nothing to solve.
    NoGivens,
    /// The supplied clues already violate the one rule.
    InvalidGivens,
    /// The board is complete and legal; there is nothing left to play.
    AlreadySolved,
}

impl From<GridError> for PuzzleError {
    fn from(err: GridError) -> Self {
        PuzzleError::Grid(err)
    }
}

impl fmt::Display for PuzzleError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PuzzleError::Grid(err) => write!(f, "{err}"),
            PuzzleError::ValueOutOfRange => {
                write!(f, "a cell value exceeds the board size")
            }
            PuzzleError::NoGivens => write!(f, "the board has no given cells"),
            PuzzleError::InvalidGivens => write!(f, "the given cells violate the one rule"),
            PuzzleError::AlreadySolved => write!(f, "the board is already solved"),
        }
    }
}

impl std::error::Error for PuzzleError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            PuzzleError::Grid(err) => Some(err),
            _ => None,
        }
    }
}

/// Outcome of one [`Puzzle::play`]. Anything other than `Valid` means the
/// board was left untouched and the move can simply be retried.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[must_use]
pub enum PlayResult {
    Valid,
    IndexOutOfBounds,
    InvalidValue,
    CannotOverwriteGiven,
    RowViolation,
    ColumnViolation,
    BlockViolation,
}

/// An in-progress game.
#[derive(Debug, Clone)]
pub struct Puzzle {
    grid: Grid,
    /// Row-major mask of the cells that were filled at creation.
    givens: Vec<bool>,
}

impl Puzzle {
    /// Validate a matrix and wrap it as a playable puzzle.
    ///
    /// Check order: board shape (see [`GridError`]), then value range,
    /// then presence of givens, then the one rule, then not-already-solved.
    pub fn create(rows: &[Vec<u8>]) -> Result<Puzzle, PuzzleError> {
        let grid = Grid::from_rows(rows)?;
        let size = grid.size();

        if grid.filled_cells().any(|(i, j)| grid.get(i, j) as usize > size) {
            return Err(PuzzleError::ValueOutOfRange);
        }
        if grid.filled_cells().next().is_none() {
            return Err(PuzzleError::NoGivens);
        }
        if !grid.is_legal() {
            return Err(PuzzleError::InvalidGivens);
        }
        if grid.is_solved() {
            return Err(PuzzleError::AlreadySolved);
        }

        let mut givens = vec![false; size * size];
        for (i, j) in grid.filled_cells() {
            givens[i * size + j] = true;
        }
        Ok(Puzzle { grid, givens })
    }

    pub fn rank(&self) -> usize {
        self.grid.rank()
    }

    pub fn size(&self) -> usize {
        self.grid.size()
    }

    /// Current value of a cell; `0` when blank. Panics out of bounds.
    pub fn value_at(&self, row: usize, col: usize) -> u8 {
        self.grid.get(row, col)
    }

    /// Whether the cell was filled at creation. False out of bounds.
    pub fn is_given(&self, row: usize, col: usize) -> bool {
        let size = self.grid.size();
        row < size && col < size && self.givens[row * size + col]
    }

    /// Attempt a move. Checks run strictly in order: bounds, value range,
    /// given-protection, row, column, block. Playing `0` erases the cell
    /// (blanks never violate the one rule, so the rule checks pass it
    /// through). The board changes only on `Valid`, and only at the
    /// target cell.
    pub fn play(&mut self, row: usize, col: usize, value: u8) -> PlayResult {
        let size = self.grid.size();

        if row >= size || col >= size {
            return PlayResult::IndexOutOfBounds;
        }
        if value as usize > size {
            return PlayResult::InvalidValue;
        }
        if self.givens[row * size + col] {
            return PlayResult::CannotOverwriteGiven;
        }
        if self.grid.row_values(row).contains(&value) {
            return PlayResult::RowViolation;
        }
        if self.grid.column_values(col).contains(&value) {
            return PlayResult::ColumnViolation;
        }
        let (block_row, block_col) = self.grid.block_of(row, col);
        if self.grid.block_values(block_row, block_col).contains(&value) {
            return PlayResult::BlockViolation;
        }

        self.grid.set(row, col, value);
        PlayResult::Valid
    }

    /// Reset every non-given cell to blank. Idempotent.
    pub fn clear(&mut self) {
        let size = self.grid.size();
        for row in 0..size {
            for col in 0..size {
                if !self.givens[row * size + col] {
                    self.grid.clear_cell(row, col);
                }
            }
        }
    }

    /// An independent copy of the current board.
    pub fn snapshot(&self) -> Grid {
        self.grid.clone()
    }

    pub fn is_solved(&self) -> bool {
        self.grid.is_solved()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fixture_4x4() -> Vec<Vec<u8>> {
        vec![
            vec![1, 0, 0, 0],
            vec![0, 0, 3, 0],
            vec![0, 0, 0, 2],
            vec![0, 3, 0, 0],
        ]
    }

    fn solved_4x4() -> Vec<Vec<u8>> {
        vec![
            vec![1, 2, 3, 4],
            vec![3, 4, 1, 2],
            vec![2, 1, 4, 3],
            vec![4, 3, 2, 1],
        ]
    }

    #[test]
    fn test_create_structural_error_shadows_no_givens() {
        // Both too small and all-blank; the structural check wins.
        let rows = vec![vec![0, 0], vec![0, 0]];
        assert_eq!(
            Puzzle::create(&rows).unwrap_err(),
            PuzzleError::Grid(GridError::TooSmall)
        );
    }

    #[test]
    fn test_create_no_givens() {
        let rows = vec![vec![0; 4]; 4];
        assert_eq!(Puzzle::create(&rows).unwrap_err(), PuzzleError::NoGivens);
    }

    #[test]
    fn test_create_value_out_of_range() {
        let mut rows = fixture_4x4();
        rows[2][0] = 5;
        assert_eq!(
            Puzzle::create(&rows).unwrap_err(),
            PuzzleError::ValueOutOfRange
        );
    }

    #[test]
    fn test_create_value_out_of_range_shadows_invalid_givens() {
        let rows = vec![
            vec![5, 5, 0, 0],
            vec![0; 4],
            vec![0; 4],
            vec![0; 4],
        ];
        assert_eq!(
            Puzzle::create(&rows).unwrap_err(),
            PuzzleError::ValueOutOfRange
        );
    }

    #[test]
    fn test_create_invalid_givens() {
        let rows = vec![
            vec![1, 2, 3, 3],
            vec![0; 4],
            vec![0; 4],
            vec![0; 4],
        ];
        assert_eq!(
            Puzzle::create(&rows).unwrap_err(),
            PuzzleError::InvalidGivens
        );
    }

    #[test]
    fn test_create_already_solved() {
        assert_eq!(
            Puzzle::create(&solved_4x4()).unwrap_err(),
            PuzzleError::AlreadySolved
        );
    }

    #[test]
    fn test_givens_are_recorded() {
        let puzzle = Puzzle::create(&fixture_4x4()).unwrap();
        assert!(puzzle.is_given(0, 0));
        assert!(puzzle.is_given(1, 2));
        assert!(!puzzle.is_given(0, 1));
        // Out of bounds is simply not a given.
        assert!(!puzzle.is_given(9, 9));
    }

    #[test]
    fn test_play_index_out_of_bounds() {
        let mut puzzle = Puzzle::create(&fixture_4x4()).unwrap();
        assert_eq!(puzzle.play(4, 0, 1), PlayResult::IndexOutOfBounds);
        assert_eq!(puzzle.play(0, 4, 1), PlayResult::IndexOutOfBounds);
    }

    #[test]
    fn test_play_invalid_value() {
        let mut puzzle = Puzzle::create(&fixture_4x4()).unwrap();
        assert_eq!(puzzle.play(0, 1, 5), PlayResult::InvalidValue);
    }

    #[test]
    fn test_play_invalid_value_shadows_given_protection() {
        let mut puzzle = Puzzle::create(&fixture_4x4()).unwrap();
        assert_eq!(puzzle.play(0, 0, 9), PlayResult::InvalidValue);
    }

    #[test]
    fn test_play_cannot_overwrite_given() {
        let mut puzzle = Puzzle::create(&fixture_4x4()).unwrap();
        assert_eq!(puzzle.play(0, 0, 2), PlayResult::CannotOverwriteGiven);
    }

    #[test]
    fn test_play_rule_violations_in_order() {
        let mut puzzle = Puzzle::create(&fixture_4x4()).unwrap();
        assert_eq!(puzzle.play(0, 1, 1), PlayResult::RowViolation);
        assert_eq!(puzzle.play(0, 1, 3), PlayResult::ColumnViolation);
        assert_eq!(puzzle.play(1, 1, 1), PlayResult::BlockViolation);
    }

    #[test]
    fn test_play_valid_changes_only_target_cell() {
        let mut puzzle = Puzzle::create(&fixture_4x4()).unwrap();
        let before = puzzle.snapshot();
        assert_eq!(puzzle.play(1, 0, 2), PlayResult::Valid);
        let after = puzzle.snapshot();
        assert_eq!(after.get(1, 0), 2);
        for (i, j) in (0..4).flat_map(|i| (0..4).map(move |j| (i, j))) {
            if (i, j) != (1, 0) {
                assert_eq!(after.get(i, j), before.get(i, j));
            }
        }
    }

    #[test]
    fn test_rejected_play_leaves_board_untouched() {
        let mut puzzle = Puzzle::create(&fixture_4x4()).unwrap();
        let before = puzzle.snapshot();
        let _ = puzzle.play(4, 0, 1);
        let _ = puzzle.play(0, 1, 5);
        let _ = puzzle.play(0, 0, 2);
        let _ = puzzle.play(0, 1, 1);
        let _ = puzzle.play(0, 1, 3);
        let _ = puzzle.play(1, 1, 1);
        assert_eq!(puzzle.snapshot(), before);
    }

    #[test]
    fn test_play_zero_erases() {
        let mut puzzle = Puzzle::create(&fixture_4x4()).unwrap();
        assert_eq!(puzzle.play(1, 0, 2), PlayResult::Valid);
        assert_eq!(puzzle.play(1, 0, 0), PlayResult::Valid);
        assert_eq!(puzzle.value_at(1, 0), 0);
    }

    #[test]
    fn test_clear_resets_to_givens_and_is_idempotent() {
        let mut puzzle = Puzzle::create(&fixture_4x4()).unwrap();
        let original = puzzle.snapshot();
        assert_eq!(puzzle.play(1, 0, 2), PlayResult::Valid);
        assert_eq!(puzzle.play(2, 2, 1), PlayResult::Valid);

        puzzle.clear();
        assert_eq!(puzzle.snapshot(), original);
        puzzle.clear();
        assert_eq!(puzzle.snapshot(), original);
    }

    #[test]
    fn test_solving_the_last_cells_reports_solved() {
        let mut rows = solved_4x4();
        rows[0][1] = 0;
        rows[3][3] = 0;
        let mut puzzle = Puzzle::create(&rows).unwrap();
        assert!(!puzzle.is_solved());
        assert_eq!(puzzle.play(0, 1, 2), PlayResult::Valid);
        assert!(!puzzle.is_solved());
        assert_eq!(puzzle.play(3, 3, 1), PlayResult::Valid);
        assert!(puzzle.is_solved());
    }

    #[test]
    fn test_serde_contract_enums() {
        let json = serde_json::to_string(&PlayResult::CannotOverwriteGiven).unwrap();
        assert_eq!(json, "\"CannotOverwriteGiven\"");

        let err = PuzzleError::Grid(GridError::NotPerfectSquare);
        let json = serde_json::to_string(&err).unwrap();
        let back: PuzzleError = serde_json::from_str(&json).unwrap();
        assert_eq!(back, err);
    }
}

//! Naked-single propagation to a fixed point.
//!
//! The guess-free half of solving: assign every cell whose candidate set
//! has shrunk to exactly one value, and keep sweeping until a sweep places
//! nothing. Each assignment strictly reduces the blank count, so the loop
//! terminates within `size * size` sweeps.

use crate::grid::Grid;

/// State of the board once propagation can do no more.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PropagationOutcome {
    /// Every cell filled. Necessarily legal: each assignment was forced.
    Complete,
    /// No forced cell remains; every blank has zero or several candidates.
    /// Whether the board is unsolvable or under-constrained is for the
    /// search solver to decide.
    Stalled,
}

/// Result of [`propagate`].
#[derive(Debug, Clone)]
pub struct Propagation {
    pub grid: Grid,
    pub outcome: PropagationOutcome,
    /// Whether any cell at all was assigned.
    pub made_progress: bool,
}

/// Run forced assignment to its fixed point on an owned copy. The
/// caller's grid is never touched; the caller decides whether to keep
/// the result.
pub fn propagate(grid: &Grid) -> Propagation {
    let mut board = grid.clone();
    let mut made_progress = false;

    // An assignment late in a sweep can force a cell visited earlier,
    // so sweep until quiescent.
    while sweep(&mut board) > 0 {
        made_progress = true;
    }

    let outcome = if board.is_complete() {
        PropagationOutcome::Complete
    } else {
        PropagationOutcome::Stalled
    };
    Propagation {
        grid: board,
        outcome,
        made_progress,
    }
}

/// One row-major pass assigning every naked single encountered. Returns
/// the number of cells placed.
fn sweep(board: &mut Grid) -> usize {
    let blanks: Vec<(usize, usize)> = board.blank_cells().collect();
    let mut placed = 0;
    for (row, col) in blanks {
        let candidates = board.candidates(row, col);
        if let [only] = candidates.as_slice() {
            board.set(row, col, *only);
            placed += 1;
        }
    }
    placed
}

#[cfg(test)]
mod tests {
    use super::super::test_grids::{to_rows, CANONICAL_9X9, CANONICAL_9X9_SOLUTION};
    use super::*;

    #[test]
    fn test_single_forced_cell() {
        let rows = vec![
            vec![0, 2, 3, 4],
            vec![3, 4, 1, 2],
            vec![2, 1, 4, 3],
            vec![4, 3, 2, 1],
        ];
        let grid = Grid::from_rows(&rows).unwrap();
        let result = propagate(&grid);
        assert_eq!(result.outcome, PropagationOutcome::Complete);
        assert!(result.made_progress);
        assert_eq!(result.grid.get(0, 0), 1);
    }

    #[test]
    fn test_canonical_puzzle_completes_without_guessing() {
        let grid = Grid::from_rows(&to_rows(CANONICAL_9X9)).unwrap();
        let result = propagate(&grid);
        assert_eq!(result.outcome, PropagationOutcome::Complete);
        assert_eq!(
            result.grid,
            Grid::from_rows(&to_rows(CANONICAL_9X9_SOLUTION)).unwrap()
        );
    }

    #[test]
    fn test_under_constrained_board_stalls() {
        let grid = Grid::from_rows(&vec![vec![0; 9]; 9]).unwrap();
        let result = propagate(&grid);
        assert_eq!(result.outcome, PropagationOutcome::Stalled);
        assert!(!result.made_progress);
    }

    #[test]
    fn test_caller_grid_is_untouched() {
        let rows = vec![
            vec![0, 2, 3, 4],
            vec![3, 4, 1, 2],
            vec![2, 1, 4, 3],
            vec![4, 3, 2, 1],
        ];
        let grid = Grid::from_rows(&rows).unwrap();
        let _ = propagate(&grid);
        assert!(grid.is_blank(0, 0));
    }

    #[test]
    fn test_completion_is_legal() {
        let grid = Grid::from_rows(&to_rows(CANONICAL_9X9)).unwrap();
        let result = propagate(&grid);
        assert!(result.grid.is_solved());
    }
}

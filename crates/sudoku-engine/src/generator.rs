//! Puzzle generation: randomized reference solution, then verified
//! cell removal.
//!
//! Building a solved board by backtracking from scratch is far too slow
//! for interactive use, so generation cheats: it permutes a known-good
//! solved grid with shuffles that cannot break the one rule, then blanks
//! cells one at a time, keeping each removal only while the solver still
//! proves the remainder uniquely solvable.

use crate::grid::Grid;
use crate::rng::SimpleRng;
use crate::solver::{SolutionKind, Solver};

/// The known-good rank-3 reference solution.
const REFERENCE_9X9: [[u8; 9]; 9] = [
    [6, 5, 3, 4, 1, 7, 9, 8, 2],
    [1, 8, 9, 5, 2, 3, 6, 4, 7],
    [2, 4, 7, 6, 8, 9, 1, 5, 3],
    [3, 7, 4, 2, 6, 1, 5, 9, 8],
    [9, 1, 5, 7, 4, 8, 3, 2, 6],
    [8, 2, 6, 3, 9, 5, 4, 7, 1],
    [4, 9, 2, 8, 3, 6, 7, 1, 5],
    [7, 6, 1, 9, 5, 2, 8, 3, 4],
    [5, 3, 8, 1, 7, 4, 2, 6, 9],
];

/// Sudoku puzzle generator with an injected randomness source.
pub struct Generator {
    rng: SimpleRng,
}

impl Default for Generator {
    fn default() -> Self {
        Self::new()
    }
}

impl Generator {
    /// Create a generator seeded from OS entropy.
    pub fn new() -> Self {
        Self {
            rng: SimpleRng::new(),
        }
    }

    /// Create a generator with a fixed seed for reproducible puzzles.
    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: SimpleRng::with_seed(seed),
        }
    }

    /// Generate a puzzle of side `rank * rank` with a unique solution,
    /// as a matrix ready for `Puzzle::create`.
    ///
    /// Panics if `rank < 2`; smaller boards are below the engine's 4x4
    /// minimum, so asking for one is a programming error.
    pub fn generate(&mut self, rank: usize) -> Vec<Vec<u8>> {
        assert!(rank >= 2, "rank {rank} is below the 4x4 board minimum");

        let mut rows = reference_rows(rank);
        self.shuffle_rows(&mut rows, rank);
        self.shuffle_columns(&mut rows, rank);

        let mut grid = Grid::from_rows(&rows).expect("the reference grid is well-formed");
        self.remove_cells(&mut grid);
        grid.rows()
    }

    /// Shuffle whole rows within each band, then the bands themselves.
    /// Row and block membership move as units, so the one rule is
    /// preserved without a re-check.
    fn shuffle_rows(&mut self, rows: &mut Vec<Vec<u8>>, rank: usize) {
        let order = self.banded_order(rank);
        *rows = order.iter().map(|&r| rows[r].clone()).collect();
    }

    /// The column-side mirror of [`Generator::shuffle_rows`].
    fn shuffle_columns(&mut self, rows: &mut [Vec<u8>], rank: usize) {
        let order = self.banded_order(rank);
        for row in rows.iter_mut() {
            *row = order.iter().map(|&c| row[c]).collect();
        }
    }

    /// A permutation of `0..rank * rank` that only reorders indices within
    /// a band and whole bands relative to each other.
    fn banded_order(&mut self, rank: usize) -> Vec<usize> {
        let mut bands: Vec<Vec<usize>> = (0..rank)
            .map(|band| (band * rank..(band + 1) * rank).collect())
            .collect();
        for band in &mut bands {
            self.rng.shuffle(band);
        }
        self.rng.shuffle(&mut bands);
        bands.into_iter().flatten().collect()
    }

    /// Blank cells one at a time in random order, keeping a removal only
    /// when the remainder still has a unique solution. Passes repeat until
    /// one removes nothing: a local fixed point, not a minimal clue count.
    fn remove_cells(&mut self, grid: &mut Grid) {
        while self.removal_pass(grid) > 0 {}
    }

    fn removal_pass(&mut self, grid: &mut Grid) -> usize {
        let mut filled: Vec<(usize, usize)> = grid.filled_cells().collect();
        self.rng.shuffle(&mut filled);

        let mut removed = 0;
        for (row, col) in filled {
            let old_value = grid.get(row, col);
            grid.clear_cell(row, col);

            let mut solver = Solver::with_seed(self.rng.next_u64());
            if solver.solve(grid).kind == SolutionKind::SingleSolution {
                removed += 1;
            } else {
                grid.set(row, col, old_value);
            }
        }
        removed
    }
}

fn reference_rows(rank: usize) -> Vec<Vec<u8>> {
    if rank == 3 {
        return REFERENCE_9X9.iter().map(|row| row.to_vec()).collect();
    }

    // For other ranks, the cyclic band construction: row i is 1..=size
    // rotated left by i * rank + i / rank, which keeps every row, column,
    // and block duplicate-free.
    let size = rank * rank;
    (0..size)
        .map(|i| {
            (0..size)
                .map(|j| (((i * rank + i / rank + j) % size) + 1) as u8)
                .collect()
        })
        .collect()
}

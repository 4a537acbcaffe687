//! Board representation and the one rule.
//!
//! A [`Grid`] is a square matrix of side `rank * rank`, partitioned into
//! `rank x rank` blocks. Cell values run `1..=size`; `0` marks a blank.
//! The one rule: no row, column, or block repeats a non-zero value.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Errors from building a [`Grid`] out of a caller-supplied matrix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GridError {
    /// Side length below 4, the smallest playable board.
    TooSmall,
    /// Rows of unequal length.
    Jagged,
    /// Side length with no integer square root, so no block structure.
    NotPerfectSquare,
}

impl fmt::Display for GridError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GridError::TooSmall => write!(f, "board side length must be at least 4"),
            GridError::Jagged => write!(f, "board rows must all have the same length"),
            GridError::NotPerfectSquare => {
                write!(f, "board side length must be a perfect square")
            }
        }
    }
}

impl std::error::Error for GridError {}

/// A Sudoku board, stored row-major. Mutating accessors trust their
/// callers: index validation for untrusted input lives in `Puzzle`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Grid {
    size: usize,
    rank: usize,
    cells: Vec<u8>,
}

impl Grid {
    /// Build a grid from a matrix, deep-copying the input.
    ///
    /// The row count fixes the side length; every row must match it and
    /// it must be a perfect square of at least 4. Cell values are not
    /// range-checked here (`Puzzle::create` rejects out-of-range values
    /// at the boundary).
    pub fn from_rows(rows: &[Vec<u8>]) -> Result<Grid, GridError> {
        let size = rows.len();
        if size < 4 {
            return Err(GridError::TooSmall);
        }
        if rows.iter().any(|row| row.len() != size) {
            return Err(GridError::Jagged);
        }
        let rank = integer_sqrt(size).ok_or(GridError::NotPerfectSquare)?;

        let mut cells = Vec::with_capacity(size * size);
        for row in rows {
            cells.extend_from_slice(row);
        }
        Ok(Grid { size, rank, cells })
    }

    /// Side length of the board, `rank * rank`.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Side length of one block.
    pub fn rank(&self) -> usize {
        self.rank
    }

    pub fn get(&self, row: usize, col: usize) -> u8 {
        self.cells[self.index(row, col)]
    }

    pub fn set(&mut self, row: usize, col: usize, value: u8) {
        let idx = self.index(row, col);
        self.cells[idx] = value;
    }

    pub fn clear_cell(&mut self, row: usize, col: usize) {
        self.set(row, col, 0);
    }

    pub fn is_blank(&self, row: usize, col: usize) -> bool {
        self.get(row, col) == 0
    }

    fn index(&self, row: usize, col: usize) -> usize {
        assert!(
            row < self.size && col < self.size,
            "cell ({row}, {col}) is outside a {n}x{n} board",
            n = self.size
        );
        row * self.size + col
    }

    /// Non-blank values of a row, in grid order.
    pub fn row_values(&self, row: usize) -> Vec<u8> {
        (0..self.size)
            .map(|col| self.get(row, col))
            .filter(|&v| v != 0)
            .collect()
    }

    /// Non-blank values of a column, in grid order.
    pub fn column_values(&self, col: usize) -> Vec<u8> {
        (0..self.size)
            .map(|row| self.get(row, col))
            .filter(|&v| v != 0)
            .collect()
    }

    /// Non-blank values of a block, row-major within the block.
    pub fn block_values(&self, block_row: usize, block_col: usize) -> Vec<u8> {
        self.block_cells(block_row, block_col)
            .map(|(i, j)| self.get(i, j))
            .filter(|&v| v != 0)
            .collect()
    }

    /// Coordinates of the block containing cell `(row, col)`.
    pub fn block_of(&self, row: usize, col: usize) -> (usize, usize) {
        (row / self.rank, col / self.rank)
    }

    /// Cells of block `(block_row, block_col)`, row-major.
    pub fn block_cells(
        &self,
        block_row: usize,
        block_col: usize,
    ) -> impl Iterator<Item = (usize, usize)> {
        let rank = self.rank;
        let top = block_row * rank;
        let left = block_col * rank;
        (top..top + rank).flat_map(move |i| (left..left + rank).map(move |j| (i, j)))
    }

    pub fn row_is_legal(&self, row: usize) -> bool {
        distinct_non_blank(self.row_values(row))
    }

    pub fn column_is_legal(&self, col: usize) -> bool {
        distinct_non_blank(self.column_values(col))
    }

    pub fn block_is_legal(&self, block_row: usize, block_col: usize) -> bool {
        distinct_non_blank(self.block_values(block_row, block_col))
    }

    /// The full one-rule check: every row, column, and block free of
    /// duplicate non-zero values.
    pub fn is_legal(&self) -> bool {
        (0..self.size).all(|i| self.row_is_legal(i))
            && (0..self.size).all(|j| self.column_is_legal(j))
            && (0..self.rank).all(|bi| (0..self.rank).all(|bj| self.block_is_legal(bi, bj)))
    }

    /// Values still playable at `(row, col)`: `1..=size` minus everything
    /// visible from the cell's row, column, and block. Ascending order.
    pub fn candidates(&self, row: usize, col: usize) -> Vec<u8> {
        let mut taken = [false; 256];
        for v in self.row_values(row) {
            taken[v as usize] = true;
        }
        for v in self.column_values(col) {
            taken[v as usize] = true;
        }
        let (block_row, block_col) = self.block_of(row, col);
        for v in self.block_values(block_row, block_col) {
            taken[v as usize] = true;
        }
        (1..=self.size as u8).filter(|&v| !taken[v as usize]).collect()
    }

    /// True when no blank cells remain.
    pub fn is_complete(&self) -> bool {
        self.cells.iter().all(|&v| v != 0)
    }

    /// Complete and legal.
    pub fn is_solved(&self) -> bool {
        self.is_complete() && self.is_legal()
    }

    /// Blank cells in row-major order. Lazy; call again to restart.
    pub fn blank_cells(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.positions().filter(|&(i, j)| self.is_blank(i, j))
    }

    /// Non-blank cells in row-major order.
    pub fn filled_cells(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.positions().filter(|&(i, j)| !self.is_blank(i, j))
    }

    fn positions(&self) -> impl Iterator<Item = (usize, usize)> {
        let size = self.size;
        (0..size).flat_map(move |i| (0..size).map(move |j| (i, j)))
    }

    /// The board as a matrix, deep-copied.
    pub fn rows(&self) -> Vec<Vec<u8>> {
        (0..self.size)
            .map(|i| (0..self.size).map(|j| self.get(i, j)).collect())
            .collect()
    }

    fn separator_line(&self, width: usize) -> String {
        let segment = "-".repeat(self.rank * (width + 1) + 1);
        let mut line = String::new();
        for _ in 0..self.rank {
            line.push('+');
            line.push_str(&segment);
        }
        line.push('+');
        line
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let width = if self.size >= 10 { 2 } else { 1 };
        for i in 0..self.size {
            if i % self.rank == 0 {
                writeln!(f, "{}", self.separator_line(width))?;
            }
            for j in 0..self.size {
                if j % self.rank == 0 {
                    write!(f, "| ")?;
                }
                match self.get(i, j) {
                    0 => write!(f, "{:>width$} ", ".")?,
                    v => write!(f, "{v:>width$} ")?,
                }
            }
            writeln!(f, "|")?;
        }
        write!(f, "{}", self.separator_line(width))
    }
}

/// True when the (already blank-filtered) values are pairwise distinct.
fn distinct_non_blank(values: Vec<u8>) -> bool {
    let mut seen = [false; 256];
    for v in values {
        if seen[v as usize] {
            return false;
        }
        seen[v as usize] = true;
    }
    true
}

fn integer_sqrt(n: usize) -> Option<usize> {
    let root = (n as f64).sqrt().round() as usize;
    (root * root == n).then_some(root)
}

//! Basic walkthrough of the Sudoku engine.

use sudoku_engine::{Generator, PlayResult, Puzzle, SolutionKind, Solver};

fn main() {
    println!("Generating a rank-3 puzzle...\n");
    let mut generator = Generator::new();
    let rows = generator.generate(3);

    let mut puzzle = match Puzzle::create(&rows) {
        Ok(puzzle) => puzzle,
        Err(err) => {
            eprintln!("generator produced an unplayable board: {err}");
            return;
        }
    };

    let board = puzzle.snapshot();
    println!("{board}");
    let givens = rows.iter().flatten().filter(|&&v| v != 0).count();
    println!("Given cells: {givens}");
    println!("Blank cells: {}\n", 81 - givens);

    // Poke at the first blank cell until something sticks.
    if let Some((row, col)) = board.blank_cells().next() {
        for value in 1..=9u8 {
            match puzzle.play(row, col, value) {
                PlayResult::Valid => {
                    println!("Played {value} at ({row}, {col})\n");
                    break;
                }
                rejection => println!("{value} at ({row}, {col}) rejected: {rejection:?}"),
            }
        }
    }

    println!("Solving the original puzzle...\n");
    let mut solver = Solver::new();
    let solution = solver.solve(&board);
    match solution.kind {
        SolutionKind::SingleSolution => {
            println!("Unique solution:");
            println!("{}", solution.grid);
        }
        SolutionKind::MultipleSolutions => {
            println!("Multiple solutions; one representative:");
            println!("{}", solution.grid);
        }
        SolutionKind::NoSolution => {
            println!("No solution (this shouldn't happen for a generated puzzle!)");
        }
    }
}

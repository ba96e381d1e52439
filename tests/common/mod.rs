//! Fixtures shared by the integration tests.

#![allow(dead_code)]

use sudoku_classic::puzzle::{Difficulty, Position, Puzzle, PuzzlePayload};

pub const SOLUTION: [[u8; 9]; 9] = [
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

/// Cells left empty in [`payload`].
pub const HOLES: [(usize, usize); 6] = [(0, 0), (1, 4), (2, 5), (4, 4), (6, 2), (8, 8)];

/// Route library logs to the test harness; `RUST_LOG` picks the level.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

pub fn payload() -> PuzzlePayload {
    let solution: Vec<Vec<u8>> = SOLUTION.iter().map(|r| r.to_vec()).collect();
    let mut puzzle = solution.clone();
    for (row, col) in HOLES {
        puzzle[row][col] = 0;
    }
    PuzzlePayload { puzzle, solution }
}

pub fn puzzle(difficulty: Difficulty) -> Puzzle {
    payload().into_puzzle(difficulty).unwrap()
}

pub fn pos(row: usize, col: usize) -> Position {
    Position::new(row, col).unwrap()
}

pub fn is_hole(p: Position) -> bool {
    HOLES.contains(&(p.row(), p.col()))
}

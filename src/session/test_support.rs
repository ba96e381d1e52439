//! Fixtures shared by the session unit tests.

use super::machine::Session;
use crate::puzzle::{Difficulty, Digit, Position, Puzzle, PuzzlePayload};

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

/// Cells left empty in [`sample_puzzle`].
pub const HOLES: [(usize, usize); 4] = [(0, 0), (2, 5), (4, 4), (8, 8)];

pub fn pos(row: usize, col: usize) -> Position {
    Position::new(row, col).unwrap()
}

/// [`SOLUTION`] with the [`HOLES`] blanked out, as the puzzle source sends it.
pub fn sample_payload() -> PuzzlePayload {
    let solution: Vec<Vec<u8>> = SOLUTION.iter().map(|r| r.to_vec()).collect();
    let mut puzzle = solution.clone();
    for (row, col) in HOLES {
        puzzle[row][col] = 0;
    }
    PuzzlePayload { puzzle, solution }
}

pub fn sample_puzzle(difficulty: Difficulty) -> Puzzle {
    sample_payload().into_puzzle(difficulty).unwrap()
}

pub fn empty_cells(session: &Session) -> Vec<Position> {
    Position::all()
        .filter(|p| session.current().get(*p).is_none())
        .collect()
}

/// Fill every empty cell but the last with its answer; returns the last
/// cell and its answer.
pub fn solve_all_but_last(session: &mut Session) -> (Position, Digit) {
    let mut empty = empty_cells(session);
    let last = empty.pop().unwrap();
    for p in empty {
        let answer = session.solution().get(p).unwrap();
        session.select_cell(p);
        session.enter_digit(answer);
    }
    (last, session.solution().get(last).unwrap())
}

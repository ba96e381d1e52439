//! Puzzle source payload ingest.
//!
//! The puzzle source answers with `{"puzzle": [[..]], "solution": [[..]]}`,
//! two 9x9 integer matrices where `0` marks an empty cell. Validation
//! accumulates every problem in the payload instead of stopping at the first,
//! so a bad response can be reported in full.

use super::error::{GridKind, PayloadProblem, PuzzleError};
use super::grid::{Difficulty, Grid, GRID_SIZE};
use serde::{Deserialize, Serialize};
use stillwater::validation::Validation;
use stillwater::NonEmptyVec;

type Check = Validation<(), NonEmptyVec<PayloadProblem>>;

/// Raw response body from the puzzle source.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PuzzlePayload {
    pub puzzle: Vec<Vec<u8>>,
    pub solution: Vec<Vec<u8>>,
}

/// A validated puzzle ready to start a session.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Puzzle {
    pub difficulty: Difficulty,
    /// Pre-filled cells; every other cell is empty
    pub givens: Grid,
    /// Fully solved reference grid
    pub solution: Grid,
}

impl PuzzlePayload {
    pub fn from_json(body: &str) -> Result<Self, PuzzleError> {
        Ok(serde_json::from_str(body)?)
    }

    /// Check the payload, accumulating ALL problems.
    ///
    /// Solution validity as a Sudoku is the source's guarantee and is not
    /// checked here.
    pub fn validate(&self) -> Check {
        let mut checks: Vec<Check> = Vec::new();

        checks.extend(shape_checks(GridKind::Puzzle, &self.puzzle));
        checks.extend(shape_checks(GridKind::Solution, &self.solution));

        for (row, cells) in self.solution.iter().enumerate() {
            for (col, &value) in cells.iter().enumerate() {
                if value == 0 {
                    checks.push(Validation::fail(PayloadProblem::EmptySolutionCell {
                        row,
                        col,
                    }));
                }
            }
        }

        for (row, (given_row, solution_row)) in self.puzzle.iter().zip(&self.solution).enumerate() {
            for (col, (&given, &expected)) in given_row.iter().zip(solution_row).enumerate() {
                let comparable = given != 0 && expected != 0 && given <= 9 && expected <= 9;
                if comparable && given != expected {
                    checks.push(Validation::fail(PayloadProblem::GivenConflictsSolution {
                        row,
                        col,
                        given,
                        expected,
                    }));
                }
            }
        }

        Validation::all_vec(checks).map(|_| ())
    }

    /// Validate and convert into a [`Puzzle`].
    pub fn into_puzzle(self, difficulty: Difficulty) -> Result<Puzzle, PuzzleError> {
        if let Validation::Failure(problems) = self.validate() {
            return Err(PuzzleError::Malformed(problems.iter().cloned().collect()));
        }

        Ok(Puzzle {
            difficulty,
            givens: Grid::from_raw(&self.puzzle)?,
            solution: Grid::from_raw(&self.solution)?,
        })
    }
}

fn shape_checks(grid: GridKind, rows: &[Vec<u8>]) -> Vec<Check> {
    let mut checks = Vec::new();

    if rows.len() != GRID_SIZE {
        checks.push(Validation::fail(PayloadProblem::WrongRowCount {
            grid,
            found: rows.len(),
        }));
    }

    for (row, cells) in rows.iter().enumerate() {
        if cells.len() != GRID_SIZE {
            checks.push(Validation::fail(PayloadProblem::WrongColumnCount {
                grid,
                row,
                found: cells.len(),
            }));
        }
        for (col, &value) in cells.iter().enumerate() {
            if value > 9 {
                checks.push(Validation::fail(PayloadProblem::ValueOutOfRange {
                    grid,
                    row,
                    col,
                    value,
                }));
            }
        }
    }

    checks
}

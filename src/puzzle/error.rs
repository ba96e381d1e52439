//! Puzzle ingest error types.

use std::fmt;
use thiserror::Error;

/// Which payload grid a problem was found in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GridKind {
    Puzzle,
    Solution,
}

impl fmt::Display for GridKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Puzzle => f.write_str("puzzle"),
            Self::Solution => f.write_str("solution"),
        }
    }
}

/// A single defect found while validating a puzzle payload.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum PayloadProblem {
    #[error("{grid} has {found} rows, expected 9")]
    WrongRowCount { grid: GridKind, found: usize },

    #[error("{grid} row {row} has {found} cells, expected 9")]
    WrongColumnCount {
        grid: GridKind,
        row: usize,
        found: usize,
    },

    #[error("{grid} cell ({row}, {col}) holds {value}, expected 0-9")]
    ValueOutOfRange {
        grid: GridKind,
        row: usize,
        col: usize,
        value: u8,
    },

    #[error("solution cell ({row}, {col}) is empty")]
    EmptySolutionCell { row: usize, col: usize },

    #[error("given {given} at ({row}, {col}) disagrees with solution {expected}")]
    GivenConflictsSolution {
        row: usize,
        col: usize,
        given: u8,
        expected: u8,
    },
}

/// Errors raised while obtaining or ingesting a puzzle.
#[derive(Debug, Error)]
pub enum PuzzleError {
    /// The payload was not valid JSON of the expected shape
    #[error("puzzle payload could not be parsed: {0}")]
    Parse(#[from] serde_json::Error),

    /// The payload parsed but failed validation; every problem is listed
    #[error("puzzle payload is malformed ({} problem(s))", .0.len())]
    Malformed(Vec<PayloadProblem>),

    /// A grid did not have 9 rows of 9 cells
    #[error("grid is not 9x9")]
    ShapeMismatch,

    #[error("position ({row}, {col}) is outside the grid")]
    PositionOutOfBounds { row: usize, col: usize },

    #[error("{0} is not a digit in 1-9")]
    InvalidDigit(u8),

    #[error("unknown difficulty '{0}'")]
    UnknownDifficulty(String),

    /// The puzzle source could not deliver a payload
    #[error("puzzle fetch failed: {0}")]
    Fetch(String),
}

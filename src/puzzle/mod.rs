//! Puzzle model and ingest.
//!
//! Grids, digits and difficulties, plus validation of the payload delivered
//! by the external puzzle source. Puzzle generation itself happens elsewhere.

pub mod error;
mod grid;
mod payload;
mod source;

pub use error::{GridKind, PayloadProblem, PuzzleError};
pub use grid::{Cell, Difficulty, Digit, Grid, Position, GRID_SIZE};
pub use payload::{Puzzle, PuzzlePayload};
pub use source::{PuzzleSource, StaticPuzzleSource};

//! Grid value types: digits, cells, positions and the 9x9 grid itself.

use super::error::PuzzleError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Side length of the grid.
pub const GRID_SIZE: usize = 9;

/// A digit in `1..=9`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Digit(u8);

impl Digit {
    /// Returns `None` unless `value` is in `1..=9`.
    pub fn new(value: u8) -> Option<Self> {
        (1..=9).contains(&value).then_some(Self(value))
    }

    pub fn get(self) -> u8 {
        self.0
    }

    /// All nine digits in ascending order.
    pub fn all() -> impl Iterator<Item = Digit> {
        (1..=9).map(Digit)
    }
}

impl TryFrom<u8> for Digit {
    type Error = PuzzleError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Digit::new(value).ok_or(PuzzleError::InvalidDigit(value))
    }
}

impl From<Digit> for u8 {
    fn from(digit: Digit) -> Self {
        digit.0
    }
}

impl fmt::Display for Digit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A grid cell: empty, or holding a digit.
pub type Cell = Option<Digit>;

/// Zero-based (row, column) coordinate inside the grid.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawPosition")]
pub struct Position {
    row: u8,
    col: u8,
}

#[derive(Deserialize)]
struct RawPosition {
    row: u8,
    col: u8,
}

impl TryFrom<RawPosition> for Position {
    type Error = PuzzleError;

    fn try_from(raw: RawPosition) -> Result<Self, Self::Error> {
        let (row, col) = (usize::from(raw.row), usize::from(raw.col));
        Position::new(row, col).ok_or(PuzzleError::PositionOutOfBounds { row, col })
    }
}

impl Position {
    /// Returns `None` when either coordinate is outside `0..9`.
    pub fn new(row: usize, col: usize) -> Option<Self> {
        if row < GRID_SIZE && col < GRID_SIZE {
            Some(Self {
                row: row as u8,
                col: col as u8,
            })
        } else {
            None
        }
    }

    pub fn row(self) -> usize {
        self.row as usize
    }

    pub fn col(self) -> usize {
        self.col as usize
    }

    /// Every position, row-major.
    pub fn all() -> impl Iterator<Item = Position> {
        (0..GRID_SIZE as u8).flat_map(|row| (0..GRID_SIZE as u8).map(move |col| Position { row, col }))
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "r{}c{}", self.row + 1, self.col + 1)
    }
}

/// A fixed 9x9 matrix of cells.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Grid {
    cells: [[Cell; GRID_SIZE]; GRID_SIZE],
}

impl Default for Grid {
    fn default() -> Self {
        Self::empty()
    }
}

impl Grid {
    pub fn empty() -> Self {
        Self {
            cells: [[None; GRID_SIZE]; GRID_SIZE],
        }
    }

    pub fn get(&self, pos: Position) -> Cell {
        self.cells[pos.row()][pos.col()]
    }

    /// Returns a copy of the grid with `pos` set to `cell`.
    pub fn with(&self, pos: Position, cell: Cell) -> Self {
        let mut next = self.clone();
        next.cells[pos.row()][pos.col()] = cell;
        next
    }

    pub fn is_filled(&self, pos: Position) -> bool {
        self.get(pos).is_some()
    }

    /// True when no cell is empty.
    pub fn is_complete(&self) -> bool {
        self.cells.iter().flatten().all(Option::is_some)
    }

    pub fn filled_count(&self) -> usize {
        self.cells.iter().flatten().filter(|c| c.is_some()).count()
    }

    /// Builds a grid from raw rows where `0` means empty.
    ///
    /// Shape and range are expected to be checked by the caller; out-of-range
    /// values are rejected here as well.
    pub fn from_raw(rows: &[Vec<u8>]) -> Result<Self, PuzzleError> {
        let mut grid = Self::empty();
        for pos in Position::all() {
            let value = rows
                .get(pos.row())
                .and_then(|row| row.get(pos.col()))
                .copied()
                .ok_or(PuzzleError::ShapeMismatch)?;
            grid.cells[pos.row()][pos.col()] = match value {
                0 => None,
                v => Some(Digit::try_from(v)?),
            };
        }
        Ok(grid)
    }

    /// Raw rows with `0` for empty cells.
    pub fn to_raw(&self) -> Vec<Vec<u8>> {
        self.cells
            .iter()
            .map(|row| row.iter().map(|c| c.map_or(0, Digit::get)).collect())
            .collect()
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in &self.cells {
            let line: String = row
                .iter()
                .map(|c| c.map_or('.', |d| char::from(b'0' + d.get())))
                .collect();
            writeln!(f, "{line}")?;
        }
        Ok(())
    }
}

/// Puzzle difficulty requested from the puzzle source.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    #[default]
    Medium,
    Hard,
}

impl Difficulty {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Easy => "easy",
            Self::Medium => "medium",
            Self::Hard => "hard",
        }
    }

    /// Score multiplier applied at completion.
    pub fn multiplier(self) -> f64 {
        match self {
            Self::Easy => 1.0,
            Self::Medium => 1.5,
            Self::Hard => 2.0,
        }
    }
}

impl FromStr for Difficulty {
    type Err = PuzzleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "easy" => Ok(Self::Easy),
            "medium" => Ok(Self::Medium),
            "hard" => Ok(Self::Hard),
            other => Err(PuzzleError::UnknownDifficulty(other.to_string())),
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

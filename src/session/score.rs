//! Completion scoring.

use crate::puzzle::Difficulty;

/// Points a flawless instant solve is worth before the difficulty multiplier.
pub const BASE_SCORE: i64 = 1000;

/// Points deducted per mistake.
pub const MISTAKE_PENALTY: i64 = 50;

/// Score for a completed session.
///
/// `floor(max(0, 1000 - elapsed - 50 * mistakes) * multiplier)`; one point is
/// lost per elapsed second.
///
/// # Example
///
/// ```rust
/// use sudoku_classic::puzzle::Difficulty;
/// use sudoku_classic::session::score;
///
/// assert_eq!(score(Difficulty::Easy, 100, 2), 800);
/// assert_eq!(score(Difficulty::Hard, 100, 2), 1600);
/// assert_eq!(score(Difficulty::Easy, 2000, 0), 0);
/// ```
pub fn score(difficulty: Difficulty, elapsed_seconds: u64, mistakes: u32) -> u64 {
    let elapsed = i64::try_from(elapsed_seconds).unwrap_or(i64::MAX);
    let raw = BASE_SCORE
        .saturating_sub(elapsed)
        .saturating_sub(MISTAKE_PENALTY.saturating_mul(i64::from(mistakes)))
        .max(0);

    (raw as f64 * difficulty.multiplier()).floor() as u64
}

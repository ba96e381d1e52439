//! Aggregate statistics over a ledger.

use super::record::GameRecord;
use serde::{Deserialize, Serialize};

/// Totals and bests across all recorded games. All zero for an empty ledger.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameStatistics {
    pub total_games: usize,
    pub total_score: u64,
    /// Rounded to the nearest point, halves up
    pub average_score: u64,
    pub best_score: u64,
    /// Rounded to the nearest second, halves up
    pub average_time: u64,
    /// Fastest completion in seconds
    pub best_time: u64,
    pub total_mistakes: u64,
}

impl GameStatistics {
    pub fn from_records(records: &[GameRecord]) -> Self {
        if records.is_empty() {
            return Self::default();
        }

        let games = records.len() as u64;
        let total_score: u64 = records.iter().map(|r| r.score).sum();
        let total_time: u64 = records.iter().map(|r| r.time_seconds).sum();

        Self {
            total_games: records.len(),
            total_score,
            average_score: rounded_mean(total_score, games),
            best_score: records.iter().map(|r| r.score).max().unwrap_or(0),
            average_time: rounded_mean(total_time, games),
            best_time: records.iter().map(|r| r.time_seconds).min().unwrap_or(0),
            total_mistakes: records.iter().map(|r| u64::from(r.mistakes)).sum(),
        }
    }
}

fn rounded_mean(total: u64, count: u64) -> u64 {
    (total + count / 2) / count
}

//! Read-only session views for the presentation layer.

use super::machine::Session;
use super::status::SessionStatus;
use crate::puzzle::{Difficulty, Grid, Position};
use serde::{Deserialize, Serialize};

/// Everything a screen needs to render a session.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SessionSnapshot {
    pub difficulty: Difficulty,
    pub givens: Grid,
    pub grid: Grid,
    pub selected: Option<Position>,
    pub status: SessionStatus,
    pub mistakes: u32,
    pub elapsed_seconds: u64,
    /// Set once the session is completed
    pub score: Option<u64>,
}

impl SessionSnapshot {
    pub(crate) fn of(session: &Session) -> Self {
        Self {
            difficulty: session.difficulty(),
            givens: session.original().clone(),
            grid: session.current().clone(),
            selected: session.selected(),
            status: session.status(),
            mistakes: session.mistakes(),
            elapsed_seconds: session.elapsed_seconds(),
            score: session.score(),
        }
    }

    /// Elapsed time as `MM:SS`.
    pub fn clock(&self) -> String {
        format_elapsed(self.elapsed_seconds)
    }

    /// Mistake counter as shown on screen, e.g. `2/3`.
    pub fn mistake_label(&self) -> String {
        format!("{}/{}", self.mistakes, Session::MISTAKE_DISPLAY_LIMIT)
    }
}

/// Format seconds as zero-padded `MM:SS`. Minutes are not wrapped into hours.
pub fn format_elapsed(seconds: u64) -> String {
    format!("{:02}:{:02}", seconds / 60, seconds % 60)
}

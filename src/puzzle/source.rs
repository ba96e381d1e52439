//! Puzzle source capability.

use super::error::PuzzleError;
use super::grid::Difficulty;
use super::payload::{Puzzle, PuzzlePayload};
use async_trait::async_trait;
use std::collections::HashMap;

/// Supplier of generated puzzles.
///
/// Implementations fetch a payload for the requested difficulty; the core
/// only validates and consumes it. Failures are returned as-is and are never
/// retried here.
#[async_trait]
pub trait PuzzleSource: Send + Sync {
    async fn fetch(&self, difficulty: Difficulty) -> Result<PuzzlePayload, PuzzleError>;

    /// Fetch and validate in one step.
    async fn fetch_puzzle(&self, difficulty: Difficulty) -> Result<Puzzle, PuzzleError> {
        let payload = self.fetch(difficulty).await?;
        payload.into_puzzle(difficulty)
    }
}

/// Source serving fixed payloads per difficulty.
#[derive(Clone, Debug, Default)]
pub struct StaticPuzzleSource {
    payloads: HashMap<Difficulty, PuzzlePayload>,
}

impl StaticPuzzleSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, difficulty: Difficulty, payload: PuzzlePayload) -> Self {
        self.payloads.insert(difficulty, payload);
        self
    }
}

#[async_trait]
impl PuzzleSource for StaticPuzzleSource {
    async fn fetch(&self, difficulty: Difficulty) -> Result<PuzzlePayload, PuzzleError> {
        self.payloads
            .get(&difficulty)
            .cloned()
            .ok_or_else(|| PuzzleError::Fetch(format!("no {difficulty} puzzle available")))
    }
}

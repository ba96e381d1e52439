//! The game loop end to end.
//!
//! [`GameFlow`] ties the capabilities together: a puzzle comes from the
//! source and starts a session; a completed session's record is appended to
//! the local ledger and, when an identity is present, pushed upstream. The
//! history view is the merged remote/local one for an identity and the plain
//! ledger otherwise.

use crate::config::Config;
use crate::history::{
    GameRecord, GameStatistics, HistoryError, HistoryReconciler, HistoryStore, KeyValueStore,
    NewGameRecord, RemoteStore,
};
use crate::identity::AuthSnapshot;
use crate::puzzle::{Difficulty, PuzzleError, PuzzleSource};
use crate::session::{LiveSession, Session};
use std::time::Duration;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum FlowError {
    #[error("puzzle unavailable: {0}")]
    Puzzle(#[from] PuzzleError),

    #[error(transparent)]
    History(#[from] HistoryError),
}

/// What happened to a completed game's upload.
#[derive(Debug)]
pub enum SyncStatus {
    /// No identity; the record stays local.
    LocalOnly,
    /// Every pending record was uploaded.
    Synced { uploaded: usize },
    /// The upload failed. The record is stored locally and still unsynced.
    Deferred(HistoryError),
}

impl SyncStatus {
    pub fn is_deferred(&self) -> bool {
        matches!(self, Self::Deferred(_))
    }
}

/// Result of [`GameFlow::record_completion`].
#[derive(Debug)]
pub struct Completion {
    pub record: GameRecord,
    pub sync: SyncStatus,
}

pub struct GameFlow<K: KeyValueStore, R: RemoteStore, P: PuzzleSource> {
    history: HistoryStore<K>,
    remote: R,
    source: P,
    tick_interval: Duration,
}

impl<K: KeyValueStore, R: RemoteStore, P: PuzzleSource> GameFlow<K, R, P> {
    pub fn new(history: HistoryStore<K>, remote: R, source: P) -> Self {
        Self {
            history,
            remote,
            source,
            tick_interval: Duration::from_secs(1),
        }
    }

    /// Build from configuration: ledger key and clock period come from
    /// `config`.
    pub fn from_config(config: &Config, kv: K, remote: R, source: P) -> Self {
        Self {
            history: HistoryStore::with_key(kv, config.storage.history_key.clone()),
            remote,
            source,
            tick_interval: config.session.tick_interval(),
        }
    }

    pub fn history(&self) -> &HistoryStore<K> {
        &self.history
    }

    /// Fetch a puzzle and start playing it. Source failures are returned
    /// as-is, with no retry.
    #[tracing::instrument(name = "flow.new_game", skip(self))]
    pub async fn new_session(&self, difficulty: Difficulty) -> Result<Session, FlowError> {
        let puzzle = self.source.fetch_puzzle(difficulty).await?;
        tracing::debug!(givens = puzzle.givens.filled_count(), "puzzle ready");
        Ok(Session::new(puzzle))
    }

    /// [`new_session`](Self::new_session) with the clock running.
    ///
    /// Must be called from within a tokio runtime.
    pub async fn start_session(&self, difficulty: Difficulty) -> Result<LiveSession, FlowError> {
        let session = self.new_session(difficulty).await?;
        Ok(LiveSession::start(session, self.tick_interval))
    }

    /// Persist a finished game, then sync if someone is signed in.
    ///
    /// Only the local append can fail this call. An upload failure is
    /// logged and reported in [`Completion::sync`]; the next sync retries it.
    pub async fn record_completion(
        &self,
        auth: &AuthSnapshot,
        record: NewGameRecord,
    ) -> Result<Completion, FlowError> {
        let record = self.history.append(record).await?;

        let sync = match &auth.identity {
            None => SyncStatus::LocalOnly,
            Some(identity) => {
                match HistoryReconciler::new(&self.history, &self.remote)
                    .sync(identity)
                    .await
                {
                    Ok(uploaded) => SyncStatus::Synced { uploaded },
                    Err(e) => {
                        tracing::warn!(id = %record.id, error = %e, "sync failed, record kept locally");
                        SyncStatus::Deferred(e)
                    }
                }
            }
        };

        Ok(Completion { record, sync })
    }

    /// The history to show: merged with the remote store for an identity,
    /// the local ledger otherwise.
    pub async fn load_history(&self, auth: &AuthSnapshot) -> Result<Vec<GameRecord>, FlowError> {
        let records = match &auth.identity {
            Some(identity) => {
                HistoryReconciler::new(&self.history, &self.remote)
                    .fetch_merged(identity)
                    .await?
            }
            None => self.history.list().await?,
        };
        Ok(records)
    }

    pub async fn statistics(&self, auth: &AuthSnapshot) -> Result<GameStatistics, FlowError> {
        Ok(GameStatistics::from_records(&self.load_history(auth).await?))
    }
}

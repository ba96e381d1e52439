//! The local history ledger.
//!
//! The ledger is a JSON array of [`GameRecord`] stored under one key, newest
//! first. Newest-first is the persisted layout, not a read-time sort:
//! `append` prepends.

use super::error::HistoryError;
use super::kv::KeyValueStore;
use super::record::{GameRecord, NewGameRecord};
use super::stats::GameStatistics;
use uuid::Uuid;

/// Key the ledger is stored under unless configured otherwise.
pub const DEFAULT_HISTORY_KEY: &str = "game_history";

/// Append-only ledger of completed sessions on top of a key-value store.
pub struct HistoryStore<K: KeyValueStore> {
    kv: K,
    key: String,
}

impl<K: KeyValueStore> HistoryStore<K> {
    pub fn new(kv: K) -> Self {
        Self::with_key(kv, DEFAULT_HISTORY_KEY)
    }

    pub fn with_key(kv: K, key: impl Into<String>) -> Self {
        Self {
            kv,
            key: key.into(),
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    /// The ledger as stored, newest first.
    ///
    /// A missing ledger is an empty history. So is one that fails to parse;
    /// that case is logged. Failures of the store itself are returned.
    pub async fn list(&self) -> Result<Vec<GameRecord>, HistoryError> {
        let Some(raw) = self.kv.get(&self.key).await? else {
            return Ok(Vec::new());
        };

        match serde_json::from_str(&raw) {
            Ok(records) => Ok(records),
            Err(e) => {
                tracing::warn!(key = %self.key, error = %e, "ledger unreadable, treating as empty");
                Ok(Vec::new())
            }
        }
    }

    /// Assign an id, mark unsynced, prepend and persist.
    pub async fn append(&self, record: NewGameRecord) -> Result<GameRecord, HistoryError> {
        let mut ledger = self.list().await?;

        let mut id = generate_id(record.completed_at);
        while ledger.iter().any(|r| r.id == id) {
            id = generate_id(record.completed_at);
        }

        let record = record.into_record(id);
        ledger.insert(0, record.clone());
        self.write(&ledger).await?;

        tracing::debug!(id = %record.id, score = record.score, entries = ledger.len(), "game recorded");
        Ok(record)
    }

    /// Flag every record as synced.
    pub async fn mark_all_synced(&self) -> Result<(), HistoryError> {
        let mut ledger = self.list().await?;
        for record in &mut ledger {
            record.synced = true;
        }
        self.write(&ledger).await
    }

    /// Remove the ledger entirely.
    pub async fn clear(&self) -> Result<(), HistoryError> {
        self.kv.remove(&self.key).await?;
        tracing::info!(key = %self.key, "history cleared");
        Ok(())
    }

    pub async fn statistics(&self) -> Result<GameStatistics, HistoryError> {
        Ok(GameStatistics::from_records(&self.list().await?))
    }

    /// Overwrite the ledger with `records`, which must already be newest first.
    pub(crate) async fn replace(&self, records: &[GameRecord]) -> Result<(), HistoryError> {
        self.write(records).await
    }

    async fn write(&self, records: &[GameRecord]) -> Result<(), HistoryError> {
        let raw = serde_json::to_string(records)?;
        self.kv.set(&self.key, &raw).await?;
        Ok(())
    }
}

/// `<completedAt>_<random>`; unique within a ledger with overwhelming probability.
fn generate_id(completed_at: i64) -> String {
    format!("{completed_at}_{}", Uuid::new_v4().simple())
}

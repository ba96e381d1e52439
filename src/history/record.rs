//! Game record types.
//!
//! Field names serialize in camelCase so the persisted ledger and remote
//! documents keep the layout the mobile client has always written.

use crate::puzzle::Difficulty;
use serde::{Deserialize, Serialize};

/// A completed session, as stored in the local ledger.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameRecord {
    /// Locally generated for ledger records, store-assigned for remote copies
    pub id: String,
    pub difficulty: Difficulty,
    pub score: u64,
    pub time_seconds: u64,
    pub mistakes: u32,
    /// Unix epoch milliseconds
    pub completed_at: i64,
    /// Whether the record is known to exist in the remote store
    pub synced: bool,
}

/// A completed session before the ledger has assigned it an id.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewGameRecord {
    pub difficulty: Difficulty,
    pub score: u64,
    pub time_seconds: u64,
    pub mistakes: u32,
    pub completed_at: i64,
}

impl NewGameRecord {
    /// Attach an id; the result is unsynced.
    pub fn into_record(self, id: String) -> GameRecord {
        GameRecord {
            id,
            difficulty: self.difficulty,
            score: self.score,
            time_seconds: self.time_seconds,
            mistakes: self.mistakes,
            completed_at: self.completed_at,
            synced: false,
        }
    }
}

/// Body of a remote history document. Ids and sync flags are not uploaded.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RemoteGameDoc {
    pub difficulty: Difficulty,
    pub score: u64,
    pub time_seconds: u64,
    pub mistakes: u32,
    pub completed_at: i64,
}

impl From<&GameRecord> for RemoteGameDoc {
    fn from(record: &GameRecord) -> Self {
        Self {
            difficulty: record.difficulty,
            score: record.score,
            time_seconds: record.time_seconds,
            mistakes: record.mistakes,
            completed_at: record.completed_at,
        }
    }
}

/// A remote document together with its store-assigned id.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RemoteRecord {
    pub id: String,
    pub doc: RemoteGameDoc,
}

impl RemoteRecord {
    pub fn into_game_record(self) -> GameRecord {
        GameRecord {
            id: self.id,
            difficulty: self.doc.difficulty,
            score: self.doc.score,
            time_seconds: self.doc.time_seconds,
            mistakes: self.doc.mistakes,
            completed_at: self.doc.completed_at,
            synced: true,
        }
    }
}

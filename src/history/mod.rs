//! Play history: the local ledger and its reconciliation with the remote
//! store.
//!
//! - [`HistoryStore`] owns the ledger, persisted through a [`KeyValueStore`]
//! - [`HistoryReconciler`] merges it with a [`RemoteStore`] collection for a
//!   signed-in identity

pub mod error;
mod kv;
mod reconciler;
mod record;
mod remote;
mod stats;
mod store;

pub use error::{HistoryError, RemoteError, StorageError};
pub use kv::{FileKeyValueStore, KeyValueStore, MemoryKeyValueStore};
pub use reconciler::HistoryReconciler;
pub use record::{GameRecord, NewGameRecord, RemoteGameDoc, RemoteRecord};
pub use remote::{MemoryRemoteStore, RemoteStore};
pub use stats::GameStatistics;
pub use store::{HistoryStore, DEFAULT_HISTORY_KEY};

//! History error types.

use thiserror::Error;

/// Failures of the local key-value capability.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("reading '{key}' failed: {message}")]
    Read { key: String, message: String },

    #[error("writing '{key}' failed: {message}")]
    Write { key: String, message: String },

    #[error("removing '{key}' failed: {message}")]
    Remove { key: String, message: String },

    #[error("'{0}' is not a valid storage key")]
    InvalidKey(String),
}

/// Failures of the remote document store.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum RemoteError {
    #[error("remote write failed: {0}")]
    Write(String),

    #[error("remote read failed: {0}")]
    Read(String),
}

/// Errors surfaced by the history store and reconciler.
#[derive(Debug, Error)]
pub enum HistoryError {
    #[error("history storage failed: {0}")]
    Storage(#[from] StorageError),

    #[error("ledger could not be encoded: {0}")]
    Encode(#[from] serde_json::Error),

    /// Some records reached the remote store before a write failed. The local
    /// ledger was left unsynced, so a retry uploads them again.
    #[error("upload stopped after {uploaded} of {total} record(s): {source}")]
    PartialUpload {
        uploaded: usize,
        total: usize,
        #[source]
        source: RemoteError,
    },
}

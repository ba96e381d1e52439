//! Session checkpoint error types.

use thiserror::Error;

/// Errors that can occur while saving or restoring a session checkpoint
#[derive(Debug, Error)]
pub enum CheckpointError {
    /// Serialization to JSON or binary format failed
    #[error("Serialization failed: {0}")]
    SerializationFailed(String),

    /// Deserialization from JSON or binary format failed
    #[error("Deserialization failed: {0}")]
    DeserializationFailed(String),

    /// Checkpoint was written by an incompatible version
    #[error("Unsupported checkpoint version {found}, supported: {supported}")]
    UnsupportedVersion { found: u32, supported: u32 },

    /// The decoded session is not one play could have reached
    #[error("Invalid session in checkpoint: {0}")]
    InvalidSession(&'static str),
}

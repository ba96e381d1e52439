//! Save and restore an in-progress session.
//!
//! A checkpoint lets a session outlive the process, e.g. when the app is
//! suspended by the OS. JSON is used for inspection, bincode for compact
//! storage. The live ticker is not part of a checkpoint; restoring yields a
//! plain [`Session`] that can be handed to a new `LiveSession`.

use super::error::CheckpointError;
use super::machine::Session;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Version identifier for the checkpoint format
pub const CHECKPOINT_VERSION: u32 = 1;

/// Serializable snapshot of a whole session.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SessionCheckpoint {
    /// Checkpoint format version
    pub version: u32,

    /// Unique checkpoint identifier
    pub id: String,

    /// When the checkpoint was taken
    pub taken_at: DateTime<Utc>,

    pub session: Session,
}

impl SessionCheckpoint {
    pub fn capture(session: &Session) -> Self {
        Self {
            version: CHECKPOINT_VERSION,
            id: Uuid::new_v4().to_string(),
            taken_at: Utc::now(),
            session: session.clone(),
        }
    }

    pub fn to_json(&self) -> Result<String, CheckpointError> {
        serde_json::to_string(self).map_err(|e| CheckpointError::SerializationFailed(e.to_string()))
    }

    pub fn from_json(json: &str) -> Result<Self, CheckpointError> {
        let checkpoint: Self = serde_json::from_str(json)
            .map_err(|e| CheckpointError::DeserializationFailed(e.to_string()))?;
        checkpoint.check()
    }

    pub fn to_bytes(&self) -> Result<Vec<u8>, CheckpointError> {
        bincode::serialize(self).map_err(|e| CheckpointError::SerializationFailed(e.to_string()))
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self, CheckpointError> {
        let checkpoint: Self = bincode::deserialize(bytes)
            .map_err(|e| CheckpointError::DeserializationFailed(e.to_string()))?;
        checkpoint.check()
    }

    pub fn into_session(self) -> Session {
        self.session
    }

    /// Reject other format versions and sessions with broken invariants.
    fn check(self) -> Result<Self, CheckpointError> {
        if self.version != CHECKPOINT_VERSION {
            return Err(CheckpointError::UnsupportedVersion {
                found: self.version,
                supported: CHECKPOINT_VERSION,
            });
        }
        if let Some(problem) = self.session.consistency_problem() {
            return Err(CheckpointError::InvalidSession(problem));
        }
        Ok(self)
    }
}

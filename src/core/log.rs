//! Timestamped status change log.
//!
//! The log is an immutable value: `record` returns a new log with the change
//! appended and leaves the receiver untouched.

use super::state::State;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One status change, e.g. `Active -> Paused`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(bound = "")]
pub struct StatusChange<S: State> {
    /// Status before the change
    pub from: S,
    /// Status after the change
    pub to: S,
    /// Wall-clock time of the change
    pub at: DateTime<Utc>,
}

/// Ordered log of status changes, oldest first.
///
/// # Example
///
/// ```rust
/// use sudoku_classic::core::{StatusChange, StatusLog};
/// use sudoku_classic::session::SessionStatus;
/// use chrono::Utc;
///
/// let log = StatusLog::new().record(StatusChange {
///     from: SessionStatus::Active,
///     to: SessionStatus::Paused,
///     at: Utc::now(),
/// });
///
/// assert_eq!(log.changes().len(), 1);
/// assert_eq!(log.path(), vec![&SessionStatus::Active, &SessionStatus::Paused]);
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(bound = "")]
pub struct StatusLog<S: State> {
    changes: Vec<StatusChange<S>>,
}

impl<S: State> Default for StatusLog<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: State> StatusLog<S> {
    /// Create an empty log.
    pub fn new() -> Self {
        Self {
            changes: Vec::new(),
        }
    }

    /// Record a change, returning a new log.
    pub fn record(&self, change: StatusChange<S>) -> Self {
        let mut changes = self.changes.clone();
        changes.push(change);
        Self { changes }
    }

    /// Statuses visited: the first `from`, then every `to`.
    pub fn path(&self) -> Vec<&S> {
        let mut path = Vec::with_capacity(self.changes.len() + 1);
        if let Some(first) = self.changes.first() {
            path.push(&first.from);
        }
        path.extend(self.changes.iter().map(|c| &c.to));
        path
    }

    /// Number of changes that entered `status`.
    pub fn entries_into(&self, status: &S) -> usize {
        self.changes.iter().filter(|c| &c.to == status).count()
    }

    /// The most recent change, if any.
    pub fn last(&self) -> Option<&StatusChange<S>> {
        self.changes.last()
    }

    pub fn changes(&self) -> &[StatusChange<S>] {
        &self.changes
    }
}

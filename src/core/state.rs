//! Core State trait for machine statuses.
//!
//! Every status a session can be in implements this trait, which exposes
//! pure queries used by the transition functions and by presentation code.

use serde::{Deserialize, Serialize};
use std::fmt::Debug;

/// Trait for state machine statuses.
///
/// All methods are pure. A status is a small immutable value describing
/// where a machine currently is.
///
/// # Required Traits
///
/// - `Clone`: statuses are copied into the status log
/// - `PartialEq`: transitions compare the current status
/// - `Debug`: for diagnostics and tracing fields
/// - `Serialize` + `Deserialize`: statuses are part of session checkpoints
///
/// # Example
///
/// ```rust
/// use sudoku_classic::core::State;
/// use serde::{Deserialize, Serialize};
///
/// #[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
/// enum Round {
///     Playing,
///     Suspended,
///     Won,
/// }
///
/// impl State for Round {
///     fn name(&self) -> &str {
///         match self {
///             Self::Playing => "Playing",
///             Self::Suspended => "Suspended",
///             Self::Won => "Won",
///         }
///     }
///
///     fn is_final(&self) -> bool {
///         matches!(self, Self::Won)
///     }
///
///     fn is_running(&self) -> bool {
///         matches!(self, Self::Playing)
///     }
/// }
///
/// assert!(Round::Playing.is_running());
/// assert!(!Round::Won.is_running());
/// ```
pub trait State:
    Clone + PartialEq + Debug + Serialize + for<'de> Deserialize<'de> + Send + Sync
{
    /// The status name for display and logging.
    fn name(&self) -> &str;

    /// Check if this is a terminal status.
    ///
    /// Once a machine reaches a final status it is frozen: no further
    /// transition changes it.
    ///
    /// Default implementation returns `false`.
    fn is_final(&self) -> bool {
        false
    }

    /// Check if the machine accepts input and accrues time in this status.
    ///
    /// Default implementation returns `false`.
    fn is_running(&self) -> bool {
        false
    }
}

//! The puzzle session.
//!
//! [`Session`] is the pure state machine: grid, selection, mistakes, clock
//! and completion, with every transition a function of `(session, action)`.
//! [`LiveSession`] is the imperative shell that runs the clock.

mod checkpoint;
pub mod error;
mod live;
mod machine;
mod score;
mod snapshot;
mod status;

#[cfg(test)]
pub(crate) mod test_support;

pub use checkpoint::{SessionCheckpoint, CHECKPOINT_VERSION};
pub use error::CheckpointError;
pub use live::LiveSession;
pub use machine::{Action, Outcome, Session};
pub use score::{score, BASE_SCORE, MISTAKE_PENALTY};
pub use snapshot::{format_elapsed, SessionSnapshot};
pub use status::SessionStatus;

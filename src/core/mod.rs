//! Core state types shared by the session machine.
//!
//! This module contains the pure building blocks the game session is made of:
//! - State definitions via the `State` trait and the `state_enum!` macro
//! - An immutable, timestamped log of status changes
//!
//! Nothing in here performs I/O.

mod log;
mod macros;
mod state;

pub use log::{StatusChange, StatusLog};
pub use state::State;

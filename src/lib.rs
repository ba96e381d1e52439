//! Sudoku Classic: puzzle sessions and play history
//!
//! The crate follows a "pure core, imperative shell" split. A puzzle
//! [`Session`] is a pure state machine over the grid, the selection, the
//! mistake count and the clock; [`LiveSession`] is the async shell that runs
//! its one-second ticker. Completed games are kept in a local ledger
//! ([`HistoryStore`]) and, for a signed-in player, reconciled with a remote
//! collection ([`HistoryReconciler`]).
//!
//! Storage, the remote document store and the puzzle source are capabilities
//! behind traits ([`KeyValueStore`], [`RemoteStore`], [`PuzzleSource`]), so
//! everything runs against the in-memory backends in tests.
//!
//! # Core Concepts
//!
//! - **Session**: pure transitions `(session, action) -> (session, outcome)`
//! - **History**: newest-first ledger with a per-record `synced` flag
//! - **Reconciliation**: at-least-once upload plus a merged history view
//! - **Identity**: decides whether history is local-only or reconciled
//!
//! # Example
//!
//! ```rust
//! use sudoku_classic::puzzle::{Difficulty, PuzzlePayload};
//! use sudoku_classic::session::{Session, SessionStatus};
//!
//! let solution: Vec<Vec<u8>> = vec![
//!     vec![5, 3, 4, 6, 7, 8, 9, 1, 2],
//!     vec![6, 7, 2, 1, 9, 5, 3, 4, 8],
//!     vec![1, 9, 8, 3, 4, 2, 5, 6, 7],
//!     vec![8, 5, 9, 7, 6, 1, 4, 2, 3],
//!     vec![4, 2, 6, 8, 5, 3, 7, 9, 1],
//!     vec![7, 1, 3, 9, 2, 4, 8, 5, 6],
//!     vec![9, 6, 1, 5, 3, 7, 2, 8, 4],
//!     vec![2, 8, 7, 4, 1, 9, 6, 3, 5],
//!     vec![3, 4, 5, 2, 8, 6, 1, 7, 9],
//! ];
//! let mut puzzle = solution.clone();
//! puzzle[0][0] = 0;
//!
//! let puzzle = PuzzlePayload { puzzle, solution }
//!     .into_puzzle(Difficulty::Easy)
//!     .unwrap();
//! let mut session = Session::new(puzzle);
//!
//! let corner = sudoku_classic::puzzle::Position::new(0, 0).unwrap();
//! let five = sudoku_classic::puzzle::Digit::new(5).unwrap();
//! session.select_cell(corner);
//! let record = session.enter_digit(five).completed().cloned().unwrap();
//!
//! assert_eq!(session.status(), SessionStatus::Completed);
//! assert_eq!(record.score, 1000);
//! ```

pub mod config;
pub mod core;
pub mod flow;
pub mod history;
pub mod identity;
pub mod puzzle;
pub mod session;

// Re-export commonly used types
pub use config::{Config, ConfigError};
pub use core::{State, StatusLog};
pub use flow::{Completion, FlowError, GameFlow, SyncStatus};
pub use history::{
    GameRecord, HistoryReconciler, HistoryStore, KeyValueStore, NewGameRecord, RemoteStore,
};
pub use identity::{AuthContext, AuthSnapshot, Identity};
pub use puzzle::{Difficulty, Digit, Grid, Position, PuzzleSource};
pub use session::{Action, LiveSession, Outcome, Session, SessionStatus};

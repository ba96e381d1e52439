//! The async shell around a [`Session`].
//!
//! `LiveSession` owns the one-second ticker that advances the session clock.
//! The ticker is a spawned task held behind a guard that aborts it on drop,
//! so it stops on pause, on completion and when the `LiveSession` itself is
//! dropped. It is restarted on resume and on restart.

use super::machine::{Action, Outcome, Session};
use super::snapshot::SessionSnapshot;
use crate::core::State;
use crate::puzzle::{Digit, Position};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{watch, Mutex};
use tokio::task::JoinHandle;
use tokio::time::{interval_at, Instant};

/// Aborts the ticker task when dropped.
struct Ticker {
    handle: JoinHandle<()>,
}

impl Drop for Ticker {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

/// A session being played, with its clock running in the background.
///
/// Operations are expected to be serialized by the caller; `&mut self`
/// enforces that for the handle itself.
pub struct LiveSession {
    shared: Arc<Mutex<Session>>,
    snapshots: Arc<watch::Sender<SessionSnapshot>>,
    ticker: Option<Ticker>,
    tick_interval: Duration,
}

impl LiveSession {
    /// Wrap `session` and start its clock if it is active.
    ///
    /// Must be called from within a tokio runtime.
    pub fn start(session: Session, tick_interval: Duration) -> Self {
        let running = session.status().is_running();
        let (tx, _rx) = watch::channel(session.snapshot());
        let mut live = Self {
            shared: Arc::new(Mutex::new(session)),
            snapshots: Arc::new(tx),
            ticker: None,
            tick_interval,
        };
        if running {
            live.ticker = Some(live.spawn_ticker());
        }
        live
    }

    /// Receiver that observes a fresh snapshot after every change.
    pub fn subscribe(&self) -> watch::Receiver<SessionSnapshot> {
        self.snapshots.subscribe()
    }

    pub async fn snapshot(&self) -> SessionSnapshot {
        self.shared.lock().await.snapshot()
    }

    /// A copy of the full session state.
    pub async fn session(&self) -> Session {
        self.shared.lock().await.clone()
    }

    /// True while a ticker task is alive.
    pub fn ticker_running(&self) -> bool {
        self.ticker
            .as_ref()
            .is_some_and(|ticker| !ticker.handle.is_finished())
    }

    pub async fn select_cell(&mut self, pos: Position) -> Outcome {
        self.dispatch(Action::SelectCell(pos)).await
    }

    pub async fn enter_digit(&mut self, digit: Digit) -> Outcome {
        self.dispatch(Action::EnterDigit(digit)).await
    }

    pub async fn erase(&mut self) -> Outcome {
        self.dispatch(Action::Erase).await
    }

    pub async fn pause(&mut self) -> Outcome {
        self.dispatch(Action::Pause).await
    }

    pub async fn resume(&mut self) -> Outcome {
        self.dispatch(Action::Resume).await
    }

    pub async fn restart(&mut self) -> Outcome {
        self.dispatch(Action::Restart).await
    }

    /// Stop the clock and hand back the final session state.
    pub async fn finish(mut self) -> Session {
        self.ticker = None;
        self.shared.lock().await.clone()
    }

    /// Apply a user action and bring the ticker in line with the new status.
    pub async fn dispatch(&mut self, action: Action) -> Outcome {
        let (outcome, running) = {
            let mut session = self.shared.lock().await;
            let outcome = session.handle(action);
            if !outcome.is_ignored() {
                self.snapshots.send_replace(session.snapshot());
            }
            (outcome, session.status().is_running())
        };

        if let Some(record) = outcome.completed() {
            tracing::info!(
                difficulty = %record.difficulty,
                score = record.score,
                time_seconds = record.time_seconds,
                mistakes = record.mistakes,
                "puzzle completed"
            );
        } else if !outcome.is_ignored() {
            tracing::debug!(?action, "session updated");
        }

        // a restart re-phases the clock so the first second is a full second
        if action == Action::Restart && !outcome.is_ignored() {
            self.ticker = None;
        }
        self.align_ticker(running);
        outcome
    }

    fn align_ticker(&mut self, running: bool) {
        match (running, self.ticker.is_some()) {
            (true, false) => self.ticker = Some(self.spawn_ticker()),
            (false, true) => {
                tracing::trace!("stopping session clock");
                self.ticker = None;
            }
            _ => {}
        }
    }

    fn spawn_ticker(&self) -> Ticker {
        let shared = Arc::clone(&self.shared);
        let snapshots = Arc::clone(&self.snapshots);
        let period = self.tick_interval;

        let handle = tokio::spawn(async move {
            let mut interval = interval_at(Instant::now() + period, period);
            loop {
                interval.tick().await;
                let mut session = shared.lock().await;
                if session.handle(Action::Tick).is_ignored() {
                    // no longer running; the owner has or will drop us
                    break;
                }
                snapshots.send_replace(session.snapshot());
            }
        });
        Ticker { handle }
    }
}

impl Drop for LiveSession {
    fn drop(&mut self) {
        if self.ticker.take().is_some() {
            tracing::trace!("session dropped with clock running");
        }
    }
}

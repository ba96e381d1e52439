//! The puzzle session state machine.
//!
//! `Session::apply` is a pure transition function: it takes the current
//! session, an [`Action`] and the wall-clock time, and returns the next
//! session plus an [`Outcome`]. The `&mut self` helpers are thin wrappers
//! that replace `self` with the next session.

use super::score::score;
use super::snapshot::SessionSnapshot;
use super::status::SessionStatus;
use crate::core::{State, StatusChange, StatusLog};
use crate::history::NewGameRecord;
use crate::puzzle::{Difficulty, Digit, Grid, Position, Puzzle};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A user or timer driven input to the session.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Action {
    SelectCell(Position),
    EnterDigit(Digit),
    Erase,
    Pause,
    Resume,
    Restart,
    /// One elapsed second of wall-clock time
    Tick,
}

/// What applying an action did.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Outcome {
    /// The action was not applicable; the session is unchanged
    Ignored,
    /// The session changed
    Applied,
    /// The grid now matches the solution; carries the record to persist.
    /// Produced at most once per session.
    Completed(NewGameRecord),
}

impl Outcome {
    /// True when the action left the session unchanged.
    pub fn is_ignored(&self) -> bool {
        matches!(self, Self::Ignored)
    }

    /// The completion record, when this outcome finished the puzzle.
    pub fn completed(&self) -> Option<&NewGameRecord> {
        match self {
            Self::Completed(record) => Some(record),
            _ => None,
        }
    }
}

/// One attempt at a single puzzle.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Session {
    difficulty: Difficulty,
    original: Grid,
    current: Grid,
    solution: Grid,
    selected: Option<Position>,
    mistakes: u32,
    elapsed_seconds: u64,
    status: SessionStatus,
    score: Option<u64>,
    completed_at: Option<DateTime<Utc>>,
    log: StatusLog<SessionStatus>,
}

impl Session {
    /// The UI shows mistakes as `n/3`. Informational only: reaching it
    /// neither ends nor locks the session.
    pub const MISTAKE_DISPLAY_LIMIT: u32 = 3;

    /// Start an active session on a validated puzzle.
    pub fn new(puzzle: Puzzle) -> Self {
        Self {
            difficulty: puzzle.difficulty,
            current: puzzle.givens.clone(),
            original: puzzle.givens,
            solution: puzzle.solution,
            selected: None,
            mistakes: 0,
            elapsed_seconds: 0,
            status: SessionStatus::Active,
            score: None,
            completed_at: None,
            log: StatusLog::new(),
        }
    }

    /// Pure transition: `(session, action) -> (session, outcome)`.
    pub fn apply(&self, action: Action, now: DateTime<Utc>) -> (Session, Outcome) {
        if self.status.is_final() {
            return (self.clone(), Outcome::Ignored);
        }

        match action {
            Action::SelectCell(pos) => self.select(pos),
            Action::EnterDigit(digit) => self.enter(digit, now),
            Action::Erase => self.erase_selected(),
            Action::Pause => self.change_status(SessionStatus::Active, SessionStatus::Paused, now),
            Action::Resume => self.change_status(SessionStatus::Paused, SessionStatus::Active, now),
            Action::Restart => (self.restarted(now), Outcome::Applied),
            Action::Tick => self.tick_once(),
        }
    }

    /// Apply `action` at `now`, replacing `self` with the next session.
    pub fn handle_at(&mut self, action: Action, now: DateTime<Utc>) -> Outcome {
        let (next, outcome) = self.apply(action, now);
        if !outcome.is_ignored() {
            *self = next;
        }
        outcome
    }

    /// Apply `action` at the current wall-clock time.
    pub fn handle(&mut self, action: Action) -> Outcome {
        self.handle_at(action, Utc::now())
    }

    /// Select an empty cell. Pre-filled cells cannot be selected.
    pub fn select_cell(&mut self, pos: Position) -> Outcome {
        self.handle(Action::SelectCell(pos))
    }

    /// Write `digit` into the selected cell, counting a mistake if it is wrong.
    pub fn enter_digit(&mut self, digit: Digit) -> Outcome {
        self.handle(Action::EnterDigit(digit))
    }

    /// Clear the selected cell.
    pub fn erase(&mut self) -> Outcome {
        self.handle(Action::Erase)
    }

    /// Stop the clock and refuse input until resumed.
    pub fn pause(&mut self) -> Outcome {
        self.handle(Action::Pause)
    }

    /// Continue a paused session.
    pub fn resume(&mut self) -> Outcome {
        self.handle(Action::Resume)
    }

    /// Back to the givens with the clock and mistakes reset.
    pub fn restart(&mut self) -> Outcome {
        self.handle(Action::Restart)
    }

    /// Advance the clock by one second while active.
    pub fn tick(&mut self) -> Outcome {
        self.handle(Action::Tick)
    }

    /// Difficulty the puzzle was requested at.
    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    /// The givens as delivered by the puzzle source.
    pub fn original(&self) -> &Grid {
        &self.original
    }

    /// The grid as the player sees it.
    pub fn current(&self) -> &Grid {
        &self.current
    }

    /// The solved reference grid.
    pub fn solution(&self) -> &Grid {
        &self.solution
    }

    /// Currently selected cell, if any.
    pub fn selected(&self) -> Option<Position> {
        self.selected
    }

    /// Wrong entries made since the session started or restarted.
    pub fn mistakes(&self) -> u32 {
        self.mistakes
    }

    /// Seconds spent active.
    pub fn elapsed_seconds(&self) -> u64 {
        self.elapsed_seconds
    }

    /// Current lifecycle status.
    pub fn status(&self) -> SessionStatus {
        self.status
    }

    /// Final score; `None` until completed.
    pub fn score(&self) -> Option<u64> {
        self.score
    }

    /// When the grid was completed.
    pub fn completed_at(&self) -> Option<DateTime<Utc>> {
        self.completed_at
    }

    /// True once the grid matches the solution.
    pub fn is_completed(&self) -> bool {
        self.status == SessionStatus::Completed
    }

    /// Every status change so far, oldest first.
    pub fn status_log(&self) -> &StatusLog<SessionStatus> {
        &self.log
    }

    /// True when the entered digit at `pos` disagrees with the solution.
    pub fn is_wrong(&self, pos: Position) -> bool {
        self.current
            .get(pos)
            .is_some_and(|digit| self.solution.get(pos) != Some(digit))
    }

    /// Read-only view for rendering.
    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot::of(self)
    }

    /// Check that a session built outside the transition functions, e.g.
    /// restored from a checkpoint, is one `apply` could have produced.
    pub(crate) fn consistency_problem(&self) -> Option<&'static str> {
        if !self.solution.is_complete() {
            return Some("solution has empty cells");
        }
        for pos in Position::all() {
            let Some(given) = self.original.get(pos) else {
                continue;
            };
            if self.solution.get(pos) != Some(given) {
                return Some("given disagrees with solution");
            }
            if self.current.get(pos) != Some(given) {
                return Some("pre-filled cell was changed");
            }
        }
        if self.selected.is_some_and(|pos| self.original.is_filled(pos)) {
            return Some("pre-filled cell is selected");
        }

        let completed = self.is_completed();
        if completed != self.score.is_some() || completed != self.completed_at.is_some() {
            return Some("completion fields disagree with status");
        }
        if completed != (self.current == self.solution) {
            return Some("completion status disagrees with grid");
        }
        None
    }

    fn select(&self, pos: Position) -> (Session, Outcome) {
        if !self.status.is_running() || self.original.is_filled(pos) {
            return (self.clone(), Outcome::Ignored);
        }
        let mut next = self.clone();
        next.selected = Some(pos);
        (next, Outcome::Applied)
    }

    fn enter(&self, digit: Digit, now: DateTime<Utc>) -> (Session, Outcome) {
        let Some(pos) = self.editable_selection() else {
            return (self.clone(), Outcome::Ignored);
        };

        let mut next = self.clone();
        next.current = self.current.with(pos, Some(digit));
        if self.solution.get(pos) != Some(digit) {
            next.mistakes = self.mistakes.saturating_add(1);
        }

        if next.current != next.solution {
            return (next, Outcome::Applied);
        }

        let final_score = score(next.difficulty, next.elapsed_seconds, next.mistakes);
        next.score = Some(final_score);
        next.completed_at = Some(now);
        next.log = next.log.record(StatusChange {
            from: next.status,
            to: SessionStatus::Completed,
            at: now,
        });
        next.status = SessionStatus::Completed;

        let record = NewGameRecord {
            difficulty: next.difficulty,
            score: final_score,
            time_seconds: next.elapsed_seconds,
            mistakes: next.mistakes,
            completed_at: now.timestamp_millis(),
        };
        (next, Outcome::Completed(record))
    }

    fn erase_selected(&self) -> (Session, Outcome) {
        let Some(pos) = self.editable_selection() else {
            return (self.clone(), Outcome::Ignored);
        };
        let mut next = self.clone();
        next.current = self.current.with(pos, None);
        (next, Outcome::Applied)
    }

    fn editable_selection(&self) -> Option<Position> {
        if !self.status.is_running() {
            return None;
        }
        self.selected.filter(|pos| !self.original.is_filled(*pos))
    }

    fn change_status(
        &self,
        from: SessionStatus,
        to: SessionStatus,
        now: DateTime<Utc>,
    ) -> (Session, Outcome) {
        if self.status != from {
            return (self.clone(), Outcome::Ignored);
        }
        let mut next = self.clone();
        next.log = self.log.record(StatusChange { from, to, at: now });
        next.status = to;
        (next, Outcome::Applied)
    }

    fn restarted(&self, now: DateTime<Utc>) -> Session {
        Session {
            difficulty: self.difficulty,
            original: self.original.clone(),
            current: self.original.clone(),
            solution: self.solution.clone(),
            selected: None,
            mistakes: 0,
            elapsed_seconds: 0,
            status: SessionStatus::Active,
            score: None,
            completed_at: None,
            log: self.log.record(StatusChange {
                from: self.status,
                to: SessionStatus::Active,
                at: now,
            }),
        }
    }

    fn tick_once(&self) -> (Session, Outcome) {
        if !self.status.is_running() {
            return (self.clone(), Outcome::Ignored);
        }
        let mut next = self.clone();
        next.elapsed_seconds = self.elapsed_seconds.saturating_add(1);
        (next, Outcome::Applied)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::test_support::{empty_cells, pos, sample_puzzle, solve_all_but_last};

    fn digit(n: u8) -> Digit {
        Digit::new(n).unwrap()
    }

    #[test]
    fn new_session_starts_active_with_givens() {
        let session = Session::new(sample_puzzle(Difficulty::Easy));

        assert_eq!(session.status(), SessionStatus::Active);
        assert_eq!(session.current(), session.original());
        assert_eq!(session.mistakes(), 0);
        assert_eq!(session.elapsed_seconds(), 0);
        assert_eq!(session.selected(), None);
        assert_eq!(session.score(), None);
    }

    #[test]
    fn prefilled_cells_are_not_selectable() {
        let mut session = Session::new(sample_puzzle(Difficulty::Easy));

        assert_eq!(session.select_cell(pos(0, 1)), Outcome::Ignored);
        assert_eq!(session.selected(), None);

        let empty = empty_cells(&session)[0];
        assert_eq!(session.select_cell(empty), Outcome::Applied);
        assert_eq!(session.selected(), Some(empty));
    }

    #[test]
    fn enter_digit_without_selection_is_ignored() {
        let mut session = Session::new(sample_puzzle(Difficulty::Easy));
        let before = session.clone();

        assert_eq!(session.enter_digit(digit(1)), Outcome::Ignored);
        assert_eq!(session, before);
    }

    #[test]
    fn wrong_digit_counts_a_mistake_and_stays_on_grid() {
        let mut session = Session::new(sample_puzzle(Difficulty::Easy));
        let target = pos(0, 0);
        let wrong = digit(9);

        session.select_cell(target);
        assert_eq!(session.enter_digit(wrong), Outcome::Applied);

        assert_eq!(session.mistakes(), 1);
        assert_eq!(session.current().get(target), Some(wrong));
        assert!(session.is_wrong(target));
    }

    #[test]
    fn correct_digit_does_not_count_a_mistake() {
        let mut session = Session::new(sample_puzzle(Difficulty::Easy));
        let target = pos(0, 0);
        let right = session.solution().get(target).unwrap();

        session.select_cell(target);
        session.enter_digit(right);

        assert_eq!(session.mistakes(), 0);
        assert!(!session.is_wrong(target));
        assert_eq!(session.status(), SessionStatus::Active);
    }

    #[test]
    fn mistakes_are_not_capped_at_the_display_limit() {
        let mut session = Session::new(sample_puzzle(Difficulty::Easy));
        session.select_cell(pos(0, 0));

        for _ in 0..(Session::MISTAKE_DISPLAY_LIMIT + 2) {
            session.enter_digit(digit(9));
        }

        assert_eq!(session.mistakes(), 5);
        assert_eq!(session.status(), SessionStatus::Active);
    }

    #[test]
    fn erase_clears_the_selected_cell() {
        let mut session = Session::new(sample_puzzle(Difficulty::Easy));
        session.select_cell(pos(0, 0));
        session.enter_digit(digit(9));

        assert_eq!(session.erase(), Outcome::Applied);
        assert_eq!(session.current().get(pos(0, 0)), None);
        assert_eq!(session.mistakes(), 1);
    }

    #[test]
    fn erase_without_selection_is_ignored() {
        let mut session = Session::new(sample_puzzle(Difficulty::Easy));
        assert_eq!(session.erase(), Outcome::Ignored);
    }

    #[test]
    fn final_correct_digit_completes_and_scores() {
        let mut session = Session::new(sample_puzzle(Difficulty::Hard));
        for _ in 0..100 {
            session.tick();
        }
        let (last, answer) = solve_all_but_last(&mut session);

        session.select_cell(last);
        let now = Utc::now();
        let outcome = session.handle_at(Action::EnterDigit(answer), now);

        let record = outcome.completed().cloned().unwrap();
        assert_eq!(session.status(), SessionStatus::Completed);
        assert!(session.is_completed());
        assert_eq!(session.score(), Some(1800));
        assert_eq!(record.score, 1800);
        assert_eq!(record.time_seconds, 100);
        assert_eq!(record.mistakes, 0);
        assert_eq!(record.difficulty, Difficulty::Hard);
        assert_eq!(record.completed_at, now.timestamp_millis());
    }

    #[test]
    fn completed_session_is_frozen() {
        let mut session = Session::new(sample_puzzle(Difficulty::Easy));
        let (last, answer) = solve_all_but_last(&mut session);
        session.select_cell(last);
        assert!(session.enter_digit(answer).completed().is_some());

        let frozen = session.clone();
        let actions = [
            Action::EnterDigit(answer),
            Action::Erase,
            Action::SelectCell(last),
            Action::Pause,
            Action::Resume,
            Action::Restart,
            Action::Tick,
        ];
        for action in actions {
            assert_eq!(session.handle(action), Outcome::Ignored);
        }
        assert_eq!(session, frozen);
    }

    #[test]
    fn pause_blocks_input_and_time() {
        let mut session = Session::new(sample_puzzle(Difficulty::Easy));
        session.select_cell(pos(0, 0));
        assert_eq!(session.pause(), Outcome::Applied);

        assert_eq!(session.enter_digit(digit(1)), Outcome::Ignored);
        assert_eq!(session.erase(), Outcome::Ignored);
        assert_eq!(session.select_cell(pos(4, 4)), Outcome::Ignored);
        assert_eq!(session.tick(), Outcome::Ignored);
        assert_eq!(session.elapsed_seconds(), 0);
        // selection survives the pause
        assert_eq!(session.selected(), Some(pos(0, 0)));

        assert_eq!(session.resume(), Outcome::Applied);
        assert_eq!(session.tick(), Outcome::Applied);
        assert_eq!(session.elapsed_seconds(), 1);
    }

    #[test]
    fn pause_and_resume_only_toggle() {
        let mut session = Session::new(sample_puzzle(Difficulty::Easy));

        assert_eq!(session.resume(), Outcome::Ignored);
        assert_eq!(session.pause(), Outcome::Applied);
        assert_eq!(session.pause(), Outcome::Ignored);
        assert_eq!(session.resume(), Outcome::Applied);

        assert_eq!(
            session.status_log().path(),
            vec![
                &SessionStatus::Active,
                &SessionStatus::Paused,
                &SessionStatus::Active
            ]
        );
    }

    #[test]
    fn restart_resets_everything_but_the_puzzle() {
        let mut session = Session::new(sample_puzzle(Difficulty::Medium));
        let original = session.original().clone();
        let solution = session.solution().clone();

        session.select_cell(pos(0, 0));
        session.enter_digit(digit(9));
        session.tick();
        session.pause();

        assert_eq!(session.restart(), Outcome::Applied);

        assert_eq!(session.current(), &original);
        assert_eq!(session.original(), &original);
        assert_eq!(session.solution(), &solution);
        assert_eq!(session.mistakes(), 0);
        assert_eq!(session.elapsed_seconds(), 0);
        assert_eq!(session.selected(), None);
        assert_eq!(session.status(), SessionStatus::Active);
    }

    #[test]
    fn apply_does_not_mutate_the_receiver() {
        let session = Session::new(sample_puzzle(Difficulty::Easy));
        let (next, outcome) = session.apply(Action::Tick, Utc::now());

        assert_eq!(outcome, Outcome::Applied);
        assert_eq!(session.elapsed_seconds(), 0);
        assert_eq!(next.elapsed_seconds(), 1);
    }

    #[test]
    fn session_survives_json() {
        let mut session = Session::new(sample_puzzle(Difficulty::Hard));
        session.select_cell(pos(0, 0));
        session.enter_digit(digit(9));
        session.pause();

        let json = serde_json::to_string(&session).unwrap();
        let back: Session = serde_json::from_str(&json).unwrap();
        assert_eq!(back, session);
    }
}

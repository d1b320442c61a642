use crate::error::Result;
use serde::Serialize;

// ---------------------------------------------------------------------------
// Action
// ---------------------------------------------------------------------------

/// One reversible unit of work against a context `C`.
///
/// `undo` must produce the inverse observable state of `execute`: running
/// `execute` then `undo` leaves `C` as it was. The log never inspects `C`;
/// it only threads it through to the action callbacks, so the same log
/// works for any domain.
pub trait Action<C> {
    fn execute(&self, ctx: &mut C) -> Result<()>;
    fn undo(&self, ctx: &mut C) -> Result<()>;
    fn description(&self) -> String;
}

// ---------------------------------------------------------------------------
// ActionLog
// ---------------------------------------------------------------------------

/// Linear command history with undo/redo.
///
/// `applied` counts the actions currently in effect; entries at index
/// `>= applied` are the redo tail (undone but retained so they can be
/// re-executed). Invariant: `applied <= history.len()`. A fresh submit
/// truncates the tail first, so stale future actions can never be
/// resurrected by a later redo.
pub struct ActionLog<C> {
    history: Vec<Box<dyn Action<C>>>,
    applied: usize,
}

/// One row of `describe_history` output.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HistoryEntry {
    /// 0-based position in submission order.
    pub position: usize,
    pub description: String,
    /// True for the most recently applied action, if any.
    pub current: bool,
}

impl<C> Default for ActionLog<C> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C> ActionLog<C> {
    pub fn new() -> Self {
        Self {
            history: Vec::new(),
            applied: 0,
        }
    }

    pub fn len(&self) -> usize {
        self.history.len()
    }

    pub fn is_empty(&self) -> bool {
        self.history.is_empty()
    }

    /// Number of actions currently in effect.
    pub fn applied(&self) -> usize {
        self.applied
    }

    /// Execute an action and record it.
    ///
    /// Any redo tail is discarded first. The action is appended only after
    /// `execute` returns `Ok` (execute-then-record): a failed execute
    /// propagates and leaves both history and cursor exactly as they were,
    /// so the log never holds a ghost entry whose effect did not happen.
    pub fn submit(&mut self, ctx: &mut C, action: Box<dyn Action<C>>) -> Result<()> {
        action.execute(ctx)?;
        tracing::debug!(action = %action.description(), "submitted");
        self.history.truncate(self.applied);
        self.history.push(action);
        self.applied = self.history.len();
        Ok(())
    }

    /// Reverse the most recently applied action.
    ///
    /// Returns `Ok(None)` when nothing is applied (an empty log or one that
    /// is fully undone) — a recoverable condition, not an error. On success
    /// the undone action stays in history as the head of the redo tail and
    /// its description is returned. If the action's `undo` fails, the
    /// cursor does not move.
    pub fn undo(&mut self, ctx: &mut C) -> Result<Option<String>> {
        if self.applied == 0 {
            return Ok(None);
        }
        let action = &self.history[self.applied - 1];
        action.undo(ctx)?;
        self.applied -= 1;
        tracing::debug!(action = %action.description(), "undone");
        Ok(Some(action.description()))
    }

    /// Re-execute the most recently undone action.
    ///
    /// Returns `Ok(None)` when the redo tail is empty. If the action's
    /// `execute` fails, the cursor does not move.
    pub fn redo(&mut self, ctx: &mut C) -> Result<Option<String>> {
        if self.applied == self.history.len() {
            return Ok(None);
        }
        let action = &self.history[self.applied];
        action.execute(ctx)?;
        self.applied += 1;
        tracing::debug!(action = %action.description(), "redone");
        Ok(Some(action.description()))
    }

    /// Lazy, restartable view of the history in submission order. Read-only;
    /// entries in the redo tail are included, marked not current.
    pub fn describe_history(&self) -> impl Iterator<Item = HistoryEntry> + '_ {
        let applied = self.applied;
        self.history.iter().enumerate().map(move |(i, action)| {
            HistoryEntry {
                position: i,
                description: action.description(),
                current: applied > 0 && i == applied - 1,
            }
        })
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::BookingError;

    /// Test context: an append-only tape of effect markers. `execute`
    /// pushes a marker, `undo` pops it, so the tape is the externally
    /// observable state.
    type Tape = Vec<String>;

    struct Mark(&'static str);

    impl Action<Tape> for Mark {
        fn execute(&self, ctx: &mut Tape) -> Result<()> {
            ctx.push(self.0.to_string());
            Ok(())
        }

        fn undo(&self, ctx: &mut Tape) -> Result<()> {
            ctx.pop();
            Ok(())
        }

        fn description(&self) -> String {
            format!("mark {}", self.0)
        }
    }

    struct Doomed;

    impl Action<Tape> for Doomed {
        fn execute(&self, _ctx: &mut Tape) -> Result<()> {
            Err(BookingError::PaymentDeclined("no funds".to_string()))
        }

        fn undo(&self, _ctx: &mut Tape) -> Result<()> {
            Ok(())
        }

        fn description(&self) -> String {
            "doomed".to_string()
        }
    }

    fn submit(log: &mut ActionLog<Tape>, tape: &mut Tape, label: &'static str) {
        log.submit(tape, Box::new(Mark(label))).unwrap();
    }

    #[test]
    fn history_lists_submissions_in_order() {
        let mut log = ActionLog::new();
        let mut tape = Tape::new();
        submit(&mut log, &mut tape, "a");
        submit(&mut log, &mut tape, "b");
        submit(&mut log, &mut tape, "c");

        let entries: Vec<HistoryEntry> = log.describe_history().collect();
        assert_eq!(entries.len(), 3);
        assert_eq!(entries[0].description, "mark a");
        assert_eq!(entries[2].description, "mark c");
        assert!(entries[2].current);
        assert!(!entries[0].current && !entries[1].current);
        assert_eq!(tape, vec!["a", "b", "c"]);
    }

    #[test]
    fn undo_on_empty_log_is_noop() {
        let mut log: ActionLog<Tape> = ActionLog::new();
        let mut tape = Tape::new();
        assert_eq!(log.undo(&mut tape).unwrap(), None);
        assert_eq!(log.applied(), 0);
        assert!(log.is_empty());
    }

    #[test]
    fn redo_on_empty_log_is_noop() {
        let mut log: ActionLog<Tape> = ActionLog::new();
        let mut tape = Tape::new();
        assert_eq!(log.redo(&mut tape).unwrap(), None);
        assert_eq!(log.applied(), 0);
    }

    #[test]
    fn redo_at_head_is_noop() {
        let mut log = ActionLog::new();
        let mut tape = Tape::new();
        submit(&mut log, &mut tape, "a");
        assert_eq!(log.redo(&mut tape).unwrap(), None);
        assert_eq!(tape, vec!["a"]);
    }

    #[test]
    fn undo_redo_roundtrip_matches_plain_submit() {
        let mut log = ActionLog::new();
        let mut tape = Tape::new();
        submit(&mut log, &mut tape, "a");

        assert_eq!(log.undo(&mut tape).unwrap().as_deref(), Some("mark a"));
        assert!(tape.is_empty());

        assert_eq!(log.redo(&mut tape).unwrap().as_deref(), Some("mark a"));
        assert_eq!(tape, vec!["a"]);
        assert_eq!(log.applied(), 1);
        assert_eq!(log.len(), 1);
    }

    #[test]
    fn undone_entry_stays_in_history() {
        let mut log = ActionLog::new();
        let mut tape = Tape::new();
        submit(&mut log, &mut tape, "a");
        log.undo(&mut tape).unwrap();

        let entries: Vec<HistoryEntry> = log.describe_history().collect();
        assert_eq!(entries.len(), 1);
        assert!(!entries[0].current);
        assert_eq!(log.applied(), 0);
    }

    #[test]
    fn submit_after_undo_truncates_redo_tail() {
        let mut log = ActionLog::new();
        let mut tape = Tape::new();
        submit(&mut log, &mut tape, "a");
        submit(&mut log, &mut tape, "b");
        log.undo(&mut tape).unwrap();
        submit(&mut log, &mut tape, "c");

        let entries: Vec<HistoryEntry> = log.describe_history().collect();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].description, "mark a");
        assert_eq!(entries[1].description, "mark c");
        assert!(entries[1].current);

        // b is gone for good
        assert_eq!(log.redo(&mut tape).unwrap(), None);
        assert_eq!(tape, vec!["a", "c"]);
    }

    #[test]
    fn failed_execute_leaves_log_unchanged() {
        let mut log = ActionLog::new();
        let mut tape = Tape::new();
        submit(&mut log, &mut tape, "a");

        let err = log.submit(&mut tape, Box::new(Doomed)).unwrap_err();
        assert!(matches!(err, BookingError::PaymentDeclined(_)));
        assert_eq!(log.len(), 1);
        assert_eq!(log.applied(), 1);
        assert_eq!(tape, vec!["a"]);
    }

    #[test]
    fn failed_submit_preserves_redo_tail() {
        let mut log = ActionLog::new();
        let mut tape = Tape::new();
        submit(&mut log, &mut tape, "a");
        submit(&mut log, &mut tape, "b");
        log.undo(&mut tape).unwrap();

        log.submit(&mut tape, Box::new(Doomed)).unwrap_err();

        // b is still redoable; the failed submit touched nothing
        assert_eq!(log.redo(&mut tape).unwrap().as_deref(), Some("mark b"));
        assert_eq!(tape, vec!["a", "b"]);
    }

    #[test]
    fn full_unwind_and_replay() {
        let mut log = ActionLog::new();
        let mut tape = Tape::new();
        for label in ["a", "b", "c"] {
            submit(&mut log, &mut tape, label);
        }
        while log.undo(&mut tape).unwrap().is_some() {}
        assert!(tape.is_empty());
        assert_eq!(log.applied(), 0);
        assert_eq!(log.len(), 3);

        while log.redo(&mut tape).unwrap().is_some() {}
        assert_eq!(tape, vec!["a", "b", "c"]);
        assert_eq!(log.applied(), 3);
    }
}

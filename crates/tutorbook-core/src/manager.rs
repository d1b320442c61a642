use crate::actions::{BookingCtx, CancelLesson, RescheduleLesson, ScheduleLesson};
use crate::bus::SubscriberHandle;
use crate::error::Result;
use crate::event::EventKind;
use crate::ledger::Ledger;
use crate::lesson::{AddOn, LessonKind};
use crate::log::{ActionLog, HistoryEntry};

// ---------------------------------------------------------------------------
// BookingManager
// ---------------------------------------------------------------------------

/// One booking workflow: a ledger and an event bus (the action context)
/// paired with an undoable action log. Constructed explicitly and passed
/// where needed — there is deliberately no process-wide instance. The
/// manager *holds* a bus and delegates to it; it is not itself a
/// broadcaster.
#[derive(Default)]
pub struct BookingManager {
    ctx: BookingCtx,
    log: ActionLog<BookingCtx>,
}

impl BookingManager {
    pub fn new() -> Self {
        Self::default()
    }

    // -----------------------------------------------------------------------
    // Bus delegation
    // -----------------------------------------------------------------------

    pub fn subscribe(&mut self, subscriber: SubscriberHandle) {
        self.ctx.bus.subscribe(subscriber);
    }

    pub fn unsubscribe(&mut self, subscriber: &SubscriberHandle) {
        self.ctx.bus.unsubscribe(subscriber);
    }

    pub fn subscriber_count(&self) -> usize {
        self.ctx.bus.subscriber_count()
    }

    /// Announce a lifecycle event that is not tied to a reversible action
    /// (lesson starting, lesson completed). Returns the number of
    /// subscribers reached.
    pub fn publish(&mut self, kind: EventKind, message: impl Into<String>) -> Result<usize> {
        self.ctx.bus.publish(kind, message)
    }

    // -----------------------------------------------------------------------
    // Reversible operations
    // -----------------------------------------------------------------------

    pub fn schedule(
        &mut self,
        tutor: impl Into<String>,
        lesson: LessonKind,
        slot: impl Into<String>,
        add_ons: Vec<AddOn>,
    ) -> Result<()> {
        let action = ScheduleLesson::new(tutor, lesson, slot).with_add_ons(add_ons);
        self.log.submit(&mut self.ctx, Box::new(action))
    }

    /// Cancel whatever is actually booked for (tutor, slot). The lesson
    /// kind and add-ons are resolved from the ledger, not supplied by the
    /// caller, so undoing the cancellation restores the booking exactly.
    pub fn cancel(&mut self, tutor: &str, slot: &str, reason: impl Into<String>) -> Result<()> {
        let booking = self.ctx.ledger.find(tutor, slot).cloned().ok_or_else(|| {
            crate::error::BookingError::BookingNotFound {
                tutor: tutor.to_string(),
                slot: slot.to_string(),
            }
        })?;
        let action = CancelLesson::new(tutor, booking.lesson, slot, reason)
            .with_add_ons(booking.add_ons);
        self.log.submit(&mut self.ctx, Box::new(action))
    }

    pub fn reschedule(
        &mut self,
        tutor: impl Into<String>,
        lesson: LessonKind,
        from_slot: impl Into<String>,
        to_slot: impl Into<String>,
    ) -> Result<()> {
        let action = RescheduleLesson::new(tutor, lesson, from_slot, to_slot);
        self.log.submit(&mut self.ctx, Box::new(action))
    }

    /// Reverse the last applied operation. `Ok(None)` when there is nothing
    /// to undo.
    pub fn undo(&mut self) -> Result<Option<String>> {
        self.log.undo(&mut self.ctx)
    }

    /// Re-apply the last undone operation. `Ok(None)` when there is nothing
    /// to redo.
    pub fn redo(&mut self) -> Result<Option<String>> {
        self.log.redo(&mut self.ctx)
    }

    // -----------------------------------------------------------------------
    // Introspection
    // -----------------------------------------------------------------------

    pub fn history(&self) -> impl Iterator<Item = HistoryEntry> + '_ {
        self.log.describe_history()
    }

    pub fn ledger(&self) -> &Ledger {
        &self.ctx.ledger
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

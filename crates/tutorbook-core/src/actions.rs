use crate::bus::EventBus;
use crate::error::Result;
use crate::event::EventKind;
use crate::ledger::Ledger;
use crate::lesson::{AddOn, LessonKind};
use crate::log::Action;

// ---------------------------------------------------------------------------
// BookingCtx
// ---------------------------------------------------------------------------

/// The context the booking actions run against: the booking ledger plus the
/// event bus. The log and the bus never reference each other; they meet
/// only here, inside the actions' execute/undo effects.
#[derive(Default)]
pub struct BookingCtx {
    pub ledger: Ledger,
    pub bus: EventBus,
}

impl BookingCtx {
    pub fn new() -> Self {
        Self::default()
    }

    /// Publish without letting subscriber failures poison the booking
    /// mutation that already happened. Broadcast errors are logged and
    /// dropped; the state change stands.
    fn announce(&mut self, kind: EventKind, message: String) {
        if let Err(e) = self.bus.publish(kind, message) {
            tracing::warn!(%kind, error = %e, "broadcast completed with failures");
        }
    }
}

// ---------------------------------------------------------------------------
// ScheduleLesson
// ---------------------------------------------------------------------------

/// Books a lesson; inverse is cancelling that same booking.
pub struct ScheduleLesson {
    pub tutor: String,
    pub lesson: LessonKind,
    pub slot: String,
    pub add_ons: Vec<AddOn>,
}

impl ScheduleLesson {
    pub fn new(tutor: impl Into<String>, lesson: LessonKind, slot: impl Into<String>) -> Self {
        Self {
            tutor: tutor.into(),
            lesson,
            slot: slot.into(),
            add_ons: Vec::new(),
        }
    }

    pub fn with_add_ons(mut self, add_ons: Vec<AddOn>) -> Self {
        self.add_ons = add_ons;
        self
    }
}

impl Action<BookingCtx> for ScheduleLesson {
    fn execute(&self, ctx: &mut BookingCtx) -> Result<()> {
        ctx.ledger
            .book(&self.tutor, self.lesson, &self.slot, self.add_ons.clone())?;
        ctx.announce(
            EventKind::BookingConfirmed,
            format!("{} lesson with {} at {}", self.lesson, self.tutor, self.slot),
        );
        Ok(())
    }

    fn undo(&self, ctx: &mut BookingCtx) -> Result<()> {
        ctx.ledger.cancel(&self.tutor, &self.slot)?;
        ctx.announce(
            EventKind::BookingCancelled,
            format!(
                "{} lesson with {} at {} withdrawn",
                self.lesson, self.tutor, self.slot
            ),
        );
        Ok(())
    }

    fn description(&self) -> String {
        format!(
            "schedule {} with {} at {}",
            self.lesson, self.tutor, self.slot
        )
    }
}

// ---------------------------------------------------------------------------
// CancelLesson
// ---------------------------------------------------------------------------

/// Cancels an existing booking; inverse is re-booking the exact original
/// slot with the exact original lesson and add-ons, so all of them are
/// captured up front. `BookingManager::cancel` resolves them from the
/// ledger rather than trusting its caller.
pub struct CancelLesson {
    pub tutor: String,
    pub lesson: LessonKind,
    pub slot: String,
    pub reason: String,
    pub add_ons: Vec<AddOn>,
}

impl CancelLesson {
    pub fn new(
        tutor: impl Into<String>,
        lesson: LessonKind,
        slot: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        Self {
            tutor: tutor.into(),
            lesson,
            slot: slot.into(),
            reason: reason.into(),
            add_ons: Vec::new(),
        }
    }

    pub fn with_add_ons(mut self, add_ons: Vec<AddOn>) -> Self {
        self.add_ons = add_ons;
        self
    }
}

impl Action<BookingCtx> for CancelLesson {
    fn execute(&self, ctx: &mut BookingCtx) -> Result<()> {
        ctx.ledger.cancel(&self.tutor, &self.slot)?;
        ctx.announce(
            EventKind::BookingCancelled,
            format!(
                "{} lesson with {} at {} cancelled ({})",
                self.lesson, self.tutor, self.slot, self.reason
            ),
        );
        Ok(())
    }

    fn undo(&self, ctx: &mut BookingCtx) -> Result<()> {
        ctx.ledger
            .book(&self.tutor, self.lesson, &self.slot, self.add_ons.clone())?;
        ctx.announce(
            EventKind::BookingConfirmed,
            format!(
                "{} lesson with {} restored at {}",
                self.lesson, self.tutor, self.slot
            ),
        );
        Ok(())
    }

    fn description(&self) -> String {
        format!(
            "cancel {} with {} at {} ({})",
            self.lesson, self.tutor, self.slot, self.reason
        )
    }
}

// ---------------------------------------------------------------------------
// RescheduleLesson
// ---------------------------------------------------------------------------

/// Moves a booking between slots; inverse moves it back.
pub struct RescheduleLesson {
    pub tutor: String,
    pub lesson: LessonKind,
    pub from_slot: String,
    pub to_slot: String,
}

impl RescheduleLesson {
    pub fn new(
        tutor: impl Into<String>,
        lesson: LessonKind,
        from_slot: impl Into<String>,
        to_slot: impl Into<String>,
    ) -> Self {
        Self {
            tutor: tutor.into(),
            lesson,
            from_slot: from_slot.into(),
            to_slot: to_slot.into(),
        }
    }
}

impl Action<BookingCtx> for RescheduleLesson {
    fn execute(&self, ctx: &mut BookingCtx) -> Result<()> {
        ctx.ledger
            .reschedule(&self.tutor, &self.from_slot, &self.to_slot)?;
        ctx.announce(
            EventKind::LessonRescheduled,
            format!(
                "{} lesson with {} moved from {} to {}",
                self.lesson, self.tutor, self.from_slot, self.to_slot
            ),
        );
        Ok(())
    }

    fn undo(&self, ctx: &mut BookingCtx) -> Result<()> {
        ctx.ledger
            .reschedule(&self.tutor, &self.to_slot, &self.from_slot)?;
        ctx.announce(
            EventKind::LessonRescheduled,
            format!(
                "{} lesson with {} moved back to {}",
                self.lesson, self.tutor, self.from_slot
            ),
        );
        Ok(())
    }

    fn description(&self) -> String {
        format!(
            "reschedule {} with {} from {} to {}",
            self.lesson, self.tutor, self.from_slot, self.to_slot
        )
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

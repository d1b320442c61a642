use serde::{Deserialize, Serialize};
use std::fmt;

// ---------------------------------------------------------------------------
// EventKind
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventKind {
    BookingConfirmed,
    BookingCancelled,
    LessonRescheduled,
    LessonStarting,
    LessonCompleted,
    PaymentReceived,
}

impl EventKind {
    pub fn all() -> &'static [EventKind] {
        &[
            EventKind::BookingConfirmed,
            EventKind::BookingCancelled,
            EventKind::LessonRescheduled,
            EventKind::LessonStarting,
            EventKind::LessonCompleted,
            EventKind::PaymentReceived,
        ]
    }

    pub fn as_str(self) -> &'static str {
        match self {
            EventKind::BookingConfirmed => "booking_confirmed",
            EventKind::BookingCancelled => "booking_cancelled",
            EventKind::LessonRescheduled => "lesson_rescheduled",
            EventKind::LessonStarting => "lesson_starting",
            EventKind::LessonCompleted => "lesson_completed",
            EventKind::PaymentReceived => "payment_received",
        }
    }
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for EventKind {
    type Err = crate::error::BookingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "booking_confirmed" => Ok(EventKind::BookingConfirmed),
            "booking_cancelled" => Ok(EventKind::BookingCancelled),
            "lesson_rescheduled" => Ok(EventKind::LessonRescheduled),
            "lesson_starting" => Ok(EventKind::LessonStarting),
            "lesson_completed" => Ok(EventKind::LessonCompleted),
            "payment_received" => Ok(EventKind::PaymentReceived),
            _ => Err(crate::error::BookingError::UnknownEventKind(s.to_string())),
        }
    }
}

// ---------------------------------------------------------------------------
// Event
// ---------------------------------------------------------------------------

/// A single notification delivered to subscribers. Events are ephemeral:
/// the bus hands them out by reference during a broadcast and never stores
/// them afterward.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
    pub kind: EventKind,
    pub message: String,
}

impl Event {
    pub fn new(kind: EventKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

use crate::bus::Subscriber;
use crate::error::Result;
use crate::event::{Event, EventKind};
use std::collections::BTreeMap;

// ---------------------------------------------------------------------------
// StudentInbox
// ---------------------------------------------------------------------------

/// Notification inbox for one student: every delivered event lands here as
/// a rendered message.
#[derive(Debug, Default)]
pub struct StudentInbox {
    pub student: String,
    pub messages: Vec<String>,
}

impl StudentInbox {
    pub fn new(student: impl Into<String>) -> Self {
        Self {
            student: student.into(),
            messages: Vec::new(),
        }
    }
}

impl Subscriber for StudentInbox {
    fn on_event(&mut self, event: &Event) -> Result<()> {
        let note = match event.kind {
            EventKind::BookingConfirmed => "added to calendar",
            EventKind::BookingCancelled => "removed from schedule",
            EventKind::LessonRescheduled => "schedule updated",
            EventKind::LessonStarting => "time to prepare",
            EventKind::LessonCompleted => "time to review notes",
            EventKind::PaymentReceived => "receipt filed",
        };
        self.messages.push(format!("{} — {note}", event.message));
        Ok(())
    }

    fn name(&self) -> String {
        format!("student {}", self.student)
    }
}

// ---------------------------------------------------------------------------
// TutorInbox
// ---------------------------------------------------------------------------

#[derive(Debug, Default)]
pub struct TutorInbox {
    pub tutor: String,
    pub messages: Vec<String>,
}

impl TutorInbox {
    pub fn new(tutor: impl Into<String>) -> Self {
        Self {
            tutor: tutor.into(),
            messages: Vec::new(),
        }
    }
}

impl Subscriber for TutorInbox {
    fn on_event(&mut self, event: &Event) -> Result<()> {
        let note = match event.kind {
            EventKind::BookingConfirmed => "preparing materials",
            EventKind::BookingCancelled => "slot freed",
            EventKind::LessonRescheduled => "schedule updated",
            EventKind::LessonStarting => "ready to teach",
            EventKind::LessonCompleted => "recording hours",
            EventKind::PaymentReceived => "payout pending",
        };
        self.messages.push(format!("{} — {note}", event.message));
        Ok(())
    }

    fn name(&self) -> String {
        format!("tutor {}", self.tutor)
    }
}

// ---------------------------------------------------------------------------
// AdminAnalytics
// ---------------------------------------------------------------------------

/// Per-kind event counters for the back office.
#[derive(Debug, Default)]
pub struct AdminAnalytics {
    counts: BTreeMap<EventKind, u64>,
}

impl AdminAnalytics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn count(&self, kind: EventKind) -> u64 {
        self.counts.get(&kind).copied().unwrap_or(0)
    }

    pub fn total(&self) -> u64 {
        self.counts.values().sum()
    }
}

impl Subscriber for AdminAnalytics {
    fn on_event(&mut self, event: &Event) -> Result<()> {
        *self.counts.entry(event.kind).or_insert(0) += 1;
        Ok(())
    }

    fn name(&self) -> String {
        "admin analytics".to_string()
    }
}

// ---------------------------------------------------------------------------
// EventLogger
// ---------------------------------------------------------------------------

/// Forwards every event to `tracing`; handy default subscriber for the CLI.
#[derive(Debug, Default)]
pub struct EventLogger;

impl Subscriber for EventLogger {
    fn on_event(&mut self, event: &Event) -> Result<()> {
        tracing::info!(kind = %event.kind, "{}", event.message);
        Ok(())
    }

    fn name(&self) -> String {
        "event logger".to_string()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

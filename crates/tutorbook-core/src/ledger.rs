use crate::error::{BookingError, Result};
use crate::lesson::{AddOn, LessonKind};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Booking
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Booking {
    pub tutor: String,
    pub lesson: LessonKind,
    pub slot: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub add_ons: Vec<AddOn>,
    pub booked_at: DateTime<Utc>,
}

// ---------------------------------------------------------------------------
// Ledger
// ---------------------------------------------------------------------------

/// Active bookings, keyed by (tutor, slot). This is the externally
/// observable state the reversible actions mutate; a tutor holds at most
/// one booking per slot.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Ledger {
    bookings: Vec<Booking>,
}

impl Ledger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn bookings(&self) -> &[Booking] {
        &self.bookings
    }

    pub fn len(&self) -> usize {
        self.bookings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bookings.is_empty()
    }

    pub fn find(&self, tutor: &str, slot: &str) -> Option<&Booking> {
        self.bookings
            .iter()
            .find(|b| b.tutor == tutor && b.slot == slot)
    }

    pub fn book(
        &mut self,
        tutor: impl Into<String>,
        lesson: LessonKind,
        slot: impl Into<String>,
        add_ons: Vec<AddOn>,
    ) -> Result<()> {
        let tutor = tutor.into();
        let slot = slot.into();
        if self.find(&tutor, &slot).is_some() {
            return Err(BookingError::SlotTaken { tutor, slot });
        }
        self.bookings.push(Booking {
            tutor,
            lesson,
            slot,
            add_ons,
            booked_at: Utc::now(),
        });
        Ok(())
    }

    /// Remove and return the booking for (tutor, slot).
    pub fn cancel(&mut self, tutor: &str, slot: &str) -> Result<Booking> {
        let idx = self
            .bookings
            .iter()
            .position(|b| b.tutor == tutor && b.slot == slot)
            .ok_or_else(|| BookingError::BookingNotFound {
                tutor: tutor.to_string(),
                slot: slot.to_string(),
            })?;
        Ok(self.bookings.remove(idx))
    }

    /// Move a booking to a new slot, keeping lesson and add-ons. Moving to
    /// the slot the booking already occupies is a no-op, not a collision.
    /// Fails if the source booking is missing or the target slot is taken
    /// by another booking; on failure the ledger is unchanged.
    pub fn reschedule(&mut self, tutor: &str, from_slot: &str, to_slot: &str) -> Result<()> {
        if from_slot != to_slot && self.find(tutor, to_slot).is_some() {
            return Err(BookingError::SlotTaken {
                tutor: tutor.to_string(),
                slot: to_slot.to_string(),
            });
        }
        let booking = self
            .bookings
            .iter_mut()
            .find(|b| b.tutor == tutor && b.slot == from_slot)
            .ok_or_else(|| BookingError::BookingNotFound {
                tutor: tutor.to_string(),
                slot: from_slot.to_string(),
            })?;
        booking.slot = to_slot.to_string();
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn book_and_find() {
        let mut ledger = Ledger::new();
        ledger
            .book("Alice", LessonKind::Math, "Mon 10AM", vec![])
            .unwrap();
        let booking = ledger.find("Alice", "Mon 10AM").unwrap();
        assert_eq!(booking.lesson, LessonKind::Math);
        assert_eq!(ledger.len(), 1);
    }

    #[test]
    fn double_booking_rejected() {
        let mut ledger = Ledger::new();
        ledger
            .book("Alice", LessonKind::Math, "Mon 10AM", vec![])
            .unwrap();
        let err = ledger
            .book("Alice", LessonKind::English, "Mon 10AM", vec![])
            .unwrap_err();
        assert!(matches!(err, BookingError::SlotTaken { .. }));
        assert_eq!(ledger.len(), 1);
    }

    #[test]
    fn same_slot_different_tutor_is_fine() {
        let mut ledger = Ledger::new();
        ledger
            .book("Alice", LessonKind::Math, "Mon 10AM", vec![])
            .unwrap();
        ledger
            .book("Bob", LessonKind::Programming, "Mon 10AM", vec![])
            .unwrap();
        assert_eq!(ledger.len(), 2);
    }

    #[test]
    fn cancel_returns_the_booking() {
        let mut ledger = Ledger::new();
        ledger
            .book("Alice", LessonKind::Math, "Mon 10AM", vec![AddOn::Recorded])
            .unwrap();
        let booking = ledger.cancel("Alice", "Mon 10AM").unwrap();
        assert_eq!(booking.add_ons, vec![AddOn::Recorded]);
        assert!(ledger.is_empty());
    }

    #[test]
    fn cancel_missing_booking_fails() {
        let mut ledger = Ledger::new();
        let err = ledger.cancel("Alice", "Mon 10AM").unwrap_err();
        assert!(matches!(err, BookingError::BookingNotFound { .. }));
    }

    #[test]
    fn reschedule_moves_the_slot() {
        let mut ledger = Ledger::new();
        ledger
            .book("Alice", LessonKind::Math, "Mon 10AM", vec![])
            .unwrap();
        ledger.reschedule("Alice", "Mon 10AM", "Tue 2PM").unwrap();
        assert!(ledger.find("Alice", "Mon 10AM").is_none());
        assert!(ledger.find("Alice", "Tue 2PM").is_some());
    }

    #[test]
    fn reschedule_to_same_slot_is_noop() {
        let mut ledger = Ledger::new();
        ledger
            .book("Alice", LessonKind::Math, "Mon 10AM", vec![])
            .unwrap();
        ledger.reschedule("Alice", "Mon 10AM", "Mon 10AM").unwrap();
        assert!(ledger.find("Alice", "Mon 10AM").is_some());
        assert_eq!(ledger.len(), 1);
    }

    #[test]
    fn reschedule_to_same_missing_slot_reports_not_found() {
        let mut ledger = Ledger::new();
        let err = ledger
            .reschedule("Alice", "Mon 10AM", "Mon 10AM")
            .unwrap_err();
        assert!(matches!(err, BookingError::BookingNotFound { .. }));
    }

    #[test]
    fn reschedule_into_taken_slot_fails_cleanly() {
        let mut ledger = Ledger::new();
        ledger
            .book("Alice", LessonKind::Math, "Mon 10AM", vec![])
            .unwrap();
        ledger
            .book("Alice", LessonKind::English, "Tue 2PM", vec![])
            .unwrap();
        let err = ledger.reschedule("Alice", "Mon 10AM", "Tue 2PM").unwrap_err();
        assert!(matches!(err, BookingError::SlotTaken { .. }));
        // unchanged
        assert!(ledger.find("Alice", "Mon 10AM").is_some());
    }
}

use crate::error::Result;
use crate::event::EventKind;
use crate::lesson::{self, AddOn, LessonKind};
use crate::manager::BookingManager;
use crate::payment::{PaymentProcessor, TransactionId};
use crate::pricing::PricingStrategy;
use crate::tutor::Tutor;
use serde::Serialize;

// ---------------------------------------------------------------------------
// QuickBookReceipt
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize)]
pub struct QuickBookReceipt {
    pub tutor: String,
    pub lesson: LessonKind,
    pub slot: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub add_ons: Vec<AddOn>,
    pub lesson_count: u32,
    pub strategy: &'static str,
    pub total: f64,
    pub transaction: TransactionId,
}

// ---------------------------------------------------------------------------
// BookingFacade
// ---------------------------------------------------------------------------

/// One-call booking: price the bundle, charge it, announce the payment,
/// and schedule the first lesson. The pricing strategy and payment
/// processor are injected; the facade orchestrates but owns no policy.
pub struct BookingFacade {
    manager: BookingManager,
    pricing: Box<dyn PricingStrategy>,
    payments: Box<dyn PaymentProcessor>,
}

impl BookingFacade {
    pub fn new(
        manager: BookingManager,
        pricing: Box<dyn PricingStrategy>,
        payments: Box<dyn PaymentProcessor>,
    ) -> Self {
        Self {
            manager,
            pricing,
            payments,
        }
    }

    pub fn manager(&self) -> &BookingManager {
        &self.manager
    }

    pub fn manager_mut(&mut self) -> &mut BookingManager {
        &mut self.manager
    }

    pub fn quick_book(
        &mut self,
        tutor: &Tutor,
        lesson: LessonKind,
        slot: impl Into<String>,
        add_ons: Vec<AddOn>,
        lesson_count: u32,
    ) -> Result<QuickBookReceipt> {
        let slot = slot.into();
        let per_lesson = lesson::price_with_addons(lesson, &add_ons);
        let total = self.pricing.price(per_lesson, lesson_count);

        // Charge before touching the schedule: a declined card leaves the
        // ledger and history untouched.
        let transaction = self.payments.process_payment(total)?;
        // The charge already happened; subscriber trouble must not unwind it.
        if let Err(e) = self.manager.publish(
            EventKind::PaymentReceived,
            format!("{total:.2} for {lesson_count} {lesson} lesson(s) [{transaction}]"),
        ) {
            tracing::warn!(%transaction, error = %e, "payment broadcast completed with failures");
        }

        self.manager
            .schedule(&tutor.name, lesson, &slot, add_ons.clone())?;

        Ok(QuickBookReceipt {
            tutor: tutor.name.clone(),
            lesson,
            slot,
            add_ons,
            lesson_count,
            strategy: self.pricing.name(),
            total,
            transaction,
        })
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::payment::{ExternalPaymentService, PaymentAdapter};
    use crate::pricing::BulkDiscount;

    fn facade() -> BookingFacade {
        BookingFacade::new(
            BookingManager::new(),
            Box::new(BulkDiscount),
            Box::new(PaymentAdapter::new(ExternalPaymentService::new())),
        )
    }

    #[test]
    fn quick_book_prices_charges_and_schedules() {
        let tutor = Tutor::builder()
            .name("Alice")
            .subject("Math")
            .years_experience(7)
            .build()
            .unwrap();

        let mut facade = facade();
        let receipt = facade
            .quick_book(&tutor, LessonKind::Math, "Mon 10AM", vec![AddOn::Recorded], 5)
            .unwrap();

        // (40 + 5) * 5 lessons, 10% bulk tier
        assert_eq!(receipt.total, 45.0 * 5.0 * 0.90);
        assert_eq!(receipt.strategy, "bulk");
        assert!(facade.manager().ledger().find("Alice", "Mon 10AM").is_some());
        assert_eq!(facade.manager().history().count(), 1);
    }

    #[test]
    fn quick_booked_lesson_is_undoable() {
        let tutor = Tutor::builder()
            .name("Alice")
            .subject("Math")
            .build()
            .unwrap();

        let mut facade = facade();
        facade
            .quick_book(&tutor, LessonKind::Math, "Mon 10AM", vec![], 1)
            .unwrap();
        facade.manager_mut().undo().unwrap();
        assert!(facade.manager().ledger().is_empty());
    }
}

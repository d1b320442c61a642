use crate::output::{print_json, print_table};
use anyhow::Context;
use std::cell::RefCell;
use std::rc::Rc;
use tutorbook_core::{
    event::EventKind,
    facade::BookingFacade,
    lesson::{AddOn, LessonKind},
    log::HistoryEntry,
    manager::BookingManager,
    payment::{ExternalPaymentService, PaymentAdapter},
    pricing::BulkDiscount,
    subscribers::{AdminAnalytics, StudentInbox, TutorInbox},
    tutor::Tutor,
};

pub fn run(json: bool) -> anyhow::Result<()> {
    let student = Rc::new(RefCell::new(StudentInbox::new("Dana")));
    let tutor_inbox = Rc::new(RefCell::new(TutorInbox::new("Alice")));
    let admin = Rc::new(RefCell::new(AdminAnalytics::new()));

    let mut manager = BookingManager::new();
    manager.subscribe(student.clone());
    manager.subscribe(tutor_inbox.clone());
    manager.subscribe(admin.clone());

    // A session with second thoughts: book, move, change minds twice.
    manager
        .schedule("Alice", LessonKind::Math, "Mon 10AM", vec![])
        .context("scheduling math lesson")?;
    manager
        .schedule(
            "Bob",
            LessonKind::Programming,
            "Tue 2PM",
            vec![AddOn::Recorded],
        )
        .context("scheduling programming lesson")?;
    manager
        .reschedule("Alice", LessonKind::Math, "Mon 10AM", "Wed 4PM")
        .context("rescheduling math lesson")?;
    manager.undo()?; // back to Mon 10AM
    manager.redo()?; // forward to Wed 4PM again
    manager
        .cancel("Bob", "Tue 2PM", "student sick")
        .context("cancelling programming lesson")?;
    manager.undo()?; // the cancellation was premature

    // The student stops listening; the remaining subscribers still hear
    // the lesson start.
    let student_handle: tutorbook_core::bus::SubscriberHandle = student.clone();
    manager.unsubscribe(&student_handle);
    manager.publish(EventKind::LessonStarting, "math at Wed 4PM")?;

    // One-call booking through the facade: price, charge, schedule.
    let facade_tutor = Tutor::builder()
        .name("Carol")
        .subject("English")
        .years_experience(3)
        .build()?;
    let mut facade = BookingFacade::new(
        manager,
        Box::new(BulkDiscount),
        Box::new(PaymentAdapter::new(ExternalPaymentService::new())),
    );
    let receipt = facade
        .quick_book(
            &facade_tutor,
            LessonKind::English,
            "Fri 1PM",
            vec![AddOn::Materials],
            5,
        )
        .context("quick-booking english bundle")?;
    let manager = facade.manager();

    let history: Vec<HistoryEntry> = manager.history().collect();

    if json {
        #[derive(serde::Serialize)]
        struct DemoOutput<'a> {
            history: &'a [HistoryEntry],
            active_bookings: usize,
            student_inbox: &'a [String],
            tutor_inbox: &'a [String],
            events_seen_by_admin: u64,
            receipt: &'a tutorbook_core::facade::QuickBookReceipt,
        }

        let student = student.borrow();
        let tutor_inbox = tutor_inbox.borrow();
        return print_json(&DemoOutput {
            history: &history,
            active_bookings: manager.ledger().len(),
            student_inbox: &student.messages,
            tutor_inbox: &tutor_inbox.messages,
            events_seen_by_admin: admin.borrow().total(),
            receipt: &receipt,
        });
    }

    println!("Booking history:");
    print_table(
        &["#", "action", "current"],
        history
            .iter()
            .map(|e| {
                vec![
                    (e.position + 1).to_string(),
                    e.description.clone(),
                    if e.current { "*".to_string() } else { String::new() },
                ]
            })
            .collect(),
    );

    println!("\nActive bookings:");
    print_table(
        &["tutor", "lesson", "slot"],
        manager
            .ledger()
            .bookings()
            .iter()
            .map(|b| {
                vec![
                    b.tutor.clone(),
                    tutorbook_core::lesson::describe_with_addons(b.lesson, &b.add_ons),
                    b.slot.clone(),
                ]
            })
            .collect(),
    );

    println!("\nStudent Dana's inbox:");
    for message in &student.borrow().messages {
        println!("  - {message}");
    }

    println!("\nTutor Alice's inbox:");
    for message in &tutor_inbox.borrow().messages {
        println!("  - {message}");
    }

    let admin = admin.borrow();
    println!("\nAdmin analytics:");
    println!("  confirmations:  {}", admin.count(EventKind::BookingConfirmed));
    println!("  cancellations:  {}", admin.count(EventKind::BookingCancelled));
    println!("  reschedules:    {}", admin.count(EventKind::LessonRescheduled));
    println!("  lesson starts:  {}", admin.count(EventKind::LessonStarting));
    println!("  payments:       {}", admin.count(EventKind::PaymentReceived));

    println!(
        "\nQuick-booked {} at {} for {:.2} ({} pricing, txn {})",
        receipt.lesson, receipt.slot, receipt.total, receipt.strategy, receipt.transaction
    );

    Ok(())
}

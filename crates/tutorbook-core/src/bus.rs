use crate::error::{BookingError, Result};
use crate::event::{Event, EventKind};
use std::cell::RefCell;
use std::rc::Rc;

// ---------------------------------------------------------------------------
// Subscriber
// ---------------------------------------------------------------------------

/// A receiver of booking events. Implementations react with local side
/// effects (inbox entries, counters, log lines); a returned error is
/// collected by the bus and never aborts a broadcast.
pub trait Subscriber {
    fn on_event(&mut self, event: &Event) -> Result<()>;

    /// Label used in broadcast failure reports.
    fn name(&self) -> String {
        "subscriber".to_string()
    }
}

/// Shared handle to a subscriber. The bus tracks membership by handle
/// identity, so the same handle can be cloned freely by the caller and
/// still counts as one registration.
pub type SubscriberHandle = Rc<RefCell<dyn Subscriber>>;

// ---------------------------------------------------------------------------
// EventBus
// ---------------------------------------------------------------------------

/// Broadcast registry: an insertion-ordered set of subscribers plus a
/// synchronous `publish`. The bus keeps no event history; replay is the
/// action log's job, not the bus's.
#[derive(Default)]
pub struct EventBus {
    subscribers: Vec<SubscriberHandle>,
}

impl EventBus {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a subscriber. Re-subscribing the same handle is a no-op.
    pub fn subscribe(&mut self, subscriber: SubscriberHandle) {
        if !self.subscribers.iter().any(|s| Rc::ptr_eq(s, &subscriber)) {
            self.subscribers.push(subscriber);
        }
    }

    /// Remove a subscriber. Removing an absent handle is a no-op.
    pub fn unsubscribe(&mut self, subscriber: &SubscriberHandle) {
        self.subscribers.retain(|s| !Rc::ptr_eq(s, subscriber));
    }

    pub fn subscriber_count(&self) -> usize {
        self.subscribers.len()
    }

    /// Deliver an event to every registered subscriber, in subscription
    /// order, before returning. Delivery iterates over a snapshot of the
    /// registry, so a subscriber that mutates the registry mid-broadcast
    /// does not change the recipients of the event in flight.
    ///
    /// One failing subscriber never blocks the rest: failures are collected
    /// and reported once, after the full broadcast, as a `Broadcast` error.
    /// `Ok` carries the number of subscribers reached.
    pub fn publish(&mut self, kind: EventKind, message: impl Into<String>) -> Result<usize> {
        let event = Event::new(kind, message);
        let snapshot: Vec<SubscriberHandle> = self.subscribers.clone();

        tracing::debug!(kind = %event.kind, recipients = snapshot.len(), "broadcast");

        let mut failures = Vec::new();
        for subscriber in &snapshot {
            let mut subscriber = subscriber.borrow_mut();
            if let Err(e) = subscriber.on_event(&event) {
                failures.push(format!("{}: {}", subscriber.name(), e));
            }
        }

        if failures.is_empty() {
            Ok(snapshot.len())
        } else {
            Err(BookingError::Broadcast {
                kind: event.kind.to_string(),
                delivered: snapshot.len() - failures.len(),
                failures,
            })
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    /// Appends every received message to a shared transcript, so tests can
    /// check delivery order across subscribers.
    struct Recorder {
        label: &'static str,
        transcript: Rc<RefCell<Vec<String>>>,
    }

    impl Subscriber for Recorder {
        fn on_event(&mut self, event: &Event) -> Result<()> {
            self.transcript
                .borrow_mut()
                .push(format!("{}:{}", self.label, event.kind));
            Ok(())
        }

        fn name(&self) -> String {
            self.label.to_string()
        }
    }

    struct Faulty;

    impl Subscriber for Faulty {
        fn on_event(&mut self, _event: &Event) -> Result<()> {
            Err(BookingError::Subscriber("inbox full".to_string()))
        }

        fn name(&self) -> String {
            "faulty".to_string()
        }
    }

    fn recorder(label: &'static str, transcript: &Rc<RefCell<Vec<String>>>) -> SubscriberHandle {
        Rc::new(RefCell::new(Recorder {
            label,
            transcript: Rc::clone(transcript),
        }))
    }

    #[test]
    fn delivers_in_subscription_order() {
        let transcript = Rc::new(RefCell::new(Vec::new()));
        let s1 = recorder("s1", &transcript);
        let s2 = recorder("s2", &transcript);

        let mut bus = EventBus::new();
        bus.subscribe(s1);
        bus.subscribe(s2);

        let reached = bus.publish(EventKind::BookingConfirmed, "X").unwrap();
        assert_eq!(reached, 2);
        assert_eq!(
            *transcript.borrow(),
            vec!["s1:booking_confirmed", "s2:booking_confirmed"]
        );
    }

    #[test]
    fn unsubscribed_handle_stops_receiving() {
        let transcript = Rc::new(RefCell::new(Vec::new()));
        let s1 = recorder("s1", &transcript);
        let s2 = recorder("s2", &transcript);

        let mut bus = EventBus::new();
        bus.subscribe(Rc::clone(&s1));
        bus.subscribe(s2);
        bus.unsubscribe(&s1);

        bus.publish(EventKind::BookingCancelled, "X").unwrap();
        assert_eq!(*transcript.borrow(), vec!["s2:booking_cancelled"]);
    }

    #[test]
    fn resubscribe_is_idempotent() {
        let transcript = Rc::new(RefCell::new(Vec::new()));
        let s1 = recorder("s1", &transcript);

        let mut bus = EventBus::new();
        bus.subscribe(Rc::clone(&s1));
        bus.subscribe(Rc::clone(&s1));
        assert_eq!(bus.subscriber_count(), 1);

        bus.publish(EventKind::LessonStarting, "X").unwrap();
        assert_eq!(transcript.borrow().len(), 1);
    }

    #[test]
    fn unsubscribe_absent_is_noop() {
        let transcript = Rc::new(RefCell::new(Vec::new()));
        let s1 = recorder("s1", &transcript);

        let mut bus = EventBus::new();
        bus.unsubscribe(&s1);
        assert_eq!(bus.subscriber_count(), 0);
    }

    #[test]
    fn failing_subscriber_does_not_block_delivery() {
        let transcript = Rc::new(RefCell::new(Vec::new()));
        let s2 = recorder("s2", &transcript);

        let mut bus = EventBus::new();
        bus.subscribe(Rc::new(RefCell::new(Faulty)));
        bus.subscribe(s2);

        let err = bus.publish(EventKind::BookingConfirmed, "X").unwrap_err();
        // s2 still got the event
        assert_eq!(*transcript.borrow(), vec!["s2:booking_confirmed"]);

        match err {
            BookingError::Broadcast {
                delivered,
                failures,
                ..
            } => {
                assert_eq!(delivered, 1);
                assert_eq!(failures.len(), 1);
                assert!(failures[0].contains("faulty"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn empty_bus_publish_reaches_nobody() {
        let mut bus = EventBus::new();
        let reached = bus.publish(EventKind::LessonCompleted, "X").unwrap();
        assert_eq!(reached, 0);
    }
}

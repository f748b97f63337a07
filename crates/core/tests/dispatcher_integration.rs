// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]

//! Integration tests for the event dispatcher
//!
//! Events cross the wire as bytes, are rebuilt by a factory, queued on a
//! dispatcher and delivered to listeners on later ticks.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use switchboard_core::{
    ByteBuffer, DispatcherConfig, Event, EventBase, EventDispatcher, EventError, EventFactory,
    EventPtr, EventSubject, EventType, Listener, SimpleEvent,
};

static DAMAGE: EventType = EventType::from_static("damage_dealt");

#[derive(Debug, Default)]
struct DamageEvent {
    base: EventBase,
    amount: u32,
    critical: bool,
}

impl DamageEvent {
    fn new(subject: EventSubject, amount: u32, critical: bool) -> Self {
        Self {
            base: EventBase::new(subject, 0),
            amount,
            critical,
        }
    }
}

impl Event for DamageEvent {
    fn event_type(&self) -> &EventType {
        &DAMAGE
    }

    fn base(&self) -> &EventBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut EventBase {
        &mut self.base
    }

    fn on_serialize(&self, out: &mut ByteBuffer) {
        out.write(self.amount).write(self.critical);
    }

    fn on_deserialize(&mut self, input: &mut ByteBuffer) -> Result<(), EventError> {
        self.amount = input.read(false)?;
        self.critical = input.read(false)?;
        Ok(())
    }
}

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

// =============================================================================
// Wire to Listener
// =============================================================================

#[test]
fn decoded_events_reach_typed_listeners() {
    init_tracing();

    let mut wire = ByteBuffer::new();
    DamageEvent::new(7, 40, false).serialize(&mut wire);
    DamageEvent::new(8, 95, true).serialize(&mut wire);
    SimpleEvent::new("zone_loaded", 0, 0).serialize(&mut wire);

    let mut factory = EventFactory::new();
    factory.register::<DamageEvent>().register_simple("zone_loaded");

    let dispatcher = EventDispatcher::new().unwrap();
    let hits = Arc::new(Mutex::new(Vec::new()));
    let seen = Arc::clone(&hits);
    dispatcher
        .connect(
            DAMAGE.clone(),
            Listener::new("combat_log", move |event| {
                let damage = event.downcast_ref::<DamageEvent>().unwrap();
                seen.lock()
                    .unwrap()
                    .push((damage.subject(), damage.amount, damage.critical));
                true
            }),
        )
        .unwrap();
    let loads = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&loads);
    dispatcher
        .connect(
            "zone_loaded",
            Listener::new("loader", move |_| {
                counter.fetch_add(1, Ordering::SeqCst);
                true
            }),
        )
        .unwrap();

    while wire.remaining() > 0 {
        dispatcher.notify(factory.decode(&mut wire).unwrap()).unwrap();
    }
    assert_eq!(dispatcher.tick(1).wait().unwrap(), 3);

    // Subjects were not serialized
    assert_eq!(*hits.lock().unwrap(), vec![(0, 40, false), (0, 95, true)]);
    assert_eq!(loads.load(Ordering::SeqCst), 1);
}

#[test]
fn unknown_identity_is_rejected_before_dispatch() {
    let mut wire = ByteBuffer::new();
    SimpleEvent::new("never_registered", 0, 0).serialize(&mut wire);

    let factory = EventFactory::new();
    let err = factory.decode(&mut wire).unwrap_err();

    assert_eq!(
        err,
        EventError::UnknownIdentity(EventType::new("never_registered").checksum())
    );
}

// =============================================================================
// Timing and Completion
// =============================================================================

#[test]
fn delayed_events_fire_in_effective_time_order() {
    init_tracing();

    let dispatcher = EventDispatcher::with_config(&DispatcherConfig {
        worker_name: "timing".to_string(),
        initial_timestep: 1000,
        stamp_unset_timestamps: true,
    })
    .unwrap();

    let order = Arc::new(Mutex::new(Vec::new()));
    let log = Arc::clone(&order);
    dispatcher
        .connect(
            "timer",
            Listener::new("timer_log", move |event| {
                log.lock().unwrap().push(event.subject());
                false
            }),
        )
        .unwrap();

    // Unset timestamps count from the dispatcher's clock: due at 1300, 1100, 1200
    for (subject, delay) in [(1, 300), (2, 100), (3, 200)] {
        dispatcher
            .notify(Arc::new(SimpleEvent::new("timer", subject, delay)))
            .unwrap();
    }

    assert_eq!(dispatcher.tick(1150).wait().unwrap(), 1);
    assert_eq!(dispatcher.tick(1400).wait().unwrap(), 2);
    assert_eq!(*order.lock().unwrap(), vec![2, 3, 1]);
}

#[test]
fn completion_callback_fires_once_after_delivery() {
    let dispatcher = EventDispatcher::new().unwrap();
    let completions = Arc::new(AtomicUsize::new(0));
    let done = Arc::clone(&completions);
    let event: EventPtr = Arc::new(SimpleEvent::with_callback("save", 0, 0, move || {
        done.fetch_add(1, Ordering::SeqCst);
    }));

    dispatcher.notify(Arc::clone(&event)).unwrap();
    dispatcher.tick(5).wait().unwrap();
    assert_eq!(completions.load(Ordering::SeqCst), 1);

    // Redelivering the same shared event does not re-run the callback
    dispatcher.deliver(event).wait().unwrap();
    assert_eq!(completions.load(Ordering::SeqCst), 1);
}

#[test]
fn chained_events_fire_on_consecutive_ticks() {
    let dispatcher = EventDispatcher::new().unwrap();
    let order = Arc::new(Mutex::new(Vec::new()));
    for name in ["open_door", "enter_room"] {
        let log = Arc::clone(&order);
        dispatcher
            .connect(
                name,
                Listener::new("script", move |event| {
                    log.lock().unwrap().push(event.event_type().text().to_string());
                    true
                }),
            )
            .unwrap();
    }

    let mut first = SimpleEvent::new("open_door", 0, 0);
    first
        .base_mut()
        .set_next(Box::new(SimpleEvent::new("enter_room", 0, 0)));
    dispatcher.notify(Arc::new(first)).unwrap();

    assert_eq!(dispatcher.tick(1).wait().unwrap(), 1);
    assert!(dispatcher.has_events().wait().unwrap());
    assert_eq!(dispatcher.tick(2).wait().unwrap(), 1);
    assert_eq!(*order.lock().unwrap(), vec!["open_door", "enter_room"]);
}

//! Queued delivery: nothing fires before a tick, due events fire in time order

use crate::prelude::*;
use similar_asserts::assert_eq;
use switchboard_core::EventDispatcher;

#[test]
fn queued_events_fire_only_on_tick() {
    let dispatcher = EventDispatcher::new().unwrap();
    let seen = seen();
    dispatcher
        .connect("mock_event", recorder("mock_listener", false, &seen))
        .unwrap();

    dispatcher.notify(event_at("mock_event", 1, 100, 400)).unwrap();
    dispatcher.notify(event_at("mock_event", 2, 200, 100)).unwrap();

    // Round-trip through the worker so both notifies have run
    assert!(dispatcher.has_events().wait().unwrap());
    assert!(seen.lock().unwrap().is_empty());

    assert_eq!(dispatcher.tick(1000).wait().unwrap(), 2);
    assert_eq!(
        *seen.lock().unwrap(),
        vec![
            ("mock_event".to_string(), 200, 2),
            ("mock_event".to_string(), 100, 1),
        ]
    );
}

#[test]
fn future_events_stay_queued() {
    let dispatcher = EventDispatcher::new().unwrap();
    let seen = seen();
    dispatcher
        .connect("reminder", recorder("calendar", true, &seen))
        .unwrap();

    dispatcher.notify(event_at("reminder", 1, 50, 50)).unwrap();

    assert_eq!(dispatcher.tick(99).wait().unwrap(), 0);
    assert!(dispatcher.has_events().wait().unwrap());
    assert_eq!(dispatcher.tick(100).wait().unwrap(), 1);
    assert!(!dispatcher.has_events().wait().unwrap());
    assert_eq!(seen.lock().unwrap().len(), 1);
}

#[test]
fn handled_events_stop_at_the_first_handler() {
    let dispatcher = EventDispatcher::new().unwrap();
    let first = seen();
    let second = seen();
    dispatcher
        .connect("door_opened", recorder("alarm", true, &first))
        .unwrap();
    dispatcher
        .connect("door_opened", recorder("logger", true, &second))
        .unwrap();

    assert!(dispatcher
        .deliver(event_at("door_opened", 9, 1, 0))
        .wait()
        .unwrap());

    assert_eq!(first.lock().unwrap().len(), 1);
    assert!(second.lock().unwrap().is_empty());
}

#[test]
fn events_without_listeners_are_unhandled() {
    let dispatcher = EventDispatcher::new().unwrap();
    assert!(!dispatcher
        .deliver(event_at("nobody_listens", 0, 0, 0))
        .wait()
        .unwrap());
}

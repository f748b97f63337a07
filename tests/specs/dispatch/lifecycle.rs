//! Dispatcher construction, configuration and teardown

use crate::prelude::*;
use switchboard_core::{DispatchError, DispatcherConfig, EventDispatcher};

#[test]
fn config_file_drives_the_dispatcher() {
    let config = DispatcherConfig::from_toml_str(
        r#"
        worker_name = "zone-events"
        initial_timestep = 500
        "#,
    )
    .unwrap();
    let dispatcher = EventDispatcher::with_config(&config).unwrap();

    assert_eq!(dispatcher.current_timestep().wait().unwrap(), 500);
}

#[test]
fn disconnected_listeners_stop_receiving() {
    let dispatcher = EventDispatcher::new().unwrap();
    let seen = seen();
    dispatcher.connect("tick", recorder("hud", false, &seen)).unwrap();
    dispatcher.connect("tock", recorder("hud", false, &seen)).unwrap();

    dispatcher.disconnect_from_all("hud").unwrap();
    dispatcher.deliver(event_at("tick", 0, 0, 0)).wait().unwrap();
    dispatcher.deliver(event_at("tock", 0, 0, 0)).wait().unwrap();

    assert!(seen.lock().unwrap().is_empty());
    assert_eq!(dispatcher.registered_events().wait().unwrap().len(), 2);
}

#[test]
fn senders_outlive_their_dispatcher_safely() {
    let dispatcher = EventDispatcher::new().unwrap();
    let sender = dispatcher.sender();
    sender.notify(event_at("early", 0, 0, 0)).unwrap();
    drop(dispatcher);

    let err = sender.notify(event_at("late", 0, 0, 0)).unwrap_err();
    assert!(matches!(err, DispatchError::Worker(_)));
}

//! Shared helpers for specs

use std::sync::{Arc, Mutex};
use switchboard_core::{Event, EventPtr, Listener, SimpleEvent};

/// Events seen by a listener, as `(identity, timestamp, subject)`
pub type Seen = Arc<Mutex<Vec<(String, u64, u64)>>>;

pub fn seen() -> Seen {
    Arc::new(Mutex::new(Vec::new()))
}

/// A listener that records every event it is offered
pub fn recorder(id: &str, handled: bool, seen: &Seen) -> Listener {
    let seen = Arc::clone(seen);
    Listener::new(id, move |event| {
        seen.lock().unwrap().push((
            event.event_type().text().to_string(),
            event.timestamp(),
            event.subject(),
        ));
        handled
    })
}

/// A payload-free event with an explicit timestamp
pub fn event_at(name: &str, subject: u64, timestamp: u64, delay_ms: u64) -> EventPtr {
    let mut event = SimpleEvent::new(name, subject, delay_ms);
    event.base_mut().set_timestamp(timestamp);
    Arc::new(event)
}

// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! switchboard-core: event dispatch and active objects
//!
//! This crate provides:
//! - `ActiveObject` - a private worker thread fed by an unbounded message queue
//! - `Event` - the message contract: identity, timing, chaining, serialization
//! - `EventDispatcher` - listener registry and double-buffered, time-gated
//!   event queue, serialized through one active object

pub mod active;
pub mod config;
pub mod dispatcher;
pub mod error;
pub mod event;
pub mod pending;

// Re-exports
pub use active::{ActiveError, ActiveHandle, ActiveObject, ActiveObjectBuilder};
pub use config::{ConfigError, DispatcherConfig};
pub use dispatcher::{DispatchSender, EventDispatcher, Listener, ListenerCallback, ListenerType};
pub use error::DispatchError;
pub use event::{
    compare_event_weight, decode_event, event_weight_greater_than, event_weight_less_than, Event,
    EventBase, EventCallback, EventError, EventFactory, EventPriority, EventPtr, EventSubject,
    EventType, EventWeight, SimpleEvent,
};
pub use pending::Pending;

pub use switchboard_codec::{BufferError, ByteBuffer, HashedId};

// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Events: messages passed from a producer to any interested listeners
//!
//! This module provides:
//! - `Event` - the capability set every event kind implements
//! - `EventBase` - shared bookkeeping embedded by concrete events
//! - `SimpleEvent` - an event with no payload
//! - `EventWeight` - the ordering key used by the dispatcher's queues
//! - `EventFactory` - rebuilds events from serialized bytes
//!
//! Serialized layout: the identity checksum as a native-order `u32`,
//! followed by the payload fields in whatever order the kind chooses.
//! There is no length prefix or framing.

mod base;
mod factory;
mod order;
mod simple;

pub use base::EventBase;
pub use factory::{decode_event, EventFactory};
pub use order::{compare_event_weight, event_weight_greater_than, event_weight_less_than, EventWeight};
pub use simple::SimpleEvent;

use std::any::Any;
use std::sync::Arc;
use switchboard_codec::{BufferError, ByteBuffer, HashedId};
use thiserror::Error;

/// Identity of an event kind
pub type EventType = HashedId;
/// Correlation id of whatever the event is about; 0 means no subject
pub type EventSubject = u64;
pub type EventPriority = u32;
/// Invoked once after every interested listener has seen the event
pub type EventCallback = Box<dyn FnOnce() + Send + 'static>;
/// Shared handle used once an event enters a dispatcher
pub type EventPtr = Arc<dyn Event>;

/// Errors that can occur while rebuilding an event from bytes
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EventError {
    #[error("malformed event payload: {0}")]
    Buffer(#[from] BufferError),
    #[error("identity mismatch: expected {expected:#010x}, found {found:#010x}")]
    IdentityMismatch { expected: u32, found: u32 },
    #[error("no decoder registered for identity {0:#010x}")]
    UnknownIdentity(u32),
}

/// Common interface for all events
///
/// Implementors supply the identity, access to their embedded [`EventBase`]
/// and the payload hooks; everything else is provided.
pub trait Event: Any + Send + Sync {
    fn event_type(&self) -> &EventType;

    fn base(&self) -> &EventBase;

    fn base_mut(&mut self) -> &mut EventBase;

    /// Writes the payload that follows the identity checksum
    fn on_serialize(&self, out: &mut ByteBuffer);

    /// Reads the payload back, in the order `on_serialize` wrote it
    fn on_deserialize(&mut self, input: &mut ByteBuffer) -> Result<(), EventError>;

    /// Reacts to the outcome of delivery. Returning false suppresses the
    /// completion callback.
    fn on_consume(&self, _handled: bool) -> bool {
        true
    }

    fn subject(&self) -> EventSubject {
        self.base().subject()
    }

    fn priority(&self) -> EventPriority {
        self.base().priority()
    }

    fn timestamp(&self) -> u64 {
        self.base().timestamp()
    }

    fn delay_ms(&self) -> u64 {
        self.base().delay_ms()
    }

    /// Timestamp plus delay: when the event becomes due
    fn effective_time(&self) -> u64 {
        self.timestamp().saturating_add(self.delay_ms())
    }

    /// Detaches the chained successor, if any
    fn take_next(&self) -> Option<Box<dyn Event>> {
        self.base().take_next()
    }

    /// Called after all interested listeners have had the event.
    /// The completion callback fires at most once however often this runs.
    fn consume(&self, handled: bool) {
        if self.on_consume(handled) {
            self.base().fire_callback();
        }
    }

    fn serialize(&self, out: &mut ByteBuffer) {
        out.write(self.event_type().checksum());
        self.on_serialize(out);
    }

    /// Exact inverse of [`Event::serialize`]. The leading checksum must be
    /// this event's identity.
    fn deserialize(&mut self, input: &mut ByteBuffer) -> Result<(), EventError> {
        let expected = self.event_type().checksum();
        let found = input.peek::<u32>(false)?;
        if found != expected {
            return Err(EventError::IdentityMismatch { expected, found });
        }
        input.read::<u32>(false)?;
        self.on_deserialize(input)
    }
}

impl dyn Event {
    /// Borrows the concrete event behind a trait object
    pub fn downcast_ref<E: Event>(&self) -> Option<&E> {
        (self as &dyn Any).downcast_ref::<E>()
    }

    pub fn is<E: Event>(&self) -> bool {
        (self as &dyn Any).is::<E>()
    }
}

impl std::fmt::Debug for dyn Event {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Event")
            .field("event_type", self.event_type())
            .field("subject", &self.subject())
            .field("priority", &self.priority())
            .field("timestamp", &self.timestamp())
            .field("delay_ms", &self.delay_ms())
            .finish()
    }
}

// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Payload-free events for trivial triggers

use super::{Event, EventBase, EventError, EventSubject, EventType};
use switchboard_codec::ByteBuffer;

/// An event that carries nothing but its identity and base bookkeeping
///
/// Useful for signals like "zone_loaded" where listeners only need to know
/// that something happened (and, through the subject, to what).
#[derive(Debug)]
pub struct SimpleEvent {
    event_type: EventType,
    base: EventBase,
}

impl SimpleEvent {
    pub fn new(event_type: impl Into<EventType>, subject: EventSubject, delay_ms: u64) -> Self {
        Self {
            event_type: event_type.into(),
            base: EventBase::new(subject, delay_ms),
        }
    }

    pub fn with_callback(
        event_type: impl Into<EventType>,
        subject: EventSubject,
        delay_ms: u64,
        callback: impl FnOnce() + Send + 'static,
    ) -> Self {
        Self {
            event_type: event_type.into(),
            base: EventBase::new(subject, delay_ms).with_callback(callback),
        }
    }
}

impl Event for SimpleEvent {
    fn event_type(&self) -> &EventType {
        &self.event_type
    }

    fn base(&self) -> &EventBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut EventBase {
        &mut self.base
    }

    fn on_serialize(&self, _out: &mut ByteBuffer) {}

    fn on_deserialize(&mut self, _input: &mut ByteBuffer) -> Result<(), EventError> {
        Ok(())
    }
}

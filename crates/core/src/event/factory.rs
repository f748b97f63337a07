// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Rebuilding events from serialized bytes
//!
//! A transport that receives raw event bytes does not know which concrete
//! kind to construct. The factory peeks the leading identity checksum and
//! hands the buffer to the decoder registered for it.

use super::{Event, EventError, EventPtr, EventType, SimpleEvent};
use std::collections::HashMap;
use std::sync::Arc;
use switchboard_codec::ByteBuffer;

type Decoder = Box<dyn Fn(&mut ByteBuffer) -> Result<EventPtr, EventError> + Send + Sync>;

/// Builds a fresh `E` from bytes produced by `E::serialize`
pub fn decode_event<E: Event + Default>(input: &mut ByteBuffer) -> Result<E, EventError> {
    let mut event = E::default();
    event.deserialize(input)?;
    Ok(event)
}

/// Registry of decoders keyed by identity checksum
#[derive(Default)]
pub struct EventFactory {
    decoders: HashMap<u32, (EventType, Decoder)>,
}

impl EventFactory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a kind that can be default-constructed and then deserialized
    pub fn register<E: Event + Default>(&mut self) -> &mut Self {
        let event_type = E::default().event_type().clone();
        self.register_with(event_type, |input| {
            Ok(Arc::new(decode_event::<E>(input)?) as EventPtr)
        })
    }

    /// Registers a payload-free identity decoded as a `SimpleEvent`
    pub fn register_simple(&mut self, event_type: impl Into<EventType>) -> &mut Self {
        let event_type = event_type.into();
        let template = event_type.clone();
        self.register_with(event_type, move |input| {
            let mut event = SimpleEvent::new(template.clone(), 0, 0);
            event.deserialize(input)?;
            Ok(Arc::new(event) as EventPtr)
        })
    }

    /// Registers a custom decoder. A later registration for the same
    /// identity replaces the earlier one.
    pub fn register_with<F>(&mut self, event_type: EventType, decoder: F) -> &mut Self
    where
        F: Fn(&mut ByteBuffer) -> Result<EventPtr, EventError> + Send + Sync + 'static,
    {
        let checksum = event_type.checksum();
        if let Some((previous, _)) = self.decoders.get(&checksum) {
            tracing::debug!(event = %event_type, previous = %previous, "replacing event decoder");
        }
        self.decoders.insert(checksum, (event_type, Box::new(decoder)));
        self
    }

    pub fn is_registered(&self, event_type: &EventType) -> bool {
        self.decoders.contains_key(&event_type.checksum())
    }

    /// Identities with a registered decoder, in no particular order
    pub fn registered(&self) -> Vec<EventType> {
        self.decoders.values().map(|(event_type, _)| event_type.clone()).collect()
    }

    /// Decodes the event at the buffer's read cursor
    pub fn decode(&self, input: &mut ByteBuffer) -> Result<EventPtr, EventError> {
        let checksum = input.peek::<u32>(false)?;
        let (_, decoder) = self
            .decoders
            .get(&checksum)
            .ok_or(EventError::UnknownIdentity(checksum))?;
        decoder(input)
    }
}

impl std::fmt::Debug for EventFactory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventFactory")
            .field("registered", &self.registered())
            .finish()
    }
}

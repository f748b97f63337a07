// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Dispatcher state, owned and mutated only by the dispatcher's worker

use super::listener::{Listener, ListenerType};
use super::queue::{EventQueue, QueuedEvent};
use crate::config::DispatcherConfig;
use crate::event::{EventPtr, EventType, EventWeight};
use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;

/// Two queues: the active one receives new events while the other drains
const QUEUE_COUNT: usize = 2;

pub(crate) struct DispatcherState {
    event_types: BTreeSet<EventType>,
    // Iterated on every delivery, rarely mutated
    listeners: BTreeMap<EventType, Vec<Listener>>,
    queues: [EventQueue; QUEUE_COUNT],
    active_queue: usize,
    next_sequence: u64,
    current_timestep: u64,
    stamp_unset_timestamps: bool,
}

impl DispatcherState {
    pub fn new(config: &DispatcherConfig) -> Self {
        Self {
            event_types: BTreeSet::new(),
            listeners: BTreeMap::new(),
            queues: Default::default(),
            active_queue: 0,
            next_sequence: 0,
            current_timestep: config.initial_timestep,
            stamp_unset_timestamps: config.stamp_unset_timestamps,
        }
    }

    pub fn connect(&mut self, event_type: EventType, listener: Listener) {
        tracing::debug!(event = %event_type, listener = %listener.id(), "connecting listener");
        self.event_types.insert(event_type.clone());
        self.listeners.entry(event_type).or_default().push(listener);
    }

    pub fn disconnect(&mut self, event_type: &EventType, listener_type: &ListenerType) {
        let Some(listeners) = self.listeners.get_mut(event_type) else {
            return;
        };
        let before = listeners.len();
        listeners.retain(|listener| listener.id() != listener_type);
        if listeners.len() != before {
            tracing::debug!(event = %event_type, listener = %listener_type, "disconnected listener");
        }
    }

    pub fn disconnect_from_all(&mut self, listener_type: &ListenerType) {
        let mut removed = 0;
        for listeners in self.listeners.values_mut() {
            let before = listeners.len();
            listeners.retain(|listener| listener.id() != listener_type);
            removed += before - listeners.len();
        }
        tracing::debug!(listener = %listener_type, removed, "disconnected listener from all events");
    }

    pub fn listeners(&self, event_type: &EventType) -> Vec<Listener> {
        self.listeners.get(event_type).cloned().unwrap_or_default()
    }

    pub fn registered_events(&self) -> Vec<EventType> {
        self.event_types.iter().cloned().collect()
    }

    /// Queues an event into the active buffer
    pub fn notify(&mut self, event: EventPtr) {
        let queued = self.prepare(event);
        tracing::trace!(
            event = %queued.event.event_type(),
            effective_time = queued.weight.effective_time,
            "queued event"
        );
        self.queues[self.active_queue].push(queued);
    }

    /// Offers the event to its listeners in registration order until one
    /// handles it, then consumes it. A chained successor is queued.
    pub fn deliver(&mut self, event: &EventPtr) -> bool {
        let handled = self
            .listeners
            .get(event.event_type())
            .is_some_and(|listeners| listeners.iter().any(|listener| listener.handle(event)));

        tracing::trace!(event = %event.event_type(), handled, "delivered event");
        event.consume(handled);

        if let Some(next) = event.take_next() {
            self.notify(Arc::from(next));
        }

        handled
    }

    pub fn has_events(&self) -> bool {
        !self.queues[self.active_queue].is_empty()
    }

    /// Advances time, swaps buffers and delivers every due event from the
    /// previously active buffer. Returns the number delivered.
    ///
    /// Events whose effective time is still ahead of `new_timestep` move to
    /// the newly active buffer. Anything queued while delivering (chained
    /// successors) also lands there, so it waits for the next tick.
    pub fn tick(&mut self, new_timestep: u64) -> usize {
        if new_timestep < self.current_timestep {
            tracing::warn!(
                current = self.current_timestep,
                requested = new_timestep,
                "ignoring backwards timestep"
            );
        } else {
            self.current_timestep = new_timestep;
        }
        let now = self.current_timestep;

        let draining = self.active_queue;
        self.active_queue = (self.active_queue + 1) % QUEUE_COUNT;

        let mut due = Vec::new();
        while let Some(queued) = self.queues[draining].pop() {
            if queued.weight.effective_time <= now {
                due.push(queued);
            } else {
                self.queues[self.active_queue].push(queued);
            }
        }
        due.sort_by(QueuedEvent::delivery_order);

        let delivered = due.len();
        for queued in due {
            self.deliver(&queued.event);
        }

        tracing::debug!(
            timestep = now,
            delivered,
            pending = self.queues[self.active_queue].len(),
            "tick complete"
        );
        delivered
    }

    pub fn current_timestep(&self) -> u64 {
        self.current_timestep
    }

    fn prepare(&mut self, event: EventPtr) -> QueuedEvent {
        let mut weight = EventWeight::of(event.as_ref());
        if self.stamp_unset_timestamps && event.timestamp() == 0 {
            weight.effective_time = self.current_timestep.saturating_add(event.delay_ms());
        }
        let sequence = self.next_sequence;
        self.next_sequence += 1;
        QueuedEvent {
            event,
            weight,
            sequence,
        }
    }
}

#[cfg(test)]
#[path = "state_tests.rs"]
mod tests;

// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Event dispatcher for passing messages between loosely coupled modules
//!
//! Every operation is a unit of work submitted to the dispatcher's private
//! active object, so the registry and queues are only ever touched by one
//! thread and need no locks. Calls return immediately; queries hand back a
//! [`Pending`] that resolves once the worker reaches them. Work submitted
//! from one thread runs in submission order.
//!
//! Listener callbacks run on the worker. They may queue more events through
//! a [`DispatchSender`], but must not block on a [`Pending`] from the same
//! dispatcher: the worker would be waiting on itself.

mod listener;
mod queue;
mod state;

pub use listener::{Listener, ListenerCallback, ListenerType};

use crate::active::{ActiveHandle, ActiveObject, ActiveObjectBuilder};
use crate::config::DispatcherConfig;
use crate::error::DispatchError;
use crate::event::{EventPtr, EventType};
use crate::pending::Pending;
use state::DispatcherState;

/// Listener registry plus double-buffered queue of pending events
#[derive(Debug)]
pub struct EventDispatcher {
    active: ActiveObject<DispatcherState>,
}

impl EventDispatcher {
    /// Starts a dispatcher with default configuration
    pub fn new() -> Result<Self, DispatchError> {
        Self::with_config(&DispatcherConfig::default())
    }

    pub fn with_config(config: &DispatcherConfig) -> Result<Self, DispatchError> {
        config.validate()?;
        let active = ActiveObjectBuilder::default()
            .name(config.worker_name.clone())
            .spawn_with(DispatcherState::new(config))?;
        Ok(Self { active })
    }

    /// Starts a dispatcher whose clock begins at `current_time`
    pub fn starting_at(current_time: u64) -> Result<Self, DispatchError> {
        Self::with_config(&DispatcherConfig {
            initial_timestep: current_time,
            ..DispatcherConfig::default()
        })
    }

    /// Connects a listener to an event, registering the event if needed.
    /// Duplicate listener identities are kept; both fire.
    pub fn connect(
        &self,
        event_type: impl Into<EventType>,
        listener: Listener,
    ) -> Result<(), DispatchError> {
        let event_type = event_type.into();
        self.active
            .send(move |state| state.connect(event_type, listener))?;
        Ok(())
    }

    /// Removes the listener's registrations for one event; unknown pairs are ignored
    pub fn disconnect(
        &self,
        event_type: impl Into<EventType>,
        listener_type: impl Into<ListenerType>,
    ) -> Result<(), DispatchError> {
        let event_type = event_type.into();
        let listener_type = listener_type.into();
        self.active
            .send(move |state| state.disconnect(&event_type, &listener_type))?;
        Ok(())
    }

    /// Removes the listener from every event it is connected to
    pub fn disconnect_from_all(
        &self,
        listener_type: impl Into<ListenerType>,
    ) -> Result<(), DispatchError> {
        let listener_type = listener_type.into();
        self.active
            .send(move |state| state.disconnect_from_all(&listener_type))?;
        Ok(())
    }

    /// Snapshot of the listeners connected to an event, in registration order
    pub fn listeners(&self, event_type: impl Into<EventType>) -> Pending<Vec<Listener>> {
        let event_type = event_type.into();
        self.active.call(move |state| state.listeners(&event_type))
    }

    /// Snapshot of every event identity that has been registered
    pub fn registered_events(&self) -> Pending<Vec<EventType>> {
        self.active.call(|state| state.registered_events())
    }

    /// Queues an event for delivery on a later tick
    pub fn notify(&self, event: EventPtr) -> Result<(), DispatchError> {
        self.active.send(move |state| state.notify(event))?;
        Ok(())
    }

    /// Delivers an event to its listeners now, bypassing the queue.
    /// Resolves to whether a listener handled it.
    pub fn deliver(&self, event: EventPtr) -> Pending<bool> {
        self.active.call(move |state| state.deliver(&event))
    }

    /// Whether the active buffer holds any events
    pub fn has_events(&self) -> Pending<bool> {
        self.active.call(|state| state.has_events())
    }

    /// Advances to `new_timestep` and delivers every event that is due.
    /// Resolves to the number of events delivered.
    pub fn tick(&self, new_timestep: u64) -> Pending<usize> {
        self.active.call(move |state| state.tick(new_timestep))
    }

    /// The timestep given to the most recent tick
    pub fn current_timestep(&self) -> Pending<u64> {
        self.active.call(|state| state.current_timestep())
    }

    /// A cloneable handle for queueing events from other threads or from
    /// inside listener callbacks
    pub fn sender(&self) -> DispatchSender {
        DispatchSender {
            handle: self.active.handle(),
        }
    }
}

/// Cloneable, notify-only handle to an `EventDispatcher`
#[derive(Debug, Clone)]
pub struct DispatchSender {
    handle: ActiveHandle<DispatcherState>,
}

impl DispatchSender {
    /// Queues an event for delivery on a later tick
    pub fn notify(&self, event: EventPtr) -> Result<(), DispatchError> {
        let event_type = event.event_type().clone();
        self.handle
            .send(move |state| state.notify(event))
            .map_err(|e| {
                tracing::warn!(event = %event_type, error = %e, "dropping event for stopped dispatcher");
                DispatchError::from(e)
            })
    }
}

#[cfg(test)]
#[path = "dispatcher_tests.rs"]
mod tests;

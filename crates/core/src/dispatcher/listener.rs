// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Listener registrations

use crate::event::EventPtr;
use std::sync::Arc;
use switchboard_codec::HashedId;

/// Identity of a listener, used to disconnect it later
pub type ListenerType = HashedId;

/// Returns true if the listener handled the event, which stops delivery
/// to listeners registered after it
pub type ListenerCallback = Arc<dyn Fn(&EventPtr) -> bool + Send + Sync>;

/// A listener identity paired with its callback
#[derive(Clone)]
pub struct Listener {
    id: ListenerType,
    callback: ListenerCallback,
}

impl Listener {
    pub fn new<F>(id: impl Into<ListenerType>, callback: F) -> Self
    where
        F: Fn(&EventPtr) -> bool + Send + Sync + 'static,
    {
        Self {
            id: id.into(),
            callback: Arc::new(callback),
        }
    }

    pub fn id(&self) -> &ListenerType {
        &self.id
    }

    /// Offers the event to the callback
    pub fn handle(&self, event: &EventPtr) -> bool {
        (self.callback)(event)
    }
}

impl std::fmt::Debug for Listener {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Listener").field("id", &self.id).finish()
    }
}

// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Bookkeeping shared by every event kind

use super::{Event, EventCallback, EventPriority, EventSubject};
use std::sync::Mutex;

/// Subject, priority, timing, chain successor and completion callback
///
/// Timing fields are plain values: set them before the event is handed to
/// a dispatcher. The successor and callback sit behind locks because they
/// are taken (once) from a shared event during consumption.
#[derive(Default)]
pub struct EventBase {
    subject: EventSubject,
    priority: EventPriority,
    timestamp: u64,
    delay_ms: u64,
    next: Mutex<Option<Box<dyn Event>>>,
    callback: Mutex<Option<EventCallback>>,
}

impl EventBase {
    pub fn new(subject: EventSubject, delay_ms: u64) -> Self {
        Self {
            subject,
            delay_ms,
            ..Self::default()
        }
    }

    pub fn with_callback(mut self, callback: impl FnOnce() + Send + 'static) -> Self {
        self.set_callback(callback);
        self
    }

    pub fn with_priority(mut self, priority: EventPriority) -> Self {
        self.priority = priority;
        self
    }

    pub fn with_timestamp(mut self, timestamp: u64) -> Self {
        self.timestamp = timestamp;
        self
    }

    pub fn with_next(mut self, next: impl Event) -> Self {
        self.set_next(Box::new(next));
        self
    }

    pub fn subject(&self) -> EventSubject {
        self.subject
    }

    pub fn set_subject(&mut self, subject: EventSubject) {
        self.subject = subject;
    }

    pub fn priority(&self) -> EventPriority {
        self.priority
    }

    pub fn set_priority(&mut self, priority: EventPriority) {
        self.priority = priority;
    }

    pub fn timestamp(&self) -> u64 {
        self.timestamp
    }

    pub fn set_timestamp(&mut self, timestamp: u64) {
        self.timestamp = timestamp;
    }

    pub fn delay_ms(&self) -> u64 {
        self.delay_ms
    }

    pub fn set_delay_ms(&mut self, delay_ms: u64) {
        self.delay_ms = delay_ms;
    }

    /// Chains a successor; the event owns it until consumption detaches it
    pub fn set_next(&mut self, next: Box<dyn Event>) {
        *self.next.get_mut().unwrap_or_else(|e| e.into_inner()) = Some(next);
    }

    pub fn has_next(&self) -> bool {
        self.next.lock().unwrap_or_else(|e| e.into_inner()).is_some()
    }

    pub fn take_next(&self) -> Option<Box<dyn Event>> {
        self.next.lock().unwrap_or_else(|e| e.into_inner()).take()
    }

    pub fn set_callback(&mut self, callback: impl FnOnce() + Send + 'static) {
        *self.callback.get_mut().unwrap_or_else(|e| e.into_inner()) = Some(Box::new(callback));
    }

    pub fn has_callback(&self) -> bool {
        self.callback.lock().unwrap_or_else(|e| e.into_inner()).is_some()
    }

    /// Runs the completion callback if it has not run yet
    pub fn fire_callback(&self) -> bool {
        // Release the lock before running user code
        let callback = self.callback.lock().unwrap_or_else(|e| e.into_inner()).take();
        match callback {
            Some(callback) => {
                callback();
                true
            }
            None => false,
        }
    }
}

impl std::fmt::Debug for EventBase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventBase")
            .field("subject", &self.subject)
            .field("priority", &self.priority)
            .field("timestamp", &self.timestamp)
            .field("delay_ms", &self.delay_ms)
            .field("has_next", &self.has_next())
            .field("has_callback", &self.has_callback())
            .finish()
    }
}

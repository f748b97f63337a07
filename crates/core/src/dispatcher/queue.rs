// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Weighted queue of pending events

use crate::event::{EventPtr, EventWeight};
use std::cmp::Ordering;
use std::collections::BinaryHeap;

/// An event waiting in a dispatcher queue
///
/// The weight is captured at enqueue time so it can include a stamped
/// timestamp without mutating the shared event.
#[derive(Debug, Clone)]
pub(crate) struct QueuedEvent {
    pub event: EventPtr,
    pub weight: EventWeight,
    pub sequence: u64,
}

impl QueuedEvent {
    /// Chronological delivery order: earliest effective time first, then
    /// higher priority, then insertion order
    pub fn delivery_order(&self, other: &Self) -> Ordering {
        self.weight
            .effective_time
            .cmp(&other.weight.effective_time)
            .then_with(|| other.weight.priority.cmp(&self.weight.priority))
            .then_with(|| self.sequence.cmp(&other.sequence))
    }
}

impl PartialEq for QueuedEvent {
    fn eq(&self, other: &Self) -> bool {
        self.weight == other.weight && self.sequence == other.sequence
    }
}

impl Eq for QueuedEvent {}

impl PartialOrd for QueuedEvent {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for QueuedEvent {
    fn cmp(&self, other: &Self) -> Ordering {
        // Max-heap on weight; among equal weights the earlier insertion wins
        self.weight
            .cmp(&other.weight)
            .then_with(|| other.sequence.cmp(&self.sequence))
    }
}

/// Max-heap of queued events: `pop` yields the highest weight first
#[derive(Debug, Default)]
pub(crate) struct EventQueue {
    items: BinaryHeap<QueuedEvent>,
}

impl EventQueue {
    pub fn push(&mut self, queued: QueuedEvent) {
        self.items.push(queued);
    }

    pub fn pop(&mut self) -> Option<QueuedEvent> {
        self.items.pop()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

#[cfg(test)]
#[path = "queue_tests.rs"]
mod tests;

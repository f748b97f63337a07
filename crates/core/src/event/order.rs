// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Event weight: the ordering used by the dispatcher's queues

use super::{Event, EventPriority};
use std::cmp::Ordering;

/// Ordering key of an event
///
/// Compares effective time (timestamp + delay) first, then priority. A
/// max-heap of weights therefore pops the LATEST effective time first, and
/// among equal times the HIGHEST priority. Draining due events in
/// chronological order is the dispatcher's job, not the heap's.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct EventWeight {
    pub effective_time: u64,
    pub priority: EventPriority,
}

impl EventWeight {
    pub fn of(event: &dyn Event) -> Self {
        Self {
            effective_time: event.effective_time(),
            priority: event.priority(),
        }
    }
}

pub fn compare_event_weight(lhs: &dyn Event, rhs: &dyn Event) -> Ordering {
    EventWeight::of(lhs).cmp(&EventWeight::of(rhs))
}

/// True if `lhs` weighs less than `rhs`
pub fn event_weight_less_than(lhs: &dyn Event, rhs: &dyn Event) -> bool {
    compare_event_weight(lhs, rhs) == Ordering::Less
}

/// True if `lhs` weighs more than `rhs`
pub fn event_weight_greater_than(lhs: &dyn Event, rhs: &dyn Event) -> bool {
    compare_event_weight(lhs, rhs) == Ordering::Greater
}

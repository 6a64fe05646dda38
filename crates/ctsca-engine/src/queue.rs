//! # ctsca-engine::queue
//!
//! The event queue: a `BinaryHeap` used as a min-heap over scheduled time,
//! with deterministic tie-breaking. `BinaryHeap` is a max-heap, so `Queued`'s
//! `Ord` is reversed relative to its natural field order; ties at equal time
//! fall back to insertion order (Open Question (a)), never to an unspecified
//! rule.

use ctsca_types::{id::LinkId, id::LinkStateId, time::SimTime};
use std::cmp::Ordering;
use std::collections::BinaryHeap;

/// A scheduled transition for one link: fire at `queued_at` by rewriting the
/// link to `target_link_state`, if the event is still live at pop time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScheduledEvent {
    pub link: LinkId,
    pub target_link_state: LinkStateId,
}

/// A heap entry. `insert_seq` is a monotonic counter assigned at push time;
/// it is the sole tie-breaker when two events share a `time`, so ordering
/// among same-time events is a deterministic function of push order rather
/// than of heap internals.
#[derive(Debug, Clone, Copy)]
pub struct Queued<T> {
    pub time: SimTime,
    pub insert_seq: u64,
    pub payload: T,
}

impl<T> Queued<T> {
    pub fn new(time: SimTime, insert_seq: u64, payload: T) -> Self {
        Self {
            time,
            insert_seq,
            payload,
        }
    }
}

impl<T> PartialEq for Queued<T> {
    fn eq(&self, other: &Self) -> bool {
        self.time == other.time && self.insert_seq == other.insert_seq
    }
}
impl<T> Eq for Queued<T> {}

impl<T> PartialOrd for Queued<T> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Reversed so `BinaryHeap::pop` returns the *earliest* time first (ties by
/// earliest insertion).
impl<T> Ord for Queued<T> {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .time
            .partial_cmp(&self.time)
            .unwrap_or(Ordering::Equal)
            .then_with(|| other.insert_seq.cmp(&self.insert_seq))
    }
}

/// The priority queue of all scheduled link events (§4.3). No removal-by-id
/// operation exists; staleness is resolved on pop via the per-link
/// authoritative `next_update_time` the simulation engine keeps alongside it.
#[derive(Default)]
pub struct EventQueue {
    heap: BinaryHeap<Queued<ScheduledEvent>>,
    next_insert_seq: u64,
}

impl EventQueue {
    pub fn new() -> Self {
        Self {
            heap: BinaryHeap::new(),
            next_insert_seq: 0,
        }
    }

    pub fn push(&mut self, time: SimTime, event: ScheduledEvent) {
        let seq = self.next_insert_seq;
        self.next_insert_seq += 1;
        self.heap.push(Queued::new(time, seq, event));
    }

    pub fn pop_min(&mut self) -> Option<Queued<ScheduledEvent>> {
        self.heap.pop()
    }

    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    pub fn len(&self) -> usize {
        self.heap.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pops_in_time_order() {
        let mut q = EventQueue::new();
        q.push(5.0, ScheduledEvent { link: 0, target_link_state: 1 });
        q.push(1.0, ScheduledEvent { link: 1, target_link_state: 2 });
        q.push(3.0, ScheduledEvent { link: 2, target_link_state: 3 });

        assert_eq!(q.pop_min().unwrap().time, 1.0);
        assert_eq!(q.pop_min().unwrap().time, 3.0);
        assert_eq!(q.pop_min().unwrap().time, 5.0);
        assert!(q.pop_min().is_none());
    }

    #[test]
    fn ties_break_by_insertion_order() {
        let mut q = EventQueue::new();
        q.push(1.0, ScheduledEvent { link: 10, target_link_state: 0 });
        q.push(1.0, ScheduledEvent { link: 20, target_link_state: 0 });

        assert_eq!(q.pop_min().unwrap().payload.link, 10);
        assert_eq!(q.pop_min().unwrap().payload.link, 20);
    }
}

//! Indexed min-heap of putative firing times.
//!
//! [`EventQueue`] holds at most one event per process. Alongside the heap
//! it keeps a slot table from [`ProcId`] to heap position, so an existing
//! entry can be found and moved in O(log n) when its process is
//! rescheduled. `std::collections::BinaryHeap` cannot do that without a
//! linear search.

use propensity_core::{AdvanceError, ConstructionError, ProcId, Time};

use crate::event::Event;

/// Time-ordered priority queue of [`Event`]s keyed by process.
///
/// # Invariants
///
/// - `slots[p] == Some(i)` iff `heap[i].proc == p`.
/// - Every parent event orders at or before its children.
///
/// While a Next-Reaction algorithm is running, every process has exactly
/// one live entry between steps: it pops one and reschedules it before
/// the next pop.
#[derive(Clone, Debug)]
pub struct EventQueue {
    heap: Vec<Event>,
    slots: Vec<Option<usize>>,
    last_popped: Time,
}

impl EventQueue {
    /// An empty queue for a system of `process_count` processes.
    pub fn with_capacity(process_count: usize) -> Self {
        Self {
            heap: Vec::with_capacity(process_count),
            slots: vec![None; process_count],
            last_popped: Time::ZERO,
        }
    }

    /// Build a queue holding exactly one event per process.
    ///
    /// Heapifies in O(n).
    ///
    /// # Errors
    ///
    /// Returns [`ConstructionError`] if the number of events differs from
    /// `process_count`, an event names an unknown process, or two events
    /// name the same process.
    pub fn from_events(events: Vec<Event>, process_count: usize) -> Result<Self, ConstructionError> {
        if events.len() != process_count {
            return Err(ConstructionError::EventCountMismatch {
                expected: process_count,
                actual: events.len(),
            });
        }
        let mut slots = vec![None; process_count];
        for (i, event) in events.iter().enumerate() {
            match slots.get_mut(event.proc.index()) {
                None => {
                    return Err(ConstructionError::UnknownProcess {
                        proc: event.proc,
                        count: process_count,
                    })
                }
                Some(Some(_)) => return Err(ConstructionError::DuplicateEvent { proc: event.proc }),
                Some(slot) => *slot = Some(i),
            }
        }

        let mut queue = Self {
            heap: events,
            slots,
            last_popped: Time::ZERO,
        };
        for i in (0..queue.heap.len() / 2).rev() {
            queue.sift_down(i);
        }
        Ok(queue)
    }

    /// Number of live events.
    pub fn len(&self) -> usize {
        self.heap.len()
    }

    /// Whether there are no live events.
    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    /// Number of processes this queue can track.
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// The earliest event, without removing it.
    pub fn peek_min(&self) -> Option<&Event> {
        self.heap.first()
    }

    /// Remove and return the earliest event.
    ///
    /// The popped process has no live entry until it is rescheduled.
    pub fn pop_min(&mut self) -> Option<Event> {
        let event = self.remove_at(0)?;
        self.last_popped = event.time;
        Some(event)
    }

    /// Time of the most recently popped event ([`Time::ZERO`] before the
    /// first pop).
    pub fn last_popped(&self) -> Time {
        self.last_popped
    }

    /// Whether `proc` has a live entry.
    pub fn contains(&self, proc: ProcId) -> bool {
        matches!(self.slots.get(proc.index()), Some(Some(_)))
    }

    /// Scheduled time of `proc`'s live entry, if any.
    pub fn time_of(&self, proc: ProcId) -> Option<Time> {
        let pos = (*self.slots.get(proc.index())?)?;
        Some(self.heap[pos].time)
    }

    /// Replace `event.proc`'s live entry with `event`, or insert it if the
    /// process has none. O(log n).
    ///
    /// # Errors
    ///
    /// Returns [`AdvanceError::UnknownProcess`] if the process is outside
    /// the queue's capacity.
    pub fn reschedule(&mut self, event: Event) -> Result<(), AdvanceError> {
        let count = self.slots.len();
        let slot = self
            .slots
            .get(event.proc.index())
            .copied()
            .ok_or(AdvanceError::UnknownProcess {
                proc: event.proc,
                count,
            })?;
        match slot {
            Some(pos) => {
                let old = self.heap[pos];
                self.heap[pos] = event;
                if event < old {
                    self.sift_up(pos);
                } else {
                    self.sift_down(pos);
                }
            }
            None => {
                let pos = self.heap.len();
                self.heap.push(event);
                self.slots[event.proc.index()] = Some(pos);
                self.sift_up(pos);
            }
        }
        Ok(())
    }

    /// Remove `proc`'s live entry, returning it if there was one.
    pub fn remove(&mut self, proc: ProcId) -> Option<Event> {
        let pos = (*self.slots.get(proc.index())?)?;
        self.remove_at(pos)
    }

    /// Live events in heap order (not sorted).
    pub fn iter(&self) -> impl Iterator<Item = &Event> {
        self.heap.iter()
    }

    fn remove_at(&mut self, pos: usize) -> Option<Event> {
        let last = self.heap.len().checked_sub(1)?;
        self.swap(pos, last);
        let event = self.heap.pop()?;
        self.slots[event.proc.index()] = None;
        if pos < self.heap.len() {
            // The moved element may belong above or below `pos`.
            self.sift_up(pos);
            self.sift_down(pos);
        }
        Some(event)
    }

    fn swap(&mut self, a: usize, b: usize) {
        self.heap.swap(a, b);
        self.slots[self.heap[a].proc.index()] = Some(a);
        self.slots[self.heap[b].proc.index()] = Some(b);
    }

    fn sift_up(&mut self, mut pos: usize) {
        while pos > 0 {
            let parent = (pos - 1) / 2;
            if self.heap[pos] >= self.heap[parent] {
                break;
            }
            self.swap(pos, parent);
            pos = parent;
        }
    }

    fn sift_down(&mut self, mut pos: usize) {
        let len = self.heap.len();
        loop {
            let left = 2 * pos + 1;
            let right = left + 1;
            let mut smallest = pos;
            if left < len && self.heap[left] < self.heap[smallest] {
                smallest = left;
            }
            if right < len && self.heap[right] < self.heap[smallest] {
                smallest = right;
            }
            if smallest == pos {
                break;
            }
            self.swap(pos, smallest);
            pos = smallest;
        }
    }
}

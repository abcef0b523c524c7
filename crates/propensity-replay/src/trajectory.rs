//! Recorded event sequences.

use propensity_core::Time;
use propensity_select::Event;

use crate::hash::trajectory_hash;

/// The events of one run, in firing order, tagged with the seed and
/// algorithm that produced them.
#[derive(Clone, Debug, PartialEq)]
pub struct Trajectory {
    seed: u64,
    algorithm: String,
    events: Vec<Event>,
}

impl Trajectory {
    /// An empty recording.
    pub fn new(seed: u64, algorithm: impl Into<String>) -> Self {
        Self {
            seed,
            algorithm: algorithm.into(),
            events: Vec::new(),
        }
    }

    /// Append one event.
    ///
    /// Shaped for use as an observer:
    /// `sim.run_with(|event, _| trajectory.record(event))`.
    pub fn record(&mut self, event: &Event) {
        self.events.push(*event);
    }

    /// Seed of the recorded run.
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Algorithm tag of the recorded run.
    pub fn algorithm(&self) -> &str {
        &self.algorithm
    }

    /// Recorded events in firing order.
    pub fn events(&self) -> &[Event] {
        &self.events
    }

    /// Number of recorded events.
    pub fn len(&self) -> usize {
        self.events.len()
    }

    /// Whether nothing was recorded.
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Time of the last recorded event, if any.
    pub fn final_time(&self) -> Option<Time> {
        self.events.last().map(|e| e.time)
    }

    /// FNV-1a hash of the event sequence. Ignores the seed and tag.
    pub fn hash(&self) -> u64 {
        trajectory_hash(&self.events)
    }
}

impl Extend<Event> for Trajectory {
    fn extend<I: IntoIterator<Item = Event>>(&mut self, iter: I) {
        self.events.extend(iter);
    }
}

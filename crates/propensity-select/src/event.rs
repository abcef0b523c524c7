//! The [`Event`] record.

use std::cmp::Ordering;
use std::fmt;

use propensity_core::{AdvanceError, ProcId, Rate, Time};
use rand::Rng;

/// A process paired with the absolute time at which it fires.
///
/// Ordered by time, then by process id. The id tie-break carries no
/// domain meaning; it only keeps heap order reproducible.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Event {
    /// The process that fires.
    pub proc: ProcId,
    /// Absolute firing time.
    pub time: Time,
}

impl Event {
    /// Pair a process with a firing time.
    pub fn new(proc: ProcId, time: Time) -> Self {
        Self { proc, time }
    }

    /// An event that never fires, for a process whose rate is zero.
    pub fn never(proc: ProcId) -> Self {
        Self {
            proc,
            time: Time::NEVER,
        }
    }

    /// Sample the next firing of `proc` after `now`.
    ///
    /// Draws one exponential interval from `rate` and adds it to `now`.
    /// Has no effect on the process itself.
    ///
    /// # Errors
    ///
    /// Returns [`AdvanceError::Degenerate`] if `rate` is zero.
    pub fn next<R: Rng + ?Sized>(
        proc: ProcId,
        rate: Rate,
        now: Time,
        rng: &mut R,
    ) -> Result<Self, AdvanceError> {
        let interval = rate.sample_interval(rng)?;
        Ok(Self::new(proc, now + interval))
    }

    /// Like [`Event::next`], but a zero rate yields [`Event::never`]
    /// instead of an error.
    pub fn scheduled<R: Rng + ?Sized>(
        proc: ProcId,
        rate: Rate,
        now: Time,
        rng: &mut R,
    ) -> Result<Self, AdvanceError> {
        if rate.is_zero() {
            return Ok(Self::never(proc));
        }
        Self::next(proc, rate, now, rng)
    }
}

impl PartialOrd for Event {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Event {
    fn cmp(&self, other: &Self) -> Ordering {
        self.time
            .cmp(&other.time)
            .then_with(|| self.proc.cmp(&other.proc))
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "process {} at {}", self.proc, self.time)
    }
}

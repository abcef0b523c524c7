//! The [`Process`] and [`System`] capabilities supplied by domain models.
//!
//! The engine never knows what a process *is*. It only asks for the
//! current rate, invokes the fire hook once per selection, and reads or
//! stamps the time of the last event.

use crate::error::ConstructionError;
use crate::id::ProcId;
use crate::rate::{Rate, Time};

/// Anything with a current propensity and a fire effect.
///
/// # Contract
///
/// - `rate()` reflects the process's *current* state; it may change after
///   this process or another process in the same system fires.
/// - `fire()` is invoked exactly once per selection and may change this
///   process's future rate.
pub trait Process {
    /// The current rate of this process.
    fn rate(&self) -> Rate;

    /// Apply the domain-specific effect of this process firing at `time`.
    fn fire(&mut self, time: Time);
}

/// A fixed-size, order-stable collection of processes plus the clock.
///
/// Constructed once by the domain model, owned exclusively by whatever is
/// advancing it, and never resized during a run. Process identity is the
/// array position: `process(ProcId(n))` is the n-th process.
///
/// Implementations with inter-process coupling (one firing changes other
/// processes' rates) override [`fire`](System::fire) to apply the side
/// effects and report the coupled processes through
/// [`dependents`](System::dependents).
pub trait System {
    /// The concrete process type.
    type Proc: Process;

    /// Number of processes. Constant for the lifetime of the system.
    fn process_count(&self) -> usize;

    /// Shared access to a process.
    ///
    /// # Panics
    ///
    /// May panic if `id` is out of range.
    fn process(&self, id: ProcId) -> &Self::Proc;

    /// Mutable access to a process.
    ///
    /// # Panics
    ///
    /// May panic if `id` is out of range.
    fn process_mut(&mut self, id: ProcId) -> &mut Self::Proc;

    /// The time at which the most recent event fired ([`Time::ZERO`]
    /// before the first event).
    fn last_event_time(&self) -> Time;

    /// Stamp the time of the most recent event.
    fn set_last_event_time(&mut self, time: Time);

    /// Current rate of one process.
    fn rate(&self, id: ProcId) -> Rate {
        self.process(id).rate()
    }

    /// Sum of every process's current rate, recomputed from scratch.
    fn total_rate(&self) -> Rate {
        ProcId::range(self.process_count())
            .map(|id| self.rate(id))
            .sum()
    }

    /// Fire process `id` at `time` and advance the clock to `time`.
    fn fire(&mut self, id: ProcId, time: Time) {
        self.process_mut(id).fire(time);
        self.set_last_event_time(time);
    }

    /// Processes other than `id` whose rates may change when `id` fires.
    ///
    /// Defaults to none: independent processes.
    fn dependents(&self, _id: ProcId) -> &[ProcId] {
        &[]
    }
}

/// Check that a system can be scheduled.
///
/// # Errors
///
/// Returns [`ConstructionError::EmptySystem`] if there are no processes,
/// or [`ConstructionError::TooManyProcesses`] if the count does not fit
/// the [`ProcId`] index space. Individual rates need no check here: a
/// [`Rate`] cannot hold an invalid value.
pub fn validate_system<S: System + ?Sized>(system: &S) -> Result<(), ConstructionError> {
    let count = system.process_count();
    if count == 0 {
        return Err(ConstructionError::EmptySystem);
    }
    if u32::try_from(count).is_err() {
        return Err(ConstructionError::TooManyProcesses { count });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Counter {
        rate: Rate,
        fired: u32,
    }

    impl Process for Counter {
        fn rate(&self) -> Rate {
            self.rate
        }

        fn fire(&mut self, _time: Time) {
            self.fired += 1;
        }
    }

    struct Pair {
        procs: Vec<Counter>,
        last: Time,
    }

    impl System for Pair {
        type Proc = Counter;

        fn process_count(&self) -> usize {
            self.procs.len()
        }

        fn process(&self, id: ProcId) -> &Counter {
            &self.procs[id.index()]
        }

        fn process_mut(&mut self, id: ProcId) -> &mut Counter {
            &mut self.procs[id.index()]
        }

        fn last_event_time(&self) -> Time {
            self.last
        }

        fn set_last_event_time(&mut self, time: Time) {
            self.last = time;
        }
    }

    fn pair(rates: &[f64]) -> Pair {
        Pair {
            procs: rates
                .iter()
                .map(|&r| Counter {
                    rate: Rate::new(r).unwrap(),
                    fired: 0,
                })
                .collect(),
            last: Time::ZERO,
        }
    }

    #[test]
    fn default_fire_stamps_clock() {
        let mut sys = pair(&[1.0, 2.0]);
        let t = Time::new(0.25).unwrap();
        sys.fire(ProcId(1), t);
        assert_eq!(sys.procs[1].fired, 1);
        assert_eq!(sys.procs[0].fired, 0);
        assert_eq!(sys.last_event_time(), t);
    }

    #[test]
    fn total_rate_recomputes() {
        let mut sys = pair(&[1.0, 2.0, 0.5]);
        assert_eq!(sys.total_rate().value(), 3.5);
        sys.procs[2].rate = Rate::ZERO;
        assert_eq!(sys.total_rate().value(), 3.0);
    }

    #[test]
    fn independent_by_default() {
        let sys = pair(&[1.0]);
        assert!(sys.dependents(ProcId(0)).is_empty());
    }

    #[test]
    fn empty_system_rejected() {
        assert_eq!(validate_system(&pair(&[])), Err(ConstructionError::EmptySystem));
        assert_eq!(validate_system(&pair(&[0.0])), Ok(()));
    }
}

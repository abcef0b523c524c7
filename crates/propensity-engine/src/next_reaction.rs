//! Gibson–Bruck Next Reaction method.
//!
//! Every process holds one putative absolute firing time in an
//! [`EventQueue`]. A step pops the earliest, fires it, draws a fresh
//! time for that process, and updates only the processes the system
//! lists as its dependents. Cost is O(log n) per step plus the
//! dependents, instead of the Direct method's O(n).
//!
//! A process with rate zero is parked at [`Time::NEVER`]. When it comes
//! back to life its time is sampled afresh.

use propensity_core::{
    validate_system, AdvanceError, ConstructionError, ProcId, Rate, System, Time,
};
use propensity_select::{Event, EventQueue};
use rand::Rng;
use tracing::{debug, error, trace};

use crate::algo::{AlgorithmKind, SimRng, StochAlgo};

/// How a dependent's scheduled time is updated when its rate changes.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ReschedulePolicy {
    /// Keep the remaining wait, scaled by `old_rate / new_rate`. Uses no
    /// randomness. Exact for memoryless processes.
    #[default]
    Rescale,
    /// Discard the old time and draw a fresh interval from the new rate.
    /// Also exact for memoryless processes; costs one draw per update.
    Resample,
}

/// New absolute firing time for a process whose rate moved from
/// `old_rate` to `new_rate` at time `now`, given its previously scheduled
/// `old_time`.
///
/// A new rate of zero parks the process at [`Time::NEVER`]. A process
/// revived from zero (or never scheduled) is always sampled afresh.
///
/// # Errors
///
/// Returns [`AdvanceError::InvalidValue`] if the new time is not finite.
pub fn rescheduled_time<R: Rng + ?Sized>(
    policy: ReschedulePolicy,
    old_rate: Rate,
    new_rate: Rate,
    old_time: Time,
    now: Time,
    rng: &mut R,
) -> Result<Time, AdvanceError> {
    if new_rate.is_zero() {
        return Ok(Time::NEVER);
    }
    let revived = old_rate.is_zero() || old_time.is_never();
    match policy {
        ReschedulePolicy::Rescale if !revived => {
            let remaining = old_time.since(now).value();
            let scaled = Time::new(remaining * (old_rate.value() / new_rate.value()))?;
            Ok(now + scaled)
        }
        _ => Ok(now + new_rate.sample_interval(rng)?),
    }
}

/// Next-Reaction SSA over a system `S` and random source `R`.
///
/// Keeps the rate each process was last scheduled with, so that a
/// dependent whose rate did not actually change is left alone.
#[derive(Debug)]
pub struct NextReactionAlgo<S, R = SimRng> {
    system: S,
    rng: R,
    queue: EventQueue,
    rates: Vec<Rate>,
    policy: ReschedulePolicy,
}

impl<S: System, R: Rng> NextReactionAlgo<S, R> {
    /// Next Reaction method with [`ReschedulePolicy::Rescale`].
    ///
    /// # Errors
    ///
    /// See [`with_policy`](Self::with_policy).
    pub fn new(system: S, rng: R) -> Result<Self, ConstructionError> {
        Self::with_policy(system, rng, ReschedulePolicy::default())
    }

    /// Next Reaction method with an explicit reschedule policy.
    ///
    /// Samples one initial firing time per process, in id order, from the
    /// system's start time.
    ///
    /// # Errors
    ///
    /// Returns [`ConstructionError`] if the system cannot be scheduled or
    /// an initial time is not finite.
    pub fn with_policy(
        system: S,
        mut rng: R,
        policy: ReschedulePolicy,
    ) -> Result<Self, ConstructionError> {
        validate_system(&system)?;
        let count = system.process_count();
        let start = system.last_event_time();
        let rates: Vec<Rate> = ProcId::range(count).map(|id| system.rate(id)).collect();
        let events = ProcId::range(count)
            .zip(&rates)
            .map(|(id, &rate)| Event::scheduled(id, rate, start, &mut rng))
            .collect::<Result<Vec<_>, _>>()?;
        let queue = EventQueue::from_events(events, count)?;
        debug!(processes = count, ?policy, "next reaction method ready");
        Ok(Self {
            system,
            rng,
            queue,
            rates,
            policy,
        })
    }

    /// The reschedule policy.
    pub fn policy(&self) -> ReschedulePolicy {
        self.policy
    }

    /// The event queue, for inspection.
    pub fn queue(&self) -> &EventQueue {
        &self.queue
    }

    /// Rate `id` was last scheduled with.
    pub fn scheduled_rate(&self, id: ProcId) -> Option<Rate> {
        self.rates.get(id.index()).copied()
    }

    fn refresh_dependents(&mut self, fired: ProcId, now: Time) -> Result<(), AdvanceError> {
        let count = self.rates.len();
        for &dep in self.system.dependents(fired) {
            if dep == fired {
                continue;
            }
            let old_rate = *self
                .rates
                .get(dep.index())
                .ok_or(AdvanceError::UnknownProcess { proc: dep, count })?;
            let new_rate = self.system.rate(dep);
            if new_rate == old_rate {
                continue;
            }
            let old_time = self.queue.time_of(dep).unwrap_or(Time::NEVER);
            let time = rescheduled_time(
                self.policy,
                old_rate,
                new_rate,
                old_time,
                now,
                &mut self.rng,
            )?;
            self.rates[dep.index()] = new_rate;
            self.queue.reschedule(Event::new(dep, time))?;
        }
        Ok(())
    }
}

impl<S: System, R: Rng> StochAlgo<S> for NextReactionAlgo<S, R> {
    fn kind(&self) -> AlgorithmKind {
        AlgorithmKind::NextReaction
    }

    fn advance(&mut self) -> Result<Event, AdvanceError> {
        let clock = self.system.last_event_time();
        let next = match self.queue.peek_min() {
            Some(event) if !event.time.is_never() => *event,
            _ => return Err(AdvanceError::Degenerate),
        };
        if next.time < clock {
            error!(proc = %next.proc, popped = %next.time, %clock, "event queue out of order");
            return Err(AdvanceError::QueueInvariant {
                proc: next.proc,
                popped: next.time,
                clock,
            });
        }
        self.queue.pop_min();

        let now = next.time;
        self.system.fire(next.proc, now);

        let rate = self.system.rate(next.proc);
        self.rates[next.proc.index()] = rate;
        self.queue
            .reschedule(Event::scheduled(next.proc, rate, now, &mut self.rng)?)?;

        self.refresh_dependents(next.proc, now)?;
        trace!(proc = %next.proc, time = %now, "fired");
        Ok(next)
    }

    fn system(&self) -> &S {
        &self.system
    }

    fn into_system(self: Box<Self>) -> S {
        self.system
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use propensity_test_utils::{frequencies, ChainSystem, ConstRateSystem};
    use rand::SeedableRng;
    use tracing_test::traced_test;

    fn t(v: f64) -> Time {
        Time::new(v).unwrap()
    }

    fn r(v: f64) -> Rate {
        Rate::new(v).unwrap()
    }

    fn rng(seed: u64) -> SimRng {
        SimRng::seed_from_u64(seed)
    }

    #[test]
    fn rescale_keeps_scaled_remaining_wait() {
        let mut rng = rng(0);
        let time = rescheduled_time(
            ReschedulePolicy::Rescale,
            r(2.0),
            r(4.0),
            t(3.0),
            t(1.0),
            &mut rng,
        )
        .unwrap();
        assert_eq!(time, t(2.0));
    }

    #[test]
    fn zero_new_rate_parks_at_never() {
        let mut rng = rng(0);
        for policy in [ReschedulePolicy::Rescale, ReschedulePolicy::Resample] {
            let time = rescheduled_time(policy, r(2.0), Rate::ZERO, t(3.0), t(1.0), &mut rng);
            assert_eq!(time, Ok(Time::NEVER));
        }
    }

    #[test]
    fn revived_process_is_resampled() {
        let mut rng = rng(0);
        let from_zero = rescheduled_time(
            ReschedulePolicy::Rescale,
            Rate::ZERO,
            r(1.0),
            Time::NEVER,
            t(5.0),
            &mut rng,
        )
        .unwrap();
        assert!(from_zero > t(5.0) && !from_zero.is_never());

        let unscheduled = rescheduled_time(
            ReschedulePolicy::Rescale,
            r(1.0),
            r(2.0),
            Time::NEVER,
            t(5.0),
            &mut rng,
        )
        .unwrap();
        assert!(unscheduled > t(5.0) && !unscheduled.is_never());
    }

    #[test]
    fn resample_ignores_old_time() {
        let mut a = rng(9);
        let mut b = rng(9);
        let resampled =
            rescheduled_time(ReschedulePolicy::Resample, r(2.0), r(4.0), t(3.0), t(1.0), &mut a)
                .unwrap();
        assert_eq!(resampled, t(1.0) + r(4.0).sample_interval(&mut b).unwrap());
    }

    #[test]
    fn firing_frequencies_match_rates() {
        let sys = ConstRateSystem::new(&[1000.0, 2000.0, 3000.0, 4000.0]);
        let mut algo = NextReactionAlgo::new(sys, rng(20210501)).unwrap();
        let mut prev = Time::ZERO;
        for _ in 0..1_000_000 {
            let event = algo.advance().unwrap();
            assert!(event.time >= prev);
            prev = event.time;
        }
        let freq = frequencies(&algo.system().fire_counts());
        for (f, expected) in freq.iter().zip([0.1, 0.2, 0.3, 0.4]) {
            assert!((f - expected).abs() < 0.0025, "{f} vs {expected}");
        }
        let mean = algo.clock().value() / 1e6;
        assert!((mean - 1e-4).abs() < 1.5e-6, "mean interval {mean}");
    }

    #[test]
    fn every_process_stays_scheduled() {
        let sys = ChainSystem::new(&[1.0, 2.0, 3.0], 50);
        let mut algo = NextReactionAlgo::new(sys, rng(4)).unwrap();
        assert_eq!(algo.queue().time_of(ProcId(1)), Some(Time::NEVER));
        for _ in 0..40 {
            let event = algo.advance().unwrap();
            assert_eq!(algo.queue().len(), 3);
            assert_eq!(algo.queue().last_popped(), event.time);
            for id in ProcId::range(3) {
                let rate = algo.system().rate(id);
                assert_eq!(algo.scheduled_rate(id), Some(rate));
                let time = algo.queue().time_of(id).unwrap();
                assert_eq!(time.is_never(), rate.is_zero());
                assert!(time >= algo.clock());
            }
        }
    }

    #[test]
    fn runs_to_exhaustion() {
        for policy in [ReschedulePolicy::Rescale, ReschedulePolicy::Resample] {
            let sys = ChainSystem::new(&[1.0, 2.0], 20);
            let mut algo = NextReactionAlgo::with_policy(sys, rng(6), policy).unwrap();
            assert_eq!(algo.policy(), policy);
            for _ in 0..40 {
                algo.advance().unwrap();
            }
            assert_eq!(algo.advance(), Err(AdvanceError::Degenerate));
            assert_eq!(algo.system().product(), 20);
        }
    }

    #[test]
    fn all_zero_is_degenerate() {
        let sys = ConstRateSystem::new(&[0.0, 0.0, 0.0]);
        let mut algo = NextReactionAlgo::new(sys, rng(1)).unwrap();
        assert!(algo.queue().iter().all(|e| e.time.is_never()));
        assert_eq!(algo.advance(), Err(AdvanceError::Degenerate));
        assert_eq!(algo.clock(), Time::ZERO);
    }

    #[traced_test]
    #[test]
    fn stale_event_reports_queue_invariant() {
        let sys = ConstRateSystem::new(&[1.0, 1.0]);
        let mut algo = NextReactionAlgo::new(sys, rng(2)).unwrap();
        for _ in 0..5 {
            algo.advance().unwrap();
        }
        let clock = algo.clock();
        algo.queue
            .reschedule(Event::new(ProcId(1), Time::ZERO))
            .unwrap();
        assert_eq!(
            algo.advance(),
            Err(AdvanceError::QueueInvariant {
                proc: ProcId(1),
                popped: Time::ZERO,
                clock,
            })
        );
        assert_eq!(algo.clock(), clock);
        assert!(logs_contain("event queue out of order"));
    }

    #[test]
    fn empty_system_rejected() {
        let err = NextReactionAlgo::new(ConstRateSystem::new(&[]), rng(0)).unwrap_err();
        assert_eq!(err, ConstructionError::EmptySystem);
    }
}

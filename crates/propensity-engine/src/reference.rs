//! Unoptimized Direct method used as a correctness oracle.
//!
//! Deliberately plain: raw `f64` rates copied into a fresh vector every
//! step, no selector, no caching. It consumes randomness in the same
//! order and with the same arithmetic as
//! [`DirectAlgo`](crate::DirectAlgo) with a default
//! [`PriorityList`](propensity_select::PriorityList), so for one seed the
//! two produce identical trajectories.

use propensity_core::{validate_system, AdvanceError, ConstructionError, ProcId, System, Time};
use propensity_select::Event;
use rand::Rng;
use tracing::debug;

use crate::algo::{AlgorithmKind, SimRng, StochAlgo};

/// Textbook Gillespie Direct method.
#[derive(Debug)]
pub struct ReferenceAlgo<S, R = SimRng> {
    system: S,
    rng: R,
}

impl<S: System, R: Rng> ReferenceAlgo<S, R> {
    /// Wrap a system.
    ///
    /// # Errors
    ///
    /// Returns [`ConstructionError`] if the system cannot be scheduled.
    pub fn new(system: S, rng: R) -> Result<Self, ConstructionError> {
        validate_system(&system)?;
        debug!(processes = system.process_count(), "reference method ready");
        Ok(Self { system, rng })
    }
}

impl<S: System, R: Rng> StochAlgo<S> for ReferenceAlgo<S, R> {
    fn kind(&self) -> AlgorithmKind {
        AlgorithmKind::Reference
    }

    fn advance(&mut self) -> Result<Event, AdvanceError> {
        let rates: Vec<(ProcId, f64)> = ProcId::range(self.system.process_count())
            .map(|id| (id, self.system.rate(id).value()))
            .collect();
        let total: f64 = rates.iter().fold(0.0, |acc, &(_, r)| acc + r);
        if total == 0.0 {
            return Err(AdvanceError::Degenerate);
        }

        let u1: f64 = self.rng.random();
        let dt = -(1.0 - u1).ln() / total;
        let u2: f64 = self.rng.random::<f64>() * total;

        let mut cumulative = 0.0;
        let mut chosen = None;
        for &(id, rate) in &rates {
            if rate == 0.0 {
                continue;
            }
            cumulative += rate;
            chosen = Some(id);
            if cumulative > u2 {
                break;
            }
        }
        let proc = chosen.ok_or(AdvanceError::Degenerate)?;

        let time = Time::new(self.system.last_event_time().value() + dt)?;
        self.system.fire(proc, time);
        Ok(Event::new(proc, time))
    }

    fn system(&self) -> &S {
        &self.system
    }

    fn into_system(self: Box<Self>) -> S {
        self.system
    }
}

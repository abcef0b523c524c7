//! Gillespie's Direct method.
//!
//! Every step recomputes the total rate from scratch, draws the waiting
//! time from it, then hands the same total to a [`Selector`] to pick the
//! process. Cost is O(n) per step in the number of processes; the
//! selector only changes the constant.

use propensity_core::{validate_system, AdvanceError, ConstructionError, Rate, System};
use propensity_select::{Event, PriorityList, ProcStack, ReorderPolicy, Selector};
use rand::Rng;
use tracing::{debug, trace};

use crate::algo::{AlgorithmKind, SimRng, StochAlgo};

/// Direct-method SSA over a system `S`, random source `R`, and selection
/// structure `L`.
///
/// Each step consumes exactly two `f64` draws from `R`: the waiting time
/// first, then the selection.
#[derive(Debug)]
pub struct DirectAlgo<S, R = SimRng, L = PriorityList> {
    system: S,
    rng: R,
    selector: L,
    last_total: Rate,
}

impl<S: System, R: Rng> DirectAlgo<S, R, PriorityList> {
    /// Direct method with a fixed insertion-order scan.
    ///
    /// # Errors
    ///
    /// Returns [`ConstructionError`] if the system cannot be scheduled.
    pub fn new(system: S, rng: R) -> Result<Self, ConstructionError> {
        let selector = PriorityList::new(system.process_count());
        Self::with_selector(system, rng, selector)
    }
}

impl<S: System, R: Rng> DirectAlgo<S, R, ProcStack> {
    /// Direct method with a self-organizing scan.
    ///
    /// # Errors
    ///
    /// Returns [`ConstructionError`] if the system cannot be scheduled.
    pub fn with_proc_stack(
        system: S,
        rng: R,
        policy: ReorderPolicy,
    ) -> Result<Self, ConstructionError> {
        let selector = ProcStack::new(system.process_count(), policy);
        Self::with_selector(system, rng, selector)
    }
}

impl<S: System, R: Rng, L: Selector> DirectAlgo<S, R, L> {
    /// Direct method with a caller-supplied selector.
    ///
    /// # Errors
    ///
    /// Returns [`ConstructionError::EmptySystem`] or
    /// [`ConstructionError::TooManyProcesses`] for an unschedulable
    /// system, and [`ConstructionError::InvalidOrder`] if the selector
    /// does not cover exactly the system's processes.
    pub fn with_selector(system: S, rng: R, selector: L) -> Result<Self, ConstructionError> {
        validate_system(&system)?;
        let count = system.process_count();
        if selector.process_count() != count {
            return Err(ConstructionError::InvalidOrder { count });
        }
        debug!(processes = count, "direct method ready");
        Ok(Self {
            system,
            rng,
            selector,
            last_total: Rate::ZERO,
        })
    }

    /// The selection structure, for diagnostics such as
    /// [`ProcStack::efficiency_gain`].
    pub fn selector(&self) -> &L {
        &self.selector
    }

    /// Total rate computed by the most recent step (zero before the
    /// first).
    pub fn last_total_rate(&self) -> Rate {
        self.last_total
    }
}

impl<S: System, R: Rng, L: Selector> StochAlgo<S> for DirectAlgo<S, R, L> {
    fn kind(&self) -> AlgorithmKind {
        AlgorithmKind::Direct
    }

    fn advance(&mut self) -> Result<Event, AdvanceError> {
        let total = self.system.total_rate();
        self.last_total = total;
        let interval = total.sample_interval(&mut self.rng)?;
        let proc = self.selector.select(&self.system, &mut self.rng, total)?;
        let time = self.system.last_event_time() + interval;
        self.system.fire(proc, time);
        trace!(%proc, %time, %total, "fired");
        Ok(Event::new(proc, time))
    }

    fn system(&self) -> &S {
        &self.system
    }

    fn into_system(self: Box<Self>) -> S {
        self.system
    }
}

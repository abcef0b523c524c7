//! The [`StochAlgo`] trait and algorithm construction from config.

use std::fmt;

use propensity_core::{AdvanceError, ConstructionError, System, Time};
use propensity_select::{Event, ProcStack};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use crate::config::{SelectionKind, SimConfig};
use crate::direct::DirectAlgo;
use crate::next_reaction::NextReactionAlgo;
use crate::reference::ReferenceAlgo;

/// Default random source: a seedable, portable ChaCha stream.
///
/// The same seed yields the same trajectory on every platform.
pub type SimRng = ChaCha8Rng;

/// Which SSA implementation drives a simulation.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum AlgorithmKind {
    /// Gillespie Direct method with a linear-scan selector.
    #[default]
    Direct,
    /// Gibson–Bruck Next Reaction method over an indexed event queue.
    NextReaction,
    /// Unoptimized Direct method, for cross-checking the others.
    Reference,
}

impl fmt::Display for AlgorithmKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(match self {
            AlgorithmKind::Direct => "direct",
            AlgorithmKind::NextReaction => "next-reaction",
            AlgorithmKind::Reference => "reference",
        })
    }
}

/// A stochastic simulation algorithm that owns a [`System`].
///
/// # Contract
///
/// Each successful [`advance`](StochAlgo::advance):
///
/// 1. picks one process `i` with probability `rate_i / total`, using the
///    rates as they stand before the step;
/// 2. moves the clock forward by an exponential interval of mean
///    `1 / total` (the Next Reaction method realizes the same law through
///    per-process clocks);
/// 3. fires exactly that process once at the new clock value and returns
///    the event.
///
/// The clock never decreases. After any error the algorithm should not
/// be advanced again; [`AdvanceError::Degenerate`] is detected before
/// anything changes, so the system is left as it was.
pub trait StochAlgo<S: System> {
    /// Which implementation this is.
    fn kind(&self) -> AlgorithmKind;

    /// Fire the next event.
    ///
    /// # Errors
    ///
    /// - [`AdvanceError::Degenerate`] when every rate is zero: no event
    ///   can ever fire again.
    /// - [`AdvanceError::QueueInvariant`] if a scheduled event lies before
    ///   the current clock.
    /// - [`AdvanceError::InvalidValue`] if a sampled time is not finite.
    fn advance(&mut self) -> Result<Event, AdvanceError>;

    /// The simulated system.
    fn system(&self) -> &S;

    /// Time of the most recent event, or the system's start time.
    fn clock(&self) -> Time {
        self.system().last_event_time()
    }

    /// Give the system back, dropping the algorithm's own state.
    fn into_system(self: Box<Self>) -> S;
}

/// Build the algorithm [`SimConfig`] asks for, seeded from `config.seed`.
///
/// The selection strategy applies to the Direct method only and the
/// reschedule policy to the Next Reaction method only.
///
/// # Errors
///
/// Returns [`ConstructionError`] if the system is empty or too large, or
/// if an initial event time cannot be sampled.
pub fn build_algorithm<S: System + 'static>(
    config: &SimConfig,
    system: S,
) -> Result<Box<dyn StochAlgo<S>>, ConstructionError> {
    let rng = SimRng::seed_from_u64(config.seed);
    let algo: Box<dyn StochAlgo<S>> = match (config.algorithm, config.selection) {
        (AlgorithmKind::Direct, SelectionKind::PriorityList) => {
            Box::new(DirectAlgo::new(system, rng)?)
        }
        (AlgorithmKind::Direct, SelectionKind::ProcStack(policy)) => {
            let stack = ProcStack::new(system.process_count(), policy);
            Box::new(DirectAlgo::with_selector(system, rng, stack)?)
        }
        (AlgorithmKind::NextReaction, _) => Box::new(NextReactionAlgo::with_policy(
            system,
            rng,
            config.reschedule,
        )?),
        (AlgorithmKind::Reference, _) => Box::new(ReferenceAlgo::new(system, rng)?),
    };
    Ok(algo)
}

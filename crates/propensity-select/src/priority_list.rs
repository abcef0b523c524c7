//! Fixed-order weighted selection for the Direct method.

use propensity_core::{AdvanceError, ConstructionError, ProcId, Rate, System};
use rand::Rng;

use crate::selector::{is_permutation, scan, Selector};

/// Linear-scan selector over a fixed process order.
///
/// Each selection draws `u ~ Uniform(0, total)` and walks the order,
/// accumulating rates until the running sum exceeds `u`. The scan order
/// affects only cost; the probability of selecting a process is always
/// `rate / total`. O(n) per selection, no mutation, so this is the
/// baseline every other selector is checked against.
#[derive(Clone, Debug)]
pub struct PriorityList {
    order: Vec<ProcId>,
}

impl PriorityList {
    /// Scan processes in insertion order: `ProcId(0)` first.
    pub fn new(process_count: usize) -> Self {
        Self {
            order: ProcId::range(process_count).collect(),
        }
    }

    /// Scan processes in a caller-chosen order.
    ///
    /// Putting high-rate processes first shortens the average scan.
    ///
    /// # Errors
    ///
    /// Returns [`ConstructionError::InvalidOrder`] if `order` is not a
    /// permutation of `0..process_count`.
    pub fn with_order(order: Vec<ProcId>, process_count: usize) -> Result<Self, ConstructionError> {
        if !is_permutation(&order, process_count) {
            return Err(ConstructionError::InvalidOrder {
                count: process_count,
            });
        }
        Ok(Self { order })
    }

    /// Number of processes in the scan.
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// Whether the scan is empty.
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// The fixed scan order.
    pub fn order(&self) -> &[ProcId] {
        &self.order
    }

    /// Select a process with probability proportional to its rate.
    ///
    /// Shared-reference form of [`Selector::select`]; a `PriorityList`
    /// never changes.
    ///
    /// # Errors
    ///
    /// Returns [`AdvanceError::Degenerate`] if `total` is zero.
    pub fn pick<S, R>(&self, system: &S, rng: &mut R, total: Rate) -> Result<ProcId, AdvanceError>
    where
        S: System + ?Sized,
        R: Rng + ?Sized,
    {
        scan(&self.order, system, rng, total).map(|(_, id)| id)
    }
}

impl Selector for PriorityList {
    fn select<S, R>(&mut self, system: &S, rng: &mut R, total: Rate) -> Result<ProcId, AdvanceError>
    where
        S: System + ?Sized,
        R: Rng + ?Sized,
    {
        self.pick(system, rng, total)
    }

    fn process_count(&self) -> usize {
        self.order.len()
    }
}

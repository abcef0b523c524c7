//! Self-organizing weighted selection.
//!
//! [`ProcStack`] keeps its own scan order and nudges each selected process
//! toward the front. Processes that fire often end up near the head, so
//! for skewed rate distributions the average scan is short. The order is
//! only a cost optimization: the cumulative scan still selects each
//! process with probability `rate / total` whatever the order is.

use propensity_core::{AdvanceError, ProcId, Rate, System};
use rand::Rng;

use crate::selector::{scan, Selector};

/// How the selected process moves after a selection.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ReorderPolicy {
    /// Swap the selected process with its predecessor. Converges slowly
    /// but is stable under noise.
    #[default]
    Transpose,
    /// Move the selected process to the head of the order.
    MoveToFront,
}

/// Adaptive linear-scan selector.
///
/// Same contract and probability law as
/// [`PriorityList`](crate::PriorityList); differs only in cost. Average
/// cost approaches O(1) for skewed rates and O(n) for near-uniform ones.
///
/// Tracks scan statistics for diagnostics: the number of order positions
/// visited per selection, and the number a fixed insertion-order scan
/// would have visited for the same selections. Their ratio is the
/// [`efficiency_gain`](ProcStack::efficiency_gain).
///
/// Not safe for concurrent callers: every selection mutates the order.
#[derive(Clone, Debug)]
pub struct ProcStack {
    order: Vec<ProcId>,
    policy: ReorderPolicy,
    selections: u64,
    scanned: u64,
    baseline_scanned: u64,
}

impl ProcStack {
    /// Start in insertion order with the given reorder policy.
    pub fn new(process_count: usize, policy: ReorderPolicy) -> Self {
        Self {
            order: ProcId::range(process_count).collect(),
            policy,
            selections: 0,
            scanned: 0,
            baseline_scanned: 0,
        }
    }

    /// The reorder policy.
    pub fn policy(&self) -> ReorderPolicy {
        self.policy
    }

    /// The current scan order, most recently promoted first.
    pub fn order(&self) -> &[ProcId] {
        &self.order
    }

    /// Number of processes in the scan.
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// Whether the scan is empty.
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Number of successful selections so far.
    pub fn selections(&self) -> u64 {
        self.selections
    }

    /// Total order positions visited across all selections.
    pub fn scanned(&self) -> u64 {
        self.scanned
    }

    /// Positions a fixed insertion-order scan would have visited for the
    /// same selections.
    pub fn baseline_scanned(&self) -> u64 {
        self.baseline_scanned
    }

    /// Average positions visited per selection (0.0 before any).
    pub fn mean_scan_length(&self) -> f64 {
        if self.selections == 0 {
            return 0.0;
        }
        self.scanned as f64 / self.selections as f64
    }

    /// Ratio of fixed-order scan length to adaptive scan length.
    ///
    /// Above 1.0 the reordering is paying for itself. Exactly 1.0 before
    /// any selection.
    pub fn efficiency_gain(&self) -> f64 {
        if self.scanned == 0 {
            return 1.0;
        }
        self.baseline_scanned as f64 / self.scanned as f64
    }

    /// Clear the scan statistics, keeping the learned order.
    pub fn reset_statistics(&mut self) {
        self.selections = 0;
        self.scanned = 0;
        self.baseline_scanned = 0;
    }

    fn promote(&mut self, pos: usize) {
        if pos == 0 {
            return;
        }
        match self.policy {
            ReorderPolicy::Transpose => self.order.swap(pos, pos - 1),
            ReorderPolicy::MoveToFront => self.order[..=pos].rotate_right(1),
        }
    }
}

impl Selector for ProcStack {
    fn select<S, R>(&mut self, system: &S, rng: &mut R, total: Rate) -> Result<ProcId, AdvanceError>
    where
        S: System + ?Sized,
        R: Rng + ?Sized,
    {
        let (pos, id) = scan(&self.order, system, rng, total)?;
        self.selections += 1;
        self.scanned += pos as u64 + 1;
        self.baseline_scanned += id.index() as u64 + 1;
        self.promote(pos);
        Ok(id)
    }

    fn process_count(&self) -> usize {
        self.order.len()
    }
}

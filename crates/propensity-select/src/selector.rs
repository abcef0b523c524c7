//! The [`Selector`] trait and the cumulative scan both selectors share.

use propensity_core::{AdvanceError, ProcId, Rate, System};
use rand::Rng;

/// Picks the next process to fire with probability proportional to rate.
///
/// # Contract
///
/// Given the system's current rates `r_1..r_n` and `total = Σ r_i`,
/// `select` returns process `i` with probability `r_i / total`. A
/// process with rate zero is never returned. Implementations may keep
/// internal state that affects cost, never the probability law.
///
/// Implementations are not safe for concurrent callers: `select` may
/// reorganize internal state even when it looks like a query.
pub trait Selector {
    /// Select a process, consuming exactly one `f64` from `rng`.
    ///
    /// `total` must equal the current sum of rates in `system`.
    ///
    /// # Errors
    ///
    /// Returns [`AdvanceError::Degenerate`] if `total` is zero or no
    /// process in the scan order has a positive rate.
    fn select<S, R>(&mut self, system: &S, rng: &mut R, total: Rate) -> Result<ProcId, AdvanceError>
    where
        S: System + ?Sized,
        R: Rng + ?Sized;

    /// Number of processes the selector scans.
    fn process_count(&self) -> usize;
}

/// Draw `u ~ Uniform(0, total)` and scan `order`, returning the position
/// and id of the first process whose cumulative rate exceeds `u`.
///
/// The comparison is strict so that a zero-rate process is never chosen,
/// even when `u` is exactly zero. If round-off leaves `u` above the final
/// cumulative sum, the last positive-rate process in the scan wins.
pub(crate) fn scan<S, R>(
    order: &[ProcId],
    system: &S,
    rng: &mut R,
    total: Rate,
) -> Result<(usize, ProcId), AdvanceError>
where
    S: System + ?Sized,
    R: Rng + ?Sized,
{
    if total.is_zero() {
        return Err(AdvanceError::Degenerate);
    }
    let u = rng.random::<f64>() * total.value();

    let mut cumulative = 0.0;
    let mut last_positive = None;
    for (pos, &id) in order.iter().enumerate() {
        let rate = system.rate(id).value();
        if rate == 0.0 {
            continue;
        }
        cumulative += rate;
        if cumulative > u {
            return Ok((pos, id));
        }
        last_positive = Some((pos, id));
    }
    last_positive.ok_or(AdvanceError::Degenerate)
}

/// Check that `order` is a permutation of `0..count`.
pub(crate) fn is_permutation(order: &[ProcId], count: usize) -> bool {
    if order.len() != count {
        return false;
    }
    let mut seen = vec![false; count];
    for id in order {
        match seen.get_mut(id.index()) {
            Some(slot) if !*slot => *slot = true,
            _ => return false,
        }
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn permutation_check() {
        let ids = |v: &[u32]| v.iter().map(|&i| ProcId(i)).collect::<Vec<_>>();
        assert!(is_permutation(&ids(&[2, 0, 1]), 3));
        assert!(!is_permutation(&ids(&[0, 0, 1]), 3));
        assert!(!is_permutation(&ids(&[0, 1, 3]), 3));
        assert!(!is_permutation(&ids(&[0, 1]), 3));
        assert!(is_permutation(&[], 0));
    }
}

//! Test utilities and fixture systems for Propensity development.
//!
//! Provides a constant-rate [`ConstRateSystem`] for selection tests and,
//! in [`fixtures`], domain-style systems with analytic solutions:
//! exponentially decaying populations and a two-step conversion chain.

#![forbid(unsafe_code)]
#![allow(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod fixtures;

pub use fixtures::{
    bateman_intermediate, expected_population, ChainProcess, ChainSystem, DecayProcess,
    DecaySystem, SCENARIO_ELAPSED, SCENARIO_SEED, SCENARIO_STEPS,
};

use propensity_core::{Process, ProcId, Rate, System, Time};

/// A process whose rate never changes. Counts how often it fires.
#[derive(Clone, Debug)]
pub struct ConstRateProcess {
    rate: Rate,
    fired: u64,
}

impl ConstRateProcess {
    pub fn new(rate: f64) -> Self {
        Self {
            rate: Rate::new(rate).expect("fixture rate must be valid"),
            fired: 0,
        }
    }

    pub fn fired(&self) -> u64 {
        self.fired
    }
}

impl Process for ConstRateProcess {
    fn rate(&self) -> Rate {
        self.rate
    }

    fn fire(&mut self, _time: Time) {
        self.fired += 1;
    }
}

/// A system of fixed-rate processes.
///
/// Firing only bumps a counter, so the empirical firing frequencies of a
/// long run converge to `rate_i / total`.
#[derive(Clone, Debug)]
pub struct ConstRateSystem {
    procs: Vec<ConstRateProcess>,
    last_event: Time,
}

impl ConstRateSystem {
    /// Build from raw rates.
    ///
    /// # Panics
    ///
    /// Panics if any rate is negative or non-finite.
    pub fn new(rates: &[f64]) -> Self {
        Self {
            procs: rates.iter().map(|&r| ConstRateProcess::new(r)).collect(),
            last_event: Time::ZERO,
        }
    }

    /// Change one process's rate.
    pub fn set_rate(&mut self, id: ProcId, rate: f64) {
        self.procs[id.index()].rate = Rate::new(rate).expect("fixture rate must be valid");
    }

    /// Per-process fire counts, indexed by [`ProcId`].
    pub fn fire_counts(&self) -> Vec<u64> {
        self.procs.iter().map(ConstRateProcess::fired).collect()
    }
}

impl System for ConstRateSystem {
    type Proc = ConstRateProcess;

    fn process_count(&self) -> usize {
        self.procs.len()
    }

    fn process(&self, id: ProcId) -> &ConstRateProcess {
        &self.procs[id.index()]
    }

    fn process_mut(&mut self, id: ProcId) -> &mut ConstRateProcess {
        &mut self.procs[id.index()]
    }

    fn last_event_time(&self) -> Time {
        self.last_event
    }

    fn set_last_event_time(&mut self, time: Time) {
        self.last_event = time;
    }
}

/// Normalize counts to frequencies. All zeros for an empty tally.
pub fn frequencies(counts: &[u64]) -> Vec<f64> {
    let total: u64 = counts.iter().sum();
    if total == 0 {
        return vec![0.0; counts.len()];
    }
    counts.iter().map(|&c| c as f64 / total as f64).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn const_rates_and_counts() {
        let mut sys = ConstRateSystem::new(&[1.0, 3.0]);
        assert_eq!(sys.total_rate().value(), 4.0);
        sys.fire(ProcId(1), Time::new(0.5).unwrap());
        sys.fire(ProcId(1), Time::new(0.7).unwrap());
        assert_eq!(sys.fire_counts(), vec![0, 2]);
        assert_eq!(sys.process(ProcId(1)).fired(), 2);
        assert_eq!(sys.last_event_time().value(), 0.7);

        sys.set_rate(ProcId(0), 0.0);
        assert_eq!(sys.total_rate().value(), 3.0);
    }

    #[test]
    fn frequencies_normalize() {
        assert_eq!(frequencies(&[1, 3]), vec![0.25, 0.75]);
        assert_eq!(frequencies(&[0, 0]), vec![0.0, 0.0]);
    }
}

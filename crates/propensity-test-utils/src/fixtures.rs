//! Fixture systems with known analytic behavior.
//!
//! - [`DecaySystem`]: independent first-order decays, `N(t) = N0 e^{-kt}`.
//! - [`ChainSystem`]: sequential conversions `S0 -> S1 -> ... -> product`,
//!   where each firing feeds the next process (a real dependency).

use propensity_core::{Process, ProcId, Rate, System, Time};
use smallvec::{smallvec, SmallVec};

/// Seed of the reference decay scenario.
pub const SCENARIO_SEED: u64 = 20210501;

/// Number of `advance()` calls in the reference decay scenario.
pub const SCENARIO_STEPS: u64 = 500_000;

/// Approximate simulated time the reference scenario covers.
pub const SCENARIO_ELAPSED: f64 = 0.359;

/// Analytic expectation of a first-order decay: `initial * e^{-kt}`.
pub fn expected_population(initial: u64, constant: f64, elapsed: f64) -> f64 {
    initial as f64 * (-constant * elapsed).exp()
}

/// Analytic expectation of the intermediate of `A -k1-> B -k2-> C`
/// starting from `a0` copies of `A` and no `B` (Bateman solution).
pub fn bateman_intermediate(a0: u64, k1: f64, k2: f64, elapsed: f64) -> f64 {
    a0 as f64 * k1 / (k2 - k1) * ((-k1 * elapsed).exp() - (-k2 * elapsed).exp())
}

fn rate_of(constant: f64, count: u64) -> Rate {
    Rate::new(constant * count as f64).expect("fixture constants are finite and non-negative")
}

// ── Decay ───────────────────────────────────────────────────────

/// A population that shrinks by one each time it fires.
///
/// Rate is `constant * population`, so the expected population follows
/// exponential decay.
#[derive(Clone, Debug)]
pub struct DecayProcess {
    constant: f64,
    population: u64,
}

impl DecayProcess {
    pub fn new(constant: f64, population: u64) -> Self {
        Self {
            constant,
            population,
        }
    }

    pub fn constant(&self) -> f64 {
        self.constant
    }

    pub fn population(&self) -> u64 {
        self.population
    }
}

impl Process for DecayProcess {
    fn rate(&self) -> Rate {
        rate_of(self.constant, self.population)
    }

    fn fire(&mut self, _time: Time) {
        self.population = self.population.saturating_sub(1);
    }
}

/// Independent decaying populations.
#[derive(Clone, Debug)]
pub struct DecaySystem {
    procs: Vec<DecayProcess>,
    initial: Vec<u64>,
    last_event: Time,
}

impl DecaySystem {
    /// Build from `(constant, initial population)` pairs.
    pub fn new(specs: &[(f64, u64)]) -> Self {
        Self {
            procs: specs
                .iter()
                .map(|&(k, n)| DecayProcess::new(k, n))
                .collect(),
            initial: specs.iter().map(|&(_, n)| n).collect(),
            last_event: Time::ZERO,
        }
    }

    /// The reference scenario: 1000 populations of 10,000 at rate 0.1,
    /// plus three populations of 100,000 at rates 1.0, 2.0 and 3.0.
    pub fn scenario() -> Self {
        let mut specs = vec![(0.1, 10_000); 1000];
        specs.extend([(1.0, 100_000), (2.0, 100_000), (3.0, 100_000)]);
        Self::new(&specs)
    }

    pub fn population(&self, id: ProcId) -> u64 {
        self.procs[id.index()].population
    }

    pub fn initial_population(&self, id: ProcId) -> u64 {
        self.initial[id.index()]
    }

    /// Total number of decays so far across all populations.
    pub fn decays(&self) -> u64 {
        self.initial.iter().sum::<u64>() - self.procs.iter().map(|p| p.population).sum::<u64>()
    }

    /// Analytic expected population of `id` after `elapsed` time.
    pub fn expected(&self, id: ProcId, elapsed: f64) -> f64 {
        expected_population(
            self.initial[id.index()],
            self.procs[id.index()].constant,
            elapsed,
        )
    }
}

impl System for DecaySystem {
    type Proc = DecayProcess;

    fn process_count(&self) -> usize {
        self.procs.len()
    }

    fn process(&self, id: ProcId) -> &DecayProcess {
        &self.procs[id.index()]
    }

    fn process_mut(&mut self, id: ProcId) -> &mut DecayProcess {
        &mut self.procs[id.index()]
    }

    fn last_event_time(&self) -> Time {
        self.last_event
    }

    fn set_last_event_time(&mut self, time: Time) {
        self.last_event = time;
    }
}

// ── Chain ───────────────────────────────────────────────────────

/// One conversion step of a [`ChainSystem`]: consumes its species.
#[derive(Clone, Debug)]
pub struct ChainProcess {
    constant: f64,
    count: u64,
}

impl ChainProcess {
    pub fn constant(&self) -> f64 {
        self.constant
    }

    /// Copies of this step's reactant species.
    pub fn count(&self) -> u64 {
        self.count
    }
}

impl Process for ChainProcess {
    fn rate(&self) -> Rate {
        rate_of(self.constant, self.count)
    }

    fn fire(&mut self, _time: Time) {
        self.count = self.count.saturating_sub(1);
    }
}

/// Sequential first-order conversions `S0 -> S1 -> ... -> product`.
///
/// Process `i` converts one copy of species `i` into species `i + 1`, so
/// firing it raises the rate of process `i + 1`. That coupling is
/// reported through [`System::dependents`].
#[derive(Clone, Debug)]
pub struct ChainSystem {
    procs: Vec<ChainProcess>,
    dependents: Vec<SmallVec<[ProcId; 1]>>,
    product: u64,
    last_event: Time,
}

impl ChainSystem {
    /// `constants[i]` is the rate constant of step `i`; all `initial`
    /// copies start as species 0.
    pub fn new(constants: &[f64], initial: u64) -> Self {
        let procs: Vec<ChainProcess> = constants
            .iter()
            .enumerate()
            .map(|(i, &k)| ChainProcess {
                constant: k,
                count: if i == 0 { initial } else { 0 },
            })
            .collect();
        let n = procs.len();
        let dependents = (0..n)
            .map(|i| {
                if i + 1 < n {
                    smallvec![ProcId((i + 1) as u32)]
                } else {
                    SmallVec::new()
                }
            })
            .collect();
        Self {
            procs,
            dependents,
            product: 0,
            last_event: Time::ZERO,
        }
    }

    /// Copies of species `i`.
    pub fn count(&self, id: ProcId) -> u64 {
        self.procs[id.index()].count
    }

    /// Copies that have passed through every step.
    pub fn product(&self) -> u64 {
        self.product
    }
}

impl System for ChainSystem {
    type Proc = ChainProcess;

    fn process_count(&self) -> usize {
        self.procs.len()
    }

    fn process(&self, id: ProcId) -> &ChainProcess {
        &self.procs[id.index()]
    }

    fn process_mut(&mut self, id: ProcId) -> &mut ChainProcess {
        &mut self.procs[id.index()]
    }

    fn last_event_time(&self) -> Time {
        self.last_event
    }

    fn set_last_event_time(&mut self, time: Time) {
        self.last_event = time;
    }

    fn fire(&mut self, id: ProcId, time: Time) {
        self.procs[id.index()].fire(time);
        match self.procs.get_mut(id.index() + 1) {
            Some(next) => next.count += 1,
            None => self.product += 1,
        }
        self.last_event = time;
    }

    fn dependents(&self, id: ProcId) -> &[ProcId] {
        &self.dependents[id.index()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decay_rate_tracks_population() {
        let mut sys = DecaySystem::new(&[(0.5, 4), (2.0, 0)]);
        assert_eq!(sys.rate(ProcId(0)).value(), 2.0);
        assert!(sys.rate(ProcId(1)).is_zero());
        sys.fire(ProcId(0), Time::new(1.0).unwrap());
        assert_eq!(sys.population(ProcId(0)), 3);
        assert_eq!(sys.rate(ProcId(0)).value(), 1.5);
        assert_eq!(sys.decays(), 1);
        assert_eq!(sys.initial_population(ProcId(0)), 4);
    }

    #[test]
    fn scenario_shape() {
        let sys = DecaySystem::scenario();
        assert_eq!(sys.process_count(), 1003);
        assert_eq!(sys.total_rate().value(), 1_600_000.0);
        assert_eq!(sys.population(ProcId(1002)), 100_000);
        assert!((sys.expected(ProcId(0), 0.0) - 10_000.0).abs() < 1e-9);
    }

    #[test]
    fn chain_firing_feeds_next_step() {
        let mut sys = ChainSystem::new(&[1.0, 2.0], 10);
        assert_eq!(sys.dependents(ProcId(0)), &[ProcId(1)]);
        assert!(sys.dependents(ProcId(1)).is_empty());
        assert!(sys.rate(ProcId(1)).is_zero());

        sys.fire(ProcId(0), Time::new(0.1).unwrap());
        assert_eq!(sys.count(ProcId(0)), 9);
        assert_eq!(sys.count(ProcId(1)), 1);
        assert_eq!(sys.rate(ProcId(1)).value(), 2.0);

        sys.fire(ProcId(1), Time::new(0.2).unwrap());
        assert_eq!(sys.count(ProcId(1)), 0);
        assert_eq!(sys.product(), 1);
        assert_eq!(sys.last_event_time().value(), 0.2);
    }

    #[test]
    fn analytic_helpers() {
        assert!((expected_population(1000, 1.0, 1.0) - 367.879).abs() < 1e-3);
        // B peaks at t = ln(k2/k1)/(k2-k1).
        let t_peak = (2.0f64).ln();
        let peak = bateman_intermediate(1000, 1.0, 2.0, t_peak);
        assert!((peak - 250.0).abs() < 1e-9);
        assert_eq!(bateman_intermediate(1000, 1.0, 2.0, 0.0), 0.0);
    }
}

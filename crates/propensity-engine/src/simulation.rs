//! The simulation driver.
//!
//! [`Simulation`] is the user-facing entry point: it validates a
//! [`SimConfig`], builds the requested [`StochAlgo`] over the caller's
//! system, and runs it until a stop condition holds.
//!
//! # Ownership model
//!
//! The algorithm owns the system for the whole run. Observers see it
//! through a shared reference after each event; the caller gets it back
//! with [`into_system()`](Simulation::into_system).

use std::fmt;
use std::time::Instant;

use propensity_core::{AdvanceError, System, Time};
use propensity_select::Event;
use tracing::{debug, info, warn};

use crate::algo::{build_algorithm, AlgorithmKind, StochAlgo};
use crate::config::SimConfig;
use crate::error::SimError;
use crate::metrics::RunMetrics;

// ── RunReport ───────────────────────────────────────────────────

/// Why [`Simulation::run`] returned.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StopReason {
    /// The step budget was spent.
    StepLimit,
    /// The clock reached the time bound.
    TimeLimit,
    /// Every rate dropped to zero: no event can fire again.
    Exhausted,
}

/// Outcome of a [`Simulation::run`] call.
#[derive(Clone, Debug, PartialEq)]
pub struct RunReport {
    /// Why the run ended.
    pub stop_reason: StopReason,
    /// Clock after the last event.
    pub clock: Time,
    /// Counters for this run.
    pub metrics: RunMetrics,
}

// ── Simulation ──────────────────────────────────────────────────

/// A configured algorithm bound to one system.
///
/// # Example
///
/// ```
/// use propensity_engine::{SimConfig, Simulation, StopCondition, StopReason};
/// use propensity_test_utils::DecaySystem;
///
/// let config = SimConfig {
///     stop: StopCondition::steps(100),
///     ..SimConfig::default()
/// };
/// let mut sim = Simulation::new(config, DecaySystem::new(&[(1.0, 50), (0.5, 80)]))?;
/// let report = sim.run()?;
/// assert_eq!(report.stop_reason, StopReason::StepLimit);
/// assert_eq!(sim.system().decays(), 100);
/// # Ok::<(), propensity_engine::SimError>(())
/// ```
pub struct Simulation<S: System + 'static> {
    algo: Box<dyn StochAlgo<S>>,
    config: SimConfig,
    steps: u64,
    start: Time,
}

impl<S: System + 'static> Simulation<S> {
    /// Validate `config` and build its algorithm over `system`.
    ///
    /// # Errors
    ///
    /// Returns [`SimError::Config`] for an invalid configuration or
    /// [`SimError::Construction`] if the algorithm cannot be built.
    pub fn new(config: SimConfig, system: S) -> Result<Self, SimError> {
        config.validate()?;
        let start = system.last_event_time();
        let algo = build_algorithm(&config, system)?;
        debug!(
            algorithm = %config.algorithm,
            seed = config.seed,
            processes = algo.system().process_count(),
            "simulation ready"
        );
        Ok(Self {
            algo,
            config,
            steps: 0,
            start,
        })
    }

    /// Fire one event, ignoring the stop condition.
    ///
    /// # Errors
    ///
    /// Returns [`SimError::Advance`] with the algorithm's error, including
    /// [`AdvanceError::Degenerate`] once nothing can fire.
    pub fn step(&mut self) -> Result<Event, SimError> {
        let event = self.algo.advance()?;
        self.steps += 1;
        Ok(event)
    }

    /// Run until the configured stop condition or exhaustion.
    ///
    /// # Errors
    ///
    /// Returns [`SimError::Advance`] for any step failure other than
    /// exhaustion.
    pub fn run(&mut self) -> Result<RunReport, SimError> {
        self.run_with(|_, _| {})
    }

    /// Like [`run`](Self::run), calling `observer` after every event with
    /// the event and the updated system.
    ///
    /// # Errors
    ///
    /// See [`run`](Self::run).
    pub fn run_with<F>(&mut self, mut observer: F) -> Result<RunReport, SimError>
    where
        F: FnMut(&Event, &S),
    {
        let wall = Instant::now();
        let steps_before = self.steps;
        let clock_before = self.clock();

        let stop_reason = loop {
            if let Some(reason) = self.limit_reached() {
                break reason;
            }
            match self.algo.advance() {
                Ok(event) => {
                    self.steps += 1;
                    observer(&event, self.algo.system());
                }
                Err(AdvanceError::Degenerate) => {
                    warn!(
                        steps = self.steps,
                        clock = %self.clock(),
                        "total rate is zero, stopping"
                    );
                    break StopReason::Exhausted;
                }
                Err(e) => return Err(e.into()),
            }
        };

        let clock = self.clock();
        let metrics = RunMetrics {
            steps: self.steps - steps_before,
            elapsed: clock.since(clock_before).value(),
            wall_us: u64::try_from(wall.elapsed().as_micros()).unwrap_or(u64::MAX),
        };
        info!(
            ?stop_reason,
            steps = metrics.steps,
            elapsed = metrics.elapsed,
            wall_us = metrics.wall_us,
            "run finished"
        );
        Ok(RunReport {
            stop_reason,
            clock,
            metrics,
        })
    }

    fn limit_reached(&self) -> Option<StopReason> {
        let stop = self.config.stop;
        if stop.max_steps.is_some_and(|max| self.steps >= max) {
            return Some(StopReason::StepLimit);
        }
        if stop.max_time.is_some_and(|max| self.clock().value() >= max) {
            return Some(StopReason::TimeLimit);
        }
        None
    }

    /// The simulated system.
    pub fn system(&self) -> &S {
        self.algo.system()
    }

    /// Time of the most recent event.
    pub fn clock(&self) -> Time {
        self.algo.clock()
    }

    /// Simulated time since construction.
    pub fn elapsed(&self) -> Time {
        self.clock().since(self.start)
    }

    /// Events fired since construction.
    pub fn steps(&self) -> u64 {
        self.steps
    }

    /// The algorithm driving this simulation.
    pub fn kind(&self) -> AlgorithmKind {
        self.algo.kind()
    }

    /// The validated configuration.
    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    /// Consume the simulation and return the system.
    pub fn into_system(self) -> S {
        self.algo.into_system()
    }
}

impl<S: System + 'static> fmt::Debug for Simulation<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Simulation")
            .field("algorithm", &self.algo.kind())
            .field("seed", &self.config.seed)
            .field("steps", &self.steps)
            .field("clock", &self.clock())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{ConfigError, StopCondition};
    use propensity_core::{ConstructionError, ProcId};
    use propensity_test_utils::{ConstRateSystem, DecaySystem};
    use tracing_test::traced_test;

    fn config(algorithm: AlgorithmKind, stop: StopCondition) -> SimConfig {
        SimConfig {
            algorithm,
            seed: 17,
            stop,
            ..SimConfig::default()
        }
    }

    const ALL: [AlgorithmKind; 3] = [
        AlgorithmKind::Direct,
        AlgorithmKind::NextReaction,
        AlgorithmKind::Reference,
    ];

    #[test]
    fn stops_at_step_limit() {
        for kind in ALL {
            let sys = ConstRateSystem::new(&[1.0, 2.0, 3.0]);
            let mut sim = Simulation::new(config(kind, StopCondition::steps(250)), sys).unwrap();
            let report = sim.run().unwrap();
            assert_eq!(report.stop_reason, StopReason::StepLimit);
            assert_eq!(report.metrics.steps, 250);
            assert_eq!(report.clock, sim.clock());
            assert_eq!(sim.steps(), 250);
            assert_eq!(sim.kind(), kind);

            // The budget counts from construction, so a second run is a no-op.
            let again = sim.run().unwrap();
            assert_eq!(again.metrics.steps, 0);
            assert_eq!(again.stop_reason, StopReason::StepLimit);
            assert_eq!(sim.into_system().fire_counts().iter().sum::<u64>(), 250);
        }
    }

    #[test]
    fn stops_at_time_limit_after_crossing_event() {
        for kind in ALL {
            let sys = ConstRateSystem::new(&[5.0, 5.0]);
            let mut sim = Simulation::new(config(kind, StopCondition::time(3.0)), sys).unwrap();
            let mut times = Vec::new();
            let report = sim.run_with(|event, _| times.push(event.time)).unwrap();
            assert_eq!(report.stop_reason, StopReason::TimeLimit);
            assert!(report.clock.value() >= 3.0);
            let last = times.len() - 1;
            assert!(times[..last].iter().all(|t| t.value() < 3.0));
            assert_eq!(times[last], report.clock);
            assert_eq!(sim.elapsed(), report.clock);
        }
    }

    #[traced_test]
    #[test]
    fn exhaustion_is_a_normal_stop() {
        for kind in ALL {
            let sys = DecaySystem::new(&[(1.0, 30), (2.0, 20)]);
            let mut sim = Simulation::new(config(kind, StopCondition::steps(1_000)), sys).unwrap();
            let report = sim.run().unwrap();
            assert_eq!(report.stop_reason, StopReason::Exhausted);
            assert_eq!(report.metrics.steps, 50);
            assert_eq!(sim.system().decays(), 50);
            assert!(sim.system().total_rate().is_zero());
            assert_eq!(
                sim.step(),
                Err(SimError::Advance(AdvanceError::Degenerate))
            );
        }
        assert!(logs_contain("total rate is zero, stopping"));
    }

    #[test]
    fn observer_sees_updated_system() {
        let sys = DecaySystem::new(&[(1.0, 10)]);
        let mut sim =
            Simulation::new(config(AlgorithmKind::Direct, StopCondition::steps(4)), sys).unwrap();
        let mut seen = Vec::new();
        sim.run_with(|event, sys| {
            assert_eq!(sys.last_event_time(), event.time);
            seen.push(sys.population(ProcId(0)));
        })
        .unwrap();
        assert_eq!(seen, vec![9, 8, 7, 6]);
    }

    #[test]
    fn manual_steps_count_toward_budget() {
        let sys = ConstRateSystem::new(&[1.0]);
        let mut sim =
            Simulation::new(config(AlgorithmKind::Direct, StopCondition::steps(10)), sys).unwrap();
        for _ in 0..4 {
            sim.step().unwrap();
        }
        let report = sim.run().unwrap();
        assert_eq!(report.metrics.steps, 6);
        assert_eq!(sim.steps(), 10);
    }

    #[test]
    fn invalid_config_and_system_rejected() {
        let bad = config(AlgorithmKind::Direct, StopCondition::steps(0));
        let err = Simulation::new(bad, ConstRateSystem::new(&[1.0])).unwrap_err();
        assert_eq!(err, SimError::Config(ConfigError::ZeroStepLimit));

        let good = config(AlgorithmKind::NextReaction, StopCondition::steps(5));
        let err = Simulation::new(good, ConstRateSystem::new(&[])).unwrap_err();
        assert_eq!(err, SimError::Construction(ConstructionError::EmptySystem));
    }

    #[test]
    fn debug_impl_names_algorithm() {
        let sim = Simulation::new(
            config(AlgorithmKind::NextReaction, StopCondition::steps(1)),
            ConstRateSystem::new(&[1.0]),
        )
        .unwrap();
        let text = format!("{sim:?}");
        assert!(text.contains("NextReaction"));
        assert_eq!(sim.config().seed, 17);
    }
}

//! Simulation configuration, validation, and error types.
//!
//! [`SimConfig`] selects the algorithm and its tuning, the random seed,
//! and when a [`Simulation`](crate::Simulation) run stops.
//! [`validate()`](SimConfig::validate) runs before anything is built.

use propensity_select::ReorderPolicy;
use thiserror::Error;

use crate::algo::AlgorithmKind;
use crate::next_reaction::ReschedulePolicy;

// ── SelectionKind ──────────────────────────────────────────────────

/// Weighted selection structure used by the Direct method.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SelectionKind {
    /// Fixed insertion-order scan.
    #[default]
    PriorityList,
    /// Self-organizing scan with the given reorder policy.
    ProcStack(ReorderPolicy),
}

// ── StopCondition ──────────────────────────────────────────────────

/// When [`Simulation::run`](crate::Simulation::run) returns.
///
/// A run also stops early when no process can fire. At least one bound
/// must be set.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct StopCondition {
    /// Stop once this many events have fired since the simulation was
    /// built.
    pub max_steps: Option<u64>,
    /// Stop once the clock reaches this simulated time. The event that
    /// crosses the bound is still applied.
    pub max_time: Option<f64>,
}

impl StopCondition {
    /// Bound by step count only.
    pub fn steps(max_steps: u64) -> Self {
        Self {
            max_steps: Some(max_steps),
            max_time: None,
        }
    }

    /// Bound by simulated time only.
    pub fn time(max_time: f64) -> Self {
        Self {
            max_steps: None,
            max_time: Some(max_time),
        }
    }
}

impl Default for StopCondition {
    fn default() -> Self {
        Self::steps(1_000_000)
    }
}

// ── SimConfig ──────────────────────────────────────────────────────

/// Builder input for a [`Simulation`](crate::Simulation).
#[derive(Clone, Debug, PartialEq)]
pub struct SimConfig {
    /// Algorithm to run. Default: Direct.
    pub algorithm: AlgorithmKind,
    /// Selection structure for the Direct method. Default: PriorityList.
    pub selection: SelectionKind,
    /// How the Next Reaction method updates dependents. Default: Rescale.
    pub reschedule: ReschedulePolicy,
    /// Seed for the algorithm's random stream. Default: 0.
    pub seed: u64,
    /// Run bounds. Default: one million steps.
    pub stop: StopCondition,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            algorithm: AlgorithmKind::default(),
            selection: SelectionKind::default(),
            reschedule: ReschedulePolicy::default(),
            seed: 0,
            stop: StopCondition::default(),
        }
    }
}

impl SimConfig {
    /// Check structural invariants.
    ///
    /// # Errors
    ///
    /// Returns the first [`ConfigError`] found.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let StopCondition {
            max_steps,
            max_time,
        } = self.stop;
        if max_steps.is_none() && max_time.is_none() {
            return Err(ConfigError::Unbounded);
        }
        if max_steps == Some(0) {
            return Err(ConfigError::ZeroStepLimit);
        }
        if let Some(value) = max_time {
            if !value.is_finite() || value <= 0.0 {
                return Err(ConfigError::InvalidTimeLimit { value });
            }
        }
        Ok(())
    }
}

// ── ConfigError ────────────────────────────────────────────────────

/// Errors detected by [`SimConfig::validate()`].
#[derive(Clone, Debug, PartialEq, Error)]
pub enum ConfigError {
    /// Neither a step nor a time bound was set.
    #[error("stop condition needs max_steps or max_time")]
    Unbounded,
    /// `max_steps` was zero.
    #[error("max_steps must be at least 1")]
    ZeroStepLimit,
    /// `max_time` was NaN, infinite, zero, or negative.
    #[error("max_time must be finite and positive, got {value}")]
    InvalidTimeLimit {
        /// The invalid value.
        value: f64,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_valid() {
        let config = SimConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.stop.max_steps, Some(1_000_000));
        assert_eq!(config.algorithm, AlgorithmKind::Direct);
        assert_eq!(config.reschedule, ReschedulePolicy::Rescale);
    }

    #[test]
    fn unbounded_rejected() {
        let config = SimConfig {
            stop: StopCondition {
                max_steps: None,
                max_time: None,
            },
            ..SimConfig::default()
        };
        assert_eq!(config.validate(), Err(ConfigError::Unbounded));
    }

    #[test]
    fn zero_steps_rejected() {
        let config = SimConfig {
            stop: StopCondition::steps(0),
            ..SimConfig::default()
        };
        assert_eq!(config.validate(), Err(ConfigError::ZeroStepLimit));
    }

    #[test]
    fn bad_time_limits_rejected() {
        for value in [0.0, -1.0, f64::INFINITY] {
            let config = SimConfig {
                stop: StopCondition::time(value),
                ..SimConfig::default()
            };
            assert_eq!(
                config.validate(),
                Err(ConfigError::InvalidTimeLimit { value })
            );
        }
        let nan = SimConfig {
            stop: StopCondition::time(f64::NAN),
            ..SimConfig::default()
        };
        assert!(matches!(
            nan.validate(),
            Err(ConfigError::InvalidTimeLimit { .. })
        ));
    }

    #[test]
    fn both_bounds_allowed() {
        let config = SimConfig {
            stop: StopCondition {
                max_steps: Some(10),
                max_time: Some(2.5),
            },
            ..SimConfig::default()
        };
        assert!(config.validate().is_ok());
    }
}

//! Benchmark profiles for the Propensity stochastic simulation engine.
//!
//! - [`decay_profile`]: the reference decay scenario scaled to `n` slow
//!   populations plus three fast ones
//! - [`skewed_rates`] / [`uniform_rates`]: constant-rate vectors for
//!   selection benchmarks
//! - [`profile_config`]: a step-bounded [`SimConfig`] per algorithm

#![forbid(unsafe_code)]
#![deny(rustdoc::broken_intra_doc_links)]

use propensity_engine::{AlgorithmKind, SimConfig, StopCondition};
use propensity_test_utils::DecaySystem;

/// `slow` populations of 10,000 at rate constant 0.1 followed by three
/// populations of 100,000 at 1.0, 2.0 and 3.0.
///
/// `decay_profile(1000)` is the reference scenario.
pub fn decay_profile(slow: usize) -> DecaySystem {
    let mut specs = vec![(0.1, 10_000); slow];
    specs.extend([(1.0, 100_000), (2.0, 100_000), (3.0, 100_000)]);
    DecaySystem::new(&specs)
}

/// Rates falling geometrically by half, so the head dominates: a few
/// processes account for nearly all selections.
///
/// Listed smallest first, the worst case for a fixed insertion-order
/// scan.
pub fn skewed_rates(n: usize) -> Vec<f64> {
    let mut rates: Vec<f64> = (0..n).map(|i| 1e6 * 0.5f64.powi(i.min(60) as i32)).collect();
    rates.reverse();
    rates
}

/// `n` equal rates of 1.0.
pub fn uniform_rates(n: usize) -> Vec<f64> {
    vec![1.0; n]
}

/// Config running `algorithm` with `seed` for at most `steps` events.
pub fn profile_config(algorithm: AlgorithmKind, seed: u64, steps: u64) -> SimConfig {
    SimConfig {
        algorithm,
        seed,
        stop: StopCondition::steps(steps),
        ..SimConfig::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use propensity_core::System;

    #[test]
    fn reference_profile_shape() {
        let sys = decay_profile(1000);
        assert_eq!(sys.process_count(), 1003);
        assert_eq!(sys.total_rate().value(), 1_600_000.0);
    }

    #[test]
    fn skewed_rates_ascend() {
        let rates = skewed_rates(8);
        assert_eq!(rates.len(), 8);
        assert_eq!(rates[7], 1e6);
        assert!(rates.windows(2).all(|w| w[0] < w[1]));
        assert!(skewed_rates(200).iter().all(|&r| r > 0.0));
    }

    #[test]
    fn profile_config_is_valid() {
        let config = profile_config(AlgorithmKind::NextReaction, 3, 100);
        assert!(config.validate().is_ok());
        assert_eq!(config.stop.max_steps, Some(100));
    }
}

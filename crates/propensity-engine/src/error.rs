//! Top-level error for the simulation driver.

use propensity_core::{AdvanceError, ConstructionError};
use thiserror::Error;

use crate::config::ConfigError;

/// Anything that can stop a [`Simulation`](crate::Simulation) from being
/// built or advanced.
#[derive(Clone, Debug, PartialEq, Error)]
pub enum SimError {
    /// The configuration failed validation.
    #[error("invalid configuration: {0}")]
    Config(#[from] ConfigError),
    /// The algorithm could not be built over the system.
    #[error("construction failed: {0}")]
    Construction(#[from] ConstructionError),
    /// A step failed.
    #[error("advance failed: {0}")]
    Advance(#[from] AdvanceError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wraps_with_context() {
        let err: SimError = ConstructionError::EmptySystem.into();
        assert_eq!(err.to_string(), "construction failed: system has no processes");
        let err: SimError = ConfigError::ZeroStepLimit.into();
        assert!(matches!(err, SimError::Config(ConfigError::ZeroStepLimit)));
    }
}

//! Error types for replay verification.

use propensity_core::AdvanceError;
use thiserror::Error;

use crate::compare::Divergence;

/// Errors raised while replaying a recorded trajectory.
#[derive(Clone, Debug, PartialEq, Error)]
pub enum ReplayError {
    /// The replayed run fired a different event than the recording.
    #[error("replay diverged: {0}")]
    Diverged(Divergence),
    /// The replayed run failed before the recording ended.
    #[error("replay failed at step {step}: {source}")]
    Advance {
        /// Zero-based index of the event that could not be replayed.
        step: usize,
        /// The algorithm's error.
        #[source]
        source: AdvanceError,
    },
}

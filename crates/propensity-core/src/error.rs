//! Error types for the Propensity engine.
//!
//! Organized by the phase in which they arise: value construction,
//! system/algorithm construction, and per-step advancement.

use thiserror::Error;

use crate::id::ProcId;
use crate::rate::Time;

/// A scalar failed validation when constructing a [`Rate`](crate::Rate)
/// or [`Time`].
#[derive(Clone, Copy, Debug, PartialEq, Error)]
pub enum ValueError {
    /// The value was NaN or infinite.
    #[error("{quantity} must be finite, got {value}")]
    NonFinite {
        /// Which quantity was being constructed (`"rate"` or `"time"`).
        quantity: &'static str,
        /// The rejected value.
        value: f64,
    },
    /// The value was below zero.
    #[error("{quantity} must be non-negative, got {value}")]
    Negative {
        /// Which quantity was being constructed (`"rate"` or `"time"`).
        quantity: &'static str,
        /// The rejected value.
        value: f64,
    },
}

/// Errors raised while building a system view, selection structure,
/// event queue, or algorithm. Never coerced; construction simply fails.
#[derive(Clone, Debug, PartialEq, Error)]
pub enum ConstructionError {
    /// A rate or time value was invalid.
    #[error(transparent)]
    InvalidValue(#[from] ValueError),
    /// The system has no processes to schedule.
    #[error("system has no processes")]
    EmptySystem,
    /// The process count does not fit the `u32` index space of [`ProcId`].
    #[error("process count {count} exceeds u32::MAX")]
    TooManyProcesses {
        /// The offending count.
        count: usize,
    },
    /// An event queue was seeded with the wrong number of events.
    #[error("event queue needs one event per process: expected {expected}, got {actual}")]
    EventCountMismatch {
        /// Number of processes in the system.
        expected: usize,
        /// Number of events supplied.
        actual: usize,
    },
    /// Two initial events name the same process.
    #[error("duplicate event for process {proc}")]
    DuplicateEvent {
        /// The process scheduled twice.
        proc: ProcId,
    },
    /// A process id does not belong to the system.
    #[error("process {proc} out of range for {count} processes")]
    UnknownProcess {
        /// The out-of-range id.
        proc: ProcId,
        /// Number of processes in the system.
        count: usize,
    },
    /// A selection order is not a permutation of the system's processes.
    #[error("selection order is not a permutation of {count} processes")]
    InvalidOrder {
        /// Number of processes in the system.
        count: usize,
    },
    /// An initial event time could not be sampled.
    #[error("initial schedule failed: {0}")]
    Schedule(#[from] AdvanceError),
}

/// Errors from a single `advance()` step.
#[derive(Clone, Debug, PartialEq, Error)]
pub enum AdvanceError {
    /// The total rate is zero: no further event is possible.
    ///
    /// Detected before any interval is sampled, so the clock never
    /// receives an infinite or NaN increment.
    #[error("total rate is zero; no further event is possible")]
    Degenerate,
    /// The event queue yielded an event scheduled before the current
    /// clock. This is a rescheduling defect, not a simulation outcome.
    #[error("event for process {proc} popped at {popped}, before clock {clock}")]
    QueueInvariant {
        /// The process whose event was out of order.
        proc: ProcId,
        /// The popped event time.
        popped: Time,
        /// The clock at the time of the pop.
        clock: Time,
    },
    /// A process id does not belong to the structure it was used with.
    #[error("process {proc} out of range for {count} processes")]
    UnknownProcess {
        /// The out-of-range id.
        proc: ProcId,
        /// Number of processes tracked.
        count: usize,
    },
    /// A computed rate or time was invalid.
    #[error(transparent)]
    InvalidValue(#[from] ValueError),
}

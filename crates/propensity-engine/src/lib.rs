//! Stochastic simulation algorithms and the driver that runs them.
//!
//! Three interchangeable implementations of [`StochAlgo`] share one
//! `advance()` contract and one probability law:
//!
//! - [`DirectAlgo`]: Gillespie's Direct method, O(n) per step.
//! - [`NextReactionAlgo`]: Gibson–Bruck Next Reaction method over an
//!   indexed event queue, O(log n) per step.
//! - [`ReferenceAlgo`]: a deliberately plain Direct method used as a
//!   correctness oracle.
//!
//! [`Simulation`] wraps a boxed algorithm chosen by [`SimConfig`] and
//! runs it until a step budget, a time bound, or exhaustion.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod algo;
pub mod config;
pub mod direct;
pub mod error;
pub mod metrics;
pub mod next_reaction;
pub mod reference;
pub mod simulation;

pub use algo::{build_algorithm, AlgorithmKind, SimRng, StochAlgo};
pub use config::{ConfigError, SelectionKind, SimConfig, StopCondition};
pub use direct::DirectAlgo;
pub use error::SimError;
pub use metrics::RunMetrics;
pub use next_reaction::{NextReactionAlgo, ReschedulePolicy};
pub use reference::ReferenceAlgo;
pub use simulation::{RunReport, Simulation, StopReason};

//! Propensity: a discrete-event stochastic simulation engine.
//!
//! This is the top-level facade crate that re-exports the public API from
//! all Propensity sub-crates. For most users, adding `propensity` as a
//! single dependency is sufficient.
//!
//! # Quick start
//!
//! ```rust
//! use propensity::prelude::*;
//!
//! // A population of atoms, each decaying at rate 0.5.
//! struct Atoms {
//!     count: u64,
//! }
//!
//! impl Process for Atoms {
//!     fn rate(&self) -> Rate {
//!         Rate::new(0.5 * self.count as f64).unwrap()
//!     }
//!     fn fire(&mut self, _time: Time) {
//!         self.count -= 1;
//!     }
//! }
//!
//! struct Sample {
//!     isotopes: Vec<Atoms>,
//!     clock: Time,
//! }
//!
//! impl System for Sample {
//!     type Proc = Atoms;
//!     fn process_count(&self) -> usize { self.isotopes.len() }
//!     fn process(&self, id: ProcId) -> &Atoms { &self.isotopes[id.index()] }
//!     fn process_mut(&mut self, id: ProcId) -> &mut Atoms { &mut self.isotopes[id.index()] }
//!     fn last_event_time(&self) -> Time { self.clock }
//!     fn set_last_event_time(&mut self, time: Time) { self.clock = time; }
//! }
//!
//! let sample = Sample {
//!     isotopes: vec![Atoms { count: 100 }, Atoms { count: 50 }],
//!     clock: Time::ZERO,
//! };
//! let config = SimConfig {
//!     algorithm: AlgorithmKind::NextReaction,
//!     seed: 7,
//!     stop: StopCondition::steps(1_000),
//!     ..SimConfig::default()
//! };
//! let mut sim = Simulation::new(config, sample).unwrap();
//! let report = sim.run().unwrap();
//! assert_eq!(report.stop_reason, StopReason::Exhausted);
//! assert_eq!(report.metrics.steps, 150);
//! ```
//!
//! # Modules
//!
//! Each module corresponds to a sub-crate. Use them for types not in the prelude:
//!
//! | Module | Sub-crate | Contents |
//! |--------|-----------|----------|
//! | [`types`] | `propensity-core` | `Rate`, `Time`, `ProcId`, `Process`/`System` traits, errors |
//! | [`select`] | `propensity-select` | `Event`, `PriorityList`, `ProcStack`, `EventQueue` |
//! | [`engine`] | `propensity-engine` | Direct, Next Reaction and reference algorithms, `Simulation` |
//! | [`replay`] | `propensity-replay` | Trajectory recording and determinism verification |

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

/// Core types, traits, and errors (`propensity-core`).
pub use propensity_core as types;

/// Events and selection structures (`propensity-select`).
///
/// [`select::PriorityList`] and [`select::ProcStack`] pick processes for
/// the Direct method; [`select::EventQueue`] orders putative firing times
/// for the Next Reaction method.
pub use propensity_select as select;

/// Simulation algorithms and the driver (`propensity-engine`).
///
/// [`engine::Simulation`] runs whichever [`engine::StochAlgo`] a
/// [`engine::SimConfig`] asks for.
pub use propensity_engine as engine;

/// Trajectory recording and replay verification (`propensity-replay`).
pub use propensity_replay as replay;

/// Common imports for typical Propensity usage.
///
/// ```rust
/// use propensity::prelude::*;
/// ```
pub mod prelude {
    // Core types and traits
    pub use propensity_core::{Process, ProcId, Rate, System, Time};

    // Errors
    pub use propensity_core::{AdvanceError, ConstructionError, ValueError};

    // Selection
    pub use propensity_select::{Event, ReorderPolicy, Selector};

    // Engine
    pub use propensity_engine::{
        AlgorithmKind, ReschedulePolicy, RunMetrics, RunReport, SelectionKind, SimConfig,
        SimError, Simulation, StochAlgo, StopCondition, StopReason,
    };

    // Replay
    pub use propensity_replay::Trajectory;
}

//! Deterministic replay verification for Propensity simulations.
//!
//! A seeded run is fully determined by its seed, its algorithm and its
//! initial system. This crate records the resulting event sequence and
//! checks that a second run reproduces it bit for bit.
//!
//! # Architecture
//!
//! - [`Trajectory`] records `(process, time)` events, usable directly as
//!   a `Simulation::run_with` observer
//! - [`trajectory_hash`] and [`system_hash`] give FNV-1a fingerprints
//! - [`compare_trajectories`] finds the first diverging event
//! - [`verify_replay`] streams a re-run against a recording

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod compare;
pub mod error;
pub mod hash;
pub mod trajectory;

pub use compare::{compare_trajectories, verify_replay, Divergence};
pub use error::ReplayError;
pub use hash::{system_hash, trajectory_hash};
pub use trajectory::Trajectory;

//! Core types and traits for the Propensity stochastic simulation engine.
//!
//! This is the leaf crate of the workspace. It defines the value types
//! every algorithm works in ([`Rate`], [`Time`], [`ProcId`]), the
//! [`Process`] and [`System`] capabilities supplied by domain models, and
//! the error taxonomy shared by selection structures and algorithms.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod error;
pub mod id;
pub mod rate;
pub mod traits;

pub use error::{AdvanceError, ConstructionError, ValueError};
pub use id::ProcId;
pub use rate::{Rate, Time};
pub use traits::{validate_system, Process, System};

//! Event records, weighted selection, and event scheduling.
//!
//! Two interchangeable [`Selector`] implementations pick the next process
//! with probability proportional to its rate:
//!
//! - [`PriorityList`]: fixed-order linear scan, no mutation.
//! - [`ProcStack`]: self-organizing scan order that moves frequently
//!   selected processes toward the front.
//!
//! [`EventQueue`] is an indexed min-heap of putative firing times used by
//! the Next-Reaction method.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod event;
pub mod event_queue;
pub mod priority_list;
pub mod proc_stack;
pub mod selector;

pub use event::Event;
pub use event_queue::EventQueue;
pub use priority_list::PriorityList;
pub use proc_stack::{ProcStack, ReorderPolicy};
pub use selector::Selector;

//! Strongly-typed process identifiers.

use std::fmt;

use crate::error::ConstructionError;

/// Identifies a process within its owning [`System`](crate::System).
///
/// `ProcId(n)` is the n-th process in the system's fixed, order-stable
/// process array. Selection structures and the event queue index their
/// per-process bookkeeping by this value instead of holding references
/// into the system.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ProcId(pub u32);

impl ProcId {
    /// The position of this process in its system's process array.
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }

    /// Convert an array index into a `ProcId`.
    ///
    /// # Errors
    ///
    /// Returns [`ConstructionError::TooManyProcesses`] if `index` does not
    /// fit in a `u32`.
    pub fn try_from_index(index: usize) -> Result<Self, ConstructionError> {
        u32::try_from(index)
            .map(Self)
            .map_err(|_| ConstructionError::TooManyProcesses { count: index })
    }

    /// Iterate `ProcId(0)..ProcId(count)` in insertion order.
    ///
    /// `count` is expected to have passed [`validate_system`](crate::validate_system),
    /// which guarantees it fits in a `u32`.
    pub fn range(count: usize) -> impl DoubleEndedIterator<Item = ProcId> + ExactSizeIterator {
        (0..count as u32).map(ProcId)
    }
}

impl fmt::Display for ProcId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u32> for ProcId {
    fn from(v: u32) -> Self {
        Self(v)
    }
}

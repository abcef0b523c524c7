//! Trajectory comparison and replay verification.
//!
//! Hash-first comparison with an event-by-event fallback that pinpoints
//! the first divergence, plus a streaming verifier that drives a fresh
//! run against a recording without storing the second trajectory.

use std::fmt;

use propensity_core::AdvanceError;
use propensity_select::Event;

use crate::error::ReplayError;
use crate::trajectory::Trajectory;

/// The first point at which two event sequences disagree.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Divergence {
    /// Zero-based index of the first differing event.
    pub step: usize,
    /// The recorded event, or `None` if the recording ended first.
    pub recorded: Option<Event>,
    /// The replayed event, or `None` if the replay ended first.
    pub replayed: Option<Event>,
}

impl fmt::Display for Divergence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "step {}: recorded ", self.step)?;
        match &self.recorded {
            Some(e) => write!(f, "{e}")?,
            None => f.write_str("end")?,
        }
        f.write_str(", replayed ")?;
        match &self.replayed {
            Some(e) => write!(f, "{e}"),
            None => f.write_str("end"),
        }
    }
}

/// Compare two trajectories event by event.
///
/// Fast path: equal lengths and equal hashes return `None` without a
/// scan. Otherwise returns the first index where the process or the
/// time bits differ, or where one trajectory ends early.
pub fn compare_trajectories(recorded: &Trajectory, replayed: &Trajectory) -> Option<Divergence> {
    if recorded.len() == replayed.len() && recorded.hash() == replayed.hash() {
        return None;
    }
    let a = recorded.events();
    let b = replayed.events();
    for step in 0..a.len().max(b.len()) {
        let (r, p) = (a.get(step).copied(), b.get(step).copied());
        if !same_event(r, p) {
            return Some(Divergence {
                step,
                recorded: r,
                replayed: p,
            });
        }
    }
    None
}

fn same_event(a: Option<Event>, b: Option<Event>) -> bool {
    match (a, b) {
        (Some(a), Some(b)) => {
            a.proc == b.proc && a.time.value().to_bits() == b.time.value().to_bits()
        }
        (None, None) => true,
        _ => false,
    }
}

/// Re-run a recording one event at a time.
///
/// Calls `step` once per recorded event and checks each result against
/// the recording. Stops at the end of the recording even if `step` could
/// produce more events.
///
/// # Errors
///
/// Returns [`ReplayError::Diverged`] at the first mismatch, or
/// [`ReplayError::Advance`] if `step` fails before the recording ends.
pub fn verify_replay<F>(recorded: &Trajectory, mut step: F) -> Result<(), ReplayError>
where
    F: FnMut() -> Result<Event, AdvanceError>,
{
    for (index, &expected) in recorded.events().iter().enumerate() {
        let actual = step().map_err(|source| ReplayError::Advance {
            step: index,
            source,
        })?;
        if !same_event(Some(expected), Some(actual)) {
            return Err(ReplayError::Diverged(Divergence {
                step: index,
                recorded: Some(expected),
                replayed: Some(actual),
            }));
        }
    }
    Ok(())
}

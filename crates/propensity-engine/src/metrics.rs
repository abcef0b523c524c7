//! Per-run metrics for the simulation driver.

/// Counters and timings gathered over one
/// [`Simulation::run`](crate::Simulation::run) call.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RunMetrics {
    /// Events fired during this run.
    pub steps: u64,
    /// Simulated time covered during this run.
    pub elapsed: f64,
    /// Wall-clock duration of the run, in microseconds.
    pub wall_us: u64,
}

impl RunMetrics {
    /// Events fired per wall-clock second (0.0 for an instantaneous run).
    pub fn steps_per_second(&self) -> f64 {
        if self.wall_us == 0 {
            return 0.0;
        }
        self.steps as f64 * 1e6 / self.wall_us as f64
    }
}

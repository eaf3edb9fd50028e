//! Per-step performance metrics for the simulation engine.
//!
//! [`StepMetrics`] captures timing data for a single
//! [`update()`](crate::Simulation::update), for profiling and for
//! frontends that display step throughput.

/// Timing data collected during a single step.
///
/// All durations are in microseconds. The engine fills these in at the
/// end of each `update()`; the most recent value is also available from
/// [`Simulation::last_metrics()`](crate::Simulation::last_metrics).
#[derive(Clone, Debug, Default, PartialEq)]
pub struct StepMetrics {
    /// Wall-clock time for the entire step, in microseconds.
    pub total_us: u64,
    /// Time spent in the parallel band update, including fan-out and
    /// reassembly, in microseconds.
    pub band_us: u64,
    /// Time spent in the long-distance transmission pass, in microseconds.
    /// Zero on steps where no attempt was due.
    pub air_travel_us: u64,
    /// Time spent recomputing aggregates and appending the telemetry
    /// record, in microseconds.
    pub telemetry_us: u64,
    /// Number of bands the grid was split into.
    pub band_count: usize,
    /// Whether a long-distance transfer happened this step.
    pub air_travel_fired: bool,
}

//! Per-step timing for the model.
//!
//! [`StepMetrics`] captures where the time of a single step went, for
//! profiling and benchmark reporting.

/// Timing collected during a single step.
///
/// All durations are in microseconds. The model fills these in after each
/// successful `step()`; a rejected step leaves the previous values.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct StepMetrics {
    /// Wall-clock time for the entire step.
    pub total_us: u64,
    /// Copying state and tracers and filling their halos.
    pub boundary_us: u64,
    /// Dynamics tendency assembly.
    pub dynamics_us: u64,
    /// Auxiliary right-hand side plus all forcings.
    pub forcing_us: u64,
    /// Per-tracer tendency times: `(name, microseconds)`.
    pub tracer_us: Vec<(String, u64)>,
    /// Integrator advance and commit of all fields.
    pub commit_us: u64,
}

//! The frozen per-step snapshot and the read-only view handed to
//! user callables.

use indexmap::IndexMap;
use ndarray::{Array2, ArrayView2};
use shallows_core::StepCount;
use shallows_grid::{interior, ArakawaCGrid};

use crate::boundary::Boundary;
use crate::config::ModelConfig;
use crate::state::State;
use crate::tracer::Tracer;

/// Boundary-consistent copies of the state and every tracer.
///
/// Built at the start of a step and never mutated afterwards. Tracer
/// fields are stored in registration order.
#[derive(Clone, Debug)]
pub(crate) struct Snapshot {
    pub(crate) state: State,
    pub(crate) tracers: Vec<Array2<f64>>,
}

impl Snapshot {
    pub(crate) fn capture(
        state: &State,
        tracers: &IndexMap<String, Tracer>,
        boundary: Boundary,
    ) -> Self {
        let mut state = state.clone();
        boundary.apply_to_state(&mut state);
        let tracers = tracers
            .values()
            .map(|t| {
                let mut field = t.field().clone();
                boundary.apply_to_scalar(&mut field);
                field
            })
            .collect();
        Self { state, tracers }
    }
}

/// Read-only access to the model as it stood at the start of a step.
///
/// Forcings, the auxiliary right-hand side and tracer sources receive
/// one of these. Every accessor reads the boundary-consistent snapshot,
/// so all callables in a step observe exactly the same values
/// regardless of evaluation order.
#[derive(Clone, Copy)]
pub struct ModelView<'a> {
    grid: &'a ArakawaCGrid,
    config: &'a ModelConfig,
    time: f64,
    step: StepCount,
    snapshot: &'a Snapshot,
    index: &'a IndexMap<String, Tracer>,
}

impl<'a> ModelView<'a> {
    pub(crate) fn new(
        grid: &'a ArakawaCGrid,
        config: &'a ModelConfig,
        time: f64,
        step: StepCount,
        snapshot: &'a Snapshot,
        index: &'a IndexMap<String, Tracer>,
    ) -> Self {
        Self {
            grid,
            config,
            time,
            step,
            snapshot,
            index,
        }
    }

    /// The model grid.
    pub fn grid(&self) -> &'a ArakawaCGrid {
        self.grid
    }

    /// The model configuration.
    pub fn config(&self) -> &'a ModelConfig {
        self.config
    }

    /// Simulation time at the start of the step, seconds.
    pub fn time(&self) -> f64 {
        self.time
    }

    /// Steps completed before this one.
    pub fn step_count(&self) -> StepCount {
        self.step
    }

    /// The full padded state snapshot.
    pub fn state(&self) -> &'a State {
        &self.snapshot.state
    }

    /// Interior x-velocity.
    pub fn u(&self) -> ArrayView2<'a, f64> {
        self.snapshot.state.u()
    }

    /// Interior y-velocity.
    pub fn v(&self) -> ArrayView2<'a, f64> {
        self.snapshot.state.v()
    }

    /// Interior height field.
    pub fn phi(&self) -> ArrayView2<'a, f64> {
        self.snapshot.state.phi()
    }

    /// Interior of the named tracer, or `None` if no such tracer exists.
    pub fn tracer(&self, name: &str) -> Option<ArrayView2<'a, f64>> {
        let i = self.index.get_index_of(name)?;
        self.snapshot.tracers.get(i).map(interior)
    }

    /// Registered tracer names, in registration order.
    pub fn tracer_names(&self) -> impl Iterator<Item = &'a str> + 'a {
        self.index.keys().map(String::as_str)
    }
}

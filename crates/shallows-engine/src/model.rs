//! The step orchestrator: [`Model`].
//!
//! A step runs in two phases. The evaluation phase copies the state and
//! every tracer, fills the copies' halos, and computes all tendencies from
//! that snapshot; it may fail, and when it does nothing has been touched.
//! The commit phase advances every integrator, adds the increments to the
//! snapshot copies, swaps them in, and advances the clock. It cannot fail.

use std::fmt;
use std::time::Instant;

use indexmap::IndexMap;
use ndarray::{Array2, ArrayView2, ArrayViewMut2};
use shallows_core::{RegistrationError, StepCount, StepError, TendencySource};
use shallows_grid::{interior, interior_mut, ArakawaCGrid};
use shallows_integrate::AdamsBashforth3;

use crate::boundary::Boundary;
use crate::config::{ConfigError, Dynamics, ModelConfig};
use crate::dynamics::DynamicsEngine;
use crate::forcing::{self, ForcingFn, ForcingRegistry};
use crate::metrics::StepMetrics;
use crate::state::{State, Tendency};
use crate::tracer::{Tracer, TracerSpec};
use crate::view::{ModelView, Snapshot};

// Compile-time assertion: Model is Send. Callables are boxed as
// `dyn Fn + Send`, so a model can be built on one thread and stepped
// on another. Fails to compile if any field is !Send.
const _: () = {
    #[allow(dead_code)]
    fn assert_send<T: Send>() {}
    #[allow(dead_code)]
    fn check() {
        assert_send::<Model>();
    }
};

// ── Clock ──────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, Default)]
struct Clock {
    time: f64,
    step: StepCount,
}

impl Clock {
    fn advance(&mut self, dt: f64) {
        self.time += dt;
        self.step = self.step.next();
    }
}

// ── Model ──────────────────────────────────────────────────────────

/// A rotating shallow-water model with tracers and forcing.
///
/// Owns the state, tracers, forcings, integrators and clock. Every
/// mutation goes through `&mut self`, so steps are strictly sequential.
///
/// # Examples
///
/// ```
/// use shallows_engine::{Model, ModelConfig};
///
/// let mut model = Model::new(ModelConfig::linear(16, 14)).unwrap();
/// model.phi_mut()[[8, 7]] = 1.0;
/// model.step_n(3).unwrap();
/// assert_eq!(model.step_count().0, 3);
/// assert_eq!(model.time(), 3000.0);
/// ```
pub struct Model {
    config: ModelConfig,
    grid: ArakawaCGrid,
    dynamics: DynamicsEngine,
    boundary: Boundary,
    state: State,
    integrator: AdamsBashforth3<Tendency>,
    tracers: IndexMap<String, Tracer>,
    forcings: ForcingRegistry,
    auxiliary: Option<ForcingFn>,
    clock: Clock,
    last_metrics: StepMetrics,
}

impl Model {
    /// Validate `config` and build a model at rest.
    ///
    /// For the linear equations a warning is logged when the gravity-wave
    /// Courant number `sqrt(g H) dt / min(dx, dy)` exceeds one.
    pub fn new(config: ModelConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let grid = config.grid()?;
        let dynamics = DynamicsEngine::new(&config, &grid);

        if let Dynamics::Linear(p) = config.dynamics {
            let courant = (p.gravity * p.mean_depth).sqrt() * config.dt / grid.dx().min(grid.dy());
            if courant > 1.0 {
                tracing::warn!(
                    courant,
                    dt = config.dt,
                    "gravity-wave Courant number exceeds 1, expect instability"
                );
            }
        }

        tracing::info!(
            nx = config.nx,
            ny = config.ny,
            dynamics = config.dynamics.name(),
            boundary = config.boundary.name(),
            dt = config.dt,
            sponge_rows = dynamics.sponge().width(),
            "shallow-water model constructed"
        );

        Ok(Self {
            boundary: config.boundary,
            state: State::zeros(&grid),
            integrator: AdamsBashforth3::new(config.dt),
            tracers: IndexMap::new(),
            forcings: ForcingRegistry::new(),
            auxiliary: None,
            clock: Clock::default(),
            last_metrics: StepMetrics::default(),
            dynamics,
            grid,
            config,
        })
    }

    // ── Registration ───────────────────────────────────────────────

    /// Append a forcing. It is summed into the state tendency every step,
    /// after the dynamics and the auxiliary right-hand side, in
    /// registration order.
    ///
    /// The callable is evaluated once against the current state to check
    /// its output shape; on mismatch it is not registered.
    pub fn register_forcing<F>(&mut self, f: F) -> Result<(), RegistrationError>
    where
        F: Fn(&ModelView<'_>) -> Tendency + Send + 'static,
    {
        let f: ForcingFn = Box::new(f);
        let index = self.forcings.len();
        self.probe(&f, TendencySource::Forcing { index })?;
        self.forcings.push(f);
        tracing::debug!(index, "forcing registered");
        Ok(())
    }

    /// Install the auxiliary right-hand side, replacing any previous one.
    ///
    /// Probed like [`register_forcing`](Self::register_forcing).
    pub fn set_auxiliary_rhs<F>(&mut self, f: F) -> Result<(), RegistrationError>
    where
        F: Fn(&ModelView<'_>) -> Tendency + Send + 'static,
    {
        let f: ForcingFn = Box::new(f);
        self.probe(&f, TendencySource::AuxiliaryRhs)?;
        let replaced = self.auxiliary.replace(f).is_some();
        tracing::debug!(replaced, "auxiliary rhs installed");
        Ok(())
    }

    /// Register a tracer.
    ///
    /// Rejects a name already in use, initial values or a constant source
    /// not shaped `(nx, ny)`, and a source function whose probe output is
    /// not shaped `(nx, ny)`. A rejected tracer leaves the model unchanged.
    pub fn register_tracer(&mut self, spec: TracerSpec) -> Result<(), RegistrationError> {
        if self.tracers.contains_key(spec.name()) {
            return Err(RegistrationError::DuplicateName {
                name: spec.name().to_string(),
            });
        }
        let (name, tracer) = spec.build(&self.grid, self.config.dt)?;
        self.tracers.insert(name, tracer);

        let probed = match self.tracers.last() {
            Some((name, tracer)) => {
                let snapshot = self.snapshot();
                let view = self.view(&snapshot);
                tracer.probe_source(name, &view)
            }
            None => Ok(()),
        };
        if let Err(e) = probed {
            self.tracers.pop();
            return Err(into_registration_error(e));
        }

        tracing::debug!(count = self.tracers.len(), "tracer registered");
        Ok(())
    }

    fn probe(&self, f: &ForcingFn, origin: TendencySource) -> Result<(), RegistrationError> {
        let snapshot = self.snapshot();
        let view = self.view(&snapshot);
        forcing::evaluate(f, &view, origin)
            .map(drop)
            .map_err(into_registration_error)
    }

    // ── Stepping ───────────────────────────────────────────────────

    /// Advance the model by one time step.
    ///
    /// On error nothing is committed: state, tracers, integrator
    /// histories, clock and metrics are as they were before the call.
    pub fn step(&mut self) -> Result<(), StepError> {
        let step_start = Instant::now();
        let mut metrics = StepMetrics::default();

        let start = Instant::now();
        let snapshot = self.snapshot();
        metrics.boundary_us = start.elapsed().as_micros() as u64;

        let (state_rhs, tracer_rhs) = match self.evaluate(&snapshot, &mut metrics) {
            Ok(rhs) => rhs,
            Err(e) => {
                tracing::debug!(step = %self.clock.step, error = %e, "step rejected");
                return Err(e);
            }
        };

        let start = Instant::now();
        let Snapshot {
            mut state,
            tracers: fields,
        } = snapshot;
        let increment = self.integrator.advance(state_rhs);
        state.apply_increment(&increment);
        self.state = state;
        for ((tracer, mut field), rhs) in self.tracers.values_mut().zip(fields).zip(tracer_rhs) {
            let increment = tracer.integrator.advance(rhs);
            interior_mut(&mut field).zip_mut_with(&increment, |q, d| *q += d);
            tracer.field = field;
        }
        metrics.commit_us = start.elapsed().as_micros() as u64;

        self.clock.advance(self.config.dt);
        metrics.total_us = step_start.elapsed().as_micros() as u64;
        tracing::trace!(
            step = %self.clock.step,
            time = self.clock.time,
            order = self.integrator.order(),
            total_us = metrics.total_us,
            "step committed"
        );
        self.last_metrics = metrics;
        Ok(())
    }

    /// Run `n` steps, stopping at the first error.
    pub fn step_n(&mut self, n: u64) -> Result<(), StepError> {
        for _ in 0..n {
            self.step()?;
        }
        Ok(())
    }

    /// The state tendency the next step would use, without committing
    /// anything. Tracer tendencies are not evaluated.
    pub fn tendency(&self) -> Result<Tendency, StepError> {
        let snapshot = self.snapshot();
        let view = self.view(&snapshot);
        self.state_tendency(&view, &snapshot, &mut StepMetrics::default())
    }

    fn snapshot(&self) -> Snapshot {
        Snapshot::capture(&self.state, &self.tracers, self.boundary)
    }

    fn view<'a>(&'a self, snapshot: &'a Snapshot) -> ModelView<'a> {
        ModelView::new(
            &self.grid,
            &self.config,
            self.clock.time,
            self.clock.step,
            snapshot,
            &self.tracers,
        )
    }

    /// Everything fallible about a step.
    fn evaluate(
        &self,
        snapshot: &Snapshot,
        metrics: &mut StepMetrics,
    ) -> Result<(Tendency, Vec<Array2<f64>>), StepError> {
        let view = self.view(snapshot);
        let state_rhs = self.state_tendency(&view, snapshot, metrics)?;

        let mut tracer_rhs = Vec::with_capacity(self.tracers.len());
        for ((name, tracer), q) in self.tracers.iter().zip(&snapshot.tracers) {
            let start = Instant::now();
            tracer_rhs.push(tracer.tendency(name, q, &view, self.dynamics.sponge())?);
            metrics
                .tracer_us
                .push((name.clone(), start.elapsed().as_micros() as u64));
        }
        Ok((state_rhs, tracer_rhs))
    }

    fn state_tendency(
        &self,
        view: &ModelView<'_>,
        snapshot: &Snapshot,
        metrics: &mut StepMetrics,
    ) -> Result<Tendency, StepError> {
        let start = Instant::now();
        let mut total = self.dynamics.tendency(&self.grid, &snapshot.state);
        metrics.dynamics_us = start.elapsed().as_micros() as u64;

        let start = Instant::now();
        if let Some(f) = &self.auxiliary {
            total += &forcing::evaluate(f, view, TendencySource::AuxiliaryRhs)?;
        }
        self.forcings.accumulate(view, &mut total)?;
        metrics.forcing_us = start.elapsed().as_micros() as u64;
        Ok(total)
    }

    // ── Accessors ──────────────────────────────────────────────────

    /// Simulation time, seconds.
    pub fn time(&self) -> f64 {
        self.clock.time
    }

    /// Steps completed.
    pub fn step_count(&self) -> StepCount {
        self.clock.step
    }

    /// Interior x-velocity.
    pub fn u(&self) -> ArrayView2<'_, f64> {
        self.state.u()
    }

    /// Interior y-velocity.
    pub fn v(&self) -> ArrayView2<'_, f64> {
        self.state.v()
    }

    /// Interior height field.
    pub fn phi(&self) -> ArrayView2<'_, f64> {
        self.state.phi()
    }

    /// Mutable interior x-velocity, for initial conditions.
    pub fn u_mut(&mut self) -> ArrayViewMut2<'_, f64> {
        self.state.u_mut()
    }

    /// Mutable interior y-velocity, for initial conditions.
    pub fn v_mut(&mut self) -> ArrayViewMut2<'_, f64> {
        self.state.v_mut()
    }

    /// Mutable interior height field, for initial conditions.
    pub fn phi_mut(&mut self) -> ArrayViewMut2<'_, f64> {
        self.state.phi_mut()
    }

    /// The full padded state as last committed.
    pub fn state(&self) -> &State {
        &self.state
    }

    /// Interior of the named tracer, or `None` if it was never registered.
    pub fn read_tracer(&self, name: &str) -> Option<ArrayView2<'_, f64>> {
        self.tracers.get(name).map(|t| interior(t.field()))
    }

    /// Registered tracer names, in registration order.
    pub fn tracer_names(&self) -> impl Iterator<Item = &str> {
        self.tracers.keys().map(String::as_str)
    }

    /// Number of registered forcings.
    pub fn forcing_count(&self) -> usize {
        self.forcings.len()
    }

    /// The model grid.
    pub fn grid(&self) -> &ArakawaCGrid {
        &self.grid
    }

    /// The validated configuration.
    pub fn config(&self) -> &ModelConfig {
        &self.config
    }

    /// The dynamics engine, for its Coriolis arrays and sponge.
    pub fn dynamics(&self) -> &DynamicsEngine {
        &self.dynamics
    }

    /// Metrics from the most recent successful step.
    pub fn last_metrics(&self) -> &StepMetrics {
        &self.last_metrics
    }
}

impl fmt::Debug for Model {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Model")
            .field("nx", &self.config.nx)
            .field("ny", &self.config.ny)
            .field("dynamics", &self.config.dynamics.name())
            .field("boundary", &self.boundary)
            .field("time", &self.clock.time)
            .field("step", &self.clock.step)
            .field("tracers", &self.tracers.keys().collect::<Vec<_>>())
            .field("forcings", &self.forcings.len())
            .finish()
    }
}

fn into_registration_error(e: StepError) -> RegistrationError {
    match e {
        StepError::ShapeMismatch { mismatch, .. } => RegistrationError::ShapeMismatch(mismatch),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shallows_core::Staggering;

    fn quiet_linear() -> ModelConfig {
        let mut cfg = ModelConfig::linear(8, 9);
        cfg.nu = 0.0;
        cfg.r = 0.0;
        cfg
    }

    #[test]
    fn new_model_is_at_rest() {
        let model = Model::new(ModelConfig::nonlinear(8, 9)).unwrap();
        assert_eq!(model.time(), 0.0);
        assert_eq!(model.step_count(), StepCount(0));
        assert!(model.phi().iter().all(|&x| x == 0.0));
        assert_eq!(model.u().dim(), (9, 9));
        assert_eq!(model.tracer_names().count(), 0);
    }

    #[test]
    fn invalid_config_is_rejected() {
        assert!(matches!(
            Model::new(ModelConfig::linear(8, 3)),
            Err(ConfigError::SpongeTooNarrow { ny: 3 })
        ));
    }

    #[test]
    fn step_advances_clock_and_integrator_order() {
        let mut model = Model::new(quiet_linear()).unwrap();
        model.phi_mut()[[4, 4]] = 1.0;
        model.step().unwrap();
        assert_eq!(model.integrator.order(), 1);
        model.step_n(4).unwrap();
        assert_eq!(model.integrator.order(), 3);
        assert_eq!(model.step_count(), StepCount(5));
        assert_eq!(model.time(), 5000.0);
    }

    #[test]
    fn metrics_name_each_tracer() {
        let mut model = Model::new(quiet_linear()).unwrap();
        model
            .register_tracer(TracerSpec::new("a", Array2::zeros((8, 9))))
            .unwrap();
        model
            .register_tracer(TracerSpec::new("b", Array2::zeros((8, 9))))
            .unwrap();
        model.step().unwrap();
        let names: Vec<_> = model
            .last_metrics()
            .tracer_us
            .iter()
            .map(|(n, _)| n.as_str())
            .collect();
        assert_eq!(names, ["a", "b"]);
    }

    #[test]
    fn rejected_forcing_registration_keeps_registry_empty() {
        let mut model = Model::new(quiet_linear()).unwrap();
        let err = model
            .register_forcing(|view| {
                let mut t = Tendency::zeros(view.grid());
                t.phi = Array2::zeros((1, 1));
                t
            })
            .unwrap_err();
        assert!(matches!(err, RegistrationError::ShapeMismatch(ref m) if m.what.contains("(phi)")));
        assert_eq!(model.forcing_count(), 0);
    }

    #[test]
    fn auxiliary_rhs_is_replaced_not_stacked() {
        let mut model = Model::new(quiet_linear()).unwrap();
        model
            .set_auxiliary_rhs(|view| {
                let mut t = Tendency::zeros(view.grid());
                t.phi.fill(1.0);
                t
            })
            .unwrap();
        model
            .set_auxiliary_rhs(|view| {
                let mut t = Tendency::zeros(view.grid());
                t.phi.fill(2.0);
                t
            })
            .unwrap();
        let t = model.tendency().unwrap();
        assert!(t.phi.iter().all(|&x| x == 2.0));
        assert_eq!(t.phi.dim(), model.grid().interior_shape(Staggering::Phi));
    }

    #[test]
    fn tracer_probe_sees_itself() {
        let mut model = Model::new(quiet_linear()).unwrap();
        model
            .register_tracer(
                TracerSpec::new("q", Array2::from_elem((8, 9), 2.0))
                    .source_fn(|view| view.tracer("q").map(|q| q.to_owned()).unwrap_or_default()),
            )
            .unwrap();
        assert_eq!(model.tracer_names().collect::<Vec<_>>(), ["q"]);
    }
}

//! Passive tracers advected by the flow.
//!
//! A tracer `q` lives at height points and obeys
//!
//! ```text
//! ∂q/∂t + ∇·(u q) = kappa ∆q - sponge(q) + S
//! ```
//!
//! where the diffusion and sponge terms are optional per tracer and `S`
//! is an optional source: a fixed array or a function of the step
//! snapshot. Each tracer carries its own Adams-Bashforth history so it
//! advances in lockstep with, but independently of, the state.

use std::fmt;

use ndarray::{s, Array2, ArrayView2};
use shallows_core::{RegistrationError, ShapeMismatch, Staggering, StepError, TendencySource};
use shallows_grid::{average_x, average_y, interior, ArakawaCGrid};
use shallows_integrate::AdamsBashforth3;

use crate::sponge::Sponge;
use crate::view::ModelView;

/// Boxed tracer source callable.
pub type SourceFn = Box<dyn Fn(&ModelView<'_>) -> Array2<f64> + Send>;

/// The `S` term of a tracer equation.
#[derive(Default)]
pub enum TracerSource {
    /// No source.
    #[default]
    None,
    /// A fixed rate at every height point, shape `(nx, ny)`.
    Constant(Array2<f64>),
    /// Evaluated every step against the snapshot; must return `(nx, ny)`.
    Function(SourceFn),
}

impl fmt::Debug for TracerSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::None => write!(f, "None"),
            Self::Constant(a) => write!(f, "Constant({:?})", a.dim()),
            Self::Function(_) => write!(f, "Function(..)"),
        }
    }
}

/// Everything needed to register a tracer.
///
/// Diffusivity defaults to zero and sponge damping to on.
///
/// ```
/// use ndarray::Array2;
/// use shallows_engine::TracerSpec;
///
/// let spec = TracerSpec::new("dye", Array2::zeros((16, 14)))
///     .diffusivity(1.0e3)
///     .damped(false)
///     .source_fn(|view| view.phi().mapv(|p| -1.0e-6 * (p - 10.0)));
/// assert_eq!(spec.name(), "dye");
/// ```
#[derive(Debug)]
pub struct TracerSpec {
    name: String,
    initial: Array2<f64>,
    source: TracerSource,
    diffusivity: f64,
    damped: bool,
}

impl TracerSpec {
    /// A tracer named `name` with interior values `initial`, shape `(nx, ny)`.
    pub fn new(name: impl Into<String>, initial: Array2<f64>) -> Self {
        Self {
            name: name.into(),
            initial,
            source: TracerSource::None,
            diffusivity: 0.0,
            damped: true,
        }
    }

    /// Add a fixed source term.
    pub fn constant_source(mut self, rate: Array2<f64>) -> Self {
        self.source = TracerSource::Constant(rate);
        self
    }

    /// Add a source term computed from the step snapshot.
    pub fn source_fn<F>(mut self, f: F) -> Self
    where
        F: Fn(&ModelView<'_>) -> Array2<f64> + Send + 'static,
    {
        self.source = TracerSource::Function(Box::new(f));
        self
    }

    /// Set the diffusion coefficient `kappa`.
    pub fn diffusivity(mut self, kappa: f64) -> Self {
        self.diffusivity = kappa;
        self
    }

    /// Enable or disable sponge damping of this tracer.
    pub fn damped(mut self, on: bool) -> Self {
        self.damped = on;
        self
    }

    /// The tracer name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Check shapes and build the live tracer.
    pub(crate) fn build(
        self,
        grid: &ArakawaCGrid,
        dt: f64,
    ) -> Result<(String, Tracer), RegistrationError> {
        let shape = grid.interior_shape(Staggering::Phi);
        ShapeMismatch::check(
            format!("tracer '{}' initial values", self.name),
            shape,
            self.initial.dim(),
        )?;
        if let TracerSource::Constant(rate) = &self.source {
            ShapeMismatch::check(
                format!("tracer '{}' constant source", self.name),
                shape,
                rate.dim(),
            )?;
        }

        let mut field = grid.zeros(Staggering::Phi);
        field.slice_mut(s![1..-1, 1..-1]).assign(&self.initial);
        let tracer = Tracer {
            field,
            integrator: AdamsBashforth3::new(dt),
            source: self.source,
            diffusivity: self.diffusivity,
            damped: self.damped,
        };
        Ok((self.name, tracer))
    }
}

/// A registered tracer: padded field, private integrator, and terms.
#[derive(Debug)]
pub(crate) struct Tracer {
    pub(crate) field: Array2<f64>,
    pub(crate) integrator: AdamsBashforth3<Array2<f64>>,
    source: TracerSource,
    diffusivity: f64,
    damped: bool,
}

impl Tracer {
    pub(crate) fn field(&self) -> &Array2<f64> {
        &self.field
    }

    /// Evaluate only the user source, if it is a function.
    pub(crate) fn probe_source(&self, name: &str, view: &ModelView<'_>) -> Result<(), StepError> {
        if let TracerSource::Function(f) = &self.source {
            checked_source(name, view, f(view))?;
        }
        Ok(())
    }

    /// Full right-hand side for the boundary-consistent field `q`.
    pub(crate) fn tendency(
        &self,
        name: &str,
        q: &Array2<f64>,
        view: &ModelView<'_>,
        sponge: &Sponge,
    ) -> Result<Array2<f64>, StepError> {
        let grid = view.grid();
        let mut rhs = advection(grid, q.view(), view.u(), view.v());
        if self.diffusivity != 0.0 {
            rhs.scaled_add(self.diffusivity, &grid.laplacian(q.view()));
        }
        if self.damped {
            rhs -= &sponge.damp(interior(q));
        }
        match &self.source {
            TracerSource::None => {}
            TracerSource::Constant(rate) => rhs += rate,
            TracerSource::Function(f) => rhs += &checked_source(name, view, f(view))?,
        }
        Ok(rhs)
    }
}

fn checked_source(
    name: &str,
    view: &ModelView<'_>,
    value: Array2<f64>,
) -> Result<Array2<f64>, StepError> {
    let expected = view.grid().interior_shape(Staggering::Phi);
    match ShapeMismatch::check(format!("tracer '{name}' source"), expected, value.dim()) {
        Ok(()) => Ok(value),
        Err(mismatch) => Err(StepError::ShapeMismatch {
            origin: TendencySource::Tracer {
                name: name.to_string(),
            },
            mismatch,
        }),
    }
}

/// `-∇·(u q)` at height points.
///
/// `q` is a padded, boundary-consistent scalar; `u` and `v` are interior
/// velocities. Both directional fluxes are summed before negation, so
/// on a periodic domain the domain sum of the result telescopes to zero.
pub fn advection(
    grid: &ArakawaCGrid,
    q: ArrayView2<'_, f64>,
    u: ArrayView2<'_, f64>,
    v: ArrayView2<'_, f64>,
) -> Array2<f64> {
    let q_at_u = average_x(q).slice_move(s![.., 1..-1]);
    let q_at_v = average_y(q).slice_move(s![1..-1, ..]);
    let flux_x = grid.diff_x((&q_at_u * &u).view());
    let flux_y = grid.diff_y((&q_at_v * &v).view());
    -(flux_x + flux_y)
}

//! Prognostic state and its tendency.

use std::ops::AddAssign;

use ndarray::{Array2, ArrayView2, ArrayViewMut2};
use shallows_core::{ShapeMismatch, Staggering};
use shallows_grid::{interior, interior_mut, ArakawaCGrid};
use shallows_integrate::StateVector;

/// The three co-evolving fields, stored with their halos.
#[derive(Clone, Debug, PartialEq)]
pub struct State {
    pub(crate) u: Array2<f64>,
    pub(crate) v: Array2<f64>,
    pub(crate) phi: Array2<f64>,
}

impl State {
    /// A state at rest with zero height.
    pub fn zeros(grid: &ArakawaCGrid) -> Self {
        Self {
            u: grid.zeros(Staggering::U),
            v: grid.zeros(Staggering::V),
            phi: grid.zeros(Staggering::Phi),
        }
    }

    /// Interior of the x-velocity, `(nx + 1, ny)`.
    pub fn u(&self) -> ArrayView2<'_, f64> {
        interior(&self.u)
    }

    /// Interior of the y-velocity, `(nx, ny + 1)`.
    pub fn v(&self) -> ArrayView2<'_, f64> {
        interior(&self.v)
    }

    /// Interior of the height field, `(nx, ny)`.
    pub fn phi(&self) -> ArrayView2<'_, f64> {
        interior(&self.phi)
    }

    /// Padded x-velocity, halo included.
    pub fn u_padded(&self) -> &Array2<f64> {
        &self.u
    }

    /// Padded y-velocity, halo included.
    pub fn v_padded(&self) -> &Array2<f64> {
        &self.v
    }

    /// Padded height field, halo included.
    pub fn phi_padded(&self) -> &Array2<f64> {
        &self.phi
    }

    pub(crate) fn u_mut(&mut self) -> ArrayViewMut2<'_, f64> {
        interior_mut(&mut self.u)
    }

    pub(crate) fn v_mut(&mut self) -> ArrayViewMut2<'_, f64> {
        interior_mut(&mut self.v)
    }

    pub(crate) fn phi_mut(&mut self) -> ArrayViewMut2<'_, f64> {
        interior_mut(&mut self.phi)
    }

    /// Add an interior-shaped increment to every field.
    pub(crate) fn apply_increment(&mut self, inc: &Tendency) {
        let mut u = interior_mut(&mut self.u);
        u += &inc.u;
        let mut v = interior_mut(&mut self.v);
        v += &inc.v;
        let mut phi = interior_mut(&mut self.phi);
        phi += &inc.phi;
    }
}

/// Time derivative of the state, one interior-shaped array per field.
///
/// Forcings and the auxiliary right-hand side return this type. Start from
/// [`Tendency::zeros`] and fill in the components that matter.
#[derive(Clone, Debug, PartialEq)]
pub struct Tendency {
    /// `∂u/∂t`, shape `(nx + 1, ny)`.
    pub u: Array2<f64>,
    /// `∂v/∂t`, shape `(nx, ny + 1)`.
    pub v: Array2<f64>,
    /// `∂phi/∂t`, shape `(nx, ny)`.
    pub phi: Array2<f64>,
}

impl Tendency {
    /// All-zero tendency sized for `grid`.
    pub fn zeros(grid: &ArakawaCGrid) -> Self {
        Self {
            u: Array2::zeros(grid.interior_shape(Staggering::U)),
            v: Array2::zeros(grid.interior_shape(Staggering::V)),
            phi: Array2::zeros(grid.interior_shape(Staggering::Phi)),
        }
    }

    /// Check every component against the interior shapes of `grid`.
    ///
    /// `what` prefixes the reported array name, e.g. `"forcing #2"`
    /// yields `"forcing #2 (v)"`.
    pub fn check_shape(&self, grid: &ArakawaCGrid, what: &str) -> Result<(), ShapeMismatch> {
        for (loc, field) in [
            (Staggering::U, &self.u),
            (Staggering::V, &self.v),
            (Staggering::Phi, &self.phi),
        ] {
            ShapeMismatch::check(
                format!("{what} ({loc})"),
                grid.interior_shape(loc),
                field.dim(),
            )?;
        }
        Ok(())
    }
}

impl AddAssign<&Tendency> for Tendency {
    fn add_assign(&mut self, rhs: &Tendency) {
        self.u += &rhs.u;
        self.v += &rhs.v;
        self.phi += &rhs.phi;
    }
}

impl StateVector for Tendency {
    fn scaled(&self, alpha: f64) -> Self {
        Self {
            u: self.u.scaled(alpha),
            v: self.v.scaled(alpha),
            phi: self.phi.scaled(alpha),
        }
    }

    fn add_scaled(&mut self, alpha: f64, other: &Self) {
        self.u.add_scaled(alpha, &other.u);
        self.v.add_scaled(alpha, &other.v);
        self.phi.add_scaled(alpha, &other.phi);
    }
}

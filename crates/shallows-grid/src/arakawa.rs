//! The Arakawa-C grid: geometry, allocation and spacing-aware operators.

use ndarray::{s, Array1, Array2, ArrayView1, ArrayView2};

use crate::error::GridError;
use crate::ops;
use shallows_core::Staggering;

/// A rectangular Arakawa-C grid of `nx * ny` cells over `lx * ly` metres,
/// centred on the origin.
///
/// ```text
/// +-- v --+
/// |       |    phi: (nx, ny)       cell centres
/// u  phi  u    u:   (nx + 1, ny)   x-faces; u[0] and u[nx] are the walls
/// |       |    v:   (nx, ny + 1)   y-faces
/// +-- v --+
/// ```
///
/// Shapes above are interiors. Storage from [`zeros`](Self::zeros) adds a
/// one-cell halo on each side, so `u` is stored as `(nx + 3, ny + 2)`.
#[derive(Clone, Debug)]
pub struct ArakawaCGrid {
    nx: usize,
    ny: usize,
    lx: f64,
    ly: f64,
    dx: f64,
    dy: f64,
    ux: Array1<f64>,
    uy: Array1<f64>,
    vx: Array1<f64>,
    vy: Array1<f64>,
}

impl ArakawaCGrid {
    /// Build a grid with `nx * ny` cells spanning `lx * ly`.
    ///
    /// # Errors
    ///
    /// [`GridError::EmptyGrid`] if either cell count is zero;
    /// [`GridError::InvalidExtent`] if either extent is not finite and > 0.
    ///
    /// # Examples
    ///
    /// ```
    /// use shallows_grid::{ArakawaCGrid, Staggering};
    ///
    /// let grid = ArakawaCGrid::new(8, 9, 1.0e7, 1.0e7).unwrap();
    /// assert_eq!(grid.interior_shape(Staggering::U), (9, 9));
    /// assert_eq!(grid.padded_shape(Staggering::V), (10, 12));
    /// ```
    pub fn new(nx: usize, ny: usize, lx: f64, ly: f64) -> Result<Self, GridError> {
        if nx == 0 || ny == 0 {
            return Err(GridError::EmptyGrid { nx, ny });
        }
        if !(lx.is_finite() && lx > 0.0) {
            return Err(GridError::InvalidExtent {
                name: "lx",
                value: lx,
            });
        }
        if !(ly.is_finite() && ly > 0.0) {
            return Err(GridError::InvalidExtent {
                name: "ly",
                value: ly,
            });
        }

        let dx = lx / nx as f64;
        let dy = ly / ny as f64;
        let ux = Array1::from_shape_fn(nx + 1, |i| -lx / 2.0 + i as f64 * dx);
        let vx = Array1::from_shape_fn(nx, |i| -lx / 2.0 + dx / 2.0 + i as f64 * dx);
        let vy = Array1::from_shape_fn(ny + 1, |j| -ly / 2.0 + j as f64 * dy);
        let uy = Array1::from_shape_fn(ny, |j| -ly / 2.0 + dy / 2.0 + j as f64 * dy);

        Ok(Self {
            nx,
            ny,
            lx,
            ly,
            dx,
            dy,
            ux,
            uy,
            vx,
            vy,
        })
    }

    /// Cells along x.
    pub fn nx(&self) -> usize {
        self.nx
    }

    /// Cells along y.
    pub fn ny(&self) -> usize {
        self.ny
    }

    /// Domain extent along x, in metres.
    pub fn lx(&self) -> f64 {
        self.lx
    }

    /// Domain extent along y, in metres.
    pub fn ly(&self) -> f64 {
        self.ly
    }

    /// Cell width.
    pub fn dx(&self) -> f64 {
        self.dx
    }

    /// Cell height.
    pub fn dy(&self) -> f64 {
        self.dy
    }

    /// Interior shape of a field at `loc`.
    pub fn interior_shape(&self, loc: Staggering) -> (usize, usize) {
        loc.interior_shape(self.nx, self.ny)
    }

    /// Stored shape (interior plus halo) of a field at `loc`.
    pub fn padded_shape(&self, loc: Staggering) -> (usize, usize) {
        loc.padded_shape(self.nx, self.ny)
    }

    /// Zeroed padded storage for a field at `loc`.
    pub fn zeros(&self, loc: Staggering) -> Array2<f64> {
        Array2::zeros(self.padded_shape(loc))
    }

    /// x and y coordinates of the interior points of `loc`.
    pub fn coordinates(&self, loc: Staggering) -> (ArrayView1<'_, f64>, ArrayView1<'_, f64>) {
        match loc {
            Staggering::U => (self.ux.view(), self.uy.view()),
            Staggering::V => (self.vx.view(), self.vy.view()),
            Staggering::Phi => (self.vx.view(), self.uy.view()),
        }
    }

    /// `∂ψ/∂x` between x-adjacent points.
    pub fn diff_x(&self, psi: ArrayView2<'_, f64>) -> Array2<f64> {
        ops::diff_x(psi, self.dx)
    }

    /// `∂ψ/∂y` between y-adjacent points.
    pub fn diff_y(&self, psi: ArrayView2<'_, f64>) -> Array2<f64> {
        ops::diff_y(psi, self.dy)
    }

    /// Five-point Laplacian of a padded field, returned at interior shape.
    pub fn laplacian(&self, padded: ArrayView2<'_, f64>) -> Array2<f64> {
        let d2x = ops::diff2_x(padded, self.dx);
        let d2y = ops::diff2_y(padded, self.dy);
        &d2x.slice(s![.., 1..-1]) + &d2y.slice(s![1..-1, ..])
    }

    /// Horizontal divergence at `phi` points from interior `u` and `v`.
    pub fn divergence(&self, u: ArrayView2<'_, f64>, v: ArrayView2<'_, f64>) -> Array2<f64> {
        self.diff_x(u) + self.diff_y(v)
    }

    /// Interpolate each velocity onto the other's location.
    ///
    /// Takes padded `u` and `v`; returns `(u_at_v, v_at_u)` with shapes
    /// `(nx, ny + 1)` and `(nx + 1, ny)`. Each value is the mean of the
    /// four surrounding points of the other component.
    pub fn uv_at_uv(
        &self,
        u: ArrayView2<'_, f64>,
        v: ArrayView2<'_, f64>,
    ) -> (Array2<f64>, Array2<f64>) {
        let ubar = ops::average_x(u);
        let u_at_v = ops::average_y(ubar.slice(s![1..-1, ..]));
        let vbar = ops::average_y(v);
        let v_at_u = ops::average_x(vbar.slice(s![.., 1..-1]));
        (u_at_v, v_at_u)
    }

    /// Interpolate interior `u` and `v` onto `phi` points.
    pub fn uv_at_phi(
        &self,
        u: ArrayView2<'_, f64>,
        v: ArrayView2<'_, f64>,
    ) -> (Array2<f64>, Array2<f64>) {
        (ops::average_x(u), ops::average_y(v))
    }
}

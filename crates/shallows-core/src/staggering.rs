//! Staggered field locations on the Arakawa-C grid.

use std::fmt;

/// Where a field's values live within a grid cell.
///
/// ```text
/// +-- v --+
/// |       |
/// u  phi  u
/// |       |
/// +-- v --+
/// ```
///
/// For a logical domain of `nx * ny` cells, the interior shapes are
/// `(nx + 1, ny)` for [`U`](Staggering::U), `(nx, ny + 1)` for
/// [`V`](Staggering::V) and `(nx, ny)` for [`Phi`](Staggering::Phi).
/// Axis 0 is x, axis 1 is y.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Staggering {
    /// East/west cell faces (x-velocity).
    U,
    /// North/south cell faces (y-velocity).
    V,
    /// Cell centres (height, geopotential, tracers).
    Phi,
}

impl Staggering {
    /// All three locations in state order `(u, v, phi)`.
    pub const ALL: [Staggering; 3] = [Staggering::U, Staggering::V, Staggering::Phi];

    /// Interior shape of a field at this location on an `nx * ny` domain.
    pub fn interior_shape(self, nx: usize, ny: usize) -> (usize, usize) {
        match self {
            Self::U => (nx + 1, ny),
            Self::V => (nx, ny + 1),
            Self::Phi => (nx, ny),
        }
    }

    /// Shape including the one-cell halo on every side.
    pub fn padded_shape(self, nx: usize, ny: usize) -> (usize, usize) {
        let (ix, iy) = self.interior_shape(nx, ny);
        (ix + 2, iy + 2)
    }
}

impl fmt::Display for Staggering {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::U => write!(f, "u"),
            Self::V => write!(f, "v"),
            Self::Phi => write!(f, "phi"),
        }
    }
}

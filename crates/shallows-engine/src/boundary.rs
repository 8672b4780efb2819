//! Halo filling for the periodic and walled x-boundaries.
//!
//! Both variants treat y the same way: zero-gradient (mirror) rows at
//! the top and bottom followed by the corner fix-up. They differ only
//! along x, and only the along-x velocity is special: a walled domain
//! pins it to zero at the walls, a periodic one wraps its extra
//! staggered column. Scalars (height and tracers) wrap or mirror.

use ndarray::Array2;
use shallows_grid::fix_corners;

use crate::state::State;

/// Treatment of the x-boundaries. y-boundaries are always free-slip.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Boundary {
    /// The domain wraps in x.
    #[default]
    Periodic,
    /// Solid walls at both x-ends with no normal flow.
    Walled,
}

impl Boundary {
    /// Short lowercase name, used in log output.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Periodic => "periodic",
            Self::Walled => "walled",
        }
    }

    /// Fill the halos of all three state fields in place.
    pub fn apply_to_state(&self, state: &mut State) {
        let last = state.u.nrows() - 1;
        match self {
            Self::Periodic => {
                // The wall column u[1] and u[last - 1] are the same point.
                copy_x(&mut state.u, 0, last - 2);
                copy_x(&mut state.u, 1, last - 1);
                copy_x(&mut state.u, last, 2);
            }
            Self::Walled => {
                for i in [0, 1, last - 1, last] {
                    state.u.row_mut(i).fill(0.0);
                }
            }
        }
        self.fill_scalar_x(&mut state.v);
        self.fill_scalar_x(&mut state.phi);

        for field in [&mut state.u, &mut state.v, &mut state.phi] {
            mirror_y(field);
            fix_corners(field);
        }
    }

    /// Fill the halo of a cell-centred scalar (a tracer) in place.
    ///
    /// Receives the same x treatment as the height field.
    pub fn apply_to_scalar(&self, field: &mut Array2<f64>) {
        self.fill_scalar_x(field);
        mirror_y(field);
        fix_corners(field);
    }

    fn fill_scalar_x(&self, field: &mut Array2<f64>) {
        let last = field.nrows() - 1;
        match self {
            Self::Periodic => {
                copy_x(field, 0, last - 1);
                copy_x(field, last, 1);
            }
            Self::Walled => {
                copy_x(field, 0, 1);
                copy_x(field, last, last - 1);
            }
        }
    }
}

/// `field[dst, :] = field[src, :]`.
fn copy_x(field: &mut Array2<f64>, dst: usize, src: usize) {
    let row = field.row(src).to_owned();
    field.row_mut(dst).assign(&row);
}

/// Zero-gradient halo rows at both y-ends.
fn mirror_y(field: &mut Array2<f64>) {
    let last = field.ncols() - 1;
    let bottom = field.column(1).to_owned();
    field.column_mut(0).assign(&bottom);
    let top = field.column(last - 1).to_owned();
    field.column_mut(last).assign(&top);
}

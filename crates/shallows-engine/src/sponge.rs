//! Rayleigh sponge layers at the y-boundaries.

use ndarray::{Array1, Array2, ArrayView2};

use crate::config::SPONGE_FRACTION;

/// Exponentially decaying Rayleigh friction near the top and bottom
/// of the domain.
///
/// The profile has `n = ny / 7` coefficients `exp(-5 k / (n - 1))`,
/// starting at 1 on the boundary row and falling to `e^-5` `n - 1`
/// rows in. It is laid over the first `n` y-rows of a field and,
/// reversed, over the last `n`. Interior rows are undamped.
#[derive(Clone, Debug, PartialEq)]
pub struct Sponge {
    profile: Vec<f64>,
    rate: f64,
}

impl Sponge {
    /// Sponge for a grid with `ny` rows and damping rate `rate`.
    pub fn new(ny: usize, rate: f64) -> Self {
        Self::with_width(ny / SPONGE_FRACTION, rate)
    }

    /// Sponge with an explicit number of rows per boundary.
    pub fn with_width(width: usize, rate: f64) -> Self {
        let profile = match width {
            0 => Vec::new(),
            1 => vec![1.0],
            n => (0..n)
                .map(|k| (-5.0 * k as f64 / (n - 1) as f64).exp())
                .collect(),
        };
        Self { profile, rate }
    }

    /// Rows per boundary.
    pub fn width(&self) -> usize {
        self.profile.len()
    }

    /// The damping rate `r`.
    pub fn rate(&self) -> f64 {
        self.rate
    }

    /// The per-row profile, boundary row first.
    pub fn profile(&self) -> &[f64] {
        &self.profile
    }

    /// Profile coefficient for y-row `j` of a field `len` rows tall.
    ///
    /// When the two layers would overlap the upper one wins.
    pub fn coefficient(&self, j: usize, len: usize) -> f64 {
        let n = self.profile.len();
        if j >= len {
            0.0
        } else if j + n >= len {
            self.profile[len - 1 - j]
        } else if j < n {
            self.profile[j]
        } else {
            0.0
        }
    }

    /// All coefficients for a field `len` rows tall.
    pub fn coefficients(&self, len: usize) -> Array1<f64> {
        Array1::from_shape_fn(len, |j| self.coefficient(j, len))
    }

    /// `r * coeff * field`, elementwise, for any interior-shaped field.
    pub fn damp(&self, field: ArrayView2<'_, f64>) -> Array2<f64> {
        let len = field.ncols();
        let coeff = self.coefficients(len);
        Array2::from_shape_fn(field.raw_dim(), |(i, j)| {
            self.rate * coeff[j] * field[[i, j]]
        })
    }
}

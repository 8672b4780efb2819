//! The [`StateVector`] trait: what the integrator needs from a tendency.

use ndarray::Dimension;

/// A value that can be scaled and accumulated.
///
/// Implemented for `ndarray` arrays of `f64` and for any composite
/// tendency type that forwards to its components.
pub trait StateVector: Clone {
    /// Return `alpha * self`.
    fn scaled(&self, alpha: f64) -> Self;

    /// Compute `self += alpha * other` in place.
    fn add_scaled(&mut self, alpha: f64, other: &Self);
}

impl<D: Dimension> StateVector for ndarray::Array<f64, D> {
    fn scaled(&self, alpha: f64) -> Self {
        self.mapv(|x| alpha * x)
    }

    fn add_scaled(&mut self, alpha: f64, other: &Self) {
        self.scaled_add(alpha, other);
    }
}

impl StateVector for f64 {
    fn scaled(&self, alpha: f64) -> Self {
        alpha * self
    }

    fn add_scaled(&mut self, alpha: f64, other: &Self) {
        *self += alpha * other;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::{array, Array2};

    #[test]
    fn array_scaling() {
        let a = array![[1.0, 2.0], [3.0, 4.0]];
        assert_eq!(a.scaled(2.0), array![[2.0, 4.0], [6.0, 8.0]]);
    }

    #[test]
    fn array_accumulation() {
        let mut a: Array2<f64> = array![[1.0, 1.0]];
        a.add_scaled(0.5, &array![[2.0, -4.0]]);
        assert_eq!(a, array![[2.0, -1.0]]);
    }

    #[test]
    fn scalar_impl() {
        let mut x = 1.0f64;
        x.add_scaled(3.0, &2.0);
        assert_eq!(x, 7.0);
        assert_eq!(x.scaled(0.5), 3.5);
    }
}

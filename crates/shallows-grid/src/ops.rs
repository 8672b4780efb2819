//! Spacing-free array helpers shared by every staggered location.
//!
//! Differences and averages act between adjacent entries, so each one
//! shortens the operated axis by one (second differences by two). The
//! caller picks the slice that lands the result on the wanted location.

use ndarray::{s, Array2, ArrayView2, ArrayViewMut2};

/// Interior view of a padded field (drops the one-cell halo).
pub fn interior(field: &Array2<f64>) -> ArrayView2<'_, f64> {
    field.slice(s![1..-1, 1..-1])
}

/// Mutable interior view of a padded field.
pub fn interior_mut(field: &mut Array2<f64>) -> ArrayViewMut2<'_, f64> {
    field.slice_mut(s![1..-1, 1..-1])
}

/// Mean of x-adjacent entries. Shape `(n, m)` becomes `(n - 1, m)`.
pub fn average_x(psi: ArrayView2<'_, f64>) -> Array2<f64> {
    (&psi.slice(s![..-1, ..]) + &psi.slice(s![1.., ..])) * 0.5
}

/// Mean of y-adjacent entries. Shape `(n, m)` becomes `(n, m - 1)`.
pub fn average_y(psi: ArrayView2<'_, f64>) -> Array2<f64> {
    (&psi.slice(s![.., ..-1]) + &psi.slice(s![.., 1..])) * 0.5
}

/// First difference along x divided by `dx`. `(n, m)` becomes `(n - 1, m)`.
pub fn diff_x(psi: ArrayView2<'_, f64>, dx: f64) -> Array2<f64> {
    (&psi.slice(s![1.., ..]) - &psi.slice(s![..-1, ..])) / dx
}

/// First difference along y divided by `dy`. `(n, m)` becomes `(n, m - 1)`.
pub fn diff_y(psi: ArrayView2<'_, f64>, dy: f64) -> Array2<f64> {
    (&psi.slice(s![.., 1..]) - &psi.slice(s![.., ..-1])) / dy
}

/// Centred second difference along x. `(n, m)` becomes `(n - 2, m)`.
pub fn diff2_x(psi: ArrayView2<'_, f64>, dx: f64) -> Array2<f64> {
    let mut out = psi.slice(s![..-2, ..]).to_owned();
    out.scaled_add(-2.0, &psi.slice(s![1..-1, ..]));
    out += &psi.slice(s![2.., ..]);
    out / (dx * dx)
}

/// Centred second difference along y. `(n, m)` becomes `(n, m - 2)`.
pub fn diff2_y(psi: ArrayView2<'_, f64>, dy: f64) -> Array2<f64> {
    let mut out = psi.slice(s![.., ..-2]).to_owned();
    out.scaled_add(-2.0, &psi.slice(s![.., 1..-1]));
    out += &psi.slice(s![.., 2..]);
    out / (dy * dy)
}

/// Replace each corner of a padded field with the mean of its two edge
/// neighbours. Run after the edges themselves have been filled.
pub fn fix_corners(field: &mut Array2<f64>) {
    let (nx, ny) = field.dim();
    let (lx, ly) = (nx - 1, ny - 1);
    field[[0, 0]] = 0.5 * (field[[1, 0]] + field[[0, 1]]);
    field[[lx, 0]] = 0.5 * (field[[lx - 1, 0]] + field[[lx, 1]]);
    field[[0, ly]] = 0.5 * (field[[1, ly]] + field[[0, ly - 1]]);
    field[[lx, ly]] = 0.5 * (field[[lx, ly - 1]] + field[[lx - 1, ly]]);
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::Array2;
    use proptest::prelude::*;

    fn ramp(nx: usize, ny: usize) -> Array2<f64> {
        Array2::from_shape_fn((nx, ny), |(i, j)| 3.0 * i as f64 + 0.5 * j as f64)
    }

    #[test]
    fn interior_strips_halo() {
        let f = ramp(5, 4);
        let inner = interior(&f);
        assert_eq!(inner.dim(), (3, 2));
        assert_eq!(inner[[0, 0]], f[[1, 1]]);
    }

    #[test]
    fn differences_of_a_ramp_are_its_slopes() {
        let f = ramp(6, 5);
        let dx = diff_x(f.view(), 0.5);
        assert_eq!(dx.dim(), (5, 5));
        assert!(dx.iter().all(|&v| (v - 6.0).abs() < 1e-12));
        let dy = diff_y(f.view(), 2.0);
        assert_eq!(dy.dim(), (6, 4));
        assert!(dy.iter().all(|&v| (v - 0.25).abs() < 1e-12));
    }

    #[test]
    fn second_differences_of_a_ramp_vanish() {
        let f = ramp(6, 5);
        let d2x = diff2_x(f.view(), 1.0);
        let d2y = diff2_y(f.view(), 1.0);
        assert_eq!(d2x.dim(), (4, 5));
        assert_eq!(d2y.dim(), (6, 3));
        assert!(d2x.iter().all(|v| v.abs() < 1e-12));
        assert!(d2y.iter().all(|v| v.abs() < 1e-12));
    }

    #[test]
    fn second_difference_of_a_parabola_is_constant() {
        let f = Array2::from_shape_fn((7, 3), |(i, _)| (i * i) as f64);
        let d2x = diff2_x(f.view(), 1.0);
        assert!(d2x.iter().all(|&v| (v - 2.0).abs() < 1e-12));
    }

    #[test]
    fn averages_shorten_one_axis() {
        let f = ramp(4, 3);
        let ax = average_x(f.view());
        let ay = average_y(f.view());
        assert_eq!(ax.dim(), (3, 3));
        assert_eq!(ay.dim(), (4, 2));
        assert_eq!(ax[[0, 0]], 1.5);
        assert_eq!(ay[[0, 0]], 0.25);
    }

    #[test]
    fn fix_corners_averages_edge_neighbours() {
        let mut f = Array2::zeros((4, 5));
        f[[1, 0]] = 2.0;
        f[[0, 1]] = 4.0;
        f[[3, 3]] = 6.0;
        f[[2, 4]] = 8.0;
        fix_corners(&mut f);
        assert_eq!(f[[0, 0]], 3.0);
        assert_eq!(f[[3, 4]], 7.0);
        assert_eq!(f[[3, 0]], 0.0);
        assert_eq!(f[[0, 4]], 0.0);
    }

    proptest! {
        #[test]
        fn constant_fields_have_zero_difference_and_constant_mean(
            nx in 3usize..12,
            ny in 3usize..12,
            c in -100.0f64..100.0,
        ) {
            let f = Array2::from_elem((nx, ny), c);
            prop_assert!(diff_x(f.view(), 1.0).iter().all(|&v| v == 0.0));
            prop_assert!(diff_y(f.view(), 1.0).iter().all(|&v| v == 0.0));
            prop_assert!(average_x(f.view()).iter().all(|&v| v == c));
            prop_assert!(average_y(f.view()).iter().all(|&v| v == c));
        }
    }
}

//! Test utilities and fixtures for Shallows development.
//!
//! Provides configuration presets with selected physics switched off,
//! the smooth `sin²` hump used as an initial condition throughout the
//! tests and demos, and exact-comparison helpers. Forcing and tracer
//! source fixtures live in [`fixtures`].

#![deny(unsafe_code)]
#![allow(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod fixtures;

use std::f64::consts::PI;

use ndarray::{s, Array1, Array2, ArrayView2, ArrayViewMut2};
use shallows_engine::{Boundary, Dynamics, LinearParams, ModelConfig};

/// `config` with rotation, diffusion and sponge damping all zero.
pub fn inviscid(mut config: ModelConfig) -> ModelConfig {
    config.f0 = 0.0;
    config.beta = 0.0;
    config.nu = 0.0;
    config.nu_phi = None;
    config.r = 0.0;
    config
}

/// Nonlinear, inviscid, non-rotating, periodic configuration.
pub fn inviscid_nonlinear(nx: usize, ny: usize) -> ModelConfig {
    inviscid(ModelConfig::nonlinear(nx, ny))
}

/// Linear, inviscid, non-rotating configuration with the given boundary.
pub fn inviscid_linear(nx: usize, ny: usize, boundary: Boundary) -> ModelConfig {
    let mut cfg = inviscid(ModelConfig::linear(nx, ny));
    cfg.boundary = boundary;
    cfg
}

/// Linear configuration whose every coefficient is zero, including `g`
/// and `H`. Any state is an exact fixed point.
pub fn frozen_linear(nx: usize, ny: usize) -> ModelConfig {
    let mut cfg = inviscid(ModelConfig::linear(nx, ny));
    cfg.dynamics = Dynamics::Linear(LinearParams {
        gravity: 0.0,
        mean_depth: 0.0,
    });
    cfg
}

/// `sin²(x) sin²(y)` over `[0, π]²` sampled on `(w, h)` points.
///
/// Zero on its edges and 1 near its centre.
pub fn sin2_hump(w: usize, h: usize) -> Array2<f64> {
    let sx = Array1::linspace(0.0, PI, w).mapv(|x| x.sin().powi(2));
    let sy = Array1::linspace(0.0, PI, h).mapv(|y| y.sin().powi(2));
    Array2::from_shape_fn((w, h), |(i, j)| sx[i] * sy[j])
}

/// Add `amplitude * hump` into `field` with the hump's corner at `origin`.
pub fn add_hump(
    mut field: ArrayViewMut2<'_, f64>,
    hump: &Array2<f64>,
    origin: (usize, usize),
    amplitude: f64,
) {
    let (w, h) = hump.dim();
    let (i, j) = origin;
    field
        .slice_mut(s![i..i + w, j..j + h])
        .scaled_add(amplitude, hump);
}

/// Sum of every element.
pub fn domain_sum(field: ArrayView2<'_, f64>) -> f64 {
    field.sum()
}

/// Assert two fields are identical bit for bit, reporting the first
/// differing index.
pub fn assert_bit_identical(a: ArrayView2<'_, f64>, b: ArrayView2<'_, f64>) {
    assert_eq!(a.dim(), b.dim(), "shape differs");
    for ((idx, x), y) in a.indexed_iter().zip(b.iter()) {
        assert_eq!(
            x.to_bits(),
            y.to_bits(),
            "first difference at {idx:?}: {x:e} vs {y:e}"
        );
    }
}

/// Assert `|a - b| <= tol` elementwise.
pub fn assert_close(a: ArrayView2<'_, f64>, b: ArrayView2<'_, f64>, tol: f64) {
    assert_eq!(a.dim(), b.dim(), "shape differs");
    for ((idx, x), y) in a.indexed_iter().zip(b.iter()) {
        assert!((x - y).abs() <= tol, "at {idx:?}: {x:e} vs {y:e} (tol {tol:e})");
    }
}

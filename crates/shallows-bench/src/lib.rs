//! Benchmark profiles for the Shallows shallow-water model.
//!
//! Provides pre-built [`ModelConfig`] profiles and ready-to-step models:
//!
//! - [`reference_profile`]: 128x129 nonlinear, beta-plane, periodic
//! - [`stress_profile`]: 512x511, same physics at 16x the cell count
//! - [`linear_profile`]: 128x129 linear, walled
//! - [`hump_model`]: a model at rest on a mean height with a raised hump

#![forbid(unsafe_code)]
#![deny(rustdoc::broken_intra_doc_links)]

use shallows_engine::{Boundary, ConfigError, Model, ModelConfig};
use shallows_test_utils::{add_hump, sin2_hump};

/// Mean geopotential height of the benchmark initial conditions.
pub const MEAN_HEIGHT: f64 = 10.0;

/// Nonlinear reference profile: 128x129 cells, `beta = 2e-11`, periodic.
///
/// dt = 1000 s is well inside the gravity-wave limit for
/// `sqrt(phi) ≈ 3.2 m/s` at a spacing of about 78 km.
pub fn reference_profile() -> ModelConfig {
    ModelConfig::nonlinear(128, 129)
}

/// Stress profile: 512x511 cells (~260K height points).
///
/// Same physics as [`reference_profile`].
pub fn stress_profile() -> ModelConfig {
    ModelConfig::nonlinear(512, 511)
}

/// Linear profile: 128x129 cells with walls in x.
pub fn linear_profile() -> ModelConfig {
    let mut cfg = ModelConfig::linear(128, 129);
    cfg.boundary = Boundary::Walled;
    cfg
}

/// Build a model from `config` with `phi = MEAN_HEIGHT` plus a `sin²`
/// hump of the given amplitude covering the middle fifth of the domain.
pub fn hump_model(config: ModelConfig, amplitude: f64) -> Result<Model, ConfigError> {
    let (nx, ny) = (config.nx, config.ny);
    let mut model = Model::new(config)?;
    let (w, h) = (nx / 5, ny / 5);
    let mut phi = model.phi_mut();
    phi.fill(MEAN_HEIGHT);
    add_hump(phi, &sin2_hump(w, h), ((nx - w) / 2, (ny - h) / 2), amplitude);
    Ok(model)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn profiles_validate() {
        reference_profile().validate().unwrap();
        stress_profile().validate().unwrap();
        linear_profile().validate().unwrap();
    }

    #[test]
    fn hump_model_is_raised_in_the_middle() {
        let model = hump_model(reference_profile(), 1.0).unwrap();
        let phi = model.phi();
        assert_eq!(phi[[0, 0]], MEAN_HEIGHT);
        assert!(phi[[64, 64]] > MEAN_HEIGHT + 0.9);
        assert!(phi.iter().all(|&p| p >= MEAN_HEIGHT));
    }

    #[test]
    fn hump_model_steps() {
        let mut model = hump_model(linear_profile(), 0.5).unwrap();
        model.step_n(3).unwrap();
        assert!(model.phi().iter().all(|p| p.is_finite()));
    }
}

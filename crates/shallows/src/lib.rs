//! Shallows: a rotating shallow-water model on an Arakawa-C grid.
//!
//! This is the top-level facade crate that re-exports the public API from
//! all Shallows sub-crates. For most users, adding `shallows` as a single
//! dependency is sufficient.
//!
//! # Quick start
//!
//! ```rust
//! use ndarray::Array2;
//! use shallows::prelude::*;
//!
//! // A 32x28 nonlinear beta-plane, periodic in x.
//! let mut model = Model::new(ModelConfig::nonlinear(32, 28)).unwrap();
//! model.phi_mut().fill(10.0);
//! model.phi_mut()[[16, 14]] += 0.1;
//!
//! // A dye released where the height is raised.
//! let mut dye = Array2::zeros((32, 28));
//! dye[[16, 14]] = 1.0;
//! model.register_tracer(TracerSpec::new("dye", dye)).unwrap();
//!
//! model.step_n(10).unwrap();
//! assert_eq!(model.step_count(), StepCount(10));
//! assert!(model.read_tracer("dye").is_some());
//! ```
//!
//! # Modules
//!
//! Each module corresponds to a sub-crate. Use them for types not in the prelude:
//!
//! | Module | Sub-crate | Contents |
//! |--------|-----------|----------|
//! | [`types`] | `shallows-core` | Error types, `Staggering`, `StepCount` |
//! | [`grid`] | `shallows-grid` | `ArakawaCGrid` and staggered-array operators |
//! | [`integrate`] | `shallows-integrate` | Adams-Bashforth integrator |
//! | [`engine`] | `shallows-engine` | Dynamics, boundaries, tracers, forcing, `Model` |

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

/// Core types and errors (`shallows-core`).
pub use shallows_core as types;

/// Staggered grid and finite-difference operators (`shallows-grid`).
///
/// [`grid::ArakawaCGrid`] owns the geometry; free functions such as
/// [`grid::interior`] and [`grid::average_x`] work on any padded array.
pub use shallows_grid as grid;

/// Multistep time integration (`shallows-integrate`).
///
/// [`integrate::AdamsBashforth3`] works on anything implementing
/// [`integrate::StateVector`].
pub use shallows_integrate as integrate;

/// The model and its parts (`shallows-engine`).
pub use shallows_engine as engine;

/// Common imports for typical Shallows usage.
///
/// ```rust
/// use shallows::prelude::*;
/// ```
pub mod prelude {
    // Configuration
    pub use shallows_engine::{Boundary, Dynamics, LinearParams, ModelConfig, NonlinearParams};

    // Model and extension points
    pub use shallows_engine::{Model, ModelView, StepMetrics, Tendency, TracerSpec};

    // Errors
    pub use shallows_engine::{ConfigError, RegistrationError, StepError};

    // Core types
    pub use shallows_core::{Staggering, StepCount};
    pub use shallows_grid::ArakawaCGrid;
}

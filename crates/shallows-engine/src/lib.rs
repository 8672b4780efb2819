//! Shallow-water dynamics and step orchestration for Shallows.
//!
//! Provides [`Model`], which integrates the rotating shallow-water
//! equations on an Arakawa-C grid with third-order Adams-Bashforth time
//! stepping. The equation set ([`Dynamics`]) and the x-boundary treatment
//! ([`Boundary`]) are chosen independently in [`ModelConfig`].
//!
//! Passive tracers ([`TracerSpec`]) and external forcings are registered
//! on a model and advance with it. User callables never see live state:
//! each receives a [`ModelView`] of the frozen, boundary-consistent
//! snapshot taken at the start of the step. A step either commits every
//! field and advances the clock, or returns a [`StepError`] and changes
//! nothing.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(unsafe_code)]

pub mod boundary;
pub mod config;
pub mod dynamics;
pub mod forcing;
pub mod metrics;
pub mod model;
pub mod sponge;
pub mod state;
pub mod tracer;
pub mod view;

pub use boundary::Boundary;
pub use config::{ConfigError, Dynamics, LinearParams, ModelConfig, NonlinearParams};
pub use dynamics::DynamicsEngine;
pub use forcing::{ForcingFn, ForcingRegistry};
pub use metrics::StepMetrics;
pub use model::Model;
pub use shallows_core::{RegistrationError, ShapeMismatch, StepCount, StepError, TendencySource};
pub use sponge::Sponge;
pub use state::{State, Tendency};
pub use tracer::{SourceFn, TracerSource, TracerSpec};
pub use view::ModelView;

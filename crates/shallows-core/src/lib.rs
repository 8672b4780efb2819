//! Core types for the Shallows shallow-water model.
//!
//! This is the leaf crate with zero internal dependencies. It defines the
//! vocabulary shared by the grid, integrator and engine crates: staggered
//! field locations, the step counter, and the error taxonomy surfaced by
//! registration and stepping.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod error;
pub mod id;
pub mod staggering;

pub use error::{RegistrationError, ShapeMismatch, StepError, TendencySource};
pub use id::StepCount;
pub use staggering::Staggering;

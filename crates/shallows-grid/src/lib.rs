//! Arakawa-C staggered grid for the Shallows model.
//!
//! This crate owns the spatial side of the model: padded field allocation
//! for each [`Staggering`] location, coordinate arrays, and the
//! finite-difference operator set used by the dynamics and tracer code.
//!
//! # Layout
//!
//! Arrays are indexed `[x, y]`. Every field carries a one-cell halo on
//! each side; [`interior`] and [`interior_mut`] strip it. Operators take
//! padded or interior views as documented per function and return owned
//! arrays whose shape follows from the staggering of their operand.
//!
//! # Operators
//!
//! - [`ops`]: spacing-free helpers (averaging, corner fix-up, halo access)
//! - [`ArakawaCGrid`]: spacing-aware derivatives, Laplacian, divergence
//!   and cross-staggered velocity interpolation

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(unsafe_code)]

pub mod arakawa;
pub mod error;
pub mod ops;

pub use arakawa::ArakawaCGrid;
pub use error::GridError;
pub use ops::{average_x, average_y, fix_corners, interior, interior_mut};
pub use shallows_core::Staggering;

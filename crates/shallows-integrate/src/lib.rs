//! Explicit multistep time integration for Shallows.
//!
//! [`AdamsBashforth3`] turns a sequence of tendency evaluations into a
//! sequence of state increments. It keeps a bounded history of past
//! tendencies and bootstraps its order: the first increment is forward
//! Euler, the second is second-order Adams-Bashforth, every later one is
//! third order.
//!
//! The integrator never evaluates anything itself. The caller computes a
//! tendency, hands it to [`advance`](AdamsBashforth3::advance), and adds
//! the returned increment to its state. This keeps the moment the history
//! changes explicit, which the engine relies on for all-or-nothing steps.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod adams_bashforth;
pub mod vector;

pub use adams_bashforth::AdamsBashforth3;
pub use vector::StateVector;

//! Error types for grid construction.

use std::fmt;

/// Errors arising from grid construction.
#[derive(Debug, Clone, PartialEq)]
pub enum GridError {
    /// Attempted to construct a grid with zero cells along an axis.
    EmptyGrid {
        /// Requested cell count along x.
        nx: usize,
        /// Requested cell count along y.
        ny: usize,
    },
    /// A domain extent is zero, negative, or not finite.
    InvalidExtent {
        /// Which extent (`"lx"` or `"ly"`).
        name: &'static str,
        /// The rejected value.
        value: f64,
    },
}

impl fmt::Display for GridError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyGrid { nx, ny } => {
                write!(f, "grid must have at least one cell per axis, got {nx}x{ny}")
            }
            Self::InvalidExtent { name, value } => {
                write!(f, "{name} must be finite and > 0, got {value}")
            }
        }
    }
}

impl std::error::Error for GridError {}

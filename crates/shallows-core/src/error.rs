//! Error types for the Shallows model.
//!
//! Organized by when they surface: [`RegistrationError`] at tracer or
//! forcing registration, [`StepError`] from `step()`. Configuration
//! errors live next to the configuration they validate.

use std::error::Error;
use std::fmt;

/// An array did not have the shape its consumer required.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ShapeMismatch {
    /// Which array was checked, e.g. `"tracer 'q' initial values"`.
    pub what: String,
    /// The required `(x, y)` shape.
    pub expected: (usize, usize),
    /// The shape actually supplied.
    pub actual: (usize, usize),
}

impl ShapeMismatch {
    /// Compare `actual` against `expected`, returning `Err` on mismatch.
    pub fn check(
        what: impl Into<String>,
        expected: (usize, usize),
        actual: (usize, usize),
    ) -> Result<(), ShapeMismatch> {
        if expected == actual {
            Ok(())
        } else {
            Err(ShapeMismatch {
                what: what.into(),
                expected,
                actual,
            })
        }
    }
}

impl fmt::Display for ShapeMismatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: expected shape {:?}, got {:?}",
            self.what, self.expected, self.actual
        )
    }
}

impl Error for ShapeMismatch {}

/// Errors from registering a tracer or a forcing.
///
/// Always reported at registration time; a rejected registration leaves
/// the model unchanged.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RegistrationError {
    /// A tracer with this name is already registered.
    DuplicateName {
        /// The rejected name.
        name: String,
    },
    /// Initial values or a probed tendency had the wrong shape.
    ShapeMismatch(ShapeMismatch),
}

impl fmt::Display for RegistrationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DuplicateName { name } => {
                write!(f, "tracer '{name}' is already registered")
            }
            Self::ShapeMismatch(e) => write!(f, "shape mismatch: {e}"),
        }
    }
}

impl Error for RegistrationError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::ShapeMismatch(e) => Some(e),
            Self::DuplicateName { .. } => None,
        }
    }
}

impl From<ShapeMismatch> for RegistrationError {
    fn from(e: ShapeMismatch) -> Self {
        Self::ShapeMismatch(e)
    }
}

/// Which user-supplied contribution produced a bad tendency.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TendencySource {
    /// The single auxiliary right-hand-side hook.
    AuxiliaryRhs,
    /// The forcing at this registration index.
    Forcing {
        /// Zero-based registration order.
        index: usize,
    },
    /// The source term of a tracer.
    Tracer {
        /// The tracer's name.
        name: String,
    },
}

impl fmt::Display for TendencySource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::AuxiliaryRhs => write!(f, "auxiliary rhs"),
            Self::Forcing { index } => write!(f, "forcing #{index}"),
            Self::Tracer { name } => write!(f, "tracer '{name}' source"),
        }
    }
}

/// Errors from `step()`.
///
/// A step that returns `Err` has committed nothing: state, tracers,
/// integrator history and clock are exactly as before the call.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum StepError {
    /// A user contribution returned an array of the wrong shape.
    ShapeMismatch {
        /// The offending contribution.
        origin: TendencySource,
        /// Details of the mismatch.
        mismatch: ShapeMismatch,
    },
}

impl fmt::Display for StepError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ShapeMismatch { origin, mismatch } => {
                write!(f, "{origin} returned a bad tendency: {mismatch}")
            }
        }
    }
}

impl Error for StepError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::ShapeMismatch { mismatch, .. } => Some(mismatch),
        }
    }
}

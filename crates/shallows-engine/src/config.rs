//! Model configuration, validation, and error types.
//!
//! [`ModelConfig`] is the input to [`Model::new`](crate::Model::new).
//! [`validate()`](ModelConfig::validate) checks every parameter before any
//! storage is allocated. The two constructors carry the defaults of the
//! classic beta-plane setup (a 10,000 km square basin, `dt = 1000 s`).

use std::error::Error;
use std::fmt;

use shallows_grid::{ArakawaCGrid, GridError};

use crate::boundary::Boundary;

/// Sponge rows per boundary are `ny / SPONGE_FRACTION`.
pub const SPONGE_FRACTION: usize = 7;

// ── Dynamics variants ──────────────────────────────────────────────

/// Parameters specific to the linearized equations.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LinearParams {
    /// Gravitational acceleration `g`. Default: 9.8.
    pub gravity: f64,
    /// Resting fluid depth `H`. Default: 10.
    pub mean_depth: f64,
}

impl Default for LinearParams {
    fn default() -> Self {
        Self {
            gravity: 9.8,
            mean_depth: 10.0,
        }
    }
}

/// Parameters specific to the fully nonlinear equations.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct NonlinearParams {
    /// Apply sponge damping to the geopotential as well as the
    /// velocities. Default: `false`.
    pub damp_height: bool,
}

/// Which form of the shallow-water equations to integrate.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Dynamics {
    /// Equations linearized about a resting state of depth `H`; the
    /// third state field is the height perturbation `h`.
    Linear(LinearParams),
    /// Full flux-form equations; the third state field is the
    /// geopotential `phi = g h`.
    Nonlinear(NonlinearParams),
}

impl Dynamics {
    /// Short lowercase name, used in log output.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Linear(_) => "linear",
            Self::Nonlinear(_) => "nonlinear",
        }
    }
}

// ── ConfigError ────────────────────────────────────────────────────

/// Errors detected during [`ModelConfig::validate()`].
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// Grid dimensions or extents are invalid.
    Grid(GridError),
    /// `ny` is too small to hold at least one sponge row per boundary.
    SpongeTooNarrow {
        /// The configured `ny`.
        ny: usize,
    },
    /// `dt` is NaN, infinite, zero, or negative.
    InvalidTimeStep {
        /// The rejected value.
        value: f64,
    },
    /// A physical parameter is out of range.
    InvalidParameter {
        /// Field name in [`ModelConfig`] or its dynamics parameters.
        name: &'static str,
        /// The rejected value.
        value: f64,
    },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Grid(e) => write!(f, "grid: {e}"),
            Self::SpongeTooNarrow { ny } => write!(
                f,
                "ny = {ny} leaves no sponge rows, need ny >= {SPONGE_FRACTION}"
            ),
            Self::InvalidTimeStep { value } => {
                write!(f, "dt must be finite and positive, got {value}")
            }
            Self::InvalidParameter { name, value } => {
                write!(f, "parameter {name} is out of range: {value}")
            }
        }
    }
}

impl Error for ConfigError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Grid(e) => Some(e),
            _ => None,
        }
    }
}

impl From<GridError> for ConfigError {
    fn from(e: GridError) -> Self {
        Self::Grid(e)
    }
}

// ── ModelConfig ────────────────────────────────────────────────────

/// Everything needed to construct a [`Model`](crate::Model).
///
/// Fields are public so callers can start from [`linear`](Self::linear)
/// or [`nonlinear`](Self::nonlinear) and override what they need.
///
/// ```
/// use shallows_engine::{Boundary, ModelConfig};
///
/// let mut cfg = ModelConfig::nonlinear(64, 65);
/// cfg.boundary = Boundary::Walled;
/// cfg.beta = 0.0;
/// cfg.validate().unwrap();
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct ModelConfig {
    /// Cells along x.
    pub nx: usize,
    /// Cells along y. Must be at least 7 for the sponge layers.
    pub ny: usize,
    /// Domain extent along x, metres.
    pub lx: f64,
    /// Domain extent along y, metres.
    pub ly: f64,
    /// Coriolis parameter at `y = 0`.
    pub f0: f64,
    /// Meridional gradient of the Coriolis parameter.
    pub beta: f64,
    /// Momentum diffusion coefficient.
    pub nu: f64,
    /// Height diffusion coefficient. `None` means "same as `nu`".
    pub nu_phi: Option<f64>,
    /// Rayleigh damping rate inside the sponge layers.
    pub r: f64,
    /// Time step, seconds.
    pub dt: f64,
    /// Equation set.
    pub dynamics: Dynamics,
    /// Treatment of the x-boundaries.
    pub boundary: Boundary,
}

impl ModelConfig {
    /// Linear model with the classic defaults: `f0 = 0`, `beta = 0`,
    /// `nu = 1e3`, `r = 1e-5`, `g = 9.8`, `H = 10`, periodic in x.
    pub fn linear(nx: usize, ny: usize) -> Self {
        Self {
            nx,
            ny,
            lx: 1.0e7,
            ly: 1.0e7,
            f0: 0.0,
            beta: 0.0,
            nu: 1.0e3,
            nu_phi: None,
            r: 1.0e-5,
            dt: 1000.0,
            dynamics: Dynamics::Linear(LinearParams::default()),
            boundary: Boundary::Periodic,
        }
    }

    /// Nonlinear model with the classic defaults: `f0 = 0`,
    /// `beta = 2e-11`, `nu = 1e-5`, `r = 1e-5`, periodic in x.
    pub fn nonlinear(nx: usize, ny: usize) -> Self {
        Self {
            nx,
            ny,
            lx: 1.0e7,
            ly: 1.0e7,
            f0: 0.0,
            beta: 2.0e-11,
            nu: 1.0e-5,
            nu_phi: None,
            r: 1.0e-5,
            dt: 1000.0,
            dynamics: Dynamics::Nonlinear(NonlinearParams::default()),
            boundary: Boundary::Periodic,
        }
    }

    /// The height diffusion coefficient actually used.
    pub fn resolved_nu_phi(&self) -> f64 {
        self.nu_phi.unwrap_or(self.nu)
    }

    /// Rows in each sponge layer.
    pub fn sponge_width(&self) -> usize {
        self.ny / SPONGE_FRACTION
    }

    /// Build the grid this configuration describes.
    pub fn grid(&self) -> Result<ArakawaCGrid, ConfigError> {
        Ok(ArakawaCGrid::new(self.nx, self.ny, self.lx, self.ly)?)
    }

    /// Check structural and physical invariants.
    ///
    /// Grid dimensions and extents are checked first, then the sponge
    /// width, the time step, and finally each coefficient. Diffusion,
    /// damping, gravity and depth must be finite and non-negative;
    /// Coriolis terms need only be finite.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.grid()?;
        if self.sponge_width() == 0 {
            return Err(ConfigError::SpongeTooNarrow { ny: self.ny });
        }
        if !(self.dt.is_finite() && self.dt > 0.0) {
            return Err(ConfigError::InvalidTimeStep { value: self.dt });
        }

        finite("f0", self.f0)?;
        finite("beta", self.beta)?;
        non_negative("nu", self.nu)?;
        non_negative("nu_phi", self.resolved_nu_phi())?;
        non_negative("r", self.r)?;
        if let Dynamics::Linear(p) = self.dynamics {
            non_negative("gravity", p.gravity)?;
            non_negative("mean_depth", p.mean_depth)?;
        }
        Ok(())
    }
}

fn finite(name: &'static str, value: f64) -> Result<(), ConfigError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(ConfigError::InvalidParameter { name, value })
    }
}

fn non_negative(name: &'static str, value: f64) -> Result<(), ConfigError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(ConfigError::InvalidParameter { name, value })
    }
}

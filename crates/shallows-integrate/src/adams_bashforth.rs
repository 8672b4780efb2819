//! Third-order Adams-Bashforth with Euler and AB2 start-up steps.

use std::collections::VecDeque;

use crate::vector::StateVector;

/// Highest order this integrator reaches, and its history bound.
const MAX_ORDER: usize = 3;

/// Weights for the newest-first tendency history, indexed by order.
const WEIGHTS: [&[f64]; MAX_ORDER] = [
    &[1.0],
    &[1.5, -0.5],
    &[23.0 / 12.0, -16.0 / 12.0, 5.0 / 12.0],
];

/// Stateful third-order Adams-Bashforth integrator with a fixed step.
///
/// Each [`advance`](Self::advance) call records one tendency and returns
/// the increment `dt * Σ w_k f_{n-k}`. The order used is the number of
/// tendencies on record, capped at three:
///
/// | call | order | weights |
/// |------|-------|---------|
/// | 1 | 1 (Euler) | `1` |
/// | 2 | 2 | `3/2, -1/2` |
/// | 3+ | 3 | `23/12, -16/12, 5/12` |
///
/// # Examples
///
/// ```
/// use shallows_integrate::AdamsBashforth3;
///
/// let mut ab = AdamsBashforth3::<f64>::new(0.5);
/// // Constant tendency: every increment is dt * c regardless of order.
/// for _ in 0..5 {
///     let inc = ab.advance(2.0);
///     assert!((inc - 1.0).abs() < 1e-12);
/// }
/// assert_eq!(ab.order(), 3);
/// ```
#[derive(Clone, Debug)]
pub struct AdamsBashforth3<T> {
    dt: f64,
    history: VecDeque<T>,
    steps: u64,
}

impl<T: StateVector> AdamsBashforth3<T> {
    /// A fresh integrator with empty history.
    pub fn new(dt: f64) -> Self {
        Self {
            dt,
            history: VecDeque::with_capacity(MAX_ORDER),
            steps: 0,
        }
    }

    /// The fixed step size.
    pub fn dt(&self) -> f64 {
        self.dt
    }

    /// Order of the most recent increment (0 before the first advance).
    pub fn order(&self) -> usize {
        self.history.len()
    }

    /// Number of tendencies currently retained (never more than three).
    pub fn history_len(&self) -> usize {
        self.history.len()
    }

    /// Total increments produced since construction or the last reset.
    pub fn steps(&self) -> u64 {
        self.steps
    }

    /// Record `tendency` and return the increment for this step.
    pub fn advance(&mut self, tendency: T) -> T {
        self.history.push_front(tendency);
        self.history.truncate(MAX_ORDER);
        self.steps += 1;

        let weights = WEIGHTS[self.history.len() - 1];
        let mut increment = self.history[0].scaled(weights[0] * self.dt);
        for (w, past) in weights[1..].iter().zip(self.history.iter().skip(1)) {
            increment.add_scaled(w * self.dt, past);
        }
        increment
    }

    /// Forget all history; the next increment is forward Euler again.
    pub fn reset(&mut self) {
        self.history.clear();
        self.steps = 0;
    }
}

//! Reusable forcing and tracer-source fixtures.
//!
//! - [`uniform_height_source`]: constant `∂phi/∂t` everywhere.
//! - [`linear_drag`]: Rayleigh friction on both velocities.
//! - [`failing_after`]: well-shaped for N calls, then wrong-shaped.
//! - [`relax_to_height`]: tracer source proportional to a height anomaly.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use ndarray::Array2;
use shallows_engine::{ModelView, Tendency};

/// Adds `rate` to the height tendency at every point.
pub fn uniform_height_source(rate: f64) -> impl Fn(&ModelView<'_>) -> Tendency + Send + 'static {
    move |view| {
        let mut t = Tendency::zeros(view.grid());
        t.phi.fill(rate);
        t
    }
}

/// `-k u`, `-k v` on the interior velocities.
pub fn linear_drag(k: f64) -> impl Fn(&ModelView<'_>) -> Tendency + Send + 'static {
    move |view| {
        let mut t = Tendency::zeros(view.grid());
        t.u = view.u().mapv(|u| -k * u);
        t.v = view.v().mapv(|v| -k * v);
        t
    }
}

/// A forcing that returns a zero tendency for its first `ok_calls`
/// evaluations and a wrong-shaped height tendency afterwards.
///
/// The registration probe counts as a call. The returned counter reports
/// how many evaluations have happened.
pub fn failing_after(
    ok_calls: usize,
) -> (
    impl Fn(&ModelView<'_>) -> Tendency + Send + 'static,
    Arc<AtomicUsize>,
) {
    let calls = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&calls);
    let f = move |view: &ModelView<'_>| {
        let n = counter.fetch_add(1, Ordering::SeqCst);
        let mut t = Tendency::zeros(view.grid());
        if n >= ok_calls {
            t.phi = Array2::zeros((1, 1));
        }
        t
    };
    (f, calls)
}

/// Tracer source `-rate * (phi - phi0)`.
pub fn relax_to_height(
    phi0: f64,
    rate: f64,
) -> impl Fn(&ModelView<'_>) -> Array2<f64> + Send + 'static {
    move |view| view.phi().mapv(|p| -rate * (p - phi0))
}

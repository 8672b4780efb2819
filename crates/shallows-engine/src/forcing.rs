//! Ordered registry of external forcings.

use std::fmt;

use shallows_core::{StepError, TendencySource};
use smallvec::SmallVec;

use crate::state::Tendency;
use crate::view::ModelView;

/// Boxed forcing or auxiliary right-hand-side callable.
pub type ForcingFn = Box<dyn Fn(&ModelView<'_>) -> Tendency + Send>;

/// Append-only list of forcings, summed in registration order.
#[derive(Default)]
pub struct ForcingRegistry {
    forcings: SmallVec<[ForcingFn; 4]>,
}

impl ForcingRegistry {
    /// An empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of registered forcings.
    pub fn len(&self) -> usize {
        self.forcings.len()
    }

    /// Whether no forcing has been registered.
    pub fn is_empty(&self) -> bool {
        self.forcings.is_empty()
    }

    pub(crate) fn push(&mut self, f: ForcingFn) {
        self.forcings.push(f);
    }

    /// Add every forcing's tendency into `total`, stopping at the first
    /// one that returns a wrong shape.
    pub(crate) fn accumulate(
        &self,
        view: &ModelView<'_>,
        total: &mut Tendency,
    ) -> Result<(), StepError> {
        for (index, f) in self.forcings.iter().enumerate() {
            *total += &evaluate(f, view, TendencySource::Forcing { index })?;
        }
        Ok(())
    }
}

impl fmt::Debug for ForcingRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ForcingRegistry")
            .field("len", &self.forcings.len())
            .finish()
    }
}

/// Call `f` on `view` and check the result against the grid.
pub(crate) fn evaluate(
    f: &ForcingFn,
    view: &ModelView<'_>,
    origin: TendencySource,
) -> Result<Tendency, StepError> {
    let tendency = f(view);
    match tendency.check_shape(view.grid(), &origin.to_string()) {
        Ok(()) => Ok(tendency),
        Err(mismatch) => Err(StepError::ShapeMismatch { origin, mismatch }),
    }
}

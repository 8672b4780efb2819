//! Strongly-typed counters.

use std::fmt;

/// Number of completed model steps.
///
/// Starts at zero and is incremented exactly once per committed step.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct StepCount(pub u64);

impl StepCount {
    /// The count after one more step.
    pub fn next(self) -> Self {
        Self(self.0 + 1)
    }
}

impl fmt::Display for StepCount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for StepCount {
    fn from(v: u64) -> Self {
        Self(v)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn next_increments() {
        assert_eq!(StepCount(0).next(), StepCount(1));
        assert_eq!(StepCount::default(), StepCount(0));
    }

    #[test]
    fn ordering_is_numeric() {
        assert!(StepCount(2) > StepCount(1));
        assert_eq!(StepCount::from(7).to_string(), "7");
    }
}

//! Simulation time model.
//!
//! Time is a monotonically increasing `Step` counter starting at zero.  One
//! step is one full pass of decay → death sweep → act → replenish → report.
//! There is no wall-clock mapping; pacing belongs to the driving loop.

use std::fmt;

/// An absolute simulation step counter.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Step(pub u64);

impl Step {
    pub const ZERO: Step = Step(0);

    /// The following step.
    #[inline]
    pub fn next(self) -> Step {
        Step(self.0 + 1)
    }

    /// `true` every `interval` steps, starting with step 0.
    ///
    /// An interval of 0 never fires.
    #[inline]
    pub fn is_every(self, interval: u64) -> bool {
        interval > 0 && self.0 % interval == 0
    }
}

impl std::ops::Add<u64> for Step {
    type Output = Step;
    #[inline]
    fn add(self, rhs: u64) -> Step {
        Step(self.0 + rhs)
    }
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "S{}", self.0)
    }
}

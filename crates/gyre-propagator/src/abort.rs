//! The [`AbortCondition`] extension point and the built-in path limit.

use gyre_core::AbortId;

use crate::context::StepContext;

/// A stopping predicate evaluated after every accepted step.
///
/// Signaling is by return value: `true` terminates the propagation with
/// an `Aborted` outcome attributed to this condition's id. Conditions are
/// an unordered set; the propagator evaluates them in registration order
/// and attributes the first trigger.
pub trait AbortCondition: Send + Sync {
    /// Stable identifier attributed in the outcome.
    fn id(&self) -> AbortId;

    /// Whether propagation should stop now.
    fn triggered(&self, ctx: &StepContext<'_>) -> bool;
}

/// Stop once the accumulated path length reaches the configured limit.
///
/// The propagator installs this condition implicitly from the options'
/// path limit, so every propagation is bounded even when the caller
/// registers no abort of their own.
#[derive(Clone, Copy, Debug)]
pub struct PathLimitReached {
    limit: f64,
    tolerance: f64,
}

impl PathLimitReached {
    /// Identifier attributed to path-limit terminations.
    pub const ID: AbortId = AbortId("path_limit");

    /// A limit on the absolute accumulated path length.
    pub fn new(limit: f64) -> Self {
        Self {
            limit: limit.abs(),
            tolerance: 1e-4,
        }
    }

    /// Override the arrival tolerance.
    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance;
        self
    }
}

impl AbortCondition for PathLimitReached {
    fn id(&self) -> AbortId {
        Self::ID
    }

    fn triggered(&self, ctx: &StepContext<'_>) -> bool {
        ctx.track().path_length.abs() >= self.limit - self.tolerance
    }
}

//! The [`Stepper`] trait.

use gyre_core::{FieldContext, SteppingError};

use crate::state::StepperState;

/// Advances a stepping state by one accepted step.
///
/// # Contract
///
/// - `step()` returns the signed path length actually taken, which is at
///   most the current [`trial_step`](StepperState::trial_step) in
///   magnitude; adaptive control may take less.
/// - After any accepted step the track direction is unit-normalized and
///   the accumulated path length is monotone in the propagation direction.
/// - On error the state is left untouched so the caller can retry with a
///   smaller ceiling or abort cleanly.
///
/// # Object safety
///
/// The trait is object-safe; the propagator stores its stepper as
/// `Box<dyn Stepper>`.
pub trait Stepper: Send + Sync {
    /// Human-readable name for error reporting and step traces.
    fn name(&self) -> &str;

    /// Attempt one step, honoring the state's current step ceiling.
    fn step(&self, state: &mut StepperState, fctx: &FieldContext)
        -> Result<f64, SteppingError>;
}

//! Closed-form straight-line transport.

use gyre_core::{FieldContext, SteppingError};

use crate::state::StepperState;
use crate::stepper::Stepper;

/// Field-free transport: each step takes exactly the allowed bound.
///
/// Serves as the correctness oracle for the adaptive stepper — every
/// propagation-level property that holds for the Runge-Kutta variant must
/// also hold here.
#[derive(Clone, Copy, Debug, Default)]
pub struct StraightLineStepper;

impl StraightLineStepper {
    /// A new straight-line stepper.
    pub fn new() -> Self {
        Self
    }
}

impl Stepper for StraightLineStepper {
    fn name(&self) -> &str {
        "straight_line"
    }

    fn step(
        &self,
        state: &mut StepperState,
        _fctx: &FieldContext,
    ) -> Result<f64, SteppingError> {
        let h = state.trial_step();
        state.track.position = state.track.position + state.track.direction * h;
        state.track.path_length += h;
        Ok(h)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gyre_core::{Direction, TrackState, Vec3};

    #[test]
    fn step_takes_exactly_the_bound() {
        let track = TrackState::new(Vec3::ZERO, Vec3::new(0.0, 1.0, 0.0), -1.0, 3.0);
        let mut state = StepperState::new(track, Direction::Forward, 1000.0, 1e-4);
        state.set_nav_bound(42.0);
        let taken = StraightLineStepper::new()
            .step(&mut state, &FieldContext::default())
            .unwrap();
        assert_eq!(taken, 42.0);
        assert_eq!(state.position(), Vec3::new(0.0, 42.0, 0.0));
        assert_eq!(state.track.path_length, 42.0);
    }

    #[test]
    fn backward_step_decrements_path() {
        let track = TrackState::new(Vec3::new(0.0, 100.0, 0.0), Vec3::new(0.0, 1.0, 0.0), 1.0, 1.0);
        let mut state = StepperState::new(track, Direction::Backward, 1000.0, 1e-4);
        state.set_nav_bound(30.0);
        let taken = StraightLineStepper::new()
            .step(&mut state, &FieldContext::default())
            .unwrap();
        assert_eq!(taken, -30.0);
        assert_eq!(state.position(), Vec3::new(0.0, 70.0, 0.0));
        assert_eq!(state.track.path_length, -30.0);
    }
}

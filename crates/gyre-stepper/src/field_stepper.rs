//! Adaptive Runge-Kutta transport in a magnetic field.

use gyre_core::{FieldContext, FieldProvider, SteppingError, Vec3};

use crate::state::{StepperState, MAX_STEP_TRIALS, STEP_SIZE_FLOOR};
use crate::stepper::Stepper;

/// Fourth-order Runge-Kutta-Nystrom stepper for the magnetic equation of
/// motion `dT/ds = (q/p) T x B(r)`.
///
/// The embedded error estimate `h^2 |k1 - k2 - k3 + k4|` drives step-size
/// control: trials shrink by `clamp((tol/err)^1/4, 1/4, 4)` until the
/// estimate meets the tolerance, and the accepted step seeds the next trial
/// scaled by the same factor. Neutral tracks have `q/p = 0` and degrade to
/// exact straight-line transport.
///
/// Stepping is reversible: integrating backward from an end point over the
/// same accumulated path reproduces the start point to within the error
/// tolerance, which the round-trip tests rely on.
pub struct RungeKuttaStepper {
    field: Box<dyn FieldProvider>,
}

impl RungeKuttaStepper {
    /// A stepper integrating through the given field.
    pub fn new(field: Box<dyn FieldProvider>) -> Self {
        Self { field }
    }
}

impl Stepper for RungeKuttaStepper {
    fn name(&self) -> &str {
        "runge_kutta"
    }

    fn step(
        &self,
        state: &mut StepperState,
        fctx: &FieldContext,
    ) -> Result<f64, SteppingError> {
        let mut h = state.trial_step();
        let pos = state.track.position;
        let dir = state.track.direction;
        let qop = state.track.qop();
        let tolerance = state.tolerance();

        // First evaluation is h-independent and shared across trials.
        let b_first = self.field.value_at(fctx, pos);
        let k1 = dir.cross(b_first) * qop;

        let mut trials = 0u32;
        let (k2, k3, k4, error) = loop {
            let half = 0.5 * h;
            let pos_mid = pos + dir * half + k1 * (h * h * 0.125);
            let b_mid = self.field.value_at(fctx, pos_mid);
            let k2 = (dir + k1 * half).cross(b_mid) * qop;
            let k3 = (dir + k2 * half).cross(b_mid) * qop;
            let pos_end = pos + dir * h + k3 * (h * h * 0.5);
            let b_last = self.field.value_at(fctx, pos_end);
            let k4 = (dir + k3 * h).cross(b_last) * qop;

            let error = h * h * (k1 - k2 - k3 + k4).sum_abs();
            if error.is_finite() && error <= tolerance {
                break (k2, k3, k4, error);
            }

            trials += 1;
            state.note_rejected_trial();
            if trials >= MAX_STEP_TRIALS {
                return Err(SteppingError::NotConverged { trials });
            }
            let scale = if error.is_finite() && error > 0.0 {
                (tolerance / error).powf(0.25).clamp(0.25, 4.0)
            } else {
                0.25
            };
            h *= scale;
            if h.abs() < STEP_SIZE_FLOOR {
                return Err(SteppingError::StepSizeUnderflow {
                    step_size: h,
                    floor: STEP_SIZE_FLOOR,
                });
            }
        };

        let h2 = h * h;
        state.track.position = pos + dir * h + (k1 + k2 + k3) * (h2 / 6.0);
        state.track.direction =
            (dir + (k1 + k2 * 2.0 + k3 * 2.0 + k4) * (h / 6.0)).normalized();
        state.track.path_length += h;

        // Seed the next trial from the accepted step; a comfortable error
        // margin lets it grow, a tight one keeps it shrunken.
        let scale = (tolerance / error.max(1e-20)).powf(0.25).clamp(0.25, 4.0);
        state.set_trial(h.abs() * scale);

        Ok(h)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gyre_core::{ConstantField, Direction, TrackState, units};

    const BZ: f64 = 2.0 * units::T;

    fn stepper() -> RungeKuttaStepper {
        RungeKuttaStepper::new(Box::new(ConstantField::axial(BZ)))
    }

    fn unit_pt_track() -> TrackState {
        TrackState::new(Vec3::ZERO, Vec3::new(1.0, 0.0, 0.0), 1.0, 1.0)
    }

    fn advance(state: &mut StepperState, stepper: &RungeKuttaStepper, bound: f64, steps: usize) {
        let fctx = FieldContext::default();
        for _ in 0..steps {
            state.set_nav_bound(bound);
            stepper.step(state, &fctx).unwrap();
        }
    }

    #[test]
    fn neutral_track_goes_straight() {
        let mut track = unit_pt_track();
        track.q = 0.0;
        let mut state = StepperState::new(track, Direction::Forward, 100.0, 1e-4);
        advance(&mut state, &stepper(), 100.0, 5);
        assert!((state.position().x - 500.0).abs() < 1e-9);
        assert!(state.position().y.abs() < 1e-9);
        assert!((state.track.path_length - 500.0).abs() < 1e-9);
    }

    #[test]
    fn charged_track_follows_helix_radius() {
        // r = pt / B for unit charge; the center sits at (0, -r, 0) for a
        // positive charge starting along +x in a +z field.
        let r = 1.0 / BZ;
        let mut state = StepperState::new(unit_pt_track(), Direction::Forward, 10.0, 1e-4);
        advance(&mut state, &stepper(), 10.0, 100);

        let center = Vec3::new(0.0, -r, 0.0);
        assert!((state.position().distance(center) - r).abs() < 1e-2);
        assert!((state.direction_vector().norm() - 1.0).abs() < 1e-12);
        assert!(state.position().z.abs() < 1e-9);
        assert!((state.track.path_length - 1000.0).abs() < 1e-9);
    }

    #[test]
    fn backward_stepping_reverses_forward() {
        let mut state = StepperState::new(unit_pt_track(), Direction::Forward, 10.0, 1e-4);
        let s = stepper();
        advance(&mut state, &s, 10.0, 50);
        let turnaround = state.track.clone();

        let mut back = StepperState::new(turnaround, Direction::Backward, 10.0, 1e-4);
        advance(&mut back, &s, 10.0, 50);

        assert!(back.position().distance(Vec3::ZERO) < 1e-3);
        assert!((back.direction_vector() - Vec3::new(1.0, 0.0, 0.0)).norm() < 1e-6);
        assert!(back.track.path_length.abs() < 1e-9);
    }

    #[test]
    fn pathological_field_fails_without_corrupting_state() {
        struct NanField;
        impl FieldProvider for NanField {
            fn value_at(&self, _fctx: &FieldContext, _position: Vec3) -> Vec3 {
                Vec3::new(f64::NAN, 0.0, 0.0)
            }
        }

        let s = RungeKuttaStepper::new(Box::new(NanField));
        let mut state = StepperState::new(unit_pt_track(), Direction::Forward, 10.0, 1e-4);
        let before = state.track.clone();
        let err = s.step(&mut state, &FieldContext::default()).unwrap_err();
        assert!(matches!(err, SteppingError::StepSizeUnderflow { .. }));
        assert_eq!(state.track, before);
    }

    #[test]
    fn trial_step_shrinks_under_strong_curvature() {
        // A grossly over-sized trial in a strong field must be rejected and
        // re-tried smaller, not accepted with a large error.
        let strong = RungeKuttaStepper::new(Box::new(ConstantField::axial(1000.0 * units::T)));
        let mut state = StepperState::new(unit_pt_track(), Direction::Forward, 500.0, 1e-4);
        let fctx = FieldContext::default();
        let taken = strong.step(&mut state, &fctx).unwrap();
        assert!(taken.abs() < 500.0);
        assert!(state.rejected_trials() > 0);
    }
}

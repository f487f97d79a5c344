//! Mutable stepping state threaded through the propagation loop.

use gyre_core::{Direction, TrackState, Vec3};

/// Numerical floor for the adaptive trial step, in mm.
///
/// Error control that shrinks a trial below this floor surfaces a
/// [`SteppingError::StepSizeUnderflow`](gyre_core::SteppingError) instead
/// of looping forever.
pub const STEP_SIZE_FLOOR: f64 = 1e-6;

/// Budget of rejected trials per step before giving up.
pub const MAX_STEP_TRIALS: u32 = 1000;

/// Integration working state wrapped around the in-flight [`TrackState`].
///
/// Owns the track for the duration of one propagation. The adaptive trial
/// step survives across accepted steps (a stepper that just shrank for a
/// tight curve starts the next step from the shrunken value); the
/// navigator-imposed ceiling is re-applied every step through
/// [`set_nav_bound`](StepperState::set_nav_bound).
#[derive(Clone, Debug)]
pub struct StepperState {
    /// The in-flight track parameters.
    pub track: TrackState,
    direction: Direction,
    /// Absolute adaptive trial step for the next attempt.
    pub(crate) step_size: f64,
    nav_bound: f64,
    max_step: f64,
    tolerance: f64,
    rejected_trials: u32,
}

impl StepperState {
    /// Wrap a start state for propagation in the given direction.
    pub fn new(track: TrackState, direction: Direction, max_step: f64, tolerance: f64) -> Self {
        Self {
            track,
            direction,
            step_size: max_step,
            nav_bound: f64::INFINITY,
            max_step,
            tolerance,
            rejected_trials: 0,
        }
    }

    /// Current global position.
    pub fn position(&self) -> Vec3 {
        self.track.position
    }

    /// Current unit momentum direction.
    pub fn direction_vector(&self) -> Vec3 {
        self.track.direction
    }

    /// Current absolute momentum.
    pub fn momentum(&self) -> f64 {
        self.track.p
    }

    /// Track charge.
    pub fn charge(&self) -> f64 {
        self.track.q
    }

    /// Propagation direction.
    pub fn nav_direction(&self) -> Direction {
        self.direction
    }

    /// Integration error tolerance.
    pub fn tolerance(&self) -> f64 {
        self.tolerance
    }

    /// Total rejected trial steps so far.
    pub fn rejected_trials(&self) -> u32 {
        self.rejected_trials
    }

    /// Impose an external (navigator) ceiling on the next step, absolute.
    pub fn set_nav_bound(&mut self, bound: f64) {
        self.nav_bound = bound.abs();
    }

    /// Remove the external ceiling.
    pub fn release_nav_bound(&mut self) {
        self.nav_bound = f64::INFINITY;
    }

    /// The signed step length the next trial starts from: the adaptive
    /// trial capped by the navigator ceiling and the configured maximum.
    pub fn trial_step(&self) -> f64 {
        self.direction.sign() * self.step_size.min(self.nav_bound).min(self.max_step)
    }

    /// Record a rejected trial.
    pub(crate) fn note_rejected_trial(&mut self) {
        self.rejected_trials += 1;
    }

    /// Store the adaptive trial for the next step, capped by the
    /// configured maximum.
    pub(crate) fn set_trial(&mut self, step: f64) {
        self.step_size = step.abs().min(self.max_step);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn track() -> TrackState {
        TrackState::new(Vec3::ZERO, Vec3::new(1.0, 0.0, 0.0), 1.0, 1.0)
    }

    #[test]
    fn trial_step_is_signed_and_capped() {
        let mut state = StepperState::new(track(), Direction::Forward, 100.0, 1e-4);
        assert_eq!(state.trial_step(), 100.0);
        state.set_nav_bound(25.0);
        assert_eq!(state.trial_step(), 25.0);
        state.release_nav_bound();
        assert_eq!(state.trial_step(), 100.0);
    }

    #[test]
    fn backward_trial_is_negative() {
        let mut state = StepperState::new(track(), Direction::Backward, 50.0, 1e-4);
        state.set_nav_bound(-10.0);
        assert_eq!(state.trial_step(), -10.0);
    }

    #[test]
    fn adaptive_trial_never_exceeds_max_step() {
        let mut state = StepperState::new(track(), Direction::Forward, 50.0, 1e-4);
        state.set_trial(400.0);
        assert_eq!(state.trial_step(), 50.0);
    }
}

//! The [`Propagator`]: the orchestrating loop.

use std::sync::Arc;

use indexmap::IndexMap;

use gyre_core::{
    AbortId, ActionId, GeometryProvider, PropagationError, SurfaceId, TrackState,
};
use gyre_navigator::{NavTarget, Navigator};
use gyre_stepper::{Stepper, StepperState};

use crate::abort::{AbortCondition, PathLimitReached};
use crate::action::ActionResult;
use crate::context::StepContext;
use crate::options::PropagatorOptions;
use crate::result::{Outcome, PropagationResult, StepStats};

/// Propagates track states through a geometry with a pluggable stepper.
///
/// One propagator instance serves arbitrarily many concurrent
/// [`propagate`](Propagator::propagate) calls: every call works on its own
/// track, stepping state and navigation state, and the shared geometry and
/// stepper are read-only.
pub struct Propagator {
    stepper: Box<dyn Stepper>,
    geometry: Arc<dyn GeometryProvider>,
}

impl Propagator {
    /// Wire a stepper to a geometry.
    pub fn new(stepper: Box<dyn Stepper>, geometry: Arc<dyn GeometryProvider>) -> Self {
        Self { stepper, geometry }
    }

    /// The geometry this propagator navigates.
    pub fn geometry(&self) -> &dyn GeometryProvider {
        self.geometry.as_ref()
    }

    /// Propagate until an abort fires or the geometry is exited.
    pub fn propagate(
        &self,
        start: TrackState,
        options: PropagatorOptions,
    ) -> Result<PropagationResult, PropagationError> {
        self.run(start, None, options)
    }

    /// Propagate toward an explicit target surface; arrival terminates
    /// with success and takes precedence over a same-step path-limit
    /// abort.
    pub fn propagate_to_surface(
        &self,
        start: TrackState,
        target: SurfaceId,
        options: PropagatorOptions,
    ) -> Result<PropagationResult, PropagationError> {
        self.run(start, Some(target), options)
    }

    fn run(
        &self,
        start: TrackState,
        target: Option<SurfaceId>,
        options: PropagatorOptions,
    ) -> Result<PropagationResult, PropagationError> {
        options.validate()?;
        let dir = options.direction;

        let mut records: IndexMap<ActionId, Box<dyn ActionResult>> = IndexMap::new();
        for action in &options.actions {
            records.insert(action.id(), action.new_result());
        }

        // Path accounting is per propagation, whatever the start state
        // carried in from an earlier one.
        let mut track = start;
        track.path_length = 0.0;

        let mut state = StepperState::new(track, dir, options.max_step_size, options.tolerance);
        let geometry = self.geometry.as_ref();
        let mut nav = Navigator::new(
            geometry,
            options.geometry_context,
            target,
            options.surface_tolerance,
            options.path_limit,
        );
        nav.initialize(&state.track, dir)?;

        let implicit_limit =
            PathLimitReached::new(options.path_limit).with_tolerance(options.surface_tolerance);

        let mut steps: u64 = 0;
        let outcome = loop {
            let remaining = options.path_limit - state.track.path_length.abs();
            if remaining <= options.surface_tolerance {
                break Outcome::Aborted(PathLimitReached::ID);
            }

            // 1. The navigator proposes the next candidate and ceiling.
            let bound = match nav.next_target(&state.track, dir)? {
                NavTarget::Surface { distance } => distance.min(remaining),
                NavTarget::Drift => remaining,
                NavTarget::Done => break Outcome::Success,
            };

            // 2. The stepper advances by at most that ceiling.
            state.set_nav_bound(bound);
            let taken = self.stepper.step(&mut state, &options.field_context)?;
            steps += 1;

            // 3. Crossing handling and volume switches.
            nav.post_step(&state.track, dir, taken.abs())?;

            // 4. Actions in registration order, then abort evaluation on
            // the state they left behind.
            let mut triggered: Option<AbortId> = None;
            {
                let mut ctx = StepContext::new(
                    &mut state.track,
                    geometry,
                    &options.geometry_context,
                    dir,
                    taken,
                    nav.current_surface(),
                    nav.current_volume(),
                    options.path_limit,
                    steps,
                );
                for action in &options.actions {
                    if let Some(record) = records.get_mut(&action.id()) {
                        action.act(&mut ctx, record.as_mut());
                    }
                }
                // 5. Arrival beats any abort that fires on the same step.
                if !nav.target_reached() && !nav.terminated() {
                    for abort in &options.aborts {
                        if abort.triggered(&ctx) {
                            triggered = Some(abort.id());
                            break;
                        }
                    }
                    if triggered.is_none() && implicit_limit.triggered(&ctx) {
                        triggered = Some(PathLimitReached::ID);
                    }
                }
            }
            if nav.target_reached() || nav.terminated() {
                break Outcome::Success;
            }
            if let Some(id) = triggered {
                break Outcome::Aborted(id);
            }
        };

        let stats = StepStats {
            steps,
            rejected_trials: state.rejected_trials(),
            volumes_switched: nav.volumes_switched(),
            surfaces_crossed: nav.surfaces_crossed(),
        };
        let path_length = state.track.path_length;
        Ok(PropagationResult {
            end: state.track,
            path_length,
            outcome,
            stats,
            actions: records,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::step_logger::{StepLogger, StepTrace};
    use gyre_core::{ConfigError, NavigationError, Vec3};
    use gyre_stepper::StraightLineStepper;
    use gyre_test_utils::{charged_track, CylinderTracker};
    use std::f64::consts::FRAC_PI_2;

    fn straight_line_propagator() -> (Propagator, Arc<CylinderTracker>) {
        let geometry = Arc::new(CylinderTracker::tracker());
        let prop = Propagator::new(
            Box::new(StraightLineStepper::new()),
            geometry.clone() as Arc<dyn GeometryProvider>,
        );
        (prop, geometry)
    }

    #[test]
    fn straight_track_exits_the_world() {
        let (prop, geo) = straight_line_propagator();
        let result = prop
            .propagate(
                charged_track(1.0, 0.0, FRAC_PI_2, 0.0),
                PropagatorOptions::default(),
            )
            .unwrap();
        assert_eq!(result.outcome, Outcome::Success);
        assert!((result.path_length - geo.world_radius()).abs() < 1e-6);
        assert!((result.end.position.perp() - geo.world_radius()).abs() < 1e-6);
        assert_eq!(result.stats.volumes_switched, 2);
        assert_eq!(result.stats.surfaces_crossed, 10);
    }

    #[test]
    fn path_limit_aborts_mid_flight() {
        let (prop, _) = straight_line_propagator();
        let mut options = PropagatorOptions::default();
        options.path_limit = 50.0;
        let result = prop
            .propagate(charged_track(1.0, 0.0, FRAC_PI_2, 0.0), options)
            .unwrap();
        assert_eq!(result.outcome, Outcome::Aborted(PathLimitReached::ID));
        assert!((result.path_length - 50.0).abs() < 1e-3);
    }

    #[test]
    fn target_arrival_beats_path_limit_on_the_same_step() {
        let (prop, geo) = straight_line_propagator();
        let target = geo.surface_at_radius(116.0).unwrap();
        let mut options = PropagatorOptions::default();
        // Both the target and the limit sit exactly 116 mm ahead.
        options.path_limit = 116.0;
        let result = prop
            .propagate_to_surface(charged_track(1.0, 0.0, FRAC_PI_2, 0.0), target, options)
            .unwrap();
        assert_eq!(result.outcome, Outcome::Success);
        assert!((result.end.position.perp() - 116.0).abs() < 1e-6);
    }

    #[test]
    fn target_arrival_stops_exactly_on_the_surface() {
        let (prop, geo) = straight_line_propagator();
        let target = geo.surface_at_radius(72.0).unwrap();
        let result = prop
            .propagate_to_surface(
                charged_track(1.0, 0.3, FRAC_PI_2, 0.0),
                target,
                PropagatorOptions::default(),
            )
            .unwrap();
        assert_eq!(result.outcome, Outcome::Success);
        assert!((result.end.position.perp() - 72.0).abs() < 1e-6);
        assert!((result.path_length - 72.0).abs() < 1e-6);
    }

    #[test]
    fn registered_actions_have_records_and_only_those() {
        let (prop, _) = straight_line_propagator();
        let mut options = PropagatorOptions::default();
        options.actions.push(Box::new(StepLogger::new()));
        let result = prop
            .propagate(charged_track(1.0, 0.0, FRAC_PI_2, 0.0), options)
            .unwrap();

        assert!(result.has_action(StepLogger::ID));
        let trace: &StepTrace = result.get(StepLogger::ID).unwrap();
        assert_eq!(trace.lines.len() as u64, result.stats.steps);
        assert!(!result.has_action(crate::material_interactor::MaterialInteractor::ID));
        assert_eq!(result.action_ids().collect::<Vec<_>>(), vec![StepLogger::ID]);
    }

    #[test]
    fn invalid_options_are_rejected_up_front() {
        let (prop, _) = straight_line_propagator();
        let mut options = PropagatorOptions::default();
        options.tolerance = -1.0;
        let err = prop
            .propagate(charged_track(1.0, 0.0, FRAC_PI_2, 0.0), options)
            .unwrap_err();
        assert!(matches!(
            err,
            PropagationError::Config(ConfigError::NonPositiveTolerance { .. })
        ));
    }

    #[test]
    fn start_outside_geometry_fails() {
        let (prop, _) = straight_line_propagator();
        let mut track = charged_track(1.0, 0.0, FRAC_PI_2, 0.0);
        track.position = Vec3::new(0.0, 0.0, 5000.0);
        let err = prop
            .propagate(track, PropagatorOptions::default())
            .unwrap_err();
        assert!(matches!(
            err,
            PropagationError::Navigation(NavigationError::OutsideGeometry { .. })
        ));
    }

    #[test]
    fn stale_path_length_on_the_start_state_is_reset() {
        let (prop, _) = straight_line_propagator();
        let mut track = charged_track(1.0, 0.0, FRAC_PI_2, 0.0);
        track.path_length = 9999.0;
        let mut options = PropagatorOptions::default();
        options.path_limit = 50.0;
        let result = prop.propagate(track, options).unwrap();
        assert!((result.path_length - 50.0).abs() < 1e-3);
    }
}

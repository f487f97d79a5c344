//! Track propagation through hierarchical detector geometries.
//!
//! Gyre propagates charged (or neutral) particle trajectories through a
//! volume hierarchy supplied by an external geometry provider, producing
//! updated track parameters, covariance and collected observables at a
//! caller-specified destination: a target surface, a path-length limit,
//! or a custom abort condition.
//!
//! This crate re-exports the public surface of the workspace:
//!
//! - [`gyre_core`]: ids, math, units, errors, material, the geometry and
//!   field contracts, track state.
//! - [`gyre_stepper`]: the [`Stepper`] trait with the adaptive
//!   [`RungeKuttaStepper`] and the [`StraightLineStepper`] oracle.
//! - [`gyre_navigator`]: candidate targeting and volume switching.
//! - [`gyre_propagator`]: the [`Propagator`] loop, options, and the
//!   action/abort framework.
//!
//! # Quickstart
//!
//! ```
//! use std::sync::Arc;
//! use gyre::{
//!     Direction, GeometryProvider, MaterialInteractor, MaterialRecord, Outcome,
//!     Propagator, PropagatorOptions, RungeKuttaStepper, ConstantField, units,
//! };
//! use gyre_test_utils::{charged_track, CylinderTracker};
//!
//! // A barrel tracker and a 2 T axial field.
//! let geometry = Arc::new(CylinderTracker::tracker());
//! let field = ConstantField::axial(2.0 * units::T);
//! let propagator = Propagator::new(
//!     Box::new(RungeKuttaStepper::new(Box::new(field))),
//!     geometry as Arc<dyn GeometryProvider>,
//! );
//!
//! // Propagate a 1 GeV track for at most 25 cm, collecting material.
//! let mut options = PropagatorOptions::default();
//! options.direction = Direction::Forward;
//! options.path_limit = 25.0 * units::CM;
//! options.actions.push(Box::new(MaterialInteractor {
//!     multiple_scattering: false,
//!     energy_loss: false,
//!     record_interactions: true,
//! }));
//!
//! let result = propagator
//!     .propagate(charged_track(1.0, 0.0, std::f64::consts::FRAC_PI_2, 1.0), options)
//!     .unwrap();
//!
//! assert!(matches!(result.outcome, Outcome::Aborted(_)));
//! let material: &MaterialRecord = result.get(MaterialInteractor::ID).unwrap();
//! assert!(material.material_in_x0 > 0.0);
//! ```

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub use gyre_core::{
    units, AbortId, ActionId, ConfigError, ConstantField, Covariance, Direction, FieldContext,
    FieldProvider, GeometryContext, GeometryProvider, Material, MaterialSlab, NavigationError,
    ParamIndex, PropagationError, SteppingError, SurfaceId, SurfaceRole, TrackState, Vec3,
    VolumeId,
};
pub use gyre_navigator::{NavTarget, NavigationEvent, NavigationStage, Navigator};
pub use gyre_propagator::{
    AbortCondition, Action, ActionResult, MaterialInteraction, MaterialInteractor,
    MaterialRecord, Outcome, PathLimitReached, PropagationResult, Propagator, PropagatorOptions,
    StepContext, StepLogger, StepStats, StepTrace,
};
pub use gyre_stepper::{RungeKuttaStepper, Stepper, StepperState, StraightLineStepper};

//! Per-step view handed to actions and abort conditions.

use gyre_core::{Direction, GeometryContext, GeometryProvider, SurfaceId, TrackState, VolumeId};

/// Snapshot of one accepted step, as left by the stepper and navigator.
///
/// Actions receive it mutably — interaction effects (energy loss,
/// covariance inflation) go through [`track_mut`](StepContext::track_mut)
/// and are visible to later actions in the same step. Per-action result
/// records are disjoint and passed separately.
pub struct StepContext<'a> {
    track: &'a mut TrackState,
    geometry: &'a dyn GeometryProvider,
    gctx: &'a GeometryContext,
    direction: Direction,
    step_length: f64,
    surface: Option<SurfaceId>,
    volume: Option<VolumeId>,
    path_limit: f64,
    steps: u64,
}

impl<'a> StepContext<'a> {
    /// Construct a step context. Called by the propagator loop; tests may
    /// build one directly around a mock geometry.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        track: &'a mut TrackState,
        geometry: &'a dyn GeometryProvider,
        gctx: &'a GeometryContext,
        direction: Direction,
        step_length: f64,
        surface: Option<SurfaceId>,
        volume: Option<VolumeId>,
        path_limit: f64,
        steps: u64,
    ) -> Self {
        Self {
            track,
            geometry,
            gctx,
            direction,
            step_length,
            surface,
            volume,
            path_limit,
            steps,
        }
    }

    /// The track as left by this step.
    pub fn track(&self) -> &TrackState {
        self.track
    }

    /// Mutable track access for interaction effects.
    pub fn track_mut(&mut self) -> &mut TrackState {
        self.track
    }

    /// The geometry provider.
    pub fn geometry(&self) -> &dyn GeometryProvider {
        self.geometry
    }

    /// The geometry context threaded through this propagation.
    pub fn geometry_context(&self) -> &GeometryContext {
        self.gctx
    }

    /// Propagation direction.
    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// Signed path length of the step just taken.
    pub fn step_length(&self) -> f64 {
        self.step_length
    }

    /// Surface crossed by this step, if any.
    pub fn surface(&self) -> Option<SurfaceId> {
        self.surface
    }

    /// Volume the track is currently in, if any.
    pub fn volume(&self) -> Option<VolumeId> {
        self.volume
    }

    /// Absolute path budget of this propagation.
    pub fn path_limit(&self) -> f64 {
        self.path_limit
    }

    /// Remaining absolute path budget.
    pub fn remaining_path(&self) -> f64 {
        self.path_limit - self.track.path_length.abs()
    }

    /// Number of accepted steps so far, this one included.
    pub fn steps(&self) -> u64 {
        self.steps
    }
}

//! The [`Navigator`]: candidate targeting and volume switching.

use smallvec::SmallVec;

use gyre_core::{
    Direction, GeometryContext, GeometryProvider, NavigationError, SurfaceId, SurfaceRole,
    TrackState, VolumeId,
};

use crate::candidate::{sort_candidates, Candidate};
use crate::stage::{transition, NavigationEvent, NavigationStage};

/// Re-intersection distances up to this (mm) count as the same crossing
/// still being converged on; anything farther is a different intersection
/// (e.g. the far side of a cylinder) and means the surface was passed.
const CONVERGENCE_WINDOW: f64 = 1.0;

/// What the navigator proposes for the next loop iteration.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum NavTarget {
    /// Step toward the active candidate; the stepper must not exceed
    /// `distance`.
    Surface {
        /// Distance to the candidate along the travel direction.
        distance: f64,
    },
    /// Every remaining candidate lies beyond the path budget; the stepper
    /// may take its full step until the path-limit abort fires.
    Drift,
    /// Navigation has terminated (target reached or geometry exited).
    Done,
}

/// Per-propagation navigation state.
///
/// Holds only ids into the externally owned geometry. Candidates are
/// rebuilt whenever the current volume changes and re-intersected from the
/// current position on every iteration, so curved tracks converge onto
/// surfaces instead of drifting off stale straight-line estimates.
pub struct Navigator<'g> {
    geometry: &'g dyn GeometryProvider,
    gctx: GeometryContext,
    target: Option<SurfaceId>,
    surface_tolerance: f64,
    path_limit: f64,
    stage: NavigationStage,
    volume: Option<VolumeId>,
    current_surface: Option<SurfaceId>,
    candidates: SmallVec<[Candidate; 8]>,
    index: usize,
    active: bool,
    active_distance: f64,
    target_reached: bool,
    volumes_switched: u32,
    surfaces_crossed: u32,
}

impl<'g> Navigator<'g> {
    /// A navigator for one propagation.
    ///
    /// `path_limit` is the absolute path budget; candidates beyond the
    /// remaining budget are discarded at enumeration time.
    pub fn new(
        geometry: &'g dyn GeometryProvider,
        gctx: GeometryContext,
        target: Option<SurfaceId>,
        surface_tolerance: f64,
        path_limit: f64,
    ) -> Self {
        Self {
            geometry,
            gctx,
            target,
            surface_tolerance,
            path_limit,
            stage: NavigationStage::Initializing,
            volume: None,
            current_surface: None,
            candidates: SmallVec::new(),
            index: 0,
            active: false,
            active_distance: 0.0,
            target_reached: false,
            volumes_switched: 0,
            surfaces_crossed: 0,
        }
    }

    /// Resolve the containing volume of the start position and enumerate
    /// its candidates.
    pub fn initialize(&mut self, track: &TrackState, dir: Direction) -> Result<(), NavigationError> {
        match self.geometry.containing_volume(&self.gctx, track.position) {
            Some(volume) => {
                self.volume = Some(volume);
                self.apply(NavigationEvent::VolumeResolved);
                self.enter_volume(volume, track, dir);
                Ok(())
            }
            None => Err(NavigationError::OutsideGeometry {
                position: track.position,
            }),
        }
    }

    /// Propose the next candidate and step ceiling.
    ///
    /// Re-intersects the active candidate from the current position and
    /// skips candidates the track has curled away from; exhausting the
    /// list triggers one re-enumeration before giving up.
    pub fn next_target(
        &mut self,
        track: &TrackState,
        dir: Direction,
    ) -> Result<NavTarget, NavigationError> {
        self.current_surface = None;
        if self.stage == NavigationStage::Terminated {
            return Ok(NavTarget::Done);
        }
        let travel = track.direction * dir.sign();
        let mut rebuilt = false;
        loop {
            while self.index < self.candidates.len() {
                let c = self.candidates[self.index];
                match self
                    .geometry
                    .intersect(&self.gctx, c.surface, track.position, travel)
                {
                    Some(d) if d > self.surface_tolerance => {
                        self.candidates[self.index].distance = d;
                        self.active = true;
                        self.active_distance = d;
                        let event = if c.role == SurfaceRole::Boundary && !c.is_target {
                            NavigationEvent::BoundaryTargeted
                        } else {
                            NavigationEvent::LayerTargeted
                        };
                        self.apply(event);
                        return Ok(NavTarget::Surface { distance: d });
                    }
                    // Stale: passed or curled away from it.
                    _ => self.index += 1,
                }
            }
            if rebuilt {
                return Err(NavigationError::NoCandidateSurface);
            }
            let volume = self.volume.ok_or(NavigationError::NoCandidateSurface)?;
            let any_forward = self.enter_volume(volume, track, dir);
            rebuilt = true;
            if self.candidates.is_empty() {
                self.active = false;
                return if any_forward {
                    Ok(NavTarget::Drift)
                } else {
                    Err(NavigationError::NoCandidateSurface)
                };
            }
        }
    }

    /// Account for an accepted step of `taken_abs` and handle a crossing
    /// of the active candidate: record it, advance past layers, switch
    /// volumes at boundaries, terminate at the target or the world edge.
    ///
    /// A crossing is declared only once the candidate re-intersects within
    /// the on-surface tolerance (or not at all). A curved track that
    /// consumed its arc-length budget can still sit short of the surface
    /// by the chord-sagitta difference; such a track keeps converging.
    pub fn post_step(
        &mut self,
        track: &TrackState,
        dir: Direction,
        taken_abs: f64,
    ) -> Result<(), NavigationError> {
        if self.stage == NavigationStage::Terminated || !self.active {
            return Ok(());
        }
        self.active_distance -= taken_abs;
        if self.active_distance > self.surface_tolerance {
            return Ok(());
        }

        // Verify by re-intersection before declaring the crossing.
        let travel = track.direction * dir.sign();
        let crossed = self.candidates[self.index];
        if let Some(d) =
            self.geometry
                .intersect(&self.gctx, crossed.surface, track.position, travel)
        {
            if d > self.surface_tolerance && d <= CONVERGENCE_WINDOW {
                // Same intersection, still slightly ahead of the consumed
                // arc length.
                self.active_distance = d;
                self.candidates[self.index].distance = d;
                return Ok(());
            }
        }
        self.current_surface = Some(crossed.surface);
        self.surfaces_crossed += 1;
        self.active = false;

        if crossed.is_target {
            self.target_reached = true;
            self.apply(NavigationEvent::TargetReached);
            return Ok(());
        }

        match crossed.role {
            SurfaceRole::Layer => {
                self.index += 1;
                Ok(())
            }
            SurfaceRole::Boundary => {
                self.apply(NavigationEvent::BoundaryCrossed);
                let probe = track.position + travel * (10.0 * self.surface_tolerance);
                match self.geometry.containing_volume(&self.gctx, probe) {
                    Some(volume) => {
                        if self.volume != Some(volume) {
                            self.volumes_switched += 1;
                        }
                        self.volume = Some(volume);
                        self.apply(NavigationEvent::VolumeResolved);
                        self.enter_volume(volume, track, dir);
                        Ok(())
                    }
                    None => match self.target {
                        // Leaving the world with an unmet target is a
                        // navigation failure, not a clean exit.
                        Some(surface) => Err(NavigationError::TargetUnreachable { surface }),
                        None => {
                            self.apply(NavigationEvent::Exited);
                            Ok(())
                        }
                    },
                }
            }
        }
    }

    /// Surface crossed by the most recent step, if any.
    pub fn current_surface(&self) -> Option<SurfaceId> {
        self.current_surface
    }

    /// Volume the track is currently in.
    pub fn current_volume(&self) -> Option<VolumeId> {
        self.volume
    }

    /// Whether the caller-requested target surface has been reached.
    pub fn target_reached(&self) -> bool {
        self.target_reached
    }

    /// Whether navigation has terminated.
    pub fn terminated(&self) -> bool {
        self.stage == NavigationStage::Terminated
    }

    /// Current lifecycle stage.
    pub fn stage(&self) -> NavigationStage {
        self.stage
    }

    /// Number of volume switches so far.
    pub fn volumes_switched(&self) -> u32 {
        self.volumes_switched
    }

    /// Number of surfaces crossed so far.
    pub fn surfaces_crossed(&self) -> u32 {
        self.surfaces_crossed
    }

    /// Feed an event through the transition function.
    fn apply(&mut self, event: NavigationEvent) {
        if let Some(next) = transition(self.stage, event) {
            self.stage = next;
        }
    }

    /// Enter handler for a (re-)resolved volume: enumerate all attached
    /// surfaces, discard back-facing intersections and those beyond the
    /// remaining path budget, order deterministically, and special-case
    /// the target surface as the always-final candidate.
    ///
    /// Returns whether any forward intersection existed before the budget
    /// filter, distinguishing "nothing reachable within the limit" from
    /// "nothing ahead at all".
    fn enter_volume(&mut self, volume: VolumeId, track: &TrackState, dir: Direction) -> bool {
        let travel = track.direction * dir.sign();
        let remaining = (self.path_limit - track.path_length.abs()).max(0.0);
        self.candidates.clear();
        self.index = 0;
        self.active = false;
        let mut any_forward = false;

        for &surface in self.geometry.candidate_surfaces(&self.gctx, volume) {
            if Some(surface) == self.target {
                continue;
            }
            if let Some(d) = self
                .geometry
                .intersect(&self.gctx, surface, track.position, travel)
            {
                if d <= self.surface_tolerance {
                    continue;
                }
                any_forward = true;
                if d <= remaining {
                    self.candidates.push(Candidate {
                        surface,
                        distance: d,
                        role: self.geometry.surface_role(surface),
                        is_target: false,
                    });
                }
            }
        }
        sort_candidates(&mut self.candidates);

        if let Some(target) = self.target {
            if self.geometry.bounding_volume(target) == volume {
                if let Some(d) = self
                    .geometry
                    .intersect(&self.gctx, target, track.position, travel)
                {
                    if d > self.surface_tolerance {
                        any_forward = true;
                        // The target is always the final candidate; nothing
                        // beyond it is navigated to.
                        self.candidates.retain(|c| c.distance < d);
                        self.candidates.push(Candidate {
                            surface: target,
                            distance: d,
                            role: self.geometry.surface_role(target),
                            is_target: true,
                        });
                    }
                }
            }
        }
        any_forward
    }
}

//! The navigation state machine.
//!
//! A closed stage enumeration with a pure transition function. The
//! navigator applies events through [`transition`] and runs its enter
//! handlers explicitly on the returned stage; there is no dispatch-on-type
//! and no implicit handler lookup.

/// Lifecycle stage of one navigation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NavigationStage {
    /// Before the containing volume of the start position is resolved.
    Initializing,
    /// Inside a volume, targeting a layer surface (or drifting).
    WithinVolume,
    /// Inside a volume, targeting one of its boundary surfaces.
    ApproachingBoundary,
    /// A boundary was crossed; the next volume is being resolved.
    ExitingVolume,
    /// Navigation is finished: target reached or geometry exited.
    Terminated,
}

/// Events fed into the state machine.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NavigationEvent {
    /// A containing volume was resolved (at start or after a boundary).
    VolumeResolved,
    /// The active candidate is a layer surface.
    LayerTargeted,
    /// The active candidate is a boundary surface.
    BoundaryTargeted,
    /// The active boundary candidate was crossed.
    BoundaryCrossed,
    /// No containing volume exists past the crossed boundary.
    Exited,
    /// The requested target surface was reached.
    TargetReached,
}

/// The transition function: next stage, or `None` for "no transition".
///
/// `Terminated` is absorbing. Unlisted pairs are no-ops rather than
/// errors; the navigator's own logic never emits them.
pub fn transition(stage: NavigationStage, event: NavigationEvent) -> Option<NavigationStage> {
    use NavigationEvent as E;
    use NavigationStage as S;

    match (stage, event) {
        (S::Terminated, _) => None,
        (_, E::TargetReached) => Some(S::Terminated),
        (S::Initializing, E::VolumeResolved) => Some(S::WithinVolume),
        (S::WithinVolume, E::BoundaryTargeted) => Some(S::ApproachingBoundary),
        (S::ApproachingBoundary, E::LayerTargeted) => Some(S::WithinVolume),
        (S::WithinVolume | S::ApproachingBoundary, E::BoundaryCrossed) => Some(S::ExitingVolume),
        (S::ExitingVolume, E::VolumeResolved) => Some(S::WithinVolume),
        (S::ExitingVolume, E::Exited) => Some(S::Terminated),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use NavigationEvent as E;
    use NavigationStage as S;

    #[test]
    fn happy_path_through_a_volume_switch() {
        let mut stage = S::Initializing;
        for (event, expected) in [
            (E::VolumeResolved, S::WithinVolume),
            (E::BoundaryTargeted, S::ApproachingBoundary),
            (E::BoundaryCrossed, S::ExitingVolume),
            (E::VolumeResolved, S::WithinVolume),
        ] {
            stage = transition(stage, event).expect("transition defined");
            assert_eq!(stage, expected);
        }
    }

    #[test]
    fn terminated_is_absorbing() {
        for event in [
            E::VolumeResolved,
            E::LayerTargeted,
            E::BoundaryTargeted,
            E::BoundaryCrossed,
            E::Exited,
            E::TargetReached,
        ] {
            assert_eq!(transition(S::Terminated, event), None);
        }
    }

    #[test]
    fn target_reached_terminates_from_any_live_stage() {
        for stage in [
            S::Initializing,
            S::WithinVolume,
            S::ApproachingBoundary,
            S::ExitingVolume,
        ] {
            assert_eq!(transition(stage, E::TargetReached), Some(S::Terminated));
        }
    }

    #[test]
    fn retargeting_a_layer_leaves_boundary_approach() {
        assert_eq!(
            transition(S::ApproachingBoundary, E::LayerTargeted),
            Some(S::WithinVolume)
        );
        // Targeting another layer while within a volume is not a transition.
        assert_eq!(transition(S::WithinVolume, E::LayerTargeted), None);
    }
}

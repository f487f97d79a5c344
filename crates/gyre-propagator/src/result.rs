//! The assembled outcome of one propagation.

use indexmap::IndexMap;

use gyre_core::{AbortId, ActionId, TrackState};

use crate::action::ActionResult;

/// How a propagation terminated.
///
/// Errors are not an outcome: they surface as the `Err` arm of the
/// propagate call and carry no terminal state.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Outcome {
    /// Arrived at the requested target, or exited the geometry cleanly.
    Success,
    /// An abort condition fired; attributed to its id.
    Aborted(AbortId),
}

/// Loop statistics for one propagation.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct StepStats {
    /// Accepted steps.
    pub steps: u64,
    /// Trial steps rejected by the stepper's error control.
    pub rejected_trials: u32,
    /// Volume switches performed by the navigator.
    pub volumes_switched: u32,
    /// Surfaces crossed.
    pub surfaces_crossed: u32,
}

/// Terminal state, bookkeeping, and per-action records.
///
/// An action's record is present exactly when that action was registered
/// in the options; look it up by id and concrete record type through
/// [`get`](PropagationResult::get).
pub struct PropagationResult {
    /// Track parameters at termination.
    pub end: TrackState,
    /// Signed total path length.
    pub path_length: f64,
    /// How the propagation terminated.
    pub outcome: Outcome,
    /// Loop statistics.
    pub stats: StepStats,
    pub(crate) actions: IndexMap<ActionId, Box<dyn ActionResult>>,
}

impl PropagationResult {
    /// The record of a registered action, downcast to its concrete type.
    pub fn get<T: ActionResult>(&self, id: ActionId) -> Option<&T> {
        self.actions.get(&id)?.downcast_ref::<T>()
    }

    /// Whether an action with this id was registered.
    pub fn has_action(&self, id: ActionId) -> bool {
        self.actions.contains_key(&id)
    }

    /// Registered action ids, in registration order.
    pub fn action_ids(&self) -> impl Iterator<Item = ActionId> + '_ {
        self.actions.keys().copied()
    }
}

impl std::fmt::Debug for PropagationResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Action records are type-erased; list their ids only.
        f.debug_struct("PropagationResult")
            .field("end", &self.end)
            .field("path_length", &self.path_length)
            .field("outcome", &self.outcome)
            .field("stats", &self.stats)
            .field("actions", &self.actions.keys().collect::<Vec<_>>())
            .finish()
    }
}

//! Per-propagation configuration.

use gyre_core::{units, ConfigError, Direction, FieldContext, GeometryContext};

use crate::abort::AbortCondition;
use crate::action::Action;

/// Configuration for one propagate call.
///
/// Created fresh per call and consumed by it; the action list is ordered,
/// the abort set is not (evaluation order carries no meaning beyond
/// first-trigger attribution).
pub struct PropagatorOptions {
    /// Propagation direction.
    pub direction: Direction,
    /// Absolute cap on a single step.
    pub max_step_size: f64,
    /// Absolute path budget; the implicit path-limit abort enforces it.
    pub path_limit: f64,
    /// Integration error tolerance.
    pub tolerance: f64,
    /// Arrival tolerance on surfaces and the path limit.
    pub surface_tolerance: f64,
    /// Ordered per-step observers.
    pub actions: Vec<Box<dyn Action>>,
    /// Stopping predicates.
    pub aborts: Vec<Box<dyn AbortCondition>>,
    /// Alignment/conditions context threaded to geometry lookups.
    pub geometry_context: GeometryContext,
    /// Conditions context threaded to field lookups.
    pub field_context: FieldContext,
}

impl Default for PropagatorOptions {
    fn default() -> Self {
        Self {
            direction: Direction::Forward,
            max_step_size: 100.0 * units::CM,
            path_limit: 10.0 * units::M,
            tolerance: 1e-4,
            surface_tolerance: 1e-4,
            actions: Vec::new(),
            aborts: Vec::new(),
            geometry_context: GeometryContext::default(),
            field_context: FieldContext::default(),
        }
    }
}

impl PropagatorOptions {
    /// Check the numeric configuration and action-id uniqueness.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.tolerance.is_finite() || self.tolerance <= 0.0 {
            return Err(ConfigError::NonPositiveTolerance {
                value: self.tolerance,
            });
        }
        if !self.max_step_size.is_finite() || self.max_step_size <= 0.0 {
            return Err(ConfigError::NonPositiveStepSize {
                value: self.max_step_size,
            });
        }
        if !self.path_limit.is_finite() || self.path_limit <= 0.0 {
            return Err(ConfigError::NonPositivePathLimit {
                value: self.path_limit,
            });
        }
        if !self.surface_tolerance.is_finite() || self.surface_tolerance <= 0.0 {
            return Err(ConfigError::NonPositiveSurfaceTolerance {
                value: self.surface_tolerance,
            });
        }
        for (i, action) in self.actions.iter().enumerate() {
            if self.actions[..i].iter().any(|a| a.id() == action.id()) {
                return Err(ConfigError::DuplicateAction { id: action.id() });
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::step_logger::StepLogger;

    #[test]
    fn default_options_validate() {
        assert!(PropagatorOptions::default().validate().is_ok());
    }

    #[test]
    fn non_positive_numerics_rejected() {
        let mut opts = PropagatorOptions::default();
        opts.tolerance = 0.0;
        assert!(matches!(
            opts.validate(),
            Err(ConfigError::NonPositiveTolerance { .. })
        ));

        let mut opts = PropagatorOptions::default();
        opts.path_limit = -25.0;
        assert!(matches!(
            opts.validate(),
            Err(ConfigError::NonPositivePathLimit { .. })
        ));

        let mut opts = PropagatorOptions::default();
        opts.max_step_size = f64::NAN;
        assert!(matches!(
            opts.validate(),
            Err(ConfigError::NonPositiveStepSize { .. })
        ));
    }

    #[test]
    fn duplicate_action_ids_rejected() {
        let mut opts = PropagatorOptions::default();
        opts.actions.push(Box::new(StepLogger::new()));
        opts.actions.push(Box::new(StepLogger::new()));
        match opts.validate() {
            Err(ConfigError::DuplicateAction { id }) => assert_eq!(id, StepLogger::ID),
            other => panic!("expected DuplicateAction, got {other:?}"),
        }
    }
}

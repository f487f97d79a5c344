//! Error types for the Gyre propagation engine.
//!
//! One enum per subsystem — stepping (numerical), navigation (geometric),
//! configuration — plus [`PropagationError`] wrapping whichever of them
//! escaped the loop's internal retries. Errors are returned, never panicked;
//! an errored propagation carries no terminal track state.

use std::error::Error;
use std::fmt;

use crate::id::SurfaceId;
use crate::math::Vec3;

/// Numerical errors from a stepper.
///
/// The stepper retries internally with shrunken trial steps; only a retry
/// budget exhausted or a step collapsed below the numerical floor surfaces
/// as an error.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum SteppingError {
    /// Error control shrank the trial step below the numerical floor.
    StepSizeUnderflow {
        /// The collapsed trial step length.
        step_size: f64,
        /// The floor it fell below.
        floor: f64,
    },
    /// The integration did not reach the error tolerance within the
    /// rejected-trial budget.
    NotConverged {
        /// Number of rejected trial steps.
        trials: u32,
    },
}

impl fmt::Display for SteppingError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::StepSizeUnderflow { step_size, floor } => {
                write!(f, "trial step {step_size} collapsed below floor {floor}")
            }
            Self::NotConverged { trials } => {
                write!(f, "integration failed to converge after {trials} rejected trials")
            }
        }
    }
}

impl Error for SteppingError {}

/// Geometric errors from the navigator.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum NavigationError {
    /// No volume of the geometry contains the given position.
    OutsideGeometry {
        /// The position that could not be resolved.
        position: Vec3,
    },
    /// The current volume offers no candidate surface along the direction
    /// of travel.
    NoCandidateSurface,
    /// The requested target surface cannot be reached from the current
    /// trajectory.
    TargetUnreachable {
        /// The unreachable target.
        surface: SurfaceId,
    },
}

impl fmt::Display for NavigationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::OutsideGeometry { position } => write!(
                f,
                "no containing volume at ({}, {}, {})",
                position.x, position.y, position.z
            ),
            Self::NoCandidateSurface => write!(f, "no candidate surface along trajectory"),
            Self::TargetUnreachable { surface } => {
                write!(f, "target surface {surface} is unreachable")
            }
        }
    }
}

impl Error for NavigationError {}

/// Invalid propagation options, rejected before the loop starts.
#[derive(Clone, Debug, PartialEq)]
pub enum ConfigError {
    /// The integration tolerance must be finite and positive.
    NonPositiveTolerance {
        /// The rejected value.
        value: f64,
    },
    /// The maximum step size must be finite and positive.
    NonPositiveStepSize {
        /// The rejected value.
        value: f64,
    },
    /// The path limit must be finite and positive.
    NonPositivePathLimit {
        /// The rejected value.
        value: f64,
    },
    /// The on-surface tolerance must be finite and positive.
    NonPositiveSurfaceTolerance {
        /// The rejected value.
        value: f64,
    },
    /// Two registered actions share the same identifier.
    DuplicateAction {
        /// The contested identifier.
        id: crate::id::ActionId,
    },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NonPositiveTolerance { value } => {
                write!(f, "tolerance must be finite and positive, got {value}")
            }
            Self::NonPositiveStepSize { value } => {
                write!(f, "max step size must be finite and positive, got {value}")
            }
            Self::NonPositivePathLimit { value } => {
                write!(f, "path limit must be finite and positive, got {value}")
            }
            Self::NonPositiveSurfaceTolerance { value } => {
                write!(f, "surface tolerance must be finite and positive, got {value}")
            }
            Self::DuplicateAction { id } => {
                write!(f, "action id '{id}' registered more than once")
            }
        }
    }
}

impl Error for ConfigError {}

/// Any error that terminates a propagation.
///
/// Wraps the subsystem error that escaped; callers match on the variant or
/// walk [`Error::source`] for the underlying cause.
#[derive(Clone, Debug, PartialEq)]
pub enum PropagationError {
    /// The stepper failed.
    Stepping(SteppingError),
    /// The navigator failed.
    Navigation(NavigationError),
    /// The options were invalid.
    Config(ConfigError),
}

impl fmt::Display for PropagationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Stepping(e) => write!(f, "stepping failed: {e}"),
            Self::Navigation(e) => write!(f, "navigation failed: {e}"),
            Self::Config(e) => write!(f, "invalid options: {e}"),
        }
    }
}

impl Error for PropagationError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Stepping(e) => Some(e),
            Self::Navigation(e) => Some(e),
            Self::Config(e) => Some(e),
        }
    }
}

impl From<SteppingError> for PropagationError {
    fn from(e: SteppingError) -> Self {
        Self::Stepping(e)
    }
}

impl From<NavigationError> for PropagationError {
    fn from(e: NavigationError) -> Self {
        Self::Navigation(e)
    }
}

impl From<ConfigError> for PropagationError {
    fn from(e: ConfigError) -> Self {
        Self::Config(e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn propagation_error_chains_source() {
        let err = PropagationError::from(SteppingError::NotConverged { trials: 42 });
        let source = err.source().expect("source present");
        assert_eq!(source.to_string(), "integration failed to converge after 42 rejected trials");
    }

    #[test]
    fn display_is_informative() {
        let err = NavigationError::TargetUnreachable {
            surface: SurfaceId(5),
        };
        assert_eq!(err.to_string(), "target surface 5 is unreachable");
    }
}

//! Stepping algorithms for the Gyre track propagation toolkit.
//!
//! The [`Stepper`] trait advances a [`StepperState`] by a signed path
//! length under adaptive step-size control. Two interchangeable variants
//! are provided: the adaptive Runge-Kutta [`RungeKuttaStepper`] for
//! magnetic-field transport and the closed-form [`StraightLineStepper`]
//! as a field-free reference.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod field_stepper;
pub mod state;
pub mod stepper;
pub mod straight_line;

pub use field_stepper::RungeKuttaStepper;
pub use state::{StepperState, MAX_STEP_TRIALS, STEP_SIZE_FLOOR};
pub use stepper::Stepper;
pub use straight_line::StraightLineStepper;

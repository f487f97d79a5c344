//! Propagation loop and action/abort framework for the Gyre toolkit.
//!
//! The [`Propagator`] orchestrates one propagation: it asks the navigator
//! for the next candidate surface and step ceiling, lets the stepper
//! advance under that ceiling, runs the registered [`Action`]s after every
//! accepted step, evaluates [`AbortCondition`]s, and assembles the final
//! [`PropagationResult`].

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod abort;
pub mod action;
pub mod context;
pub mod material_interactor;
pub mod options;
pub mod propagator;
pub mod result;
pub mod step_logger;

pub use abort::{AbortCondition, PathLimitReached};
pub use action::{Action, ActionResult};
pub use context::StepContext;
pub use material_interactor::{MaterialInteraction, MaterialInteractor, MaterialRecord};
pub use options::PropagatorOptions;
pub use propagator::Propagator;
pub use result::{Outcome, PropagationResult, StepStats};
pub use step_logger::{StepLogger, StepTrace};

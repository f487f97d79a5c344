//! Geometry navigation for the Gyre track propagation toolkit.
//!
//! The [`Navigator`] tracks "where am I in the volume hierarchy" for one
//! propagation: it enumerates candidate surfaces for the current volume,
//! proposes the next step ceiling, detects surface crossings, and switches
//! volumes at boundaries. Navigation state lives for exactly one
//! propagation and refers to geometry only through ids.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod candidate;
pub mod navigator;
pub mod stage;

pub use candidate::Candidate;
pub use navigator::{NavTarget, Navigator};
pub use stage::{transition, NavigationEvent, NavigationStage};

//! Core types and contracts for the Gyre track propagation toolkit.
//!
//! This is the leaf crate with zero internal dependencies. It defines the
//! fundamental abstractions used throughout the Gyre workspace: typed
//! geometry identifiers, the 3-vector math used by the stepping code, unit
//! conventions, the error taxonomy, material descriptions, and the two
//! external contracts consumed by the propagation engine — the geometry
//! provider and the field provider.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod context;
pub mod error;
pub mod field;
pub mod geometry;
pub mod id;
pub mod material;
pub mod math;
pub mod track;
pub mod units;

pub use context::{FieldContext, GeometryContext};
pub use error::{ConfigError, NavigationError, PropagationError, SteppingError};
pub use field::{ConstantField, FieldProvider};
pub use geometry::{GeometryProvider, SurfaceRole};
pub use id::{AbortId, ActionId, SurfaceId, VolumeId};
pub use material::{Material, MaterialSlab};
pub use math::Vec3;
pub use track::{Covariance, Direction, ParamIndex, TrackState};

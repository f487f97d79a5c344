//! Contextual objects threaded through a propagation without mutation.
//!
//! Geometry and field lookups accept a context so that providers backed by
//! conditions data (alignment constants, field maps per run) can resolve
//! the correct payload. The default contexts are empty; providers that need
//! nothing ignore them.

/// Alignment/conditions context for geometry lookups.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct GeometryContext {}

/// Conditions context for field lookups.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FieldContext {}

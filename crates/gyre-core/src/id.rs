//! Strongly-typed identifiers for geometry handles and extension points.
//!
//! Surfaces and volumes are owned by the geometry provider; propagation code
//! refers to them exclusively through these copyable ids, never through
//! owning references.

use std::fmt;

/// Identifies a surface within a tracking geometry.
///
/// Surfaces are registered at geometry construction and assigned sequential
/// ids. `SurfaceId(n)` corresponds to the n-th surface in the provider's
/// storage.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SurfaceId(pub u32);

impl fmt::Display for SurfaceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u32> for SurfaceId {
    fn from(v: u32) -> Self {
        Self(v)
    }
}

/// Identifies a volume within a tracking geometry.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct VolumeId(pub u32);

impl fmt::Display for VolumeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u32> for VolumeId {
    fn from(v: u32) -> Self {
        Self(v)
    }
}

/// Stable identifier for a registered action.
///
/// Keys the per-action result record in the propagation result. Built-in
/// actions expose their id as an associated constant; user actions pick any
/// string that is unique within one options set.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ActionId(pub &'static str);

impl fmt::Display for ActionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Stable identifier for an abort condition.
///
/// An aborted propagation attributes its termination to the triggering
/// condition's id.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct AbortId(pub &'static str);

impl fmt::Display for AbortId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_display_their_payload() {
        assert_eq!(SurfaceId(7).to_string(), "7");
        assert_eq!(VolumeId(2).to_string(), "2");
        assert_eq!(ActionId("material").to_string(), "material");
        assert_eq!(AbortId("path_limit").to_string(), "path_limit");
    }

    #[test]
    fn ids_from_raw() {
        assert_eq!(SurfaceId::from(3u32), SurfaceId(3));
        assert_eq!(VolumeId::from(1u32), VolumeId(1));
    }
}

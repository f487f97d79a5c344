//! The geometry-provider contract consumed by the navigator.
//!
//! The tracking geometry — volumes, surfaces, bounds — is built and owned
//! outside the propagation engine. The engine sees it only through this
//! trait: non-owning ids in, intersection distances and attachments out.

use crate::context::GeometryContext;
use crate::id::{SurfaceId, VolumeId};
use crate::material::MaterialSlab;
use crate::math::Vec3;

/// What role a surface plays in navigation ordering.
///
/// When two candidates sit at the same distance, boundary surfaces take
/// precedence over layer surfaces so that candidate ordering never depends
/// on container iteration order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum SurfaceRole {
    /// A volume boundary; crossing it switches volumes.
    Boundary,
    /// A layer surface contained in a volume (sensors, passive material).
    Layer,
}

/// Immutable tracking-geometry access for navigation.
///
/// # Contract
///
/// - All methods are pure reads; the provider must not mutate under a
///   running propagation (callers guarantee no concurrent geometry edits).
/// - `candidate_surfaces` returns a deterministic order for a given volume.
/// - `intersect` returns the distance to the nearest intersection strictly
///   ahead along `direction` (a positive path length), or `None` if the
///   trajectory line never crosses the surface in that direction.
///
/// # Object safety
///
/// The trait is object-safe; the engine holds providers as
/// `Arc<dyn GeometryProvider>`.
pub trait GeometryProvider: Send + Sync {
    /// All surfaces attached to a volume: its boundaries plus any contained
    /// layer surfaces, in deterministic order.
    fn candidate_surfaces(&self, gctx: &GeometryContext, volume: VolumeId) -> &[SurfaceId];

    /// Distance along `direction` (unit) from `position` to the nearest
    /// forward intersection with `surface`.
    fn intersect(
        &self,
        gctx: &GeometryContext,
        surface: SurfaceId,
        position: Vec3,
        direction: Vec3,
    ) -> Option<f64>;

    /// The innermost volume containing `position`, if any.
    fn containing_volume(&self, gctx: &GeometryContext, position: Vec3) -> Option<VolumeId>;

    /// The volume a surface is attached to.
    ///
    /// For boundary surfaces this is the volume they enclose; navigation
    /// uses it to decide when a requested target surface enters play.
    fn bounding_volume(&self, surface: SurfaceId) -> VolumeId;

    /// Navigation role of a surface.
    fn surface_role(&self, surface: SurfaceId) -> SurfaceRole;

    /// Material carried by a surface, if any.
    fn material(&self, surface: SurfaceId) -> Option<MaterialSlab>;

    /// Unit surface normal at a point on (or near) the surface.
    ///
    /// Used to correct nominal material thickness for the incidence angle.
    fn normal(&self, gctx: &GeometryContext, surface: SurfaceId, position: Vec3) -> Vec3;
}

//! Test utilities for Gyre development.
//!
//! Provides a concrete [`GeometryProvider`] — a barrel-shaped tracker of
//! nested cylindrical volumes with material-carrying layers — plus track
//! construction helpers. Production geometries live outside this
//! workspace; this one exists so the propagation engine can be exercised.

#![forbid(unsafe_code)]
#![allow(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

use gyre_core::{
    GeometryContext, GeometryProvider, Material, MaterialSlab, SurfaceId, SurfaceRole,
    TrackState, Vec3, VolumeId,
};

/// Root-finding epsilon for intersections: anything closer than this is
/// "at the current position" and not a forward crossing.
const INTERSECT_EPS: f64 = 1e-9;

// ── Shapes ─────────────────────────────────────────────────────────

/// Concrete surface shapes supported by the test tracker.
#[derive(Clone, Copy, Debug)]
enum Shape {
    /// Cylinder around the global z-axis.
    Cylinder { radius: f64, half_z: f64 },
    /// Annular disc at fixed z.
    Disc { z: f64, r_min: f64, r_max: f64 },
}

impl Shape {
    /// Nearest forward intersection along `dir` (unit) from `pos`.
    fn intersect(&self, pos: Vec3, dir: Vec3) -> Option<f64> {
        match *self {
            Shape::Cylinder { radius, half_z } => {
                let a = dir.x * dir.x + dir.y * dir.y;
                if a < 1e-16 {
                    return None;
                }
                let b = 2.0 * (pos.x * dir.x + pos.y * dir.y);
                let c = pos.x * pos.x + pos.y * pos.y - radius * radius;
                let disc = b * b - 4.0 * a * c;
                if disc < 0.0 {
                    return None;
                }
                let sq = disc.sqrt();
                let mut best: Option<f64> = None;
                for s in [(-b - sq) / (2.0 * a), (-b + sq) / (2.0 * a)] {
                    if s > INTERSECT_EPS && (pos.z + s * dir.z).abs() <= half_z {
                        best = Some(match best {
                            Some(prev) => prev.min(s),
                            None => s,
                        });
                    }
                }
                best
            }
            Shape::Disc { z, r_min, r_max } => {
                if dir.z.abs() < 1e-16 {
                    return None;
                }
                let s = (z - pos.z) / dir.z;
                if s <= INTERSECT_EPS {
                    return None;
                }
                let r = (pos + dir * s).perp();
                if r >= r_min && r <= r_max {
                    Some(s)
                } else {
                    None
                }
            }
        }
    }

    /// Unit surface normal at a point on (or near) the surface.
    fn normal(&self, pos: Vec3) -> Vec3 {
        match *self {
            Shape::Cylinder { .. } => Vec3::new(pos.x, pos.y, 0.0).normalized(),
            Shape::Disc { .. } => Vec3::new(0.0, 0.0, 1.0),
        }
    }
}

// ── Tracker geometry ───────────────────────────────────────────────

#[derive(Clone, Debug)]
struct SurfaceDesc {
    shape: Shape,
    role: SurfaceRole,
    material: Option<MaterialSlab>,
    owner: VolumeId,
}

#[derive(Clone, Debug)]
struct VolumeDesc {
    r_min: f64,
    r_max: f64,
    surfaces: Vec<SurfaceId>,
}

/// A barrel tracker: concentric cylindrical volumes around the z-axis,
/// each bounded by cylinders and end-cap discs, containing cylindrical
/// layer surfaces that may carry material.
#[derive(Clone, Debug)]
pub struct CylinderTracker {
    half_z: f64,
    surfaces: Vec<SurfaceDesc>,
    volumes: Vec<VolumeDesc>,
}

impl CylinderTracker {
    /// Start building a tracker with the given half-length in z.
    pub fn builder(half_z: f64) -> CylinderTrackerBuilder {
        CylinderTrackerBuilder {
            half_z,
            volumes: Vec::new(),
        }
    }

    /// The canonical test tracker: a beryllium beam pipe inside a
    /// four-layer silicon barrel inside a two-layer outer barrel.
    pub fn tracker() -> Self {
        let si = |t: f64| MaterialSlab::new(Material::silicon(), t);
        Self::builder(2000.0)
            .volume(30.0)
            .layer(19.0, MaterialSlab::new(Material::beryllium(), 0.8))
            .volume(200.0)
            .layer(32.0, si(1.0))
            .layer(72.0, si(1.0))
            .layer(116.0, si(1.0))
            .layer(172.0, si(1.0))
            .volume(1000.0)
            .layer(260.0, si(1.0))
            .layer(500.0, si(1.0))
            .build()
    }

    /// Find the cylinder surface at the given radius, if one exists.
    pub fn surface_at_radius(&self, radius: f64) -> Option<SurfaceId> {
        self.surfaces.iter().position(|s| match s.shape {
            Shape::Cylinder { radius: r, .. } => (r - radius).abs() < 1e-9,
            Shape::Disc { .. } => false,
        })
        .map(|i| SurfaceId(i as u32))
    }

    /// Radius of a cylinder surface; panics on a disc (test helper).
    pub fn radius_of(&self, surface: SurfaceId) -> f64 {
        match self.surfaces[surface.0 as usize].shape {
            Shape::Cylinder { radius, .. } => radius,
            Shape::Disc { .. } => panic!("surface {surface} is a disc"),
        }
    }

    /// Outer radius of the outermost volume.
    pub fn world_radius(&self) -> f64 {
        self.volumes.last().map(|v| v.r_max).unwrap_or(0.0)
    }
}

impl GeometryProvider for CylinderTracker {
    fn candidate_surfaces(&self, _gctx: &GeometryContext, volume: VolumeId) -> &[SurfaceId] {
        &self.volumes[volume.0 as usize].surfaces
    }

    fn intersect(
        &self,
        _gctx: &GeometryContext,
        surface: SurfaceId,
        position: Vec3,
        direction: Vec3,
    ) -> Option<f64> {
        self.surfaces[surface.0 as usize]
            .shape
            .intersect(position, direction)
    }

    fn containing_volume(&self, _gctx: &GeometryContext, position: Vec3) -> Option<VolumeId> {
        if position.z.abs() >= self.half_z {
            return None;
        }
        let r = position.perp();
        self.volumes
            .iter()
            .position(|v| r >= v.r_min && r < v.r_max)
            .map(|i| VolumeId(i as u32))
    }

    fn bounding_volume(&self, surface: SurfaceId) -> VolumeId {
        self.surfaces[surface.0 as usize].owner
    }

    fn surface_role(&self, surface: SurfaceId) -> SurfaceRole {
        self.surfaces[surface.0 as usize].role
    }

    fn material(&self, surface: SurfaceId) -> Option<MaterialSlab> {
        self.surfaces[surface.0 as usize].material
    }

    fn normal(&self, _gctx: &GeometryContext, surface: SurfaceId, position: Vec3) -> Vec3 {
        self.surfaces[surface.0 as usize].shape.normal(position)
    }
}

// ── Builder ────────────────────────────────────────────────────────

struct VolumeSpec {
    r_max: f64,
    layers: Vec<(f64, Option<MaterialSlab>)>,
}

/// Builder for [`CylinderTracker`]. Volumes are declared inside-out; each
/// `layer` call attaches to the most recently declared volume.
pub struct CylinderTrackerBuilder {
    half_z: f64,
    volumes: Vec<VolumeSpec>,
}

impl CylinderTrackerBuilder {
    /// Declare the next volume, extending to `r_max`.
    pub fn volume(mut self, r_max: f64) -> Self {
        self.volumes.push(VolumeSpec {
            r_max,
            layers: Vec::new(),
        });
        self
    }

    /// Add a material-carrying cylinder layer to the current volume.
    pub fn layer(mut self, radius: f64, slab: MaterialSlab) -> Self {
        self.volumes
            .last_mut()
            .expect("declare a volume before adding layers")
            .layers
            .push((radius, Some(slab)));
        self
    }

    /// Add a material-free cylinder layer to the current volume.
    pub fn bare_layer(mut self, radius: f64) -> Self {
        self.volumes
            .last_mut()
            .expect("declare a volume before adding layers")
            .layers
            .push((radius, None));
        self
    }

    /// Assemble the tracker: boundary cylinders between adjacent volumes,
    /// end-cap discs per volume, and the declared layers.
    pub fn build(self) -> CylinderTracker {
        let half_z = self.half_z;
        let mut surfaces: Vec<SurfaceDesc> = Vec::new();
        let mut volumes: Vec<VolumeDesc> = Vec::new();
        // Boundary cylinder ids shared between adjacent volumes.
        let mut inner_boundary: Option<SurfaceId> = None;
        let mut r_min = 0.0;

        for (vi, spec) in self.volumes.into_iter().enumerate() {
            let owner = VolumeId(vi as u32);
            let mut attached: Vec<SurfaceId> = Vec::new();

            if let Some(inner) = inner_boundary {
                attached.push(inner);
            }

            let outer = SurfaceId(surfaces.len() as u32);
            surfaces.push(SurfaceDesc {
                shape: Shape::Cylinder {
                    radius: spec.r_max,
                    half_z,
                },
                role: SurfaceRole::Boundary,
                material: None,
                owner,
            });
            attached.push(outer);

            for z in [-half_z, half_z] {
                let disc = SurfaceId(surfaces.len() as u32);
                surfaces.push(SurfaceDesc {
                    shape: Shape::Disc {
                        z,
                        r_min,
                        r_max: spec.r_max,
                    },
                    role: SurfaceRole::Boundary,
                    material: None,
                    owner,
                });
                attached.push(disc);
            }

            for (radius, material) in spec.layers {
                let layer = SurfaceId(surfaces.len() as u32);
                surfaces.push(SurfaceDesc {
                    shape: Shape::Cylinder { radius, half_z },
                    role: SurfaceRole::Layer,
                    material,
                    owner,
                });
                attached.push(layer);
            }

            volumes.push(VolumeDesc {
                r_min,
                r_max: spec.r_max,
                surfaces: attached,
            });
            inner_boundary = Some(outer);
            r_min = spec.r_max;
        }

        CylinderTracker {
            half_z,
            surfaces,
            volumes,
        }
    }
}

// ── Track helpers ──────────────────────────────────────────────────

/// A track starting at the origin with transverse momentum `pt`, azimuth
/// `phi`, polar angle `theta` and charge `q`.
pub fn charged_track(pt: f64, phi: f64, theta: f64, q: f64) -> TrackState {
    let p = pt / theta.sin();
    let direction = Vec3::new(
        theta.sin() * phi.cos(),
        theta.sin() * phi.sin(),
        theta.cos(),
    );
    TrackState::new(Vec3::ZERO, direction, q, p)
}

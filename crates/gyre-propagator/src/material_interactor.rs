//! Material accumulation and interaction effects.
//!
//! For every crossed surface that carries material, the interactor records
//! the traversed thickness — the nominal slab scaled by the incidence
//! correction — in radiation-length and interaction-length units, and
//! applies multiple-scattering and energy-loss effects to the track
//! according to its configuration flags.

use gyre_core::{ActionId, MaterialSlab, ParamIndex, SurfaceId, Vec3};

use crate::action::{Action, ActionResult};
use crate::context::StepContext;

/// Charged pion mass in GeV, the default particle hypothesis for
/// interaction effects.
const PION_MASS: f64 = 0.139_57;

/// Electron mass in GeV.
const ELECTRON_MASS: f64 = 0.000_511;

/// Bethe constant K in GeV cm^2 / g.
const K_BETHE: f64 = 0.307_075e-3;

/// Floor on the incidence cosine; steeper crossings are treated as
/// grazing at this angle rather than producing unbounded thickness.
const MIN_INCIDENCE_COSINE: f64 = 1e-3;

// ── Records ────────────────────────────────────────────────────────

/// One material crossing.
#[derive(Clone, Debug)]
pub struct MaterialInteraction {
    /// The crossed surface.
    pub surface: SurfaceId,
    /// Position of the crossing.
    pub position: Vec3,
    /// Track direction at the crossing.
    pub direction: Vec3,
    /// Incidence correction applied to the nominal thickness.
    pub path_correction: f64,
    /// The traversed slab, already path-corrected.
    pub slab: MaterialSlab,
    /// Mean momentum loss applied (zero when energy loss is disabled or
    /// the track is neutral).
    pub delta_p: f64,
}

/// Accumulated material over one propagation.
#[derive(Debug, Default)]
pub struct MaterialRecord {
    /// Total traversed thickness in radiation lengths.
    pub material_in_x0: f64,
    /// Total traversed thickness in interaction lengths.
    pub material_in_l0: f64,
    /// Per-crossing records; populated only when recording is enabled.
    pub interactions: Vec<MaterialInteraction>,
}

impl ActionResult for MaterialRecord {}

// ── The interactor ─────────────────────────────────────────────────

/// The built-in material action.
///
/// Totals accumulate whenever a crossed surface carries material; the
/// flags gate the per-crossing record list and the two interaction
/// effects on the track. Neutral tracks accumulate material but take no
/// interaction effects.
#[derive(Clone, Copy, Debug)]
pub struct MaterialInteractor {
    /// Inflate the angular covariance by Highland multiple scattering.
    pub multiple_scattering: bool,
    /// Apply mean ionisation energy loss (and q/p variance) to the track.
    pub energy_loss: bool,
    /// Keep per-crossing [`MaterialInteraction`] records.
    pub record_interactions: bool,
}

impl MaterialInteractor {
    /// Identifier of the material record.
    pub const ID: ActionId = ActionId("material_interactor");

    /// Interaction effects on, per-crossing recording off.
    pub fn new() -> Self {
        Self {
            multiple_scattering: true,
            energy_loss: true,
            record_interactions: false,
        }
    }
}

impl Default for MaterialInteractor {
    fn default() -> Self {
        Self::new()
    }
}

impl Action for MaterialInteractor {
    fn id(&self) -> ActionId {
        Self::ID
    }

    fn new_result(&self) -> Box<dyn ActionResult> {
        Box::new(MaterialRecord::default())
    }

    fn act(&self, ctx: &mut StepContext<'_>, result: &mut dyn ActionResult) {
        let Some(record) = result.downcast_mut::<MaterialRecord>() else {
            return;
        };
        let Some(surface) = ctx.surface() else {
            return;
        };
        let Some(slab) = ctx.geometry().material(surface) else {
            return;
        };

        let position = ctx.track().position;
        let direction = ctx.track().direction;
        let normal = ctx.geometry().normal(ctx.geometry_context(), surface, position);
        let cosine = direction.dot(normal).abs().max(MIN_INCIDENCE_COSINE);
        let path_correction = 1.0 / cosine;
        let crossed = slab.scaled(path_correction);

        record.material_in_x0 += crossed.thickness_in_x0();
        record.material_in_l0 += crossed.thickness_in_l0();

        let mut delta_p = 0.0;
        let q = ctx.track().q;
        if q != 0.0 {
            let p = ctx.track().p;
            if self.multiple_scattering {
                let theta0 = highland_theta0(p, q, crossed.thickness_in_x0());
                if let Some(cov) = ctx.track_mut().covariance.as_mut() {
                    let sin2_theta = (direction.x * direction.x + direction.y * direction.y)
                        .max(1e-12);
                    cov.add_variance(ParamIndex::Phi, theta0 * theta0 / sin2_theta);
                    cov.add_variance(ParamIndex::Theta, theta0 * theta0);
                }
            }
            if self.energy_loss {
                delta_p = mean_ionisation_loss(p, q, &crossed);
                // Forward propagation loses energy; a backward propagation
                // re-applies the loss it is unwinding.
                let new_p = (p - ctx.direction().sign() * delta_p).max(1e-3 * p);
                ctx.track_mut().p = new_p;
                if let Some(cov) = ctx.track_mut().covariance.as_mut() {
                    // Landau width coarsely taken as half the mean loss.
                    let sigma_e = 0.5 * delta_p;
                    let sigma_qop = sigma_e / (p * p);
                    cov.add_variance(ParamIndex::QOverP, sigma_qop * sigma_qop);
                }
            }
        }

        if self.record_interactions {
            record.interactions.push(MaterialInteraction {
                surface,
                position,
                direction,
                path_correction,
                slab: crossed,
                delta_p,
            });
        }
    }
}

// ── Interaction formulas ───────────────────────────────────────────

/// Highland parametrization of the multiple-scattering angle for a slab
/// of `t_in_x0` radiation lengths.
fn highland_theta0(p: f64, q: f64, t_in_x0: f64) -> f64 {
    if t_in_x0 <= 0.0 {
        return 0.0;
    }
    let e = (p * p + PION_MASS * PION_MASS).sqrt();
    let beta = p / e;
    let log_correction = (1.0 + 0.038 * t_in_x0.ln()).max(0.0);
    13.6e-3 / (beta * p) * q.abs() * t_in_x0.sqrt() * log_correction
}

/// Mean ionisation energy loss (Bethe, pion hypothesis) over a slab, in
/// GeV. Thickness is in mm, density in g/cm^3.
fn mean_ionisation_loss(p: f64, q: f64, slab: &MaterialSlab) -> f64 {
    let m = PION_MASS;
    let e = (p * p + m * m).sqrt();
    let beta2 = (p / e) * (p / e);
    let gamma = e / m;
    let beta_gamma = p / m;

    // Mean excitation energy, 16 eV * Z^0.9.
    let i_ex = 16e-9 * slab.material.z.powf(0.9);
    let t_max =
        2.0 * ELECTRON_MASS * beta_gamma * beta_gamma / (1.0 + 2.0 * gamma * ELECTRON_MASS / m);
    let log_term = (2.0 * ELECTRON_MASS * beta_gamma * beta_gamma * t_max / (i_ex * i_ex)).ln();

    let dedx_per_cm = K_BETHE * q * q * (slab.material.z / slab.material.ar)
        * slab.material.rho
        / beta2
        * (0.5 * log_term - beta2);
    dedx_per_cm.max(0.0) * slab.thickness / 10.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use gyre_core::Material;

    #[test]
    fn silicon_loss_is_a_few_mev_per_cm() {
        // A 1 GeV pion in silicon: dE/dx around 4 MeV/cm.
        let slab = MaterialSlab::new(Material::silicon(), 10.0);
        let de = mean_ionisation_loss(1.0, 1.0, &slab);
        assert!(de > 2e-3 && de < 8e-3, "unexpected loss {de}");
    }

    #[test]
    fn loss_scales_with_thickness() {
        let thin = MaterialSlab::new(Material::silicon(), 1.0);
        let thick = MaterialSlab::new(Material::silicon(), 3.0);
        let a = mean_ionisation_loss(1.0, 1.0, &thin);
        let b = mean_ionisation_loss(1.0, 1.0, &thick);
        assert!((b / a - 3.0).abs() < 1e-9);
    }

    #[test]
    fn highland_grows_with_thickness_and_shrinks_with_momentum() {
        let t0 = highland_theta0(1.0, 1.0, 0.01);
        assert!(t0 > 0.0);
        assert!(highland_theta0(1.0, 1.0, 0.04) > t0);
        assert!(highland_theta0(10.0, 1.0, 0.01) < t0);
    }

    #[test]
    fn highland_vanishes_without_material() {
        assert_eq!(highland_theta0(1.0, 1.0, 0.0), 0.0);
    }
}

//! Unit conventions.
//!
//! Gyre uses a fixed internal unit system: lengths in millimetres, momenta
//! and energies in GeV, charge in elementary charges. Magnetic field values
//! are expressed through the [`T`] constant, which folds the speed-of-light
//! conversion into the field strength so that the equation of motion
//! `dT/ds = (q/p) T x B` holds without further factors.
//!
//! Multiply a literal by the constant to express it in internal units:
//!
//! ```
//! use gyre_core::units;
//!
//! let path_limit = 25.0 * units::CM;
//! assert_eq!(path_limit, 250.0);
//! ```

/// Millimetre, the internal length unit.
pub const MM: f64 = 1.0;

/// Centimetre.
pub const CM: f64 = 10.0 * MM;

/// Metre.
pub const M: f64 = 1000.0 * MM;

/// GeV, the internal energy/momentum unit.
pub const GEV: f64 = 1.0;

/// MeV.
pub const MEV: f64 = 1e-3 * GEV;

/// Tesla, expressed in GeV/(e*mm).
///
/// With this value, a track of transverse momentum `pt` (GeV) and unit
/// charge in a field `B` (internal units) bends with radius `pt / B` in mm.
pub const T: f64 = 0.000_299_792_458;

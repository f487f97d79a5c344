//! Track parameters: kinematic state, covariance, propagation direction.

use std::fmt;

use crate::math::Vec3;

/// Sign of propagation along the trajectory.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Direction {
    /// Along the momentum direction.
    #[default]
    Forward,
    /// Against the momentum direction.
    Backward,
}

impl Direction {
    /// `+1.0` for forward, `-1.0` for backward.
    pub fn sign(&self) -> f64 {
        match self {
            Self::Forward => 1.0,
            Self::Backward => -1.0,
        }
    }

    /// The opposite direction.
    pub fn flipped(&self) -> Self {
        match self {
            Self::Forward => Self::Backward,
            Self::Backward => Self::Forward,
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Forward => write!(f, "forward"),
            Self::Backward => write!(f, "backward"),
        }
    }
}

/// Index into the fixed bound-parameter basis.
///
/// The covariance matrix is expressed over `(loc0, loc1, phi, theta, q/p)`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[repr(usize)]
pub enum ParamIndex {
    /// First local coordinate on the reference surface.
    Loc0 = 0,
    /// Second local coordinate.
    Loc1 = 1,
    /// Azimuthal angle of the direction.
    Phi = 2,
    /// Polar angle of the direction.
    Theta = 3,
    /// Charge over absolute momentum.
    QOverP = 4,
}

/// Number of bound parameters.
pub const PARAM_DIM: usize = 5;

/// Symmetric covariance matrix over the bound-parameter basis.
///
/// Stored dense; the symmetric setter keeps both triangles in sync, so the
/// matrix stays symmetric by construction.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Covariance([[f64; PARAM_DIM]; PARAM_DIM]);

impl Covariance {
    /// The zero matrix.
    pub fn zero() -> Self {
        Self([[0.0; PARAM_DIM]; PARAM_DIM])
    }

    /// A diagonal matrix from per-parameter variances.
    pub fn from_diagonal(diag: [f64; PARAM_DIM]) -> Self {
        let mut m = Self::zero();
        for (i, v) in diag.into_iter().enumerate() {
            m.0[i][i] = v;
        }
        m
    }

    /// Element access.
    pub fn get(&self, row: ParamIndex, col: ParamIndex) -> f64 {
        self.0[row as usize][col as usize]
    }

    /// Set an element and its mirror.
    pub fn set(&mut self, row: ParamIndex, col: ParamIndex, value: f64) {
        self.0[row as usize][col as usize] = value;
        self.0[col as usize][row as usize] = value;
    }

    /// Diagonal element for a parameter.
    pub fn variance(&self, param: ParamIndex) -> f64 {
        self.0[param as usize][param as usize]
    }

    /// Add to a diagonal element (noise inflation).
    pub fn add_variance(&mut self, param: ParamIndex, value: f64) {
        self.0[param as usize][param as usize] += value;
    }
}

/// The kinematic state of one in-flight track.
///
/// Owned exclusively by a single propagation; mutated only by the stepper
/// (transport) and by registered actions (interaction effects).
#[derive(Clone, Debug, PartialEq)]
pub struct TrackState {
    /// Global position in mm.
    pub position: Vec3,
    /// Unit direction of the momentum.
    pub direction: Vec3,
    /// Charge in elementary charges; zero for neutral tracks.
    pub q: f64,
    /// Absolute momentum in GeV.
    pub p: f64,
    /// Optional covariance over the bound-parameter basis.
    pub covariance: Option<Covariance>,
    /// Signed accumulated path length in mm.
    pub path_length: f64,
}

impl TrackState {
    /// A fresh track at a position, with the direction normalized and zero
    /// accumulated path.
    pub fn new(position: Vec3, direction: Vec3, q: f64, p: f64) -> Self {
        Self {
            position,
            direction: direction.normalized(),
            q,
            p,
            covariance: None,
            path_length: 0.0,
        }
    }

    /// Attach a covariance.
    pub fn with_covariance(mut self, covariance: Covariance) -> Self {
        self.covariance = Some(covariance);
        self
    }

    /// Charge over momentum; zero for neutral tracks.
    pub fn qop(&self) -> f64 {
        if self.q == 0.0 {
            0.0
        } else {
            self.q / self.p
        }
    }

    /// Momentum vector.
    pub fn momentum(&self) -> Vec3 {
        self.direction * self.p
    }

    /// Transverse momentum.
    pub fn pt(&self) -> f64 {
        self.momentum().perp()
    }
}

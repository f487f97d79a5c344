//! The field-model contract consumed by the field-integrating stepper.

use crate::context::FieldContext;
use crate::math::Vec3;

/// A magnetic field sampled by position.
///
/// Implementations must be pure: the same position (and context) always
/// yields the same value, with no interior mutability. Field values are in
/// internal units (see [`units::T`](crate::units::T)).
pub trait FieldProvider: Send + Sync {
    /// Field value at a position.
    fn value_at(&self, fctx: &FieldContext, position: Vec3) -> Vec3;
}

/// A spatially uniform field.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ConstantField {
    value: Vec3,
}

impl ConstantField {
    /// A uniform field with the given value.
    pub fn new(value: Vec3) -> Self {
        Self { value }
    }

    /// A uniform field of strength `bz` along the global z-axis.
    pub fn axial(bz: f64) -> Self {
        Self {
            value: Vec3::new(0.0, 0.0, bz),
        }
    }
}

impl FieldProvider for ConstantField {
    fn value_at(&self, _fctx: &FieldContext, _position: Vec3) -> Vec3 {
        self.value
    }
}

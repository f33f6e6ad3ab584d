//! 2D vector helpers
//!
//! Positions and velocities are plain `glam::Vec2` values. Addition,
//! subtraction, scalar multiplication and the dot product come from glam;
//! this module adds the checked division, zero-safe normalization, rotation
//! by an angle and polar construction the simulation relies on.

use glam::Vec2;

use crate::error::SimError;

/// Extra operations on `Vec2`
pub trait VecExt: Sized {
    /// Divide both components by `scalar`, failing on zero
    fn try_div(self, scalar: f32) -> Result<Self, SimError>;

    /// Euclidean length
    fn magnitude(self) -> f32;

    /// Unit vector in the same direction, or zero for a zero vector
    fn unit(self) -> Self;

    /// Rotate counter-clockwise (in math orientation) by `angle` radians
    fn rotated(self, angle: f32) -> Self;
}

impl VecExt for Vec2 {
    fn try_div(self, scalar: f32) -> Result<Self, SimError> {
        if scalar == 0.0 {
            return Err(SimError::DivisionByZero);
        }
        Ok(Vec2::new(self.x / scalar, self.y / scalar))
    }

    #[inline]
    fn magnitude(self) -> f32 {
        (self.x * self.x + self.y * self.y).sqrt()
    }

    fn unit(self) -> Self {
        let mag = self.magnitude();
        // mag is non-zero past this point
        self.try_div(mag).unwrap_or(Vec2::ZERO)
    }

    fn rotated(self, angle: f32) -> Self {
        let (sin, cos) = angle.sin_cos();
        Vec2::new(self.x * cos - self.y * sin, self.x * sin + self.y * cos)
    }
}

/// Build a vector of length `magnitude` pointing along `angle`
#[inline]
pub fn from_angle(angle: f32, magnitude: f32) -> Vec2 {
    Vec2::new(angle.cos() * magnitude, angle.sin() * magnitude)
}

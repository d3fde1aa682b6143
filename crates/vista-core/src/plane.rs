//! Infinite planes used for slicing and reflection.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::error::{Result, VistaError};

/// A plane defined by a point (origin) and a unit normal.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Plane {
    origin: Vec3,
    normal: Vec3,
}

impl Plane {
    /// Creates a plane through `origin` with the given normal.
    ///
    /// The normal is normalized; a zero normal is rejected.
    pub fn new(origin: Vec3, normal: Vec3) -> Result<Self> {
        let normal = normal
            .try_normalize()
            .ok_or_else(|| VistaError::Validation("plane normal cannot be zero".to_string()))?;
        Ok(Self { origin, normal })
    }

    /// Plane through the origin perpendicular to the x axis.
    #[must_use]
    pub fn yz() -> Self {
        Self {
            origin: Vec3::ZERO,
            normal: Vec3::X,
        }
    }

    /// Plane through the origin perpendicular to the y axis.
    #[must_use]
    pub fn zx() -> Self {
        Self {
            origin: Vec3::ZERO,
            normal: Vec3::Y,
        }
    }

    /// Plane through the origin perpendicular to the z axis.
    #[must_use]
    pub fn xy() -> Self {
        Self {
            origin: Vec3::ZERO,
            normal: Vec3::Z,
        }
    }

    /// Returns the origin point of the plane.
    #[must_use]
    pub fn origin(&self) -> Vec3 {
        self.origin
    }

    /// Returns the unit normal of the plane.
    #[must_use]
    pub fn normal(&self) -> Vec3 {
        self.normal
    }

    /// Returns the signed distance from a point to the plane.
    ///
    /// Positive values are on the normal side.
    #[must_use]
    pub fn signed_distance(&self, point: Vec3) -> f32 {
        (point - self.origin).dot(self.normal)
    }

    /// Projects a point onto the plane.
    #[must_use]
    pub fn project(&self, point: Vec3) -> Vec3 {
        point - self.signed_distance(point) * self.normal
    }

    /// Moves the plane along its normal.
    #[must_use]
    pub fn pushed(mut self, distance: f32) -> Self {
        self.origin += self.normal * distance;
        self
    }

    /// Returns the same plane with the opposite normal.
    #[must_use]
    pub fn flipped(mut self) -> Self {
        self.normal = -self.normal;
        self
    }
}

impl Default for Plane {
    fn default() -> Self {
        Self::xy()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_normalizes() {
        let p = Plane::new(Vec3::ZERO, Vec3::new(0.0, 0.0, 5.0)).unwrap();
        assert_eq!(p.normal(), Vec3::Z);
        assert!(Plane::new(Vec3::ZERO, Vec3::ZERO).is_err());
    }

    #[test]
    fn test_signed_distance_and_project() {
        let p = Plane::new(Vec3::new(0.0, 1.0, 0.0), Vec3::Y).unwrap();
        assert!((p.signed_distance(Vec3::new(3.0, 4.0, 0.0)) - 3.0).abs() < 1e-6);
        assert!((p.signed_distance(Vec3::ZERO) + 1.0).abs() < 1e-6);
        assert_eq!(p.project(Vec3::new(2.0, 5.0, 1.0)), Vec3::new(2.0, 1.0, 1.0));
    }

    #[test]
    fn test_pushed_and_flipped() {
        let p = Plane::xy().pushed(2.0).flipped();
        assert_eq!(p.origin(), Vec3::new(0.0, 0.0, 2.0));
        assert_eq!(p.normal(), -Vec3::Z);
    }
}

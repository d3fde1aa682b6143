//! Rigid and affine transformations.
//!
//! Matrices follow glam's column-vector convention, so `a * b` applies `b` first.

use glam::{Mat3, Mat4, Quat, Vec3};

use crate::error::{Result, VistaError};

/// A transformation represented as separate components.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    /// Translation component.
    pub translation: Vec3,
    /// Rotation component as a quaternion.
    pub rotation: Quat,
    /// Scale component.
    pub scale: Vec3,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            translation: Vec3::ZERO,
            rotation: Quat::IDENTITY,
            scale: Vec3::ONE,
        }
    }
}

impl Transform {
    /// Creates a new identity transform.
    #[must_use]
    pub fn identity() -> Self {
        Self::default()
    }

    /// Creates a transform from a translation.
    #[must_use]
    pub fn from_translation(translation: Vec3) -> Self {
        Self {
            translation,
            ..Default::default()
        }
    }

    /// Creates a transform from a rotation.
    #[must_use]
    pub fn from_rotation(rotation: Quat) -> Self {
        Self {
            rotation,
            ..Default::default()
        }
    }

    /// Creates a transform from a per-axis scale.
    #[must_use]
    pub fn from_scale(scale: Vec3) -> Self {
        Self {
            scale,
            ..Default::default()
        }
    }

    /// Creates a transform from a Mat4.
    ///
    /// This decomposition may not be exact for matrices with shear.
    #[must_use]
    pub fn from_matrix(matrix: Mat4) -> Self {
        let (scale, rotation, translation) = matrix.to_scale_rotation_translation();
        Self {
            translation,
            rotation,
            scale,
        }
    }

    /// Converts this transform to a Mat4 (scale, then rotate, then translate).
    #[must_use]
    pub fn to_matrix(&self) -> Mat4 {
        Mat4::from_scale_rotation_translation(self.scale, self.rotation, self.translation)
    }

    /// Translates the transform.
    #[must_use]
    pub fn then_translate(mut self, delta: Vec3) -> Self {
        self.translation += delta;
        self
    }

    /// Rotates the transform about the origin.
    #[must_use]
    pub fn then_rotate(mut self, delta: Quat) -> Self {
        self.rotation = delta * self.rotation;
        self.translation = delta * self.translation;
        self
    }

    /// Scales the transform about the origin.
    #[must_use]
    pub fn then_scale(mut self, factor: Vec3) -> Self {
        self.scale *= factor;
        self.translation *= factor;
        self
    }

    /// Applies the transform to a single point.
    #[must_use]
    pub fn apply(&self, point: Vec3) -> Vec3 {
        self.rotation * (point * self.scale) + self.translation
    }
}

/// Returns a matrix rotating by `angle_deg` degrees about `axis` through `point`.
///
/// The axis need not be normalized but must be non-zero.
pub fn axis_angle_rotation(axis: Vec3, angle_deg: f32, point: Option<Vec3>) -> Result<Mat4> {
    let axis = axis
        .try_normalize()
        .ok_or_else(|| VistaError::Validation("rotation axis cannot be zero".to_string()))?;
    let rotation = Mat4::from_axis_angle(axis, angle_deg.to_radians());
    Ok(match point {
        Some(p) => Mat4::from_translation(p) * rotation * Mat4::from_translation(-p),
        None => rotation,
    })
}

/// Returns a matrix reflecting across the plane with `normal` through `point`.
///
/// The plane passes through the origin when `point` is `None`.
pub fn reflection(normal: Vec3, point: Option<Vec3>) -> Result<Mat4> {
    let n = normal
        .try_normalize()
        .ok_or_else(|| VistaError::Validation("plane normal cannot be zero".to_string()))?;

    // R = I - 2 n n^T
    let projection = Mat3::from_cols(n * n.x, n * n.y, n * n.z);
    let r = Mat3::IDENTITY - projection * 2.0;
    let mut m = Mat4::from_mat3(r);
    if let Some(p) = point {
        // R (x - p) + p = R x + (p - R p)
        m.w_axis = (p - r * p).extend(1.0);
    }
    Ok(m)
}

/// Applies `matrix` to every point in place.
pub fn apply_to_points(matrix: &Mat4, points: &mut [Vec3]) {
    for p in points {
        *p = matrix.transform_point3(*p);
    }
}

/// Returns true if the linear part of `matrix` flips orientation.
#[must_use]
pub fn is_orientation_reversing(matrix: &Mat4) -> bool {
    Mat3::from_mat4(*matrix).determinant() < 0.0
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: Vec3, b: Vec3) -> bool {
        (a - b).length() < 1e-5
    }

    #[test]
    fn test_transform_round_trip_matrix() {
        let t = Transform {
            translation: Vec3::new(1.0, 2.0, 3.0),
            rotation: Quat::from_rotation_z(0.5),
            scale: Vec3::new(2.0, 2.0, 2.0),
        };
        let back = Transform::from_matrix(t.to_matrix());
        assert!(approx(back.translation, t.translation));
        assert!(approx(back.scale, t.scale));
        let p = Vec3::new(0.3, -0.2, 0.9);
        assert!(approx(t.apply(p), t.to_matrix().transform_point3(p)));
    }

    #[test]
    fn test_then_rotate_moves_translation() {
        let t = Transform::from_translation(Vec3::X)
            .then_rotate(Quat::from_rotation_z(std::f32::consts::FRAC_PI_2));
        assert!(approx(t.apply(Vec3::ZERO), Vec3::Y));
    }

    #[test]
    fn test_axis_angle_about_point() {
        let m = axis_angle_rotation(Vec3::Z, 180.0, Some(Vec3::X)).unwrap();
        assert!(approx(m.transform_point3(Vec3::ZERO), Vec3::new(2.0, 0.0, 0.0)));
    }

    #[test]
    fn test_reflection_through_origin() {
        let m = reflection(Vec3::new(0.0, 2.0, 0.0), None).unwrap();
        assert!(approx(m.transform_point3(Vec3::new(1.0, -1.0, 1.0)), Vec3::new(1.0, 1.0, 1.0)));
        assert!(is_orientation_reversing(&m));
    }

    #[test]
    fn test_reflection_about_point() {
        let m = reflection(Vec3::X, Some(Vec3::new(1.0, 0.0, 0.0))).unwrap();
        assert!(approx(m.transform_point3(Vec3::ZERO), Vec3::new(2.0, 0.0, 0.0)));
    }

    #[test]
    fn test_zero_normal_rejected() {
        assert!(reflection(Vec3::ZERO, None).is_err());
        assert!(axis_angle_rotation(Vec3::ZERO, 90.0, None).is_err());
    }

    #[test]
    fn test_apply_to_points() {
        let mut pts = vec![Vec3::X, Vec3::Y];
        apply_to_points(&Mat4::from_translation(Vec3::Z), &mut pts);
        assert_eq!(pts, vec![Vec3::new(1.0, 0.0, 1.0), Vec3::new(0.0, 1.0, 1.0)]);
    }
}

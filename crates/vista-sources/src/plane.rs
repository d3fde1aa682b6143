//! Subdivided parallelogram source.

use glam::{Quat, Vec3};

use vista_core::{Result, SurfaceMesh, VistaError};

use crate::primitives::check_count;

/// Checks that a subdivision count is at least 1.
pub(crate) fn check_resolution(name: &str, value: usize) -> Result<usize> {
    check_count(name, value, 1)
}

/// A planar parallelogram spanned by `origin -> point_a` and
/// `origin -> point_b`, subdivided into a grid of quads.
///
/// The normal is `(point_a - origin) x (point_b - origin)`, normalized.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlaneSource {
    origin: Vec3,
    point_a: Vec3,
    point_b: Vec3,
    i_resolution: usize,
    j_resolution: usize,
}

impl Default for PlaneSource {
    /// A unit square in the xy plane centered at the origin, 10 x 10 quads.
    fn default() -> Self {
        Self {
            origin: Vec3::new(-0.5, -0.5, 0.0),
            point_a: Vec3::new(0.5, -0.5, 0.0),
            point_b: Vec3::new(-0.5, 0.5, 0.0),
            i_resolution: 10,
            j_resolution: 10,
        }
    }
}

impl PlaneSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a plane from its three corner points.
    pub fn from_points(
        origin: Vec3,
        point_a: Vec3,
        point_b: Vec3,
        i_resolution: usize,
        j_resolution: usize,
    ) -> Result<Self> {
        check_resolution("i resolution", i_resolution)?;
        check_resolution("j resolution", j_resolution)?;
        Ok(Self::from_checked_points(
            origin,
            point_a,
            point_b,
            i_resolution,
            j_resolution,
        ))
    }

    /// Like [`PlaneSource::from_points`], for resolutions already checked.
    pub(crate) fn from_checked_points(
        origin: Vec3,
        point_a: Vec3,
        point_b: Vec3,
        i_resolution: usize,
        j_resolution: usize,
    ) -> Self {
        Self {
            origin,
            point_a,
            point_b,
            i_resolution,
            j_resolution,
        }
    }

    pub fn origin(&self) -> Vec3 {
        self.origin
    }

    pub fn point_a(&self) -> Vec3 {
        self.point_a
    }

    pub fn point_b(&self) -> Vec3 {
        self.point_b
    }

    pub fn i_resolution(&self) -> usize {
        self.i_resolution
    }

    pub fn set_i_resolution(&mut self, resolution: usize) -> Result<()> {
        self.i_resolution = check_resolution("i resolution", resolution)?;
        Ok(())
    }

    pub fn j_resolution(&self) -> usize {
        self.j_resolution
    }

    pub fn set_j_resolution(&mut self, resolution: usize) -> Result<()> {
        self.j_resolution = check_resolution("j resolution", resolution)?;
        Ok(())
    }

    /// Center of the parallelogram.
    pub fn center(&self) -> Vec3 {
        (self.point_a + self.point_b) * 0.5
    }

    /// Moves the plane so its center is at `center`.
    pub fn set_center(&mut self, center: Vec3) {
        let delta = center - self.center();
        self.origin += delta;
        self.point_a += delta;
        self.point_b += delta;
    }

    /// Unit normal, or +z for a degenerate plane.
    pub fn normal(&self) -> Vec3 {
        (self.point_a - self.origin)
            .cross(self.point_b - self.origin)
            .try_normalize()
            .unwrap_or(Vec3::Z)
    }

    /// Rotates the plane about its center so its normal becomes `normal`.
    pub fn set_normal(&mut self, normal: Vec3) -> Result<()> {
        let normal = normal
            .try_normalize()
            .ok_or_else(|| VistaError::Validation("plane normal cannot be zero".to_string()))?;
        let rotation = Quat::from_rotation_arc(self.normal(), normal);
        let center = self.center();
        for p in [&mut self.origin, &mut self.point_a, &mut self.point_b] {
            *p = center + rotation * (*p - center);
        }
        Ok(())
    }

    /// Reverses the normal by swapping `point_a` and `point_b`.
    pub fn flip_normal(&mut self) {
        std::mem::swap(&mut self.point_a, &mut self.point_b);
    }

    /// Translates the plane along its normal.
    pub fn push(&mut self, distance: f32) {
        let center = self.center();
        self.set_center(center + self.normal() * distance);
    }

    /// Generates the `(i + 1) x (j + 1)` point grid and its quads.
    pub fn output(&self) -> SurfaceMesh {
        let (ir, jr) = (self.i_resolution, self.j_resolution);
        let (u, v) = (self.point_a - self.origin, self.point_b - self.origin);

        let mut points = Vec::with_capacity((ir + 1) * (jr + 1));
        for j in 0..=jr {
            for i in 0..=ir {
                let (s, t) = (i as f32 / ir as f32, j as f32 / jr as f32);
                points.push(self.origin + u * s + v * t);
            }
        }

        let row = (ir + 1) as u32;
        let mut faces = Vec::with_capacity(ir * jr);
        for j in 0..jr as u32 {
            for i in 0..ir as u32 {
                let k = j * row + i;
                faces.push(vec![k, k + 1, k + row + 1, k + row]);
            }
        }
        SurfaceMesh::new(points, faces)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grid_counts_and_normal() {
        let plane = PlaneSource::from_points(Vec3::ZERO, Vec3::X, Vec3::Y, 3, 2).unwrap();
        let mesh = plane.output();
        assert_eq!(mesh.n_points(), 12);
        assert_eq!(mesh.n_faces(), 6);
        assert!(mesh
            .compute_face_normals()
            .iter()
            .all(|n| n.abs_diff_eq(Vec3::Z, 1e-6)));
        assert!((mesh.area() - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_zero_resolution_rejected() {
        assert!(matches!(
            PlaneSource::from_points(Vec3::ZERO, Vec3::X, Vec3::Y, 0, 1),
            Err(VistaError::Range { .. })
        ));
        assert!(PlaneSource::new().set_j_resolution(0).is_err());
    }

    #[test]
    fn test_flip_and_push() {
        let mut plane = PlaneSource::new();
        plane.flip_normal();
        assert_eq!(plane.normal(), Vec3::NEG_Z);
        plane.push(2.0);
        assert!(plane.center().abs_diff_eq(Vec3::new(0.0, 0.0, -2.0), 1e-6));
    }

    #[test]
    fn test_set_normal_keeps_center() {
        let mut plane = PlaneSource::new();
        plane.set_center(Vec3::new(1.0, 2.0, 3.0));
        plane.set_normal(Vec3::X).unwrap();
        assert!(plane.normal().abs_diff_eq(Vec3::X, 1e-6));
        assert!(plane.center().abs_diff_eq(Vec3::new(1.0, 2.0, 3.0), 1e-6));
        assert!(plane.set_normal(Vec3::ZERO).is_err());
    }
}

//! Flat disc and annulus source.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use vista_core::{check_non_negative, Result, SurfaceMesh, VistaError};

use crate::primitives::{self, along_x, check_count, check_direction, orient};

/// Parameters of a [`DiscSource`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DiscConfig {
    pub center: Vec3,
    /// Normal of the disc plane.
    pub normal: Vec3,
    pub inner: f32,
    pub outer: f32,
    /// Number of rings between the two radii.
    pub radial_resolution: usize,
    /// Number of segments around.
    pub circumferential_resolution: usize,
}

impl Default for DiscConfig {
    fn default() -> Self {
        Self {
            center: Vec3::ZERO,
            normal: Vec3::Z,
            inner: 0.25,
            outer: 0.5,
            radial_resolution: 1,
            circumferential_resolution: 6,
        }
    }
}

impl DiscConfig {
    pub fn with_center(mut self, center: Vec3) -> Self {
        self.center = center;
        self
    }

    pub fn with_normal(mut self, normal: Vec3) -> Self {
        self.normal = normal;
        self
    }

    /// Sets the inner and outer radii.
    pub fn with_radii(mut self, inner: f32, outer: f32) -> Self {
        self.inner = inner;
        self.outer = outer;
        self
    }

    /// Sets the radial and circumferential resolutions.
    pub fn with_resolution(mut self, radial: usize, circumferential: usize) -> Self {
        self.radial_resolution = radial;
        self.circumferential_resolution = circumferential;
        self
    }

    /// Checks the normal, the radii order and the resolutions.
    pub fn validate(&self) -> Result<()> {
        check_direction("normal", self.normal)?;
        check_radii(self.inner, self.outer)?;
        check_count("radial_resolution", self.radial_resolution, 1)?;
        check_count("circumferential_resolution", self.circumferential_resolution, 3)?;
        Ok(())
    }

    /// Parses and validates a JSON configuration.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }
}

fn check_radii(inner: f32, outer: f32) -> Result<()> {
    check_non_negative("inner", inner)?;
    check_non_negative("outer", outer)?;
    if inner > outer {
        return Err(VistaError::Validation(format!(
            "inner radius ({inner}) must not exceed outer radius ({outer})"
        )));
    }
    Ok(())
}

/// A flat annulus centered on a point and facing a normal.
///
/// With an inner radius of zero the hole closes to a full disc.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DiscSource {
    config: DiscConfig,
}

impl DiscSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a disc from a configuration, validating it first.
    pub fn from_config(config: &DiscConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            config: config.clone(),
        })
    }

    pub fn config(&self) -> &DiscConfig {
        &self.config
    }

    pub fn set_center(&mut self, center: Vec3) {
        self.config.center = center;
    }

    /// Sets the plane normal; it must be non-zero.
    pub fn set_normal(&mut self, normal: Vec3) -> Result<()> {
        self.config.normal = check_direction("normal", normal)?;
        Ok(())
    }

    /// Sets both radii; the inner one may not exceed the outer one.
    pub fn set_radii(&mut self, inner: f32, outer: f32) -> Result<()> {
        check_radii(inner, outer)?;
        self.config.inner = inner;
        self.config.outer = outer;
        Ok(())
    }

    /// Sets the resolutions; at least one ring and three segments.
    pub fn set_resolution(&mut self, radial: usize, circumferential: usize) -> Result<()> {
        check_count("radial_resolution", radial, 1)?;
        check_count("circumferential_resolution", circumferential, 3)?;
        self.config.radial_resolution = radial;
        self.config.circumferential_resolution = circumferential;
        Ok(())
    }

    /// Generates the disc, its faces wound towards the normal.
    pub fn output(&self) -> Result<SurfaceMesh> {
        let c = &self.config;
        let disc = primitives::disc(
            c.inner,
            c.outer,
            c.radial_resolution,
            c.circumferential_resolution,
        );
        let mut mesh = along_x(disc);
        orient(&mut mesh, c.center, c.normal)?;
        Ok(mesh)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_disc_faces_z() {
        let mesh = DiscSource::new().output().unwrap();
        assert_eq!(mesh.n_points(), 12);
        assert_eq!(mesh.n_faces(), 6);
        for n in mesh.compute_face_normals() {
            assert!(n.abs_diff_eq(Vec3::Z, 1e-5));
        }
        for p in mesh.points() {
            let r = p.length();
            assert!((r - 0.25).abs() < 1e-5 || (r - 0.5).abs() < 1e-5);
            assert!(p.z.abs() < 1e-6);
        }
    }

    #[test]
    fn test_normal_and_center() {
        let config = DiscConfig::default()
            .with_center(Vec3::new(0.0, 0.0, 2.0))
            .with_normal(Vec3::new(1.0, 1.0, 0.0))
            .with_radii(0.0, 1.0)
            .with_resolution(2, 16);
        let mesh = DiscSource::from_config(&config).unwrap().output().unwrap();
        assert_eq!(mesh.n_faces(), 32);
        let axis = Vec3::new(1.0, 1.0, 0.0).normalize();
        for p in mesh.points() {
            assert!((*p - config.center).dot(axis).abs() < 1e-5);
        }
        for n in mesh.compute_face_normals() {
            assert!(n.abs_diff_eq(axis, 1e-4));
        }
    }

    #[test]
    fn test_radii_order() {
        let mut disc = DiscSource::new();
        assert!(disc.set_radii(1.0, 0.5).is_err());
        assert!(disc.set_resolution(0, 6).is_err());
        assert!(disc.set_normal(Vec3::ZERO).is_err());
        assert_eq!(disc.config(), &DiscConfig::default());
        assert!(DiscConfig::from_json(r#"{"inner": 2.0}"#).is_err());
    }
}

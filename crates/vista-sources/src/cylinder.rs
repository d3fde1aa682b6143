//! Parametric cylinder source.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use vista_core::{check_non_negative, Result, SurfaceMesh};

use crate::primitives::{self, along_x, check_count, check_direction, orient};

/// Parameters of a [`CylinderSource`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CylinderConfig {
    /// Midpoint of the axis.
    pub center: Vec3,
    /// Axis direction.
    pub direction: Vec3,
    pub radius: f32,
    pub height: f32,
    /// Close both ends with polygons.
    pub capping: bool,
    /// Number of sides.
    pub resolution: usize,
}

impl Default for CylinderConfig {
    fn default() -> Self {
        Self {
            center: Vec3::ZERO,
            direction: Vec3::X,
            radius: 0.5,
            height: 1.0,
            capping: true,
            resolution: 100,
        }
    }
}

impl CylinderConfig {
    /// Sets the axis midpoint.
    pub fn with_center(mut self, center: Vec3) -> Self {
        self.center = center;
        self
    }

    /// Sets the axis direction.
    pub fn with_direction(mut self, direction: Vec3) -> Self {
        self.direction = direction;
        self
    }

    /// Sets the radius.
    pub fn with_radius(mut self, radius: f32) -> Self {
        self.radius = radius;
        self
    }

    /// Sets the height.
    pub fn with_height(mut self, height: f32) -> Self {
        self.height = height;
        self
    }

    /// Sets whether the ends are capped.
    pub fn with_capping(mut self, capping: bool) -> Self {
        self.capping = capping;
        self
    }

    /// Sets the number of sides.
    pub fn with_resolution(mut self, resolution: usize) -> Self {
        self.resolution = resolution;
        self
    }

    pub fn validate(&self) -> Result<()> {
        check_direction("direction", self.direction)?;
        check_non_negative("radius", self.radius)?;
        check_non_negative("height", self.height)?;
        check_count("resolution", self.resolution, 3)?;
        Ok(())
    }

    /// Parses and validates a JSON configuration.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }
}

/// A cylinder along an arbitrary direction.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CylinderSource {
    config: CylinderConfig,
}

impl CylinderSource {
    /// Creates a cylinder with default parameters.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a cylinder from a configuration, validating it first.
    pub fn from_config(config: &CylinderConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            config: config.clone(),
        })
    }

    /// The current parameters.
    pub fn config(&self) -> &CylinderConfig {
        &self.config
    }

    /// Moves the axis midpoint to `center`.
    pub fn set_center(&mut self, center: Vec3) {
        self.config.center = center;
    }

    /// Sets the axis direction; it must be non-zero.
    pub fn set_direction(&mut self, direction: Vec3) -> Result<()> {
        self.config.direction = check_direction("direction", direction)?;
        Ok(())
    }

    pub fn set_radius(&mut self, radius: f32) -> Result<()> {
        self.config.radius = check_non_negative("radius", radius)?;
        Ok(())
    }

    pub fn set_height(&mut self, height: f32) -> Result<()> {
        self.config.height = check_non_negative("height", height)?;
        Ok(())
    }

    pub fn set_capping(&mut self, capping: bool) {
        self.config.capping = capping;
    }

    /// Sets the number of sides; at least 3.
    pub fn set_resolution(&mut self, resolution: usize) -> Result<()> {
        self.config.resolution = check_count("resolution", resolution, 3)?;
        Ok(())
    }

    /// Generates the cylinder.
    pub fn output(&self) -> Result<SurfaceMesh> {
        let c = &self.config;
        let mut mesh = primitives::cylinder(c.resolution, c.capping);
        mesh.scale(Vec3::new(2.0 * c.radius, 2.0 * c.radius, c.height));
        let mut mesh = along_x(mesh);
        orient(&mut mesh, c.center, c.direction)?;
        Ok(mesh)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_cylinder() {
        let mesh = CylinderSource::new().output().unwrap();
        assert_eq!(mesh.n_points(), 200);
        assert_eq!(mesh.n_faces(), 102);
        let b = mesh.bounds().unwrap();
        assert!(b.min.abs_diff_eq(Vec3::splat(-0.5), 1e-5));
        assert!(b.max.abs_diff_eq(Vec3::splat(0.5), 1e-5));
    }

    #[test]
    fn test_uncapped_along_y() {
        let config = CylinderConfig::default()
            .with_direction(Vec3::Y)
            .with_center(Vec3::new(0.0, 1.0, 0.0))
            .with_radius(2.0)
            .with_height(3.0)
            .with_capping(false)
            .with_resolution(8);
        let mesh = CylinderSource::from_config(&config).unwrap().output().unwrap();
        assert_eq!(mesh.n_faces(), 8);
        let b = mesh.bounds().unwrap();
        assert!((b.min.y + 0.5).abs() < 1e-5);
        assert!((b.max.y - 2.5).abs() < 1e-5);
        assert!((b.max.x - 2.0).abs() < 1e-5);
        // The side is a tube: every point is at the radius from the axis.
        for p in mesh.points() {
            assert!((Vec3::new(p.x, 0.0, p.z).length() - 2.0).abs() < 1e-4);
        }
    }

    #[test]
    fn test_setters_validate() {
        let mut cylinder = CylinderSource::new();
        assert!(cylinder.set_radius(-1.0).is_err());
        assert!(cylinder.set_direction(Vec3::new(f32::NAN, 0.0, 0.0)).is_err());
        assert!(cylinder.set_resolution(0).is_err());
        assert_eq!(cylinder.config(), &CylinderConfig::default());
        assert!(CylinderConfig::from_json(r#"{"resolution": 2}"#).is_err());
        let parsed = CylinderConfig::from_json(r#"{"radius": 1.5}"#).unwrap();
        assert_eq!(parsed.radius, 1.5);
    }
}

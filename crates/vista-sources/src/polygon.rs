//! Regular polygon source.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use vista_core::{check_non_negative, Result, SurfaceMesh};

use crate::primitives::{along_x, check_count, check_direction, orient, regular_polygon};

/// Parameters of a [`PolygonSource`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PolygonConfig {
    pub center: Vec3,
    /// Circumradius.
    pub radius: f32,
    pub normal: Vec3,
    pub n_sides: usize,
    /// Emit one filled face instead of the outline.
    pub fill: bool,
}

impl Default for PolygonConfig {
    fn default() -> Self {
        Self {
            center: Vec3::ZERO,
            radius: 1.0,
            normal: Vec3::Z,
            n_sides: 6,
            fill: true,
        }
    }
}

impl PolygonConfig {
    pub fn with_center(mut self, center: Vec3) -> Self {
        self.center = center;
        self
    }

    pub fn with_radius(mut self, radius: f32) -> Self {
        self.radius = radius;
        self
    }

    pub fn with_normal(mut self, normal: Vec3) -> Self {
        self.normal = normal;
        self
    }

    /// Sets the number of sides.
    pub fn with_sides(mut self, n_sides: usize) -> Self {
        self.n_sides = n_sides;
        self
    }

    /// Sets whether the polygon is filled or drawn as an outline.
    pub fn with_fill(mut self, fill: bool) -> Self {
        self.fill = fill;
        self
    }

    pub fn validate(&self) -> Result<()> {
        check_non_negative("radius", self.radius)?;
        check_direction("normal", self.normal)?;
        check_count("n_sides", self.n_sides, 3)?;
        Ok(())
    }

    /// Parses and validates a JSON configuration.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }
}

/// A regular polygon, filled or as a closed outline.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PolygonSource {
    config: PolygonConfig,
}

impl PolygonSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a polygon from a configuration, validating it first.
    pub fn from_config(config: &PolygonConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            config: config.clone(),
        })
    }

    pub fn config(&self) -> &PolygonConfig {
        &self.config
    }

    pub fn set_center(&mut self, center: Vec3) {
        self.config.center = center;
    }

    pub fn set_radius(&mut self, radius: f32) -> Result<()> {
        self.config.radius = check_non_negative("radius", radius)?;
        Ok(())
    }

    pub fn set_normal(&mut self, normal: Vec3) -> Result<()> {
        self.config.normal = check_direction("normal", normal)?;
        Ok(())
    }

    /// Sets the number of sides; at least 3.
    pub fn set_sides(&mut self, n_sides: usize) -> Result<()> {
        self.config.n_sides = check_count("n_sides", n_sides, 3)?;
        Ok(())
    }

    pub fn set_fill(&mut self, fill: bool) {
        self.config.fill = fill;
    }

    /// Generates the polygon.
    pub fn output(&self) -> Result<SurfaceMesh> {
        let c = &self.config;
        let mut polygon = regular_polygon(c.n_sides, c.fill);
        polygon.scale(Vec3::splat(c.radius));
        let mut mesh = along_x(polygon);
        orient(&mut mesh, c.center, c.normal)?;
        Ok(mesh)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filled_hexagon() {
        let mesh = PolygonSource::new().output().unwrap();
        assert_eq!(mesh.n_points(), 6);
        assert_eq!(mesh.n_faces(), 1);
        assert_eq!(mesh.faces()[0], vec![0, 1, 2, 3, 4, 5]);
        assert!(mesh.compute_face_normals()[0].abs_diff_eq(Vec3::Z, 1e-5));
        // Area of a regular hexagon with circumradius 1.
        assert!((mesh.area() - 1.5 * 3f32.sqrt()).abs() < 1e-4);
    }

    #[test]
    fn test_outline_on_tilted_plane() {
        let config = PolygonConfig::default()
            .with_sides(4)
            .with_fill(false)
            .with_radius(2.0)
            .with_normal(Vec3::X)
            .with_center(Vec3::new(5.0, 0.0, 0.0));
        let mesh = PolygonSource::from_config(&config).unwrap().output().unwrap();
        assert_eq!(mesh.n_faces(), 0);
        assert_eq!(mesh.n_lines(), 4);
        for p in mesh.points() {
            assert!((p.x - 5.0).abs() < 1e-5);
            assert!((Vec3::new(0.0, p.y, p.z).length() - 2.0).abs() < 1e-5);
        }
    }

    #[test]
    fn test_setters_validate() {
        let mut polygon = PolygonSource::new();
        assert!(polygon.set_sides(2).is_err());
        assert!(polygon.set_radius(f32::NAN).is_err());
        assert_eq!(polygon.config(), &PolygonConfig::default());
    }
}

//! Parametric cone source.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use vista_core::{check_non_negative, check_range, Result, SurfaceMesh, VistaError};

use crate::primitives::{self, along_x, check_count, check_direction, orient};

/// Parameters of a [`ConeSource`].
///
/// The base may be given by `radius` or by the half-angle at the apex, not
/// both. With neither the radius is 0.5.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConeConfig {
    /// Midpoint of the cone axis.
    pub center: Vec3,
    /// Direction from the base towards the apex.
    pub direction: Vec3,
    /// Distance from the base to the apex.
    pub height: f32,
    /// Base radius.
    pub radius: Option<f32>,
    /// Angle in degrees between the axis and the slanted side.
    pub angle: Option<f32>,
    /// Close the base with a polygon.
    pub capping: bool,
    /// Number of facets around the axis.
    pub resolution: usize,
}

impl Default for ConeConfig {
    fn default() -> Self {
        Self {
            center: Vec3::ZERO,
            direction: Vec3::X,
            height: 1.0,
            radius: None,
            angle: None,
            capping: true,
            resolution: 6,
        }
    }
}

impl ConeConfig {
    /// Sets the center of the axis.
    pub fn with_center(mut self, center: Vec3) -> Self {
        self.center = center;
        self
    }

    /// Sets the apex direction.
    pub fn with_direction(mut self, direction: Vec3) -> Self {
        self.direction = direction;
        self
    }

    /// Sets the height.
    pub fn with_height(mut self, height: f32) -> Self {
        self.height = height;
        self
    }

    /// Sets the base radius.
    pub fn with_radius(mut self, radius: f32) -> Self {
        self.radius = Some(radius);
        self
    }

    /// Sets the apex half-angle in degrees.
    pub fn with_angle(mut self, angle: f32) -> Self {
        self.angle = Some(angle);
        self
    }

    /// Sets whether the base is capped.
    pub fn with_capping(mut self, capping: bool) -> Self {
        self.capping = capping;
        self
    }

    /// Sets the number of facets.
    pub fn with_resolution(mut self, resolution: usize) -> Self {
        self.resolution = resolution;
        self
    }

    /// Checks sizes, the direction and that at most one of radius and angle
    /// is given.
    pub fn validate(&self) -> Result<()> {
        check_direction("direction", self.direction)?;
        check_non_negative("height", self.height)?;
        check_count("resolution", self.resolution, 3)?;
        match (self.radius, self.angle) {
            (Some(_), Some(_)) => Err(VistaError::Validation(
                "only one of radius and angle can be given".to_string(),
            )),
            (Some(radius), None) => check_non_negative("radius", radius).map(drop),
            (None, Some(angle)) => check_angle(angle).map(drop),
            (None, None) => Ok(()),
        }
    }

    /// Parses and validates a JSON configuration.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }
}

fn check_angle(angle: f32) -> Result<f32> {
    check_range("angle", angle, 0.0, 89.999)
}

/// A cone along an arbitrary direction.
///
/// The radius is stored; setting the angle converts it using the current
/// height.
#[derive(Debug, Clone, PartialEq)]
pub struct ConeSource {
    center: Vec3,
    direction: Vec3,
    height: f32,
    radius: f32,
    capping: bool,
    resolution: usize,
}

impl Default for ConeSource {
    fn default() -> Self {
        Self {
            center: Vec3::ZERO,
            direction: Vec3::X,
            height: 1.0,
            radius: 0.5,
            capping: true,
            resolution: 6,
        }
    }
}

impl ConeSource {
    /// Creates a cone with default parameters.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a cone from a configuration, validating it first.
    pub fn from_config(config: &ConeConfig) -> Result<Self> {
        config.validate()?;
        let radius = match (config.radius, config.angle) {
            (Some(radius), _) => radius,
            (None, Some(angle)) => config.height * angle.to_radians().tan(),
            (None, None) => 0.5,
        };
        Ok(Self {
            center: config.center,
            direction: config.direction,
            height: config.height,
            radius,
            capping: config.capping,
            resolution: config.resolution,
        })
    }

    /// Midpoint of the axis.
    pub fn center(&self) -> Vec3 {
        self.center
    }

    /// Moves the cone so its axis midpoint is at `center`.
    pub fn set_center(&mut self, center: Vec3) {
        self.center = center;
    }

    /// Direction from the base towards the apex.
    pub fn direction(&self) -> Vec3 {
        self.direction
    }

    /// Sets the apex direction; it must be non-zero.
    pub fn set_direction(&mut self, direction: Vec3) -> Result<()> {
        self.direction = check_direction("direction", direction)?;
        Ok(())
    }

    pub fn height(&self) -> f32 {
        self.height
    }

    /// Sets the height, keeping the base radius.
    pub fn set_height(&mut self, height: f32) -> Result<()> {
        self.height = check_non_negative("height", height)?;
        Ok(())
    }

    pub fn radius(&self) -> f32 {
        self.radius
    }

    pub fn set_radius(&mut self, radius: f32) -> Result<()> {
        self.radius = check_non_negative("radius", radius)?;
        Ok(())
    }

    /// Angle in degrees between the axis and the slanted side.
    pub fn angle(&self) -> f32 {
        self.radius.atan2(self.height).to_degrees()
    }

    /// Sets the base radius from the apex half-angle in degrees.
    pub fn set_angle(&mut self, angle: f32) -> Result<()> {
        let angle = check_angle(angle)?;
        self.radius = self.height * angle.to_radians().tan();
        Ok(())
    }

    pub fn capping(&self) -> bool {
        self.capping
    }

    pub fn set_capping(&mut self, capping: bool) {
        self.capping = capping;
    }

    pub fn resolution(&self) -> usize {
        self.resolution
    }

    /// Sets the number of facets; at least 3.
    pub fn set_resolution(&mut self, resolution: usize) -> Result<()> {
        self.resolution = check_count("resolution", resolution, 3)?;
        Ok(())
    }

    /// Generates the cone.
    pub fn output(&self) -> Result<SurfaceMesh> {
        let mut mesh = primitives::cone(self.resolution, self.capping);
        mesh.scale(Vec3::new(2.0 * self.radius, 2.0 * self.radius, self.height));
        let mut mesh = along_x(mesh);
        orient(&mut mesh, self.center, self.direction)?;
        Ok(mesh)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_cone_points_along_x() {
        let mesh = ConeSource::new().output().unwrap();
        assert_eq!(mesh.n_points(), 7);
        assert_eq!(mesh.n_faces(), 7);
        let b = mesh.bounds().unwrap();
        assert!((b.max.x - 0.5).abs() < 1e-6);
        assert!((b.min.x + 0.5).abs() < 1e-6);
        // The apex is the only point at +x.
        let apex = mesh.points().iter().filter(|p| (p.x - 0.5).abs() < 1e-6).count();
        assert_eq!(apex, 1);
    }

    #[test]
    fn test_direction_and_center() {
        let mut cone = ConeSource::new();
        cone.set_direction(Vec3::new(0.0, 0.0, -2.0)).unwrap();
        cone.set_center(Vec3::new(1.0, 2.0, 3.0));
        cone.set_height(4.0).unwrap();
        let b = cone.output().unwrap().bounds().unwrap();
        assert!((b.min.z - 1.0).abs() < 1e-5);
        assert!((b.max.z - 5.0).abs() < 1e-5);
        assert!(b.center().truncate().abs_diff_eq(glam::Vec2::new(1.0, 2.0), 1e-5));
    }

    #[test]
    fn test_angle_and_radius() {
        let config = ConeConfig::default().with_height(2.0).with_angle(45.0);
        let cone = ConeSource::from_config(&config).unwrap();
        assert!((cone.radius() - 2.0).abs() < 1e-5);
        assert!((cone.angle() - 45.0).abs() < 1e-3);

        let both = ConeConfig::default().with_radius(1.0).with_angle(30.0);
        assert!(matches!(
            ConeSource::from_config(&both),
            Err(VistaError::Validation(_))
        ));
    }

    #[test]
    fn test_invalid_parameters() {
        let mut cone = ConeSource::new();
        assert!(cone.set_direction(Vec3::ZERO).is_err());
        assert!(cone.set_resolution(2).is_err());
        assert!(cone.set_radius(f32::INFINITY).is_err());
        assert!(cone.set_angle(90.0).is_err());
        assert_eq!(cone.direction(), Vec3::X);
        assert_eq!(cone.resolution(), 6);
        assert!(ConeConfig::from_json(r#"{"height": -1}"#).is_err());
    }
}

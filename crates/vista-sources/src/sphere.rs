//! Parametric sphere source.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use vista_core::{check_non_negative, check_range, Result, SurfaceMesh, VistaError};

use crate::primitives::{self, check_count};

/// Parameters of a [`SphereSource`].
///
/// `theta` is the azimuth about +z measured from +x, `phi` the polar angle
/// from +z. Both are in degrees.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SphereConfig {
    pub center: Vec3,
    pub radius: f32,
    /// Number of points around the azimuth.
    pub theta_resolution: usize,
    /// Number of rows from the first polar angle to the last.
    pub phi_resolution: usize,
    pub start_theta: f32,
    pub end_theta: f32,
    pub start_phi: f32,
    pub end_phi: f32,
}

impl Default for SphereConfig {
    fn default() -> Self {
        Self {
            center: Vec3::ZERO,
            radius: 0.5,
            theta_resolution: 30,
            phi_resolution: 30,
            start_theta: 0.0,
            end_theta: 360.0,
            start_phi: 0.0,
            end_phi: 180.0,
        }
    }
}

impl SphereConfig {
    /// Sets the center.
    pub fn with_center(mut self, center: Vec3) -> Self {
        self.center = center;
        self
    }

    /// Sets the radius.
    pub fn with_radius(mut self, radius: f32) -> Self {
        self.radius = radius;
        self
    }

    /// Sets the azimuthal and polar resolutions.
    pub fn with_resolution(mut self, theta: usize, phi: usize) -> Self {
        self.theta_resolution = theta;
        self.phi_resolution = phi;
        self
    }

    /// Sets the azimuthal range in degrees.
    pub fn with_theta_range(mut self, start: f32, end: f32) -> Self {
        self.start_theta = start;
        self.end_theta = end;
        self
    }

    /// Sets the polar range in degrees.
    pub fn with_phi_range(mut self, start: f32, end: f32) -> Self {
        self.start_phi = start;
        self.end_phi = end;
        self
    }

    /// Checks the radius, the resolutions and both angular ranges.
    pub fn validate(&self) -> Result<()> {
        check_non_negative("radius", self.radius)?;
        check_count("theta_resolution", self.theta_resolution, 3)?;
        check_count("phi_resolution", self.phi_resolution, 3)?;
        check_theta_range(self.start_theta, self.end_theta)?;
        check_phi_range(self.start_phi, self.end_phi)?;
        Ok(())
    }

    /// Parses and validates a JSON configuration.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }
}

fn check_theta_range(start: f32, end: f32) -> Result<()> {
    check_range("start_theta", start, 0.0, 360.0)?;
    check_range("end_theta", end, 0.0, 360.0)?;
    check_order("theta", start, end)
}

fn check_phi_range(start: f32, end: f32) -> Result<()> {
    check_range("start_phi", start, 0.0, 180.0)?;
    check_range("end_phi", end, 0.0, 180.0)?;
    check_order("phi", start, end)
}

fn check_order(name: &str, start: f32, end: f32) -> Result<()> {
    if start < end {
        Ok(())
    } else {
        Err(VistaError::Validation(format!(
            "start_{name} ({start}) must be less than end_{name} ({end})"
        )))
    }
}

/// A sphere, or a part of one cut by azimuthal and polar ranges.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SphereSource {
    config: SphereConfig,
}

impl SphereSource {
    /// Creates a full sphere of radius 0.5 at the origin.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a sphere from a configuration, validating it first.
    pub fn from_config(config: &SphereConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            config: config.clone(),
        })
    }

    /// The current parameters.
    pub fn config(&self) -> &SphereConfig {
        &self.config
    }

    /// Moves the sphere to `center`.
    pub fn set_center(&mut self, center: Vec3) {
        self.config.center = center;
    }

    pub fn set_radius(&mut self, radius: f32) -> Result<()> {
        self.config.radius = check_non_negative("radius", radius)?;
        Ok(())
    }

    /// Sets both resolutions; each must be at least 3.
    pub fn set_resolution(&mut self, theta: usize, phi: usize) -> Result<()> {
        check_count("theta_resolution", theta, 3)?;
        check_count("phi_resolution", phi, 3)?;
        self.config.theta_resolution = theta;
        self.config.phi_resolution = phi;
        Ok(())
    }

    /// Sets the azimuthal range, degrees within `[0, 360]` and increasing.
    pub fn set_theta_range(&mut self, start: f32, end: f32) -> Result<()> {
        check_theta_range(start, end)?;
        self.config.start_theta = start;
        self.config.end_theta = end;
        Ok(())
    }

    /// Sets the polar range, degrees within `[0, 180]` and increasing.
    pub fn set_phi_range(&mut self, start: f32, end: f32) -> Result<()> {
        check_phi_range(start, end)?;
        self.config.start_phi = start;
        self.config.end_phi = end;
        Ok(())
    }

    /// Generates the sphere surface.
    pub fn output(&self) -> SurfaceMesh {
        let c = &self.config;
        let mut mesh = primitives::sphere_section(
            c.theta_resolution,
            c.phi_resolution,
            (c.start_theta, c.end_theta),
            (c.start_phi, c.end_phi),
        );
        mesh.scale(Vec3::splat(2.0 * c.radius)).translate(c.center);
        mesh
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_sphere_points_on_radius() {
        let config = SphereConfig::default()
            .with_center(Vec3::new(1.0, -1.0, 2.0))
            .with_radius(3.0)
            .with_resolution(12, 8);
        let mesh = SphereSource::from_config(&config).unwrap().output();
        // Two poles plus seven rings of twelve.
        assert_eq!(mesh.n_points(), 2 + 7 * 12);
        assert_eq!(mesh.n_faces(), 8 * 12);
        for p in mesh.points() {
            assert!(((*p - config.center).length() - 3.0).abs() < 1e-4);
        }
        let normals = mesh.compute_face_normals();
        for (n, c) in normals.iter().zip(mesh.face_centers()) {
            assert!(n.dot(c - config.center) > 0.0);
        }
    }

    #[test]
    fn test_partial_ranges_are_open() {
        let mut sphere = SphereSource::new();
        sphere.set_resolution(4, 3).unwrap();
        sphere.set_theta_range(0.0, 90.0).unwrap();
        sphere.set_phi_range(30.0, 90.0).unwrap();
        let mesh = sphere.output();
        // Four rows of five columns, no poles.
        assert_eq!(mesh.n_points(), 4 * 5);
        assert_eq!(mesh.n_faces(), 3 * 4);
        let b = mesh.bounds().unwrap();
        assert!(b.min.x > -1e-6 && b.min.y > -1e-6 && b.min.z > -1e-6);
    }

    #[test]
    fn test_invalid_ranges() {
        let mut sphere = SphereSource::new();
        assert!(sphere.set_theta_range(90.0, 10.0).is_err());
        assert!(sphere.set_phi_range(0.0, 200.0).is_err());
        assert!(sphere.set_resolution(2, 10).is_err());
        assert_eq!(sphere.config(), &SphereConfig::default());
        assert!(SphereConfig::from_json(r#"{"start_phi": 180}"#).is_err());
        assert!(SphereConfig::from_json(r#"{"radius": 2}"#).is_ok());
    }
}

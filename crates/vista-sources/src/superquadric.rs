//! Superquadric source: ellipsoids and toroids with adjustable roundness.
//!
//! With `theta` the angle around the z axis and `phi` the angle above the
//! xy plane, an ellipsoidal point is
//!
//! ```text
//! x = dx * c(phi, n) * c(theta, e)
//! y = dy * c(phi, n) * s(theta, e)
//! z = dz * s(phi, n)
//! ```
//!
//! where `c(w, m) = sign(cos w) |cos w|^m`, `s` likewise with `sin`, `e` is
//! the theta roundness and `n` the phi roundness. A toroid replaces
//! `c(phi, n)` by `alpha + c(phi, n)` with `alpha = 1 / thickness`.

use std::f32::consts::{FRAC_PI_2, PI, TAU};

use glam::Vec3;
use serde::{Deserialize, Serialize};

use vista_core::{check_non_negative, check_range, Result, SurfaceMesh};

/// Roundness values below this are raised to it.
pub const MIN_ROUNDNESS: f32 = 0.01;

/// Parameters of a [`SuperquadricSource`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SuperquadricConfig {
    pub center: Vec3,
    /// Per-axis scale applied on top of `size`.
    pub scale: Vec3,
    /// Isotropic size; the half extent of the unscaled shape.
    pub size: f32,
    /// East/west roundness.
    pub theta_roundness: f32,
    /// North/south roundness.
    pub phi_roundness: f32,
    /// Segments around z, rounded to the nearest multiple of 4.
    pub theta_resolution: usize,
    /// Segments from pole to pole, rounded to the nearest multiple of 8.
    pub phi_resolution: usize,
    pub toroidal: bool,
    /// Ring thickness of a toroid, in `(0, 1]`.
    pub thickness: f32,
}

impl Default for SuperquadricConfig {
    fn default() -> Self {
        Self {
            center: Vec3::ZERO,
            scale: Vec3::ONE,
            size: 0.5,
            theta_roundness: 1.0,
            phi_roundness: 1.0,
            theta_resolution: 16,
            phi_resolution: 16,
            toroidal: false,
            thickness: 1.0 / 3.0,
        }
    }
}

impl SuperquadricConfig {
    pub fn with_center(mut self, center: Vec3) -> Self {
        self.center = center;
        self
    }

    /// Sets the per-axis scale.
    pub fn with_scale(mut self, scale: Vec3) -> Self {
        self.scale = scale;
        self
    }

    /// Sets the isotropic size.
    pub fn with_size(mut self, size: f32) -> Self {
        self.size = size;
        self
    }

    /// Sets the theta and phi roundness.
    pub fn with_roundness(mut self, theta: f32, phi: f32) -> Self {
        self.theta_roundness = theta;
        self.phi_roundness = phi;
        self
    }

    /// Sets the theta and phi resolutions before rounding.
    pub fn with_resolution(mut self, theta: usize, phi: usize) -> Self {
        self.theta_resolution = theta;
        self.phi_resolution = phi;
        self
    }

    /// Makes the shape a toroid of the given ring thickness.
    pub fn with_toroidal(mut self, thickness: f32) -> Self {
        self.toroidal = true;
        self.thickness = thickness;
        self
    }

    pub fn validate(&self) -> Result<()> {
        let axes = ["scale.x", "scale.y", "scale.z"];
        for (name, value) in axes.into_iter().zip(self.scale.to_array()) {
            check_non_negative(name, value)?;
        }
        check_non_negative("size", self.size)?;
        check_non_negative("theta_roundness", self.theta_roundness)?;
        check_non_negative("phi_roundness", self.phi_roundness)?;
        check_range("thickness", self.thickness, 1e-4, 1.0)?;
        Ok(())
    }

    /// Parses and validates a JSON configuration.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }
}

fn round_to_multiple(value: usize, step: usize) -> usize {
    ((value + step / 2) / step * step).max(step)
}

fn signed_power(v: f32, m: f32) -> f32 {
    // Exact zeros keep poles and meridians in place for small exponents.
    if v.abs() < 1e-6 {
        0.0
    } else {
        v.signum() * v.abs().powf(m)
    }
}

fn cf(w: f32, m: f32) -> f32 {
    signed_power(w.cos(), m)
}

fn sf(w: f32, m: f32) -> f32 {
    signed_power(w.sin(), m)
}

/// A superquadric ellipsoid or toroid symmetric about the z axis.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SuperquadricSource {
    config: SuperquadricConfig,
}

impl SuperquadricSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a source from a configuration, validating it and rounding the
    /// resolutions.
    pub fn from_config(config: &SuperquadricConfig) -> Result<Self> {
        config.validate()?;
        let mut source = Self {
            config: config.clone(),
        };
        source.set_resolution(config.theta_resolution, config.phi_resolution);
        Ok(source)
    }

    /// The current parameters, resolutions already rounded.
    pub fn config(&self) -> &SuperquadricConfig {
        &self.config
    }

    pub fn set_center(&mut self, center: Vec3) {
        self.config.center = center;
    }

    pub fn set_size(&mut self, size: f32) -> Result<()> {
        self.config.size = check_non_negative("size", size)?;
        Ok(())
    }

    /// Sets both roundness exponents.
    pub fn set_roundness(&mut self, theta: f32, phi: f32) -> Result<()> {
        check_non_negative("theta_roundness", theta)?;
        check_non_negative("phi_roundness", phi)?;
        self.config.theta_roundness = theta;
        self.config.phi_roundness = phi;
        Ok(())
    }

    /// Sets the resolutions, rounding theta to a multiple of 4 and phi to a
    /// multiple of 8.
    pub fn set_resolution(&mut self, theta: usize, phi: usize) {
        self.config.theta_resolution = round_to_multiple(theta, 4);
        self.config.phi_resolution = round_to_multiple(phi, 8);
    }

    /// Switches between ellipsoid and toroid.
    pub fn set_toroidal(&mut self, toroidal: bool) {
        self.config.toroidal = toroidal;
    }

    pub fn set_thickness(&mut self, thickness: f32) -> Result<()> {
        self.config.thickness = check_range("thickness", thickness, 1e-4, 1.0)?;
        Ok(())
    }

    /// Generates the surface.
    pub fn output(&self) -> SurfaceMesh {
        let mut mesh = if self.config.toroidal {
            self.toroid()
        } else {
            self.ellipsoid()
        };
        mesh.translate(self.config.center);
        mesh
    }

    fn exponents(&self) -> (f32, f32) {
        (
            self.config.theta_roundness.max(MIN_ROUNDNESS),
            self.config.phi_roundness.max(MIN_ROUNDNESS),
        )
    }

    fn ellipsoid(&self) -> SurfaceMesh {
        let c = &self.config;
        let (e, n) = self.exponents();
        let dims = c.size * c.scale;
        let columns = c.theta_resolution;
        let rows = c.phi_resolution;

        // South pole, rows - 1 rings from south to north, north pole.
        let mut points = Vec::with_capacity(2 + (rows - 1) * columns);
        points.push(Vec3::new(0.0, 0.0, -dims.z));
        for j in 1..rows {
            let phi = -FRAC_PI_2 + PI * j as f32 / rows as f32;
            for i in 0..columns {
                let theta = -PI + TAU * i as f32 / columns as f32;
                points.push(
                    dims * Vec3::new(
                        cf(phi, n) * cf(theta, e),
                        cf(phi, n) * sf(theta, e),
                        sf(phi, n),
                    ),
                );
            }
        }
        let north = points.len() as u32;
        points.push(Vec3::new(0.0, 0.0, dims.z));

        let at = |j: usize, i: usize| (1 + (j - 1) * columns + i % columns) as u32;
        let mut faces = Vec::with_capacity(rows * columns);
        for i in 0..columns {
            faces.push(vec![0, at(1, i + 1), at(1, i)]);
        }
        for j in 1..rows - 1 {
            for i in 0..columns {
                faces.push(vec![at(j, i), at(j, i + 1), at(j + 1, i + 1), at(j + 1, i)]);
            }
        }
        for i in 0..columns {
            faces.push(vec![north, at(rows - 1, i), at(rows - 1, i + 1)]);
        }
        SurfaceMesh::new(points, faces)
    }

    fn toroid(&self) -> SurfaceMesh {
        let c = &self.config;
        let (e, n) = self.exponents();
        let alpha = 1.0 / c.thickness;
        let dims = c.size * c.scale / (alpha + 1.0);
        let columns = c.theta_resolution;
        let rows = c.phi_resolution;

        let mut points = Vec::with_capacity(rows * columns);
        for j in 0..rows {
            let phi = -PI + TAU * j as f32 / rows as f32;
            for i in 0..columns {
                let theta = -PI + TAU * i as f32 / columns as f32;
                let ring = alpha + cf(phi, n);
                points.push(
                    dims * Vec3::new(ring * cf(theta, e), ring * sf(theta, e), sf(phi, n)),
                );
            }
        }

        let at = |j: usize, i: usize| ((j % rows) * columns + i % columns) as u32;
        let mut faces = Vec::with_capacity(rows * columns);
        for j in 0..rows {
            for i in 0..columns {
                faces.push(vec![at(j, i), at(j, i + 1), at(j + 1, i + 1), at(j + 1, i)]);
            }
        }
        SurfaceMesh::new(points, faces)
    }
}

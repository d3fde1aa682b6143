//! Arrow source: a cylindrical shaft topped by a conical tip.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use vista_core::{check_non_negative, check_range, Result, SurfaceMesh};

use crate::primitives::{self, along_x, check_count, check_direction, orient};

/// Parameters of an [`ArrowSource`].
///
/// Before placement the arrow runs along +x from 0 to 1; lengths and radii
/// are fractions of that unit length.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ArrowConfig {
    /// Where the shaft starts.
    pub start: Vec3,
    pub direction: Vec3,
    /// Length of the tip, in `[0, 1]`.
    pub tip_length: f32,
    pub tip_radius: f32,
    pub tip_resolution: usize,
    pub shaft_radius: f32,
    pub shaft_resolution: usize,
    /// Overall scale factor, ignored with `auto_scale`.
    pub scale: f32,
    /// Scale the arrow to the length of `direction`.
    pub auto_scale: bool,
}

impl Default for ArrowConfig {
    fn default() -> Self {
        Self {
            start: Vec3::ZERO,
            direction: Vec3::X,
            tip_length: 0.25,
            tip_radius: 0.1,
            tip_resolution: 20,
            shaft_radius: 0.05,
            shaft_resolution: 20,
            scale: 1.0,
            auto_scale: false,
        }
    }
}

impl ArrowConfig {
    /// Sets the start point.
    pub fn with_start(mut self, start: Vec3) -> Self {
        self.start = start;
        self
    }

    /// Sets the pointing direction.
    pub fn with_direction(mut self, direction: Vec3) -> Self {
        self.direction = direction;
        self
    }

    /// Sets the tip length, radius and resolution.
    pub fn with_tip(mut self, length: f32, radius: f32, resolution: usize) -> Self {
        self.tip_length = length;
        self.tip_radius = radius;
        self.tip_resolution = resolution;
        self
    }

    /// Sets the shaft radius and resolution.
    pub fn with_shaft(mut self, radius: f32, resolution: usize) -> Self {
        self.shaft_radius = radius;
        self.shaft_resolution = resolution;
        self
    }

    /// Sets a fixed scale factor.
    pub fn with_scale(mut self, scale: f32) -> Self {
        self.scale = scale;
        self.auto_scale = false;
        self
    }

    /// Scales the arrow to the length of its direction.
    pub fn with_auto_scale(mut self) -> Self {
        self.auto_scale = true;
        self
    }

    pub fn validate(&self) -> Result<()> {
        check_direction("direction", self.direction)?;
        check_range("tip_length", self.tip_length, 0.0, 1.0)?;
        check_non_negative("tip_radius", self.tip_radius)?;
        check_count("tip_resolution", self.tip_resolution, 3)?;
        check_non_negative("shaft_radius", self.shaft_radius)?;
        check_count("shaft_resolution", self.shaft_resolution, 3)?;
        check_non_negative("scale", self.scale)?;
        Ok(())
    }

    /// Parses and validates a JSON configuration.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }
}

/// An arrow from a start point along a direction.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ArrowSource {
    config: ArrowConfig,
}

impl ArrowSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an arrow from a configuration, validating it first.
    pub fn from_config(config: &ArrowConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            config: config.clone(),
        })
    }

    pub fn config(&self) -> &ArrowConfig {
        &self.config
    }

    /// Replaces every parameter at once, keeping the old ones on error.
    pub fn set_config(&mut self, config: ArrowConfig) -> Result<()> {
        config.validate()?;
        self.config = config;
        Ok(())
    }

    pub fn set_start(&mut self, start: Vec3) {
        self.config.start = start;
    }

    pub fn set_direction(&mut self, direction: Vec3) -> Result<()> {
        self.config.direction = check_direction("direction", direction)?;
        Ok(())
    }

    /// Length of the placed arrow.
    pub fn length(&self) -> f32 {
        if self.config.auto_scale {
            self.config.direction.length()
        } else {
            self.config.scale
        }
    }

    /// Generates the arrow.
    pub fn output(&self) -> Result<SurfaceMesh> {
        let c = &self.config;
        let shaft_length = 1.0 - c.tip_length;
        let mut mesh = SurfaceMesh::default();
        if shaft_length > 0.0 {
            let mut shaft = primitives::cylinder(c.shaft_resolution, true);
            shaft
                .scale(Vec3::new(2.0 * c.shaft_radius, 2.0 * c.shaft_radius, shaft_length))
                .translate(Vec3::new(0.0, 0.0, shaft_length / 2.0));
            mesh.append(&shaft);
        }
        if c.tip_length > 0.0 {
            let mut tip = primitives::cone(c.tip_resolution, true);
            tip.scale(Vec3::new(2.0 * c.tip_radius, 2.0 * c.tip_radius, c.tip_length))
                .translate(Vec3::new(0.0, 0.0, shaft_length + c.tip_length / 2.0));
            mesh.append(&tip);
        }
        let mut mesh = along_x(mesh);
        mesh.scale(Vec3::splat(self.length()));
        orient(&mut mesh, c.start, c.direction)?;
        Ok(mesh)
    }
}

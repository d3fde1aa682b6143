//! Three mutually orthogonal planes centered in a box.

use std::fmt;
use std::str::FromStr;

use glam::Vec3;
use serde::{Deserialize, Serialize};

use vista_core::{Bounds, GeometrySource, MultiBlock, Result, VistaError};

use crate::plane::{check_resolution, PlaneSource};

/// Default plane names, perpendicular to x, y and z.
pub const DEFAULT_PLANE_NAMES: [&str; 3] = ["yz", "zx", "xy"];

/// Direction of a plane normal relative to its axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum NormalSign {
    #[default]
    #[serde(rename = "+")]
    Positive,
    #[serde(rename = "-")]
    Negative,
}

impl NormalSign {
    fn factor(self) -> f32 {
        match self {
            NormalSign::Positive => 1.0,
            NormalSign::Negative => -1.0,
        }
    }
}

impl fmt::Display for NormalSign {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            NormalSign::Positive => "+",
            NormalSign::Negative => "-",
        })
    }
}

impl FromStr for NormalSign {
    type Err = VistaError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "+" => Ok(NormalSign::Positive),
            "-" => Ok(NormalSign::Negative),
            other => Err(VistaError::Validation(format!(
                "normal sign must be '+' or '-', got '{other}'"
            ))),
        }
    }
}

/// Parameters of an [`OrthogonalPlanesSource`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OrthogonalPlanesConfig {
    /// `[x_min, x_max, y_min, y_max, z_min, z_max]`.
    pub bounds: [f32; 6],
    /// Subdivisions along x, y and z.
    pub resolution: [usize; 3],
    /// Normal direction of the yz, zx and xy planes.
    pub normal_sign: [NormalSign; 3],
    /// Exactly three names.
    pub names: Vec<String>,
}

impl Default for OrthogonalPlanesConfig {
    fn default() -> Self {
        Self {
            bounds: [-1.0, 1.0, -1.0, 1.0, -1.0, 1.0],
            resolution: [2; 3],
            normal_sign: [NormalSign::Positive; 3],
            names: DEFAULT_PLANE_NAMES.iter().map(|s| (*s).to_string()).collect(),
        }
    }
}

impl OrthogonalPlanesConfig {
    /// Sets the box the planes are centered in.
    pub fn with_bounds(mut self, bounds: [f32; 6]) -> Self {
        self.bounds = bounds;
        self
    }

    /// Sets the subdivisions along x, y and z.
    pub fn with_resolution(mut self, resolution: [usize; 3]) -> Self {
        self.resolution = resolution;
        self
    }

    /// Sets the normal direction of each plane.
    pub fn with_normal_sign(mut self, normal_sign: [NormalSign; 3]) -> Self {
        self.normal_sign = normal_sign;
        self
    }

    /// Sets the three plane names.
    pub fn with_names<S: AsRef<str>>(mut self, names: &[S]) -> Self {
        self.names = names.iter().map(|s| s.as_ref().to_string()).collect();
        self
    }

    /// Checks the bounds, resolutions and names.
    pub fn validate(&self) -> Result<()> {
        Bounds::from_array(self.bounds)?;
        check_resolutions(self.resolution)?;
        plane_names(&self.names)?;
        Ok(())
    }

    /// Parses and validates a JSON configuration.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }
}

fn check_resolutions(resolution: [usize; 3]) -> Result<[usize; 3]> {
    for (axis, value) in ["x", "y", "z"].iter().zip(resolution) {
        check_resolution(&format!("{axis} resolution"), value)?;
    }
    Ok(resolution)
}

fn plane_names<S: AsRef<str>>(names: &[S]) -> Result<[String; 3]> {
    match names {
        [a, b, c] => Ok([a, b, c].map(|s| s.as_ref().to_string())),
        _ => Err(VistaError::Validation(format!(
            "plane names must have 3 items, got {}",
            names.len()
        ))),
    }
}

/// Generates planes perpendicular to x, y and z, centered in a box.
///
/// Each plane spans the box in its two in-plane directions. Output is always
/// regenerated from the stored bounds, resolution, signs and push offsets.
#[derive(Debug, Clone)]
pub struct OrthogonalPlanesSource {
    bounds: Bounds,
    resolution: [usize; 3],
    normal_sign: [NormalSign; 3],
    names: [String; 3],
    offsets: Vec3,
    dirty: bool,
    output: MultiBlock,
}

impl Default for OrthogonalPlanesSource {
    fn default() -> Self {
        Self::new()
    }
}

impl OrthogonalPlanesSource {
    /// Creates three planes through the center of `[-1, 1]^3`.
    pub fn new() -> Self {
        let names = DEFAULT_PLANE_NAMES.map(str::to_string);
        Self {
            bounds: Bounds::new(Vec3::splat(-1.0), Vec3::ONE),
            resolution: [2; 3],
            normal_sign: [NormalSign::Positive; 3],
            offsets: Vec3::ZERO,
            output: MultiBlock::with_names(&names),
            names,
            dirty: true,
        }
    }

    /// Creates the planes from a configuration, validating it first.
    pub fn from_config(config: &OrthogonalPlanesConfig) -> Result<Self> {
        let names = plane_names(&config.names)?;
        Ok(Self {
            bounds: Bounds::from_array(config.bounds)?,
            resolution: check_resolutions(config.resolution)?,
            normal_sign: config.normal_sign,
            offsets: Vec3::ZERO,
            output: MultiBlock::with_names(&names),
            names,
            dirty: true,
        })
    }

    /// The box the planes are centered in.
    pub fn bounds(&self) -> Bounds {
        self.bounds
    }

    /// Sets the box the planes are centered in and clears any push offsets.
    pub fn set_bounds(&mut self, bounds: [f32; 6]) -> Result<()> {
        self.bounds = Bounds::from_array(bounds)?;
        self.offsets = Vec3::ZERO;
        self.dirty = true;
        Ok(())
    }

    /// Subdivisions along x, y and z.
    pub fn resolution(&self) -> [usize; 3] {
        self.resolution
    }

    /// Sets the subdivisions along x, y and z; each must be at least 1.
    pub fn set_resolution(&mut self, resolution: [usize; 3]) -> Result<()> {
        self.resolution = check_resolutions(resolution)?;
        self.dirty = true;
        Ok(())
    }

    /// Normal direction of each plane.
    pub fn normal_sign(&self) -> [NormalSign; 3] {
        self.normal_sign
    }

    /// Sets which way each plane normal points.
    pub fn set_normal_sign(&mut self, normal_sign: [NormalSign; 3]) {
        self.normal_sign = normal_sign;
        self.dirty = true;
    }

    /// The three plane names in output order.
    pub fn names(&self) -> &[String; 3] {
        &self.names
    }

    /// Renames the planes; exactly three names are needed.
    pub fn set_names<S: AsRef<str>>(&mut self, names: &[S]) -> Result<()> {
        self.names = plane_names(names)?;
        self.dirty = true;
        Ok(())
    }

    /// Accumulated push distance of each plane.
    pub fn offsets(&self) -> Vec3 {
        self.offsets
    }

    /// Moves each plane along its current normal by the matching component.
    pub fn push(&mut self, distances: Vec3) {
        self.offsets += distances;
        self.dirty = true;
    }

    /// Builds the plane perpendicular to `axis`.
    pub fn plane(&self, axis: usize) -> PlaneSource {
        let size = self.bounds.extent();
        let [rx, ry, rz] = self.resolution;
        let (a, b, ri, rj) = match axis {
            0 => (Vec3::new(0.0, size.y, 0.0), Vec3::new(0.0, 0.0, size.z), ry, rz),
            1 => (Vec3::new(0.0, 0.0, size.z), Vec3::new(size.x, 0.0, 0.0), rz, rx),
            _ => (Vec3::new(size.x, 0.0, 0.0), Vec3::new(0.0, size.y, 0.0), rx, ry),
        };
        // Resolutions stay tied to their axes when the spanning vectors swap.
        let (a, b, ri, rj) = match self.normal_sign[axis] {
            NormalSign::Positive => (a, b, ri, rj),
            NormalSign::Negative => (b, a, rj, ri),
        };
        let normal = Vec3::AXES[axis] * self.normal_sign[axis].factor();
        let center = self.bounds.center() + normal * self.offsets[axis];
        let origin = center - (a + b) * 0.5;
        PlaneSource::from_checked_points(origin, origin + a, origin + b, ri, rj)
    }
}

impl GeometrySource for OrthogonalPlanesSource {
    fn type_name(&self) -> &'static str {
        "OrthogonalPlanesSource"
    }

    fn update(&mut self) {
        let mut output = MultiBlock::new();
        for (axis, name) in self.names.iter().enumerate() {
            output.append(Some(name.as_str()), self.plane(axis).output());
        }
        self.output = output;
        self.dirty = false;
    }

    fn is_dirty(&self) -> bool {
        self.dirty
    }

    fn current_output(&self) -> &MultiBlock {
        &self.output
    }
}

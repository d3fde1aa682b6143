//! Axis-aligned box source.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use vista_core::{check_non_negative, Bounds, Result, SurfaceMesh};

use crate::primitives::{box_from_bounds, tessellated_box};

/// An axis-aligned box given by its center and edge lengths.
///
/// Bounds may be set instead; they are stored as the equivalent center and
/// lengths.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CubeSource {
    center: Vec3,
    lengths: Vec3,
}

impl Default for CubeSource {
    fn default() -> Self {
        Self {
            center: Vec3::ZERO,
            lengths: Vec3::ONE,
        }
    }
}

impl CubeSource {
    /// Creates a unit cube at the origin.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a box with the given center and edge lengths.
    pub fn with_size(center: Vec3, x_length: f32, y_length: f32, z_length: f32) -> Result<Self> {
        let mut cube = Self::new();
        cube.set_center(center);
        cube.set_lengths(Vec3::new(x_length, y_length, z_length))?;
        Ok(cube)
    }

    /// Creates a box filling `bounds`, given as `[x_min, x_max, y_min, y_max, z_min, z_max]`.
    pub fn from_bounds(bounds: [f32; 6]) -> Result<Self> {
        let mut cube = Self::new();
        cube.set_bounds(bounds)?;
        Ok(cube)
    }

    /// Center of the box.
    pub fn center(&self) -> Vec3 {
        self.center
    }

    /// Moves the box, keeping its lengths.
    pub fn set_center(&mut self, center: Vec3) {
        self.center = center;
    }

    /// Edge lengths along x, y and z.
    pub fn lengths(&self) -> Vec3 {
        self.lengths
    }

    /// Sets all three edge lengths; each must be non-negative.
    pub fn set_lengths(&mut self, lengths: Vec3) -> Result<()> {
        check_non_negative("x length", lengths.x)?;
        check_non_negative("y length", lengths.y)?;
        check_non_negative("z length", lengths.z)?;
        self.lengths = lengths;
        Ok(())
    }

    /// Edge length along x.
    pub fn x_length(&self) -> f32 {
        self.lengths.x
    }

    /// Sets the edge length along x; it must be non-negative.
    pub fn set_x_length(&mut self, length: f32) -> Result<()> {
        self.lengths.x = check_non_negative("x length", length)?;
        Ok(())
    }

    /// Edge length along y.
    pub fn y_length(&self) -> f32 {
        self.lengths.y
    }

    /// Sets the edge length along y; it must be non-negative.
    pub fn set_y_length(&mut self, length: f32) -> Result<()> {
        self.lengths.y = check_non_negative("y length", length)?;
        Ok(())
    }

    /// Edge length along z.
    pub fn z_length(&self) -> f32 {
        self.lengths.z
    }

    /// Sets the edge length along z; it must be non-negative.
    pub fn set_z_length(&mut self, length: f32) -> Result<()> {
        self.lengths.z = check_non_negative("z length", length)?;
        Ok(())
    }

    /// The region covered by the box.
    pub fn bounds(&self) -> Bounds {
        let half = self.lengths * 0.5;
        Bounds::new(self.center - half, self.center + half)
    }

    /// Sets the box to fill `bounds`, rewriting center and lengths.
    ///
    /// Fails if any minimum exceeds its maximum.
    pub fn set_bounds(&mut self, bounds: [f32; 6]) -> Result<()> {
        let bounds = Bounds::from_array(bounds)?;
        self.center = bounds.center();
        self.lengths = bounds.extent();
        Ok(())
    }

    /// Generates the box: 8 corners and 6 quads ordered +X, -X, +Y, -Y, +Z, -Z.
    pub fn output(&self) -> SurfaceMesh {
        box_from_bounds(&self.bounds())
    }
}

/// A box given by bounds whose faces are subdivided into a regular grid.
///
/// `level` 0 gives one cell per face; each extra level adds one row and one
/// column. Without `quads` every cell is split into two triangles.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BoxSource {
    bounds: Bounds,
    level: usize,
    quads: bool,
}

impl Default for BoxSource {
    fn default() -> Self {
        Self {
            bounds: Bounds::new(Vec3::splat(-1.0), Vec3::ONE),
            level: 0,
            quads: true,
        }
    }
}

impl BoxSource {
    /// Creates a box filling `[x_min, x_max, y_min, y_max, z_min, z_max]`.
    pub fn new(bounds: [f32; 6], level: usize, quads: bool) -> Result<Self> {
        Ok(Self {
            bounds: Bounds::from_array(bounds)?,
            level,
            quads,
        })
    }

    /// Parses a JSON description such as `{"bounds": {"min": [0,0,0], "max": [1,1,1]}}`.
    pub fn from_json(json: &str) -> Result<Self> {
        let source: Self = serde_json::from_str(json)?;
        Self::new(source.bounds.to_array(), source.level, source.quads)
    }

    pub fn bounds(&self) -> Bounds {
        self.bounds
    }

    /// Sets the bounds; each minimum must not exceed its maximum.
    pub fn set_bounds(&mut self, bounds: [f32; 6]) -> Result<()> {
        self.bounds = Bounds::from_array(bounds)?;
        Ok(())
    }

    /// Subdivision level of each face.
    pub fn level(&self) -> usize {
        self.level
    }

    pub fn set_level(&mut self, level: usize) {
        self.level = level;
    }

    /// Whether cells are quads rather than triangle pairs.
    pub fn quads(&self) -> bool {
        self.quads
    }

    pub fn set_quads(&mut self, quads: bool) {
        self.quads = quads;
    }

    /// Generates the box with shared points along its edges.
    pub fn output(&self) -> SurfaceMesh {
        tessellated_box(&self.bounds, self.level, self.quads)
    }
}

//! Straight line and polyline sources.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use vista_core::{Result, SurfaceMesh, VistaError};

use crate::primitives::{self, check_count};

fn check_point(name: &str, point: Vec3) -> Result<Vec3> {
    if point.is_finite() {
        Ok(point)
    } else {
        Err(VistaError::Validation(format!("{name} must be finite, got {point}")))
    }
}

/// A straight segment split into `resolution` equal pieces.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LineSource {
    pointa: Vec3,
    pointb: Vec3,
    resolution: usize,
}

impl Default for LineSource {
    fn default() -> Self {
        Self {
            pointa: Vec3::new(-0.5, 0.0, 0.0),
            pointb: Vec3::new(0.5, 0.0, 0.0),
            resolution: 1,
        }
    }
}

impl LineSource {
    /// Creates a line between two points.
    pub fn new(pointa: Vec3, pointb: Vec3, resolution: usize) -> Result<Self> {
        let mut line = Self::default();
        line.set_points(pointa, pointb)?;
        line.set_resolution(resolution)?;
        Ok(line)
    }

    /// Parses and validates a JSON description.
    pub fn from_json(json: &str) -> Result<Self> {
        let line: Self = serde_json::from_str(json)?;
        Self::new(line.pointa, line.pointb, line.resolution)
    }

    /// The two end points.
    pub fn points(&self) -> (Vec3, Vec3) {
        (self.pointa, self.pointb)
    }

    pub fn set_points(&mut self, pointa: Vec3, pointb: Vec3) -> Result<()> {
        check_point("pointa", pointa)?;
        check_point("pointb", pointb)?;
        self.pointa = pointa;
        self.pointb = pointb;
        Ok(())
    }

    pub fn resolution(&self) -> usize {
        self.resolution
    }

    /// Sets the number of segments; at least 1.
    pub fn set_resolution(&mut self, resolution: usize) -> Result<()> {
        self.resolution = check_count("resolution", resolution, 1)?;
        Ok(())
    }

    /// Generates the line as `resolution` segments.
    pub fn output(&self) -> SurfaceMesh {
        primitives::line(self.pointa, self.pointb, self.resolution)
    }
}

/// A polyline through an ordered list of points.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MultipleLinesSource {
    points: Vec<Vec3>,
}

impl Default for MultipleLinesSource {
    fn default() -> Self {
        Self {
            points: vec![Vec3::new(-0.5, 0.0, 0.0), Vec3::new(0.5, 0.0, 0.0)],
        }
    }
}

impl MultipleLinesSource {
    pub fn new(points: Vec<Vec3>) -> Result<Self> {
        let mut source = Self::default();
        source.set_points(points)?;
        Ok(source)
    }

    pub fn points(&self) -> &[Vec3] {
        &self.points
    }

    /// Replaces the points; at least two finite points are needed.
    pub fn set_points(&mut self, points: Vec<Vec3>) -> Result<()> {
        check_count("number of points", points.len(), 2)?;
        for (i, p) in points.iter().enumerate() {
            check_point(&format!("points[{i}]"), *p)?;
        }
        self.points = points;
        Ok(())
    }

    /// Generates the polyline.
    pub fn output(&self) -> SurfaceMesh {
        primitives::polyline(self.points.clone())
    }
}

//! Composite axes marker geometry.
//!
//! [`AxesGeometrySource`] builds six parts, a shaft and a tip for each of the
//! x, y and z axes, from two normalized templates. Shafts start at the origin;
//! each tip sits flush against the end of its shaft.

use std::fmt;

use glam::Vec3;
use serde::{Deserialize, Serialize};

use vista_core::{check_non_negative, GeometrySource, MultiBlock, Result, SurfaceMesh, VistaError};

use crate::part::{axis_triad, make_axis_triad, make_canonical, GeometryKind, PartGeometry};

/// Output block names, shafts first, each in x/y/z order.
pub const AXES_PART_NAMES: [&str; 6] = ["x_shaft", "y_shaft", "z_shaft", "x_tip", "y_tip", "z_tip"];

/// Per-axis lengths. Converts from a single length for all three axes, an
/// array or a vector.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AxisLengths(pub Vec3);

impl From<f32> for AxisLengths {
    fn from(length: f32) -> Self {
        Self(Vec3::splat(length))
    }
}

impl From<[f32; 3]> for AxisLengths {
    fn from(lengths: [f32; 3]) -> Self {
        Self(Vec3::from(lengths))
    }
}

impl From<Vec3> for AxisLengths {
    fn from(lengths: Vec3) -> Self {
        Self(lengths)
    }
}

fn check_lengths(name: &str, lengths: Vec3) -> Result<Vec3> {
    for value in lengths.to_array() {
        check_non_negative(name, value)?;
    }
    Ok(lengths)
}

/// Parameters of an [`AxesGeometrySource`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AxesGeometryConfig {
    /// Shape of the shafts.
    pub shaft_type: GeometryKind,
    /// Radius of the shafts.
    pub shaft_radius: f32,
    /// Length of the shaft along each axis.
    pub shaft_length: Vec3,
    /// Shape of the tips.
    pub tip_type: GeometryKind,
    /// Radius of the tips.
    pub tip_radius: f32,
    /// Length of the tip along each axis.
    pub tip_length: Vec3,
    /// Mirror every part into the negative half-axis.
    pub symmetric: bool,
    /// Pad the bounds of the tips so they are symmetric about the origin.
    pub symmetric_bounds: bool,
}

impl Default for AxesGeometryConfig {
    fn default() -> Self {
        Self {
            shaft_type: GeometryKind::Cylinder,
            shaft_radius: 0.025,
            shaft_length: Vec3::splat(0.8),
            tip_type: GeometryKind::Cone,
            tip_radius: 0.1,
            tip_length: Vec3::splat(0.2),
            symmetric: false,
            symmetric_bounds: false,
        }
    }
}

impl AxesGeometryConfig {
    /// Sets the shaft shape.
    pub fn with_shaft_type(mut self, kind: GeometryKind) -> Self {
        self.shaft_type = kind;
        self
    }

    /// Sets the shaft radius.
    pub fn with_shaft_radius(mut self, radius: f32) -> Self {
        self.shaft_radius = radius;
        self
    }

    /// Sets the shaft lengths.
    pub fn with_shaft_length(mut self, length: impl Into<AxisLengths>) -> Self {
        self.shaft_length = length.into().0;
        self
    }

    /// Sets the tip shape.
    pub fn with_tip_type(mut self, kind: GeometryKind) -> Self {
        self.tip_type = kind;
        self
    }

    /// Sets the tip radius.
    pub fn with_tip_radius(mut self, radius: f32) -> Self {
        self.tip_radius = radius;
        self
    }

    /// Sets the tip lengths.
    pub fn with_tip_length(mut self, length: impl Into<AxisLengths>) -> Self {
        self.tip_length = length.into().0;
        self
    }

    /// Sets whether the parts are mirrored.
    pub fn with_symmetric(mut self, symmetric: bool) -> Self {
        self.symmetric = symmetric;
        self
    }

    /// Sets whether tip bounds are padded to be symmetric.
    pub fn with_symmetric_bounds(mut self, symmetric_bounds: bool) -> Self {
        self.symmetric_bounds = symmetric_bounds;
        self
    }

    /// Checks that radii and lengths are non-negative.
    pub fn validate(&self) -> Result<()> {
        check_non_negative("shaft radius", self.shaft_radius)?;
        check_lengths("shaft length", self.shaft_length)?;
        check_non_negative("tip radius", self.tip_radius)?;
        check_lengths("tip length", self.tip_length)?;
        Ok(())
    }

    /// Parses and validates a JSON configuration.
    ///
    /// Missing fields take their default values.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Part {
    Shaft,
    Tip,
}

#[derive(Debug, Clone)]
struct Templates {
    name: String,
    axes: [SurfaceMesh; 3],
}

impl Templates {
    fn canonical(kind: GeometryKind) -> Self {
        Self {
            name: kind.name().to_string(),
            axes: axis_triad(make_canonical(kind)),
        }
    }

    fn build(geometry: &PartGeometry) -> Result<Self> {
        let (name, axes) = make_axis_triad(geometry)?;
        log::debug!("rebuilt '{name}' axes templates");
        Ok(Self { name, axes })
    }
}

/// Generates the six parts of an axes marker.
///
/// # Example
///
/// ```
/// use vista_sources::{AxesGeometrySource, GeometryKind};
/// use vista_core::GeometrySource;
///
/// let mut axes = AxesGeometrySource::new();
/// axes.set_tip_type(GeometryKind::Sphere).unwrap();
/// axes.set_shaft_length([1.0, 2.0, 3.0]).unwrap();
/// let output = axes.output();
/// assert_eq!(output.len(), 6);
/// ```
#[derive(Debug, Clone)]
pub struct AxesGeometrySource {
    shaft: Templates,
    tip: Templates,
    shaft_radius: f32,
    shaft_length: Vec3,
    tip_radius: f32,
    tip_length: Vec3,
    symmetric: bool,
    symmetric_bounds: bool,
    dirty: bool,
    output: MultiBlock,
}

impl AxesGeometrySource {
    /// Creates a source with default parameters.
    pub fn new() -> Self {
        Self::with_config(&AxesGeometryConfig::default())
    }

    /// Creates a source from a configuration, validating it first.
    pub fn from_config(config: &AxesGeometryConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self::with_config(config))
    }

    fn with_config(config: &AxesGeometryConfig) -> Self {
        Self {
            shaft: Templates::canonical(config.shaft_type),
            tip: Templates::canonical(config.tip_type),
            shaft_radius: config.shaft_radius,
            shaft_length: config.shaft_length,
            tip_radius: config.tip_radius,
            tip_length: config.tip_length,
            symmetric: config.symmetric,
            symmetric_bounds: config.symmetric_bounds,
            dirty: true,
            output: MultiBlock::with_names(&AXES_PART_NAMES),
        }
    }

    /// Name of the shaft shape, or `"custom"`.
    pub fn shaft_type(&self) -> &str {
        &self.shaft.name
    }

    /// Sets the shaft shape from a kind, a kind name or a custom dataset.
    ///
    /// The templates are rebuilt immediately; on error the previous shape is
    /// kept.
    pub fn set_shaft_type(&mut self, geometry: impl Into<PartGeometry>) -> Result<()> {
        self.shaft = Templates::build(&geometry.into())?;
        self.dirty = true;
        Ok(())
    }

    /// Name of the tip shape, or `"custom"`.
    pub fn tip_type(&self) -> &str {
        &self.tip.name
    }

    /// Sets the tip shape from a kind, a kind name or a custom dataset.
    pub fn set_tip_type(&mut self, geometry: impl Into<PartGeometry>) -> Result<()> {
        self.tip = Templates::build(&geometry.into())?;
        self.dirty = true;
        Ok(())
    }

    /// Radius of every shaft.
    pub fn shaft_radius(&self) -> f32 {
        self.shaft_radius
    }

    /// Sets the shaft radius; it must be non-negative.
    pub fn set_shaft_radius(&mut self, radius: f32) -> Result<()> {
        self.shaft_radius = check_non_negative("shaft radius", radius)?;
        self.dirty = true;
        Ok(())
    }

    /// Per-axis shaft lengths.
    pub fn shaft_length(&self) -> Vec3 {
        self.shaft_length
    }

    /// Sets the shaft length, either one value for all axes or one per axis.
    pub fn set_shaft_length(&mut self, length: impl Into<AxisLengths>) -> Result<()> {
        self.shaft_length = check_lengths("shaft length", length.into().0)?;
        self.dirty = true;
        Ok(())
    }

    /// Radius of every tip.
    pub fn tip_radius(&self) -> f32 {
        self.tip_radius
    }

    /// Sets the tip radius; it must be non-negative.
    pub fn set_tip_radius(&mut self, radius: f32) -> Result<()> {
        self.tip_radius = check_non_negative("tip radius", radius)?;
        self.dirty = true;
        Ok(())
    }

    /// Per-axis tip lengths.
    pub fn tip_length(&self) -> Vec3 {
        self.tip_length
    }

    /// Sets the tip length, either one value for all axes or one per axis.
    pub fn set_tip_length(&mut self, length: impl Into<AxisLengths>) -> Result<()> {
        self.tip_length = check_lengths("tip length", length.into().0)?;
        self.dirty = true;
        Ok(())
    }

    /// Whether parts are mirrored into the negative half-axes.
    pub fn symmetric(&self) -> bool {
        self.symmetric
    }

    /// Mirrors every part into its negative half-axis when `true`.
    pub fn set_symmetric(&mut self, symmetric: bool) {
        self.symmetric = symmetric;
        self.dirty = true;
    }

    /// Whether tip bounds are padded to be symmetric about the origin.
    pub fn symmetric_bounds(&self) -> bool {
        self.symmetric_bounds
    }

    /// Pads each tip with a point opposite its end; ignored when symmetric.
    pub fn set_symmetric_bounds(&mut self, symmetric_bounds: bool) {
        self.symmetric_bounds = symmetric_bounds;
        self.dirty = true;
    }

    fn build_part(&self, part: Part, axis: usize) -> SurfaceMesh {
        let (templates, radius, length) = match part {
            Part::Shaft => (&self.shaft, self.shaft_radius, self.shaft_length),
            Part::Tip => (&self.tip, self.tip_radius, self.tip_length),
        };
        let direction = Vec3::AXES[axis];

        let mut mesh = templates.axes[axis].clone();
        // Template spans [-0.5, 0.5]; move it to [0, 1] along its axis.
        mesh.translate(direction * 0.5);

        let mut scale = Vec3::splat(2.0 * radius);
        scale[axis] = length[axis];
        mesh.scale(scale);

        if part == Part::Tip {
            mesh.translate(direction * self.shaft_length[axis]);
        }

        if self.symmetric {
            let mut flip = Vec3::ONE;
            flip[axis] = -1.0;
            let mut mirrored = mesh.clone();
            mirrored.scale(flip);
            mesh.append(&mirrored);
        } else if self.symmetric_bounds && part == Part::Tip {
            let total = self.shaft_length[axis] + self.tip_length[axis];
            mesh.push_degenerate_face(-direction * total);
        }
        mesh
    }
}

impl Default for AxesGeometrySource {
    fn default() -> Self {
        Self::new()
    }
}

impl GeometrySource for AxesGeometrySource {
    fn type_name(&self) -> &'static str {
        "AxesGeometrySource"
    }

    fn update(&mut self) {
        let mut output = MultiBlock::new();
        for part in [Part::Shaft, Part::Tip] {
            for axis in 0..3 {
                let index = if part == Part::Shaft { axis } else { axis + 3 };
                output.append(Some(AXES_PART_NAMES[index]), self.build_part(part, axis));
            }
        }
        log::trace!(
            "updated axes geometry: {} points, symmetric={}",
            output.n_points(),
            self.symmetric
        );
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

impl TryFrom<&AxesGeometryConfig> for AxesGeometrySource {
    type Error = VistaError;

    fn try_from(config: &AxesGeometryConfig) -> Result<Self> {
        Self::from_config(config)
    }
}

impl fmt::Display for AxesGeometrySource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let v = |v: Vec3| format!("({}, {}, {})", v.x, v.y, v.z);
        writeln!(f, "{}", self.type_name())?;
        writeln!(f, "  Shaft type:        '{}'", self.shaft.name)?;
        writeln!(f, "  Shaft radius:      {}", self.shaft_radius)?;
        writeln!(f, "  Shaft length:      {}", v(self.shaft_length))?;
        writeln!(f, "  Tip type:          '{}'", self.tip.name)?;
        writeln!(f, "  Tip radius:        {}", self.tip_radius)?;
        writeln!(f, "  Tip length:        {}", v(self.tip_length))?;
        writeln!(f, "  Symmetric:         {}", self.symmetric)?;
        write!(f, "  Symmetric bounds:  {}", self.symmetric_bounds)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let axes = AxesGeometrySource::new();
        assert_eq!(axes.shaft_type(), "cylinder");
        assert_eq!(axes.tip_type(), "cone");
        assert_eq!(axes.shaft_length(), Vec3::splat(0.8));
        assert!(axes.is_dirty());
    }

    #[test]
    fn test_update_clears_dirty_flag() {
        let mut axes = AxesGeometrySource::new();
        axes.update();
        assert!(!axes.is_dirty());
        axes.set_tip_radius(0.3).unwrap();
        assert!(axes.is_dirty());
        let _ = axes.output();
        assert!(!axes.is_dirty());
    }

    #[test]
    fn test_rejected_setter_keeps_state() {
        let mut axes = AxesGeometrySource::new();
        assert!(matches!(
            axes.set_shaft_radius(-0.1),
            Err(VistaError::Range { .. })
        ));
        assert!(axes.set_tip_length([0.1, -0.2, 0.3]).is_err());
        assert!(axes.set_shaft_type("banana").is_err());
        assert_eq!(axes.shaft_radius(), 0.025);
        assert_eq!(axes.tip_length(), Vec3::splat(0.2));
        assert_eq!(axes.shaft_type(), "cylinder");
    }

    #[test]
    fn test_infinite_sizes_rejected() {
        let mut axes = AxesGeometrySource::new();
        assert!(matches!(
            axes.set_shaft_radius(f32::INFINITY),
            Err(VistaError::Range { .. })
        ));
        assert!(matches!(
            axes.set_tip_length([0.2, f32::INFINITY, 0.2]),
            Err(VistaError::Range { .. })
        ));
        assert_eq!(axes.shaft_radius(), 0.025);
        let out = axes.output();
        out.for_each_mesh(&mut |m| assert!(m.points().iter().all(|p| p.is_finite())));
    }

    #[test]
    fn test_config_from_json() {
        let config =
            AxesGeometryConfig::from_json(r#"{"tip_type": "sphere", "shaft_length": [1, 2, 3]}"#)
                .unwrap();
        assert_eq!(config.tip_type, GeometryKind::Sphere);
        assert_eq!(config.shaft_length, Vec3::new(1.0, 2.0, 3.0));
        assert_eq!(config.tip_radius, 0.1);

        let axes = AxesGeometrySource::from_config(&config).unwrap();
        assert_eq!(axes.tip_type(), "sphere");

        assert!(AxesGeometryConfig::from_json(r#"{"tip_radius": -1}"#).is_err());
        assert!(matches!(
            AxesGeometryConfig::from_json(r#"{"tip_type": "banana"}"#),
            Err(VistaError::JsonError(_))
        ));
    }

    #[test]
    fn test_tip_is_flush_with_shaft() {
        let mut axes = AxesGeometrySource::from_config(
            &AxesGeometryConfig::default().with_shaft_length([0.5, 1.0, 1.5]),
        )
        .unwrap();
        let out = axes.output();
        for (axis, name) in ["x_tip", "y_tip", "z_tip"].into_iter().enumerate() {
            let b = out.mesh(name).unwrap().bounds().unwrap();
            let expected = 0.5 * (axis + 1) as f32;
            assert!((b.min[axis] - expected).abs() < 1e-5);
            assert!((b.max[axis] - expected - 0.2).abs() < 1e-5);
        }
    }

    #[test]
    fn test_display_lists_parameters() {
        let text = AxesGeometrySource::new().to_string();
        assert!(text.starts_with("AxesGeometrySource"));
        assert!(text.contains("Shaft type:        'cylinder'"));
        assert!(text.contains("Tip length:        (0.2, 0.2, 0.2)"));
    }
}

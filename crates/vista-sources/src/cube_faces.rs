//! The six faces of a cube as separate parts.
//!
//! Faces can be shrunk towards their centers, pushed away from the cube
//! center, or turned into hollow frames. All three effects are measured in
//! units of the shortest cube edge, so every face moves or shrinks by the same
//! absolute distance whatever its size, and opposite faces stay parallel.

use std::fmt;

use glam::Vec3;
use serde::{Deserialize, Serialize};

use vista_core::{
    check_non_negative, check_range, GeometrySource, MultiBlock, Result, SurfaceMesh, VistaError,
};

use crate::cube::CubeSource;
use crate::primitives::{box_corners, BOX_FACES};

/// Default base names, expanded to `+X, -X, +Y, -Y, +Z, -Z`.
pub const DEFAULT_FACE_NAMES: [&str; 3] = ["X", "Y", "Z"];

/// Expands 3 base names to `+`/`-` pairs, or accepts exactly 6 names.
pub fn expand_face_names<S: AsRef<str>>(names: &[S]) -> Result<[String; 6]> {
    match names.len() {
        3 => Ok(std::array::from_fn(|i| {
            let sign = if i % 2 == 0 { '+' } else { '-' };
            format!("{sign}{}", names[i / 2].as_ref())
        })),
        6 => Ok(std::array::from_fn(|i| names[i].as_ref().to_string())),
        n => Err(VistaError::Validation(format!(
            "face names must have 3 or 6 items, got {n}"
        ))),
    }
}

/// Parameters of a [`CubeFacesSource`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CubeFacesConfig {
    /// Center of the cube.
    pub center: Vec3,
    /// Edge length along x.
    pub x_length: f32,
    /// Edge length along y.
    pub y_length: f32,
    /// Edge length along z.
    pub z_length: f32,
    /// `[x_min, x_max, y_min, y_max, z_min, z_max]`; overrides center and lengths.
    pub bounds: Option<[f32; 6]>,
    /// Border width of framed faces, in `[0, 1]`.
    pub frame_width: Option<f32>,
    /// Shrink factor, at least 0.
    pub shrink_factor: Option<f32>,
    /// Explode factor; negative values pull faces inward.
    pub explode_factor: Option<f32>,
    /// Three base names or six face names.
    pub names: Vec<String>,
}

impl Default for CubeFacesConfig {
    fn default() -> Self {
        Self {
            center: Vec3::ZERO,
            x_length: 1.0,
            y_length: 1.0,
            z_length: 1.0,
            bounds: None,
            frame_width: None,
            shrink_factor: None,
            explode_factor: None,
            names: DEFAULT_FACE_NAMES.iter().map(|s| (*s).to_string()).collect(),
        }
    }
}

impl CubeFacesConfig {
    /// Sets the cube center.
    pub fn with_center(mut self, center: Vec3) -> Self {
        self.center = center;
        self
    }

    /// Sets the three edge lengths.
    pub fn with_lengths(mut self, x_length: f32, y_length: f32, z_length: f32) -> Self {
        self.x_length = x_length;
        self.y_length = y_length;
        self.z_length = z_length;
        self
    }

    /// Sets bounds that override center and lengths.
    pub fn with_bounds(mut self, bounds: [f32; 6]) -> Self {
        self.bounds = Some(bounds);
        self
    }

    /// Turns faces into frames with the given border width.
    pub fn with_frame_width(mut self, frame_width: f32) -> Self {
        self.frame_width = Some(frame_width);
        self
    }

    /// Shrinks each face towards its center.
    pub fn with_shrink_factor(mut self, shrink_factor: f32) -> Self {
        self.shrink_factor = Some(shrink_factor);
        self
    }

    /// Moves faces away from the cube center.
    pub fn with_explode_factor(mut self, explode_factor: f32) -> Self {
        self.explode_factor = Some(explode_factor);
        self
    }

    /// Sets three base names or six face names.
    pub fn with_names<S: AsRef<str>>(mut self, names: &[S]) -> Self {
        self.names = names.iter().map(|s| s.as_ref().to_string()).collect();
        self
    }

    /// Checks every field.
    pub fn validate(&self) -> Result<()> {
        self.cube()?;
        validate_frame_width(self.frame_width)?;
        validate_shrink_factor(self.shrink_factor)?;
        validate_explode_factor(self.explode_factor)?;
        expand_face_names(&self.names)?;
        Ok(())
    }

    /// Parses and validates a JSON configuration.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    fn cube(&self) -> Result<CubeSource> {
        match self.bounds {
            Some(bounds) => CubeSource::from_bounds(bounds),
            None => CubeSource::with_size(self.center, self.x_length, self.y_length, self.z_length),
        }
    }
}

fn validate_frame_width(value: Option<f32>) -> Result<Option<f32>> {
    value.map(|v| check_range("frame width", v, 0.0, 1.0)).transpose()
}

fn validate_shrink_factor(value: Option<f32>) -> Result<Option<f32>> {
    value.map(|v| check_non_negative("shrink factor", v)).transpose()
}

fn validate_explode_factor(value: Option<f32>) -> Result<Option<f32>> {
    value
        .map(|v| check_range("explode factor", v, f32::MIN, f32::MAX))
        .transpose()
}

/// Generates the six faces of a cube as named parts.
///
/// Parts are in +X, -X, +Y, -Y, +Z, -Z order. Each is a single quad, or four
/// border quads when a frame width is set.
#[derive(Debug, Clone)]
pub struct CubeFacesSource {
    cube: CubeSource,
    frame_width: Option<f32>,
    shrink_factor: Option<f32>,
    explode_factor: Option<f32>,
    names: [String; 6],
    dirty: bool,
    output: MultiBlock,
}

impl Default for CubeFacesSource {
    fn default() -> Self {
        Self::new()
    }
}

impl CubeFacesSource {
    /// Creates the faces of a unit cube at the origin.
    pub fn new() -> Self {
        let names = std::array::from_fn(|i| {
            let sign = if i % 2 == 0 { '+' } else { '-' };
            format!("{sign}{}", DEFAULT_FACE_NAMES[i / 2])
        });
        Self {
            cube: CubeSource::new(),
            frame_width: None,
            shrink_factor: None,
            explode_factor: None,
            output: MultiBlock::with_names(&names),
            names,
            dirty: true,
        }
    }

    /// Creates a source from a configuration, validating it first.
    pub fn from_config(config: &CubeFacesConfig) -> Result<Self> {
        let cube = config.cube()?;
        let names = expand_face_names(&config.names)?;
        Ok(Self {
            cube,
            frame_width: validate_frame_width(config.frame_width)?,
            shrink_factor: validate_shrink_factor(config.shrink_factor)?,
            explode_factor: validate_explode_factor(config.explode_factor)?,
            output: MultiBlock::with_names(&names),
            names,
            dirty: true,
        })
    }

    /// The underlying box.
    pub fn cube(&self) -> &CubeSource {
        &self.cube
    }

    /// Moves the cube, keeping its lengths.
    pub fn set_center(&mut self, center: Vec3) {
        self.cube.set_center(center);
        self.dirty = true;
    }

    /// Sets the edge length along x; it must be non-negative.
    pub fn set_x_length(&mut self, length: f32) -> Result<()> {
        self.cube.set_x_length(length)?;
        self.dirty = true;
        Ok(())
    }

    /// Sets the edge length along y; it must be non-negative.
    pub fn set_y_length(&mut self, length: f32) -> Result<()> {
        self.cube.set_y_length(length)?;
        self.dirty = true;
        Ok(())
    }

    /// Sets the edge length along z; it must be non-negative.
    pub fn set_z_length(&mut self, length: f32) -> Result<()> {
        self.cube.set_z_length(length)?;
        self.dirty = true;
        Ok(())
    }

    /// Sets the cube to fill `[x_min, x_max, y_min, y_max, z_min, z_max]`.
    pub fn set_bounds(&mut self, bounds: [f32; 6]) -> Result<()> {
        self.cube.set_bounds(bounds)?;
        self.dirty = true;
        Ok(())
    }

    /// Frame border width, or `None` for solid faces.
    pub fn frame_width(&self) -> Option<f32> {
        self.frame_width
    }

    /// Sets the frame border width, in `[0, 1]`, or `None` for solid faces.
    pub fn set_frame_width(&mut self, frame_width: Option<f32>) -> Result<()> {
        self.frame_width = validate_frame_width(frame_width)?;
        self.dirty = true;
        Ok(())
    }

    /// Shrink factor, or `None` when faces keep their size.
    pub fn shrink_factor(&self) -> Option<f32> {
        self.shrink_factor
    }

    /// Sets the shrink factor (at least 0), or `None` to disable shrinking.
    ///
    /// A factor of 1 leaves faces unchanged and 0 shrinks every face by the
    /// shortest edge length.
    pub fn set_shrink_factor(&mut self, shrink_factor: Option<f32>) -> Result<()> {
        self.shrink_factor = validate_shrink_factor(shrink_factor)?;
        self.dirty = true;
        Ok(())
    }

    /// Explode factor, or `None` when faces stay in place.
    pub fn explode_factor(&self) -> Option<f32> {
        self.explode_factor
    }

    /// Sets the explode factor, or `None` to keep faces in place.
    pub fn set_explode_factor(&mut self, explode_factor: Option<f32>) -> Result<()> {
        self.explode_factor = validate_explode_factor(explode_factor)?;
        self.dirty = true;
        Ok(())
    }

    /// The six face names in output order.
    pub fn names(&self) -> &[String; 6] {
        &self.names
    }

    /// Sets three base names (expanded with `+`/`-` prefixes) or six names.
    pub fn set_names<S: AsRef<str>>(&mut self, names: &[S]) -> Result<()> {
        self.names = expand_face_names(names)?;
        self.dirty = true;
        Ok(())
    }

    fn build_face(
        &self,
        quad: [Vec3; 4],
        cube_center: Vec3,
        lengths: Vec3,
        min_length: f32,
    ) -> SurfaceMesh {
        // min_length / length per axis; a zero-length axis is left unscaled.
        let ratio = Vec3::select(
            lengths.cmpgt(Vec3::ZERO),
            Vec3::splat(min_length) / lengths,
            Vec3::ONE,
        );
        let mut points = quad;
        let mut center = points.iter().copied().sum::<Vec3>() / 4.0;

        if let Some(shrink) = self.shrink_factor {
            let scale = shrink + (1.0 - shrink) * (Vec3::ONE - ratio);
            for p in &mut points {
                *p = center + (*p - center) * scale;
            }
        }

        if let Some(explode) = self.explode_factor {
            let offset = (center - cube_center).normalize_or_zero() * min_length * explode;
            for p in &mut points {
                *p += offset;
            }
            center += offset;
        }

        match self.frame_width {
            None => SurfaceMesh::new(points.to_vec(), vec![vec![0, 1, 2, 3]]),
            Some(width) => {
                let scale = Vec3::ONE - width * ratio;
                let inner = points.map(|p| center + (p - center) * scale);
                let mut frame_points = Vec::with_capacity(16);
                for i in 0..4 {
                    let j = (i + 1) % 4;
                    frame_points.extend([points[i], points[j], inner[j], inner[i]]);
                }
                let faces = (0..4u32).map(|k| (4 * k..4 * k + 4).collect()).collect();
                SurfaceMesh::new(frame_points, faces)
            }
        }
    }
}

impl GeometrySource for CubeFacesSource {
    fn type_name(&self) -> &'static str {
        "CubeFacesSource"
    }

    fn update(&mut self) {
        let bounds = self.cube.bounds();
        let corners = box_corners(&bounds);
        let lengths = bounds.extent();
        let min_length = lengths.min_element();
        if min_length <= 0.0 {
            log::warn!("cube has a zero-length edge: {bounds}");
        }

        let mut output = MultiBlock::new();
        for (name, face) in self.names.iter().zip(BOX_FACES) {
            let quad = face.map(|i| corners[i as usize]);
            let mesh = self.build_face(quad, bounds.center(), lengths, min_length);
            output.append(Some(name.as_str()), mesh);
        }
        log::trace!("updated cube faces, frame width {:?}", self.frame_width);
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

impl fmt::Display for CubeFacesSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let opt = |v: Option<f32>| v.map_or_else(|| "None".to_string(), |v| v.to_string());
        let c = self.cube.center();
        writeln!(f, "{}", self.type_name())?;
        writeln!(f, "  Center:          ({}, {}, {})", c.x, c.y, c.z)?;
        writeln!(f, "  X length:        {}", self.cube.x_length())?;
        writeln!(f, "  Y length:        {}", self.cube.y_length())?;
        writeln!(f, "  Z length:        {}", self.cube.z_length())?;
        writeln!(f, "  Frame width:     {}", opt(self.frame_width))?;
        writeln!(f, "  Shrink factor:   {}", opt(self.shrink_factor))?;
        writeln!(f, "  Explode factor:  {}", opt(self.explode_factor))?;
        write!(f, "  Names:           {}", self.names.join(", "))
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;

    #[test]
    fn test_expand_names() {
        assert_eq!(
            expand_face_names(&["U", "V", "W"]).unwrap(),
            ["+U", "-U", "+V", "-V", "+W", "-W"].map(String::from)
        );
        let six = ["right", "left", "front", "back", "top", "bottom"];
        assert_eq!(expand_face_names(&six).unwrap(), six.map(String::from));
        assert!(matches!(
            expand_face_names(&["a", "b"]),
            Err(VistaError::Validation(_))
        ));
    }

    #[test]
    fn test_frame_width_range() {
        let mut faces = CubeFacesSource::new();
        assert!(faces.set_frame_width(Some(1.5)).is_err());
        assert!(faces.set_frame_width(Some(-0.1)).is_err());
        assert!(faces.set_shrink_factor(Some(-1.0)).is_err());
        assert!(faces.set_explode_factor(Some(-3.0)).is_ok());
        assert_eq!(faces.frame_width(), None);
    }

    #[test]
    fn test_infinite_factors_rejected() {
        let mut faces = CubeFacesSource::new();
        assert!(matches!(
            faces.set_shrink_factor(Some(f32::INFINITY)),
            Err(VistaError::Range { .. })
        ));
        assert!(faces.set_explode_factor(Some(f32::NEG_INFINITY)).is_err());
        assert!(faces.set_x_length(f32::INFINITY).is_err());
        assert_eq!(faces.shrink_factor(), None);
        let out = faces.output();
        out.for_each_mesh(&mut |m| assert!(m.points().iter().all(|p| p.is_finite())));
    }

    #[test]
    fn test_explode_moves_along_face_normal() {
        let mut faces = CubeFacesSource::new();
        faces.set_explode_factor(Some(0.5)).unwrap();
        let out = faces.output();
        let plus_x = out.mesh("+X").unwrap().bounds().unwrap();
        assert!((plus_x.min.x - 1.0).abs() < 1e-6);
        let minus_z = out.mesh("-Z").unwrap().bounds().unwrap();
        assert!((minus_z.max.z + 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_frame_stays_in_face_plane_after_explode() {
        let mut faces = CubeFacesSource::new();
        faces.set_explode_factor(Some(1.0)).unwrap();
        faces.set_frame_width(Some(0.2)).unwrap();
        let out = faces.output();
        let plus_y = out.mesh("+Y").unwrap();
        assert_eq!(plus_y.n_points(), 16);
        assert!(plus_y.points().iter().all(|p| (p.y - 1.5).abs() < 1e-6));
        let b = plus_y.bounds().unwrap();
        assert!((b.max.x - 0.5).abs() < 1e-6);
    }

    #[test]
    fn test_zero_length_cube_does_not_produce_nan() {
        let mut faces = CubeFacesSource::new();
        faces.set_z_length(0.0).unwrap();
        faces.set_shrink_factor(Some(0.5)).unwrap();
        faces.set_frame_width(Some(0.5)).unwrap();
        let out = faces.output();
        out.for_each_mesh(&mut |m| assert!(m.points().iter().all(|p| p.is_finite())));
    }

    #[test]
    fn test_config_round_trip() {
        let config = CubeFacesConfig::default()
            .with_bounds([0.0, 2.0, 0.0, 1.0, 0.0, 1.0])
            .with_frame_width(0.1)
            .with_names(&["a", "b", "c"]);
        let json = serde_json::to_string(&config).unwrap();
        let parsed = CubeFacesConfig::from_json(&json).unwrap();
        assert_eq!(parsed, config);

        let faces = CubeFacesSource::from_config(&parsed).unwrap();
        assert_eq!(faces.cube().lengths(), Vec3::new(2.0, 1.0, 1.0));
        assert_eq!(faces.names()[5], "-c");
        assert!(CubeFacesConfig::from_json(r#"{"frame_width": 2.0}"#).is_err());
        assert!(CubeFacesConfig::from_json(r#"{"names": ["a"]}"#).is_err());
    }

    #[test]
    fn test_display() {
        let text = CubeFacesSource::new().to_string();
        assert!(text.contains("Frame width:     None"));
        assert!(text.contains("+X, -X, +Y, -Y, +Z, -Z"));
    }

    proptest! {
        #[test]
        fn shrink_offset_is_shared_by_all_faces(
            lengths in (0.5f32..4.0, 0.5f32..4.0, 0.5f32..4.0),
            shrink in 0.0f32..1.0,
        ) {
            let mut faces = CubeFacesSource::new();
            faces.set_x_length(lengths.0).unwrap();
            faces.set_y_length(lengths.1).unwrap();
            faces.set_z_length(lengths.2).unwrap();
            faces.set_shrink_factor(Some(shrink)).unwrap();
            let out = faces.output();

            let lengths = Vec3::from(lengths);
            let expected = (1.0 - shrink) * lengths.min_element() * 0.5;
            let half = lengths * 0.5;
            for (axis, name) in [(0, "+X"), (1, "+Y"), (2, "+Z")] {
                let b = out.mesh(name).unwrap().bounds().unwrap();
                for other in (0..3).filter(|&a| a != axis) {
                    let inset = half[other] - b.max[other];
                    prop_assert!((inset - expected).abs() < 1e-4, "{name}: {inset} vs {expected}");
                }
            }
        }
    }
}

//! Normalized part templates for axes geometry.
//!
//! A template is a mesh whose bounding box is exactly `[-0.5, 0.5]^3`, centered
//! at the origin and pointing along +z. Axes parts are built by scaling and
//! moving copies of a template, so the physical size of a part depends only on
//! the requested radius and length and never on how the source geometry was
//! tessellated.

use std::fmt;
use std::str::FromStr;

use glam::Vec3;
use serde::{Deserialize, Serialize};

use vista_core::{DataSet, Result, SurfaceMesh, VistaError};

use crate::primitives::{self, DEFAULT_RESOLUTION};

/// Name reported for parts built from a caller-supplied dataset.
pub const CUSTOM_PART_NAME: &str = "custom";

/// Smallest bounding-box extent a part may have on any axis.
pub const MIN_PART_EXTENT: f32 = 1e-8;

/// A built-in part shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GeometryKind {
    Cylinder,
    Sphere,
    Hemisphere,
    Cone,
    Pyramid,
    Cube,
    Octahedron,
}

impl GeometryKind {
    /// Every kind, in the order they are listed in error messages.
    pub const ALL: [GeometryKind; 7] = [
        GeometryKind::Cylinder,
        GeometryKind::Sphere,
        GeometryKind::Hemisphere,
        GeometryKind::Cone,
        GeometryKind::Pyramid,
        GeometryKind::Cube,
        GeometryKind::Octahedron,
    ];

    /// Returns the lowercase name of the kind.
    pub fn name(self) -> &'static str {
        match self {
            GeometryKind::Cylinder => "cylinder",
            GeometryKind::Sphere => "sphere",
            GeometryKind::Hemisphere => "hemisphere",
            GeometryKind::Cone => "cone",
            GeometryKind::Pyramid => "pyramid",
            GeometryKind::Cube => "cube",
            GeometryKind::Octahedron => "octahedron",
        }
    }

    fn valid_names() -> String {
        Self::ALL
            .iter()
            .map(|k| format!("'{}'", k.name()))
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl fmt::Display for GeometryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for GeometryKind {
    type Err = VistaError;

    fn from_str(s: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|k| k.name() == s)
            .ok_or_else(|| VistaError::UnsupportedGeometryKind {
                kind: s.to_string(),
                valid: Self::valid_names(),
            })
    }
}

/// Geometry for a shaft or tip: a built-in kind, a kind given by name, or an
/// arbitrary dataset.
#[derive(Debug, Clone, PartialEq)]
pub enum PartGeometry {
    /// A kind given by name; resolved when the part is built.
    Named(String),
    /// A built-in kind.
    Kind(GeometryKind),
    /// A custom dataset, oriented so that it points along +z.
    Dataset(DataSet),
}

impl From<GeometryKind> for PartGeometry {
    fn from(kind: GeometryKind) -> Self {
        PartGeometry::Kind(kind)
    }
}

impl From<&str> for PartGeometry {
    fn from(name: &str) -> Self {
        PartGeometry::Named(name.to_string())
    }
}

impl From<String> for PartGeometry {
    fn from(name: String) -> Self {
        PartGeometry::Named(name)
    }
}

impl From<DataSet> for PartGeometry {
    fn from(dataset: DataSet) -> Self {
        PartGeometry::Dataset(dataset)
    }
}

impl From<SurfaceMesh> for PartGeometry {
    fn from(mesh: SurfaceMesh) -> Self {
        PartGeometry::Dataset(DataSet::Surface(mesh))
    }
}

/// Centers `mesh` at the origin and scales each axis so its bounding box
/// becomes `[-0.5, 0.5]^3`.
///
/// Fails with [`VistaError::NotThreeDimensional`] if any extent is below
/// [`MIN_PART_EXTENT`]; the mesh is left untouched in that case.
pub fn normalize(mesh: SurfaceMesh) -> Result<SurfaceMesh> {
    let bounds = mesh.bounds().ok_or_else(|| {
        VistaError::InvalidGeometryInput("cannot normalize a mesh without points".to_string())
    })?;
    if bounds.extent().cmplt(Vec3::splat(MIN_PART_EXTENT)).any() {
        return Err(VistaError::NotThreeDimensional { bounds });
    }
    Ok(fit_unit_cube(mesh))
}

fn fit_unit_cube(mut mesh: SurfaceMesh) -> SurfaceMesh {
    if let Some(bounds) = mesh.bounds() {
        mesh.translate(-bounds.center()).scale(bounds.extent().recip());
    }
    mesh
}

/// Builds the normalized template for a built-in kind.
pub fn make_canonical(kind: GeometryKind) -> SurfaceMesh {
    let mesh = match kind {
        GeometryKind::Cylinder => primitives::cylinder(DEFAULT_RESOLUTION, true),
        GeometryKind::Sphere => primitives::sphere(DEFAULT_RESOLUTION, DEFAULT_RESOLUTION),
        GeometryKind::Hemisphere => primitives::hemisphere(DEFAULT_RESOLUTION, DEFAULT_RESOLUTION),
        GeometryKind::Cone => primitives::cone(DEFAULT_RESOLUTION, true),
        GeometryKind::Pyramid => primitives::pyramid(),
        GeometryKind::Cube => primitives::cube(),
        GeometryKind::Octahedron => primitives::octahedron(),
    };
    // Built-in primitives are never flat.
    fit_unit_cube(mesh)
}

/// Builds a normalized template from a custom dataset.
///
/// Volumes contribute their exterior surface. The dataset itself is not
/// modified.
pub fn make_from_custom(dataset: &DataSet) -> Result<(String, SurfaceMesh)> {
    let surface = dataset.extract_surface()?;
    Ok((CUSTOM_PART_NAME.to_string(), normalize(surface)?))
}

/// Resolves `geometry` to a name and a normalized template.
pub fn make_part(geometry: &PartGeometry) -> Result<(String, SurfaceMesh)> {
    match geometry {
        PartGeometry::Named(name) => {
            let kind: GeometryKind = name.parse()?;
            Ok((kind.name().to_string(), make_canonical(kind)))
        }
        PartGeometry::Kind(kind) => Ok((kind.name().to_string(), make_canonical(*kind))),
        PartGeometry::Dataset(dataset) => make_from_custom(dataset),
    }
}

/// Returns the x, y and z pointing copies of a +z template.
///
/// The template is rotated +90 degrees about y for x and -90 degrees about x
/// for y. All three share the same topology.
pub fn axis_triad(part_z: SurfaceMesh) -> [SurfaceMesh; 3] {
    let mut part_x = part_z.clone();
    part_x.rotate_y(90.0);
    let mut part_y = part_z.clone();
    part_y.rotate_x(-90.0);
    [part_x, part_y, part_z]
}

/// Resolves `geometry` and builds its x, y and z pointing templates.
pub fn make_axis_triad(geometry: &PartGeometry) -> Result<(String, [SurfaceMesh; 3])> {
    let (name, part_z) = make_part(geometry)?;
    log::trace!("building '{name}' triad with {} points per part", part_z.n_points());
    Ok((name, axis_triad(part_z)))
}

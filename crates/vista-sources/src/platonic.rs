//! The five platonic solids.
//!
//! Each solid is generated with unit circumradius and faces wound outward,
//! then scaled and moved by [`PlatonicSolidSource`].

use std::fmt;
use std::str::FromStr;

use glam::Vec3;
use serde::{Deserialize, Serialize};

use vista_core::{check_non_negative, Result, SurfaceMesh, VistaError};

/// Which platonic solid to build.
///
/// Parses from its lowercase name or from its index in [`PlatonicKind::ALL`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlatonicKind {
    #[default]
    Tetrahedron,
    Cube,
    Octahedron,
    Icosahedron,
    Dodecahedron,
}

impl PlatonicKind {
    pub const ALL: [PlatonicKind; 5] = [
        PlatonicKind::Tetrahedron,
        PlatonicKind::Cube,
        PlatonicKind::Octahedron,
        PlatonicKind::Icosahedron,
        PlatonicKind::Dodecahedron,
    ];

    /// The kind at `index` in [`PlatonicKind::ALL`].
    pub fn from_index(index: usize) -> Result<Self> {
        Self::ALL
            .get(index)
            .copied()
            .ok_or(VistaError::IndexOutOfRange {
                index,
                len: Self::ALL.len(),
            })
    }

    /// Position in [`PlatonicKind::ALL`].
    pub fn index(self) -> usize {
        self as usize
    }

    pub fn name(self) -> &'static str {
        match self {
            PlatonicKind::Tetrahedron => "tetrahedron",
            PlatonicKind::Cube => "cube",
            PlatonicKind::Octahedron => "octahedron",
            PlatonicKind::Icosahedron => "icosahedron",
            PlatonicKind::Dodecahedron => "dodecahedron",
        }
    }

    /// Number of faces of the solid.
    pub fn n_faces(self) -> usize {
        match self {
            PlatonicKind::Tetrahedron => 4,
            PlatonicKind::Cube => 6,
            PlatonicKind::Octahedron => 8,
            PlatonicKind::Icosahedron => 20,
            PlatonicKind::Dodecahedron => 12,
        }
    }
}

impl fmt::Display for PlatonicKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for PlatonicKind {
    type Err = VistaError;

    fn from_str(s: &str) -> Result<Self> {
        let lower = s.trim().to_ascii_lowercase();
        if let Some(kind) = Self::ALL.iter().find(|k| k.name() == lower) {
            return Ok(*kind);
        }
        match lower.parse::<usize>() {
            Ok(index) => Self::from_index(index),
            Err(_) => Err(VistaError::Validation(format!(
                "unknown platonic solid '{s}', expected one of tetrahedron, cube, octahedron, icosahedron, dodecahedron"
            ))),
        }
    }
}

/// Builds `kind` with unit circumradius centered at the origin.
#[must_use]
pub fn platonic_solid(kind: PlatonicKind) -> SurfaceMesh {
    let (points, faces) = match kind {
        PlatonicKind::Tetrahedron => tetrahedron(),
        PlatonicKind::Cube => cube(),
        PlatonicKind::Octahedron => octahedron(),
        PlatonicKind::Icosahedron => icosahedron(),
        PlatonicKind::Dodecahedron => dodecahedron(),
    };
    let faces = faces
        .into_iter()
        .map(|face| outward(&points, face))
        .collect();
    SurfaceMesh::new(points, faces)
}

/// Reverses `face` if its winding points towards the origin.
fn outward(points: &[Vec3], mut face: Vec<u32>) -> Vec<u32> {
    let [a, b, c] = [0, 1, 2].map(|i| points[face[i] as usize]);
    if (b - a).cross(c - a).dot(a + b + c) < 0.0 {
        face.reverse();
    }
    face
}

fn tetrahedron() -> (Vec<Vec3>, Vec<Vec<u32>>) {
    let points = [
        Vec3::new(1.0, 1.0, 1.0),
        Vec3::new(1.0, -1.0, -1.0),
        Vec3::new(-1.0, 1.0, -1.0),
        Vec3::new(-1.0, -1.0, 1.0),
    ]
    .map(Vec3::normalize)
    .to_vec();
    let faces = vec![vec![0, 1, 2], vec![0, 1, 3], vec![0, 2, 3], vec![1, 2, 3]];
    (points, faces)
}

fn cube() -> (Vec<Vec3>, Vec<Vec<u32>>) {
    let bounds = vista_core::Bounds::new(Vec3::splat(-1.0), Vec3::ONE);
    let points = bounds.corners().map(Vec3::normalize).to_vec();
    let faces = crate::primitives::BOX_FACES
        .iter()
        .map(|f| f.to_vec())
        .collect();
    (points, faces)
}

fn octahedron() -> (Vec<Vec3>, Vec<Vec<u32>>) {
    let points = vec![
        Vec3::X,
        Vec3::NEG_X,
        Vec3::Y,
        Vec3::NEG_Y,
        Vec3::Z,
        Vec3::NEG_Z,
    ];
    let mut faces = Vec::with_capacity(8);
    for x in [0, 1] {
        for y in [2, 3] {
            for z in [4, 5] {
                faces.push(vec![x, y, z]);
            }
        }
    }
    (points, faces)
}

/// Icosahedron vertices before normalization, edge length 2.
fn icosahedron_vertices() -> Vec<Vec3> {
    let phi = (1.0 + 5f32.sqrt()) / 2.0;
    let mut points = Vec::with_capacity(12);
    for a in [-1.0, 1.0] {
        for b in [-phi, phi] {
            points.push(Vec3::new(0.0, a, b));
            points.push(Vec3::new(a, b, 0.0));
            points.push(Vec3::new(b, 0.0, a));
        }
    }
    points
}

fn icosahedron() -> (Vec<Vec3>, Vec<Vec<u32>>) {
    let raw = icosahedron_vertices();
    let adjacent = |i: usize, j: usize| (raw[i].distance(raw[j]) - 2.0).abs() < 1e-3;
    let mut faces = Vec::with_capacity(20);
    for i in 0..raw.len() {
        for j in i + 1..raw.len() {
            for k in j + 1..raw.len() {
                if adjacent(i, j) && adjacent(j, k) && adjacent(i, k) {
                    faces.push(vec![i as u32, j as u32, k as u32]);
                }
            }
        }
    }
    (raw.into_iter().map(Vec3::normalize).collect(), faces)
}

/// The dual of the icosahedron: one vertex per icosahedron face, one
/// pentagon per icosahedron vertex.
fn dodecahedron() -> (Vec<Vec3>, Vec<Vec<u32>>) {
    let (ico_points, ico_faces) = icosahedron();
    let points: Vec<Vec3> = ico_faces
        .iter()
        .map(|f| {
            let sum: Vec3 = f.iter().map(|&i| ico_points[i as usize]).sum();
            sum.normalize()
        })
        .collect();
    let faces = ico_points
        .iter()
        .enumerate()
        .map(|(v, &axis)| {
            let mut ring: Vec<u32> = ico_faces
                .iter()
                .enumerate()
                .filter(|(_, f)| f.contains(&(v as u32)))
                .map(|(i, _)| i as u32)
                .collect();
            // Sort the five face centers by angle around the vertex axis.
            let u = axis.any_orthonormal_vector();
            let w = axis.cross(u);
            let angle = |i: &u32| {
                let p = points[*i as usize];
                p.dot(w).atan2(p.dot(u))
            };
            ring.sort_by(|a, b| angle(a).total_cmp(&angle(b)));
            ring
        })
        .collect();
    (points, faces)
}

/// A platonic solid of a given circumradius at a given center.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlatonicSolidSource {
    kind: PlatonicKind,
    center: Vec3,
    radius: f32,
}

impl Default for PlatonicSolidSource {
    fn default() -> Self {
        Self {
            kind: PlatonicKind::default(),
            center: Vec3::ZERO,
            radius: 1.0,
        }
    }
}

impl PlatonicSolidSource {
    pub fn new(kind: PlatonicKind) -> Self {
        Self {
            kind,
            ..Self::default()
        }
    }

    /// Parses and validates a JSON description such as
    /// `{"kind": "icosahedron", "radius": 2}`.
    pub fn from_json(json: &str) -> Result<Self> {
        let source: Self = serde_json::from_str(json)?;
        check_non_negative("radius", source.radius)?;
        Ok(source)
    }

    /// Sets the solid to build.
    pub fn with_kind(mut self, kind: PlatonicKind) -> Self {
        self.kind = kind;
        self
    }

    /// Sets the center.
    pub fn with_center(mut self, center: Vec3) -> Self {
        self.center = center;
        self
    }

    pub fn kind(&self) -> PlatonicKind {
        self.kind
    }

    pub fn set_kind(&mut self, kind: PlatonicKind) {
        self.kind = kind;
    }

    /// Selects the solid by name or index, leaving it unchanged on error.
    pub fn set_kind_str(&mut self, kind: &str) -> Result<()> {
        self.kind = kind.parse()?;
        Ok(())
    }

    pub fn center(&self) -> Vec3 {
        self.center
    }

    pub fn set_center(&mut self, center: Vec3) {
        self.center = center;
    }

    /// Distance from the center to every vertex.
    pub fn radius(&self) -> f32 {
        self.radius
    }

    pub fn set_radius(&mut self, radius: f32) -> Result<()> {
        self.radius = check_non_negative("radius", radius)?;
        Ok(())
    }

    /// Generates the solid.
    pub fn output(&self) -> SurfaceMesh {
        let mut mesh = platonic_solid(self.kind);
        mesh.scale(Vec3::splat(self.radius)).translate(self.center);
        mesh
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counts_and_circumradius() {
        let expected = [(4, 4), (8, 6), (6, 8), (12, 20), (20, 12)];
        for (kind, (n_points, n_faces)) in PlatonicKind::ALL.into_iter().zip(expected) {
            let mesh = platonic_solid(kind);
            assert_eq!(mesh.n_points(), n_points, "{kind}");
            assert_eq!(mesh.n_faces(), n_faces, "{kind}");
            assert_eq!(kind.n_faces(), n_faces);
            for p in mesh.points() {
                assert!((p.length() - 1.0).abs() < 1e-5, "{kind}");
            }
        }
    }

    #[test]
    fn test_faces_are_regular_and_outward() {
        for kind in PlatonicKind::ALL {
            let mesh = platonic_solid(kind);
            let normals = mesh.compute_face_normals();
            let centers = mesh.face_centers();
            let mut edge = None;
            for ((face, n), c) in mesh.faces().iter().zip(&normals).zip(&centers) {
                assert!(n.dot(*c) > 0.0, "{kind} face {face:?} points inward");
                // Consecutive vertices of every face are one edge length apart.
                for (i, &a) in face.iter().enumerate() {
                    let b = face[(i + 1) % face.len()];
                    let d = mesh.points()[a as usize].distance(mesh.points()[b as usize]);
                    let e = *edge.get_or_insert(d);
                    assert!((d - e).abs() < 1e-4, "{kind} has uneven edges");
                }
            }
        }
    }

    #[test]
    fn test_kind_parsing() {
        assert_eq!("Cube".parse::<PlatonicKind>().unwrap(), PlatonicKind::Cube);
        assert_eq!("4".parse::<PlatonicKind>().unwrap(), PlatonicKind::Dodecahedron);
        assert!(matches!(
            "5".parse::<PlatonicKind>(),
            Err(VistaError::IndexOutOfRange { index: 5, len: 5 })
        ));
        assert!("sphere".parse::<PlatonicKind>().is_err());
        assert_eq!(PlatonicKind::Icosahedron.index(), 3);
        assert_eq!(PlatonicKind::Octahedron.to_string(), "octahedron");
    }

    #[test]
    fn test_source_placement() {
        let mut source = PlatonicSolidSource::new(PlatonicKind::Octahedron)
            .with_center(Vec3::new(1.0, 0.0, 0.0));
        source.set_radius(2.0).unwrap();
        let b = source.output().bounds().unwrap();
        assert!(b.min.abs_diff_eq(Vec3::new(-1.0, -2.0, -2.0), 1e-5));
        assert!(b.max.abs_diff_eq(Vec3::new(3.0, 2.0, 2.0), 1e-5));

        assert!(source.set_kind_str("nonagon").is_err());
        assert_eq!(source.kind(), PlatonicKind::Octahedron);
        assert!(source.set_radius(-1.0).is_err());

        let parsed = PlatonicSolidSource::from_json(r#"{"kind": "dodecahedron"}"#).unwrap();
        assert_eq!(parsed.kind(), PlatonicKind::Dodecahedron);
        assert_eq!(parsed.radius(), 1.0);
    }
}

//! Volumetric meshes and the [`DataSet`] input type.
//!
//! # Interior/Exterior Faces
//!
//! A cell face is exterior when no other cell shares it. This is determined
//! by hashing sorted face vertex indices and counting occurrences.

use std::collections::HashMap;

use glam::Vec3;

use crate::bounds::Bounds;
use crate::error::{Result, VistaError};
use crate::mesh::SurfaceMesh;

/// Cell type for volume meshes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VolumeCellType {
    /// Tetrahedron (4 vertices)
    Tet,
    /// Hexahedron (8 vertices)
    Hex,
}

/// A volume mesh (tetrahedral, hexahedral, or mixed).
///
/// Cells are stored as arrays of 8 vertex indices. For tetrahedra,
/// only the first 4 indices are used (indices 4-7 are set to `u32::MAX`).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct VolumeMesh {
    points: Vec<Vec3>,
    cells: Vec<[u32; 8]>,
}

impl VolumeMesh {
    /// Creates a volume mesh from 8-slot cells, checking indices.
    pub fn new(points: Vec<Vec3>, cells: Vec<[u32; 8]>) -> Result<Self> {
        let len = points.len();
        for cell in &cells {
            let used = if cell[4] == u32::MAX { &cell[..4] } else { &cell[..] };
            if let Some(&bad) = used.iter().find(|&&i| i as usize >= len) {
                return Err(VistaError::IndexOutOfRange {
                    index: bad as usize,
                    len,
                });
            }
        }
        Ok(Self { points, cells })
    }

    /// Creates a tetrahedral mesh.
    pub fn new_tet_mesh(points: Vec<Vec3>, tets: Vec<[u32; 4]>) -> Result<Self> {
        let cells = tets
            .into_iter()
            .map(|t| {
                [
                    t[0],
                    t[1],
                    t[2],
                    t[3],
                    u32::MAX,
                    u32::MAX,
                    u32::MAX,
                    u32::MAX,
                ]
            })
            .collect();
        Self::new(points, cells)
    }

    /// Creates a hexahedral mesh.
    ///
    /// Vertices 0-3 are the bottom face and 4-7 the top face, both
    /// counter-clockwise when viewed from above.
    pub fn new_hex_mesh(points: Vec<Vec3>, hexes: Vec<[u32; 8]>) -> Result<Self> {
        Self::new(points, hexes)
    }

    /// Returns the points.
    #[must_use]
    pub fn points(&self) -> &[Vec3] {
        &self.points
    }

    /// Returns the raw cells.
    #[must_use]
    pub fn cells(&self) -> &[[u32; 8]] {
        &self.cells
    }

    /// Returns the number of cells.
    #[must_use]
    pub fn n_cells(&self) -> usize {
        self.cells.len()
    }

    /// Returns the type of a cell.
    #[must_use]
    pub fn cell_type(&self, cell_idx: usize) -> VolumeCellType {
        if self.cells[cell_idx][4] == u32::MAX {
            VolumeCellType::Tet
        } else {
            VolumeCellType::Hex
        }
    }

    /// Returns the bounding box of all points.
    #[must_use]
    pub fn bounds(&self) -> Option<Bounds> {
        Bounds::from_points(&self.points)
    }

    fn cell_faces(cell: &[u32; 8]) -> Vec<Vec<u32>> {
        if cell[4] == u32::MAX {
            TET_FACE_STENCIL
                .iter()
                .map(|f| f.iter().map(|&k| cell[k]).collect())
                .collect()
        } else {
            HEX_FACE_STENCIL
                .iter()
                .map(|f| f.iter().map(|&k| cell[k]).collect())
                .collect()
        }
    }

    /// Extracts the exterior faces as a surface mesh.
    ///
    /// Only points referenced by exterior faces are kept.
    #[must_use]
    pub fn extract_surface(&self) -> SurfaceMesh {
        let mut face_counts: HashMap<Vec<u32>, usize> = HashMap::new();
        for cell in &self.cells {
            for face in Self::cell_faces(cell) {
                *face_counts.entry(canonical_face_key(&face)).or_insert(0) += 1;
            }
        }

        let mut remap: HashMap<u32, u32> = HashMap::new();
        let mut points = Vec::new();
        let mut faces = Vec::new();
        for cell in &self.cells {
            for face in Self::cell_faces(cell) {
                if face_counts[&canonical_face_key(&face)] != 1 {
                    continue;
                }
                let local = face
                    .iter()
                    .map(|&i| {
                        *remap.entry(i).or_insert_with(|| {
                            points.push(self.points[i as usize]);
                            #[allow(clippy::cast_possible_truncation)]
                            let id = (points.len() - 1) as u32;
                            id
                        })
                    })
                    .collect();
                faces.push(local);
            }
        }

        log::trace!(
            "extracted {} exterior faces from {} cells",
            faces.len(),
            self.cells.len()
        );
        SurfaceMesh::new(points, faces)
    }
}

fn canonical_face_key(face: &[u32]) -> Vec<u32> {
    let mut key = face.to_vec();
    key.sort_unstable();
    key
}

/// Face stencil for tetrahedra: 4 triangular faces, outward for a
/// positively oriented tet.
const TET_FACE_STENCIL: [[usize; 3]; 4] = [[0, 2, 1], [0, 1, 3], [0, 3, 2], [1, 2, 3]];

/// Face stencil for hexahedra: 6 outward quad faces.
const HEX_FACE_STENCIL: [[usize; 4]; 6] = [
    [0, 3, 2, 1], // Bottom
    [0, 1, 5, 4], // Front
    [1, 2, 6, 5], // Right
    [3, 0, 4, 7], // Left
    [2, 3, 7, 6], // Back
    [4, 5, 6, 7], // Top
];

/// Any mesh-like input accepted where a surface is needed.
#[derive(Debug, Clone, PartialEq)]
pub enum DataSet {
    /// A polygonal surface.
    Surface(SurfaceMesh),
    /// A volumetric mesh; its boundary is used.
    Volume(VolumeMesh),
    /// Bare points, which have no surface.
    PointCloud(Vec<Vec3>),
}

impl DataSet {
    /// Returns a short name for the dataset kind.
    #[must_use]
    pub fn type_name(&self) -> &'static str {
        match self {
            DataSet::Surface(_) => "SurfaceMesh",
            DataSet::Volume(_) => "VolumeMesh",
            DataSet::PointCloud(_) => "PointCloud",
        }
    }

    /// Returns the bounds of the dataset's points.
    #[must_use]
    pub fn bounds(&self) -> Option<Bounds> {
        match self {
            DataSet::Surface(m) => m.bounds(),
            DataSet::Volume(v) => v.bounds(),
            DataSet::PointCloud(p) => Bounds::from_points(p),
        }
    }

    /// Returns the polygonal surface of the dataset.
    ///
    /// Surfaces are copied as-is (line segments dropped), volumes have their
    /// exterior faces extracted, and point clouds are rejected.
    pub fn extract_surface(&self) -> Result<SurfaceMesh> {
        let surface = match self {
            DataSet::Surface(m) if m.is_pure_surface() => m.clone(),
            DataSet::Surface(m) => SurfaceMesh::new(m.points().to_vec(), m.faces().to_vec()),
            DataSet::Volume(v) => v.extract_surface(),
            DataSet::PointCloud(_) => {
                return Err(VistaError::InvalidGeometryInput(
                    "a point cloud has no surface".to_string(),
                ))
            }
        };
        if surface.n_faces() == 0 {
            return Err(VistaError::InvalidGeometryInput(format!(
                "{} has no faces",
                self.type_name()
            )));
        }
        Ok(surface)
    }
}

impl From<SurfaceMesh> for DataSet {
    fn from(mesh: SurfaceMesh) -> Self {
        DataSet::Surface(mesh)
    }
}

impl From<VolumeMesh> for DataSet {
    fn from(mesh: VolumeMesh) -> Self {
        DataSet::Volume(mesh)
    }
}

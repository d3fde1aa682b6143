//! Filters that operate on every leaf of a [`MultiBlock`].
//!
//! Results preserve the nesting and the block names of the input.

use glam::Mat4;
use serde::{Deserialize, Serialize};

use crate::bounds::{Bounds, BOX_FACES};
use crate::error::{check_non_negative, check_range, Result};
use crate::mesh::SurfaceMesh;
use crate::multiblock::{Block, MultiBlock};
use crate::plane::Plane;

/// Options for [`MultiBlock::compute_normals`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NormalsOptions {
    /// Store per-face normals.
    pub cell_normals: bool,
    /// Store area-weighted per-point normals.
    pub point_normals: bool,
    /// Negate the computed normals.
    pub flip_normals: bool,
}

impl Default for NormalsOptions {
    fn default() -> Self {
        Self {
            cell_normals: true,
            point_normals: true,
            flip_normals: false,
        }
    }
}

impl NormalsOptions {
    /// Sets whether face normals are stored.
    pub fn with_cell_normals(mut self, enabled: bool) -> Self {
        self.cell_normals = enabled;
        self
    }

    /// Sets whether point normals are stored.
    pub fn with_point_normals(mut self, enabled: bool) -> Self {
        self.point_normals = enabled;
        self
    }

    /// Sets whether the normals are negated.
    pub fn with_flip_normals(mut self, enabled: bool) -> Self {
        self.flip_normals = enabled;
        self
    }
}

/// Default relative corner size for [`MultiBlock::outline_corners`].
pub const DEFAULT_CORNER_FACTOR: f32 = 0.2;

/// The twelve edges of a box, as pairs of corners differing in one bit.
fn box_edges() -> Vec<[u32; 2]> {
    (0..8u32)
        .flat_map(|i| [1, 2, 4].into_iter().map(move |bit| (i, bit)))
        .filter(|(i, bit)| i & bit == 0)
        .map(|(i, bit)| [i, i | bit])
        .collect()
}

fn box_outline(bounds: &Bounds, generate_faces: bool) -> SurfaceMesh {
    let faces = if generate_faces {
        BOX_FACES.iter().map(|f| f.to_vec()).collect()
    } else {
        Vec::new()
    };
    SurfaceMesh::new(bounds.corners().to_vec(), faces).with_lines(box_edges())
}

fn box_corner_outline(bounds: &Bounds, factor: f32) -> SurfaceMesh {
    let arm = bounds.extent() * factor;
    let mut points = Vec::with_capacity(32);
    let mut lines = Vec::with_capacity(24);
    for (i, corner) in bounds.corners().into_iter().enumerate() {
        let base = points.len() as u32;
        points.push(corner);
        for axis in 0..3 {
            // Arms point from the corner toward the inside of the box.
            let sign = if i & (1 << axis) == 0 { 1.0 } else { -1.0 };
            let mut tip = corner;
            tip[axis] += sign * arm[axis];
            points.push(tip);
            lines.push([base, base + 1 + axis as u32]);
        }
    }
    SurfaceMesh::from_lines(points, lines)
}

impl MultiBlock {
    fn outline_with(
        &self,
        nested: bool,
        build: impl Fn(&Bounds) -> SurfaceMesh,
    ) -> SurfaceMesh {
        if nested {
            let mut combined = SurfaceMesh::default();
            self.for_each_mesh(&mut |m| {
                if let Some(bounds) = m.bounds() {
                    combined.append(&build(&bounds));
                }
            });
            combined
        } else {
            self.bounds().map(|b| build(&b)).unwrap_or_default()
        }
    }

    fn map_meshes(&self, f: &mut impl FnMut(&SurfaceMesh) -> SurfaceMesh) -> MultiBlock {
        self.iter()
            .map(|(name, block)| {
                let mapped = match block {
                    Block::Mesh(m) => Block::Mesh(f(m)),
                    Block::Composite(c) => Block::Composite(c.map_meshes(f)),
                };
                (name.to_string(), mapped)
            })
            .collect()
    }

    /// Appends every leaf into a single surface mesh.
    ///
    /// Leaves are visited depth first; normals survive only when every leaf
    /// carries them.
    #[must_use]
    pub fn extract_geometry(&self) -> SurfaceMesh {
        let mut combined = SurfaceMesh::default();
        self.for_each_mesh(&mut |m| {
            combined.append(m);
        });
        combined
    }

    /// Like [`MultiBlock::extract_geometry`], optionally welding points
    /// closer than `tolerance` afterwards.
    pub fn combine(&self, merge_points: bool, tolerance: f32) -> Result<SurfaceMesh> {
        check_non_negative("tolerance", tolerance)?;
        let mut combined = self.extract_geometry();
        if merge_points {
            if tolerance == 0.0 {
                log::warn!("combine: zero tolerance only merges exactly coincident points");
            }
            let removed = combined.merge_points(tolerance);
            log::debug!("combine merged {removed} duplicate points");
        }
        Ok(combined)
    }

    /// Returns the twelve edges of the bounding box as line segments.
    ///
    /// With `generate_faces` the six box faces are included as well. With
    /// `nested` each leaf gets its own box instead of one box around the
    /// whole composite. Leaves without points are skipped.
    #[must_use]
    pub fn outline(&self, generate_faces: bool, nested: bool) -> SurfaceMesh {
        self.outline_with(nested, |b| box_outline(b, generate_faces))
    }

    /// Returns three short segments at each corner of the bounding box.
    ///
    /// Each segment runs from the corner toward the inside of the box and is
    /// `factor` times the box extent along its axis. `factor` must lie in
    /// `[0, 0.5]` so that opposite corners never overlap.
    pub fn outline_corners(&self, factor: f32, nested: bool) -> Result<SurfaceMesh> {
        check_range("corner factor", factor, 0.0, 0.5)?;
        Ok(self.outline_with(nested, |b| box_corner_outline(b, factor)))
    }

    /// Cuts every leaf with `plane`, producing line-segment meshes.
    #[must_use]
    pub fn slice(&self, plane: &Plane) -> MultiBlock {
        self.map_meshes(&mut |m| m.slice(plane))
    }

    /// Returns a copy with normals computed on every leaf.
    #[must_use]
    pub fn compute_normals(&self, options: &NormalsOptions) -> MultiBlock {
        let sign = if options.flip_normals { -1.0 } else { 1.0 };
        self.map_meshes(&mut |m| {
            let mut out = m.clone();
            let point_normals = options.point_normals.then(|| {
                m.compute_point_normals()
                    .into_iter()
                    .map(|n| n * sign)
                    .collect()
            });
            let face_normals = options.cell_normals.then(|| {
                m.compute_face_normals()
                    .into_iter()
                    .map(|n| n * sign)
                    .collect()
            });
            // Lengths come from the mesh itself, so this cannot mismatch.
            if let Err(e) = out.set_normals(point_normals, face_normals) {
                log::warn!("compute_normals: {e}");
            }
            out
        })
    }

    /// Applies `matrix` to every leaf in place.
    pub fn transform(&mut self, matrix: &Mat4) -> &mut Self {
        self.for_each_mesh_mut(&mut |m| {
            m.transform(matrix);
        });
        self
    }
}

#[cfg(test)]
mod tests {
    use glam::Vec3;

    use super::*;

    fn unit_square(offset: Vec3) -> SurfaceMesh {
        SurfaceMesh::new(
            vec![
                offset,
                offset + Vec3::X,
                offset + Vec3::new(1.0, 1.0, 0.0),
                offset + Vec3::Y,
            ],
            vec![vec![0, 1, 2, 3]],
        )
    }

    fn two_squares() -> MultiBlock {
        let mut inner = MultiBlock::new();
        inner.append(Some("right"), unit_square(Vec3::X));
        let mut multi = MultiBlock::new();
        multi.append(Some("left"), unit_square(Vec3::ZERO));
        multi.append(Some("nested"), inner);
        multi
    }

    #[test]
    fn test_combine_merges_shared_edge() {
        let multi = two_squares();
        let raw = multi.combine(false, 0.0).unwrap();
        assert_eq!(raw.n_points(), 8);
        assert_eq!(raw.n_faces(), 2);

        let merged = multi.combine(true, 1e-6).unwrap();
        assert_eq!(merged.n_points(), 6);
        assert_eq!(merged.n_faces(), 2);
    }

    #[test]
    fn test_combine_rejects_negative_tolerance() {
        assert!(two_squares().combine(true, -1.0).is_err());
    }

    #[test]
    fn test_compute_normals_keeps_structure() {
        let multi = two_squares();
        let with_normals = multi.compute_normals(&NormalsOptions::default().with_flip_normals(true));
        assert_eq!(with_normals.keys(), vec!["left", "nested"]);

        let left = with_normals.mesh("left").unwrap();
        assert_eq!(left.face_normals().unwrap()[0], Vec3::NEG_Z);
        assert_eq!(left.point_normals().unwrap().len(), 4);

        let nested = with_normals.get("nested").unwrap().as_composite().unwrap();
        assert!(nested.mesh("right").unwrap().face_normals().is_some());
    }

    #[test]
    fn test_extract_geometry_concatenates_leaves() {
        let plain = two_squares().extract_geometry();
        assert_eq!(plain.n_points(), 8);
        assert_eq!(plain.faces()[1], vec![4, 5, 6, 7]);

        let with_normals = two_squares().compute_normals(&NormalsOptions::default());
        assert_eq!(
            with_normals.extract_geometry().face_normals().unwrap().len(),
            2
        );
    }

    #[test]
    fn test_slice_every_leaf() {
        let plane = Plane::new(Vec3::new(0.0, 0.5, 0.0), Vec3::Y).unwrap();
        let sliced = two_squares().slice(&plane);
        assert_eq!(sliced.mesh("left").unwrap().n_lines(), 1);
        let nested = sliced.get("nested").unwrap().as_composite().unwrap();
        assert_eq!(nested.mesh("right").unwrap().n_lines(), 1);
    }

    #[test]
    fn test_outline_of_whole_composite() {
        let outline = two_squares().outline(false, false);
        assert_eq!(outline.n_points(), 8);
        assert_eq!(outline.n_lines(), 12);
        assert_eq!(outline.n_faces(), 0);
        assert_eq!(outline.bounds().unwrap().to_array(), [0.0, 2.0, 0.0, 1.0, 0.0, 0.0]);
        for [a, b] in outline.lines() {
            let d = outline.points()[*b as usize] - outline.points()[*a as usize];
            // Flat in z, so the z edges collapse to points.
            assert!(d.cmpne(Vec3::ZERO).bitmask().count_ones() <= 1);
        }

        let solid = two_squares().outline(true, false);
        assert_eq!(solid.n_faces(), 6);
        assert_eq!(solid.n_lines(), 12);
    }

    #[test]
    fn test_outline_nested_per_leaf() {
        let outline = two_squares().outline(false, true);
        assert_eq!(outline.n_points(), 16);
        assert_eq!(outline.n_lines(), 24);
        assert!(MultiBlock::new().outline(false, true).is_empty());
        assert!(MultiBlock::with_names(&["a"]).outline(true, false).is_empty());
    }

    #[test]
    fn test_outline_corners() {
        let mut multi = MultiBlock::new();
        multi.append(
            Some("box"),
            SurfaceMesh::new(vec![Vec3::ZERO, Vec3::new(10.0, 5.0, 2.0)], Vec::new()),
        );
        let corners = multi.outline_corners(DEFAULT_CORNER_FACTOR, false).unwrap();
        assert_eq!(corners.n_points(), 32);
        assert_eq!(corners.n_lines(), 24);
        // The arms of the origin corner.
        assert!(corners.points()[1].abs_diff_eq(Vec3::new(2.0, 0.0, 0.0), 1e-6));
        assert!(corners.points()[2].abs_diff_eq(Vec3::new(0.0, 1.0, 0.0), 1e-6));
        assert!(corners.points()[3].abs_diff_eq(Vec3::new(0.0, 0.0, 0.4), 1e-6));
        let b = corners.bounds().unwrap();
        assert_eq!(b.max, Vec3::new(10.0, 5.0, 2.0));

        assert!(multi.outline_corners(0.8, false).is_err());
        assert_eq!(two_squares().outline_corners(0.1, true).unwrap().n_lines(), 48);
    }

    #[test]
    fn test_transform_in_place() {
        let mut multi = two_squares();
        multi.transform(&Mat4::from_translation(Vec3::Z));
        let b = multi.bounds().unwrap();
        assert_eq!(b.min.z, 1.0);
        assert_eq!(b.max.x, 2.0);
    }
}

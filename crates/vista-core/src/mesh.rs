//! Polygonal surface meshes.
//!
//! A [`SurfaceMesh`] is a point array plus polygon and line-segment connectivity.
//! Faces are variable-length polygons; degenerate faces (repeated indices) are
//! allowed and carry no special meaning beyond contributing to the bounds.

use std::collections::{HashMap, HashSet};

use glam::{Mat3, Mat4, Vec3};

use crate::bounds::Bounds;
use crate::error::{Result, VistaError};
use crate::plane::Plane;
use crate::transform::{self, is_orientation_reversing};

/// A polygonal surface mesh.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SurfaceMesh {
    points: Vec<Vec3>,
    faces: Vec<Vec<u32>>, // Variable-length polygons
    lines: Vec<[u32; 2]>,
    point_normals: Option<Vec<Vec3>>,
    face_normals: Option<Vec<Vec3>>,
}

impl SurfaceMesh {
    /// Creates a new surface mesh from points and polygon faces.
    ///
    /// Indices are not checked; use [`SurfaceMesh::try_new`] for untrusted input.
    #[must_use]
    pub fn new(points: Vec<Vec3>, faces: Vec<Vec<u32>>) -> Self {
        Self {
            points,
            faces,
            ..Default::default()
        }
    }

    /// Creates a new surface mesh, checking that every face index refers to a point.
    pub fn try_new(points: Vec<Vec3>, faces: Vec<Vec<u32>>) -> Result<Self> {
        let mesh = Self::new(points, faces);
        mesh.validate()?;
        Ok(mesh)
    }

    /// Creates a mesh of line segments only.
    #[must_use]
    pub fn from_lines(points: Vec<Vec3>, lines: Vec<[u32; 2]>) -> Self {
        Self {
            points,
            lines,
            ..Default::default()
        }
    }

    /// Replaces the line segments, keeping points and faces.
    #[must_use]
    pub fn with_lines(mut self, lines: Vec<[u32; 2]>) -> Self {
        self.lines = lines;
        self
    }

    /// Creates a mesh from triangles.
    #[must_use]
    pub fn from_triangles(points: Vec<Vec3>, triangles: Vec<[u32; 3]>) -> Self {
        let faces = triangles.into_iter().map(|t| t.to_vec()).collect();
        Self::new(points, faces)
    }

    /// Checks that all face and line indices are in range.
    pub fn validate(&self) -> Result<()> {
        let len = self.points.len();
        let indices = self
            .faces
            .iter()
            .flatten()
            .chain(self.lines.iter().flatten());
        for &i in indices {
            if i as usize >= len {
                return Err(VistaError::IndexOutOfRange {
                    index: i as usize,
                    len,
                });
            }
        }
        Ok(())
    }

    // === Accessors ===

    /// Returns the points.
    #[must_use]
    pub fn points(&self) -> &[Vec3] {
        &self.points
    }

    /// Returns the points for in-place editing.
    pub fn points_mut(&mut self) -> &mut [Vec3] {
        &mut self.points
    }

    /// Returns the polygon faces.
    #[must_use]
    pub fn faces(&self) -> &[Vec<u32>] {
        &self.faces
    }

    /// Returns the line segments.
    #[must_use]
    pub fn lines(&self) -> &[[u32; 2]] {
        &self.lines
    }

    /// Returns the number of points.
    #[must_use]
    pub fn n_points(&self) -> usize {
        self.points.len()
    }

    /// Returns the number of polygon faces.
    #[must_use]
    pub fn n_faces(&self) -> usize {
        self.faces.len()
    }

    /// Returns the number of line segments.
    #[must_use]
    pub fn n_lines(&self) -> usize {
        self.lines.len()
    }

    /// Returns true if the mesh has no points.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Returns true if the mesh has faces and no line segments.
    #[must_use]
    pub fn is_pure_surface(&self) -> bool {
        !self.faces.is_empty() && self.lines.is_empty()
    }

    /// Stored per-point normals, if computed.
    #[must_use]
    pub fn point_normals(&self) -> Option<&[Vec3]> {
        self.point_normals.as_deref()
    }

    /// Stored per-face normals, if computed.
    #[must_use]
    pub fn face_normals(&self) -> Option<&[Vec3]> {
        self.face_normals.as_deref()
    }

    /// Stores normals on the mesh.
    pub fn set_normals(
        &mut self,
        point_normals: Option<Vec<Vec3>>,
        face_normals: Option<Vec<Vec3>>,
    ) -> Result<()> {
        if let Some(n) = &point_normals {
            if n.len() != self.points.len() {
                return Err(VistaError::SizeMismatch {
                    expected: self.points.len(),
                    actual: n.len(),
                });
            }
        }
        if let Some(n) = &face_normals {
            if n.len() != self.faces.len() {
                return Err(VistaError::SizeMismatch {
                    expected: self.faces.len(),
                    actual: n.len(),
                });
            }
        }
        self.point_normals = point_normals;
        self.face_normals = face_normals;
        Ok(())
    }

    /// Drops any stored normals.
    pub fn clear_normals(&mut self) {
        self.point_normals = None;
        self.face_normals = None;
    }

    /// Returns the axis-aligned bounding box, or `None` for an empty mesh.
    #[must_use]
    pub fn bounds(&self) -> Option<Bounds> {
        Bounds::from_points(&self.points)
    }

    /// Returns the center of the bounding box (the origin for an empty mesh).
    #[must_use]
    pub fn center(&self) -> Vec3 {
        self.bounds().map_or(Vec3::ZERO, |b| b.center())
    }

    // === Point transforms ===

    /// Translates all points.
    pub fn translate(&mut self, delta: Vec3) -> &mut Self {
        for p in &mut self.points {
            *p += delta;
        }
        self
    }

    /// Scales all points about the origin, independently per axis.
    pub fn scale(&mut self, factor: Vec3) -> &mut Self {
        self.transform(&Mat4::from_scale(factor))
    }

    /// Rotates about the x axis through the origin by `angle_deg` degrees.
    pub fn rotate_x(&mut self, angle_deg: f32) -> &mut Self {
        self.transform(&Mat4::from_rotation_x(angle_deg.to_radians()))
    }

    /// Rotates about the y axis through the origin by `angle_deg` degrees.
    pub fn rotate_y(&mut self, angle_deg: f32) -> &mut Self {
        self.transform(&Mat4::from_rotation_y(angle_deg.to_radians()))
    }

    /// Rotates about the z axis through the origin by `angle_deg` degrees.
    pub fn rotate_z(&mut self, angle_deg: f32) -> &mut Self {
        self.transform(&Mat4::from_rotation_z(angle_deg.to_radians()))
    }

    /// Applies an affine transform to points and stored normals.
    ///
    /// Orientation-reversing transforms also reverse face winding, so faces that
    /// pointed outward before the transform still point outward after it.
    pub fn transform(&mut self, matrix: &Mat4) -> &mut Self {
        transform::apply_to_points(matrix, &mut self.points);

        let linear = Mat3::from_mat4(*matrix);
        if linear.determinant().abs() > f32::EPSILON {
            let normal_matrix = linear.inverse().transpose();
            for normals in [&mut self.point_normals, &mut self.face_normals]
                .into_iter()
                .flatten()
            {
                for n in normals.iter_mut() {
                    *n = (normal_matrix * *n).normalize_or_zero();
                }
            }
        } else {
            self.clear_normals();
        }

        // The inverse-transpose already mirrors stored normals; reversing the
        // winding keeps the face-derived normals in agreement with them.
        if is_orientation_reversing(matrix) {
            for face in &mut self.faces {
                face.reverse();
            }
        }
        self
    }

    /// Reflects the mesh across the plane with `normal` through `point`.
    ///
    /// Face winding is reversed so the mirrored faces keep pointing outward.
    pub fn reflect(&mut self, normal: Vec3, point: Vec3) -> Result<&mut Self> {
        let m = transform::reflection(normal, Some(point))?;
        Ok(self.transform(&m))
    }

    /// Reverses the winding of every face and negates stored normals.
    pub fn reverse_winding(&mut self) -> &mut Self {
        for face in &mut self.faces {
            face.reverse();
        }
        for normals in [&mut self.point_normals, &mut self.face_normals]
            .into_iter()
            .flatten()
        {
            for n in normals.iter_mut() {
                *n = -*n;
            }
        }
        self
    }

    // === Topology edits ===

    /// Appends another mesh, offsetting its indices.
    ///
    /// Normals are kept only when both meshes carry them (an empty side counts
    /// as carrying them).
    pub fn append(&mut self, other: &SurfaceMesh) -> &mut Self {
        #[allow(clippy::cast_possible_truncation)]
        let offset = self.points.len() as u32;

        let keep_point_normals = (self.point_normals.is_some() || self.points.is_empty())
            && (other.point_normals.is_some() || other.points.is_empty());
        let keep_face_normals = (self.face_normals.is_some() || self.faces.is_empty())
            && (other.face_normals.is_some() || other.faces.is_empty());

        self.points.extend_from_slice(&other.points);
        self.faces.extend(
            other
                .faces
                .iter()
                .map(|f| f.iter().map(|&i| i + offset).collect()),
        );
        self.lines
            .extend(other.lines.iter().map(|[a, b]| [a + offset, b + offset]));

        if keep_point_normals {
            let mut merged = self.point_normals.take().unwrap_or_default();
            merged.extend_from_slice(other.point_normals.as_deref().unwrap_or_default());
            self.point_normals = Some(merged).filter(|n| !n.is_empty());
        } else {
            self.point_normals = None;
        }
        if keep_face_normals {
            let mut merged = self.face_normals.take().unwrap_or_default();
            merged.extend_from_slice(other.face_normals.as_deref().unwrap_or_default());
            self.face_normals = Some(merged).filter(|n| !n.is_empty());
        } else {
            self.face_normals = None;
        }
        self
    }

    /// Appends a single point and a zero-area face referencing it three times.
    ///
    /// Returns the index of the new point.
    pub fn push_degenerate_face(&mut self, point: Vec3) -> u32 {
        #[allow(clippy::cast_possible_truncation)]
        let id = self.points.len() as u32;
        self.points.push(point);
        self.faces.push(vec![id, id, id]);
        self.clear_normals();
        id
    }

    // === Derived geometry ===

    /// Fan-triangulates every polygon.
    ///
    /// For a polygon with vertices [v0, v1, v2, v3, ...], creates triangles:
    /// [v0, v1, v2], [v0, v2, v3], [v0, v3, v4], ...
    #[must_use]
    pub fn triangulate(&self) -> Vec<[u32; 3]> {
        let mut tris = Vec::new();
        for face in &self.faces {
            if face.len() >= 3 {
                let v0 = face[0];
                for i in 1..(face.len() - 1) {
                    tris.push([v0, face[i], face[i + 1]]);
                }
            }
        }
        tris
    }

    /// Returns the average of each face's points.
    #[must_use]
    pub fn face_centers(&self) -> Vec<Vec3> {
        self.faces
            .iter()
            .map(|face| {
                if face.is_empty() {
                    return Vec3::ZERO;
                }
                let sum: Vec3 = face.iter().map(|&i| self.points[i as usize]).sum();
                #[allow(clippy::cast_precision_loss)]
                let n = face.len() as f32;
                sum / n
            })
            .collect()
    }

    /// Computes face normals using cross product of first two edges.
    ///
    /// Degenerate faces get a zero normal.
    #[must_use]
    pub fn compute_face_normals(&self) -> Vec<Vec3> {
        self.faces
            .iter()
            .map(|face| {
                if face.len() < 3 {
                    return Vec3::ZERO;
                }
                let v0 = self.points[face[0] as usize];
                let v1 = self.points[face[1] as usize];
                let v2 = self.points[face[2] as usize];
                (v1 - v0).cross(v2 - v0).normalize_or_zero()
            })
            .collect()
    }

    /// Computes point normals as area-weighted average of incident face normals.
    #[must_use]
    pub fn compute_point_normals(&self) -> Vec<Vec3> {
        let face_normals = self.compute_face_normals();
        let mut normals = vec![Vec3::ZERO; self.points.len()];

        for (face, face_normal) in self.faces.iter().zip(&face_normals) {
            if face.len() < 3 {
                continue;
            }
            let v0 = self.points[face[0] as usize];
            let mut area = 0.0;
            for i in 1..(face.len() - 1) {
                let v1 = self.points[face[i] as usize];
                let v2 = self.points[face[i + 1] as usize];
                area += (v1 - v0).cross(v2 - v0).length() * 0.5;
            }
            let weighted = *face_normal * area;
            for &vi in face {
                normals[vi as usize] += weighted;
            }
        }

        for n in &mut normals {
            *n = n.normalize_or_zero();
        }
        normals
    }

    /// Total area of all faces.
    #[must_use]
    pub fn area(&self) -> f32 {
        self.triangulate()
            .iter()
            .map(|[a, b, c]| {
                let (a, b, c) = (
                    self.points[*a as usize],
                    self.points[*b as usize],
                    self.points[*c as usize],
                );
                (b - a).cross(c - a).length() * 0.5
            })
            .sum()
    }

    /// Welds points closer than `tolerance` into one and remaps connectivity.
    ///
    /// With a zero tolerance only exactly coincident points are merged.
    /// Returns the number of points removed. Stored normals are dropped.
    #[allow(clippy::cast_possible_truncation)]
    pub fn merge_points(&mut self, tolerance: f32) -> usize {
        let before = self.points.len();
        let mut merged: Vec<Vec3> = Vec::with_capacity(before);
        let mut remap: Vec<u32> = Vec::with_capacity(before);

        if tolerance > 0.0 {
            let cell_of = |p: Vec3| (p / tolerance).floor().as_ivec3();
            let mut grid: HashMap<glam::IVec3, Vec<u32>> = HashMap::new();
            for &p in &self.points {
                let cell = cell_of(p);
                let mut found = None;
                'search: for dx in -1..=1 {
                    for dy in -1..=1 {
                        for dz in -1..=1 {
                            let key = cell + glam::IVec3::new(dx, dy, dz);
                            if let Some(candidates) = grid.get(&key) {
                                if let Some(&hit) = candidates
                                    .iter()
                                    .find(|&&c| merged[c as usize].distance(p) <= tolerance)
                                {
                                    found = Some(hit);
                                    break 'search;
                                }
                            }
                        }
                    }
                }
                let id = found.unwrap_or_else(|| {
                    let id = merged.len() as u32;
                    merged.push(p);
                    grid.entry(cell).or_default().push(id);
                    id
                });
                remap.push(id);
            }
        } else {
            // -0.0 + 0.0 == +0.0, so signed zeros share a key
            let key_of = |p: Vec3| {
                [
                    (p.x + 0.0).to_bits(),
                    (p.y + 0.0).to_bits(),
                    (p.z + 0.0).to_bits(),
                ]
            };
            let mut seen: HashMap<[u32; 3], u32> = HashMap::new();
            for &p in &self.points {
                let id = *seen.entry(key_of(p)).or_insert_with(|| {
                    merged.push(p);
                    (merged.len() - 1) as u32
                });
                remap.push(id);
            }
        }

        for face in &mut self.faces {
            for i in face.iter_mut() {
                *i = remap[*i as usize];
            }
        }
        for line in &mut self.lines {
            for i in line.iter_mut() {
                *i = remap[*i as usize];
            }
        }
        self.points = merged;
        self.clear_normals();

        let removed = before - self.points.len();
        log::trace!("merge_points: welded {removed} of {before} points (tolerance {tolerance})");
        removed
    }

    /// Intersects every face with a plane, producing line segments.
    ///
    /// Intersection points on shared edges are shared between the resulting
    /// segments, so a closed surface yields closed polylines. An edge lying in
    /// the plane is emitted once even when two faces share it.
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub fn slice(&self, plane: &Plane) -> SurfaceMesh {
        let distances: Vec<f32> = self.points.iter().map(|&p| plane.signed_distance(p)).collect();
        let mut points: Vec<Vec3> = Vec::new();
        let mut lines: Vec<[u32; 2]> = Vec::new();
        let mut edge_points: HashMap<(u32, u32), u32> = HashMap::new();
        let mut vertex_points: HashMap<u32, u32> = HashMap::new();
        let mut seen: HashSet<(u32, u32)> = HashSet::new();

        for face in &self.faces {
            if face.iter().all(|&i| distances[i as usize] == 0.0) {
                continue;
            }
            let mut crossings: Vec<u32> = Vec::new();
            for k in 0..face.len() {
                let a = face[k];
                let b = face[(k + 1) % face.len()];
                let (da, db) = (distances[a as usize], distances[b as usize]);
                if da == 0.0 {
                    let id = *vertex_points.entry(a).or_insert_with(|| {
                        points.push(self.points[a as usize]);
                        (points.len() - 1) as u32
                    });
                    crossings.push(id);
                }
                if da * db < 0.0 {
                    let key = (a.min(b), a.max(b));
                    let id = *edge_points.entry(key).or_insert_with(|| {
                        let (lo, hi) = key;
                        let (dl, dh) = (distances[lo as usize], distances[hi as usize]);
                        let t = dl / (dl - dh);
                        points.push(self.points[lo as usize].lerp(self.points[hi as usize], t));
                        (points.len() - 1) as u32
                    });
                    crossings.push(id);
                }
            }
            for pair in crossings.chunks_exact(2) {
                let (a, b) = (pair[0], pair[1]);
                if a != b && seen.insert((a.min(b), a.max(b))) {
                    lines.push([a, b]);
                }
            }
        }

        SurfaceMesh::from_lines(points, lines)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unit_quad() -> SurfaceMesh {
        SurfaceMesh::new(
            vec![
                Vec3::new(0.0, 0.0, 0.0),
                Vec3::new(1.0, 0.0, 0.0),
                Vec3::new(1.0, 1.0, 0.0),
                Vec3::new(0.0, 1.0, 0.0),
            ],
            vec![vec![0, 1, 2, 3]],
        )
    }

    #[test]
    fn test_try_new_rejects_bad_index() {
        let result = SurfaceMesh::try_new(vec![Vec3::ZERO], vec![vec![0, 1, 0]]);
        assert!(matches!(
            result,
            Err(VistaError::IndexOutOfRange { index: 1, len: 1 })
        ));
    }

    #[test]
    fn test_bounds_and_center() {
        let mesh = unit_quad();
        let b = mesh.bounds().unwrap();
        assert_eq!(b.min, Vec3::ZERO);
        assert_eq!(b.max, Vec3::new(1.0, 1.0, 0.0));
        assert_eq!(mesh.center(), Vec3::new(0.5, 0.5, 0.0));
        assert!(SurfaceMesh::default().bounds().is_none());
    }

    #[test]
    fn test_face_normal_and_area() {
        let mesh = unit_quad();
        assert_eq!(mesh.compute_face_normals(), vec![Vec3::Z]);
        assert!((mesh.area() - 1.0).abs() < 1e-6);
        for n in mesh.compute_point_normals() {
            assert!((n - Vec3::Z).length() < 1e-6);
        }
    }

    #[test]
    fn test_triangulation() {
        let mesh = unit_quad();
        assert_eq!(mesh.triangulate(), vec![[0, 1, 2], [0, 2, 3]]);
    }

    #[test]
    fn test_reflect_reverses_winding() {
        let mut mesh = unit_quad();
        mesh.translate(Vec3::Z);
        mesh.reflect(Vec3::Z, Vec3::ZERO).unwrap();
        assert!((mesh.points()[0].z + 1.0).abs() < 1e-6);
        assert_eq!(mesh.faces()[0], vec![3, 2, 1, 0]);
        assert!((mesh.compute_face_normals()[0] + Vec3::Z).length() < 1e-6);
    }

    #[test]
    fn test_transform_updates_stored_normals() {
        let mut mesh = unit_quad();
        let normals = mesh.compute_point_normals();
        mesh.set_normals(Some(normals), None).unwrap();
        mesh.rotate_x(90.0);
        for n in mesh.point_normals().unwrap() {
            assert!((*n - Vec3::new(0.0, -1.0, 0.0)).length() < 1e-5);
        }
    }

    #[test]
    fn test_set_normals_size_mismatch() {
        let mut mesh = unit_quad();
        assert!(mesh.set_normals(Some(vec![Vec3::Z]), None).is_err());
    }

    #[test]
    fn test_append_offsets_indices() {
        let mut a = unit_quad();
        let mut b = unit_quad();
        b.translate(Vec3::X * 2.0);
        a.append(&b);
        assert_eq!(a.n_points(), 8);
        assert_eq!(a.faces()[1], vec![4, 5, 6, 7]);
        assert_eq!(a.bounds().unwrap().max.x, 3.0);
    }

    #[test]
    fn test_push_degenerate_face() {
        let mut mesh = unit_quad();
        let id = mesh.push_degenerate_face(Vec3::splat(-1.0));
        assert_eq!(id, 4);
        assert_eq!(mesh.faces()[1], vec![4, 4, 4]);
        assert_eq!(mesh.bounds().unwrap().min, Vec3::splat(-1.0));
        assert!((mesh.area() - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_merge_points_exact() {
        let mut a = unit_quad();
        let mut b = unit_quad();
        b.translate(Vec3::X);
        a.append(&b);
        let removed = a.merge_points(0.0);
        assert_eq!(removed, 2);
        assert_eq!(a.n_points(), 6);
        a.validate().unwrap();
    }

    #[test]
    fn test_merge_points_with_tolerance() {
        let mut mesh = SurfaceMesh::from_lines(
            vec![Vec3::ZERO, Vec3::new(0.001, 0.0, 0.0), Vec3::X],
            vec![[0, 2], [1, 2]],
        );
        assert_eq!(mesh.merge_points(0.01), 1);
        assert_eq!(mesh.lines(), &[[0, 1], [0, 1]]);
    }

    #[test]
    fn test_slice_quad() {
        let mesh = unit_quad();
        let plane = Plane::new(Vec3::new(0.5, 0.0, 0.0), Vec3::X).unwrap();
        let sliced = mesh.slice(&plane);
        assert_eq!(sliced.n_lines(), 1);
        assert_eq!(sliced.n_points(), 2);
        for p in sliced.points() {
            assert!((p.x - 0.5).abs() < 1e-6);
        }
    }

    #[test]
    fn test_slice_shared_edge_in_plane_once() {
        // Two roof panels meeting at a ridge that lies in the plane x = 0.
        let roof = SurfaceMesh::new(
            vec![
                Vec3::new(0.0, 0.0, 1.0),
                Vec3::new(0.0, 1.0, 1.0),
                Vec3::new(-1.0, 1.0, 0.0),
                Vec3::new(-1.0, 0.0, 0.0),
                Vec3::new(1.0, 0.0, 0.0),
                Vec3::new(1.0, 1.0, 0.0),
            ],
            vec![vec![0, 1, 2, 3], vec![1, 0, 4, 5]],
        );
        let sliced = roof.slice(&Plane::new(Vec3::ZERO, Vec3::X).unwrap());
        assert_eq!(sliced.n_points(), 2);
        assert_eq!(sliced.n_lines(), 1);
    }

    #[test]
    fn test_slice_miss() {
        let mesh = unit_quad();
        let plane = Plane::new(Vec3::new(5.0, 0.0, 0.0), Vec3::X).unwrap();
        assert!(mesh.slice(&plane).is_empty());
    }

    mod properties {
        use proptest::prelude::*;

        use super::*;

        fn chain(points: Vec<Vec3>) -> SurfaceMesh {
            let lines = (1..points.len() as u32).map(|i| [i - 1, i]).collect();
            SurfaceMesh::from_lines(points, lines)
        }

        proptest! {
            #[test]
            fn merge_points_is_idempotent_and_local(
                coords in prop::collection::vec(
                    (-2.0f32..2.0, -2.0f32..2.0, -2.0f32..2.0),
                    2..64,
                ),
                tolerance in 0.01f32..0.5,
            ) {
                let original: Vec<Vec3> = coords.into_iter().map(Vec3::from).collect();
                let mut mesh = chain(original.clone());
                let removed = mesh.merge_points(tolerance);
                prop_assert_eq!(removed + mesh.n_points(), original.len());

                // Every point moved at most `tolerance` to its representative.
                for (k, [a, b]) in mesh.lines().iter().enumerate() {
                    prop_assert!(original[k].distance(mesh.points()[*a as usize]) <= tolerance);
                    prop_assert!(original[k + 1].distance(mesh.points()[*b as usize]) <= tolerance);
                }

                let again = mesh.merge_points(tolerance);
                prop_assert_eq!(again, 0);
            }
        }
    }
}

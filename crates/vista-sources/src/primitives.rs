//! Canonical primitive generators.
//!
//! Every primitive is centered at the origin, fits in the `[-0.5, 0.5]^3` cube
//! and points along +z. Faces are wound counter-clockwise when seen from
//! outside. Flat primitives lie in the xy plane with their normal along +z.
//!
//! [`orient`] places a mesh built along +x at a center and direction; the
//! parametric sources use it after turning a primitive with [`along_x`].

use std::f32::consts::{PI, TAU};

use glam::{Mat4, Vec3};

use vista_core::{Bounds, Result, SurfaceMesh, VistaError};

pub use vista_core::bounds::BOX_FACES;

/// Tessellation resolution used for axes part templates.
pub const DEFAULT_RESOLUTION: usize = 50;

/// Checks that a count is at least `min`.
pub(crate) fn check_count(name: &str, value: usize, min: usize) -> Result<usize> {
    if value >= min {
        Ok(value)
    } else {
        Err(VistaError::Range {
            name: name.to_string(),
            value: value as f32,
            min: min as f32,
            max: f32::INFINITY,
        })
    }
}

/// Checks that a direction is finite and non-zero.
pub(crate) fn check_direction(name: &str, direction: Vec3) -> Result<Vec3> {
    if direction.is_finite() && direction.length_squared() > 0.0 {
        Ok(direction)
    } else {
        Err(VistaError::Validation(format!(
            "{name} must be a non-zero vector, got {direction}"
        )))
    }
}

/// Turns a +z pointing mesh so it points along +x.
pub fn along_x(mut mesh: SurfaceMesh) -> SurfaceMesh {
    mesh.rotate_y(90.0);
    mesh
}

/// Rotates a mesh built along +x to point along `direction`, then moves the
/// origin to `center`.
///
/// The rotation keeps the mesh's y axis as close to world +y as possible;
/// when `direction` is parallel to y, world -x (or +x for -y) takes its place.
pub fn orient(mesh: &mut SurfaceMesh, center: Vec3, direction: Vec3) -> Result<()> {
    let x_axis = check_direction("direction", direction)?.normalize();
    let up = if x_axis.cross(Vec3::Y).length_squared() > 1e-12 {
        Vec3::Y
    } else if x_axis.y > 0.0 {
        Vec3::NEG_X
    } else {
        Vec3::X
    };
    let z_axis = x_axis.cross(up).normalize();
    let y_axis = z_axis.cross(x_axis);
    let matrix = Mat4::from_cols(
        x_axis.extend(0.0),
        y_axis.extend(0.0),
        z_axis.extend(0.0),
        center.extend(1.0),
    );
    mesh.transform(&matrix);
    Ok(())
}

fn ring(resolution: usize, radius: f32, z: f32) -> impl Iterator<Item = Vec3> {
    (0..resolution).map(move |i| {
        let theta = TAU * i as f32 / resolution as f32;
        Vec3::new(radius * theta.cos(), radius * theta.sin(), z)
    })
}

/// Index `i` of a ring starting at `start`, wrapping around.
fn ring_index(start: u32, resolution: usize, i: usize) -> u32 {
    start + (i % resolution) as u32
}

/// A cylinder of unit height and diameter along z.
///
/// `resolution` is the number of sides (at least 3). With `capping` the two
/// ends are closed by polygons.
#[must_use]
pub fn cylinder(resolution: usize, capping: bool) -> SurfaceMesh {
    let n = resolution.max(3);
    let mut points: Vec<Vec3> = ring(n, 0.5, -0.5).collect();
    points.extend(ring(n, 0.5, 0.5));

    let top = n as u32;
    let mut faces: Vec<Vec<u32>> = (0..n)
        .map(|i| {
            vec![
                ring_index(0, n, i),
                ring_index(0, n, i + 1),
                ring_index(top, n, i + 1),
                ring_index(top, n, i),
            ]
        })
        .collect();
    if capping {
        faces.push((0..n as u32).rev().collect());
        faces.push((top..top + n as u32).collect());
    }
    SurfaceMesh::new(points, faces)
}

/// A cone of unit height and base diameter with its apex at +z.
#[must_use]
pub fn cone(resolution: usize, capping: bool) -> SurfaceMesh {
    let n = resolution.max(3);
    let mut points: Vec<Vec3> = ring(n, 0.5, -0.5).collect();
    points.push(Vec3::new(0.0, 0.0, 0.5));
    let apex = n as u32;

    let mut faces: Vec<Vec<u32>> = (0..n)
        .map(|i| vec![ring_index(0, n, i), ring_index(0, n, i + 1), apex])
        .collect();
    if capping {
        faces.push((0..n as u32).rev().collect());
    }
    SurfaceMesh::new(points, faces)
}

/// A latitude/longitude sphere of unit diameter, swept from the +z pole down
/// to the polar angle `end_phi_deg`.
///
/// At 180 degrees the sweep closes at the -z pole. Anything shorter is
/// closed by a flat polygon at the last ring.
fn swept_sphere(theta_resolution: usize, phi_resolution: usize, end_phi_deg: f32) -> SurfaceMesh {
    let n = theta_resolution.max(3);
    let rings = phi_resolution.max(2);
    let end_phi = end_phi_deg.to_radians().clamp(0.0, PI);
    let full = (end_phi - PI).abs() < 1e-6;

    let mut points = vec![Vec3::new(0.0, 0.0, 0.5)];
    // Ring j sits at polar angle j / rings * end_phi; the pole is j = 0.
    let last_ring = if full { rings - 1 } else { rings };
    for j in 1..=last_ring {
        let phi = end_phi * j as f32 / rings as f32;
        points.extend(ring(n, 0.5 * phi.sin(), 0.5 * phi.cos()));
    }
    let ring_start = |j: usize| 1 + ((j - 1) * n) as u32;

    let mut faces: Vec<Vec<u32>> = Vec::new();
    for i in 0..n {
        faces.push(vec![0, ring_index(1, n, i), ring_index(1, n, i + 1)]);
    }
    for j in 1..last_ring {
        let (upper, lower) = (ring_start(j), ring_start(j + 1));
        for i in 0..n {
            faces.push(vec![
                ring_index(upper, n, i),
                ring_index(lower, n, i),
                ring_index(lower, n, i + 1),
                ring_index(upper, n, i + 1),
            ]);
        }
    }

    let last = ring_start(last_ring);
    if full {
        let south = points.len() as u32;
        points.push(Vec3::new(0.0, 0.0, -0.5));
        for i in 0..n {
            faces.push(vec![south, ring_index(last, n, i + 1), ring_index(last, n, i)]);
        }
    } else {
        faces.push((0..n).rev().map(|i| ring_index(last, n, i)).collect());
    }
    SurfaceMesh::new(points, faces)
}

/// A UV sphere of unit diameter.
#[must_use]
pub fn sphere(theta_resolution: usize, phi_resolution: usize) -> SurfaceMesh {
    swept_sphere(theta_resolution, phi_resolution, 180.0)
}

/// The closed upper half of a unit-diameter sphere, dome towards +z.
///
/// The flat side is a single polygon in the z = 0 plane.
#[must_use]
pub fn hemisphere(theta_resolution: usize, phi_resolution: usize) -> SurfaceMesh {
    swept_sphere(theta_resolution, phi_resolution, 90.0)
}

/// A square pyramid with a unit base and its apex at +z.
#[must_use]
pub fn pyramid() -> SurfaceMesh {
    let points = vec![
        Vec3::new(-0.5, -0.5, -0.5),
        Vec3::new(0.5, -0.5, -0.5),
        Vec3::new(0.5, 0.5, -0.5),
        Vec3::new(-0.5, 0.5, -0.5),
        Vec3::new(0.0, 0.0, 0.5),
    ];
    let faces = vec![
        vec![0, 3, 2, 1],
        vec![0, 1, 4],
        vec![1, 2, 4],
        vec![2, 3, 4],
        vec![3, 0, 4],
    ];
    SurfaceMesh::new(points, faces)
}

/// A part of a unit-diameter sphere between two azimuthal angles (`theta`,
/// about +z, from +x) and two polar angles (`phi`, from +z), in degrees.
///
/// Poles are single points when the polar range reaches them. A full
/// azimuthal range wraps around without a seam; otherwise the surface is
/// open along both meridians. No caps are added.
#[must_use]
pub fn sphere_section(
    theta_resolution: usize,
    phi_resolution: usize,
    theta_range: (f32, f32),
    phi_range: (f32, f32),
) -> SurfaceMesh {
    let n = theta_resolution.max(3);
    let rows = phi_resolution.max(2);
    let (start_theta, end_theta) = (theta_range.0.to_radians(), theta_range.1.to_radians());
    let (start_phi, end_phi) = (
        phi_range.0.to_radians().clamp(0.0, PI),
        phi_range.1.to_radians().clamp(0.0, PI),
    );
    let wraps = (end_theta - start_theta).abs() >= TAU - 1e-5;
    let columns = if wraps { n } else { n + 1 };
    let north = start_phi < 1e-6;
    let south = (PI - end_phi) < 1e-6;

    let column = |ring_start: u32, i: usize| ring_start + (i % columns) as u32;
    let mut points = Vec::new();
    if north {
        points.push(Vec3::new(0.0, 0.0, 0.5));
    }
    let first_row = usize::from(north);
    let last_row = if south { rows - 1 } else { rows };
    let mut ring_starts = Vec::new();
    for j in first_row..=last_row {
        let phi = start_phi + (end_phi - start_phi) * j as f32 / rows as f32;
        ring_starts.push(points.len() as u32);
        for i in 0..columns {
            let theta = start_theta + (end_theta - start_theta) * i as f32 / n as f32;
            points.push(0.5 * Vec3::new(phi.sin() * theta.cos(), phi.sin() * theta.sin(), phi.cos()));
        }
    }

    let mut faces: Vec<Vec<u32>> = Vec::new();
    if north {
        let top = ring_starts[0];
        faces.extend((0..n).map(|i| vec![0, column(top, i), column(top, i + 1)]));
    }
    for pair in ring_starts.windows(2) {
        let (upper, lower) = (pair[0], pair[1]);
        faces.extend((0..n).map(|i| {
            vec![
                column(upper, i),
                column(lower, i),
                column(lower, i + 1),
                column(upper, i + 1),
            ]
        }));
    }
    if south {
        let pole = points.len() as u32;
        points.push(Vec3::new(0.0, 0.0, -0.5));
        if let Some(&bottom) = ring_starts.last() {
            faces.extend((0..n).map(|i| vec![pole, column(bottom, i + 1), column(bottom, i)]));
        }
    }
    SurfaceMesh::new(points, faces)
}

/// A flat annulus in the xy plane with `radial_resolution` rings of quads
/// between the two radii, `circumferential_resolution` quads around.
///
/// An inner radius of zero collapses the innermost ring onto the center.
#[must_use]
pub fn disc(
    inner: f32,
    outer: f32,
    radial_resolution: usize,
    circumferential_resolution: usize,
) -> SurfaceMesh {
    let rings = radial_resolution.max(1);
    let n = circumferential_resolution.max(3);
    let mut points = Vec::with_capacity((rings + 1) * n);
    for k in 0..=rings {
        let radius = inner + (outer - inner) * k as f32 / rings as f32;
        points.extend(ring(n, radius, 0.0));
    }
    let mut faces = Vec::with_capacity(rings * n);
    for k in 0..rings {
        let (inside, outside) = ((k * n) as u32, ((k + 1) * n) as u32);
        for i in 0..n {
            faces.push(vec![
                ring_index(inside, n, i),
                ring_index(outside, n, i),
                ring_index(outside, n, i + 1),
                ring_index(inside, n, i + 1),
            ]);
        }
    }
    SurfaceMesh::new(points, faces)
}

/// A regular polygon of unit circumradius in the xy plane, first vertex on +x.
///
/// With `fill` the polygon is one face; otherwise only its outline is
/// produced, as line segments.
#[must_use]
pub fn regular_polygon(sides: usize, fill: bool) -> SurfaceMesh {
    let n = sides.max(3);
    let points: Vec<Vec3> = ring(n, 1.0, 0.0).collect();
    if fill {
        SurfaceMesh::new(points, vec![(0..n as u32).collect()])
    } else {
        let lines = (0..n).map(|i| [i as u32, ring_index(0, n, i + 1)]).collect();
        SurfaceMesh::from_lines(points, lines)
    }
}

/// A polyline through `points`, one segment between each consecutive pair.
#[must_use]
pub fn polyline(points: Vec<Vec3>) -> SurfaceMesh {
    let lines = (1..points.len() as u32).map(|i| [i - 1, i]).collect();
    SurfaceMesh::from_lines(points, lines)
}

/// A straight line from `a` to `b` split into `resolution` segments.
#[must_use]
pub fn line(a: Vec3, b: Vec3, resolution: usize) -> SurfaceMesh {
    let n = resolution.max(1);
    polyline((0..=n).map(|i| a.lerp(b, i as f32 / n as f32)).collect())
}

/// An axis-aligned box whose faces are each split into a
/// `(level + 1) x (level + 1)` grid, with quads or, without `quads`, two
/// triangles per grid cell.
///
/// Faces follow [`BOX_FACES`] order and grid points along shared edges are
/// shared between faces.
#[must_use]
pub fn tessellated_box(bounds: &Bounds, level: usize, quads: bool) -> SurfaceMesh {
    let cells = level + 1;
    let corners = bounds.corners();
    let mut mesh = SurfaceMesh::default();
    for face in BOX_FACES {
        let [c0, c1, c2, c3] = face.map(|i| corners[i as usize]);
        let mut points = Vec::with_capacity((cells + 1) * (cells + 1));
        for j in 0..=cells {
            let v = j as f32 / cells as f32;
            for i in 0..=cells {
                let u = i as f32 / cells as f32;
                // Bilinear patch over the quad c0 -> c1 -> c2 -> c3.
                let bottom = c0.lerp(c1, u);
                let top = c3.lerp(c2, u);
                points.push(bottom.lerp(top, v));
            }
        }
        let row = (cells + 1) as u32;
        let mut faces = Vec::new();
        for j in 0..cells as u32 {
            for i in 0..cells as u32 {
                let k = j * row + i;
                let (a, b, c, d) = (k, k + 1, k + row + 1, k + row);
                if quads {
                    faces.push(vec![a, b, c, d]);
                } else {
                    faces.push(vec![a, b, c]);
                    faces.push(vec![a, c, d]);
                }
            }
        }
        mesh.append(&SurfaceMesh::new(points, faces));
    }
    // Grid points on shared edges are computed from different corners.
    mesh.merge_points(bounds.length() * 1e-6);
    mesh
}

/// The eight corners of `bounds`, indexed as described on [`BOX_FACES`].
#[must_use]
pub fn box_corners(bounds: &Bounds) -> [Vec3; 8] {
    bounds.corners()
}

/// An axis-aligned box filling `bounds`, with faces in [`BOX_FACES`] order.
#[must_use]
pub fn box_from_bounds(bounds: &Bounds) -> SurfaceMesh {
    SurfaceMesh::new(
        box_corners(bounds).to_vec(),
        BOX_FACES.iter().map(|f| f.to_vec()).collect(),
    )
}

/// The unit cube centered at the origin.
#[must_use]
pub fn cube() -> SurfaceMesh {
    box_from_bounds(&Bounds::new(Vec3::splat(-0.5), Vec3::splat(0.5)))
}

/// A regular octahedron with its vertices on the axes at distance 0.5.
#[must_use]
pub fn octahedron() -> SurfaceMesh {
    let points = vec![
        Vec3::new(0.5, 0.0, 0.0),
        Vec3::new(-0.5, 0.0, 0.0),
        Vec3::new(0.0, 0.5, 0.0),
        Vec3::new(0.0, -0.5, 0.0),
        Vec3::new(0.0, 0.0, 0.5),
        Vec3::new(0.0, 0.0, -0.5),
    ];
    let (px, nx, py, ny, pz, nz) = (0, 1, 2, 3, 4, 5);
    let faces = vec![
        vec![px, py, pz],
        vec![py, nx, pz],
        vec![nx, ny, pz],
        vec![ny, px, pz],
        vec![py, px, nz],
        vec![nx, py, nz],
        vec![ny, nx, nz],
        vec![px, ny, nz],
    ];
    SurfaceMesh::new(points, faces)
}

//! Parametric geometry sources for vista-rs.
//!
//! - [`primitives`] canonical shapes centered at the origin, pointing along +z
//! - [`part`] normalized part templates and axis triads
//! - [`AxesGeometrySource`] six-part axes markers (shafts and tips)
//! - [`CubeSource`] and [`CubeFacesSource`] boxes and their individual faces
//! - [`PlaneSource`] and [`OrthogonalPlanesSource`] subdivided planes
//! - [`ConeSource`], [`CylinderSource`], [`SphereSource`], [`DiscSource`],
//!   [`PolygonSource`], [`ArrowSource`], [`SuperquadricSource`] and
//!   [`PlatonicSolidSource`] placed by center and direction
//! - [`BoxSource`], [`LineSource`] and [`MultipleLinesSource`]

// Documentation lints - internal functions don't need exhaustive panic/error docs
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::missing_errors_doc)]
// Builder patterns return Self which doesn't need must_use
#![allow(clippy::must_use_candidate)]
// Resolutions are usize and mesh indices u32
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::float_cmp)]

pub mod arrow;
pub mod axes;
pub mod cone;
pub mod cube;
pub mod cube_faces;
pub mod cylinder;
pub mod disc;
pub mod line;
pub mod orthogonal_planes;
pub mod part;
pub mod plane;
pub mod platonic;
pub mod polygon;
pub mod primitives;
pub mod sphere;
pub mod superquadric;

pub use arrow::{ArrowConfig, ArrowSource};
pub use axes::{AxesGeometryConfig, AxesGeometrySource, AxisLengths, AXES_PART_NAMES};
pub use cone::{ConeConfig, ConeSource};
pub use cube::{BoxSource, CubeSource};
pub use cube_faces::{expand_face_names, CubeFacesConfig, CubeFacesSource, DEFAULT_FACE_NAMES};
pub use cylinder::{CylinderConfig, CylinderSource};
pub use disc::{DiscConfig, DiscSource};
pub use line::{LineSource, MultipleLinesSource};
pub use orthogonal_planes::{
    NormalSign, OrthogonalPlanesConfig, OrthogonalPlanesSource, DEFAULT_PLANE_NAMES,
};
pub use part::{
    axis_triad, make_axis_triad, make_canonical, make_from_custom, make_part, normalize,
    GeometryKind, PartGeometry,
};
pub use plane::PlaneSource;
pub use platonic::{platonic_solid, PlatonicKind, PlatonicSolidSource};
pub use polygon::{PolygonConfig, PolygonSource};
pub use sphere::{SphereConfig, SphereSource};
pub use superquadric::{SuperquadricConfig, SuperquadricSource};

//! vista-rs: procedural 3D marker geometry and composite mesh utilities.
//!
//! vista generates small, oriented marker meshes (axes triads, exploded or
//! framed cube faces, orthogonal plane sets) as named multi-block composites,
//! and provides the mesh and composite operations needed to post-process them.
//!
//! # Quick Start
//!
//! ```
//! use vista::*;
//!
//! fn main() -> Result<()> {
//!     init_logging();
//!
//!     // Build axes with longer shafts and spherical tips
//!     let mut axes = AxesGeometrySource::new();
//!     axes.set_shaft_length([1.0, 2.0, 3.0])?;
//!     axes.set_tip_type(GeometryKind::Sphere)?;
//!
//!     let output = axes.output();
//!     assert_eq!(output.keys(), AXES_PART_NAMES.to_vec());
//!
//!     // Merge everything into one mesh
//!     let merged = output.combine(true, 1e-6)?;
//!     assert!(merged.n_faces() > 0);
//!     Ok(())
//! }
//! ```
//!
//! # Sources
//!
//! Every source implements [`GeometrySource`]: setters validate their input
//! and mark the source dirty, and [`GeometrySource::output`] regenerates the
//! parts and hands back an owned [`MultiBlock`].
//!
//! - [`AxesGeometrySource`] - shafts and tips for the x, y and z axes
//! - [`CubeFacesSource`] - the six faces of a box, optionally shrunk, exploded or framed
//! - [`OrthogonalPlanesSource`] - three planes perpendicular to x, y and z
//!
//! Single-mesh sources such as [`ConeSource`], [`ArrowSource`] or
//! [`SuperquadricSource`] take a validated `*Config` and return a
//! [`SurfaceMesh`] placed at a center along a direction.

// Re-export core types
pub use vista_core::{
    bounds::Bounds,
    error::{check_non_negative, check_range, Result, VistaError},
    filters::{NormalsOptions, DEFAULT_CORNER_FACTOR},
    mesh::SurfaceMesh,
    multiblock::{Block, MultiBlock},
    plane::Plane,
    source::GeometrySource,
    transform::{axis_angle_rotation, reflection, Transform},
    volume::{DataSet, VolumeCellType, VolumeMesh},
    Mat3, Mat4, Quat, Vec3,
};

// Re-export sources
pub use vista_sources::{
    platonic_solid, primitives, ArrowConfig, ArrowSource, AxesGeometryConfig, AxesGeometrySource,
    AxisLengths, BoxSource, ConeConfig, ConeSource, CubeFacesConfig, CubeFacesSource, CubeSource,
    CylinderConfig, CylinderSource, DiscConfig, DiscSource, GeometryKind, LineSource,
    MultipleLinesSource, NormalSign, OrthogonalPlanesConfig, OrthogonalPlanesSource, PartGeometry,
    PlaneSource, PlatonicKind, PlatonicSolidSource, PolygonConfig, PolygonSource, SphereConfig,
    SphereSource, SuperquadricConfig, SuperquadricSource, AXES_PART_NAMES,
};

/// Part-template helpers.
pub mod part {
    pub use vista_sources::part::*;
}

/// Initializes the `env_logger` backend for the `log` facade.
///
/// The level is read from `RUST_LOG`. Calling this more than once, or after
/// another logger was installed, has no effect.
pub fn init_logging() {
    if env_logger::try_init().is_ok() {
        log::debug!("vista-rs {} logging initialized", env!("CARGO_PKG_VERSION"));
    }
}

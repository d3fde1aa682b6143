//! Core data model for vista-rs.
//!
//! This crate provides the geometry types the parametric sources build on:
//! - [`SurfaceMesh`] polygonal meshes with transforms, normals and slicing
//! - [`VolumeMesh`] tetrahedral and hexahedral meshes, and the [`DataSet`] enum
//! - [`MultiBlock`] named, nested collections with composite filters
//! - [`GeometrySource`] the trait every source implements

// Documentation lints - internal functions don't need exhaustive panic/error docs
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::missing_errors_doc)]
// Builder patterns return Self which doesn't need must_use
#![allow(clippy::must_use_candidate)]
// Mesh indices are u32 and counts usize throughout
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_precision_loss)]
// Exact comparisons against zero are intentional in geometry predicates
#![allow(clippy::float_cmp)]

pub mod bounds;
pub mod error;
pub mod filters;
pub mod mesh;
pub mod multiblock;
pub mod plane;
pub mod source;
pub mod transform;
pub mod volume;

pub use bounds::Bounds;
pub use error::{check_non_negative, check_range, Result, VistaError};
pub use filters::{NormalsOptions, DEFAULT_CORNER_FACTOR};
pub use mesh::SurfaceMesh;
pub use multiblock::{Block, MultiBlock};
pub use plane::Plane;
pub use source::GeometrySource;
pub use transform::Transform;
pub use volume::{DataSet, VolumeCellType, VolumeMesh};

// Re-export glam types for convenience
pub use glam::{Mat3, Mat4, Quat, Vec3};

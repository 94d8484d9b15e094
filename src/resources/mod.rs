//! Mesh resources built from the reference configuration
//!
//! - SkinnedMesh: rigidly skinned triangle mesh with 16-bit indices
//! - BoundingBox: axis-aligned bounds
//! - CrossSectionExtruder: rings, side faces and end caps per element

pub mod extrusion;
pub mod mesh;

pub use extrusion::{CrossSectionExtruder, Extrusion};
pub use mesh::{BoundingBox, MAX_INDEXED, SkinnedMesh};

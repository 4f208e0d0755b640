//! Geometry generation for tolerance rings
//!
//! This crate turns part parameters into renderable and exportable geometry:
//! - Wave-perturbed outer boundary and bore profiles
//! - Constrained triangulation of profiles with holes
//! - Linear extrusion into closed triangle meshes
//! - Crease-edge overlays, grid and axes helpers

pub mod profile;
pub mod shape;
pub mod triangulate;
pub mod extrude;
pub mod edges;
pub mod helpers;
pub mod ring;

// Re-export commonly used items
pub use profile::*;
pub use shape::*;
pub use triangulate::*;
pub use extrude::*;
pub use edges::*;
pub use helpers::*;
pub use ring::*;

//! Core data structures and traits for ringcrate
//! 
//! This crate provides fundamental types for tolerance ring modelling,
//! including points, 2D profiles, meshes, line overlays, part parameters
//! and essential traits.

pub mod point;
pub mod profile;
pub mod mesh;
pub mod lines;
pub mod color;
pub mod params;
pub mod traits;
pub mod transform;
pub mod error;

pub use point::*;
pub use profile::*;
pub use mesh::*;
pub use lines::*;
pub use color::*;
pub use params::*;
pub use traits::*;
pub use transform::*;
pub use error::*;

/// Re-export commonly used types from nalgebra
pub use nalgebra::{Point2, Point3, Vector3, Matrix4, Isometry3, UnitQuaternion};

// Type aliases for easier imports
pub type Point = Point3f;
pub type Mesh = TriangleMesh;

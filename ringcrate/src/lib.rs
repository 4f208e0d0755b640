//! # ringcrate
//!
//! Procedural tolerance ring modelling, viewing and STL export.
//!
//! This is the umbrella crate that provides convenient access to all ringcrate functionality.
//! You can use this crate to get everything in one place, or use individual crates for
//! more granular control over dependencies.
//!
//! ## Features
//!
//! - **Core**: Part parameters, meshes, line sets, transforms and colors
//! - **Geometry**: Wavy ring profile, cap triangulation, extrusion and edge overlays
//! - **I/O**: STL (ASCII and binary) and OBJ export
//! - **Visualization**: Scene, camera, orbit controls and the embeddable viewer
//!
//! ## Quick Start
//!
//! ```rust
//! use ringcrate::prelude::*;
//!
//! let params = RingParams::default();
//! let ring = ToleranceRing::from_params(&params)?;
//! let stl = stl_ascii_string(&ring.world_mesh(), &params.part_id)?;
//! assert!(stl.starts_with("solid TR-25-12"));
//! # Ok::<(), ringcrate::Error>(())
//! ```
//!
//! ## Feature Flags
//!
//! - `default`: Enables geometry, io and visualization
//! - `geometry`: Profile generation, extrusion and helpers
//! - `io`: Mesh export
//! - `visualization`: The ring viewer (implies geometry and io)
//! - `all`: Enables all features

// Re-export core functionality
pub use ringcrate_core::*;

// Re-export sub-crates
#[cfg(feature = "geometry")]
pub use ringcrate_geometry as geometry;

#[cfg(feature = "io")]
pub use ringcrate_io as io;

#[cfg(feature = "visualization")]
pub use ringcrate_visualization as visualization;

/// Convenient imports for common use cases
pub mod prelude {
    pub use ringcrate_core::*;

    #[cfg(feature = "geometry")]
    pub use ringcrate_geometry::*;

    #[cfg(feature = "io")]
    pub use ringcrate_io::*;

    #[cfg(feature = "visualization")]
    pub use ringcrate_visualization::*;
}

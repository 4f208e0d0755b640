//! Visualization for tolerance rings
//!
//! This crate assembles the interactive ring viewer:
//! - Scene graph with lights, the ring solid, its edge overlay and helpers
//! - Perspective camera and orbit controls
//! - Renderer front-end over a pluggable backend
//! - Host page abstraction, loading placeholder and deferred start-up

pub mod config;
pub mod scene;
pub mod camera;
pub mod controls;
pub mod renderer;
pub mod host;
pub mod placeholder;
pub mod viewer;

pub use config::*;
pub use scene::*;
pub use camera::*;
pub use controls::*;
pub use renderer::*;
pub use host::*;
pub use placeholder::*;
pub use viewer::*;

//! I/O operations for meshes
//! 
//! This crate provides functionality to write tolerance ring meshes in the
//! formats downstream tools expect: ASCII and binary STL, and OBJ.

pub mod stl;
pub mod obj;
pub mod registry;
pub mod error;

pub use error::*;
pub use stl::{
    stl_ascii_string, stl_binary_bytes, write_stl_ascii, write_stl_binary, BinaryStlWriter,
    StlWriter,
};
pub use obj::{write_obj, ObjWriter};
pub use registry::{DynMeshWriter, WriterRegistry};

use ringcrate_core::{Result, TriangleMesh};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::info;

/// Trait for writing meshes to files
pub trait MeshWriter {
    fn write_mesh<P: AsRef<std::path::Path>>(mesh: &TriangleMesh, path: P) -> Result<()>;
}

/// Export layouts supported by `export_mesh`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ExportFormat {
    StlAscii,
    StlBinary,
    Obj,
}

impl ExportFormat {
    /// File extension written for this format
    pub fn extension(&self) -> &'static str {
        match self {
            ExportFormat::StlAscii | ExportFormat::StlBinary => "stl",
            ExportFormat::Obj => "obj",
        }
    }

    /// Registry key for this format
    fn registry_key(&self) -> &'static str {
        match self {
            ExportFormat::StlAscii => "stl",
            ExportFormat::StlBinary => "stlb",
            ExportFormat::Obj => "obj",
        }
    }
}

/// Reject meshes that cannot be written
pub(crate) fn validate_mesh(mesh: &TriangleMesh, format: &str) -> std::result::Result<(), IoError> {
    if mesh.is_empty() {
        return Err(IoError::InvalidMesh {
            format: format.to_string(),
            message: "mesh has no triangles".to_string(),
        });
    }
    if !mesh.indices_valid() {
        return Err(IoError::InvalidMesh {
            format: format.to_string(),
            message: format!("face index out of range (vertex count = {})", mesh.vertex_count()),
        });
    }
    Ok(())
}

/// Write a mesh in an explicit format
pub fn export_mesh<P: AsRef<Path>>(mesh: &TriangleMesh, path: P, format: ExportFormat) -> Result<()> {
    let path = path.as_ref();
    WriterRegistry::with_defaults().write_mesh(mesh, path, format.registry_key())?;
    info!(path = %path.display(), ?format, faces = mesh.face_count(), "exported mesh");
    Ok(())
}

/// Auto-detect format from the extension and write mesh
///
/// `.stl` is written as ASCII; use `export_mesh` for binary STL.
pub fn write_mesh<P: AsRef<Path>>(mesh: &TriangleMesh, path: P) -> Result<()> {
    let path = path.as_ref();
    match path.extension().and_then(|s| s.to_str()).map(str::to_lowercase).as_deref() {
        Some("stl") => export_mesh(mesh, path, ExportFormat::StlAscii),
        Some("obj") => export_mesh(mesh, path, ExportFormat::Obj),
        _ => Err(ringcrate_core::Error::UnsupportedFormat(
            format!("Unsupported mesh format: {:?}", path.extension())
        )),
    }
}

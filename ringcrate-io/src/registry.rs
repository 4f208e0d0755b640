//! Format registry for extension-driven export
//! 
//! This module provides a registry-based approach to writing meshes,
//! allowing callers to pick a writer by format name without knowing the
//! specific implementation details.

use crate::{obj, stl, MeshWriter};
use ringcrate_core::{Result, TriangleMesh};
use std::collections::HashMap;
use std::path::Path;

/// Object-safe mesh writer used by the registry
pub trait DynMeshWriter: Send + Sync {
    /// Write a mesh to the given path
    fn write_mesh(&self, mesh: &TriangleMesh, path: &Path) -> Result<()>;
    
    /// Get the format name this writer handles
    fn format_name(&self) -> &'static str;
}

/// Adapter from a static `MeshWriter` to `DynMeshWriter`
struct StaticWriter<W> {
    name: &'static str,
    _writer: std::marker::PhantomData<fn() -> W>,
}

impl<W: MeshWriter + 'static> StaticWriter<W> {
    fn boxed(name: &'static str) -> Box<dyn DynMeshWriter> {
        Box::new(Self {
            name,
            _writer: std::marker::PhantomData,
        })
    }
}

impl<W: MeshWriter> DynMeshWriter for StaticWriter<W> {
    fn write_mesh(&self, mesh: &TriangleMesh, path: &Path) -> Result<()> {
        W::write_mesh(mesh, path)
    }

    fn format_name(&self) -> &'static str {
        self.name
    }
}

/// Registry that maps format names to mesh writers
pub struct WriterRegistry {
    mesh_writers: HashMap<String, Box<dyn DynMeshWriter>>,
}

impl WriterRegistry {
    /// Create a new empty registry
    pub fn new() -> Self {
        Self {
            mesh_writers: HashMap::new(),
        }
    }
    
    /// Registry with the built-in writers: `stl`, `stlb` and `obj`
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        registry.register_mesh_writer("stl", StaticWriter::<stl::StlWriter>::boxed("stl"));
        registry.register_mesh_writer("stlb", StaticWriter::<stl::BinaryStlWriter>::boxed("stlb"));
        registry.register_mesh_writer("obj", StaticWriter::<obj::ObjWriter>::boxed("obj"));
        registry
    }
    
    /// Register a mesh writer for a specific format
    pub fn register_mesh_writer(&mut self, format: &str, writer: Box<dyn DynMeshWriter>) {
        self.mesh_writers.insert(format.to_lowercase(), writer);
    }
    
    /// Check whether a format has a writer
    pub fn supports(&self, format: &str) -> bool {
        self.mesh_writers.contains_key(&format.to_lowercase())
    }
    
    /// Registered format names, sorted
    pub fn formats(&self) -> Vec<&str> {
        let mut formats: Vec<&str> = self.mesh_writers.keys().map(String::as_str).collect();
        formats.sort_unstable();
        formats
    }
    
    /// Write a mesh using the writer registered for `format_hint`
    pub fn write_mesh(&self, mesh: &TriangleMesh, path: &Path, format_hint: &str) -> Result<()> {
        if let Some(writer) = self.mesh_writers.get(&format_hint.to_lowercase()) {
            return writer.write_mesh(mesh, path);
        }
        
        Err(ringcrate_core::Error::UnsupportedFormat(
            format!("No mesh writer found for format: {}", format_hint)
        ))
    }
}

impl Default for WriterRegistry {
    fn default() -> Self {
        Self::with_defaults()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_formats() {
        let registry = WriterRegistry::default();
        assert_eq!(registry.formats(), vec!["obj", "stl", "stlb"]);
        assert!(registry.supports("STL"));
        assert!(!registry.supports("ply"));
    }

    #[test]
    fn test_unknown_format() {
        let registry = WriterRegistry::new();
        let result = registry.write_mesh(&TriangleMesh::new(), Path::new("out.ply"), "ply");
        assert!(matches!(result, Err(ringcrate_core::Error::UnsupportedFormat(_))));
    }
}

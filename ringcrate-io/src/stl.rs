//! STL format support
//!
//! Both layouts are written from the face winding: each facet normal is the
//! normalised cross product of its first two edges.

use crate::error::IoError;
use crate::{validate_mesh, MeshWriter};
use ringcrate_core::{Result, TriangleMesh};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;
use tracing::debug;

/// Size of the binary STL header
pub const BINARY_HEADER_LEN: usize = 80;

/// Bytes per facet record in binary STL
pub const BINARY_FACET_LEN: usize = 50;

/// ASCII STL writer
pub struct StlWriter;

/// Binary STL writer
pub struct BinaryStlWriter;

/// Solid names must be a single token on the `solid` line
fn solid_name(name: &str) -> String {
    let cleaned: String = name
        .trim()
        .chars()
        .map(|c| if c.is_whitespace() { '_' } else { c })
        .collect();
    if cleaned.is_empty() {
        "exported".to_string()
    } else {
        cleaned
    }
}

/// Write `mesh` as ASCII STL
pub fn write_stl_ascii<W: Write>(mesh: &TriangleMesh, name: &str, writer: &mut W) -> Result<()> {
    validate_mesh(mesh, "STL")?;
    let name = solid_name(name);

    writeln!(writer, "solid {}", name)?;
    for (index, face) in mesh.faces.iter().enumerate() {
        let n = mesh.face_normal(index);
        writeln!(writer, "\tfacet normal {} {} {}", n.x, n.y, n.z)?;
        writeln!(writer, "\t\touter loop")?;
        for &vi in face {
            let v = mesh.vertices[vi];
            writeln!(writer, "\t\t\tvertex {} {} {}", v.x, v.y, v.z)?;
        }
        writeln!(writer, "\t\tendloop")?;
        writeln!(writer, "\tendfacet")?;
    }
    writeln!(writer, "endsolid {}", name)?;

    debug!(facets = mesh.face_count(), "wrote ASCII STL");
    Ok(())
}

/// Render `mesh` as an ASCII STL document
pub fn stl_ascii_string(mesh: &TriangleMesh, name: &str) -> Result<String> {
    let mut buffer = Vec::new();
    write_stl_ascii(mesh, name, &mut buffer)?;
    String::from_utf8(buffer).map_err(|e| {
        IoError::WriteError {
            message: format!("STL output is not UTF-8: {}", e),
        }
        .into()
    })
}

/// Write `mesh` as binary STL
///
/// Layout: 80-byte header holding `name` zero-padded, `u32` LE facet count,
/// then per facet a normal, three vertices (all `f32` LE) and a zero `u16`.
pub fn write_stl_binary<W: Write>(mesh: &TriangleMesh, name: &str, writer: &mut W) -> Result<()> {
    validate_mesh(mesh, "STL")?;
    let facet_count = u32::try_from(mesh.face_count()).map_err(|_| IoError::InvalidMesh {
        format: "STL".to_string(),
        message: format!("{} facets exceed the binary STL limit", mesh.face_count()),
    })?;

    let mut header = [0u8; BINARY_HEADER_LEN];
    let name_bytes = name.as_bytes();
    let len = name_bytes.len().min(BINARY_HEADER_LEN);
    header[..len].copy_from_slice(&name_bytes[..len]);
    writer.write_all(&header)?;
    writer.write_all(&facet_count.to_le_bytes())?;

    let mut record = [0u8; BINARY_FACET_LEN];
    for (index, face) in mesh.faces.iter().enumerate() {
        let n = mesh.face_normal(index);
        let mut floats = [n.x, n.y, n.z].into_iter().chain(face.iter().flat_map(|&vi| {
            let v = mesh.vertices[vi];
            [v.x, v.y, v.z]
        }));
        for chunk in record[..48].chunks_exact_mut(4) {
            chunk.copy_from_slice(&floats.next().unwrap_or(0.0).to_le_bytes());
        }
        // Attribute byte count stays zero
        record[48..].copy_from_slice(&0u16.to_le_bytes());
        writer.write_all(&record)?;
    }

    debug!(facets = facet_count, "wrote binary STL");
    Ok(())
}

/// Render `mesh` as binary STL bytes
pub fn stl_binary_bytes(mesh: &TriangleMesh, name: &str) -> Result<Vec<u8>> {
    let mut buffer = Vec::with_capacity(BINARY_HEADER_LEN + 4 + mesh.face_count() * BINARY_FACET_LEN);
    write_stl_binary(mesh, name, &mut buffer)?;
    Ok(buffer)
}

/// Solid name used when writing to a path: the file stem
fn name_from_path(path: &Path) -> String {
    path.file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("exported")
        .to_string()
}

impl MeshWriter for StlWriter {
    fn write_mesh<P: AsRef<Path>>(mesh: &TriangleMesh, path: P) -> Result<()> {
        let path = path.as_ref();
        let mut writer = BufWriter::new(File::create(path)?);
        write_stl_ascii(mesh, &name_from_path(path), &mut writer)?;
        writer.flush()?;
        Ok(())
    }
}

impl MeshWriter for BinaryStlWriter {
    fn write_mesh<P: AsRef<Path>>(mesh: &TriangleMesh, path: P) -> Result<()> {
        let path = path.as_ref();
        let mut writer = BufWriter::new(File::create(path)?);
        write_stl_binary(mesh, &name_from_path(path), &mut writer)?;
        writer.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use ringcrate_core::Point3f;

    fn single_triangle() -> TriangleMesh {
        TriangleMesh::from_vertices_and_faces(
            vec![
                Point3f::new(0.0, 0.0, 0.0),
                Point3f::new(1.0, 0.0, 0.0),
                Point3f::new(0.0, 1.0, 0.0),
            ],
            vec![[0, 1, 2]],
        )
    }

    #[test]
    fn test_ascii_layout() {
        let text = stl_ascii_string(&single_triangle(), "TR-1").unwrap();
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines.len(), 9);
        assert_eq!(lines[0], "solid TR-1");
        assert_eq!(lines[1], "\tfacet normal 0 0 1");
        assert_eq!(lines[2], "\t\touter loop");
        assert_eq!(lines[3], "\t\t\tvertex 0 0 0");
        assert_eq!(lines[4], "\t\t\tvertex 1 0 0");
        assert_eq!(lines[6], "\t\tendloop");
        assert_eq!(lines[7], "\tendfacet");
        assert_eq!(lines[8], "endsolid TR-1");
    }

    #[test]
    fn test_solid_name_is_one_token() {
        let text = stl_ascii_string(&single_triangle(), "ring part 7").unwrap();
        assert!(text.starts_with("solid ring_part_7\n"));
        let text = stl_ascii_string(&single_triangle(), "   ").unwrap();
        assert!(text.starts_with("solid exported\n"));
    }

    #[test]
    fn test_binary_layout() {
        let bytes = stl_binary_bytes(&single_triangle(), "TR-1").unwrap();
        assert_eq!(bytes.len(), 84 + 50);
        assert!(bytes.starts_with(b"TR-1"));
        assert!(bytes[4..80].iter().all(|&b| b == 0));
        assert_eq!(u32::from_le_bytes([bytes[80], bytes[81], bytes[82], bytes[83]]), 1);

        // Normal z component follows the three-float offset
        let nz = f32::from_le_bytes([bytes[92], bytes[93], bytes[94], bytes[95]]);
        assert_relative_eq!(nz, 1.0);
    }

    #[test]
    fn test_long_name_is_truncated() {
        let name = "x".repeat(200);
        let bytes = stl_binary_bytes(&single_triangle(), &name).unwrap();
        assert_eq!(bytes.len(), 134);
    }

    #[test]
    fn test_empty_mesh_is_rejected() {
        assert!(stl_ascii_string(&TriangleMesh::new(), "empty").is_err());
        assert!(stl_binary_bytes(&TriangleMesh::new(), "empty").is_err());
    }

    #[test]
    fn test_out_of_range_index_is_rejected() {
        let mut mesh = single_triangle();
        mesh.faces.push([0, 1, 9]);
        assert!(stl_ascii_string(&mesh, "bad").is_err());
    }
}

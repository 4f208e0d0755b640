//! OBJ format support

use crate::{validate_mesh, MeshWriter};
use ringcrate_core::{Result, TriangleMesh};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

pub struct ObjWriter;

/// Write `mesh` as Wavefront OBJ with 1-based indices
///
/// When the mesh carries vertex normals they are written as `vn` lines and
/// referenced from faces with the `v//vn` form.
pub fn write_obj<W: Write>(mesh: &TriangleMesh, name: &str, writer: &mut W) -> Result<()> {
    validate_mesh(mesh, "OBJ")?;

    writeln!(writer, "# ringcrate OBJ export")?;
    writeln!(writer, "o {}", name)?;
    for v in &mesh.vertices {
        writeln!(writer, "v {} {} {}", v.x, v.y, v.z)?;
    }

    match &mesh.normals {
        Some(normals) => {
            for n in normals {
                writeln!(writer, "vn {} {} {}", n.x, n.y, n.z)?;
            }
            for f in &mesh.faces {
                let (a, b, c) = (f[0] + 1, f[1] + 1, f[2] + 1);
                writeln!(writer, "f {a}//{a} {b}//{b} {c}//{c}")?;
            }
        }
        None => {
            for f in &mesh.faces {
                writeln!(writer, "f {} {} {}", f[0] + 1, f[1] + 1, f[2] + 1)?;
            }
        }
    }

    Ok(())
}

impl MeshWriter for ObjWriter {
    fn write_mesh<P: AsRef<Path>>(mesh: &TriangleMesh, path: P) -> Result<()> {
        let path = path.as_ref();
        let name = path.file_stem().and_then(|s| s.to_str()).unwrap_or("mesh");
        let mut writer = BufWriter::new(File::create(path)?);
        write_obj(mesh, name, &mut writer)?;
        writer.flush()?;
        Ok(())
    }
}

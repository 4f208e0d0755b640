//! Linear extrusion of planar shapes into closed solids

use crate::shape::Shape;
use crate::triangulate::triangulate_shape;
use ringcrate_core::{lift, Error, Polygon2, Result, TriangleMesh};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Configuration for extrusion
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExtrudeOptions {
    /// Distance swept along +Z
    pub depth: f32,
    /// Number of side-wall layers between the two caps
    pub steps: u32,
}

impl Default for ExtrudeOptions {
    fn default() -> Self {
        Self {
            depth: 1.0,
            steps: 1,
        }
    }
}

impl ExtrudeOptions {
    pub fn with_depth(depth: f32) -> Self {
        Self {
            depth,
            ..Default::default()
        }
    }

    pub fn validate(&self) -> Result<()> {
        if !self.depth.is_finite() || self.depth <= 0.0 {
            return Err(Error::InvalidData(format!(
                "Extrusion depth must be positive and finite, got {}",
                self.depth
            )));
        }
        if self.steps == 0 {
            return Err(Error::InvalidData("Extrusion needs at least one step".to_string()));
        }
        Ok(())
    }
}

/// Sweep `shape` from `z = 0` to `z = depth`
///
/// The result is closed and wound counter-clockwise seen from outside: the
/// bottom cap faces -Z, the top cap +Z and the walls point away from the
/// material. Cap vertices are shared with the first and last wall rings.
pub fn extrude_shape(shape: &Shape, options: &ExtrudeOptions) -> Result<TriangleMesh> {
    options.validate()?;
    let cap = triangulate_shape(shape)?;

    let layers = options.steps as usize + 1;
    let ring_size = cap.points.len();
    let mut mesh = TriangleMesh::new();
    mesh.vertices.reserve(ring_size * layers);

    // Layer-major vertex layout: layer `k` occupies `k * ring_size..`
    for k in 0..layers {
        let z = options.depth * k as f32 / options.steps as f32;
        for point in &cap.points {
            mesh.add_vertex(lift(point, z));
        }
    }

    let top = (layers - 1) * ring_size;
    for t in &cap.triangles {
        mesh.add_face([t[0], t[2], t[1]]);
    }
    for t in &cap.triangles {
        mesh.add_face([top + t[0], top + t[1], top + t[2]]);
    }

    let mut loop_start = 0;
    for polygon in shape.loops() {
        add_side_walls(&mut mesh, polygon, loop_start, ring_size, options.steps as usize);
        loop_start += polygon.len();
    }

    debug!(
        vertices = mesh.vertex_count(),
        faces = mesh.face_count(),
        depth = options.depth,
        "extruded shape"
    );

    Ok(mesh)
}

/// Quads between consecutive layers along one loop
///
/// Counter-clockwise outer loops and clockwise holes both produce walls
/// facing out of the material with the same index pattern.
fn add_side_walls(
    mesh: &mut TriangleMesh,
    polygon: &Polygon2,
    loop_start: usize,
    ring_size: usize,
    steps: usize,
) {
    let n = polygon.len();
    for k in 0..steps {
        let lower = k * ring_size + loop_start;
        let upper = (k + 1) * ring_size + loop_start;
        for i in 0..n {
            let j = (i + 1) % n;
            mesh.add_face([lower + i, lower + j, upper + j]);
            mesh.add_face([lower + i, upper + j, upper + i]);
        }
    }
}

//! Crease and boundary edge extraction for wireframe overlays

use itertools::Itertools;
use ringcrate_core::{LineSegments, Point3f, TriangleMesh, Vector3f};
use std::collections::HashMap;

/// Default crease angle, in degrees
pub const DEFAULT_EDGE_THRESHOLD_DEGREES: f32 = 1.0;

/// Positions are matched on a grid of this resolution
const QUANTIZE_SCALE: f32 = 1e4;

type VertexKey = (i64, i64, i64);

struct OpenEdge {
    start: Point3f,
    end: Point3f,
    normal: Vector3f,
}

fn quantize(p: &Point3f) -> VertexKey {
    (
        (p.x * QUANTIZE_SCALE).round() as i64,
        (p.y * QUANTIZE_SCALE).round() as i64,
        (p.z * QUANTIZE_SCALE).round() as i64,
    )
}

/// Collect the edges worth drawing on top of a shaded mesh
///
/// An edge is kept when only one face uses it, or when the normals of its
/// two faces differ by at least `threshold_degrees`. Vertices are matched by
/// position, so duplicated vertices along a seam do not hide edges.
pub fn edges_geometry(mesh: &TriangleMesh, threshold_degrees: f32) -> LineSegments {
    let threshold_dot = threshold_degrees.to_radians().cos();
    let mut open: HashMap<(VertexKey, VertexKey), OpenEdge> = HashMap::new();
    let mut lines = LineSegments::new();

    for (face_index, face) in mesh.faces.iter().enumerate() {
        let normal = mesh.face_normal(face_index);
        if normal == Vector3f::zeros() {
            continue;
        }

        for (&a, &b) in face.iter().circular_tuple_windows() {
            let start = mesh.vertices[a];
            let end = mesh.vertices[b];
            let key_a = quantize(&start);
            let key_b = quantize(&end);
            if key_a == key_b {
                continue;
            }

            match open.remove(&(key_b, key_a)) {
                Some(twin) => {
                    if normal.dot(&twin.normal) <= threshold_dot {
                        lines.push_segment(twin.start, twin.end, None);
                    }
                }
                None => {
                    open.insert((key_a, key_b), OpenEdge { start, end, normal });
                }
            }
        }
    }

    // Unmatched half-edges lie on the mesh boundary
    let mut boundary: Vec<_> = open.into_iter().collect();
    boundary.sort_by(|a, b| a.0.cmp(&b.0));
    for (_, edge) in boundary {
        lines.push_segment(edge.start, edge.end, None);
    }

    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extrude::{extrude_shape, ExtrudeOptions};
    use crate::shape::Shape;
    use ringcrate_core::{Point2f, Polygon2};

    fn unit_box() -> TriangleMesh {
        let square = Polygon2::new(vec![
            Point2f::new(0.0, 0.0),
            Point2f::new(1.0, 0.0),
            Point2f::new(1.0, 1.0),
            Point2f::new(0.0, 1.0),
        ]);
        extrude_shape(&Shape::solid(square), &ExtrudeOptions::default()).unwrap()
    }

    #[test]
    fn test_box_has_twelve_edges() {
        // Diagonals of the square faces are coplanar and dropped
        let lines = edges_geometry(&unit_box(), DEFAULT_EDGE_THRESHOLD_DEGREES);
        assert_eq!(lines.segment_count(), 12);
    }

    #[test]
    fn test_single_triangle_is_all_boundary() {
        let mesh = TriangleMesh::from_vertices_and_faces(
            vec![
                Point3f::new(0.0, 0.0, 0.0),
                Point3f::new(1.0, 0.0, 0.0),
                Point3f::new(0.0, 1.0, 0.0),
            ],
            vec![[0, 1, 2]],
        );
        assert_eq!(edges_geometry(&mesh, 1.0).segment_count(), 3);
    }

    #[test]
    fn test_large_threshold_keeps_only_boundary() {
        // Every box crease is 90°, so a 100° threshold removes them all
        let lines = edges_geometry(&unit_box(), 100.0);
        assert_eq!(lines.segment_count(), 0);
    }
}

//! Constrained Delaunay triangulation of shapes with holes
//!
//! Every loop edge is inserted as a constraint so the triangulation follows
//! the outline exactly; triangles are then kept or discarded by testing their
//! centroids against the loops.

use crate::shape::Shape;
use ringcrate_core::{Error, Point2f, Result};
use spade::{ConstrainedDelaunayTriangulation, Point2, Triangulation};
use std::collections::HashMap;
use tracing::debug;

/// Triangulated interior of a shape
#[derive(Debug, Clone)]
pub struct Triangulation2 {
    /// Loop vertices: outer loop first, then each hole in order
    pub points: Vec<Point2f>,
    /// Counter-clockwise triangles indexing into `points`
    pub triangles: Vec<[usize; 3]>,
}

impl Triangulation2 {
    /// Summed area of all triangles
    pub fn area(&self) -> f32 {
        self.triangles
            .iter()
            .map(|t| {
                let a = self.points[t[0]];
                let b = self.points[t[1]];
                let c = self.points[t[2]];
                ((b - a).perp(&(c - a))) * 0.5
            })
            .sum()
    }
}

/// Triangulate the region enclosed by the outer loop and outside every hole
pub fn triangulate_shape(shape: &Shape) -> Result<Triangulation2> {
    shape.validate()?;

    let mut cdt: ConstrainedDelaunayTriangulation<Point2<f64>> =
        ConstrainedDelaunayTriangulation::new();
    let mut points = Vec::with_capacity(shape.vertex_count());
    // spade vertex index -> our vertex index
    let mut index_map: HashMap<usize, usize> = HashMap::with_capacity(shape.vertex_count());
    let mut loop_handles = Vec::new();

    for polygon in shape.loops() {
        let mut handles = Vec::with_capacity(polygon.len());
        for point in &polygon.points {
            let handle = cdt
                .insert(Point2::new(point.x as f64, point.y as f64))
                .map_err(|e| Error::Algorithm(format!("Failed to insert profile point: {:?}", e)))?;
            if index_map.insert(handle.index(), points.len()).is_some() {
                return Err(Error::InvalidData(format!(
                    "Duplicate profile vertex at ({}, {})",
                    point.x, point.y
                )));
            }
            points.push(*point);
            handles.push(handle);
        }
        loop_handles.push(handles);
    }

    for handles in &loop_handles {
        let n = handles.len();
        for i in 0..n {
            let from = handles[i];
            let to = handles[(i + 1) % n];
            if !cdt.can_add_constraint(from, to) {
                return Err(Error::InvalidData(
                    "Profile loops intersect each other or themselves".to_string(),
                ));
            }
            cdt.add_constraint(from, to);
        }
    }

    let mut triangles = Vec::new();
    for face in cdt.inner_faces() {
        let vertices = face.vertices();
        let mut centroid = Point2f::origin();
        let mut indices = [0usize; 3];
        for (slot, vertex) in vertices.iter().enumerate() {
            let position = vertex.position();
            centroid.x += position.x as f32 / 3.0;
            centroid.y += position.y as f32 / 3.0;
            indices[slot] = *index_map.get(&vertex.fix().index()).ok_or_else(|| {
                Error::Algorithm("Triangle vertex does not belong to the profile".to_string())
            })?;
        }

        let inside = shape.outer.contains(&centroid)
            && !shape.holes.iter().any(|hole| hole.contains(&centroid));
        if inside {
            triangles.push(indices);
        }
    }

    debug!(
        points = points.len(),
        triangles = triangles.len(),
        "triangulated profile"
    );

    Ok(Triangulation2 { points, triangles })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::profile::{circle, outer_loop};
    use approx::assert_relative_eq;
    use ringcrate_core::Polygon2;

    #[test]
    fn test_square_triangulation() {
        let square = Polygon2::new(vec![
            Point2f::new(0.0, 0.0),
            Point2f::new(1.0, 0.0),
            Point2f::new(1.0, 1.0),
            Point2f::new(0.0, 1.0),
        ]);
        let tri = triangulate_shape(&Shape::solid(square)).unwrap();
        assert_eq!(tri.triangles.len(), 2);
        assert_relative_eq!(tri.area(), 1.0, epsilon = 1e-6);
    }

    #[test]
    fn test_annulus_area_and_orientation() {
        let shape = Shape::new(
            Polygon2::new(circle(2.0, 32)),
            vec![Polygon2::new(circle(1.0, 32))],
        );
        let tri = triangulate_shape(&shape).unwrap();

        assert_relative_eq!(tri.area(), shape.area(), epsilon = 1e-4);
        // An annulus with n + n boundary vertices triangulates into 2n triangles
        assert_eq!(tri.triangles.len(), 64);
        for t in &tri.triangles {
            let a = tri.points[t[0]];
            let b = tri.points[t[1]];
            let c = tri.points[t[2]];
            assert!((b - a).perp(&(c - a)) > 0.0, "triangle {:?} is not counter-clockwise", t);
        }
    }

    #[test]
    fn test_wavy_ring_profile() {
        let shape = Shape::new(
            outer_loop(14.0, 18),
            vec![Polygon2::new(circle(12.5, 64))],
        );
        let tri = triangulate_shape(&shape).unwrap();
        assert_relative_eq!(tri.area(), shape.area(), epsilon = 1e-2);
    }

    #[test]
    fn test_duplicate_vertex_is_rejected() {
        let polygon = Polygon2::new(vec![
            Point2f::new(0.0, 0.0),
            Point2f::new(1.0, 0.0),
            Point2f::new(1.0, 1.0),
            Point2f::new(1.0, 0.0),
            Point2f::new(0.0, 1.0),
        ]);
        assert!(triangulate_shape(&Shape::solid(polygon)).is_err());
    }
}

//! Mesh data structures and functionality

use crate::point::*;
use crate::transform::Transform3D;
use serde::{Deserialize, Serialize};

/// A triangle mesh with vertices and faces
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TriangleMesh {
    pub vertices: Vec<Point3f>,
    pub faces: Vec<[usize; 3]>,
    pub normals: Option<Vec<Vector3f>>,
    pub colors: Option<Vec<[u8; 3]>>,
}

impl TriangleMesh {
    /// Create a new empty mesh
    pub fn new() -> Self {
        Self {
            vertices: Vec::new(),
            faces: Vec::new(),
            normals: None,
            colors: None,
        }
    }

    /// Create a mesh from vertices and faces
    pub fn from_vertices_and_faces(vertices: Vec<Point3f>, faces: Vec<[usize; 3]>) -> Self {
        Self {
            vertices,
            faces,
            normals: None,
            colors: None,
        }
    }

    /// Get the number of vertices
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// Get the number of faces
    pub fn face_count(&self) -> usize {
        self.faces.len()
    }

    /// Check if the mesh is empty
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty() || self.faces.is_empty()
    }

    /// Add a vertex to the mesh
    pub fn add_vertex(&mut self, vertex: Point3f) -> usize {
        let index = self.vertices.len();
        self.vertices.push(vertex);
        index
    }

    /// Add a face to the mesh
    pub fn add_face(&mut self, face: [usize; 3]) {
        self.faces.push(face);
    }

    /// Check that every face index refers to an existing vertex
    pub fn indices_valid(&self) -> bool {
        let n = self.vertices.len();
        self.faces.iter().all(|f| f.iter().all(|&i| i < n))
    }

    /// Unit normal of a single face, following its winding
    ///
    /// Degenerate faces yield the zero vector.
    pub fn face_normal(&self, index: usize) -> Vector3f {
        let face = self.faces[index];
        let v0 = self.vertices[face[0]];
        let v1 = self.vertices[face[1]];
        let v2 = self.vertices[face[2]];

        let edge1 = v1 - v0;
        let edge2 = v2 - v0;

        edge1
            .cross(&edge2)
            .try_normalize(f32::EPSILON)
            .unwrap_or_else(Vector3f::zeros)
    }

    /// Calculate face normals
    pub fn calculate_face_normals(&self) -> Vec<Vector3f> {
        (0..self.faces.len()).map(|i| self.face_normal(i)).collect()
    }

    /// Total area of all faces
    pub fn surface_area(&self) -> f32 {
        self.faces
            .iter()
            .map(|face| {
                let v0 = self.vertices[face[0]];
                let v1 = self.vertices[face[1]];
                let v2 = self.vertices[face[2]];
                (v1 - v0).cross(&(v2 - v0)).norm() * 0.5
            })
            .sum()
    }

    /// Signed enclosed volume (divergence theorem)
    ///
    /// Positive for a closed mesh whose faces wind counter-clockwise seen
    /// from outside.
    pub fn signed_volume(&self) -> f32 {
        let sum: f64 = self
            .faces
            .iter()
            .map(|face| {
                let v0 = self.vertices[face[0]].coords.cast::<f64>();
                let v1 = self.vertices[face[1]].coords.cast::<f64>();
                let v2 = self.vertices[face[2]].coords.cast::<f64>();
                v0.dot(&v1.cross(&v2))
            })
            .sum();
        (sum / 6.0) as f32
    }

    /// Append another mesh, re-indexing its faces
    pub fn merge(&mut self, other: &TriangleMesh) {
        let offset = self.vertices.len();
        self.vertices.extend_from_slice(&other.vertices);
        self.faces.extend(
            other
                .faces
                .iter()
                .map(|f| [f[0] + offset, f[1] + offset, f[2] + offset]),
        );
        // Per-vertex attributes only survive if both sides carry them
        self.normals = match (self.normals.take(), &other.normals) {
            (Some(mut a), Some(b)) => {
                a.extend_from_slice(b);
                Some(a)
            }
            _ => None,
        };
        self.colors = match (self.colors.take(), &other.colors) {
            (Some(mut a), Some(b)) => {
                a.extend_from_slice(b);
                Some(a)
            }
            _ => None,
        };
    }

    /// A copy of this mesh with `transform` applied to positions and normals
    pub fn transformed(&self, transform: &Transform3D) -> TriangleMesh {
        let vertices = self
            .vertices
            .iter()
            .map(|v| transform.transform_point(v))
            .collect();
        let normals = self.normals.as_ref().map(|normals| {
            normals
                .iter()
                .map(|n| {
                    transform
                        .transform_normal(n)
                        .try_normalize(f32::EPSILON)
                        .unwrap_or(*n)
                })
                .collect()
        });
        TriangleMesh {
            vertices,
            faces: self.faces.clone(),
            normals,
            colors: self.colors.clone(),
        }
    }

    /// Set vertex normals
    pub fn set_normals(&mut self, normals: Vec<Vector3f>) {
        if normals.len() == self.vertices.len() {
            self.normals = Some(normals);
        }
    }

    /// Set vertex colors
    pub fn set_colors(&mut self, colors: Vec<[u8; 3]>) {
        if colors.len() == self.vertices.len() {
            self.colors = Some(colors);
        }
    }

    /// Clear the mesh
    pub fn clear(&mut self) {
        self.vertices.clear();
        self.faces.clear();
        self.normals = None;
        self.colors = None;
    }
}

impl Default for TriangleMesh {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    /// Unit cube with outward-facing winding
    fn unit_cube() -> TriangleMesh {
        let vertices = vec![
            Point3f::new(0.0, 0.0, 0.0),
            Point3f::new(1.0, 0.0, 0.0),
            Point3f::new(1.0, 1.0, 0.0),
            Point3f::new(0.0, 1.0, 0.0),
            Point3f::new(0.0, 0.0, 1.0),
            Point3f::new(1.0, 0.0, 1.0),
            Point3f::new(1.0, 1.0, 1.0),
            Point3f::new(0.0, 1.0, 1.0),
        ];
        let faces = vec![
            [0, 2, 1], [0, 3, 2], // bottom
            [4, 5, 6], [4, 6, 7], // top
            [0, 1, 5], [0, 5, 4], // front
            [1, 2, 6], [1, 6, 5], // right
            [2, 3, 7], [2, 7, 6], // back
            [3, 0, 4], [3, 4, 7], // left
        ];
        TriangleMesh::from_vertices_and_faces(vertices, faces)
    }

    #[test]
    fn test_cube_volume_and_area() {
        let cube = unit_cube();
        assert_relative_eq!(cube.signed_volume(), 1.0, epsilon = 1e-6);
        assert_relative_eq!(cube.surface_area(), 6.0, epsilon = 1e-6);
    }

    #[test]
    fn test_face_normal() {
        let cube = unit_cube();
        let n = cube.face_normal(2);
        assert_relative_eq!(n, Vector3f::new(0.0, 0.0, 1.0), epsilon = 1e-6);
    }

    #[test]
    fn test_merge_reindexes() {
        let mut a = unit_cube();
        let b = unit_cube();
        a.merge(&b);
        assert_eq!(a.vertex_count(), 16);
        assert_eq!(a.face_count(), 24);
        assert_eq!(a.faces[12], [8, 10, 9]);
        assert!(a.indices_valid());
        assert_relative_eq!(a.signed_volume(), 2.0, epsilon = 1e-5);
    }

    #[test]
    fn test_transformed_translation_keeps_volume() {
        let cube = unit_cube();
        let moved = cube.transformed(&Transform3D::translation(Vector3f::new(5.0, -2.0, 1.0)));
        assert_relative_eq!(moved.signed_volume(), 1.0, epsilon = 1e-4);
        assert_relative_eq!(moved.vertices[0], Point3f::new(5.0, -2.0, 1.0));
    }

    #[test]
    fn test_degenerate_face_normal_is_zero() {
        let mesh = TriangleMesh::from_vertices_and_faces(
            vec![Point3f::origin(), Point3f::new(1.0, 0.0, 0.0), Point3f::new(2.0, 0.0, 0.0)],
            vec![[0, 1, 2]],
        );
        assert_eq!(mesh.face_normal(0), Vector3f::zeros());
    }
}

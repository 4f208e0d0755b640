//! Core traits for ringcrate

use crate::{lines::LineSegments, mesh::TriangleMesh, point::*, transform::Transform3D};

/// Trait for drawable/renderable objects
pub trait Drawable {
    /// Get the bounding box of the object
    fn bounding_box(&self) -> (Point3f, Point3f);
    
    /// Get the center point of the object
    fn center(&self) -> Point3f {
        let (min, max) = self.bounding_box();
        nalgebra::center(&min, &max)
    }

    /// Radius of the sphere around `center` that encloses the bounding box
    fn bounding_radius(&self) -> f32 {
        let (min, max) = self.bounding_box();
        (max - min).norm() * 0.5
    }
}

/// Trait for objects that can be transformed
pub trait Transformable {
    /// Apply a transformation to the object
    fn transform(&mut self, transform: &Transform3D);
}

impl Drawable for TriangleMesh {
    fn bounding_box(&self) -> (Point3f, Point3f) {
        bounds(&self.vertices).unwrap_or((Point3f::origin(), Point3f::origin()))
    }
}

impl Drawable for LineSegments {
    fn bounding_box(&self) -> (Point3f, Point3f) {
        bounds(&self.points).unwrap_or((Point3f::origin(), Point3f::origin()))
    }
}

impl Transformable for TriangleMesh {
    fn transform(&mut self, transform: &Transform3D) {
        *self = self.transformed(transform);
    }
}

impl Transformable for LineSegments {
    fn transform(&mut self, transform: &Transform3D) {
        for point in &mut self.points {
            *point = transform.transform_point(point);
        }
    }
}

//! 3D transformation utilities

use nalgebra::{Point3, Vector3, Matrix3, Matrix4, Isometry3, UnitQuaternion};
use serde::{Deserialize, Serialize};

/// A 3D transformation that can be applied to points, meshes and scene nodes
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Transform3D {
    pub matrix: Matrix4<f32>,
}

impl Transform3D {
    /// Create an identity transformation
    pub fn identity() -> Self {
        Self {
            matrix: Matrix4::identity(),
        }
    }

    /// Create a translation transformation
    pub fn translation(translation: Vector3<f32>) -> Self {
        Self {
            matrix: Matrix4::new_translation(&translation),
        }
    }

    /// Create a rotation transformation from a quaternion
    pub fn rotation(rotation: UnitQuaternion<f32>) -> Self {
        Self {
            matrix: rotation.to_homogeneous(),
        }
    }

    /// Rotation about the X axis by `angle` radians
    pub fn rotation_x(angle: f32) -> Self {
        Self::rotation(UnitQuaternion::from_axis_angle(&Vector3::x_axis(), angle))
    }

    /// Create a uniform scaling transformation
    pub fn uniform_scaling(scale: f32) -> Self {
        Self {
            matrix: Matrix4::new_scaling(scale),
        }
    }

    /// Create a transformation from translation and rotation
    pub fn from_translation_rotation(
        translation: Vector3<f32>,
        rotation: UnitQuaternion<f32>,
    ) -> Self {
        let isometry = Isometry3::from_parts(translation.into(), rotation);
        Self {
            matrix: isometry.to_homogeneous(),
        }
    }

    /// Apply the transformation to a point
    pub fn transform_point(&self, point: &Point3<f32>) -> Point3<f32> {
        let homogeneous = self.matrix * point.to_homogeneous();
        Point3::from_homogeneous(homogeneous).unwrap_or(*point)
    }

    /// Apply the transformation to a vector
    pub fn transform_vector(&self, vector: &Vector3<f32>) -> Vector3<f32> {
        self.matrix.fixed_view::<3, 3>(0, 0) * vector
    }

    /// Apply the inverse-transpose of the linear part, as needed for normals
    pub fn transform_normal(&self, normal: &Vector3<f32>) -> Vector3<f32> {
        let linear: Matrix3<f32> = self.matrix.fixed_view::<3, 3>(0, 0).into_owned();
        match linear.try_inverse() {
            Some(inv) => inv.transpose() * normal,
            None => linear * normal,
        }
    }

    /// Compose this transformation with another
    pub fn compose(self, other: Self) -> Self {
        Self {
            matrix: self.matrix * other.matrix,
        }
    }

    /// Get the inverse transformation
    pub fn inverse(self) -> Option<Self> {
        self.matrix.try_inverse().map(|inv_matrix| Self {
            matrix: inv_matrix,
        })
    }

    /// Check if this is approximately the identity transformation
    pub fn is_identity(&self, epsilon: f32) -> bool {
        let identity = Matrix4::identity();
        (self.matrix - identity).norm() < epsilon
    }
}

impl Default for Transform3D {
    fn default() -> Self {
        Self::identity()
    }
}

impl std::ops::Mul for Transform3D {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self::Output {
        self.compose(rhs)
    }
}

impl From<Matrix4<f32>> for Transform3D {
    fn from(matrix: Matrix4<f32>) -> Self {
        Self { matrix }
    }
}

impl From<Isometry3<f32>> for Transform3D {
    fn from(isometry: Isometry3<f32>) -> Self {
        Self {
            matrix: isometry.to_homogeneous(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::f32::consts::FRAC_PI_2;

    #[test]
    fn test_rotation_x_turns_z_into_y() {
        // -90° about X stands a Z-extruded part upright
        let t = Transform3D::rotation_x(-FRAC_PI_2);
        let p = t.transform_point(&Point3::new(0.0, 0.0, 1.0));
        assert_relative_eq!(p, Point3::new(0.0, 1.0, 0.0), epsilon = 1e-6);
    }

    #[test]
    fn test_compose_applies_right_first() {
        let rotate = Transform3D::rotation_x(-FRAC_PI_2);
        let lift = Transform3D::translation(Vector3::new(0.0, 2.0, 0.0));
        let p = (lift * rotate).transform_point(&Point3::new(0.0, 0.0, 1.0));
        assert_relative_eq!(p, Point3::new(0.0, 3.0, 0.0), epsilon = 1e-6);
    }

    #[test]
    fn test_inverse_roundtrip() {
        let t = Transform3D::from_translation_rotation(
            Vector3::new(1.0, 2.0, 3.0),
            UnitQuaternion::from_axis_angle(&Vector3::y_axis(), 0.3),
        );
        let inv = t.inverse().unwrap();
        assert!((t * inv).is_identity(1e-5));
    }

    #[test]
    fn test_normal_under_nonuniform_scale() {
        let t = Transform3D::from(Matrix4::new_nonuniform_scaling(&Vector3::new(2.0, 1.0, 1.0)));
        let n = t.transform_normal(&Vector3::new(1.0, 1.0, 0.0));
        assert_relative_eq!(n, Vector3::new(0.5, 1.0, 0.0));
    }
}

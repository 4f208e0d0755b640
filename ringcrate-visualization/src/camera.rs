//! Camera utilities for 3D visualization

use nalgebra::{Matrix4, Perspective3, Point3, Vector3};
use serde::{Deserialize, Serialize};

/// A perspective camera looking at a target point
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Camera {
    pub position: Point3<f32>,
    pub target: Point3<f32>,
    pub up: Vector3<f32>,
    /// Vertical field of view in radians
    pub fov: f32,
    pub aspect_ratio: f32,
    pub near: f32,
    pub far: f32,
    /// Pose restored by `reset`
    home: (Point3<f32>, Point3<f32>),
}

impl Camera {
    /// Create a new camera
    pub fn new(
        position: Point3<f32>,
        target: Point3<f32>,
        up: Vector3<f32>,
        fov: f32,
        aspect_ratio: f32,
        near: f32,
        far: f32,
    ) -> Self {
        Self {
            position,
            target,
            up,
            fov,
            aspect_ratio,
            near,
            far,
            home: (position, target),
        }
    }

    /// Camera with a field of view given in degrees, looking at the origin
    pub fn perspective(fov_degrees: f32, aspect_ratio: f32, near: f32, far: f32) -> Self {
        Self::new(
            Point3::new(0.0, 0.0, 5.0),
            Point3::origin(),
            Vector3::y(),
            fov_degrees.to_radians(),
            aspect_ratio,
            near,
            far,
        )
    }

    /// Get the view matrix
    pub fn view_matrix(&self) -> Matrix4<f32> {
        Matrix4::look_at_rh(&self.position, &self.target, &self.up)
    }

    /// Get the projection matrix
    pub fn projection_matrix(&self) -> Matrix4<f32> {
        let perspective = Perspective3::new(self.aspect_ratio, self.fov, self.near, self.far);
        perspective.into_inner()
    }

    /// Projection times view
    pub fn view_projection(&self) -> Matrix4<f32> {
        self.projection_matrix() * self.view_matrix()
    }

    /// Match the aspect ratio to a viewport; a zero height is ignored
    pub fn set_aspect(&mut self, width: u32, height: u32) {
        if height == 0 {
            return;
        }
        self.aspect_ratio = width as f32 / height as f32;
    }

    pub fn look_at(&mut self, target: Point3<f32>) {
        self.target = target;
    }

    /// Unit vector from the camera towards its target
    pub fn forward(&self) -> Vector3<f32> {
        (self.target - self.position)
            .try_normalize(f32::EPSILON)
            .unwrap_or(-Vector3::z())
    }

    /// Unit vector pointing to screen right
    pub fn right(&self) -> Vector3<f32> {
        self.forward()
            .cross(&self.up)
            .try_normalize(f32::EPSILON)
            .unwrap_or(Vector3::x())
    }

    /// Unit vector pointing to screen up
    pub fn camera_up(&self) -> Vector3<f32> {
        self.right().cross(&self.forward())
    }

    pub fn distance_to_target(&self) -> f32 {
        (self.position - self.target).norm()
    }

    /// Place the camera on the `(1, 1, 1)` diagonal so a sphere fits the view
    ///
    /// The new pose also becomes the pose restored by `reset`.
    pub fn frame(&mut self, center: Point3<f32>, radius: f32) {
        let half_fov = (self.fov * 0.5).max(1e-3);
        let distance = (radius / half_fov.sin()).max(self.near * 2.0);
        let direction = Vector3::new(1.0, 1.0, 1.0).normalize();
        self.target = center;
        self.position = center + direction * distance;
        if self.far < distance + radius {
            self.far = (distance + radius) * 2.0;
        }
        self.home = (self.position, self.target);
    }

    /// Return to the initial (or last framed) pose
    pub fn reset(&mut self) {
        self.position = self.home.0;
        self.target = self.home.1;
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self::new(
            Point3::new(0.0, 0.0, 5.0),
            Point3::new(0.0, 0.0, 0.0),
            Vector3::new(0.0, 1.0, 0.0),
            std::f32::consts::FRAC_PI_4,
            16.0 / 9.0,
            0.1,
            100.0,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_set_aspect() {
        let mut camera = Camera::default();
        camera.set_aspect(1200, 600);
        assert_relative_eq!(camera.aspect_ratio, 2.0);

        camera.set_aspect(300, 0);
        assert_relative_eq!(camera.aspect_ratio, 2.0);
    }

    #[test]
    fn test_basis_is_orthonormal() {
        let mut camera = Camera::default();
        camera.position = Point3::new(3.0, 4.0, 5.0);
        let (f, r, u) = (camera.forward(), camera.right(), camera.camera_up());
        assert_relative_eq!(f.dot(&r), 0.0, epsilon = 1e-6);
        assert_relative_eq!(f.dot(&u), 0.0, epsilon = 1e-6);
        assert_relative_eq!(u.norm(), 1.0, epsilon = 1e-6);
        assert!(u.y > 0.0);
    }

    #[test]
    fn test_frame_and_reset() {
        let mut camera = Camera::perspective(45.0, 1.0, 0.1, 1000.0);
        let center = Point3::new(0.0, 6.0, 0.0);
        camera.frame(center, 15.0);
        assert_eq!(camera.target, center);
        let framed = camera.position;
        assert!(camera.distance_to_target() > 15.0);

        camera.position = Point3::new(1.0, 2.0, 3.0);
        camera.look_at(Point3::origin());
        camera.reset();
        assert_eq!(camera.position, framed);
        assert_eq!(camera.target, center);
    }

    #[test]
    fn test_target_projects_to_screen_center() {
        let mut camera = Camera::perspective(45.0, 1.5, 0.1, 100.0);
        camera.position = Point3::new(4.0, 3.0, 8.0);
        camera.target = Point3::new(1.0, 0.5, -1.0);
        let clip = camera.view_projection() * camera.target.to_homogeneous();
        assert_relative_eq!(clip.x / clip.w, 0.0, epsilon = 1e-5);
        assert_relative_eq!(clip.y / clip.w, 0.0, epsilon = 1e-5);
    }
}

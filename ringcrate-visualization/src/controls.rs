//! Orbit controls: rotate, dolly and pan a camera around a target
//!
//! Input handlers only accumulate deltas; `update` applies them to the
//! camera once per frame. With damping enabled each update applies a fraction
//! of the pending motion and keeps the rest, which gives a smooth ease-out.

use crate::camera::Camera;
use nalgebra::{Point3, Vector3};
use std::f32::consts::{PI, TAU};

/// Keeps the polar angle away from the poles so the view matrix stays defined
const POLE_EPSILON: f32 = 1e-6;

/// Movement below this is treated as no change
const CHANGE_EPSILON: f32 = 1e-6;

/// Which pointer button started a drag
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerButton {
    Primary,
    Secondary,
    Middle,
}

/// What the current drag does
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlState {
    None,
    Rotate,
    Dolly,
    Pan,
}

/// Spherical offset of the camera from its target, +Y up
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Spherical {
    pub radius: f32,
    /// Polar angle from +Y
    pub phi: f32,
    /// Azimuth from +Z towards +X
    pub theta: f32,
}

impl Spherical {
    pub fn from_offset(offset: &Vector3<f32>) -> Self {
        let radius = offset.norm();
        if radius == 0.0 {
            return Self { radius: 0.0, phi: 0.0, theta: 0.0 };
        }
        Self {
            radius,
            theta: offset.x.atan2(offset.z),
            phi: (offset.y / radius).clamp(-1.0, 1.0).acos(),
        }
    }

    pub fn to_offset(&self) -> Vector3<f32> {
        let sin_phi_radius = self.phi.sin() * self.radius;
        Vector3::new(
            sin_phi_radius * self.theta.sin(),
            self.phi.cos() * self.radius,
            sin_phi_radius * self.theta.cos(),
        )
    }

    pub fn make_safe(&mut self) {
        self.phi = self.phi.clamp(POLE_EPSILON, PI - POLE_EPSILON);
    }
}

/// Mouse-style orbit navigation around `target`
#[derive(Debug, Clone)]
pub struct OrbitControls {
    pub target: Point3<f32>,
    pub enabled: bool,
    pub enable_damping: bool,
    pub damping_factor: f32,
    pub enable_zoom: bool,
    pub zoom_speed: f32,
    pub enable_rotate: bool,
    pub rotate_speed: f32,
    pub enable_pan: bool,
    pub pan_speed: f32,
    pub auto_rotate: bool,
    /// Full turns per minute at 60 updates per second is `auto_rotate_speed / 2`
    pub auto_rotate_speed: f32,
    pub min_distance: f32,
    pub max_distance: f32,
    pub min_polar_angle: f32,
    pub max_polar_angle: f32,

    state: ControlState,
    spherical_delta: (f32, f32),
    scale: f32,
    pan_offset: Vector3<f32>,
    pointer: Option<(f32, f32)>,
    home_target: Point3<f32>,
}

impl OrbitControls {
    /// Controls orbiting around the camera's current target
    pub fn new(camera: &Camera) -> Self {
        Self {
            target: camera.target,
            enabled: true,
            enable_damping: false,
            damping_factor: 0.05,
            enable_zoom: true,
            zoom_speed: 1.0,
            enable_rotate: true,
            rotate_speed: 1.0,
            enable_pan: true,
            pan_speed: 1.0,
            auto_rotate: false,
            auto_rotate_speed: 2.0,
            min_distance: 0.0,
            max_distance: f32::INFINITY,
            min_polar_angle: 0.0,
            max_polar_angle: PI,
            state: ControlState::None,
            spherical_delta: (0.0, 0.0),
            scale: 1.0,
            pan_offset: Vector3::zeros(),
            pointer: None,
            home_target: camera.target,
        }
    }

    pub fn state(&self) -> ControlState {
        self.state
    }

    /// Queue a rotation around the vertical axis
    pub fn rotate_left(&mut self, angle: f32) {
        self.spherical_delta.1 -= angle;
    }

    /// Queue a change of the polar angle
    pub fn rotate_up(&mut self, angle: f32) {
        self.spherical_delta.0 -= angle;
    }

    /// Multiply the orbit radius by `dolly_scale`; below 1 moves closer
    pub fn dolly_in(&mut self, dolly_scale: f32) {
        if dolly_scale > 0.0 {
            self.scale *= dolly_scale;
        }
    }

    /// Divide the orbit radius by `dolly_scale`
    pub fn dolly_out(&mut self, dolly_scale: f32) {
        if dolly_scale > 0.0 {
            self.scale /= dolly_scale;
        }
    }

    fn zoom_scale(&self) -> f32 {
        0.95f32.powf(self.zoom_speed)
    }

    /// Queue a screen-space pan of `(dx, dy)` pixels
    ///
    /// The distance is scaled so the point under the cursor at the target
    /// depth follows the pointer.
    pub fn pan(&mut self, camera: &Camera, dx: f32, dy: f32, viewport_height: f32) {
        if viewport_height <= 0.0 {
            return;
        }
        let target_distance = (camera.position - self.target).norm() * (camera.fov * 0.5).tan();
        let left = 2.0 * dx * target_distance / viewport_height * self.pan_speed;
        let up = 2.0 * dy * target_distance / viewport_height * self.pan_speed;
        self.pan_offset += -camera.right() * left + camera.camera_up() * up;
    }

    /// Start a drag: primary rotates, middle dollies, secondary pans
    pub fn pointer_down(&mut self, button: PointerButton, x: f32, y: f32) {
        if !self.enabled {
            return;
        }
        self.state = match button {
            PointerButton::Primary if self.enable_rotate => ControlState::Rotate,
            PointerButton::Middle if self.enable_zoom => ControlState::Dolly,
            PointerButton::Secondary if self.enable_pan => ControlState::Pan,
            _ => ControlState::None,
        };
        self.pointer = Some((x, y));
    }

    /// Continue a drag inside a `viewport` of `(width, height)` pixels
    pub fn pointer_move(&mut self, camera: &Camera, x: f32, y: f32, viewport: (f32, f32)) {
        if !self.enabled {
            return;
        }
        let Some((last_x, last_y)) = self.pointer else {
            return;
        };
        let (dx, dy) = (x - last_x, y - last_y);
        let height = viewport.1.max(1.0);

        match self.state {
            ControlState::Rotate => {
                self.rotate_left(TAU * dx / height * self.rotate_speed);
                self.rotate_up(TAU * dy / height * self.rotate_speed);
            }
            ControlState::Dolly => {
                if dy > 0.0 {
                    self.dolly_out(self.zoom_scale());
                } else if dy < 0.0 {
                    self.dolly_in(self.zoom_scale());
                }
            }
            ControlState::Pan => self.pan(camera, dx, dy, height),
            ControlState::None => {}
        }
        self.pointer = Some((x, y));
    }

    pub fn pointer_up(&mut self) {
        self.state = ControlState::None;
        self.pointer = None;
    }

    /// Scroll wheel: negative `delta_y` zooms in
    pub fn wheel(&mut self, delta_y: f32) {
        if !self.enabled || !self.enable_zoom {
            return;
        }
        if delta_y < 0.0 {
            self.dolly_in(self.zoom_scale());
        } else if delta_y > 0.0 {
            self.dolly_out(self.zoom_scale());
        }
    }

    fn auto_rotation_angle(&self) -> f32 {
        TAU / 60.0 / 60.0 * self.auto_rotate_speed
    }

    /// Apply pending motion to `camera`; returns whether it moved
    pub fn update(&mut self, camera: &mut Camera) -> bool {
        let old_position = camera.position;
        let old_target = self.target;

        if self.auto_rotate && self.state == ControlState::None {
            self.rotate_left(self.auto_rotation_angle());
        }

        let offset = camera.position - self.target;
        let mut spherical = Spherical::from_offset(&offset);

        let (delta_phi, delta_theta) = self.spherical_delta;
        if self.enable_damping {
            spherical.theta += delta_theta * self.damping_factor;
            spherical.phi += delta_phi * self.damping_factor;
        } else {
            spherical.theta += delta_theta;
            spherical.phi += delta_phi;
        }

        spherical.phi = spherical.phi.clamp(self.min_polar_angle, self.max_polar_angle);
        spherical.make_safe();

        spherical.radius = (spherical.radius * self.scale).clamp(self.min_distance, self.max_distance);

        if self.enable_damping {
            self.target += self.pan_offset * self.damping_factor;
        } else {
            self.target += self.pan_offset;
        }

        camera.position = self.target + spherical.to_offset();
        camera.look_at(self.target);

        if self.enable_damping {
            let keep = 1.0 - self.damping_factor;
            self.spherical_delta.0 *= keep;
            self.spherical_delta.1 *= keep;
            self.pan_offset *= keep;
        } else {
            self.spherical_delta = (0.0, 0.0);
            self.pan_offset = Vector3::zeros();
        }
        self.scale = 1.0;

        (camera.position - old_position).norm_squared() > CHANGE_EPSILON
            || (self.target - old_target).norm_squared() > CHANGE_EPSILON
    }

    /// Drop pending motion and restore the camera's home pose
    pub fn reset(&mut self, camera: &mut Camera) {
        camera.reset();
        self.target = camera.target;
        self.home_target = camera.target;
        self.spherical_delta = (0.0, 0.0);
        self.pan_offset = Vector3::zeros();
        self.scale = 1.0;
        self.state = ControlState::None;
        self.pointer = None;
    }

    /// Target the controls were created or last reset with
    pub fn home_target(&self) -> Point3<f32> {
        self.home_target
    }
}

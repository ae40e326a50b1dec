/// Perspective camera looking at a target point.
///
/// Unlike a passive matrix container, this camera derives its matrices
/// from position, target and lens parameters, and supports orbiting
/// around a center for interactive control.

use glam::{Mat4, Quat, Vec2, Vec3};
use crate::camera::{Projector, ViewCamera};

/// Pitch limit that keeps the view direction away from the up axis
const MAX_PITCH_DEGREES: f32 = 89.0;

#[derive(Debug, Clone, PartialEq)]
pub struct PerspectiveCamera {
    position: Vec3,
    target: Vec3,
    fov_y_degrees: f32,
    aspect_ratio: f32,
    near: f32,
    far: f32,
}

impl PerspectiveCamera {
    pub const DEFAULT_FOV_Y_DEGREES: f32 = 45.0;
    pub const DEFAULT_NEAR: f32 = 0.1;
    pub const DEFAULT_FAR: f32 = 500.0;

    /// Camera at (0, 10, 50) looking at the origin
    pub fn new(aspect_ratio: f32) -> Self {
        Self {
            position: Vec3::new(0.0, 10.0, 50.0),
            target: Vec3::ZERO,
            fov_y_degrees: Self::DEFAULT_FOV_Y_DEGREES,
            aspect_ratio: sanitize_aspect(aspect_ratio, 1.0),
            near: Self::DEFAULT_NEAR,
            far: Self::DEFAULT_FAR,
        }
    }

    pub fn with_clip_planes(mut self, near: f32, far: f32) -> Self {
        if near > 0.0 && far > near {
            self.near = near;
            self.far = far;
        }
        self
    }

    pub fn position(&self) -> Vec3 {
        self.position
    }

    pub fn target(&self) -> Vec3 {
        self.target
    }

    pub fn aspect_ratio(&self) -> f32 {
        self.aspect_ratio
    }

    pub fn fov_y_degrees(&self) -> f32 {
        self.fov_y_degrees
    }

    pub fn set_position(&mut self, position: Vec3) {
        self.position = position;
    }

    pub fn look_at(&mut self, target: Vec3) {
        self.target = target;
    }

    /// Rotate the camera around `center`
    ///
    /// `angles_degrees.x` turns around the world up axis, `angles_degrees.y`
    /// tilts around the camera's right axis. The camera keeps looking at
    /// `center` and its distance to it.
    pub fn orbit(&mut self, angles_degrees: Vec2, center: Vec3) {
        let offset = self.position - center;
        let distance = offset.length();
        if distance <= f32::EPSILON {
            return;
        }

        let direction = offset / distance;
        let current_pitch = direction.y.clamp(-1.0, 1.0).asin().to_degrees();
        let pitch = (current_pitch + angles_degrees.y).clamp(-MAX_PITCH_DEGREES, MAX_PITCH_DEGREES)
            - current_pitch;

        let yaw_rotation = Quat::from_axis_angle(Vec3::Y, angles_degrees.x.to_radians());
        let right = Vec3::Y.cross(direction).try_normalize().unwrap_or(Vec3::X);
        let pitch_rotation = Quat::from_axis_angle(right, -pitch.to_radians());

        self.position = center + yaw_rotation * (pitch_rotation * offset);
        self.target = center;
    }
}

impl Default for PerspectiveCamera {
    fn default() -> Self {
        Self::new(1.0)
    }
}

impl Projector for PerspectiveCamera {
    fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.position, self.target, Vec3::Y)
    }

    fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh(self.fov_y_degrees.to_radians(), self.aspect_ratio, self.near, self.far)
    }

    fn near(&self) -> f32 {
        self.near
    }

    fn far(&self) -> f32 {
        self.far
    }
}

impl ViewCamera for PerspectiveCamera {
    fn set_aspect_ratio(&mut self, aspect_ratio: f32) {
        self.aspect_ratio = sanitize_aspect(aspect_ratio, self.aspect_ratio);
    }
}

fn sanitize_aspect(aspect_ratio: f32, fallback: f32) -> f32 {
    if aspect_ratio.is_finite() && aspect_ratio > 0.0 {
        aspect_ratio
    } else {
        fallback
    }
}

#[cfg(test)]
#[path = "perspective_camera_tests.rs"]
mod tests;

/// Spot light: the shadow-casting light source.

use glam::{Mat4, Vec3};
use crate::camera::{LightSource, Projector};

#[derive(Debug, Clone, PartialEq)]
pub struct SpotLight {
    position: Vec3,
    target: Vec3,
    color: Vec3,
    intensity: f32,
    cone_degrees: f32,
    near: f32,
    far: f32,
}

impl SpotLight {
    /// White light at (25, 40, 30) aimed at the origin
    pub fn new() -> Self {
        Self {
            position: Vec3::new(25.0, 40.0, 30.0),
            target: Vec3::ZERO,
            color: Vec3::ONE,
            intensity: 1.0,
            cone_degrees: 60.0,
            near: 1.0,
            far: 200.0,
        }
    }

    pub fn with_color(mut self, color: Vec3, intensity: f32) -> Self {
        self.color = color;
        self.intensity = intensity.max(0.0);
        self
    }

    pub fn set_position(&mut self, position: Vec3) {
        self.position = position;
    }

    pub fn look_at(&mut self, target: Vec3) {
        self.target = target;
    }

    pub fn target(&self) -> Vec3 {
        self.target
    }

    pub fn cone_degrees(&self) -> f32 {
        self.cone_degrees
    }
}

impl Default for SpotLight {
    fn default() -> Self {
        Self::new()
    }
}

impl Projector for SpotLight {
    fn view_matrix(&self) -> Mat4 {
        // Fall back to Z up when looking straight down the Y axis
        let forward = (self.target - self.position).normalize_or_zero();
        let up = if forward.cross(Vec3::Y).length_squared() < 1e-6 { Vec3::Z } else { Vec3::Y };
        Mat4::look_at_rh(self.position, self.target, up)
    }

    /// Square frustum matching the square shadow map
    fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh(self.cone_degrees.to_radians(), 1.0, self.near, self.far)
    }

    fn near(&self) -> f32 {
        self.near
    }

    fn far(&self) -> f32 {
        self.far
    }
}

impl LightSource for SpotLight {
    fn position(&self) -> Vec3 {
        self.position
    }

    fn color(&self) -> Vec3 {
        self.color
    }

    fn intensity(&self) -> f32 {
        self.intensity
    }
}

#[cfg(test)]
#[path = "spot_light_tests.rs"]
mod tests;

/// Per-frame DoF parameters and the reference math.

use glam::Vec4;
use crate::render_graph::UniformValue;

/// Uniform names of the DoF program
pub(crate) const FOCUS_DISTANCE: &str = "focus_distance";
pub(crate) const FOCUS_RANGE: &str = "focus_range";
pub(crate) const NEAR_PLANE: &str = "near_plane";
pub(crate) const FAR_PLANE: &str = "far_plane";
pub(crate) const DEBUG_DEPTH: &str = "debug_depth";

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DofParams {
    pub focus_distance: f32,
    pub focus_range: f32,
    pub near_plane: f32,
    pub far_plane: f32,
    pub debug_depth: bool,
}

impl DofParams {
    /// Eye-space distance of a stored depth value `d` in [0, 1]
    ///
    /// `d = 0` maps to the near plane and `d = 1` to the far plane.
    pub fn linearize_depth(&self, depth: f32) -> f32 {
        let (n, f) = (self.near_plane, self.far_plane);
        let d = depth.clamp(0.0, 1.0);
        n * f / (f - d * (f - n))
    }

    /// Blur amount at eye distance `linear`: 0 in focus, 1 fully blurred
    pub fn blur_weight(&self, linear: f32) -> f32 {
        ((linear - self.focus_distance).abs() / self.focus_range).clamp(0.0, 1.0)
    }

    /// Final pixel color for a sample with stored depth `depth`
    pub fn shade(&self, sharp: Vec4, blurred: Vec4, depth: f32) -> Vec4 {
        let linear = self.linearize_depth(depth);
        if self.debug_depth {
            let v = (linear / self.far_plane).clamp(0.0, 1.0);
            return Vec4::new(v, v, v, 1.0);
        }
        sharp.lerp(blurred, self.blur_weight(linear))
    }

    /// Named uniform values of the DoF program
    pub fn uniforms(&self) -> [(&'static str, UniformValue); 5] {
        [
            (FOCUS_DISTANCE, UniformValue::Float(self.focus_distance)),
            (FOCUS_RANGE, UniformValue::Float(self.focus_range)),
            (NEAR_PLANE, UniformValue::Float(self.near_plane)),
            (FAR_PLANE, UniformValue::Float(self.far_plane)),
            (DEBUG_DEPTH, UniformValue::Int(self.debug_depth as i32)),
        ]
    }
}

#[cfg(test)]
#[path = "params_tests.rs"]
mod tests;

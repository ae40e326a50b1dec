/// Interactive focus settings.
///
/// Values outside the allowed ranges are clamped, never rejected. Every
/// change is reported through the engine logger.

use crate::camera::Projector;
use crate::dof::DofParams;
use crate::engine_info;

const SOURCE: &str = "penumbra::Dof";

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DofSettings {
    focus_distance: f32,
    focus_range: f32,
    debug_depth: bool,
}

impl DofSettings {
    pub const FOCUS_DISTANCE_MIN: f32 = 5.0;
    pub const FOCUS_DISTANCE_MAX: f32 = 100.0;
    pub const FOCUS_DISTANCE_STEP: f32 = 5.0;
    pub const FOCUS_DISTANCE_DEFAULT: f32 = 50.0;

    pub const FOCUS_RANGE_MIN: f32 = 2.0;
    pub const FOCUS_RANGE_MAX: f32 = 50.0;
    pub const FOCUS_RANGE_STEP: f32 = 2.0;
    pub const FOCUS_RANGE_DEFAULT: f32 = 10.0;

    pub fn new() -> Self {
        Self {
            focus_distance: Self::FOCUS_DISTANCE_DEFAULT,
            focus_range: Self::FOCUS_RANGE_DEFAULT,
            debug_depth: false,
        }
    }

    /// Distance to the sharp plane, in world units
    pub fn focus_distance(&self) -> f32 {
        self.focus_distance
    }

    /// Distance from the sharp plane at which blur is full
    pub fn focus_range(&self) -> f32 {
        self.focus_range
    }

    pub fn debug_depth(&self) -> bool {
        self.debug_depth
    }

    /// Set the focus distance, clamped to its range. Non-finite input is ignored.
    pub fn set_focus_distance(&mut self, value: f32) {
        if !value.is_finite() {
            return;
        }
        self.focus_distance = value.clamp(Self::FOCUS_DISTANCE_MIN, Self::FOCUS_DISTANCE_MAX);
        engine_info!(SOURCE, "Focus Distance: {}", self.focus_distance);
    }

    /// Set the focus range, clamped to its range. Non-finite input is ignored.
    pub fn set_focus_range(&mut self, value: f32) {
        if !value.is_finite() {
            return;
        }
        self.focus_range = value.clamp(Self::FOCUS_RANGE_MIN, Self::FOCUS_RANGE_MAX);
        engine_info!(SOURCE, "Focus Range: {}", self.focus_range);
    }

    /// Move the focus distance by `steps` increments (negative moves closer)
    pub fn adjust_focus_distance(&mut self, steps: i32) {
        self.set_focus_distance(self.focus_distance + steps as f32 * Self::FOCUS_DISTANCE_STEP);
    }

    /// Widen or narrow the focus range by `steps` increments
    pub fn adjust_focus_range(&mut self, steps: i32) {
        self.set_focus_range(self.focus_range + steps as f32 * Self::FOCUS_RANGE_STEP);
    }

    pub fn toggle_debug_depth(&mut self) {
        self.debug_depth = !self.debug_depth;
        engine_info!(SOURCE, "Depth Debug: {}", if self.debug_depth { "ON" } else { "OFF" });
    }

    /// Parameters for one frame seen through `camera`
    pub fn params(&self, camera: &dyn Projector) -> DofParams {
        DofParams {
            focus_distance: self.focus_distance,
            focus_range: self.focus_range,
            near_plane: camera.near(),
            far_plane: camera.far(),
            debug_depth: self.debug_depth,
        }
    }
}

impl Default for DofSettings {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
#[path = "settings_tests.rs"]
mod tests;

//! Runtime controls for the DoF demo camera.
//!
//! Keyboard: Q/E focus distance, Z/C focus range, D depth debug view,
//! Enter camera reset. Left-drag orbits the camera around the scene
//! center.

use glam::{Vec2, Vec3};
use rustc_hash::FxHashMap;
use winit::event::{ElementState, MouseButton, WindowEvent};
use winit::keyboard::{KeyCode, PhysicalKey};

use crate::camera::PerspectiveCamera;
use crate::dof::DofSettings;
use crate::engine_info;

const SOURCE: &str = "penumbra::Controls";

/// What a key press does
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ControlAction {
    FocusCloser,
    FocusFarther,
    NarrowFocusRange,
    WidenFocusRange,
    ToggleDepthDebug,
    ResetCamera,
}

impl ControlAction {
    fn description(&self) -> &'static str {
        match self {
            ControlAction::FocusCloser => "decrease focus distance",
            ControlAction::FocusFarther => "increase focus distance",
            ControlAction::NarrowFocusRange => "decrease focus range",
            ControlAction::WidenFocusRange => "increase focus range",
            ControlAction::ToggleDepthDebug => "toggle depth debug",
            ControlAction::ResetCamera => "reset camera",
        }
    }
}

/// Key to action map
#[derive(Debug, Clone)]
pub struct KeyBindings {
    bindings: FxHashMap<KeyCode, ControlAction>,
}

impl KeyBindings {
    /// No key bound
    pub fn empty() -> Self {
        Self { bindings: FxHashMap::default() }
    }

    /// Rebind `key` (a key has at most one action)
    pub fn bind(&mut self, key: KeyCode, action: ControlAction) {
        self.bindings.insert(key, action);
    }

    pub fn action(&self, key: KeyCode) -> Option<ControlAction> {
        self.bindings.get(&key).copied()
    }

    /// Bound keys sorted by action, for help output
    pub fn entries(&self) -> Vec<(KeyCode, ControlAction)> {
        let mut entries: Vec<_> = self.bindings.iter().map(|(k, a)| (*k, *a)).collect();
        entries.sort_by_key(|(key, action)| (*action as u8, format!("{:?}", key)));
        entries
    }
}

impl Default for KeyBindings {
    fn default() -> Self {
        let mut bindings = Self::empty();
        bindings.bind(KeyCode::KeyQ, ControlAction::FocusCloser);
        bindings.bind(KeyCode::KeyE, ControlAction::FocusFarther);
        bindings.bind(KeyCode::KeyZ, ControlAction::NarrowFocusRange);
        bindings.bind(KeyCode::KeyC, ControlAction::WidenFocusRange);
        bindings.bind(KeyCode::KeyD, ControlAction::ToggleDepthDebug);
        bindings.bind(KeyCode::Enter, ControlAction::ResetCamera);
        bindings
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ControlsConfig {
    /// Camera position restored by `ResetCamera`
    pub reset_position: Vec3,
    /// Point the camera orbits around and looks at
    pub orbit_center: Vec3,
    /// Degrees of orbit per pixel of cursor motion
    pub orbit_sensitivity: f32,
}

impl Default for ControlsConfig {
    fn default() -> Self {
        Self {
            reset_position: Vec3::new(0.0, -10.0, -50.0),
            orbit_center: Vec3::ZERO,
            orbit_sensitivity: -0.4,
        }
    }
}

pub struct DofControls {
    bindings: KeyBindings,
    config: ControlsConfig,
    dragging: bool,
    last_cursor: Option<Vec2>,
}

impl DofControls {
    pub fn new(config: ControlsConfig) -> Self {
        Self::with_bindings(config, KeyBindings::default())
    }

    pub fn with_bindings(config: ControlsConfig, bindings: KeyBindings) -> Self {
        Self {
            bindings,
            config,
            dragging: false,
            last_cursor: None,
        }
    }

    pub fn bindings(&self) -> &KeyBindings {
        &self.bindings
    }

    pub fn config(&self) -> &ControlsConfig {
        &self.config
    }

    pub fn is_dragging(&self) -> bool {
        self.dragging
    }

    /// Log the control help through the engine logger
    pub fn log_help(&self) {
        engine_info!(SOURCE, "=== DoF Controls ===");
        for (key, action) in self.bindings.entries() {
            engine_info!(SOURCE, "{:?}: {}", key, action.description());
        }
        engine_info!(SOURCE, "Left mouse drag: orbit camera");
    }

    /// Dispatch a winit window event; returns true if it was consumed
    pub fn handle_window_event(
        &mut self,
        event: &WindowEvent,
        settings: &mut DofSettings,
        camera: &mut PerspectiveCamera,
    ) -> bool {
        match event {
            WindowEvent::KeyboardInput { event, .. } => match event.physical_key {
                PhysicalKey::Code(code) => self.handle_key(code, event.state, settings, camera).is_some(),
                PhysicalKey::Unidentified(_) => false,
            },
            WindowEvent::MouseInput { state, button, .. } => self.handle_mouse_button(*button, *state),
            WindowEvent::CursorMoved { position, .. } => {
                self.handle_cursor_moved(position.x, position.y, camera)
            }
            WindowEvent::CursorLeft { .. } => {
                self.last_cursor = None;
                false
            }
            _ => false,
        }
    }

    /// Apply a key event; only presses act
    pub fn handle_key(
        &mut self,
        key: KeyCode,
        state: ElementState,
        settings: &mut DofSettings,
        camera: &mut PerspectiveCamera,
    ) -> Option<ControlAction> {
        if state != ElementState::Pressed {
            return None;
        }
        let action = self.bindings.action(key)?;
        match action {
            ControlAction::FocusCloser => settings.adjust_focus_distance(-1),
            ControlAction::FocusFarther => settings.adjust_focus_distance(1),
            ControlAction::NarrowFocusRange => settings.adjust_focus_range(-1),
            ControlAction::WidenFocusRange => settings.adjust_focus_range(1),
            ControlAction::ToggleDepthDebug => settings.toggle_debug_depth(),
            ControlAction::ResetCamera => {
                camera.set_position(self.config.reset_position);
                camera.look_at(self.config.orbit_center);
                engine_info!(SOURCE, "Camera reset to {:?}", self.config.reset_position);
            }
        }
        Some(action)
    }

    /// Track the left button; returns true if it changed the drag state
    pub fn handle_mouse_button(&mut self, button: MouseButton, state: ElementState) -> bool {
        if button != MouseButton::Left {
            return false;
        }
        let dragging = state == ElementState::Pressed;
        let changed = dragging != self.dragging;
        self.dragging = dragging;
        changed
    }

    /// Orbit the camera while dragging; returns true if it moved
    pub fn handle_cursor_moved(&mut self, x: f64, y: f64, camera: &mut PerspectiveCamera) -> bool {
        let position = Vec2::new(x as f32, y as f32);
        let previous = self.last_cursor.replace(position);

        match previous {
            Some(previous) if self.dragging && previous != position => {
                let offset = position - previous;
                camera.orbit(offset * self.config.orbit_sensitivity, self.config.orbit_center);
                true
            }
            _ => false,
        }
    }
}

impl Default for DofControls {
    fn default() -> Self {
        Self::new(ControlsConfig::default())
    }
}

#[cfg(test)]
#[path = "controls_tests.rs"]
mod tests;

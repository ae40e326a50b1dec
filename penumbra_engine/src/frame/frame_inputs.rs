/// Everything a frame is rendered from, borrowed for one frame.

use crate::camera::{LightSource, Projector};
use crate::dof::DofSettings;
use crate::scene::{RenderMode, Scene};

#[derive(Clone, Copy)]
pub struct FrameInputs<'a> {
    pub scene: &'a dyn Scene,
    pub camera: &'a dyn Projector,
    pub light: &'a dyn LightSource,
    pub render_mode: RenderMode,
    pub dof: DofSettings,
}

impl<'a> FrameInputs<'a> {
    pub fn new(scene: &'a dyn Scene, camera: &'a dyn Projector, light: &'a dyn LightSource) -> Self {
        Self {
            scene,
            camera,
            light,
            render_mode: RenderMode::default(),
            dof: DofSettings::default(),
        }
    }

    pub fn with_render_mode(mut self, render_mode: RenderMode) -> Self {
        self.render_mode = render_mode;
        self
    }

    pub fn with_dof(mut self, dof: DofSettings) -> Self {
        self.dof = dof;
        self
    }
}

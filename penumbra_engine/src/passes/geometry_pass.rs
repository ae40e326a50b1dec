/// Geometry pass: fills the G-buffer from the camera.

use crate::error::Result;
use crate::passes::GBUFFER_TARGET;
use crate::render_graph::{PassContext, PassIo, PassNode};
use crate::scene::{Drawer, ForwardDrawer};

pub struct GeometryPass {
    io: PassIo,
    drawer: ForwardDrawer,
}

impl GeometryPass {
    pub fn new() -> Self {
        Self {
            io: PassIo::writes_target(GBUFFER_TARGET),
            drawer: ForwardDrawer::new(),
        }
    }
}

impl Default for GeometryPass {
    fn default() -> Self {
        Self::new()
    }
}

impl PassNode for GeometryPass {
    fn name(&self) -> &str {
        "geometry"
    }

    fn io(&self) -> &PassIo {
        &self.io
    }

    fn execute(&self, ctx: &mut PassContext) -> Result<()> {
        let inputs = *ctx.inputs();
        ctx.bind_output()?;
        ctx.set_draw_buffers()?;
        self.drawer.draw(
            ctx,
            inputs.scene,
            inputs.render_mode.program_kind(),
            inputs.camera.view_projection_matrix(),
        )?;
        ctx.unbind_output()
    }
}

#[cfg(test)]
#[path = "geometry_pass_tests.rs"]
mod tests;

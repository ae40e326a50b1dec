/// Shadow pass: scene depth as seen from the light.

use crate::error::Result;
use crate::passes::SHADOW_TARGET;
use crate::render_graph::{PassContext, PassIo, PassNode};
use crate::scene::{Drawer, ForwardDrawer, ProgramKind};

pub struct ShadowPass {
    io: PassIo,
    drawer: ForwardDrawer,
}

impl ShadowPass {
    pub fn new() -> Self {
        Self {
            io: PassIo::writes_target(SHADOW_TARGET),
            drawer: ForwardDrawer::new(),
        }
    }
}

impl Default for ShadowPass {
    fn default() -> Self {
        Self::new()
    }
}

impl PassNode for ShadowPass {
    fn name(&self) -> &str {
        "shadow"
    }

    fn io(&self) -> &PassIo {
        &self.io
    }

    /// Depth only: the target has no color attachment, so no draw buffer
    /// is active and every shadow-map program must write no color.
    fn execute(&self, ctx: &mut PassContext) -> Result<()> {
        let inputs = *ctx.inputs();
        ctx.bind_output()?;
        self.drawer.draw(ctx, inputs.scene, ProgramKind::ShadowMap, inputs.light.view_projection_matrix())?;
        ctx.unbind_output()
    }
}

#[cfg(test)]
#[path = "shadow_pass_tests.rs"]
mod tests;

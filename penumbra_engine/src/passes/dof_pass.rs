/// Depth-of-field pass: final image onto the presentation surface.

use std::sync::Arc;
use crate::error::Result;
use crate::camera::PerspectiveCamera;
use crate::dof::DofSettings;
use crate::graphics_device::{Pipeline, SamplerType};
use crate::passes::{COMPOSITE_TARGET, GBUFFER_TARGET};
use crate::passes::program_interface::ProgramInterface;
use crate::render_graph::{PassContext, PassIo, PassNode, TextureInput};
use crate::target::AttachmentKind;

const COLOR_TEXTURE: &str = "color_texture";
const DEPTH_TEXTURE: &str = "depth_texture";

pub struct DofPass {
    io: PassIo,
    program: Arc<dyn Pipeline>,
}

impl DofPass {
    /// Wire the DoF program
    ///
    /// The program must expose `focus_distance`, `focus_range`,
    /// `near_plane`, `far_plane` (float), `debug_depth` (int) and the
    /// `color_texture` / `depth_texture` samplers.
    pub fn new(program: Arc<dyn Pipeline>) -> Result<Self> {
        let prototype = DofSettings::default().params(&PerspectiveCamera::default());
        ProgramInterface {
            uniforms: &prototype.uniforms(),
            samplers: &[COLOR_TEXTURE, DEPTH_TEXTURE],
            color_outputs: 1,
        }
        .check("dof", program.as_ref())?;

        let io = PassIo::writes_surface()
            .reading(COMPOSITE_TARGET, AttachmentKind::Color(0))
            .reading(GBUFFER_TARGET, AttachmentKind::Depth);

        Ok(Self { io, program })
    }
}

impl PassNode for DofPass {
    fn name(&self) -> &str {
        "dof"
    }

    fn io(&self) -> &PassIo {
        &self.io
    }

    fn execute(&self, ctx: &mut PassContext) -> Result<()> {
        let inputs = *ctx.inputs();
        let params = inputs.dof.params(inputs.camera);

        ctx.bind_output()?;
        ctx.use_program(&self.program)?;
        for (name, value) in params.uniforms() {
            ctx.set_uniform(name, value)?;
        }
        ctx.bind_textures(&[
            TextureInput::new(COLOR_TEXTURE, COMPOSITE_TARGET, AttachmentKind::Color(0), SamplerType::LinearClamp),
            TextureInput::new(DEPTH_TEXTURE, GBUFFER_TARGET, AttachmentKind::Depth, SamplerType::NearestClamp),
        ])?;
        ctx.draw_fullscreen()?;
        ctx.unbind_output()
    }
}

#[cfg(test)]
#[path = "dof_pass_tests.rs"]
mod tests;

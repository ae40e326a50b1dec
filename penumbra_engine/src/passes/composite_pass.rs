/// Compositing pass: deferred lighting with shadows.
///
/// Draws a fullscreen triangle into the composite target, sampling the
/// G-buffer (albedo, normal, depth) and the shadow map.

use std::sync::Arc;
use glam::{Mat4, Vec4};
use crate::error::Result;
use crate::graphics_device::{Pipeline, SamplerType};
use crate::passes::{COMPOSITE_TARGET, GBUFFER_TARGET, SHADOW_TARGET, GBUFFER_ALBEDO, GBUFFER_NORMAL};
use crate::passes::program_interface::ProgramInterface;
use crate::render_graph::{PassContext, PassIo, PassNode, TextureInput, UniformValue};
use crate::target::AttachmentKind;

const INVERSE_VIEW_PROJECTION: &str = "inverse_view_projection";
const LIGHT_VIEW_PROJECTION: &str = "light_view_projection";
const LIGHT_POSITION: &str = "light_position";
const LIGHT_COLOR: &str = "light_color";

const ALBEDO_TEXTURE: &str = "albedo_texture";
const NORMAL_TEXTURE: &str = "normal_texture";
const DEPTH_TEXTURE: &str = "depth_texture";
const SHADOW_MAP: &str = "shadow_map";

pub struct CompositePass {
    io: PassIo,
    program: Arc<dyn Pipeline>,
}

impl CompositePass {
    /// Wire the compositing program
    ///
    /// Fails with `InvalidResource` if the program does not expose every
    /// uniform and sampler this pass sets, or writes other than one output.
    pub fn new(program: Arc<dyn Pipeline>) -> Result<Self> {
        ProgramInterface {
            uniforms: &[
                (INVERSE_VIEW_PROJECTION, UniformValue::Mat4(Mat4::IDENTITY)),
                (LIGHT_VIEW_PROJECTION, UniformValue::Mat4(Mat4::IDENTITY)),
                (LIGHT_POSITION, UniformValue::Vec4(Vec4::ZERO)),
                (LIGHT_COLOR, UniformValue::Vec4(Vec4::ZERO)),
            ],
            samplers: &[ALBEDO_TEXTURE, NORMAL_TEXTURE, DEPTH_TEXTURE, SHADOW_MAP],
            color_outputs: 1,
        }
        .check("composite", program.as_ref())?;

        let io = PassIo::writes_target(COMPOSITE_TARGET)
            .reading(GBUFFER_TARGET, AttachmentKind::Color(GBUFFER_ALBEDO))
            .reading(GBUFFER_TARGET, AttachmentKind::Color(GBUFFER_NORMAL))
            .reading(GBUFFER_TARGET, AttachmentKind::Depth)
            .reading(SHADOW_TARGET, AttachmentKind::Depth);

        Ok(Self { io, program })
    }
}

impl PassNode for CompositePass {
    fn name(&self) -> &str {
        "composite"
    }

    fn io(&self) -> &PassIo {
        &self.io
    }

    fn execute(&self, ctx: &mut PassContext) -> Result<()> {
        let inputs = *ctx.inputs();
        let light = inputs.light;

        ctx.bind_output()?;
        ctx.use_program(&self.program)?;

        ctx.set_uniform(INVERSE_VIEW_PROJECTION,
            UniformValue::Mat4(inputs.camera.view_projection_matrix().inverse()))?;
        ctx.set_uniform(LIGHT_VIEW_PROJECTION, UniformValue::Mat4(light.view_projection_matrix()))?;
        ctx.set_uniform(LIGHT_POSITION, UniformValue::Vec4(light.position().extend(1.0)))?;
        ctx.set_uniform(LIGHT_COLOR, UniformValue::Vec4(light.color().extend(light.intensity())))?;

        ctx.bind_textures(&[
            TextureInput::new(ALBEDO_TEXTURE, GBUFFER_TARGET,
                AttachmentKind::Color(GBUFFER_ALBEDO), SamplerType::LinearClamp),
            TextureInput::new(NORMAL_TEXTURE, GBUFFER_TARGET,
                AttachmentKind::Color(GBUFFER_NORMAL), SamplerType::LinearClamp),
            TextureInput::new(DEPTH_TEXTURE, GBUFFER_TARGET,
                AttachmentKind::Depth, SamplerType::NearestClamp),
            TextureInput::new(SHADOW_MAP, SHADOW_TARGET,
                AttachmentKind::Depth, SamplerType::DepthCompare),
        ])?;

        ctx.draw_fullscreen()?;
        ctx.unbind_output()
    }
}

#[cfg(test)]
#[path = "composite_pass_tests.rs"]
mod tests;

/// Per-pass recording context.
///
/// A `PassContext` is created by the frame driver for one pass execution.
/// It owns the explicit `DrawState` of that pass and only lets the pass
/// touch what its `PassIo` declared: its own output and the attachments
/// it listed as reads.

use std::collections::BTreeMap;
use std::sync::Arc;

use crate::error::{Error, Result};
use crate::frame::FrameInputs;
use crate::graphics_device::{
    GraphicsDevice, CommandList, Pipeline, RenderPass, Framebuffer, BindingGroup,
    BindingResource, BindingType, SamplerType, Texture, ClearValue, Viewport, Rect2D,
};
use crate::render_graph::{PassIo, PassOutput, UniformValue};
use crate::scene::Mesh;
use crate::target::{AttachmentKind, AttachmentRef, DrawState, RenderTarget, TargetManager};
use crate::engine_fail;

const SOURCE: &str = "penumbra::PassContext";

/// The presentation surface for the current frame
pub struct SurfaceFrame {
    pub render_pass: Arc<dyn RenderPass>,
    pub framebuffer: Arc<dyn Framebuffer>,
    pub width: u32,
    pub height: u32,
    pub clear_color: [f32; 4],
}

/// One texture binding: a declared attachment sampled under a shader name
#[derive(Debug, Clone, Copy)]
pub struct TextureInput<'n> {
    /// Sampler name in the shader interface
    pub binding: &'n str,
    pub target: &'n str,
    pub attachment: AttachmentKind,
    pub sampler: SamplerType,
}

impl<'n> TextureInput<'n> {
    pub fn new(binding: &'n str, target: &'n str, attachment: AttachmentKind, sampler: SamplerType) -> Self {
        Self { binding, target, attachment, sampler }
    }
}

pub struct PassContext<'a> {
    device: &'a dyn GraphicsDevice,
    cmd: &'a mut dyn CommandList,
    targets: &'a TargetManager,
    surface: &'a SurfaceFrame,
    inputs: &'a FrameInputs<'a>,
    pass: &'a str,
    io: &'a PassIo,
    state: DrawState,
    output_bound: bool,
    pipeline: Option<Arc<dyn Pipeline>>,
}

impl<'a> PassContext<'a> {
    #[allow(clippy::too_many_arguments)]
    pub(crate) fn new(
        device: &'a dyn GraphicsDevice,
        cmd: &'a mut dyn CommandList,
        targets: &'a TargetManager,
        surface: &'a SurfaceFrame,
        inputs: &'a FrameInputs<'a>,
        pass: &'a str,
        io: &'a PassIo,
    ) -> Self {
        Self {
            device,
            cmd,
            targets,
            surface,
            inputs,
            pass,
            io,
            state: DrawState::new(),
            output_bound: false,
            pipeline: None,
        }
    }

    /// Name of the executing pass
    pub fn pass_name(&self) -> &str {
        self.pass
    }

    /// Frame-wide inputs (scene, camera, light, settings)
    pub fn inputs(&self) -> &FrameInputs<'a> {
        self.inputs
    }

    pub fn draw_state(&self) -> &DrawState {
        &self.state
    }

    /// Width and height of the declared output
    pub fn output_extent(&self) -> Result<(u32, u32)> {
        let io: &'a PassIo = self.io;
        match io.output() {
            PassOutput::Surface => Ok((self.surface.width, self.surface.height)),
            PassOutput::Target(name) => {
                let target = self.output_target(name)?;
                Ok((target.width(), target.height()))
            }
        }
    }

    /// Begin drawing into the declared output (clears it)
    pub fn bind_output(&mut self) -> Result<()> {
        if self.output_bound {
            return Err(self.fail(Error::InvalidResource(format!(
                "pass '{}' bound its output twice", self.pass))));
        }
        let io: &'a PassIo = self.io;
        match io.output() {
            PassOutput::Target(name) => {
                let target = self.output_target(name)?;
                target.bind(self.cmd, &mut self.state)?;
            }
            PassOutput::Surface => {
                let (width, height) = (self.surface.width, self.surface.height);
                self.cmd.begin_render_pass(
                    &self.surface.render_pass,
                    &self.surface.framebuffer,
                    &[ClearValue::Color(self.surface.clear_color)],
                )?;
                self.cmd.set_viewport(Viewport::full(width, height))?;
                self.cmd.set_scissor(Rect2D::full(width, height))?;
            }
        }
        self.output_bound = true;
        self.pipeline = None;
        Ok(())
    }

    /// Stop drawing into the output and restore the default surface state
    pub fn unbind_output(&mut self) -> Result<()> {
        if !self.output_bound {
            return Err(self.fail(Error::InvalidResource(format!(
                "pass '{}' unbound an output that is not bound", self.pass))));
        }
        let io: &'a PassIo = self.io;
        match io.output() {
            PassOutput::Target(name) => {
                let target = self.output_target(name)?;
                target.unbind(self.cmd, &mut self.state)?;
            }
            PassOutput::Surface => {
                self.cmd.end_render_pass()?;
            }
        }
        self.output_bound = false;
        self.pipeline = None;
        Ok(())
    }

    /// Route the following draws to every color attachment of the output
    pub fn set_draw_buffers(&mut self) -> Result<()> {
        let io: &'a PassIo = self.io;
        match io.output() {
            PassOutput::Target(name) => {
                let target = self.output_target(name)?;
                target.set_draw_buffers(&mut self.state)
            }
            // The surface has exactly one color buffer
            PassOutput::Surface => Ok(()),
        }
    }

    /// Shared reference to a declared input attachment
    pub fn read(&self, target: &str, attachment: AttachmentKind) -> Result<AttachmentRef> {
        if !self.io.declares_read(target, attachment) {
            return Err(self.fail(Error::GraphValidation(format!(
                "pass '{}' reads {}.{} without declaring it", self.pass, target, attachment))));
        }
        let render_target = self.targets.render_target(target).ok_or_else(|| {
            self.fail(Error::GraphValidation(format!(
                "pass '{}' reads unknown render target '{}'", self.pass, target)))
        })?;
        render_target.attachment(attachment)
    }

    /// Bind a program for the following draws
    ///
    /// The program's output count must match the active draw buffers.
    pub fn use_program(&mut self, pipeline: &Arc<dyn Pipeline>) -> Result<()> {
        if !self.output_bound {
            return Err(self.fail(Error::InvalidResource(format!(
                "pass '{}' bound program '{}' before its output", self.pass, pipeline.label()))));
        }
        if pipeline.color_target_count() != self.state.draw_buffers() {
            return Err(self.fail(Error::InvalidResource(format!(
                "program '{}' writes {} output(s) but {} draw buffer(s) are active",
                pipeline.label(), pipeline.color_target_count(), self.state.draw_buffers()))));
        }
        self.cmd.bind_pipeline(pipeline)?;
        self.state.set_program(pipeline.label());
        self.pipeline = Some(Arc::clone(pipeline));
        Ok(())
    }

    /// Set a named uniform of the bound program
    pub fn set_uniform(&mut self, name: &str, value: UniformValue) -> Result<()> {
        let pipeline = self.bound_pipeline()?;
        let (block, member) = pipeline.reflection().push_constant_member(name).ok_or_else(|| {
            self.fail(Error::InvalidResource(format!(
                "program '{}' has no uniform '{}'", pipeline.label(), name)))
        })?;
        if !value.fits(&member.member_type) {
            return Err(self.fail(Error::InvalidResource(format!(
                "uniform '{}' of program '{}' is {:?}, got {:?}",
                name, pipeline.label(), member.member_type, value.member_type()))));
        }
        let (stages, offset) = (block.stage_flags, member.offset);
        self.cmd.push_constants(stages, offset, &value.bytes())
    }

    /// Bind declared input attachments to named samplers of the bound program
    ///
    /// Inputs are grouped by descriptor set and ordered by binding index.
    pub fn bind_textures(&mut self, inputs: &[TextureInput]) -> Result<()> {
        let pipeline = self.bound_pipeline()?;

        let mut sets: BTreeMap<u32, Vec<(u32, Arc<dyn Texture>, SamplerType)>> = BTreeMap::new();
        for input in inputs {
            let binding = pipeline.reflection().binding_by_name(input.binding).ok_or_else(|| {
                self.fail(Error::InvalidResource(format!(
                    "program '{}' has no sampler '{}'", pipeline.label(), input.binding)))
            })?;
            if binding.binding_type != BindingType::CombinedImageSampler {
                return Err(self.fail(Error::InvalidResource(format!(
                    "'{}' in program '{}' is not a sampler", input.binding, pipeline.label()))));
            }
            let texture = self.read(input.target, input.attachment)?.texture()?;
            sets.entry(binding.set).or_default().push((binding.binding, texture, input.sampler));
        }

        for (set_index, mut entries) in sets {
            entries.sort_by_key(|(binding, _, _)| *binding);
            let resources: Vec<BindingResource> = entries
                .iter()
                .map(|(_, texture, sampler)| BindingResource::SampledTexture(texture.as_ref(), *sampler))
                .collect();
            let group = self.device.create_binding_group(&pipeline, set_index, &resources)?;
            self.cmd.bind_binding_group(&pipeline, set_index, &group)?;
        }
        Ok(())
    }

    /// Bind a prebuilt binding group (material resources)
    pub fn bind_group(&mut self, group: &Arc<dyn BindingGroup>) -> Result<()> {
        let pipeline = self.bound_pipeline()?;
        self.cmd.bind_binding_group(&pipeline, group.set_index(), group)
    }

    /// Draw a screen-covering triangle
    pub fn draw_fullscreen(&mut self) -> Result<()> {
        self.bound_pipeline()?;
        self.cmd.draw(3, 0)
    }

    /// Draw a mesh with the bound program
    pub fn draw_mesh(&mut self, mesh: &Mesh) -> Result<()> {
        self.bound_pipeline()?;
        self.cmd.bind_vertex_buffer(mesh.vertex_buffer(), 0)?;
        match mesh.index_buffer() {
            Some((buffer, count, index_type)) => {
                self.cmd.bind_index_buffer(buffer, 0, index_type)?;
                self.cmd.draw_indexed(count, 0, 0)
            }
            None => self.cmd.draw(mesh.vertex_count(), 0),
        }
    }

    /// Check the pass left no target bound
    pub(crate) fn finish(self) -> Result<()> {
        if self.output_bound {
            return Err(engine_fail!(SOURCE, Error::InvalidResource(format!(
                "pass '{}' returned with its output still bound", self.pass))));
        }
        Ok(())
    }

    fn output_target(&self, name: &str) -> Result<&'a RenderTarget> {
        let targets: &'a TargetManager = self.targets;
        targets.render_target(name).ok_or_else(|| {
            self.fail(Error::GraphValidation(format!(
                "pass '{}' writes unknown render target '{}'", self.pass, name)))
        })
    }

    fn bound_pipeline(&self) -> Result<Arc<dyn Pipeline>> {
        self.pipeline.clone().ok_or_else(|| {
            self.fail(Error::InvalidResource(format!("pass '{}' has no program bound", self.pass)))
        })
    }

    fn fail(&self, error: Error) -> Error {
        engine_fail!(SOURCE, error)
    }
}

#[cfg(test)]
#[path = "pass_context_tests.rs"]
mod tests;

/// Render target: an off-screen draw destination made of color attachments
/// and one depth attachment.
///
/// Construction is all-or-nothing. Every GPU object is owned by a local
/// until the completeness check passes, so a failed construction releases
/// whatever was already allocated simply by returning.

use std::sync::Arc;

use crate::error::{Error, Result};
use crate::graphics_device::{
    GraphicsDevice, CommandList, Texture, TextureDesc, TextureFormat, TextureUsage,
    RenderPass, RenderPassDesc, AttachmentDesc, Framebuffer, FramebufferDesc,
    ClearValue, Viewport, Rect2D,
};
use crate::target::{AttachmentKind, AttachmentRef, ColorAttachmentDesc, DrawState};
use crate::{engine_debug, engine_fail};

/// Descriptor for creating a render target
#[derive(Debug, Clone, PartialEq)]
pub struct RenderTargetDesc {
    /// Unique name (also the prefix of every attachment label)
    pub name: String,
    pub width: u32,
    pub height: u32,
    /// Color attachments, in location order (may be empty for depth-only targets)
    pub color_attachments: Vec<ColorAttachmentDesc>,
    /// Depth attachment format
    pub depth_format: TextureFormat,
    /// Value every color attachment is cleared to when the target is bound
    pub clear_color: [f32; 4],
    /// Value the depth attachment is cleared to when the target is bound
    pub clear_depth: f32,
}

impl RenderTargetDesc {
    /// Depth-only descriptor with a full-precision depth attachment
    pub fn new(name: &str, width: u32, height: u32) -> Self {
        Self {
            name: name.to_string(),
            width,
            height,
            color_attachments: Vec::new(),
            depth_format: TextureFormat::D32_FLOAT,
            clear_color: [0.0, 0.0, 0.0, 1.0],
            clear_depth: 1.0,
        }
    }

    pub fn with_color(mut self, desc: ColorAttachmentDesc) -> Self {
        self.color_attachments.push(desc);
        self
    }

    pub fn with_depth_format(mut self, format: TextureFormat) -> Self {
        self.depth_format = format;
        self
    }

    pub fn with_clear_color(mut self, color: [f32; 4]) -> Self {
        self.clear_color = color;
        self
    }

    /// Same descriptor at another size
    pub fn resized(&self, width: u32, height: u32) -> Self {
        Self { width, height, ..self.clone() }
    }
}

/// Off-screen render target
pub struct RenderTarget {
    desc: RenderTargetDesc,
    color_textures: Vec<Arc<dyn Texture>>,
    depth_texture: Arc<dyn Texture>,
    render_pass: Arc<dyn RenderPass>,
    framebuffer: Arc<dyn Framebuffer>,
    clear_values: Vec<ClearValue>,
}

impl RenderTarget {
    /// Allocate every attachment, build the framebuffer and check it
    ///
    /// # Errors
    ///
    /// - `Error::InvalidResource` for a zero size, an inconsistent color
    ///   format triple or a non-depth depth format
    /// - `Error::IncompleteFramebuffer` if the completeness check fails
    /// - any device error raised while allocating
    pub fn new(device: &mut dyn GraphicsDevice, desc: RenderTargetDesc) -> Result<Self> {
        const SOURCE: &str = "penumbra::RenderTarget";

        if desc.width == 0 || desc.height == 0 {
            return Err(engine_fail!(SOURCE, Error::InvalidResource(
                format!("render target '{}' has zero size ({}x{})", desc.name, desc.width, desc.height))));
        }
        for color in &desc.color_attachments {
            color.validate()?;
        }
        if !desc.depth_format.is_depth() {
            return Err(engine_fail!(SOURCE, Error::InvalidResource(
                format!("render target '{}': {:?} is not a depth format", desc.name, desc.depth_format))));
        }

        let mut color_textures = Vec::with_capacity(desc.color_attachments.len());
        for (index, color) in desc.color_attachments.iter().enumerate() {
            color_textures.push(device.create_texture(TextureDesc {
                label: format!("{}.{}", desc.name, AttachmentKind::Color(index)),
                width: desc.width,
                height: desc.height,
                format: color.format,
                usage: TextureUsage::SampledAndRenderTarget,
            })?);
        }

        let depth_texture = device.create_texture(TextureDesc {
            label: format!("{}.{}", desc.name, AttachmentKind::Depth),
            width: desc.width,
            height: desc.height,
            format: desc.depth_format,
            usage: TextureUsage::SampledDepthStencil,
        })?;

        let render_pass = device.create_render_pass(&RenderPassDesc {
            color_attachments: desc.color_attachments.iter()
                .map(|c| AttachmentDesc::sampled_output(c.format))
                .collect(),
            depth_attachment: Some(AttachmentDesc::sampled_output(desc.depth_format)),
        })?;

        let framebuffer = device.create_framebuffer(&FramebufferDesc {
            label: &desc.name,
            render_pass: &render_pass,
            color_attachments: color_textures.clone(),
            depth_stencil_attachment: Some(depth_texture.clone()),
            width: desc.width,
            height: desc.height,
        })?;

        let status = framebuffer.status();
        if !status.is_complete() {
            return Err(engine_fail!(SOURCE, Error::IncompleteFramebuffer(
                format!("render target '{}': {}", desc.name, status))));
        }

        let mut clear_values: Vec<ClearValue> = desc.color_attachments.iter()
            .map(|_| ClearValue::Color(desc.clear_color))
            .collect();
        clear_values.push(ClearValue::DepthStencil { depth: desc.clear_depth, stencil: 0 });

        engine_debug!(SOURCE, "Render target '{}' created ({}x{}, {} color attachments, depth {:?})",
            desc.name, desc.width, desc.height, color_textures.len(), desc.depth_format);

        Ok(Self {
            desc,
            color_textures,
            depth_texture,
            render_pass,
            framebuffer,
            clear_values,
        })
    }

    pub fn name(&self) -> &str {
        &self.desc.name
    }

    pub fn width(&self) -> u32 {
        self.desc.width
    }

    pub fn height(&self) -> u32 {
        self.desc.height
    }

    pub fn desc(&self) -> &RenderTargetDesc {
        &self.desc
    }

    pub fn color_attachment_count(&self) -> usize {
        self.color_textures.len()
    }

    /// Shared reference to the color attachment at `index`
    ///
    /// # Errors
    ///
    /// `Error::AttachmentOutOfRange` if `index >= color_attachment_count()`
    pub fn color_attachment(&self, index: usize) -> Result<AttachmentRef> {
        match self.color_textures.get(index) {
            Some(texture) => Ok(AttachmentRef::new(&self.desc.name, AttachmentKind::Color(index), texture)),
            None => Err(engine_fail!("penumbra::RenderTarget", Error::AttachmentOutOfRange {
                target: self.desc.name.clone(),
                index,
                count: self.color_textures.len(),
            })),
        }
    }

    /// Shared reference to the depth attachment (always present)
    pub fn depth_attachment(&self) -> AttachmentRef {
        AttachmentRef::new(&self.desc.name, AttachmentKind::Depth, &self.depth_texture)
    }

    /// Resolve an attachment by kind
    pub fn attachment(&self, kind: AttachmentKind) -> Result<AttachmentRef> {
        match kind {
            AttachmentKind::Color(index) => self.color_attachment(index),
            AttachmentKind::Depth => Ok(self.depth_attachment()),
        }
    }

    /// Make this target the active draw destination
    ///
    /// Begins the render pass, which clears every attachment to the
    /// descriptor's clear values. Only attachment 0 receives output until
    /// `set_draw_buffers` is called (none for depth-only targets).
    pub fn bind(&self, cmd: &mut dyn CommandList, state: &mut DrawState) -> Result<()> {
        state.bind_target(&self.desc.name, self.color_textures.len().min(1))?;
        cmd.begin_render_pass(&self.render_pass, &self.framebuffer, &self.clear_values)?;
        cmd.set_viewport(Viewport::full(self.desc.width, self.desc.height))?;
        cmd.set_scissor(Rect2D::full(self.desc.width, self.desc.height))?;
        Ok(())
    }

    /// Restore the default surface as draw destination
    ///
    /// Must match a previous `bind` of this same target.
    pub fn unbind(&self, cmd: &mut dyn CommandList, state: &mut DrawState) -> Result<()> {
        state.unbind_target(&self.desc.name)?;
        cmd.end_render_pass()
    }

    /// Route the next draws to every color attachment
    pub fn set_draw_buffers(&self, state: &mut DrawState) -> Result<()> {
        if state.bound_target() != Some(self.desc.name.as_str()) {
            return Err(engine_fail!("penumbra::RenderTarget", Error::InvalidResource(
                format!("set_draw_buffers on '{}' which is not bound", self.desc.name))));
        }
        state.set_draw_buffers(self.color_textures.len());
        Ok(())
    }
}

#[cfg(test)]
#[path = "render_target_tests.rs"]
mod tests;

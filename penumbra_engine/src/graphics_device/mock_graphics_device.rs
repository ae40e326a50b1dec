/// Mock graphics device for unit tests (no GPU required)
///
/// Every command recorded by a mock command list is appended to a journal
/// shared with the device, so a test can hand the device to a frame driver
/// and still inspect exactly what was recorded, submitted and presented.
/// Textures report their release on drop, which makes leaks observable.

use std::sync::{Arc, Mutex};
use rustc_hash::FxHashMap;

use crate::graphics_device::{
    GraphicsDevice, GraphicsDeviceStats, Buffer, Texture, Shader, Pipeline, CommandList,
    RenderPass, Swapchain, BindingGroup, Framebuffer, FramebufferStatus,
    BufferDesc, TextureDesc, ShaderDesc, ShaderStage, PipelineDesc, PipelineReflection,
    BindingResource, RenderPassDesc, FramebufferDesc, Viewport, Rect2D,
    ClearValue, IndexType, TextureInfo, TextureFormat, ShaderStageFlags,
};
use crate::error::{Error, Result};
use crate::{engine_bail, engine_fail};

// ============================================================================
// Journal
// ============================================================================

/// One recorded command (or device-level event)
#[derive(Debug, Clone, PartialEq)]
pub enum MockCommand {
    Begin,
    End,
    BeginRenderPass { framebuffer: String, clear_values: Vec<ClearValue> },
    EndRenderPass,
    SetViewport(Viewport),
    SetScissor(Rect2D),
    BindPipeline(String),
    BindBindingGroup { set_index: u32, label: String },
    PushConstants { stages: ShaderStageFlags, offset: u32, data: Vec<u8> },
    BindVertexBuffer,
    BindIndexBuffer(IndexType),
    Draw { vertex_count: u32, first_vertex: u32 },
    DrawIndexed { index_count: u32, first_index: u32, vertex_offset: i32 },
    Submit { image_index: u32 },
    Present { image_index: u32 },
}

/// Shared, append-only command journal
pub type Journal = Arc<Mutex<Vec<MockCommand>>>;

/// Injected failures
#[derive(Debug, Clone, Default)]
pub struct MockFailures {
    /// Framebuffers with this label report an incomplete status
    pub incomplete_framebuffer: Option<String>,
    /// Shader creation fails for this stage with the given diagnostic
    pub shader_stage: Option<(ShaderStage, String)>,
    /// Pipeline creation fails with the given message
    pub pipeline: Option<String>,
    /// Draw calls fail while this is set
    pub draw: bool,
    /// Submission fails while this is set
    pub submit: bool,
}

// ============================================================================
// Mock Buffer
// ============================================================================

#[derive(Debug)]
pub struct MockBuffer {
    pub size: u64,
}

impl MockBuffer {
    pub fn new(size: u64) -> Self {
        Self { size }
    }
}

impl Buffer for MockBuffer {
    fn update(&self, offset: u64, data: &[u8]) -> Result<()> {
        if offset + data.len() as u64 > self.size {
            engine_bail!("penumbra::mock", "Buffer update out of range ({} + {} > {})",
                offset, data.len(), self.size);
        }
        Ok(())
    }

    fn size(&self) -> u64 {
        self.size
    }
}

// ============================================================================
// Mock Texture
// ============================================================================

#[derive(Debug)]
pub struct MockTexture {
    pub info: TextureInfo,
    released: Option<Arc<Mutex<Vec<String>>>>,
}

impl MockTexture {
    /// Standalone texture (not tracked by any device)
    pub fn new(label: &str, width: u32, height: u32, format: TextureFormat) -> Self {
        let usage = if format.is_depth() {
            crate::graphics_device::TextureUsage::SampledDepthStencil
        } else {
            crate::graphics_device::TextureUsage::SampledAndRenderTarget
        };
        Self {
            info: TextureInfo {
                label: label.to_string(),
                width,
                height,
                format,
                usage,
            },
            released: None,
        }
    }
}

impl Texture for MockTexture {
    fn info(&self) -> &TextureInfo {
        &self.info
    }
}

impl Drop for MockTexture {
    fn drop(&mut self) {
        if let Some(released) = &self.released {
            released.lock().unwrap().push(self.info.label.clone());
        }
    }
}

// ============================================================================
// Mock Shader
// ============================================================================

#[derive(Debug)]
pub struct MockShader {
    pub stage: ShaderStage,
}

impl Shader for MockShader {
    fn stage(&self) -> ShaderStage {
        self.stage
    }
}

// ============================================================================
// Mock Pipeline
// ============================================================================

#[derive(Debug)]
pub struct MockPipeline {
    pub label: String,
    pub reflection: PipelineReflection,
    pub color_targets: usize,
}

impl MockPipeline {
    pub fn new(label: &str, reflection: PipelineReflection, color_targets: usize) -> Self {
        Self {
            label: label.to_string(),
            reflection,
            color_targets,
        }
    }
}

impl Pipeline for MockPipeline {
    fn label(&self) -> &str {
        &self.label
    }

    fn reflection(&self) -> &PipelineReflection {
        &self.reflection
    }

    fn color_target_count(&self) -> usize {
        self.color_targets
    }
}

// ============================================================================
// Mock CommandList
// ============================================================================

pub struct MockCommandList {
    journal: Journal,
    failures: Arc<Mutex<MockFailures>>,
    recording: bool,
    retained: Vec<Arc<dyn BindingGroup>>,
}

impl MockCommandList {
    pub fn new(journal: Journal, failures: Arc<Mutex<MockFailures>>) -> Self {
        Self { journal, failures, recording: false, retained: Vec::new() }
    }

    /// Binding groups kept alive by this list since the last `begin`
    pub fn retained_binding_groups(&self) -> &[Arc<dyn BindingGroup>] {
        &self.retained
    }

    fn record(&mut self, command: MockCommand) -> Result<()> {
        if !self.recording {
            engine_bail!("penumbra::mock", "Command recorded outside begin/end: {:?}", command);
        }
        self.journal.lock().unwrap().push(command);
        Ok(())
    }

    fn check_draw(&self) -> Result<()> {
        if self.failures.lock().unwrap().draw {
            engine_bail!("penumbra::mock", "Injected draw failure");
        }
        Ok(())
    }
}

impl CommandList for MockCommandList {
    fn begin(&mut self) -> Result<()> {
        self.retained.clear();
        self.recording = true;
        self.record(MockCommand::Begin)
    }

    fn end(&mut self) -> Result<()> {
        self.record(MockCommand::End)?;
        self.recording = false;
        Ok(())
    }

    fn begin_render_pass(
        &mut self,
        _render_pass: &Arc<dyn RenderPass>,
        framebuffer: &Arc<dyn Framebuffer>,
        clear_values: &[ClearValue],
    ) -> Result<()> {
        self.record(MockCommand::BeginRenderPass {
            framebuffer: framebuffer.label().to_string(),
            clear_values: clear_values.to_vec(),
        })
    }

    fn end_render_pass(&mut self) -> Result<()> {
        self.record(MockCommand::EndRenderPass)
    }

    fn set_viewport(&mut self, viewport: Viewport) -> Result<()> {
        self.record(MockCommand::SetViewport(viewport))
    }

    fn set_scissor(&mut self, scissor: Rect2D) -> Result<()> {
        self.record(MockCommand::SetScissor(scissor))
    }

    fn bind_pipeline(&mut self, pipeline: &Arc<dyn Pipeline>) -> Result<()> {
        self.record(MockCommand::BindPipeline(pipeline.label().to_string()))
    }

    fn bind_binding_group(
        &mut self,
        _pipeline: &Arc<dyn Pipeline>,
        set_index: u32,
        binding_group: &Arc<dyn BindingGroup>,
    ) -> Result<()> {
        self.record(MockCommand::BindBindingGroup {
            set_index,
            label: binding_group.label().to_string(),
        })?;
        self.retained.push(Arc::clone(binding_group));
        Ok(())
    }

    fn push_constants(&mut self, stages: ShaderStageFlags, offset: u32, data: &[u8]) -> Result<()> {
        self.record(MockCommand::PushConstants { stages, offset, data: data.to_vec() })
    }

    fn bind_vertex_buffer(&mut self, _buffer: &Arc<dyn Buffer>, _offset: u64) -> Result<()> {
        self.record(MockCommand::BindVertexBuffer)
    }

    fn bind_index_buffer(&mut self, _buffer: &Arc<dyn Buffer>, _offset: u64, index_type: IndexType) -> Result<()> {
        self.record(MockCommand::BindIndexBuffer(index_type))
    }

    fn draw(&mut self, vertex_count: u32, first_vertex: u32) -> Result<()> {
        self.check_draw()?;
        self.record(MockCommand::Draw { vertex_count, first_vertex })
    }

    fn draw_indexed(&mut self, index_count: u32, first_index: u32, vertex_offset: i32) -> Result<()> {
        self.check_draw()?;
        self.record(MockCommand::DrawIndexed { index_count, first_index, vertex_offset })
    }
}

// ============================================================================
// Mock RenderPass
// ============================================================================

#[derive(Debug)]
pub struct MockRenderPass {
    pub color_attachment_count: usize,
    pub has_depth: bool,
}

impl RenderPass for MockRenderPass {}

// ============================================================================
// Mock Framebuffer
// ============================================================================

#[derive(Debug)]
pub struct MockFramebuffer {
    pub label: String,
    pub width: u32,
    pub height: u32,
    pub status: FramebufferStatus,
}

impl MockFramebuffer {
    pub fn new(label: &str, width: u32, height: u32) -> Self {
        Self {
            label: label.to_string(),
            width,
            height,
            status: FramebufferStatus::Complete,
        }
    }
}

impl Framebuffer for MockFramebuffer {
    fn label(&self) -> &str {
        &self.label
    }

    fn width(&self) -> u32 {
        self.width
    }

    fn height(&self) -> u32 {
        self.height
    }

    fn status(&self) -> FramebufferStatus {
        self.status.clone()
    }
}

// ============================================================================
// Mock BindingGroup
// ============================================================================

#[derive(Debug)]
pub struct MockBindingGroup {
    pub set_index: u32,
    /// Labels of the bound textures, joined with ','
    pub label: String,
}

impl BindingGroup for MockBindingGroup {
    fn label(&self) -> &str {
        &self.label
    }

    fn set_index(&self) -> u32 {
        self.set_index
    }
}

// ============================================================================
// Mock Swapchain
// ============================================================================

pub struct MockSwapchain {
    pub width: u32,
    pub height: u32,
    pub image_count: u32,
    next_image: u32,
    render_pass: Arc<dyn RenderPass>,
    journal: Journal,
    /// Sizes passed to `recreate`, in call order
    pub recreated: Arc<Mutex<Vec<(u32, u32)>>>,
}

impl MockSwapchain {
    pub fn new(width: u32, height: u32, journal: Journal) -> Self {
        Self {
            width,
            height,
            image_count: 3,
            next_image: 0,
            render_pass: Arc::new(MockRenderPass { color_attachment_count: 1, has_depth: false }),
            journal,
            recreated: Arc::new(Mutex::new(Vec::new())),
        }
    }
}

impl Swapchain for MockSwapchain {
    fn acquire_next_image(&mut self) -> Result<u32> {
        let index = self.next_image;
        self.next_image = (self.next_image + 1) % self.image_count;
        Ok(index)
    }

    fn present(&mut self, image_index: u32) -> Result<()> {
        self.journal.lock().unwrap().push(MockCommand::Present { image_index });
        Ok(())
    }

    fn recreate(&mut self, width: u32, height: u32) -> Result<()> {
        self.width = width;
        self.height = height;
        self.recreated.lock().unwrap().push((width, height));
        Ok(())
    }

    fn image_count(&self) -> usize {
        self.image_count as usize
    }

    fn width(&self) -> u32 {
        self.width
    }

    fn height(&self) -> u32 {
        self.height
    }

    fn format(&self) -> TextureFormat {
        TextureFormat::B8G8R8A8_SRGB
    }

    fn render_pass(&self) -> &Arc<dyn RenderPass> {
        &self.render_pass
    }

    fn framebuffer(&self, image_index: u32) -> Result<Arc<dyn Framebuffer>> {
        if image_index >= self.image_count {
            engine_bail!("penumbra::mock", "Swapchain image {} out of range ({} images)",
                image_index, self.image_count);
        }
        let label = format!("swapchain[{}]", image_index);
        Ok(Arc::new(MockFramebuffer::new(&label, self.width, self.height)))
    }
}

// ============================================================================
// Mock GraphicsDevice
// ============================================================================

/// Mock graphics device that tracks created resources without GPU
pub struct MockGraphicsDevice {
    /// Commands recorded by every command list of this device
    pub journal: Journal,
    /// Labels of created textures, in creation order
    pub created_textures: Arc<Mutex<Vec<String>>>,
    /// Labels of dropped textures, in release order
    pub released_textures: Arc<Mutex<Vec<String>>>,
    /// Stages of created shaders
    pub created_shaders: Arc<Mutex<Vec<ShaderStage>>>,
    /// Labels of created pipelines
    pub created_pipelines: Arc<Mutex<Vec<String>>>,
    /// Number of `wait_idle` calls
    pub wait_idle_calls: Arc<Mutex<u32>>,
    /// Injected failures
    pub failures: Arc<Mutex<MockFailures>>,
    reflections: FxHashMap<String, PipelineReflection>,
}

impl MockGraphicsDevice {
    /// Create a new mock device
    pub fn new() -> Self {
        Self {
            journal: Arc::new(Mutex::new(Vec::new())),
            created_textures: Arc::new(Mutex::new(Vec::new())),
            released_textures: Arc::new(Mutex::new(Vec::new())),
            created_shaders: Arc::new(Mutex::new(Vec::new())),
            created_pipelines: Arc::new(Mutex::new(Vec::new())),
            wait_idle_calls: Arc::new(Mutex::new(0)),
            failures: Arc::new(Mutex::new(MockFailures::default())),
            reflections: FxHashMap::default(),
        }
    }

    /// Reflection returned by pipelines created with `label`
    pub fn register_reflection(&mut self, label: &str, reflection: PipelineReflection) {
        self.reflections.insert(label.to_string(), reflection);
    }

    /// Swapchain sharing this device's journal
    pub fn create_swapchain(&self, width: u32, height: u32) -> MockSwapchain {
        MockSwapchain::new(width, height, self.journal.clone())
    }

    /// Snapshot of the journal
    pub fn commands(&self) -> Vec<MockCommand> {
        self.journal.lock().unwrap().clone()
    }

    /// Labels of textures created and not yet released
    pub fn live_textures(&self) -> Vec<String> {
        let mut live = self.created_textures.lock().unwrap().clone();
        for released in self.released_textures.lock().unwrap().iter() {
            if let Some(pos) = live.iter().position(|l| l == released) {
                live.remove(pos);
            }
        }
        live
    }
}

impl GraphicsDevice for MockGraphicsDevice {
    fn create_texture(&mut self, desc: TextureDesc) -> Result<Arc<dyn Texture>> {
        if desc.width == 0 || desc.height == 0 {
            engine_bail!("penumbra::mock", "Texture '{}' has zero size ({}x{})",
                desc.label, desc.width, desc.height);
        }
        self.created_textures.lock().unwrap().push(desc.label.clone());
        Ok(Arc::new(MockTexture {
            info: TextureInfo::from(&desc),
            released: Some(self.released_textures.clone()),
        }))
    }

    fn create_buffer(&mut self, desc: BufferDesc) -> Result<Arc<dyn Buffer>> {
        Ok(Arc::new(MockBuffer::new(desc.size)))
    }

    fn create_shader(&mut self, desc: ShaderDesc) -> Result<Arc<dyn Shader>> {
        if let Some((stage, diagnostic)) = &self.failures.lock().unwrap().shader_stage {
            if *stage == desc.stage {
                return Err(engine_fail!("penumbra::mock", Error::ProgramBuild {
                    stage: *stage,
                    diagnostic: diagnostic.clone(),
                }));
            }
        }
        if desc.code.is_empty() {
            return Err(engine_fail!("penumbra::mock", Error::ProgramBuild {
                stage: desc.stage,
                diagnostic: "empty shader module".to_string(),
            }));
        }
        self.created_shaders.lock().unwrap().push(desc.stage);
        Ok(Arc::new(MockShader { stage: desc.stage }))
    }

    fn create_pipeline(&mut self, desc: PipelineDesc) -> Result<Arc<dyn Pipeline>> {
        if let Some(message) = &self.failures.lock().unwrap().pipeline {
            engine_bail!("penumbra::mock", "Pipeline '{}' link failed: {}", desc.label, message);
        }
        self.created_pipelines.lock().unwrap().push(desc.label.clone());
        let reflection = self.reflections.get(&desc.label).cloned().unwrap_or_default();
        Ok(Arc::new(MockPipeline::new(&desc.label, reflection, desc.color_formats.len())))
    }

    fn create_command_list(&self) -> Result<Box<dyn CommandList>> {
        Ok(Box::new(MockCommandList::new(self.journal.clone(), self.failures.clone())))
    }

    fn create_render_pass(&self, desc: &RenderPassDesc) -> Result<Arc<dyn RenderPass>> {
        Ok(Arc::new(MockRenderPass {
            color_attachment_count: desc.color_attachments.len(),
            has_depth: desc.depth_attachment.is_some(),
        }))
    }

    fn create_framebuffer(&self, desc: &FramebufferDesc) -> Result<Arc<dyn Framebuffer>> {
        let mut framebuffer = MockFramebuffer::new(desc.label, desc.width, desc.height);

        let attachments: Vec<&Arc<dyn Texture>> = desc.color_attachments.iter()
            .chain(desc.depth_stencil_attachment.iter())
            .collect();
        if attachments.is_empty() {
            framebuffer.status = FramebufferStatus::MissingAttachment;
        } else if attachments.iter()
            .any(|t| t.info().width != desc.width || t.info().height != desc.height)
        {
            framebuffer.status = FramebufferStatus::SizeMismatch;
        }
        if self.failures.lock().unwrap().incomplete_framebuffer.as_deref() == Some(desc.label) {
            framebuffer.status = FramebufferStatus::IncompleteAttachment(
                "injected failure".to_string());
        }

        Ok(Arc::new(framebuffer))
    }

    fn create_binding_group(
        &self,
        _pipeline: &Arc<dyn Pipeline>,
        set_index: u32,
        resources: &[BindingResource],
    ) -> Result<Arc<dyn BindingGroup>> {
        let textures: Vec<String> = resources.iter()
            .filter_map(|r| match r {
                BindingResource::SampledTexture(texture, _) => Some(texture.info().label.clone()),
                BindingResource::UniformBuffer(_) => None,
            })
            .collect();
        Ok(Arc::new(MockBindingGroup {
            set_index,
            label: textures.join(","),
        }))
    }

    fn submit_with_swapchain(
        &self,
        _commands: &[&dyn CommandList],
        _swapchain: &dyn Swapchain,
        image_index: u32,
    ) -> Result<()> {
        if self.failures.lock().unwrap().submit {
            engine_bail!("penumbra::mock", "vkQueueSubmit: injected failure");
        }
        self.journal.lock().unwrap().push(MockCommand::Submit { image_index });
        Ok(())
    }

    fn wait_idle(&self) -> Result<()> {
        *self.wait_idle_calls.lock().unwrap() += 1;
        Ok(())
    }

    fn stats(&self) -> GraphicsDeviceStats {
        let draw_calls = self.journal.lock().unwrap().iter()
            .filter(|c| matches!(c, MockCommand::Draw { .. } | MockCommand::DrawIndexed { .. }))
            .count() as u32;
        GraphicsDeviceStats {
            draw_calls,
            ..GraphicsDeviceStats::default()
        }
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
#[path = "mock_graphics_device_tests.rs"]
mod tests;

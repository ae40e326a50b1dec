/// GraphicsDevice trait - main GPU factory interface

use std::sync::Arc;

use crate::error::Result;
use crate::graphics_device::{
    Buffer, Texture, Shader, Pipeline, CommandList, RenderPass, Framebuffer,
    BindingGroup, Swapchain,
    BufferDesc, TextureDesc, ShaderDesc, PipelineDesc, RenderPassDesc,
    FramebufferDesc, BindingResource,
};

/// Graphics device statistics
#[derive(Debug, Clone, Copy, Default)]
pub struct GraphicsDeviceStats {
    /// Number of draw calls submitted since creation
    pub draw_calls: u32,
    /// Number of triangles submitted since creation
    pub triangles: u32,
    /// GPU memory used (bytes)
    pub gpu_memory_used: u64,
}

/// Main graphics device trait
///
/// This is the central factory interface for creating GPU resources and
/// submitting recorded work. Context and window creation happen outside
/// this crate: a backend hands an already initialized device to the
/// frame driver.
///
/// Every object returned here releases its GPU counterpart when the last
/// owner drops it, so error paths never need explicit cleanup.
pub trait GraphicsDevice: Send + Sync {
    /// Create a texture
    ///
    /// # Arguments
    ///
    /// * `desc` - Texture descriptor
    ///
    /// # Returns
    ///
    /// A shared pointer to the created texture
    fn create_texture(&mut self, desc: TextureDesc) -> Result<Arc<dyn Texture>>;

    /// Create a buffer
    fn create_buffer(&mut self, desc: BufferDesc) -> Result<Arc<dyn Buffer>>;

    /// Create a shader module
    ///
    /// Compilation diagnostics are reported as `Error::ProgramBuild`
    /// carrying the failing stage.
    fn create_shader(&mut self, desc: ShaderDesc) -> Result<Arc<dyn Shader>>;

    /// Create (link) a graphics pipeline
    ///
    /// The returned pipeline exposes the reflected interface of its
    /// shaders through `Pipeline::reflection()`.
    fn create_pipeline(&mut self, desc: PipelineDesc) -> Result<Arc<dyn Pipeline>>;

    /// Create a command list for recording rendering commands
    fn create_command_list(&self) -> Result<Box<dyn CommandList>>;

    /// Create a render pass describing attachment load/store behaviour
    fn create_render_pass(&self, desc: &RenderPassDesc) -> Result<Arc<dyn RenderPass>>;

    /// Create a framebuffer grouping attachments for a render pass
    ///
    /// The framebuffer is returned even when it is not usable; callers
    /// must check `Framebuffer::status()` before drawing into it.
    fn create_framebuffer(&self, desc: &FramebufferDesc) -> Result<Arc<dyn Framebuffer>>;

    /// Create an immutable binding group for a pipeline set
    ///
    /// # Arguments
    ///
    /// * `pipeline` - Pipeline whose reflected layout describes the set
    /// * `set_index` - Set index
    /// * `resources` - One resource per binding, in binding order
    fn create_binding_group(
        &self,
        pipeline: &Arc<dyn Pipeline>,
        set_index: u32,
        resources: &[BindingResource],
    ) -> Result<Arc<dyn BindingGroup>>;

    /// Submit recorded command lists and signal the swapchain image as ready
    fn submit_with_swapchain(
        &self,
        commands: &[&dyn CommandList],
        swapchain: &dyn Swapchain,
        image_index: u32,
    ) -> Result<()>;

    /// Wait for all GPU operations to complete
    fn wait_idle(&self) -> Result<()>;

    /// Get statistics about the device
    fn stats(&self) -> GraphicsDeviceStats;
}

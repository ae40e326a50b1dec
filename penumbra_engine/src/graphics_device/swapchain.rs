/// Swapchain trait - for window presentation

use std::sync::Arc;
use crate::error::Result;
use crate::graphics_device::{Framebuffer, RenderPass, TextureFormat};

/// Swapchain for presenting rendered images to a window
///
/// Manages a set of images that are presented to the screen in sequence.
/// The last pass of a frame renders straight into the framebuffer of the
/// acquired image.
pub trait Swapchain: Send + Sync {
    /// Acquire the next available swapchain image index
    fn acquire_next_image(&mut self) -> Result<u32>;

    /// Present the rendered image to the screen
    ///
    /// # Arguments
    ///
    /// * `image_index` - Index of the image to present (from acquire_next_image)
    fn present(&mut self, image_index: u32) -> Result<()>;

    /// Recreate the swapchain (e.g., after window resize)
    ///
    /// # Arguments
    ///
    /// * `width` - New width in pixels
    /// * `height` - New height in pixels
    fn recreate(&mut self, width: u32, height: u32) -> Result<()>;

    /// Get the number of images in the swapchain
    fn image_count(&self) -> usize;

    /// Get the width of the swapchain images in pixels
    fn width(&self) -> u32;

    /// Get the height of the swapchain images in pixels
    fn height(&self) -> u32;

    /// Get the pixel format of the swapchain images
    fn format(&self) -> TextureFormat;

    /// Render pass compatible with every swapchain framebuffer
    fn render_pass(&self) -> &Arc<dyn RenderPass>;

    /// Framebuffer wrapping the swapchain image at `image_index`
    fn framebuffer(&self, image_index: u32) -> Result<Arc<dyn Framebuffer>>;
}

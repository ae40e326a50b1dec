/// Frame configuration: sizes and formats of the intermediate targets.

use crate::error::{Error, Result};
use crate::graphics_device::TextureFormat;
use crate::target::{ColorAttachmentDesc, ComponentType};
use crate::engine_fail;

const SOURCE: &str = "penumbra::FrameConfig";

#[derive(Debug, Clone, PartialEq)]
pub struct FrameConfig {
    /// Edge length of the square shadow map (fixed across resizes)
    pub shadow_map_size: u32,
    /// G-buffer color attachments: albedo then normal
    pub gbuffer_attachments: Vec<ColorAttachmentDesc>,
    /// Storage of the lit image fed to the DoF pass
    pub composite_attachment: ColorAttachmentDesc,
    /// Depth format of the shadow map and the G-buffer
    pub depth_format: TextureFormat,
    /// Clear color of the G-buffer, composite and surface
    pub clear_color: [f32; 4],
}

impl Default for FrameConfig {
    fn default() -> Self {
        Self {
            shadow_map_size: 2048,
            gbuffer_attachments: vec![ColorAttachmentDesc::rgba16f(), ColorAttachmentDesc::rgba16f()],
            composite_attachment: ColorAttachmentDesc::rgba16f(),
            depth_format: TextureFormat::D32_FLOAT,
            clear_color: [0.0, 0.0, 0.0, 1.0],
        }
    }
}

impl FrameConfig {
    /// Reject configurations the passes cannot render with
    pub fn validate(&self) -> Result<()> {
        if self.shadow_map_size == 0 {
            return Err(fail("shadow map size must be non-zero".to_string()));
        }
        if self.gbuffer_attachments.len() < 2 {
            return Err(fail(format!(
                "G-buffer needs albedo and normal attachments, got {}", self.gbuffer_attachments.len())));
        }
        for attachment in &self.gbuffer_attachments {
            attachment.validate()?;
        }
        self.composite_attachment.validate()?;
        if self.composite_attachment.component == ComponentType::UnsignedByte {
            return Err(fail(format!(
                "composite storage must be floating point, got {:?}", self.composite_attachment.format)));
        }
        if !self.depth_format.is_depth() {
            return Err(fail(format!("{:?} is not a depth format", self.depth_format)));
        }
        Ok(())
    }
}

fn fail(message: String) -> Error {
    engine_fail!(SOURCE, Error::InvalidResource(message))
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;

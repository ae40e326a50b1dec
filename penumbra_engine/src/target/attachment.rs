/// Attachment descriptors and non-owning attachment references

use std::fmt;
use std::sync::{Arc, Weak};

use crate::error::{Error, Result};
use crate::graphics_device::{Texture, TextureFormat};
use crate::engine_fail;

/// Pixel layout of a color attachment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PixelLayout {
    R,
    Rg,
    Rgba,
}

impl PixelLayout {
    pub fn channel_count(&self) -> u32 {
        match self {
            PixelLayout::R => 1,
            PixelLayout::Rg => 2,
            PixelLayout::Rgba => 4,
        }
    }
}

/// Component (sample) type of a color attachment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ComponentType {
    /// 8-bit normalized
    UnsignedByte,
    /// 16-bit float
    HalfFloat,
    /// 32-bit float
    Float,
}

/// Format triple of one color attachment: pixel layout, component type
/// and internal storage format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ColorAttachmentDesc {
    pub layout: PixelLayout,
    pub component: ComponentType,
    pub format: TextureFormat,
}

impl ColorAttachmentDesc {
    pub fn new(layout: PixelLayout, component: ComponentType, format: TextureFormat) -> Self {
        Self { layout, component, format }
    }

    /// RGBA, 8 bits per channel
    pub fn rgba8() -> Self {
        Self::new(PixelLayout::Rgba, ComponentType::UnsignedByte, TextureFormat::R8G8B8A8_UNORM)
    }

    /// RGBA, 16-bit float per channel
    pub fn rgba16f() -> Self {
        Self::new(PixelLayout::Rgba, ComponentType::HalfFloat, TextureFormat::R16G16B16A16_SFLOAT)
    }

    /// RGBA, 32-bit float per channel
    pub fn rgba32f() -> Self {
        Self::new(PixelLayout::Rgba, ComponentType::Float, TextureFormat::R32G32B32A32_SFLOAT)
    }

    /// Check that the three parts of the triple agree with each other
    pub fn validate(&self) -> Result<()> {
        if self.format.is_depth() {
            return Err(engine_fail!("penumbra::ColorAttachmentDesc", Error::InvalidResource(
                format!("depth format {:?} used as a color attachment", self.format))));
        }
        if self.format.channel_count() != self.layout.channel_count() {
            return Err(engine_fail!("penumbra::ColorAttachmentDesc", Error::InvalidResource(
                format!("layout {:?} does not match format {:?}", self.layout, self.format))));
        }
        let component_ok = match self.component {
            ComponentType::UnsignedByte => !self.format.is_float(),
            ComponentType::HalfFloat => matches!(
                self.format,
                TextureFormat::R16G16_SFLOAT | TextureFormat::R16G16B16A16_SFLOAT
            ),
            ComponentType::Float => matches!(
                self.format,
                TextureFormat::R32_SFLOAT | TextureFormat::R32G32B32A32_SFLOAT
            ),
        };
        if !component_ok {
            return Err(engine_fail!("penumbra::ColorAttachmentDesc", Error::InvalidResource(
                format!("component type {:?} does not match format {:?}", self.component, self.format))));
        }
        Ok(())
    }
}

/// Which attachment of a render target a reference points at
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AttachmentKind {
    Color(usize),
    Depth,
}

impl fmt::Display for AttachmentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AttachmentKind::Color(index) => write!(f, "color{}", index),
            AttachmentKind::Depth => write!(f, "depth"),
        }
    }
}

/// Non-owning reference to an attachment of a render target
///
/// The render target keeps the only owning handle. Once it is dropped
/// (shutdown or rebuild on resize) `texture()` fails with
/// `Error::StaleAttachment` instead of handing out a dead image.
#[derive(Clone)]
pub struct AttachmentRef {
    target: String,
    kind: AttachmentKind,
    texture: Weak<dyn Texture>,
}

impl AttachmentRef {
    pub(crate) fn new(target: &str, kind: AttachmentKind, texture: &Arc<dyn Texture>) -> Self {
        Self {
            target: target.to_string(),
            kind,
            texture: Arc::downgrade(texture),
        }
    }

    /// Name of the render target that owns the attachment
    pub fn target_name(&self) -> &str {
        &self.target
    }

    pub fn kind(&self) -> AttachmentKind {
        self.kind
    }

    /// True once the owning render target has been destroyed
    pub fn is_stale(&self) -> bool {
        self.texture.strong_count() == 0
    }

    /// Resolve the reference to the live texture
    pub fn texture(&self) -> Result<Arc<dyn Texture>> {
        self.texture.upgrade().ok_or_else(|| {
            engine_fail!("penumbra::AttachmentRef", Error::StaleAttachment(
                format!("{}.{} was destroyed; fetch it again from the rebuilt target",
                    self.target, self.kind)))
        })
    }
}

impl fmt::Debug for AttachmentRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AttachmentRef")
            .field("target", &self.target)
            .field("kind", &self.kind)
            .field("stale", &self.is_stale())
            .finish()
    }
}

#[cfg(test)]
#[path = "attachment_tests.rs"]
mod tests;

/// Framebuffer trait - groups render target attachments for a render pass
///
/// A framebuffer binds together color and depth attachments that a render
/// pass will render into. Created once per render target and recreated
/// only when the target is rebuilt (e.g., window resize).

use std::fmt;
use std::sync::Arc;
use crate::graphics_device::{RenderPass, Texture};

/// Result of a framebuffer completeness check
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FramebufferStatus {
    /// Every attachment is present, sized and formatted consistently
    Complete,
    /// No attachment at all
    MissingAttachment,
    /// An attachment cannot be rendered to (wrong usage or format)
    IncompleteAttachment(String),
    /// Attachments disagree on width/height
    SizeMismatch,
    /// The combination of formats is not supported by the backend
    Unsupported(String),
}

impl FramebufferStatus {
    pub fn is_complete(&self) -> bool {
        matches!(self, FramebufferStatus::Complete)
    }
}

impl fmt::Display for FramebufferStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FramebufferStatus::Complete => write!(f, "complete"),
            FramebufferStatus::MissingAttachment => write!(f, "missing attachment"),
            FramebufferStatus::IncompleteAttachment(msg) => write!(f, "incomplete attachment: {}", msg),
            FramebufferStatus::SizeMismatch => write!(f, "attachment sizes differ"),
            FramebufferStatus::Unsupported(msg) => write!(f, "unsupported: {}", msg),
        }
    }
}

/// Framebuffer - groups color and depth attachments together
///
/// Created via `GraphicsDevice::create_framebuffer()`.
pub trait Framebuffer: Send + Sync {
    /// Debug label given at creation
    fn label(&self) -> &str;

    /// Get the width in pixels
    fn width(&self) -> u32;

    /// Get the height in pixels
    fn height(&self) -> u32;

    /// Completeness of the attachment set
    fn status(&self) -> FramebufferStatus;
}

/// Descriptor for creating a framebuffer
pub struct FramebufferDesc<'a> {
    /// Debug label
    pub label: &'a str,
    /// The render pass this framebuffer is compatible with
    pub render_pass: &'a Arc<dyn RenderPass>,
    /// Color attachments, in location order
    pub color_attachments: Vec<Arc<dyn Texture>>,
    /// Optional depth attachment
    pub depth_stencil_attachment: Option<Arc<dyn Texture>>,
    /// Width in pixels
    pub width: u32,
    /// Height in pixels
    pub height: u32,
}

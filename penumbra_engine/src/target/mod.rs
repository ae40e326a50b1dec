//! Render target management module
//!
//! Provides off-screen render target creation and management.
//! A render target owns a set of color attachments plus one depth
//! attachment, validated for completeness before it can be used.
//! Later passes sample its attachments through non-owning
//! `AttachmentRef`s that go stale when the target is rebuilt.

mod attachment;
mod draw_state;
mod render_target;
mod target_manager;

pub use attachment::{AttachmentKind, AttachmentRef, ColorAttachmentDesc, ComponentType, PixelLayout};
pub use draw_state::DrawState;
pub use render_target::{RenderTarget, RenderTargetDesc};
pub use target_manager::{TargetManager, TargetSizing};

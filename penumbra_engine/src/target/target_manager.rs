/// Central render target manager.
///
/// Manages named render targets and rebuilds the window-sized ones when
/// the presentation surface changes size.

use rustc_hash::FxHashMap;

use crate::error::{Error, Result};
use crate::graphics_device::GraphicsDevice;
use crate::{engine_bail, engine_fail, engine_info};
use super::render_target::{RenderTarget, RenderTargetDesc};

/// How a render target's size is chosen
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TargetSizing {
    /// Follows the presentation surface; rebuilt on every resize
    Window,
    /// Keeps the size it was created with (e.g., the shadow map)
    Fixed,
}

struct ManagedTarget {
    sizing: TargetSizing,
    target: RenderTarget,
}

/// Target manager
///
/// Stores named render targets. Names are kept in creation order so that
/// rebuilds happen in a deterministic sequence.
pub struct TargetManager {
    render_targets: FxHashMap<String, ManagedTarget>,
    order: Vec<String>,
}

impl TargetManager {
    /// Create a new empty target manager
    pub fn new() -> Self {
        Self {
            render_targets: FxHashMap::default(),
            order: Vec::new(),
        }
    }

    /// Create a new named render target
    ///
    /// Returns a reference to the created render target.
    ///
    /// # Errors
    ///
    /// Returns an error if a render target with the same name already
    /// exists, or if the target itself fails to build.
    pub fn create_render_target(
        &mut self,
        device: &mut dyn GraphicsDevice,
        desc: RenderTargetDesc,
        sizing: TargetSizing,
    ) -> Result<&RenderTarget> {
        if self.render_targets.contains_key(&desc.name) {
            engine_bail!("penumbra::TargetManager",
                "RenderTarget '{}' already exists", desc.name);
        }

        let name = desc.name.clone();
        let target = RenderTarget::new(device, desc)?;
        self.order.push(name.clone());
        let managed = self.render_targets.entry(name).or_insert(ManagedTarget { sizing, target });
        Ok(&managed.target)
    }

    /// Get a render target by name
    pub fn render_target(&self, name: &str) -> Option<&RenderTarget> {
        self.render_targets.get(name).map(|m| &m.target)
    }

    /// Sizing policy of a render target
    pub fn sizing(&self, name: &str) -> Option<TargetSizing> {
        self.render_targets.get(name).map(|m| m.sizing)
    }

    /// Remove a render target by name
    ///
    /// Returns the removed render target, or None if not found.
    pub fn remove_render_target(&mut self, name: &str) -> Option<RenderTarget> {
        self.order.retain(|n| n != name);
        self.render_targets.remove(name).map(|m| m.target)
    }

    /// Get the number of render targets
    pub fn render_target_count(&self) -> usize {
        self.render_targets.len()
    }

    /// Get all render target names, in creation order
    pub fn render_target_names(&self) -> Vec<&str> {
        self.order.iter().map(|n| n.as_str()).collect()
    }

    /// Rebuild every window-sized target at `width` x `height`
    ///
    /// All replacements are built before any target is swapped, so a
    /// failure leaves every previous target in place at its old size.
    /// After a successful rebuild every `AttachmentRef` to the old
    /// attachments is stale.
    pub fn resize(&mut self, device: &mut dyn GraphicsDevice, width: u32, height: u32) -> Result<()> {
        if width == 0 || height == 0 {
            return Err(engine_fail!("penumbra::TargetManager", Error::InvalidResource(
                format!("cannot resize render targets to {}x{}", width, height))));
        }

        let mut staged = Vec::new();
        for name in &self.order {
            let Some(managed) = self.render_targets.get(name) else {
                continue;
            };
            if managed.sizing != TargetSizing::Window {
                continue;
            }
            let desc = managed.target.desc().resized(width, height);
            staged.push((name.clone(), RenderTarget::new(device, desc)?));
        }

        for (name, target) in staged {
            if let Some(managed) = self.render_targets.get_mut(&name) {
                managed.target = target;
            }
        }

        engine_info!("penumbra::TargetManager", "Window-sized render targets rebuilt at {}x{}",
            width, height);
        Ok(())
    }

    /// Remove all render targets
    pub fn clear(&mut self) {
        self.render_targets.clear();
        self.order.clear();
    }
}

impl Default for TargetManager {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
#[path = "target_manager_tests.rs"]
mod tests;

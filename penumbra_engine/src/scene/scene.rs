/// Scene contract and the provided container.
///
/// Passes only need to enumerate drawables. `SimpleScene` stores them in
/// a SlotMap so keys stay valid across removals; drawing follows
/// insertion order.

use std::sync::Arc;
use glam::Mat4;
use slotmap::{new_key_type, SlotMap};
use crate::scene::{Mesh, Material};

new_key_type! {
    /// Stable key of a drawable inside a `SimpleScene`
    pub struct DrawableKey;
}

/// Mesh + material + model matrix
#[derive(Clone)]
pub struct Drawable {
    pub mesh: Arc<Mesh>,
    pub material: Arc<Material>,
    pub transform: Mat4,
}

impl Drawable {
    pub fn new(mesh: Arc<Mesh>, material: Arc<Material>, transform: Mat4) -> Self {
        Self { mesh, material, transform }
    }
}

/// What the passes draw
pub trait Scene: Send + Sync {
    /// Drawables in draw order
    fn drawables(&self) -> Box<dyn Iterator<Item = &Drawable> + '_>;
}

#[derive(Default)]
pub struct SimpleScene {
    drawables: SlotMap<DrawableKey, Drawable>,
    order: Vec<DrawableKey>,
}

impl SimpleScene {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, drawable: Drawable) -> DrawableKey {
        let key = self.drawables.insert(drawable);
        self.order.push(key);
        key
    }

    pub fn remove(&mut self, key: DrawableKey) -> Option<Drawable> {
        let removed = self.drawables.remove(key)?;
        self.order.retain(|&k| k != key);
        Some(removed)
    }

    pub fn get(&self, key: DrawableKey) -> Option<&Drawable> {
        self.drawables.get(key)
    }

    /// Update the model matrix of a drawable
    pub fn set_transform(&mut self, key: DrawableKey, transform: Mat4) -> bool {
        match self.drawables.get_mut(key) {
            Some(drawable) => {
                drawable.transform = transform;
                true
            }
            None => false,
        }
    }

    pub fn len(&self) -> usize {
        self.drawables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.drawables.is_empty()
    }
}

impl Scene for SimpleScene {
    fn drawables(&self) -> Box<dyn Iterator<Item = &Drawable> + '_> {
        Box::new(self.order.iter().filter_map(|&key| self.drawables.get(key)))
    }
}

#[cfg(test)]
#[path = "scene_tests.rs"]
mod tests;

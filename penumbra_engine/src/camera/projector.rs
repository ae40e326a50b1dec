/// Projection contracts consumed by the passes.

use glam::{Mat4, Vec3};

/// Anything the scene can be rendered from.
pub trait Projector: Send + Sync {
    /// View matrix (world to eye)
    fn view_matrix(&self) -> Mat4;

    /// Projection matrix, zero-to-one clip depth
    fn projection_matrix(&self) -> Mat4;

    /// Distance to the near clip plane
    fn near(&self) -> f32;

    /// Distance to the far clip plane
    fn far(&self) -> f32;

    /// Combined view-projection matrix (projection * view)
    fn view_projection_matrix(&self) -> Mat4 {
        self.projection_matrix() * self.view_matrix()
    }
}

/// A projector that follows the window aspect ratio.
pub trait ViewCamera: Projector {
    fn set_aspect_ratio(&mut self, aspect_ratio: f32);
}

/// The single shadow-casting light.
pub trait LightSource: Projector {
    fn position(&self) -> Vec3;

    /// Linear RGB color
    fn color(&self) -> Vec3;

    fn intensity(&self) -> f32;
}

/// Drawing strategies.
///
/// A Drawer issues every drawable of a scene into the current pass with
/// one material program kind.

use glam::Mat4;
use crate::error::Result;
use crate::render_graph::{PassContext, UniformValue};
use crate::scene::{ProgramKind, Scene};

/// Uniform names every scene program exposes
pub const MODEL_UNIFORM: &str = "model";
pub const VIEW_PROJECTION_UNIFORM: &str = "view_projection";

/// Strategy for drawing a scene.
///
/// Called with the pass output bound. `&self` because drawing is
/// stateless.
pub trait Drawer: Send + Sync {
    fn draw(
        &self,
        ctx: &mut PassContext,
        scene: &dyn Scene,
        kind: ProgramKind,
        view_projection: Mat4,
    ) -> Result<()>;
}

/// Forward drawer: draws each drawable in scene order, no sorting.
///
/// Pushes `model` and `view_projection` for every drawable.
#[derive(Debug, Default)]
pub struct ForwardDrawer;

impl ForwardDrawer {
    pub fn new() -> Self {
        Self
    }
}

impl Drawer for ForwardDrawer {
    fn draw(
        &self,
        ctx: &mut PassContext,
        scene: &dyn Scene,
        kind: ProgramKind,
        view_projection: Mat4,
    ) -> Result<()> {
        for drawable in scene.drawables() {
            let material = &drawable.material;
            ctx.use_program(material.program(kind)?)?;
            if let Some(group) = material.binding_group() {
                ctx.bind_group(group)?;
            }
            ctx.set_uniform(MODEL_UNIFORM, UniformValue::Mat4(drawable.transform))?;
            ctx.set_uniform(VIEW_PROJECTION_UNIFORM, UniformValue::Mat4(view_projection))?;
            ctx.draw_mesh(&drawable.mesh)?;
        }
        Ok(())
    }
}

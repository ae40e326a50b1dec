//! Scene module
//!
//! The minimal scene contract the passes draw from: drawables made of a
//! mesh, a material and a model matrix, plus the forward drawer that
//! issues them into a pass.

mod mesh;
mod material;
mod scene;
mod drawer;

pub use mesh::Mesh;
pub use material::{Material, ProgramKind, RenderMode};
pub use scene::{Scene, Drawable, DrawableKey, SimpleScene};
pub use drawer::{Drawer, ForwardDrawer, MODEL_UNIFORM, VIEW_PROJECTION_UNIFORM};

//! Frame passes
//!
//! The four passes of a frame, in dependency order:
//!
//! - `ShadowPass`: scene depth from the light into the shadow target
//! - `GeometryPass`: albedo, normal and depth into the G-buffer
//! - `CompositePass`: G-buffer + shadow map lit into the composite target
//! - `DofPass`: composite color blurred by G-buffer depth onto the surface

mod program_interface;
mod shadow_pass;
mod geometry_pass;
mod composite_pass;
mod dof_pass;

pub use shadow_pass::ShadowPass;
pub use geometry_pass::GeometryPass;
pub use composite_pass::CompositePass;
pub use dof_pass::DofPass;

/// Render target names shared by the passes and the frame driver
pub const SHADOW_TARGET: &str = "shadow";
pub const GBUFFER_TARGET: &str = "gbuffer";
pub const COMPOSITE_TARGET: &str = "composite";

/// G-buffer color attachment slots
pub const GBUFFER_ALBEDO: usize = 0;
pub const GBUFFER_NORMAL: usize = 1;

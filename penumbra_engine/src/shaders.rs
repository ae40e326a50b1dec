//! GLSL sources of the post-process programs.
//!
//! Compile them to SPIR-V outside the crate (e.g. `glslangValidator -V`)
//! and hand the binaries to `PostPrograms::build`.

/// Screen-covering triangle, no vertex input
pub const FULLSCREEN_VERTEX: &str = include_str!("../shaders/fullscreen.vert.glsl");

/// Deferred lighting with a shadow map
pub const COMPOSITE_FRAGMENT: &str = include_str!("../shaders/composite.frag.glsl");

/// Depth of field
pub const DOF_FRAGMENT: &str = include_str!("../shaders/dof.frag.glsl");

#[cfg(test)]
#[path = "shaders_tests.rs"]
mod tests;

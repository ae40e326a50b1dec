//! Depth-of-field module
//!
//! User-facing focus settings and the per-frame parameter bundle the DoF
//! pass uploads. `DofParams` also carries the CPU statement of the
//! shader math (`shaders/dof.frag.glsl`).

mod settings;
mod params;

pub use settings::DofSettings;
pub use params::DofParams;

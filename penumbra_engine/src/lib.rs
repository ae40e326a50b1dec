/*!
# Penumbra Engine

Shadowed deferred rendering with a depth-of-field post-process, written
against backend-agnostic GPU traits.

A frame runs four passes over off-screen render targets:

- **Shadow**: scene depth from the light into a fixed-size shadow map
- **Geometry**: albedo, normal and depth into the G-buffer
- **Composite**: G-buffer + shadow map lit into a floating-point target
- **DoF**: composite color blurred by scene depth onto the surface

## Architecture

- **GraphicsDevice**: factory trait for GPU resources (backends implement it)
- **RenderTarget / TargetManager**: named off-screen targets with shared,
  non-owning attachment references
- **RenderGraph**: declared pass inputs/outputs, validated and ordered once
- **FrameDriver**: records, submits and presents frames; handles resize
*/

// Internal modules
mod error;
mod engine;
pub mod log;
pub mod graphics_device;
pub mod target;
pub mod render_graph;
pub mod scene;
pub mod camera;
pub mod dof;
pub mod passes;
pub mod frame;
pub mod controls;
pub mod shaders;

#[cfg(test)]
mod test_fixtures;

// Main penumbra namespace module
pub mod penumbra {
    // Error types
    pub use crate::error::{Error, Result};

    // Logging entry point
    pub use crate::engine::Engine;

    // Device factory trait
    pub use crate::graphics_device::GraphicsDevice;

    // Frame driver and its inputs
    pub use crate::frame::{FrameDriver, FrameConfig, FrameInputs, PostPrograms, ProgramSources};

    // Logging sub-module (types only, macros live at the crate root)
    pub mod log {
        pub use crate::log::{Logger, LogEntry, LogSeverity, DefaultLogger};
    }

    // Render sub-module with all GPU-facing types
    pub mod render {
        pub use crate::graphics_device::*;
    }
}

// Re-export math library at crate root
pub use glam;

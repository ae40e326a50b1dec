//! Render graph module
//!
//! A render graph is a directed acyclic graph (DAG) describing how a frame
//! is rendered: which passes execute, which render targets they read and
//! write, and in what order. Wiring is validated once by
//! `RenderGraph::compile`; afterwards each pass records through a
//! `PassContext` that only exposes what the pass declared.

mod pass_io;
mod pass_node;
mod pass_context;
mod render_graph;
mod uniform;

pub use pass_io::{PassIo, PassOutput, ResourceRead};
pub use pass_node::PassNode;
pub use pass_context::{PassContext, SurfaceFrame, TextureInput};
pub use render_graph::RenderGraph;
pub use uniform::UniformValue;

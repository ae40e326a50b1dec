/// Pass node trait.
///
/// High-level description of a rendering step (shadow, geometry,
/// compositing, post-process). This is a DAG node, not to be confused
/// with `graphics_device::RenderPass` which is the low-level GPU render
/// pass configuration.

use crate::error::Result;
use crate::render_graph::{PassContext, PassIo};

pub trait PassNode: Send + Sync {
    /// Unique name inside the graph (also used in error reports)
    fn name(&self) -> &str;

    /// Declared reads and output
    fn io(&self) -> &PassIo;

    /// Record the pass
    ///
    /// The context is bound to this pass's declaration: reading an
    /// undeclared attachment fails, and the output must be unbound
    /// before returning.
    fn execute(&self, ctx: &mut PassContext) -> Result<()>;
}

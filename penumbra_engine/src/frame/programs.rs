/// Post-process program construction.
///
/// Builds the compositing and DoF pipelines from caller-supplied SPIR-V.
/// Both are fullscreen programs: no vertex input, no depth test, one
/// color output.

use std::sync::Arc;
use crate::error::{Error, Result};
use crate::graphics_device::{
    GraphicsDevice, Pipeline, PipelineDesc, Shader, ShaderDesc, ShaderStage, TextureFormat,
    VertexLayout, PrimitiveTopology, RasterizationState, CullMode, DepthStencilState,
};
use crate::{engine_debug, engine_fail};

const SOURCE: &str = "penumbra::PostPrograms";

/// SPIR-V binaries of the post-process stages
#[derive(Debug, Clone, Copy)]
pub struct ProgramSources<'a> {
    pub fullscreen_vertex: &'a [u8],
    pub composite_fragment: &'a [u8],
    pub dof_fragment: &'a [u8],
}

pub struct PostPrograms {
    pub composite: Arc<dyn Pipeline>,
    pub dof: Arc<dyn Pipeline>,
}

impl PostPrograms {
    /// Compile and link both programs
    ///
    /// # Arguments
    ///
    /// * `composite_format` - Storage format of the composite target
    /// * `surface_format` - Format of the presentation surface
    ///
    /// # Errors
    ///
    /// `Error::ProgramBuild` naming the failing stage. Link failures are
    /// reported against the fragment stage.
    pub fn build(
        device: &mut dyn GraphicsDevice,
        sources: &ProgramSources,
        composite_format: TextureFormat,
        surface_format: TextureFormat,
    ) -> Result<Self> {
        let vertex = compile(device, sources.fullscreen_vertex, ShaderStage::Vertex)?;
        let composite_fragment = compile(device, sources.composite_fragment, ShaderStage::Fragment)?;
        let dof_fragment = compile(device, sources.dof_fragment, ShaderStage::Fragment)?;

        let composite = link(device, "composite", &vertex, composite_fragment, composite_format)?;
        let dof = link(device, "dof", &vertex, dof_fragment, surface_format)?;

        engine_debug!(SOURCE, "Post-process programs built (composite {:?}, surface {:?})",
            composite_format, surface_format);
        Ok(Self { composite, dof })
    }
}

fn compile(device: &mut dyn GraphicsDevice, code: &[u8], stage: ShaderStage) -> Result<Arc<dyn Shader>> {
    device.create_shader(ShaderDesc {
        code,
        stage,
        entry_point: "main".to_string(),
    })
}

fn link(
    device: &mut dyn GraphicsDevice,
    label: &str,
    vertex: &Arc<dyn Shader>,
    fragment: Arc<dyn Shader>,
    color_format: TextureFormat,
) -> Result<Arc<dyn Pipeline>> {
    let desc = PipelineDesc {
        label: label.to_string(),
        vertex_shader: Arc::clone(vertex),
        fragment_shader: fragment,
        vertex_layout: VertexLayout::default(),
        topology: PrimitiveTopology::TriangleList,
        rasterization: RasterizationState {
            cull_mode: CullMode::None,
            ..RasterizationState::default()
        },
        depth_stencil: DepthStencilState::disabled(),
        color_formats: vec![color_format],
        depth_format: None,
    };
    device.create_pipeline(desc).map_err(|error| match error {
        Error::ProgramBuild { .. } => error,
        other => engine_fail!(SOURCE, Error::ProgramBuild {
            stage: ShaderStage::Fragment,
            diagnostic: format!("linking '{}': {}", label, other),
        }),
    })
}

#[cfg(test)]
#[path = "programs_tests.rs"]
mod tests;

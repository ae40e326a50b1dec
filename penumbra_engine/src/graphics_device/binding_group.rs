/// BindingGroup trait and binding resources
///
/// A BindingGroup is an immutable set of GPU resource bindings (textures,
/// buffers, samplers), the engine's abstraction over descriptor sets.
///
/// Key properties:
/// - Immutable after creation
/// - Layout deduced from the Pipeline reflection
/// - Pool managed internally by the graphics device

use crate::graphics_device::{Texture, Buffer};

/// Sampler preset used when a texture is bound
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SamplerType {
    /// Bilinear filtering, clamp to edge (color inputs)
    LinearClamp,
    /// Point sampling, clamp to edge (depth read as a value)
    NearestClamp,
    /// Hardware depth comparison (shadow map lookups)
    DepthCompare,
}

/// A concrete resource to bind into a BindingGroup
pub enum BindingResource<'a> {
    /// Uniform buffer binding
    UniformBuffer(&'a dyn Buffer),
    /// Sampled texture (the backend resolves the actual GPU sampler from the type)
    SampledTexture(&'a dyn Texture, SamplerType),
}

/// An immutable set of GPU resource bindings.
///
/// Once created, a BindingGroup cannot be modified; create a new one
/// to change resources.
pub trait BindingGroup: Send + Sync {
    /// Debug label
    fn label(&self) -> &str;

    /// Returns the set index this BindingGroup was created for
    fn set_index(&self) -> u32;
}

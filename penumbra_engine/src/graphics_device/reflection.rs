//! Reflected shader interface
//!
//! Backends fill a `PipelineReflection` from the shader bytecode when a
//! pipeline is linked. The pass layer uses it to address uniforms and
//! textures by name instead of by raw offset or binding number.

use bitflags::bitflags;
use crate::graphics_device::ShaderStage;

bitflags! {
    /// Shader stage visibility flags
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct ShaderStageFlags: u32 {
        const VERTEX = 0x01;
        const FRAGMENT = 0x02;
        const COMPUTE = 0x04;
        const VERTEX_FRAGMENT = Self::VERTEX.bits() | Self::FRAGMENT.bits();
    }
}

impl ShaderStageFlags {
    /// Create from a slice of ShaderStage
    pub fn from_stages(stages: &[ShaderStage]) -> Self {
        stages.iter().fold(Self::empty(), |flags, stage| {
            flags | match stage {
                ShaderStage::Vertex => Self::VERTEX,
                ShaderStage::Fragment => Self::FRAGMENT,
                ShaderStage::Compute => Self::COMPUTE,
            }
        })
    }
}

/// Type of resource bound at a given slot
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BindingType {
    /// Uniform buffer (read-only structured data)
    UniformBuffer,
    /// Combined image sampler (texture + sampler in one binding)
    CombinedImageSampler,
}

/// Scalar component kind
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScalarKind {
    Float32,
    Float64,
    Int32,
    UInt32,
    Bool,
}

/// Type of a reflected block member
#[derive(Debug, Clone, PartialEq)]
pub enum ReflectedMemberType {
    Scalar(ScalarKind),
    /// Vector of `n` scalars
    Vector(ScalarKind, u32),
    /// Matrix of `columns` column vectors of `rows` scalars
    Matrix(ScalarKind, u32, u32),
    Array {
        element_type: Box<ReflectedMemberType>,
        count: u32,
        stride: Option<u32>,
    },
    Struct(Vec<ReflectedMember>),
}

/// A member of a uniform or push-constant block
#[derive(Debug, Clone, PartialEq)]
pub struct ReflectedMember {
    pub name: String,
    /// Byte offset inside the block
    pub offset: u32,
    /// Byte size, when known
    pub size: Option<u32>,
    pub member_type: ReflectedMemberType,
}

/// A descriptor binding discovered in the shaders
#[derive(Debug, Clone, PartialEq)]
pub struct ReflectedBinding {
    /// Variable name in the shader source (e.g., "depth_texture")
    pub name: String,
    pub set: u32,
    pub binding: u32,
    pub binding_type: BindingType,
    pub stage_flags: ShaderStageFlags,
    /// Block members (uniform buffers only)
    pub members: Vec<ReflectedMember>,
}

/// A push-constant block discovered in the shaders
#[derive(Debug, Clone, PartialEq)]
pub struct ReflectedPushConstant {
    pub name: String,
    pub stage_flags: ShaderStageFlags,
    /// Total block size in bytes, when known
    pub size: Option<u32>,
    pub members: Vec<ReflectedMember>,
}

/// Merged shader interface of a linked pipeline
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PipelineReflection {
    bindings: Vec<ReflectedBinding>,
    push_constants: Vec<ReflectedPushConstant>,
}

impl PipelineReflection {
    pub fn new(bindings: Vec<ReflectedBinding>, push_constants: Vec<ReflectedPushConstant>) -> Self {
        Self { bindings, push_constants }
    }

    /// Reflection with no bindings and no push constants
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn bindings(&self) -> &[ReflectedBinding] {
        &self.bindings
    }

    pub fn push_constants(&self) -> &[ReflectedPushConstant] {
        &self.push_constants
    }

    /// Find a descriptor binding by its shader variable name
    pub fn binding_by_name(&self, name: &str) -> Option<&ReflectedBinding> {
        self.bindings.iter().find(|b| b.name == name)
    }

    /// Find a push-constant member by name, across all push-constant blocks
    pub fn push_constant_member(&self, name: &str) -> Option<(&ReflectedPushConstant, &ReflectedMember)> {
        self.push_constants.iter().find_map(|block| {
            block
                .members
                .iter()
                .find(|m| m.name == name)
                .map(|member| (block, member))
        })
    }
}

#[cfg(test)]
#[path = "reflection_tests.rs"]
mod tests;

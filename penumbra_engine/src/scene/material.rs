/// Materials: one compiled program per rendering purpose.

use std::sync::Arc;
use rustc_hash::FxHashMap;
use crate::error::{Error, Result};
use crate::graphics_device::{Pipeline, BindingGroup};
use crate::engine_fail;

/// Purpose a material program is used for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProgramKind {
    /// Depth-only rendering from the light
    ShadowMap,
    /// Filled G-buffer output
    Solid,
    /// Line G-buffer output
    Wireframe,
}

/// Geometry pass render mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RenderMode {
    #[default]
    Solid,
    Wireframe,
}

impl RenderMode {
    pub fn program_kind(&self) -> ProgramKind {
        match self {
            RenderMode::Solid => ProgramKind::Solid,
            RenderMode::Wireframe => ProgramKind::Wireframe,
        }
    }
}

pub struct Material {
    name: String,
    programs: FxHashMap<ProgramKind, Arc<dyn Pipeline>>,
    binding_group: Option<Arc<dyn BindingGroup>>,
}

impl Material {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            programs: FxHashMap::default(),
            binding_group: None,
        }
    }

    pub fn with_program(mut self, kind: ProgramKind, pipeline: Arc<dyn Pipeline>) -> Self {
        self.programs.insert(kind, pipeline);
        self
    }

    /// Resources (textures, parameters) bound alongside every program
    pub fn with_binding_group(mut self, group: Arc<dyn BindingGroup>) -> Self {
        self.binding_group = Some(group);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn has_program(&self, kind: ProgramKind) -> bool {
        self.programs.contains_key(&kind)
    }

    /// Program for `kind`; a material without it cannot be drawn that way
    pub fn program(&self, kind: ProgramKind) -> Result<&Arc<dyn Pipeline>> {
        self.programs.get(&kind).ok_or_else(|| {
            engine_fail!("penumbra::Material", Error::InvalidResource(format!(
                "material '{}' has no {:?} program", self.name, kind)))
        })
    }

    pub fn binding_group(&self) -> Option<&Arc<dyn BindingGroup>> {
        self.binding_group.as_ref()
    }
}

#[cfg(test)]
#[path = "material_tests.rs"]
mod tests;

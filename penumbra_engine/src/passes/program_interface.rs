/// Wiring-time check of a post-process program against what its pass sets.

use crate::error::{Error, Result};
use crate::graphics_device::{BindingType, Pipeline};
use crate::render_graph::UniformValue;
use crate::engine_fail;

/// Uniforms (with a value of the expected type), samplers and output count
pub(crate) struct ProgramInterface<'a> {
    pub uniforms: &'a [(&'a str, UniformValue)],
    pub samplers: &'a [&'a str],
    pub color_outputs: usize,
}

impl ProgramInterface<'_> {
    /// Fail with `InvalidResource` on the first mismatch
    pub fn check(&self, pass: &str, pipeline: &dyn Pipeline) -> Result<()> {
        let reflection = pipeline.reflection();

        for (name, prototype) in self.uniforms {
            match reflection.push_constant_member(name) {
                None => return Err(mismatch(pass, pipeline, format!("missing uniform '{}'", name))),
                Some((_, member)) if !prototype.fits(&member.member_type) => {
                    return Err(mismatch(pass, pipeline, format!(
                        "uniform '{}' is {:?}, expected {:?}",
                        name, member.member_type, prototype.member_type())));
                }
                Some(_) => {}
            }
        }

        for name in self.samplers {
            match reflection.binding_by_name(name) {
                Some(binding) if binding.binding_type == BindingType::CombinedImageSampler => {}
                Some(_) => return Err(mismatch(pass, pipeline, format!("'{}' is not a sampler", name))),
                None => return Err(mismatch(pass, pipeline, format!("missing sampler '{}'", name))),
            }
        }

        if pipeline.color_target_count() != self.color_outputs {
            return Err(mismatch(pass, pipeline, format!(
                "writes {} color output(s), expected {}",
                pipeline.color_target_count(), self.color_outputs)));
        }
        Ok(())
    }
}

fn mismatch(pass: &str, pipeline: &dyn Pipeline, detail: String) -> Error {
    engine_fail!("penumbra::passes", Error::InvalidResource(format!(
        "{} program '{}': {}", pass, pipeline.label(), detail)))
}

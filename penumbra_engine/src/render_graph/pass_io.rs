/// Declared inputs and output of a pass.
///
/// A pass reads any number of attachments and writes exactly one
/// destination: a named render target or the presentation surface.

use crate::target::AttachmentKind;

/// One sampled attachment
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ResourceRead {
    /// Render target name
    pub target: String,
    pub attachment: AttachmentKind,
}

/// Destination written by a pass
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PassOutput {
    /// Named render target
    Target(String),
    /// Default presentation surface
    Surface,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PassIo {
    reads: Vec<ResourceRead>,
    output: PassOutput,
}

impl PassIo {
    /// Pass writing the named render target
    pub fn writes_target(name: &str) -> Self {
        Self {
            reads: Vec::new(),
            output: PassOutput::Target(name.to_string()),
        }
    }

    /// Pass writing the presentation surface
    pub fn writes_surface() -> Self {
        Self {
            reads: Vec::new(),
            output: PassOutput::Surface,
        }
    }

    /// Declare a sampled attachment
    pub fn reading(mut self, target: &str, attachment: AttachmentKind) -> Self {
        self.reads.push(ResourceRead {
            target: target.to_string(),
            attachment,
        });
        self
    }

    pub fn reads(&self) -> &[ResourceRead] {
        &self.reads
    }

    pub fn output(&self) -> &PassOutput {
        &self.output
    }

    /// Name of the output target, `None` for the surface
    pub fn output_target(&self) -> Option<&str> {
        match &self.output {
            PassOutput::Target(name) => Some(name),
            PassOutput::Surface => None,
        }
    }

    pub fn declares_read(&self, target: &str, attachment: AttachmentKind) -> bool {
        self.reads.iter().any(|r| r.target == target && r.attachment == attachment)
    }
}

//! Error types for the Penumbra engine
//!
//! This module defines the error types used throughout the engine:
//! resource construction, program building, graphics API failures,
//! pass wiring and per-frame pass failures.

use std::fmt;
use crate::graphics_device::ShaderStage;

/// Result type for Penumbra engine operations
pub type Result<T> = std::result::Result<T, Error>;

/// Penumbra engine errors
#[derive(Debug, Clone)]
pub enum Error {
    /// Backend-specific error (graphics API call failed), with call context
    BackendError(String),

    /// Out of GPU memory
    OutOfMemory,

    /// Invalid resource (texture, buffer, program, descriptor, etc.)
    InvalidResource(String),

    /// Initialization failed (engine, device, subsystems)
    InitializationFailed(String),

    /// Render target failed its completeness check
    IncompleteFramebuffer(String),

    /// Color attachment index outside `[0, count)`
    AttachmentOutOfRange {
        /// Name of the render target
        target: String,
        /// Requested index
        index: usize,
        /// Number of color attachments of the target
        count: usize,
    },

    /// Attachment reference outlived the render target that owned it
    StaleAttachment(String),

    /// Shader compilation or program link failure
    ProgramBuild {
        /// Stage that failed
        stage: ShaderStage,
        /// Diagnostic text reported by the compiler/linker
        diagnostic: String,
    },

    /// Render graph wiring is invalid (declared inputs/outputs do not line up)
    GraphValidation(String),

    /// A pass failed while recording; the frame was abandoned
    PassFailed {
        /// Name of the failing pass
        pass: String,
        /// Underlying error
        source: Box<Error>,
    },
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::BackendError(msg) => write!(f, "Backend error: {}", msg),
            Error::OutOfMemory => write!(f, "Out of GPU memory"),
            Error::InvalidResource(msg) => write!(f, "Invalid resource: {}", msg),
            Error::InitializationFailed(msg) => write!(f, "Initialization failed: {}", msg),
            Error::IncompleteFramebuffer(msg) => write!(f, "Framebuffer is not complete: {}", msg),
            Error::AttachmentOutOfRange { target, index, count } => write!(
                f,
                "Invalid color attachment index {} for render target '{}' ({} attachments)",
                index, target, count
            ),
            Error::StaleAttachment(msg) => write!(f, "Stale attachment: {}", msg),
            Error::ProgramBuild { stage, diagnostic } => {
                write!(f, "Program build failed ({:?} stage): {}", stage, diagnostic)
            }
            Error::GraphValidation(msg) => write!(f, "Render graph validation failed: {}", msg),
            Error::PassFailed { pass, source } => write!(f, "Pass '{}' failed: {}", pass, source),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::PassFailed { source, .. } => Some(source.as_ref()),
            _ => None,
        }
    }
}

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;

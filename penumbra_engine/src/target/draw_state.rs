/// Explicit pipeline state for one command stream
///
/// Tracks what a graphics API would otherwise keep as hidden global state:
/// which render target is the active draw destination, how many color
/// attachments receive output, and which program is bound. `None` as the
/// bound target means the default presentation surface.

use crate::error::{Error, Result};
use crate::engine_fail;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DrawState {
    bound: Option<String>,
    draw_buffers: usize,
    program: Option<String>,
}

impl Default for DrawState {
    fn default() -> Self {
        Self {
            bound: None,
            draw_buffers: 1,
            program: None,
        }
    }
}

impl DrawState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Name of the bound render target, `None` for the default surface
    pub fn bound_target(&self) -> Option<&str> {
        self.bound.as_deref()
    }

    /// Number of color attachments receiving output
    pub fn draw_buffers(&self) -> usize {
        self.draw_buffers
    }

    /// Label of the bound program
    pub fn program(&self) -> Option<&str> {
        self.program.as_deref()
    }

    pub(crate) fn bind_target(&mut self, name: &str, draw_buffers: usize) -> Result<()> {
        if let Some(current) = &self.bound {
            return Err(engine_fail!("penumbra::DrawState", Error::InvalidResource(
                format!("cannot bind '{}' while '{}' is still bound", name, current))));
        }
        self.bound = Some(name.to_string());
        self.draw_buffers = draw_buffers;
        self.program = None;
        Ok(())
    }

    pub(crate) fn unbind_target(&mut self, name: &str) -> Result<()> {
        if self.bound.as_deref() != Some(name) {
            return Err(engine_fail!("penumbra::DrawState", Error::InvalidResource(
                format!("cannot unbind '{}': bound target is {:?}", name, self.bound))));
        }
        *self = Self::default();
        Ok(())
    }

    pub(crate) fn set_draw_buffers(&mut self, count: usize) {
        self.draw_buffers = count;
    }

    pub(crate) fn set_program(&mut self, label: &str) {
        self.program = Some(label.to_string());
    }
}

#[cfg(test)]
#[path = "draw_state_tests.rs"]
mod tests;

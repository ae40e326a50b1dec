/// Render graph: pass registration, wiring validation and ordering.
///
/// Passes are registered in any order. `compile` checks the declared
/// wiring against the live render targets and derives the execution
/// order from the writer -> reader dependencies. Independent passes keep
/// their registration order.

use std::collections::BTreeSet;

use rustc_hash::FxHashMap;
use crate::error::{Error, Result};
use crate::render_graph::{PassNode, PassOutput};
use crate::target::{AttachmentKind, TargetManager};
use crate::{engine_debug, engine_fail};

pub struct RenderGraph {
    passes: Vec<Box<dyn PassNode>>,
    /// Indices into `passes`, `None` until compiled
    order: Option<Vec<usize>>,
}

impl RenderGraph {
    pub fn new() -> Self {
        Self {
            passes: Vec::new(),
            order: None,
        }
    }

    /// Register a pass
    ///
    /// Invalidates any previous compilation.
    pub fn add_pass(&mut self, pass: Box<dyn PassNode>) -> usize {
        self.order = None;
        self.passes.push(pass);
        self.passes.len() - 1
    }

    pub fn pass_count(&self) -> usize {
        self.passes.len()
    }

    pub fn is_compiled(&self) -> bool {
        self.order.is_some()
    }

    /// Pass names in execution order (empty before `compile`)
    pub fn execution_order(&self) -> Vec<&str> {
        match &self.order {
            Some(order) => order.iter().map(|&i| self.passes[i].name()).collect(),
            None => Vec::new(),
        }
    }

    /// Passes in execution order
    pub(crate) fn ordered_passes(&self) -> Result<Vec<&dyn PassNode>> {
        match &self.order {
            Some(order) => Ok(order.iter().map(|&i| self.passes[i].as_ref()).collect()),
            None => Err(invalid("render graph executed before compile".to_string())),
        }
    }

    /// Validate wiring and compute the execution order
    ///
    /// Fails with `GraphValidation` when:
    /// - two passes share a name
    /// - an output or input names an unknown target or attachment
    /// - a target has more than one writer
    /// - a pass samples the target it writes
    /// - an input is never written by any pass
    /// - the surface is not written by exactly one pass
    /// - the dependencies form a cycle
    pub fn compile(&mut self, targets: &TargetManager) -> Result<()> {
        self.order = None;

        let mut names: FxHashMap<&str, usize> = FxHashMap::default();
        let mut writers: FxHashMap<&str, usize> = FxHashMap::default();
        let mut surface_writers = Vec::new();

        for (index, pass) in self.passes.iter().enumerate() {
            if names.insert(pass.name(), index).is_some() {
                return Err(invalid(format!("duplicate pass name '{}'", pass.name())));
            }

            match pass.io().output() {
                PassOutput::Surface => surface_writers.push(index),
                PassOutput::Target(target) => {
                    if targets.render_target(target).is_none() {
                        return Err(invalid(format!(
                            "pass '{}' writes unknown render target '{}'", pass.name(), target)));
                    }
                    if let Some(&other) = writers.get(target.as_str()) {
                        return Err(invalid(format!(
                            "render target '{}' written by both '{}' and '{}'",
                            target, self.passes[other].name(), pass.name())));
                    }
                    writers.insert(target.as_str(), index);
                }
            }
        }

        if surface_writers.len() != 1 {
            return Err(invalid(format!(
                "exactly one pass must write the surface, found {}", surface_writers.len())));
        }

        // Dependency edges: writer -> reader
        let mut dependents: Vec<Vec<usize>> = vec![Vec::new(); self.passes.len()];
        let mut pending: Vec<usize> = vec![0; self.passes.len()];

        for (index, pass) in self.passes.iter().enumerate() {
            for read in pass.io().reads() {
                let target = targets.render_target(&read.target).ok_or_else(|| invalid(format!(
                    "pass '{}' reads unknown render target '{}'", pass.name(), read.target)))?;

                if let AttachmentKind::Color(slot) = read.attachment {
                    if slot >= target.color_attachment_count() {
                        return Err(invalid(format!(
                            "pass '{}' reads {}.{} but the target has {} color attachment(s)",
                            pass.name(), read.target, read.attachment, target.color_attachment_count())));
                    }
                }

                if pass.io().output_target() == Some(read.target.as_str()) {
                    return Err(invalid(format!(
                        "pass '{}' samples render target '{}' while writing it",
                        pass.name(), read.target)));
                }

                let writer = *writers.get(read.target.as_str()).ok_or_else(|| invalid(format!(
                    "pass '{}' reads '{}' which no pass writes", pass.name(), read.target)))?;

                if !dependents[writer].contains(&index) {
                    dependents[writer].push(index);
                    pending[index] += 1;
                }
            }
        }

        // Kahn's algorithm, always taking the lowest ready index
        let mut order = Vec::with_capacity(self.passes.len());
        let mut ready: BTreeSet<usize> = (0..self.passes.len()).filter(|&i| pending[i] == 0).collect();
        while let Some(current) = ready.pop_first() {
            order.push(current);
            for &next in &dependents[current] {
                pending[next] -= 1;
                if pending[next] == 0 {
                    ready.insert(next);
                }
            }
        }

        if order.len() != self.passes.len() {
            let stuck: Vec<&str> = (0..self.passes.len())
                .filter(|i| !order.contains(i))
                .map(|i| self.passes[i].name())
                .collect();
            return Err(invalid(format!("dependency cycle between passes {:?}", stuck)));
        }

        engine_debug!("penumbra::RenderGraph", "Compiled {} passes: {:?}",
            order.len(), order.iter().map(|&i| self.passes[i].name()).collect::<Vec<_>>());

        self.order = Some(order);
        Ok(())
    }
}

impl Default for RenderGraph {
    fn default() -> Self {
        Self::new()
    }
}

fn invalid(message: String) -> Error {
    engine_fail!("penumbra::RenderGraph", Error::GraphValidation(message))
}

#[cfg(test)]
#[path = "render_graph_tests.rs"]
mod tests;

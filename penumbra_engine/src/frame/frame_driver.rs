/// Frame driver: owns the device, the presentation surface, the render
/// targets and the compiled pass graph, and turns frame inputs into one
/// presented image.
///
/// A frame is recorded into a single command list in compiled graph order
/// (shadow, geometry, composite, DoF), submitted once, then presented.
/// If any pass fails the command list is dropped unsubmitted and the
/// error comes back wrapped in `Error::PassFailed`.

use std::sync::Arc;

use crate::camera::ViewCamera;
use crate::error::{Error, Result};
use crate::frame::{FrameConfig, FrameInputs, PostPrograms};
use crate::graphics_device::{GraphicsDevice, GraphicsDeviceStats, Swapchain};
use crate::passes::{
    ShadowPass, GeometryPass, CompositePass, DofPass,
    SHADOW_TARGET, GBUFFER_TARGET, COMPOSITE_TARGET,
};
use crate::render_graph::{PassContext, RenderGraph, SurfaceFrame};
use crate::target::{RenderTargetDesc, TargetManager, TargetSizing};
use crate::{engine_debug, engine_fail, engine_info, engine_trace};

const SOURCE: &str = "penumbra::FrameDriver";

pub struct FrameDriver {
    device: Box<dyn GraphicsDevice>,
    swapchain: Box<dyn Swapchain>,
    config: FrameConfig,
    targets: TargetManager,
    graph: RenderGraph,
    /// Set while the window is minimised (0x0) or after a failed resize
    suspended: bool,
    frames_presented: u64,
}

impl FrameDriver {
    /// Create the render targets and wire the passes
    ///
    /// # Arguments
    ///
    /// * `device` - Initialized graphics device
    /// * `swapchain` - Presentation surface; its size sizes the window targets
    /// * `config` - Target formats and sizes
    /// * `programs` - Compositing and DoF programs built on `device`
    pub fn new(
        mut device: Box<dyn GraphicsDevice>,
        swapchain: Box<dyn Swapchain>,
        config: FrameConfig,
        programs: PostPrograms,
    ) -> Result<Self> {
        config.validate()?;

        let (width, height) = (swapchain.width(), swapchain.height());
        let mut targets = TargetManager::new();
        create_targets(device.as_mut(), &mut targets, &config, width, height)?;

        let mut graph = RenderGraph::new();
        graph.add_pass(Box::new(ShadowPass::new()));
        graph.add_pass(Box::new(GeometryPass::new()));
        graph.add_pass(Box::new(CompositePass::new(programs.composite)?));
        graph.add_pass(Box::new(DofPass::new(programs.dof)?));
        graph.compile(&targets)?;

        engine_info!(SOURCE, "Frame driver ready at {}x{} (passes: {:?})",
            width, height, graph.execution_order());

        Ok(Self {
            device,
            swapchain,
            config,
            targets,
            graph,
            suspended: width == 0 || height == 0,
            frames_presented: 0,
        })
    }

    pub fn config(&self) -> &FrameConfig {
        &self.config
    }

    pub fn targets(&self) -> &TargetManager {
        &self.targets
    }

    pub fn graph(&self) -> &RenderGraph {
        &self.graph
    }

    pub fn is_suspended(&self) -> bool {
        self.suspended
    }

    pub fn frames_presented(&self) -> u64 {
        self.frames_presented
    }

    pub fn device_stats(&self) -> GraphicsDeviceStats {
        self.device.stats()
    }

    /// Record, submit and present one frame
    ///
    /// Does nothing while suspended. On error nothing is submitted or
    /// presented; pass failures carry the pass name.
    pub fn render_frame(&mut self, inputs: &FrameInputs) -> Result<()> {
        if self.suspended {
            engine_trace!(SOURCE, "Frame skipped: surface is 0x0");
            return Ok(());
        }

        let image_index = self.swapchain.acquire_next_image()?;
        let surface = SurfaceFrame {
            render_pass: Arc::clone(self.swapchain.render_pass()),
            framebuffer: self.swapchain.framebuffer(image_index)?,
            width: self.swapchain.width(),
            height: self.swapchain.height(),
            clear_color: self.config.clear_color,
        };

        let mut cmd = self.device.create_command_list()?;
        cmd.begin()?;

        for pass in self.graph.ordered_passes()? {
            let mut ctx = PassContext::new(
                self.device.as_ref(),
                cmd.as_mut(),
                &self.targets,
                &surface,
                inputs,
                pass.name(),
                pass.io(),
            );
            let result = pass.execute(&mut ctx).and_then(|()| ctx.finish());
            if let Err(error) = result {
                return Err(engine_fail!(SOURCE, Error::PassFailed {
                    pass: pass.name().to_string(),
                    source: Box::new(error),
                }));
            }
        }

        cmd.end()?;
        self.device.submit_with_swapchain(&[cmd.as_ref()], self.swapchain.as_ref(), image_index)?;
        self.swapchain.present(image_index)?;
        self.frames_presented += 1;
        Ok(())
    }

    /// React to a window size change
    ///
    /// A 0x0 size suspends rendering. Otherwise waits for the device to go
    /// idle, rebuilds every window-sized target, recreates the surface and
    /// updates the camera aspect ratio. The shadow map keeps its size.
    /// If any step fails rendering stays suspended until a later resize
    /// succeeds, so no frame mixes surface and target sizes.
    pub fn resize(&mut self, width: u32, height: u32, camera: &mut dyn ViewCamera) -> Result<()> {
        if width == 0 || height == 0 {
            if !self.suspended {
                engine_info!(SOURCE, "Rendering suspended (surface {}x{})", width, height);
            }
            self.suspended = true;
            return Ok(());
        }

        let was_suspended = self.suspended;
        self.suspended = true;

        self.device.wait_idle()?;
        self.targets.resize(self.device.as_mut(), width, height)?;
        self.swapchain.recreate(width, height)?;
        camera.set_aspect_ratio(width as f32 / height as f32);
        self.graph.compile(&self.targets)?;

        if was_suspended {
            engine_info!(SOURCE, "Rendering resumed at {}x{}", width, height);
        }
        self.suspended = false;
        engine_debug!(SOURCE, "Resized to {}x{}", width, height);
        Ok(())
    }
}

pub(crate) fn create_targets(
    device: &mut dyn GraphicsDevice,
    targets: &mut TargetManager,
    config: &FrameConfig,
    width: u32,
    height: u32,
) -> Result<()> {
    // Window targets are created at 1x1 while minimised and rebuilt on resume
    let (width, height) = (width.max(1), height.max(1));

    targets.create_render_target(
        device,
        RenderTargetDesc::new(SHADOW_TARGET, config.shadow_map_size, config.shadow_map_size)
            .with_depth_format(config.depth_format),
        TargetSizing::Fixed,
    )?;

    let mut gbuffer = RenderTargetDesc::new(GBUFFER_TARGET, width, height)
        .with_depth_format(config.depth_format)
        .with_clear_color(config.clear_color);
    for attachment in &config.gbuffer_attachments {
        gbuffer = gbuffer.with_color(*attachment);
    }
    targets.create_render_target(device, gbuffer, TargetSizing::Window)?;

    targets.create_render_target(
        device,
        RenderTargetDesc::new(COMPOSITE_TARGET, width, height)
            .with_color(config.composite_attachment)
            .with_depth_format(config.depth_format)
            .with_clear_color(config.clear_color),
        TargetSizing::Window,
    )?;
    Ok(())
}

#[cfg(test)]
#[path = "frame_driver_tests.rs"]
mod tests;

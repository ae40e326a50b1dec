//! Shared fixtures for pass, graph and frame tests
//!
//! Reflections matching the shipped shaders, a small scene, the default
//! frame targets on a mock device, and a helper that runs one pass
//! inside a begun command list.

use std::sync::Arc;
use glam::{Mat4, Vec3};

use crate::camera::{PerspectiveCamera, SpotLight};
use crate::error::Result;
use crate::frame::{FrameConfig, FrameInputs};
use crate::graphics_device::{
    Pipeline, PipelineReflection, ReflectedPushConstant, ReflectedMember, ReflectedMemberType,
    ReflectedBinding, BindingType, ScalarKind, ShaderStageFlags, GraphicsDevice, Buffer,
    BufferDesc, BufferUsage, CommandList,
};
use crate::graphics_device::mock_graphics_device::{
    MockGraphicsDevice, MockPipeline, MockRenderPass, MockFramebuffer,
};
use crate::render_graph::{PassContext, PassNode, SurfaceFrame};
use crate::scene::{Drawable, Material, Mesh, ProgramKind, SimpleScene};
use crate::target::TargetManager;

pub(crate) const WIDTH: u32 = 800;
pub(crate) const HEIGHT: u32 = 600;

pub(crate) fn mat4() -> ReflectedMemberType {
    ReflectedMemberType::Matrix(ScalarKind::Float32, 4, 4)
}

pub(crate) fn vec4() -> ReflectedMemberType {
    ReflectedMemberType::Vector(ScalarKind::Float32, 4)
}

pub(crate) fn float() -> ReflectedMemberType {
    ReflectedMemberType::Scalar(ScalarKind::Float32)
}

pub(crate) fn int() -> ReflectedMemberType {
    ReflectedMemberType::Scalar(ScalarKind::Int32)
}

fn size_of(ty: &ReflectedMemberType) -> u32 {
    match ty {
        ReflectedMemberType::Matrix(_, c, r) => c * r * 4,
        ReflectedMemberType::Vector(_, n) => n * 4,
        _ => 4,
    }
}

/// Push-constant block with tightly packed members
pub(crate) fn push_block(name: &str, stage_flags: ShaderStageFlags, members: &[(&str, ReflectedMemberType)]) -> ReflectedPushConstant {
    let mut offset = 0;
    let members: Vec<ReflectedMember> = members.iter().map(|(name, ty)| {
        let member = ReflectedMember {
            name: name.to_string(),
            offset,
            size: Some(size_of(ty)),
            member_type: ty.clone(),
        };
        offset += size_of(ty);
        member
    }).collect();
    ReflectedPushConstant {
        name: name.to_string(),
        stage_flags,
        size: Some(offset),
        members,
    }
}

pub(crate) fn sampler(name: &str, set: u32, binding: u32) -> ReflectedBinding {
    ReflectedBinding {
        name: name.to_string(),
        set,
        binding,
        binding_type: BindingType::CombinedImageSampler,
        stage_flags: ShaderStageFlags::FRAGMENT,
        members: Vec::new(),
    }
}

pub(crate) fn scene_program_reflection() -> PipelineReflection {
    PipelineReflection::new(vec![], vec![push_block("Transforms", ShaderStageFlags::VERTEX, &[
        ("model", mat4()),
        ("view_projection", mat4()),
    ])])
}

pub(crate) fn composite_reflection() -> PipelineReflection {
    PipelineReflection::new(
        vec![
            sampler("albedo_texture", 0, 0),
            sampler("normal_texture", 0, 1),
            sampler("depth_texture", 0, 2),
            sampler("shadow_map", 0, 3),
        ],
        vec![push_block("CompositeParams", ShaderStageFlags::FRAGMENT, &[
            ("inverse_view_projection", mat4()),
            ("light_view_projection", mat4()),
            ("light_position", vec4()),
            ("light_color", vec4()),
        ])],
    )
}

pub(crate) fn dof_reflection() -> PipelineReflection {
    PipelineReflection::new(
        vec![sampler("color_texture", 0, 0), sampler("depth_texture", 0, 1)],
        vec![push_block("DofParams", ShaderStageFlags::FRAGMENT, &[
            ("focus_distance", float()),
            ("focus_range", float()),
            ("near_plane", float()),
            ("far_plane", float()),
            ("debug_depth", int()),
        ])],
    )
}

pub(crate) fn composite_program() -> Arc<dyn Pipeline> {
    Arc::new(MockPipeline::new("composite", composite_reflection(), 1))
}

pub(crate) fn dof_program() -> Arc<dyn Pipeline> {
    Arc::new(MockPipeline::new("dof", dof_reflection(), 1))
}

/// Material with a depth-only shadow program and two-output G-buffer programs
pub(crate) fn material() -> Arc<Material> {
    Arc::new(Material::new("stone")
        .with_program(ProgramKind::ShadowMap,
            Arc::new(MockPipeline::new("stone.shadow", scene_program_reflection(), 0)))
        .with_program(ProgramKind::Solid,
            Arc::new(MockPipeline::new("stone.solid", scene_program_reflection(), 2)))
        .with_program(ProgramKind::Wireframe,
            Arc::new(MockPipeline::new("stone.wireframe", scene_program_reflection(), 2))))
}

pub(crate) fn triangle_mesh(device: &mut dyn GraphicsDevice) -> Arc<Mesh> {
    let vertices: Arc<dyn Buffer> = device
        .create_buffer(BufferDesc { size: 3 * 24, usage: BufferUsage::Vertex })
        .unwrap();
    Arc::new(Mesh::new("triangle", vertices, 3))
}

/// Scene with `count` triangles sharing one material
pub(crate) fn scene(device: &mut dyn GraphicsDevice, count: usize) -> SimpleScene {
    let mesh = triangle_mesh(device);
    let material = material();
    let mut scene = SimpleScene::new();
    for i in 0..count {
        scene.add(Drawable::new(
            Arc::clone(&mesh),
            Arc::clone(&material),
            Mat4::from_translation(Vec3::new(i as f32 * 2.0, 0.0, 0.0)),
        ));
    }
    scene
}

/// Default frame targets (shadow, gbuffer, composite) at WIDTH x HEIGHT
pub(crate) fn targets(device: &mut MockGraphicsDevice) -> TargetManager {
    let mut targets = TargetManager::new();
    crate::frame::create_targets(device, &mut targets, &FrameConfig::default(), WIDTH, HEIGHT)
        .unwrap();
    targets
}

pub(crate) fn surface() -> SurfaceFrame {
    SurfaceFrame {
        render_pass: Arc::new(MockRenderPass { color_attachment_count: 1, has_depth: false }),
        framebuffer: Arc::new(MockFramebuffer::new("surface", WIDTH, HEIGHT)),
        width: WIDTH,
        height: HEIGHT,
        clear_color: [0.0, 0.0, 0.0, 1.0],
    }
}

/// Camera, light and scene borrowed by `FrameInputs`
pub(crate) struct World {
    pub scene: SimpleScene,
    pub camera: PerspectiveCamera,
    pub light: SpotLight,
}

impl World {
    pub fn new(device: &mut dyn GraphicsDevice, drawables: usize) -> Self {
        Self {
            scene: scene(device, drawables),
            camera: PerspectiveCamera::new(WIDTH as f32 / HEIGHT as f32),
            light: SpotLight::new(),
        }
    }

    pub fn inputs(&self) -> FrameInputs<'_> {
        FrameInputs::new(&self.scene, &self.camera, &self.light)
    }
}

/// Record one pass between begin/end of a fresh command list
pub(crate) fn run_pass(
    device: &MockGraphicsDevice,
    targets: &TargetManager,
    inputs: &FrameInputs,
    pass: &dyn PassNode,
) -> Result<()> {
    let surface = surface();
    let mut cmd = device.create_command_list()?;
    cmd.begin()?;
    {
        let mut ctx = PassContext::new(device, cmd.as_mut(), targets, &surface, inputs, pass.name(), pass.io());
        pass.execute(&mut ctx)?;
        ctx.finish()?;
    }
    cmd.end()
}

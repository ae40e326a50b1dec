/// Tests for FrameDriver
///
/// The driver owns its mock device, so every test keeps clones of the
/// device's shared journal and counters before handing it over.

use std::sync::Mutex;
use super::*;
use crate::camera::PerspectiveCamera;
use crate::graphics_device::TextureFormat;
use crate::graphics_device::mock_graphics_device::{Journal, MockCommand, MockFailures, MockGraphicsDevice};
use crate::target::AttachmentKind;
use crate::test_fixtures::{self, World};
use crate::frame::ProgramSources;

const SOURCES: ProgramSources<'static> = ProgramSources {
    fullscreen_vertex: b"fullscreen.vert.spv",
    composite_fragment: b"composite.frag.spv",
    dof_fragment: b"dof.frag.spv",
};

struct DeviceHandles {
    journal: Journal,
    failures: Arc<Mutex<MockFailures>>,
    released: Arc<Mutex<Vec<String>>>,
    wait_idle_calls: Arc<Mutex<u32>>,
    recreated: Arc<Mutex<Vec<(u32, u32)>>>,
}

impl DeviceHandles {
    fn commands(&self) -> Vec<MockCommand> {
        self.journal.lock().unwrap().clone()
    }

    /// Journal with the swapchain image index masked out
    fn commands_without_image_index(&self) -> Vec<MockCommand> {
        self.commands().into_iter()
            .map(|c| match c {
                MockCommand::BeginRenderPass { framebuffer, clear_values }
                    if framebuffer.starts_with("swapchain[") =>
                    MockCommand::BeginRenderPass { framebuffer: "swapchain".to_string(), clear_values },
                MockCommand::Submit { .. } => MockCommand::Submit { image_index: 0 },
                MockCommand::Present { .. } => MockCommand::Present { image_index: 0 },
                other => other,
            })
            .collect()
    }

    fn clear(&self) {
        self.journal.lock().unwrap().clear();
    }

    /// Framebuffer labels of render passes, in recording order
    fn render_passes(&self) -> Vec<String> {
        self.commands().into_iter()
            .filter_map(|c| match c {
                MockCommand::BeginRenderPass { framebuffer, .. } => Some(framebuffer),
                _ => None,
            })
            .collect()
    }
}

fn setup_with(width: u32, height: u32, config: FrameConfig, prepare: impl FnOnce(&MockGraphicsDevice))
    -> (Result<FrameDriver>, DeviceHandles, World)
{
    let mut device = MockGraphicsDevice::new();
    device.register_reflection("composite", test_fixtures::composite_reflection());
    device.register_reflection("dof", test_fixtures::dof_reflection());
    let swapchain = device.create_swapchain(width, height);
    let world = World::new(&mut device, 2);

    let handles = DeviceHandles {
        journal: device.journal.clone(),
        failures: device.failures.clone(),
        released: device.released_textures.clone(),
        wait_idle_calls: device.wait_idle_calls.clone(),
        recreated: swapchain.recreated.clone(),
    };

    let programs = PostPrograms::build(
        &mut device, &SOURCES, config.composite_attachment.format, TextureFormat::B8G8R8A8_SRGB).unwrap();
    prepare(&device);
    let driver = FrameDriver::new(Box::new(device), Box::new(swapchain), config, programs);
    (driver, handles, world)
}

fn setup(width: u32, height: u32) -> (FrameDriver, DeviceHandles, World) {
    let (driver, handles, world) = setup_with(width, height, FrameConfig::default(), |_| {});
    (driver.unwrap(), handles, world)
}

// ============================================================================
// Tests: Construction
// ============================================================================

#[test]
fn test_new_wires_four_passes() {
    let (driver, _, _) = setup(800, 600);

    assert_eq!(driver.graph().execution_order(), vec!["shadow", "geometry", "composite", "dof"]);
    assert_eq!(driver.targets().render_target_count(), 3);
    assert!(!driver.is_suspended());
    assert_eq!(driver.frames_presented(), 0);
    assert_eq!(driver.config(), &FrameConfig::default());

    let shadow = driver.targets().render_target(SHADOW_TARGET).unwrap();
    assert_eq!((shadow.width(), shadow.height()), (2048, 2048));
    assert_eq!(shadow.color_attachment_count(), 0);
    let gbuffer = driver.targets().render_target(GBUFFER_TARGET).unwrap();
    assert_eq!((gbuffer.width(), gbuffer.height()), (800, 600));
    assert_eq!(gbuffer.color_attachment_count(), 2);
    assert_eq!(driver.targets().render_target(COMPOSITE_TARGET).unwrap().color_attachment_count(), 1);
}

#[test]
fn test_invalid_config_rejected() {
    let config = FrameConfig { shadow_map_size: 0, ..FrameConfig::default() };
    let (driver, _, _) = setup_with(800, 600, config, |_| {});
    assert!(matches!(driver, Err(Error::InvalidResource(_))));
}

#[test]
fn test_incomplete_framebuffer_is_fatal() {
    let (driver, _, _) = setup_with(800, 600, FrameConfig::default(), |device| {
        device.failures.lock().unwrap().incomplete_framebuffer = Some(GBUFFER_TARGET.to_string());
    });
    assert!(matches!(driver, Err(Error::IncompleteFramebuffer(_))));
}

#[test]
fn test_mismatched_program_rejected_at_wiring() {
    let mut device = MockGraphicsDevice::new();
    // No reflection registered for "dof": the program exposes nothing
    device.register_reflection("composite", test_fixtures::composite_reflection());
    let swapchain = device.create_swapchain(800, 600);
    let programs = PostPrograms::build(
        &mut device, &SOURCES, TextureFormat::R16G16B16A16_SFLOAT, TextureFormat::B8G8R8A8_SRGB).unwrap();

    let driver = FrameDriver::new(Box::new(device), Box::new(swapchain), FrameConfig::default(), programs);

    assert!(matches!(driver, Err(Error::InvalidResource(ref m)) if m.contains("dof")));
}

#[test]
fn test_minimised_window_starts_suspended() {
    let (driver, _, _) = setup(0, 0);

    assert!(driver.is_suspended());
    let gbuffer = driver.targets().render_target(GBUFFER_TARGET).unwrap();
    assert_eq!((gbuffer.width(), gbuffer.height()), (1, 1));
}

// ============================================================================
// Tests: Frames
// ============================================================================

#[test]
fn test_frame_records_passes_in_order_then_submits_and_presents() {
    let (mut driver, handles, world) = setup(800, 600);

    driver.render_frame(&world.inputs()).unwrap();

    assert_eq!(handles.render_passes(), vec!["shadow", "gbuffer", "composite", "swapchain[0]"]);
    let commands = handles.commands();
    let tail = &commands[commands.len() - 3..];
    assert_eq!(tail, &[
        MockCommand::End,
        MockCommand::Submit { image_index: 0 },
        MockCommand::Present { image_index: 0 },
    ]);
    assert_eq!(commands[0], MockCommand::Begin);
    assert_eq!(driver.frames_presented(), 1);
    // Two drawables in shadow and geometry, one fullscreen draw each for composite and DoF
    assert_eq!(driver.device_stats().draw_calls, 6);
}

#[test]
fn test_consecutive_frames_cycle_images() {
    let (mut driver, handles, world) = setup(800, 600);

    driver.render_frame(&world.inputs()).unwrap();
    let first = handles.commands_without_image_index();
    handles.clear();
    driver.render_frame(&world.inputs()).unwrap();

    assert_eq!(handles.commands_without_image_index(), first);
    assert_eq!(handles.render_passes().last().map(String::as_str), Some("swapchain[1]"));
    assert!(handles.commands().contains(&MockCommand::Present { image_index: 1 }));
    assert_eq!(driver.frames_presented(), 2);
}

#[test]
fn test_pass_failure_abandons_frame() {
    let (mut driver, handles, world) = setup(800, 600);
    handles.failures.lock().unwrap().draw = true;

    let result = driver.render_frame(&world.inputs());

    match result {
        Err(Error::PassFailed { pass, .. }) => assert_eq!(pass, "shadow"),
        other => panic!("expected PassFailed, got {:?}", other),
    }
    let commands = handles.commands();
    assert!(!commands.iter().any(|c| matches!(c, MockCommand::Submit { .. } | MockCommand::Present { .. })));
    assert_eq!(driver.frames_presented(), 0);

    // The next frame renders normally once the fault is gone
    handles.failures.lock().unwrap().draw = false;
    driver.render_frame(&world.inputs()).unwrap();
    assert_eq!(driver.frames_presented(), 1);
}

#[test]
fn test_submit_failure_skips_present() {
    let (mut driver, handles, world) = setup(800, 600);
    handles.failures.lock().unwrap().submit = true;

    assert!(matches!(driver.render_frame(&world.inputs()), Err(Error::BackendError(_))));
    assert!(!handles.commands().iter().any(|c| matches!(c, MockCommand::Present { .. })));
    assert_eq!(driver.frames_presented(), 0);
}

// ============================================================================
// Tests: Resize
// ============================================================================

#[test]
fn test_resize_rebuilds_window_targets() {
    let (mut driver, handles, _) = setup(800, 600);
    let mut camera = PerspectiveCamera::new(800.0 / 600.0);
    let old_albedo = driver.targets().render_target(GBUFFER_TARGET).unwrap()
        .attachment(AttachmentKind::Color(0)).unwrap();
    let old_shadow = driver.targets().render_target(SHADOW_TARGET).unwrap().depth_attachment();

    driver.resize(1280, 720, &mut camera).unwrap();

    assert_eq!(*handles.wait_idle_calls.lock().unwrap(), 1);
    assert_eq!(*handles.recreated.lock().unwrap(), vec![(1280, 720)]);
    for name in [GBUFFER_TARGET, COMPOSITE_TARGET] {
        let target = driver.targets().render_target(name).unwrap();
        assert_eq!((target.width(), target.height()), (1280, 720));
    }
    let shadow = driver.targets().render_target(SHADOW_TARGET).unwrap();
    assert_eq!((shadow.width(), shadow.height()), (2048, 2048));

    assert!(old_albedo.is_stale());
    assert!(matches!(old_albedo.texture(), Err(Error::StaleAttachment(_))));
    assert!(!old_shadow.is_stale());
    assert!(handles.released.lock().unwrap().contains(&"gbuffer.color0".to_string()));

    assert!((camera.aspect_ratio() - 1280.0 / 720.0).abs() < 1e-6);
    assert!(driver.graph().is_compiled());
}

#[test]
fn test_zero_size_suspends_until_resized() {
    let (mut driver, handles, world) = setup(800, 600);
    let mut camera = PerspectiveCamera::new(800.0 / 600.0);

    driver.resize(0, 0, &mut camera).unwrap();
    assert!(driver.is_suspended());
    assert_eq!(*handles.wait_idle_calls.lock().unwrap(), 0);
    assert!((camera.aspect_ratio() - 800.0 / 600.0).abs() < 1e-6);

    driver.render_frame(&world.inputs()).unwrap();
    assert!(handles.commands().is_empty());
    assert_eq!(driver.frames_presented(), 0);

    driver.resize(640, 480, &mut camera).unwrap();
    assert!(!driver.is_suspended());
    driver.render_frame(&world.inputs()).unwrap();
    assert_eq!(driver.frames_presented(), 1);
}

#[test]
fn test_resume_from_minimised_start() {
    let (mut driver, handles, world) = setup(0, 0);
    let mut camera = PerspectiveCamera::default();

    driver.resize(1024, 768, &mut camera).unwrap();
    driver.render_frame(&world.inputs()).unwrap();

    let gbuffer = driver.targets().render_target(GBUFFER_TARGET).unwrap();
    assert_eq!((gbuffer.width(), gbuffer.height()), (1024, 768));
    assert!(handles.commands().contains(&MockCommand::Present { image_index: 0 }));
}

#[test]
fn test_failed_resize_suspends_until_next_resize() {
    let (mut driver, handles, world) = setup(800, 600);
    let mut camera = PerspectiveCamera::new(800.0 / 600.0);
    handles.failures.lock().unwrap().incomplete_framebuffer = Some(COMPOSITE_TARGET.to_string());

    assert!(matches!(driver.resize(1280, 720, &mut camera), Err(Error::IncompleteFramebuffer(_))));

    assert!(driver.is_suspended());
    for name in [GBUFFER_TARGET, COMPOSITE_TARGET] {
        let target = driver.targets().render_target(name).unwrap();
        assert_eq!((target.width(), target.height()), (800, 600), "{name}");
    }
    assert!(handles.recreated.lock().unwrap().is_empty());
    assert!((camera.aspect_ratio() - 800.0 / 600.0).abs() < 1e-6);

    // No mixed-size frame is recorded while the fault persists or after it clears
    handles.failures.lock().unwrap().incomplete_framebuffer = None;
    driver.render_frame(&world.inputs()).unwrap();
    assert!(handles.commands().is_empty());
    assert_eq!(driver.frames_presented(), 0);

    driver.resize(1280, 720, &mut camera).unwrap();
    assert!(!driver.is_suspended());
    for name in [GBUFFER_TARGET, COMPOSITE_TARGET] {
        let target = driver.targets().render_target(name).unwrap();
        assert_eq!((target.width(), target.height()), (1280, 720), "{name}");
    }
    driver.render_frame(&world.inputs()).unwrap();
    assert_eq!(driver.frames_presented(), 1);
}

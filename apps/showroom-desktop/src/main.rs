mod capture;
mod overlay;

use anyhow::{Context as _, Result, anyhow};
use capture::WinitCapture;
use clap::Parser;
use egui::Context as EguiContext;
use showroom_assets::MaterialLibrary;
use showroom_input::{InputEvent, PointerCapture};
use showroom_kernel::{Response, Session, ShowroomConfig};
use showroom_render::{RenderView, SceneGraph, build_showroom};
use showroom_render_wgpu::WgpuRenderer;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;
use tracing_subscriber::EnvFilter;
use winit::application::ApplicationHandler;
use winit::dpi::PhysicalSize;
use winit::event::{DeviceEvent, ElementState, KeyEvent, MouseButton, WindowEvent};
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::keyboard::{KeyCode, PhysicalKey};
use winit::window::{Window, WindowId};

/// Longest frame step fed to the motion integrator.
const MAX_FRAME_DT: f32 = 0.1;

#[derive(Parser)]
#[command(name = "showroom-desktop", about = "First-person showroom walkthrough")]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// YAML configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Directory of JSON material descriptors
    #[arg(long, default_value = "./materials")]
    materials: PathBuf,
}

/// Everything that is not GPU or window state.
struct AppState {
    session: Session,
    scene: SceneGraph,
    materials: MaterialLibrary,
    last_frame: Instant,
}

impl AppState {
    fn new(config: &ShowroomConfig, materials: PathBuf) -> Result<Self> {
        let session = Session::from_config(config)?;
        let scene = build_showroom(session.catalog());
        tracing::info!(
            items = session.catalog().len(),
            nodes = scene.len(),
            "showroom ready"
        );
        Ok(Self {
            session,
            scene,
            materials: MaterialLibrary::spawn(materials),
            last_frame: Instant::now(),
        })
    }

    fn apply(&mut self, event: InputEvent, capture: &mut WinitCapture) {
        if self.session.handle(event, &self.scene) == Response::RequestCapture {
            self.request_capture(capture);
        }
    }

    fn request_capture(&mut self, capture: &mut WinitCapture) {
        // Failures are already turned into a hint by the session.
        let _ = self.session.request_capture(capture);
        self.flush_signals(capture);
    }

    fn release_capture(&mut self, capture: &mut WinitCapture) {
        capture.unlock();
        self.flush_signals(capture);
    }

    fn flush_signals(&mut self, capture: &mut WinitCapture) {
        for signal in capture.drain_signals() {
            self.session.handle(InputEvent::Capture(signal), &self.scene);
        }
    }

    fn handle_key(&mut self, key: KeyCode, pressed: bool, capture: &mut WinitCapture) {
        match key {
            KeyCode::Escape if pressed => self.release_capture(capture),
            KeyCode::KeyQ if pressed => self.apply(InputEvent::ClosePanel, capture),
            _ => self.apply(InputEvent::key(key_code_name(key), pressed), capture),
        }
    }

    /// One frame of simulation: collect finished asset loads, then integrate.
    fn update(&mut self) {
        let now = Instant::now();
        let dt = (now - self.last_frame).as_secs_f32().min(MAX_FRAME_DT);
        self.last_frame = now;
        if self.materials.poll() > 0 && self.materials.is_settled() {
            tracing::info!("all surface materials settled");
        }
        self.session.tick(dt);
    }

    fn view(&self) -> RenderView {
        RenderView {
            pose: *self.session.pose(),
            selected: self.session.panel().map(|p| p.item.clone()),
            ..RenderView::default()
        }
    }
}

/// winit's physical key names follow the web `code` vocabulary
/// (`KeyW`, `ArrowUp`, `ShiftLeft`), which is what key bindings use.
fn key_code_name(key: KeyCode) -> String {
    format!("{key:?}")
}

/// Window, surface and renderers; created on `resumed`.
struct Gpu {
    window: Arc<Window>,
    surface: wgpu::Surface<'static>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    config: wgpu::SurfaceConfiguration,
    renderer: WgpuRenderer,
    egui_winit: egui_winit::State,
    egui_renderer: egui_wgpu::Renderer,
    capture: WinitCapture,
}

impl Gpu {
    fn new(event_loop: &ActiveEventLoop, egui_ctx: &EguiContext) -> Result<Self> {
        let attrs = Window::default_attributes()
            .with_title("Showroom")
            .with_inner_size(PhysicalSize::new(1280u32, 720));
        let window = Arc::new(event_loop.create_window(attrs).context("create window")?);

        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::all(),
            ..Default::default()
        });
        let surface = instance
            .create_surface(window.clone())
            .context("create surface")?;

        let adapter = pollster::block_on(instance.request_adapter(&wgpu::RequestAdapterOptions {
            power_preference: wgpu::PowerPreference::HighPerformance,
            compatible_surface: Some(&surface),
            force_fallback_adapter: false,
        }))
        .ok_or_else(|| anyhow!("no compatible GPU adapter"))?;

        let (device, queue) = pollster::block_on(adapter.request_device(
            &wgpu::DeviceDescriptor {
                label: Some("showroom_device"),
                required_features: wgpu::Features::empty(),
                required_limits: wgpu::Limits::default(),
                memory_hints: Default::default(),
            },
            None,
        ))
        .context("create device")?;

        let size = window.inner_size();
        let caps = surface.get_capabilities(&adapter);
        let surface_format = caps
            .formats
            .iter()
            .find(|f| f.is_srgb())
            .or_else(|| caps.formats.first())
            .copied()
            .ok_or_else(|| anyhow!("surface reports no formats"))?;

        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format: surface_format,
            width: size.width.max(1),
            height: size.height.max(1),
            present_mode: wgpu::PresentMode::AutoVsync,
            alpha_mode: caps
                .alpha_modes
                .first()
                .copied()
                .unwrap_or(wgpu::CompositeAlphaMode::Auto),
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);

        let renderer = WgpuRenderer::new(&device, surface_format, config.width, config.height);
        let egui_winit = egui_winit::State::new(
            egui_ctx.clone(),
            egui::ViewportId::ROOT,
            &window,
            Some(window.scale_factor() as f32),
            None,
            None,
        );
        let egui_renderer = egui_wgpu::Renderer::new(&device, surface_format, None, 1, false);

        tracing::info!(
            "GPU initialized with {} backend",
            adapter.get_info().backend.to_str()
        );

        Ok(Self {
            capture: WinitCapture::new(window.clone()),
            window,
            surface,
            device,
            queue,
            config,
            renderer,
            egui_winit,
            egui_renderer,
        })
    }

    fn resize(&mut self, size: PhysicalSize<u32>) {
        self.config.width = size.width.max(1);
        self.config.height = size.height.max(1);
        self.surface.configure(&self.device, &self.config);
        self.renderer
            .resize(&self.device, self.config.width, self.config.height);
    }
}

struct GpuApp {
    state: AppState,
    gpu: Option<Gpu>,
    egui_ctx: EguiContext,
    fatal: Option<anyhow::Error>,
}

impl GpuApp {
    fn new(state: AppState) -> Self {
        Self {
            state,
            gpu: None,
            egui_ctx: EguiContext::default(),
            fatal: None,
        }
    }

    fn redraw(&mut self) {
        self.state.update();

        let Some(gpu) = self.gpu.as_mut() else {
            return;
        };

        let output = match gpu.surface.get_current_texture() {
            Ok(t) => t,
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                gpu.surface.configure(&gpu.device, &gpu.config);
                return;
            }
            Err(e) => {
                tracing::error!("surface error: {e}");
                return;
            }
        };
        let target = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        gpu.renderer.render(
            &gpu.device,
            &gpu.queue,
            &target,
            &self.state.scene,
            &self.state.materials,
            &self.state.view(),
        );

        let raw_input = gpu.egui_winit.take_egui_input(&gpu.window);
        let mut actions = overlay::UiActions::default();
        let full_output = self.egui_ctx.run(raw_input, |ctx| {
            actions = overlay::draw(ctx, &self.state.session);
        });
        gpu.egui_winit
            .handle_platform_output(&gpu.window, full_output.platform_output);

        let paint_jobs = self
            .egui_ctx
            .tessellate(full_output.shapes, full_output.pixels_per_point);
        let screen_descriptor = egui_wgpu::ScreenDescriptor {
            size_in_pixels: [gpu.config.width, gpu.config.height],
            pixels_per_point: full_output.pixels_per_point,
        };

        for (id, image_delta) in &full_output.textures_delta.set {
            gpu.egui_renderer
                .update_texture(&gpu.device, &gpu.queue, *id, image_delta);
        }
        let mut encoder = gpu
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("egui_encoder"),
            });
        gpu.egui_renderer.update_buffers(
            &gpu.device,
            &gpu.queue,
            &mut encoder,
            &paint_jobs,
            &screen_descriptor,
        );
        {
            let mut pass = encoder
                .begin_render_pass(&wgpu::RenderPassDescriptor {
                    label: Some("egui_pass"),
                    color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                        view: &target,
                        resolve_target: None,
                        ops: wgpu::Operations {
                            load: wgpu::LoadOp::Load,
                            store: wgpu::StoreOp::Store,
                        },
                    })],
                    depth_stencil_attachment: None,
                    ..Default::default()
                })
                .forget_lifetime();
            gpu.egui_renderer
                .render(&mut pass, &paint_jobs, &screen_descriptor);
        }
        gpu.queue.submit(std::iter::once(encoder.finish()));
        for id in &full_output.textures_delta.free {
            gpu.egui_renderer.free_texture(id);
        }

        output.present();

        if actions.enter {
            self.state.request_capture(&mut gpu.capture);
        }
        if actions.close_panel {
            self.state.apply(InputEvent::ClosePanel, &mut gpu.capture);
        }
        gpu.window.request_redraw();
    }
}

impl ApplicationHandler for GpuApp {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.gpu.is_some() || self.fatal.is_some() {
            return;
        }
        match Gpu::new(event_loop, &self.egui_ctx) {
            Ok(gpu) => self.gpu = Some(gpu),
            Err(e) => {
                tracing::error!("rendering unavailable: {e:#}");
                self.fatal = Some(e);
                event_loop.exit();
            }
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        let Some(gpu) = self.gpu.as_mut() else {
            return;
        };

        // While captured the pointer is frozen over whatever widget it
        // last hovered, so egui never gets to swallow clicks.
        let response = gpu.egui_winit.on_window_event(&gpu.window, &event);
        if response.consumed && !gpu.capture.is_grabbed() {
            return;
        }

        match event {
            WindowEvent::CloseRequested => {
                event_loop.exit();
            }
            WindowEvent::Resized(new_size) => {
                gpu.resize(new_size);
            }
            WindowEvent::Focused(false) => {
                if gpu.capture.is_grabbed() {
                    self.state.release_capture(&mut gpu.capture);
                }
            }
            WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        physical_key: PhysicalKey::Code(key),
                        state: key_state,
                        repeat: false,
                        ..
                    },
                ..
            } => {
                self.state
                    .handle_key(key, key_state == ElementState::Pressed, &mut gpu.capture);
            }
            WindowEvent::MouseInput {
                button: MouseButton::Left,
                state: ElementState::Pressed,
                ..
            } => {
                self.state.apply(InputEvent::PrimaryClick, &mut gpu.capture);
            }
            WindowEvent::RedrawRequested => {
                self.redraw();
            }
            _ => {}
        }
    }

    fn device_event(
        &mut self,
        _event_loop: &ActiveEventLoop,
        _device_id: winit::event::DeviceId,
        event: DeviceEvent,
    ) {
        if let (DeviceEvent::MouseMotion { delta }, Some(gpu)) = (event, self.gpu.as_mut()) {
            let look = InputEvent::LookDelta {
                dx: delta.0 as f32,
                dy: delta.1 as f32,
            };
            self.state.apply(look, &mut gpu.capture);
        }
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(gpu) = &self.gpu {
            gpu.window.request_redraw();
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .init();

    tracing::info!("showroom-desktop starting");

    let config = ShowroomConfig::load_or_default(cli.config.as_deref())?;
    let state = AppState::new(&config, cli.materials)?;

    let event_loop = EventLoop::new()?;
    event_loop.set_control_flow(ControlFlow::Poll);

    let mut app = GpuApp::new(state);
    event_loop.run_app(&mut app)?;

    match app.fatal.take() {
        Some(e) => Err(e),
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use showroom_input::KeyBindings;

    #[test]
    fn winit_key_names_match_bindings() {
        let bindings = KeyBindings::default();
        for key in [
            KeyCode::KeyW,
            KeyCode::KeyA,
            KeyCode::KeyS,
            KeyCode::KeyD,
            KeyCode::ArrowUp,
            KeyCode::ArrowDown,
            KeyCode::ArrowLeft,
            KeyCode::ArrowRight,
            KeyCode::ShiftLeft,
            KeyCode::ShiftRight,
        ] {
            let name = key_code_name(key);
            assert!(bindings.control_for(&name).is_some(), "{name}");
        }
        assert!(bindings.control_for(&key_code_name(KeyCode::KeyQ)).is_none());
    }
}

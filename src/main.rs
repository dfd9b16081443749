//! Galaxy Gravity Simulation
//!
//! A million stars orbiting a supermassive black hole, rendered as point
//! sprites from a free-flying camera.

use anyhow::Context;
use clap::Parser;
use galaxy_physics::{GeneratorConfig, ATTRACTOR_MASS, GALAXY_SIZE, STAR_COUNT};
use galaxy_renderer::{
    max_stars, required_limits, CameraMovement, FlyCamera, RenderError, StarPalette,
    StarRenderer, StarShaderSource,
};
use galaxy_simulation::{GalaxyConfig, GalaxySimulation, SimulationParams};
use std::collections::{HashSet, VecDeque};
use std::sync::Arc;
use std::time::Instant;
use winit::{
    application::ApplicationHandler,
    event::*,
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    keyboard::{KeyCode, PhysicalKey},
    window::{Window, WindowId},
};

const WINDOW_WIDTH: u32 = 1366;
const WINDOW_HEIGHT: u32 = 768;
/// Degrees of yaw/pitch per pixel of mouse drag
const MOUSE_SENSITIVITY: f32 = 0.1;

#[derive(Parser, Debug)]
#[command(about = "Interactive galaxy gravity visualization")]
struct Args {
    /// Number of orbiting stars
    #[arg(long, default_value_t = STAR_COUNT)]
    stars: usize,

    /// Edge length of the initial star cube, in light-years
    #[arg(long, default_value_t = GALAXY_SIZE)]
    size: f32,

    /// Mass of the central black hole, in solar masses
    #[arg(long, default_value_t = ATTRACTOR_MASS)]
    attractor_mass: f32,

    /// Simulated years per second
    #[arg(long, default_value_t = 1.0)]
    speed: f32,

    /// Seed for a reproducible galaxy
    #[arg(long)]
    seed: Option<u64>,
}

impl Args {
    fn config(&self) -> GalaxyConfig {
        GalaxyConfig {
            generator: GeneratorConfig::new(self.stars, self.size, self.attractor_mass),
            params: SimulationParams {
                simulation_speed: self.speed,
                ..Default::default()
            },
            seed: self.seed,
        }
    }
}

struct GpuState {
    surface: wgpu::Surface<'static>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    config: wgpu::SurfaceConfiguration,

    simulation: GalaxySimulation,
    renderer: StarRenderer,
    camera: FlyCamera,

    paused: bool,
    /// Set after the first failed upload so the error is logged once
    upload_failed: bool,
    frame_times: VecDeque<f32>,
    last_frame_time: Instant,
}

impl GpuState {
    async fn new(
        window: Arc<Window>,
        simulation: GalaxySimulation,
        galaxy_size: f32,
    ) -> Result<Self, RenderError> {
        let size = window.inner_size();

        // Create wgpu instance
        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor::default());

        let surface = instance.create_surface(window.clone())?;

        // Request adapter
        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await?;

        log::info!("✓ Using GPU: {}", adapter.get_info().name);

        // Create device and queue
        let limits = required_limits(&adapter.limits());
        log::info!("✓ Vertex buffer fits up to {} stars", max_stars(&limits));
        let (device, queue) = adapter
            .request_device(&wgpu::DeviceDescriptor {
                label: Some("Device"),
                required_features: wgpu::Features::empty(),
                required_limits: limits,
                memory_hints: wgpu::MemoryHints::default(),
                experimental_features: wgpu::ExperimentalFeatures::default(),
                trace: wgpu::Trace::Off,
            })
            .await?;

        // Configure surface
        let surface_caps = surface.get_capabilities(&adapter);
        let surface_format = surface_caps
            .formats
            .iter()
            .find(|f| f.is_srgb())
            .copied()
            .or_else(|| surface_caps.formats.first().copied())
            .ok_or(RenderError::SurfaceNotSupported)?;

        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format: surface_format,
            width: size.width.max(1),
            height: size.height.max(1),
            present_mode: wgpu::PresentMode::AutoNoVsync,
            alpha_mode: surface_caps.alpha_modes[0],
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);

        let mut renderer = StarRenderer::new(
            &device,
            &config,
            &StarShaderSource::default(),
            StarPalette::default(),
        );
        renderer.upload(&device, &queue, simulation.field())?;
        log::info!("✓ Renderer initialized ({} stars uploaded)", renderer.star_count());

        let camera = FlyCamera::new(config.width, config.height, galaxy_size);

        Ok(Self {
            surface,
            device,
            queue,
            config,
            simulation,
            renderer,
            camera,
            paused: false,
            upload_failed: false,
            frame_times: VecDeque::with_capacity(100),
            last_frame_time: Instant::now(),
        })
    }

    fn resize(&mut self, new_size: winit::dpi::PhysicalSize<u32>) {
        if new_size.width > 0 && new_size.height > 0 {
            self.config.width = new_size.width;
            self.config.height = new_size.height;
            self.surface.configure(&self.device, &self.config);
            self.renderer.resize(&self.device, &self.config);
            self.camera.resize(new_size.width, new_size.height);
        }
    }

    fn move_camera(&mut self, keys: &HashSet<KeyCode>, dt: f32) {
        let bindings = [
            (KeyCode::KeyW, CameraMovement::Forward),
            (KeyCode::KeyS, CameraMovement::Backward),
            (KeyCode::KeyA, CameraMovement::Left),
            (KeyCode::KeyD, CameraMovement::Right),
        ];
        for (key, movement) in bindings {
            if keys.contains(&key) {
                self.camera.translate(movement, dt);
            }
        }
    }

    /// Advance, upload and draw one frame. Returns (fps, average frame time in ms).
    fn render(&mut self, keys: &HashSet<KeyCode>) -> Result<(f32, f32), wgpu::SurfaceError> {
        // Track frame time
        let now = Instant::now();
        let frame_delta = (now - self.last_frame_time).as_secs_f32();
        self.last_frame_time = now;

        self.frame_times.push_back(frame_delta * 1000.0);
        if self.frame_times.len() > 100 {
            self.frame_times.pop_front();
        }
        let avg_frame_time = self.frame_times.iter().sum::<f32>() / self.frame_times.len() as f32;
        let fps = 1000.0 / avg_frame_time.max(f32::EPSILON);

        self.move_camera(keys, frame_delta);

        // Step simulation; must finish before the field is uploaded
        if !self.paused {
            self.simulation.advance(frame_delta);
        }

        let output = self.surface.get_current_texture()?;
        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        // On upload failure the previous stars are still drawn
        match self.renderer.sync_and_draw(
            &self.device,
            &self.queue,
            &view,
            self.simulation.field(),
            self.camera.view_matrix(),
            self.camera.projection_matrix(),
        ) {
            Ok(()) => self.upload_failed = false,
            Err(e) if !self.upload_failed => {
                log::error!("Star upload failed, showing last uploaded frame: {e}");
                self.upload_failed = true;
            }
            Err(_) => {}
        }

        output.present();
        Ok((fps, avg_frame_time))
    }
}

struct App {
    window: Option<Arc<Window>>,
    gpu_state: Option<GpuState>,
    /// Handed to the GPU state once the window exists
    pending_simulation: Option<GalaxySimulation>,
    galaxy_size: f32,

    keys_down: HashSet<KeyCode>,
    mouse_pressed: bool,
    last_mouse_pos: Option<(f64, f64)>,

    error: Option<anyhow::Error>,
}

impl App {
    fn new(simulation: GalaxySimulation, galaxy_size: f32) -> Self {
        Self {
            window: None,
            gpu_state: None,
            pending_simulation: Some(simulation),
            galaxy_size,
            keys_down: HashSet::new(),
            mouse_pressed: false,
            last_mouse_pos: None,
            error: None,
        }
    }

    fn fail(&mut self, event_loop: &ActiveEventLoop, error: anyhow::Error) {
        log::error!("{error:#}");
        self.error = Some(error);
        event_loop.exit();
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }
        let Some(simulation) = self.pending_simulation.take() else {
            return;
        };

        let window_attributes = Window::default_attributes()
            .with_title("Galaxy Simulation")
            .with_inner_size(winit::dpi::LogicalSize::new(WINDOW_WIDTH, WINDOW_HEIGHT));

        let window = match event_loop.create_window(window_attributes) {
            Ok(window) => Arc::new(window),
            Err(e) => {
                return self.fail(event_loop, anyhow::Error::new(e).context("creating window"))
            }
        };
        self.window = Some(window.clone());

        match pollster::block_on(GpuState::new(window, simulation, self.galaxy_size)) {
            Ok(state) => self.gpu_state = Some(state),
            Err(e) => self.fail(event_loop, anyhow::Error::new(e).context("initializing GPU")),
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        match event {
            WindowEvent::CloseRequested => event_loop.exit(),

            WindowEvent::Resized(physical_size) => {
                if let Some(gpu_state) = &mut self.gpu_state {
                    gpu_state.resize(physical_size);
                }
            }

            WindowEvent::MouseInput {
                state,
                button: MouseButton::Left,
                ..
            } => {
                self.mouse_pressed = state == ElementState::Pressed;
                if !self.mouse_pressed {
                    self.last_mouse_pos = None;
                }
            }

            WindowEvent::CursorMoved { position, .. } => {
                if self.mouse_pressed {
                    if let (Some(last_pos), Some(gpu_state)) =
                        (self.last_mouse_pos, &mut self.gpu_state)
                    {
                        let delta_x = (position.x - last_pos.0) as f32;
                        let delta_y = (position.y - last_pos.1) as f32;
                        gpu_state
                            .camera
                            .rotate(delta_x * MOUSE_SENSITIVITY, -delta_y * MOUSE_SENSITIVITY);
                    }
                    self.last_mouse_pos = Some((position.x, position.y));
                }
            }

            WindowEvent::MouseWheel { delta, .. } => {
                let scroll = match delta {
                    MouseScrollDelta::LineDelta(_x, y) => y,
                    MouseScrollDelta::PixelDelta(pos) => pos.y as f32 * 0.05,
                };
                if let Some(gpu_state) = &mut self.gpu_state {
                    gpu_state.camera.scale_speed(1.1_f32.powf(scroll));
                    log::debug!("camera speed: {:.0}", gpu_state.camera.speed);
                }
            }

            WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        physical_key: PhysicalKey::Code(key_code),
                        state,
                        repeat,
                        ..
                    },
                ..
            } => match state {
                ElementState::Pressed => {
                    self.keys_down.insert(key_code);
                    match key_code {
                        KeyCode::Escape => event_loop.exit(),
                        KeyCode::Space if !repeat => {
                            if let Some(gpu_state) = &mut self.gpu_state {
                                gpu_state.paused = !gpu_state.paused;
                                log::info!(
                                    "Simulation {}",
                                    if gpu_state.paused { "paused" } else { "resumed" }
                                );
                            }
                        }
                        _ => {}
                    }
                }
                ElementState::Released => {
                    self.keys_down.remove(&key_code);
                }
            },

            WindowEvent::RedrawRequested => {
                if let (Some(window), Some(gpu_state)) = (&self.window, &mut self.gpu_state) {
                    match gpu_state.render(&self.keys_down) {
                        Ok((fps, frame_time)) => {
                            window.set_title(&format!(
                                "Galaxy Simulation - {:.0} FPS ({:.2}ms) - {} stars - t={:.1}",
                                fps,
                                frame_time,
                                gpu_state.simulation.star_count(),
                                gpu_state.simulation.elapsed()
                            ));
                        }
                        Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                            gpu_state.resize(window.inner_size())
                        }
                        Err(wgpu::SurfaceError::OutOfMemory) => event_loop.exit(),
                        Err(e) => log::warn!("Render error: {:?}", e),
                    }
                }
            }

            _ => {}
        }

        if let Some(window) = &self.window {
            window.request_redraw();
        }
    }
}

fn main() -> anyhow::Result<()> {
    // Initialize logger (RUST_LOG=debug for verbose output)
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();
    let config = args.config();

    log::info!("Starting galaxy simulation...");

    let simulation =
        GalaxySimulation::initialize(&config).context("invalid galaxy configuration")?;
    log::info!("✓ Simulation initialized");

    let event_loop = EventLoop::new()?;
    event_loop.set_control_flow(ControlFlow::Poll);

    let mut app = App::new(simulation, config.generator.galaxy_size);
    event_loop.run_app(&mut app)?;

    match app.error.take() {
        Some(error) => Err(error),
        None => Ok(()),
    }
}

//! Interactive galaxy simulation
//!
//! Glowing particles drift, repel each other and fall towards short-lived attractors.
//! Click to drop an attractor; Space pauses, R resets, B triggers a big bang.

mod gui;

use anyhow::{Context as _, Result};
use clap::Parser;
use galaxy_canvas::Painter;
use galaxy_physics::ColorMode;
use galaxy_renderer::CanvasRenderer;
use galaxy_simulation::{Command, Galaxy, Settings};
use glam::Vec2;
use gui::{Gui, UiState};
use std::collections::VecDeque;
use std::sync::Arc;
use std::time::{Duration, Instant};
use winit::{
    application::ApplicationHandler,
    event::*,
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    keyboard::{KeyCode, PhysicalKey},
    window::{Window, WindowId},
};

/// Delay between the first tick and the two starter attractors appearing
const SEED_DELAY: Duration = Duration::from_secs(1);
/// Frames averaged for the FPS readout
const FRAME_TIME_WINDOW: usize = 60;

/// Interactive galaxy particle simulation
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// Initial particle count
    #[arg(long)]
    particles: Option<usize>,

    /// Initial attractor gravity
    #[arg(long)]
    gravity: Option<f32>,

    /// Initial simulation speed
    #[arg(long)]
    speed: Option<f32>,

    /// Initial color mode: rainbow, galaxy, fire, ocean or neon
    #[arg(long)]
    color_mode: Option<ColorMode>,

    /// Window width in logical pixels
    #[arg(long, default_value_t = 1280)]
    width: u32,

    /// Window height in logical pixels
    #[arg(long, default_value_t = 800)]
    height: u32,
}

impl Args {
    fn settings(&self) -> Settings {
        let defaults = Settings::default();
        Settings {
            particle_count: self.particles.unwrap_or(defaults.particle_count),
            gravity: self.gravity.unwrap_or(defaults.gravity),
            speed: self.speed.unwrap_or(defaults.speed),
            color_mode: self.color_mode.unwrap_or(defaults.color_mode),
        }
    }
}

struct GpuState {
    surface: wgpu::Surface<'static>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    config: wgpu::SurfaceConfiguration,

    galaxy: Galaxy,
    painter: Painter,
    renderer: CanvasRenderer,

    gui: Gui,
    ui_state: UiState,

    first_tick: Option<Instant>,
    attractors_seeded: bool,

    frame_times: VecDeque<f32>,
    last_frame_time: Instant,
}

impl GpuState {
    async fn new(window: Arc<Window>, settings: Settings) -> Result<Self> {
        let size = window.inner_size();

        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::PRIMARY,
            ..Default::default()
        });

        let surface = instance
            .create_surface(window.clone())
            .context("failed to create window surface")?;

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .context("no suitable GPU adapter")?;

        log::info!("✓ Using GPU: {}", adapter.get_info().name);

        let (device, queue) = adapter
            .request_device(&wgpu::DeviceDescriptor {
                label: Some("Device"),
                required_features: wgpu::Features::empty(),
                required_limits: wgpu::Limits::default(),
                memory_hints: wgpu::MemoryHints::default(),
                experimental_features: wgpu::ExperimentalFeatures::default(),
                trace: wgpu::Trace::Off,
            })
            .await
            .context("failed to create GPU device")?;

        let surface_caps = surface.get_capabilities(&adapter);
        let surface_format = surface_caps
            .formats
            .iter()
            .find(|f| f.is_srgb())
            .or_else(|| surface_caps.formats.first())
            .copied()
            .context("surface reports no supported formats")?;
        let alpha_mode = surface_caps
            .alpha_modes
            .first()
            .copied()
            .unwrap_or(wgpu::CompositeAlphaMode::Auto);

        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format: surface_format,
            width: size.width.max(1),
            height: size.height.max(1),
            present_mode: wgpu::PresentMode::AutoVsync,
            alpha_mode,
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);

        let width = config.width as f32;
        let height = config.height as f32;

        let galaxy = Galaxy::new(settings, width, height);
        log::info!("✓ Galaxy initialized");

        let painter = Painter::new(width, height);
        let renderer = CanvasRenderer::new(&device, config.format, config.width, config.height);

        let gui = Gui::new(&device, config.format, &window);
        log::info!("✓ GUI initialized");

        Ok(Self {
            surface,
            device,
            queue,
            config,
            galaxy,
            painter,
            renderer,
            gui,
            ui_state: UiState::default(),
            first_tick: None,
            attractors_seeded: false,
            frame_times: VecDeque::with_capacity(FRAME_TIME_WINDOW),
            last_frame_time: Instant::now(),
        })
    }

    fn resize(&mut self, new_size: winit::dpi::PhysicalSize<u32>) {
        if new_size.width > 0 && new_size.height > 0 {
            self.config.width = new_size.width;
            self.config.height = new_size.height;
            self.surface.configure(&self.device, &self.config);
            self.renderer
                .resize(&self.device, new_size.width, new_size.height);
            self.galaxy.handle(Command::Resize {
                width: new_size.width as f32,
                height: new_size.height as f32,
            });
        }
    }

    /// Average frame time in ms over the last [`FRAME_TIME_WINDOW`] frames
    fn track_frame_time(&mut self, now: Instant) -> f32 {
        let frame_time = (now - self.last_frame_time).as_secs_f32() * 1000.0;
        self.last_frame_time = now;

        if self.frame_times.len() == FRAME_TIME_WINDOW {
            self.frame_times.pop_front();
        }
        self.frame_times.push_back(frame_time);

        self.frame_times.iter().sum::<f32>() / self.frame_times.len() as f32
    }

    fn render(&mut self, window: &Window) -> Result<(f32, f32), wgpu::SurfaceError> {
        let now = Instant::now();
        let avg_frame_time = self.track_frame_time(now);
        let fps = if avg_frame_time > 0.0 {
            1000.0 / avg_frame_time
        } else {
            0.0
        };

        if let Some(first_tick) = self.first_tick {
            if !self.attractors_seeded && now - first_tick >= SEED_DELAY {
                self.galaxy.seed_attractors();
                self.attractors_seeded = true;
            }
        }

        let output = self.surface.get_current_texture()?;
        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Frame Encoder"),
            });

        self.painter
            .begin_frame(self.config.width as f32, self.config.height as f32);
        if self.galaxy.tick(&mut self.painter) {
            self.first_tick.get_or_insert(now);
            self.renderer
                .paint(&self.device, &self.queue, &mut encoder, self.painter.mesh());
        }
        self.renderer.present(&mut encoder, &view);

        self.ui_state = UiState {
            fps,
            frame_time: avg_frame_time,
            particle_count: self.galaxy.particles().len(),
            attractor_count: self.galaxy.attractors().len(),
            settings: *self.galaxy.settings(),
            running: self.galaxy.is_running(),
        };
        let commands = self.gui.render(
            &self.device,
            &self.queue,
            &mut encoder,
            window,
            &view,
            &self.ui_state,
        );

        self.queue.submit(std::iter::once(encoder.finish()));
        output.present();

        for command in commands {
            self.galaxy.handle(command);
        }

        Ok((fps, avg_frame_time))
    }
}

struct App {
    settings: Settings,
    window_size: winit::dpi::LogicalSize<u32>,
    window: Option<Arc<Window>>,
    gpu_state: Option<GpuState>,
    cursor: Option<Vec2>,
}

impl App {
    fn init(&mut self, event_loop: &ActiveEventLoop) -> Result<()> {
        let window_attributes = Window::default_attributes()
            .with_title("Galaxy")
            .with_inner_size(self.window_size);

        let window = Arc::new(
            event_loop
                .create_window(window_attributes)
                .context("failed to create window")?,
        );
        let gpu_state = pollster::block_on(GpuState::new(window.clone(), self.settings))?;

        self.window = Some(window);
        self.gpu_state = Some(gpu_state);
        Ok(())
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_none() {
            if let Err(err) = self.init(event_loop) {
                log::error!("Startup failed: {:#}", err);
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
        if let (Some(gpu_state), Some(window)) = (&mut self.gpu_state, &self.window) {
            if gpu_state.gui.handle_event(window, &event) {
                return;
            }
        }

        match event {
            WindowEvent::CloseRequested
            | WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        physical_key: PhysicalKey::Code(KeyCode::Escape),
                        ..
                    },
                ..
            } => event_loop.exit(),

            WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        physical_key: PhysicalKey::Code(key_code),
                        state: ElementState::Pressed,
                        repeat: false,
                        ..
                    },
                ..
            } => {
                let command = match key_code {
                    KeyCode::Space => Some(Command::TogglePause),
                    KeyCode::KeyR => Some(Command::Reset),
                    KeyCode::KeyB => Some(Command::BigBang),
                    _ => None,
                };
                if let (Some(command), Some(gpu_state)) = (command, &mut self.gpu_state) {
                    gpu_state.galaxy.handle(command);
                }
            }

            WindowEvent::Resized(physical_size) => {
                if let Some(gpu_state) = &mut self.gpu_state {
                    gpu_state.resize(physical_size);
                }
            }

            WindowEvent::CursorMoved { position, .. } => {
                let position = Vec2::new(position.x as f32, position.y as f32);
                self.cursor = Some(position);
                if let Some(gpu_state) = &mut self.gpu_state {
                    gpu_state.galaxy.handle(Command::PointerMove(position));
                }
            }

            WindowEvent::MouseInput {
                state: ElementState::Pressed,
                button: MouseButton::Left,
                ..
            } => {
                if let (Some(position), Some(gpu_state)) = (self.cursor, &mut self.gpu_state) {
                    gpu_state.galaxy.handle(Command::PointerClick(position));
                }
            }

            WindowEvent::RedrawRequested => {
                if let (Some(window), Some(gpu_state)) = (&self.window, &mut self.gpu_state) {
                    match gpu_state.render(window) {
                        Ok((fps, frame_time)) => {
                            window.set_title(&format!(
                                "Galaxy - {:.0} FPS ({:.2}ms) - {} particles",
                                fps,
                                frame_time,
                                gpu_state.galaxy.particles().len()
                            ));
                        }
                        Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                            gpu_state.resize(window.inner_size())
                        }
                        Err(wgpu::SurfaceError::OutOfMemory) => event_loop.exit(),
                        Err(e) => log::error!("Render error: {:?}", e),
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

fn main() -> Result<()> {
    // RUST_LOG=debug for verbose output
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();
    let settings = args.settings();

    log::info!(
        "Starting galaxy: {} particles, gravity {}, speed {}, {} colors",
        settings.particle_count,
        settings.gravity,
        settings.speed,
        settings.color_mode
    );

    let event_loop = EventLoop::new().context("failed to create event loop")?;
    event_loop.set_control_flow(ControlFlow::Poll);

    let mut app = App {
        settings,
        window_size: winit::dpi::LogicalSize::new(args.width, args.height),
        window: None,
        gpu_state: None,
        cursor: None,
    };

    event_loop.run_app(&mut app)?;
    Ok(())
}

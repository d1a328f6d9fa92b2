use egui::Context;
use egui_wgpu::Renderer;
use egui_winit::State;
use galaxy_physics::ColorMode;
use galaxy_simulation::{Command, Settings, GRAVITY_RANGE, PARTICLE_COUNT_RANGE, SPEED_RANGE};
use wgpu::{Device, TextureFormat};
use winit::{event::WindowEvent, window::Window};

/// Snapshot of the simulation the panel shows each frame
#[derive(Default)]
pub struct UiState {
    pub fps: f32,
    pub frame_time: f32,
    pub particle_count: usize,
    pub attractor_count: usize,
    pub settings: Settings,
    pub running: bool,
}

pub struct Gui {
    context: Context,
    state: State,
    renderer: Renderer,
}

impl Gui {
    pub fn new(device: &Device, output_color_format: TextureFormat, window: &Window) -> Self {
        let context = Context::default();
        let id = context.viewport_id();

        let state = State::new(
            context.clone(),
            id,
            window,
            Some(window.scale_factor() as f32),
            None,
            Some(device.limits().max_texture_dimension_2d as usize),
        );

        let renderer = Renderer::new(
            device,
            output_color_format,
            egui_wgpu::RendererOptions {
                msaa_samples: 1,
                depth_stencil_format: None,
                dithering: false,
                ..Default::default()
            },
        );

        Self {
            context,
            state,
            renderer,
        }
    }

    /// Feed a window event to egui. Returns true when the panel consumed it.
    pub fn handle_event(&mut self, window: &Window, event: &WindowEvent) -> bool {
        let response = self.state.on_window_event(window, event);
        response.consumed
    }

    /// Draw the panel on top of `view` and return the commands the user issued this frame
    pub fn render(
        &mut self,
        device: &Device,
        queue: &wgpu::Queue,
        encoder: &mut wgpu::CommandEncoder,
        window: &Window,
        view: &wgpu::TextureView,
        ui_state: &UiState,
    ) -> Vec<Command> {
        let raw_input = self.state.take_egui_input(window);

        let mut commands = Vec::new();
        let full_output = self.context.run(raw_input, |ctx| {
            // egui may run a second pass over the same input; only the last one counts
            commands.clear();
            Self::ui(ctx, ui_state, &mut commands);
        });

        self.state
            .handle_platform_output(window, full_output.platform_output);

        let clipped_primitives = self
            .context
            .tessellate(full_output.shapes, full_output.pixels_per_point);

        let size = window.inner_size();
        let screen_descriptor = egui_wgpu::ScreenDescriptor {
            size_in_pixels: [size.width, size.height],
            pixels_per_point: window.scale_factor() as f32,
        };

        for (id, image_delta) in &full_output.textures_delta.set {
            self.renderer
                .update_texture(device, queue, *id, image_delta);
        }

        self.renderer.update_buffers(
            device,
            queue,
            encoder,
            &clipped_primitives,
            &screen_descriptor,
        );

        let mut render_pass = encoder
            .begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Egui Render Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view,
                    depth_slice: None,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Load,
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: None,
                timestamp_writes: None,
                occlusion_query_set: None,
            })
            .forget_lifetime();

        self.renderer
            .render(&mut render_pass, &clipped_primitives, &screen_descriptor);
        drop(render_pass);

        for id in &full_output.textures_delta.free {
            self.renderer.free_texture(id);
        }

        commands
    }

    fn ui(ctx: &Context, state: &UiState, commands: &mut Vec<Command>) {
        egui::Window::new("Galaxy")
            .anchor(egui::Align2::LEFT_TOP, [10.0, 10.0])
            .resizable(false)
            .collapsible(true)
            .show(ctx, |ui| {
                let mut particle_count = state.settings.particle_count;
                if ui
                    .add(egui::Slider::new(&mut particle_count, PARTICLE_COUNT_RANGE).text("Particles"))
                    .changed()
                {
                    let count = i64::try_from(particle_count).unwrap_or(i64::MAX);
                    commands.push(Command::SetParticleCount(count));
                }

                let mut gravity = state.settings.gravity;
                if ui
                    .add(egui::Slider::new(&mut gravity, GRAVITY_RANGE).text("Gravity"))
                    .changed()
                {
                    commands.push(Command::SetGravity(gravity));
                }

                let mut speed = state.settings.speed;
                if ui
                    .add(egui::Slider::new(&mut speed, SPEED_RANGE).text("Speed"))
                    .changed()
                {
                    commands.push(Command::SetSpeed(speed));
                }

                let mut color_mode = state.settings.color_mode;
                egui::ComboBox::from_label("Color Mode")
                    .selected_text(color_mode.name())
                    .show_ui(ui, |ui| {
                        for mode in ColorMode::ALL {
                            ui.selectable_value(&mut color_mode, mode, mode.name());
                        }
                    });
                if color_mode != state.settings.color_mode {
                    commands.push(Command::SetColorMode(color_mode));
                }

                ui.separator();
                ui.horizontal(|ui| {
                    if ui.button("Reset").clicked() {
                        commands.push(Command::Reset);
                    }
                    let pause_label = if state.running { "Pause" } else { "Play" };
                    if ui.button(pause_label).clicked() {
                        commands.push(Command::TogglePause);
                    }
                    if ui.button("Big Bang").clicked() {
                        commands.push(Command::BigBang);
                    }
                });
            });

        egui::Window::new("Statistics")
            .anchor(egui::Align2::RIGHT_TOP, [-10.0, 10.0])
            .resizable(false)
            .collapsible(true)
            .show(ctx, |ui| {
                ui.label(format!("FPS: {:.1}", state.fps));
                ui.label(format!("Frame Time: {:.2} ms", state.frame_time));
                ui.separator();
                ui.label(format!("Particles: {}", state.particle_count));
                ui.label(format!("Attractors: {}", state.attractor_count));
            });
    }
}

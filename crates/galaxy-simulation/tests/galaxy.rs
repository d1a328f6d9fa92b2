use galaxy_canvas::{Canvas, Color, Paint};
use galaxy_physics::{Attractor, ColorMode, Particle};
use galaxy_simulation::{Command, Galaxy, Settings};
use glam::Vec2;

#[derive(Debug, Clone, PartialEq)]
enum Call {
    Save,
    Restore,
    GlobalAlpha(f32),
    Fill(Paint),
    StrokeColor(Color),
    LineWidth(f32),
    FillRect(f32, f32, f32, f32),
    BeginPath,
    MoveTo(Vec2),
    LineTo(Vec2),
    Arc(Vec2, f32),
    FillPath,
    Stroke,
}

/// Records every call instead of drawing
struct RecordingCanvas {
    width: f32,
    height: f32,
    calls: Vec<Call>,
}

impl RecordingCanvas {
    fn new(width: f32, height: f32) -> Self {
        Self {
            width,
            height,
            calls: Vec::new(),
        }
    }

    /// `(from, to)` of every stroked segment, in order
    fn segments(&self) -> Vec<(Vec2, Vec2)> {
        self.calls
            .windows(3)
            .filter_map(|w| match w {
                [Call::MoveTo(a), Call::LineTo(b), Call::Stroke] => Some((*a, *b)),
                _ => None,
            })
            .collect()
    }
}

impl Canvas for RecordingCanvas {
    fn width(&self) -> f32 {
        self.width
    }
    fn height(&self) -> f32 {
        self.height
    }
    fn save(&mut self) {
        self.calls.push(Call::Save);
    }
    fn restore(&mut self) {
        self.calls.push(Call::Restore);
    }
    fn set_global_alpha(&mut self, alpha: f32) {
        self.calls.push(Call::GlobalAlpha(alpha));
    }
    fn set_fill(&mut self, paint: Paint) {
        self.calls.push(Call::Fill(paint));
    }
    fn set_stroke_color(&mut self, color: Color) {
        self.calls.push(Call::StrokeColor(color));
    }
    fn set_line_width(&mut self, width: f32) {
        self.calls.push(Call::LineWidth(width));
    }
    fn fill_rect(&mut self, x: f32, y: f32, width: f32, height: f32) {
        self.calls.push(Call::FillRect(x, y, width, height));
    }
    fn begin_path(&mut self) {
        self.calls.push(Call::BeginPath);
    }
    fn move_to(&mut self, point: Vec2) {
        self.calls.push(Call::MoveTo(point));
    }
    fn line_to(&mut self, point: Vec2) {
        self.calls.push(Call::LineTo(point));
    }
    fn arc(&mut self, center: Vec2, radius: f32) {
        self.calls.push(Call::Arc(center, radius));
    }
    fn fill(&mut self) {
        self.calls.push(Call::FillPath);
    }
    fn stroke(&mut self) {
        self.calls.push(Call::Stroke);
    }
}

fn assert_close(actual: f32, expected: f32) {
    assert!((actual - expected).abs() < 1e-5, "{actual} != {expected}");
}

fn galaxy_with(count: usize) -> Galaxy {
    Galaxy::new(
        Settings {
            particle_count: count,
            ..Settings::default()
        },
        800.0,
        600.0,
    )
}

#[test]
fn life_stays_in_range_across_ticks() {
    let mut galaxy = galaxy_with(60);
    galaxy.seed_attractors();
    let mut canvas = RecordingCanvas::new(800.0, 600.0);

    for _ in 0..300 {
        assert!(galaxy.tick(&mut canvas));
        for particle in galaxy.particles() {
            assert!(particle.life > 0.0 && particle.life <= 1.0);
            assert!(particle.trail().len() <= 10);
        }
        canvas.calls.clear();
    }
}

#[test]
fn growing_population_keeps_originals() {
    let mut galaxy = galaxy_with(100);
    let originals: Vec<Particle> = galaxy.particles().to_vec();

    galaxy.handle(Command::SetParticleCount(150));
    assert_eq!(galaxy.particles().len(), 150);
    assert_eq!(&galaxy.particles()[..100], originals.as_slice());
    assert_eq!(galaxy.settings().particle_count, 150);
}

#[test]
fn shrinking_population_keeps_prefix() {
    let mut galaxy = galaxy_with(100);
    let originals: Vec<Particle> = galaxy.particles().to_vec();

    galaxy.handle(Command::SetParticleCount(60));
    assert_eq!(galaxy.particles(), &originals[..60]);
}

#[test]
fn expired_attractor_is_dropped_on_next_update() {
    let mut galaxy = galaxy_with(0);
    galaxy.add_attractor(Attractor {
        position: Vec2::new(10.0, 10.0),
        mass: 50.0,
        life: 0.005,
        decay: 0.01,
        pulse_phase: 0.0,
    });
    galaxy.spawn_attractor(Vec2::new(20.0, 20.0));
    assert_eq!(galaxy.attractors().len(), 2);

    galaxy.update();
    assert_eq!(galaxy.attractors().len(), 1);
    assert_eq!(galaxy.attractors()[0].position, Vec2::new(20.0, 20.0));
}

#[test]
fn big_bang_kicks_everything() {
    let mut galaxy = galaxy_with(50);
    galaxy.spawn_attractor(Vec2::new(1.0, 1.0));
    let before: Vec<Vec2> = galaxy.particles().iter().map(|p| p.velocity).collect();

    galaxy.handle(Command::BigBang);

    assert_eq!(galaxy.attractors().len(), 6);
    for (particle, old) in galaxy.particles().iter().zip(&before) {
        let kick = (particle.velocity - *old).length();
        assert!((4.99..=15.01).contains(&kick), "kick {kick} out of range");
    }
}

#[test]
fn click_spawns_attractor_at_pointer() {
    let mut galaxy = galaxy_with(0);
    galaxy.handle(Command::PointerClick(Vec2::new(123.0, 45.0)));
    assert_eq!(galaxy.attractors().len(), 1);
    assert_eq!(galaxy.attractors()[0].position, Vec2::new(123.0, 45.0));
}

#[test]
fn reset_clears_attractors_and_respawns() {
    let mut galaxy = galaxy_with(40);
    galaxy.handle(Command::BigBang);
    let before: Vec<Particle> = galaxy.particles().to_vec();

    galaxy.handle(Command::Reset);

    assert!(galaxy.attractors().is_empty());
    assert_eq!(galaxy.particles().len(), 40);
    assert_ne!(galaxy.particles(), before.as_slice());
    assert!(galaxy.particles().iter().all(|p| p.trail().is_empty()));
}

#[test]
fn draw_fades_full_surface_first() {
    let galaxy = galaxy_with(20);
    let mut canvas = RecordingCanvas::new(320.0, 240.0);
    galaxy.draw(&mut canvas);

    assert_eq!(
        &canvas.calls[..2],
        &[
            Call::Fill(Paint::Solid(Color::from_rgba8(0, 0, 0, 0.05))),
            Call::FillRect(0.0, 0.0, 320.0, 240.0),
        ]
    );
}

#[test]
fn attractors_drawn_after_particles() {
    let mut galaxy = galaxy_with(3);
    galaxy.spawn_attractor(Vec2::new(400.0, 300.0));
    let mut canvas = RecordingCanvas::new(800.0, 600.0);
    galaxy.draw(&mut canvas);

    let attractor_arc = canvas
        .calls
        .iter()
        .position(|c| matches!(c, Call::Arc(center, _) if *center == Vec2::new(400.0, 300.0)));
    let last_particle_arc = galaxy
        .particles()
        .iter()
        .filter_map(|p| {
            canvas
                .calls
                .iter()
                .rposition(|c| matches!(c, Call::Arc(center, _) if *center == p.position))
        })
        .max();

    let (Some(attractor_arc), Some(last_particle_arc)) = (attractor_arc, last_particle_arc) else {
        panic!("expected both particle and attractor arcs");
    };
    assert!(last_particle_arc < attractor_arc);
}

#[test]
fn connections_join_sampled_neighbours_only() {
    let mut galaxy = galaxy_with(11);
    for (i, particle) in galaxy.particles_mut().iter_mut().enumerate() {
        particle.position = Vec2::new(100.0 + i as f32, 100.0);
    }
    // Too far from 0 and 5
    galaxy.particles_mut()[10].position = Vec2::new(700.0, 500.0);

    let mut canvas = RecordingCanvas::new(800.0, 600.0);
    galaxy.draw(&mut canvas);

    assert_eq!(
        canvas.segments(),
        vec![(Vec2::new(100.0, 100.0), Vec2::new(105.0, 100.0))]
    );
    assert_eq!(canvas.calls.last(), Some(&Call::Restore));
}

#[test]
fn paused_tick_does_nothing() {
    let mut galaxy = galaxy_with(10);
    galaxy.handle(Command::TogglePause);
    let before: Vec<Particle> = galaxy.particles().to_vec();
    let mut canvas = RecordingCanvas::new(800.0, 600.0);

    assert!(!galaxy.tick(&mut canvas));
    assert!(canvas.calls.is_empty());
    assert_eq!(galaxy.particles(), before.as_slice());

    galaxy.handle(Command::TogglePause);
    assert!(galaxy.tick(&mut canvas));
    assert!(!canvas.calls.is_empty());
}

#[test]
fn wrap_uses_resized_bounds() {
    let mut galaxy = galaxy_with(1);
    galaxy.handle(Command::Resize {
        width: 200.0,
        height: 100.0,
    });
    {
        let particle = &mut galaxy.particles_mut()[0];
        particle.position = Vec2::new(0.5, 50.0);
        particle.velocity = Vec2::new(-1.0, 0.0);
    }

    galaxy.update();
    assert_eq!(galaxy.particles()[0].position, Vec2::new(200.0, 50.0));
}

#[test]
fn particle_draw_fades_trail_then_glow_and_core() {
    let mut particle = Particle::new(Vec2::new(400.0, 300.0));
    particle.velocity = Vec2::new(2.0, 1.0);
    let no_neighbours: [&Particle; 0] = [];
    for _ in 0..4 {
        particle.update(no_neighbours, &[], 0.5, 1.0, Vec2::new(800.0, 600.0));
    }
    let trail: Vec<_> = particle.trail().iter().copied().collect();
    assert_eq!(trail.len(), 4);

    let mut canvas = RecordingCanvas::new(800.0, 600.0);
    particle.draw(&mut canvas, ColorMode::Rainbow);
    assert_eq!(canvas.calls.len(), trail.len() * 7 + 11);

    let (dots, head) = canvas.calls.split_at(trail.len() * 7);
    for (i, (dot, point)) in dots.chunks(7).zip(&trail).enumerate() {
        let progress = i as f32 / trail.len() as f32;
        let alpha = progress * point.life * 0.3;
        let [
            Call::Save,
            Call::GlobalAlpha(global),
            Call::Fill(Paint::Solid(color)),
            Call::BeginPath,
            Call::Arc(center, radius),
            Call::FillPath,
            Call::Restore,
        ] = dot
        else {
            panic!("unexpected trail dot calls {dot:?}");
        };
        assert_close(*global, alpha);
        assert_close(color.a, alpha);
        assert_eq!(*center, point.position);
        assert_close(*radius, progress * particle.size * 0.5);
    }

    let [
        Call::Save,
        Call::GlobalAlpha(global),
        Call::Fill(Paint::Radial(glow)),
        Call::BeginPath,
        Call::Arc(glow_center, glow_radius),
        Call::FillPath,
        Call::Fill(Paint::Solid(core)),
        Call::BeginPath,
        Call::Arc(core_center, core_radius),
        Call::FillPath,
        Call::Restore,
    ] = head
    else {
        panic!("unexpected glow calls {head:?}");
    };
    assert_close(*global, particle.life);

    assert_eq!(glow.center, particle.position);
    assert_close(glow.radius, particle.size * 3.0);
    assert_eq!(*glow_center, particle.position);
    assert_close(*glow_radius, particle.size * 3.0);
    let stops = glow.stops();
    assert_eq!(stops.len(), 2);
    assert_close(stops[0].offset, 0.0);
    assert_close(stops[0].color.a, particle.life);
    assert_close(stops[1].offset, 1.0);
    assert_close(stops[1].color.a, 0.0);

    assert_close(core.a, particle.life);
    assert_eq!(*core_center, particle.position);
    assert_close(*core_radius, particle.size);
}

#[test]
fn attractor_draw_scales_with_visual_size() {
    let attractor = Attractor {
        position: Vec2::new(200.0, 150.0),
        mass: 50.0,
        life: 0.6,
        decay: 0.01,
        pulse_phase: 1.0,
    };
    let size = attractor.visual_size();
    assert_close(size, 50.0 * 0.3 * (1.0f32.sin() * 0.3 + 0.7) * 0.6);

    let mut canvas = RecordingCanvas::new(800.0, 600.0);
    attractor.draw(&mut canvas);

    let [
        Call::Save,
        Call::GlobalAlpha(global),
        Call::Fill(Paint::Radial(glow)),
        Call::BeginPath,
        Call::Arc(glow_center, glow_radius),
        Call::FillPath,
        Call::Fill(Paint::Solid(core)),
        Call::BeginPath,
        Call::Arc(core_center, core_radius),
        Call::FillPath,
        Call::Restore,
    ] = canvas.calls.as_slice()
    else {
        panic!("unexpected attractor calls {:?}", canvas.calls);
    };
    assert_close(*global, 0.6 * 0.8);

    assert_eq!(glow.center, attractor.position);
    assert_close(glow.radius, size * 2.0);
    assert_eq!(*glow_center, attractor.position);
    assert_close(*glow_radius, size * 2.0);
    let stops: Vec<(f32, Color)> = glow.stops().iter().map(|s| (s.offset, s.color)).collect();
    assert_eq!(
        stops,
        vec![
            (0.0, Color::from_rgba8(255, 255, 255, 0.8)),
            (0.5, Color::from_rgba8(100, 200, 255, 0.4)),
            (1.0, Color::from_rgba8(100, 200, 255, 0.0)),
        ]
    );

    assert_eq!(*core, Color::from_rgba8(255, 255, 255, 0.6));
    assert_eq!(*core_center, attractor.position);
    assert_close(*core_radius, size * 0.3);
}

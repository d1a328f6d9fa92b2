//! The simulation controller

use crate::command::Command;
use crate::connections::draw_connections;
use crate::settings::Settings;
use galaxy_canvas::{Canvas, Color};
use galaxy_physics::{Attractor, ColorMode, Particle};
use glam::Vec2;
use rand::Rng;
use std::f32::consts::TAU;

/// Attractors dropped in by a big bang
pub const BIG_BANG_ATTRACTORS: usize = 5;
/// Impulse magnitude range of a big bang: random() * SPREAD + MIN
pub const BIG_BANG_IMPULSE_MIN: f32 = 5.0;
pub const BIG_BANG_IMPULSE_SPREAD: f32 = 10.0;

/// Translucent black painted over the previous frame; what is left of it forms the trails
const FADE_COLOR: Color = Color::from_rgba8(0, 0, 0, 0.05);

/// Owns every particle and attractor and runs the per-frame update/draw cycle.
///
/// All mutation happens between ticks on the host's thread; nothing here is shared.
pub struct Galaxy {
    settings: Settings,
    particles: Vec<Particle>,
    attractors: Vec<Attractor>,
    bounds: Vec2,
    running: bool,
    pointer: Vec2,
}

impl Galaxy {
    /// Create a running galaxy filling a `width` x `height` surface
    pub fn new(settings: Settings, width: f32, height: f32) -> Self {
        let mut galaxy = Self {
            settings,
            particles: Vec::new(),
            attractors: Vec::new(),
            bounds: Vec2::new(width, height),
            running: true,
            pointer: Vec2::ZERO,
        };
        galaxy.init();
        galaxy
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn particles_mut(&mut self) -> &mut [Particle] {
        &mut self.particles
    }

    pub fn attractors(&self) -> &[Attractor] {
        &self.attractors
    }

    pub fn bounds(&self) -> Vec2 {
        self.bounds
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Last pointer position seen over the surface
    pub fn pointer(&self) -> Vec2 {
        self.pointer
    }

    fn random_point<R: Rng + ?Sized>(&self, rng: &mut R) -> Vec2 {
        Vec2::new(
            rng.random::<f32>() * self.bounds.x,
            rng.random::<f32>() * self.bounds.y,
        )
    }

    /// Replace the population with `settings.particle_count` fresh particles
    pub fn init(&mut self) {
        self.particles.clear();
        self.resize_particle_population(self.settings.particle_count);
        log::info!("Initialized {} particles", self.particles.len());
    }

    /// Grow by appending fresh particles or shrink by truncating; survivors keep their slots
    fn resize_particle_population(&mut self, target: usize) {
        let current = self.particles.len();
        if target > current {
            let mut rng = rand::rng();
            self.particles.reserve(target - current);
            for _ in current..target {
                let position = self.random_point(&mut rng);
                self.particles.push(Particle::spawn(position, &mut rng));
            }
        } else {
            self.particles.truncate(target);
        }
    }

    /// Set the particle count from a raw UI value; negative counts clamp to zero
    pub fn set_particle_count(&mut self, count: i64) {
        let count = usize::try_from(count).unwrap_or(0);
        self.settings.particle_count = count;
        self.resize_particle_population(count);
        log::debug!("Particle count set to {}", count);
    }

    pub fn set_gravity(&mut self, gravity: f32) {
        self.settings.gravity = gravity;
    }

    pub fn set_speed(&mut self, speed: f32) {
        self.settings.speed = speed;
    }

    pub fn set_color_mode(&mut self, color_mode: ColorMode) {
        self.settings.color_mode = color_mode;
    }

    /// Clear attractors and respawn every particle
    pub fn reset(&mut self) {
        self.attractors.clear();
        self.init();
        log::info!("Galaxy reset");
    }

    /// Flip between running and paused; returns the new running state
    pub fn toggle_pause(&mut self) -> bool {
        self.running = !self.running;
        log::info!("Simulation {}", if self.running { "resumed" } else { "paused" });
        self.running
    }

    /// Kick every particle in a random direction and drop in a handful of attractors
    pub fn big_bang(&mut self) {
        let mut rng = rand::rng();

        for particle in &mut self.particles {
            let angle = rng.random::<f32>() * TAU;
            let force = rng.random::<f32>() * BIG_BANG_IMPULSE_SPREAD + BIG_BANG_IMPULSE_MIN;
            particle.velocity += Vec2::from_angle(angle) * force;
        }

        for _ in 0..BIG_BANG_ATTRACTORS {
            let position = self.random_point(&mut rng);
            self.attractors.push(Attractor::spawn(position, &mut rng));
        }

        log::info!(
            "Big bang: {} particles kicked, {} attractors active",
            self.particles.len(),
            self.attractors.len()
        );
    }

    pub fn add_attractor(&mut self, attractor: Attractor) {
        self.attractors.push(attractor);
    }

    pub fn spawn_attractor(&mut self, position: Vec2) {
        log::debug!("Attractor spawned at ({:.1}, {:.1})", position.x, position.y);
        self.add_attractor(Attractor::new(position));
    }

    /// The pair of attractors a fresh galaxy starts with, at 30% and 70% of the surface
    pub fn seed_attractors(&mut self) {
        self.spawn_attractor(self.bounds * 0.3);
        self.spawn_attractor(self.bounds * 0.7);
    }

    pub fn pointer_moved(&mut self, position: Vec2) {
        self.pointer = position;
    }

    /// New wrap and spawn bounds. Existing positions are not rescaled.
    pub fn resize(&mut self, width: f32, height: f32) {
        self.bounds = Vec2::new(width, height);
        log::debug!("Galaxy bounds now {}x{}", width, height);
    }

    pub fn handle(&mut self, command: Command) {
        match command {
            Command::SetParticleCount(count) => self.set_particle_count(count),
            Command::SetGravity(gravity) => self.set_gravity(gravity),
            Command::SetSpeed(speed) => self.set_speed(speed),
            Command::SetColorMode(mode) => self.set_color_mode(mode),
            Command::Reset => self.reset(),
            Command::TogglePause => {
                self.toggle_pause();
            }
            Command::BigBang => self.big_bang(),
            Command::PointerClick(position) => self.spawn_attractor(position),
            Command::PointerMove(position) => self.pointer_moved(position),
            Command::Resize { width, height } => self.resize(width, height),
        }
    }

    /// Advance every particle in place, then age attractors and drop the expired ones.
    ///
    /// Particles update in order, so later particles see the new positions of earlier ones.
    pub fn update(&mut self) {
        let Settings { gravity, speed, .. } = self.settings;

        for i in 0..self.particles.len() {
            let (before, rest) = self.particles.split_at_mut(i);
            let Some((particle, after)) = rest.split_first_mut() else {
                break;
            };
            particle.update(
                before.iter().chain(after.iter()),
                &self.attractors,
                gravity,
                speed,
                self.bounds,
            );
        }

        self.attractors.retain_mut(|attractor| attractor.update());
    }

    /// Fade the previous frame, then draw particles, attractors and connection lines
    pub fn draw<C: Canvas + ?Sized>(&self, canvas: &mut C) {
        let (width, height) = (canvas.width(), canvas.height());
        canvas.set_fill(FADE_COLOR.into());
        canvas.fill_rect(0.0, 0.0, width, height);

        for particle in &self.particles {
            particle.draw(canvas, self.settings.color_mode);
        }

        for attractor in &self.attractors {
            attractor.draw(canvas);
        }

        draw_connections(&self.particles, canvas);
    }

    /// One frame: update then draw. Does nothing while paused and returns whether it ran.
    pub fn tick<C: Canvas + ?Sized>(&mut self, canvas: &mut C) -> bool {
        if !self.running {
            return false;
        }
        self.update();
        self.draw(canvas);
        true
    }
}

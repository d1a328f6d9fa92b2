//! Particles: the glowing bodies the galaxy is made of

use crate::attractor::Attractor;
use crate::color_mode::ColorMode;
use crate::constants::*;
use crate::forces::{attraction, repulsion};
use galaxy_canvas::{Canvas, Color, RadialGradient};
use glam::Vec2;
use palette::Hsla;
use rand::Rng;
use std::collections::VecDeque;

/// A recorded past position, drawn as part of the particle's tail
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrailPoint {
    pub position: Vec2,
    pub life: f32,
}

/// A single particle.
///
/// Particles never die: when `life` runs out it is topped back up to 1 and the hue is
/// rerolled, so the population only changes through the controller.
#[derive(Debug, Clone, PartialEq)]
pub struct Particle {
    pub position: Vec2,
    pub velocity: Vec2,
    /// Core radius in pixels
    pub size: f32,
    /// Remaining vitality in (0, 1]
    pub life: f32,
    /// Life lost per frame
    pub decay: f32,
    /// Hue in degrees, cycles through [0, 360]
    pub hue: f32,
    /// HSL lightness in percent
    pub brightness: f32,
    pub mass: f32,
    trail: VecDeque<TrailPoint>,
}

impl Particle {
    /// Create a particle at `position` with randomized velocity, size and color
    pub fn new(position: Vec2) -> Self {
        Self::spawn(position, &mut rand::rng())
    }

    pub fn spawn<R: Rng + ?Sized>(position: Vec2, rng: &mut R) -> Self {
        let velocity = Vec2::new(
            (rng.random::<f32>() - 0.5) * 2.0,
            (rng.random::<f32>() - 0.5) * 2.0,
        );
        let size = rng.random::<f32>() * PARTICLE_SIZE_SPREAD + PARTICLE_SIZE_MIN;

        Self {
            position,
            velocity,
            size,
            life: 1.0,
            decay: rng.random::<f32>() * PARTICLE_DECAY_SPREAD + PARTICLE_DECAY_MIN,
            hue: rng.random::<f32>() * 360.0,
            brightness: rng.random::<f32>() * PARTICLE_BRIGHTNESS_SPREAD
                + PARTICLE_BRIGHTNESS_MIN,
            mass: size * MASS_PER_SIZE,
            trail: VecDeque::with_capacity(MAX_TRAIL_LENGTH + 1),
        }
    }

    /// Recorded tail, oldest first
    pub fn trail(&self) -> &VecDeque<TrailPoint> {
        &self.trail
    }

    /// Advance one frame.
    ///
    /// `others` is every other particle in the galaxy (this one excluded), `bounds` the
    /// surface size the particle wraps around. Attraction is scaled by `speed`; the
    /// short-range repulsion is not.
    pub fn update<'a, I>(
        &mut self,
        others: I,
        attractors: &[Attractor],
        gravity: f32,
        speed: f32,
        bounds: Vec2,
    ) where
        I: IntoIterator<Item = &'a Particle>,
    {
        self.record_trail();

        for attractor in attractors {
            let force = attraction(
                self.position,
                self.mass,
                attractor.position,
                attractor.mass,
                gravity,
            );
            self.velocity += force * speed;
        }

        for other in others {
            self.velocity += repulsion(self.position, other.position);
        }

        self.position += self.velocity * speed;
        self.wrap(bounds);

        self.velocity *= FRICTION;

        self.life -= self.decay;
        if self.life <= 0.0 {
            self.life = 1.0;
            self.hue = rand::rng().random::<f32>() * 360.0;
        }

        self.hue += HUE_STEP;
        if self.hue > 360.0 {
            self.hue = 0.0;
        }
    }

    fn record_trail(&mut self) {
        self.trail.push_back(TrailPoint {
            position: self.position,
            life: self.life,
        });
        while self.trail.len() > MAX_TRAIL_LENGTH {
            self.trail.pop_front();
        }
    }

    /// Leaving through one edge re-enters at the opposite one
    fn wrap(&mut self, bounds: Vec2) {
        if self.position.x < 0.0 {
            self.position.x = bounds.x;
        }
        if self.position.x > bounds.x {
            self.position.x = 0.0;
        }
        if self.position.y < 0.0 {
            self.position.y = bounds.y;
        }
        if self.position.y > bounds.y {
            self.position.y = 0.0;
        }
    }

    /// This particle's color under `mode` at the given alpha
    pub fn color(&self, mode: ColorMode, alpha: f32) -> Hsla {
        mode.color(self.hue, self.brightness, alpha)
    }

    fn fill_color(&self, mode: ColorMode, alpha: f32) -> Color {
        Color::from(self.color(mode, alpha))
    }

    /// Draw the tail, then the glow and core on top
    pub fn draw<C: Canvas + ?Sized>(&self, canvas: &mut C, mode: ColorMode) {
        let trail_len = self.trail.len() as f32;
        for (index, point) in self.trail.iter().enumerate() {
            let progress = index as f32 / trail_len;
            let alpha = progress * point.life * TRAIL_OPACITY;
            let radius = progress * self.size * TRAIL_SIZE_SCALE;

            canvas.save();
            canvas.set_global_alpha(alpha);
            canvas.set_fill(self.fill_color(mode, alpha).into());
            canvas.begin_path();
            canvas.arc(point.position, radius);
            canvas.fill();
            canvas.restore();
        }

        canvas.save();
        canvas.set_global_alpha(self.life);

        let glow_radius = self.size * GLOW_SCALE;
        let glow = RadialGradient::new(self.position, glow_radius)
            .with_stop(0.0, self.fill_color(mode, self.life))
            .with_stop(1.0, self.fill_color(mode, 0.0));
        canvas.set_fill(glow.into());
        canvas.begin_path();
        canvas.arc(self.position, glow_radius);
        canvas.fill();

        canvas.set_fill(self.fill_color(mode, self.life).into());
        canvas.begin_path();
        canvas.arc(self.position, self.size);
        canvas.fill();

        canvas.restore();
    }
}

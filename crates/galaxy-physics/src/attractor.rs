//! Attractors: short-lived gravity wells spawned by clicks and big bangs

use crate::constants::*;
use galaxy_canvas::{Canvas, Color, RadialGradient};
use glam::Vec2;
use rand::Rng;
use std::f32::consts::TAU;

const GLOW_CENTER: Color = Color::from_rgba8(255, 255, 255, 0.8);
const GLOW_MIDDLE: Color = Color::from_rgba8(100, 200, 255, 0.4);
const GLOW_EDGE: Color = Color::from_rgba8(100, 200, 255, 0.0);

/// A decaying point source of gravity
#[derive(Debug, Clone, PartialEq)]
pub struct Attractor {
    pub position: Vec2,
    pub mass: f32,
    /// Remaining life in (0, 1]; the attractor is dropped once it reaches zero
    pub life: f32,
    pub decay: f32,
    /// Phase of the size pulse in radians
    pub pulse_phase: f32,
}

impl Attractor {
    pub fn new(position: Vec2) -> Self {
        Self::spawn(position, &mut rand::rng())
    }

    pub fn spawn<R: Rng + ?Sized>(position: Vec2, rng: &mut R) -> Self {
        Self {
            position,
            mass: ATTRACTOR_MASS,
            life: 1.0,
            decay: ATTRACTOR_DECAY,
            pulse_phase: rng.random::<f32>() * TAU,
        }
    }

    /// Advance one frame. Returns `false` once the attractor has expired.
    pub fn update(&mut self) -> bool {
        self.life -= self.decay;
        self.pulse_phase += PULSE_STEP;
        self.is_alive()
    }

    pub fn is_alive(&self) -> bool {
        self.life > 0.0
    }

    /// Pulse factor in [0.4, 1.0]
    pub fn pulse(&self) -> f32 {
        self.pulse_phase.sin() * 0.3 + 0.7
    }

    /// Drawn radius, shrinking as the attractor fades
    pub fn visual_size(&self) -> f32 {
        self.mass * 0.3 * self.pulse() * self.life
    }

    pub fn draw<C: Canvas + ?Sized>(&self, canvas: &mut C) {
        let size = self.visual_size();

        canvas.save();
        canvas.set_global_alpha(self.life * 0.8);

        let glow = RadialGradient::new(self.position, size * 2.0)
            .with_stop(0.0, GLOW_CENTER)
            .with_stop(0.5, GLOW_MIDDLE)
            .with_stop(1.0, GLOW_EDGE);
        canvas.set_fill(glow.into());
        canvas.begin_path();
        canvas.arc(self.position, size * 2.0);
        canvas.fill();

        canvas.set_fill(Color::from_rgba8(255, 255, 255, self.life).into());
        canvas.begin_path();
        canvas.arc(self.position, size * 0.3);
        canvas.fill();

        canvas.restore();
    }
}

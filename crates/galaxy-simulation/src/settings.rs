//! Runtime-tunable simulation settings

use galaxy_physics::ColorMode;
use std::ops::RangeInclusive;

/// Slider range offered for the particle count
pub const PARTICLE_COUNT_RANGE: RangeInclusive<usize> = 0..=2000;
pub const GRAVITY_RANGE: RangeInclusive<f32> = 0.0..=2.0;
pub const SPEED_RANGE: RangeInclusive<f32> = 0.1..=3.0;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Settings {
    /// Target population; the controller resizes to match when it changes
    pub particle_count: usize,
    /// Strength of attractor gravity
    pub gravity: f32,
    /// Time scale applied to integration and attraction
    pub speed: f32,
    pub color_mode: ColorMode,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            particle_count: 500,
            gravity: 0.5,
            speed: 1.0,
            color_mode: ColorMode::Rainbow,
        }
    }
}

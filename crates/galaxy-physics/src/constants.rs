//! Tuning constants for the galaxy simulation
//!
//! Units are screen pixels and frames; nothing here is physically meaningful.

/// Number of past positions kept per particle for its tail
pub const MAX_TRAIL_LENGTH: usize = 10;

/// Particles closer than this push each other apart
pub const REPULSION_RANGE: f32 = 50.0;

/// Numerator of the inverse-square repulsion
pub const REPULSION_STRENGTH: f32 = 0.01;

/// Velocity multiplier applied once per frame
pub const FRICTION: f32 = 0.999;

/// Degrees a particle's hue advances per frame
pub const HUE_STEP: f32 = 0.5;

/// Particle mass per unit of size
pub const MASS_PER_SIZE: f32 = 0.1;

// Particle spawn ranges: value = random() * SPREAD + MIN
pub const PARTICLE_SIZE_MIN: f32 = 1.0;
pub const PARTICLE_SIZE_SPREAD: f32 = 3.0;
pub const PARTICLE_DECAY_MIN: f32 = 0.005;
pub const PARTICLE_DECAY_SPREAD: f32 = 0.02;
pub const PARTICLE_BRIGHTNESS_MIN: f32 = 50.0;
pub const PARTICLE_BRIGHTNESS_SPREAD: f32 = 50.0;

/// Opacity cap for trail dots
pub const TRAIL_OPACITY: f32 = 0.3;

/// Trail dot radius relative to particle size, at the newest end
pub const TRAIL_SIZE_SCALE: f32 = 0.5;

/// Glow radius relative to particle size
pub const GLOW_SCALE: f32 = 3.0;

pub const ATTRACTOR_MASS: f32 = 50.0;

/// Life an attractor loses per frame; it lasts 100 frames
pub const ATTRACTOR_DECAY: f32 = 0.01;

/// Radians the attractor pulse advances per frame
pub const PULSE_STEP: f32 = 0.1;

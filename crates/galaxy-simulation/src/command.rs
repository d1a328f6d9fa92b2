use galaxy_physics::ColorMode;
use glam::Vec2;

/// Discrete events the host forwards to [`crate::Galaxy::handle`]
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Command {
    /// Resize the population; negative counts mean an empty galaxy
    SetParticleCount(i64),
    SetGravity(f32),
    SetSpeed(f32),
    SetColorMode(ColorMode),
    /// Drop all attractors and respawn every particle
    Reset,
    TogglePause,
    /// Kick every particle and drop in five attractors
    BigBang,
    /// Spawn an attractor at the clicked point
    PointerClick(Vec2),
    PointerMove(Vec2),
    /// The surface changed size; positions are kept, only the wrap bounds change
    Resize { width: f32, height: f32 },
}

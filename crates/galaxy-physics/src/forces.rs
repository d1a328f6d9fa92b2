//! Pairwise forces acting on particles
//!
//! Both forces are applied straight to velocity (unit mass integration). Directions are
//! taken from `atan2`.

use crate::constants::*;
use glam::Vec2;

/// Gravitational pull of an attractor on a particle
/// F = gravity * M * m / r², pointing from the particle towards the attractor.
///
/// Coincident points contribute nothing. The caller scales the result by the time factor.
pub fn attraction(
    position: Vec2,
    mass: f32,
    attractor_position: Vec2,
    attractor_mass: f32,
    gravity: f32,
) -> Vec2 {
    let delta = attractor_position - position;
    let distance = delta.length();

    // NaN distances fail the comparison and are skipped too
    if distance > 0.0 {
        let force = gravity * attractor_mass * mass / (distance * distance);
        Vec2::from_angle(delta.y.atan2(delta.x)) * force
    } else {
        Vec2::ZERO
    }
}

/// Short-range push a particle at `position` receives from one at `other`
/// F = 0.01 / r² inside 50 px, pointing away from `other`.
pub fn repulsion(position: Vec2, other: Vec2) -> Vec2 {
    let delta = other - position;
    let distance = delta.length();

    if distance > 0.0 && distance < REPULSION_RANGE {
        let force = REPULSION_STRENGTH / (distance * distance);
        -Vec2::from_angle(delta.y.atan2(delta.x)) * force
    } else {
        Vec2::ZERO
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f32 = 1e-6;

    #[test]
    fn test_attraction_points_at_attractor() {
        let f = attraction(Vec2::ZERO, 0.2, Vec2::new(10.0, 0.0), 50.0, 0.5);
        // 0.5 * 50 * 0.2 / 100
        assert!((f.x - 0.05).abs() < EPS);
        assert!(f.y.abs() < EPS);
    }

    #[test]
    fn test_attraction_inverse_square() {
        let near = attraction(Vec2::ZERO, 1.0, Vec2::new(0.0, 10.0), 50.0, 1.0);
        let far = attraction(Vec2::ZERO, 1.0, Vec2::new(0.0, 20.0), 50.0, 1.0);
        assert!((near.length() / far.length() - 4.0).abs() < 1e-4);
        assert!(near.y > 0.0);
    }

    #[test]
    fn test_attraction_zero_distance() {
        let p = Vec2::new(3.0, 4.0);
        assert_eq!(attraction(p, 1.0, p, 50.0, 1.0), Vec2::ZERO);
    }

    #[test]
    fn test_repulsion_symmetry() {
        let a = Vec2::new(100.0, 100.0);
        let b = Vec2::new(110.0, 100.0);

        let on_a = repulsion(a, b);
        let on_b = repulsion(b, a);

        // 0.01 / 10²
        assert!((on_a.length() - 0.0001).abs() < 1e-9);
        assert!((on_b.length() - 0.0001).abs() < 1e-9);
        assert!(on_a.x < 0.0, "a is pushed away from b");
        assert!(on_b.x > 0.0, "b is pushed away from a");
        assert!((on_a + on_b).length() < 1e-9);
    }

    #[test]
    fn test_repulsion_range() {
        let a = Vec2::ZERO;
        assert_eq!(repulsion(a, Vec2::new(50.0, 0.0)), Vec2::ZERO);
        assert_eq!(repulsion(a, a), Vec2::ZERO);
        assert_ne!(repulsion(a, Vec2::new(49.0, 0.0)), Vec2::ZERO);
    }

    #[test]
    fn test_nan_neighbour_contributes_nothing() {
        let a = Vec2::new(10.0, 10.0);
        assert_eq!(repulsion(a, Vec2::NAN), Vec2::ZERO);
        assert_eq!(repulsion(Vec2::NAN, a), Vec2::ZERO);
        assert_eq!(attraction(a, 1.0, Vec2::NAN, 50.0, 1.0), Vec2::ZERO);
    }
}

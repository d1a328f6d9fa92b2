//! Faint lines between nearby particles
//!
//! Only every fifth particle takes part, which keeps the pass at roughly n²/50
//! distance checks per frame.

use galaxy_canvas::{Canvas, Color};
use galaxy_physics::Particle;

/// Sampling stride over the particle list
pub const CONNECTION_STRIDE: usize = 5;

/// Pairs closer than this get a line
pub const CONNECTION_DISTANCE: f32 = 100.0;

const CONNECTION_ALPHA: f32 = 0.1;
const CONNECTION_COLOR: Color = Color::from_rgba8(255, 255, 255, 0.2);
const CONNECTION_WIDTH: f32 = 0.5;

/// Index pairs `(i, j)`, `i < j`, both multiples of the stride, closer than
/// [`CONNECTION_DISTANCE`]
pub fn connected_pairs(particles: &[Particle]) -> impl Iterator<Item = (usize, usize)> + '_ {
    (0..particles.len())
        .step_by(CONNECTION_STRIDE)
        .flat_map(move |i| {
            (i + CONNECTION_STRIDE..particles.len())
                .step_by(CONNECTION_STRIDE)
                .map(move |j| (i, j))
        })
        .filter(move |&(i, j)| {
            particles[i].position.distance(particles[j].position) < CONNECTION_DISTANCE
        })
}

pub fn draw_connections<C: Canvas + ?Sized>(particles: &[Particle], canvas: &mut C) {
    canvas.save();
    canvas.set_global_alpha(CONNECTION_ALPHA);
    canvas.set_stroke_color(CONNECTION_COLOR);
    canvas.set_line_width(CONNECTION_WIDTH);

    for (i, j) in connected_pairs(particles) {
        canvas.begin_path();
        canvas.move_to(particles[i].position);
        canvas.line_to(particles[j].position);
        canvas.stroke();
    }

    canvas.restore();
}

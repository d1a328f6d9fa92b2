use crate::canvas::Canvas;
use crate::color::Color;
use crate::mesh::{Mesh, Vertex};
use crate::paint::Paint;
use glam::Vec2;
use smallvec::SmallVec;
use std::f32::consts::TAU;

const MIN_CIRCLE_SEGMENTS: u32 = 8;
const MAX_CIRCLE_SEGMENTS: u32 = 64;

/// Drawing state captured by [`Canvas::save`]
#[derive(Clone, Debug, PartialEq)]
pub struct DrawState {
    pub global_alpha: f32,
    pub fill: Paint,
    pub stroke_color: Color,
    pub line_width: f32,
}

impl Default for DrawState {
    fn default() -> Self {
        Self {
            global_alpha: 1.0,
            fill: Paint::default(),
            stroke_color: Color::rgb(0.0, 0.0, 0.0),
            line_width: 1.0,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
enum PathCommand {
    MoveTo(Vec2),
    LineTo(Vec2),
    Arc { center: Vec2, radius: f32 },
}

/// [`Canvas`] implementation that tessellates every draw call into a triangle [`Mesh`].
///
/// The mesh accumulates across calls until [`Painter::begin_frame`]; a backend uploads it
/// once per frame and draws it in index order with source-over blending.
pub struct Painter {
    mesh: Mesh,
    size: Vec2,
    state: DrawState,
    saved: Vec<DrawState>,
    path: Vec<PathCommand>,
}

impl Painter {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            mesh: Mesh::new(),
            size: Vec2::new(width, height),
            state: DrawState::default(),
            saved: Vec::new(),
            path: Vec::new(),
        }
    }

    /// Drop last frame's geometry and reset drawing state
    pub fn begin_frame(&mut self, width: f32, height: f32) {
        self.mesh.clear();
        self.size = Vec2::new(width, height);
        self.state = DrawState::default();
        self.saved.clear();
        self.path.clear();
    }

    pub fn mesh(&self) -> &Mesh {
        &self.mesh
    }

    pub fn state(&self) -> &DrawState {
        &self.state
    }

    fn fill_color_at(&self, point: Vec2) -> Color {
        self.state
            .fill
            .color_at(point)
            .multiply_alpha(self.state.global_alpha)
    }

    fn fill_disc(&mut self, center: Vec2, radius: f32) {
        if radius <= 0.0 || !radius.is_finite() {
            return;
        }

        // One ring per gradient stop inside the disc so every stop lands exactly on its radius
        let mut rings: SmallVec<[f32; 4]> = SmallVec::new();
        if let Paint::Radial(gradient) = &self.state.fill {
            for stop in gradient.stops() {
                let r = stop.offset * gradient.radius;
                if r > 0.0 && r < radius && rings.last().is_none_or(|&last| r > last) {
                    rings.push(r);
                }
            }
        }
        rings.push(radius);

        let segments = circle_segments(radius);
        let center_idx = self.mesh.next_index();
        let center_color = self.fill_color_at(center);
        self.mesh
            .vertices
            .push(Vertex::new(center.to_array(), center_color));

        let mut previous_ring: Option<u32> = None;
        for &ring_radius in &rings {
            let ring_start = self.mesh.next_index();
            for i in 0..segments {
                let angle = i as f32 / segments as f32 * TAU;
                let point = center + Vec2::from_angle(angle) * ring_radius;
                let color = self.fill_color_at(point);
                self.mesh.vertices.push(Vertex::new(point.to_array(), color));
            }

            for i in 0..segments {
                let j = (i + 1) % segments;
                match previous_ring {
                    None => self
                        .mesh
                        .push_triangle(center_idx, ring_start + i, ring_start + j),
                    Some(inner) => {
                        self.mesh
                            .push_triangle(inner + i, ring_start + i, ring_start + j);
                        self.mesh.push_triangle(inner + i, ring_start + j, inner + j);
                    }
                }
            }
            previous_ring = Some(ring_start);
        }
    }

    fn fill_polygon(&mut self, points: &[Vec2]) {
        if points.len() < 3 {
            return;
        }

        let base_idx = self.mesh.next_index();
        for &point in points {
            let color = self.fill_color_at(point);
            self.mesh.vertices.push(Vertex::new(point.to_array(), color));
        }
        for i in 1..(points.len() as u32 - 1) {
            self.mesh.push_triangle(base_idx, base_idx + i, base_idx + i + 1);
        }
    }

    fn stroke_segment(&mut self, from: Vec2, to: Vec2) {
        let delta = to - from;
        let length = delta.length();
        if length <= 0.0 || !length.is_finite() {
            return;
        }

        // Sub-pixel lines keep one pixel of geometry and fade by their coverage instead
        let width = self.state.line_width;
        let (drawn_width, coverage) = if width < 1.0 { (1.0, width) } else { (width, 1.0) };

        let color = self
            .state
            .stroke_color
            .multiply_alpha(self.state.global_alpha * coverage);
        let offset = delta.perp() / length * (drawn_width * 0.5);

        let base_idx = self.mesh.next_index();
        for point in [from + offset, to + offset, to - offset, from - offset] {
            self.mesh.vertices.push(Vertex::new(point.to_array(), color));
        }
        self.mesh.push_triangle(base_idx, base_idx + 1, base_idx + 2);
        self.mesh.push_triangle(base_idx, base_idx + 2, base_idx + 3);
    }

    fn stroke_polyline(&mut self, points: &[Vec2]) {
        for pair in points.windows(2) {
            self.stroke_segment(pair[0], pair[1]);
        }
    }

    fn stroke_circle(&mut self, center: Vec2, radius: f32) {
        if radius <= 0.0 {
            return;
        }
        let segments = circle_segments(radius);
        let outline: Vec<Vec2> = (0..=segments)
            .map(|i| center + Vec2::from_angle(i as f32 / segments as f32 * TAU) * radius)
            .collect();
        self.stroke_polyline(&outline);
    }

    fn is_invisible(&self) -> bool {
        self.state.global_alpha <= 0.0
    }
}

impl Canvas for Painter {
    fn width(&self) -> f32 {
        self.size.x
    }

    fn height(&self) -> f32 {
        self.size.y
    }

    fn save(&mut self) {
        self.saved.push(self.state.clone());
    }

    fn restore(&mut self) {
        if let Some(state) = self.saved.pop() {
            self.state = state;
        }
    }

    fn set_global_alpha(&mut self, alpha: f32) {
        // Out-of-range values are ignored, as on a browser canvas
        if (0.0..=1.0).contains(&alpha) {
            self.state.global_alpha = alpha;
        }
    }

    fn set_fill(&mut self, paint: Paint) {
        self.state.fill = paint;
    }

    fn set_stroke_color(&mut self, color: Color) {
        self.state.stroke_color = color;
    }

    fn set_line_width(&mut self, width: f32) {
        if width > 0.0 && width.is_finite() {
            self.state.line_width = width;
        }
    }

    fn fill_rect(&mut self, x: f32, y: f32, width: f32, height: f32) {
        if self.is_invisible() || width == 0.0 || height == 0.0 {
            return;
        }
        let corners = [
            Vec2::new(x, y),
            Vec2::new(x + width, y),
            Vec2::new(x + width, y + height),
            Vec2::new(x, y + height),
        ];
        self.fill_polygon(&corners);
    }

    fn begin_path(&mut self) {
        self.path.clear();
    }

    fn move_to(&mut self, point: Vec2) {
        self.path.push(PathCommand::MoveTo(point));
    }

    fn line_to(&mut self, point: Vec2) {
        self.path.push(PathCommand::LineTo(point));
    }

    fn arc(&mut self, center: Vec2, radius: f32) {
        self.path.push(PathCommand::Arc { center, radius });
    }

    fn fill(&mut self) {
        if self.is_invisible() {
            return;
        }

        let path = std::mem::take(&mut self.path);
        let mut polygon: Vec<Vec2> = Vec::new();
        for command in &path {
            match *command {
                PathCommand::MoveTo(point) => {
                    self.fill_polygon(&polygon);
                    polygon.clear();
                    polygon.push(point);
                }
                PathCommand::LineTo(point) => polygon.push(point),
                PathCommand::Arc { center, radius } => {
                    self.fill_polygon(&polygon);
                    polygon.clear();
                    self.fill_disc(center, radius);
                }
            }
        }
        self.fill_polygon(&polygon);
        self.path = path;
    }

    fn stroke(&mut self) {
        if self.is_invisible() {
            return;
        }

        let path = std::mem::take(&mut self.path);
        let mut polyline: Vec<Vec2> = Vec::new();
        for command in &path {
            match *command {
                PathCommand::MoveTo(point) => {
                    self.stroke_polyline(&polyline);
                    polyline.clear();
                    polyline.push(point);
                }
                PathCommand::LineTo(point) => polyline.push(point),
                PathCommand::Arc { center, radius } => {
                    self.stroke_polyline(&polyline);
                    polyline.clear();
                    self.stroke_circle(center, radius);
                }
            }
        }
        self.stroke_polyline(&polyline);
        self.path = path;
    }
}

fn circle_segments(radius: f32) -> u32 {
    ((radius * 2.0).ceil() as u32).clamp(MIN_CIRCLE_SEGMENTS, MAX_CIRCLE_SEGMENTS)
}

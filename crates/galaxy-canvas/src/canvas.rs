use crate::color::Color;
use crate::paint::Paint;
use glam::Vec2;

/// A 2D drawing surface in the shape of the HTML canvas 2D context.
///
/// Only the primitives the galaxy draws with are exposed. State set through the
/// `set_*` methods stays in effect until changed or until a matching [`Canvas::restore`].
/// Global alpha multiplies the alpha of every color painted afterwards.
pub trait Canvas {
    /// Surface width in pixels
    fn width(&self) -> f32;

    /// Surface height in pixels
    fn height(&self) -> f32;

    /// Push a copy of the current drawing state
    fn save(&mut self);

    /// Pop the most recently saved drawing state. Unbalanced calls are ignored.
    fn restore(&mut self);

    fn set_global_alpha(&mut self, alpha: f32);

    fn set_fill(&mut self, paint: Paint);

    fn set_stroke_color(&mut self, color: Color);

    fn set_line_width(&mut self, width: f32);

    /// Fill an axis-aligned rectangle with the current fill paint
    fn fill_rect(&mut self, x: f32, y: f32, width: f32, height: f32);

    /// Discard the current path
    fn begin_path(&mut self);

    fn move_to(&mut self, point: Vec2);

    fn line_to(&mut self, point: Vec2);

    /// Add a full circle to the current path
    fn arc(&mut self, center: Vec2, radius: f32);

    /// Fill the current path with the current fill paint
    fn fill(&mut self);

    /// Stroke the current path with the current stroke color and line width
    fn stroke(&mut self);
}

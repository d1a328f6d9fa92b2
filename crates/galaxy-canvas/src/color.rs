use palette::{FromColor, Hsla, Srgba};

/// RGBA color in sRGB space with straight (non-premultiplied) alpha, components in [0, 1].
///
/// Values are kept gamma-encoded because the surface composites them the way a browser
/// canvas does, without converting to linear light first.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color {
    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self::new(r, g, b, 1.0)
    }

    pub const fn transparent() -> Self {
        Self::new(0.0, 0.0, 0.0, 0.0)
    }

    /// CSS-style `rgba(r, g, b, a)` with 0-255 channels and a float alpha
    pub const fn from_rgba8(r: u8, g: u8, b: u8, a: f32) -> Self {
        Self::new(r as f32 / 255.0, g as f32 / 255.0, b as f32 / 255.0, a)
    }

    /// CSS-style `hsla(h, s%, l%, a)`; hue in degrees, saturation and lightness in [0, 1]
    pub fn hsla(hue: f32, saturation: f32, lightness: f32, alpha: f32) -> Self {
        Self::from(Hsla::new(hue, saturation, lightness, alpha))
    }

    /// Scale alpha, used for the surface's global alpha
    pub fn multiply_alpha(mut self, factor: f32) -> Self {
        self.a *= factor;
        self
    }

    /// Component-wise linear interpolation without premultiplying alpha
    pub fn lerp(self, other: Color, t: f32) -> Self {
        Self::new(
            self.r + (other.r - self.r) * t,
            self.g + (other.g - self.g) * t,
            self.b + (other.b - self.b) * t,
            self.a + (other.a - self.a) * t,
        )
    }

    pub fn to_array(self) -> [f32; 4] {
        [self.r, self.g, self.b, self.a]
    }
}

impl From<Hsla> for Color {
    fn from(hsla: Hsla) -> Self {
        let (r, g, b, a) = Srgba::from_color(hsla).into_components();
        Self::new(
            r.clamp(0.0, 1.0),
            g.clamp(0.0, 1.0),
            b.clamp(0.0, 1.0),
            a.clamp(0.0, 1.0),
        )
    }
}

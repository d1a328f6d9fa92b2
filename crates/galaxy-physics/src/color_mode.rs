//! Palettes mapping a particle's hue and brightness to a drawable color

use palette::Hsla;
use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

/// Named palette selected from the control panel
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ColorMode {
    #[default]
    Rainbow,
    Galaxy,
    Fire,
    Ocean,
    Neon,
    /// Fallback for unrecognized names; renders like [`ColorMode::Rainbow`]
    Default,
}

impl ColorMode {
    /// The palettes offered in the UI
    pub const ALL: [ColorMode; 5] = [
        ColorMode::Rainbow,
        ColorMode::Galaxy,
        ColorMode::Fire,
        ColorMode::Ocean,
        ColorMode::Neon,
    ];

    pub fn name(self) -> &'static str {
        match self {
            ColorMode::Rainbow => "rainbow",
            ColorMode::Galaxy => "galaxy",
            ColorMode::Fire => "fire",
            ColorMode::Ocean => "ocean",
            ColorMode::Neon => "neon",
            ColorMode::Default => "default",
        }
    }

    /// Map hue (degrees), brightness (percent) and alpha to an HSLA color.
    ///
    /// Hue is not reduced modulo 360 here; the RGB conversion does that.
    pub fn color(self, hue: f32, brightness: f32, alpha: f32) -> Hsla {
        let lightness = brightness / 100.0;
        match self {
            ColorMode::Rainbow | ColorMode::Default => Hsla::new(hue, 1.0, lightness, alpha),
            ColorMode::Galaxy => Hsla::new(240.0 + hue * 0.3, 0.8, lightness, alpha),
            ColorMode::Fire => Hsla::new(hue * 0.2, 1.0, lightness, alpha),
            ColorMode::Ocean => Hsla::new(180.0 + hue * 0.5, 0.7, lightness, alpha),
            ColorMode::Neon => Hsla::new(hue, 1.0, 0.8, alpha),
        }
    }
}

impl fmt::Display for ColorMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Parsing never fails: unknown names select [`ColorMode::Default`].
impl FromStr for ColorMode {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mode = match s.trim().to_ascii_lowercase().as_str() {
            "rainbow" => ColorMode::Rainbow,
            "galaxy" => ColorMode::Galaxy,
            "fire" => ColorMode::Fire,
            "ocean" => ColorMode::Ocean,
            "neon" => ColorMode::Neon,
            _ => ColorMode::Default,
        };
        Ok(mode)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn components(c: Hsla) -> (f32, f32, f32, f32) {
        (c.hue.into_raw_degrees(), c.saturation, c.lightness, c.alpha)
    }

    #[test]
    fn test_rainbow_keeps_hue() {
        let c = ColorMode::Rainbow.color(120.0, 60.0, 1.0);
        assert_eq!(components(c), (120.0, 1.0, 0.6, 1.0));
    }

    #[test]
    fn test_color_is_pure() {
        for mode in ColorMode::ALL {
            let a = components(mode.color(200.0, 75.0, 0.4));
            let b = components(mode.color(200.0, 75.0, 0.4));
            assert_eq!(a, b, "{mode} is not deterministic");
        }
    }

    #[test]
    fn test_mode_transforms() {
        let (h, s, l, _) = components(ColorMode::Galaxy.color(100.0, 50.0, 1.0));
        assert!((h - 270.0).abs() < 1e-4);
        assert_eq!((s, l), (0.8, 0.5));

        let (h, s, _, _) = components(ColorMode::Fire.color(100.0, 50.0, 1.0));
        assert!((h - 20.0).abs() < 1e-4);
        assert_eq!(s, 1.0);

        let (h, s, _, _) = components(ColorMode::Ocean.color(100.0, 50.0, 1.0));
        assert!((h - 230.0).abs() < 1e-4);
        assert_eq!(s, 0.7);

        let (h, s, l, a) = components(ColorMode::Neon.color(100.0, 50.0, 0.3));
        assert_eq!((h, s, l, a), (100.0, 1.0, 0.8, 0.3));
    }

    #[test]
    fn test_default_mode_is_rainbow() {
        assert_eq!(ColorMode::default(), ColorMode::Rainbow);
    }

    #[test]
    fn test_default_matches_rainbow() {
        assert_eq!(
            components(ColorMode::Default.color(42.0, 70.0, 0.5)),
            components(ColorMode::Rainbow.color(42.0, 70.0, 0.5))
        );
    }

    #[test]
    fn test_parse_names() {
        assert_eq!("ocean".parse::<ColorMode>(), Ok(ColorMode::Ocean));
        assert_eq!(" Neon ".parse::<ColorMode>(), Ok(ColorMode::Neon));
        assert_eq!("plasma".parse::<ColorMode>(), Ok(ColorMode::Default));
        for mode in ColorMode::ALL {
            assert_eq!(mode.to_string().parse::<ColorMode>(), Ok(mode));
        }
    }
}

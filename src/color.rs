//! Color types, terminal color names and ANSI conversions.
//!
//! Colors are stored as 8-bit RGBA. Terminal output either writes them as
//! 24-bit escape sequences or maps them to the nearest xterm-256 index.

use crate::error::{Error, Result};
use std::str::FromStr;

/// RGBA color with 8-bit components.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Rgba {
    /// Red component (0-255).
    pub r: u8,
    /// Green component (0-255).
    pub g: u8,
    /// Blue component (0-255).
    pub b: u8,
    /// Alpha component (0-255, 255 = fully opaque).
    pub a: u8,
}

impl Rgba {
    /// Fully transparent black.
    pub const TRANSPARENT: Self = Self::new(0, 0, 0, 0);
    /// Opaque black.
    pub const BLACK: Self = Self::new(0, 0, 0, 255);
    /// Opaque white.
    pub const WHITE: Self = Self::new(255, 255, 255, 255);
    /// Terminal red.
    pub const RED: Self = Self::rgb(205, 49, 49);
    /// Terminal green.
    pub const GREEN: Self = Self::rgb(13, 188, 121);
    /// Terminal yellow.
    pub const YELLOW: Self = Self::rgb(229, 229, 16);
    /// Terminal blue.
    pub const BLUE: Self = Self::rgb(36, 114, 200);
    /// Terminal magenta.
    pub const MAGENTA: Self = Self::rgb(188, 63, 188);
    /// Terminal cyan.
    pub const CYAN: Self = Self::rgb(17, 168, 205);
    /// Terminal gray.
    pub const GRAY: Self = Self::rgb(128, 128, 128);
    /// Orange.
    pub const ORANGE: Self = Self::rgb(255, 140, 0);

    /// Create a new RGBA color.
    #[must_use]
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Create an opaque RGB color (alpha = 255).
    #[must_use]
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self::new(r, g, b, 255)
    }

    /// Create a color with modified alpha.
    #[must_use]
    pub const fn with_alpha(self, a: u8) -> Self {
        Self::new(self.r, self.g, self.b, a)
    }

    /// Linear interpolation between two colors.
    #[must_use]
    pub fn lerp(self, other: Self, t: f32) -> Self {
        let t = t.clamp(0.0, 1.0);
        let inv_t = 1.0 - t;

        Self::new(
            (f32::from(self.r) * inv_t + f32::from(other.r) * t) as u8,
            (f32::from(self.g) * inv_t + f32::from(other.g) * t) as u8,
            (f32::from(self.b) * inv_t + f32::from(other.b) * t) as u8,
            (f32::from(self.a) * inv_t + f32::from(other.a) * t) as u8,
        )
    }

    /// Brighter variant used for the `+` color names.
    #[must_use]
    pub fn brighten(self) -> Self {
        self.lerp(Self::WHITE.with_alpha(self.a), 0.35)
    }

    /// Rec. 709 luminance in `0.0..=1.0`.
    #[must_use]
    pub fn luma(self) -> f32 {
        0.2126 * (f32::from(self.r) / 255.0)
            + 0.7152 * (f32::from(self.g) / 255.0)
            + 0.0722 * (f32::from(self.b) / 255.0)
    }

    /// Nearest xterm-256 palette index.
    ///
    /// Greys go to the 24-step ramp (232-255), everything else to the
    /// 6x6x6 cube (16-231).
    #[must_use]
    pub fn to_ansi256(self) -> u8 {
        let (r, g, b) = (i32::from(self.r), i32::from(self.g), i32::from(self.b));

        if (r - g).abs() < 10 && (g - b).abs() < 10 && (r - b).abs() < 10 {
            let avg = (r + g + b) / 3;
            if avg < 8 {
                return 16;
            }
            if avg > 238 {
                return 231;
            }
            return (232 + (avg - 8) * 24 / 231) as u8;
        }

        let level = |c: i32| -> i32 {
            if c < 48 {
                0
            } else if c < 115 {
                1
            } else {
                (c - 35) / 40
            }
        };
        (16 + 36 * level(r) + 6 * level(g) + level(b)) as u8
    }

    /// Parse a `#rrggbb` hex string.
    fn from_hex(hex: &str) -> Option<Self> {
        let digits = hex.strip_prefix('#')?;
        if digits.len() != 6 || !digits.is_ascii() {
            return None;
        }
        let channel = |i: usize| u8::from_str_radix(&digits[i..i + 2], 16).ok();
        Some(Self::rgb(channel(0)?, channel(2)?, channel(4)?))
    }
}

impl FromStr for Rgba {
    type Err = Error;

    /// Parse a terminal color name (`red`, `cyan+`, `gray`, …) or `#rrggbb`.
    fn from_str(s: &str) -> Result<Self> {
        let name = s.trim().to_ascii_lowercase();
        if let Some(color) = Self::from_hex(&name) {
            return Ok(color);
        }

        let (base, bright) = match name.strip_suffix('+') {
            Some(base) => (base, true),
            None => (name.as_str(), false),
        };

        let color = match base {
            "black" => Self::BLACK,
            "white" => Self::WHITE,
            "red" => Self::RED,
            "green" => Self::GREEN,
            "yellow" => Self::YELLOW,
            "blue" => Self::BLUE,
            "magenta" => Self::MAGENTA,
            "cyan" => Self::CYAN,
            "gray" | "grey" => Self::GRAY,
            "orange" => Self::ORANGE,
            _ => return Err(Error::InvalidColor(s.to_string())),
        };

        Ok(if bright { color.brighten() } else { color })
    }
}

impl From<Rgba> for ratatui::style::Color {
    fn from(color: Rgba) -> Self {
        Self::Rgb(color.r, color.g, color.b)
    }
}

/// HSLA color with floating-point components.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Hsla {
    /// Hue (0.0-360.0 degrees).
    pub h: f32,
    /// Saturation (0.0-1.0).
    pub s: f32,
    /// Lightness (0.0-1.0).
    pub l: f32,
    /// Alpha (0.0-1.0).
    pub a: f32,
}

impl Hsla {
    /// Create a new HSLA color.
    #[must_use]
    pub const fn new(h: f32, s: f32, l: f32, a: f32) -> Self {
        Self { h, s, l, a }
    }

    /// Create an opaque HSL color (alpha = 1.0).
    #[must_use]
    pub const fn hsl(h: f32, s: f32, l: f32) -> Self {
        Self::new(h, s, l, 1.0)
    }

    /// Convert to RGBA.
    #[must_use]
    pub fn to_rgba(self) -> Rgba {
        let h = self.h.rem_euclid(360.0) / 360.0;
        let s = self.s;
        let l = self.l;

        let (r, g, b) = if s == 0.0 {
            (l, l, l)
        } else {
            let q = if l < 0.5 { l * (1.0 + s) } else { l + s - l * s };
            let p = 2.0 * l - q;

            (
                hue_to_rgb(p, q, h + 1.0 / 3.0),
                hue_to_rgb(p, q, h),
                hue_to_rgb(p, q, h - 1.0 / 3.0),
            )
        };

        Rgba::new(
            (r * 255.0) as u8,
            (g * 255.0) as u8,
            (b * 255.0) as u8,
            (self.a * 255.0) as u8,
        )
    }
}

fn hue_to_rgb(p: f32, q: f32, mut t: f32) -> f32 {
    if t < 0.0 {
        t += 1.0;
    }
    if t > 1.0 {
        t -= 1.0;
    }

    if t < 1.0 / 6.0 {
        p + (q - p) * 6.0 * t
    } else if t < 1.0 / 2.0 {
        q
    } else if t < 2.0 / 3.0 {
        p + (q - p) * (2.0 / 3.0 - t) * 6.0
    } else {
        p
    }
}

impl From<Hsla> for Rgba {
    fn from(hsla: Hsla) -> Self {
        hsla.to_rgba()
    }
}

/// Generate `n` evenly spaced hues, used when a theme runs out of colors.
#[must_use]
pub fn spread_hues(n: usize, saturation: f32, lightness: f32) -> Vec<Rgba> {
    (0..n)
        .map(|i| Hsla::hsl(360.0 * i as f32 / n.max(1) as f32, saturation, lightness).to_rgba())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_names() {
        assert_eq!("red".parse::<Rgba>().unwrap(), Rgba::RED);
        assert_eq!("Cyan".parse::<Rgba>().unwrap(), Rgba::CYAN);
        assert_eq!("grey".parse::<Rgba>().unwrap(), Rgba::GRAY);
    }

    #[test]
    fn test_parse_bright_variant_is_lighter() {
        let base: Rgba = "blue".parse().unwrap();
        let bright: Rgba = "blue+".parse().unwrap();
        assert!(bright.luma() > base.luma());
    }

    #[test]
    fn test_parse_hex() {
        assert_eq!("#ff8000".parse::<Rgba>().unwrap(), Rgba::rgb(255, 128, 0));
        assert!("#ff80".parse::<Rgba>().is_err());
        assert!("#gg0000".parse::<Rgba>().is_err());
    }

    #[test]
    fn test_parse_unknown() {
        let err = "chartreuse".parse::<Rgba>().unwrap_err();
        assert!(matches!(err, Error::InvalidColor(name) if name == "chartreuse"));
    }

    #[test]
    fn test_rgba_lerp() {
        let mid = Rgba::BLACK.lerp(Rgba::WHITE, 0.5);
        assert_eq!((mid.r, mid.g, mid.b), (127, 127, 127));
        assert_eq!(Rgba::BLACK.lerp(Rgba::WHITE, -1.0), Rgba::BLACK);
        assert_eq!(Rgba::BLACK.lerp(Rgba::WHITE, 2.0), Rgba::WHITE);
    }

    #[test]
    fn test_ansi256_extremes() {
        assert_eq!(Rgba::BLACK.to_ansi256(), 16);
        assert_eq!(Rgba::WHITE.to_ansi256(), 231);
        assert_eq!(Rgba::rgb(255, 0, 0).to_ansi256(), 196);
        assert_eq!(Rgba::rgb(0, 0, 255).to_ansi256(), 21);
    }

    #[test]
    fn test_ansi256_grey_ramp() {
        let idx = Rgba::rgb(128, 128, 128).to_ansi256();
        assert!((232..=255).contains(&idx));
    }

    #[test]
    fn test_hsla_to_rgba() {
        let red = Hsla::hsl(0.0, 1.0, 0.5).to_rgba();
        assert_eq!((red.r, red.g, red.b), (255, 0, 0));

        let gray = Hsla::hsl(0.0, 0.0, 0.5).to_rgba();
        assert_eq!((gray.r, gray.g, gray.b), (127, 127, 127));
    }

    #[test]
    fn test_spread_hues_distinct() {
        let colors = spread_hues(6, 0.8, 0.6);
        assert_eq!(colors.len(), 6);
        let unique: std::collections::HashSet<_> = colors.iter().collect();
        assert_eq!(unique.len(), 6);
    }

    #[test]
    fn test_into_ratatui() {
        let c: ratatui::style::Color = Rgba::rgb(1, 2, 3).into();
        assert_eq!(c, ratatui::style::Color::Rgb(1, 2, 3));
    }
}

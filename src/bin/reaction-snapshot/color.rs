// color.rs - Species colours for the raster output
//
// Parses the CSS hex colours the palette stores and blends them for
// anti-aliased disc edges.

use image::Rgb;

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

pub const BACKGROUND: Color = Color { r: 18.0, g: 18.0, b: 24.0 };
pub const FALLBACK: Color = Color { r: 136.0, g: 136.0, b: 136.0 };

impl Color {
    pub fn from_rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r: r as f32, g: g as f32, b: b as f32 }
    }

    pub fn to_rgb(self) -> Rgb<u8> {
        Rgb([
            self.r.clamp(0.0, 255.0) as u8,
            self.g.clamp(0.0, 255.0) as u8,
            self.b.clamp(0.0, 255.0) as u8,
        ])
    }

    /// `#rgb` or `#rrggbb`; anything else is `None`
    pub fn parse_css(s: &str) -> Option<Self> {
        let hex = s.trim().strip_prefix('#')?;
        if !hex.is_ascii() {
            return None;
        }
        let channel = |h: &str| u8::from_str_radix(h, 16).ok();
        match hex.len() {
            3 => {
                let mut c = hex.chars().map(|ch| channel(&ch.to_string()).map(|v| v * 17));
                Some(Self::from_rgb(c.next()??, c.next()??, c.next()??))
            }
            6 => Some(Self::from_rgb(
                channel(&hex[0..2])?,
                channel(&hex[2..4])?,
                channel(&hex[4..6])?,
            )),
            _ => None,
        }
    }

    /// Palette colour, or grey for anything unparseable
    pub fn from_css(s: &str) -> Self {
        Self::parse_css(s).unwrap_or(FALLBACK)
    }

    pub fn lerp(self, other: Color, t: f32) -> Color {
        self * (1.0 - t) + other * t
    }
}

impl std::ops::Add for Color {
    type Output = Self;
    fn add(self, o: Self) -> Self {
        Self { r: self.r + o.r, g: self.g + o.g, b: self.b + o.b }
    }
}

impl std::ops::Mul<f32> for Color {
    type Output = Self;
    fn mul(self, s: f32) -> Self {
        Self { r: self.r * s, g: self.g * s, b: self.b * s }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_hex_forms() {
        assert_eq!(Color::parse_css("#ff8000"), Some(Color::from_rgb(255, 128, 0)));
        assert_eq!(Color::parse_css("#f80"), Some(Color::from_rgb(255, 136, 0)));
        assert_eq!(Color::parse_css("red"), None);
        assert_eq!(Color::parse_css("#12345"), None);
        assert_eq!(Color::parse_css("#gg0000"), None);
        assert_eq!(Color::from_css("hsl(0, 0%, 0%)"), FALLBACK);
    }

    #[test]
    fn lerp_endpoints() {
        let a = Color::from_rgb(0, 0, 0);
        let b = Color::from_rgb(200, 100, 50);
        assert_eq!(a.lerp(b, 0.0), a);
        assert_eq!(a.lerp(b, 1.0), b);
        assert_eq!(a.lerp(b, 0.5).to_rgb(), Rgb([100, 50, 25]));
    }
}

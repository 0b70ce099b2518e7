use std::str::FromStr;

use crate::DrawError;

/// Straight-alpha RGBA color.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const BLACK: Color = Color::rgb(0, 0, 0);
    pub const WHITE: Color = Color::rgb(255, 255, 255);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Parse a CSS color string such as `#eee`, `#336699`, `rgb(0 0 0 / 50%)` or `white`.
    /// # Example
    /// ```
    /// use qrdraw_render::Color;
    /// assert_eq!(Color::parse("#eee").unwrap(), Color::rgb(0xee, 0xee, 0xee));
    /// assert_eq!(Color::parse("black").unwrap(), Color::BLACK);
    /// assert!(Color::parse("not a color").is_err());
    /// ```
    pub fn parse(s: &str) -> Result<Self, DrawError> {
        let parsed = csscolorparser::parse(s)
            .map_err(|e| DrawError::InvalidColor(s.to_string(), e.to_string()))?;
        let [r, g, b, a] = parsed.to_rgba8();
        Ok(Self { r, g, b, a })
    }
}

impl FromStr for Color {
    type Err = DrawError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

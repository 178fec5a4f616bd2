//! Color representation for layers and model objects

use std::fmt;

/// 32-bit ARGB color as stored in the document
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Color {
    pub a: u8,
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    /// Create an opaque color from RGB components
    pub const fn from_rgb(r: u8, g: u8, b: u8) -> Self {
        Color { a: 255, r, g, b }
    }

    /// Create a color from ARGB components
    pub const fn from_argb(a: u8, r: u8, g: u8, b: u8) -> Self {
        Color { a, r, g, b }
    }

    /// Unpack from a `0xAARRGGBB` value
    pub const fn from_u32(value: u32) -> Self {
        Color {
            a: (value >> 24) as u8,
            r: (value >> 16) as u8,
            g: (value >> 8) as u8,
            b: value as u8,
        }
    }

    /// Pack into a `0xAARRGGBB` value
    pub const fn to_u32(&self) -> u32 {
        ((self.a as u32) << 24) | ((self.r as u32) << 16) | ((self.g as u32) << 8) | self.b as u32
    }

    pub const BLACK: Color = Color::from_rgb(0, 0, 0);
    pub const WHITE: Color = Color::from_rgb(255, 255, 255);
    pub const RED: Color = Color::from_rgb(255, 0, 0);
    pub const GREEN: Color = Color::from_rgb(0, 255, 0);
    pub const BLUE: Color = Color::from_rgb(0, 0, 255);
}

impl Default for Color {
    fn default() -> Self {
        Color::BLACK
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ARGB({}, {}, {}, {})", self.a, self.r, self.g, self.b)
    }
}

/// Where a model object takes its display color from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ColorSource {
    /// Use the color of the object's layer
    #[default]
    ByLayer,
    /// Use the object's own color
    ByObject,
}

impl ColorSource {
    /// Stored byte value
    pub fn to_u8(self) -> u8 {
        match self {
            ColorSource::ByLayer => 0,
            ColorSource::ByObject => 1,
        }
    }

    /// Parse the stored byte value; unknown values fall back to `ByLayer`
    pub fn from_u8(value: u8) -> Self {
        match value {
            1 => ColorSource::ByObject,
            _ => ColorSource::ByLayer,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_u32_packing() {
        let c = Color::from_argb(0x80, 0x12, 0x34, 0x56);
        assert_eq!(c.to_u32(), 0x8012_3456);
        assert_eq!(Color::from_u32(0x8012_3456), c);
    }

    #[test]
    fn test_color_source_bytes() {
        assert_eq!(ColorSource::from_u8(ColorSource::ByObject.to_u8()), ColorSource::ByObject);
        assert_eq!(ColorSource::from_u8(42), ColorSource::ByLayer);
    }
}

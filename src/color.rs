//! Colors and the named palette
//!
//! Drawing calls accept either a concrete [`Color`] or a name. Names are
//! resolved through a [`Palette`]: the ten palette entries first, then a
//! table of common color names (case-insensitive), then `#rrggbb` /
//! `#rrggbbaa` literals.

use crate::error::{Error, Result};
use std::collections::HashMap;

/// An 8-bit RGBA color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const BLACK: Color = Color::rgb(0, 0, 0);
    pub const WHITE: Color = Color::rgb(255, 255, 255);
    pub const TRANSPARENT: Color = Color::rgba(0, 0, 0, 0);

    /// Create an opaque color.
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    /// Create a color with alpha.
    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Return the same color with a different alpha.
    pub const fn with_alpha(self, a: u8) -> Self {
        Self { a, ..self }
    }

    /// Components as `[r, g, b, a]`.
    pub const fn to_array(self) -> [u8; 4] {
        [self.r, self.g, self.b, self.a]
    }

    /// Scale the alpha channel by a coverage factor in `[0, 1]`.
    pub fn with_coverage(self, coverage: f32) -> Self {
        let coverage = coverage.clamp(0.0, 1.0);
        self.with_alpha((self.a as f32 * coverage).round() as u8)
    }

    /// Composite `self` over `dst` using the alpha of `self`.
    pub fn over(self, dst: Color) -> Color {
        match self.a {
            255 => self,
            0 => dst,
            a => {
                let a = a as f32 / 255.0;
                let mix = |s: u8, d: u8| (s as f32 * a + d as f32 * (1.0 - a)).round() as u8;
                let out_a = a + (dst.a as f32 / 255.0) * (1.0 - a);
                Color {
                    r: mix(self.r, dst.r),
                    g: mix(self.g, dst.g),
                    b: mix(self.b, dst.b),
                    a: (out_a * 255.0).round() as u8,
                }
            }
        }
    }

    /// Parse `#rrggbb` or `#rrggbbaa`.
    pub fn from_hex(hex: &str) -> Option<Self> {
        let digits = hex.strip_prefix('#')?;
        if !digits.is_ascii() {
            return None;
        }
        let channel = |i: usize| u8::from_str_radix(&digits[i..i + 2], 16).ok();
        match digits.len() {
            6 => Some(Color::rgb(channel(0)?, channel(2)?, channel(4)?)),
            8 => Some(Color::rgba(channel(0)?, channel(2)?, channel(4)?, channel(6)?)),
            _ => None,
        }
    }
}

impl From<[u8; 4]> for Color {
    fn from(c: [u8; 4]) -> Self {
        Color::rgba(c[0], c[1], c[2], c[3])
    }
}

impl From<(u8, u8, u8)> for Color {
    fn from((r, g, b): (u8, u8, u8)) -> Self {
        Color::rgb(r, g, b)
    }
}

impl From<(u8, u8, u8, u8)> for Color {
    fn from((r, g, b, a): (u8, u8, u8, u8)) -> Self {
        Color::rgba(r, g, b, a)
    }
}

/// A color given either by name or by value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorRef<'a> {
    Name(&'a str),
    Value(Color),
}

impl<'a> From<&'a str> for ColorRef<'a> {
    fn from(name: &'a str) -> Self {
        ColorRef::Name(name)
    }
}

impl<'a> From<&'a String> for ColorRef<'a> {
    fn from(name: &'a String) -> Self {
        ColorRef::Name(name.as_str())
    }
}

impl From<Color> for ColorRef<'_> {
    fn from(color: Color) -> Self {
        ColorRef::Value(color)
    }
}

impl From<(u8, u8, u8)> for ColorRef<'_> {
    fn from(rgb: (u8, u8, u8)) -> Self {
        ColorRef::Value(rgb.into())
    }
}

/// Names of the palette entries, in display order.
pub const PALETTE_NAMES: [&str; 10] = [
    "Black",
    "White",
    "Gray",
    "Red",
    "Blue",
    "Purple",
    "Green",
    "Yellow",
    "Orange",
    "LightBlue",
];

const PALETTE: [(&str, Color); 10] = [
    ("Black", Color::rgb(0, 0, 0)),
    ("White", Color::rgb(255, 255, 240)),   // ivory
    ("Gray", Color::rgb(190, 190, 190)),    // gray
    ("Red", Color::rgb(178, 34, 34)),       // firebrick
    ("Blue", Color::rgb(70, 130, 180)),     // steelblue
    ("Purple", Color::rgb(221, 160, 221)),  // plum
    ("Green", Color::rgb(60, 179, 71)),
    ("Yellow", Color::rgb(255, 215, 0)),    // gold
    ("Orange", Color::rgb(220, 94, 56)),
    ("LightBlue", Color::rgb(135, 206, 235)), // skyblue
];

// Lowercase, spaces removed.
const NAMED_COLORS: &[(&str, Color)] = &[
    ("black", Color::rgb(0, 0, 0)),
    ("white", Color::rgb(255, 255, 255)),
    ("ivory", Color::rgb(255, 255, 240)),
    ("gray", Color::rgb(190, 190, 190)),
    ("grey", Color::rgb(190, 190, 190)),
    ("darkgray", Color::rgb(169, 169, 169)),
    ("darkgrey", Color::rgb(169, 169, 169)),
    ("lightgray", Color::rgb(211, 211, 211)),
    ("lightgrey", Color::rgb(211, 211, 211)),
    ("red", Color::rgb(255, 0, 0)),
    ("firebrick", Color::rgb(178, 34, 34)),
    ("green", Color::rgb(0, 255, 0)),
    ("blue", Color::rgb(0, 0, 255)),
    ("steelblue", Color::rgb(70, 130, 180)),
    ("skyblue", Color::rgb(135, 206, 235)),
    ("navy", Color::rgb(0, 0, 128)),
    ("yellow", Color::rgb(255, 255, 0)),
    ("gold", Color::rgb(255, 215, 0)),
    ("orange", Color::rgb(255, 165, 0)),
    ("purple", Color::rgb(160, 32, 240)),
    ("plum", Color::rgb(221, 160, 221)),
    ("pink", Color::rgb(255, 192, 203)),
    ("brown", Color::rgb(165, 42, 42)),
    ("cyan", Color::rgb(0, 255, 255)),
    ("magenta", Color::rgb(255, 0, 255)),
];

/// Maps symbolic color names to concrete colors.
#[derive(Debug, Clone)]
pub struct Palette {
    entries: HashMap<&'static str, Color>,
}

impl Palette {
    /// Create the standard ten-entry palette.
    pub fn new() -> Self {
        Self {
            entries: PALETTE.iter().copied().collect(),
        }
    }

    /// Look up a palette entry by its exact name.
    pub fn get(&self, name: &str) -> Option<Color> {
        self.entries.get(name).copied()
    }

    /// Palette entry names, in display order.
    pub fn names(&self) -> impl Iterator<Item = &'static str> {
        PALETTE_NAMES.into_iter()
    }

    /// Resolve a color reference to a concrete color.
    pub fn resolve<'a>(&self, color: impl Into<ColorRef<'a>>) -> Result<Color> {
        match color.into() {
            ColorRef::Value(color) => Ok(color),
            ColorRef::Name(name) => self
                .get(name)
                .or_else(|| named_color(name))
                .or_else(|| Color::from_hex(name))
                .ok_or_else(|| Error::UnknownColor(name.to_string())),
        }
    }
}

impl Default for Palette {
    fn default() -> Self {
        Self::new()
    }
}

fn named_color(name: &str) -> Option<Color> {
    let key: String = name
        .chars()
        .filter(|c| !c.is_whitespace())
        .map(|c| c.to_ascii_lowercase())
        .collect();
    NAMED_COLORS
        .iter()
        .find(|(n, _)| *n == key)
        .map(|(_, c)| *c)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_palette_resolution_is_stable() {
        let palette = Palette::new();
        for name in PALETTE_NAMES {
            let first = palette.resolve(name).unwrap();
            let second = palette.resolve(name).unwrap();
            assert_eq!(first, second, "{name} resolved differently");
        }
    }

    #[test]
    fn test_palette_values() {
        let palette = Palette::new();
        assert_eq!(palette.get("White"), Some(Color::rgb(255, 255, 240)));
        assert_eq!(palette.get("Green"), Some(Color::rgb(60, 179, 71)));
        assert_eq!(palette.get("Orange"), Some(Color::rgb(220, 94, 56)));
        assert_eq!(palette.names().count(), 10);
    }

    #[test]
    fn test_palette_takes_precedence_over_named_colors() {
        let palette = Palette::new();
        // "Red" is the palette's firebrick, "red" the plain named color
        assert_eq!(palette.resolve("Red").unwrap(), Color::rgb(178, 34, 34));
        assert_eq!(palette.resolve("red").unwrap(), Color::rgb(255, 0, 0));
        assert_eq!(palette.resolve("Light Gray").unwrap(), Color::rgb(211, 211, 211));
    }

    #[test]
    fn test_resolve_hex_and_values() {
        let palette = Palette::new();
        assert_eq!(palette.resolve("#102030").unwrap(), Color::rgb(16, 32, 48));
        assert_eq!(
            palette.resolve("#10203040").unwrap(),
            Color::rgba(16, 32, 48, 64)
        );
        assert_eq!(palette.resolve((1, 2, 3)).unwrap(), Color::rgb(1, 2, 3));
        assert!(matches!(
            palette.resolve("chartreuse-ish"),
            Err(Error::UnknownColor(_))
        ));
        assert!(Color::from_hex("#12345").is_none());
    }

    #[test]
    fn test_over_blending() {
        let dst = Color::rgb(0, 0, 0);
        assert_eq!(Color::rgb(10, 20, 30).over(dst), Color::rgb(10, 20, 30));
        assert_eq!(Color::TRANSPARENT.over(dst), dst);

        let half = Color::rgba(200, 100, 0, 128).over(Color::rgb(0, 0, 0));
        assert_eq!(half.a, 255);
        assert!((half.r as i32 - 100).abs() <= 1);
        assert!((half.g as i32 - 50).abs() <= 1);
    }
}

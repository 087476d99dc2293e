//! Font faces and the font cache
//!
//! Text is shaped and rasterized on the CPU with the cosmic-text types
//! re-exported by glyphon. Fonts are looked up by symbolic face name and
//! pixel size and cached per (face, size).

use crate::color::Color;
use crate::error::{Error, Result};
use glyphon::{Attrs, Buffer, Color as GlyphColor, Family, FontSystem, Metrics, Shaping, SwashCache};
use std::collections::HashMap;
use std::str::FromStr;
use std::sync::Arc;
use tracing::debug;

/// Symbolic font families.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FontFace {
    Serif,
    SansSerif,
}

impl FontFace {
    /// Recognized face names.
    pub const NAMES: [&'static str; 2] = ["serif", "sans-serif"];

    /// Resolve a symbolic face name.
    pub fn from_name(name: &str) -> Result<Self> {
        match name {
            "serif" => Ok(FontFace::Serif),
            "sans-serif" => Ok(FontFace::SansSerif),
            other => Err(Error::InvalidFontFace(other.to_string())),
        }
    }

    /// The symbolic name of this face.
    pub fn name(self) -> &'static str {
        match self {
            FontFace::Serif => "serif",
            FontFace::SansSerif => "sans-serif",
        }
    }

    fn family(self) -> Family<'static> {
        match self {
            FontFace::Serif => Family::Serif,
            FontFace::SansSerif => Family::SansSerif,
        }
    }
}

impl FromStr for FontFace {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_name(s)
    }
}

/// A font at a specific pixel size.
#[derive(Debug, PartialEq)]
pub struct Font {
    face: FontFace,
    size: u32,
}

impl Font {
    pub fn face(&self) -> FontFace {
        self.face
    }

    pub fn size(&self) -> u32 {
        self.size
    }

    /// Line height in pixels.
    pub fn line_height(&self) -> f32 {
        // 1.2 x size, rounded up
        (self.size * 6).div_ceil(5) as f32
    }

    fn metrics(&self) -> Metrics {
        Metrics::new(self.size as f32, self.line_height())
    }
}

/// Cache of fonts keyed by (face, size), plus the shaping state used to
/// measure and rasterize text.
///
/// The system font database is only loaded on the first measuring or
/// rasterizing call.
pub struct FontCache {
    font_system: Option<FontSystem>,
    swash_cache: SwashCache,
    fonts: HashMap<(FontFace, u32), Arc<Font>>,
}

impl FontCache {
    /// Create an empty cache.
    pub fn new() -> Self {
        Self {
            font_system: None,
            swash_cache: SwashCache::new(),
            fonts: HashMap::new(),
        }
    }

    /// Get the font for a face name and size, creating it on first use.
    pub fn get(&mut self, face: &str, size: u32) -> Result<Arc<Font>> {
        let face = FontFace::from_name(face)?;
        Ok(self.get_face(face, size))
    }

    /// Get the font for a resolved face and size.
    pub fn get_face(&mut self, face: FontFace, size: u32) -> Arc<Font> {
        self.fonts
            .entry((face, size))
            .or_insert_with(|| {
                debug!("Caching font {} at {}px", face.name(), size);
                Arc::new(Font { face, size })
            })
            .clone()
    }

    /// Number of cached fonts.
    pub fn len(&self) -> usize {
        self.fonts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fonts.is_empty()
    }

    /// Drop all cached fonts and the loaded font database.
    pub fn clear(&mut self) {
        self.fonts.clear();
        self.font_system = None;
        self.swash_cache = SwashCache::new();
    }

    /// Rendered size of `text` as `(width, height)` in pixels.
    pub fn measure(&mut self, font: &Font, text: &str) -> (f32, f32) {
        let font_system = self.font_system.get_or_insert_with(FontSystem::new);
        let buffer = shape(font_system, font, text);

        let width = buffer
            .layout_runs()
            .map(|run| run.line_w)
            .fold(0.0f32, f32::max);
        let lines = buffer.layout_runs().count().max(1);

        (width.ceil(), lines as f32 * font.line_height())
    }

    /// Rasterize `text` with its top-left corner at the origin.
    ///
    /// `f` receives `(x, y, width, height, color)` rectangles whose alpha
    /// holds the glyph coverage.
    pub fn rasterize<F>(&mut self, font: &Font, text: &str, color: Color, mut f: F)
    where
        F: FnMut(i32, i32, u32, u32, Color),
    {
        let font_system = self.font_system.get_or_insert_with(FontSystem::new);
        let buffer = shape(font_system, font, text);

        buffer.draw(
            font_system,
            &mut self.swash_cache,
            GlyphColor::rgba(color.r, color.g, color.b, color.a),
            |x, y, w, h, c| f(x, y, w, h, Color::rgba(c.r(), c.g(), c.b(), c.a())),
        );
    }
}

impl Default for FontCache {
    fn default() -> Self {
        Self::new()
    }
}

fn shape(font_system: &mut FontSystem, font: &Font, text: &str) -> Buffer {
    let mut buffer = Buffer::new(font_system, font.metrics());
    buffer.set_size(font_system, None, None);
    buffer.set_text(
        font_system,
        text,
        &Attrs::new().family(font.face().family()),
        Shaping::Advanced,
        None,
    );
    buffer.shape_until_scroll(font_system, false);
    buffer
}

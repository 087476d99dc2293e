//! RGBA pixel surface
//!
//! The target of every drawing call. Pixels are stored row-major as
//! RGBA8; writes outside the surface are clipped.

use crate::color::Color;
use crate::error::Result;
use image::{DynamicImage, ImageFormat};
use std::path::Path;

/// An RGBA8 pixel buffer.
#[derive(Clone, PartialEq, Eq)]
pub struct Surface {
    width: u32,
    height: u32,
    pixels: Vec<u8>,
}

impl Surface {
    /// Create a surface filled with opaque black.
    pub fn new(width: u32, height: u32) -> Self {
        let mut surface = Self {
            width,
            height,
            pixels: vec![0; width as usize * height as usize * 4],
        };
        surface.fill(Color::BLACK);
        surface
    }

    /// Wrap existing RGBA8 data. Returns `None` if the length does not
    /// match the dimensions.
    pub fn from_rgba(width: u32, height: u32, pixels: Vec<u8>) -> Option<Self> {
        (pixels.len() == width as usize * height as usize * 4).then_some(Self {
            width,
            height,
            pixels,
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Raw RGBA8 bytes.
    pub fn as_bytes(&self) -> &[u8] {
        &self.pixels
    }

    fn index(&self, x: i32, y: i32) -> Option<usize> {
        if x < 0 || y < 0 || x >= self.width as i32 || y >= self.height as i32 {
            return None;
        }
        Some((y as usize * self.width as usize + x as usize) * 4)
    }

    /// Read a pixel.
    pub fn pixel(&self, x: i32, y: i32) -> Option<Color> {
        let i = self.index(x, y)?;
        let p = &self.pixels[i..i + 4];
        Some(Color::rgba(p[0], p[1], p[2], p[3]))
    }

    /// Overwrite a pixel.
    pub fn set_pixel(&mut self, x: i32, y: i32, color: Color) {
        if let Some(i) = self.index(x, y) {
            self.pixels[i..i + 4].copy_from_slice(&color.to_array());
        }
    }

    /// Composite a color over a pixel using the color's alpha.
    pub fn blend_pixel(&mut self, x: i32, y: i32, color: Color) {
        match color.a {
            0 => {}
            255 => self.set_pixel(x, y, color),
            _ => {
                if let Some(dst) = self.pixel(x, y) {
                    self.set_pixel(x, y, color.over(dst));
                }
            }
        }
    }

    /// Fill the whole surface.
    pub fn fill(&mut self, color: Color) {
        let rgba = color.to_array();
        for p in self.pixels.chunks_exact_mut(4) {
            p.copy_from_slice(&rgba);
        }
    }

    /// Blend a horizontal span `x0..=x1` on row `y`.
    pub fn hspan(&mut self, x0: i32, x1: i32, y: i32, color: Color) {
        if y < 0 || y >= self.height as i32 {
            return;
        }
        let x0 = x0.max(0);
        let x1 = x1.min(self.width as i32 - 1);
        for x in x0..=x1 {
            self.blend_pixel(x, y, color);
        }
    }

    /// Blend a filled rectangle.
    pub fn fill_rect(&mut self, x: i32, y: i32, w: i32, h: i32, color: Color) {
        if w <= 0 || h <= 0 {
            return;
        }
        let top = y.max(0);
        let bottom = y.saturating_add(h).min(self.height as i32);
        let right = x.saturating_add(w - 1);
        for row in top..bottom {
            self.hspan(x, right, row, color);
        }
    }

    /// Composite another surface onto this one with its top-left at (x, y).
    pub fn blit(&mut self, src: &Surface, x: i32, y: i32) {
        for sy in 0..src.height as i32 {
            for sx in 0..src.width as i32 {
                if let Some(color) = src.pixel(sx, sy) {
                    self.blend_pixel(x + sx, y + sy, color);
                }
            }
        }
    }

    /// Copy another surface verbatim, ignoring alpha.
    pub fn copy_from(&mut self, src: &Surface, x: i32, y: i32) {
        for sy in 0..src.height as i32 {
            let dy = y + sy;
            if dy < 0 || dy >= self.height as i32 {
                continue;
            }
            let x0 = x.max(0);
            let x1 = (x + src.width as i32).min(self.width as i32);
            if x0 >= x1 {
                continue;
            }
            let (Some(d), Some(s)) = (self.index(x0, dy), src.index(x0 - x, sy)) else {
                continue;
            };
            let len = (x1 - x0) as usize * 4;
            self.pixels[d..d + len].copy_from_slice(&src.pixels[s..s + len]);
        }
    }

    /// Convert to an `image` buffer.
    pub fn to_image(&self) -> image::RgbaImage {
        image::RgbaImage::from_raw(self.width, self.height, self.pixels.clone())
            .unwrap_or_else(|| image::RgbaImage::new(self.width, self.height))
    }

    /// Save as an image file; the format follows the extension.
    ///
    /// Formats without an alpha channel get the RGB channels only.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let image = self.to_image();
        match ImageFormat::from_path(path) {
            Ok(ImageFormat::Jpeg | ImageFormat::Bmp) => {
                DynamicImage::ImageRgba8(image).to_rgb8().save(path)?
            }
            _ => image.save(path)?,
        }
        Ok(())
    }
}

impl std::fmt::Debug for Surface {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Surface")
            .field("width", &self.width)
            .field("height", &self.height)
            .finish()
    }
}

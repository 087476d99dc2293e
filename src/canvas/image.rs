//! Images for drawing on a canvas

use super::surface::Surface;
use crate::color::Color;
use crate::error::Result;
use glam::Vec2;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Where an image comes from and the size it is meant to occupy.
#[derive(Debug, Clone, PartialEq)]
pub struct ImageInfo {
    path: PathBuf,
    size: Vec2,
}

impl ImageInfo {
    pub fn new(path: impl Into<PathBuf>, size: impl Into<Vec2>) -> Self {
        Self {
            path: path.into(),
            size: size.into(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn size(&self) -> Vec2 {
        self.size
    }

    pub fn set_size(&mut self, size: impl Into<Vec2>) {
        self.size = size.into();
    }
}

/// A decoded RGBA image.
#[derive(Debug, Clone)]
pub struct Image {
    info: ImageInfo,
    pixels: Surface,
}

impl Image {
    /// Load and decode the file named by `info`.
    pub fn load(info: ImageInfo) -> Result<Self> {
        let decoded = image::open(info.path())?.to_rgba8();
        let (width, height) = decoded.dimensions();
        debug!("Loaded image {:?} ({}x{})", info.path(), width, height);
        let pixels = Surface::from_rgba(width, height, decoded.into_raw())
            .unwrap_or_else(|| Surface::new(width, height));
        Ok(Self { info, pixels })
    }

    /// Wrap pixels that are already in memory.
    pub fn from_surface(info: ImageInfo, pixels: Surface) -> Self {
        Self { info, pixels }
    }

    pub fn info(&self) -> &ImageInfo {
        &self.info
    }

    /// The nominal size from the image info.
    pub fn size(&self) -> Vec2 {
        self.info.size()
    }

    pub fn set_size(&mut self, size: impl Into<Vec2>) {
        self.info.set_size(size);
    }

    /// Pixel dimensions of the decoded data.
    pub fn dimensions(&self) -> (u32, u32) {
        self.pixels.size()
    }

    pub fn pixels(&self) -> &Surface {
        &self.pixels
    }

    /// The image rotated counter-clockwise by `degrees`, in a buffer
    /// grown to the rotated bounding box. Uncovered pixels are
    /// transparent.
    pub fn rotated(&self, degrees: f32) -> Surface {
        if degrees.rem_euclid(360.0) == 0.0 {
            return self.pixels.clone();
        }
        let (w, h) = (self.pixels.width() as f32, self.pixels.height() as f32);
        let (sin, cos) = degrees.to_radians().sin_cos();

        // Sub-pixel slack so exact right angles do not round up a pixel
        let bound = |v: f32| (v - 1e-3).ceil().max(1.0) as u32;
        let out_w = bound(w * cos.abs() + h * sin.abs());
        let out_h = bound(w * sin.abs() + h * cos.abs());

        let mut out = Surface::new(out_w, out_h);
        out.fill(Color::TRANSPARENT);

        let (half_out_w, half_out_h) = (out_w as f32 / 2.0, out_h as f32 / 2.0);
        for y in 0..out_h {
            for x in 0..out_w {
                let dx = x as f32 + 0.5 - half_out_w;
                let dy = y as f32 + 0.5 - half_out_h;
                // Inverse of a counter-clockwise turn on a y-down screen
                let sx = dx * cos - dy * sin + w / 2.0;
                let sy = dx * sin + dy * cos + h / 2.0;
                if let Some(color) = self.pixels.pixel(sx.floor() as i32, sy.floor() as i32) {
                    out.set_pixel(x as i32, y as i32, color);
                }
            }
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const RED: Color = Color::rgb(255, 0, 0);
    const BLUE: Color = Color::rgb(0, 0, 255);

    fn two_pixel_image() -> Image {
        let mut pixels = Surface::new(2, 1);
        pixels.set_pixel(0, 0, RED);
        pixels.set_pixel(1, 0, BLUE);
        Image::from_surface(ImageInfo::new("two.png", (2.0, 1.0)), pixels)
    }

    #[test]
    fn test_info_size() {
        let mut image = two_pixel_image();
        assert_eq!(image.size(), Vec2::new(2.0, 1.0));
        image.set_size((40.0, 20.0));
        assert_eq!(image.info().size(), Vec2::new(40.0, 20.0));
        assert_eq!(image.dimensions(), (2, 1));
    }

    #[test]
    fn test_rotate_zero_is_identity() {
        let image = two_pixel_image();
        assert_eq!(image.rotated(0.0), *image.pixels());
        assert_eq!(image.rotated(360.0), *image.pixels());
    }

    #[test]
    fn test_rotate_quarter_turn_counter_clockwise() {
        let rotated = two_pixel_image().rotated(90.0);
        assert_eq!(rotated.size(), (1, 2));
        // The right end swings up
        assert_eq!(rotated.pixel(0, 0), Some(BLUE));
        assert_eq!(rotated.pixel(0, 1), Some(RED));
    }

    #[test]
    fn test_rotate_half_turn() {
        let rotated = two_pixel_image().rotated(180.0);
        assert_eq!(rotated.size(), (2, 1));
        assert_eq!(rotated.pixel(0, 0), Some(BLUE));
        assert_eq!(rotated.pixel(1, 0), Some(RED));
    }

    #[test]
    fn test_load_missing_file_fails() {
        let info = ImageInfo::new("definitely/not/here.png", (1.0, 1.0));
        assert!(matches!(
            Image::load(info),
            Err(crate::error::Error::Image(_))
        ));
    }
}

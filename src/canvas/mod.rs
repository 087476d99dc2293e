//! Canvas
//!
//! An off-screen drawing surface with a background color and the drawing
//! primitives. Positions are truncated to whole pixels; colors are
//! resolved through the frame's palette.

pub mod align;
pub mod image;
pub(crate) mod raster;
pub mod surface;

pub use align::{Align, HAlign, IntoAlign, VAlign};
pub use self::image::{Image, ImageInfo};
pub use surface::Surface;

use crate::color::{Color, ColorRef};
use crate::error::Result;
use crate::resources::Resources;
use glam::Vec2;
use std::rc::Rc;

/// Default font height for labels and text without an explicit size.
pub const DEFAULT_FONT_HEIGHT: u32 = 16;

fn whole(v: Vec2) -> Vec2 {
    v.trunc()
}

fn whole_points(points: &[Vec2]) -> Vec<Vec2> {
    points.iter().copied().map(whole).collect()
}

/// A drawing surface with the drawing primitives.
pub struct Canvas {
    surface: Surface,
    background: Color,
    default_font_height: u32,
    resources: Rc<Resources>,
}

impl Canvas {
    /// Create a canvas filled with its background color.
    pub fn new<'a>(
        width: u32,
        height: u32,
        background: impl Into<ColorRef<'a>>,
        resources: Rc<Resources>,
    ) -> Result<Self> {
        let background = resources.color(background)?;
        let mut surface = Surface::new(width, height);
        surface.fill(background);
        Ok(Self {
            surface,
            background,
            default_font_height: DEFAULT_FONT_HEIGHT,
            resources,
        })
    }

    pub fn width(&self) -> u32 {
        self.surface.width()
    }

    pub fn height(&self) -> u32 {
        self.surface.height()
    }

    pub fn size(&self) -> (u32, u32) {
        self.surface.size()
    }

    pub fn surface(&self) -> &Surface {
        &self.surface
    }

    pub fn resources(&self) -> &Rc<Resources> {
        &self.resources
    }

    pub fn default_font_height(&self) -> u32 {
        self.default_font_height
    }

    pub fn background_color(&self) -> Color {
        self.background
    }

    pub fn set_background_color<'a>(&mut self, color: impl Into<ColorRef<'a>>) -> Result<()> {
        self.background = self.resources.color(color)?;
        Ok(())
    }

    /// Clear the surface to the background color.
    pub fn draw_background(&mut self) {
        self.surface.fill(self.background);
    }

    fn fill_color(&self, fill_color: Option<ColorRef<'_>>) -> Result<Option<Color>> {
        fill_color.map(|c| self.resources.color(c)).transpose()
    }

    /// Draw a rectangle with its top-left corner at `pos`.
    ///
    /// The border is `line_width` pixels thick inside the rectangle; a
    /// width of 0 fills the rectangle with the line color.
    pub fn draw_rect<'a>(
        &mut self,
        pos: impl Into<Vec2>,
        size: impl Into<Vec2>,
        line_width: u32,
        line_color: impl Into<ColorRef<'a>>,
        fill_color: Option<ColorRef<'_>>,
    ) -> Result<()> {
        let pos = whole(pos.into()).as_ivec2();
        let size = whole(size.into()).as_ivec2();
        let line_color = self.resources.color(line_color)?;
        if let Some(fill) = self.fill_color(fill_color)? {
            raster::rect(&mut self.surface, pos.x, pos.y, size.x, size.y, 0, fill);
        }
        raster::rect(&mut self.surface, pos.x, pos.y, size.x, size.y, line_width, line_color);
        Ok(())
    }

    /// Draw a closed polygon through `points`.
    pub fn draw_polygon<'a>(
        &mut self,
        points: &[Vec2],
        line_width: u32,
        line_color: impl Into<ColorRef<'a>>,
        fill_color: Option<ColorRef<'_>>,
    ) -> Result<()> {
        let points = whole_points(points);
        let line_color = self.resources.color(line_color)?;
        if let Some(fill) = self.fill_color(fill_color)? {
            raster::fill_polygon(&mut self.surface, &points, fill);
        }
        if line_width == 0 {
            raster::fill_polygon(&mut self.surface, &points, line_color);
        } else {
            raster::polyline(&mut self.surface, &points, true, line_width, line_color);
        }
        Ok(())
    }

    /// Draw a circle around `center`.
    pub fn draw_circle<'a>(
        &mut self,
        center: impl Into<Vec2>,
        radius: f32,
        line_width: u32,
        line_color: impl Into<ColorRef<'a>>,
        fill_color: Option<ColorRef<'_>>,
    ) -> Result<()> {
        let center = whole(center.into()).as_ivec2();
        let radius = radius.trunc() as i32;
        let line_color = self.resources.color(line_color)?;
        if let Some(fill) = self.fill_color(fill_color)? {
            raster::circle(&mut self.surface, center, radius, 0, fill);
        }
        raster::circle(&mut self.surface, center, radius, line_width, line_color);
        Ok(())
    }

    /// Draw an ellipse inscribed in the rectangle at `pos` of `size`.
    pub fn draw_ellipse<'a>(
        &mut self,
        pos: impl Into<Vec2>,
        size: impl Into<Vec2>,
        line_width: u32,
        line_color: impl Into<ColorRef<'a>>,
        fill_color: Option<ColorRef<'_>>,
    ) -> Result<()> {
        let pos = whole(pos.into()).as_ivec2();
        let size = whole(size.into()).as_ivec2();
        let line_color = self.resources.color(line_color)?;
        if let Some(fill) = self.fill_color(fill_color)? {
            raster::ellipse(&mut self.surface, pos.x, pos.y, size.x, size.y, 0, fill);
        }
        raster::ellipse(&mut self.surface, pos.x, pos.y, size.x, size.y, line_width, line_color);
        Ok(())
    }

    /// Draw part of an ellipse outline inscribed in the rectangle.
    ///
    /// Angles are in radians, counter-clockwise from 3 o'clock.
    pub fn draw_arc<'a>(
        &mut self,
        pos: impl Into<Vec2>,
        size: impl Into<Vec2>,
        start_angle: f32,
        stop_angle: f32,
        width: u32,
        color: impl Into<ColorRef<'a>>,
    ) -> Result<()> {
        let pos = whole(pos.into()).as_ivec2();
        let size = whole(size.into()).as_ivec2();
        let color = self.resources.color(color)?;
        raster::arc(
            &mut self.surface,
            pos.x,
            pos.y,
            size.x,
            size.y,
            start_angle,
            stop_angle,
            width,
            color,
        );
        Ok(())
    }

    /// Draw a straight line segment.
    pub fn draw_line<'a>(
        &mut self,
        start: impl Into<Vec2>,
        end: impl Into<Vec2>,
        width: u32,
        color: impl Into<ColorRef<'a>>,
    ) -> Result<()> {
        let color = self.resources.color(color)?;
        raster::thick_line(
            &mut self.surface,
            whole(start.into()),
            whole(end.into()),
            width,
            color,
        );
        Ok(())
    }

    /// Draw connected line segments through `points`.
    pub fn draw_lines<'a>(
        &mut self,
        closed: bool,
        points: &[Vec2],
        width: u32,
        color: impl Into<ColorRef<'a>>,
    ) -> Result<()> {
        let color = self.resources.color(color)?;
        raster::polyline(&mut self.surface, &whole_points(points), closed, width, color);
        Ok(())
    }

    /// Draw an anti-aliased line segment.
    pub fn draw_aaline<'a>(
        &mut self,
        start: impl Into<Vec2>,
        end: impl Into<Vec2>,
        blend: bool,
        color: impl Into<ColorRef<'a>>,
    ) -> Result<()> {
        let color = self.resources.color(color)?;
        raster::aaline(
            &mut self.surface,
            whole(start.into()),
            whole(end.into()),
            color,
            blend,
        );
        Ok(())
    }

    /// Draw connected anti-aliased segments through `points`.
    pub fn draw_aalines<'a>(
        &mut self,
        closed: bool,
        points: &[Vec2],
        blend: bool,
        color: impl Into<ColorRef<'a>>,
    ) -> Result<()> {
        let color = self.resources.color(color)?;
        raster::aalines(&mut self.surface, &whole_points(points), closed, color, blend);
        Ok(())
    }

    /// Draw `text` anchored at `pos`.
    ///
    /// `align` is an [`Align`] or a `(horizontal, vertical)` name pair;
    /// `face` is `"serif"` or `"sans-serif"`.
    pub fn draw_text<'a>(
        &mut self,
        text: &str,
        pos: impl Into<Vec2>,
        font_size: u32,
        font_color: impl Into<ColorRef<'a>>,
        face: &str,
        align: impl IntoAlign,
    ) -> Result<()> {
        let pos = whole(pos.into());
        let color = self.resources.color(font_color)?;
        let align = align.into_align()?;

        let mut fonts = self.resources.fonts();
        let font = fonts.get(face, font_size)?;
        let (width, height) = fonts.measure(&font, text);
        let origin = whole(align.origin(pos, Vec2::new(width, height))).as_ivec2();

        let surface = &mut self.surface;
        fonts.rasterize(&font, text, color, |x, y, w, h, coverage| {
            surface.fill_rect(origin.x + x, origin.y + y, w as i32, h as i32, coverage);
        });
        Ok(())
    }

    /// Size `text` would occupy, as `(width, height)`.
    pub fn measure_text(&self, text: &str, font_size: u32, face: &str) -> Result<Vec2> {
        let mut fonts = self.resources.fonts();
        let font = fonts.get(face, font_size)?;
        let (w, h) = fonts.measure(&font, text);
        Ok(Vec2::new(w, h))
    }

    /// Draw an image with its top-left corner at `pos`, rotated
    /// counter-clockwise by `angle` degrees.
    pub fn draw_image(&mut self, image: &Image, pos: impl Into<Vec2>, angle: f32) {
        let pos = whole(pos.into()).as_ivec2();
        let rotated = image.rotated(angle);
        self.surface.blit(&rotated, pos.x, pos.y);
    }
}

impl std::fmt::Debug for Canvas {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Canvas")
            .field("size", &self.size())
            .field("background", &self.background)
            .finish()
    }
}

//! Scanline rasterization of the canvas primitives
//!
//! Integer coordinates address pixel centers. Filled shapes cover every
//! pixel whose center lies inside the shape.

use super::surface::Surface;
use crate::color::Color;
use glam::{IVec2, Vec2};
use std::f32::consts::TAU;
use std::ops::Range;

/// The part of `start..start + len` that lies inside `0..limit`.
fn clip(start: i32, len: i32, limit: u32) -> Range<i32> {
    clip_range(i64::from(start), i64::from(start) + i64::from(len), limit)
}

fn clip_range(start: i64, end: i64, limit: u32) -> Range<i32> {
    let lo = start.max(0).min(i64::from(limit));
    let hi = end.min(i64::from(limit)).max(lo);
    // Both bounds now fit in 0..=limit
    lo as i32..hi as i32
}

/// Rectangle with a border `width` pixels thick drawn inside its bounds.
/// A width of 0 (or one that meets in the middle) fills it.
pub(crate) fn rect(s: &mut Surface, x: i32, y: i32, w: i32, h: i32, width: u32, color: Color) {
    if w <= 0 || h <= 0 {
        return;
    }
    let t = i32::try_from(width).unwrap_or(i32::MAX);
    if t == 0 || t.saturating_mul(2) >= w || t.saturating_mul(2) >= h {
        s.fill_rect(x, y, w, h, color);
        return;
    }
    let (right, bottom) = (x.saturating_add(w - t), y.saturating_add(h - t));
    s.fill_rect(x, y, w, t, color);
    s.fill_rect(x, bottom, w, t, color);
    s.fill_rect(x, y.saturating_add(t), t, h - 2 * t, color);
    s.fill_rect(right, y.saturating_add(t), t, h - 2 * t, color);
}

/// Even-odd scanline fill.
pub(crate) fn fill_polygon(s: &mut Surface, points: &[Vec2], color: Color) {
    if points.len() < 3 {
        return;
    }
    let (min_y, max_y) = points
        .iter()
        .fold((f32::MAX, f32::MIN), |(lo, hi), p| (lo.min(p.y), hi.max(p.y)));
    let y0 = ((min_y - 0.5).ceil() as i32).max(0);
    let y1 = ((max_y - 0.5).ceil() as i32 - 1).min(s.height() as i32 - 1);

    let mut crossings = Vec::new();
    for y in y0..=y1 {
        let yc = y as f32 + 0.5;
        crossings.clear();
        for (i, a) in points.iter().enumerate() {
            let b = points[(i + 1) % points.len()];
            if (a.y <= yc && b.y > yc) || (b.y <= yc && a.y > yc) {
                crossings.push(a.x + (yc - a.y) / (b.y - a.y) * (b.x - a.x));
            }
        }
        crossings.sort_by(f32::total_cmp);
        for pair in crossings.chunks_exact(2) {
            let start = (pair[0] - 0.5).ceil() as i32;
            let end = (pair[1] - 0.5).ceil() as i32 - 1;
            s.hspan(start, end, y, color);
        }
    }
}

/// One-pixel Bresenham line, both endpoints included.
pub(crate) fn line(s: &mut Surface, a: IVec2, b: IVec2, color: Color) {
    let (mut x, mut y) = (a.x, a.y);
    let dx = (b.x - a.x).abs();
    let dy = -(b.y - a.y).abs();
    let sx = if a.x < b.x { 1 } else { -1 };
    let sy = if a.y < b.y { 1 } else { -1 };
    let mut err = dx + dy;

    loop {
        s.blend_pixel(x, y, color);
        if x == b.x && y == b.y {
            break;
        }
        let e2 = 2 * err;
        if e2 >= dy {
            err += dy;
            x += sx;
        }
        if e2 <= dx {
            err += dx;
            y += sy;
        }
    }
}

/// Line of arbitrary width. Width 0 draws nothing.
pub(crate) fn thick_line(s: &mut Surface, a: Vec2, b: Vec2, width: u32, color: Color) {
    match width {
        0 => {}
        1 => line(s, a.as_ivec2(), b.as_ivec2(), color),
        _ => {
            let half = width as f32 / 2.0;
            let center = Vec2::splat(0.5);
            let dir = b - a;
            if dir.length_squared() == 0.0 {
                let corner = (a + center - Vec2::splat(half)).round().as_ivec2();
                s.fill_rect(corner.x, corner.y, width as i32, width as i32, color);
                return;
            }
            let normal = dir.perp().normalize() * half;
            let quad = [
                a + center + normal,
                b + center + normal,
                b + center - normal,
                a + center - normal,
            ];
            fill_polygon(s, &quad, color);
        }
    }
}

/// Connected line segments, optionally closing back to the first point.
pub(crate) fn polyline(s: &mut Surface, points: &[Vec2], closed: bool, width: u32, color: Color) {
    for pair in points.windows(2) {
        thick_line(s, pair[0], pair[1], width, color);
    }
    if closed && points.len() > 2 {
        thick_line(s, points[points.len() - 1], points[0], width, color);
    }
}

fn isqrt(n: i64) -> i32 {
    (n.max(0) as f64).sqrt().floor() as i32
}

/// Circle around `center`. Width 0 fills it, otherwise a ring of `width`
/// pixels is drawn inside the radius.
pub(crate) fn circle(s: &mut Surface, center: IVec2, radius: i32, width: u32, color: Color) {
    if radius < 1 {
        return;
    }
    let inner = (width > 0 && (width as i32) < radius).then(|| radius - width as i32);
    let (r, cy) = (i64::from(radius), i64::from(center.y));
    let cx = center.x;

    for y in clip_range(cy - r, cy + r + 1, s.height()) {
        let dy = i64::from(y) - cy;
        let xo = isqrt(r * r - dy * dy);
        match inner {
            Some(ri) if dy.abs() <= i64::from(ri) => {
                let xi = isqrt(i64::from(ri) * i64::from(ri) - dy * dy);
                let (l0, l1) = (cx.saturating_sub(xo), cx.saturating_sub(xi).saturating_sub(1));
                let (r0, r1) = (cx.saturating_add(xi).saturating_add(1), cx.saturating_add(xo));
                s.hspan(l0, l1, y, color);
                s.hspan(r0, r1, y, color);
            }
            _ => s.hspan(cx.saturating_sub(xo), cx.saturating_add(xo), y, color),
        }
    }
}

fn ellipse_half_width(a: f32, b: f32, dy: f32) -> Option<f32> {
    if a <= 0.0 || b <= 0.0 {
        return None;
    }
    let t = dy / b;
    (t.abs() <= 1.0).then(|| a * (1.0 - t * t).sqrt())
}

fn center_span(lo: f32, hi: f32) -> (i32, i32) {
    ((lo - 0.5).ceil() as i32, (hi - 0.5).floor() as i32)
}

/// Ellipse inscribed in the rectangle. Width 0 fills it.
pub(crate) fn ellipse(s: &mut Surface, x: i32, y: i32, w: i32, h: i32, width: u32, color: Color) {
    if w <= 0 || h <= 0 {
        return;
    }
    let (a, b) = (w as f32 / 2.0, h as f32 / 2.0);
    let (cx, cy) = (x as f32 + a, y as f32 + b);
    let t = width as f32;
    let hollow = width > 0 && t < a && t < b;

    for py in clip(y, h, s.height()) {
        let dy = py as f32 + 0.5 - cy;
        let Some(outer) = ellipse_half_width(a, b, dy) else {
            continue;
        };
        let (l0, r0) = center_span(cx - outer, cx + outer);
        let inner = hollow
            .then(|| ellipse_half_width(a - t, b - t, dy))
            .flatten()
            .map(|inner| center_span(cx - inner, cx + inner))
            .filter(|(l1, r1)| l1 <= r1);
        match inner {
            Some((l1, r1)) => {
                s.hspan(l0, l1 - 1, py, color);
                s.hspan(r1 + 1, r0, py, color);
            }
            None => s.hspan(l0, r0, py, color),
        }
    }
}

/// Part of an elliptical ring inscribed in the rectangle.
///
/// Angles are in radians, counter-clockwise from the positive x axis as
/// seen on screen. A stop angle below the start wraps around.
#[allow(clippy::too_many_arguments)]
pub(crate) fn arc(
    s: &mut Surface,
    x: i32,
    y: i32,
    w: i32,
    h: i32,
    start: f32,
    stop: f32,
    width: u32,
    color: Color,
) {
    if w <= 0 || h <= 0 || width == 0 {
        return;
    }
    let (a, b) = (w as f32 / 2.0, h as f32 / 2.0);
    let (cx, cy) = (x as f32 + a, y as f32 + b);
    let (ia, ib) = (a - width as f32, b - width as f32);

    let start = start.rem_euclid(TAU);
    let mut sweep = stop - start;
    if sweep < 0.0 {
        sweep = sweep.rem_euclid(TAU);
    }
    let full = sweep >= TAU;

    let columns = clip(x, w, s.width());
    for py in clip(y, h, s.height()) {
        for px in columns.clone() {
            let (ox, oy) = (px as f32 + 0.5 - cx, py as f32 + 0.5 - cy);
            let (nx, ny) = (ox / a, oy / b);
            if nx * nx + ny * ny > 1.0 {
                continue;
            }
            if ia > 0.0 && ib > 0.0 {
                let (ix, iy) = (ox / ia, oy / ib);
                if ix * ix + iy * iy < 1.0 {
                    continue;
                }
            }
            if !full {
                let theta = (-ny).atan2(nx).rem_euclid(TAU);
                if (theta - start).rem_euclid(TAU) > sweep {
                    continue;
                }
            }
            s.blend_pixel(px, py, color);
        }
    }
}

fn plot_coverage(s: &mut Surface, x: i32, y: i32, color: Color, coverage: f32, blend: bool) {
    if coverage <= 0.0 {
        return;
    }
    if blend {
        s.blend_pixel(x, y, color.with_coverage(coverage));
    } else {
        let scale = |c: u8| (c as f32 * coverage.min(1.0)).round() as u8;
        s.set_pixel(
            x,
            y,
            Color::rgba(scale(color.r), scale(color.g), scale(color.b), color.a),
        );
    }
}

fn fract(v: f32) -> f32 {
    v - v.floor()
}

/// Anti-aliased one-pixel line (Xiaolin Wu).
///
/// With `blend` the coverage is composited over the existing pixels,
/// otherwise the color scaled by coverage overwrites them.
pub(crate) fn aaline(s: &mut Surface, a: Vec2, b: Vec2, color: Color, blend: bool) {
    let (mut x0, mut y0, mut x1, mut y1) = (a.x, a.y, b.x, b.y);
    let steep = (y1 - y0).abs() > (x1 - x0).abs();
    if steep {
        std::mem::swap(&mut x0, &mut y0);
        std::mem::swap(&mut x1, &mut y1);
    }
    if x0 > x1 {
        std::mem::swap(&mut x0, &mut x1);
        std::mem::swap(&mut y0, &mut y1);
    }

    let mut plot = |x: i32, y: i32, coverage: f32| {
        if steep {
            plot_coverage(s, y, x, color, coverage, blend);
        } else {
            plot_coverage(s, x, y, color, coverage, blend);
        }
    };

    let dx = x1 - x0;
    let gradient = if dx == 0.0 { 1.0 } else { (y1 - y0) / dx };

    let xend = x0.round();
    let yend = y0 + gradient * (xend - x0);
    let xgap = 1.0 - fract(x0 + 0.5);
    let xpxl1 = xend as i32;
    plot(xpxl1, yend.floor() as i32, (1.0 - fract(yend)) * xgap);
    plot(xpxl1, yend.floor() as i32 + 1, fract(yend) * xgap);
    let mut intery = yend + gradient;

    let xend = x1.round();
    let yend = y1 + gradient * (xend - x1);
    let xgap = fract(x1 + 0.5);
    let xpxl2 = xend as i32;
    if xpxl2 != xpxl1 {
        plot(xpxl2, yend.floor() as i32, (1.0 - fract(yend)) * xgap);
        plot(xpxl2, yend.floor() as i32 + 1, fract(yend) * xgap);
    }

    for x in xpxl1 + 1..xpxl2 {
        plot(x, intery.floor() as i32, 1.0 - fract(intery));
        plot(x, intery.floor() as i32 + 1, fract(intery));
        intery += gradient;
    }
}

/// Connected anti-aliased segments.
pub(crate) fn aalines(s: &mut Surface, points: &[Vec2], closed: bool, color: Color, blend: bool) {
    for pair in points.windows(2) {
        aaline(s, pair[0], pair[1], color, blend);
    }
    if closed && points.len() > 2 {
        aaline(s, points[points.len() - 1], points[0], color, blend);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const W: Color = Color::WHITE;

    fn count(s: &Surface, color: Color) -> usize {
        (0..s.height() as i32)
            .flat_map(|y| (0..s.width() as i32).map(move |x| (x, y)))
            .filter(|&(x, y)| s.pixel(x, y) == Some(color))
            .count()
    }

    #[test]
    fn test_rect_border_and_fill() {
        let mut s = Surface::new(10, 10);
        rect(&mut s, 0, 0, 10, 10, 1, W);
        assert_eq!(count(&s, W), 36);
        assert_eq!(s.pixel(5, 5), Some(Color::BLACK));

        let mut s = Surface::new(10, 10);
        rect(&mut s, 2, 2, 4, 3, 0, W);
        assert_eq!(count(&s, W), 12);
    }

    #[test]
    fn test_polygon_square_covers_pixel_centers() {
        let mut s = Surface::new(8, 8);
        let square = [
            Vec2::new(0.0, 0.0),
            Vec2::new(4.0, 0.0),
            Vec2::new(4.0, 4.0),
            Vec2::new(0.0, 4.0),
        ];
        fill_polygon(&mut s, &square, W);
        assert_eq!(count(&s, W), 16);
        assert_eq!(s.pixel(3, 3), Some(W));
        assert_eq!(s.pixel(4, 3), Some(Color::BLACK));
    }

    #[test]
    fn test_line_endpoints_and_length() {
        let mut s = Surface::new(10, 10);
        line(&mut s, IVec2::new(1, 1), IVec2::new(8, 1), W);
        assert_eq!(count(&s, W), 8);

        let mut s = Surface::new(10, 10);
        line(&mut s, IVec2::new(0, 0), IVec2::new(5, 5), W);
        assert_eq!(count(&s, W), 6);
        assert_eq!(s.pixel(5, 5), Some(W));
    }

    #[test]
    fn test_thick_horizontal_line() {
        let mut s = Surface::new(20, 20);
        thick_line(&mut s, Vec2::new(0.0, 5.0), Vec2::new(10.0, 5.0), 3, W);
        for y in 4..=6 {
            assert_eq!(s.pixel(5, y), Some(W), "row {y}");
        }
        assert_eq!(s.pixel(5, 3), Some(Color::BLACK));
        assert_eq!(s.pixel(5, 7), Some(Color::BLACK));
    }

    #[test]
    fn test_circle_fill_and_ring() {
        let mut s = Surface::new(21, 21);
        circle(&mut s, IVec2::new(10, 10), 5, 0, W);
        assert_eq!(s.pixel(10, 10), Some(W));
        assert_eq!(s.pixel(15, 10), Some(W));
        assert_eq!(s.pixel(16, 10), Some(Color::BLACK));
        assert_eq!(s.pixel(14, 14), Some(Color::BLACK));

        let mut s = Surface::new(21, 21);
        circle(&mut s, IVec2::new(10, 10), 5, 1, W);
        assert_eq!(s.pixel(10, 10), Some(Color::BLACK));
        assert_eq!(s.pixel(15, 10), Some(W));
        assert_eq!(s.pixel(10, 5), Some(W));
    }

    #[test]
    fn test_ellipse_inscribed() {
        let mut s = Surface::new(20, 20);
        ellipse(&mut s, 0, 0, 10, 6, 0, W);
        assert_eq!(s.pixel(5, 3), Some(W));
        assert_eq!(s.pixel(0, 0), Some(Color::BLACK));
        assert_eq!(s.pixel(9, 5), Some(Color::BLACK));
        assert_eq!(s.pixel(10, 3), Some(Color::BLACK));

        let mut s = Surface::new(20, 20);
        ellipse(&mut s, 0, 0, 10, 10, 2, W);
        assert_eq!(s.pixel(5, 5), Some(Color::BLACK));
        assert_eq!(s.pixel(0, 5), Some(W));
    }

    #[test]
    fn test_arc_quadrant() {
        // Upper-right quarter of a ring
        let mut s = Surface::new(20, 20);
        arc(&mut s, 0, 0, 20, 20, 0.0, std::f32::consts::FRAC_PI_2, 2, W);
        assert_eq!(s.pixel(18, 5), Some(W));
        assert_eq!(s.pixel(1, 5), Some(Color::BLACK));
        assert_eq!(s.pixel(18, 14), Some(Color::BLACK));
        assert_eq!(s.pixel(10, 10), Some(Color::BLACK));
    }

    #[test]
    fn test_clip_ranges() {
        assert_eq!(clip(-5, 10, 8), 0..5);
        assert_eq!(clip(3, 100, 8), 3..8);
        assert_eq!(clip(20, 5, 8), 8..8);
        assert_eq!(clip(i32::MAX - 1, i32::MAX, 8), 8..8);
        assert!(clip(-20, 5, 8).is_empty());
        assert_eq!(clip_range(-(1 << 40), 1 << 40, 8), 0..8);
    }

    #[test]
    fn test_huge_rect_is_clipped() {
        let mut s = Surface::new(8, 8);
        rect(&mut s, -1_000_000, -1_000_000, i32::MAX, i32::MAX, u32::MAX, W);
        assert_eq!(count(&s, W), 64);
    }

    #[test]
    fn test_huge_circle_covers_surface() {
        let mut s = Surface::new(8, 8);
        circle(&mut s, IVec2::new(4, 4), 50_000, 0, W);
        assert_eq!(count(&s, W), 64);

        // The ring of a huge circle lies far outside the surface
        let mut s = Surface::new(8, 8);
        circle(&mut s, IVec2::new(4, 4), i32::MAX, 3, W);
        assert_eq!(count(&s, W), 0);
    }

    #[test]
    fn test_off_surface_shapes_draw_nothing() {
        let mut s = Surface::new(8, 8);
        arc(&mut s, 100_000, 100_000, 1_000_000, 1_000_000, 0.0, TAU, 5, W);
        ellipse(&mut s, -2_000_000, -2_000_000, 1_000_000, 1_000_000, 0, W);
        circle(&mut s, IVec2::new(-1_000_000, 4), 100, 0, W);
        assert_eq!(count(&s, Color::BLACK), 64);
    }

    #[test]
    fn test_large_arc_is_clipped() {
        // Only the visible corner of a huge ring is visited
        let mut s = Surface::new(10, 10);
        arc(&mut s, 0, 0, 2_000_000, 2_000_000, 0.0, TAU, 10, W);
        assert_eq!(s.pixel(0, 0), Some(Color::BLACK));
        assert_eq!(s.pixel(9, 9), Some(Color::BLACK));
    }

    #[test]
    fn test_aaline_horizontal_blend() {
        let mut s = Surface::new(10, 5);
        aaline(&mut s, Vec2::new(1.0, 2.0), Vec2::new(8.0, 2.0), W, true);
        assert_eq!(s.pixel(4, 2), Some(W));
        assert_eq!(s.pixel(4, 3), Some(Color::BLACK));
        assert_eq!(s.pixel(4, 1), Some(Color::BLACK));
    }

    #[test]
    fn test_aaline_diagonal_is_partial() {
        let mut s = Surface::new(10, 10);
        aaline(&mut s, Vec2::new(0.0, 0.0), Vec2::new(9.0, 4.5), W, true);
        let lit = (0..10)
            .flat_map(|y| (0..10).map(move |x| (x, y)))
            .filter(|&(x, y)| s.pixel(x, y) != Some(Color::BLACK))
            .count();
        assert!(lit > 10, "expected both rows of coverage, got {lit}");
        assert!(count(&s, W) < lit);
    }
}

//! RGBA8 software raster implementing [`Surface`].
//!
//! Used by the native front-end (one per quadrant, composited and uploaded to
//! the GPU) and by tests that compare actual pixels. Fills sample at pixel
//! centres and blend source-over with the global alpha; there is no
//! anti-aliasing.

use crate::color::Rgba;
use crate::surface::{ensure_finite, ensure_finite_points, Surface, SurfaceError};
use glam::Vec2;

pub struct PixelSurface {
    width: u32,
    height: u32,
    alpha: f32,
    pixels: Vec<[u8; 4]>,
}

impl PixelSurface {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            alpha: 1.0,
            pixels: vec![[0; 4]; (width as usize) * (height as usize)],
        }
    }

    /// Reallocate to a new size. Contents are cleared.
    pub fn resize(&mut self, width: u32, height: u32) {
        self.width = width;
        self.height = height;
        self.pixels.clear();
        self.pixels
            .resize((width as usize) * (height as usize), [0; 4]);
    }

    #[inline]
    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    #[inline]
    pub fn pixels(&self) -> &[[u8; 4]] {
        &self.pixels
    }

    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.pixels)
    }

    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        (x < self.width && y < self.height)
            .then(|| self.pixels[(y as usize) * (self.width as usize) + x as usize])
    }

    pub fn row(&self, y: u32) -> &[[u8; 4]] {
        let w = self.width as usize;
        let start = (y as usize) * w;
        &self.pixels[start..start + w]
    }

    #[inline]
    fn blend(&mut self, x: i32, y: i32, src: [f32; 4]) {
        if x < 0 || y < 0 || x >= self.width as i32 || y >= self.height as i32 {
            return;
        }
        let idx = (y as usize) * (self.width as usize) + x as usize;
        let dst = &mut self.pixels[idx];
        let a = src[3];
        let inv = 1.0 - a;
        for c in 0..3 {
            let d = dst[c] as f32 / 255.0;
            dst[c] = ((src[c] * a + d * inv).clamp(0.0, 1.0) * 255.0 + 0.5) as u8;
        }
        let da = dst[3] as f32 / 255.0;
        dst[3] = ((a + da * inv).clamp(0.0, 1.0) * 255.0 + 0.5) as u8;
    }

    #[inline]
    fn source(&self, color: Rgba) -> Option<[f32; 4]> {
        let a = (color.a * self.alpha).clamp(0.0, 1.0);
        (a > 0.0).then_some([color.r, color.g, color.b, a])
    }

    fn span(&mut self, y: i32, x0: f32, x1: f32, src: [f32; 4]) {
        // pixel i is covered when its centre i + 0.5 lies in [x0, x1)
        let start = (x0 - 0.5).ceil().max(0.0) as i32;
        let end = ((x1 - 0.5).ceil() as i32).min(self.width as i32);
        for x in start..end {
            self.blend(x, y, src);
        }
    }

    fn row_range(&self, top: f32, bottom: f32) -> std::ops::Range<i32> {
        let start = (top - 0.5).ceil().max(0.0) as i32;
        let end = ((bottom - 0.5).ceil() as i32).min(self.height as i32);
        start..end.max(start)
    }
}

impl Surface for PixelSurface {
    fn width(&self) -> f32 {
        self.width as f32
    }

    fn height(&self) -> f32 {
        self.height as f32
    }

    fn clear(&mut self) -> Result<(), SurfaceError> {
        self.pixels.fill([0; 4]);
        Ok(())
    }

    fn alpha(&self) -> f32 {
        self.alpha
    }

    fn set_alpha(&mut self, alpha: f32) {
        self.alpha = alpha.clamp(0.0, 1.0);
    }

    fn fill_rect(&mut self, origin: Vec2, size: Vec2, color: Rgba) -> Result<(), SurfaceError> {
        ensure_finite_points("fill_rect", &[origin, size])?;
        let Some(src) = self.source(color) else {
            return Ok(());
        };
        let min = origin.min(origin + size);
        let max = origin.max(origin + size);
        for y in self.row_range(min.y, max.y) {
            self.span(y, min.x, max.x, src);
        }
        Ok(())
    }

    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Rgba) -> Result<(), SurfaceError> {
        ensure_finite("fill_circle", &[center.x, center.y, radius])?;
        self.fill_ellipse(center, Vec2::splat(radius), color)
    }

    fn fill_ellipse(&mut self, center: Vec2, radii: Vec2, color: Rgba) -> Result<(), SurfaceError> {
        ensure_finite_points("fill_ellipse", &[center, radii])?;
        let radii = radii.abs();
        if radii.x <= 0.0 || radii.y <= 0.0 {
            return Ok(());
        }
        let Some(src) = self.source(color) else {
            return Ok(());
        };
        for y in self.row_range(center.y - radii.y, center.y + radii.y) {
            let dy = (y as f32 + 0.5 - center.y) / radii.y;
            let k = 1.0 - dy * dy;
            if k <= 0.0 {
                continue;
            }
            let half = radii.x * k.sqrt();
            self.span(y, center.x - half, center.x + half, src);
        }
        Ok(())
    }

    fn fill_polygon(&mut self, points: &[Vec2], color: Rgba) -> Result<(), SurfaceError> {
        ensure_finite_points("fill_polygon", points)?;
        if points.len() < 3 {
            return Ok(());
        }
        let Some(src) = self.source(color) else {
            return Ok(());
        };
        let (top, bottom) = points
            .iter()
            .fold((f32::MAX, f32::MIN), |(lo, hi), p| (lo.min(p.y), hi.max(p.y)));
        // even-odd scanline fill
        let mut crossings: Vec<f32> = Vec::with_capacity(8);
        for y in self.row_range(top, bottom) {
            let sy = y as f32 + 0.5;
            crossings.clear();
            for i in 0..points.len() {
                let a = points[i];
                let b = points[(i + 1) % points.len()];
                if (a.y <= sy && b.y > sy) || (b.y <= sy && a.y > sy) {
                    let t = (sy - a.y) / (b.y - a.y);
                    crossings.push(a.x + t * (b.x - a.x));
                }
            }
            crossings.sort_by(|a, b| a.total_cmp(b));
            for pair in crossings.chunks_exact(2) {
                self.span(y, pair[0], pair[1], src);
            }
        }
        Ok(())
    }

    fn stroke_polyline(
        &mut self,
        points: &[Vec2],
        width: f32,
        color: Rgba,
    ) -> Result<(), SurfaceError> {
        ensure_finite_points("stroke_polyline", points)?;
        let half = (width * 0.5).max(0.5);
        // Segments are drawn as quads with round caps. Overlaps double-blend
        // for translucent colours, which is acceptable at these stroke widths.
        for seg in points.windows(2) {
            let (a, b) = (seg[0], seg[1]);
            let dir = b - a;
            let len = dir.length();
            if len > f32::EPSILON {
                let n = Vec2::new(-dir.y, dir.x) / len * half;
                self.fill_polygon(&[a + n, b + n, b - n, a - n], color)?;
            }
        }
        if width >= 2.0 {
            for p in points {
                self.fill_circle(*p, half, color)?;
            }
        }
        Ok(())
    }

    fn fill_text(
        &mut self,
        text: &str,
        center: Vec2,
        size: f32,
        color: Rgba,
    ) -> Result<(), SurfaceError> {
        ensure_finite("fill_text", &[center.x, center.y, size])?;
        let cell = (size / GLYPH_ROWS as f32).max(1.0);
        let advance = cell * (GLYPH_COLS + 1) as f32;
        let count = text.chars().count() as f32;
        let total_w = advance * count - cell;
        let mut x = center.x - total_w * 0.5;
        let y = center.y - cell * GLYPH_ROWS as f32 * 0.5;
        for ch in text.chars() {
            let rows = glyph(ch);
            for (r, bits) in rows.iter().enumerate() {
                for c in 0..GLYPH_COLS {
                    if bits & (1 << (GLYPH_COLS - 1 - c)) != 0 {
                        self.fill_rect(
                            Vec2::new(x + c as f32 * cell, y + r as f32 * cell),
                            Vec2::splat(cell),
                            color,
                        )?;
                    }
                }
            }
            x += advance;
        }
        Ok(())
    }
}

const GLYPH_COLS: usize = 5;
const GLYPH_ROWS: usize = 7;

/// 5x7 bitmap glyphs, one byte per row, MSB-first in the low five bits.
fn glyph(ch: char) -> [u8; GLYPH_ROWS] {
    match ch.to_ascii_uppercase() {
        'A' => [0x0e, 0x11, 0x11, 0x1f, 0x11, 0x11, 0x11],
        'B' => [0x1e, 0x11, 0x11, 0x1e, 0x11, 0x11, 0x1e],
        'C' => [0x0e, 0x11, 0x10, 0x10, 0x10, 0x11, 0x0e],
        'D' => [0x1e, 0x11, 0x11, 0x11, 0x11, 0x11, 0x1e],
        'E' => [0x1f, 0x10, 0x10, 0x1e, 0x10, 0x10, 0x1f],
        'F' => [0x1f, 0x10, 0x10, 0x1e, 0x10, 0x10, 0x10],
        'G' => [0x0e, 0x11, 0x10, 0x17, 0x11, 0x11, 0x0f],
        'H' => [0x11, 0x11, 0x11, 0x1f, 0x11, 0x11, 0x11],
        'I' => [0x0e, 0x04, 0x04, 0x04, 0x04, 0x04, 0x0e],
        'J' => [0x07, 0x02, 0x02, 0x02, 0x02, 0x12, 0x0c],
        'K' => [0x11, 0x12, 0x14, 0x18, 0x14, 0x12, 0x11],
        'L' => [0x10, 0x10, 0x10, 0x10, 0x10, 0x10, 0x1f],
        'M' => [0x11, 0x1b, 0x15, 0x15, 0x11, 0x11, 0x11],
        'N' => [0x11, 0x11, 0x19, 0x15, 0x13, 0x11, 0x11],
        'O' => [0x0e, 0x11, 0x11, 0x11, 0x11, 0x11, 0x0e],
        'P' => [0x1e, 0x11, 0x11, 0x1e, 0x10, 0x10, 0x10],
        'Q' => [0x0e, 0x11, 0x11, 0x11, 0x15, 0x12, 0x0d],
        'R' => [0x1e, 0x11, 0x11, 0x1e, 0x14, 0x12, 0x11],
        'S' => [0x0f, 0x10, 0x10, 0x0e, 0x01, 0x01, 0x1e],
        'T' => [0x1f, 0x04, 0x04, 0x04, 0x04, 0x04, 0x04],
        'U' => [0x11, 0x11, 0x11, 0x11, 0x11, 0x11, 0x0e],
        'V' => [0x11, 0x11, 0x11, 0x11, 0x11, 0x0a, 0x04],
        'W' => [0x11, 0x11, 0x11, 0x15, 0x15, 0x15, 0x0a],
        'X' => [0x11, 0x11, 0x0a, 0x04, 0x0a, 0x11, 0x11],
        'Y' => [0x11, 0x11, 0x0a, 0x04, 0x04, 0x04, 0x04],
        'Z' => [0x1f, 0x01, 0x02, 0x04, 0x08, 0x10, 0x1f],
        '0' => [0x0e, 0x11, 0x13, 0x15, 0x19, 0x11, 0x0e],
        '1' => [0x04, 0x0c, 0x04, 0x04, 0x04, 0x04, 0x0e],
        '2' => [0x0e, 0x11, 0x01, 0x02, 0x04, 0x08, 0x1f],
        '3' => [0x1f, 0x02, 0x04, 0x02, 0x01, 0x11, 0x0e],
        '4' => [0x02, 0x06, 0x0a, 0x12, 0x1f, 0x02, 0x02],
        '5' => [0x1f, 0x10, 0x1e, 0x01, 0x01, 0x11, 0x0e],
        '6' => [0x06, 0x08, 0x10, 0x1e, 0x11, 0x11, 0x0e],
        '7' => [0x1f, 0x01, 0x02, 0x04, 0x08, 0x08, 0x08],
        '8' => [0x0e, 0x11, 0x11, 0x0e, 0x11, 0x11, 0x0e],
        '9' => [0x0e, 0x11, 0x11, 0x0f, 0x01, 0x02, 0x0c],
        ' ' => [0x00; GLYPH_ROWS],
        '!' => [0x04, 0x04, 0x04, 0x04, 0x04, 0x00, 0x04],
        '.' => [0x00, 0x00, 0x00, 0x00, 0x00, 0x0c, 0x0c],
        '-' => [0x00, 0x00, 0x00, 0x1f, 0x00, 0x00, 0x00],
        '*' => [0x00, 0x04, 0x15, 0x0e, 0x15, 0x04, 0x00],
        '\'' => [0x04, 0x04, 0x08, 0x00, 0x00, 0x00, 0x00],
        // unknown: hollow box
        _ => [0x1f, 0x11, 0x11, 0x11, 0x11, 0x11, 0x1f],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn opaque_rect_covers_pixel_centres_only() {
        let mut s = PixelSurface::new(8, 8);
        s.fill_rect(Vec2::new(2.0, 2.0), Vec2::new(3.0, 2.0), Rgba::WHITE)
            .unwrap();
        assert_eq!(s.pixel(2, 2), Some([255, 255, 255, 255]));
        assert_eq!(s.pixel(4, 3), Some([255, 255, 255, 255]));
        assert_eq!(s.pixel(5, 2), Some([0, 0, 0, 0]));
        assert_eq!(s.pixel(2, 4), Some([0, 0, 0, 0]));
    }

    #[test]
    fn global_alpha_blends_source_over() {
        let mut s = PixelSurface::new(4, 4);
        s.fill_all(Rgba::BLACK).unwrap();
        s.set_alpha(0.5);
        s.fill_rect(Vec2::ZERO, Vec2::splat(4.0), Rgba::WHITE).unwrap();
        let px = s.pixel(1, 1).unwrap();
        assert!((px[0] as i32 - 128).abs() <= 1, "got {px:?}");
        assert_eq!(px[3], 255);
    }

    #[test]
    fn circle_is_symmetric_and_clipped() {
        let mut s = PixelSurface::new(20, 20);
        s.fill_circle(Vec2::new(10.0, 10.0), 4.0, Rgba::WHITE).unwrap();
        assert_eq!(s.pixel(10, 10).unwrap()[3], 255);
        assert_eq!(s.pixel(7, 10), s.pixel(12, 10));
        assert_eq!(s.pixel(10, 2).unwrap()[3], 0);
        // partly off-surface draws do not panic
        s.fill_circle(Vec2::new(-2.0, 19.0), 6.0, Rgba::WHITE).unwrap();
        assert_eq!(s.pixel(0, 19).unwrap()[3], 255);
    }

    #[test]
    fn polygon_fills_interior_of_triangle() {
        let mut s = PixelSurface::new(10, 10);
        let tri = [Vec2::new(0.0, 0.0), Vec2::new(10.0, 0.0), Vec2::new(0.0, 10.0)];
        s.fill_polygon(&tri, Rgba::WHITE).unwrap();
        assert_eq!(s.pixel(1, 1).unwrap()[3], 255);
        assert_eq!(s.pixel(8, 8).unwrap()[3], 0);
    }

    #[test]
    fn text_marks_pixels_and_rejects_nan() {
        let mut s = PixelSurface::new(64, 16);
        s.fill_text("HI", Vec2::new(32.0, 8.0), 14.0, Rgba::WHITE)
            .unwrap();
        assert!(s.pixels().iter().any(|p| p[3] == 255));
        assert!(s
            .fill_text("HI", Vec2::new(f32::NAN, 8.0), 14.0, Rgba::WHITE)
            .is_err());
    }
}

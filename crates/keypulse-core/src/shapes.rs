//! Closed-form point sets for the particle shapes and figure parts.

use crate::color::Rgba;
use crate::surface::{Surface, SurfaceError};
use glam::Vec2;
use smallvec::SmallVec;
use std::f32::consts::{PI, TAU};

pub type Points = SmallVec<[Vec2; 64]>;

const HEART_SAMPLES: usize = 40;

/// Outline used by decaying particles.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Shape {
    Circle,
    Star,
    Pentagon,
    Heart,
}

impl Shape {
    /// Draw the shape centred on `center`; `size` is the outer radius.
    pub fn draw(
        self,
        surface: &mut dyn Surface,
        center: Vec2,
        size: f32,
        rotation: f32,
        color: Rgba,
    ) -> Result<(), SurfaceError> {
        if size <= 0.0 {
            return Ok(());
        }
        match self {
            Shape::Circle => surface.fill_circle(center, size, color),
            Shape::Star => surface.fill_polygon(&star(center, size, size * 0.45, 5, rotation), color),
            Shape::Pentagon => surface.fill_polygon(&regular_polygon(center, size, 5, rotation), color),
            Shape::Heart => surface.fill_polygon(&heart(center, size), color),
        }
    }
}

/// Alternating outer/inner vertices, first spike pointing up at rotation 0.
pub fn star(center: Vec2, outer: f32, inner: f32, spikes: usize, rotation: f32) -> Points {
    let n = spikes.max(2) * 2;
    (0..n)
        .map(|i| {
            let r = if i % 2 == 0 { outer } else { inner };
            let a = rotation - PI / 2.0 + i as f32 * TAU / n as f32;
            center + Vec2::new(a.cos(), a.sin()) * r
        })
        .collect()
}

pub fn regular_polygon(center: Vec2, radius: f32, sides: usize, rotation: f32) -> Points {
    let n = sides.max(3);
    (0..n)
        .map(|i| {
            let a = rotation - PI / 2.0 + i as f32 * TAU / n as f32;
            center + Vec2::new(a.cos(), a.sin()) * radius
        })
        .collect()
}

/// Parametric heart: x = 16 sin³t, y = 13 cos t − 5 cos 2t − 2 cos 3t − cos 4t,
/// scaled so the lobes span roughly `2 * size` and flipped for y-down screens.
pub fn heart(center: Vec2, size: f32) -> Points {
    let k = size / 16.0;
    (0..HEART_SAMPLES)
        .map(|i| {
            let t = i as f32 * TAU / HEART_SAMPLES as f32;
            let x = 16.0 * t.sin().powi(3);
            let y = 13.0 * t.cos() - 5.0 * (2.0 * t).cos() - 2.0 * (3.0 * t).cos() - (4.0 * t).cos();
            center + Vec2::new(x, -y) * k
        })
        .collect()
}

/// Points along a circular arc from `start` to `end` radians.
pub fn arc(center: Vec2, radius: f32, start: f32, end: f32, segments: usize) -> Points {
    let n = segments.max(1);
    (0..=n)
        .map(|i| {
            let a = start + (end - start) * i as f32 / n as f32;
            center + Vec2::new(a.cos(), a.sin()) * radius
        })
        .collect()
}

/// Triangle with its apex at `tip`, pointing along `dir`.
pub fn triangle(tip: Vec2, dir: Vec2, length: f32, half_width: f32) -> [Vec2; 3] {
    let d = dir.normalize_or_zero();
    let n = Vec2::new(-d.y, d.x);
    let base = tip - d * length;
    [tip, base + n * half_width, base - n * half_width]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn star_alternates_radii() {
        let c = Vec2::new(5.0, 5.0);
        let pts = star(c, 10.0, 4.0, 5, 0.0);
        assert_eq!(pts.len(), 10);
        for (i, p) in pts.iter().enumerate() {
            let r = p.distance(c);
            let expected = if i % 2 == 0 { 10.0 } else { 4.0 };
            assert!((r - expected).abs() < 1e-4);
        }
        // first spike points up on a y-down surface
        assert!(pts[0].y < c.y);
    }

    #[test]
    fn heart_fits_within_size_and_points_down() {
        let c = Vec2::ZERO;
        let pts = heart(c, 16.0);
        assert!(pts.iter().all(|p| p.x.abs() <= 16.0 + 1e-3));
        // the tip (t = PI) is below the centre on screen
        let tip = pts[HEART_SAMPLES / 2];
        assert!(tip.y > 0.0);
        assert!(tip.x.abs() < 1e-3);
    }

    #[test]
    fn outlines_fit_the_inline_point_buffer() {
        assert!(!heart(Vec2::ZERO, 10.0).spilled());
        assert!(!star(Vec2::ZERO, 10.0, 4.0, 12, 0.0).spilled());
        assert!(!arc(Vec2::ZERO, 1.0, 0.0, PI, 48).spilled());
    }

    #[test]
    fn arc_includes_both_ends() {
        let pts = arc(Vec2::ZERO, 1.0, 0.0, PI, 4);
        assert_eq!(pts.len(), 5);
        assert!((pts[0] - Vec2::new(1.0, 0.0)).length() < 1e-5);
        assert!((pts[4] - Vec2::new(-1.0, 0.0)).length() < 1e-5);
    }
}

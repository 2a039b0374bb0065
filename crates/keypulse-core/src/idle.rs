//! Ambient per-region background, drawn every tick before any effect.
//!
//! Each layer is a pure function of (surface size, timestamp): all variation
//! comes from hashing a fixed per-element index, never from stored state.

use crate::color::Rgba;
use crate::region::Region;
use crate::shapes::{self, Points};
use crate::surface::{with_alpha, Surface, SurfaceError};
use crate::theme::IdleLayer;
use glam::Vec2;
use std::f32::consts::TAU;

const GRASS: Rgba = Rgba::hex(0x5daa4f);
const GRASS_TIP: Rgba = Rgba::hex(0x8fd16f);
const CLOUD: Rgba = Rgba::new(1.0, 1.0, 1.0, 0.85);
const WAVE: Rgba = Rgba::hex(0x3a86c8);
const FOAM: Rgba = Rgba::hex(0xcbe8ff);
const STAR: Rgba = Rgba::hex(0xfffbe0);
const MOON: Rgba = Rgba::hex(0xf4f1c9);

/// Integer hash of `i` into \[0, 1).
#[inline]
fn hash01(i: u32) -> f32 {
    let mut x = i.wrapping_mul(0x9e37_79b9) ^ 0x85eb_ca6b;
    x ^= x >> 16;
    x = x.wrapping_mul(0x7feb_352d);
    x ^= x >> 15;
    x = x.wrapping_mul(0x846c_a68b);
    x ^= x >> 16;
    (x >> 8) as f32 / (1u32 << 24) as f32
}

pub fn render_idle(region: Region, surface: &mut dyn Surface, now_ms: f64) -> Result<(), SurfaceError> {
    let theme = region.theme();
    surface.fill_all(theme.background)?;
    // f32 loses sub-ms precision after a few hours; wrap to a day
    let t = (now_ms % 86_400_000.0) as f32;
    match theme.idle {
        IdleLayer::Grass => grass(surface, t),
        IdleLayer::Clouds => clouds(surface, t),
        IdleLayer::Waves => waves(surface, t),
        IdleLayer::Stars => stars(surface, t),
    }
}

fn grass(surface: &mut dyn Surface, t: f32) -> Result<(), SurfaceError> {
    let (w, h) = (surface.width(), surface.height());
    let blades = ((w / 10.0) as u32).clamp(8, 256);
    let spacing = w / blades as f32;
    for i in 0..blades {
        let x = (i as f32 + hash01(i)) * spacing;
        let tall = h * (0.08 + 0.1 * hash01(i + 1000));
        let sway = (t * 0.0018 + i as f32 * 0.7).sin() * tall * 0.18;
        let blade = [
            Vec2::new(x, h),
            Vec2::new(x + sway * 0.4, h - tall * 0.5),
            Vec2::new(x + sway, h - tall),
        ];
        let color = GRASS.lerp(GRASS_TIP, hash01(i + 2000));
        surface.stroke_polyline(&blade, spacing * 0.45, color)?;
    }
    Ok(())
}

fn clouds(surface: &mut dyn Surface, t: f32) -> Result<(), SurfaceError> {
    let (w, h) = (surface.width(), surface.height());
    for i in 0..5u32 {
        let r = h * (0.06 + 0.04 * hash01(i + 10));
        let span = w + 4.0 * r;
        let speed = 0.008 + 0.012 * hash01(i + 20);
        let x = (hash01(i) * span + t * speed).rem_euclid(span) - 2.0 * r;
        let y = h * (0.12 + 0.5 * hash01(i + 30));
        let puffs = [(-1.1, 0.25, 0.75), (0.0, 0.0, 1.0), (1.1, 0.2, 0.8)];
        for (dx, dy, k) in puffs {
            surface.fill_circle(Vec2::new(x + dx * r, y + dy * r), r * k, CLOUD)?;
        }
    }
    Ok(())
}

fn waves(surface: &mut dyn Surface, t: f32) -> Result<(), SurfaceError> {
    let (w, h) = (surface.width(), surface.height());
    const SAMPLES: usize = 32;
    for band in 0..4 {
        let k = band as f32;
        let base = h * (0.35 + 0.17 * k);
        let amp = h * 0.025 * (1.0 + 0.3 * k);
        let speed = 0.0012 * (1.0 + 0.35 * k);
        let mut outline: Points = (0..=SAMPLES)
            .map(|s| {
                let x = w * s as f32 / SAMPLES as f32;
                let y = base + (x / w * TAU * 1.5 + t * speed + k * 1.3).sin() * amp;
                Vec2::new(x, y)
            })
            .collect();
        outline.push(Vec2::new(w, h));
        outline.push(Vec2::new(0.0, h));
        let color = WAVE.lerp(FOAM, 0.1 + 0.12 * k).with_alpha(0.55);
        surface.fill_polygon(&outline, color)?;
    }
    Ok(())
}

fn stars(surface: &mut dyn Surface, t: f32) -> Result<(), SurfaceError> {
    let (w, h) = (surface.width(), surface.height());
    let count = (((w * h) / 6000.0) as u32).clamp(12, 160);
    for i in 0..count {
        let pos = Vec2::new(hash01(i) * w, hash01(i + 5000) * h * 0.85);
        let twinkle = 0.5 + 0.5 * (t * 0.003 * (0.5 + hash01(i + 7000)) + hash01(i + 9000) * TAU).sin();
        let size = 1.0 + 2.5 * hash01(i + 11000);
        let mut s = with_alpha(surface, 0.25 + 0.75 * twinkle);
        if size > 2.8 {
            s.fill_polygon(&shapes::star(pos, size * 1.6, size * 0.6, 4, 0.0), STAR)?;
        } else {
            s.fill_circle(pos, size * 0.6, STAR)?;
        }
    }
    let moon = Vec2::new(w * 0.82, h * 0.2);
    let r = w.min(h) * 0.08;
    surface.fill_circle(moon, r, MOON)
}

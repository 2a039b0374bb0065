// Leaf drawing routines for the themed figures. Each takes an anchor point,
// an overall size and a periodic phase; none of them touch global alpha.

use crate::color::Rgba;
use crate::shapes::{self, Shape};
use crate::surface::{Surface, SurfaceError};
use glam::Vec2;

const EYE: Rgba = Rgba::hex(0x1b1b2a);
const SHINE: Rgba = Rgba::hex(0xfdfdf6);
const FLAME: Rgba = Rgba::hex(0xffa53a);
const FLAME_CORE: Rgba = Rgba::hex(0xfff1a8);
const WINDOW: Rgba = Rgba::hex(0x9fe3ff);
const CAT_EYE: Rgba = Rgba::hex(0xf7e26b);
const BUNNY_INNER_EAR: Rgba = Rgba::hex(0xf6b7c8);

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Facing {
    Left,
    Right,
}

impl Facing {
    #[inline]
    pub fn from_sign(sign: f32) -> Self {
        if sign < 0.0 {
            Facing::Left
        } else {
            Facing::Right
        }
    }

    #[inline]
    pub fn sign(self) -> f32 {
        match self {
            Facing::Left => -1.0,
            Facing::Right => 1.0,
        }
    }
}

/// `feet` is the ground contact point.
pub(crate) fn bunny(
    surface: &mut dyn Surface,
    feet: Vec2,
    size: f32,
    facing: Facing,
    color: Rgba,
    phase: f32,
) -> Result<(), SurfaceError> {
    let f = facing.sign();
    let s = size;
    let at = |dx: f32, dy: f32| feet + Vec2::new(dx * s * f, dy * s);

    surface.fill_ellipse(at(0.2, -0.05), Vec2::new(0.22 * s, 0.07 * s), color)?;
    surface.fill_ellipse(at(0.0, -0.42), Vec2::new(0.5 * s, 0.36 * s), color)?;
    surface.fill_circle(at(-0.5, -0.5), 0.14 * s, SHINE)?;

    let head = at(0.42, -0.82);
    surface.fill_circle(head, 0.27 * s, color)?;
    let wiggle = phase.sin() * 0.04 * s;
    for dx in [-0.08, 0.1] {
        let ear = head + Vec2::new(dx * s * f + wiggle, -0.42 * s);
        surface.fill_ellipse(ear, Vec2::new(0.08 * s, 0.27 * s), color)?;
        surface.fill_ellipse(ear, Vec2::new(0.035 * s, 0.19 * s), BUNNY_INNER_EAR)?;
    }
    surface.fill_circle(head + Vec2::new(0.12 * s * f, -0.04 * s), 0.045 * s, EYE)?;
    surface.fill_circle(head + Vec2::new(0.26 * s * f, 0.04 * s), 0.035 * s, BUNNY_INNER_EAR)
}

/// `feet` is the ground contact point; the tail sways with `phase`.
pub(crate) fn cat(
    surface: &mut dyn Surface,
    feet: Vec2,
    size: f32,
    facing: Facing,
    color: Rgba,
    phase: f32,
) -> Result<(), SurfaceError> {
    let f = facing.sign();
    let s = size;
    let at = |dx: f32, dy: f32| feet + Vec2::new(dx * s * f, dy * s);

    let tail: shapes::Points = (0..7)
        .map(|i| {
            let i = i as f32;
            let sway = (phase + i * 0.6).sin() * 0.06 * i;
            at(-0.55 - 0.07 * i + sway, -0.45 - 0.1 * i)
        })
        .collect();
    surface.stroke_polyline(&tail, 0.09 * s, color)?;

    // legs swing in opposite pairs
    let swing = phase.sin() * 0.08;
    for (dx, dir) in [(-0.35, 1.0), (-0.2, -1.0), (0.2, 1.0), (0.35, -1.0)] {
        let top = at(dx, -0.3);
        let bottom = at(dx + swing * dir, 0.0);
        surface.stroke_polyline(&[top, bottom], 0.09 * s, color)?;
    }
    surface.fill_ellipse(at(0.0, -0.42), Vec2::new(0.55 * s, 0.24 * s), color)?;

    let head = at(0.55, -0.7);
    for ear in [(-0.22, -0.14, -0.03), (0.03, 0.14, 0.22)] {
        let tri = [
            head + Vec2::new(ear.0 * s, -0.12 * s),
            head + Vec2::new(ear.1 * s, -0.42 * s),
            head + Vec2::new(ear.2 * s, -0.18 * s),
        ];
        surface.fill_polygon(&tri, color)?;
    }
    surface.fill_circle(head, 0.25 * s, color)?;
    for dx in [0.02, 0.14] {
        surface.fill_circle(head + Vec2::new(dx * s * f, -0.04 * s), 0.05 * s, CAT_EYE)?;
    }
    Ok(())
}

/// `center` is the middle of the body; the tail wags with `phase`.
pub(crate) fn fish(
    surface: &mut dyn Surface,
    center: Vec2,
    size: f32,
    facing: Facing,
    color: Rgba,
    phase: f32,
) -> Result<(), SurfaceError> {
    let f = facing.sign();
    let s = size;
    let at = |dx: f32, dy: f32| center + Vec2::new(dx * s * f, dy * s);
    let wag = (phase * 2.0).sin() * 0.1;

    surface.fill_polygon(&[at(-0.45, 0.0), at(-0.9, -0.32 + wag), at(-0.9, 0.32 + wag)], color)?;
    let fin = color.lerp(SHINE, 0.25);
    surface.fill_polygon(&[at(-0.15, -0.25), at(0.15, -0.28), at(-0.25, -0.5)], fin)?;
    surface.fill_ellipse(center, Vec2::new(0.6 * s, 0.32 * s), color)?;
    surface.fill_circle(at(0.32, -0.08), 0.09 * s, SHINE)?;
    surface.fill_circle(at(0.35, -0.08), 0.045 * s, EYE)
}

/// `center` is the middle of the hull; the rocket points up.
pub(crate) fn rocket(
    surface: &mut dyn Surface,
    center: Vec2,
    size: f32,
    color: Rgba,
    phase: f32,
) -> Result<(), SurfaceError> {
    let s = size;
    let at = |dx: f32, dy: f32| center + Vec2::new(dx * s, dy * s);

    let flicker = (phase * 3.0).sin().abs();
    let flame_len = (0.3 + 0.2 * flicker) * s;
    let exhaust = at(0.0, 0.4);
    let down = Vec2::new(0.0, 1.0);
    surface.fill_polygon(&shapes::triangle(exhaust + down * flame_len, down, flame_len, 0.14 * s), FLAME)?;
    surface.fill_polygon(
        &shapes::triangle(exhaust + down * flame_len * 0.6, down, flame_len * 0.6, 0.07 * s),
        FLAME_CORE,
    )?;

    let fin = color.lerp(Rgba::BLACK, 0.25);
    surface.fill_polygon(&[at(-0.18, 0.1), at(-0.36, 0.45), at(-0.18, 0.4)], fin)?;
    surface.fill_polygon(&[at(0.18, 0.1), at(0.36, 0.45), at(0.18, 0.4)], fin)?;
    surface.fill_polygon(
        &[at(-0.18, 0.4), at(-0.18, -0.3), at(0.0, -0.62), at(0.18, -0.3), at(0.18, 0.4)],
        color,
    )?;
    surface.fill_circle(at(0.0, -0.12), 0.09 * s, WINDOW)
}

/// `head` is the leading point; the tail trails opposite `heading`.
pub(crate) fn comet(
    surface: &mut dyn Surface,
    head: Vec2,
    heading: Vec2,
    size: f32,
    color: Rgba,
    phase: f32,
) -> Result<(), SurfaceError> {
    const TAIL: usize = 8;
    let back = -heading.normalize_or_zero();
    for i in (1..=TAIL).rev() {
        let k = 1.0 - i as f32 / (TAIL + 1) as f32;
        let p = head + back * (i as f32 * 0.2 * size);
        surface.fill_circle(p, 0.22 * size * k, color.scale_alpha(0.6 * k))?;
    }
    surface.fill_circle(head, 0.2 * size, color.lerp(SHINE, 0.5))?;
    Shape::Star.draw(surface, head, 0.32 * size, phase, SHINE)
}

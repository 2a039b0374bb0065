use super::figures::{self, Facing};
use crate::color::Rgba;
use crate::surface::{with_alpha, Surface, SurfaceError};
use glam::Vec2;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Critter {
    Bunny,
    Cat,
}

impl Critter {
    pub fn label(self) -> &'static str {
        match self {
            Critter::Bunny => "bunny",
            Critter::Cat => "cat",
        }
    }

    // (phase step per tick, speed px/tick, hop height as a fraction of size)
    fn gait(self) -> (f32, f32, f32) {
        match self {
            Critter::Bunny => (0.16, 2.4, 0.7),
            Critter::Cat => (0.22, 1.7, 0.06),
        }
    }
}

/// Figure that hops or walks along a fixed ground line.
///
/// Horizontal motion is a constant step per tick in a direction fixed at
/// creation, independent of progress, so the figure may leave the surface
/// before its lifetime ends. Only the lifetime retires it.
#[derive(Clone, Debug)]
pub struct Walker {
    pub critter: Critter,
    pub x: f32,
    pub ground: f32,
    pub direction: f32,
    pub phase: f32,
    pub phase_step: f32,
    pub speed: f32,
    pub hop: f32,
    pub size: f32,
    pub color: Rgba,
}

impl Walker {
    pub fn new(critter: Critter, x: f32, ground: f32, direction: f32, size: f32, color: Rgba) -> Self {
        let (phase_step, speed, hop) = critter.gait();
        Self {
            critter,
            x,
            ground,
            direction: if direction < 0.0 { -1.0 } else { 1.0 },
            phase: 0.0,
            phase_step,
            speed,
            hop: hop * size,
            size,
            color,
        }
    }

    pub(crate) fn advance(&mut self) {
        self.phase += self.phase_step;
        self.x += self.speed * self.direction;
    }

    /// Height above the ground line: `|sin(phase)| * hop`.
    #[inline]
    pub fn lift(&self) -> f32 {
        self.phase.sin().abs() * self.hop
    }

    #[inline]
    pub fn feet(&self) -> Vec2 {
        Vec2::new(self.x, self.ground - self.lift())
    }

    pub(crate) fn render(&self, surface: &mut dyn Surface, progress: f32) -> Result<(), SurfaceError> {
        let fade = ((1.0 - progress) / 0.15).min(1.0);
        let mut s = with_alpha(surface, fade);
        let facing = Facing::from_sign(self.direction);
        let feet = self.feet();
        // ground shadow shrinks while airborne
        let shadow = 1.0 - 0.5 * (self.lift() / self.hop.max(1e-3));
        s.fill_ellipse(
            Vec2::new(self.x, self.ground),
            Vec2::new(0.45 * self.size * shadow, 0.08 * self.size),
            Rgba::new(0.0, 0.0, 0.0, 0.25),
        )?;
        match self.critter {
            Critter::Bunny => figures::bunny(&mut *s, feet, self.size, facing, self.color, self.phase),
            Critter::Cat => figures::cat(&mut *s, feet, self.size, facing, self.color, self.phase),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn walks_linearly_and_hops_with_abs_sine() {
        let mut w = Walker::new(Critter::Bunny, 100.0, 200.0, -1.0, 40.0, Rgba::WHITE);
        for _ in 0..20 {
            w.advance();
        }
        assert!((w.x - (100.0 - 20.0 * w.speed)).abs() < 1e-3);
        let expected = (20.0 * w.phase_step).sin().abs() * w.hop;
        assert!((w.lift() - expected).abs() < 1e-4);
        assert!(w.feet().y <= w.ground);
    }

    #[test]
    fn direction_is_normalized_to_unit_sign() {
        let w = Walker::new(Critter::Cat, 0.0, 0.0, 7.0, 10.0, Rgba::WHITE);
        assert_eq!(w.direction, 1.0);
    }
}

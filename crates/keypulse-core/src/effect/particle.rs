use crate::color::Rgba;
use crate::shapes::Shape;
use crate::surface::{with_alpha, Surface, SurfaceError};
use glam::Vec2;

/// Single decaying particle integrated with semi-implicit Euler.
///
/// Units are pixels per tick; gravity is added to the vertical velocity
/// before the position update. Opacity is `1 - progress`.
#[derive(Clone, Debug)]
pub struct Particle {
    pub pos: Vec2,
    pub vel: Vec2,
    pub gravity: f32,
    pub shape: Shape,
    pub color: Rgba,
    pub size: f32,
    /// Fraction of `size` lost by the end of the lifetime.
    pub shrink: f32,
    pub rotation: f32,
    pub spin: f32,
}

impl Particle {
    pub fn new(pos: Vec2, vel: Vec2, shape: Shape, color: Rgba, size: f32) -> Self {
        Self {
            pos,
            vel,
            gravity: 0.0,
            shape,
            color,
            size,
            shrink: 0.0,
            rotation: 0.0,
            spin: 0.0,
        }
    }

    pub fn with_gravity(mut self, gravity: f32) -> Self {
        self.gravity = gravity;
        self
    }

    pub fn with_shrink(mut self, shrink: f32) -> Self {
        self.shrink = shrink.clamp(0.0, 1.0);
        self
    }

    pub fn with_spin(mut self, spin: f32) -> Self {
        self.spin = spin;
        self
    }

    pub(crate) fn advance(&mut self) {
        self.vel.y += self.gravity;
        self.pos += self.vel;
        self.rotation += self.spin;
    }

    #[inline]
    pub fn size_at(&self, progress: f32) -> f32 {
        self.size * (1.0 - self.shrink * progress)
    }

    pub(crate) fn render(&self, surface: &mut dyn Surface, progress: f32) -> Result<(), SurfaceError> {
        let mut s = with_alpha(surface, 1.0 - progress);
        self.shape
            .draw(&mut *s, self.pos, self.size_at(progress), self.rotation, self.color)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gravity_feeds_velocity_before_position() {
        let mut p = Particle::new(Vec2::ZERO, Vec2::new(1.0, 0.0), Shape::Circle, Rgba::WHITE, 4.0)
            .with_gravity(0.5);
        p.advance();
        assert_eq!(p.vel, Vec2::new(1.0, 0.5));
        assert_eq!(p.pos, Vec2::new(1.0, 0.5));
        p.advance();
        assert_eq!(p.pos, Vec2::new(2.0, 1.5));
    }

    #[test]
    fn shrink_scales_size_with_progress() {
        let p = Particle::new(Vec2::ZERO, Vec2::ZERO, Shape::Star, Rgba::WHITE, 10.0).with_shrink(0.5);
        assert_eq!(p.size_at(0.0), 10.0);
        assert_eq!(p.size_at(1.0), 5.0);
    }
}

use crate::color::Rgba;
use crate::random::RandomSource;
use crate::shapes::{self, Shape};
use crate::surface::{with_alpha, Surface, SurfaceError};
use glam::Vec2;
use std::f32::consts::TAU;

pub const BURST_SPARKS: usize = 24;

/// Theme of a composite burst; picks kinematics and how sparks are drawn.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BurstStyle {
    Firework,
    Petals,
    Bubbles,
}

impl BurstStyle {
    pub fn label(self) -> &'static str {
        match self {
            BurstStyle::Firework => "firework",
            BurstStyle::Petals => "petal-bloom",
            BurstStyle::Bubbles => "bubbles",
        }
    }

    /// (speed range px/tick, drag per tick, gravity px/tick²)
    fn kinematics(self) -> ((f32, f32), f32, f32) {
        match self {
            BurstStyle::Firework => ((2.5, 6.0), 0.96, 0.06),
            BurstStyle::Petals => ((1.5, 3.5), 0.95, 0.03),
            BurstStyle::Bubbles => ((0.8, 2.2), 0.97, -0.05),
        }
    }
}

#[derive(Clone, Copy, Debug, Default)]
pub struct Spark {
    pub pos: Vec2,
    pub vel: Vec2,
    pub hue_offset: f32,
    pub size: f32,
}

/// Radial burst owning a fixed array of sub-particles that integrate together.
#[derive(Clone, Debug)]
pub struct Burst {
    pub style: BurstStyle,
    pub origin: Vec2,
    pub sparks: [Spark; BURST_SPARKS],
    pub drag: f32,
    pub gravity: f32,
    pub hue: f32,
    pub color: Rgba,
}

impl Burst {
    /// Sparks leave `origin` at angles `TAU * i / N` with randomized speed.
    pub fn new(style: BurstStyle, origin: Vec2, color: Rgba, size: f32, rng: &mut dyn RandomSource) -> Self {
        let ((lo, hi), drag, gravity) = style.kinematics();
        let mut sparks = [Spark::default(); BURST_SPARKS];
        for (i, spark) in sparks.iter_mut().enumerate() {
            let angle = TAU * i as f32 / BURST_SPARKS as f32;
            let speed = rng.range(lo, hi);
            *spark = Spark {
                pos: origin,
                vel: Vec2::new(angle.cos(), angle.sin()) * speed,
                hue_offset: rng.range(-40.0, 40.0),
                size: size * rng.range(0.6, 1.0),
            };
        }
        Self {
            style,
            origin,
            sparks,
            drag,
            gravity,
            hue: rng.range(0.0, 360.0),
            color,
        }
    }

    pub(crate) fn advance(&mut self) {
        for s in self.sparks.iter_mut() {
            s.vel *= self.drag;
            s.vel.y += self.gravity;
            s.pos += s.vel;
        }
    }

    pub(crate) fn render(
        &self,
        surface: &mut dyn Surface,
        progress: f32,
        now_ms: f64,
    ) -> Result<(), SurfaceError> {
        let mut s = with_alpha(surface, 1.0 - progress);
        match self.style {
            BurstStyle::Firework => {
                // hue drifts with wall-clock time so sparks shimmer
                let drift = (now_ms * 0.12) as f32;
                for spark in &self.sparks {
                    let color = Rgba::hsl(self.hue + spark.hue_offset + drift, 0.9, 0.62);
                    let r = spark.size * (1.0 - 0.5 * progress);
                    let trail = spark.pos - spark.vel * 2.5;
                    s.stroke_polyline(&[trail, spark.pos], r * 0.6, color.scale_alpha(0.6))?;
                    s.fill_circle(spark.pos, r, color)?;
                }
            }
            BurstStyle::Petals => {
                for (i, spark) in self.sparks.iter().enumerate() {
                    let color = self.color.lerp(Rgba::hsl(self.hue + spark.hue_offset, 0.7, 0.8), 0.35);
                    let shape = if i % 3 == 0 { Shape::Heart } else { Shape::Pentagon };
                    let spin = progress * TAU + i as f32;
                    shape.draw(&mut *s, spark.pos, spark.size, spin, color)?;
                }
                s.fill_circle(self.origin, 6.0 * (1.0 - progress), Rgba::hex(0xffe066))?;
            }
            BurstStyle::Bubbles => {
                let rim = self.color.lerp(Rgba::WHITE, 0.5);
                for spark in &self.sparks {
                    let r = spark.size * (0.6 + 0.6 * progress);
                    let ring = shapes::arc(spark.pos, r, 0.0, TAU, 16);
                    s.fill_circle(spark.pos, r, self.color.scale_alpha(0.25))?;
                    s.stroke_polyline(&ring, 1.5, rim)?;
                    s.fill_circle(spark.pos + Vec2::new(-0.35 * r, -0.35 * r), 0.2 * r, Rgba::WHITE)?;
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::random::ScriptedRandom;

    #[test]
    fn sparks_spread_over_a_full_turn() {
        let mut rng = ScriptedRandom::constant(0.5);
        let b = Burst::new(BurstStyle::Firework, Vec2::ZERO, Rgba::WHITE, 3.0, &mut rng);
        let sum: Vec2 = b.sparks.iter().map(|s| s.vel).sum();
        // equal speeds at evenly spaced angles cancel out
        assert!(sum.length() < 1e-3, "net velocity {sum:?}");
        let first = b.sparks[0].vel;
        assert!(first.x > 0.0 && first.y.abs() < 1e-5);
    }

    #[test]
    fn drag_and_gravity_apply_per_spark() {
        let mut rng = ScriptedRandom::constant(0.0);
        let mut b = Burst::new(BurstStyle::Bubbles, Vec2::ZERO, Rgba::WHITE, 3.0, &mut rng);
        let v0 = b.sparks[0].vel;
        b.advance();
        let expected = Vec2::new(v0.x * b.drag, v0.y * b.drag + b.gravity);
        assert!((b.sparks[0].vel - expected).length() < 1e-6);
        assert!((b.sparks[0].pos - expected).length() < 1e-6);
        // bubbles rise
        assert!(b.gravity < 0.0);
    }
}

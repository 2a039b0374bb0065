//! One region's live effects and the per-tick advance/draw/retire pass.

use crate::effect::Effect;
use crate::surface::Surface;

/// Counters from one [`EffectPool::step`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct StepStats {
    pub drawn: usize,
    pub retired: usize,
    pub faulted: usize,
}

impl std::ops::AddAssign for StepStats {
    fn add_assign(&mut self, rhs: Self) {
        self.drawn += rhs.drawn;
        self.retired += rhs.retired;
        self.faulted += rhs.faulted;
    }
}

/// Unordered collection of effects. There is no cap on its size; lifetimes
/// bound it.
#[derive(Debug, Default)]
pub struct EffectPool {
    effects: Vec<Effect>,
}

impl EffectPool {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, effect: Effect) {
        self.effects.push(effect);
    }

    pub fn extend(&mut self, effects: impl IntoIterator<Item = Effect>) {
        self.effects.extend(effects);
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.effects.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.effects.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Effect> {
        self.effects.iter()
    }

    /// Advance every effect by one tick, retire the ones that reached the end
    /// of their lifetime, and draw the rest.
    ///
    /// Walks from the tail so `swap_remove` only ever moves an element that
    /// was already visited. A render error retires that effect alone.
    pub fn step(&mut self, now_ms: f64, surface: &mut dyn Surface) -> StepStats {
        let mut stats = StepStats::default();
        let mut i = self.effects.len();
        while i > 0 {
            i -= 1;
            let effect = &mut self.effects[i];
            effect.advance(now_ms);
            if effect.is_terminal() {
                self.effects.swap_remove(i);
                stats.retired += 1;
                continue;
            }
            match effect.render(surface, now_ms) {
                Ok(()) => stats.drawn += 1,
                Err(err) => {
                    log::warn!(
                        "{} effect in {} failed to render, retiring it: {err}",
                        effect.label(),
                        effect.region().name()
                    );
                    self.effects.swap_remove(i);
                    stats.faulted += 1;
                }
            }
        }
        stats
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::Rgba;
    use crate::effect::{Overlay, Particle};
    use crate::record::RecordingSurface;
    use crate::region::Region;
    use crate::shapes::Shape;
    use glam::Vec2;

    fn dot(born: f64, duration: f64) -> Effect {
        let p = Particle::new(Vec2::new(5.0, 5.0), Vec2::ZERO, Shape::Circle, Rgba::WHITE, 2.0);
        Effect::new(Region::Meadow, born, duration, p)
    }

    #[test]
    fn expired_effects_are_retired_without_drawing() {
        let mut pool = EffectPool::new();
        pool.push(dot(0.0, 100.0));
        pool.push(dot(0.0, 300.0));
        pool.push(dot(0.0, 100.0));
        let mut s = RecordingSurface::new(10.0, 10.0);

        let stats = pool.step(150.0, &mut s);
        assert_eq!(stats, StepStats { drawn: 1, retired: 2, faulted: 0 });
        assert_eq!(pool.len(), 1);
        assert_eq!(s.commands().len(), 1);
        assert_eq!(pool.iter().next().map(|e| e.lifetime().duration_ms()), Some(300.0));
    }

    #[test]
    fn render_fault_retires_only_the_offender() {
        let mut pool = EffectPool::new();
        pool.push(dot(0.0, 100.0));
        let bad = Particle::new(Vec2::new(f32::NAN, 0.0), Vec2::ZERO, Shape::Circle, Rgba::WHITE, 2.0);
        pool.push(Effect::new(Region::Meadow, 0.0, 100.0, bad));
        pool.push(Effect::new(Region::Meadow, 0.0, 100.0, Overlay::wash(Rgba::WHITE)));
        let mut s = RecordingSurface::new(10.0, 10.0);

        let stats = pool.step(10.0, &mut s);
        assert_eq!(stats.faulted, 1);
        assert_eq!(stats.drawn, 2);
        assert_eq!(pool.len(), 2);
        assert_eq!(s.alpha(), 1.0);
    }
}

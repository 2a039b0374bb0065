//! Builds the effects a trigger pushes: one weighted headline plus a fixed
//! batch of ambient particles.

use crate::effect::{Burst, BurstStyle, Critter, Effect, Overlay, Particle, Traversal, Traveler, Walker};
use crate::random::{pick, weighted_index, RandomSource};
use crate::region::Region;
use crate::theme::{Headline, Theme};
use glam::Vec2;
use smallvec::SmallVec;
use std::f32::consts::TAU;

/// Roll the region's headline table.
pub fn choose_headline(theme: &Theme, rng: &mut dyn RandomSource) -> Headline {
    let weights: SmallVec<[u32; 4]> = theme.headline_weights().collect();
    theme.headlines[weighted_index(rng, &weights)].0
}

/// Headline effect sized for a surface of `extent` pixels.
pub fn build_headline(
    region: Region,
    headline: Headline,
    now_ms: f64,
    extent: Vec2,
    rng: &mut dyn RandomSource,
) -> Effect {
    let theme = region.theme();
    let (w, h) = (extent.x, extent.y);
    let unit = w.min(h).max(1.0);
    let color = *pick(rng, theme.palette);
    let life = headline.lifetime_ms();

    let effect = |kind: crate::effect::EffectKind| Effect::new(region, now_ms, life, kind);
    match headline {
        Headline::BunnyWalker | Headline::CatWalker => {
            let critter = if headline == Headline::BunnyWalker {
                Critter::Bunny
            } else {
                Critter::Cat
            };
            let dir = rng.sign();
            let x = w * rng.range(0.15, 0.85);
            let size = (unit * 0.18).max(12.0);
            effect(Walker::new(critter, x, h * 0.9, dir, size, color).into())
        }
        Headline::PetalBloom | Headline::Firework | Headline::Bubbles => {
            let (style, origin) = match headline {
                Headline::PetalBloom => (
                    BurstStyle::Petals,
                    Vec2::new(w * rng.range(0.25, 0.75), h * rng.range(0.3, 0.7)),
                ),
                Headline::Firework => (
                    BurstStyle::Firework,
                    Vec2::new(w * rng.range(0.2, 0.8), h * rng.range(0.15, 0.5)),
                ),
                _ => (
                    BurstStyle::Bubbles,
                    Vec2::new(w * rng.range(0.2, 0.8), h * rng.range(0.6, 0.9)),
                ),
            };
            let size = (unit * 0.025).max(2.0);
            effect(Burst::new(style, origin, color, size, rng).into())
        }
        Headline::Fish | Headline::Rocket | Headline::Comet => {
            let (traveler, lane) = match headline {
                Headline::Fish => (Traveler::Fish, rng.range(0.3, 0.8)),
                Headline::Rocket => (Traveler::Rocket, rng.range(0.2, 0.8)),
                _ => (Traveler::Comet, rng.range(0.0, 1.0)),
            };
            let dir = rng.sign();
            let size = (unit * 0.16).max(10.0);
            effect(Traversal::new(traveler, dir, lane, size, color).into())
        }
        Headline::Rainbow => effect(Overlay::rainbow().into()),
        Headline::TideWash => effect(Overlay::wash(theme.flash.lerp(color, 0.4)).into()),
        Headline::NameBanner => effect(Overlay::banner(theme.banner, color).into()),
    }
}

/// `count` small decaying particles in the region's ambient style.
pub fn build_ambient(
    region: Region,
    now_ms: f64,
    extent: Vec2,
    count: usize,
    rng: &mut dyn RandomSource,
) -> SmallVec<[Effect; 8]> {
    let theme = region.theme();
    let style = &theme.ambient;
    (0..count)
        .map(|_| {
            let pos = Vec2::new(extent.x * rng.next_f32(), extent.y * rng.next_f32());
            let angle = rng.range(0.0, TAU);
            let speed = rng.range(style.speed.0, style.speed.1);
            let vel = Vec2::new(angle.cos(), angle.sin()) * speed;
            let shape = *pick(rng, style.shapes);
            let color = *pick(rng, theme.palette);
            let size = rng.range(style.size.0, style.size.1);
            let spin = style.spin * rng.sign();
            let (lo, hi) = style.lifetime_ms;
            let life = lo + (hi - lo) * rng.next_f32() as f64;
            let particle = Particle::new(pos, vel, shape, color, size)
                .with_gravity(style.gravity)
                .with_shrink(0.6)
                .with_spin(spin);
            Effect::new(region, now_ms, life, particle)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::effect::EffectKind;
    use crate::random::ScriptedRandom;

    #[test]
    fn weighted_roll_follows_table_order() {
        let sky = Region::Sky.theme();
        // Sky is 30 / 30 / 40
        let at = |roll: f32| choose_headline(sky, &mut ScriptedRandom::constant(roll));
        assert_eq!(at(0.0), Headline::Firework);
        assert_eq!(at(0.29), Headline::Firework);
        assert_eq!(at(0.31), Headline::Rocket);
        assert_eq!(at(0.59), Headline::Rocket);
        assert_eq!(at(0.61), Headline::Rainbow);
        assert_eq!(at(0.99), Headline::Rainbow);
    }

    #[test]
    fn meadow_splits_evenly() {
        let meadow = Region::Meadow.theme();
        let at = |roll: f32| choose_headline(meadow, &mut ScriptedRandom::constant(roll));
        assert_eq!(at(0.49), Headline::BunnyWalker);
        assert_eq!(at(0.51), Headline::PetalBloom);
    }

    #[test]
    fn every_headline_builds_its_variant() {
        let extent = Vec2::new(400.0, 300.0);
        let mut rng = ScriptedRandom::new(vec![0.1, 0.7, 0.4, 0.9]);
        for region in Region::ALL {
            for (headline, _) in region.theme().headlines {
                let e = build_headline(region, *headline, 50.0, extent, &mut rng);
                assert_eq!(e.region(), region);
                assert_eq!(e.lifetime().born_ms(), 50.0);
                assert_eq!(e.lifetime().duration_ms(), headline.lifetime_ms());
                let ok = match headline {
                    Headline::BunnyWalker | Headline::CatWalker => matches!(e.kind(), EffectKind::Walker(_)),
                    Headline::PetalBloom | Headline::Firework | Headline::Bubbles => {
                        matches!(e.kind(), EffectKind::Burst(_))
                    }
                    Headline::Fish | Headline::Rocket | Headline::Comet => {
                        matches!(e.kind(), EffectKind::Traversal(_))
                    }
                    Headline::Rainbow | Headline::TideWash | Headline::NameBanner => {
                        matches!(e.kind(), EffectKind::Overlay(_))
                    }
                };
                assert!(ok, "{headline:?} built {}", e.label());
            }
        }
    }

    #[test]
    fn ambient_batch_uses_region_style() {
        let extent = Vec2::new(400.0, 300.0);
        let mut rng = ScriptedRandom::new(vec![0.2, 0.8, 0.5]);
        let batch = build_ambient(Region::Ocean, 0.0, extent, 5, &mut rng);
        assert_eq!(batch.len(), 5);
        for e in &batch {
            match e.kind() {
                EffectKind::Particle(p) => assert!(p.gravity < 0.0),
                other => panic!("unexpected {other:?}"),
            }
        }
    }
}

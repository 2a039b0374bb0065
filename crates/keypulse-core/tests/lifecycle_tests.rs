// Effect lifetimes, pool integrity and layering driven through the engine
// with injected timestamps.

use keypulse_core::effect::{Overlay, Particle};
use keypulse_core::shapes::Shape;
use keypulse_core::*;

use glam::Vec2;

fn surfaces() -> [RecordingSurface; REGION_COUNT] {
    std::array::from_fn(|_| RecordingSurface::new(320.0, 240.0))
}

fn engine(roll: f32) -> Engine<ScriptedRandom> {
    Engine::new(EngineConfig::default(), ScriptedRandom::constant(roll))
}

#[test]
fn progress_is_monotonic_and_clamps_at_one() {
    let e = Effect::new(Region::Sky, 100.0, 400.0, Overlay::rainbow());
    let mut last = 0.0;
    for t in (0..1000).step_by(7) {
        let p = e.progress(t as f64);
        assert!(p >= last, "progress went back at t={t}");
        assert!((0.0..=1.0).contains(&p));
        last = p;
    }
    assert_eq!(e.progress(500.0), 1.0);
    assert_eq!(e.progress(10_000.0), 1.0);
}

#[test]
fn headline_present_at_1999_and_gone_at_2001() {
    // roll 0 picks the Firework (2000ms) in the sky table
    let mut engine = engine(0.0);
    let mut s = surfaces();
    engine.trigger(Region::Sky, 0.0, &mut Silent);

    let is_headline = |e: &&Effect| e.lifetime().duration_ms() == 2000.0;
    engine.tick(1999.0, &mut s);
    let pool = engine.pool(Region::Sky);
    let headline = pool.iter().find(is_headline).expect("headline still live at 1999ms");
    assert_eq!(headline.lifetime().expires_at_ms(), 2000.0);
    assert!((headline.progress(1999.0) - 0.9995).abs() < 1e-4);
    assert!(!headline.is_terminal());

    let stats = engine.tick(2001.0, &mut s);
    assert!(engine.pool(Region::Sky).iter().find(is_headline).is_none());
    assert!(stats.regions[Region::Sky.index()].retired >= 1);
}

#[test]
fn pools_drain_after_the_longest_lifetime() {
    let mut engine = engine(0.37);
    let mut s = surfaces();
    let mut now = 0.0;
    for i in 0..40 {
        engine.trigger(Region::ALL[i % REGION_COUNT], now, &mut Silent);
        if i % 3 == 0 {
            engine.tick(now, &mut s);
        }
        now += 16.0;
    }
    assert!(engine.live_effects() > 0);

    engine.tick(now + MAX_EFFECT_LIFETIME_MS + 1.0, &mut s);
    assert_eq!(engine.live_effects(), 0);
    for region in Region::ALL {
        assert!(engine.pool(region).is_empty(), "{} leaked", region.name());
    }
}

#[test]
fn retriggering_layers_instead_of_replacing() {
    let mut engine = engine(0.5);
    let mut s = surfaces();
    engine.trigger(Region::Night, 0.0, &mut Silent);
    engine.tick(5.0, &mut s);
    let first = engine.pool(Region::Night).len();
    assert_eq!(first, 1 + AMBIENT_BATCH);

    engine.trigger(Region::Night, 10.0, &mut Silent);
    let pool = engine.pool(Region::Night);
    assert_eq!(pool.len(), 2 * first);
    let from_first = pool.iter().filter(|e| e.lifetime().born_ms() == 0.0).count();
    let from_second = pool.iter().filter(|e| e.lifetime().born_ms() == 10.0).count();
    assert_eq!(from_first, first);
    assert_eq!(from_second, first);
    // the earlier effects kept their clock
    for e in pool.iter().filter(|e| e.lifetime().born_ms() == 0.0) {
        assert!((e.progress(10.0) - (10.0 / e.lifetime().duration_ms()) as f32).abs() < 1e-6);
    }
    assert!(engine.pool(Region::Meadow).is_empty());
}

#[test]
fn spawned_effects_route_by_region() {
    let mut engine = engine(0.5);
    let p = Particle::new(Vec2::new(10.0, 10.0), Vec2::ZERO, Shape::Star, Rgba::WHITE, 4.0);
    engine.spawn(Effect::new(Region::Ocean, 0.0, 50.0, p));
    assert_eq!(engine.pool(Region::Ocean).len(), 1);
    assert_eq!(engine.live_effects(), 1);
}

#[test]
fn skipped_ticks_do_not_delay_expiry() {
    let mut engine = engine(0.5);
    let mut s = surfaces();
    engine.spawn(Effect::new(Region::Meadow, 0.0, 300.0, Overlay::wash(Rgba::WHITE)));
    // one frame at 16ms, then the host stalls for a second
    engine.tick(16.0, &mut s);
    assert_eq!(engine.pool(Region::Meadow).len(), 1);
    engine.tick(1016.0, &mut s);
    assert!(engine.pool(Region::Meadow).is_empty());
}

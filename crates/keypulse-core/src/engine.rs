//! The scheduler: owns every region's pool and flash, and runs the per-tick
//! clear / idle / flash / effects sequence.

use crate::constants::{
    AMBIENT_BATCH, DEFAULT_SURFACE_SIZE, FLASH_DECAY, FLASH_OVERLAY_SCALE, FLASH_SNAP, REGION_COUNT,
};
use crate::dispatch;
use crate::effect::Effect;
use crate::flash::Flash;
use crate::idle;
use crate::pool::{EffectPool, StepStats};
use crate::random::{RandomSource, SeededRandom};
use crate::region::Region;
use crate::surface::{with_alpha, Surface};
use crate::tone::TonePlayer;
use glam::Vec2;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EngineConfig {
    /// Multiplier applied to flash intensity every tick.
    pub flash_decay: f32,
    /// Flash below this reads exactly 0.
    pub flash_snap: f32,
    /// Overlay opacity at full flash.
    pub flash_overlay_scale: f32,
    /// Ambient particles pushed with every headline.
    pub ambient_batch: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            flash_decay: FLASH_DECAY,
            flash_snap: FLASH_SNAP,
            flash_overlay_scale: FLASH_OVERLAY_SCALE,
            ambient_batch: AMBIENT_BATCH,
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TickStats {
    pub regions: [StepStats; REGION_COUNT],
    /// Regions that drew a flash overlay this tick.
    pub flashes: usize,
}

impl TickStats {
    pub fn total(&self) -> StepStats {
        let mut sum = StepStats::default();
        for s in self.regions {
            sum += s;
        }
        sum
    }
}

#[derive(Debug)]
struct RegionLane {
    pool: EffectPool,
    flash: Flash,
    extent: Vec2,
}

impl Default for RegionLane {
    fn default() -> Self {
        Self {
            pool: EffectPool::new(),
            flash: Flash::default(),
            extent: Vec2::from_array(DEFAULT_SURFACE_SIZE),
        }
    }
}

/// All mutable engine state. Single-threaded: the host calls
/// [`Engine::trigger`] from input handlers and [`Engine::tick`] once per
/// frame on the same thread.
pub struct Engine<R: RandomSource = SeededRandom> {
    config: EngineConfig,
    lanes: [RegionLane; REGION_COUNT],
    rng: R,
}

impl<R: RandomSource> Engine<R> {
    pub fn new(config: EngineConfig, rng: R) -> Self {
        Self {
            config,
            lanes: Default::default(),
            rng,
        }
    }

    #[inline]
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Tone, flash, headline and ambient batch for `region`. Existing effects
    /// are left alone.
    pub fn trigger(&mut self, region: Region, now_ms: f64, tones: &mut dyn TonePlayer) {
        // drawn even when nobody is listening, so layouts do not depend on audio
        let roll = self.rng.next_f32();
        tones.play(region, roll);

        let lane = &mut self.lanes[region.index()];
        lane.flash.fire();

        let headline = dispatch::choose_headline(region.theme(), &mut self.rng);
        let effect = dispatch::build_headline(region, headline, now_ms, lane.extent, &mut self.rng);
        lane.pool.push(effect);
        let ambient = dispatch::build_ambient(
            region,
            now_ms,
            lane.extent,
            self.config.ambient_batch,
            &mut self.rng,
        );
        lane.pool.extend(ambient);
        log::debug!(
            "trigger {} -> {:?}, {} live",
            region.name(),
            headline,
            lane.pool.len()
        );
    }

    /// Run one frame over all regions. `surfaces` is indexed by
    /// [`Region::index`].
    pub fn tick<S: Surface>(&mut self, now_ms: f64, surfaces: &mut [S; REGION_COUNT]) -> TickStats {
        let mut stats = TickStats::default();
        for region in Region::ALL {
            let i = region.index();
            let (step, flashed) = self.tick_region(region, now_ms, &mut surfaces[i]);
            stats.regions[i] = step;
            stats.flashes += flashed as usize;
        }
        stats
    }

    /// One region's frame: clear, idle layer, flash overlay, then effects.
    /// Returns the pool counters and whether a flash was drawn.
    pub fn tick_region(
        &mut self,
        region: Region,
        now_ms: f64,
        surface: &mut dyn Surface,
    ) -> (StepStats, bool) {
        let cfg = self.config;
        let lane = &mut self.lanes[region.index()];
        lane.extent = surface.size();

        if let Err(err) = surface.clear() {
            log::warn!("clearing {} failed: {err}", region.name());
        }
        if let Err(err) = idle::render_idle(region, surface, now_ms) {
            log::warn!("idle layer for {} failed: {err}", region.name());
        }

        let flashed = match lane.flash.decay(cfg.flash_decay, cfg.flash_snap) {
            Some(level) => {
                let mut s = with_alpha(surface, level * cfg.flash_overlay_scale);
                if let Err(err) = s.fill_all(region.theme().flash) {
                    log::warn!("flash overlay for {} failed: {err}", region.name());
                }
                true
            }
            None => false,
        };

        (lane.pool.step(now_ms, surface), flashed)
    }

    /// Push a prebuilt effect into its region's pool.
    pub fn spawn(&mut self, effect: Effect) {
        self.lanes[effect.region().index()].pool.push(effect);
    }

    #[inline]
    pub fn pool(&self, region: Region) -> &EffectPool {
        &self.lanes[region.index()].pool
    }

    #[inline]
    pub fn flash(&self, region: Region) -> f32 {
        self.lanes[region.index()].flash.intensity()
    }

    /// Surface size the next trigger will lay effects out for.
    #[inline]
    pub fn extent(&self, region: Region) -> Vec2 {
        self.lanes[region.index()].extent
    }

    /// Record a new surface size. Live effects keep their absolute
    /// coordinates.
    pub fn resize(&mut self, region: Region, width: f32, height: f32) {
        self.lanes[region.index()].extent = Vec2::new(width, height);
    }

    pub fn live_effects(&self) -> usize {
        self.lanes.iter().map(|l| l.pool.len()).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::random::ScriptedRandom;
    use crate::record::{DrawCmd, RecordingSurface};
    use crate::tone::Silent;

    fn surfaces() -> [RecordingSurface; REGION_COUNT] {
        std::array::from_fn(|_| RecordingSurface::new(200.0, 100.0))
    }

    #[test]
    fn tick_draws_clear_idle_flash_then_effects() {
        let mut engine = Engine::new(EngineConfig::default(), ScriptedRandom::constant(0.5));
        engine.trigger(Region::Ocean, 0.0, &mut Silent);
        let mut s = surfaces();
        let stats = engine.tick(16.0, &mut s);
        assert_eq!(stats.flashes, 1);
        assert_eq!(
            stats.regions[Region::Ocean.index()].drawn,
            1 + engine.config().ambient_batch
        );

        let ocean = s[Region::Ocean.index()].commands();
        assert_eq!(ocean[0], DrawCmd::Clear);
        // background fill straight after clear
        assert!(matches!(ocean[1], DrawCmd::Rect { alpha, .. } if alpha == 1.0));
        let flash = ocean
            .iter()
            .position(|c| matches!(c, DrawCmd::Rect { alpha, .. } if (*alpha - FLASH_OVERLAY_SCALE).abs() < 1e-6));
        assert!(flash.is_some());
        assert_eq!(s[Region::Ocean.index()].alpha(), 1.0);
    }

    #[test]
    fn tick_tracks_surface_size() {
        let mut engine = Engine::new(EngineConfig::default(), ScriptedRandom::constant(0.5));
        let mut s = surfaces();
        s[1].resize(50.0, 20.0);
        engine.tick(0.0, &mut s);
        assert_eq!(engine.extent(Region::Sky), Vec2::new(50.0, 20.0));
        engine.resize(Region::Sky, 80.0, 60.0);
        assert_eq!(engine.extent(Region::Sky), Vec2::new(80.0, 60.0));
    }
}

use super::figures::{self, Facing};
use crate::color::Rgba;
use crate::surface::{with_alpha, Surface, SurfaceError};
use glam::Vec2;

/// Figure that crosses the whole surface once over its lifetime.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Traveler {
    /// Swims horizontally in `direction`.
    Fish,
    /// Climbs from the bottom edge to beyond the top.
    Rocket,
    /// Falls diagonally from the top edge.
    Comet,
}

impl Traveler {
    pub fn label(self) -> &'static str {
        match self {
            Traveler::Fish => "fish",
            Traveler::Rocket => "rocket",
            Traveler::Comet => "comet",
        }
    }

    // (wobble amplitude as a fraction of size, phase step per tick)
    fn oscillation(self) -> (f32, f32) {
        match self {
            Traveler::Fish => (0.5, 0.12),
            Traveler::Rocket => (0.15, 0.3),
            Traveler::Comet => (0.1, 0.08),
        }
    }
}

/// Position is an explicit function of progress and surface extent plus an
/// oscillation driven by a phase that keeps accumulating across ticks.
#[derive(Clone, Debug)]
pub struct Traversal {
    pub traveler: Traveler,
    /// +1 or -1 along the horizontal axis.
    pub direction: f32,
    /// Fraction of the cross axis the path runs along.
    pub lane: f32,
    pub amplitude: f32,
    pub phase: f32,
    pub phase_step: f32,
    pub size: f32,
    pub color: Rgba,
}

impl Traversal {
    pub fn new(traveler: Traveler, direction: f32, lane: f32, size: f32, color: Rgba) -> Self {
        let (amp, step) = traveler.oscillation();
        Self {
            traveler,
            direction: if direction < 0.0 { -1.0 } else { 1.0 },
            lane: lane.clamp(0.0, 1.0),
            amplitude: amp * size,
            phase: 0.0,
            phase_step: step,
            size,
            color,
        }
    }

    pub(crate) fn advance(&mut self) {
        self.phase += self.phase_step;
    }

    /// Path point ignoring the oscillation.
    fn path(&self, progress: f32, extent: Vec2) -> Vec2 {
        let margin = self.size * 1.2;
        let sweep = |len: f32| -margin + progress * (len + 2.0 * margin);
        let across = |x: f32| if self.direction > 0.0 { x } else { extent.x - x };
        match self.traveler {
            Traveler::Fish => Vec2::new(across(sweep(extent.x)), self.lane * extent.y),
            Traveler::Rocket => Vec2::new(self.lane * extent.x, extent.y - sweep(extent.y)),
            Traveler::Comet => {
                let depth = extent.y * (0.4 + 0.6 * self.lane);
                Vec2::new(across(sweep(extent.x)), -margin + progress * (depth + margin))
            }
        }
    }

    pub fn position(&self, progress: f32, extent: Vec2) -> Vec2 {
        let wobble = self.phase.sin() * self.amplitude;
        let base = self.path(progress, extent);
        match self.traveler {
            Traveler::Rocket => base + Vec2::new(wobble, 0.0),
            Traveler::Fish | Traveler::Comet => base + Vec2::new(0.0, wobble),
        }
    }

    pub(crate) fn render(&self, surface: &mut dyn Surface, progress: f32) -> Result<(), SurfaceError> {
        let extent = surface.size();
        let pos = self.position(progress, extent);
        let facing = Facing::from_sign(self.direction);
        match self.traveler {
            Traveler::Fish => figures::fish(surface, pos, self.size, facing, self.color, self.phase),
            Traveler::Rocket => figures::rocket(surface, pos, self.size, self.color, self.phase),
            Traveler::Comet => {
                let heading = self.path((progress + 0.01).min(1.0), extent) - self.path(progress, extent);
                let fade = ((1.0 - progress) / 0.2).min(1.0);
                let mut s = with_alpha(surface, fade);
                figures::comet(&mut *s, pos, heading, self.size, self.color, self.phase)
            }
        }
    }
}

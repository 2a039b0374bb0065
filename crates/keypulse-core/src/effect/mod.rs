//! Time-bounded, self-animating visual objects.
//!
//! An [`Effect`] couples a [`Lifetime`] with one motion law from
//! [`EffectKind`]. The lifetime alone decides retirement: progress is derived
//! from the host timestamp on every call, never accumulated, so a host that
//! skips or bunches ticks sees the same expiry times.

mod burst;
mod figures;
mod overlay;
mod particle;
mod traversal;
mod walker;

pub use burst::{Burst, BurstStyle, Spark, BURST_SPARKS};
pub use figures::Facing;
pub use overlay::{Envelope, Overlay, OverlayStyle};
pub use particle::Particle;
pub use traversal::{Traversal, Traveler};
pub use walker::{Critter, Walker};

use crate::region::Region;
use crate::surface::{Surface, SurfaceError};

/// Creation time plus duration, both in host milliseconds.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Lifetime {
    born_ms: f64,
    duration_ms: f64,
    terminal: bool,
}

impl Lifetime {
    pub fn new(born_ms: f64, duration_ms: f64) -> Self {
        Self {
            born_ms,
            duration_ms: duration_ms.max(1.0),
            terminal: false,
        }
    }

    #[inline]
    pub fn born_ms(&self) -> f64 {
        self.born_ms
    }

    #[inline]
    pub fn duration_ms(&self) -> f64 {
        self.duration_ms
    }

    #[inline]
    pub fn expires_at_ms(&self) -> f64 {
        self.born_ms + self.duration_ms
    }

    /// Elapsed / duration, clamped to \[0, 1\].
    #[inline]
    pub fn progress(&self, now_ms: f64) -> f32 {
        ((now_ms - self.born_ms) / self.duration_ms).clamp(0.0, 1.0) as f32
    }

    /// Progress at `now_ms`, latching the terminal flag once it reaches 1.
    #[inline]
    pub fn observe(&mut self, now_ms: f64) -> f32 {
        let p = self.progress(now_ms);
        if p >= 1.0 {
            self.terminal = true;
        }
        p
    }

    #[inline]
    pub fn is_terminal(&self) -> bool {
        self.terminal
    }
}

/// Per-variant payload. Each variant owns its own motion law.
#[derive(Clone, Debug)]
pub enum EffectKind {
    Particle(Particle),
    Burst(Box<Burst>),
    Traversal(Traversal),
    Walker(Walker),
    Overlay(Overlay),
}

impl From<Particle> for EffectKind {
    fn from(p: Particle) -> Self {
        EffectKind::Particle(p)
    }
}

impl From<Burst> for EffectKind {
    fn from(b: Burst) -> Self {
        EffectKind::Burst(Box::new(b))
    }
}

impl From<Traversal> for EffectKind {
    fn from(t: Traversal) -> Self {
        EffectKind::Traversal(t)
    }
}

impl From<Walker> for EffectKind {
    fn from(w: Walker) -> Self {
        EffectKind::Walker(w)
    }
}

impl From<Overlay> for EffectKind {
    fn from(o: Overlay) -> Self {
        EffectKind::Overlay(o)
    }
}

#[derive(Clone, Debug)]
pub struct Effect {
    region: Region,
    life: Lifetime,
    kind: EffectKind,
}

impl Effect {
    pub fn new(region: Region, born_ms: f64, duration_ms: f64, kind: impl Into<EffectKind>) -> Self {
        Self {
            region,
            life: Lifetime::new(born_ms, duration_ms),
            kind: kind.into(),
        }
    }

    #[inline]
    pub fn region(&self) -> Region {
        self.region
    }

    #[inline]
    pub fn lifetime(&self) -> &Lifetime {
        &self.life
    }

    #[inline]
    pub fn kind(&self) -> &EffectKind {
        &self.kind
    }

    #[inline]
    pub fn progress(&self, now_ms: f64) -> f32 {
        self.life.progress(now_ms)
    }

    #[inline]
    pub fn is_terminal(&self) -> bool {
        self.life.is_terminal()
    }

    /// Short name of the variant, for logs.
    pub fn label(&self) -> &'static str {
        match &self.kind {
            EffectKind::Particle(_) => "particle",
            EffectKind::Burst(b) => b.style.label(),
            EffectKind::Traversal(t) => t.traveler.label(),
            EffectKind::Walker(w) => w.critter.label(),
            EffectKind::Overlay(o) => o.style.label(),
        }
    }

    /// Step the motion law by one tick and latch terminality.
    ///
    /// A terminal effect is left untouched.
    pub fn advance(&mut self, now_ms: f64) {
        if self.life.is_terminal() {
            return;
        }
        let progress = self.life.observe(now_ms);
        if self.life.is_terminal() {
            return;
        }
        match &mut self.kind {
            EffectKind::Particle(p) => p.advance(),
            EffectKind::Burst(b) => b.advance(),
            EffectKind::Traversal(t) => t.advance(),
            EffectKind::Walker(w) => w.advance(),
            EffectKind::Overlay(_) => {}
        }
        log::trace!("{} advanced to {:.3}", self.label(), progress);
    }

    /// Draw the current state. Does not mutate animation state, and leaves the
    /// surface's global alpha as it found it. Terminal effects draw nothing.
    pub fn render(&self, surface: &mut dyn Surface, now_ms: f64) -> Result<(), SurfaceError> {
        if self.life.is_terminal() {
            return Ok(());
        }
        let progress = self.life.progress(now_ms);
        match &self.kind {
            EffectKind::Particle(p) => p.render(surface, progress),
            EffectKind::Burst(b) => b.render(surface, progress, now_ms),
            EffectKind::Traversal(t) => t.render(surface, progress),
            EffectKind::Walker(w) => w.render(surface, progress),
            EffectKind::Overlay(o) => o.render(surface, progress, now_ms),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn progress_clamps_and_latches_terminal() {
        let mut life = Lifetime::new(1000.0, 500.0);
        assert_eq!(life.progress(900.0), 0.0);
        assert_eq!(life.observe(1250.0), 0.5);
        assert!(!life.is_terminal());
        assert_eq!(life.observe(1500.0), 1.0);
        assert!(life.is_terminal());
        assert_eq!(life.progress(9000.0), 1.0);
    }

    #[test]
    fn zero_duration_is_clamped() {
        let life = Lifetime::new(0.0, 0.0);
        assert_eq!(life.duration_ms(), 1.0);
        assert_eq!(life.progress(1.0), 1.0);
    }
}

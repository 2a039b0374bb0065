//! Per-region highlight pulse.

/// Intensity in \[0, 1\]. Firing overwrites; it never accumulates.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Flash {
    intensity: f32,
}

impl Flash {
    #[inline]
    pub fn fire(&mut self) {
        self.intensity = 1.0;
    }

    #[inline]
    pub fn intensity(&self) -> f32 {
        self.intensity
    }

    #[inline]
    pub fn is_dark(&self) -> bool {
        self.intensity <= 0.0
    }

    /// Returns the intensity to draw this tick, then decays it by `factor`.
    /// Once the decayed value drops below `snap` it reads exactly 0.
    pub fn decay(&mut self, factor: f32, snap: f32) -> Option<f32> {
        if self.is_dark() {
            return None;
        }
        let shown = self.intensity;
        let next = shown * factor;
        self.intensity = if next < snap { 0.0 } else { next };
        Some(shown)
    }
}

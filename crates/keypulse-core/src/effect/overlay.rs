use crate::color::Rgba;
use crate::shapes;
use crate::surface::{with_alpha, Surface, SurfaceError};
use glam::Vec2;
use std::f32::consts::PI;

const RAINBOW: [u32; 7] = [0xff595e, 0xff924c, 0xffca3a, 0x8ac926, 0x1982c4, 0x4267ac, 0x6a4c93];

/// Intensity as a function of progress alone.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Envelope {
    /// `sin(progress * PI)`: zero at both ends, peak at the middle.
    Sine,
    /// `1 - progress`.
    Linear,
}

impl Envelope {
    #[inline]
    pub fn intensity(self, progress: f32) -> f32 {
        let p = progress.clamp(0.0, 1.0);
        match self {
            Envelope::Sine => (p * PI).sin().max(0.0),
            Envelope::Linear => 1.0 - p,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum OverlayStyle {
    /// Large centred text.
    Banner { text: &'static str, color: Rgba },
    /// Full-surface colour wash.
    Wash { color: Rgba },
    /// Concentric arcs rising from below the bottom edge.
    Rainbow,
}

impl OverlayStyle {
    pub fn label(&self) -> &'static str {
        match self {
            OverlayStyle::Banner { .. } => "banner",
            OverlayStyle::Wash { .. } => "wash",
            OverlayStyle::Rainbow => "rainbow",
        }
    }
}

/// Effect without spatial kinematics; only its intensity changes.
#[derive(Clone, Debug)]
pub struct Overlay {
    pub style: OverlayStyle,
    pub envelope: Envelope,
}

impl Overlay {
    pub fn banner(text: &'static str, color: Rgba) -> Self {
        Self {
            style: OverlayStyle::Banner { text, color },
            envelope: Envelope::Sine,
        }
    }

    pub fn wash(color: Rgba) -> Self {
        Self {
            style: OverlayStyle::Wash { color },
            envelope: Envelope::Linear,
        }
    }

    pub fn rainbow() -> Self {
        Self {
            style: OverlayStyle::Rainbow,
            envelope: Envelope::Sine,
        }
    }

    pub(crate) fn render(
        &self,
        surface: &mut dyn Surface,
        progress: f32,
        now_ms: f64,
    ) -> Result<(), SurfaceError> {
        let k = self.envelope.intensity(progress);
        if k <= 0.0 {
            return Ok(());
        }
        let mut s = with_alpha(surface, k);
        let (w, h) = (s.width(), s.height());
        match &self.style {
            OverlayStyle::Banner { text, color } => {
                let chars = text.chars().count().max(1) as f32;
                let size = (h * 0.22).min(w / (chars * 0.9));
                let center = Vec2::new(w * 0.5, h * 0.5);
                // tint cycles with wall-clock time
                let tint = Rgba::hsl((now_ms * 0.05) as f32, 0.8, 0.75);
                let shadow = Vec2::splat(size * 0.06);
                s.fill_text(text, center + shadow, size, Rgba::new(0.0, 0.0, 0.0, 0.45))?;
                s.fill_text(text, center, size, color.lerp(tint, 0.3))?;
            }
            OverlayStyle::Wash { color } => {
                s.fill_all(color.scale_alpha(0.6))?;
            }
            OverlayStyle::Rainbow => {
                let center = Vec2::new(w * 0.5, h * 1.05);
                let band = (w.min(h) * 0.05).max(2.0);
                let outer = w.min(h * 1.6) * 0.48;
                for (i, hex) in RAINBOW.iter().enumerate() {
                    let r = outer - i as f32 * band;
                    if r <= 0.0 {
                        break;
                    }
                    let arc = shapes::arc(center, r, PI, 2.0 * PI, 40);
                    s.stroke_polyline(&arc, band, Rgba::hex(*hex))?;
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::RecordingSurface;

    #[test]
    fn sine_envelope_rises_then_falls() {
        let e = Envelope::Sine;
        assert!(e.intensity(0.0).abs() < 1e-6);
        assert!((e.intensity(0.5) - 1.0).abs() < 1e-6);
        assert!(e.intensity(1.0).abs() < 1e-6);
        assert!(e.intensity(0.25) < e.intensity(0.5));
        assert!(e.intensity(0.75) < e.intensity(0.5));
    }

    #[test]
    fn banner_draws_its_text_until_the_envelope_closes() {
        let banner = Overlay::banner("GOOD NIGHT", Rgba::WHITE);
        let mut s = RecordingSurface::new(320.0, 240.0);
        banner.render(&mut s, 0.5, 0.0).unwrap();
        // drop shadow, then the text itself
        assert_eq!(s.text_drawn().collect::<Vec<_>>(), ["GOOD NIGHT", "GOOD NIGHT"]);
        assert_eq!(s.alpha(), 1.0);

        let mut done = RecordingSurface::new(320.0, 240.0);
        banner.render(&mut done, 0.0, 0.0).unwrap();
        assert_eq!(done.text_drawn().count(), 0);
    }

    #[test]
    fn linear_envelope_fades_out() {
        let e = Envelope::Linear;
        assert_eq!(e.intensity(0.0), 1.0);
        assert_eq!(e.intensity(0.25), 0.75);
        assert_eq!(e.intensity(1.0), 0.0);
    }
}

//! Static per-region design data: palette, timbre, headline weights and the
//! ambient particle style.

use crate::color::Rgba;
use crate::region::Region;
use crate::shapes::Shape;
use crate::tone::{TimbreProfile, Waveform};

/// Large effect chosen by weighted roll on every trigger.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Headline {
    BunnyWalker,
    PetalBloom,
    Firework,
    Rocket,
    Rainbow,
    Fish,
    Bubbles,
    TideWash,
    Comet,
    CatWalker,
    NameBanner,
}

impl Headline {
    /// Lifetime of the effect this headline builds.
    pub const fn lifetime_ms(self) -> f64 {
        match self {
            Headline::BunnyWalker => 4000.0,
            Headline::PetalBloom => 1800.0,
            Headline::Firework => 2000.0,
            Headline::Rocket => 2500.0,
            Headline::Rainbow => 3000.0,
            Headline::Fish => 4000.0,
            Headline::Bubbles => 2600.0,
            Headline::TideWash => 1500.0,
            Headline::Comet => 2200.0,
            Headline::CatWalker => 5000.0,
            Headline::NameBanner => 2000.0,
        }
    }
}

/// Small decaying particles pushed alongside every headline.
#[derive(Clone, Copy, Debug)]
pub struct Ambient {
    pub shapes: &'static [Shape],
    /// Per-tick vertical acceleration; negative rises.
    pub gravity: f32,
    pub speed: (f32, f32),
    pub size: (f32, f32),
    pub lifetime_ms: (f64, f64),
    pub spin: f32,
}

/// Background drawn by the idle renderer.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum IdleLayer {
    Grass,
    Clouds,
    Waves,
    Stars,
}

#[derive(Debug)]
pub struct Theme {
    pub region: Region,
    /// Base fill under the idle layer.
    pub background: Rgba,
    /// Accent colours for effects.
    pub palette: &'static [Rgba],
    pub flash: Rgba,
    pub timbre: TimbreProfile,
    pub headlines: &'static [(Headline, u32)],
    pub ambient: Ambient,
    pub idle: IdleLayer,
    pub banner: &'static str,
}

impl Theme {
    pub fn headline_weights(&self) -> impl Iterator<Item = u32> + '_ {
        self.headlines.iter().map(|(_, w)| *w)
    }
}

static MEADOW: Theme = Theme {
    region: Region::Meadow,
    background: Rgba::hex(0x9fd88a),
    palette: &[
        Rgba::hex(0xff8fab),
        Rgba::hex(0xffd166),
        Rgba::hex(0xf6f7f2),
        Rgba::hex(0xc77dff),
    ],
    flash: Rgba::hex(0xfff4c2),
    timbre: TimbreProfile {
        octave: 0,
        waveform: Waveform::Triangle,
        attack_s: 0.010,
        decay_s: 0.6,
        cutoff_hz: 2400.0,
    },
    headlines: &[(Headline::BunnyWalker, 50), (Headline::PetalBloom, 50)],
    ambient: Ambient {
        shapes: &[Shape::Heart, Shape::Pentagon],
        gravity: 0.08,
        speed: (1.0, 3.5),
        size: (5.0, 10.0),
        lifetime_ms: (900.0, 1400.0),
        spin: 0.05,
    },
    idle: IdleLayer::Grass,
    banner: "MEADOW",
};

static SKY: Theme = Theme {
    region: Region::Sky,
    background: Rgba::hex(0x7cc6f2),
    palette: &[
        Rgba::hex(0xffffff),
        Rgba::hex(0xffe066),
        Rgba::hex(0xff6b6b),
        Rgba::hex(0x4d96ff),
    ],
    flash: Rgba::hex(0xffffff),
    timbre: TimbreProfile {
        octave: 1,
        waveform: Waveform::Sine,
        attack_s: 0.005,
        decay_s: 0.9,
        cutoff_hz: 5000.0,
    },
    headlines: &[(Headline::Firework, 30), (Headline::Rocket, 30), (Headline::Rainbow, 40)],
    ambient: Ambient {
        shapes: &[Shape::Circle],
        gravity: 0.03,
        speed: (1.0, 3.0),
        size: (3.0, 7.0),
        lifetime_ms: (800.0, 1200.0),
        spin: 0.0,
    },
    idle: IdleLayer::Clouds,
    banner: "SKY",
};

static OCEAN: Theme = Theme {
    region: Region::Ocean,
    background: Rgba::hex(0x1d5c8c),
    palette: &[
        Rgba::hex(0xff9f1c),
        Rgba::hex(0x2ec4b6),
        Rgba::hex(0xcbf3f0),
        Rgba::hex(0xffbf69),
    ],
    flash: Rgba::hex(0x9be7ff),
    timbre: TimbreProfile {
        octave: -1,
        waveform: Waveform::Sine,
        attack_s: 0.040,
        decay_s: 1.2,
        cutoff_hz: 900.0,
    },
    headlines: &[(Headline::Fish, 30), (Headline::Bubbles, 30), (Headline::TideWash, 40)],
    ambient: Ambient {
        shapes: &[Shape::Circle],
        gravity: -0.05,
        speed: (0.5, 1.8),
        size: (3.0, 8.0),
        lifetime_ms: (1000.0, 1600.0),
        spin: 0.0,
    },
    idle: IdleLayer::Waves,
    banner: "OCEAN",
};

static NIGHT: Theme = Theme {
    region: Region::Night,
    background: Rgba::hex(0x14123a),
    palette: &[
        Rgba::hex(0xfff3b0),
        Rgba::hex(0xb8c0ff),
        Rgba::hex(0xffc8dd),
        Rgba::hex(0x9d8df1),
    ],
    flash: Rgba::hex(0xd6ccff),
    timbre: TimbreProfile {
        octave: 0,
        waveform: Waveform::Sawtooth,
        attack_s: 0.020,
        decay_s: 1.0,
        cutoff_hz: 1200.0,
    },
    headlines: &[(Headline::Comet, 30), (Headline::CatWalker, 30), (Headline::NameBanner, 40)],
    ambient: Ambient {
        shapes: &[Shape::Star],
        gravity: 0.02,
        speed: (0.8, 2.5),
        size: (4.0, 9.0),
        lifetime_ms: (900.0, 1500.0),
        spin: 0.08,
    },
    idle: IdleLayer::Stars,
    banner: "GOOD NIGHT",
};

pub fn theme(region: Region) -> &'static Theme {
    match region {
        Region::Meadow => &MEADOW,
        Region::Sky => &SKY,
        Region::Ocean => &OCEAN,
        Region::Night => &NIGHT,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::MAX_EFFECT_LIFETIME_MS;

    #[test]
    fn themes_match_their_region() {
        for r in Region::ALL {
            assert_eq!(theme(r).region, r);
            assert!(!theme(r).palette.is_empty());
            assert!(!theme(r).ambient.shapes.is_empty());
        }
    }

    #[test]
    fn headline_weights_sum_to_100() {
        for r in Region::ALL {
            assert_eq!(theme(r).headline_weights().sum::<u32>(), 100, "{}", r.name());
        }
    }

    #[test]
    fn every_lifetime_is_bounded() {
        for r in Region::ALL {
            let t = theme(r);
            for (h, _) in t.headlines {
                assert!(h.lifetime_ms() <= MAX_EFFECT_LIFETIME_MS);
            }
            assert!(t.ambient.lifetime_ms.1 <= MAX_EFFECT_LIFETIME_MS);
        }
    }
}

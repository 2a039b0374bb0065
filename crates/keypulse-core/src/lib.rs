//! Platform-free core of keypulse: regions, effects, the per-region effect
//! pools and the scheduler tick, plus tone parameterization shared by the
//! web and native front-ends.
//!
//! Nothing in this crate reads the wall clock. Every time-dependent call takes
//! the host timestamp in milliseconds, and every random decision goes through
//! a [`RandomSource`], so an [`Engine`] is a pure function of its state, the
//! timestamps it is fed and the rolls it is given.

pub mod color;
pub mod constants;
pub mod dispatch;
pub mod effect;
pub mod engine;
pub mod flash;
pub mod idle;
pub mod keymap;
pub mod pool;
pub mod random;
pub mod raster;
pub mod record;
pub mod region;
pub mod shapes;
pub mod surface;
pub mod synth;
pub mod theme;
pub mod tone;

pub use color::Rgba;
pub use constants::*;
pub use effect::{Effect, EffectKind, Lifetime};
pub use engine::{Engine, EngineConfig, TickStats};
pub use flash::Flash;
pub use keymap::KeyMap;
pub use pool::{EffectPool, StepStats};
pub use random::{RandomSource, ScriptedRandom, SeededRandom};
pub use raster::PixelSurface;
pub use record::{DrawCmd, RecordingSurface};
pub use region::Region;
pub use surface::{Surface, SurfaceError};
pub use synth::ToneMixer;
pub use theme::{Ambient, Headline, IdleLayer, Theme};
pub use tone::{
    midi_to_hz, Silent, TimbreProfile, ToneError, TonePlayer, ToneSink, ToneSpec,
    ToneSynthesizer, Waveform,
};

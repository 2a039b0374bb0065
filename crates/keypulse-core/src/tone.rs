//! Tone parameterization and the fire-and-forget playback seam.
//!
//! The core never produces audio itself. [`ToneSpec::plan`] turns a region's
//! [`TimbreProfile`] into one concrete tone, and a platform [`ToneSink`]
//! (WebAudio on the web, the cpal-fed [`crate::ToneMixer`] natively) plays
//! it. Until the host arms a sink, [`ToneSynthesizer`] swallows requests.

use crate::constants::{C_MAJOR_PENTATONIC, MAX_TONE_PEAK, ROOT_MIDI};
use crate::region::Region;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Waveform {
    Sine,
    Triangle,
    Square,
    Sawtooth,
}

impl Waveform {
    /// One sample at `phase` cycles (only the fractional part matters),
    /// in \[-1, 1\].
    #[inline]
    pub fn sample(self, phase: f32) -> f32 {
        let p = phase.fract();
        match self {
            Waveform::Sine => (p * std::f32::consts::TAU).sin(),
            Waveform::Triangle => 4.0 * (p - 0.5).abs() - 1.0,
            Waveform::Square => {
                if p < 0.5 {
                    1.0
                } else {
                    -1.0
                }
            }
            Waveform::Sawtooth => 2.0 * p - 1.0,
        }
    }
}

/// Immutable per-region synthesis parameters.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TimbreProfile {
    /// Octave shift applied to the shared pitch palette.
    pub octave: i32,
    pub waveform: Waveform,
    pub attack_s: f32,
    pub decay_s: f32,
    /// Low-pass cutoff.
    pub cutoff_hz: f32,
}

#[inline]
pub fn midi_to_hz(midi: f32) -> f32 {
    440.0 * 2f32.powf((midi - 69.0) / 12.0)
}

/// One concrete tone ready for a sink.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ToneSpec {
    pub frequency_hz: f32,
    pub waveform: Waveform,
    pub attack_s: f32,
    pub decay_s: f32,
    pub cutoff_hz: f32,
    pub peak: f32,
}

impl ToneSpec {
    /// Pick a pentatonic degree with `roll` in \[0, 1) and shift it into the
    /// profile's register.
    pub fn plan(profile: &TimbreProfile, roll: f32) -> Self {
        let n = C_MAJOR_PENTATONIC.len();
        let degree = C_MAJOR_PENTATONIC[((roll.clamp(0.0, 1.0) * n as f32) as usize).min(n - 1)];
        let midi = ROOT_MIDI + 12 * profile.octave + degree;
        Self {
            frequency_hz: midi_to_hz(midi as f32),
            waveform: profile.waveform,
            attack_s: profile.attack_s.max(0.001),
            decay_s: profile.decay_s.max(0.01),
            cutoff_hz: profile.cutoff_hz,
            peak: MAX_TONE_PEAK,
        }
    }

    #[inline]
    pub fn duration_s(&self) -> f32 {
        self.attack_s + self.decay_s
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ToneError {
    #[error("audio backend failed to {op}: {detail}")]
    Backend { op: &'static str, detail: String },
    #[error("no audio output device")]
    NoDevice,
}

/// Platform audio output. `start` schedules one tone and returns at once.
pub trait ToneSink {
    fn start(&mut self, spec: &ToneSpec) -> Result<(), ToneError>;
}

/// What the engine calls on every trigger. No handle is returned and nothing
/// is awaited. `roll` in \[0, 1) picks the pitch; the caller draws it whether
/// or not anything is listening.
pub trait TonePlayer {
    fn play(&mut self, region: Region, roll: f32);
}

/// Player that never makes a sound.
#[derive(Clone, Copy, Debug, Default)]
pub struct Silent;

impl TonePlayer for Silent {
    fn play(&mut self, _region: Region, _roll: f32) {}
}

/// Gate in front of a [`ToneSink`] that only exists once audio is armed.
pub struct ToneSynthesizer<K> {
    sink: Option<K>,
}

impl<K> Default for ToneSynthesizer<K> {
    fn default() -> Self {
        Self { sink: None }
    }
}

impl<K: ToneSink> ToneSynthesizer<K> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build the sink on first call. Later calls do nothing and return
    /// `Ok(false)`; `factory` is not invoked again.
    pub fn arm<F>(&mut self, factory: F) -> Result<bool, ToneError>
    where
        F: FnOnce() -> Result<K, ToneError>,
    {
        if self.sink.is_some() {
            return Ok(false);
        }
        self.sink = Some(factory()?);
        log::info!("audio armed");
        Ok(true)
    }

    #[inline]
    pub fn is_armed(&self) -> bool {
        self.sink.is_some()
    }

    pub fn sink(&self) -> Option<&K> {
        self.sink.as_ref()
    }
}

impl<K: ToneSink> TonePlayer for ToneSynthesizer<K> {
    fn play(&mut self, region: Region, roll: f32) {
        let Some(sink) = self.sink.as_mut() else {
            log::trace!("tone for {} dropped, audio not armed", region.name());
            return;
        };
        let spec = ToneSpec::plan(&region.theme().timbre, roll);
        if let Err(err) = sink.start(&spec) {
            log::debug!("tone for {} not started: {err}", region.name());
        }
    }
}

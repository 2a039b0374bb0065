//! Sample-domain tone mixer for hosts that pull raw audio buffers.
//!
//! Voices are independent: linear attack to the tone's peak, exponential
//! decay toward silence, one-pole low-pass at the profile cutoff. The summed
//! signal goes through `MASTER_CEILING * tanh(x / MASTER_CEILING)`, so no
//! number of overlapping tones can push the output past the ceiling.

use crate::constants::MASTER_CEILING;
use crate::tone::ToneSpec;
use std::f32::consts::TAU;

// Level the exponential decay reaches at the end of `decay_s`.
const DECAY_FLOOR: f32 = 1e-4;

#[derive(Clone, Debug)]
struct Voice {
    spec: ToneSpec,
    phase: f32,
    age: u32,
    lowpass: f32,
    coeff: f32,
}

impl Voice {
    fn new(spec: ToneSpec, sample_rate: f32) -> Self {
        let cutoff = spec.cutoff_hz.clamp(20.0, sample_rate * 0.45);
        Self {
            spec,
            phase: 0.0,
            age: 0,
            lowpass: 0.0,
            coeff: 1.0 - (-TAU * cutoff / sample_rate).exp(),
        }
    }

    fn envelope(&self, t: f32) -> f32 {
        let s = &self.spec;
        if t < s.attack_s {
            s.peak * t / s.attack_s
        } else {
            let k = ((t - s.attack_s) / s.decay_s).min(1.0);
            s.peak * DECAY_FLOOR.powf(k)
        }
    }

    fn finished(&self, sample_rate: f32) -> bool {
        self.age as f32 / sample_rate >= self.spec.duration_s()
    }

    fn next(&mut self, sample_rate: f32) -> f32 {
        let t = self.age as f32 / sample_rate;
        let raw = self.spec.waveform.sample(self.phase);
        self.lowpass += self.coeff * (raw - self.lowpass);
        self.phase = (self.phase + self.spec.frequency_hz / sample_rate).fract();
        self.age = self.age.saturating_add(1);
        self.lowpass * self.envelope(t)
    }
}

pub struct ToneMixer {
    sample_rate: f32,
    voices: Vec<Voice>,
}

impl ToneMixer {
    pub fn new(sample_rate: f32) -> Self {
        Self {
            sample_rate: sample_rate.max(1.0),
            voices: Vec::new(),
        }
    }

    #[inline]
    pub fn sample_rate(&self) -> f32 {
        self.sample_rate
    }

    pub fn start(&mut self, spec: ToneSpec) {
        self.voices.push(Voice::new(spec, self.sample_rate));
    }

    #[inline]
    pub fn active_voices(&self) -> usize {
        self.voices.len()
    }

    /// Next mono sample in \[-MASTER_CEILING, MASTER_CEILING\].
    pub fn next_sample(&mut self) -> f32 {
        let sr = self.sample_rate;
        let sum: f32 = self.voices.iter_mut().map(|v| v.next(sr)).sum();
        self.voices.retain(|v| !v.finished(sr));
        MASTER_CEILING * (sum / MASTER_CEILING).tanh()
    }

    /// Fill an interleaved buffer, copying the mono signal to every channel.
    pub fn fill(&mut self, out: &mut [f32], channels: usize) {
        for frame in out.chunks_mut(channels.max(1)) {
            let s = self.next_sample();
            frame.fill(s);
        }
    }
}

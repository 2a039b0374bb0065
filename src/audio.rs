//! WebAudio tone sink: one oscillator -> low-pass -> envelope gain per tone,
//! all feeding a master gain and an arctan limiter.

use crate::constants::*;
use crate::shaping::limiter_curve;
use keypulse_core::{ToneError, ToneSink, ToneSpec, Waveform, MASTER_CEILING};
use wasm_bindgen::JsValue;
use web_sys as web;

fn js_err(op: &'static str) -> impl FnOnce(JsValue) -> ToneError {
    move |e| ToneError::Backend {
        op,
        detail: format!("{:?}", e),
    }
}

fn create_gain(audio_ctx: &web::AudioContext, value: f32) -> Result<web::GainNode, ToneError> {
    let g = web::GainNode::new(audio_ctx).map_err(js_err("create GainNode"))?;
    g.gain().set_value(value);
    Ok(g)
}

fn oscillator_type(w: Waveform) -> web::OscillatorType {
    match w {
        Waveform::Sine => web::OscillatorType::Sine,
        Waveform::Triangle => web::OscillatorType::Triangle,
        Waveform::Square => web::OscillatorType::Square,
        Waveform::Sawtooth => web::OscillatorType::Sawtooth,
    }
}

pub struct WebToneSink {
    audio_ctx: web::AudioContext,
    master: web::GainNode,
}

impl WebToneSink {
    /// Must run inside a user gesture, or the context starts suspended.
    pub fn new() -> Result<Self, ToneError> {
        let audio_ctx = web::AudioContext::new().map_err(js_err("create AudioContext"))?;
        let master = create_gain(&audio_ctx, MASTER_GAIN)?;

        let limiter = web::WaveShaperNode::new(&audio_ctx).map_err(js_err("create WaveShaperNode"))?;
        let curve = limiter_curve(LIMITER_CURVE_LEN, LIMITER_DRIVE, MASTER_CEILING);
        limiter.set_curve_opt_f32_array(Some(&js_sys::Float32Array::from(curve.as_slice())));

        master
            .connect_with_audio_node(&limiter)
            .map_err(js_err("connect master"))?;
        limiter
            .connect_with_audio_node(&audio_ctx.destination())
            .map_err(js_err("connect limiter"))?;

        let sink = Self { audio_ctx, master };
        sink.resume();
        log::info!("WebAudio ready at {} Hz", sink.audio_ctx.sample_rate());
        Ok(sink)
    }

    /// Resume a context the browser suspended. Safe to call repeatedly.
    pub fn resume(&self) {
        if self.audio_ctx.state() == web::AudioContextState::Suspended {
            if let Err(e) = self.audio_ctx.resume() {
                log::warn!("AudioContext resume failed: {:?}", e);
            }
        }
    }
}

impl ToneSink for WebToneSink {
    fn start(&mut self, spec: &ToneSpec) -> Result<(), ToneError> {
        let ctx = &self.audio_ctx;
        let osc = web::OscillatorNode::new(ctx).map_err(js_err("create OscillatorNode"))?;
        osc.set_type(oscillator_type(spec.waveform));
        osc.frequency().set_value(spec.frequency_hz);

        let filter = web::BiquadFilterNode::new(ctx).map_err(js_err("create BiquadFilterNode"))?;
        filter.set_type(web::BiquadFilterType::Lowpass);
        filter.frequency().set_value(spec.cutoff_hz);
        filter.q().set_value(FILTER_Q);

        let env = create_gain(ctx, 0.0)?;
        let t0 = ctx.current_time() + TONE_START_DELAY_SEC;
        let peak_at = t0 + spec.attack_s as f64;
        let end = peak_at + spec.decay_s as f64;
        let gain = env.gain();
        gain.set_value_at_time(0.0, t0).map_err(js_err("schedule envelope"))?;
        gain.linear_ramp_to_value_at_time(spec.peak, peak_at)
            .map_err(js_err("schedule attack"))?;
        gain.exponential_ramp_to_value_at_time(ENVELOPE_FLOOR, end)
            .map_err(js_err("schedule decay"))?;

        osc.connect_with_audio_node(&filter).map_err(js_err("connect oscillator"))?;
        filter.connect_with_audio_node(&env).map_err(js_err("connect filter"))?;
        env.connect_with_audio_node(&self.master).map_err(js_err("connect envelope"))?;

        osc.start_with_when(t0).map_err(js_err("start oscillator"))?;
        osc.stop_with_when(end + TONE_STOP_TAIL_SEC)
            .map_err(js_err("stop oscillator"))?;
        Ok(())
    }
}

// Native audio (cpal): one output stream pulling from the core ToneMixer.

use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use cpal::{FromSample, SizedSample};
use keypulse_core::{ToneError, ToneMixer, ToneSink, ToneSpec};
use std::sync::{Arc, Mutex};

fn backend<E: std::fmt::Display>(op: &'static str) -> impl FnOnce(E) -> ToneError {
    move |e| ToneError::Backend {
        op,
        detail: e.to_string(),
    }
}

/// Tone sink that owns the running output stream. Dropping it stops audio.
pub struct CpalSink {
    mixer: Arc<Mutex<ToneMixer>>,
    _stream: cpal::Stream,
}

impl CpalSink {
    pub fn open() -> Result<Self, ToneError> {
        let host = cpal::default_host();
        let device = host.default_output_device().ok_or(ToneError::NoDevice)?;
        let config = device
            .default_output_config()
            .map_err(backend("query output config"))?;
        let sample_rate = config.sample_rate().0 as f32;
        let channels = config.channels() as usize;
        let mixer = Arc::new(Mutex::new(ToneMixer::new(sample_rate)));

        let stream = match config.sample_format() {
            cpal::SampleFormat::F32 => build_stream::<f32>(&device, &config.into(), channels, mixer.clone()),
            cpal::SampleFormat::I16 => build_stream::<i16>(&device, &config.into(), channels, mixer.clone()),
            cpal::SampleFormat::U16 => build_stream::<u16>(&device, &config.into(), channels, mixer.clone()),
            other => {
                return Err(ToneError::Backend {
                    op: "open stream",
                    detail: format!("unsupported sample format {other:?}"),
                })
            }
        }
        .map_err(backend("build output stream"))?;
        stream.play().map_err(backend("start output stream"))?;
        log::info!(
            "audio output: {} ({} Hz, {} ch)",
            device.name().unwrap_or_else(|_| "unknown".into()),
            sample_rate,
            channels
        );
        Ok(Self {
            mixer,
            _stream: stream,
        })
    }
}

impl ToneSink for CpalSink {
    fn start(&mut self, spec: &ToneSpec) -> Result<(), ToneError> {
        let mut mixer = self.mixer.lock().map_err(|_| ToneError::Backend {
            op: "lock mixer",
            detail: "audio thread panicked".into(),
        })?;
        mixer.start(*spec);
        Ok(())
    }
}

fn build_stream<T>(
    device: &cpal::Device,
    config: &cpal::StreamConfig,
    channels: usize,
    mixer: Arc<Mutex<ToneMixer>>,
) -> Result<cpal::Stream, cpal::BuildStreamError>
where
    T: SizedSample + FromSample<f32>,
{
    let mut scratch: Vec<f32> = Vec::new();
    device.build_output_stream(
        config,
        move |data: &mut [T], _| {
            scratch.resize(data.len(), 0.0);
            match mixer.lock() {
                Ok(mut m) => m.fill(&mut scratch, channels),
                Err(_) => scratch.fill(0.0),
            }
            for (out, s) in data.iter_mut().zip(&scratch) {
                *out = T::from_sample(*s);
            }
        },
        |err| log::error!("audio stream error: {err}"),
        None,
    )
}

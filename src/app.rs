use crate::audio::WebToneSink;
use crate::canvas::CanvasSurface;
use crate::overlay;
use keypulse_core::{Engine, EngineConfig, KeyMap, Region, SeededRandom, ToneSynthesizer, REGION_COUNT};
use web_sys as web;

/// Everything the page's event handlers and frame loop share.
pub struct App {
    pub engine: Engine,
    pub tones: ToneSynthesizer<WebToneSink>,
    pub keymap: KeyMap,
    pub surfaces: [CanvasSurface; REGION_COUNT],
    document: web::Document,
    started: bool,
}

impl App {
    pub fn new(document: web::Document, surfaces: [CanvasSurface; REGION_COUNT]) -> Self {
        Self {
            engine: Engine::new(EngineConfig::default(), SeededRandom::from_entropy()),
            tones: ToneSynthesizer::new(),
            keymap: KeyMap::qwerty(),
            surfaces,
            document,
            started: false,
        }
    }

    /// First gesture arms audio and dismisses the start overlay. Later
    /// gestures only nudge a suspended context back to running.
    fn on_gesture(&mut self) {
        match self.tones.arm(WebToneSink::new) {
            Ok(true) => {}
            Ok(false) => {
                if let Some(sink) = self.tones.sink() {
                    sink.resume();
                }
            }
            Err(e) => log::error!("audio unavailable: {e}"),
        }
        if !self.started {
            self.started = true;
            overlay::hide(&self.document);
        }
    }

    pub fn on_key(&mut self, code: &str, now_ms: f64) {
        self.on_gesture();
        if let Some(region) = self.keymap.route(code) {
            log::debug!("key {code} -> {}", region.name());
            self.engine.trigger(region, now_ms, &mut self.tones);
        }
    }

    pub fn on_tap(&mut self, region: Region, now_ms: f64) {
        self.on_gesture();
        self.engine.trigger(region, now_ms, &mut self.tones);
    }

    pub fn frame(&mut self, now_ms: f64) {
        let stats = self.engine.tick(now_ms, &mut self.surfaces);
        let total = stats.total();
        if total.faulted > 0 {
            log::debug!("{} effects retired after render faults", total.faulted);
        }
    }
}

/// Page wiring and WebAudio tuning for the browser front-end.
///
/// Element ids must match `index.html`.
// Element ids
pub const CANVAS_ID_PREFIX: &str = "region-"; // followed by the region name
pub const START_OVERLAY_ID: &str = "start-overlay";
pub const STAGE_ID: &str = "stage"; // fullscreen target wrapping all canvases

// Master bus
pub const MASTER_GAIN: f32 = 0.8;

// Arctan limiter in front of the destination
pub const LIMITER_CURVE_LEN: usize = 2048;
pub const LIMITER_DRIVE: f32 = 1.6;

// One-shot tone scheduling (seconds)
pub const TONE_START_DELAY_SEC: f64 = 0.005; // lead so the first ramp is not in the past
pub const TONE_STOP_TAIL_SEC: f64 = 0.05; // oscillator outlives its envelope by this much
pub const ENVELOPE_FLOOR: f32 = 0.0001; // exponential ramps cannot reach 0
pub const FILTER_Q: f32 = 0.7;

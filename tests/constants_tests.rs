// Host-side tests for the web front-end's tuning constants.
// The main crate is wasm-only, so we include the pure-Rust modules directly.

#![allow(dead_code)]
mod constants {
    include!("../src/constants.rs");
}

use constants::*;

#[test]
#[allow(clippy::assertions_on_constants)]
fn audio_constants_are_within_reasonable_bounds() {
    assert!(MASTER_GAIN > 0.0 && MASTER_GAIN <= 1.0);
    assert!(LIMITER_DRIVE > 0.0);
    assert!(LIMITER_CURVE_LEN >= 256);

    // ramps must be scheduled slightly in the future and stop after the envelope
    assert!(TONE_START_DELAY_SEC > 0.0 && TONE_START_DELAY_SEC < 0.05);
    assert!(TONE_STOP_TAIL_SEC > 0.0);

    // exponential ramps reject 0 and should end inaudibly
    assert!(ENVELOPE_FLOOR > 0.0 && ENVELOPE_FLOOR < 0.001);
    assert!(FILTER_Q > 0.0);
}

#[test]
fn element_ids_are_distinct() {
    assert_ne!(START_OVERLAY_ID, STAGE_ID);
    assert!(!CANVAS_ID_PREFIX.is_empty());
    assert!(!START_OVERLAY_ID.starts_with(CANVAS_ID_PREFIX));
}

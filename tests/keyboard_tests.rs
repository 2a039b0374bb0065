// Host-side tests for pure keyboard functions.
// The main crate is wasm-only, so we include the pure-Rust modules directly.

#![allow(dead_code)]
mod keys {
    include!("../src/events/keys.rs");
}

use keys::*;
use keypulse_core::{KeyMap, Region};

#[test]
fn enter_toggles_fullscreen() {
    assert!(is_fullscreen_toggle("Enter"));
    assert!(is_fullscreen_toggle("NumpadEnter"));
    assert!(!is_fullscreen_toggle("KeyE"));
    assert!(!is_fullscreen_toggle("Space"));
}

#[test]
fn fullscreen_keys_never_reach_a_region() {
    let map = KeyMap::qwerty();
    for code in ["Enter", "NumpadEnter"] {
        assert!(is_fullscreen_toggle(code));
        assert_eq!(map.route(code), None);
    }
}

#[test]
fn modified_presses_are_left_to_the_browser() {
    assert!(is_browser_shortcut(true, false, false));
    assert!(is_browser_shortcut(false, true, false));
    assert!(is_browser_shortcut(false, false, true));
    assert!(!is_browser_shortcut(false, false, false));
}

#[test]
fn scrolling_keys_are_suppressed() {
    for code in ["Space", "ArrowDown", "Tab", "Slash"] {
        assert!(suppress_default(code), "{code}");
    }
    assert!(!suppress_default("KeyA"));
}

#[test]
fn canvas_ids_follow_region_names() {
    assert_eq!(canvas_id("region-", Region::Meadow.name()), "region-meadow");
    let ids: Vec<String> = Region::ALL.iter().map(|r| canvas_id("region-", r.name())).collect();
    for (i, a) in ids.iter().enumerate() {
        for b in &ids[i + 1..] {
            assert_ne!(a, b);
        }
    }
}

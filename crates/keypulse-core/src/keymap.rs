//! Physical key to region classification.
//!
//! Codes are `KeyboardEvent.code` names (`"KeyA"`, `"Digit1"`), which is also
//! what winit's `KeyCode` prints with `{:?}`. The keyboard is split into
//! quadrants the same shape as the screen: upper-left keys go to the
//! upper-left region, and so on.

use crate::region::Region;
use fnv::FnvHashMap;

const MEADOW_KEYS: &[&str] = &[
    "Backquote", "Digit1", "Digit2", "Digit3", "Digit4", "Digit5", "Tab", "KeyQ", "KeyW",
    "KeyE", "KeyR", "KeyT", "Escape", "F1", "F2", "F3", "F4", "F5", "F6",
];

const SKY_KEYS: &[&str] = &[
    "Digit6", "Digit7", "Digit8", "Digit9", "Digit0", "Minus", "Equal", "Backspace", "KeyY",
    "KeyU", "KeyI", "KeyO", "KeyP", "BracketLeft", "BracketRight", "Backslash", "F7", "F8",
    "F9", "F10", "F11", "F12", "ArrowUp",
];

const OCEAN_KEYS: &[&str] = &[
    "CapsLock", "KeyA", "KeyS", "KeyD", "KeyF", "KeyG", "ShiftLeft", "KeyZ", "KeyX", "KeyC",
    "KeyV", "KeyB", "ControlLeft", "AltLeft", "MetaLeft", "Space",
];

const NIGHT_KEYS: &[&str] = &[
    "KeyH", "KeyJ", "KeyK", "KeyL", "Semicolon", "Quote", "KeyN", "KeyM", "Comma", "Period",
    "Slash", "ShiftRight", "ControlRight", "AltRight", "MetaRight", "ArrowLeft", "ArrowDown",
    "ArrowRight",
];

/// Codes that never trigger a region.
const RESERVED: &[&str] = &["Enter", "NumpadEnter"];

pub struct KeyMap {
    table: FnvHashMap<&'static str, Region>,
    fallback: Region,
}

impl Default for KeyMap {
    fn default() -> Self {
        Self::qwerty()
    }
}

impl KeyMap {
    pub fn qwerty() -> Self {
        let groups = [
            (Region::Meadow, MEADOW_KEYS),
            (Region::Sky, SKY_KEYS),
            (Region::Ocean, OCEAN_KEYS),
            (Region::Night, NIGHT_KEYS),
        ];
        let mut table = FnvHashMap::default();
        for (region, keys) in groups {
            for key in keys {
                table.insert(*key, region);
            }
        }
        Self {
            table,
            fallback: Region::DEFAULT,
        }
    }

    /// Region for `code`; unknown codes go to the default region.
    pub fn classify(&self, code: &str) -> Region {
        self.table.get(code).copied().unwrap_or(self.fallback)
    }

    /// Whether `code` should trigger at all.
    pub fn is_trigger(&self, code: &str) -> bool {
        !RESERVED.contains(&code)
    }

    /// Trigger region for `code`, or `None` for reserved keys.
    pub fn route(&self, code: &str) -> Option<Region> {
        self.is_trigger(code).then(|| self.classify(code))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quadrants_follow_keyboard_layout() {
        let map = KeyMap::qwerty();
        assert_eq!(map.classify("KeyQ"), Region::Meadow);
        assert_eq!(map.classify("KeyP"), Region::Sky);
        assert_eq!(map.classify("KeyA"), Region::Ocean);
        assert_eq!(map.classify("KeyM"), Region::Night);
    }

    #[test]
    fn unknown_codes_fall_back_to_default() {
        let map = KeyMap::qwerty();
        assert_eq!(map.classify("Numpad7"), Region::DEFAULT);
        assert_eq!(map.classify(""), Region::DEFAULT);
    }

    #[test]
    fn enter_is_reserved() {
        let map = KeyMap::qwerty();
        assert_eq!(map.route("Enter"), None);
        assert_eq!(map.route("KeyH"), Some(Region::Night));
    }

    #[test]
    fn no_key_is_listed_twice() {
        let total = MEADOW_KEYS.len() + SKY_KEYS.len() + OCEAN_KEYS.len() + NIGHT_KEYS.len();
        assert_eq!(KeyMap::qwerty().table.len(), total);
    }
}

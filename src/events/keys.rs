// Pure keydown classification shared by the keyboard wiring and host tests.

/// Codes that toggle fullscreen instead of triggering a region.
#[inline]
pub fn is_fullscreen_toggle(code: &str) -> bool {
    matches!(code, "Enter" | "NumpadEnter")
}

/// Modified presses belong to the browser (copy, reload, tab switching).
#[inline]
pub fn is_browser_shortcut(ctrl: bool, meta: bool, alt: bool) -> bool {
    ctrl || meta || alt
}

/// Keys whose default action would scroll or move focus away from the page.
#[inline]
pub fn suppress_default(code: &str) -> bool {
    matches!(
        code,
        "Space" | "Tab" | "Backspace" | "ArrowUp" | "ArrowDown" | "ArrowLeft" | "ArrowRight" | "Quote" | "Slash"
    )
}

/// Element id of the canvas bound to a region.
#[inline]
pub fn canvas_id(prefix: &str, region_name: &str) -> String {
    format!("{prefix}{region_name}")
}

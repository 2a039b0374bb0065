use crate::app::App;
use crate::dom;
use keypulse_core::Region;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::JsCast;
use web_sys as web;

/// Tapping a region's canvas triggers that region, so touch devices work
/// without a keyboard.
pub fn wire_pointerdown(app: Rc<RefCell<App>>, region: Region, canvas: &web::HtmlCanvasElement) {
    let closure = wasm_bindgen::closure::Closure::wrap(Box::new(move |ev: web::PointerEvent| {
        ev.prevent_default();
        app.borrow_mut().on_tap(region, dom::now_ms());
    }) as Box<dyn FnMut(_)>);
    _ = canvas.add_event_listener_with_callback("pointerdown", closure.as_ref().unchecked_ref());
    closure.forget();
}

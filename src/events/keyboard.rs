use super::keys;
use crate::app::App;
use crate::constants::STAGE_ID;
use crate::dom;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::JsCast;
use web_sys as web;

pub fn handle_global_keydown(ev: &web::KeyboardEvent, app: &Rc<RefCell<App>>, document: &web::Document) {
    if keys::is_browser_shortcut(ev.ctrl_key(), ev.meta_key(), ev.alt_key()) {
        return;
    }
    let code = ev.code();
    if keys::is_fullscreen_toggle(&code) {
        let target = document
            .get_element_by_id(STAGE_ID)
            .or_else(|| document.document_element());
        if let Some(target) = target {
            dom::toggle_fullscreen(document, &target);
        }
        ev.prevent_default();
        return;
    }
    if keys::suppress_default(&code) {
        ev.prevent_default();
    }
    app.borrow_mut().on_key(&code, dom::now_ms());
}

pub fn wire_global_keydown(app: Rc<RefCell<App>>, document: web::Document) {
    if let Some(window) = web::window() {
        let closure =
            wasm_bindgen::closure::Closure::wrap(Box::new(move |ev: web::KeyboardEvent| {
                handle_global_keydown(&ev, &app, &document);
            }) as Box<dyn FnMut(_)>);
        _ = window.add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
        closure.forget();
    }
}

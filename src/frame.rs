use crate::app::App;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

type FrameCallback = Rc<RefCell<Option<Closure<dyn FnMut(f64)>>>>;

fn request(callback: &FrameCallback) {
    if let (Some(w), Some(cb)) = (web::window(), callback.borrow().as_ref()) {
        if let Err(e) = w.request_animation_frame(cb.as_ref().unchecked_ref()) {
            log::error!("requestAnimationFrame failed: {:?}", e);
        }
    }
}

/// Tick the engine once per display refresh with the RAF timestamp.
pub fn start_loop(app: Rc<RefCell<App>>) {
    let tick: FrameCallback = Rc::new(RefCell::new(None));
    let tick_clone = tick.clone();
    *tick.borrow_mut() = Some(Closure::wrap(Box::new(move |now_ms: f64| {
        app.borrow_mut().frame(now_ms);
        request(&tick_clone);
    }) as Box<dyn FnMut(f64)>));
    request(&tick);
}

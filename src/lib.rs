#![cfg(target_arch = "wasm32")]
use crate::canvas::CanvasSurface;
use crate::constants::CANVAS_ID_PREFIX;
use keypulse_core::{Region, REGION_COUNT};
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use web_sys as web;

mod app;
mod audio;
mod canvas;
mod constants;
mod dom;
mod events;
mod frame;
mod overlay;
mod shaping;

/// Keep every canvas backing store at CSS size x devicePixelRatio.
fn wire_canvas_resize(canvases: Vec<web::HtmlCanvasElement>) {
    for canvas in &canvases {
        dom::sync_canvas_backing_size(canvas);
    }
    let resize_closure = Closure::wrap(Box::new(move || {
        for canvas in &canvases {
            dom::sync_canvas_backing_size(canvas);
        }
    }) as Box<dyn FnMut()>);
    if let Some(window) = web::window() {
        _ = window
            .add_event_listener_with_callback("resize", resize_closure.as_ref().unchecked_ref());
    }
    resize_closure.forget();
}

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).ok();
    log::info!("keypulse-web starting");

    spawn_local(async move {
        if let Err(e) = init().await {
            log::error!("init error: {:?}", e);
        }
    });
    Ok(())
}

async fn init() -> anyhow::Result<()> {
    let document = dom::window_document().ok_or_else(|| anyhow::anyhow!("no document"))?;

    let mut canvases = Vec::with_capacity(REGION_COUNT);
    for region in Region::ALL {
        let id = events::keys::canvas_id(CANVAS_ID_PREFIX, region.name());
        canvases.push(dom::canvas_by_id(&document, &id)?);
    }
    wire_canvas_resize(canvases.clone());

    let mut surfaces = Vec::with_capacity(REGION_COUNT);
    for canvas in &canvases {
        surfaces.push(CanvasSurface::new(canvas.clone())?);
    }
    let surfaces: [CanvasSurface; REGION_COUNT] = surfaces
        .try_into()
        .map_err(|_| anyhow::anyhow!("expected {REGION_COUNT} canvases"))?;

    let app = Rc::new(RefCell::new(app::App::new(document.clone(), surfaces)));
    events::keyboard::wire_global_keydown(app.clone(), document.clone());
    for (region, canvas) in Region::ALL.into_iter().zip(&canvases) {
        events::pointer::wire_pointerdown(app.clone(), region, canvas);
    }
    log::info!("{} regions wired, press any key", REGION_COUNT);

    frame::start_loop(app);
    Ok(())
}

//! battbrrr-ui
//!
//! Browser side of the controller's web chrome. On load it mounts the
//! animated backdrop on `#particleCanvas` and fills `#fwFooter` with the
//! firmware version. Either widget stays inert when its element is missing.

pub mod config;
pub mod dom;
pub mod error;
pub mod network;
pub mod render;
pub mod renderer;

use std::cell::RefCell;
use std::rc::Rc;

use battbrrr_effects::{start, Animation, Backdrop, Footer};
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::{debug, warn};
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::spawn_local;
use web_sys::{Document, Window};

use crate::dom::ElementText;
pub use crate::error::UiError;
use crate::render::RafScheduler;
use crate::renderer::CanvasPainter;

thread_local! {
    static ACTIVE: RefCell<Option<Animation>> = const { RefCell::new(None) };
}

#[wasm_bindgen(start)]
pub fn main_js() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    tracing_wasm::set_as_global_default();

    let window = dom::window()?;
    let document = dom::document(&window)?;

    // Optional chrome: a failure here must not break the page
    match mount_backdrop(&window, &document) {
        Ok(Some(animation)) => ACTIVE.with(|a| *a.borrow_mut() = Some(animation)),
        Ok(None) => {}
        Err(e) => warn!(error = %e, "backdrop disabled"),
    }
    mount_footer(&window, &document);

    Ok(())
}

/// Stop the backdrop animation started on load
#[wasm_bindgen(js_name = stopBackdrop)]
pub fn stop_backdrop() {
    ACTIVE.with(|a| {
        if let Some(animation) = a.borrow_mut().take() {
            animation.stop();
        }
    });
}

/// Size the canvas, hook up resizing and start the frame loop.
///
/// Returns `Ok(None)` when the page has no backdrop canvas.
pub fn mount_backdrop(window: &Window, document: &Document) -> Result<Option<Animation>, UiError> {
    let Some(canvas) = dom::find_canvas(document) else {
        debug!("no #{} on this page, backdrop off", dom::CANVAS_ID);
        return Ok(None);
    };

    let viewport = dom::viewport_size(window);
    dom::sync_canvas(&canvas, viewport);

    let backdrop = Rc::new(RefCell::new(Backdrop::with_config(
        viewport,
        config::effects_config(window),
        StdRng::from_entropy(),
    )));
    dom::setup_resize_listener(window, &canvas, Rc::clone(&backdrop))?;

    let painter = Rc::new(RefCell::new(CanvasPainter::new(&canvas)?));
    let scheduler = Rc::new(RafScheduler::new(window.clone()));
    let animation = start(scheduler, backdrop, painter)?;

    Ok(Some(animation))
}

/// Fetch the version once and write the footer label in the background.
///
/// Returns false when the page has no footer element.
pub fn mount_footer(window: &Window, document: &Document) -> bool {
    let Some(el) = dom::find_footer(document) else {
        debug!("no #{} on this page, footer off", dom::FOOTER_ID);
        return false;
    };

    let window = window.clone();
    spawn_local(async move {
        let mut footer = Footer::new(ElementText::new(el));
        footer.load(network::fetch_info(&window)).await;
    });
    true
}

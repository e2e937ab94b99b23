use std::cell::RefCell;
use std::rc::Rc;

use battbrrr_effects::{Backdrop, TextSink, Viewport};
use rand::Rng;
use tracing::trace;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, HtmlCanvasElement, Window};

use crate::error::UiError;

/// Canvas the backdrop draws into
pub const CANVAS_ID: &str = "particleCanvas";
/// Element receiving the firmware label
pub const FOOTER_ID: &str = "fwFooter";

pub fn window() -> Result<Window, UiError> {
    web_sys::window().ok_or(UiError::NoWindow)
}

pub fn document(window: &Window) -> Result<Document, UiError> {
    window.document().ok_or(UiError::NoDocument)
}

/// Look up the backdrop canvas; `None` when absent or not a canvas
pub fn find_canvas(doc: &Document) -> Option<HtmlCanvasElement> {
    doc.get_element_by_id(CANVAS_ID)?.dyn_into::<HtmlCanvasElement>().ok()
}

pub fn find_footer(doc: &Document) -> Option<Element> {
    doc.get_element_by_id(FOOTER_ID)
}

/// Current `innerWidth` x `innerHeight`
pub fn viewport_size(window: &Window) -> Viewport {
    let dim = |v: Result<JsValue, JsValue>| v.ok().and_then(|v| v.as_f64()).unwrap_or(0.0);
    Viewport::new(dim(window.inner_width()), dim(window.inner_height()))
}

/// Match the canvas backing store to `viewport`
pub fn sync_canvas(canvas: &HtmlCanvasElement, viewport: Viewport) {
    canvas.set_width(viewport.width.max(0.0) as u32);
    canvas.set_height(viewport.height.max(0.0) as u32);
}

/// Resize canvas and backdrop together on every window `resize`, ahead of
/// the next animation frame
pub fn setup_resize_listener<R: Rng + 'static>(
    window: &Window,
    canvas: &HtmlCanvasElement,
    backdrop: Rc<RefCell<Backdrop<R>>>,
) -> Result<(), UiError> {
    let win = window.clone();
    let canvas = canvas.clone();

    let on_resize = Closure::wrap(Box::new(move || {
        let viewport = viewport_size(&win);
        trace!(width = viewport.width, height = viewport.height, "viewport resized");
        sync_canvas(&canvas, viewport);
        backdrop.borrow_mut().resize(viewport.width, viewport.height);
    }) as Box<dyn FnMut()>);

    window.add_event_listener_with_callback("resize", on_resize.as_ref().unchecked_ref())?;
    // Lives as long as the page
    on_resize.forget();

    Ok(())
}

/// Footer element as a label sink
pub struct ElementText {
    el: Element,
}

impl ElementText {
    pub const fn new(el: Element) -> Self {
        Self { el }
    }
}

impl TextSink for ElementText {
    fn set_text(&mut self, text: &str) {
        self.el.set_text_content(Some(text));
    }
}

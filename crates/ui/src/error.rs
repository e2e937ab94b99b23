use battbrrr_effects::EffectsError;
use wasm_bindgen::{JsCast, JsValue};

/// Errors while wiring the widgets into the page
#[derive(Debug, thiserror::Error)]
pub enum UiError {
    #[error("no global `window`")]
    NoWindow,
    #[error("window has no document")]
    NoDocument,
    #[error("2d canvas context unavailable")]
    NoContext,
    #[error("javascript error: {0}")]
    Js(String),
    #[error(transparent)]
    Effects(#[from] EffectsError),
}

impl From<JsValue> for UiError {
    fn from(value: JsValue) -> Self {
        Self::Js(describe(&value))
    }
}

impl From<UiError> for JsValue {
    fn from(err: UiError) -> Self {
        Self::from_str(&err.to_string())
    }
}

/// Best-effort text for a thrown JS value
pub fn describe(value: &JsValue) -> String {
    if let Some(s) = value.as_string() {
        return s;
    }
    if let Some(err) = value.dyn_ref::<js_sys::Error>() {
        return String::from(err.message());
    }
    format!("{value:?}")
}

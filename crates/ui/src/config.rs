//! Page-provided effects overrides
//!
//! The preview host (and any firmware page that wants to) defines
//! `window.BATTBRRR_CONFIG = { effects: {...} }` before the module loads.

use battbrrr_effects::EffectsConfig;
use tracing::warn;
use wasm_bindgen::JsValue;
use web_sys::Window;

use crate::error::describe;

pub const GLOBAL_CONFIG_KEY: &str = "BATTBRRR_CONFIG";

/// Effects config from the page, or defaults when missing or invalid
pub fn effects_config(window: &Window) -> EffectsConfig {
    let effects = js_sys::Reflect::get(window, &GLOBAL_CONFIG_KEY.into())
        .ok()
        .filter(|v| v.is_object())
        .and_then(|cfg| js_sys::Reflect::get(&cfg, &"effects".into()).ok())
        .filter(|v| v.is_object());

    let Some(effects) = effects else {
        return EffectsConfig::default();
    };

    match parse(&effects) {
        Ok(config) => config,
        Err(e) => {
            warn!(error = %e, "ignoring effects overrides");
            EffectsConfig::default()
        }
    }
}

fn parse(value: &JsValue) -> Result<EffectsConfig, String> {
    let json = js_sys::JSON::stringify(value).map_err(|e| describe(&e))?;
    let json = json.as_string().unwrap_or_default();
    EffectsConfig::from_json(&json).map_err(|e| e.to_string())
}

//! requestAnimationFrame-backed frame scheduling

use battbrrr_effects::{EffectsError, FrameCallback, FrameScheduler};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys::Window;

use crate::error::describe;

/// Schedules exactly one callback per requested display frame
pub struct RafScheduler {
    window: Window,
}

impl RafScheduler {
    pub const fn new(window: Window) -> Self {
        Self { window }
    }
}

impl FrameScheduler for RafScheduler {
    fn request_frame(&self, callback: FrameCallback) -> battbrrr_effects::Result<()> {
        // The closure frees itself after its single invocation
        let closure = Closure::once_into_js(move |now: f64| callback(now));
        self.window
            .request_animation_frame(closure.unchecked_ref())
            .map(|_| ())
            .map_err(|e| EffectsError::Schedule(describe(&e)))
    }
}

//! `Painter` backed by a 2d canvas context

use std::f64::consts::PI;

use battbrrr_effects::{Fill, Painter, Point, Stroke};
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

use crate::error::UiError;

pub struct CanvasPainter {
    ctx: CanvasRenderingContext2d,
}

impl CanvasPainter {
    pub fn new(canvas: &HtmlCanvasElement) -> Result<Self, UiError> {
        let ctx = canvas
            .get_context("2d")?
            .ok_or(UiError::NoContext)?
            .dyn_into::<CanvasRenderingContext2d>()
            .map_err(|_| UiError::NoContext)?;
        Ok(Self { ctx })
    }
}

impl Painter for CanvasPainter {
    fn clear(&mut self, width: f64, height: f64) {
        self.ctx.clear_rect(0.0, 0.0, width, height);
    }

    #[allow(deprecated)] // web-sys set_stroke_style deprecation is overzealous
    fn curve(&mut self, from: Point, control: Point, to: Point, stroke: &Stroke<'_>) {
        let ctx = &self.ctx;
        ctx.save();
        ctx.set_global_alpha(stroke.alpha);
        ctx.set_stroke_style(&JsValue::from_str(stroke.color));
        ctx.set_line_width(stroke.width);
        ctx.begin_path();
        ctx.move_to(from.x, from.y);
        ctx.quadratic_curve_to(control.x, control.y, to.x, to.y);
        ctx.stroke();
        ctx.restore();
    }

    #[allow(deprecated)]
    fn ring(&mut self, center: Point, radius: f64, stroke: &Stroke<'_>) {
        let ctx = &self.ctx;
        ctx.save();
        ctx.set_global_alpha(stroke.alpha);
        ctx.set_stroke_style(&JsValue::from_str(stroke.color));
        ctx.set_line_width(stroke.width);
        ctx.begin_path();
        let _ = ctx.arc(center.x, center.y, radius, 0.0, 2.0 * PI);
        ctx.stroke();
        ctx.restore();
    }

    #[allow(deprecated)]
    fn dot(&mut self, center: Point, radius: f64, fill: &Fill<'_>) {
        let ctx = &self.ctx;
        ctx.save();
        ctx.set_global_alpha(fill.alpha);
        ctx.set_fill_style(&JsValue::from_str(fill.color));
        ctx.begin_path();
        let _ = ctx.arc(center.x, center.y, radius, 0.0, 2.0 * PI);
        ctx.fill();
        ctx.restore();
    }
}

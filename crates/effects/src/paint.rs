//! Drawing commands issued by the backdrop
//!
//! The backdrop never talks to a canvas directly. It describes each frame
//! through [`Painter`]; `battbrrr-ui` maps that onto
//! `CanvasRenderingContext2d`, tests use [`Recorder`].

use crate::geometry::Point;

/// Stroke style for curves and rings
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Stroke<'a> {
    pub color: &'a str,
    pub width: f64,
    pub alpha: f64,
}

/// Fill style for dots
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Fill<'a> {
    pub color: &'a str,
    pub alpha: f64,
}

pub trait Painter {
    /// Wipe the whole surface
    fn clear(&mut self, width: f64, height: f64);
    /// Quadratic curve from `from` to `to` bent towards `control`
    fn curve(&mut self, from: Point, control: Point, to: Point, stroke: &Stroke<'_>);
    /// Circle outline
    fn ring(&mut self, center: Point, radius: f64, stroke: &Stroke<'_>);
    /// Filled disc
    fn dot(&mut self, center: Point, radius: f64, fill: &Fill<'_>);
}

/// Owned copy of one painter call
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Clear { width: f64, height: f64 },
    Curve { from: Point, control: Point, to: Point, color: String, width: f64, alpha: f64 },
    Ring { center: Point, radius: f64, color: String, width: f64, alpha: f64 },
    Dot { center: Point, radius: f64, color: String, alpha: f64 },
}

/// Painter that records every call, for tests and headless previews
#[derive(Debug, Default)]
pub struct Recorder {
    commands: Vec<DrawCommand>,
}

impl Recorder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    pub fn take(&mut self) -> Vec<DrawCommand> {
        std::mem::take(&mut self.commands)
    }

    pub fn rings(&self) -> impl Iterator<Item = &DrawCommand> {
        self.commands.iter().filter(|c| matches!(c, DrawCommand::Ring { .. }))
    }

    pub fn dots(&self) -> impl Iterator<Item = &DrawCommand> {
        self.commands.iter().filter(|c| matches!(c, DrawCommand::Dot { .. }))
    }

    pub fn curves(&self) -> impl Iterator<Item = &DrawCommand> {
        self.commands.iter().filter(|c| matches!(c, DrawCommand::Curve { .. }))
    }
}

impl Painter for Recorder {
    fn clear(&mut self, width: f64, height: f64) {
        self.commands.push(DrawCommand::Clear { width, height });
    }

    fn curve(&mut self, from: Point, control: Point, to: Point, stroke: &Stroke<'_>) {
        self.commands.push(DrawCommand::Curve {
            from,
            control,
            to,
            color: stroke.color.to_string(),
            width: stroke.width,
            alpha: stroke.alpha,
        });
    }

    fn ring(&mut self, center: Point, radius: f64, stroke: &Stroke<'_>) {
        self.commands.push(DrawCommand::Ring {
            center,
            radius,
            color: stroke.color.to_string(),
            width: stroke.width,
            alpha: stroke.alpha,
        });
    }

    fn dot(&mut self, center: Point, radius: f64, fill: &Fill<'_>) {
        self.commands.push(DrawCommand::Dot {
            center,
            radius,
            color: fill.color.to_string(),
            alpha: fill.alpha,
        });
    }
}

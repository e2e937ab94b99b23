//! Surface geometry shared by the particle populations

/// A point in surface pixels
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Pixel dimensions of the drawing surface (mirrors the browser viewport)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
}

impl Viewport {
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// Larger of width and height; pulse and spark bounds scale with it
    pub fn extent(&self) -> f64 {
        self.width.max(self.height)
    }

    /// Point at the given fractions of width and height
    pub fn at(&self, fx: f64, fy: f64) -> Point {
        Point::new(self.width * fx, self.height * fy)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extent_uses_larger_side() {
        assert_eq!(Viewport::new(800.0, 600.0).extent(), 800.0);
        assert_eq!(Viewport::new(390.0, 844.0).extent(), 844.0);
    }

    #[test]
    fn test_at_scales_fractions() {
        let vp = Viewport::new(1000.0, 500.0);
        assert_eq!(vp.at(0.5, 0.35), Point::new(500.0, 175.0));
    }
}

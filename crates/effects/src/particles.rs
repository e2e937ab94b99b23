use std::f64::consts::PI;

use rand::Rng;

use crate::geometry::{Point, Viewport};

// Filaments live in normalised coordinates and scroll downwards forever
pub const FILAMENT_WRAP_BOTTOM: f64 = 1.2;
pub const FILAMENT_WRAP_TOP: f64 = -0.2;

pub const PULSE_START_RADIUS: f64 = 10.0;
/// Pulses vanish once they outgrow this share of the larger surface side
pub const PULSE_MAX_RADIUS_FACTOR: f64 = 0.6;
/// Speeds are expressed per 60 Hz frame, ages in milliseconds
const PULSE_SPEED_SCALE: f64 = 60.0;

pub const SPARK_MAX_RADIUS_FACTOR: f64 = 0.7;
pub const SPARK_RESET_RADIUS: (f64, f64) = (30.0, 120.0);
const SPARK_BASE_SPIN: f64 = 0.0007;
const SPARK_VELOCITY_SPIN: f64 = 0.0008;
/// Orbits are flattened vertically
pub const SPARK_ORBIT_SQUASH: f64 = 0.6;

/// Uniform sample in `[lo, hi)`; tolerates `lo == hi`
pub fn uniform<R: Rng + ?Sized>(rng: &mut R, lo: f64, hi: f64) -> f64 {
    lo + rng.gen::<f64>() * (hi - lo)
}

/// Slow curved stroke drifting down the screen
#[derive(Clone, Debug, PartialEq)]
pub struct Filament {
    pub x: f64,
    pub y: f64,
    pub half_width: f64,
    pub drift: f64,
}

impl Filament {
    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Self {
            x: uniform(rng, 0.0, 1.0),
            y: uniform(rng, 0.0, 1.0),
            half_width: uniform(rng, 40.0, 120.0),
            drift: uniform(rng, 0.0001, 0.0003),
        }
    }

    /// Move down by one frame of drift, wrapping back above the top edge
    pub fn advance(&mut self) {
        self.y += self.drift;
        if self.y >= FILAMENT_WRAP_BOTTOM {
            self.y = FILAMENT_WRAP_TOP;
        }
    }

    /// Start, control and end points of the stroke in surface pixels
    pub fn control_points(&self, viewport: &Viewport) -> (Point, Point, Point) {
        let x = self.x * viewport.width;
        let y = self.y * viewport.height;
        (
            Point::new(x - self.half_width, y - 40.0),
            Point::new(x, y + 30.0),
            Point::new(x + self.half_width, y + 120.0),
        )
    }
}

/// Expanding ring that fades as it grows
#[derive(Clone, Debug, PartialEq)]
pub struct Pulse {
    pub born_ms: f64,
    pub start_radius: f64,
    pub speed: f64,
    pub alpha: f64,
}

impl Pulse {
    pub fn spawn<R: Rng + ?Sized>(now_ms: f64, rng: &mut R) -> Self {
        Self {
            born_ms: now_ms,
            start_radius: PULSE_START_RADIUS,
            speed: uniform(rng, 0.015, 0.03),
            alpha: uniform(rng, 0.10, 0.18),
        }
    }

    pub fn radius_at(&self, now_ms: f64) -> f64 {
        let age = now_ms - self.born_ms;
        self.start_radius + age * self.speed * PULSE_SPEED_SCALE
    }

    /// Opacity at `radius`, reaching zero at `max_radius`
    pub fn alpha_at(&self, radius: f64, max_radius: f64) -> f64 {
        self.alpha * (1.0 - radius / max_radius)
    }
}

/// Small twinkling dot orbiting the centre
#[derive(Clone, Debug, PartialEq)]
pub struct Spark {
    pub angle: f64,
    pub radius: f64,
    pub velocity: f64,
    pub size: f64,
    pub twinkle: f64,
}

impl Spark {
    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Self {
            angle: uniform(rng, 0.0, PI * 2.0),
            radius: uniform(rng, 60.0, 240.0),
            velocity: uniform(rng, 0.02, 0.08),
            size: uniform(rng, 1.0, 2.0),
            twinkle: uniform(rng, 0.25, 0.7),
        }
    }

    /// Push outwards and spin; respawn close to the centre past `max_radius`
    pub fn advance<R: Rng + ?Sized>(&mut self, max_radius: f64, rng: &mut R) {
        self.radius += self.velocity;
        if self.radius > max_radius {
            self.radius = uniform(rng, SPARK_RESET_RADIUS.0, SPARK_RESET_RADIUS.1);
        }
        self.angle += SPARK_BASE_SPIN + self.velocity * SPARK_VELOCITY_SPIN;
    }

    pub fn position(&self, center: Point) -> Point {
        Point::new(
            center.x + self.angle.cos() * self.radius,
            center.y + self.angle.sin() * self.radius * SPARK_ORBIT_SQUASH,
        )
    }

    /// Brightness in `[0, 1]` driven by wall time and orbit angle
    pub fn twinkle_at(&self, now_ms: f64) -> f64 {
        0.5 + 0.5 * ((now_ms / 1000.0) * self.twinkle + self.angle).sin()
    }
}

//! Animated backdrop scene
//!
//! Owns the three particle populations and the surface size. `tick` is the
//! whole per-frame routine: clear, maybe spawn a pulse, then update and draw
//! filaments, pulses and sparks in that order.

use rand::Rng;
use tracing::{debug, trace};

use crate::config::EffectsConfig;
use crate::geometry::Viewport;
use crate::paint::{Fill, Painter, Stroke};
use crate::particles::{
    Filament, Pulse, Spark, PULSE_MAX_RADIUS_FACTOR, SPARK_MAX_RADIUS_FACTOR,
};

const FILAMENT_ALPHA: f64 = 0.08;
const FILAMENT_LINE_WIDTH: f64 = 1.2;
const PULSE_LINE_WIDTH: f64 = 1.6;
const SPARK_BASE_ALPHA: f64 = 0.18;
const SPARK_TWINKLE_ALPHA: f64 = 0.28;

/// What happened during one frame
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FrameStats {
    pub spawned_pulse: bool,
    pub expired_pulses: usize,
    pub live_pulses: usize,
}

pub struct Backdrop<R> {
    viewport: Viewport,
    config: EffectsConfig,
    rng: R,
    filaments: Vec<Filament>,
    pulses: Vec<Pulse>,
    sparks: Vec<Spark>,
    last_pulse_ms: f64,
}

impl<R: Rng> Backdrop<R> {
    pub fn new(viewport: Viewport, rng: R) -> Self {
        Self::with_config(viewport, EffectsConfig::default(), rng)
    }

    /// Seed all populations from `rng`. The spawn clock starts at zero, so
    /// the first pulse appears once animation time passes the pulse gap.
    pub fn with_config(viewport: Viewport, config: EffectsConfig, mut rng: R) -> Self {
        let filaments = (0..config.filament_count).map(|_| Filament::random(&mut rng)).collect();
        let sparks = (0..config.spark_count).map(|_| Spark::random(&mut rng)).collect();

        debug!(
            width = viewport.width,
            height = viewport.height,
            filaments = config.filament_count,
            sparks = config.spark_count,
            "backdrop seeded"
        );

        Self {
            viewport,
            config,
            rng,
            filaments,
            pulses: Vec::new(),
            sparks,
            last_pulse_ms: 0.0,
        }
    }

    /// Resync the surface size; takes effect on the very next `tick`
    pub fn resize(&mut self, width: f64, height: f64) {
        trace!(width, height, "backdrop resized");
        self.viewport = Viewport::new(width, height);
    }

    pub const fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub const fn config(&self) -> &EffectsConfig {
        &self.config
    }

    pub fn filaments(&self) -> &[Filament] {
        &self.filaments
    }

    pub fn pulses(&self) -> &[Pulse] {
        &self.pulses
    }

    pub fn sparks(&self) -> &[Spark] {
        &self.sparks
    }

    /// Largest radius a pulse may reach before it is dropped
    pub fn max_pulse_radius(&self) -> f64 {
        self.viewport.extent() * PULSE_MAX_RADIUS_FACTOR
    }

    /// Radius past which sparks respawn near the centre
    pub fn max_spark_radius(&self) -> f64 {
        self.viewport.extent() * SPARK_MAX_RADIUS_FACTOR
    }

    /// Advance every population to `now_ms` and draw the frame
    pub fn tick<P: Painter + ?Sized>(&mut self, now_ms: f64, painter: &mut P) -> FrameStats {
        let mut stats = FrameStats::default();

        painter.clear(self.viewport.width, self.viewport.height);

        if now_ms - self.last_pulse_ms > self.config.pulse_gap_ms {
            self.last_pulse_ms = now_ms;
            if self.pulses.len() < self.config.max_live_pulses {
                self.pulses.push(Pulse::spawn(now_ms, &mut self.rng));
                stats.spawned_pulse = true;
            } else {
                debug!(live = self.pulses.len(), "pulse cap reached, spawn skipped");
            }
        }

        self.draw_filaments(painter);
        stats.expired_pulses = self.draw_pulses(now_ms, painter);
        self.draw_sparks(now_ms, painter);

        stats.live_pulses = self.pulses.len();
        stats
    }

    fn draw_filaments<P: Painter + ?Sized>(&mut self, painter: &mut P) {
        let stroke = Stroke {
            color: &self.config.palette.filament,
            width: FILAMENT_LINE_WIDTH,
            alpha: FILAMENT_ALPHA,
        };
        for f in &mut self.filaments {
            f.advance();
            let (from, control, to) = f.control_points(&self.viewport);
            painter.curve(from, control, to, &stroke);
        }
    }

    /// Returns how many pulses expired this frame
    fn draw_pulses<P: Painter + ?Sized>(&mut self, now_ms: f64, painter: &mut P) -> usize {
        let center = self.viewport.at(0.5, 0.35);
        let max_r = self.max_pulse_radius();
        let mut expired = 0;

        // Reverse walk keeps indices valid while removing
        for i in (0..self.pulses.len()).rev() {
            let pulse = &self.pulses[i];
            let r = pulse.radius_at(now_ms);
            if r > max_r {
                self.pulses.remove(i);
                expired += 1;
                continue;
            }
            painter.ring(
                center,
                r,
                &Stroke {
                    color: &self.config.palette.pulse,
                    width: PULSE_LINE_WIDTH,
                    alpha: pulse.alpha_at(r, max_r),
                },
            );
        }
        expired
    }

    fn draw_sparks<P: Painter + ?Sized>(&mut self, now_ms: f64, painter: &mut P) {
        let center = self.viewport.at(0.5, 0.5);
        let max_r = self.max_spark_radius();

        for s in &mut self.sparks {
            s.advance(max_r, &mut self.rng);
            let tw = s.twinkle_at(now_ms);
            painter.dot(
                s.position(center),
                s.size,
                &Fill {
                    color: &self.config.palette.spark,
                    alpha: SPARK_BASE_ALPHA + tw * SPARK_TWINKLE_ALPHA,
                },
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::paint::{DrawCommand, Recorder};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn backdrop() -> Backdrop<StdRng> {
        Backdrop::new(Viewport::new(1280.0, 720.0), StdRng::seed_from_u64(1))
    }

    #[test]
    fn test_seeds_fixed_populations() {
        let b = backdrop();
        assert_eq!(b.filaments().len(), 10);
        assert_eq!(b.sparks().len(), 8);
        assert!(b.pulses().is_empty());
    }

    #[test]
    fn test_same_seed_same_scene() {
        let a = backdrop();
        let b = backdrop();
        assert_eq!(a.filaments(), b.filaments());
        assert_eq!(a.sparks(), b.sparks());
    }

    #[test]
    fn test_frame_starts_with_clear() {
        let mut b = backdrop();
        let mut rec = Recorder::new();
        b.tick(16.0, &mut rec);
        assert_eq!(
            rec.commands().first(),
            Some(&DrawCommand::Clear { width: 1280.0, height: 720.0 })
        );
        assert_eq!(rec.curves().count(), 10);
        assert_eq!(rec.dots().count(), 8);
        assert_eq!(rec.rings().count(), 0);
    }

    #[test]
    fn test_no_pulse_before_gap() {
        let mut b = backdrop();
        let mut rec = Recorder::new();
        let stats = b.tick(2200.0, &mut rec);
        assert!(!stats.spawned_pulse);
        let stats = b.tick(2200.5, &mut rec);
        assert!(stats.spawned_pulse);
        assert_eq!(stats.live_pulses, 1);
    }

    #[test]
    fn test_pulse_ring_centre_and_style() {
        let mut b = backdrop();
        let mut rec = Recorder::new();
        b.tick(3000.0, &mut rec);
        let ring = rec.rings().next().cloned().expect("ring drawn");
        match ring {
            DrawCommand::Ring { center, radius, width, alpha, .. } => {
                assert_eq!(center.x, 640.0);
                assert!((center.y - 252.0).abs() < 1e-9);
                assert!((radius - 10.0).abs() < 1e-9);
                assert!((width - 1.6).abs() < f64::EPSILON);
                assert!(alpha > 0.0);
            }
            _ => unreachable!(),
        }
    }

    #[test]
    fn test_pulse_cap_skips_spawn() {
        let config = EffectsConfig { max_live_pulses: 1, pulse_gap_ms: 10.0, ..EffectsConfig::default() };
        let mut b = Backdrop::with_config(
            Viewport::new(4000.0, 4000.0),
            config,
            StdRng::seed_from_u64(3),
        );
        assert_eq!(b.config().max_live_pulses, 1);
        let mut rec = Recorder::new();
        assert!(b.tick(20.0, &mut rec).spawned_pulse);
        let stats = b.tick(40.0, &mut rec);
        assert!(!stats.spawned_pulse);
        assert_eq!(stats.live_pulses, 1);
    }

    #[test]
    fn test_resize_applies_to_next_frame() {
        let mut b = backdrop();
        b.resize(400.0, 300.0);
        let mut rec = Recorder::new();
        b.tick(16.0, &mut rec);
        assert_eq!(rec.commands()[0], DrawCommand::Clear { width: 400.0, height: 300.0 });
        assert!((b.max_pulse_radius() - 240.0).abs() < 1e-9);
    }
}

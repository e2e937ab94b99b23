use std::cell::RefCell;
use std::rc::Rc;

use battbrrr_effects::particles::{FILAMENT_WRAP_BOTTOM, FILAMENT_WRAP_TOP};
use battbrrr_effects::{
    start, Backdrop, DrawCommand, Fill, ManualScheduler, Painter, Point, Recorder, Stroke, Viewport,
};
use proptest::prelude::*;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Painter that draws nothing, for long runs
struct Blank;

impl Painter for Blank {
    fn clear(&mut self, _width: f64, _height: f64) {}
    fn curve(&mut self, _from: Point, _control: Point, _to: Point, _stroke: &Stroke<'_>) {}
    fn ring(&mut self, _center: Point, _radius: f64, _stroke: &Stroke<'_>) {}
    fn dot(&mut self, _center: Point, _radius: f64, _fill: &Fill<'_>) {}
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(16))]

    #[test]
    fn filaments_stay_in_scroll_band(seed in any::<u64>(), frames in 0usize..20_000) {
        let mut backdrop = Backdrop::new(Viewport::new(1280.0, 720.0), StdRng::seed_from_u64(seed));
        for i in 0..frames {
            backdrop.tick(i as f64 * 16.0, &mut Blank);
        }
        for f in backdrop.filaments() {
            prop_assert!(f.y >= FILAMENT_WRAP_TOP && f.y < FILAMENT_WRAP_BOTTOM, "y = {}", f.y);
        }
    }

    #[test]
    fn sparks_stay_inside_orbit_band(
        seed in any::<u64>(),
        width in 200.0f64..3000.0,
        height in 200.0f64..3000.0,
        frames in 1usize..5_000,
    ) {
        let mut backdrop = Backdrop::new(Viewport::new(width, height), StdRng::seed_from_u64(seed));
        let limit = 0.7 * width.max(height);
        for i in 0..frames {
            backdrop.tick(i as f64 * 16.0, &mut Blank);
            for s in backdrop.sparks() {
                prop_assert!(s.radius >= 30.0 && s.radius <= limit, "r = {} limit = {}", s.radius, limit);
            }
        }
    }
}

#[test]
fn filament_wrap_is_exercised() {
    let mut backdrop = Backdrop::new(Viewport::new(800.0, 600.0), StdRng::seed_from_u64(5));
    let mut wrapped = false;
    let mut previous: Vec<f64> = backdrop.filaments().iter().map(|f| f.y).collect();
    for i in 0..15_000 {
        backdrop.tick(f64::from(i) * 16.0, &mut Blank);
        for (f, prev) in backdrop.filaments().iter().zip(previous.iter_mut()) {
            if f.y < *prev {
                wrapped = true;
                assert!((f.y - FILAMENT_WRAP_TOP).abs() < f64::EPSILON);
            }
            *prev = f.y;
        }
    }
    assert!(wrapped);
}

#[test]
fn pulse_removed_on_first_frame_past_max_radius() {
    let mut backdrop = Backdrop::new(Viewport::new(1000.0, 500.0), StdRng::seed_from_u64(11));
    let max_r = backdrop.max_pulse_radius();
    assert!((max_r - 600.0).abs() < 1e-9);

    let mut rec = Recorder::new();
    let born = 2201.0;
    assert!(backdrop.tick(born, &mut rec).spawned_pulse);
    let pulse = backdrop.pulses()[0].clone();

    let mut now = born;
    loop {
        now += 16.0;
        assert!(now < born + 2200.0, "pulse outlived the next spawn");
        let expected = pulse.radius_at(now);
        rec.take();
        let stats = backdrop.tick(now, &mut rec);

        if expected > max_r {
            assert_eq!(stats.expired_pulses, 1);
            assert_eq!(stats.live_pulses, 0);
            assert!(backdrop.pulses().is_empty());
            assert_eq!(rec.rings().count(), 0);
            break;
        }
        assert_eq!(stats.expired_pulses, 0);
        assert_eq!(backdrop.pulses().len(), 1);
        match rec.rings().next() {
            Some(DrawCommand::Ring { radius, .. }) => assert!((radius - expected).abs() < 1e-9),
            other => panic!("expected ring, got {other:?}"),
        }
    }
}

#[test]
fn pulse_rate_independent_of_frame_pacing() {
    let mut backdrop = Backdrop::new(Viewport::new(1920.0, 1080.0), StdRng::seed_from_u64(21));
    let mut pacing = StdRng::seed_from_u64(99);
    let total_ms = 60_000.0;

    let mut now = 0.0;
    let mut spawned = 0;
    loop {
        now += pacing.gen_range(5.0..50.0);
        if now > total_ms {
            break;
        }
        if backdrop.tick(now, &mut Blank).spawned_pulse {
            spawned += 1;
        }
    }

    // One spawn per 2200ms, each gap overshooting by at most one frame
    assert!((26..=27).contains(&spawned), "spawned {spawned}");
}

#[test]
fn resize_reaches_surface_before_next_frame() {
    let scheduler = ManualScheduler::new();
    let backdrop = Rc::new(RefCell::new(Backdrop::new(
        Viewport::new(1024.0, 768.0),
        StdRng::seed_from_u64(2),
    )));
    let painter = Rc::new(RefCell::new(Recorder::new()));
    let _animation = start(scheduler.clone(), backdrop.clone(), painter.clone()).unwrap();

    scheduler.run_frame(16.0);
    backdrop.borrow_mut().resize(640.0, 480.0);
    assert_eq!(backdrop.borrow().viewport(), Viewport::new(640.0, 480.0));

    painter.borrow_mut().take();
    scheduler.run_frame(32.0);
    assert_eq!(
        painter.borrow().commands()[0],
        DrawCommand::Clear { width: 640.0, height: 480.0 }
    );
}

#[test]
fn bounded_run_then_stop() {
    let scheduler = ManualScheduler::new();
    let backdrop = Rc::new(RefCell::new(Backdrop::new(
        Viewport::new(800.0, 600.0),
        StdRng::seed_from_u64(4),
    )));
    let painter = Rc::new(RefCell::new(Blank));
    let animation = start(scheduler.clone(), backdrop, painter).unwrap();

    let ran = scheduler.run_frames((1..=120).map(|i| f64::from(i) * 16.0));
    assert_eq!(ran, 120);
    animation.stop();
    scheduler.run_frame(2000.0);
    assert_eq!(scheduler.pending(), 0);
}

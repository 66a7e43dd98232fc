use glam::Vec2;

use evasive_target::platform::{ManualFrameSource, SchedulerState, StopReason};
use evasive_target::target::{TargetGeometry, TargetRect, VirtualTarget};
use evasive_target::{EvasionController, Settings, SimPhase};

type Controller = EvasionController<ManualFrameSource, VirtualTarget>;

const HOME_CENTER: Vec2 = Vec2::new(500.0, 400.0);
const FRAME_MS: f64 = 16.0;

fn controller(settings: &Settings) -> Controller {
    let home = TargetRect::centered(HOME_CENTER, Vec2::new(120.0, 48.0));
    let target = VirtualTarget::laid_out(home, settings.smoothing);
    EvasionController::from_settings(settings, target, ManualFrameSource::new()).unwrap()
}

/// Fire and run up to `frames` frames; returns how many ran
fn pump(c: &mut Controller, frames: usize, clock: &mut f64) -> usize {
    let mut ran = 0;
    for _ in 0..frames {
        if c.scheduler_mut().source_mut().fire().is_none() {
            break;
        }
        *clock += FRAME_MS;
        if c.on_frame(*clock) {
            ran += 1;
        }
    }
    ran
}

#[test]
fn test_no_pointer_no_motion() {
    let mut c = controller(&Settings::default());
    let mut clock = 0.0;
    c.start();

    assert_eq!(pump(&mut c, 120, &mut clock), 120);
    assert!(c.pointer().sample().is_sentinel());
    assert_eq!(c.simulator().stats().emitted, 0);
    assert_eq!(c.target().translation(), Vec2::ZERO);
    assert_eq!(c.target().current_center(), Some(HOME_CENTER));
}

#[test]
fn test_flees_then_returns_home() {
    let mut c = controller(&Settings::default());
    let mut clock = 0.0;
    c.start();

    // Pointer 50px below the button
    c.pointer_moved(HOME_CENTER.x, HOME_CENTER.y + 50.0);
    pump(&mut c, 1, &mut clock);
    assert!(c.simulator().state().velocity.y < 0.0);
    assert!(c.simulator().state().offset.y < 0.0);

    // The drawn button ends up outside the pointer's reach at some point
    let pointer = c.pointer().sample().position;
    let mut farthest = 0.0f32;
    for _ in 0..20 {
        pump(&mut c, 1, &mut clock);
        let drawn = c.target().current_center().unwrap();
        farthest = farthest.max(drawn.distance(pointer));
    }
    assert!(farthest > Settings::default().sim.repel_radius, "{farthest}");

    c.pointer_moved(HOME_CENTER.x, HOME_CENTER.y + 10_000.0);
    pump(&mut c, 600, &mut clock);

    let offset = c.simulator().state().offset;
    assert!(offset.x.abs() < 0.1 && offset.y.abs() < 0.1, "{offset:?}");
    assert!(c.target().current_center().unwrap().distance(HOME_CENTER) < 0.5);
}

#[test]
fn test_escapes_radius_while_pointer_lingers() {
    let settings = Settings::default();
    let mut c = controller(&settings);
    let mut clock = 0.0;
    c.start();

    c.pointer_moved(HOME_CENTER.x - 30.0, HOME_CENTER.y);
    pump(&mut c, 90, &mut clock);

    // Whatever the oscillation, the state stays finite and the button spends
    // time away from the pointer
    let sim = c.simulator();
    assert!(sim.state().is_finite());
    assert_eq!(sim.stats().recovered, 0);
    assert!(sim.stats().emitted > 0);
}

#[test]
fn test_accept_mid_flight() {
    let mut c = controller(&Settings::default());
    let mut clock = 0.0;
    c.start();
    c.pointer_moved(HOME_CENTER.x + 20.0, HOME_CENTER.y + 20.0);
    pump(&mut c, 8, &mut clock);

    let frozen_at = *c.simulator().state();
    let emitted = c.simulator().stats().emitted;
    assert!(c.accept());

    assert_eq!(c.simulator().phase(), SimPhase::Frozen);
    assert_eq!(c.scheduler().state(), SchedulerState::Stopped(StopReason::Frozen));
    assert!(c.scheduler().source().pending().is_empty());

    for (x, y) in [(0.0, 0.0), (HOME_CENTER.x, HOME_CENTER.y), (900.0, 10.0)] {
        c.pointer_moved(x, y);
        assert_eq!(pump(&mut c, 5, &mut clock), 0);
        assert!(!c.on_frame(clock + FRAME_MS));
    }
    assert_eq!(*c.simulator().state(), frozen_at);
    assert_eq!(c.simulator().stats().emitted, emitted);

    // Accept again is a no-op
    assert!(!c.accept());
}

#[test]
fn test_teardown_leaves_nothing_scheduled() {
    let mut c = controller(&Settings::default());
    let mut clock = 0.0;
    c.start();
    pump(&mut c, 3, &mut clock);
    assert_eq!(c.scheduler().source().pending().len(), 1);

    c.teardown();
    assert!(c.scheduler().source().pending().is_empty());
    assert_eq!(c.scheduler().source().cancelled().len(), 1);
    assert!(!c.start());
}

#[test]
fn test_custom_settings_widen_radius() {
    let settings = Settings::from_json(r#"{"sim": {"repel_radius": 400.0}}"#).unwrap();
    let mut c = controller(&settings);
    let mut default_c = controller(&Settings::default());
    let mut clock = 0.0;
    let mut default_clock = 0.0;
    c.start();
    default_c.start();

    // 300px away: outside the default radius, inside the custom one
    c.pointer_moved(HOME_CENTER.x - 300.0, HOME_CENTER.y);
    default_c.pointer_moved(HOME_CENTER.x - 300.0, HOME_CENTER.y);
    pump(&mut c, 1, &mut clock);
    pump(&mut default_c, 1, &mut default_clock);

    assert!(c.simulator().state().offset.x > 0.0);
    assert_eq!(default_c.simulator().state().offset, Vec2::ZERO);
}

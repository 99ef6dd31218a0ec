use super::*;
use crate::animation::{CompletionState, ZOOM_ANIMATION};
use crate::controller::ControllerState;
use crate::gesture::DoubleTapEvent;

#[test]
fn test_double_tap_zooms_to_tapped_point() {
    let (mut c, log) = controller(false);
    let done = c.double_tap(DoubleTapEvent::at(300.0, 150.0));

    assert!(done.is_pending());
    assert_eq!(c.state(), ControllerState::Animating(AnimationKind::Zoom));
    assert_eq!(log.borrow().requested, vec![ZOOM_ANIMATION]);

    assert_eq!(run_to_end(&mut c, Instant::now()), Some(AnimationKind::Zoom));
    let t = c.transform();
    assert_eq!(t.scale, 2.5);
    assert!(approx_eq(t.translate_x, -244.44));
    assert!(approx_eq(t.translate_y, -125.0));

    assert_eq!(done.state(), CompletionState::Completed);
    assert_eq!(c.baseline(), t);
    assert_eq!(c.state(), ControllerState::Idle);
    assert!(log.borrow().cancelled.contains(&ZOOM_ANIMATION));
    assert_writes_in_bounds(&c, &log);
}

#[test]
fn test_first_frame_is_start_transform() {
    let (mut c, _log) = controller(false);
    c.double_tap(DoubleTapEvent::at(300.0, 150.0));

    let t0 = Instant::now();
    assert_eq!(c.tick(t0), TickOutcome::Running(TransformState::identity()));
    match c.tick(t0 + ms(100)) {
        TickOutcome::Running(t) => assert!(t.scale > 1.0 && t.scale < 2.5),
        other => panic!("expected a running frame, got {:?}", other),
    }
}

#[test]
fn test_double_tap_when_zoomed_resets() {
    let (mut c, _log) = controller(false);
    c.double_tap(DoubleTapEvent::at(300.0, 150.0));
    run_to_end(&mut c, Instant::now());

    let done = c.double_tap(DoubleTapEvent::at(10.0, 10.0));
    assert_eq!(c.state(), ControllerState::Animating(AnimationKind::Reset));
    assert_eq!(run_to_end(&mut c, Instant::now()), Some(AnimationKind::Reset));
    assert!(done.is_completed());
    assert_eq!(c.transform(), TransformState::identity());
}

#[test]
fn test_second_tap_replaces_running_zoom() {
    let (mut c, log) = controller(false);
    let first = c.double_tap(DoubleTapEvent::at(300.0, 150.0));
    let t0 = Instant::now();
    c.tick(t0);
    c.tick(t0 + ms(100));

    // The baseline is still unzoomed, so this zooms again rather than resetting
    let second = c.double_tap(DoubleTapEvent::at(100.0, 100.0));
    assert!(first.is_cancelled());
    assert!(second.is_pending());
    assert_eq!(c.state(), ControllerState::Animating(AnimationKind::Zoom));

    assert_eq!(run_to_end(&mut c, t0 + ms(116)), Some(AnimationKind::Zoom));
    let t = c.transform();
    assert_eq!(t.scale, 2.5);
    assert!(approx_eq(t.translate_x, 244.44));
    assert!(approx_eq(t.translate_y, 0.0));
    assert!(second.is_completed());
    assert!(first.is_cancelled());
    assert_writes_in_bounds(&c, &log);
}

#[test]
fn test_wide_image_zooms_to_fill() {
    let (mut c, _log) = controller(false);
    c.set_intrinsic_size(Size::new(4000.0, 500.0));

    c.double_tap(DoubleTapEvent::at(200.0, 100.0));
    run_to_end(&mut c, Instant::now());
    assert!(approx_eq(c.transform().scale, 4.0));
    assert_eq!(c.transform().translation(), panzoom_math::Offset::ZERO);
}

#[test]
fn test_bounce_overshoots_then_lands_on_target() {
    let (mut c, log) = controller(true);
    let done = c.double_tap(DoubleTapEvent::at(300.0, 150.0));
    run_to_end(&mut c, Instant::now());

    let peak = log
        .borrow()
        .writes
        .iter()
        .map(|w| w.scale)
        .fold(f32::MIN, f32::max);
    assert!(peak > 2.5, "spring should overshoot, peaked at {}", peak);

    let t = c.transform();
    assert_eq!(t.scale, 2.5);
    assert!(approx_eq(t.translate_x, -244.44));
    assert!(approx_eq(t.translate_y, -125.0));
    assert!(done.is_completed());
    assert_writes_in_bounds(&c, &log);
}

#[test]
fn test_zero_viewport_zooms_in_place() {
    let (mut c, _log) = controller(false);
    c.set_viewport(Size::ZERO);

    c.double_tap(DoubleTapEvent::at(300.0, 150.0));
    run_to_end(&mut c, Instant::now());
    assert_eq!(c.transform(), TransformState::new(2.5, 0.0, 0.0));
}

#[test]
fn test_double_tap_during_pan_is_refused() {
    let (mut c, _log) = controller(false);
    pinch(&mut c, 2.0);
    c.pan(PanEvent::start());

    let done = c.double_tap(DoubleTapEvent::at(300.0, 150.0));
    assert!(done.is_cancelled());
    assert!(matches!(c.state(), ControllerState::Panning(_)));
    assert!(!c.is_animating());
}

use super::*;
use crate::animation::ZOOM_ANIMATION;
use crate::controller::ControllerState;
use crate::gesture::DoubleTapEvent;

#[test]
fn test_reset_at_rest_is_noop() {
    let (mut c, log) = controller(false);
    let done = c.reset_image();

    assert!(done.is_completed());
    assert!(!c.is_animating());
    assert!(log.borrow().writes.is_empty());
    assert!(log.borrow().requested.is_empty());
}

#[test]
fn test_reset_converges_to_identity() {
    let (mut c, log) = controller(false);
    pinch(&mut c, 2.0);
    pan(&mut c, 120.0, -60.0);

    let done = c.reset_image();
    assert_eq!(run_to_end(&mut c, Instant::now()), Some(AnimationKind::Reset));
    assert_eq!(c.transform(), TransformState::identity());
    assert_eq!(c.baseline(), TransformState::identity());
    assert!(done.is_completed());
    assert_writes_in_bounds(&c, &log);
}

#[test]
fn test_bounce_reset_floors_scale() {
    let (mut c, log) = controller(true);
    pinch(&mut c, 8.0);
    assert_eq!(c.transform().scale, 8.0);

    c.reset_image();
    assert_eq!(run_to_end(&mut c, Instant::now()), Some(AnimationKind::Reset));
    assert_eq!(c.transform(), TransformState::identity());

    let lowest = log
        .borrow()
        .writes
        .iter()
        .map(|w| w.scale)
        .fold(f32::MAX, f32::min);
    // The spring undershoots well below zero here
    assert_eq!(lowest, 0.01);
    assert_writes_in_bounds(&c, &log);
}

#[test]
fn test_second_reset_replaces_first() {
    let (mut c, log) = controller(false);
    pinch(&mut c, 3.0);

    let first = c.reset_image();
    let t0 = Instant::now();
    c.tick(t0);
    c.tick(t0 + ms(80));
    let second = c.reset_image();

    assert!(first.is_cancelled());
    assert_eq!(log.borrow().requested, vec![ZOOM_ANIMATION, ZOOM_ANIMATION]);
    run_to_end(&mut c, t0 + ms(96));
    assert!(second.is_completed());
    assert_eq!(c.transform(), TransformState::identity());
}

#[test]
fn test_reset_cancels_running_zoom() {
    let (mut c, _log) = controller(false);
    let zoom = c.double_tap(DoubleTapEvent::at(300.0, 150.0));
    let t0 = Instant::now();
    c.tick(t0);
    c.tick(t0 + ms(50));

    let reset = c.reset_image();
    assert!(zoom.is_cancelled());
    assert_eq!(c.state(), ControllerState::Animating(AnimationKind::Reset));

    assert_eq!(run_to_end(&mut c, t0 + ms(66)), Some(AnimationKind::Reset));
    assert!(reset.is_completed());
    assert_eq!(c.transform(), TransformState::identity());
}

#[test]
fn test_reset_during_pan_commits_then_animates() {
    let (mut c, _log) = controller(false);
    pinch(&mut c, 2.0);
    c.pan(PanEvent::start());
    c.pan(PanEvent::update(40.0, 0.0));

    let done = c.reset_image();
    assert!(approx_eq(c.baseline().translate_x, 40.0));
    assert_eq!(c.state(), ControllerState::Animating(AnimationKind::Reset));

    // Trailing end of the interrupted pan changes nothing
    c.pan(PanEvent::end());
    assert!(c.is_animating());

    run_to_end(&mut c, Instant::now());
    assert!(done.is_completed());
}

use panzoom_math::AspectMode;

use super::*;
use crate::animation::ZOOM_ANIMATION;
use crate::controller::ControllerState;
use crate::gesture::{DoubleTapEvent, GestureEvent};

#[test]
fn test_detach_cancels_running_animation() {
    let (mut c, log) = controller(false);
    let done = c.double_tap(DoubleTapEvent::at(300.0, 150.0));
    let t0 = Instant::now();
    c.tick(t0);

    c.detach();
    assert!(done.is_cancelled());
    assert!(c.is_detached());
    assert_eq!(log.borrow().cancelled, vec![ZOOM_ANIMATION]);

    let writes = log.borrow().writes.len();
    assert_eq!(c.tick(t0 + ms(500)), TickOutcome::Idle);
    assert_eq!(log.borrow().writes.len(), writes);
}

#[test]
fn test_detached_controller_ignores_events() {
    let (mut c, log) = controller(false);
    c.detach();
    c.detach();

    pinch(&mut c, 3.0);
    pan(&mut c, 50.0, 50.0);
    assert!(c.double_tap(DoubleTapEvent::at(300.0, 150.0)).is_cancelled());
    assert!(c.reset_image().is_cancelled());

    assert_eq!(c.state(), ControllerState::Detached);
    assert!(log.borrow().writes.is_empty());
    assert!(log.borrow().requested.is_empty());
}

#[test]
fn test_drop_cancels_running_animation() {
    let (mut c, log) = controller(true);
    let done = c.double_tap(DoubleTapEvent::at(300.0, 150.0));
    c.tick(Instant::now());

    drop(c);
    assert!(done.is_cancelled());
    assert!(log.borrow().cancelled.contains(&ZOOM_ANIMATION));
}

#[test]
fn test_viewport_change_reclamps() {
    let (mut c, log) = controller(false);
    pinch(&mut c, 2.0);
    pan(&mut c, 500.0, -500.0);

    let rendered = c.set_viewport(Size::new(600.0, 200.0));
    assert!(approx_eq(rendered.width, 355.56));
    assert!(approx_eq(rendered.height, 200.0));

    let t = c.transform();
    assert!(approx_eq(t.translate_x, 55.56));
    assert!(approx_eq(t.translate_y, -100.0));
    assert_eq!(c.baseline(), t);
    assert_eq!(*log.borrow().writes.last().unwrap(), t);
}

#[test]
fn test_layout_setters_return_rendered_size() {
    let (mut c, _log) = controller(false);

    let rendered = c.set_explicit_size(Some(Size::new(100.0, 100.0)));
    assert_eq!(rendered, Size::new(200.0, 200.0));

    let rendered = c.set_aspect_mode(AspectMode::Fill);
    assert_eq!(rendered, VIEWPORT);
    assert_eq!(c.aspect_mode(), AspectMode::Fill);

    c.set_aspect_mode(AspectMode::AspectFit);
    let rendered = c.set_explicit_size(None);
    assert!(approx_eq(rendered.width, 355.56));
}

#[test]
fn test_bounce_toggle_applies_to_next_animation() {
    let (mut c, log) = controller(false);
    assert!(!c.bounce_enabled());

    c.set_bounce_enabled(true);
    c.double_tap(DoubleTapEvent::at(300.0, 150.0));
    run_to_end(&mut c, Instant::now());

    let peak = log
        .borrow()
        .writes
        .iter()
        .map(|w| w.scale)
        .fold(f32::MIN, f32::max);
    assert!(peak > 2.5);
}

#[test]
fn test_handle_dispatches_events() {
    let (mut c, _log) = controller(false);

    assert!(c.handle(PinchEvent::start()).is_none());
    assert!(c.handle(PinchEvent::update(2.0)).is_none());
    assert!(c.handle(GestureEvent::Pinch(PinchEvent::end())).is_none());
    assert!(approx_eq(c.baseline().scale, 2.0));

    let done = c.handle(DoubleTapEvent::at(0.0, 0.0));
    assert!(done.is_some());
    assert_eq!(c.state(), ControllerState::Animating(AnimationKind::Reset));
}

#[test]
fn test_invalid_config_falls_back_to_defaults() {
    let config = ZoomConfig {
        min_scale: 4.0,
        max_pinch_scale: 2.0,
        ..ZoomConfig::default()
    };
    let c = ZoomController::new(config, RecordingHost::default());
    assert_eq!(c.config().max_pinch_scale, 8.0);
    assert_eq!(c.config().min_scale, 1.0);
}

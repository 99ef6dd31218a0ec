//! Behaviour tests for the zoom controller.
//!
//! Time is injected through `tick`, so every animation is replayed
//! deterministically at a fixed frame interval.

mod double_tap_tests;
mod lifecycle_tests;
mod reset_tests;

use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

use panzoom_math::{Size, TransformState};
use web_time::Instant;

use super::{TickOutcome, ZoomController};
use crate::animation::{AnimationId, AnimationKind};
use crate::config::ZoomConfig;
use crate::gesture::{PanEvent, PinchEvent};
use crate::host::ViewHost;

pub(super) const VIEWPORT: Size = Size::new(400.0, 200.0);
pub(super) const PHOTO: Size = Size::new(1600.0, 900.0);
pub(super) const FRAME_MS: u64 = 16;
pub(super) const EPSILON: f32 = 0.01;

pub(super) fn approx_eq(a: f32, b: f32) -> bool {
    (a - b).abs() < EPSILON
}

pub(super) fn ms(value: u64) -> Duration {
    Duration::from_millis(value)
}

/// Everything the controller sent to its host.
#[derive(Debug, Default)]
pub(super) struct Recorded {
    pub writes: Vec<TransformState>,
    pub requested: Vec<AnimationId>,
    pub cancelled: Vec<AnimationId>,
}

/// Host double that keeps its log alive after the controller is dropped.
#[derive(Debug, Clone, Default)]
pub(super) struct RecordingHost {
    pub log: Rc<RefCell<Recorded>>,
}

impl ViewHost for RecordingHost {
    fn apply_transform(&mut self, transform: &TransformState) {
        self.log.borrow_mut().writes.push(*transform);
    }

    fn request_frames(&mut self, id: AnimationId) {
        self.log.borrow_mut().requested.push(id);
    }

    fn cancel_frames(&mut self, id: AnimationId) {
        self.log.borrow_mut().cancelled.push(id);
    }
}

pub(super) type TestController = ZoomController<RecordingHost>;

/// Controller over a 400x200 viewport showing a 1600x900 photo, with the
/// setup writes cleared from the log.
pub(super) fn controller(bounce: bool) -> (TestController, Rc<RefCell<Recorded>>) {
    let host = RecordingHost::default();
    let log = Rc::clone(&host.log);
    let mut controller = ZoomController::new(ZoomConfig::default().with_bounce(bounce), host);
    controller.set_viewport(VIEWPORT);
    controller.set_intrinsic_size(PHOTO);
    log.borrow_mut().writes.clear();
    (controller, log)
}

/// Run a whole pinch gesture with a single update.
pub(super) fn pinch(controller: &mut TestController, scale_delta: f32) {
    controller.pinch(PinchEvent::start());
    controller.pinch(PinchEvent::update(scale_delta));
    controller.pinch(PinchEvent::end());
}

/// Run a whole pan gesture with a single update.
pub(super) fn pan(controller: &mut TestController, total_x: f32, total_y: f32) {
    controller.pan(PanEvent::start());
    controller.pan(PanEvent::update(total_x, total_y));
    controller.pan(PanEvent::end());
}

/// Tick at the frame interval from `start` until the animation ends.
pub(super) fn run_to_end(controller: &mut TestController, start: Instant) -> Option<AnimationKind> {
    for frame in 0..1000u64 {
        match controller.tick(start + ms(frame * FRAME_MS)) {
            TickOutcome::Running(_) => continue,
            TickOutcome::Finished(kind) => return Some(kind),
            TickOutcome::Idle => return None,
        }
    }
    None
}

/// Every recorded write respects the translation limits of its own scale.
pub(super) fn assert_writes_in_bounds(controller: &TestController, log: &Rc<RefCell<Recorded>>) {
    let rendered = controller.rendered_size();
    for write in &log.borrow().writes {
        assert!(
            write.is_within_bounds(rendered, controller.viewport(), 1e-3),
            "write out of bounds: {:?}",
            write
        );
    }
}

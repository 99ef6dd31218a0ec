//! Gesture/animation state machine.
//!
//! [`ZoomController`] owns the transform. Live gestures write it directly;
//! double-tap and reset hand it to an [`Animation`] that the host ticks once
//! per frame. Every write goes through one clamp, so the translation never
//! exceeds the limits of the scale in effect at that write.
//!
//! The pinch is anchored at the viewport center. Since translation is
//! measured from the centered position, scaling leaves it unchanged apart
//! from the re-clamp.

use std::time::Duration;

use log::{debug, trace, warn};
use panzoom_math::{
    rendered_size_for_mode, tap_zoom_target, AspectMode, Easing, Offset, Size, TransformState,
};
use web_time::Instant;

use crate::animation::{Animation, AnimationKind, AnimationSlot, Completion, Frame, ZOOM_ANIMATION};
use crate::config::ZoomConfig;
use crate::gesture::{
    DoubleTapEvent, GestureEvent, GesturePhase, GestureSession, PanEvent, PanSession, PinchEvent,
    PinchSession,
};
use crate::host::ViewHost;

#[cfg(test)]
mod tests;

/// Where the controller is in its lifecycle.
///
/// Exactly one of pinching, panning or animating is active at a time.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ControllerState {
    Idle,
    Pinching(PinchSession),
    Panning(PanSession),
    Animating(AnimationKind),
    /// Torn down; every event is ignored
    Detached,
}

impl ControllerState {
    /// Session of the live gesture, if one is running.
    pub fn session(&self) -> Option<GestureSession> {
        match self {
            ControllerState::Pinching(session) => Some(GestureSession::Pinch(*session)),
            ControllerState::Panning(session) => Some(GestureSession::Pan(*session)),
            _ => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            ControllerState::Idle => "idle",
            ControllerState::Pinching(_) => "pinching",
            ControllerState::Panning(_) => "panning",
            ControllerState::Animating(_) => "animating",
            ControllerState::Detached => "detached",
        }
    }
}

/// Result of one frame tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TickOutcome {
    /// Nothing is animating
    Idle,
    /// An animation wrote this frame's transform
    Running(TransformState),
    /// An animation reached its target and the baseline was committed
    Finished(AnimationKind),
}

/// Pan/zoom controller for one image viewport.
///
/// Single-threaded: gesture callbacks and frame ticks must come from the
/// same thread (the type is `!Send` through its completion handles).
#[derive(Debug)]
pub struct ZoomController<H: ViewHost> {
    config: ZoomConfig,
    host: H,
    viewport: Size,
    intrinsic_size: Size,
    explicit_size: Option<Size>,
    aspect_mode: AspectMode,
    bounce_enabled: bool,
    /// Transform on screen
    current: TransformState,
    /// Last committed transform; the starting point of the next interaction
    baseline: TransformState,
    state: ControllerState,
    animation: AnimationSlot,
}

impl<H: ViewHost> ZoomController<H> {
    /// Create a controller at the reset state. The viewport starts empty, so
    /// nothing can be panned until [`Self::set_viewport`] is called.
    ///
    /// An invalid configuration is replaced by the defaults.
    pub fn new(config: ZoomConfig, host: H) -> Self {
        let config = match config.validate() {
            Ok(()) => config,
            Err(e) => {
                warn!("Invalid zoom configuration ({}), using defaults", e);
                ZoomConfig::default()
            }
        };
        let bounce_enabled = config.bounce_enabled;
        Self {
            config,
            host,
            viewport: Size::ZERO,
            intrinsic_size: Size::ZERO,
            explicit_size: None,
            aspect_mode: AspectMode::default(),
            bounce_enabled,
            current: TransformState::identity(),
            baseline: TransformState::identity(),
            state: ControllerState::Idle,
            animation: AnimationSlot::new(ZOOM_ANIMATION),
        }
    }

    // ------------------------------------------------------------------------
    // Queries
    // ------------------------------------------------------------------------

    /// Transform currently on screen.
    pub fn transform(&self) -> TransformState {
        self.current
    }

    /// Last committed transform.
    pub fn baseline(&self) -> TransformState {
        self.baseline
    }

    pub fn state(&self) -> ControllerState {
        self.state
    }

    pub fn session(&self) -> Option<GestureSession> {
        self.state.session()
    }

    pub fn config(&self) -> &ZoomConfig {
        &self.config
    }

    pub fn viewport(&self) -> Size {
        self.viewport
    }

    pub fn aspect_mode(&self) -> AspectMode {
        self.aspect_mode
    }

    pub fn bounce_enabled(&self) -> bool {
        self.bounce_enabled
    }

    pub fn is_zoomed(&self) -> bool {
        self.current.scale > self.config.min_scale
    }

    pub fn is_animating(&self) -> bool {
        self.animation.is_active()
    }

    pub fn is_detached(&self) -> bool {
        self.state == ControllerState::Detached
    }

    /// Size of the image at scale 1 for the current layout inputs.
    pub fn rendered_size(&self) -> Size {
        rendered_size_for_mode(
            self.aspect_mode,
            self.viewport,
            self.intrinsic_size,
            self.explicit_size,
        )
    }

    /// Translation limits at the current scale.
    pub fn max_translation(&self) -> Offset {
        self.current.max_translation(self.rendered_size(), self.viewport)
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    // ------------------------------------------------------------------------
    // Layout inputs
    // ------------------------------------------------------------------------

    /// Update the viewport (e.g. after rotation). Returns the new rendered size.
    pub fn set_viewport(&mut self, viewport: Size) -> Size {
        debug!("Viewport set to {}x{}", viewport.width, viewport.height);
        self.viewport = viewport;
        self.relayout()
    }

    /// Update the measured image size. Returns the new rendered size.
    pub fn set_intrinsic_size(&mut self, size: Size) -> Size {
        self.intrinsic_size = size;
        self.relayout()
    }

    /// Override the image size used for the aspect ratio. Returns the new
    /// rendered size.
    pub fn set_explicit_size(&mut self, size: Option<Size>) -> Size {
        self.explicit_size = size;
        self.relayout()
    }

    /// Returns the new rendered size.
    pub fn set_aspect_mode(&mut self, mode: AspectMode) -> Size {
        self.aspect_mode = mode;
        self.relayout()
    }

    /// Choose the spring curve (true) or cubic-out (false) for the next
    /// animation. A running animation keeps its curve.
    pub fn set_bounce_enabled(&mut self, enabled: bool) {
        self.bounce_enabled = enabled;
    }

    /// Re-clamp both transforms against new layout inputs.
    fn relayout(&mut self) -> Size {
        let rendered = self.rendered_size();
        if self.is_detached() {
            return rendered;
        }
        self.baseline = self.baseline.clamped(rendered, self.viewport);
        let current = self.current;
        self.write(current);
        rendered
    }

    // ------------------------------------------------------------------------
    // Gestures
    // ------------------------------------------------------------------------

    /// Dispatch any gesture. Double-taps return their completion handle.
    pub fn handle(&mut self, event: impl Into<GestureEvent>) -> Option<Completion> {
        match event.into() {
            GestureEvent::Pinch(event) => {
                self.pinch(event);
                None
            }
            GestureEvent::Pan(event) => {
                self.pan(event);
                None
            }
            GestureEvent::DoubleTap(event) => Some(self.double_tap(event)),
        }
    }

    pub fn pinch(&mut self, event: PinchEvent) {
        if self.is_detached() {
            return;
        }
        match event.phase {
            GesturePhase::Start => {
                self.begin_pinch();
            }
            GesturePhase::Update => self.update_pinch(event.scale_delta),
            GesturePhase::End | GesturePhase::Cancel => self.end_pinch(),
        }
    }

    fn begin_pinch(&mut self) -> PinchSession {
        self.interrupt();
        let session = PinchSession {
            start_scale: self.current.scale,
            anchor: self.viewport.center(),
        };
        self.state = ControllerState::Pinching(session);
        debug!("Pinch started at scale {:.3}", session.start_scale);
        session
    }

    fn update_pinch(&mut self, scale_delta: f32) {
        if !scale_delta.is_finite() {
            trace!("Ignoring non-finite pinch delta");
            return;
        }
        let session = match self.state {
            ControllerState::Pinching(session) => session,
            _ => self.begin_pinch(),
        };

        let scale = (self.current.scale + (scale_delta - 1.0) * session.start_scale)
            .clamp(self.config.min_scale, self.config.max_pinch_scale);
        let proposed = self.current.with_scale(scale);
        self.write(proposed);
        trace!("Pinch scale {:.3}", self.current.scale);
    }

    fn end_pinch(&mut self) {
        if !matches!(self.state, ControllerState::Pinching(_)) {
            return;
        }
        self.commit();

        if self.current.scale < self.config.reset_threshold {
            debug!(
                "Pinch released at scale {:.3}, snapping back",
                self.current.scale
            );
            self.reset_image();
        } else {
            debug!("Pinch committed at scale {:.3}", self.current.scale);
        }
    }

    pub fn pan(&mut self, event: PanEvent) {
        if self.is_detached() {
            return;
        }
        match event.phase {
            GesturePhase::Start => {
                self.begin_pan();
            }
            GesturePhase::Update => self.update_pan(event.total()),
            GesturePhase::End | GesturePhase::Cancel => self.end_pan(),
        }
    }

    fn begin_pan(&mut self) -> Option<PanSession> {
        if matches!(self.state, ControllerState::Pinching(_)) {
            trace!("Pan ignored while pinching");
            return None;
        }
        self.interrupt();
        let session = PanSession {
            base: self.current.translation(),
        };
        self.state = ControllerState::Panning(session);
        debug!("Pan started from ({:.1}, {:.1})", session.base.x, session.base.y);
        Some(session)
    }

    fn update_pan(&mut self, total: Offset) {
        // An unzoomed image has nothing to pan
        if self.current.scale <= self.config.min_scale {
            return;
        }
        if !total.x.is_finite() || !total.y.is_finite() {
            trace!("Ignoring non-finite pan delta");
            return;
        }
        let session = match self.state {
            ControllerState::Panning(session) => session,
            ControllerState::Pinching(_) => return,
            _ => match self.begin_pan() {
                Some(session) => session,
                None => return,
            },
        };

        let proposed = self.current.with_translation(session.base.add(total));
        self.write(proposed);
    }

    fn end_pan(&mut self) {
        if matches!(self.state, ControllerState::Panning(_)) {
            self.commit();
            debug!(
                "Pan committed at ({:.1}, {:.1})",
                self.baseline.translate_x, self.baseline.translate_y
            );
        }
    }

    /// Zoom to the tapped point, or reset if already zoomed.
    pub fn double_tap(&mut self, event: DoubleTapEvent) -> Completion {
        if self.is_detached() {
            return Completion::cancelled();
        }
        if matches!(
            self.state,
            ControllerState::Pinching(_) | ControllerState::Panning(_)
        ) {
            debug!("Double-tap ignored during a live gesture");
            return Completion::cancelled();
        }
        if self.baseline.scale > self.config.min_scale {
            return self.reset_image();
        }

        let target = tap_zoom_target(
            event.point,
            self.viewport,
            self.rendered_size(),
            self.config.tap_zoom_scale,
            self.config.max_zoom_scale,
        );
        debug!(
            "Double-tap at ({:.1}, {:.1}) zooming to {:.3}",
            event.point.x, event.point.y, target.scale
        );
        let target = TransformState::new(target.scale, target.translation.x, target.translation.y);
        self.animate(AnimationKind::Zoom, target)
    }

    /// Animate back to scale 1 with no translation.
    ///
    /// Already at rest with nothing running, this resolves immediately
    /// without touching the transform.
    pub fn reset_image(&mut self) -> Completion {
        if self.is_detached() {
            return Completion::cancelled();
        }
        if self.state.session().is_some() {
            self.commit();
        }
        if !self.animation.is_active() && self.current.is_identity() {
            self.baseline = self.current;
            return Completion::completed();
        }
        self.animate(AnimationKind::Reset, TransformState::identity())
    }

    // ------------------------------------------------------------------------
    // Animation
    // ------------------------------------------------------------------------

    /// Advance the running animation to `now`. Call once per display refresh
    /// while frames are requested.
    pub fn tick(&mut self, now: Instant) -> TickOutcome {
        let Some(frame) = self.animation.tick(now) else {
            return TickOutcome::Idle;
        };

        match frame {
            Frame::Running(sample) => {
                let floored = sample.with_scale(sample.scale.max(self.config.min_animated_scale));
                self.write(floored);
                trace!(
                    "Frame scale {:.3} translate ({:.1}, {:.1})",
                    self.current.scale,
                    self.current.translate_x,
                    self.current.translate_y
                );
                TickOutcome::Running(self.current)
            }
            Frame::Finished(target) => self.finish_animation(target),
        }
    }

    fn finish_animation(&mut self, target: TransformState) -> TickOutcome {
        let Some(animation) = self.animation.take() else {
            return TickOutcome::Idle;
        };
        self.host.cancel_frames(self.animation.id());

        if !animation.completion().complete() {
            debug!("Dropping result of an animation that was already resolved");
            return TickOutcome::Idle;
        }

        self.write(target);
        self.commit();
        debug!(
            "{:?} animation finished at scale {:.3}",
            animation.kind(),
            self.current.scale
        );
        TickOutcome::Finished(animation.kind())
    }

    fn animate(&mut self, kind: AnimationKind, target: TransformState) -> Completion {
        let (duration_ms, easing) = self.timing(kind);
        let duration = Duration::from_millis(duration_ms);
        let animation = if self.bounce_enabled {
            Animation::coupled(kind, self.current, target, duration, easing)
        } else {
            Animation::independent(kind, self.current, target, duration, easing)
        };
        let completion = animation.completion();

        let id = self.animation.id();
        if self.animation.replace(animation) {
            debug!("Replaced running animation in slot '{}'", id);
            self.host.cancel_frames(id);
        }
        self.state = ControllerState::Animating(kind);
        debug!("{:?} animation started ({} ms, {})", kind, duration_ms, easing.name());
        self.host.request_frames(id);
        completion
    }

    fn timing(&self, kind: AnimationKind) -> (u64, Easing) {
        match (kind, self.bounce_enabled) {
            (AnimationKind::Zoom, true) => (self.config.bounce_zoom_duration_ms, Easing::Spring),
            (AnimationKind::Zoom, false) => (self.config.zoom_duration_ms, Easing::CubicOut),
            (AnimationKind::Reset, true) => (self.config.bounce_reset_duration_ms, Easing::Spring),
            (AnimationKind::Reset, false) => (self.config.reset_duration_ms, Easing::CubicOut),
        }
    }

    // ------------------------------------------------------------------------
    // State plumbing
    // ------------------------------------------------------------------------

    /// Stop whatever drives the transform so a new gesture can take over.
    /// The transform on screen becomes the baseline.
    fn interrupt(&mut self) {
        match self.state {
            ControllerState::Animating(kind) => {
                if self.animation.cancel() {
                    self.host.cancel_frames(self.animation.id());
                    debug!("{:?} animation interrupted", kind);
                }
                self.commit();
            }
            ControllerState::Pinching(_) | ControllerState::Panning(_) => self.commit(),
            ControllerState::Idle | ControllerState::Detached => {}
        }
    }

    /// Fold the on-screen transform into the baseline and go idle.
    fn commit(&mut self) {
        self.baseline = self.current;
        self.state = ControllerState::Idle;
    }

    /// The only place `current` changes: clamp, store, publish.
    fn write(&mut self, proposed: TransformState) {
        let clamped = proposed.clamped(self.rendered_size(), self.viewport);
        self.current = clamped;
        self.host.apply_transform(&clamped);
    }

    /// Tear down: cancel any in-flight animation before anything else, then
    /// ignore every later event. Runs from `Drop` as well; calling it twice
    /// is harmless.
    pub fn detach(&mut self) {
        if self.is_detached() {
            return;
        }
        if self.animation.cancel() {
            self.host.cancel_frames(self.animation.id());
            debug!("Cancelled in-flight animation on detach");
        }
        self.state = ControllerState::Detached;
        debug!("Zoom controller detached");
    }
}

impl<H: ViewHost> Drop for ZoomController<H> {
    fn drop(&mut self) {
        self.detach();
    }
}

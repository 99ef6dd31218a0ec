//! Time-driven transform animations.
//!
//! Animations are not threads. The host's frame scheduler calls
//! [`crate::ZoomController::tick`] once per display refresh and the active
//! [`Animation`] is sampled at that instant. Each animation owns a
//! [`Completion`] that doubles as its cancellation token: nothing is committed
//! after completion unless the token is still pending.

use std::cell::Cell;
use std::fmt;
use std::rc::Rc;
use std::time::Duration;

use panzoom_math::{Easing, TransformState};
use web_time::Instant;

/// Identifier of an animation slot, shared with the host's frame scheduler.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AnimationId(pub &'static str);

impl AnimationId {
    pub fn name(&self) -> &'static str {
        self.0
    }
}

impl fmt::Display for AnimationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0)
    }
}

/// The one slot both double-tap zoom and reset animate through.
pub const ZOOM_ANIMATION: AnimationId = AnimationId("pinch-zoom");

/// What an animation is moving toward.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnimationKind {
    /// Double-tap zoom to a tap target
    Zoom,
    /// Snap back to scale 1 with no translation
    Reset,
}

// ============================================================================
// Completion
// ============================================================================

/// How an animation ended, as seen through its [`Completion`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompletionState {
    Pending,
    Completed,
    Cancelled,
}

/// Shared handle to the outcome of an animation.
///
/// Returned by double-tap and reset; resolves once, to either
/// [`CompletionState::Completed`] or [`CompletionState::Cancelled`].
#[derive(Debug, Clone)]
pub struct Completion {
    state: Rc<Cell<CompletionState>>,
}

impl Completion {
    pub(crate) fn pending() -> Self {
        Self {
            state: Rc::new(Cell::new(CompletionState::Pending)),
        }
    }

    /// A handle for a request that had nothing to animate.
    pub fn completed() -> Self {
        Self {
            state: Rc::new(Cell::new(CompletionState::Completed)),
        }
    }

    /// A handle for a request that was refused.
    pub fn cancelled() -> Self {
        Self {
            state: Rc::new(Cell::new(CompletionState::Cancelled)),
        }
    }

    pub fn state(&self) -> CompletionState {
        self.state.get()
    }

    pub fn is_pending(&self) -> bool {
        self.state() == CompletionState::Pending
    }

    pub fn is_completed(&self) -> bool {
        self.state() == CompletionState::Completed
    }

    pub fn is_cancelled(&self) -> bool {
        self.state() == CompletionState::Cancelled
    }

    /// Resolve as completed. Returns false if it was already resolved.
    pub(crate) fn complete(&self) -> bool {
        self.resolve(CompletionState::Completed)
    }

    /// Resolve as cancelled. Returns false if it was already resolved.
    pub(crate) fn cancel(&self) -> bool {
        self.resolve(CompletionState::Cancelled)
    }

    fn resolve(&self, outcome: CompletionState) -> bool {
        if self.is_pending() {
            self.state.set(outcome);
            true
        } else {
            false
        }
    }
}

// ============================================================================
// Curves and tracks
// ============================================================================

/// A transform component an animation can drive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Property {
    Scale,
    TranslateX,
    TranslateY,
}

impl Property {
    pub fn get(&self, transform: &TransformState) -> f32 {
        match self {
            Property::Scale => transform.scale,
            Property::TranslateX => transform.translate_x,
            Property::TranslateY => transform.translate_y,
        }
    }

    pub fn set(&self, transform: &mut TransformState, value: f32) {
        match self {
            Property::Scale => transform.scale = value,
            Property::TranslateX => transform.translate_x = value,
            Property::TranslateY => transform.translate_y = value,
        }
    }
}

/// Start and end value of one property.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PropertyCurve {
    pub property: Property,
    pub start: f32,
    pub end: f32,
}

impl PropertyCurve {
    /// Value at an eased progress; not clamped.
    pub fn value_at(&self, progress: f32) -> f32 {
        self.start + (self.end - self.start) * progress
    }
}

fn curves(from: &TransformState, to: &TransformState, properties: &[Property]) -> Vec<PropertyCurve> {
    properties
        .iter()
        .map(|&property| PropertyCurve {
            property,
            start: property.get(from),
            end: property.get(to),
        })
        .collect()
}

/// One eased timeline driving one or more property curves.
#[derive(Debug, Clone)]
pub struct Track {
    curves: Vec<PropertyCurve>,
    duration: Duration,
    easing: Easing,
    /// Set by the first sample, so the first frame is exactly t = 0
    started: Option<Instant>,
}

impl Track {
    pub fn new(curves: Vec<PropertyCurve>, duration: Duration, easing: Easing) -> Self {
        Self {
            curves,
            duration,
            easing,
            started: None,
        }
    }

    pub fn easing(&self) -> Easing {
        self.easing
    }

    /// Normalized time at `now`, capped at 1.
    fn time(&mut self, now: Instant) -> f32 {
        let started = *self.started.get_or_insert(now);
        if self.duration.is_zero() {
            return 1.0;
        }
        let elapsed = now.saturating_duration_since(started);
        (elapsed.as_secs_f32() / self.duration.as_secs_f32()).min(1.0)
    }

    /// Write this track's properties into `out`. Returns true once finished,
    /// in which case every property holds exactly its end value.
    fn apply(&mut self, now: Instant, out: &mut TransformState) -> bool {
        let t = self.time(now);
        if t >= 1.0 {
            for curve in &self.curves {
                curve.property.set(out, curve.end);
            }
            return true;
        }

        let progress = self.easing.sample(t);
        for curve in &self.curves {
            curve.property.set(out, curve.value_at(progress));
        }
        false
    }
}

// ============================================================================
// Animation
// ============================================================================

/// Result of sampling an animation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Frame {
    /// Interpolated transform for this frame
    Running(TransformState),
    /// Exact target; the animation is done
    Finished(TransformState),
}

/// An in-flight transition from one transform to another.
#[derive(Debug)]
pub struct Animation {
    kind: AnimationKind,
    from: TransformState,
    target: TransformState,
    tracks: Vec<Track>,
    completion: Completion,
}

impl Animation {
    /// A single driver: scale and translation follow the same eased progress
    /// every frame, so they settle in sync.
    pub fn coupled(
        kind: AnimationKind,
        from: TransformState,
        target: TransformState,
        duration: Duration,
        easing: Easing,
    ) -> Self {
        let all = [Property::Scale, Property::TranslateX, Property::TranslateY];
        let track = Track::new(curves(&from, &target, &all), duration, easing);
        Self::with_tracks(kind, from, target, vec![track])
    }

    /// Two concurrent tweens, one for scale and one for translation. The
    /// animation finishes when both have.
    pub fn independent(
        kind: AnimationKind,
        from: TransformState,
        target: TransformState,
        duration: Duration,
        easing: Easing,
    ) -> Self {
        let scale = Track::new(
            curves(&from, &target, &[Property::Scale]),
            duration,
            easing,
        );
        let translation = Track::new(
            curves(&from, &target, &[Property::TranslateX, Property::TranslateY]),
            duration,
            easing,
        );
        Self::with_tracks(kind, from, target, vec![scale, translation])
    }

    fn with_tracks(
        kind: AnimationKind,
        from: TransformState,
        target: TransformState,
        tracks: Vec<Track>,
    ) -> Self {
        Self {
            kind,
            from,
            target,
            tracks,
            completion: Completion::pending(),
        }
    }

    pub fn kind(&self) -> AnimationKind {
        self.kind
    }

    pub fn target(&self) -> TransformState {
        self.target
    }

    pub fn tracks(&self) -> &[Track] {
        &self.tracks
    }

    /// Handle resolved when this animation completes or is cancelled.
    pub fn completion(&self) -> Completion {
        self.completion.clone()
    }

    /// Sample every track at `now`.
    pub fn tick(&mut self, now: Instant) -> Frame {
        let mut frame = self.from;
        let mut finished = true;
        for track in &mut self.tracks {
            finished &= track.apply(now, &mut frame);
        }

        if finished {
            Frame::Finished(self.target)
        } else {
            Frame::Running(frame)
        }
    }
}

// ============================================================================
// Slot
// ============================================================================

/// Holds at most one animation under a fixed identifier.
///
/// Installing a new animation cancels the previous one; two drivers never
/// run on the same transform.
#[derive(Debug)]
pub struct AnimationSlot {
    id: AnimationId,
    active: Option<Animation>,
}

impl AnimationSlot {
    pub fn new(id: AnimationId) -> Self {
        Self { id, active: None }
    }

    pub fn id(&self) -> AnimationId {
        self.id
    }

    pub fn is_active(&self) -> bool {
        self.active.is_some()
    }

    pub fn kind(&self) -> Option<AnimationKind> {
        self.active.as_ref().map(Animation::kind)
    }

    /// Install `animation`, cancelling whatever was running.
    /// Returns true if a running animation was replaced.
    pub fn replace(&mut self, animation: Animation) -> bool {
        let replaced = self.cancel();
        self.active = Some(animation);
        replaced
    }

    /// Cancel the running animation, if any. Returns true if one was running.
    pub fn cancel(&mut self) -> bool {
        match self.active.take() {
            Some(previous) => {
                previous.completion.cancel();
                true
            }
            None => false,
        }
    }

    /// Sample the running animation.
    pub fn tick(&mut self, now: Instant) -> Option<Frame> {
        self.active.as_mut().map(|animation| animation.tick(now))
    }

    /// Remove the running animation without resolving it.
    pub fn take(&mut self) -> Option<Animation> {
        self.active.take()
    }
}

//! Gesture events consumed by the controller and the sessions they open.

use panzoom_math::{Offset, Point};
use serde::{Deserialize, Serialize};

/// Lifecycle phase of a continuous gesture.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GesturePhase {
    Start,
    Update,
    End,
    /// The recognizer gave up; handled like `End`
    Cancel,
}

impl GesturePhase {
    pub fn is_terminal(&self) -> bool {
        matches!(self, GesturePhase::End | GesturePhase::Cancel)
    }
}

/// One pinch sample. `scale_delta` is the multiplicative change since the
/// previous sample (1.0 = no change).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PinchEvent {
    pub phase: GesturePhase,
    #[serde(default = "no_scale_change")]
    pub scale_delta: f32,
}

fn no_scale_change() -> f32 {
    1.0
}

impl PinchEvent {
    pub fn start() -> Self {
        Self {
            phase: GesturePhase::Start,
            scale_delta: 1.0,
        }
    }

    pub fn update(scale_delta: f32) -> Self {
        Self {
            phase: GesturePhase::Update,
            scale_delta,
        }
    }

    pub fn end() -> Self {
        Self {
            phase: GesturePhase::End,
            scale_delta: 1.0,
        }
    }
}

/// One pan sample. Deltas are totals since the gesture started.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PanEvent {
    pub phase: GesturePhase,
    #[serde(default)]
    pub total_x: f32,
    #[serde(default)]
    pub total_y: f32,
}

impl PanEvent {
    pub fn start() -> Self {
        Self {
            phase: GesturePhase::Start,
            total_x: 0.0,
            total_y: 0.0,
        }
    }

    pub fn update(total_x: f32, total_y: f32) -> Self {
        Self {
            phase: GesturePhase::Update,
            total_x,
            total_y,
        }
    }

    pub fn end() -> Self {
        Self {
            phase: GesturePhase::End,
            total_x: 0.0,
            total_y: 0.0,
        }
    }

    pub fn total(&self) -> Offset {
        Offset::new(self.total_x, self.total_y)
    }
}

/// A double-tap at a view-local point.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DoubleTapEvent {
    pub point: Point,
}

impl DoubleTapEvent {
    pub fn at(x: f32, y: f32) -> Self {
        Self {
            point: Point::new(x, y),
        }
    }
}

/// Any event the controller accepts.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GestureEvent {
    Pinch(PinchEvent),
    Pan(PanEvent),
    DoubleTap(DoubleTapEvent),
}

impl From<PinchEvent> for GestureEvent {
    fn from(event: PinchEvent) -> Self {
        GestureEvent::Pinch(event)
    }
}

impl From<PanEvent> for GestureEvent {
    fn from(event: PanEvent) -> Self {
        GestureEvent::Pan(event)
    }
}

impl From<DoubleTapEvent> for GestureEvent {
    fn from(event: DoubleTapEvent) -> Self {
        GestureEvent::DoubleTap(event)
    }
}

// ============================================================================
// Sessions
// ============================================================================

/// Values captured when a pinch starts.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PinchSession {
    /// Scale at gesture start; weights every update
    pub start_scale: f32,
    /// Point held fixed while scaling (the viewport center)
    pub anchor: Point,
}

/// Values captured when a pan starts.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PanSession {
    /// Translation at gesture start; pan totals are added to it
    pub base: Offset,
}

/// The session of the gesture currently driving the transform.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GestureSession {
    Pinch(PinchSession),
    Pan(PanSession),
}

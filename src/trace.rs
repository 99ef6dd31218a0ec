//! Recorded gesture traces and their replay.
//!
//! A trace is a JSON document describing a viewport, an image, and a sequence
//! of gestures. Replaying it drives a [`ZoomController`] with a synthetic
//! frame clock, so the same trace always yields the same writes.

use std::path::Path;
use std::time::Duration;

use log::{debug, info, warn};
use panzoom_math::{AspectMode, Size, TransformState};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use web_time::Instant;

use crate::animation::{Completion, CompletionState};
use crate::constants::{REPLAY_FRAME_MS, REPLAY_MAX_DRAIN_FRAMES};
use crate::controller::{TickOutcome, ZoomController};
use crate::gesture::{DoubleTapEvent, PanEvent, PinchEvent};
use crate::host::ViewHost;

/// Errors that can occur while loading a trace.
#[derive(Error, Debug)]
pub enum TraceError {
    /// I/O error reading the trace file
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON parsing error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// One step of a trace.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum TraceEvent {
    Pinch(PinchEvent),
    Pan(PanEvent),
    DoubleTap(DoubleTapEvent),
    /// Programmatic reset, as a host button would trigger
    Reset,
    /// Let frames run without input
    Wait { ms: u64 },
    /// Resize the viewport, e.g. on rotation
    Viewport(Size),
}

fn default_frame_ms() -> u64 {
    REPLAY_FRAME_MS
}

/// A replayable gesture recording.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Trace {
    pub viewport: Size,
    pub image: Size,
    #[serde(default)]
    pub explicit_size: Option<Size>,
    #[serde(default)]
    pub aspect_mode: AspectMode,
    #[serde(default = "default_frame_ms")]
    pub frame_ms: u64,
    pub events: Vec<TraceEvent>,
}

impl Trace {
    pub fn from_json(json: &str) -> Result<Self, TraceError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Read a trace from a JSON file.
    pub fn load(path: &Path) -> Result<Self, TraceError> {
        let json = std::fs::read_to_string(path)?;
        let trace = Self::from_json(&json)?;
        debug!("Loaded trace with {} events from {:?}", trace.events.len(), path);
        Ok(trace)
    }

    /// Built-in session: pinch in, pan to the edge, double-tap out, double-tap
    /// into a corner, then reset.
    pub fn demo() -> Self {
        use TraceEvent::*;

        let mut events = vec![Pinch(PinchEvent::start())];
        events.extend((0..10).map(|_| Pinch(PinchEvent::update(1.1))));
        events.push(Pinch(PinchEvent::end()));

        events.push(Pan(PanEvent::start()));
        events.extend((1..=10).map(|i| Pan(PanEvent::update(i as f32 * 30.0, i as f32 * -20.0))));
        events.push(Pan(PanEvent::end()));

        events.extend([
            DoubleTap(DoubleTapEvent::at(200.0, 100.0)),
            Wait { ms: 700 },
            DoubleTap(DoubleTapEvent::at(300.0, 150.0)),
            Wait { ms: 100 },
            Viewport(Size::new(200.0, 400.0)),
            Wait { ms: 700 },
            Reset,
        ]);

        Self {
            viewport: Size::new(400.0, 200.0),
            image: Size::new(1600.0, 900.0),
            explicit_size: None,
            aspect_mode: AspectMode::AspectFit,
            frame_ms: REPLAY_FRAME_MS,
            events,
        }
    }
}

/// What a replay did.
#[derive(Debug, Clone)]
pub struct ReplaySummary {
    pub events: usize,
    pub frames: usize,
    /// One handle per double-tap or reset, in trace order
    pub completions: Vec<Completion>,
    pub final_transform: TransformState,
}

impl ReplaySummary {
    pub fn count(&self, state: CompletionState) -> usize {
        self.completions.iter().filter(|c| c.state() == state).count()
    }
}

/// Synthetic frame clock.
struct FrameClock {
    now: Instant,
    interval: Duration,
    frames: usize,
}

impl FrameClock {
    fn tick<H: ViewHost>(&mut self, controller: &mut ZoomController<H>) -> TickOutcome {
        let outcome = controller.tick(self.now);
        self.now += self.interval;
        self.frames += 1;
        outcome
    }
}

/// Replay `trace` into `controller`, starting the clock at `start`.
///
/// Each event is followed by one frame. After the last event, frames keep
/// running until the controller settles.
pub fn replay<H: ViewHost>(
    controller: &mut ZoomController<H>,
    trace: &Trace,
    start: Instant,
) -> ReplaySummary {
    controller.set_viewport(trace.viewport);
    controller.set_intrinsic_size(trace.image);
    controller.set_explicit_size(trace.explicit_size);
    controller.set_aspect_mode(trace.aspect_mode);

    let frame_ms = trace.frame_ms.max(1);
    let mut clock = FrameClock {
        now: start,
        interval: Duration::from_millis(frame_ms),
        frames: 0,
    };
    let mut completions = Vec::new();

    for event in &trace.events {
        match *event {
            TraceEvent::Pinch(pinch) => controller.pinch(pinch),
            TraceEvent::Pan(pan) => controller.pan(pan),
            TraceEvent::DoubleTap(tap) => completions.push(controller.double_tap(tap)),
            TraceEvent::Reset => completions.push(controller.reset_image()),
            TraceEvent::Wait { ms } => {
                for _ in 0..ms / frame_ms {
                    clock.tick(controller);
                }
                continue;
            }
            TraceEvent::Viewport(size) => {
                controller.set_viewport(size);
            }
        }
        clock.tick(controller);
    }

    let mut drained = 0;
    while controller.is_animating() {
        if drained == REPLAY_MAX_DRAIN_FRAMES {
            warn!("Animation still running after {} frames, giving up", drained);
            break;
        }
        clock.tick(controller);
        drained += 1;
    }

    let summary = ReplaySummary {
        events: trace.events.len(),
        frames: clock.frames,
        completions,
        final_transform: controller.transform(),
    };
    info!(
        "Replayed {} events over {} frames, final scale {:.3}",
        summary.events, summary.frames, summary.final_transform.scale
    );
    summary
}

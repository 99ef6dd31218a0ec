//! Panzoom - pinch, pan and double-tap zoom for a single image view
//!
//! [`ZoomController`] turns gesture events into a clamped scale/translation
//! transform and drives the double-tap and reset animations from host frame
//! ticks. Rendering stays with the host, behind the [`ViewHost`] trait.

pub mod animation;
pub mod config;
pub mod constants;
pub mod controller;
pub mod gesture;
pub mod host;
pub mod logging;
pub mod trace;

pub use animation::{AnimationId, AnimationKind, Completion, CompletionState, ZOOM_ANIMATION};
pub use config::{ConfigError, LogLevel, ZoomConfig};
pub use controller::{ControllerState, TickOutcome, ZoomController};
pub use gesture::{
    DoubleTapEvent, GestureEvent, GesturePhase, GestureSession, PanEvent, PanSession, PinchEvent,
    PinchSession,
};
pub use host::{NullHost, ViewHost};
pub use panzoom_math::{AspectMode, Easing, Offset, Point, Size, TransformState};

//! Default tuning values for the zoom controller.
//!
//! These seed [`crate::config::ZoomConfig`]; the controller reads the config,
//! never these constants directly.

// =============================================================================
// Scale limits
// =============================================================================

/// Lower bound for live pinch scale
pub const MIN_SCALE: f32 = 1.0;

/// Upper bound for live pinch scale
pub const MAX_PINCH_SCALE: f32 = 8.0;

/// A pinch released below this scale snaps back to the reset state
pub const RESET_THRESHOLD: f32 = 1.1;

/// Floor applied to animated scale so a spring overshoot never reaches zero
pub const MIN_ANIMATED_SCALE: f32 = 0.01;

// =============================================================================
// Animation timing (milliseconds)
// =============================================================================

/// Double-tap zoom without bounce
pub const ZOOM_DURATION_MS: u64 = 250;

/// Double-tap zoom with bounce; longer so the overshoot is visible
pub const BOUNCE_ZOOM_DURATION_MS: u64 = 600;

/// Reset without bounce
pub const RESET_DURATION_MS: u64 = 250;

/// Reset with bounce
pub const BOUNCE_RESET_DURATION_MS: u64 = 600;

/// Frame interval used by the trace replay (about 60 Hz)
pub const REPLAY_FRAME_MS: u64 = 16;

/// Frames the replay will tick after the last event before giving up
pub const REPLAY_MAX_DRAIN_FRAMES: usize = 600;

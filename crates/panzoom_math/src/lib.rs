//! panzoom_math - easing curves and letterbox-aware bounds for pan/zoom
//!
//! Pure functions only: nothing in this crate holds state, performs I/O or logs.

pub mod bounds;
pub mod easing;
pub mod geometry;
pub mod transform;

pub use bounds::{
    clamp_translation, fill_scale, image_aspect, max_translation, rendered_size,
    rendered_size_for_mode, tap_zoom_target, AspectMode, ZoomTarget, DEFAULT_MAX_ZOOM_SCALE,
    DEFAULT_TAP_ZOOM_SCALE,
};
pub use easing::{Easing, EasingFn};
pub use geometry::{Offset, Point, Size};
pub use transform::TransformState;

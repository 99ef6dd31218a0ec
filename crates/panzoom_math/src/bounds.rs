//! Letterbox-aware bounds math.
//!
//! All functions here are total: degenerate viewports or image sizes collapse
//! to zero sizes and zero translation limits instead of dividing by zero.

use serde::{Deserialize, Serialize};

use crate::geometry::{Offset, Point, Size};

/// Baseline zoom level for a double-tap.
pub const DEFAULT_TAP_ZOOM_SCALE: f32 = 2.5;

/// Upper bound for any zoom target, including zoom-to-fill.
pub const DEFAULT_MAX_ZOOM_SCALE: f32 = 16.0;

/// How the image is laid out inside the viewport at scale 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AspectMode {
    /// Whole image visible, letterboxed on one axis
    #[default]
    AspectFit,
    /// Image covers the viewport, cropped on one axis
    AspectFill,
    /// Image stretched to the viewport
    Fill,
}

/// Scale and translation a tap-to-zoom should animate to.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ZoomTarget {
    pub scale: f32,
    pub translation: Offset,
}

/// Aspect ratio the image is laid out with.
///
/// An explicit override wins when both of its dimensions are positive, then the
/// intrinsic size, then the viewport itself (no letterboxing).
pub fn image_aspect(viewport: Size, intrinsic: Size, explicit: Option<Size>) -> Option<f32> {
    explicit
        .and_then(|size| size.aspect_ratio())
        .or_else(|| intrinsic.aspect_ratio())
        .or_else(|| viewport.aspect_ratio())
}

/// Rendered size of the image at scale 1 under [`AspectMode::AspectFit`].
pub fn rendered_size(viewport: Size, intrinsic: Size, explicit: Option<Size>) -> Size {
    rendered_size_for_mode(AspectMode::AspectFit, viewport, intrinsic, explicit)
}

/// Rendered size of the image at scale 1 for any aspect mode.
///
/// Returns [`Size::ZERO`] when the viewport has a non-positive dimension.
pub fn rendered_size_for_mode(
    mode: AspectMode,
    viewport: Size,
    intrinsic: Size,
    explicit: Option<Size>,
) -> Size {
    let Some(view_aspect) = viewport.aspect_ratio() else {
        return Size::ZERO;
    };
    let image_aspect = image_aspect(viewport, intrinsic, explicit).unwrap_or(view_aspect);

    let width_constrained = Size::new(viewport.width, viewport.width / image_aspect);
    let height_constrained = Size::new(viewport.height * image_aspect, viewport.height);
    let wider_than_view = image_aspect > view_aspect;

    match mode {
        AspectMode::AspectFit if wider_than_view => width_constrained,
        AspectMode::AspectFit => height_constrained,
        AspectMode::AspectFill if wider_than_view => height_constrained,
        AspectMode::AspectFill => width_constrained,
        AspectMode::Fill => viewport,
    }
}

/// Largest translation per axis that keeps the scaled image covering the viewport.
///
/// An axis on which the scaled image is no larger than the viewport gets a
/// limit of exactly 0.
pub fn max_translation(rendered: Size, scale: f32, viewport: Size) -> Offset {
    let scaled = rendered.scaled(scale);
    let limit = |scaled: f32, view: f32| {
        let half_excess = (scaled - view) / 2.0;
        if half_excess.is_finite() && half_excess > 0.0 {
            half_excess
        } else {
            0.0
        }
    };
    Offset::new(
        limit(scaled.width, viewport.width),
        limit(scaled.height, viewport.height),
    )
}

/// Clamp each axis of `translation` to `[-max, max]`.
pub fn clamp_translation(translation: Offset, max: Offset) -> Offset {
    let clamp = |value: f32, limit: f32| {
        let limit = limit.max(0.0);
        if value.is_nan() {
            0.0
        } else {
            value.clamp(-limit, limit)
        }
    };
    Offset::new(clamp(translation.x, max.x), clamp(translation.y, max.y))
}

/// Smallest uniform scale at which the rendered image covers the viewport on both axes.
///
/// Returns 1.0 when either size is degenerate.
pub fn fill_scale(rendered: Size, viewport: Size) -> f32 {
    if !rendered.is_positive() || !viewport.is_positive() {
        return 1.0;
    }
    (viewport.width / rendered.width).max(viewport.height / rendered.height)
}

/// Target for a double-tap zoom at `tap`.
///
/// The scale is at least `base_scale` and at least the fill scale, capped at
/// `max_scale`. The translation keeps the tapped point where it is on screen,
/// clamped so no empty space is revealed.
pub fn tap_zoom_target(
    tap: Point,
    viewport: Size,
    rendered: Size,
    base_scale: f32,
    max_scale: f32,
) -> ZoomTarget {
    let scale = base_scale
        .max(fill_scale(rendered, viewport))
        .min(max_scale.max(base_scale));

    let center = viewport.center();
    let offset = Offset::new(tap.x - center.x, tap.y - center.y);
    let desired = Offset::new(-offset.x * scale, -offset.y * scale);
    let translation = clamp_translation(desired, max_translation(rendered, scale, viewport));

    ZoomTarget { scale, translation }
}

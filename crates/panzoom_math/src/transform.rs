//! Scale/translation transform applied to the rendered image.

use serde::{Deserialize, Serialize};

use crate::bounds::{clamp_translation, max_translation};
use crate::geometry::{Offset, Size};

/// Represents the scale and translation of the image node.
///
/// Translation is measured from the centered position, in layout units, and
/// scaling is anchored at the viewport center.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TransformState {
    pub scale: f32,
    pub translate_x: f32,
    pub translate_y: f32,
}

impl TransformState {
    /// Create a new transform with the given scale and translation.
    pub fn new(scale: f32, translate_x: f32, translate_y: f32) -> Self {
        Self {
            scale,
            translate_x,
            translate_y,
        }
    }

    /// The reset state: scale 1, no translation.
    pub fn identity() -> Self {
        Self::new(1.0, 0.0, 0.0)
    }

    pub fn is_identity(&self) -> bool {
        *self == Self::identity()
    }

    pub fn translation(&self) -> Offset {
        Offset::new(self.translate_x, self.translate_y)
    }

    /// Same scale, different translation.
    pub fn with_translation(&self, translation: Offset) -> Self {
        Self::new(self.scale, translation.x, translation.y)
    }

    /// Same translation, different scale.
    pub fn with_scale(&self, scale: f32) -> Self {
        Self::new(scale, self.translate_x, self.translate_y)
    }

    /// Translation limits for this transform's scale.
    pub fn max_translation(&self, rendered: Size, viewport: Size) -> Offset {
        max_translation(rendered, self.scale, viewport)
    }

    /// Copy with the translation clamped to the limits of its own scale.
    pub fn clamped(&self, rendered: Size, viewport: Size) -> Self {
        let max = self.max_translation(rendered, viewport);
        self.with_translation(clamp_translation(self.translation(), max))
    }

    /// Whether the translation lies within the limits of its own scale.
    pub fn is_within_bounds(&self, rendered: Size, viewport: Size, tolerance: f32) -> bool {
        let max = self.max_translation(rendered, viewport);
        self.translate_x.abs() <= max.x + tolerance && self.translate_y.abs() <= max.y + tolerance
    }

    /// Interpolate every component with the same progress value.
    ///
    /// `progress` is not clamped, so an overshooting curve overshoots here too.
    pub fn lerp(from: &TransformState, to: &TransformState, progress: f32) -> TransformState {
        let mix = |a: f32, b: f32| a + (b - a) * progress;
        TransformState {
            scale: mix(from.scale, to.scale),
            translate_x: mix(from.translate_x, to.translate_x),
            translate_y: mix(from.translate_y, to.translate_y),
        }
    }
}

impl Default for TransformState {
    fn default() -> Self {
        Self::identity()
    }
}

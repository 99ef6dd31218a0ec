//! The presentation-layer seam.
//!
//! The controller never touches a visual tree. It writes transforms and frame
//! requests to a [`ViewHost`], which the embedding UI implements.

use panzoom_math::TransformState;

use crate::animation::AnimationId;

/// Receives everything the controller produces.
pub trait ViewHost {
    /// Apply a transform to the rendered image node.
    ///
    /// Called on every write, live or animated. The translation is already
    /// clamped for the transform's scale.
    fn apply_transform(&mut self, transform: &TransformState);

    /// Start delivering frame ticks for `id` until cancelled.
    fn request_frames(&mut self, _id: AnimationId) {}

    /// Stop delivering frame ticks for `id`.
    fn cancel_frames(&mut self, _id: AnimationId) {}
}

/// A host that discards everything, for headless use.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullHost;

impl ViewHost for NullHost {
    fn apply_transform(&mut self, _transform: &TransformState) {}
}

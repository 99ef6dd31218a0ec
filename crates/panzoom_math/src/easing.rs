//! Easing curves for transform animations.
//!
//! Every curve maps normalized time `t` (0.0 to 1.0) to a progress value.
//! The monotonic curves stay inside [0, 1]. [`Easing::Spring`] overshoots and
//! rings before settling, and its output is deliberately left unclamped:
//! consumers interpolate `start + (end - start) * progress` and may pass the
//! target for a few frames.

use serde::{Deserialize, Serialize};
use std::f32::consts::PI;

/// Easing function type.
pub type EasingFn = fn(f32) -> f32;

/// The curves an animation can be driven with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Easing {
    /// No easing
    Linear,
    /// Slow start, fast end
    CubicIn,
    /// Fast start, slow end
    #[default]
    CubicOut,
    /// Slow start and end
    CubicInOut,
    /// Gentle deceleration along a quarter sine
    SinOut,
    /// Damped sine: overshoots the target and settles near 1
    Spring,
}

impl Easing {
    /// Sample the curve at `t`.
    #[inline]
    pub fn sample(self, t: f32) -> f32 {
        self.function()(t)
    }

    /// The plain function behind this curve.
    pub fn function(self) -> EasingFn {
        match self {
            Easing::Linear => linear,
            Easing::CubicIn => cubic_in,
            Easing::CubicOut => cubic_out,
            Easing::CubicInOut => cubic_in_out,
            Easing::SinOut => sin_out,
            Easing::Spring => spring,
        }
    }

    /// Whether the output is guaranteed to stay within [0, 1] and never decrease.
    pub fn is_monotonic(self) -> bool {
        !matches!(self, Easing::Spring)
    }

    /// Get the display name for this curve.
    pub fn name(&self) -> &'static str {
        match self {
            Easing::Linear => "Linear",
            Easing::CubicIn => "Cubic In",
            Easing::CubicOut => "Cubic Out",
            Easing::CubicInOut => "Cubic In/Out",
            Easing::SinOut => "Sine Out",
            Easing::Spring => "Spring",
        }
    }

    /// All curves, monotonic ones first.
    pub fn all() -> &'static [Easing] {
        &[
            Easing::Linear,
            Easing::CubicIn,
            Easing::CubicOut,
            Easing::CubicInOut,
            Easing::SinOut,
            Easing::Spring,
        ]
    }
}

#[inline]
pub fn linear(t: f32) -> f32 {
    t
}

#[inline]
pub fn cubic_in(t: f32) -> f32 {
    t.powi(3)
}

#[inline]
pub fn cubic_out(t: f32) -> f32 {
    1.0 - (1.0 - t).powi(3)
}

#[inline]
pub fn cubic_in_out(t: f32) -> f32 {
    if t < 0.5 {
        4.0 * t.powi(3)
    } else {
        1.0 - (-2.0 * t + 2.0).powi(3) / 2.0
    }
}

#[inline]
pub fn sin_out(t: f32) -> f32 {
    (t * PI / 2.0).sin()
}

/// `sin(-13π/2 · (t + 1)) · 2^(-10t) + 1`
///
/// Starts at 0, swings past 1 several times with a decaying amplitude and
/// ends within a rounding error of 1.
#[inline]
pub fn spring(t: f32) -> f32 {
    (-13.0 * PI / 2.0 * (t + 1.0)).sin() * 2.0_f32.powf(-10.0 * t) + 1.0
}

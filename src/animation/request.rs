//! Fire-and-forget animation commands.
//!
//! The carousel never touches animated values directly. It emits
//! [`AnimationRequest`]s and the [`TweenScheduler`](super::TweenScheduler)
//! decides how they play out over time.

use std::time::Duration;

use super::easing::EasingFunction;

/// A continuous property that can be tweened.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AnimationTarget {
    /// Rotation of the planet group about the vertical axis, in radians.
    GroupRotationY,
    /// Vertical offset of the heading layer, in percent of its own height.
    HeadingOffset,
}

impl AnimationTarget {
    /// Every animatable target, in a stable order.
    pub const ALL: [Self; Self::COUNT] =
        [Self::GroupRotationY, Self::HeadingOffset];

    /// Number of animatable targets.
    pub const COUNT: usize = 2;

    /// Dense index for per-target storage.
    #[must_use]
    pub(crate) const fn index(self) -> usize {
        match self {
            Self::GroupRotationY => 0,
            Self::HeadingOffset => 1,
        }
    }
}

/// How a request changes its target.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Change {
    /// Relative change: end value is the value at issue time plus `delta`.
    By(f32),
    /// Absolute change: end value is exactly this value.
    To(f32),
}

impl Change {
    /// Resolve the end value given the property value at issue time.
    #[must_use]
    pub fn resolve(self, start: f32) -> f32 {
        match self {
            Self::By(delta) => start + delta,
            Self::To(value) => value,
        }
    }
}

/// "Animate this property by/to a value over time with this curve."
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnimationRequest {
    /// Which property to animate.
    pub target: AnimationTarget,
    /// Relative or absolute change.
    pub change: Change,
    /// Tween duration.
    pub duration: Duration,
    /// Easing curve.
    pub easing: EasingFunction,
}

impl AnimationRequest {
    /// Relative tween of `target` by `delta`.
    #[must_use]
    pub fn by(
        target: AnimationTarget,
        delta: f32,
        duration: Duration,
        easing: EasingFunction,
    ) -> Self {
        Self {
            target,
            change: Change::By(delta),
            duration,
            easing,
        }
    }

    /// Absolute tween of `target` to `value`.
    #[must_use]
    pub fn to(
        target: AnimationTarget,
        value: f32,
        duration: Duration,
        easing: EasingFunction,
    ) -> Self {
        Self {
            target,
            change: Change::To(value),
            duration,
            easing,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn relative_change_adds_to_start() {
        assert_eq!(Change::By(-100.0).resolve(-200.0), -300.0);
    }

    #[test]
    fn absolute_change_ignores_start() {
        assert_eq!(Change::To(0.0).resolve(-300.0), 0.0);
    }

    #[test]
    fn target_indices_are_dense() {
        for (i, target) in AnimationTarget::ALL.iter().enumerate() {
            assert_eq!(target.index(), i);
        }
    }
}

use std::f32::consts::FRAC_PI_2;
use std::time::Duration;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::animation::EasingFunction;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Scroll", inline)]
#[serde(default)]
/// Gesture gating and the tweens each accepted gesture produces.
pub struct ScrollOptions {
    /// Minimum time between two accepted gestures, in milliseconds.
    #[schemars(title = "Cooldown (ms)", range(min = 0, max = 10000))]
    pub cooldown_ms: u64,
    /// Minimum vertical swipe distance in pixels (exclusive).
    #[schemars(title = "Swipe Threshold", range(min = 0.0, max = 500.0))]
    pub swipe_threshold: f32,
    /// Tween duration in seconds.
    #[schemars(title = "Tween Duration", range(min = 0.0, max = 5.0), extend("step" = 0.05))]
    pub tween_duration_secs: f32,
    /// Easing curve shared by every carousel tween.
    #[schemars(skip)]
    pub easing: EasingFunction,
    /// Heading shift per step, in percent of the heading layer height.
    #[schemars(skip)]
    pub heading_step_percent: f32,
    /// Group rotation per step, in radians.
    #[schemars(skip)]
    pub rotation_step: f32,
}

impl Default for ScrollOptions {
    fn default() -> Self {
        Self {
            cooldown_ms: 2000,
            swipe_threshold: 50.0,
            tween_duration_secs: 1.0,
            easing: EasingFunction::QuadraticInOut,
            heading_step_percent: 100.0,
            rotation_step: FRAC_PI_2,
        }
    }
}

impl ScrollOptions {
    /// Cooldown as a [`Duration`].
    #[must_use]
    pub fn cooldown(&self) -> Duration {
        Duration::from_millis(self.cooldown_ms)
    }

    /// Tween duration as a [`Duration`]. Negative or non-finite values
    /// collapse to zero.
    #[must_use]
    pub fn tween_duration(&self) -> Duration {
        Duration::try_from_secs_f32(self.tween_duration_secs.max(0.0))
            .unwrap_or(Duration::ZERO)
    }
}

//! Tween scheduler for fire-and-forget property animations.
//!
//! The scheduler owns the current value of every [`AnimationTarget`] and the
//! set of tweens driving them. Overlap policy: tweens are written in issue
//! order each update, so on a shared property the most recently issued tween
//! wins for that frame. A tween captures its start value when issued.

use web_time::{Duration, Instant};

use super::easing::EasingFunction;
use super::request::{AnimationRequest, AnimationTarget};

/// A tween currently being played.
#[derive(Debug, Clone)]
pub struct ActiveTween {
    /// Property written by this tween.
    pub target: AnimationTarget,
    /// Value of the property when the tween was issued.
    pub start_value: f32,
    /// Value the property reaches at completion.
    pub end_value: f32,
    /// When the tween was issued.
    pub start_time: Instant,
    /// Total duration.
    pub duration: Duration,
    /// Easing curve.
    pub easing: EasingFunction,
}

impl ActiveTween {
    /// Normalized progress (0.0 to 1.0).
    #[inline]
    #[must_use]
    pub fn progress(&self, now: Instant) -> f32 {
        let elapsed = now.saturating_duration_since(self.start_time);
        if self.duration.is_zero() {
            return 1.0;
        }
        (elapsed.as_secs_f32() / self.duration.as_secs_f32()).min(1.0)
    }

    /// Property value at `now`.
    #[inline]
    #[must_use]
    pub fn value_at(&self, now: Instant) -> f32 {
        let t = self.progress(now);
        if t >= 1.0 {
            return self.end_value;
        }
        let eased = self.easing.evaluate(t);
        self.start_value + (self.end_value - self.start_value) * eased
    }

    /// Whether the tween has reached its end value.
    #[inline]
    #[must_use]
    pub fn is_complete(&self, now: Instant) -> bool {
        self.progress(now) >= 1.0
    }
}

/// Plays [`AnimationRequest`]s against a small fixed set of properties.
#[derive(Debug, Clone)]
pub struct TweenScheduler {
    /// Current value per target, indexed by [`AnimationTarget::index`].
    values: [f32; AnimationTarget::COUNT],
    /// Tweens in issue order.
    active: Vec<ActiveTween>,
}

impl Default for TweenScheduler {
    fn default() -> Self {
        Self::new()
    }
}

impl TweenScheduler {
    /// A scheduler with every property at zero and nothing playing.
    #[must_use]
    pub fn new() -> Self {
        Self {
            values: [0.0; AnimationTarget::COUNT],
            active: Vec::with_capacity(8),
        }
    }

    /// Start a tween for `request`, beginning at `now`.
    pub fn issue(&mut self, request: &AnimationRequest, now: Instant) {
        let start_value = self.value(request.target);
        let end_value = request.change.resolve(start_value);
        log::trace!(
            "tween {:?}: {start_value} -> {end_value} over {:?}",
            request.target,
            request.duration
        );
        self.active.push(ActiveTween {
            target: request.target,
            start_value,
            end_value,
            start_time: now,
            duration: request.duration,
            easing: request.easing,
        });
    }

    /// Issue several requests at the same instant, in order.
    pub fn issue_all<'a>(
        &mut self,
        requests: impl IntoIterator<Item = &'a AnimationRequest>,
        now: Instant,
    ) {
        for request in requests {
            self.issue(request, now);
        }
    }

    /// Advance every tween to `now`. Completed tweens write their end value
    /// and retire.
    ///
    /// Returns `true` if any property changed this call.
    pub fn update(&mut self, now: Instant) -> bool {
        if self.active.is_empty() {
            return false;
        }
        for tween in &self.active {
            self.values[tween.target.index()] = tween.value_at(now);
        }
        self.active.retain(|tween| !tween.is_complete(now));
        true
    }

    /// Current value of `target`.
    #[must_use]
    pub fn value(&self, target: AnimationTarget) -> f32 {
        self.values[target.index()]
    }

    /// Snap `target` to `value` and drop tweens driving it.
    pub fn set(&mut self, target: AnimationTarget, value: f32) {
        self.active.retain(|tween| tween.target != target);
        self.values[target.index()] = value;
    }

    /// Whether any tween is driving `target`.
    #[must_use]
    pub fn is_animating(&self, target: AnimationTarget) -> bool {
        self.active.iter().any(|tween| tween.target == target)
    }

    /// Number of tweens still playing.
    #[must_use]
    pub fn active_count(&self) -> usize {
        self.active.len()
    }
}

//! The rotation controller: cycle index plus the tweens each step emits.

use std::time::Duration;

use super::index::CycleIndex;
use crate::animation::{AnimationRequest, AnimationTarget, EasingFunction};
use crate::input::{Direction, Gesture, GestureSource};
use crate::options::ScrollOptions;

/// Owns the active panel and turns accepted gestures into
/// [`AnimationRequest`]s.
///
/// For every step the controller emits a heading shift and a group
/// rotation. Entering panel 0 additionally snaps the heading layer back to
/// exactly 0%, which absorbs whatever drift the relative shifts built up.
#[derive(Debug, Clone)]
pub struct RotationController {
    index: CycleIndex,
    duration: Duration,
    easing: EasingFunction,
    heading_step: f32,
    rotation_step: f32,
}

impl RotationController {
    /// A controller on panel 0.
    #[must_use]
    pub fn new(options: &ScrollOptions) -> Self {
        Self {
            index: CycleIndex::ZERO,
            duration: options.tween_duration(),
            easing: options.easing,
            heading_step: options.heading_step_percent,
            rotation_step: options.rotation_step,
        }
    }

    /// The active panel.
    #[must_use]
    pub fn index(&self) -> CycleIndex {
        self.index
    }

    /// Step the carousel for an accepted gesture and return the tweens to
    /// play, in issue order.
    pub fn handle_gesture(&mut self, gesture: Gesture) -> Vec<AnimationRequest> {
        self.index = self.index.step(gesture.direction);
        log::info!("panel {}", self.index.value());

        let heading_delta = match (gesture.source, gesture.direction) {
            (GestureSource::Touch, Direction::Backward) => self.heading_step,
            _ => -self.heading_step,
        };
        let rotation_delta = match gesture.direction {
            Direction::Forward => self.rotation_step,
            Direction::Backward => -self.rotation_step,
        };

        let mut requests = vec![
            AnimationRequest::by(
                AnimationTarget::HeadingOffset,
                heading_delta,
                self.duration,
                self.easing,
            ),
            AnimationRequest::by(
                AnimationTarget::GroupRotationY,
                rotation_delta,
                self.duration,
                self.easing,
            ),
        ];
        if self.index == CycleIndex::ZERO {
            requests.push(AnimationRequest::to(
                AnimationTarget::HeadingOffset,
                0.0,
                self.duration,
                self.easing,
            ));
        }
        requests
    }
}

#[cfg(test)]
mod tests {
    use std::f32::consts::FRAC_PI_2;

    use super::*;
    use crate::animation::Change;

    fn controller_at(index: usize) -> RotationController {
        let mut controller = RotationController::new(&ScrollOptions::default());
        controller.index = CycleIndex::new(index);
        controller
    }

    fn gesture(direction: Direction, source: GestureSource) -> Gesture {
        Gesture { direction, source }
    }

    #[test]
    fn forward_emits_heading_up_and_quarter_turn() {
        let mut controller = controller_at(0);
        let requests = controller
            .handle_gesture(gesture(Direction::Forward, GestureSource::Touch));

        assert_eq!(controller.index().value(), 1);
        assert_eq!(requests.len(), 2);
        assert_eq!(requests[0].target, AnimationTarget::HeadingOffset);
        assert_eq!(requests[0].change, Change::By(-100.0));
        assert_eq!(requests[1].target, AnimationTarget::GroupRotationY);
        assert_eq!(requests[1].change, Change::By(FRAC_PI_2));
        for request in &requests {
            assert_eq!(request.duration, Duration::from_secs(1));
            assert_eq!(request.easing, EasingFunction::QuadraticInOut);
        }
    }

    #[test]
    fn wrapping_forward_adds_heading_reset() {
        let mut controller = controller_at(3);
        let requests = controller
            .handle_gesture(gesture(Direction::Forward, GestureSource::Wheel));

        assert_eq!(controller.index(), CycleIndex::ZERO);
        assert_eq!(requests.len(), 3);
        assert_eq!(requests[0].change, Change::By(-100.0));
        assert_eq!(requests[1].change, Change::By(FRAC_PI_2));
        assert_eq!(requests[2].target, AnimationTarget::HeadingOffset);
        assert_eq!(requests[2].change, Change::To(0.0));
    }

    #[test]
    fn backward_swipe_from_zero_has_no_reset() {
        let mut controller = controller_at(0);
        let requests = controller
            .handle_gesture(gesture(Direction::Backward, GestureSource::Touch));

        assert_eq!(controller.index().value(), 3);
        assert_eq!(requests.len(), 2);
        assert_eq!(requests[0].change, Change::By(100.0));
        assert_eq!(requests[1].change, Change::By(-FRAC_PI_2));
    }

    #[test]
    fn backward_into_zero_also_resets_headings() {
        let mut controller = controller_at(1);
        let requests = controller
            .handle_gesture(gesture(Direction::Backward, GestureSource::Touch));
        assert_eq!(controller.index(), CycleIndex::ZERO);
        assert_eq!(requests.last().map(|r| r.change), Some(Change::To(0.0)));
    }

    // Current behavior: a wheel gesture always shifts headings up, even if a
    // caller hands in a backward wheel gesture.
    #[test]
    fn wheel_heading_shift_is_always_upward() {
        let mut controller = controller_at(2);
        let requests = controller
            .handle_gesture(gesture(Direction::Backward, GestureSource::Wheel));
        assert_eq!(requests[0].change, Change::By(-100.0));
        assert_eq!(requests[1].change, Change::By(-FRAC_PI_2));
    }

    #[test]
    fn steps_follow_options() {
        let options = ScrollOptions {
            tween_duration_secs: 0.5,
            heading_step_percent: 50.0,
            rotation_step: 1.0,
            easing: EasingFunction::Linear,
            ..ScrollOptions::default()
        };
        let mut controller = RotationController::new(&options);
        let requests = controller
            .handle_gesture(gesture(Direction::Forward, GestureSource::Touch));
        assert_eq!(requests[0].change, Change::By(-50.0));
        assert_eq!(requests[1].change, Change::By(1.0));
        assert_eq!(requests[1].duration, Duration::from_millis(500));
        assert_eq!(requests[1].easing, EasingFunction::Linear);
    }
}

use web_time::Instant;

use super::controller::RotationController;
use super::index::CycleIndex;
use crate::animation::AnimationRequest;
use crate::input::{GestureEvent, InputNormalizer};
use crate::options::ScrollOptions;

/// Normalizer and controller wired together: raw events in, animation
/// requests out.
///
/// Event handlers close over one router; it holds all carousel state.
#[derive(Debug, Clone)]
pub struct InputRouter {
    normalizer: InputNormalizer,
    controller: RotationController,
}

impl InputRouter {
    /// A router on panel 0 with an open gate.
    #[must_use]
    pub fn new(options: &ScrollOptions) -> Self {
        Self {
            normalizer: InputNormalizer::new(options),
            controller: RotationController::new(options),
        }
    }

    /// Feed one raw event observed at `now`.
    ///
    /// Returns the requests to issue; empty when the event was absorbed
    /// (touch tracking, short swipe, closed gate).
    pub fn handle_event(
        &mut self,
        event: GestureEvent,
        now: Instant,
    ) -> Vec<AnimationRequest> {
        self.normalizer
            .handle_event(event, now)
            .map(|gesture| self.controller.handle_gesture(gesture))
            .unwrap_or_default()
    }

    /// The active panel.
    #[must_use]
    pub fn index(&self) -> CycleIndex {
        self.controller.index()
    }

    /// Read-only access to the normalizer.
    #[must_use]
    pub fn normalizer(&self) -> &InputNormalizer {
        &self.normalizer
    }
}

#[cfg(test)]
mod tests {
    use std::f32::consts::FRAC_PI_2;

    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};
    use web_time::Duration;

    use super::*;
    use crate::animation::{AnimationTarget, Change};
    use crate::carousel::PANEL_COUNT;
    use crate::input::Direction;

    fn router() -> InputRouter {
        InputRouter::new(&ScrollOptions::default())
    }

    fn swipe(
        router: &mut InputRouter,
        distance: f32,
        now: Instant,
    ) -> Vec<AnimationRequest> {
        let start = 500.0;
        assert!(router
            .handle_event(GestureEvent::TouchStart { y: start }, now)
            .is_empty());
        assert!(router
            .handle_event(GestureEvent::TouchMove { y: start - distance }, now)
            .is_empty());
        router.handle_event(GestureEvent::TouchEnd, now)
    }

    #[test]
    fn rejected_wheel_produces_no_requests() {
        let t0 = Instant::now();
        let mut r = router();
        let wheel = GestureEvent::Wheel { delta_y: -1.0 };
        assert_eq!(r.handle_event(wheel, t0).len(), 2);
        assert!(r
            .handle_event(wheel, t0 + Duration::from_millis(1000))
            .is_empty());
        assert_eq!(r.index().value(), 1);
    }

    #[test]
    fn wheel_events_far_apart_are_both_accepted() {
        let t0 = Instant::now();
        let mut r = router();
        let wheel = GestureEvent::Wheel { delta_y: 1.0 };
        assert!(!r.handle_event(wheel, t0).is_empty());
        assert!(!r
            .handle_event(wheel, t0 + Duration::from_millis(2500))
            .is_empty());
        assert_eq!(r.index().value(), 2);
    }

    #[test]
    fn backward_swipe_from_zero() {
        let mut r = router();
        let requests = swipe(&mut r, -60.0, Instant::now());
        assert_eq!(r.index().value(), 3);
        assert_eq!(
            requests
                .iter()
                .map(|req| (req.target, req.change))
                .collect::<Vec<_>>(),
            vec![
                (AnimationTarget::HeadingOffset, Change::By(100.0)),
                (AnimationTarget::GroupRotationY, Change::By(-FRAC_PI_2)),
            ]
        );
    }

    #[test]
    fn short_swipe_changes_nothing() {
        let mut r = router();
        assert!(swipe(&mut r, 50.0, Instant::now()).is_empty());
        assert!(swipe(&mut r, -50.0, Instant::now()).is_empty());
        assert_eq!(r.index(), CycleIndex::ZERO);
    }

    #[test]
    fn fourth_wheel_step_wraps_with_reset() {
        let t0 = Instant::now();
        let mut r = router();
        let wheel = GestureEvent::Wheel { delta_y: 1.0 };
        let mut last = Vec::new();
        for step in 0..4u32 {
            last = r.handle_event(wheel, t0 + Duration::from_secs(3) * step);
        }
        assert_eq!(r.index(), CycleIndex::ZERO);
        assert_eq!(last.len(), 3);
        assert_eq!(last[2].change, Change::To(0.0));
    }

    #[test]
    fn index_tracks_net_accepted_steps() {
        let mut rng = StdRng::seed_from_u64(0x5eed);
        let mut r = router();
        let mut now = Instant::now();
        let mut net: i64 = 0;

        for _ in 0..500 {
            now += Duration::from_millis(rng.random_range(0..4000));
            let before = r.index();
            let accepted = if rng.random_bool(0.5) {
                let gesture = GestureEvent::Wheel {
                    delta_y: rng.random_range(-5.0..5.0),
                };
                !r.handle_event(gesture, now).is_empty()
            } else {
                let distance = rng.random_range(-200.0..200.0_f32);
                let accepted = !swipe(&mut r, distance, now).is_empty();
                if accepted && distance < 0.0 {
                    net -= 2;
                }
                accepted
            };
            if accepted {
                net += 1;
            } else {
                assert_eq!(r.index(), before);
            }
            assert!(r.index().value() < PANEL_COUNT);
            assert_eq!(
                r.index().value() as i64,
                net.rem_euclid(PANEL_COUNT as i64)
            );
        }
    }

    #[test]
    fn accepted_direction_matches_index_delta() {
        let mut r = router();
        let t0 = Instant::now();
        let _ = swipe(&mut r, 120.0, t0);
        assert_eq!(r.index(), CycleIndex::ZERO.step(Direction::Forward));
        let _ = swipe(&mut r, -120.0, t0 + Duration::from_secs(3));
        assert_eq!(r.index(), CycleIndex::ZERO);
    }
}

//! Reduces wheel ticks and touch swipes to discrete carousel steps.
//!
//! The `InputNormalizer` owns the cooldown gate and the in-progress touch.
//! It is the only thing that sits between raw events and the
//! [`RotationController`](crate::carousel::RotationController).

use web_time::Instant;

use super::event::GestureEvent;
use super::gate::CooldownGate;
use crate::options::ScrollOptions;

/// Which way a gesture moves the carousel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    /// Advance to the next panel.
    Forward,
    /// Retreat to the previous panel.
    Backward,
}

/// Where an accepted gesture came from.
///
/// The heading shift differs by source: wheel gestures always shift the
/// headings up, touch gestures follow the swipe direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GestureSource {
    /// Mouse wheel.
    Wheel,
    /// Vertical touch swipe.
    Touch,
}

/// A gesture that passed the distance threshold and the cooldown gate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Gesture {
    /// Step direction.
    pub direction: Direction,
    /// Originating input path.
    pub source: GestureSource,
}

/// Vertical coordinates of the touch currently in progress.
#[derive(Debug, Clone, Copy, Default)]
struct TouchTrack {
    start_y: f32,
    end_y: f32,
}

impl TouchTrack {
    /// Positive when the finger moved up the screen.
    fn distance(self) -> f32 {
        self.start_y - self.end_y
    }
}

/// Converts raw [`GestureEvent`]s into at most one [`Gesture`] per cooldown
/// window.
#[derive(Debug, Clone)]
pub struct InputNormalizer {
    gate: CooldownGate,
    swipe_threshold: f32,
    touch: Option<TouchTrack>,
}

impl InputNormalizer {
    /// Create a normalizer from scroll options.
    #[must_use]
    pub fn new(options: &ScrollOptions) -> Self {
        Self {
            gate: CooldownGate::new(options.cooldown()),
            swipe_threshold: options.swipe_threshold,
            touch: None,
        }
    }

    /// Read-only access to the cooldown gate.
    #[must_use]
    pub fn gate(&self) -> &CooldownGate {
        &self.gate
    }

    /// Process a raw event observed at `now`.
    ///
    /// Returns a gesture only when the event completes a wheel tick or a
    /// swipe that clears both the distance threshold and the cooldown.
    pub fn handle_event(
        &mut self,
        event: GestureEvent,
        now: Instant,
    ) -> Option<Gesture> {
        match event {
            GestureEvent::Wheel { .. } => self.handle_wheel(now),
            GestureEvent::TouchStart { y } => {
                self.touch = Some(TouchTrack {
                    start_y: y,
                    end_y: y,
                });
                None
            }
            GestureEvent::TouchMove { y } => {
                if let Some(track) = &mut self.touch {
                    track.end_y = y;
                }
                None
            }
            GestureEvent::TouchEnd => {
                let track = self.touch.take()?;
                self.handle_swipe(track.distance(), now)
            }
            GestureEvent::TouchCancel => {
                self.touch = None;
                None
            }
        }
    }

    /// Wheel ticks always advance, whatever the scroll sign.
    fn handle_wheel(&mut self, now: Instant) -> Option<Gesture> {
        self.gate.try_accept(now).then_some(Gesture {
            direction: Direction::Forward,
            source: GestureSource::Wheel,
        })
    }

    /// Short swipes are dropped before they can consume the cooldown.
    fn handle_swipe(&mut self, distance: f32, now: Instant) -> Option<Gesture> {
        if distance.abs() <= self.swipe_threshold {
            log::trace!("swipe of {distance}px below threshold");
            return None;
        }
        if !self.gate.try_accept(now) {
            return None;
        }
        let direction = if distance > 0.0 {
            Direction::Forward
        } else {
            Direction::Backward
        };
        Some(Gesture {
            direction,
            source: GestureSource::Touch,
        })
    }
}

#[cfg(test)]
mod tests {
    use web_time::Duration;

    use super::*;

    fn normalizer() -> InputNormalizer {
        InputNormalizer::new(&ScrollOptions::default())
    }

    fn swipe(
        normalizer: &mut InputNormalizer,
        from: f32,
        to: f32,
        now: Instant,
    ) -> Option<Gesture> {
        assert!(normalizer
            .handle_event(GestureEvent::TouchStart { y: from }, now)
            .is_none());
        assert!(normalizer
            .handle_event(GestureEvent::TouchMove { y: to }, now)
            .is_none());
        normalizer.handle_event(GestureEvent::TouchEnd, now)
    }

    #[test]
    fn wheel_always_moves_forward() {
        let t0 = Instant::now();
        for delta_y in [-3.0, 0.0, 3.0] {
            let mut n = normalizer();
            let gesture = n.handle_event(GestureEvent::Wheel { delta_y }, t0);
            assert_eq!(
                gesture,
                Some(Gesture {
                    direction: Direction::Forward,
                    source: GestureSource::Wheel,
                })
            );
        }
    }

    #[test]
    fn rapid_wheel_events_are_debounced() {
        let t0 = Instant::now();
        let mut n = normalizer();
        let wheel = GestureEvent::Wheel { delta_y: 1.0 };
        assert!(n.handle_event(wheel, t0).is_some());
        assert!(n
            .handle_event(wheel, t0 + Duration::from_millis(1000))
            .is_none());
        assert!(n
            .handle_event(wheel, t0 + Duration::from_millis(2001))
            .is_some());
    }

    #[test]
    fn swipe_up_moves_forward() {
        let mut n = normalizer();
        let gesture = swipe(&mut n, 400.0, 300.0, Instant::now());
        assert_eq!(
            gesture,
            Some(Gesture {
                direction: Direction::Forward,
                source: GestureSource::Touch,
            })
        );
    }

    #[test]
    fn swipe_down_moves_backward() {
        let mut n = normalizer();
        let gesture = swipe(&mut n, 300.0, 360.0, Instant::now());
        assert_eq!(gesture.map(|g| g.direction), Some(Direction::Backward));
    }

    #[test]
    fn short_swipes_are_ignored_and_keep_the_gate_open() {
        let t0 = Instant::now();
        let mut n = normalizer();
        assert!(swipe(&mut n, 300.0, 250.0, t0).is_none());
        assert!(swipe(&mut n, 300.0, 350.0, t0).is_none());
        assert!(n.gate().is_open(t0));
        assert!(swipe(&mut n, 300.0, 249.0, t0).is_some());
    }

    #[test]
    fn short_swipe_is_ignored_even_with_gate_closed() {
        let t0 = Instant::now();
        let mut n = normalizer();
        assert!(swipe(&mut n, 300.0, 200.0, t0).is_some());
        assert!(swipe(&mut n, 300.0, 290.0, t0 + Duration::from_secs(5))
            .is_none());
    }

    #[test]
    fn tap_without_movement_has_zero_distance() {
        let t0 = Instant::now();
        let mut n = normalizer();
        // A long swipe first, so a stale end coordinate would be visible.
        assert!(swipe(&mut n, 500.0, 100.0, t0).is_some());

        let later = t0 + Duration::from_secs(5);
        assert!(n
            .handle_event(GestureEvent::TouchStart { y: 300.0 }, later)
            .is_none());
        assert!(n.handle_event(GestureEvent::TouchEnd, later).is_none());
        assert!(n.gate().is_open(later));
    }

    #[test]
    fn touch_end_without_start_is_ignored() {
        let mut n = normalizer();
        assert!(n
            .handle_event(GestureEvent::TouchEnd, Instant::now())
            .is_none());
    }

    #[test]
    fn cancelled_touch_is_discarded() {
        let t0 = Instant::now();
        let mut n = normalizer();
        let _ = n.handle_event(GestureEvent::TouchStart { y: 500.0 }, t0);
        let _ = n.handle_event(GestureEvent::TouchMove { y: 100.0 }, t0);
        assert!(n.handle_event(GestureEvent::TouchCancel, t0).is_none());
        assert!(n.handle_event(GestureEvent::TouchEnd, t0).is_none());
    }

    #[test]
    fn wheel_and_touch_share_one_cooldown() {
        let t0 = Instant::now();
        let mut n = normalizer();
        assert!(n
            .handle_event(GestureEvent::Wheel { delta_y: 1.0 }, t0)
            .is_some());
        let soon = t0 + Duration::from_millis(500);
        assert!(swipe(&mut n, 400.0, 100.0, soon).is_none());
    }
}

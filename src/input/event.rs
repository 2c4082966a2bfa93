/// Platform-agnostic raw input events.
///
/// These are fed into an [`InputNormalizer`](super::InputNormalizer) which
/// reduces them to at most one [`Gesture`](super::Gesture) per cooldown
/// window.
///
/// # Example
///
/// ```ignore
/// let gesture = normalizer.handle_event(
///     GestureEvent::Wheel { delta_y: 1.0 },
///     Instant::now(),
/// );
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GestureEvent {
    /// Mouse wheel tick. Only its occurrence matters.
    Wheel {
        /// Vertical scroll amount as reported by the platform.
        delta_y: f32,
    },
    /// A touch began.
    TouchStart {
        /// Vertical client coordinate in pixels.
        y: f32,
    },
    /// A touch moved.
    TouchMove {
        /// Vertical client coordinate in pixels.
        y: f32,
    },
    /// A touch ended; the swipe is evaluated now.
    TouchEnd,
    /// The platform cancelled the touch. Discards the swipe.
    TouchCancel,
}

#[cfg(feature = "viewer")]
impl From<winit::event::MouseScrollDelta> for GestureEvent {
    fn from(delta: winit::event::MouseScrollDelta) -> Self {
        let delta_y = match delta {
            winit::event::MouseScrollDelta::LineDelta(_, y) => y,
            winit::event::MouseScrollDelta::PixelDelta(pos) => {
                pos.y as f32 * 0.01
            }
        };
        Self::Wheel { delta_y }
    }
}

#[cfg(feature = "viewer")]
impl GestureEvent {
    /// Convert a winit touch, whose location is in physical pixels, into
    /// logical pixels so the swipe threshold means the same on every display.
    #[must_use]
    pub fn from_touch(touch: &winit::event::Touch, scale_factor: f64) -> Self {
        use winit::event::TouchPhase;

        let y = logical_y(touch.location.y, scale_factor);
        match touch.phase {
            TouchPhase::Started => Self::TouchStart { y },
            TouchPhase::Moved => Self::TouchMove { y },
            TouchPhase::Ended => Self::TouchEnd,
            TouchPhase::Cancelled => Self::TouchCancel,
        }
    }
}

#[cfg(feature = "viewer")]
fn logical_y(physical_y: f64, scale_factor: f64) -> f32 {
    let position = winit::dpi::PhysicalPosition::new(0.0, physical_y);
    position.to_logical::<f64>(scale_factor).y as f32
}

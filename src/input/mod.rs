//! Input handling: raw gesture events, the cooldown gate, and the
//! normalizer that turns wheel ticks and swipes into carousel steps.

/// Platform-agnostic gesture events.
pub mod event;
/// Minimum-interval admission filter.
pub mod gate;
/// Converts raw events into discrete gestures.
pub mod normalizer;

pub use event::GestureEvent;
pub use gate::CooldownGate;
pub use normalizer::{Direction, Gesture, GestureSource, InputNormalizer};

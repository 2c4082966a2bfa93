//! Property tweening: easing curves, animation requests, and the scheduler
//! that plays them.

pub mod easing;
pub mod request;
pub mod scheduler;

pub use easing::EasingFunction;
pub use request::{AnimationRequest, AnimationTarget, Change};
pub use scheduler::{ActiveTween, TweenScheduler};

//! The scroll-synchronized planet carousel.
//!
//! A [`CycleIndex`] selects one of [`PANEL_COUNT`] panels. Each accepted
//! gesture steps the index and emits tweens for the planet group rotation
//! and the heading layer offset; the [`InputRouter`] ties this to the
//! [`InputNormalizer`](crate::input::InputNormalizer).

mod controller;
mod index;
mod router;

pub use controller::RotationController;
pub use index::{CycleIndex, PANEL_COUNT};
pub use router::InputRouter;

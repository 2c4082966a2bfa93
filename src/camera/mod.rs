//! Fixed perspective camera and its GPU uniform.

/// Core camera struct and GPU uniform types.
pub mod core;

pub use self::core::{Camera, CameraUniform};

//! GPU resource management utilities.
//!
//! Provides wgpu device/surface initialization, depth and color textures,
//! and shared pipeline boilerplate.

/// Shared bind group layout entries and samplers.
pub mod pipeline_helpers;
/// wgpu device, surface, and queue initialization.
pub mod render_context;
/// Depth attachments and sampled color textures.
pub mod texture;

pub use render_context::{RenderContext, RenderContextError};

//! Rendering for the carousel scene: one textured sphere pipeline drawing the
//! starfield from the inside and the planets from the outside.

pub(crate) mod pipeline_util;
mod sphere;

pub use sphere::{LightingUniform, ModelUniform, SphereRenderer};

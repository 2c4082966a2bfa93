// -- Lint policy ---------------------------------------------------------
// This is the single source of truth for crate-wide lints.

// Broad lint groups
#![deny(clippy::all)]
#![deny(clippy::pedantic)]
#![deny(clippy::nursery)]
// Documentation
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]
#![deny(rustdoc::bare_urls)]
// No panicking in library code
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]
#![deny(clippy::todo)]
#![deny(clippy::unimplemented)]
// No debug/print artifacts
#![deny(clippy::dbg_macro)]
#![deny(clippy::print_stdout)]
#![deny(clippy::print_stderr)]
// Import hygiene
#![deny(clippy::wildcard_imports)]
// Function signature hygiene
#![deny(clippy::too_many_arguments)]
#![deny(clippy::fn_params_excessive_bools)]
// Clone / pass-by-value hygiene
#![deny(clippy::implicit_clone)]
// String hygiene
#![deny(clippy::inefficient_to_string)]
#![deny(clippy::redundant_closure_for_method_calls)]
#![deny(clippy::manual_string_new)]
#![deny(clippy::str_to_string)]
// Cargo lints (warn, not deny since cargo lints can be noisy)
#![warn(clippy::cargo)]
// Unused / redundant code
#![warn(unused_results)]
#![warn(unused_qualifications)]
// Cast hygiene
#![deny(trivial_casts)]
#![deny(trivial_numeric_casts)]
// Tests may unwrap and panic freely.
#![cfg_attr(test, allow(clippy::unwrap_used, clippy::expect_used, clippy::panic))]

//! Scroll-driven planet carousel rendered with wgpu.
//!
//! Four textured planets sit on a tilted ring inside a star-mapped sphere.
//! Each accepted wheel tick or vertical swipe turns the ring a quarter turn
//! and slides a stack of headings by one panel, both eased over one second.
//! A cooldown gate admits at most one step every two seconds.
//!
//! # Key entry points
//!
//! - [`OrreryEngine`] - GPU context, renderer and carousel state in one
//! - [`CarouselState`] - the same behavior without a GPU
//! - [`carousel::InputRouter`] - raw events in, animation requests out
//! - [`options::Options`] - runtime configuration with TOML presets
//! - [`Viewer`] - native window (feature `viewer`)
//! - `web::start` - browser entry point (feature `web`, wasm32 only)
//!
//! # Architecture
//!
//! Input flows one way: [`input::InputNormalizer`] turns raw
//! [`GestureEvent`]s into at most one [`input::Gesture`] per cooldown
//! window, [`carousel::RotationController`] steps the panel index and emits
//! [`animation::AnimationRequest`]s, and [`animation::TweenScheduler`] plays
//! them. Textures load off the render loop and appear when ready.

pub mod animation;
pub mod assets;
pub mod camera;
pub mod carousel;
pub mod engine;
pub mod error;
pub mod gpu;
pub mod input;
pub mod options;
pub mod renderer;
pub mod scene;
#[cfg(feature = "viewer")]
pub mod viewer;
#[cfg(all(feature = "web", target_arch = "wasm32"))]
pub mod web;

pub use engine::{CarouselState, OrreryEngine};
pub use error::OrreryError;
pub use input::GestureEvent;
pub use options::Options;
#[cfg(feature = "viewer")]
pub use viewer::Viewer;

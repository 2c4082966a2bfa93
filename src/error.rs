//! Crate-level error types.

use std::fmt;

use crate::gpu::render_context::RenderContextError;

/// Errors produced by the orrery crate.
///
/// The carousel itself is infallible; these cover the rendering backend
/// around it.
#[derive(Debug)]
pub enum OrreryError {
    /// GPU context initialization failure.
    Gpu(RenderContextError),
    /// Failed to fetch an asset's bytes.
    AssetLoad {
        /// Path or URL of the asset.
        source: String,
        /// Human-readable reason.
        reason: String,
    },
    /// Asset bytes could not be decoded as an image.
    AssetDecode(image::ImageError),
    /// Generic I/O failure.
    Io(std::io::Error),
    /// Failed to spawn a background thread.
    ThreadSpawn(std::io::Error),
    /// TOML options parsing/serialization failure.
    OptionsParse(String),
    /// Viewer event-loop failure.
    Viewer(String),
    /// Browser API failure (missing window, canvas, listener registration).
    Web(String),
}

impl fmt::Display for OrreryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Gpu(e) => write!(f, "GPU error: {e}"),
            Self::AssetLoad { source, reason } => {
                write!(f, "failed to load asset {source}: {reason}")
            }
            Self::AssetDecode(e) => write!(f, "asset decode error: {e}"),
            Self::Io(e) => write!(f, "I/O error: {e}"),
            Self::ThreadSpawn(e) => {
                write!(f, "failed to spawn thread: {e}")
            }
            Self::OptionsParse(msg) => {
                write!(f, "options parse error: {msg}")
            }
            Self::Viewer(msg) => write!(f, "viewer error: {msg}"),
            Self::Web(msg) => write!(f, "web error: {msg}"),
        }
    }
}

impl std::error::Error for OrreryError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Gpu(e) => Some(e),
            Self::AssetDecode(e) => Some(e),
            Self::Io(e) | Self::ThreadSpawn(e) => Some(e),
            _ => None,
        }
    }
}

impl From<RenderContextError> for OrreryError {
    fn from(e: RenderContextError) -> Self {
        Self::Gpu(e)
    }
}

impl From<std::io::Error> for OrreryError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}

impl From<image::ImageError> for OrreryError {
    fn from(e: image::ImageError) -> Self {
        Self::AssetDecode(e)
    }
}

#[cfg(test)]
mod tests {
    use std::error::Error;

    use super::*;

    #[test]
    fn asset_load_names_the_source() {
        let err = OrreryError::AssetLoad {
            source: "assets/textures/stars.jpg".into(),
            reason: "not found".into(),
        };
        assert_eq!(
            err.to_string(),
            "failed to load asset assets/textures/stars.jpg: not found"
        );
        assert!(err.source().is_none());
    }

    #[test]
    fn io_errors_keep_their_source() {
        let err = OrreryError::from(std::io::Error::other("disk gone"));
        assert!(err.to_string().contains("disk gone"));
        assert!(err.source().is_some());
    }
}

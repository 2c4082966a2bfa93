//! Centralized scene and interaction options with TOML preset support.
//!
//! All tweakable settings (gesture gating, tween shape, scene layout, camera,
//! asset sources, headings) are consolidated here. Options serialize to/from
//! TOML for presets stored in `assets/presets/`.

mod assets;
mod camera;
mod scene;
mod scroll;

use std::path::Path;

pub use assets::{AssetOptions, HeadingOptions};
pub use camera::CameraOptions;
pub use scene::SceneOptions;
use schemars::JsonSchema;
pub use scroll::ScrollOptions;
use serde::{Deserialize, Serialize};

use crate::error::OrreryError;

/// Top-level options container. All sub-structs use `#[serde(default)]` so
/// partial TOML files (e.g. only overriding `[scroll]`) work correctly.
#[derive(
    Debug, Clone, Serialize, Deserialize, PartialEq, Default, JsonSchema,
)]
#[serde(default)]
pub struct Options {
    /// Gesture gating and tween parameters.
    pub scroll: ScrollOptions,
    /// Sphere placement and tessellation.
    pub scene: SceneOptions,
    /// Camera projection and placement.
    pub camera: CameraOptions,
    /// Texture sources.
    #[schemars(skip)]
    pub assets: AssetOptions,
    /// Panel headings.
    #[schemars(skip)]
    pub headings: HeadingOptions,
}

impl Options {
    /// Generate JSON Schema describing the tunable options.
    #[must_use]
    pub fn json_schema() -> schemars::Schema {
        schemars::schema_for!(Options)
    }

    /// Parse options from a TOML string. Missing fields use defaults.
    pub fn from_toml(content: &str) -> Result<Self, OrreryError> {
        toml::from_str(content)
            .map_err(|e| OrreryError::OptionsParse(e.to_string()))
    }

    /// Parse options from TOML if any was given, otherwise use defaults.
    /// Used where options arrive as an optional string, such as the browser
    /// entry point.
    pub fn from_toml_or_default(
        content: Option<&str>,
    ) -> Result<Self, OrreryError> {
        content.map_or_else(|| Ok(Self::default()), Self::from_toml)
    }

    /// Load options from a TOML file. Missing fields use defaults.
    pub fn load(path: &Path) -> Result<Self, OrreryError> {
        let content = std::fs::read_to_string(path).map_err(OrreryError::Io)?;
        Self::from_toml(&content)
    }

    /// Save options to a TOML file (pretty-printed).
    pub fn save(&self, path: &Path) -> Result<(), OrreryError> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| OrreryError::OptionsParse(e.to_string()))?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(OrreryError::Io)?;
        }
        std::fs::write(path, content).map_err(OrreryError::Io)
    }

    /// List available preset names (TOML file stems) in a directory.
    #[must_use]
    pub fn list_presets(dir: &Path) -> Vec<String> {
        let mut names = Vec::new();
        if let Ok(entries) = std::fs::read_dir(dir) {
            for entry in entries.flatten() {
                let path = entry.path();
                if path.extension().is_some_and(|ext| ext == "toml") {
                    if let Some(stem) =
                        path.file_stem().and_then(|s| s.to_str())
                    {
                        names.push(stem.to_owned());
                    }
                }
            }
        }
        names.sort();
        names
    }
}

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::carousel::PANEL_COUNT;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Assets", inline)]
#[serde(default)]
/// Texture sources. Each entry is a file path or an http(s) URL.
pub struct AssetOptions {
    /// Color map for each planet, in panel order.
    pub planet_textures: [String; PANEL_COUNT],
    /// Equirectangular star map for the background sphere.
    pub background: String,
    /// Optional HDR environment map used to tint the ambient light.
    pub environment: Option<String>,
}

impl Default for AssetOptions {
    fn default() -> Self {
        Self {
            planet_textures: [
                "assets/textures/csilla/color.png".into(),
                "assets/textures/earth/map.jpg".into(),
                "assets/textures/venus/map.jpg".into(),
                "assets/textures/volcanic/color.png".into(),
            ],
            background: "assets/textures/stars.jpg".into(),
            environment: Some(
                "https://dl.polyhaven.org/file/ph-assets/HDRIs/hdr/1k/moonlit_golf_1k.hdr"
                    .into(),
            ),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Headings", inline)]
#[serde(default)]
/// Heading text shown for each panel.
pub struct HeadingOptions {
    /// One title per panel, in panel order.
    pub titles: [String; PANEL_COUNT],
}

impl Default for HeadingOptions {
    fn default() -> Self {
        Self {
            titles: [
                "Csilla".into(),
                "Earth".into(),
                "Venus".into(),
                "Volcanic".into(),
            ],
        }
    }
}

impl HeadingOptions {
    /// Title for panel `index`, wrapping out-of-range indices.
    #[must_use]
    pub fn title(&self, index: usize) -> &str {
        &self.titles[index % PANEL_COUNT]
    }
}

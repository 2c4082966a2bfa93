use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Scene", inline)]
#[serde(default)]
/// Placement and tessellation of the background and planet spheres.
pub struct SceneOptions {
    /// Radius of the ring the planets sit on.
    #[schemars(title = "Ring Radius", range(min = 1.0, max = 9.0), extend("step" = 0.1))]
    pub ring_radius: f32,
    /// Radius of each planet sphere.
    #[schemars(title = "Planet Radius", range(min = 0.1, max = 3.0), extend("step" = 0.05))]
    pub planet_radius: f32,
    /// Width and height segments of each planet sphere.
    #[schemars(skip)]
    pub planet_segments: u32,
    /// Tilt of the planet group about the X axis, in radians.
    #[schemars(title = "Group Tilt", range(min = -0.5, max = 0.5), extend("step" = 0.01))]
    pub group_tilt: f32,
    /// Vertical offset of the planet group.
    #[schemars(title = "Group Height", range(min = -3.0, max = 3.0), extend("step" = 0.05))]
    pub group_offset_y: f32,
    /// Radius of the inside-out starfield sphere.
    #[schemars(skip)]
    pub background_radius: f32,
    /// Width and height segments of the starfield sphere.
    #[schemars(skip)]
    pub background_segments: u32,
}

impl Default for SceneOptions {
    fn default() -> Self {
        Self {
            ring_radius: 4.8,
            planet_radius: 1.3,
            planet_segments: 60,
            group_tilt: 0.1,
            group_offset_y: -0.8,
            background_radius: 10.0,
            background_segments: 100,
        }
    }
}

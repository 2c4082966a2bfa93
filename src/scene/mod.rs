//! Scene description: where the starfield and planets sit, and the sphere
//! meshes they are drawn with.

mod layout;
pub mod mesh;

pub use layout::SceneLayout;
pub use mesh::{uv_sphere, MeshData, SphereVertex};

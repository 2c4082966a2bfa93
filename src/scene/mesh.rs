//! CPU-side sphere tessellation.

use std::f32::consts::{PI, TAU};

/// Vertex for a textured sphere mesh.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct SphereVertex {
    /// Object-space position.
    pub position: [f32; 3],
    /// Outward unit normal.
    pub normal: [f32; 3],
    /// Equirectangular texture coordinate; v = 0 at the north pole.
    pub uv: [f32; 2],
}

/// Indexed triangle mesh.
#[derive(Debug, Clone, Default)]
pub struct MeshData {
    /// Vertex list.
    pub vertices: Vec<SphereVertex>,
    /// Triangle list indices, counter-clockwise seen from outside.
    pub indices: Vec<u32>,
}

impl MeshData {
    /// Number of indices to draw.
    #[must_use]
    pub fn index_count(&self) -> u32 {
        self.indices.len() as u32
    }
}

/// Generate a latitude/longitude sphere.
///
/// The seam column is duplicated so the texture wraps cleanly, and the
/// degenerate triangles at both poles are skipped. Segment counts below
/// 3 (width) or 2 (height) are raised to those minimums.
#[must_use]
pub fn uv_sphere(
    radius: f32,
    width_segments: u32,
    height_segments: u32,
) -> MeshData {
    let width = width_segments.max(3);
    let height = height_segments.max(2);
    let row_len = width + 1;

    let mut vertices = Vec::with_capacity((row_len * (height + 1)) as usize);
    for iy in 0..=height {
        let v = iy as f32 / height as f32;
        let (sin_theta, cos_theta) = (v * PI).sin_cos();
        for ix in 0..=width {
            let u = ix as f32 / width as f32;
            let (sin_phi, cos_phi) = (u * TAU).sin_cos();
            let normal = [-cos_phi * sin_theta, cos_theta, sin_phi * sin_theta];
            vertices.push(SphereVertex {
                position: normal.map(|c| c * radius),
                normal,
                uv: [u, v],
            });
        }
    }

    let mut indices =
        Vec::with_capacity((6 * width * (height - 1)) as usize);
    for iy in 0..height {
        for ix in 0..width {
            let a = iy * row_len + ix + 1;
            let b = iy * row_len + ix;
            let c = (iy + 1) * row_len + ix;
            let d = (iy + 1) * row_len + ix + 1;
            if iy != 0 {
                indices.extend_from_slice(&[a, b, d]);
            }
            if iy != height - 1 {
                indices.extend_from_slice(&[b, c, d]);
            }
        }
    }

    MeshData { vertices, indices }
}

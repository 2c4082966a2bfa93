use glam::Mat4;
use wgpu::util::DeviceExt;

use super::pipeline_util;
use crate::assets::{AssetSlot, DecodedImage};
use crate::camera::{Camera, CameraUniform};
use crate::carousel::PANEL_COUNT;
use crate::gpu::pipeline_helpers;
use crate::gpu::texture::ColorTexture;
use crate::gpu::RenderContext;
use crate::scene::{uv_sphere, MeshData, SceneLayout, SphereVertex};

/// Ambient light before an environment map has been loaded.
const DEFAULT_AMBIENT: [f32; 3] = [1.0, 1.0, 1.0];
const AMBIENT_INTENSITY: f32 = 0.55;
/// Towards the upper left, in front of the ring.
const KEY_DIRECTION: [f32; 3] = [-0.5, 0.6, 0.8];
const KEY_COLOR: [f32; 3] = [1.0, 0.97, 0.92];
const KEY_INTENSITY: f32 = 0.8;
/// The starfield is ambient-only and boosted so stars read at full
/// brightness.
const BACKGROUND_AMBIENT_GAIN: f32 = 1.0 / AMBIENT_INTENSITY;

const VERTEX_ATTRIBUTES: [wgpu::VertexAttribute; 3] = wgpu::vertex_attr_array![
    0 => Float32x3, // position
    1 => Float32x3, // normal
    2 => Float32x2, // uv
];

/// Scene-wide lighting uniform.
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct LightingUniform {
    /// rgb = ambient tint, w = intensity.
    pub ambient: [f32; 4],
    /// xyz = direction towards the key light.
    pub key_direction: [f32; 4],
    /// rgb = key light color, w = intensity.
    pub key_color: [f32; 4],
}

impl Default for LightingUniform {
    fn default() -> Self {
        let [r, g, b] = DEFAULT_AMBIENT;
        let [x, y, z] = KEY_DIRECTION;
        let [kr, kg, kb] = KEY_COLOR;
        Self {
            ambient: [r, g, b, AMBIENT_INTENSITY],
            key_direction: [x, y, z, 0.0],
            key_color: [kr, kg, kb, KEY_INTENSITY],
        }
    }
}

impl LightingUniform {
    /// Replace the ambient color with an environment's average radiance.
    ///
    /// Only the hue is taken: the tint is rescaled so its brightest channel
    /// is 1, which keeps dark (night-time) environments from blacking out
    /// the scene. A black tint is ignored.
    pub fn set_ambient_tint(&mut self, rgb: [f32; 3]) {
        let peak = rgb.iter().copied().fold(0.0_f32, f32::max);
        if peak <= f32::EPSILON {
            return;
        }
        let [r, g, b] = rgb.map(|c| (c / peak).clamp(0.0, 1.0));
        self.ambient = [r, g, b, self.ambient[3]];
    }
}

/// Per-draw model uniform.
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct ModelUniform {
    /// Object-to-world matrix. Rigid (rotation and translation only).
    pub model: [[f32; 4]; 4],
    /// x = key light weight, y = ambient weight.
    pub params: [f32; 4],
}

impl ModelUniform {
    /// Lit planet at `transform`.
    #[must_use]
    pub fn planet(transform: Mat4) -> Self {
        Self {
            model: transform.to_cols_array_2d(),
            params: [1.0, 1.0, 0.0, 0.0],
        }
    }

    /// Ambient-only starfield at `transform`.
    #[must_use]
    pub fn background(transform: Mat4) -> Self {
        Self {
            model: transform.to_cols_array_2d(),
            params: [0.0, BACKGROUND_AMBIENT_GAIN, 0.0, 0.0],
        }
    }
}

struct GpuMesh {
    vertex_buffer: wgpu::Buffer,
    index_buffer: wgpu::Buffer,
    index_count: u32,
}

impl GpuMesh {
    fn new(device: &wgpu::Device, label: &str, mesh: &MeshData) -> Self {
        let vertex_buffer =
            device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some(&format!("{label} Vertex Buffer")),
                contents: bytemuck::cast_slice(&mesh.vertices),
                usage: wgpu::BufferUsages::VERTEX,
            });
        let index_buffer =
            device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some(&format!("{label} Index Buffer")),
                contents: bytemuck::cast_slice(&mesh.indices),
                usage: wgpu::BufferUsages::INDEX,
            });
        Self {
            vertex_buffer,
            index_buffer,
            index_count: mesh.index_count(),
        }
    }
}

/// One drawable sphere: its model uniform and, once loaded, its texture.
struct DrawSlot {
    model_buffer: wgpu::Buffer,
    model_bind_group: wgpu::BindGroup,
    texture_bind_group: Option<wgpu::BindGroup>,
}

impl DrawSlot {
    fn new(
        device: &wgpu::Device,
        layout: &wgpu::BindGroupLayout,
        label: &str,
        uniform: ModelUniform,
    ) -> Self {
        let model_buffer =
            device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some(&format!("{label} Model Buffer")),
                contents: bytemuck::bytes_of(&uniform),
                usage: wgpu::BufferUsages::UNIFORM
                    | wgpu::BufferUsages::COPY_DST,
            });
        let model_bind_group =
            device.create_bind_group(&wgpu::BindGroupDescriptor {
                label: Some(&format!("{label} Model Bind Group")),
                layout,
                entries: &[wgpu::BindGroupEntry {
                    binding: 0,
                    resource: model_buffer.as_entire_binding(),
                }],
            });
        Self {
            model_buffer,
            model_bind_group,
            texture_bind_group: None,
        }
    }
}

/// Draws the starfield and the planet ring.
///
/// Spheres whose texture has not arrived are skipped.
pub struct SphereRenderer {
    planet_pipeline: wgpu::RenderPipeline,
    background_pipeline: wgpu::RenderPipeline,
    camera: Camera,
    camera_uniform: CameraUniform,
    camera_buffer: wgpu::Buffer,
    lighting: LightingUniform,
    lighting_buffer: wgpu::Buffer,
    frame_bind_group: wgpu::BindGroup,
    texture_layout: wgpu::BindGroupLayout,
    sampler: wgpu::Sampler,
    planet_mesh: GpuMesh,
    background_mesh: GpuMesh,
    planets: [DrawSlot; PANEL_COUNT],
    background: DrawSlot,
}

impl SphereRenderer {
    /// Build meshes, pipelines and uniforms for the given layout.
    pub fn new(
        context: &RenderContext,
        layout: &SceneLayout,
        camera: Camera,
    ) -> Self {
        let device = &context.device;

        let mut camera_uniform = CameraUniform::new();
        camera_uniform.update_view_proj(&camera);
        let camera_buffer =
            device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some("Camera Buffer"),
                contents: bytemuck::bytes_of(&camera_uniform),
                usage: wgpu::BufferUsages::UNIFORM
                    | wgpu::BufferUsages::COPY_DST,
            });
        let lighting = LightingUniform::default();
        let lighting_buffer =
            device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some("Lighting Buffer"),
                contents: bytemuck::bytes_of(&lighting),
                usage: wgpu::BufferUsages::UNIFORM
                    | wgpu::BufferUsages::COPY_DST,
            });

        let frame_layout =
            device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
                label: Some("Frame Bind Group Layout"),
                entries: &[
                    pipeline_helpers::uniform_buffer(
                        0,
                        wgpu::ShaderStages::VERTEX_FRAGMENT,
                    ),
                    pipeline_helpers::uniform_buffer(
                        1,
                        wgpu::ShaderStages::FRAGMENT,
                    ),
                ],
            });
        let frame_bind_group =
            device.create_bind_group(&wgpu::BindGroupDescriptor {
                label: Some("Frame Bind Group"),
                layout: &frame_layout,
                entries: &[
                    wgpu::BindGroupEntry {
                        binding: 0,
                        resource: camera_buffer.as_entire_binding(),
                    },
                    wgpu::BindGroupEntry {
                        binding: 1,
                        resource: lighting_buffer.as_entire_binding(),
                    },
                ],
            });
        let model_layout =
            device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
                label: Some("Model Bind Group Layout"),
                entries: &[pipeline_helpers::uniform_buffer(
                    0,
                    wgpu::ShaderStages::VERTEX_FRAGMENT,
                )],
            });
        let texture_layout =
            device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
                label: Some("Color Map Bind Group Layout"),
                entries: &[
                    pipeline_helpers::texture_2d(0),
                    pipeline_helpers::filtering_sampler(1),
                ],
            });

        let pipeline_layout =
            device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
                label: Some("Sphere Pipeline Layout"),
                bind_group_layouts: &[
                    &frame_layout,
                    &model_layout,
                    &texture_layout,
                ],
                push_constant_ranges: &[],
            });
        let shader = device.create_shader_module(wgpu::include_wgsl!(
            "../../assets/shaders/textured_sphere.wgsl"
        ));
        let format = context.view_format();
        let planet_pipeline = Self::create_pipeline(
            device,
            "Planet",
            &pipeline_layout,
            &shader,
            format,
            wgpu::Face::Back,
        );
        // Seen from inside, so the outward faces are the ones to drop.
        let background_pipeline = Self::create_pipeline(
            device,
            "Background",
            &pipeline_layout,
            &shader,
            format,
            wgpu::Face::Front,
        );

        let planet_mesh = GpuMesh::new(
            device,
            "Planet",
            &uv_sphere(
                layout.planet_radius,
                layout.planet_segments,
                layout.planet_segments,
            ),
        );
        let background_mesh = GpuMesh::new(
            device,
            "Background",
            &uv_sphere(
                layout.background_radius,
                layout.background_segments,
                layout.background_segments,
            ),
        );

        let transforms = layout.planet_transforms(0.0);
        let planets = std::array::from_fn(|i| {
            DrawSlot::new(
                device,
                &model_layout,
                &AssetSlot::Planet(i).label(),
                ModelUniform::planet(transforms[i]),
            )
        });
        let background = DrawSlot::new(
            device,
            &model_layout,
            "Background",
            ModelUniform::background(layout.background_transform()),
        );

        Self {
            planet_pipeline,
            background_pipeline,
            camera,
            camera_uniform,
            camera_buffer,
            lighting,
            lighting_buffer,
            frame_bind_group,
            texture_layout,
            sampler: pipeline_helpers::equirect_sampler(device, "Color Map Sampler"),
            planet_mesh,
            background_mesh,
            planets,
            background,
        }
    }

    fn create_pipeline(
        device: &wgpu::Device,
        label: &str,
        layout: &wgpu::PipelineLayout,
        shader: &wgpu::ShaderModule,
        format: wgpu::TextureFormat,
        cull: wgpu::Face,
    ) -> wgpu::RenderPipeline {
        let vertex_layout = wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<SphereVertex>()
                as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &VERTEX_ATTRIBUTES,
        };

        device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some(&format!("{label} Render Pipeline")),
            layout: Some(layout),
            vertex: wgpu::VertexState {
                module: shader,
                entry_point: Some("vs_main"),
                buffers: &[vertex_layout],
                compilation_options: Default::default(),
            },
            fragment: Some(wgpu::FragmentState {
                module: shader,
                entry_point: Some("fs_main"),
                targets: &pipeline_util::color_target(format),
                compilation_options: Default::default(),
            }),
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleList,
                front_face: wgpu::FrontFace::Ccw,
                cull_mode: Some(cull),
                ..Default::default()
            },
            depth_stencil: Some(pipeline_util::depth_stencil_state()),
            multisample: wgpu::MultisampleState::default(),
            multiview: None,
            cache: None,
        })
    }

    /// Upload a decoded color map into a planet or background slot.
    /// Environment slots are ignored here; see [`Self::set_ambient_tint`].
    ///
    /// Maps larger than the device allows are downscaled to fit. Empty or
    /// malformed maps are logged and leave the slot untextured.
    pub fn set_texture(
        &mut self,
        context: &RenderContext,
        slot: AssetSlot,
        image: DecodedImage,
    ) {
        let target = match slot {
            AssetSlot::Planet(i) => self.planets.get_mut(i),
            AssetSlot::Background => Some(&mut self.background),
            AssetSlot::Environment => None,
        };
        let Some(target) = target else {
            log::warn!("no mesh for {}", slot.label());
            return;
        };
        let label = slot.label();
        let max_dimension = context.device.limits().max_texture_dimension_2d;
        let (width, height) = (image.width, image.height);
        let Some(image) = image.fit_within(max_dimension) else {
            log::warn!("{label} not drawn: unusable {width}x{height} color map");
            return;
        };
        if (image.width, image.height) != (width, height) {
            log::info!(
                "{label} downscaled from {width}x{height} to {}x{}",
                image.width,
                image.height
            );
        }
        let texture = ColorTexture::from_rgba8(
            &context.device,
            &context.queue,
            &format!("{label} Color Map"),
            image.width,
            image.height,
            &image.rgba,
        );
        target.texture_bind_group = Some(context.device.create_bind_group(
            &wgpu::BindGroupDescriptor {
                label: Some(&format!("{label} Color Map Bind Group")),
                layout: &self.texture_layout,
                entries: &[
                    wgpu::BindGroupEntry {
                        binding: 0,
                        resource: wgpu::BindingResource::TextureView(
                            &texture.view,
                        ),
                    },
                    wgpu::BindGroupEntry {
                        binding: 1,
                        resource: wgpu::BindingResource::Sampler(
                            &self.sampler,
                        ),
                    },
                ],
            },
        ));
    }

    /// Tint the ambient light with an environment's average radiance.
    pub fn set_ambient_tint(&mut self, queue: &wgpu::Queue, rgb: [f32; 3]) {
        self.lighting.set_ambient_tint(rgb);
        queue.write_buffer(
            &self.lighting_buffer,
            0,
            bytemuck::bytes_of(&self.lighting),
        );
    }

    /// Current lighting state.
    pub fn lighting(&self) -> &LightingUniform {
        &self.lighting
    }

    /// Number of spheres with a texture, out of `PANEL_COUNT + 1`.
    pub fn textured_count(&self) -> usize {
        self.planets
            .iter()
            .chain(std::iter::once(&self.background))
            .filter(|slot| slot.texture_bind_group.is_some())
            .count()
    }

    /// Update the aspect ratio after a resize.
    pub fn resize(&mut self, queue: &wgpu::Queue, width: u32, height: u32) {
        self.camera.resize(width, height);
        self.camera_uniform.update_view_proj(&self.camera);
        queue.write_buffer(
            &self.camera_buffer,
            0,
            bytemuck::bytes_of(&self.camera_uniform),
        );
    }

    /// Write the planet model matrices for this frame's group rotation.
    pub fn update_planets(
        &self,
        queue: &wgpu::Queue,
        layout: &SceneLayout,
        rotation_y: f32,
    ) {
        for (slot, transform) in
            self.planets.iter().zip(layout.planet_transforms(rotation_y))
        {
            queue.write_buffer(
                &slot.model_buffer,
                0,
                bytemuck::bytes_of(&ModelUniform::planet(transform)),
            );
        }
    }

    /// Record the scene into `encoder`, clearing color and depth.
    pub fn render(
        &self,
        encoder: &mut wgpu::CommandEncoder,
        color_view: &wgpu::TextureView,
        depth_view: &wgpu::TextureView,
    ) {
        let mut pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some("Orrery Pass"),
            color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                view: color_view,
                resolve_target: None,
                depth_slice: None,
                ops: wgpu::Operations {
                    load: wgpu::LoadOp::Clear(wgpu::Color::BLACK),
                    store: wgpu::StoreOp::Store,
                },
            })],
            depth_stencil_attachment: Some(
                wgpu::RenderPassDepthStencilAttachment {
                    view: depth_view,
                    depth_ops: Some(wgpu::Operations {
                        load: wgpu::LoadOp::Clear(1.0),
                        store: wgpu::StoreOp::Store,
                    }),
                    stencil_ops: None,
                },
            ),
            ..Default::default()
        });
        pass.set_bind_group(0, &self.frame_bind_group, &[]);

        pass.set_pipeline(&self.background_pipeline);
        draw(&mut pass, &self.background_mesh, &self.background);

        pass.set_pipeline(&self.planet_pipeline);
        for slot in &self.planets {
            draw(&mut pass, &self.planet_mesh, slot);
        }
    }
}

fn draw(pass: &mut wgpu::RenderPass<'_>, mesh: &GpuMesh, slot: &DrawSlot) {
    let Some(texture) = &slot.texture_bind_group else {
        return;
    };
    pass.set_bind_group(1, &slot.model_bind_group, &[]);
    pass.set_bind_group(2, texture, &[]);
    pass.set_vertex_buffer(0, mesh.vertex_buffer.slice(..));
    pass.set_index_buffer(mesh.index_buffer.slice(..), wgpu::IndexFormat::Uint32);
    pass.draw_indexed(0..mesh.index_count, 0, 0..1);
}

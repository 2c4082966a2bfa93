//! The orrery engine: carousel state, tween playback, asset arrival, and the
//! sphere renderer behind one object that windowing code drives.

mod state;

pub use state::CarouselState;
use web_time::Instant;

use crate::assets::{AssetLoader, AssetPayload};
use crate::camera::Camera;
use crate::error::OrreryError;
use crate::gpu::RenderContext;
use crate::input::GestureEvent;
use crate::options::Options;
use crate::renderer::SphereRenderer;
use crate::scene::SceneLayout;

/// Owns the GPU context, renderer and carousel state.
///
/// Feed it [`GestureEvent`]s with [`handle_input`](Self::handle_input), then
/// call [`update`](Self::update) and [`render`](Self::render) once per
/// display frame.
pub struct OrreryEngine {
    context: RenderContext,
    renderer: SphereRenderer,
    layout: SceneLayout,
    state: CarouselState,
    assets: AssetLoader,
    options: Options,
}

impl OrreryEngine {
    /// Initialize the GPU against `target` (a window or canvas) and start
    /// loading every configured texture.
    ///
    /// # Errors
    ///
    /// Returns [`OrreryError::Gpu`] if no device or surface can be set up.
    pub async fn new(
        target: impl Into<wgpu::SurfaceTarget<'static>>,
        size: (u32, u32),
        options: Options,
    ) -> Result<Self, OrreryError> {
        let context = RenderContext::new(target, size).await?;
        let (width, height) = context.size();
        let layout = SceneLayout::from_options(&options.scene);
        let camera =
            Camera::from_options(&options.camera, width as f32 / height as f32);
        let renderer = SphereRenderer::new(&context, &layout, camera);

        let assets = AssetLoader::new();
        assets.request_all(&options.assets);

        Ok(Self {
            context,
            renderer,
            layout,
            state: CarouselState::new(&options),
            assets,
            options,
        })
    }

    /// Process one gesture event at the current time.
    ///
    /// Returns the number of animation requests it issued (0 when the event
    /// was absorbed or gated).
    pub fn handle_input(&mut self, event: GestureEvent) -> usize {
        self.handle_input_at(event, Instant::now())
    }

    /// Process one gesture event observed at `now`.
    pub fn handle_input_at(&mut self, event: GestureEvent, now: Instant) -> usize {
        self.state.handle_event(event, now)
    }

    /// Upload textures that finished loading and advance tweens to `now`.
    pub fn update(&mut self, now: Instant) {
        for asset in self.assets.drain() {
            match asset.payload {
                AssetPayload::Color(image) => {
                    self.renderer.set_texture(&self.context, asset.slot, image);
                }
                AssetPayload::Ambient(rgb) => {
                    self.renderer.set_ambient_tint(&self.context.queue, rgb);
                }
            }
            log::info!("{} ready", asset.slot.label());
        }

        if self.state.update(now) {
            self.renderer.update_planets(
                &self.context.queue,
                &self.layout,
                self.state.group_rotation(),
            );
        }
    }

    /// Draw one frame and present it.
    ///
    /// A lost or outdated surface is reconfigured and the frame skipped.
    ///
    /// # Errors
    ///
    /// Returns [`wgpu::SurfaceError`] on timeouts and out-of-memory.
    pub fn render(&mut self) -> Result<(), wgpu::SurfaceError> {
        let frame = match self.context.get_next_frame() {
            Ok(frame) => frame,
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                log::debug!("surface lost, reconfiguring");
                self.context.reconfigure();
                return Ok(());
            }
            Err(e) => return Err(e),
        };
        let view = self.context.frame_view(&frame);
        let mut encoder = self.context.create_encoder();
        self.renderer
            .render(&mut encoder, &view, &self.context.depth.view);
        self.context.submit(encoder);
        frame.present();
        Ok(())
    }

    /// Resize the surface, depth buffer and camera aspect.
    pub fn resize(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            return;
        }
        self.context.resize(width, height);
        self.renderer.resize(&self.context.queue, width, height);
    }

    /// Heading layer offset in percent.
    #[must_use]
    pub fn heading_offset(&self) -> f32 {
        self.state.heading_offset()
    }

    /// Planet group rotation about Y, in radians.
    #[must_use]
    pub fn group_rotation(&self) -> f32 {
        self.state.group_rotation()
    }

    /// Active panel index.
    #[must_use]
    pub fn active_panel(&self) -> usize {
        self.state.active_panel()
    }

    /// Heading text of the active panel.
    #[must_use]
    pub fn active_title(&self) -> &str {
        self.state.active_title()
    }

    /// Carousel state without the GPU side.
    #[must_use]
    pub fn state(&self) -> &CarouselState {
        &self.state
    }

    /// Number of spheres that have a texture and are being drawn.
    #[must_use]
    pub fn textured_count(&self) -> usize {
        self.renderer.textured_count()
    }

    /// The options this engine was built with.
    #[must_use]
    pub fn options(&self) -> &Options {
        &self.options
    }
}

//! Standalone carousel window backed by winit.
//!
//! The window title follows the active panel's heading.
//!
//! ```no_run
//! # use orrery::Viewer;
//! Viewer::builder()
//!     .with_title("Orrery")
//!     .build()
//!     .run()
//!     .unwrap();
//! ```

use std::sync::Arc;

use web_time::Instant;
use winit::{
    application::ApplicationHandler,
    event::WindowEvent,
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    window::{Window, WindowId},
};

use crate::{error::OrreryError, options::Options, GestureEvent, OrreryEngine};

// ── Builder ──────────────────────────────────────────────────────────────

/// Fluent builder for [`Viewer`].
pub struct ViewerBuilder {
    options: Option<Options>,
    title: String,
}

impl ViewerBuilder {
    /// Create a builder with defaults (title "Orrery", default options).
    fn new() -> Self {
        Self {
            options: None,
            title: "Orrery".into(),
        }
    }

    /// Override the default options.
    #[must_use]
    pub fn with_options(mut self, options: Options) -> Self {
        self.options = Some(options);
        self
    }

    /// Set the window title prefix.
    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Consume the builder and produce a [`Viewer`].
    #[must_use]
    pub fn build(self) -> Viewer {
        Viewer {
            options: self.options.unwrap_or_default(),
            title: self.title,
        }
    }
}

// ── Viewer ───────────────────────────────────────────────────────────────

/// A standalone window showing the planet carousel.
///
/// Construct via [`Viewer::builder`], then call [`run`](Self::run) to
/// enter the event loop.
pub struct Viewer {
    options: Options,
    title: String,
}

impl Viewer {
    /// Start a new builder.
    #[must_use]
    pub fn builder() -> ViewerBuilder {
        ViewerBuilder::new()
    }

    /// Open the window and run the event loop. Blocks until the window is
    /// closed.
    ///
    /// # Errors
    ///
    /// Returns [`OrreryError::Viewer`] if the event loop cannot start.
    pub fn run(self) -> Result<(), OrreryError> {
        let event_loop = EventLoop::new()
            .map_err(|e| OrreryError::Viewer(e.to_string()))?;
        event_loop.set_control_flow(ControlFlow::Poll);

        let mut app = ViewerApp {
            window: None,
            engine: None,
            options: Some(self.options),
            title: self.title,
            shown_panel: None,
        };

        event_loop
            .run_app(&mut app)
            .map_err(|e| OrreryError::Viewer(e.to_string()))
    }
}

// ── Winit app ────────────────────────────────────────────────────────────

/// Internal winit application handler.
struct ViewerApp {
    window: Option<Arc<Window>>,
    engine: Option<OrreryEngine>,
    options: Option<Options>,
    title: String,
    /// Panel whose heading is currently in the window title.
    shown_panel: Option<usize>,
}

/// Surface size for a window, never zero.
fn viewport_size(inner: winit::dpi::PhysicalSize<u32>) -> (u32, u32) {
    (inner.width.max(1), inner.height.max(1))
}

impl ViewerApp {
    fn window_title(&self, heading: &str) -> String {
        format!("{}: {heading}", self.title)
    }

    fn forward(&mut self, event: GestureEvent) {
        if let Some(engine) = &mut self.engine {
            let issued = engine.handle_input(event);
            if issued > 0 {
                log::debug!("{event:?} issued {issued} tweens");
            }
        }
    }

    /// Refresh the title when the panel changed.
    fn sync_title(&mut self) {
        let (Some(window), Some(engine)) = (&self.window, &self.engine) else {
            return;
        };
        let panel = engine.active_panel();
        if self.shown_panel != Some(panel) {
            window.set_title(&self.window_title(engine.active_title()));
            self.shown_panel = Some(panel);
        }
    }
}

impl ApplicationHandler for ViewerApp {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }
        let Some(options) = self.options.take() else {
            return;
        };

        let monitor = event_loop
            .primary_monitor()
            .or_else(|| event_loop.available_monitors().next());
        let attrs = if let Some(mon) = &monitor {
            let mon_size = mon.size();
            let scale = mon.scale_factor();
            let logical_w = (mon_size.width as f64 / scale * 0.75) as u32;
            let logical_h = (mon_size.height as f64 / scale * 0.75) as u32;
            Window::default_attributes()
                .with_title(&self.title)
                .with_inner_size(winit::dpi::LogicalSize::new(
                    logical_w, logical_h,
                ))
        } else {
            Window::default_attributes().with_title(&self.title)
        };

        let window = match event_loop.create_window(attrs) {
            Ok(w) => Arc::new(w),
            Err(e) => {
                log::error!("Failed to create window: {e}");
                event_loop.exit();
                return;
            }
        };

        let size = viewport_size(window.inner_size());
        let engine = match pollster::block_on(OrreryEngine::new(
            window.clone(),
            size,
            options,
        )) {
            Ok(e) => e,
            Err(e) => {
                log::error!("Failed to initialize engine: {e}");
                event_loop.exit();
                return;
            }
        };

        window.request_redraw();
        self.window = Some(window);
        self.engine = Some(engine);
        self.sync_title();
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _id: WindowId,
        event: WindowEvent,
    ) {
        if matches!(event, WindowEvent::CloseRequested) {
            event_loop.exit();
            return;
        }

        // Guard: both window and engine must be initialised.
        if self.window.is_none() || self.engine.is_none() {
            return;
        }

        match event {
            WindowEvent::Resized(event_size) => {
                let (vp_w, vp_h) = viewport_size(event_size);
                if let Some(engine) = &mut self.engine {
                    engine.resize(vp_w, vp_h);
                }
            }

            WindowEvent::RedrawRequested => {
                if let Some(engine) = &mut self.engine {
                    engine.update(Instant::now());
                    if let Err(e) = engine.render() {
                        log::error!("render error: {e:?}");
                    }
                }
                self.sync_title();
                if let Some(w) = &self.window {
                    w.request_redraw();
                }
            }

            WindowEvent::MouseWheel { delta, .. } => {
                self.forward(GestureEvent::from(delta));
            }

            WindowEvent::Touch(touch) => {
                let scale = self.window.as_ref().map_or(1.0, |w| w.scale_factor());
                self.forward(GestureEvent::from_touch(&touch, scale));
            }

            _ => (),
        }
    }
}

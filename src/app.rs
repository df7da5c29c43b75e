//! Event loop and the per-frame update.
//!
//! Everything the frame callback touches lives in one [`RenderContext`]
//! owned by the winit application handler.

use std::sync::Arc;

use winit::{
    application::ApplicationHandler,
    event::{ElementState, KeyEvent, WindowEvent},
    event_loop::ActiveEventLoop,
    keyboard::{KeyCode, PhysicalKey},
    window::{Window, WindowId},
};

use crate::camera::{OrbitControls, PerspectiveCamera};
use crate::config::GlobeConfig;
use crate::core::{
    FpsMeter, FrameClock, FrameInfo, LoadEvent, LoadingGate, PointerState, RunLimit, TextureEvent,
    TextureLoader, Viewport, WindowDimensions,
};
use crate::error::{GlobeError, Result};
use crate::overlay::{Overlay, OverlayStatus};
use crate::renderer::GlobeRenderer;
use crate::scene::Scene;

/// Whether the loop should keep going after a frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameOutcome {
    Continue,
    Stop,
}

pub struct RenderContext {
    window: Arc<Window>,
    renderer: GlobeRenderer,
    overlay: Overlay,
    scene: Scene,
    camera: PerspectiveCamera,
    controls: OrbitControls,
    pointer: PointerState,
    viewport: Viewport,
    gate: LoadingGate,
    loader: TextureLoader,
    fps: FpsMeter,
}

impl RenderContext {
    pub fn new(window: Arc<Window>, config: &GlobeConfig, show_ui: bool) -> Result<Self> {
        let dimensions = WindowDimensions::from(window.inner_size());
        let viewport = Viewport::new(dimensions, config.window.resize_policy);

        let scene = Scene::from_config(config);
        let renderer = pollster::block_on(GlobeRenderer::new(window.clone(), &scene, dimensions))?;
        let overlay = Overlay::new(&window, renderer.device(), renderer.format(), show_ui);

        let camera = PerspectiveCamera::new(&config.camera, viewport.aspect());
        let controls = OrbitControls::new(&config.controls);

        let loader = TextureLoader::spawn(config.textures.requests(), renderer.max_texture_dimension());
        let gate = if config.loading.enabled {
            LoadingGate::new(config.loading.fade_seconds)
        } else {
            LoadingGate::open()
        };

        Ok(Self {
            window,
            renderer,
            overlay,
            scene,
            camera,
            controls,
            pointer: PointerState::new(),
            viewport,
            gate,
            loader,
            fps: FpsMeter::default(),
        })
    }

    pub fn window(&self) -> &Arc<Window> {
        &self.window
    }

    /// Feed a window event to the overlay, then to the orbit input.
    /// Returns true when the event was consumed.
    pub fn handle_event(&mut self, event: &WindowEvent) -> bool {
        if self.overlay.handle_event(&self.window, event) {
            return true;
        }
        self.pointer.process_event(event)
    }

    pub fn resize(&mut self, dimensions: WindowDimensions) {
        if let Some(next) = self.viewport.on_resize(dimensions) {
            log::debug!("viewport now {}x{}", next.width, next.height);
            self.renderer.resize(next);
            self.camera.set_aspect(self.viewport.aspect());
        }
    }

    fn apply_texture_events(&mut self) {
        for event in self.loader.poll() {
            match event {
                TextureEvent::Ready(texture) => self.renderer.upload_texture(&texture),
                TextureEvent::Load(LoadEvent::Progress { loaded, total, .. }) => {
                    log::debug!("textures {}/{}", loaded, total);
                }
                TextureEvent::Load(LoadEvent::Error { url }) => {
                    log::debug!("texture failed: {}", url);
                }
                TextureEvent::Load(LoadEvent::Completed) => {
                    log::info!(
                        "all textures resolved ({} failed)",
                        self.loader.manager().failed()
                    );
                    self.gate.begin_fade();
                }
            }
        }
    }

    /// Advance rotation, input and the fade by one frame, then draw it
    pub fn update(&mut self, frame: FrameInfo) -> FrameOutcome {
        self.apply_texture_events();

        self.scene.advance();

        let ((dx, dy), scroll) = self.pointer.take();
        let height = self.viewport.dimensions().height as f32;
        self.controls.rotate_by_pixels(dx, dy, height);
        self.controls.zoom(scroll);
        self.controls.update(&mut self.camera);

        if self.gate.tick(frame.delta) {
            log::debug!("loading screen dismissed at frame {}", frame.number);
        }

        if let Some(fps) = self.fps.record(frame.delta) {
            log::trace!("{:.1} fps", fps);
        }

        let status = OverlayStatus {
            presentation: self.gate.presentation(),
            percent: self.loader.percent(),
            fps: (self.fps.fps() > 0.0).then(|| self.fps.fps()),
        };

        match self
            .renderer
            .render(&self.window, &self.scene, &self.camera, &mut self.overlay, &status)
        {
            Ok(()) => FrameOutcome::Continue,
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                log::debug!("surface lost or outdated, reconfiguring");
                self.renderer.reconfigure();
                FrameOutcome::Continue
            }
            Err(wgpu::SurfaceError::OutOfMemory) => {
                log::error!("GPU out of memory");
                FrameOutcome::Stop
            }
            Err(e) => {
                log::warn!("skipped frame {}: {}", frame.number, e);
                FrameOutcome::Continue
            }
        }
    }
}

pub struct App {
    config: GlobeConfig,
    show_ui: bool,
    limit: RunLimit,
    clock: FrameClock,
    context: Option<RenderContext>,
    error: Option<GlobeError>,
}

impl App {
    pub fn new(config: GlobeConfig, show_ui: bool, limit: RunLimit) -> Self {
        Self {
            config,
            show_ui,
            limit,
            clock: FrameClock::new(),
            context: None,
            error: None,
        }
    }

    /// Frames drawn so far
    pub fn frames_rendered(&self) -> u64 {
        self.clock.frame_number()
    }

    /// Start-up failure that ended the loop, if any
    pub fn take_error(&mut self) -> Option<GlobeError> {
        self.error.take()
    }

    /// Keep a start-up failure so `main` can report it after the loop exits
    fn record_failure(&mut self, error: GlobeError) {
        log::error!("start-up failed: {}", error);
        self.error = Some(error);
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.context.is_some() {
            return;
        }

        let window = match event_loop.create_window(
            Window::default_attributes()
                .with_title(self.config.window.title.clone())
                .with_inner_size(winit::dpi::LogicalSize::new(
                    self.config.window.width,
                    self.config.window.height,
                )),
        ) {
            Ok(w) => Arc::new(w),
            Err(e) => {
                self.record_failure(e.into());
                event_loop.exit();
                return;
            }
        };

        match RenderContext::new(window, &self.config, self.show_ui) {
            Ok(context) => {
                // Start timing from the first presented frame, not from start-up
                self.clock = FrameClock::new();
                self.context = Some(context);
            }
            Err(e) => {
                self.record_failure(e);
                event_loop.exit();
            }
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _window_id: WindowId, event: WindowEvent) {
        let Some(context) = &mut self.context else {
            return;
        };

        // Let egui and the orbit controls see the event first
        if context.handle_event(&event) {
            return;
        }

        match event {
            WindowEvent::CloseRequested
            | WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        state: ElementState::Pressed,
                        physical_key: PhysicalKey::Code(KeyCode::Escape),
                        ..
                    },
                ..
            } => event_loop.exit(),
            WindowEvent::Resized(size) => context.resize(size.into()),
            WindowEvent::RedrawRequested => {
                let frame = self.clock.tick();
                let outcome = context.update(frame);

                if outcome == FrameOutcome::Stop || self.limit.reached(self.clock.frame_number()) {
                    log::info!("stopping after {} frames", self.clock.frame_number());
                    event_loop.exit();
                }
            }
            _ => {}
        }
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(context) = &self.context {
            context.window().request_redraw();
        }
    }
}

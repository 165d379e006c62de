//! Core application state and lifecycle.

use diskdrag_core::demo::{DemoKind, UnknownDemo};
use diskdrag_core::scene::{Scene, SceneError};
use diskdrag_core::view::View;
use diskdrag_render::{RenderContext, Renderer, RendererError, VelloRenderer};
use kurbo::{Point, Rect, Size};
use peniko::Color;
use std::sync::Arc;
use thiserror::Error;
use vello::util::RenderSurface;
use vello::wgpu::PresentMode;
use vello::{AaConfig, RenderParams, RendererOptions};
use winit::application::ApplicationHandler;
use winit::dpi::LogicalSize;
use winit::event::WindowEvent;
use winit::event_loop::{ActiveEventLoop, EventLoop};
use winit::window::{Window, WindowId};

use crate::event_handler::{EventHandler, EventOutcome};

/// Environment variable consulted when no demo is given on the command line.
pub const DEMO_ENV_VAR: &str = "DISKDRAG_DEMO";

/// Application errors.
#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    UnknownDemo(#[from] UnknownDemo),
    #[error("Scene error: {0}")]
    Scene(#[from] SceneError),
    #[error("Event loop error: {0}")]
    EventLoop(#[from] winit::error::EventLoopError),
    #[error("Renderer error: {0}")]
    Renderer(#[from] RendererError),
}

/// Application configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub title: String,
    pub width: u32,
    pub height: u32,
    pub background_color: Color,
    pub demo: DemoKind,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            title: "diskdrag".to_string(),
            width: 400,
            height: 400,
            background_color: Color::WHITE,
            demo: DemoKind::default(),
        }
    }
}

impl AppConfig {
    /// Build a config from command-line arguments (program name excluded),
    /// falling back to the `DISKDRAG_DEMO` value.
    pub fn from_args<I>(args: I, env_demo: Option<String>) -> Result<Self, AppError>
    where
        I: IntoIterator<Item = String>,
    {
        let mut config = Self::default();
        if let Some(name) = args.into_iter().next().or(env_demo) {
            config.demo = name.parse()?;
        }
        config.title = format!("diskdrag - {}", config.demo);
        Ok(config)
    }
}

/// Runtime state for the application.
struct AppState {
    // Windowing
    window: Arc<Window>,
    surface: RenderSurface<'static>,

    // Rendering
    vello_renderer: vello::Renderer,
    shape_renderer: VelloRenderer,
    /// Texture blitter for RGBA->surface format conversion
    texture_blitter: vello::wgpu::util::TextureBlitter,

    // State
    view: View,
    event_handler: EventHandler,
}

impl AppState {
    fn refit_view(&mut self, scene_rect: Rect) {
        let viewport = Size::new(
            self.surface.config.width as f64,
            self.surface.config.height as f64,
        );
        self.view = View::fit(scene_rect, viewport, self.window.scale_factor());
    }

    fn apply(&self, outcome: EventOutcome) {
        if let Some(icon) = outcome.cursor {
            self.window.set_cursor(icon);
        }
        if outcome.redraw {
            self.window.request_redraw();
        }
    }
}

/// Main application struct.
pub struct App {
    config: AppConfig,
    scene: Scene,
    state: Option<AppState>,
    render_cx: Option<vello::util::RenderContext>,
}

impl App {
    /// Create a new application showing the configured demo scene.
    pub fn with_config(config: AppConfig) -> Result<Self, AppError> {
        let scene = config.demo.build()?;
        log::info!("Showing '{}' demo with {} disks", config.demo, scene.len());
        log::debug!("Initial layout bounds: {:?}", scene.bounds());
        Ok(Self {
            config,
            scene,
            state: None,
            render_cx: None,
        })
    }

    /// Run the application until the window closes.
    pub fn run(config: AppConfig) -> Result<(), AppError> {
        let event_loop = EventLoop::new()?;
        let mut app = App::with_config(config)?;
        event_loop.run_app(&mut app)?;
        Ok(())
    }

    fn init(&mut self, event_loop: &ActiveEventLoop) -> Result<AppState, RendererError> {
        let window_attrs = Window::default_attributes()
            .with_title(&self.config.title)
            .with_inner_size(LogicalSize::new(self.config.width, self.config.height));

        let window = Arc::new(
            event_loop
                .create_window(window_attrs)
                .map_err(|e| RendererError::InitFailed(e.to_string()))?,
        );

        let size = window.inner_size();
        let (width, height) = if size.width == 0 || size.height == 0 {
            (self.config.width, self.config.height)
        } else {
            (size.width, size.height)
        };
        log::info!("Surface size: {}x{}", width, height);

        let render_cx = self
            .render_cx
            .get_or_insert_with(vello::util::RenderContext::new);
        let surface: RenderSurface<'static> = pollster::block_on(render_cx.create_surface(
            window.clone(),
            width,
            height,
            PresentMode::AutoVsync,
        ))
        .map_err(|e| RendererError::Surface(e.to_string()))?;

        let device = &render_cx.devices[surface.dev_id].device;
        let vello_renderer = vello::Renderer::new(device, RendererOptions::default())
            .map_err(|e| RendererError::InitFailed(e.to_string()))?;

        // Vello renders to Rgba8Unorm; the surface may be Bgra8Unorm
        let texture_blitter = vello::wgpu::util::TextureBlitter::new(device, surface.config.format);

        let mut state = AppState {
            window,
            surface,
            vello_renderer,
            shape_renderer: VelloRenderer::new(),
            texture_blitter,
            view: View::new(),
            event_handler: EventHandler::new(),
        };
        state.refit_view(self.scene.scene_rect);
        Ok(state)
    }

    fn render(&mut self) -> Result<(), RendererError> {
        let (Some(state), Some(render_cx)) = (self.state.as_mut(), self.render_cx.as_ref()) else {
            return Ok(());
        };

        let viewport = Size::new(
            state.surface.config.width as f64,
            state.surface.config.height as f64,
        );
        let ctx = RenderContext::new(&self.scene, viewport)
            .with_scale_factor(state.window.scale_factor())
            .with_background(self.config.background_color);
        state.shape_renderer.build_scene(&ctx);
        let background = state.shape_renderer.background_color(&ctx);
        let scene = state.shape_renderer.take_scene();

        let device_handle = &render_cx.devices[state.surface.dev_id];
        let device = &device_handle.device;
        let queue = &device_handle.queue;

        let surface_texture = state
            .surface
            .surface
            .get_current_texture()
            .map_err(|e| RendererError::Surface(format!("{:?}", e)))?;

        let width = state.surface.config.width;
        let height = state.surface.config.height;

        let params = RenderParams {
            base_color: background,
            width,
            height,
            antialiasing_method: AaConfig::Area,
        };

        // Vello's compute shaders need a StorageBinding Rgba8Unorm target
        let render_texture = device.create_texture(&vello::wgpu::TextureDescriptor {
            label: Some("vello render texture"),
            size: vello::wgpu::Extent3d {
                width,
                height,
                depth_or_array_layers: 1,
            },
            mip_level_count: 1,
            sample_count: 1,
            dimension: vello::wgpu::TextureDimension::D2,
            format: vello::wgpu::TextureFormat::Rgba8Unorm,
            usage: vello::wgpu::TextureUsages::STORAGE_BINDING
                | vello::wgpu::TextureUsages::COPY_SRC
                | vello::wgpu::TextureUsages::TEXTURE_BINDING,
            view_formats: &[],
        });
        let render_texture_view =
            render_texture.create_view(&vello::wgpu::TextureViewDescriptor::default());

        state
            .vello_renderer
            .render_to_texture(device, queue, &scene, &render_texture_view, &params)
            .map_err(|e| RendererError::RenderFailed(format!("{:?}", e)))?;

        let surface_view = surface_texture
            .texture
            .create_view(&vello::wgpu::TextureViewDescriptor::default());

        let mut blit_encoder =
            device.create_command_encoder(&vello::wgpu::CommandEncoderDescriptor {
                label: Some("blit encoder"),
            });
        state.texture_blitter.copy(
            device,
            &mut blit_encoder,
            &render_texture_view,
            &surface_view,
        );
        queue.submit(std::iter::once(blit_encoder.finish()));

        surface_texture.present();
        Ok(())
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.state.is_some() {
            return;
        }

        log::info!("Creating window...");
        match self.init(event_loop) {
            Ok(state) => {
                state.window.request_redraw();
                self.state = Some(state);
            }
            Err(e) => {
                log::error!("Failed to initialize: {}", e);
                event_loop.exit();
            }
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        let Some(state) = self.state.as_mut() else {
            return;
        };

        match event {
            WindowEvent::CloseRequested => {
                match self.scene.to_json() {
                    Ok(json) => log::debug!("Final layout:\n{}", json),
                    Err(e) => log::warn!("Could not serialize layout: {}", e),
                }
                event_loop.exit();
            }

            WindowEvent::Resized(size) => {
                if size.width == 0 || size.height == 0 {
                    return;
                }
                if let Some(render_cx) = self.render_cx.as_mut() {
                    render_cx.resize_surface(&mut state.surface, size.width, size.height);
                }
                state.refit_view(self.scene.scene_rect);
                state.window.request_redraw();
            }

            WindowEvent::ScaleFactorChanged { .. } => {
                state.refit_view(self.scene.scene_rect);
                state.window.request_redraw();
            }

            WindowEvent::CursorMoved { position, .. } => {
                let point = Point::new(position.x, position.y);
                let outcome = state
                    .event_handler
                    .cursor_moved(&mut self.scene, &state.view, point);
                state.apply(outcome);
            }

            WindowEvent::MouseInput {
                state: button_state,
                button,
                ..
            } => {
                let outcome = state
                    .event_handler
                    .mouse_input(&mut self.scene, button_state, button);
                state.apply(outcome);
            }

            WindowEvent::CursorLeft { .. } => {
                let outcome = state.event_handler.cursor_left(&mut self.scene);
                state.apply(outcome);
            }

            WindowEvent::RedrawRequested => {
                if let Err(e) = self.render() {
                    log::error!("Failed to render: {}", e);
                }
            }

            _ => {}
        }
    }
}

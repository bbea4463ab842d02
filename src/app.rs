//! Host application loop.
//!
//! A small winit `ApplicationHandler` that owns the window and the
//! [`GraphicsDevice`], runs the scene's asynchronous load chain during
//! startup, then drives `update` and `render` once per redraw. Touch and
//! left-mouse drags are routed to the scene's tracking API; everything else
//! spins autonomously.

use std::sync::Arc;

use winit::{
    application::ApplicationHandler,
    event::{MouseButton, Touch, TouchPhase, WindowEvent},
    event_loop::{ActiveEventLoop, EventLoop},
    window::Window,
};

use crate::{device::GraphicsDevice, scene::SceneRenderer, timer::StepTimer};

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

/// Window, GPU context and scene bundled for the frame loop.
pub struct AppState {
    device: GraphicsDevice,
    scene: SceneRenderer,
    timer: StepTimer,
    cursor_x: f32,
    is_surface_configured: bool,
}

impl AppState {
    async fn new(window: Arc<Window>) -> anyhow::Result<Self> {
        let device = GraphicsDevice::new(window).await?;
        let mut scene = SceneRenderer::new(&device);
        scene.create_device_dependent_resources(&device).await?;
        Ok(Self {
            device,
            scene,
            timer: StepTimer::new(),
            cursor_x: 0.0,
            is_surface_configured: false,
        })
    }

    fn resize(&mut self, width: u32, height: u32) {
        if width > 0 && height > 0 {
            self.is_surface_configured = true;
            self.device.resize(width, height);
            self.scene.create_window_size_dependent_resources(&self.device);
        }
    }

    fn render_frame(&mut self) -> Result<(), wgpu::SurfaceError> {
        // invoke main render loop
        self.device.window.request_redraw();

        // Rendering requires the surface to be configured
        if !self.is_surface_configured {
            return Ok(());
        }

        self.scene.update(&self.timer);

        let output = self.device.surface.get_current_texture()?;
        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let mut encoder = self
            .device
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Render Encoder"),
            });
        {
            let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Scene Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(wgpu::Color {
                            r: 0.0,
                            g: 0.0,
                            b: 0.1,
                            a: 1.0,
                        }),
                        store: wgpu::StoreOp::Store,
                    },
                    depth_slice: None,
                })],
                depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                    view: &self.device.depth_texture.view,
                    depth_ops: Some(wgpu::Operations {
                        load: wgpu::LoadOp::Clear(1.0),
                        store: wgpu::StoreOp::Store,
                    }),
                    stencil_ops: None,
                }),
                occlusion_query_set: None,
                timestamp_writes: None,
            });

            self.scene.render(&self.device, &mut render_pass);
        }

        self.device.queue.submit(std::iter::once(encoder.finish()));
        output.present();
        Ok(())
    }
}

pub(crate) enum AppEvent {
    // Message from the wasm `spawn_local` once async init finished.
    #[allow(dead_code)]
    Initialized(Box<AppState>),
}

pub struct App {
    #[cfg(not(target_arch = "wasm32"))]
    async_runtime: tokio::runtime::Runtime,
    #[allow(dead_code)]
    proxy: winit::event_loop::EventLoopProxy<AppEvent>,
    state: Option<AppState>,
}

impl App {
    fn new(event_loop: &EventLoop<AppEvent>) -> Self {
        Self {
            #[cfg(not(target_arch = "wasm32"))]
            async_runtime: tokio::runtime::Runtime::new().unwrap(),
            proxy: event_loop.create_proxy(),
            state: None,
        }
    }
}

impl ApplicationHandler<AppEvent> for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        #[allow(unused_mut)]
        let mut window_attributes = Window::default_attributes().with_title("spincrate");

        #[cfg(target_arch = "wasm32")]
        {
            use wasm_bindgen::JsCast;
            use winit::platform::web::WindowAttributesExtWebSys;

            const CANVAS_ID: &str = "canvas";

            let window = wgpu::web_sys::window().unwrap_throw();
            let document = window.document().unwrap_throw();
            let canvas = document.get_element_by_id(CANVAS_ID).unwrap_throw();
            let html_canvas_element = canvas.unchecked_into();
            window_attributes = window_attributes.with_canvas(Some(html_canvas_element));
        }

        let window = Arc::new(event_loop.create_window(window_attributes).unwrap());

        #[cfg(not(target_arch = "wasm32"))]
        {
            let mut state = match self.async_runtime.block_on(AppState::new(window)) {
                Ok(state) => state,
                Err(e) => panic!("App initialization failed. Cannot build the scene: {}", e),
            };
            let size = state.device.window.inner_size();
            state.resize(size.width, size.height);
            self.state = Some(state);
        }

        #[cfg(target_arch = "wasm32")]
        {
            let proxy = self.proxy.clone();
            wasm_bindgen_futures::spawn_local(async move {
                let state = AppState::new(window)
                    .await
                    .expect("App initialization failed. Cannot build the scene");
                assert!(
                    proxy
                        .send_event(AppEvent::Initialized(Box::new(state)))
                        .is_ok()
                );
            });
        }
    }

    fn user_event(&mut self, _event_loop: &ActiveEventLoop, event: AppEvent) {
        match event {
            AppEvent::Initialized(state) => {
                let mut state = *state;
                // Trigger a resize and redraw now that we are initialized
                let size = state.device.window.inner_size();
                state.resize(size.width, size.height);
                state.device.window.request_redraw();
                self.state = Some(state);
            }
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: winit::window::WindowId,
        event: WindowEvent,
    ) {
        let state = match &mut self.state {
            Some(state) => state,
            None => return,
        };

        match event {
            WindowEvent::CloseRequested => {
                state.scene.release_device_dependent_resources();
                event_loop.exit();
            }
            WindowEvent::Resized(size) => state.resize(size.width, size.height),
            WindowEvent::RedrawRequested => match state.render_frame() {
                Ok(()) => {}
                // Reconfigure the surface if it's lost or outdated
                Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                    let size = state.device.window.inner_size();
                    state.resize(size.width, size.height);
                }
                Err(e) => {
                    log::error!("Unable to render {}", e);
                }
            },
            WindowEvent::Touch(Touch {
                phase, location, ..
            }) => match phase {
                TouchPhase::Started => {
                    state.scene.start_tracking();
                    state.scene.tracking_update(location.x as f32);
                }
                TouchPhase::Moved => state.scene.tracking_update(location.x as f32),
                TouchPhase::Ended | TouchPhase::Cancelled => state.scene.stop_tracking(),
            },
            WindowEvent::CursorMoved { position, .. } => {
                state.cursor_x = position.x as f32;
                if state.scene.is_tracking() {
                    state.scene.tracking_update(state.cursor_x);
                }
            }
            WindowEvent::MouseInput {
                state: button_state,
                button: MouseButton::Left,
                ..
            } => {
                if button_state.is_pressed() {
                    state.scene.start_tracking();
                    state.scene.tracking_update(state.cursor_x);
                } else {
                    state.scene.stop_tracking();
                }
            }
            _ => {}
        }
    }
}

/// Initialize logging, build the event loop and run the scene until the
/// window closes.
pub fn run() -> anyhow::Result<()> {
    #[cfg(not(target_arch = "wasm32"))]
    {
        if let Err(e) = env_logger::try_init() {
            println!("Warning: Could not initialize logger: {}", e);
        };
    }

    #[cfg(target_arch = "wasm32")]
    {
        console_log::init_with_level(log::Level::Info).unwrap_throw();
    }

    let event_loop: EventLoop<AppEvent> = EventLoop::with_user_event().build()?;
    let mut app = App::new(&event_loop);
    event_loop.run_app(&mut app)?;

    Ok(())
}

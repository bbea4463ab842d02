//! Central GPU and window context owned by the host application.
//!
//! [`GraphicsDevice`] bundles the wgpu device, queue and surface with the
//! current output size, the depth attachment and the display-orientation
//! correction. The scene renderer borrows it per call and never owns it.

use std::sync::Arc;

use cgmath::{Matrix4, SquareMatrix};
use winit::window::Window;

use crate::texture::Texture;

#[derive(Debug)]
pub struct GraphicsDevice {
    pub(crate) window: Arc<Window>,
    pub(crate) depth_texture: Texture,
    pub surface: wgpu::Surface<'static>,
    pub device: wgpu::Device,
    pub queue: wgpu::Queue,
    pub config: wgpu::SurfaceConfiguration,
    orientation: Matrix4<f32>,
}

impl GraphicsDevice {
    pub async fn new(window: Arc<Window>) -> anyhow::Result<Self> {
        let size = window.inner_size();

        log::warn!("WGPU setup");
        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            #[cfg(not(target_arch = "wasm32"))]
            backends: wgpu::Backends::PRIMARY,
            #[cfg(target_arch = "wasm32")]
            backends: wgpu::Backends::GL,
            ..Default::default()
        });

        let surface = instance.create_surface(window.clone())?;

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::default(),
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await?;
        log::warn!("device and queue");
        let (device, queue) = adapter
            .request_device(&wgpu::DeviceDescriptor {
                label: None,
                required_features: wgpu::Features::empty(),
                // WebGL doesn't support all of wgpu's features, so if
                // we're building for the web we'll have to disable some.
                required_limits: if cfg!(target_arch = "wasm32") {
                    wgpu::Limits::downlevel_webgl2_defaults()
                } else {
                    wgpu::Limits::default()
                },
                memory_hints: Default::default(),
                trace: wgpu::Trace::Off,
            })
            .await?;

        log::warn!("Surface");
        let surface_caps = surface.get_capabilities(&adapter);
        // The scene shader assumes an Srgb surface texture; a non-Srgb
        // format would come out darker.
        let surface_format = surface_caps
            .formats
            .iter()
            .copied()
            .find(|f| f.is_srgb())
            .unwrap_or(surface_caps.formats[0]);
        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format: surface_format,
            width: size.width,
            height: size.height,
            present_mode: surface_caps.present_modes[0],
            alpha_mode: surface_caps.alpha_modes[0],
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };

        let depth_texture =
            Texture::create_depth_texture(&device, [config.width, config.height], "depth_texture");

        Ok(Self {
            window,
            depth_texture,
            surface,
            device,
            queue,
            config,
            orientation: Matrix4::identity(),
        })
    }

    /// Reconfigure the surface and rebuild the depth attachment for a new
    /// output size. Zero dimensions are ignored.
    pub fn resize(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            return;
        }
        self.config.width = width;
        self.config.height = height;
        self.surface.configure(&self.device, &self.config);
        self.depth_texture =
            Texture::create_depth_texture(&self.device, [width, height], "depth_texture");
    }

    /// Current output size in physical pixels.
    pub fn output_size(&self) -> (u32, u32) {
        (self.config.width, self.config.height)
    }

    /// Display-orientation correction composed into the projection. Identity
    /// on platforms where the swapchain is always upright.
    pub fn orientation_transform(&self) -> Matrix4<f32> {
        self.orientation
    }

    pub fn set_orientation_transform(&mut self, orientation: Matrix4<f32>) {
        self.orientation = orientation;
    }
}

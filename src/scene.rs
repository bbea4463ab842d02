//! The scene renderer: resource lifecycle and per-frame drawing.
//!
//! [`SceneRenderer`] owns every GPU resource for the one-crate scene together
//! with the transform state machine driving it. Resources are built once by
//! an asynchronous load chain and dropped together on release; a single
//! atomic readiness gate guards all per-frame rendering, so a render racing a
//! release no-ops instead of touching half-released handles.

use std::sync::atomic::{AtomicBool, Ordering};

use wgpu::util::DeviceExt;

use crate::{
    assets,
    cube::{CUBE_INDICES, CUBE_VERTICES},
    device::GraphicsDevice,
    lighting::LightingUniform,
    pipeline,
    texture::Texture,
    timer::FrameTimer,
    transforms::{SceneTransforms, TransformUniform},
};

/// Everything device-dependent, created by the load chain and dropped as one.
///
/// Each handle is an `Option` so the bundle exists before loading finishes
/// and after release. `loading_complete` flips true only once every handle is
/// populated.
#[derive(Debug, Default)]
struct SceneResources {
    loading_complete: AtomicBool,
    index_count: u32,
    vertex_shader: Option<wgpu::ShaderModule>,
    fragment_shader: Option<wgpu::ShaderModule>,
    pipeline: Option<wgpu::RenderPipeline>,
    transform_buffer: Option<wgpu::Buffer>,
    lighting_buffer: Option<wgpu::Buffer>,
    vertex_buffer: Option<wgpu::Buffer>,
    index_buffer: Option<wgpu::Buffer>,
    texture: Option<Texture>,
    transform_bind_group: Option<wgpu::BindGroup>,
    material_bind_group: Option<wgpu::BindGroup>,
}

impl SceneResources {
    fn is_ready(&self) -> bool {
        self.loading_complete.load(Ordering::Acquire)
    }

    /// The gate drops before any handle so a concurrent readiness check
    /// cannot observe a half-released bundle.
    fn release(&mut self) {
        self.loading_complete.store(false, Ordering::Release);
        self.index_count = 0;
        self.vertex_shader = None;
        self.fragment_shader = None;
        self.pipeline = None;
        self.transform_buffer = None;
        self.lighting_buffer = None;
        self.vertex_buffer = None;
        self.index_buffer = None;
        self.texture = None;
        self.transform_bind_group = None;
        self.material_bind_group = None;
    }
}

pub struct SceneRenderer {
    transforms: SceneTransforms,
    resources: SceneResources,
}

impl SceneRenderer {
    /// A new renderer is sized immediately but renders nothing until
    /// [`create_device_dependent_resources`](Self::create_device_dependent_resources)
    /// has run to completion.
    pub fn new(device: &GraphicsDevice) -> Self {
        let mut renderer = Self {
            transforms: SceneTransforms::new(),
            resources: SceneResources::default(),
        };
        renderer.create_window_size_dependent_resources(device);
        renderer
    }

    /// Build every GPU resource the scene needs.
    ///
    /// The two shader sources load concurrently: the vertex path yields the
    /// vertex shader module (its input layout is the fixed `Vertex::desc()`),
    /// the fragment path yields the fragment module plus both uniform buffers
    /// (the lighting buffer pre-filled with the scene constants). The
    /// `try_join!` is the explicit join point; after it the pipeline and the
    /// cube's vertex/index buffers are created, then the crate texture and
    /// its sampler, then the bind groups. Only then does the readiness gate
    /// flip. Any failure aborts the chain and leaves the gate false.
    pub async fn create_device_dependent_resources(
        &mut self,
        device: &GraphicsDevice,
    ) -> anyhow::Result<()> {
        let gpu = &device.device;

        let vertex_path = async {
            let source = assets::load_string(assets::VERTEX_SHADER_ASSET).await?;
            anyhow::Ok(gpu.create_shader_module(wgpu::ShaderModuleDescriptor {
                label: Some("Crate Vertex Shader"),
                source: wgpu::ShaderSource::Wgsl(source.into()),
            }))
        };

        let fragment_path = async {
            let source = assets::load_string(assets::FRAGMENT_SHADER_ASSET).await?;
            let fragment_shader = gpu.create_shader_module(wgpu::ShaderModuleDescriptor {
                label: Some("Crate Fragment Shader"),
                source: wgpu::ShaderSource::Wgsl(source.into()),
            });

            let transform_buffer = gpu.create_buffer(&wgpu::BufferDescriptor {
                label: Some("Transform Buffer"),
                size: std::mem::size_of::<TransformUniform>() as wgpu::BufferAddress,
                usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
                mapped_at_creation: false,
            });

            // Written once here, never mutated afterwards.
            let lighting_buffer = gpu.create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some("Lighting Buffer"),
                contents: bytemuck::bytes_of(&LightingUniform::scene()),
                usage: wgpu::BufferUsages::UNIFORM,
            });

            anyhow::Ok((fragment_shader, transform_buffer, lighting_buffer))
        };

        // Both shader paths must finish before anything that references them.
        let (vertex_shader, (fragment_shader, transform_buffer, lighting_buffer)) =
            futures::try_join!(vertex_path, fragment_path)?;

        let pipeline =
            pipeline::mk_scene_pipeline(gpu, device.config.format, &vertex_shader, &fragment_shader);

        let vertex_buffer = gpu.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Cube Vertex Buffer"),
            contents: bytemuck::cast_slice(&CUBE_VERTICES),
            usage: wgpu::BufferUsages::VERTEX,
        });
        let index_buffer = gpu.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Cube Index Buffer"),
            contents: bytemuck::cast_slice(&CUBE_INDICES),
            usage: wgpu::BufferUsages::INDEX,
        });

        let texture = assets::load_texture(assets::CRATE_TEXTURE_ASSET, gpu, &device.queue).await?;

        let transform_bind_group = gpu.create_bind_group(&wgpu::BindGroupDescriptor {
            layout: &pipeline::transform_layout(gpu),
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: transform_buffer.as_entire_binding(),
            }],
            label: Some("transform_bind_group"),
        });
        let material_bind_group = gpu.create_bind_group(&wgpu::BindGroupDescriptor {
            layout: &pipeline::material_layout(gpu),
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: lighting_buffer.as_entire_binding(),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: wgpu::BindingResource::TextureView(&texture.view),
                },
                wgpu::BindGroupEntry {
                    binding: 2,
                    resource: wgpu::BindingResource::Sampler(&texture.sampler),
                },
            ],
            label: Some("material_bind_group"),
        });

        self.resources.index_count = CUBE_INDICES.len() as u32;
        self.resources.vertex_shader = Some(vertex_shader);
        self.resources.fragment_shader = Some(fragment_shader);
        self.resources.pipeline = Some(pipeline);
        self.resources.transform_buffer = Some(transform_buffer);
        self.resources.lighting_buffer = Some(lighting_buffer);
        self.resources.vertex_buffer = Some(vertex_buffer);
        self.resources.index_buffer = Some(index_buffer);
        self.resources.texture = Some(texture);
        self.resources.transform_bind_group = Some(transform_bind_group);
        self.resources.material_bind_group = Some(material_bind_group);
        self.resources.loading_complete.store(true, Ordering::Release);

        log::info!("scene resources loaded");
        Ok(())
    }

    /// Recompute the projection (70° vertical FOV composed with the display
    /// orientation) and the fixed look-at view. Safe to call while the load
    /// chain is still running; it touches no load-gated resource.
    pub fn create_window_size_dependent_resources(&mut self, device: &GraphicsDevice) {
        let (width, height) = device.output_size();
        self.transforms
            .resize(width, height, device.orientation_transform());
    }

    /// Advance the autonomous 45°/s spin; suspended while a drag is tracked.
    /// Harmless before loading completes since render gates separately.
    pub fn update(&mut self, timer: &impl FrameTimer) {
        self.transforms.update(timer.total_seconds());
    }

    pub fn start_tracking(&mut self) {
        self.transforms.start_tracking();
    }

    pub fn tracking_update(&mut self, position_x: f32) {
        self.transforms.tracking_update(position_x);
    }

    pub fn stop_tracking(&mut self) {
        self.transforms.stop_tracking();
    }

    pub fn is_tracking(&self) -> bool {
        self.transforms.is_tracking()
    }

    /// True once the load chain has completed and resources are live.
    pub fn is_ready(&self) -> bool {
        self.resources.is_ready()
    }

    /// Upload the transform uniform and issue the scene's one indexed draw.
    ///
    /// A no-op until loading completes, and again after release. Device
    /// errors during the draw are fatal upstream and not caught here.
    pub fn render(&self, device: &GraphicsDevice, render_pass: &mut wgpu::RenderPass<'_>) {
        if !self.resources.is_ready() {
            return;
        }
        let (
            Some(pipeline),
            Some(transform_buffer),
            Some(vertex_buffer),
            Some(index_buffer),
            Some(transform_bind_group),
            Some(material_bind_group),
        ) = (
            self.resources.pipeline.as_ref(),
            self.resources.transform_buffer.as_ref(),
            self.resources.vertex_buffer.as_ref(),
            self.resources.index_buffer.as_ref(),
            self.resources.transform_bind_group.as_ref(),
            self.resources.material_bind_group.as_ref(),
        )
        else {
            return;
        };

        device
            .queue
            .write_buffer(transform_buffer, 0, bytemuck::bytes_of(self.transforms.uniform()));

        render_pass.set_pipeline(pipeline);
        render_pass.set_bind_group(0, transform_bind_group, &[]);
        render_pass.set_bind_group(1, material_bind_group, &[]);
        render_pass.set_vertex_buffer(0, vertex_buffer.slice(..));
        render_pass.set_index_buffer(index_buffer.slice(..), wgpu::IndexFormat::Uint16);
        render_pass.draw_indexed(0..self.resources.index_count, 0, 0..1);
    }

    /// Drop the readiness gate and every owned GPU handle. Idempotent and
    /// safe to call before, during or after loading.
    pub fn release_device_dependent_resources(&mut self) {
        self.resources.release();
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::Ordering;

    use super::SceneResources;

    #[test]
    fn resources_start_unready() {
        let resources = SceneResources::default();
        assert!(!resources.is_ready());
        assert_eq!(resources.index_count, 0);
    }

    #[test]
    fn release_drops_gate_and_index_count() {
        let mut resources = SceneResources::default();
        resources.loading_complete.store(true, Ordering::Release);
        resources.index_count = 36;

        resources.release();

        assert!(!resources.is_ready());
        assert_eq!(resources.index_count, 0);
        assert!(resources.pipeline.is_none());
        assert!(resources.vertex_buffer.is_none());
    }

    #[test]
    fn release_is_idempotent() {
        let mut resources = SceneResources::default();
        resources.release();
        resources.release();
        assert!(!resources.is_ready());
    }
}

use fnv::FnvHashMap;
use pano_core::mesh::MeshData;
use pano_core::{FrameDraw, MeshHandle, SceneBackend, TextureHandle, TextureSource};
use std::cell::RefCell;
use std::rc::Rc;
use web_sys as web;

mod pipeline;
mod texture;

use pipeline::{
    create_mesh_buffers, create_object_buffer, create_pipeline_resources,
    create_texture_bind_group, create_uniforms_bind_group, create_white_texture, GlobalUniforms,
    ObjectUniforms, PipelineResources, Vertex, OBJECT_STRIDE,
};
use texture::{spawn_icon_load, spawn_panorama_load, TextureSlot, TextureState, Uploader};

struct GpuMesh {
    vertex: wgpu::Buffer,
    index: wgpu::Buffer,
    index_count: u32,
}

/// WebGPU implementation of the scene backend. One per viewer canvas.
pub struct GpuBackend {
    surface: wgpu::Surface<'static>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    config: wgpu::SurfaceConfiguration,
    resources: PipelineResources,
    uploader: Uploader,

    globals: wgpu::Buffer,
    objects: wgpu::Buffer,
    object_capacity: u64,
    uniforms_bg: wgpu::BindGroup,
    _white: wgpu::Texture,
    white_bg: wgpu::BindGroup,

    meshes: FnvHashMap<u32, GpuMesh>,
    textures: FnvHashMap<u32, TextureSlot>,
    next_id: u32,
    staging: Vec<u8>,
    clear_color: wgpu::Color,
}

impl GpuBackend {
    pub async fn new(canvas: &web::HtmlCanvasElement) -> anyhow::Result<Self> {
        let width = canvas.width().max(1);
        let height = canvas.height().max(1);

        let instance = wgpu::Instance::default();
        let surface = instance.create_surface(wgpu::SurfaceTarget::Canvas(canvas.clone()))?;
        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .ok_or_else(|| anyhow::anyhow!("No WebGPU adapter"))?;
        let (device, queue) = adapter
            .request_device(
                &wgpu::DeviceDescriptor {
                    required_features: wgpu::Features::empty(),
                    required_limits: wgpu::Limits::default(),
                    memory_hints: wgpu::MemoryHints::Performance,
                    label: None,
                },
                None,
            )
            .await
            .map_err(|e| anyhow::anyhow!(format!("request_device error: {:?}", e)))?;
        let caps = surface.get_capabilities(&adapter);
        let format = caps
            .formats
            .iter()
            .copied()
            .find(|f| {
                matches!(
                    f,
                    wgpu::TextureFormat::Bgra8UnormSrgb | wgpu::TextureFormat::Rgba8UnormSrgb
                )
            })
            .or_else(|| caps.formats.first().copied())
            .ok_or_else(|| anyhow::anyhow!("surface reports no formats"))?;
        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format,
            width,
            height,
            present_mode: wgpu::PresentMode::Fifo,
            alpha_mode: caps
                .alpha_modes
                .first()
                .copied()
                .unwrap_or(wgpu::CompositeAlphaMode::Auto),
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);

        let resources = create_pipeline_resources(&device, format);
        let globals = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("global_uniforms"),
            size: std::mem::size_of::<GlobalUniforms>() as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });
        let object_capacity = 64;
        let objects = create_object_buffer(&device, object_capacity);
        let uniforms_bg =
            create_uniforms_bind_group(&device, &resources.uniforms_bgl, &globals, &objects);
        let (white, white_view) = create_white_texture(&device, &queue);
        let white_bg = create_texture_bind_group(
            &device,
            &resources.texture_bgl,
            &white_view,
            &resources.sampler,
        );
        let uploader = Uploader {
            device: device.clone(),
            queue: queue.clone(),
            layout: resources.texture_bgl.clone(),
            sampler: resources.sampler.clone(),
        };

        Ok(Self {
            surface,
            device,
            queue,
            config,
            resources,
            uploader,
            globals,
            objects,
            object_capacity,
            uniforms_bg,
            _white: white,
            white_bg,
            meshes: FnvHashMap::default(),
            textures: FnvHashMap::default(),
            next_id: 1,
            staging: Vec::new(),
            clear_color: wgpu::Color {
                r: 0.02,
                g: 0.02,
                b: 0.03,
                a: 1.0,
            },
        })
    }

    pub fn resize_if_needed(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            return;
        }
        if width != self.config.width || height != self.config.height {
            self.config.width = width;
            self.config.height = height;
            self.surface.configure(&self.device, &self.config);
        }
    }

    /// Reconfigure after the surface was lost or went stale.
    pub fn reconfigure(&mut self) {
        self.surface.configure(&self.device, &self.config);
    }

    fn next_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id = self.next_id.wrapping_add(1).max(1);
        id
    }

    fn ensure_object_capacity(&mut self, count: u64) {
        if count <= self.object_capacity {
            return;
        }
        let capacity = count.next_power_of_two();
        self.objects = create_object_buffer(&self.device, capacity);
        self.uniforms_bg = create_uniforms_bind_group(
            &self.device,
            &self.resources.uniforms_bgl,
            &self.globals,
            &self.objects,
        );
        self.object_capacity = capacity;
    }
}

impl SceneBackend for GpuBackend {
    type Error = wgpu::SurfaceError;

    fn upload_mesh(&mut self, label: &str, mesh: &MeshData) -> MeshHandle {
        let vertices: Vec<Vertex> = mesh
            .positions
            .iter()
            .enumerate()
            .map(|(i, p)| Vertex {
                position: p.to_array(),
                uv: mesh.uvs.get(i).map(|uv| uv.to_array()).unwrap_or([0.0, 0.0]),
            })
            .collect();
        let (vertex, index) = create_mesh_buffers(&self.device, label, &vertices, &mesh.indices);
        let id = self.next_id();
        self.meshes.insert(
            id,
            GpuMesh {
                vertex,
                index,
                index_count: mesh.indices.len() as u32,
            },
        );
        MeshHandle(id)
    }

    fn release_mesh(&mut self, handle: MeshHandle) {
        if let Some(mesh) = self.meshes.remove(&handle.0) {
            mesh.vertex.destroy();
            mesh.index.destroy();
        }
    }

    fn load_texture(&mut self, source: TextureSource<'_>) -> TextureHandle {
        let slot: TextureSlot = Rc::new(RefCell::new(TextureState::Pending));
        match source {
            TextureSource::Panorama { uri } => {
                spawn_panorama_load(self.uploader.clone(), slot.clone(), uri.to_string())
            }
            TextureSource::Icon(icon) => {
                spawn_icon_load(self.uploader.clone(), slot.clone(), icon.clone())
            }
        }
        let id = self.next_id();
        self.textures.insert(id, slot);
        TextureHandle(id)
    }

    fn texture_ready(&self, handle: TextureHandle) -> bool {
        self.textures
            .get(&handle.0)
            .map(|slot| matches!(*slot.borrow(), TextureState::Ready { .. }))
            .unwrap_or(false)
    }

    fn texture_error(&self, handle: TextureHandle) -> Option<String> {
        let slot = self.textures.get(&handle.0)?;
        let state = slot.borrow();
        match &*state {
            TextureState::Failed(reason) => Some(reason.clone()),
            _ => None,
        }
    }

    fn release_texture(&mut self, handle: TextureHandle) {
        if let Some(slot) = self.textures.remove(&handle.0) {
            *slot.borrow_mut() = TextureState::Released;
        }
    }

    fn draw(&mut self, frame: &FrameDraw) -> Result<(), Self::Error> {
        let globals = GlobalUniforms {
            view_proj: frame.view_proj.to_cols_array_2d(),
        };
        self.queue
            .write_buffer(&self.globals, 0, bytemuck::bytes_of(&globals));

        self.ensure_object_capacity(frame.items.len() as u64);
        self.staging.clear();
        self.staging
            .resize(frame.items.len() * OBJECT_STRIDE as usize, 0);
        for (i, item) in frame.items.iter().enumerate() {
            let u = ObjectUniforms::from_item(item);
            let start = i * OBJECT_STRIDE as usize;
            let bytes = bytemuck::bytes_of(&u);
            self.staging[start..start + bytes.len()].copy_from_slice(bytes);
        }
        if !self.staging.is_empty() {
            self.queue.write_buffer(&self.objects, 0, &self.staging);
        }

        let output = self.surface.get_current_texture()?;
        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());
        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("panorama_encoder"),
            });
        {
            let mut rpass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("panorama_pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(self.clear_color),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: None,
                timestamp_writes: None,
                occlusion_query_set: None,
            });
            rpass.set_pipeline(&self.resources.pipeline);
            for (i, item) in frame.items.iter().enumerate() {
                let Some(mesh) = self.meshes.get(&item.mesh.0) else {
                    continue;
                };
                let slot = item.texture.and_then(|t| self.textures.get(&t.0));
                let texture_state = slot.map(|s| s.borrow());
                let texture_bg = match texture_state.as_deref() {
                    Some(TextureState::Ready { bind_group, .. }) => bind_group,
                    // Nothing to sample yet; skip rather than draw a white sphere.
                    Some(_) => continue,
                    None => &self.white_bg,
                };
                let offset = (i as u64 * OBJECT_STRIDE) as u32;
                rpass.set_bind_group(0, &self.uniforms_bg, &[offset]);
                rpass.set_bind_group(1, texture_bg, &[]);
                rpass.set_vertex_buffer(0, mesh.vertex.slice(..));
                rpass.set_index_buffer(mesh.index.slice(..), wgpu::IndexFormat::Uint32);
                rpass.draw_indexed(0..mesh.index_count, 0, 0..1);
            }
        }
        self.queue.submit(Some(encoder.finish()));
        output.present();
        Ok(())
    }
}

//! wgpu renderer for the globe scene.

mod pipelines;
mod textures;
mod uniforms;

use std::sync::Arc;

use wgpu::util::DeviceExt;
use winit::window::Window;

use crate::camera::PerspectiveCamera;
use crate::core::{DecodedTexture, GpuContext, WindowDimensions};
use crate::error::Result;
use crate::material::TextureSlot;
use crate::overlay::{Overlay, OverlayStatus};
use crate::scene::Scene;
use crate::types::MeshUniform;

pub use pipelines::PipelineKind;
pub use textures::GlobeTextures;
pub use uniforms::{globals_uniform, star_instances};

use pipelines::Pipelines;
use textures::create_depth_view;

/// Star quads are drawn as two triangles
const STAR_VERTICES: u32 = 6;

/// GPU state for one globe layer
struct LayerResources {
    kind: PipelineKind,
    textures: Vec<TextureSlot>,
    uniform_buffer: wgpu::Buffer,
    mesh_bind_group: wgpu::BindGroup,
    texture_bind_group: Option<wgpu::BindGroup>,
}

struct StarBuffer {
    buffer: wgpu::Buffer,
    count: u32,
}

pub struct GlobeRenderer {
    gpu: GpuContext,
    surface: wgpu::Surface<'static>,
    config: wgpu::SurfaceConfiguration,
    depth_view: wgpu::TextureView,
    pipelines: Pipelines,
    globals_buffer: wgpu::Buffer,
    globals_bind_group: wgpu::BindGroup,
    sphere_buffer: wgpu::Buffer,
    sphere_vertex_count: u32,
    stars: Option<StarBuffer>,
    star_size: f32,
    layers: Vec<LayerResources>,
    textures: GlobeTextures,
}

impl GlobeRenderer {
    pub async fn new(window: Arc<Window>, scene: &Scene, dimensions: WindowDimensions) -> Result<Self> {
        let instance = GpuContext::instance();
        let surface = instance.create_surface(window)?;
        let gpu = GpuContext::new_with_surface(&instance, &surface).await?;

        let config = gpu.surface_config(&surface, dimensions)?;
        surface.configure(gpu.device(), &config);
        log::info!(
            "surface configured: {}x{} {:?}",
            config.width,
            config.height,
            config.format
        );

        let device = gpu.device();
        let pipelines = Pipelines::new(device, config.format);
        let depth_view = create_depth_view(device, dimensions);

        let globals_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("Globals Buffer"),
            size: std::mem::size_of::<crate::types::GlobalsUniform>() as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });
        let globals_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            layout: &pipelines.globals_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: globals_buffer.as_entire_binding(),
            }],
            label: Some("globals_bind_group"),
        });

        let sphere_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Sphere Vertices"),
            contents: bytemuck::cast_slice(&scene.geometry.vertices),
            usage: wgpu::BufferUsages::VERTEX,
        });

        let instances = star_instances(&scene.stars);
        let stars = (!instances.is_empty()).then(|| StarBuffer {
            buffer: device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some("Star Instances"),
                contents: bytemuck::cast_slice(&instances),
                usage: wgpu::BufferUsages::VERTEX,
            }),
            count: instances.len() as u32,
        });

        let textures = GlobeTextures::new(device, gpu.queue());

        let layers = scene
            .earth
            .layers
            .iter()
            .map(|layer| {
                let kind = PipelineKind::for_material(&layer.material);
                let uniform_buffer = device.create_buffer(&wgpu::BufferDescriptor {
                    label: Some(layer.kind.label()),
                    size: std::mem::size_of::<MeshUniform>() as u64,
                    usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
                    mapped_at_creation: false,
                });
                let mesh_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
                    layout: &pipelines.mesh_layout,
                    entries: &[wgpu::BindGroupEntry {
                        binding: 0,
                        resource: uniform_buffer.as_entire_binding(),
                    }],
                    label: Some("mesh_bind_group"),
                });

                let slots = layer.material.textures();
                let texture_bind_group = kind
                    .uses_textures()
                    .then(|| texture_bind_group(device, &pipelines, &textures, &slots))
                    .flatten();

                LayerResources {
                    kind,
                    textures: slots,
                    uniform_buffer,
                    mesh_bind_group,
                    texture_bind_group,
                }
            })
            .collect();

        Ok(Self {
            sphere_vertex_count: scene.geometry.vertex_count(),
            star_size: scene.stars.size,
            gpu,
            surface,
            config,
            depth_view,
            pipelines,
            globals_buffer,
            globals_bind_group,
            sphere_buffer,
            stars,
            layers,
            textures,
        })
    }

    pub fn device(&self) -> &wgpu::Device {
        self.gpu.device()
    }

    pub fn format(&self) -> wgpu::TextureFormat {
        self.config.format
    }

    pub fn max_texture_dimension(&self) -> u32 {
        self.gpu.max_texture_dimension()
    }

    pub fn resize(&mut self, dimensions: WindowDimensions) {
        if dimensions.is_empty() {
            return;
        }
        self.config.width = dimensions.width;
        self.config.height = dimensions.height;
        self.reconfigure();
    }

    /// Reapply the surface configuration after it was lost or outdated
    pub fn reconfigure(&mut self) {
        self.surface.configure(self.gpu.device(), &self.config);
        self.depth_view = create_depth_view(
            self.gpu.device(),
            WindowDimensions::new(self.config.width, self.config.height),
        );
    }

    /// Swap a decoded image in and rebind every layer that samples it
    pub fn upload_texture(&mut self, decoded: &DecodedTexture) {
        self.textures
            .upload(self.gpu.device(), self.gpu.queue(), decoded);

        for layer in &mut self.layers {
            if layer.kind.uses_textures() && layer.textures.contains(&decoded.slot) {
                layer.texture_bind_group = texture_bind_group(
                    self.gpu.device(),
                    &self.pipelines,
                    &self.textures,
                    &layer.textures,
                );
            }
        }
    }

    pub fn render(
        &mut self,
        window: &Window,
        scene: &Scene,
        camera: &PerspectiveCamera,
        overlay: &mut Overlay,
        status: &OverlayStatus,
    ) -> std::result::Result<(), wgpu::SurfaceError> {
        let canvas_opacity = status.presentation.canvas_opacity;
        let queue = self.gpu.queue();

        let globals = globals_uniform(camera, &scene.sun, self.star_size, canvas_opacity);
        queue.write_buffer(&self.globals_buffer, 0, bytemuck::cast_slice(&[globals]));

        for (layer, (resources, model)) in scene
            .earth
            .layers
            .iter()
            .zip(self.layers.iter().zip(scene.earth.layer_matrices()))
        {
            let uniform = layer.material.uniform(model);
            queue.write_buffer(&resources.uniform_buffer, 0, bytemuck::cast_slice(&[uniform]));
        }

        let output = self.surface.get_current_texture()?;
        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let mut encoder = self
            .gpu
            .device()
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Globe Encoder"),
            });

        {
            let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Globe Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(wgpu::Color::BLACK),
                        store: wgpu::StoreOp::Store,
                    },
                    depth_slice: None,
                })],
                depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                    view: &self.depth_view,
                    depth_ops: Some(wgpu::Operations {
                        load: wgpu::LoadOp::Clear(1.0),
                        store: wgpu::StoreOp::Discard,
                    }),
                    stencil_ops: None,
                }),
                occlusion_query_set: None,
                timestamp_writes: None,
            });

            if status.presentation.canvas_visible() {
                render_pass.set_bind_group(0, &self.globals_bind_group, &[]);

                if let Some(stars) = &self.stars {
                    render_pass.set_pipeline(&self.pipelines.stars);
                    render_pass.set_vertex_buffer(0, stars.buffer.slice(..));
                    render_pass.draw(0..STAR_VERTICES, 0..stars.count);
                }

                // Layers are ordered surface first, so the additive shells land on top
                render_pass.set_vertex_buffer(0, self.sphere_buffer.slice(..));
                for layer in &self.layers {
                    render_pass.set_pipeline(self.pipelines.get(layer.kind));
                    render_pass.set_bind_group(1, &layer.mesh_bind_group, &[]);
                    if layer.kind.uses_textures() {
                        let Some(bind_group) = &layer.texture_bind_group else {
                            continue;
                        };
                        render_pass.set_bind_group(2, bind_group, &[]);
                    }
                    render_pass.draw(0..self.sphere_vertex_count, 0..1);
                }
            }
        }

        let user_buffers = overlay.paint(
            window,
            self.gpu.device(),
            queue,
            &mut encoder,
            &view,
            [self.config.width, self.config.height],
            status,
        );

        queue.submit(user_buffers.into_iter().chain(std::iter::once(encoder.finish())));
        output.present();

        Ok(())
    }
}

/// Texture group for a layer; single-map layers bind their map twice
fn texture_bind_group(
    device: &wgpu::Device,
    pipelines: &Pipelines,
    textures: &GlobeTextures,
    slots: &[TextureSlot],
) -> Option<wgpu::BindGroup> {
    let map = textures.view(*slots.first()?)?;
    let second = match slots.get(1) {
        Some(slot) => textures.view(*slot)?,
        None => map,
    };

    Some(device.create_bind_group(&wgpu::BindGroupDescriptor {
        layout: &pipelines.texture_layout,
        entries: &[
            wgpu::BindGroupEntry {
                binding: 0,
                resource: wgpu::BindingResource::TextureView(map),
            },
            wgpu::BindGroupEntry {
                binding: 1,
                resource: wgpu::BindingResource::TextureView(second),
            },
            wgpu::BindGroupEntry {
                binding: 2,
                resource: wgpu::BindingResource::Sampler(textures.sampler()),
            },
        ],
        label: Some("texture_bind_group"),
    }))
}

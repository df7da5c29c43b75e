use crate::geometry::SphereVertex;
use crate::material::{Blending, Material};
use crate::types::StarInstance;

use super::textures::DEPTH_FORMAT;

macro_rules! shader_source {
    ($file:literal) => {
        concat!(
            include_str!("../shaders/common.wgsl"),
            "\n",
            include_str!(concat!("../shaders/", $file))
        )
    };
}

const ADDITIVE: wgpu::BlendState = wgpu::BlendState {
    color: wgpu::BlendComponent {
        src_factor: wgpu::BlendFactor::SrcAlpha,
        dst_factor: wgpu::BlendFactor::One,
        operation: wgpu::BlendOperation::Add,
    },
    alpha: wgpu::BlendComponent {
        src_factor: wgpu::BlendFactor::Zero,
        dst_factor: wgpu::BlendFactor::One,
        operation: wgpu::BlendOperation::Add,
    },
};

/// Which pipeline draws a material
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PipelineKind {
    Earth,
    Layer,
    Fresnel,
}

impl PipelineKind {
    pub fn for_material(material: &Material) -> Self {
        match material {
            Material::Phong { .. } => PipelineKind::Earth,
            Material::Basic { .. } | Material::Standard { .. } => PipelineKind::Layer,
            Material::Fresnel(_) => PipelineKind::Fresnel,
        }
    }

    pub fn uses_textures(self) -> bool {
        self != PipelineKind::Fresnel
    }
}

pub struct Pipelines {
    pub globals_layout: wgpu::BindGroupLayout,
    pub mesh_layout: wgpu::BindGroupLayout,
    pub texture_layout: wgpu::BindGroupLayout,
    pub earth: wgpu::RenderPipeline,
    pub layer: wgpu::RenderPipeline,
    pub fresnel: wgpu::RenderPipeline,
    pub stars: wgpu::RenderPipeline,
}

impl Pipelines {
    pub fn new(device: &wgpu::Device, format: wgpu::TextureFormat) -> Self {
        let globals_layout = uniform_layout(device, "globals_bind_group_layout");
        let mesh_layout = uniform_layout(device, "mesh_bind_group_layout");
        let texture_layout = texture_layout(device);

        let textured = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("Textured Pipeline Layout"),
            bind_group_layouts: &[&globals_layout, &mesh_layout, &texture_layout],
            push_constant_ranges: &[],
        });
        let untextured = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("Glow Pipeline Layout"),
            bind_group_layouts: &[&globals_layout, &mesh_layout],
            push_constant_ranges: &[],
        });
        let globals_only = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("Star Pipeline Layout"),
            bind_group_layouts: &[&globals_layout],
            push_constant_ranges: &[],
        });

        let sphere_buffers = [sphere_vertex_layout()];
        let star_buffers = [star_instance_layout()];

        let earth = create_pipeline(
            device,
            "Earth Pipeline",
            shader_source!("earth.wgsl"),
            &textured,
            &sphere_buffers,
            format,
            Blending::Normal,
        );
        let layer = create_pipeline(
            device,
            "Layer Pipeline",
            shader_source!("layer.wgsl"),
            &textured,
            &sphere_buffers,
            format,
            Blending::Additive,
        );
        let fresnel = create_pipeline(
            device,
            "Fresnel Pipeline",
            shader_source!("fresnel.wgsl"),
            &untextured,
            &sphere_buffers,
            format,
            Blending::Additive,
        );
        let stars = create_pipeline(
            device,
            "Star Pipeline",
            shader_source!("stars.wgsl"),
            &globals_only,
            &star_buffers,
            format,
            Blending::Normal,
        );

        Self {
            globals_layout,
            mesh_layout,
            texture_layout,
            earth,
            layer,
            fresnel,
            stars,
        }
    }

    pub fn get(&self, kind: PipelineKind) -> &wgpu::RenderPipeline {
        match kind {
            PipelineKind::Earth => &self.earth,
            PipelineKind::Layer => &self.layer,
            PipelineKind::Fresnel => &self.fresnel,
        }
    }
}

fn uniform_layout(device: &wgpu::Device, label: &str) -> wgpu::BindGroupLayout {
    device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
        entries: &[wgpu::BindGroupLayoutEntry {
            binding: 0,
            visibility: wgpu::ShaderStages::VERTEX_FRAGMENT,
            ty: wgpu::BindingType::Buffer {
                ty: wgpu::BufferBindingType::Uniform,
                has_dynamic_offset: false,
                min_binding_size: None,
            },
            count: None,
        }],
        label: Some(label),
    })
}

fn texture_layout(device: &wgpu::Device) -> wgpu::BindGroupLayout {
    let texture_entry = |binding| wgpu::BindGroupLayoutEntry {
        binding,
        visibility: wgpu::ShaderStages::FRAGMENT,
        ty: wgpu::BindingType::Texture {
            sample_type: wgpu::TextureSampleType::Float { filterable: true },
            view_dimension: wgpu::TextureViewDimension::D2,
            multisampled: false,
        },
        count: None,
    };

    device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
        entries: &[
            texture_entry(0),
            texture_entry(1),
            wgpu::BindGroupLayoutEntry {
                binding: 2,
                visibility: wgpu::ShaderStages::FRAGMENT,
                ty: wgpu::BindingType::Sampler(wgpu::SamplerBindingType::Filtering),
                count: None,
            },
        ],
        label: Some("texture_bind_group_layout"),
    })
}

fn sphere_vertex_layout() -> wgpu::VertexBufferLayout<'static> {
    const ATTRIBUTES: [wgpu::VertexAttribute; 3] =
        wgpu::vertex_attr_array![0 => Float32x3, 1 => Float32x3, 2 => Float32x2];

    wgpu::VertexBufferLayout {
        array_stride: std::mem::size_of::<SphereVertex>() as u64,
        step_mode: wgpu::VertexStepMode::Vertex,
        attributes: &ATTRIBUTES,
    }
}

fn star_instance_layout() -> wgpu::VertexBufferLayout<'static> {
    // Each vec3 is followed by a pad float
    const ATTRIBUTES: [wgpu::VertexAttribute; 2] = [
        wgpu::VertexAttribute {
            format: wgpu::VertexFormat::Float32x3,
            offset: 0,
            shader_location: 0,
        },
        wgpu::VertexAttribute {
            format: wgpu::VertexFormat::Float32x3,
            offset: 16,
            shader_location: 1,
        },
    ];

    wgpu::VertexBufferLayout {
        array_stride: std::mem::size_of::<StarInstance>() as u64,
        step_mode: wgpu::VertexStepMode::Instance,
        attributes: &ATTRIBUTES,
    }
}

fn create_pipeline(
    device: &wgpu::Device,
    label: &str,
    source: &'static str,
    layout: &wgpu::PipelineLayout,
    buffers: &[wgpu::VertexBufferLayout<'_>],
    format: wgpu::TextureFormat,
    blending: Blending,
) -> wgpu::RenderPipeline {
    let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
        label: Some(label),
        source: wgpu::ShaderSource::Wgsl(source.into()),
    });

    let (blend, depth_write_enabled) = match blending {
        Blending::Normal => (wgpu::BlendState::REPLACE, true),
        // Transparent shells test against the surface but never occlude each other
        Blending::Additive => (ADDITIVE, false),
    };

    device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
        label: Some(label),
        layout: Some(layout),
        vertex: wgpu::VertexState {
            module: &shader,
            entry_point: Some("vs_main"),
            buffers,
            compilation_options: Default::default(),
        },
        fragment: Some(wgpu::FragmentState {
            module: &shader,
            entry_point: Some("fs_main"),
            targets: &[Some(wgpu::ColorTargetState {
                format,
                blend: Some(blend),
                write_mask: wgpu::ColorWrites::ALL,
            })],
            compilation_options: Default::default(),
        }),
        primitive: wgpu::PrimitiveState {
            topology: wgpu::PrimitiveTopology::TriangleList,
            strip_index_format: None,
            front_face: wgpu::FrontFace::Ccw,
            cull_mode: Some(wgpu::Face::Back),
            polygon_mode: wgpu::PolygonMode::Fill,
            unclipped_depth: false,
            conservative: false,
        },
        depth_stencil: Some(wgpu::DepthStencilState {
            format: DEPTH_FORMAT,
            depth_write_enabled,
            depth_compare: wgpu::CompareFunction::Less,
            stencil: wgpu::StencilState::default(),
            bias: wgpu::DepthBiasState::default(),
        }),
        multisample: wgpu::MultisampleState {
            count: 1,
            mask: !0,
            alpha_to_coverage_enabled: false,
        },
        multiview: None,
        cache: None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{FresnelConfig, GlobeSettings};

    #[test]
    fn each_layer_maps_to_a_pipeline() {
        let layers = Material::earth_layers(&GlobeSettings::default(), &FresnelConfig::default());
        let kinds: Vec<_> = layers.iter().map(PipelineKind::for_material).collect();
        assert_eq!(
            kinds,
            vec![
                PipelineKind::Earth,
                PipelineKind::Layer,
                PipelineKind::Layer,
                PipelineKind::Fresnel
            ]
        );
        assert!(!PipelineKind::Fresnel.uses_textures());
    }

    #[test]
    fn star_color_follows_padding() {
        let layout = star_instance_layout();
        assert_eq!(layout.array_stride, 32);
        assert_eq!(layout.attributes[1].offset, 16);
    }
}

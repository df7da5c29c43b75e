use std::collections::HashMap;

use crate::core::{DecodedTexture, WindowDimensions};
use crate::material::TextureSlot;

pub const DEPTH_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Depth32Float;

pub struct SlotTexture {
    pub texture: wgpu::Texture,
    pub view: wgpu::TextureView,
}

/// One GPU texture per slot; starts as a single fallback texel
pub struct GlobeTextures {
    slots: HashMap<TextureSlot, SlotTexture>,
    sampler: wgpu::Sampler,
}

impl GlobeTextures {
    pub fn new(device: &wgpu::Device, queue: &wgpu::Queue) -> Self {
        let slots = TextureSlot::ALL
            .iter()
            .map(|&slot| {
                let texture = upload_rgba(device, queue, slot, 1, 1, &slot.fallback_texel());
                (slot, texture)
            })
            .collect();

        // Longitude wraps, latitude stops at the poles
        let sampler = device.create_sampler(&wgpu::SamplerDescriptor {
            label: Some("Globe Sampler"),
            address_mode_u: wgpu::AddressMode::Repeat,
            address_mode_v: wgpu::AddressMode::ClampToEdge,
            address_mode_w: wgpu::AddressMode::ClampToEdge,
            mag_filter: wgpu::FilterMode::Linear,
            min_filter: wgpu::FilterMode::Linear,
            mipmap_filter: wgpu::FilterMode::Nearest,
            ..Default::default()
        });

        Self { slots, sampler }
    }

    /// Replace a slot's texture with decoded pixels
    pub fn upload(&mut self, device: &wgpu::Device, queue: &wgpu::Queue, decoded: &DecodedTexture) {
        let texture = upload_rgba(
            device,
            queue,
            decoded.slot,
            decoded.width,
            decoded.height,
            &decoded.pixels,
        );
        self.slots.insert(decoded.slot, texture);
    }

    pub fn view(&self, slot: TextureSlot) -> Option<&wgpu::TextureView> {
        self.slots.get(&slot).map(|t| &t.view)
    }

    pub fn sampler(&self) -> &wgpu::Sampler {
        &self.sampler
    }
}

fn upload_rgba(
    device: &wgpu::Device,
    queue: &wgpu::Queue,
    slot: TextureSlot,
    width: u32,
    height: u32,
    pixels: &[u8],
) -> SlotTexture {
    let format = if slot.is_color() {
        wgpu::TextureFormat::Rgba8UnormSrgb
    } else {
        wgpu::TextureFormat::Rgba8Unorm
    };
    let size = wgpu::Extent3d {
        width,
        height,
        depth_or_array_layers: 1,
    };

    let texture = device.create_texture(&wgpu::TextureDescriptor {
        label: Some(slot.label()),
        size,
        mip_level_count: 1,
        sample_count: 1,
        dimension: wgpu::TextureDimension::D2,
        format,
        usage: wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
        view_formats: &[],
    });

    queue.write_texture(
        texture.as_image_copy(),
        pixels,
        wgpu::TexelCopyBufferLayout {
            offset: 0,
            bytes_per_row: Some(4 * width),
            rows_per_image: Some(height),
        },
        size,
    );

    let view = texture.create_view(&wgpu::TextureViewDescriptor::default());
    SlotTexture { texture, view }
}

pub fn create_depth_view(device: &wgpu::Device, dimensions: WindowDimensions) -> wgpu::TextureView {
    let texture = device.create_texture(&wgpu::TextureDescriptor {
        label: Some("Depth Texture"),
        size: wgpu::Extent3d {
            width: dimensions.width.max(1),
            height: dimensions.height.max(1),
            depth_or_array_layers: 1,
        },
        mip_level_count: 1,
        sample_count: 1,
        dimension: wgpu::TextureDimension::D2,
        format: DEPTH_FORMAT,
        usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
        view_formats: &[],
    });
    texture.create_view(&wgpu::TextureViewDescriptor::default())
}

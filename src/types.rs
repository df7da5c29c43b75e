/// Per-frame uniform shared by every pipeline (bind group 0)
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct GlobalsUniform {
    pub view: [[f32; 4]; 4],
    pub proj: [[f32; 4]; 4],
    pub camera_position: [f32; 4],
    /// xyz: unit vector towards the light, w: intensity
    pub sun_direction: [f32; 4],
    pub sun_color: [f32; 4],
    /// x: star point size, y: canvas opacity
    pub params: [f32; 4],
}

/// Per-mesh uniform (bind group 1)
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct MeshUniform {
    pub model: [[f32; 4]; 4],
    /// rgb: diffuse colour, a: opacity
    pub color: [f32; 4],
    /// x: bump scale, y: lit (1.0) or unlit (0.0), z: shininess
    pub params: [f32; 4],
    pub rim_color: [f32; 4],
    pub facing_color: [f32; 4],
    /// x: bias, y: scale, z: power
    pub fresnel: [f32; 4],
}

/// One star billboard instance
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct StarInstance {
    pub position: [f32; 3],
    pub _pad: f32,
    pub color: [f32; 3],
    pub _pad2: f32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn uniform_sizes_are_16_byte_aligned() {
        assert_eq!(std::mem::size_of::<GlobalsUniform>() % 16, 0);
        assert_eq!(std::mem::size_of::<MeshUniform>() % 16, 0);
        assert_eq!(std::mem::size_of::<GlobalsUniform>(), 192);
        assert_eq!(std::mem::size_of::<MeshUniform>(), 144);
    }

    #[test]
    fn star_instance_stride() {
        assert_eq!(std::mem::size_of::<StarInstance>(), 32);
    }
}

//! Surface descriptions for the four globe layers.
//!
//! Each material only decides which pipeline draws the layer and which
//! uniform values it receives; the shading itself lives in `src/shaders/`.

use glam::{Mat4, Vec3};

use crate::config::{FresnelConfig, GlobeSettings};
use crate::math::Color;
use crate::types::MeshUniform;

/// Which texture a layer samples
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TextureSlot {
    Day,
    Bump,
    Night,
    Clouds,
}

impl TextureSlot {
    pub const ALL: [TextureSlot; 4] = [
        TextureSlot::Day,
        TextureSlot::Bump,
        TextureSlot::Night,
        TextureSlot::Clouds,
    ];

    /// Colour maps are stored sRGB, the bump map is raw height data
    pub fn is_color(self) -> bool {
        !matches!(self, TextureSlot::Bump)
    }

    /// Texel shown until (or instead of) the real image
    pub fn fallback_texel(self) -> [u8; 4] {
        match self {
            TextureSlot::Day => [128, 128, 128, 255],
            TextureSlot::Bump => [128, 128, 128, 255],
            TextureSlot::Night | TextureSlot::Clouds => [0, 0, 0, 255],
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            TextureSlot::Day => "day map",
            TextureSlot::Bump => "bump map",
            TextureSlot::Night => "night map",
            TextureSlot::Clouds => "clouds map",
        }
    }
}

/// Rim-lighting parameters for the atmosphere shell
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FresnelParams {
    pub rim_color: Color,
    pub facing_color: Color,
    pub bias: f32,
    pub scale: f32,
    pub power: f32,
}

impl Default for FresnelParams {
    fn default() -> Self {
        Self::from(&FresnelConfig::default())
    }
}

impl From<&FresnelConfig> for FresnelParams {
    fn from(config: &FresnelConfig) -> Self {
        Self {
            rim_color: Color::from_hex(config.rim_color),
            facing_color: Color::from_hex(config.facing_color),
            bias: config.bias,
            scale: config.scale,
            power: config.power,
        }
    }
}

impl FresnelParams {
    /// Reflection factor for a surface seen along `view_dir` (camera to point)
    pub fn factor(&self, view_dir: Vec3, normal: Vec3) -> f32 {
        let facing = 1.0 + view_dir.normalize().dot(normal.normalize());
        (self.bias + self.scale * facing.max(0.0).powf(self.power)).clamp(0.0, 1.0)
    }

    /// Colour and alpha the shader writes for a given factor
    pub fn shade(&self, factor: f32) -> ([f32; 3], f32) {
        let f = factor.clamp(0.0, 1.0);
        let mix = |a: f32, b: f32| a + (b - a) * f;
        (
            [
                mix(self.facing_color.r, self.rim_color.r),
                mix(self.facing_color.g, self.rim_color.g),
                mix(self.facing_color.b, self.rim_color.b),
            ],
            f,
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Blending {
    Normal,
    Additive,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Material {
    /// Lit surface with a colour map and a bump map
    Phong {
        color: Color,
        map: TextureSlot,
        bump_map: TextureSlot,
        bump_scale: f32,
        shininess: f32,
    },
    /// Unlit textured surface
    Basic {
        map: TextureSlot,
        opacity: f32,
        blending: Blending,
    },
    /// Sun-lit textured surface without specular
    Standard {
        map: TextureSlot,
        opacity: f32,
        blending: Blending,
    },
    Fresnel(FresnelParams),
}

impl Material {
    pub fn phong(map: TextureSlot, bump_map: TextureSlot, bump_scale: f32) -> Self {
        Material::Phong {
            color: Color::WHITE,
            map,
            bump_map,
            bump_scale,
            shininess: 30.0,
        }
    }

    pub fn basic(map: TextureSlot, opacity: f32) -> Self {
        Material::Basic {
            map,
            opacity,
            blending: Blending::Additive,
        }
    }

    pub fn standard(map: TextureSlot, opacity: f32) -> Self {
        Material::Standard {
            map,
            opacity,
            blending: Blending::Additive,
        }
    }

    pub fn fresnel(params: FresnelParams) -> Self {
        Material::Fresnel(params)
    }

    /// Materials for surface, lights, clouds and glow, in draw order
    pub fn earth_layers(settings: &GlobeSettings, fresnel: &FresnelConfig) -> [Material; 4] {
        [
            Material::phong(TextureSlot::Day, TextureSlot::Bump, settings.bump_scale),
            Material::basic(TextureSlot::Night, settings.lights_opacity),
            Material::standard(TextureSlot::Clouds, settings.clouds_opacity),
            Material::fresnel(FresnelParams::from(fresnel)),
        ]
    }

    pub fn blending(&self) -> Blending {
        match self {
            Material::Phong { .. } => Blending::Normal,
            Material::Basic { blending, .. } | Material::Standard { blending, .. } => *blending,
            Material::Fresnel(_) => Blending::Additive,
        }
    }

    pub fn is_transparent(&self) -> bool {
        self.blending() == Blending::Additive
    }

    /// Texture slots sampled by this material
    pub fn textures(&self) -> Vec<TextureSlot> {
        match self {
            Material::Phong { map, bump_map, .. } => vec![*map, *bump_map],
            Material::Basic { map, .. } | Material::Standard { map, .. } => vec![*map],
            Material::Fresnel(_) => Vec::new(),
        }
    }

    pub fn uniform(&self, model: Mat4) -> MeshUniform {
        let mut uniform = MeshUniform {
            model: model.to_cols_array_2d(),
            color: Color::WHITE.to_vec4(1.0),
            params: [0.0; 4],
            rim_color: [0.0; 4],
            facing_color: [0.0; 4],
            fresnel: [0.0; 4],
        };

        match self {
            Material::Phong {
                color,
                bump_scale,
                shininess,
                ..
            } => {
                uniform.color = color.to_vec4(1.0);
                uniform.params = [*bump_scale, 1.0, *shininess, 0.0];
            }
            Material::Basic { opacity, .. } => {
                uniform.color = Color::WHITE.to_vec4(*opacity);
                uniform.params = [0.0, 0.0, 0.0, 0.0];
            }
            Material::Standard { opacity, .. } => {
                uniform.color = Color::WHITE.to_vec4(*opacity);
                uniform.params = [0.0, 1.0, 0.0, 0.0];
            }
            Material::Fresnel(fresnel) => {
                uniform.rim_color = fresnel.rim_color.to_vec4(1.0);
                uniform.facing_color = fresnel.facing_color.to_vec4(1.0);
                uniform.fresnel = [fresnel.bias, fresnel.scale, fresnel.power, 0.0];
            }
        }

        uniform
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fresnel_brightest_at_grazing_angle() {
        let params = FresnelParams::default();
        let normal = Vec3::Z;

        // Looking straight at the surface: 1 + dot = 0, only the bias remains
        let facing = params.factor(-Vec3::Z, normal);
        assert!((facing - params.bias).abs() < 1e-6);

        // Grazing: 1 + dot = 1
        let grazing = params.factor(Vec3::X, normal);
        assert!((grazing - 1.0).abs() < 1e-6);
        assert!(grazing > facing);
    }

    #[test]
    fn fresnel_shade_mixes_towards_rim() {
        let params = FresnelParams::default();
        let (rgb, alpha) = params.shade(1.0);
        assert_eq!(rgb, params.rim_color.to_array());
        assert_eq!(alpha, 1.0);

        let (rgb, alpha) = params.shade(0.0);
        assert_eq!(rgb, params.facing_color.to_array());
        assert_eq!(alpha, 0.0);
    }

    #[test]
    fn layer_materials_match_stock_scene() {
        let layers = Material::earth_layers(&GlobeSettings::default(), &FresnelConfig::default());
        assert_eq!(layers[0].textures(), vec![TextureSlot::Day, TextureSlot::Bump]);
        assert!(!layers[0].is_transparent());
        assert!(layers[1..].iter().all(Material::is_transparent));
        assert!(layers[3].textures().is_empty());
    }

    #[test]
    fn uniform_packs_opacity_and_lighting() {
        let lights = Material::basic(TextureSlot::Night, 0.6).uniform(Mat4::IDENTITY);
        assert_eq!(lights.color[3], 0.6);
        assert_eq!(lights.params[1], 0.0);

        let clouds = Material::standard(TextureSlot::Clouds, 0.6).uniform(Mat4::IDENTITY);
        assert_eq!(clouds.params[1], 1.0);
    }
}

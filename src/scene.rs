//! Scene graph for the globe: one tilted group holding four concentric
//! layers that share a sphere mesh, plus the star backdrop and the sun.

use glam::{Mat4, Vec3};

use crate::config::{GlobeConfig, SunConfig};
use crate::core::Spin;
use crate::geometry::{generate_star_field, SphereGeometry, StarField};
use crate::material::Material;
use crate::math::Color;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LayerKind {
    Surface,
    Lights,
    Clouds,
    Glow,
}

impl LayerKind {
    pub fn label(self) -> &'static str {
        match self {
            LayerKind::Surface => "surface",
            LayerKind::Lights => "lights",
            LayerKind::Clouds => "clouds",
            LayerKind::Glow => "glow",
        }
    }
}

/// One shell of the globe
#[derive(Debug, Clone)]
pub struct GlobeLayer {
    pub kind: LayerKind,
    pub material: Material,
    pub scale: f32,
    pub spin: Spin,
}

impl GlobeLayer {
    pub fn new(kind: LayerKind, material: Material, scale: f32, spin_rate: f32) -> Self {
        Self {
            kind,
            material,
            scale,
            spin: Spin::new(spin_rate),
        }
    }

    /// `parent · rotationY(angle) · scale`
    pub fn model_matrix(&self, parent: Mat4) -> Mat4 {
        parent * Mat4::from_rotation_y(self.spin.angle()) * Mat4::from_scale(Vec3::splat(self.scale))
    }
}

/// Group tilted about Z by the axial tilt
#[derive(Debug, Clone)]
pub struct EarthGroup {
    /// Rotation about Z in radians
    pub tilt: f32,
    pub layers: Vec<GlobeLayer>,
}

impl EarthGroup {
    pub fn transform(&self) -> Mat4 {
        Mat4::from_rotation_z(self.tilt)
    }

    pub fn layer_matrices(&self) -> impl Iterator<Item = Mat4> + '_ {
        let parent = self.transform();
        self.layers.iter().map(move |layer| layer.model_matrix(parent))
    }

    pub fn layer(&self, kind: LayerKind) -> Option<&GlobeLayer> {
        self.layers.iter().find(|layer| layer.kind == kind)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DirectionalLight {
    pub color: Color,
    pub intensity: f32,
    /// Light shines from here towards the origin
    pub position: Vec3,
}

impl DirectionalLight {
    pub fn direction(&self) -> Vec3 {
        self.position.try_normalize().unwrap_or(Vec3::Z)
    }
}

impl From<&SunConfig> for DirectionalLight {
    fn from(config: &SunConfig) -> Self {
        Self {
            color: Color::from_hex(config.color),
            intensity: config.intensity,
            position: Vec3::from_array(config.position),
        }
    }
}

pub struct Scene {
    pub geometry: SphereGeometry,
    pub earth: EarthGroup,
    pub stars: StarField,
    pub sun: DirectionalLight,
    frames: u64,
}

impl Scene {
    pub fn from_config(config: &GlobeConfig) -> Self {
        let globe = &config.globe;
        let geometry = SphereGeometry::icosahedron(globe.radius, globe.detail);
        let [surface, lights, clouds, glow] = Material::earth_layers(globe, &config.fresnel);

        let earth = EarthGroup {
            tilt: -globe.axial_tilt_degrees.to_radians(),
            layers: vec![
                GlobeLayer::new(LayerKind::Surface, surface, 1.0, globe.spin_rate),
                GlobeLayer::new(LayerKind::Lights, lights, 1.0, globe.spin_rate),
                GlobeLayer::new(LayerKind::Clouds, clouds, globe.clouds_scale, globe.clouds_spin_rate),
                GlobeLayer::new(LayerKind::Glow, glow, globe.glow_scale, globe.spin_rate),
            ],
        };

        let stars = generate_star_field(&config.stars);
        log::info!(
            "scene: {} triangles per layer, {} stars (seed {})",
            geometry.triangle_count(),
            stars.len(),
            stars.seed
        );

        Self {
            geometry,
            earth,
            stars,
            sun: DirectionalLight::from(&config.sun),
            frames: 0,
        }
    }

    /// Apply one frame of rotation to every layer
    pub fn advance(&mut self) {
        self.frames += 1;
        for layer in &mut self.earth.layers {
            layer.spin.advance();
        }
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }
}

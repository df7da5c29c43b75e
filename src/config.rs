//! Viewer configuration.
//!
//! Every field has a default matching the stock Earth scene, so a JSON file
//! only needs the values it wants to change.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::core::{ResizePolicy, TextureRequest};
use crate::error::{GlobeError, Result};
use crate::geometry::StarFieldConfig;
use crate::material::TextureSlot;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GlobeConfig {
    pub window: WindowConfig,
    pub camera: CameraConfig,
    pub controls: ControlsConfig,
    pub globe: GlobeSettings,
    pub textures: TextureConfig,
    pub fresnel: FresnelConfig,
    pub stars: StarFieldConfig,
    pub sun: SunConfig,
    pub loading: LoadingConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    pub title: String,
    pub width: u32,
    pub height: u32,
    pub resize_policy: ResizePolicy,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: "Earth".to_string(),
            width: 1280,
            height: 720,
            resize_policy: ResizePolicy::Track,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    pub fov_degrees: f32,
    pub near: f32,
    pub far: f32,
    pub distance: f32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            fov_degrees: 75.0,
            near: 0.1,
            far: 1000.0,
            distance: 5.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ControlsConfig {
    pub enable_damping: bool,
    pub damping_factor: f32,
    pub rotate_speed: f32,
    pub zoom_speed: f32,
    pub min_distance: f32,
    pub max_distance: f32,
}

impl Default for ControlsConfig {
    fn default() -> Self {
        Self {
            enable_damping: true,
            damping_factor: 0.03,
            rotate_speed: 1.0,
            zoom_speed: 1.0,
            min_distance: 1.2,
            max_distance: 100.0,
        }
    }
}

/// Earth group layout and per-layer parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GlobeSettings {
    pub axial_tilt_degrees: f32,
    pub radius: f32,
    pub detail: u32,
    pub bump_scale: f32,
    pub lights_opacity: f32,
    pub clouds_opacity: f32,
    pub clouds_scale: f32,
    pub glow_scale: f32,
    /// Radians per frame for the surface, lights and glow layers
    pub spin_rate: f32,
    pub clouds_spin_rate: f32,
}

impl Default for GlobeSettings {
    fn default() -> Self {
        Self {
            axial_tilt_degrees: 23.4,
            radius: 1.0,
            detail: 12,
            bump_scale: 0.04,
            lights_opacity: 0.6,
            clouds_opacity: 0.6,
            clouds_scale: 1.003,
            glow_scale: 1.01,
            spin_rate: 0.002,
            clouds_spin_rate: 0.0028,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TextureConfig {
    pub directory: PathBuf,
    pub day: String,
    pub bump: String,
    pub night: String,
    pub clouds: String,
}

impl Default for TextureConfig {
    fn default() -> Self {
        Self {
            directory: PathBuf::from("textures"),
            day: "8k_earth_daymap.jpg".to_string(),
            bump: "01_earthbump1k.jpg".to_string(),
            night: "8k_earth_nightmap.jpg".to_string(),
            clouds: "8k_earth_clouds.jpg".to_string(),
        }
    }
}

impl TextureConfig {
    pub fn path_of(&self, file: &str) -> PathBuf {
        self.directory.join(file)
    }

    pub fn file_for(&self, slot: TextureSlot) -> &str {
        match slot {
            TextureSlot::Day => &self.day,
            TextureSlot::Bump => &self.bump,
            TextureSlot::Night => &self.night,
            TextureSlot::Clouds => &self.clouds,
        }
    }

    /// One load request per texture slot
    pub fn requests(&self) -> Vec<TextureRequest> {
        TextureSlot::ALL
            .iter()
            .map(|&slot| TextureRequest::new(slot, self.path_of(self.file_for(slot))))
            .collect()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FresnelConfig {
    pub rim_color: u32,
    pub facing_color: u32,
    pub bias: f32,
    pub scale: f32,
    pub power: f32,
}

impl Default for FresnelConfig {
    fn default() -> Self {
        Self {
            rim_color: 0x0088ff,
            facing_color: 0x000000,
            bias: 0.1,
            scale: 1.0,
            power: 4.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SunConfig {
    pub color: u32,
    pub intensity: f32,
    pub position: [f32; 3],
}

impl Default for SunConfig {
    fn default() -> Self {
        Self {
            color: 0xffffff,
            intensity: 1.0,
            position: [2.0, 0.5, 1.5],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoadingConfig {
    /// Gate the globe behind a loading screen until every texture resolves
    pub enabled: bool,
    pub fade_seconds: f32,
}

impl Default for LoadingConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            fade_seconds: 1.0,
        }
    }
}

impl GlobeConfig {
    /// Read a JSON config file; missing fields take their defaults
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path).map_err(|source| GlobeError::ConfigIo {
            path: path.to_path_buf(),
            source,
        })?;
        let config: GlobeConfig =
            serde_json::from_str(&text).map_err(|source| GlobeError::ConfigParse {
                path: path.to_path_buf(),
                source,
            })?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        let invalid = |msg: String| Err(GlobeError::InvalidConfig(msg));

        if self.window.width == 0 || self.window.height == 0 {
            return invalid(format!(
                "window size must be non-zero, got {}x{}",
                self.window.width, self.window.height
            ));
        }
        if !(self.camera.fov_degrees > 0.0 && self.camera.fov_degrees < 180.0) {
            return invalid(format!("camera fov {} out of (0, 180)", self.camera.fov_degrees));
        }
        if !(self.camera.near > 0.0 && self.camera.near < self.camera.far) {
            return invalid(format!(
                "camera planes must satisfy 0 < near < far, got near {} far {}",
                self.camera.near, self.camera.far
            ));
        }
        if !(0.0..=1.0).contains(&self.controls.damping_factor) {
            return invalid(format!(
                "damping factor {} out of [0, 1]",
                self.controls.damping_factor
            ));
        }
        if self.controls.min_distance > self.controls.max_distance {
            return invalid("controls min_distance exceeds max_distance".to_string());
        }
        if self.globe.radius <= 0.0 {
            return invalid(format!("globe radius {} must be positive", self.globe.radius));
        }
        if self.stars.min_radius < 0.0 || self.stars.min_radius > self.stars.max_radius {
            return invalid(format!(
                "star radii must satisfy 0 <= min <= max, got {}..{}",
                self.stars.min_radius, self.stars.max_radius
            ));
        }
        if self.loading.fade_seconds < 0.0 {
            return invalid("fade_seconds must not be negative".to_string());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        assert!(GlobeConfig::default().validate().is_ok());
    }

    #[test]
    fn texture_paths_join_directory() {
        let textures = TextureConfig::default();
        assert_eq!(
            textures.path_of(&textures.day),
            PathBuf::from("textures").join("8k_earth_daymap.jpg")
        );
    }

    #[test]
    fn one_request_per_slot() {
        let requests = TextureConfig::default().requests();
        assert_eq!(requests.len(), 4);
        assert_eq!(requests[1].slot, TextureSlot::Bump);
        assert_eq!(requests[1].path, PathBuf::from("textures").join("01_earthbump1k.jpg"));
    }

    #[test]
    fn rejects_inverted_camera_planes() {
        let mut config = GlobeConfig::default();
        config.camera.near = 10.0;
        config.camera.far = 1.0;
        assert!(matches!(config.validate(), Err(GlobeError::InvalidConfig(_))));
    }
}

use glam::Vec3;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

use crate::math::Color;

/// Parameters for the background point cloud
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StarFieldConfig {
    pub count: usize,
    pub min_radius: f32,
    pub max_radius: f32,
    pub hue: f32,
    pub saturation: f32,
    /// Point size in world units
    pub size: f32,
    /// Fixed seed for a reproducible sky; random when absent
    pub seed: Option<u64>,
}

impl Default for StarFieldConfig {
    fn default() -> Self {
        Self {
            count: 2000,
            min_radius: 25.0,
            max_radius: 50.0,
            hue: 0.6,
            saturation: 0.2,
            size: 0.2,
            seed: None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Star {
    pub position: Vec3,
    pub color: Color,
}

#[derive(Debug, Clone)]
pub struct StarField {
    pub stars: Vec<Star>,
    pub size: f32,
    pub seed: u64,
}

impl StarField {
    pub fn len(&self) -> usize {
        self.stars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stars.is_empty()
    }

    pub fn positions(&self) -> impl Iterator<Item = Vec3> + '_ {
        self.stars.iter().map(|s| s.position)
    }
}

/// Build `config.count` stars in the spherical shell `[min_radius, max_radius]`
pub fn generate_star_field(config: &StarFieldConfig) -> StarField {
    let seed = config.seed.unwrap_or_else(|| rand::rng().random());
    let mut rng = ChaCha8Rng::seed_from_u64(seed);

    let stars = (0..config.count)
        .map(|_| {
            let radius = sample_radius(&mut rng, config.min_radius, config.max_radius);
            let position = random_unit_vector(&mut rng) * radius;
            let lightness = rng.random::<f32>();
            Star {
                position,
                color: Color::from_hsl(config.hue, config.saturation, lightness),
            }
        })
        .collect::<Vec<_>>();

    log::debug!("generated {} stars (seed {})", stars.len(), seed);

    StarField {
        stars,
        size: config.size,
        seed,
    }
}

fn sample_radius(rng: &mut impl Rng, min: f32, max: f32) -> f32 {
    if max > min {
        rng.random_range(min..=max)
    } else {
        min
    }
}

/// Uniform direction: z uniform in [-1, 1], azimuth uniform in [0, 2π)
fn random_unit_vector(rng: &mut impl Rng) -> Vec3 {
    let z: f32 = rng.random_range(-1.0..=1.0);
    let azimuth: f32 = rng.random_range(0.0..std::f32::consts::TAU);
    let ring = (1.0 - z * z).max(0.0).sqrt();
    Vec3::new(ring * azimuth.cos(), ring * azimuth.sin(), z)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unit_vectors_have_unit_length() {
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        for _ in 0..1000 {
            let v = random_unit_vector(&mut rng);
            assert!((v.length() - 1.0).abs() < 1e-5);
        }
    }

    #[test]
    fn degenerate_shell_uses_min_radius() {
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        assert_eq!(sample_radius(&mut rng, 30.0, 30.0), 30.0);
    }

    #[test]
    fn seed_is_recorded() {
        let field = generate_star_field(&StarFieldConfig {
            count: 3,
            seed: Some(99),
            ..Default::default()
        });
        assert_eq!(field.seed, 99);
        assert_eq!(field.len(), 3);
    }
}

//! Procedural geometry: the shared globe sphere and the starfield point cloud.

mod icosphere;
mod starfield;

pub use icosphere::{azimuth, equirect_uv, inclination, SphereGeometry, SphereVertex};
pub use starfield::{generate_star_field, Star, StarField, StarFieldConfig};

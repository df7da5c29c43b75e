pub mod app;
pub mod camera;
pub mod cli;
pub mod config;
pub mod core;
pub mod error;
pub mod geometry;
pub mod material;
pub mod math;
pub mod overlay;
pub mod renderer;
pub mod scene;
pub mod types;

pub use config::GlobeConfig;
pub use error::{GlobeError, Result};

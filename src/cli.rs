// cli.rs - Command-line interface configuration
use std::path::PathBuf;

use clap::Parser;

use crate::config::GlobeConfig;
use crate::core::RunLimit;
use crate::error::Result;

#[derive(Parser, Debug, Clone, Default)]
#[command(name = "globe-viewer")]
#[command(about = "Rotating Earth globe with clouds, night lights and atmosphere", long_about = None)]
pub struct Cli {
    /// Hide the globe behind a loading screen until every texture resolves
    #[arg(long = "loading-screen", default_value = "false")]
    pub loading_screen: bool,

    /// Disable UI elements (FPS label)
    #[arg(long = "no-ui", default_value = "false")]
    pub no_ui: bool,

    /// JSON config file; fields not present keep their defaults
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Directory holding the texture images
    #[arg(long)]
    pub textures: Option<PathBuf>,

    /// Number of background stars
    #[arg(long)]
    pub stars: Option<usize>,

    /// Seed for the star field
    #[arg(long)]
    pub seed: Option<u64>,

    /// Exit after rendering this many frames
    #[arg(long)]
    pub frames: Option<u64>,
}

impl Cli {
    /// Config file (or defaults) with the command-line overrides applied
    pub fn load_config(&self) -> Result<GlobeConfig> {
        let mut config = match &self.config {
            Some(path) => GlobeConfig::load(path)?,
            None => GlobeConfig::default(),
        };
        self.apply(&mut config);
        config.validate()?;
        Ok(config)
    }

    pub fn apply(&self, config: &mut GlobeConfig) {
        if self.loading_screen {
            config.loading.enabled = true;
        }
        if let Some(dir) = &self.textures {
            config.textures.directory = dir.clone();
        }
        if let Some(count) = self.stars {
            config.stars.count = count;
        }
        if let Some(seed) = self.seed {
            config.stars.seed = Some(seed);
        }
    }

    pub fn run_limit(&self) -> RunLimit {
        self.frames.map_or_else(RunLimit::unlimited, RunLimit::frames)
    }
}

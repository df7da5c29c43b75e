use anyhow::Context;
use clap::Parser;
use winit::event_loop::EventLoop;

use globe_viewer::app::App;
use globe_viewer::cli::Cli;

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    let config = cli.load_config().context("failed to load configuration")?;

    log::info!(
        "globe viewer: textures from {}, loading screen {}",
        config.textures.directory.display(),
        if config.loading.enabled { "on" } else { "off" }
    );

    let event_loop = EventLoop::new().context("failed to create event loop")?;
    let mut app = App::new(config, !cli.no_ui, cli.run_limit());

    log::info!("controls: drag to orbit, wheel to zoom, Escape to quit");
    event_loop.run_app(&mut app).context("event loop failed")?;

    if let Some(e) = app.take_error() {
        return Err(e).context("renderer start-up failed");
    }

    log::info!("rendered {} frames", app.frames_rendered());
    Ok(())
}

//! `lumen`: render a built-in scene to an image file.

mod scenes;
mod settings;

use anyhow::{Context, Result};
use clap::Parser;
use env_logger::Env;

use settings::{Cli, Settings};

fn main() -> Result<()> {
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    let settings = Settings::resolve(&cli)?;
    log::debug!("Settings: {:?}", settings);

    let scene = scenes::build(settings.scene)?;
    let camera = scene
        .camera
        .with_resolution(settings.width, settings.height)
        .with_quality(settings.samples, settings.depth);
    let config = settings.render_config();

    let Some(image) = lumen_renderer::render(&camera, &scene.world, &config)? else {
        log::warn!("No image produced");
        return Ok(());
    };

    image
        .save(&settings.output)
        .with_context(|| format!("Failed to write {}", settings.output.display()))?;

    Ok(())
}

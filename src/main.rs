use clap::Parser;
use log::{error, info};

mod cli;
mod logger;

use cli::Args;
use logger::init_logger;
use voxtrace::config::SceneConfig;
use voxtrace::output;

/// Load the scene, render it and write the image.
///
/// Any loading failure aborts before the first pixel is traced.
fn run(args: &Args) -> voxtrace::Result<()> {
    let config = SceneConfig::load(&args.config)?;
    let width = args.width.unwrap_or(config.image.width);
    let height = args.height.unwrap_or(config.image.height);
    info!("Image resolution: {}x{}", width, height);

    let scene = config.build_scene()?;
    let camera = config.camera();
    let image = camera.render(&scene, width, height, config.image.background);

    let output_path = args.output.as_ref().unwrap_or(&config.image.output);
    output::store(&image, output_path)
}

fn main() {
    let args = Args::parse();

    init_logger(args.debug_level.clone().into());

    // Log application startup with version information
    info!("voxtrace - Git Version {} ({})", env!("GIT_HASH"), env!("GIT_DATE"));

    if let Err(e) = run(&args) {
        error!("{}", e);
        std::process::exit(1);
    }
}

use anyhow::{Context, Result};
use clap::Parser;
use log::info;
use sdfscene::config::Settings;
use sdfscene::render::{save_png, Renderer};
use std::time::Instant;

#[derive(Parser, Debug)]
#[command(author, version, about = "Render one frame of the bouncing-sphere scene", long_about = None)]
struct Args {
    #[arg(short = 'W', long, default_value_t = 512)]
    width: u32,

    #[arg(short = 'H', long, default_value_t = 512)]
    height: u32,

    /// Elapsed time of the frame, in animation time units
    #[arg(short, long, default_value_t = 0.)]
    time: f64,

    /// Sub-samples per pixel along each axis; overrides the settings file
    #[arg(short, long)]
    antialias: Option<u32>,

    #[arg(short, long, default_value = "out.png")]
    out: String,

    /// JSON settings file
    #[arg(short, long)]
    config: Option<String>,

    #[arg(long, default_value_t = false)]
    aspect_correct: bool,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();

    let mut settings = match &args.config {
        Some(path) => Settings::from_json_file(path)
            .with_context(|| format!("failed to load settings from {}", path))?,
        None => Settings::default(),
    };
    if let Some(n) = args.antialias {
        settings.camera.antialias = n;
    }
    settings.camera.aspect_correct |= args.aspect_correct;
    settings.validate()?;

    let start = Instant::now();
    let renderer = Renderer::new(settings);
    let pixels = renderer.render_frame(args.width, args.height, args.time)?;
    info!("render took {} s", start.elapsed().as_secs_f32());
    save_png(&pixels, args.width, args.height, &args.out)
        .with_context(|| format!("failed to write {}", args.out))?;
    Ok(())
}

use anyhow::{ensure, Context, Result};
use clap::Parser;
use log::info;
use sdfscene::config::Settings;
use sdfscene::render::{save_png, Renderer};
use std::fs;
use std::path::PathBuf;
use std::time::Instant;

#[derive(Parser, Debug)]
#[command(author, version, about = "Render the animation as numbered PNG frames", long_about = None)]
struct Args {
    #[arg(short = 'W', long, default_value_t = 256)]
    width: u32,

    #[arg(short = 'H', long, default_value_t = 256)]
    height: u32,

    #[arg(short, long, default_value_t = 0.)]
    start: f64,

    /// Exclusive end time; one full cycle by default
    #[arg(short, long, default_value_t = 10.)]
    end: f64,

    #[arg(short, long, default_value_t = 60)]
    frames: u32,

    #[arg(short, long, default_value = "frames")]
    out_dir: PathBuf,

    #[arg(short, long)]
    config: Option<PathBuf>,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();
    ensure!(args.frames > 0, "need at least one frame");
    ensure!(args.end > args.start, "end time must be after start time");

    let settings = match &args.config {
        Some(path) => Settings::from_json_file(path)
            .with_context(|| format!("failed to load settings from {}", path.display()))?,
        None => Settings::default(),
    };
    fs::create_dir_all(&args.out_dir)
        .with_context(|| format!("failed to create {}", args.out_dir.display()))?;

    let renderer = Renderer::new(settings);
    let step = (args.end - args.start) / args.frames as f64;
    let start = Instant::now();
    for i in 0..args.frames {
        let time = args.start + i as f64 * step;
        let pixels = renderer.render_frame(args.width, args.height, time)?;
        let path = args.out_dir.join(format!("frame_{:04}.png", i));
        save_png(&pixels, args.width, args.height, &path)
            .with_context(|| format!("failed to write {}", path.display()))?;
    }
    info!(
        "{} frames took {} s",
        args.frames,
        start.elapsed().as_secs_f32()
    );
    Ok(())
}

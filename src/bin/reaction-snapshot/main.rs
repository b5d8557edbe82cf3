// reaction-snapshot - Run a scene headless and save the final frame
//
// Pipeline:
//   1. Load scene JSON (or the built-in NO2/N2O4 scene)
//   2. Run N ticks, logging species counts as it goes
//   3. Encode the final frame and rasterise it to PNG
//
// Usage: cargo run --bin reaction-snapshot -- [scene.json] [--ticks N] [--every N] [--out frame.png]

mod color;
mod raster;

use std::env;
use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use reaction_engine::{Encoder, SceneConfig, Simulation};

struct Args {
    scene: Option<PathBuf>,
    ticks: u32,
    every: u32,
    out: PathBuf,
}

fn parse_args() -> Args {
    let args: Vec<String> = env::args().collect();
    let mut parsed = Args {
        scene: None,
        ticks: 600,
        every: 60,
        out: PathBuf::from("frame.png"),
    };

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--ticks" => { parsed.ticks = args.get(i+1).and_then(|s| s.parse().ok()).unwrap_or(600); i += 2; }
            "--every" => { parsed.every = args.get(i+1).and_then(|s| s.parse().ok()).unwrap_or(60); i += 2; }
            "--out" => { if let Some(p) = args.get(i+1) { parsed.out = PathBuf::from(p); } i += 2; }
            path if !path.starts_with("--") => { parsed.scene = Some(PathBuf::from(path)); i += 1; }
            _ => i += 1,
        }
    }
    parsed
}

fn main() -> Result<()> {
    tracing_subscriber::fmt::init();
    let args = parse_args();

    let scene = match &args.scene {
        Some(path) => {
            let json = fs::read_to_string(path)
                .with_context(|| format!("reading scene {}", path.display()))?;
            SceneConfig::from_json(&json).with_context(|| format!("parsing scene {}", path.display()))?
        }
        None => SceneConfig::default(),
    };
    let (width, height) = (scene.width.ceil() as u32, scene.height.ceil() as u32);
    let mut sim = Simulation::new(scene).context("building simulation")?;

    tracing::info!(ticks = args.ticks, "running");
    let mut fired = 0;
    for t in 1..=args.ticks {
        fired += sim.tick().reactions;
        if args.every > 0 && t % args.every == 0 {
            let counts: Vec<String> = sim
                .counts()
                .into_iter()
                .map(|(s, n)| format!("{}={}", sim.palette().formula(s), n))
                .collect();
            tracing::info!(tick = t, reactions = fired, counts = %counts.join(" "), "progress");
        }
    }

    let mut encoder = Encoder::new();
    encoder.encode_particles(sim.particles());
    let img = raster::draw_frame(&encoder, sim.palette(), width, height);
    img.save(&args.out)
        .with_context(|| format!("writing {}", args.out.display()))?;

    tracing::info!(path = %args.out.display(), particles = encoder.count(), "frame saved");
    Ok(())
}

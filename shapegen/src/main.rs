use std::{fs::File, io::BufReader, path::PathBuf};

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use shapes::{config::GenerationConfig, rng::UniformSource, sample::Sampler};
use tracing::info;

use shapegen::{io::DirArchive, pipeline::BatchPipeline, render::Rasterizer};

#[derive(Parser, Debug)]
#[command(name = "shapegen", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Generate a full dataset (metadata.csv + images/).
    Generate(GenerateArgs),
    /// Render one sampled shape to a PNG for a quick look.
    Preview(PreviewArgs),
}

#[derive(Parser, Debug)]
struct GenerateArgs {
    /// Generation config JSON; defaults are used for absent fields.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Number of images to generate.
    #[arg(long)]
    samples: Option<u32>,

    /// Image side length in pixels.
    #[arg(long = "size")]
    image_size: Option<u32>,

    /// RNG seed; omit for a non-reproducible run.
    #[arg(long)]
    seed: Option<u32>,

    /// Output dataset directory.
    #[arg(long, default_value = "dataset")]
    out: PathBuf,
}

#[derive(Parser, Debug)]
struct PreviewArgs {
    /// Generation config JSON; defaults are used for absent fields.
    #[arg(long)]
    config: Option<PathBuf>,

    /// RNG seed; omit for a non-reproducible preview.
    #[arg(long)]
    seed: Option<u32>,

    /// Output PNG path.
    #[arg(long, default_value = "preview.png")]
    out: PathBuf,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt().init();
    let cli = Cli::parse();
    match cli.cmd {
        Command::Generate(args) => cmd_generate(args),
        Command::Preview(args) => cmd_preview(args),
    }
}

fn read_config(path: Option<&PathBuf>) -> anyhow::Result<GenerationConfig> {
    let Some(path) = path else {
        return Ok(GenerationConfig::default());
    };
    let f = File::open(path).with_context(|| format!("open config '{}'", path.display()))?;
    let cfg = serde_json::from_reader(BufReader::new(f)).context("parse config JSON")?;
    Ok(cfg)
}

fn cmd_generate(args: GenerateArgs) -> anyhow::Result<()> {
    let mut cfg = read_config(args.config.as_ref())?;
    if let Some(samples) = args.samples {
        cfg.samples = samples;
    }
    if let Some(size) = args.image_size {
        cfg.image_size = size;
    }
    if let Some(seed) = args.seed {
        cfg.seed = Some(seed);
    }

    let pipeline = BatchPipeline::new(&cfg)?;
    let dataset = pipeline.run(|done, total| info!("rendered {done}/{total}"))?;

    let mut sink = DirArchive::new(&args.out);
    dataset.write_to(&mut sink)?;
    info!(
        images = dataset.images.len(),
        out = %args.out.display(),
        "dataset written"
    );
    Ok(())
}

fn cmd_preview(args: PreviewArgs) -> anyhow::Result<()> {
    let mut cfg = read_config(args.config.as_ref())?;
    if let Some(seed) = args.seed {
        cfg.seed = Some(seed);
    }
    cfg.validate()?;

    let mut src = UniformSource::resolve(cfg.seed);
    let record = Sampler::new(&cfg).draw(&mut src);
    let png = Rasterizer::new(cfg.canvas()).encode_png(&record)?;
    std::fs::write(&args.out, png)
        .with_context(|| format!("write preview '{}'", args.out.display()))?;
    info!(out = %args.out.display(), "preview written");
    Ok(())
}

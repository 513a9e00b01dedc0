use std::{
    path::{Path, PathBuf},
    sync::Arc,
};

use anyhow::Context as _;
use clap::{Args, Parser, Subcommand};
use rand::{SeedableRng as _, rngs::StdRng};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "strokesynth", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Generate a COCO-style train/val dataset of composites.
    Generate(GenerateArgs),
    /// Render a single composite as a PNG.
    Sample(SampleArgs),
}

#[derive(Args, Debug)]
struct CommonArgs {
    /// Directory of per-character stroke SVGs (`<hex codepoint>.svg`). Built-in strokes only
    /// when omitted.
    #[arg(long)]
    glyphs: Option<PathBuf>,

    /// Generator config JSON. Flags below override its fields.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Output image size in pixels.
    #[arg(long)]
    size_px: Option<u32>,

    /// Probability of seeding a composite with boxy mode.
    #[arg(long)]
    boxy_probability: Option<f64>,

    /// Base random seed.
    #[arg(long, default_value_t = 0)]
    seed: u64,
}

#[derive(Parser, Debug)]
struct GenerateArgs {
    #[command(flatten)]
    common: CommonArgs,

    /// Output directory (receives `images/`, `train.json`, `val.json`).
    #[arg(long)]
    out: PathBuf,

    /// Number of training composites.
    #[arg(long, default_value_t = 50)]
    count: usize,

    /// Validation split size as a fraction of `--count`.
    #[arg(long, default_value_t = 0.05)]
    val_portion: f64,

    /// Worker threads (defaults to all cores).
    #[arg(long)]
    threads: Option<usize>,

    /// Also write 3-class label masks under `labels/`.
    #[arg(long)]
    labels: bool,
}

#[derive(Parser, Debug)]
struct SampleArgs {
    #[command(flatten)]
    common: CommonArgs,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,

    /// Optional label mask PNG path.
    #[arg(long)]
    label: Option<PathBuf>,

    /// Exact stroke count; drawn from the configured range when omitted.
    #[arg(long)]
    strokes: Option<usize>,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.cmd {
        Command::Generate(args) => cmd_generate(args),
        Command::Sample(args) => cmd_sample(args),
    }
}

fn make_generator(common: &CommonArgs) -> anyhow::Result<strokesynth::CompositeGenerator> {
    let mut cfg = match &common.config {
        Some(path) => strokesynth::SynthConfig::load(path)?,
        None => strokesynth::SynthConfig::default(),
    };
    if let Some(size_px) = common.size_px {
        cfg.size_px = size_px;
    }
    if let Some(p) = common.boxy_probability {
        cfg.boxy_probability = p;
    }

    let library = match &common.glyphs {
        Some(dir) => strokesynth::StrokeLibrary::load(dir)?,
        None => strokesynth::StrokeLibrary::builtin()?,
    };
    Ok(strokesynth::CompositeGenerator::new(
        Arc::new(library),
        cfg,
    )?)
}

fn create_dir(path: &Path) -> anyhow::Result<()> {
    std::fs::create_dir_all(path)
        .with_context(|| format!("create output dir '{}'", path.display()))
}

fn write_png(path: &Path, img: &image::GrayImage) -> anyhow::Result<()> {
    if let Some(parent) = path.parent() {
        create_dir(parent)?;
    }
    img.save_with_format(path, image::ImageFormat::Png)
        .with_context(|| format!("write png '{}'", path.display()))
}

/// Black ink on white paper.
fn paper_image(sample: &strokesynth::CompositeSample) -> image::GrayImage {
    let mut img = sample.image.ink.clone();
    image::imageops::invert(&mut img);
    img
}

fn cmd_generate(args: GenerateArgs) -> anyhow::Result<()> {
    if !args.val_portion.is_finite() || args.val_portion < 0.0 {
        anyhow::bail!("--val-portion must be finite and >= 0");
    }
    let generator = make_generator(&args.common)?;
    let val_count = (args.val_portion * args.count as f64) as usize;

    let opts = strokesynth::BatchOpts {
        threads: args.threads,
        seed: args.common.seed,
    };
    let samples = strokesynth::generate_batch(&generator, args.count + val_count, &opts)?;

    create_dir(&args.out.join("images"))?;
    let mut builder = strokesynth::CocoBuilder::new();
    let mut splits = Vec::new();
    for (stage, chunk) in [
        ("train", &samples[..args.count]),
        ("val", &samples[args.count..]),
    ] {
        builder = strokesynth::CocoBuilder::continuing(&builder);
        for sample in chunk {
            let file_name = builder.push_sample(sample);
            write_png(&args.out.join(&file_name), &paper_image(sample))?;
            if args.labels {
                let label_path = args
                    .out
                    .join("labels")
                    .join(Path::new(&file_name).file_name().unwrap_or_default());
                write_png(&label_path, &sample.label.to_gray_image())?;
            }
        }

        let json = builder.dataset().to_json()?;
        let json_path = args.out.join(format!("{stage}.json"));
        std::fs::write(&json_path, json)
            .with_context(|| format!("write '{}'", json_path.display()))?;
        splits.push((stage, chunk.len()));
    }

    for (stage, n) in splits {
        eprintln!("{stage}: {n} images");
    }
    eprintln!("wrote {}", args.out.display());
    Ok(())
}

fn cmd_sample(args: SampleArgs) -> anyhow::Result<()> {
    let generator = make_generator(&args.common)?;
    let mut rng = StdRng::seed_from_u64(args.common.seed);
    let sample = match args.strokes {
        Some(n) => generator.assemble(n, &mut rng)?,
        None => generator.generate(&mut rng)?,
    };

    write_png(&args.out, &paper_image(&sample))?;
    eprintln!("wrote {}", args.out.display());
    if let Some(label) = &args.label {
        write_png(label, &sample.label.to_gray_image())?;
        eprintln!("wrote {}", label.display());
    }

    let [background, single, overlap] = sample.label.class_counts();
    eprintln!(
        "strokes={} boxy={} attempts={} pixels: background={background} single={single} overlap={overlap}",
        sample.strokes.len(),
        sample.boxy,
        sample.attempts,
    );
    Ok(())
}

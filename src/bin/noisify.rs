//! Batch degradation driver.
//!
//! Walks a directory tree of face crops, applies a configurable set of
//! noise operations to every image, and mirrors the input layout under the
//! output root with one subdirectory per noise kind:
//!
//! `<output>/<relative dir>/<noise>/<stem>_<noise>.png`
//!
//! Usage:
//! ```text
//! noisify --input crops/ --output crops-noisy/ --seed 7
//! noisify --input crops/ --output crops-noisy/ --family environment
//! noisify --input ir-crops/ --output ir-noisy/ --ir -n pepper -n dark_noise
//! noisify --input crops/ --output crops-noisy/ --per-image 1
//! noisify --mode clean --output crops-noisy/
//! ```
//!
//! Run with `RUST_LOG=info` for per-run statistics and per-file failure
//! reports.

use std::collections::hash_map::DefaultHasher;
use std::fs;
use std::hash::{Hash, Hasher};
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::{Parser, ValueEnum};
use indicatif::{ProgressBar, ProgressStyle};
use log::{info, warn};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rayon::prelude::*;

use smudge::{image_proc, NoiseConfig, NoiseFamily, NoiseKind};

/// File extensions treated as input images.
const IMAGE_EXTENSIONS: [&str; 4] = ["png", "jpg", "jpeg", "bmp"];

#[derive(Parser, Debug)]
#[command(
    version,
    about = "Apply synthetic sensor and environment noise to face imagery"
)]
struct Args {
    /// Generate noisy copies, or delete the output of an earlier run
    #[arg(short, long, value_enum, default_value_t = Mode::Noise)]
    mode: Mode,

    /// Directory of clean input images, searched recursively (noise mode)
    #[arg(short, long)]
    input: Option<PathBuf>,

    /// Output root; the input directory layout is mirrored beneath it
    #[arg(short, long)]
    output: PathBuf,

    /// Restrict to one noise family
    #[arg(short, long, value_enum, default_value_t = FamilySelect::All)]
    family: FamilySelect,

    /// Apply only these noise kinds (repeatable); default is every kind in
    /// the selected family
    #[arg(short, long, value_name = "KIND")]
    noise: Vec<NoiseKind>,

    /// JSON array of noise configurations overriding the preset strengths
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Draw N random noises per image instead of applying all of them; a
    /// draw may also land on "none", leaving that image alone
    #[arg(long, value_name = "N")]
    per_image: Option<usize>,

    /// Base random seed; reruns with the same seed reproduce the dataset
    /// exactly, whatever the worker count
    #[arg(long)]
    seed: Option<u64>,

    /// Collapse inputs to infrared (single-channel luma) before degrading
    #[arg(long)]
    ir: bool,

    /// Worker threads; defaults to one per CPU core
    #[arg(short, long)]
    jobs: Option<usize>,

    /// List every noise kind with its family and exit
    #[arg(long)]
    list: bool,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq)]
enum Mode {
    /// Generate degraded copies
    Noise,
    /// Delete per-noise directories left by an earlier run
    Clean,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum FamilySelect {
    All,
    Sensor,
    Environment,
}

impl FamilySelect {
    fn admits(self, family: NoiseFamily) -> bool {
        match self {
            Self::All => true,
            Self::Sensor => family == NoiseFamily::Sensor,
            Self::Environment => family == NoiseFamily::Environment,
        }
    }
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    if args.list {
        for kind in NoiseKind::ALL {
            println!("{:<16} {}", kind.name(), kind.family());
        }
        return Ok(());
    }

    if let Some(jobs) = args.jobs {
        rayon::ThreadPoolBuilder::new()
            .num_threads(jobs)
            .build_global()
            .context("building worker pool")?;
    }

    match args.mode {
        Mode::Noise => run_noise(&args),
        Mode::Clean => run_clean(&args.output),
    }
}

fn run_noise(args: &Args) -> Result<()> {
    let input = args
        .input
        .as_deref()
        .context("--input is required in noise mode")?;

    let plan = build_plan(args)?;
    let inputs = collect_images(input)?;
    if inputs.is_empty() {
        bail!("no images found under {}", input.display());
    }

    let base_seed = args.seed.unwrap_or_else(|| rand::thread_rng().gen());
    info!(
        "degrading {} images with {} noise kinds (base seed {base_seed})",
        inputs.len(),
        plan.len()
    );

    let pb = ProgressBar::new(inputs.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{msg} [{bar:40.cyan/blue}] {pos}/{len} ({per_sec}) ETA: {eta}")
            .unwrap()
            .progress_chars("█▉▊▋▌▍▎▏ "),
    );
    pb.set_message("noisifying");

    let failures: usize = inputs
        .par_iter()
        .map(|path| {
            let outcome = degrade_one(path, input, args, &plan, base_seed);
            if let Err(err) = &outcome {
                warn!("{}: {err:#}", path.display());
            }
            pb.inc(1);
            usize::from(outcome.is_err())
        })
        .sum();

    pb.finish_with_message("done");

    if failures > 0 {
        warn!("{failures} of {} images failed", inputs.len());
    }
    Ok(())
}

/// Degrades one source image, writing one output file per selected noise.
fn degrade_one(
    path: &Path,
    input_root: &Path,
    args: &Args,
    plan: &[NoiseConfig],
    base_seed: u64,
) -> Result<()> {
    let relative = path.strip_prefix(input_root).unwrap_or(path);
    // Seed from the relative path, not the processing order, so the output
    // does not depend on how rayon schedules the batch.
    let mut rng = StdRng::seed_from_u64(base_seed ^ path_hash(relative));

    let decoded = image::open(path).with_context(|| format!("decoding {}", path.display()))?;
    let mut canonical = image_proc::from_rgb(&decoded.to_rgb8());
    if args.ir {
        canonical = image_proc::to_infrared(&canonical)?;
    }

    let stem = path
        .file_stem()
        .and_then(|s| s.to_str())
        .with_context(|| format!("unusable file name {}", path.display()))?;
    let parent = relative.parent().unwrap_or(Path::new(""));

    let selected: Vec<&NoiseConfig> = match args.per_image {
        // "none" sits in the draw pool alongside the real kinds, so some
        // images come through a draw untouched.
        Some(count) => (0..count)
            .filter_map(|_| plan.get(rng.gen_range(0..=plan.len())))
            .collect(),
        None => plan.iter().collect(),
    };

    for config in selected {
        let kind = config.kind().name();
        let dir = args.output.join(parent).join(kind);
        fs::create_dir_all(&dir).with_context(|| format!("creating {}", dir.display()))?;

        let degraded = config.apply(&canonical, &mut rng)?;
        let file = dir.join(format!("{stem}_{kind}.png"));
        image_proc::to_rgb(&degraded)?
            .save(&file)
            .with_context(|| format!("writing {}", file.display()))?;
    }
    Ok(())
}

/// Deletes every directory named after a noise kind under `output`; the
/// inverse of a noise run, leaving any other content in place.
fn run_clean(output: &Path) -> Result<()> {
    if !output.exists() {
        info!("nothing to clean at {}", output.display());
        return Ok(());
    }

    let mut removed = 0usize;
    clean_tree(output, &mut removed).with_context(|| format!("cleaning {}", output.display()))?;
    info!(
        "removed {removed} noise directories under {}",
        output.display()
    );
    Ok(())
}

fn clean_tree(dir: &Path, removed: &mut usize) -> std::io::Result<()> {
    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        if !path.is_dir() {
            continue;
        }
        let is_noise_dir = path
            .file_name()
            .and_then(|name| name.to_str())
            .map_or(false, |name| name.parse::<NoiseKind>().is_ok());
        if is_noise_dir {
            fs::remove_dir_all(&path)?;
            *removed += 1;
        } else {
            clean_tree(&path, removed)?;
        }
    }
    Ok(())
}

/// The operations to run, honoring `--config`, `--noise` and `--family`.
fn build_plan(args: &Args) -> Result<Vec<NoiseConfig>> {
    let mut plan = match &args.config {
        Some(path) => {
            let text = fs::read_to_string(path)
                .with_context(|| format!("reading config {}", path.display()))?;
            serde_json::from_str::<Vec<NoiseConfig>>(&text)
                .with_context(|| format!("parsing config {}", path.display()))?
        }
        None => NoiseKind::ALL
            .iter()
            .map(|&kind| NoiseConfig::preset(kind))
            .collect(),
    };

    if !args.noise.is_empty() {
        plan.retain(|config| args.noise.contains(&config.kind()));
    }
    plan.retain(|config| args.family.admits(config.kind().family()));

    if plan.is_empty() {
        bail!("selection matches no noise kinds");
    }
    Ok(plan)
}

fn collect_images(root: &Path) -> Result<Vec<PathBuf>> {
    let mut found = Vec::new();
    descend(root, &mut found)
        .with_context(|| format!("reading input directory {}", root.display()))?;
    // Stable order keeps run statistics and failure reports comparable.
    found.sort();
    Ok(found)
}

fn descend(dir: &Path, found: &mut Vec<PathBuf>) -> std::io::Result<()> {
    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        if path.is_dir() {
            descend(&path, found)?;
        } else if has_image_extension(&path) {
            found.push(path);
        }
    }
    Ok(())
}

fn has_image_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map_or(false, |ext| {
            IMAGE_EXTENSIONS
                .iter()
                .any(|known| ext.eq_ignore_ascii_case(known))
        })
}

/// Stable hash of a relative path, mixed into the base seed per image.
fn path_hash(path: &Path) -> u64 {
    let mut hasher = DefaultHasher::new();
    path.hash(&mut hasher);
    hasher.finish()
}

//! Command-line region creator: collects generation settings, runs one
//! terrain generator and writes the region and preview rasters.

mod interactive;

use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use relief_raster::RasterError;
use relief_terrain::{FractalParams, Generator, GeneratorKind, MapParams, NoiseParams};
use tracing::info;

/// Seeded random region heightmap creator.
#[derive(Parser, Debug)]
#[command(name = "relief", about = "Seeded random region heightmap creator")]
pub(crate) struct CliArgs {
    /// Map width in map units of 64 cells.
    #[arg(long, default_value_t = 4)]
    pub width: u32,

    /// Map height in map units of 64 cells.
    #[arg(long, default_value_t = 4)]
    pub height: u32,

    /// Base terrain level in [0, 255].
    #[arg(long, default_value_t = 50)]
    pub level: i32,

    /// Number of blur passes over the finished map.
    #[arg(long, default_value_t = 1)]
    pub blur: u32,

    /// Terrain algorithm to run.
    #[arg(long, value_enum, default_value_t = GeneratorArg::Lazy)]
    pub generator: GeneratorArg,

    /// Recursion depth for the fractal grids, octave count for noise.
    #[arg(long, default_value_t = 6)]
    pub detail: u32,

    /// Fractal deviation scale in [0, 1]; larger values jag the terrain.
    #[arg(long, default_value_t = 0.5)]
    pub steepness: f32,

    /// Noise amplitude falloff per octave, in [0, 1].
    #[arg(long, default_value_t = 0.5)]
    pub roughness: f32,

    /// Lowest height of the adjusted noise range.
    #[arg(long, default_value_t = 0)]
    pub bottom: i32,

    /// Highest height of the adjusted noise range.
    #[arg(long, default_value_t = 255)]
    pub peak: i32,

    /// Fraction of the noise map at or below sea level, in [0, 1].
    #[arg(long, default_value_t = 0.2)]
    pub water: f32,

    /// Master seed; omit for a clock-derived one.
    #[arg(long)]
    pub seed: Option<u64>,

    /// Path of the grayscale region raster.
    #[arg(long, default_value = "region.png")]
    pub output: PathBuf,

    /// Path of the colorized preview raster.
    #[arg(long, default_value = "preview.png")]
    pub preview: PathBuf,

    /// Mirror the log to this file.
    #[arg(long)]
    pub log_file: Option<PathBuf>,

    /// Log per-stage details instead of just the run summary.
    #[arg(long)]
    pub full_report: bool,

    /// Ask for settings on stdin instead of taking them from flags.
    #[arg(long)]
    pub interactive: bool,
}

/// Terrain algorithm selector.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub(crate) enum GeneratorArg {
    /// Multi-octave lattice noise with water remapping.
    Noise,
    /// Triangle subdivision with the whole tree built up front.
    Prebuilt,
    /// Triangle subdivision evaluated on the fly per sample.
    Lazy,
    /// Subdivision with Hermite-curved edges.
    Smooth,
}

impl From<GeneratorArg> for GeneratorKind {
    fn from(arg: GeneratorArg) -> Self {
        match arg {
            GeneratorArg::Noise => GeneratorKind::Noise,
            GeneratorArg::Prebuilt => GeneratorKind::Prebuilt,
            GeneratorArg::Lazy => GeneratorKind::Lazy,
            GeneratorArg::Smooth => GeneratorKind::Smooth,
        }
    }
}

fn main() {
    let mut args = CliArgs::parse();
    relief_log::init_logging(args.log_file.as_deref(), args.full_report);

    if args.interactive {
        let stdin = std::io::stdin();
        if let Err(error) = interactive::collect(&mut args, &mut stdin.lock()) {
            eprintln!("failed to read settings: {error}");
            std::process::exit(1);
        }
    }

    if let Err(error) = run(&args) {
        eprintln!("error: {error}");
        std::process::exit(1);
    }
}

fn run(args: &CliArgs) -> Result<(), RasterError> {
    let map = MapParams {
        width: args.width,
        height: args.height,
        level: args.level,
        blur: args.blur,
        seed: args.seed,
    };
    let fractal = FractalParams {
        detail: args.detail,
        steepness: args.steepness,
    };
    let noise = NoiseParams {
        detail: args.detail,
        roughness: args.roughness,
        bottom: args.bottom,
        peak: args.peak,
        water: args.water,
    };

    let mut generator = Generator::new(args.generator.into(), map, fractal, noise);
    let heightmap = generator.synthesize();

    relief_raster::save_heightmap(&heightmap, &args.output)?;
    relief_raster::save_preview(&heightmap, &args.preview)?;
    info!(
        region = %args.output.display(),
        preview = %args.preview.display(),
        "region created"
    );
    Ok(())
}

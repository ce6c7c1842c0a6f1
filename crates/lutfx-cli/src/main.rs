//! lutfx - ICC lookup cube tool
//!
//! Builds GPU lookup cubes and indirect masks from ICC profiles, and
//! renders the two-cube effect offline.

use anyhow::{Context, Result};
use clap::{ArgAction, Args, Parser, Subcommand, ValueEnum};
use lutfx_icc::{EngineConfig, Intent, StandardProfile, configure_color_engine};
use lutfx_lut::DEFAULT_CUBE_SIZE;
use std::path::{Path, PathBuf};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

mod commands;
mod image;

#[derive(Parser)]
#[command(name = "lutfx")]
#[command(author, version, about = "ICC lookup cube tool")]
#[command(long_about = "
Builds 3D color lookup cubes from ICC profiles for GPU color correction,
plus the indirect mask that selects between two cubes per pixel.

Examples:
  lutfx info display.icc                       # Show profile info
  lutfx lut display.icc -o display.rgb         # 16^3 cube, raw RGB bytes
  lutfx lut display.icc -o display.cube -s 33 -f cube
  lutfx mask -W 300 -H 370 -o mask.png         # Zone mask as grayscale PNG
  lutfx profile swap-brg -o FakeBRG.icc        # Write a built-in profile
  lutfx apply image.png -o out.png --lut1 FakeBRG.icc --lut2 FakeRBG.icc
")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Verbose output (-v info, -vv debug, -vvv trace)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    verbose: u8,

    /// Log filter directive, overrides -v and RUST_LOG (e.g. "lutfx_lut=trace")
    #[arg(long, global = true)]
    log_filter: Option<String>,

    /// Write logs to this file instead of stderr
    #[arg(long, global = true)]
    log_file: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Display ICC profile information
    #[command(visible_alias = "i")]
    Info(InfoArgs),

    /// Build a lookup cube from an ICC profile
    Lut(LutArgs),

    /// Build an indirect selection mask
    Mask(MaskArgs),

    /// Render the two-cube effect onto a PNG image
    Apply(ApplyArgs),

    /// Write a built-in profile to an ICC file
    Profile(ProfileArgs),
}

#[derive(Args)]
struct InfoArgs {
    /// ICC profile(s)
    #[arg(required = true)]
    input: Vec<PathBuf>,
}

/// Output encoding for `lutfx lut`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum CubeFormat {
    /// Packed RGB8 bytes, R fastest (texture upload layout)
    Raw,
    /// Adobe/Resolve .cube text
    Cube,
}

#[derive(Args)]
struct LutArgs {
    /// Device ICC profile
    input: PathBuf,

    /// Output file
    #[arg(short, long)]
    output: PathBuf,

    /// Cube side length
    #[arg(short, long, default_value_t = DEFAULT_CUBE_SIZE)]
    size: usize,

    /// Rendering intent: perceptual, relative, saturation, absolute
    #[arg(short, long, default_value = "perceptual")]
    intent: Intent,

    /// Output format
    #[arg(short, long, value_enum, default_value = "raw")]
    format: CubeFormat,
}

#[derive(Args)]
struct ZoneArgs {
    /// Columns left of this are colored by the second cube
    #[arg(long, default_value_t = 120)]
    low: u32,

    /// Columns right of this are colored by the first cube
    #[arg(long, default_value_t = 150)]
    high: u32,
}

#[derive(Args)]
struct MaskArgs {
    /// Mask width
    #[arg(short = 'W', long)]
    width: u32,

    /// Mask height
    #[arg(short = 'H', long)]
    height: u32,

    /// Output PNG (grayscale)
    #[arg(short, long)]
    output: PathBuf,

    #[command(flatten)]
    zones: ZoneArgs,
}

#[derive(Args)]
struct ApplyArgs {
    /// Input PNG image
    input: PathBuf,

    /// Output PNG image
    #[arg(short, long)]
    output: PathBuf,

    /// Profile for the right-hand zone
    #[arg(long)]
    lut1: PathBuf,

    /// Profile for the left-hand zone
    #[arg(long)]
    lut2: PathBuf,

    /// Cube side length
    #[arg(short, long, default_value_t = DEFAULT_CUBE_SIZE)]
    size: usize,

    /// Rendering intent
    #[arg(short, long, default_value = "perceptual")]
    intent: Intent,

    #[command(flatten)]
    zones: ZoneArgs,
}

#[derive(Args)]
struct ProfileArgs {
    /// Profile name: srgb, linear-srgb, adobe-rgb, display-p3, rec2020, swap-brg, swap-rbg
    name: StandardProfile,

    /// Output ICC file
    #[arg(short, long)]
    output: PathBuf,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let _guard = init_logging(cli.verbose, cli.log_filter.as_deref(), cli.log_file.as_deref())?;

    configure_color_engine(EngineConfig::default()).context("Failed to configure color engine")?;

    match cli.command {
        Commands::Info(args) => commands::info::run(args, cli.verbose),
        Commands::Lut(args) => commands::lut::run(args, cli.verbose),
        Commands::Mask(args) => commands::mask::run(args, cli.verbose),
        Commands::Apply(args) => commands::apply::run(args, cli.verbose),
        Commands::Profile(args) => commands::profile::run(args, cli.verbose),
    }
}

/// Installs the tracing subscriber. The returned guard flushes file logs on drop.
fn init_logging(
    verbose: u8,
    filter: Option<&str>,
    file: Option<&Path>,
) -> Result<Option<WorkerGuard>> {
    let default = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = match filter {
        Some(directive) => EnvFilter::try_new(directive).context("Invalid --log-filter")?,
        None => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default)),
    };

    let builder = tracing_subscriber::fmt().with_env_filter(filter).with_target(false);

    match file {
        Some(path) => {
            let dir = path.parent().filter(|p| !p.as_os_str().is_empty()).unwrap_or(Path::new("."));
            let name = path.file_name().context("--log-file must name a file")?;
            let appender = tracing_appender::rolling::never(dir, name);
            let (writer, guard) = tracing_appender::non_blocking(appender);
            builder.with_writer(writer).with_ansi(false).init();
            Ok(Some(guard))
        }
        None => {
            builder.with_writer(std::io::stderr).init();
            Ok(None)
        }
    }
}

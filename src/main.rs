//! Mask bad sensors and pixels in a multi-sensor exposure stack

use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use mosaic_mask_rs::focal_plane::{MaskConfig, MaskPipeline, StackCompression};
use mosaic_mask_rs::logger;

use tracing::info;

#[derive(Parser, Debug)]
#[command(author, version, about = "Blank bad sensors and regions in a sensor stack")]
struct Args {
    /// Instrument key (decam, 5odi, podi)
    #[arg(long)]
    instrument: String,

    /// Comma separated sensor codes to blank, `*` matches any digit
    #[arg(long, default_value = "")]
    mask_code: String,

    /// Input multi-page TIFF, one page per sensor in layout order
    #[arg(long)]
    input: PathBuf,

    /// Output multi-page TIFF
    #[arg(long)]
    output: PathBuf,

    /// Defect flag stack; pixels > 0 are blanked
    #[arg(long)]
    defects: Option<PathBuf>,

    /// Root directory of the per-instrument static region files
    #[arg(long)]
    region_root: Option<PathBuf>,

    /// Directory of per-chip region files applied on top of the static ones
    #[arg(long)]
    region_dir: Option<PathBuf>,

    /// Binning factor of the input pixels
    #[arg(long, default_value_t = 1.0)]
    binning: f64,

    /// Output compression (none, lzw, deflate)
    #[arg(long, default_value = "none")]
    compression: StackCompression,

    /// Log at debug level unless RUST_LOG is set
    #[arg(short, long, default_value_t = false)]
    verbose: bool,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    logger::init_with_default(if args.verbose { "debug" } else { "info" });

    let config = MaskConfig::builder()
        .mask_code(args.mask_code)
        .binning(args.binning)
        .static_region_root(args.region_root)
        .override_region_dir(args.region_dir)
        .compression(args.compression)
        .build();
    let pipeline = MaskPipeline::new(config);

    info!("Instrument: {}", args.instrument);
    info!("Compression: {:?}", pipeline.config().compression);

    let stats = pipeline
        .mask_file(
            &args.instrument,
            &args.input,
            args.defects.as_deref(),
            &args.output,
        )
        .with_context(|| format!("masking {} failed", args.input.display()))?;

    info!(
        sensors_blanked = stats.sensors_blanked,
        regions_applied = stats.regions_applied,
        defect_pixels = stats.defect_pixels,
        "Wrote {}",
        args.output.display()
    );

    Ok(())
}

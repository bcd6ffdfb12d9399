//! `h5cog`: convert one band of an HDF5 container into a Cloud-Optimized
//! GeoTIFF from the command line.

mod prompt;

use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::Parser;
use cog_pipeline::{JobWorkspace, Pipeline, PipelineConfig};
use geotiff_writer::{read_raster_info, Geotransform};
use hdf5_reader::{describe_bands, BandPrompt};
use tracing::debug;
use tracing_subscriber::{fmt, EnvFilter};

#[derive(Parser, Debug)]
#[command(name = "h5cog")]
#[command(about = "Convert an HDF5 band to a Cloud-Optimized GeoTIFF")]
struct Args {
    /// HDF5 container to read
    file_path: PathBuf,

    /// Band to convert; prompted for when omitted
    band_name: Option<String>,

    /// List the bands of the container and exit
    #[arg(long)]
    list: bool,

    /// Read the primary output back and print its layout
    #[arg(long)]
    verify: bool,

    /// Root directory for per-job scratch workspaces
    #[arg(long, default_value = "temp", env = "COG_SCRATCH_DIR")]
    scratch_dir: PathBuf,

    /// COG encoder executable
    #[arg(long, default_value = "gdal_translate", env = "COG_ENCODER")]
    encoder: PathBuf,

    /// COG compression (DEFLATE, LZW, ZSTD, NONE)
    #[arg(long, env = "COG_COMPRESS")]
    compress: Option<String>,

    /// COG block size in pixels (multiple of 16)
    #[arg(long, env = "COG_BLOCKSIZE")]
    blocksize: Option<usize>,

    /// Geotransform as six comma-separated numbers
    #[arg(long, default_value_t = Geotransform::PLACEHOLDER, env = "COG_GEOTRANSFORM")]
    geotransform: Geotransform,

    /// Log level
    #[arg(long, default_value = "warn", env = "RUST_LOG")]
    log_level: String,
}

fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    let args = Args::parse();

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&args.log_level));
    fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    if args.list {
        return list(&args);
    }

    let config = PipelineConfig {
        scratch_dir: args.scratch_dir.clone(),
        encoder_program: args.encoder.clone(),
        compression: args.compress.clone(),
        block_size: args.blocksize,
        geotransform: args.geotransform,
    };
    let pipeline = Pipeline::from_config(&config).context("Invalid encoder configuration")?;
    let workspace = JobWorkspace::create(&config.scratch_dir)
        .with_context(|| format!("Failed to prepare {}", config.scratch_dir.display()))?;
    debug!(job = %workspace.id(), "Workspace created");

    let prompt = prompt::stdin_prompt();
    let output = pipeline.process(
        &args.file_path,
        args.band_name.as_deref(),
        Some(&prompt as &dyn BandPrompt),
        &workspace,
    )?;

    println!("COG output file: {}", output.primary.display());
    for slice in &output.slices {
        println!("Slice COG file: {}", slice.display());
    }

    if args.verify {
        let info = read_raster_info(&output.primary)
            .with_context(|| format!("Failed to read back {}", output.primary.display()))?;
        let expected = output.element_type.gdal_name();
        if info.band_type != expected {
            bail!(
                "{} has band type {}, expected {}",
                output.primary.display(),
                info.band_type,
                expected
            );
        }
        println!(
            "Verified: {}x{} pixels, {} band(s), {}",
            info.width, info.height, info.band_count, info.band_type
        );
    }

    Ok(())
}

fn list(args: &Args) -> Result<()> {
    for band in describe_bands(&args.file_path)? {
        println!("{}\t{:?}\t{}", band.name, band.shape, band.dtype);
    }
    Ok(())
}

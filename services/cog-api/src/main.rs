//! COG conversion service
//!
//! Accepts HDF5 uploads over HTTP and returns the selected band as a
//! Cloud-Optimized GeoTIFF.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use cog_pipeline::{Pipeline, PipelineConfig};
use geotiff_writer::Geotransform;
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

use cog_api::metrics::install_recorder;
use cog_api::{build_router, AppState};

/// COG conversion service
#[derive(Parser, Debug)]
#[command(name = "cog-api")]
#[command(about = "Upload an HDF5 container and download one band as a Cloud-Optimized GeoTIFF")]
struct Args {
    /// Listen address
    #[arg(short, long, default_value = "0.0.0.0:8000", env = "COG_LISTEN_ADDR")]
    listen: SocketAddr,

    /// Root directory for per-job scratch workspaces
    #[arg(long, default_value = "temp", env = "COG_SCRATCH_DIR")]
    scratch_dir: PathBuf,

    /// Directory holding the single-page client served at /
    #[arg(long, default_value = "services/cog-api/static", env = "STATIC_DIR")]
    static_dir: PathBuf,

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

    /// Maximum upload size in MiB
    #[arg(long, default_value_t = 1024, env = "COG_MAX_UPLOAD_MB")]
    max_upload_mb: usize,

    /// Log level
    #[arg(long, default_value = "info", env = "RUST_LOG")]
    log_level: String,

    /// Number of worker threads
    #[arg(long, env = "COG_WORKER_THREADS")]
    worker_threads: Option<usize>,
}

impl Args {
    fn pipeline_config(&self) -> PipelineConfig {
        PipelineConfig {
            scratch_dir: self.scratch_dir.clone(),
            encoder_program: self.encoder.clone(),
            compression: self.compress.clone(),
            block_size: self.blocksize,
            geotransform: self.geotransform,
        }
    }
}

fn main() -> Result<()> {
    // Load .env file if present
    dotenvy::dotenv().ok();

    let args = Args::parse();

    let mut runtime_builder = tokio::runtime::Builder::new_multi_thread();
    runtime_builder.enable_all();
    if let Some(threads) = args.worker_threads {
        runtime_builder.worker_threads(threads);
    }
    let runtime = runtime_builder
        .build()
        .context("Failed to create Tokio runtime")?;

    runtime.block_on(run_server(args))
}

async fn run_server(args: Args) -> Result<()> {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&args.log_level));

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_level(true)
        .json()
        .init();

    let config = args.pipeline_config();
    let pipeline = Pipeline::from_config(&config).context("Invalid encoder configuration")?;

    if !config.scratch_dir.exists() {
        std::fs::create_dir_all(&config.scratch_dir).with_context(|| {
            format!("Failed to create scratch dir {}", config.scratch_dir.display())
        })?;
        info!(path = %config.scratch_dir.display(), "Scratch directory created");
    }

    let prometheus = install_recorder().context("Failed to install Prometheus recorder")?;
    info!("Prometheus metrics exporter initialized");

    let state = AppState::new(pipeline, config.scratch_dir.clone(), args.static_dir.clone())
        .with_max_upload_bytes(args.max_upload_mb.saturating_mul(1024 * 1024))
        .with_prometheus(prometheus);
    let app = build_router(Arc::new(state));

    info!(
        listen = %args.listen,
        scratch_dir = %config.scratch_dir.display(),
        encoder = %config.encoder_program.display(),
        geotransform = %config.geotransform,
        "Starting COG conversion server"
    );

    let listener = tokio::net::TcpListener::bind(args.listen).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

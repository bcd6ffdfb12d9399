//! COG conversion service library.
//!
//! HTTP surface over [`cog_pipeline`]: upload an HDF5 container with a band
//! name and get the band back as a Cloud-Optimized GeoTIFF.

pub mod error;
pub mod handlers;
pub mod metrics;
pub mod router;
pub mod state;
pub mod tracker;

pub use error::ApiError;
pub use router::build_router;
pub use state::AppState;

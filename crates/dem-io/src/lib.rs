//! dem-io: raster loading and graph persistence.

pub mod graphml;
pub mod hash;
pub mod raster;
pub mod store;
pub mod types;

pub use hash::graph_fingerprint;
pub use raster::RasterFormat;
pub use store::GraphStore;
pub use types::*;

pub type IoResult<T> = Result<T, IoError>;

#[derive(thiserror::Error, Debug)]
pub enum IoError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Graph error: {0}")]
    Graph(#[from] dem_core::DemError),

    #[error("Invalid raster: {message}")]
    InvalidRaster { message: String },

    #[error("Unsupported format version: {version}")]
    UnsupportedVersion { version: u32 },

    #[error("Not found: {name}")]
    NotFound { name: String },
}

//! dem-core: stable foundation for demgraph.
//!
//! Contains:
//! - ids (compact node/edge identifiers)
//! - numeric (Real/Elevation + tolerances + float helpers)
//! - raster (the elevation array source contract)
//! - error (shared error types)
//! - timing (opt-in stage timers)

pub mod error;
pub mod ids;
pub mod numeric;
pub mod raster;
pub mod timing;

// Re-exports: nice ergonomics for downstream crates
pub use error::{DemError, DemResult};
pub use ids::*;
pub use numeric::*;
pub use raster::{ElevationArray, ElevationSource};

//! Elevation raster loaders.
//!
//! Thin wrappers that turn files into an [`ElevationArray`]. Samples are
//! taken as-is; the SRTM void value `-32768` is kept as an elevation.

use std::fs;
use std::path::Path;

use dem_core::ElevationArray;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::{IoError, IoResult};

/// SRTM void marker.
pub const SRTM_NO_DATA: i16 = -32768;

/// Side lengths of SRTM tiles (1 and 3 arc-second).
const SRTM_SIDES: [usize; 2] = [3601, 1201];

/// Supported on-disk raster layouts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum RasterFormat {
    /// SRTM `.hgt`: square grid of big-endian `i16`.
    Hgt,
    /// Headerless little-endian `i16` of known shape.
    RawI16 { rows: usize, cols: usize },
    /// JSON array of row arrays.
    Json,
}

/// Load a raster file in the given format.
pub fn load(path: &Path, format: RasterFormat) -> IoResult<ElevationArray> {
    info!(path = %path.display(), ?format, "loading raster");
    let array = match format {
        RasterFormat::Hgt => parse_hgt(&fs::read(path)?)?,
        RasterFormat::RawI16 { rows, cols } => parse_raw_i16_le(&fs::read(path)?, rows, cols)?,
        RasterFormat::Json => parse_json(&fs::read_to_string(path)?)?,
    };

    let voids = array.count_value(f64::from(SRTM_NO_DATA));
    if voids > 0 {
        warn!(voids, "raster contains SRTM void samples; they are kept as elevations");
    }
    info!(rows = array.rows(), cols = array.cols(), "raster loaded");
    Ok(array)
}

pub fn load_hgt(path: &Path) -> IoResult<ElevationArray> {
    load(path, RasterFormat::Hgt)
}

pub fn load_raw_i16(path: &Path, rows: usize, cols: usize) -> IoResult<ElevationArray> {
    load(path, RasterFormat::RawI16 { rows, cols })
}

pub fn load_json(path: &Path) -> IoResult<ElevationArray> {
    load(path, RasterFormat::Json)
}

/// Parse an SRTM `.hgt` buffer. The side is inferred from the byte length.
pub fn parse_hgt(bytes: &[u8]) -> IoResult<ElevationArray> {
    if bytes.len() % 2 != 0 {
        return Err(IoError::InvalidRaster {
            message: format!("odd byte length {}", bytes.len()),
        });
    }
    let cells = bytes.len() / 2;
    let side = hgt_side(cells).ok_or_else(|| IoError::InvalidRaster {
        message: format!("{cells} samples do not form a square tile"),
    })?;

    let data = bytes
        .chunks_exact(2)
        .map(|c| f64::from(i16::from_be_bytes([c[0], c[1]])))
        .collect();
    Ok(ElevationArray::new(side, side, data)?)
}

/// Parse headerless little-endian `i16` samples of a known shape.
pub fn parse_raw_i16_le(bytes: &[u8], rows: usize, cols: usize) -> IoResult<ElevationArray> {
    let expected = rows
        .checked_mul(cols)
        .and_then(|n| n.checked_mul(2))
        .ok_or_else(|| IoError::InvalidRaster {
            message: format!("{rows}x{cols} overflows"),
        })?;
    if bytes.len() != expected {
        return Err(IoError::InvalidRaster {
            message: format!(
                "expected {expected} bytes for {rows}x{cols}, found {}",
                bytes.len()
            ),
        });
    }

    let data = bytes
        .chunks_exact(2)
        .map(|c| f64::from(i16::from_le_bytes([c[0], c[1]])))
        .collect();
    Ok(ElevationArray::new(rows, cols, data)?)
}

/// Parse a JSON array of equally long numeric rows.
pub fn parse_json(text: &str) -> IoResult<ElevationArray> {
    let rows: Vec<Vec<f64>> = serde_json::from_str(text)?;
    ElevationArray::from_rows(rows).map_err(|e| IoError::InvalidRaster {
        message: e.to_string(),
    })
}

fn hgt_side(cells: usize) -> Option<usize> {
    if let Some(&side) = SRTM_SIDES.iter().find(|&&s| s * s == cells) {
        return Some(side);
    }
    let side = (cells as f64).sqrt().round() as usize;
    (side > 0 && side * side == cells).then_some(side)
}

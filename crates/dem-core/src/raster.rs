//! Elevation array sources.
//!
//! The graph builder only needs the shape of the grid and a way to read a
//! sample at `(row, col)`. No-data sentinels (e.g. SRTM's `-32768`) are not
//! interpreted here; they are ordinary elevations.

use crate::{DemError, DemResult, Elevation};

/// A rectangular, row-major grid of elevation samples.
pub trait ElevationSource {
    /// Grid dimensions as `(rows, cols)`.
    fn shape(&self) -> (usize, usize);

    /// Sample at `(row, col)`. Callers stay inside `shape()`.
    fn get(&self, row: usize, col: usize) -> Elevation;
}

/// Owned, row-major elevation array.
#[derive(Debug, Clone, PartialEq)]
pub struct ElevationArray {
    rows: usize,
    cols: usize,
    data: Vec<Elevation>,
}

impl ElevationArray {
    /// Wrap a flat row-major buffer.
    pub fn new(rows: usize, cols: usize, data: Vec<Elevation>) -> DemResult<Self> {
        let len = rows.checked_mul(cols).ok_or(DemError::InvalidArg {
            what: "raster dimensions overflow",
        })?;
        if data.len() != len {
            return Err(DemError::InvalidArg {
                what: "raster buffer length does not match rows * cols",
            });
        }
        Ok(Self { rows, cols, data })
    }

    /// Build from nested rows. All rows must share the first row's width.
    pub fn from_rows<T>(grid: Vec<Vec<T>>) -> DemResult<Self>
    where
        T: Copy + Into<Elevation>,
    {
        let rows = grid.len();
        let cols = grid.first().map_or(0, Vec::len);

        let mut data = Vec::with_capacity(rows * cols);
        for row in &grid {
            if row.len() != cols {
                return Err(DemError::InvalidArg {
                    what: "ragged raster rows",
                });
            }
            data.extend(row.iter().map(|&v| v.into()));
        }

        Ok(Self { rows, cols, data })
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Count of samples equal to a no-data sentinel.
    pub fn count_value(&self, sentinel: Elevation) -> usize {
        self.data.iter().filter(|&&v| v == sentinel).count()
    }
}

impl ElevationSource for ElevationArray {
    fn shape(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    fn get(&self, row: usize, col: usize) -> Elevation {
        self.data[row * self.cols + col]
    }
}

impl<S: ElevationSource + ?Sized> ElevationSource for &S {
    fn shape(&self) -> (usize, usize) {
        (**self).shape()
    }

    fn get(&self, row: usize, col: usize) -> Elevation {
        (**self).get(row, col)
    }
}

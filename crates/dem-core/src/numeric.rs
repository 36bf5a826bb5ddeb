use crate::DemError;

/// Floating point type used throughout system
pub type Real = f64;

/// Elevation sample, in the raster's native unit (meters for SRTM).
pub type Elevation = Real;

/// Spacing between 4-adjacent cells, in grid units.
pub const GRID_SPACING: Real = 1.0;

/// One tolerance for everything
#[derive(Clone, Copy, Debug)]
pub struct Tolerances {
    pub abs: Real,
    pub rel: Real,
}

impl Default for Tolerances {
    fn default() -> Self {
        Self {
            abs: 1e-12,
            rel: 1e-9,
        }
    }
}

pub fn nearly_equal(a: Real, b: Real, tol: Tolerances) -> bool {
    let diff = (a - b).abs();
    if diff <= tol.abs {
        return true;
    }
    diff <= tol.rel * a.abs().max(b.abs())
}

pub fn ensure_finite(v: Real, what: &'static str) -> Result<Real, DemError> {
    if v.is_finite() {
        Ok(v)
    } else {
        Err(DemError::NonFinite { what, value: v })
    }
}

/// Terrain cost of stepping between two samples.
pub fn elevation_delta(a: Elevation, b: Elevation) -> Real {
    (a - b).abs()
}

//! Evenly spaced grids of bin edges

use crate::error::{Error, Result};

/// Linearly spaced grid of `n` points from `start` to `stop`
///
/// Both end points are included exactly, so `n` points make `n - 1` bins.
///
/// ```rust
/// # use tautools_utils::linspace;
/// assert_eq!(linspace(0.0, 1.0, 5).unwrap(), vec![0.0, 0.25, 0.5, 0.75, 1.0]);
///
/// // At least the two end points are needed
/// assert!(linspace(0.0, 1.0, 1).is_err());
/// ```
pub fn linspace(start: f64, stop: f64, n: usize) -> Result<Vec<f64>> {
    check_length(n)?;
    let step = (stop - start) / (n - 1) as f64;

    let mut grid: Vec<f64> = (0..n).map(|i| start + i as f64 * step).collect();
    grid[n - 1] = stop;
    Ok(grid)
}

/// Geometrically spaced grid of `n` points from `start` to `stop`
///
/// Consecutive points have a constant ratio, i.e. they are evenly spaced on a
/// logarithmic axis. Both bounds must be strictly positive, and are included
/// exactly.
///
/// ```rust
/// # use tautools_utils::geomspace;
/// let grid = geomspace(1.0, 100.0, 3).unwrap();
/// assert_eq!(grid[0], 1.0);
/// assert!((grid[1] - 10.0).abs() < 1e-12);
/// assert_eq!(grid[2], 100.0);
///
/// // Zero or negative bounds have no logarithm
/// assert!(geomspace(0.0, 100.0, 3).is_err());
/// ```
pub fn geomspace(start: f64, stop: f64, n: usize) -> Result<Vec<f64>> {
    check_length(n)?;
    if !(start > 0.0 && stop > 0.0) {
        return Err(Error::NonPositiveGeometricBound { start, stop });
    }

    let (log_start, log_stop) = (start.ln(), stop.ln());
    let step = (log_stop - log_start) / (n - 1) as f64;

    let mut grid: Vec<f64> = (0..n)
        .map(|i| (log_start + i as f64 * step).exp())
        .collect();
    grid[0] = start;
    grid[n - 1] = stop;
    Ok(grid)
}

fn check_length(n: usize) -> Result<()> {
    if n < 2 {
        return Err(Error::BelowMinimumSliceLength {
            length: n,
            minimum_required: 2,
        });
    }
    Ok(())
}

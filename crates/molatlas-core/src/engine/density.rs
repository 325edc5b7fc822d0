//! The 2D density-percentile engine.
//!
//! A query point in raw property units is mapped through the grid's affine
//! scalers into the standardized coordinate space the KDE was built in, the
//! density surface is linearly interpolated at that point, and the resulting
//! density is located in the cumulative mass distribution of all grid cell
//! densities. The percentile-of-density answers "how much of the total
//! probability mass lies in regions at least as sparse as this point's
//! region" - a measure of how unusual the point's neighborhood is, not of how
//! many molecules fall below it on either axis.

use crate::core::kde::{AxisRange, KdeGridDescriptor};
use serde::Serialize;
use thiserror::Error;

/// Represents errors that can occur during density-percentile computation.
#[derive(Debug, Error, PartialEq)]
pub enum DensityError {
    /// The scaled query point falls outside the grid's sample mesh, so the
    /// interpolated density is undefined.
    #[error("Query point ({x}, {y}) lies outside the density grid domain")]
    OutOfDomain { x: f64, y: f64 },
    /// The grid's total mass is zero, so the cumulative distribution cannot
    /// be normalized.
    #[error("Density grid has zero total mass; cannot normalize the cumulative distribution")]
    DegenerateDensity,
}

/// The density at a query point and its percentile within the grid's density
/// distribution.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DensityPercentile {
    pub density: f64,
    pub percentile_of_density: f64,
}

/// Evaluates a KDE grid at the raw-unit query point `(x, y)`.
///
/// # Errors
///
/// Returns `DensityError::OutOfDomain` when the scaled point falls outside
/// the grid mesh, and `DensityError::DegenerateDensity` when the grid carries
/// no mass.
pub fn density_percentile(
    grid: &KdeGridDescriptor,
    x: f64,
    y: f64,
) -> Result<DensityPercentile, DensityError> {
    let scaled_x = grid.scaler_x.transform(x);
    let scaled_y = grid.scaler_y.transform(y);

    let density = interpolate_density(grid, scaled_x, scaled_y)
        .ok_or(DensityError::OutOfDomain { x, y })?;
    let percentile_of_density = mass_percentile(grid, density)?;

    Ok(DensityPercentile {
        density,
        percentile_of_density,
    })
}

/// Piecewise-linear interpolation of the density surface at a scaled point.
///
/// The mesh is regular, so the containing cell is located directly from the
/// axis ranges and the density is interpolated linearly along each axis in
/// turn. Returns `None` outside the mesh, including for non-finite inputs.
fn interpolate_density(grid: &KdeGridDescriptor, scaled_x: f64, scaled_y: f64) -> Option<f64> {
    let (col, tx) = locate(&grid.x_range, scaled_x)?;
    let (row, ty) = locate(&grid.y_range, scaled_y)?;

    let z = &grid.z;
    let lower = z[(row, col)] + (z[(row, col + 1)] - z[(row, col)]) * tx;
    let upper = z[(row + 1, col)] + (z[(row + 1, col + 1)] - z[(row + 1, col)]) * tx;

    Some(lower + (upper - lower) * ty)
}

/// Locates the mesh cell containing `v` along one axis.
///
/// Returns the lower node index and the fractional position of `v` within
/// the cell. A value exactly on the upper domain edge belongs to the last
/// cell with fraction 1.
fn locate(range: &AxisRange, v: f64) -> Option<(usize, f64)> {
    if !v.is_finite() || v < range.min || v > range.max {
        return None;
    }

    let step = range.step();
    if step <= 0.0 {
        // Collapsed axis: every node sits at `min`.
        return (v == range.min).then_some((0, 0.0));
    }

    let cell = (((v - range.min) / step).floor() as usize).min(range.count - 2);
    let fraction = (v - (range.min + cell as f64 * step)) / step;

    Some((cell, fraction))
}

/// Converts an interpolated density into its percentile within the grid's
/// cumulative mass distribution.
///
/// All node densities are sorted ascending and cumulatively summed,
/// normalized by the total mass. The percentile is the cumulative fraction
/// at the first sorted entry >= `density`; ties resolve to the lowest
/// matching index, the most conservative choice among equal-density cells.
fn mass_percentile(grid: &KdeGridDescriptor, density: f64) -> Result<f64, DensityError> {
    let mut sorted: Vec<f64> = grid.z.iter().copied().collect();
    sorted.sort_by(|a, b| a.total_cmp(b));

    let total: f64 = sorted.iter().sum();
    if total <= 0.0 {
        return Err(DensityError::DegenerateDensity);
    }

    let index = sorted
        .partition_point(|&v| v < density)
        .min(sorted.len() - 1);
    let cumulative: f64 = sorted[..=index].iter().sum();

    Ok(cumulative / total * 100.0)
}

//! The density-rank workflow: density and percentile-of-density for one
//! point on a property-pair KDE grid.

use crate::core::artifacts;
use crate::core::kde::{KdeDict, KdeLoadError};
use crate::engine::density::{self, DensityError, DensityPercentile};
use std::path::Path;
use thiserror::Error;
use tracing::{debug, info};

/// One density-rank computation: the reference population, the property pair
/// spanning the grid, and the molecule's raw coordinates on that pair.
#[derive(Debug, Clone)]
pub struct DensityRequest {
    pub database: String,
    pub charge: String,
    /// Property on the grid's x axis. Positional: swapping `prop_x` and
    /// `prop_y` addresses a different grid.
    pub prop_x: String,
    /// Property on the grid's y axis.
    pub prop_y: String,
    pub x: f64,
    pub y: f64,
}

#[derive(Debug, Error)]
pub enum DensityMapError {
    #[error(transparent)]
    Kde(#[from] KdeLoadError),
    /// The dictionary loaded, but holds no grid for the requested key.
    #[error("KDE entry '{key}' not found in '{path}'")]
    UnknownKey { key: String, path: String },
    #[error(transparent)]
    Density(#[from] DensityError),
}

/// Loads the KDE dictionary for the requested database/charge pair, looks up
/// the property-pair grid, and evaluates it at `(x, y)`.
pub fn run(data_dir: &Path, request: &DensityRequest) -> Result<DensityPercentile, DensityMapError> {
    let path = artifacts::kde_dict_path(data_dir, &request.database, &request.charge);
    info!("Loading KDE dictionary from {:?}", path);
    let dict = KdeDict::load(&path)?;

    let key = artifacts::kde_key(
        &request.database,
        &request.charge,
        &request.prop_x,
        &request.prop_y,
    );
    let grid = dict.get(&key).ok_or_else(|| {
        debug!(
            "Available KDE keys: {:?}",
            dict.keys().collect::<Vec<_>>()
        );
        DensityMapError::UnknownKey {
            key: key.clone(),
            path: path.to_string_lossy().to_string(),
        }
    })?;

    let result = density::density_percentile(grid, request.x, request.y)?;
    info!(
        "Density {:.6e} ranks at the {:.2} percentile of density.",
        result.density, result.percentile_of_density
    );

    Ok(result)
}

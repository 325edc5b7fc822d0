//! The property-profile workflow: percentile ranks for a set of properties
//! against one reference database.

use crate::core::artifacts;
use crate::core::tables::{PercentileTable, TableLoadError};
use crate::engine::percentile::{self, PercentileError, PropertyPercentile};
use std::collections::HashMap;
use std::path::Path;
use thiserror::Error;
use tracing::info;

/// One profile computation: which reference population to rank against, and
/// the molecule's property values.
#[derive(Debug, Clone)]
pub struct ProfileRequest {
    pub database: String,
    pub charge: String,
    /// Properties to rank, in output order.
    pub properties: Vec<String>,
    /// Raw property values of the molecule under study.
    pub values: HashMap<String, f64>,
}

#[derive(Debug, Error)]
pub enum ProfileError {
    #[error(transparent)]
    Table(#[from] TableLoadError),
    #[error(transparent)]
    Percentile(#[from] PercentileError),
}

/// Loads the percentile table for the requested database/charge pair and
/// ranks every requested property.
///
/// Fail-fast end to end: a missing artifact, unknown property, or missing
/// value aborts the call with no partial results.
pub fn run(
    data_dir: &Path,
    request: &ProfileRequest,
) -> Result<Vec<PropertyPercentile>, ProfileError> {
    let path = artifacts::percentile_table_path(data_dir, &request.database, &request.charge);
    info!("Loading percentile table from {:?}", path);
    let table = PercentileTable::load(&path)?;

    let ranks = percentile::percentiles_for(&table, &request.properties, &request.values)?;
    info!("Computed percentile ranks for {} propert(ies).", ranks.len());

    Ok(ranks)
}

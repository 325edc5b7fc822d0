use molatlas::workflows::density::DensityMapError;
use molatlas::workflows::profile::ProfileError;
use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, CliError>;

#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Profile(#[from] ProfileError),

    #[error(transparent)]
    Density(#[from] DensityMapError),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Failed to parse config file '{path}': {source}", path = path.display())]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to serialize results to JSON: {0}")]
    Json(#[from] serde_json::Error),
}

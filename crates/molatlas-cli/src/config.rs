//! Run configuration files for the two subcommands.
//!
//! Configs are TOML with the same keys the original notebook-era tool used:
//! `database`, `charge`, `properties`/`values` for profiles and
//! `prop_x`/`prop_y`/`x`/`y` for density ranks, plus the `visualize` and
//! `output_dir` toggles kept for compatibility with existing configs (this
//! build produces numeric results only). The density config supports the
//! same fallback as the original: a two-entry `properties` list plus a
//! `values` mapping may stand in for the explicit point keys.

use crate::error::{CliError, Result};
use molatlas::workflows::density::DensityRequest;
use molatlas::workflows::profile::ProfileRequest;
use serde::Deserialize;
use serde::de::DeserializeOwned;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

fn default_database() -> String {
    "All".to_string()
}

fn default_charge() -> String {
    "0".to_string()
}

fn default_output_dir() -> PathBuf {
    PathBuf::from("fig")
}

fn load_toml<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let content = std::fs::read_to_string(path)?;
    toml::from_str(&content).map_err(|e| CliError::ConfigParse {
        path: path.to_path_buf(),
        source: e,
    })
}

#[derive(Deserialize, Debug, Clone)]
#[serde(deny_unknown_fields)]
pub struct ProfileConfig {
    #[serde(default = "default_database")]
    pub database: String,
    #[serde(default = "default_charge")]
    pub charge: String,
    /// Properties to rank, in output order. When omitted, all keys of
    /// `values` are ranked in lexical order (TOML tables carry no usable
    /// key order).
    #[serde(default)]
    pub properties: Option<Vec<String>>,
    pub values: HashMap<String, f64>,
    #[serde(default)]
    pub visualize: bool,
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,
}

impl ProfileConfig {
    pub fn from_file(path: &Path) -> Result<Self> {
        load_toml(path)
    }

    pub fn to_request(&self) -> Result<ProfileRequest> {
        if self.values.is_empty() {
            return Err(CliError::Config(
                "profile: 'values' mapping is required (property -> numeric value)".to_string(),
            ));
        }

        let properties = match &self.properties {
            Some(props) if !props.is_empty() => {
                props.iter().map(|p| p.trim().to_string()).collect()
            }
            Some(_) => {
                return Err(CliError::Config(
                    "profile: 'properties' must not be empty when present".to_string(),
                ));
            }
            None => {
                let mut keys: Vec<String> =
                    self.values.keys().map(|k| k.trim().to_string()).collect();
                keys.sort();
                keys
            }
        };

        Ok(ProfileRequest {
            database: self.database.clone(),
            charge: self.charge.clone(),
            properties,
            values: self
                .values
                .iter()
                .map(|(k, v)| (k.trim().to_string(), *v))
                .collect(),
        })
    }
}

#[derive(Deserialize, Debug, Clone)]
#[serde(deny_unknown_fields)]
pub struct DensityConfig {
    #[serde(default = "default_database")]
    pub database: String,
    #[serde(default = "default_charge")]
    pub charge: String,
    #[serde(default)]
    pub prop_x: Option<String>,
    #[serde(default)]
    pub prop_y: Option<String>,
    #[serde(default)]
    pub x: Option<f64>,
    #[serde(default)]
    pub y: Option<f64>,
    /// Fallback for `prop_x`/`prop_y`: a list of exactly two properties.
    #[serde(default)]
    pub properties: Option<Vec<String>>,
    /// Fallback for `x`/`y`: a mapping holding both properties' values.
    #[serde(default)]
    pub values: Option<HashMap<String, f64>>,
    #[serde(default)]
    pub visualize: bool,
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,
}

impl DensityConfig {
    pub fn from_file(path: &Path) -> Result<Self> {
        load_toml(path)
    }

    pub fn to_request(&self) -> Result<DensityRequest> {
        let (prop_x, prop_y) = match (&self.prop_x, &self.prop_y) {
            (Some(px), Some(py)) => (px.trim().to_string(), py.trim().to_string()),
            _ => match &self.properties {
                Some(props) if props.len() == 2 => {
                    (props[0].trim().to_string(), props[1].trim().to_string())
                }
                _ => {
                    return Err(CliError::Config(
                        "density: 'prop_x' and 'prop_y' are required (or 'properties' with exactly 2 entries)"
                            .to_string(),
                    ));
                }
            },
        };

        let coordinate = |explicit: Option<f64>, prop: &str| -> Result<f64> {
            explicit
                .or_else(|| {
                    self.values
                        .as_ref()
                        .and_then(|values| values.get(prop).copied())
                })
                .ok_or_else(|| {
                    CliError::Config(format!(
                        "density: no coordinate for '{prop}' ('x'/'y' or a 'values' entry is required)"
                    ))
                })
        };
        let x = coordinate(self.x, &prop_x)?;
        let y = coordinate(self.y, &prop_y)?;

        Ok(DensityRequest {
            database: self.database.clone(),
            charge: self.charge.clone(),
            prop_x,
            prop_y,
            x,
            y,
        })
    }
}

//! Loader for the 2D kernel-density-estimate grid dictionaries.
//!
//! A KDE dictionary is a JSON file mapping lookup keys (see
//! [`crate::core::artifacts::kde_key`]) to grid descriptors. Each descriptor
//! bundles a regular sample grid over a *scaled* coordinate space, the density
//! surface evaluated at the grid nodes, the affine scalers that map raw
//! property units into that scaled space, and the contour/percentile level
//! pairs consumed by external plotting tools.
//!
//! The dictionaries are produced by the reference-database pipeline and are
//! never written by this library. Loading follows a raw-then-validate scheme:
//! a serde mirror of the file format is deserialized first, then converted
//! into the runtime [`KdeGridDescriptor`] while checking the shape and scaler
//! invariants.

use nalgebra::DMatrix;
use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;
use thiserror::Error;

/// One axis of a regular sample grid: `count` evenly spaced nodes spanning
/// `[min, max]` in scaled coordinates.
///
/// Stored in the artifact as a 3-element `[min, max, count]` array, matching
/// the reference tool's range tuples.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(from = "[f64; 3]")]
pub struct AxisRange {
    pub min: f64,
    pub max: f64,
    pub count: usize,
}

impl From<[f64; 3]> for AxisRange {
    fn from(raw: [f64; 3]) -> Self {
        Self {
            min: raw[0],
            max: raw[1],
            count: raw[2] as usize,
        }
    }
}

impl AxisRange {
    /// Spacing between adjacent grid nodes.
    pub fn step(&self) -> f64 {
        (self.max - self.min) / (self.count - 1) as f64
    }
}

/// An invertible 1D affine transform between raw property units and the
/// standardized coordinate space a KDE grid was built in.
///
/// This is the standard-score form: `transform` subtracts the population mean
/// and divides by the population scale. Any invertible linear map satisfies
/// the engine's contract; this representation is what the reference artifacts
/// carry.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct AffineScaler {
    pub mean: f64,
    pub scale: f64,
}

impl AffineScaler {
    /// Maps a value from raw property units into scaled grid units.
    pub fn transform(&self, value: f64) -> f64 {
        (value - self.mean) / self.scale
    }

    /// Maps a value from scaled grid units back into raw property units.
    pub fn inverse_transform(&self, scaled: f64) -> f64 {
        scaled * self.scale + self.mean
    }
}

/// Serde mirror of one grid entry as stored in the JSON artifact.
#[derive(Debug, Deserialize)]
struct RawKdeGrid {
    x_range: AxisRange,
    y_range: AxisRange,
    z: Vec<Vec<f64>>,
    scaler_x: AffineScaler,
    scaler_y: AffineScaler,
    #[serde(default)]
    contour_levels: Vec<f64>,
    #[serde(default)]
    percentile_levels: Vec<f64>,
}

/// A validated KDE grid ready for density evaluation.
///
/// `z` holds the non-negative density values at the grid nodes, one row per
/// y-axis node and one column per x-axis node, in the row-major layout the
/// artifact uses.
#[derive(Debug, Clone)]
pub struct KdeGridDescriptor {
    pub x_range: AxisRange,
    pub y_range: AxisRange,
    pub z: DMatrix<f64>,
    pub scaler_x: AffineScaler,
    pub scaler_y: AffineScaler,
    /// Density levels at which external plotting tools draw contours.
    /// Parallel to `percentile_levels`; unused by the engines.
    pub contour_levels: Vec<f64>,
    /// Percentile labels paired with `contour_levels`.
    pub percentile_levels: Vec<f64>,
}

/// Represents errors that can occur while loading a KDE dictionary.
#[derive(Debug, Error)]
pub enum KdeLoadError {
    /// The resolved dictionary path does not exist on disk.
    ///
    /// The dictionaries are not generated by this tool; the message points
    /// the user at the out-of-band distribution channel.
    #[error(
        "KDE dictionary not found: '{path}'. This artifact is not generated by MolAtlas; \
         download the reference data archive and extract it into the data directory."
    )]
    NotFound { path: String },
    /// The file exists but could not be read.
    #[error("File I/O error for '{path}': {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },
    /// The file content is not valid JSON or does not match the grid schema.
    #[error("JSON parsing error for '{path}': {source}")]
    Json {
        path: String,
        source: serde_json::Error,
    },
    /// An axis has fewer than two sample nodes, so no cell can be formed.
    #[error("KDE grid '{key}' has {count} sample(s) on the {axis} axis; at least 2 are required")]
    AxisCount { key: String, axis: char, count: usize },
    /// The density matrix does not match the `count_y x count_x` shape
    /// declared by the axis ranges.
    #[error(
        "KDE grid '{key}' has a malformed density matrix: expected {expected_rows}x{expected_cols}, found row {row} with {actual} value(s) of {actual_rows} row(s)"
    )]
    GridShape {
        key: String,
        expected_rows: usize,
        expected_cols: usize,
        row: usize,
        actual: usize,
        actual_rows: usize,
    },
    /// A scaler has zero scale and therefore no inverse.
    #[error("KDE grid '{key}' has a non-invertible {axis}-axis scaler (scale = 0)")]
    DegenerateScaler { key: String, axis: char },
}

/// A keyed collection of KDE grid descriptors for one `(database, charge)`
/// pair.
#[derive(Debug, Clone, Default)]
pub struct KdeDict {
    grids: HashMap<String, KdeGridDescriptor>,
}

impl KdeDict {
    /// Loads and validates a KDE dictionary from a JSON file.
    ///
    /// # Errors
    ///
    /// Returns `KdeLoadError::NotFound` if `path` does not exist,
    /// `KdeLoadError::Json` if the content does not match the artifact
    /// schema, and the shape/scaler variants if any entry violates the grid
    /// invariants.
    pub fn load(path: &Path) -> Result<Self, KdeLoadError> {
        if !path.exists() {
            return Err(KdeLoadError::NotFound {
                path: path.to_string_lossy().to_string(),
            });
        }

        let content = std::fs::read_to_string(path).map_err(|e| KdeLoadError::Io {
            path: path.to_string_lossy().to_string(),
            source: e,
        })?;
        let raw: HashMap<String, RawKdeGrid> =
            serde_json::from_str(&content).map_err(|e| KdeLoadError::Json {
                path: path.to_string_lossy().to_string(),
                source: e,
            })?;

        let mut grids = HashMap::with_capacity(raw.len());
        for (key, raw_grid) in raw {
            let grid = Self::validate_grid(&key, raw_grid)?;
            grids.insert(key, grid);
        }

        tracing::debug!("Loaded KDE dictionary from {:?}: {} grid(s).", path, grids.len());

        Ok(Self { grids })
    }

    fn validate_grid(key: &str, raw: RawKdeGrid) -> Result<KdeGridDescriptor, KdeLoadError> {
        for (axis, range) in [('x', &raw.x_range), ('y', &raw.y_range)] {
            if range.count < 2 {
                return Err(KdeLoadError::AxisCount {
                    key: key.to_string(),
                    axis,
                    count: range.count,
                });
            }
        }

        let rows = raw.y_range.count;
        let cols = raw.x_range.count;
        if raw.z.len() != rows {
            return Err(KdeLoadError::GridShape {
                key: key.to_string(),
                expected_rows: rows,
                expected_cols: cols,
                row: 0,
                actual: raw.z.first().map_or(0, Vec::len),
                actual_rows: raw.z.len(),
            });
        }
        for (row_index, row) in raw.z.iter().enumerate() {
            if row.len() != cols {
                return Err(KdeLoadError::GridShape {
                    key: key.to_string(),
                    expected_rows: rows,
                    expected_cols: cols,
                    row: row_index,
                    actual: row.len(),
                    actual_rows: raw.z.len(),
                });
            }
        }

        for (axis, scaler) in [('x', &raw.scaler_x), ('y', &raw.scaler_y)] {
            if scaler.scale == 0.0 {
                return Err(KdeLoadError::DegenerateScaler {
                    key: key.to_string(),
                    axis,
                });
            }
        }

        let z = DMatrix::from_row_iterator(rows, cols, raw.z.into_iter().flatten());

        Ok(KdeGridDescriptor {
            x_range: raw.x_range,
            y_range: raw.y_range,
            z,
            scaler_x: raw.scaler_x,
            scaler_y: raw.scaler_y,
            contour_levels: raw.contour_levels,
            percentile_levels: raw.percentile_levels,
        })
    }

    /// Looks up the grid stored under `key`.
    pub fn get(&self, key: &str) -> Option<&KdeGridDescriptor> {
        self.grids.get(key)
    }

    /// All keys present in this dictionary, in no particular order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.grids.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.grids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.grids.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::File;
    use std::io::Write;
    use tempfile::TempDir;

    const TOLERANCE: f64 = 1e-12;

    fn write_dict(dir: &TempDir, name: &str, content: &str) -> std::path::PathBuf {
        let path = dir.path().join(name);
        let mut file = File::create(&path).unwrap();
        write!(file, "{}", content).unwrap();
        path
    }

    fn valid_entry() -> &'static str {
        r#"{
            "DBAll_charge0_p1MW_p2LogP": {
                "x_range": [-2.0, 2.0, 3],
                "y_range": [-1.0, 1.0, 2],
                "z": [[0.1, 0.2, 0.3], [0.4, 0.5, 0.6]],
                "scaler_x": { "mean": 250.0, "scale": 100.0 },
                "scaler_y": { "mean": 2.5, "scale": 1.5 },
                "contour_levels": [0.05, 0.2],
                "percentile_levels": [0.01, 0.1]
            }
        }"#
    }

    mod load_tests {
        use super::*;

        #[test]
        fn load_parses_a_valid_dictionary() {
            let dir = TempDir::new().unwrap();
            let path = write_dict(&dir, "kde_info_dict_DBAll_charge0.json", valid_entry());

            let dict = KdeDict::load(&path).unwrap();

            assert_eq!(dict.len(), 1);
            let grid = dict.get("DBAll_charge0_p1MW_p2LogP").unwrap();
            assert_eq!(grid.x_range.count, 3);
            assert_eq!(grid.y_range.count, 2);
            assert_eq!(grid.z.nrows(), 2);
            assert_eq!(grid.z.ncols(), 3);
            // Row-major layout: z[(row, col)] follows the nested arrays.
            assert_eq!(grid.z[(0, 2)], 0.3);
            assert_eq!(grid.z[(1, 0)], 0.4);
            assert_eq!(grid.contour_levels, vec![0.05, 0.2]);
        }

        #[test]
        fn load_fails_with_not_found_and_names_the_expected_path() {
            let dir = TempDir::new().unwrap();
            let path = dir.path().join("kde_info_dict_DBGDB_chargeAll.json");

            let error = KdeDict::load(&path).unwrap_err();

            let message = error.to_string();
            assert!(message.contains("kde_info_dict_DBGDB_chargeAll.json"));
            assert!(message.contains("not generated by MolAtlas"));
        }

        #[test]
        fn load_fails_on_density_matrix_shape_mismatch() {
            let dir = TempDir::new().unwrap();
            let path = write_dict(
                &dir,
                "bad.json",
                r#"{
                    "k": {
                        "x_range": [-2.0, 2.0, 3],
                        "y_range": [-1.0, 1.0, 2],
                        "z": [[0.1, 0.2], [0.4, 0.5, 0.6]],
                        "scaler_x": { "mean": 0.0, "scale": 1.0 },
                        "scaler_y": { "mean": 0.0, "scale": 1.0 }
                    }
                }"#,
            );

            let result = KdeDict::load(&path);

            assert!(matches!(
                result,
                Err(KdeLoadError::GridShape {
                    row: 0,
                    actual: 2,
                    expected_cols: 3,
                    ..
                })
            ));
        }

        #[test]
        fn load_fails_on_single_node_axis() {
            let dir = TempDir::new().unwrap();
            let path = write_dict(
                &dir,
                "bad.json",
                r#"{
                    "k": {
                        "x_range": [0.0, 0.0, 1],
                        "y_range": [-1.0, 1.0, 2],
                        "z": [[0.1], [0.2]],
                        "scaler_x": { "mean": 0.0, "scale": 1.0 },
                        "scaler_y": { "mean": 0.0, "scale": 1.0 }
                    }
                }"#,
            );

            let result = KdeDict::load(&path);

            assert!(matches!(
                result,
                Err(KdeLoadError::AxisCount { axis: 'x', count: 1, .. })
            ));
        }

        #[test]
        fn load_fails_on_zero_scale_scaler() {
            let dir = TempDir::new().unwrap();
            let path = write_dict(
                &dir,
                "bad.json",
                r#"{
                    "k": {
                        "x_range": [-2.0, 2.0, 2],
                        "y_range": [-1.0, 1.0, 2],
                        "z": [[0.1, 0.2], [0.3, 0.4]],
                        "scaler_x": { "mean": 0.0, "scale": 1.0 },
                        "scaler_y": { "mean": 0.0, "scale": 0.0 }
                    }
                }"#,
            );

            let result = KdeDict::load(&path);

            assert!(matches!(
                result,
                Err(KdeLoadError::DegenerateScaler { axis: 'y', .. })
            ));
        }

        #[test]
        fn missing_level_arrays_default_to_empty() {
            let dir = TempDir::new().unwrap();
            let path = write_dict(
                &dir,
                "minimal.json",
                r#"{
                    "k": {
                        "x_range": [-2.0, 2.0, 2],
                        "y_range": [-1.0, 1.0, 2],
                        "z": [[0.1, 0.2], [0.3, 0.4]],
                        "scaler_x": { "mean": 0.0, "scale": 1.0 },
                        "scaler_y": { "mean": 0.0, "scale": 1.0 }
                    }
                }"#,
            );

            let dict = KdeDict::load(&path).unwrap();

            let grid = dict.get("k").unwrap();
            assert!(grid.contour_levels.is_empty());
            assert!(grid.percentile_levels.is_empty());
        }
    }

    mod scaler_tests {
        use super::*;

        #[test]
        fn transform_standardizes_raw_values() {
            let scaler = AffineScaler {
                mean: 250.0,
                scale: 100.0,
            };

            assert!((scaler.transform(250.0) - 0.0).abs() < TOLERANCE);
            assert!((scaler.transform(350.0) - 1.0).abs() < TOLERANCE);
        }

        #[test]
        fn round_trip_is_the_identity_within_tolerance() {
            let scaler = AffineScaler {
                mean: -3.7,
                scale: 0.42,
            };

            for value in [-120.5, -1.0, 0.0, 0.333, 57.9] {
                let round_tripped = scaler.inverse_transform(scaler.transform(value));
                assert!((round_tripped - value).abs() < 1e-9);
            }
        }
    }

    mod axis_tests {
        use super::*;

        #[test]
        fn axis_range_deserializes_from_a_float_triple() {
            let range: AxisRange = serde_json::from_str("[-2.5, 2.5, 100.0]").unwrap();

            assert_eq!(range.min, -2.5);
            assert_eq!(range.max, 2.5);
            assert_eq!(range.count, 100);
        }

        #[test]
        fn step_spans_the_range_evenly() {
            let range = AxisRange {
                min: -1.0,
                max: 1.0,
                count: 5,
            };

            assert!((range.step() - 0.5).abs() < TOLERANCE);
        }
    }
}

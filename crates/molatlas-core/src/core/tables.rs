//! Loader for the 1D percentile lookup tables.
//!
//! A percentile table is a CSV file with one column per molecular property.
//! After the fixed header rows are stripped, each column is an ascending
//! numeric vector whose *position* encodes a percentile: the i-th entry of a
//! column with `n` entries corresponds to percentile `100 * i / (n - 1)`.
//! Monotonicity is a property of the artifact, validated when the tables are
//! generated, not enforced here.

use std::path::Path;
use thiserror::Error;

/// Physical row index (0-based, counting the column-header row as row 0) that
/// the loader always skips.
///
/// The legacy table format carries one metadata row directly below the column
/// headers. The reference tool skips exactly this row by index rather than
/// inferring a header rule from the data, and that convention is preserved
/// here verbatim so both tools read identical cutpoints from the same file.
pub const LEGACY_SKIP_ROW: usize = 1;

/// Represents errors that can occur while loading a percentile table.
#[derive(Debug, Error)]
pub enum TableLoadError {
    /// The resolved table path does not exist on disk.
    #[error("Percentile table not found: '{path}'")]
    NotFound { path: String },
    /// The file exists but could not be read.
    #[error("File I/O error for '{path}': {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },
    /// The file content is not well-formed CSV.
    #[error("CSV parsing error for '{path}': {source}")]
    Csv { path: String, source: csv::Error },
    /// A retained cell could not be parsed as a number.
    #[error("Non-numeric cell in '{path}' at line {line}, column '{column}'")]
    Parse {
        path: String,
        line: usize,
        column: String,
    },
}

/// A percentile lookup table keyed by property name.
///
/// Columns preserve the order they appear in the source CSV. Empty cells are
/// stored as NaN (short columns are padded by the artifact generator); they
/// only matter if they survive into the cutpoint range of a queried property.
#[derive(Debug, Clone, Default)]
pub struct PercentileTable {
    columns: Vec<String>,
    cells: Vec<Vec<f64>>,
}

impl PercentileTable {
    /// Loads a percentile table from a CSV file.
    ///
    /// The column-header row names the properties; the row at
    /// [`LEGACY_SKIP_ROW`] is discarded unconditionally. Everything else is
    /// parsed as `f64`, with empty cells mapped to NaN.
    ///
    /// # Errors
    ///
    /// Returns `TableLoadError::NotFound` if `path` does not exist,
    /// `TableLoadError::Csv` if the content is malformed, and
    /// `TableLoadError::Parse` for non-numeric cells.
    pub fn load(path: &Path) -> Result<Self, TableLoadError> {
        if !path.exists() {
            return Err(TableLoadError::NotFound {
                path: path.to_string_lossy().to_string(),
            });
        }

        let mut reader = csv::Reader::from_path(path).map_err(|e| TableLoadError::Csv {
            path: path.to_string_lossy().to_string(),
            source: e,
        })?;

        let columns: Vec<String> = reader
            .headers()
            .map_err(|e| TableLoadError::Csv {
                path: path.to_string_lossy().to_string(),
                source: e,
            })?
            .iter()
            .map(|h| h.trim().to_string())
            .collect();

        let mut cells: Vec<Vec<f64>> = vec![Vec::new(); columns.len()];
        for (record_index, result) in reader.records().enumerate() {
            let record = result.map_err(|e| TableLoadError::Csv {
                path: path.to_string_lossy().to_string(),
                source: e,
            })?;

            // Record 0 sits at physical row 1, directly below the header.
            if record_index + 1 == LEGACY_SKIP_ROW {
                continue;
            }

            for (column_index, field) in record.iter().enumerate().take(columns.len()) {
                let field = field.trim();
                let value = if field.is_empty() {
                    f64::NAN
                } else {
                    field.parse::<f64>().map_err(|_| TableLoadError::Parse {
                        path: path.to_string_lossy().to_string(),
                        line: record_index + 2,
                        column: columns[column_index].clone(),
                    })?
                };
                cells[column_index].push(value);
            }
        }

        tracing::debug!(
            "Loaded percentile table from {:?}: {} column(s), {} row(s).",
            path,
            columns.len(),
            cells.first().map_or(0, Vec::len)
        );

        Ok(Self { columns, cells })
    }

    /// Property names in source-file order.
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// The numeric vector of one property, or `None` if the property has no
    /// column in this table.
    pub fn column(&self, property: &str) -> Option<&[f64]> {
        self.columns
            .iter()
            .position(|c| c == property)
            .map(|i| self.cells[i].as_slice())
    }
}

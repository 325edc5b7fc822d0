//! Artifact filename and lookup-key conventions.
//!
//! Reference artifacts are resolved purely by name from a `(database, charge)`
//! identifier pair. The `database` and `charge` components are opaque strings
//! to this layer; the known reference databases are `All`, `ZINC`, `PubChem`
//! and `GDB` with charge states `0` and `All`, but validating that set (if
//! desired at all) is the front-end's concern.

use std::path::{Path, PathBuf};

fn db_prefix(database: &str) -> String {
    format!("DB{database}")
}

/// Filename of the 1D percentile lookup table for a database/charge pair,
/// e.g. `DBZINC_charge0.csv`.
pub fn percentile_table_filename(database: &str, charge: &str) -> String {
    format!("{}_charge{charge}.csv", db_prefix(database))
}

/// Filename of the KDE grid dictionary for a database/charge pair,
/// e.g. `kde_info_dict_DBZINC_charge0.json`.
pub fn kde_dict_filename(database: &str, charge: &str) -> String {
    format!("kde_info_dict_{}_charge{charge}.json", db_prefix(database))
}

/// Lookup key of one KDE grid inside a dictionary.
///
/// The property pair is positional: `p1` is the x-axis property and `p2` the
/// y-axis property, and the two are never sorted. Swapping them produces a
/// different key that may well be absent from the dictionary.
pub fn kde_key(database: &str, charge: &str, prop_x: &str, prop_y: &str) -> String {
    format!("{}_charge{charge}_p1{prop_x}_p2{prop_y}", db_prefix(database))
}

/// Resolves the on-disk path of the percentile table under `data_dir`.
pub fn percentile_table_path(data_dir: &Path, database: &str, charge: &str) -> PathBuf {
    data_dir.join(percentile_table_filename(database, charge))
}

/// Resolves the on-disk path of the KDE grid dictionary under `data_dir`.
pub fn kde_dict_path(data_dir: &Path, database: &str, charge: &str) -> PathBuf {
    data_dir.join(kde_dict_filename(database, charge))
}

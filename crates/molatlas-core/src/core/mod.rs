//! # Core Module
//!
//! This module provides the data-access foundation of MolAtlas: the naming
//! conventions that resolve a `(database, charge)` identifier pair to on-disk
//! reference artifacts, and the loaders that turn those artifacts into typed,
//! validated in-memory structures.
//!
//! ## Overview
//!
//! MolAtlas consumes two kinds of precomputed, read-only artifacts. Neither is
//! generated by this library; both are distributed out-of-band alongside the
//! reference databases.
//!
//! - **Percentile tables** ([`tables`]) - CSV files whose columns are
//!   per-property ordered samples forming an empirical inverse-CDF.
//! - **KDE grid dictionaries** ([`kde`]) - keyed collections of discretized
//!   kernel-density surfaces over property pairs, stored together with the
//!   affine scalers that map raw property units into the standardized
//!   coordinate space the grids were built in.
//!
//! Filename and lookup-key construction lives in [`artifacts`] so that the
//! loaders and higher layers agree on a single convention.

pub mod artifacts;
pub mod kde;
pub mod tables;

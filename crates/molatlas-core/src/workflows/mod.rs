//! # Workflows Module
//!
//! This module provides the high-level entry points that tie the artifact
//! loaders and the computation engines together.
//!
//! ## Overview
//!
//! A workflow resolves the artifact for a `(database, charge)` pair under a
//! caller-supplied data directory, loads it fresh, and runs the matching
//! engine. Workflows are synchronous and stateless: nothing is cached
//! between invocations, so concurrent calls are independent by construction.
//!
//! - **Property Profile** ([`profile`]) - per-property percentile ranks from
//!   a 1D percentile table.
//! - **Density Rank** ([`density`]) - density and percentile-of-density for
//!   one point on a 2D KDE grid.

pub mod density;
pub mod profile;

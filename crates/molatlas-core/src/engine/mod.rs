//! # Engine Module
//!
//! This module implements the two stateless computation engines of MolAtlas.
//!
//! ## Overview
//!
//! Both engines consume an already-loaded artifact and produce a scalar or a
//! small ordered result set. They hold no state between calls, perform no
//! I/O, and never recover from an error locally: every failure is returned
//! immediately with enough context (property name, query point, sample count)
//! for the caller to report precisely.
//!
//! - **1D Percentile Engine** ([`percentile`]) - maps a raw property value to
//!   a percentile rank by piecewise-linear interpolation against the
//!   property's cutpoint vector, treated as an empirical inverse-CDF.
//! - **2D Density-Percentile Engine** ([`density`]) - evaluates a KDE grid's
//!   density at a query point and converts it into a percentile-of-density,
//!   the fraction of total probability mass in regions at least as sparse as
//!   the query point's region.

pub mod density;
pub mod percentile;

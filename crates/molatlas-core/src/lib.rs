//! # MolAtlas Core Library
//!
//! A library for placing a molecule's property values on the map of known
//! chemical space: given precomputed reference artifacts derived from large
//! compound databases (ZINC, PubChem, GDB), it converts raw property values
//! into percentile ranks relative to the reference population.
//!
//! ## Architectural Philosophy
//!
//! The library follows a strict three-layer architecture to keep the numeric
//! engines independent of any particular artifact location or front-end.
//!
//! - **[`core`]: The Foundation.** Artifact naming conventions and the loaders
//!   for the two reference artifact types: per-property percentile tables
//!   (CSV) and keyed kernel-density-estimate grid dictionaries (JSON).
//!
//! - **[`engine`]: The Logic Core.** The two stateless computation engines:
//!   piecewise-linear percentile interpolation over empirical inverse-CDF
//!   cutpoints, and density / percentile-of-density evaluation on a KDE grid.
//!
//! - **[`workflows`]: The Public API.** End-to-end entry points that resolve
//!   and load an artifact for a `(database, charge)` pair and run the
//!   corresponding engine. Front-ends (the `molatlas` CLI) call these.

pub mod core;
pub mod engine;
pub mod workflows;

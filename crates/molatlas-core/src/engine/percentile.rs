//! The 1D percentile engine.
//!
//! A property's cutpoint vector is the tail of its percentile-table column:
//! position `i` of a vector with `n` entries corresponds to percentile
//! `100 * i / (n - 1)`, so the vector is an empirical inverse-CDF sampled at
//! evenly spaced percentiles. Ranking a value is piecewise-linear
//! interpolation against those (cutpoint, percentile) pairs, clamped to
//! `[0, 100]` at the edges of the observed range.

use crate::core::tables::PercentileTable;
use serde::Serialize;
use std::collections::HashMap;
use thiserror::Error;

/// Number of leading column entries discarded before the remainder is used
/// as cutpoints.
///
/// The first two retained rows of a legacy table column are summary values,
/// not distribution samples. Like the skip-row rule in the loader, this is a
/// fixed convention of the artifact format, applied by index.
pub const CUTPOINT_SKIP: usize = 2;

/// Represents errors that can occur during percentile computation.
#[derive(Debug, Error, PartialEq)]
pub enum PercentileError {
    /// The requested property has no column in the percentile table.
    #[error("Property '{0}' not found among the percentile table columns")]
    UnknownProperty(String),
    /// The caller supplied no value for a requested property.
    #[error("No value supplied for property '{0}'")]
    MissingValue(String),
    /// The cutpoint vector is too short to span a percentile range.
    ///
    /// With fewer than two cutpoints the `100 * i / (n - 1)` position mapping
    /// is indeterminate, so the engine refuses the input instead of producing
    /// NaN or an arbitrary constant.
    #[error("Cutpoint vector has {count} sample(s); at least 2 are required")]
    InsufficientSamples { count: usize },
}

/// A single property's percentile rank, together with the raw value it was
/// computed from.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PropertyPercentile {
    pub property: String,
    pub value: f64,
    pub percentile: f64,
}

/// Returns the percentile rank of `value` against a monotone non-decreasing
/// cutpoint vector.
///
/// Values at or below the first cutpoint rank at percentile 0; values at or
/// above the last rank at 100. In between, the rank is linear between the
/// two bracketing cutpoints. A NaN value yields a NaN rank, mirroring the
/// behavior of linear interpolation on an undefined query.
///
/// # Errors
///
/// Returns `PercentileError::InsufficientSamples` when `cutpoints` has fewer
/// than two entries.
pub fn percentile_of(cutpoints: &[f64], value: f64) -> Result<f64, PercentileError> {
    let n = cutpoints.len();
    if n < 2 {
        return Err(PercentileError::InsufficientSamples { count: n });
    }
    if value.is_nan() {
        return Ok(f64::NAN);
    }

    let last = n - 1;
    if value <= cutpoints[0] {
        return Ok(0.0);
    }
    if value >= cutpoints[last] {
        return Ok(100.0);
    }

    // First index whose cutpoint exceeds the value; its left neighbor is the
    // highest cutpoint <= value, so equal cutpoints resolve to the rightmost
    // duplicate.
    let hi = cutpoints.partition_point(|&c| c <= value);
    let lo = hi - 1;

    let rank_lo = 100.0 * lo as f64 / last as f64;
    let rank_hi = 100.0 * hi as f64 / last as f64;
    let span = cutpoints[hi] - cutpoints[lo];

    Ok(rank_lo + (value - cutpoints[lo]) / span * (rank_hi - rank_lo))
}

/// Computes percentile ranks for a set of properties against a loaded table.
///
/// Each property's cutpoints are its column values after [`CUTPOINT_SKIP`]
/// leading entries are discarded. The call is fail-fast: the first missing
/// column, missing value, or degenerate cutpoint vector aborts the whole
/// computation with no partial results, because downstream summaries need a
/// complete set. The result echoes the input property order.
///
/// # Errors
///
/// Returns `PercentileError::UnknownProperty` if a property has no table
/// column, `PercentileError::MissingValue` if `values` lacks an entry, and
/// `PercentileError::InsufficientSamples` for degenerate columns.
pub fn percentiles_for(
    table: &PercentileTable,
    properties: &[String],
    values: &HashMap<String, f64>,
) -> Result<Vec<PropertyPercentile>, PercentileError> {
    let mut ranks = Vec::with_capacity(properties.len());
    for property in properties {
        let column = table
            .column(property)
            .ok_or_else(|| PercentileError::UnknownProperty(property.clone()))?;
        let value = *values
            .get(property)
            .ok_or_else(|| PercentileError::MissingValue(property.clone()))?;

        let cutpoints = column.get(CUTPOINT_SKIP..).unwrap_or(&[]);
        let percentile = percentile_of(cutpoints, value)?;

        ranks.push(PropertyPercentile {
            property: property.clone(),
            value,
            percentile,
        });
    }
    Ok(ranks)
}

#[cfg(test)]
mod tests {
    use super::*;

    const TOLERANCE: f64 = 1e-9;

    fn f64_approx_equal(a: f64, b: f64) -> bool {
        (a - b).abs() < TOLERANCE
    }

    mod percentile_of_tests {
        use super::*;

        #[test]
        fn sample_points_map_to_their_exact_percentile() {
            let cutpoints = [1.0, 2.0, 4.0, 8.0, 16.0];

            for (i, &c) in cutpoints.iter().enumerate() {
                let expected = 100.0 * i as f64 / (cutpoints.len() - 1) as f64;
                assert!(f64_approx_equal(
                    percentile_of(&cutpoints, c).unwrap(),
                    expected
                ));
            }
        }

        #[test]
        fn midpoint_of_the_reference_example_ranks_at_fifty() {
            let cutpoints = [10.0, 20.0, 30.0];

            assert!(f64_approx_equal(
                percentile_of(&cutpoints, 20.0).unwrap(),
                50.0
            ));
            assert!(f64_approx_equal(
                percentile_of(&cutpoints, 25.0).unwrap(),
                75.0
            ));
            assert!(f64_approx_equal(
                percentile_of(&cutpoints, 5.0).unwrap(),
                0.0
            ));
        }

        #[test]
        fn values_outside_the_range_clamp_to_the_edges() {
            let cutpoints = [10.0, 20.0, 30.0];

            assert_eq!(percentile_of(&cutpoints, -1e6).unwrap(), 0.0);
            assert_eq!(percentile_of(&cutpoints, 10.0).unwrap(), 0.0);
            assert_eq!(percentile_of(&cutpoints, 30.0).unwrap(), 100.0);
            assert_eq!(percentile_of(&cutpoints, 1e6).unwrap(), 100.0);
        }

        #[test]
        fn rank_is_non_decreasing_in_the_value() {
            let cutpoints = [0.0, 0.0, 1.0, 5.0, 5.0, 9.0];

            let mut previous = f64::NEG_INFINITY;
            let mut v = -1.0;
            while v <= 10.0 {
                let rank = percentile_of(&cutpoints, v).unwrap();
                assert!(rank >= previous, "rank decreased at value {}", v);
                previous = rank;
                v += 0.01;
            }
        }

        #[test]
        fn duplicate_cutpoints_resolve_to_the_rightmost_position() {
            // Matches the reference interpolation, which returns the rank of
            // the last duplicate for a query sitting exactly on the tie.
            let cutpoints = [1.0, 2.0, 2.0, 3.0];

            assert!(f64_approx_equal(
                percentile_of(&cutpoints, 2.0).unwrap(),
                100.0 * 2.0 / 3.0
            ));
        }

        #[test]
        fn empty_and_single_sample_vectors_are_rejected() {
            assert_eq!(
                percentile_of(&[], 1.0),
                Err(PercentileError::InsufficientSamples { count: 0 })
            );
            assert_eq!(
                percentile_of(&[42.0], 42.0),
                Err(PercentileError::InsufficientSamples { count: 1 })
            );
        }

        #[test]
        fn nan_value_yields_nan_rank() {
            assert!(percentile_of(&[1.0, 2.0], f64::NAN).unwrap().is_nan());
        }
    }

    mod percentiles_for_tests {
        use super::*;
        use crate::core::tables::PercentileTable;
        use std::fs::File;
        use std::io::Write;
        use tempfile::TempDir;

        fn table_from_csv(content: &str) -> PercentileTable {
            let dir = TempDir::new().unwrap();
            let path = dir.path().join("table.csv");
            let mut file = File::create(&path).unwrap();
            write!(file, "{}", content).unwrap();
            PercentileTable::load(&path).unwrap()
        }

        // Column layout: one skipped metadata row, two summary rows, then
        // the cutpoints.
        fn reference_table() -> PercentileTable {
            table_from_csv(
                "MW,LogP\n\
                 0,0\n\
                 999,999\n\
                 888,888\n\
                 10,1.0\n\
                 20,2.0\n\
                 30,3.0\n",
            )
        }

        #[test]
        fn computes_ranks_from_cutpoints_after_the_summary_rows() {
            let table = reference_table();
            let properties = vec!["MW".to_string(), "LogP".to_string()];
            let values =
                HashMap::from([("MW".to_string(), 25.0), ("LogP".to_string(), 1.0)]);

            let ranks = percentiles_for(&table, &properties, &values).unwrap();

            assert_eq!(ranks.len(), 2);
            assert!(f64_approx_equal(ranks[0].percentile, 75.0));
            assert!(f64_approx_equal(ranks[1].percentile, 0.0));
        }

        #[test]
        fn result_echoes_the_input_property_order() {
            let table = reference_table();
            let properties = vec!["LogP".to_string(), "MW".to_string()];
            let values =
                HashMap::from([("MW".to_string(), 25.0), ("LogP".to_string(), 1.0)]);

            let ranks = percentiles_for(&table, &properties, &values).unwrap();

            assert_eq!(ranks[0].property, "LogP");
            assert_eq!(ranks[1].property, "MW");
        }

        #[test]
        fn unknown_property_fails_the_whole_call() {
            let table = reference_table();
            let properties = vec!["MW".to_string(), "TPSA".to_string()];
            let values =
                HashMap::from([("MW".to_string(), 25.0), ("TPSA".to_string(), 60.0)]);

            let result = percentiles_for(&table, &properties, &values);

            assert_eq!(
                result,
                Err(PercentileError::UnknownProperty("TPSA".to_string()))
            );
        }

        #[test]
        fn missing_value_fails_the_whole_call() {
            let table = reference_table();
            let properties = vec!["MW".to_string(), "LogP".to_string()];
            let values = HashMap::from([("MW".to_string(), 25.0)]);

            let result = percentiles_for(&table, &properties, &values);

            assert_eq!(
                result,
                Err(PercentileError::MissingValue("LogP".to_string()))
            );
        }

        #[test]
        fn short_column_is_rejected_as_insufficient() {
            // Two retained rows are consumed by the summary skip, leaving a
            // single cutpoint.
            let table = table_from_csv("MW\n0\n999\n888\n10\n");
            let properties = vec!["MW".to_string()];
            let values = HashMap::from([("MW".to_string(), 10.0)]);

            let result = percentiles_for(&table, &properties, &values);

            assert_eq!(
                result,
                Err(PercentileError::InsufficientSamples { count: 1 })
            );
        }
    }
}

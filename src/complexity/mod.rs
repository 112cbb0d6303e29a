//! Empirical time-complexity estimation
//!
//! For each (algorithm, optimization, data type) group with enough distinct
//! sizes, fits `ln(mean_time) = exponent * ln(size) + c` by ordinary least
//! squares. The slope is the empirical complexity exponent; `r_squared`
//! reports fit quality so callers can judge how seriously to take it.
//!
//! This is an approximation, not an exact classifier: over practical size
//! ranges an `O(n log n)` algorithm reads as a slope near 1.0, because
//! `log n` grows slowly. Turning the exponent into a class name is a
//! presentation decision handled by [`ComplexityLabeler`].
//!
//! Groups that fail the preconditions (fewer than 3 distinct sizes, or any
//! non-positive per-size mean whose logarithm is undefined) yield `None`;
//! that is an expected steady-state outcome for sparse datasets, not an
//! error.

mod label;
mod regression;

pub use label::{ComplexityBand, ComplexityLabeler};
pub use regression::{fit_ols, LinearFit};

use rustc_hash::{FxHashMap, FxHashSet};
use serde::Serialize;
use tracing::debug;

#[cfg(feature = "rayon")]
use rayon::prelude::*;

use crate::aggregate::{Field, GroupKey, KeySpec, Welford};
use crate::record::RecordStore;

/// Minimum number of distinct sizes required for a regression.
pub const MIN_DISTINCT_SIZES: usize = 3;

/// Key spec of the estimator's grouping: everything but size.
const TRIPLE_SPEC: KeySpec = KeySpec::FULL.without(Field::Size);

/// Empirical complexity estimate for one (algorithm, optimization,
/// data type) group.
///
/// Computed once per analysis run from the current store snapshot; never
/// mutated afterward. A new run recomputes from scratch.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ComplexityEstimate {
    exponent: f64,
    r_squared: f64,
    sample_count: usize,
}

impl ComplexityEstimate {
    /// Regression slope of `ln(mean_time)` vs `ln(size)`.
    #[must_use]
    pub const fn exponent(&self) -> f64 {
        self.exponent
    }

    /// Goodness of fit in [0, 1].
    #[must_use]
    pub const fn r_squared(&self) -> f64 {
        self.r_squared
    }

    /// Number of distinct sizes the fit used.
    #[must_use]
    pub const fn sample_count(&self) -> usize {
        self.sample_count
    }
}

/// Estimate the empirical complexity exponent of one group.
///
/// Returns `None` when the group has fewer than [`MIN_DISTINCT_SIZES`]
/// distinct sizes or any per-size mean time is not strictly positive (the
/// whole group is excluded, never clamped).
#[must_use]
pub fn estimate(
    store: &RecordStore,
    algorithm: &str,
    optimization: &str,
    data_type: &str,
) -> Option<ComplexityEstimate> {
    estimate_for_key(store, &GroupKey::triple(algorithm, optimization, data_type))
}

/// Estimate every (algorithm, optimization, data type) group in the store.
///
/// Groups appear in first-seen record order; groups failing the estimator
/// preconditions are skipped. With the `rayon` feature the per-group
/// regressions run in parallel - partitions are disjoint and write-once,
/// so order is restored by the indexed collect.
#[must_use]
pub fn estimate_all(store: &RecordStore) -> Vec<(GroupKey, ComplexityEstimate)> {
    let mut order: Vec<GroupKey> = Vec::new();
    let mut seen: FxHashSet<GroupKey> = FxHashSet::default();
    for record in store.records() {
        let key = GroupKey::from_record(record, &TRIPLE_SPEC);
        if seen.insert(key.clone()) {
            order.push(key);
        }
    }

    #[cfg(feature = "rayon")]
    let fits: Vec<Option<ComplexityEstimate>> = order
        .par_iter()
        .map(|key| estimate_for_key(store, key))
        .collect();

    #[cfg(not(feature = "rayon"))]
    let fits: Vec<Option<ComplexityEstimate>> = order
        .iter()
        .map(|key| estimate_for_key(store, key))
        .collect();

    let estimates: Vec<(GroupKey, ComplexityEstimate)> = order
        .into_iter()
        .zip(fits)
        .filter_map(|(key, fit)| fit.map(|f| (key, f)))
        .collect();

    debug!(
        groups = seen.len(),
        estimated = estimates.len(),
        "complexity sweep complete"
    );
    estimates
}

fn estimate_for_key(store: &RecordStore, key: &GroupKey) -> Option<ComplexityEstimate> {
    // Per-size mean times, restricted to this triple
    let mut by_size: FxHashMap<u64, Welford> = FxHashMap::default();
    for record in store.matching(key) {
        by_size.entry(record.size()).or_default().push(record.time());
    }

    if by_size.len() < MIN_DISTINCT_SIZES {
        return None;
    }

    let mut points: Vec<(u64, f64)> = by_size
        .iter()
        .map(|(&size, acc)| (size, acc.mean()))
        .collect();
    points.sort_unstable_by_key(|&(size, _)| size);

    // ln(0) is undefined: a single zero mean excludes the whole group
    if points.iter().any(|&(_, mean)| mean <= 0.0) {
        return None;
    }

    #[allow(clippy::cast_precision_loss)]
    let xs: Vec<f64> = points.iter().map(|&(size, _)| (size as f64).ln()).collect();
    let ys: Vec<f64> = points.iter().map(|&(_, mean)| mean.ln()).collect();

    let fit = fit_ols(&xs, &ys)?;
    Some(ComplexityEstimate {
        exponent: fit.slope(),
        r_squared: fit.r_squared(),
        sample_count: points.len(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::BenchmarkRecord;

    fn store_with(records: Vec<BenchmarkRecord>) -> RecordStore {
        let mut store = RecordStore::new();
        store.ingest(records).unwrap();
        store
    }

    #[test]
    fn test_linear_growth_reads_as_exponent_one() {
        let store = store_with(vec![
            BenchmarkRecord::new("radix", "-O0", "int", 100, 0.01),
            BenchmarkRecord::new("radix", "-O0", "int", 1_000, 0.1),
            BenchmarkRecord::new("radix", "-O0", "int", 10_000, 1.0),
        ]);

        let fit = estimate(&store, "radix", "-O0", "int").unwrap();
        assert!((fit.exponent() - 1.0).abs() < 1e-9);
        assert!((fit.r_squared() - 1.0).abs() < 1e-9);
        assert_eq!(fit.sample_count(), 3);
    }

    #[test]
    fn test_quadratic_growth() {
        // time = 1e-8 * n^2
        let store = store_with(
            [100u64, 1_000, 10_000]
                .iter()
                .map(|&n| {
                    #[allow(clippy::cast_precision_loss)]
                    let t = 1e-8 * (n as f64) * (n as f64);
                    BenchmarkRecord::new("bubble", "-O0", "int", n, t)
                })
                .collect(),
        );

        let fit = estimate(&store, "bubble", "-O0", "int").unwrap();
        assert!((fit.exponent() - 2.0).abs() < 1e-9);
    }

    #[test]
    fn test_too_few_sizes_is_absent() {
        let store = store_with(vec![
            BenchmarkRecord::new("heap", "-O2", "int", 100, 0.01),
            BenchmarkRecord::new("heap", "-O2", "int", 1_000, 0.1),
        ]);
        assert!(estimate(&store, "heap", "-O2", "int").is_none());
    }

    #[test]
    fn test_zero_mean_excludes_group() {
        let store = store_with(vec![
            BenchmarkRecord::new("heap", "-O2", "int", 100, 0.0),
            BenchmarkRecord::new("heap", "-O2", "int", 1_000, 0.1),
            BenchmarkRecord::new("heap", "-O2", "int", 10_000, 1.0),
        ]);
        // The 0.0 mean at size 100 poisons the logarithm; excluded, not clamped
        assert!(estimate(&store, "heap", "-O2", "int").is_none());
    }

    #[test]
    fn test_repeated_measurements_use_per_size_means() {
        let store = store_with(vec![
            BenchmarkRecord::new("radix", "-O0", "int", 100, 0.009),
            BenchmarkRecord::new("radix", "-O0", "int", 100, 0.011),
            BenchmarkRecord::new("radix", "-O0", "int", 1_000, 0.09),
            BenchmarkRecord::new("radix", "-O0", "int", 1_000, 0.11),
            BenchmarkRecord::new("radix", "-O0", "int", 10_000, 1.0),
        ]);

        let fit = estimate(&store, "radix", "-O0", "int").unwrap();
        assert!((fit.exponent() - 1.0).abs() < 1e-9);
        assert_eq!(fit.sample_count(), 3);
    }

    #[test]
    fn test_estimate_all_skips_sparse_groups() {
        let store = store_with(vec![
            BenchmarkRecord::new("radix", "-O0", "int", 100, 0.01),
            BenchmarkRecord::new("radix", "-O0", "int", 1_000, 0.1),
            BenchmarkRecord::new("radix", "-O0", "int", 10_000, 1.0),
            BenchmarkRecord::new("heap", "-O2", "int", 100, 0.01),
        ]);

        let estimates = estimate_all(&store);
        assert_eq!(estimates.len(), 1);
        assert_eq!(estimates[0].0.algorithm(), Some("radix"));
    }

    #[test]
    fn test_estimate_all_first_seen_order() {
        let mut records = Vec::new();
        for algo in ["quick_median", "merge_serial", "heap"] {
            for &size in &[100u64, 1_000, 10_000] {
                #[allow(clippy::cast_precision_loss)]
                let t = 1e-6 * size as f64;
                records.push(BenchmarkRecord::new(algo, "-O2", "int", size, t));
            }
        }
        let store = store_with(records);

        let names: Vec<_> = estimate_all(&store)
            .iter()
            .map(|(k, _)| k.algorithm().unwrap().to_string())
            .collect();
        assert_eq!(names, vec!["quick_median", "merge_serial", "heap"]);
    }
}

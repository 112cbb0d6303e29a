//! Ranked selection over group summaries
//!
//! `ORDER BY metric LIMIT n` over a [`Summaries`] table: stable sort on the
//! requested metric, ties keep the original grouping-key order, truncate to
//! the requested depth. Serialization and printing are the caller's
//! concern; this module performs no I/O.

use serde::Serialize;

use crate::aggregate::{GroupKey, Summaries};

/// Sort order for ranking
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum SortOrder {
    /// Ascending order (smallest values first, e.g. fastest groups)
    Ascending,
    /// Descending order (largest values first)
    Descending,
}

/// Summary metric to rank by
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Metric {
    /// Mean elapsed time
    MeanTime,
    /// Sample standard deviation of elapsed time
    StdDev,
    /// Number of records in the group
    Count,
}

impl Metric {
    fn extract(self, summary: &crate::aggregate::GroupSummary) -> f64 {
        match self {
            Self::MeanTime => summary.mean_time(),
            Self::StdDev => summary.std_dev(),
            #[allow(clippy::cast_precision_loss)]
            Self::Count => summary.count() as f64,
        }
    }
}

/// Rank groups by a summary metric and return the top `n`.
///
/// The sort is stable: groups with equal metric values keep their original
/// (first-seen) order. NaN metric values - e.g. the std of a singleton
/// group - sort after all numbers in either direction, so groups with
/// insufficient data never outrank measured ones. `n` may exceed the group
/// count; all available groups are returned, never padded.
#[must_use]
pub fn rank(
    summaries: &Summaries,
    metric: Metric,
    n: usize,
    order: SortOrder,
) -> Vec<(GroupKey, f64)> {
    let mut entries: Vec<(GroupKey, f64)> = summaries
        .iter()
        .map(|(key, summary)| (key.clone(), metric.extract(summary)))
        .collect();

    entries.sort_by(|(_, a), (_, b)| {
        match (a.is_nan(), b.is_nan()) {
            (true, true) => std::cmp::Ordering::Equal,
            (true, false) => std::cmp::Ordering::Greater,
            (false, true) => std::cmp::Ordering::Less,
            (false, false) => {
                let ordering = a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal);
                match order {
                    SortOrder::Ascending => ordering,
                    SortOrder::Descending => ordering.reverse(),
                }
            }
        }
    });

    entries.truncate(n);
    entries
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregate::{summarize, Field, KeySpec};
    use crate::record::{BenchmarkRecord, RecordStore};

    fn summaries() -> Summaries {
        let mut store = RecordStore::new();
        store
            .ingest(vec![
                BenchmarkRecord::new("bubble", "-O2", "int", 1_000, 0.9),
                BenchmarkRecord::new("bubble", "-O2", "int", 1_000, 1.1),
                BenchmarkRecord::new("heap", "-O2", "int", 1_000, 0.2),
                BenchmarkRecord::new("heap", "-O2", "int", 1_000, 0.2),
                BenchmarkRecord::new("quick_basic", "-O2", "int", 1_000, 0.1),
                BenchmarkRecord::new("quick_basic", "-O2", "int", 1_000, 0.3),
                BenchmarkRecord::new("merge_serial", "-O2", "int", 1_000, 0.4),
                BenchmarkRecord::new("radix", "-O2", "int", 1_000, 0.05),
            ])
            .unwrap();
        summarize(&store, &KeySpec::new(&[Field::Algorithm]))
    }

    #[test]
    fn test_rank_ascending_by_mean() {
        let ranked = rank(&summaries(), Metric::MeanTime, 3, SortOrder::Ascending);
        let names: Vec<_> = ranked
            .iter()
            .map(|(k, _)| k.algorithm().unwrap().to_string())
            .collect();
        assert_eq!(names, vec!["radix", "heap", "quick_basic"]);
    }

    #[test]
    fn test_rank_descending_by_mean() {
        let ranked = rank(&summaries(), Metric::MeanTime, 2, SortOrder::Descending);
        assert_eq!(ranked[0].0.algorithm(), Some("bubble"));
        assert!((ranked[0].1 - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_rank_n_exceeds_groups() {
        let ranked = rank(&summaries(), Metric::MeanTime, 1_000, SortOrder::Ascending);
        assert_eq!(ranked.len(), 5);
    }

    #[test]
    fn test_rank_nan_sorts_last_in_both_directions() {
        // merge_serial is a singleton group: std is NaN
        let ranked = rank(&summaries(), Metric::StdDev, 1_000, SortOrder::Descending);
        assert_eq!(ranked.last().unwrap().0.algorithm(), Some("merge_serial"));

        let ranked = rank(&summaries(), Metric::StdDev, 1_000, SortOrder::Ascending);
        assert_eq!(ranked.last().unwrap().0.algorithm(), Some("merge_serial"));
    }

    #[test]
    fn test_rank_ties_keep_first_seen_order() {
        let mut store = RecordStore::new();
        store
            .ingest(vec![
                BenchmarkRecord::new("gamma", "-O2", "int", 1_000, 0.5),
                BenchmarkRecord::new("alpha", "-O2", "int", 1_000, 0.5),
                BenchmarkRecord::new("beta", "-O2", "int", 1_000, 0.5),
            ])
            .unwrap();
        let summaries = summarize(&store, &KeySpec::new(&[Field::Algorithm]));

        let ranked = rank(&summaries, Metric::MeanTime, 3, SortOrder::Ascending);
        let names: Vec<_> = ranked
            .iter()
            .map(|(k, _)| k.algorithm().unwrap().to_string())
            .collect();
        assert_eq!(names, vec!["gamma", "alpha", "beta"]);
    }

    #[test]
    fn test_rank_by_count() {
        let ranked = rank(&summaries(), Metric::Count, 1, SortOrder::Descending);
        // bubble, heap and quick_basic all have 2 records; bubble was first
        assert_eq!(ranked[0].0.algorithm(), Some("bubble"));
        assert!((ranked[0].1 - 2.0).abs() < f64::EPSILON);
    }
}

//! Group summaries and the insertion-ordered summary collection

use rustc_hash::FxHashMap;
use serde::Serialize;

use super::{GroupKey, Welford};

/// Summary statistics for the records sharing one [`GroupKey`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct GroupSummary {
    count: usize,
    mean_time: f64,
    std_dev: f64,
}

impl GroupSummary {
    /// Build a summary from a finished accumulator.
    #[must_use]
    pub fn from_accumulator(acc: &Welford) -> Self {
        Self {
            count: acc.count(),
            mean_time: acc.mean(),
            std_dev: acc.sample_std(),
        }
    }

    /// Number of records in the group.
    #[must_use]
    pub const fn count(&self) -> usize {
        self.count
    }

    /// Mean elapsed time in seconds.
    #[must_use]
    pub const fn mean_time(&self) -> f64 {
        self.mean_time
    }

    /// Sample standard deviation of the elapsed times.
    ///
    /// NaN when the group holds fewer than two records; callers must treat
    /// NaN as "insufficient data", never as zero variance.
    #[must_use]
    pub const fn std_dev(&self) -> f64 {
        self.std_dev
    }
}

/// Mapping from [`GroupKey`] to [`GroupSummary`] that preserves first-seen
/// group order for display.
///
/// Lookup is O(1) via an `FxHashMap` index; iteration follows the order in
/// which groups first appeared in the record stream.
#[derive(Debug, Default)]
pub struct Summaries {
    order: Vec<GroupKey>,
    map: FxHashMap<GroupKey, GroupSummary>,
}

impl Summaries {
    pub(crate) fn with_capacity(capacity: usize) -> Self {
        Self {
            order: Vec::with_capacity(capacity),
            map: FxHashMap::default(),
        }
    }

    pub(crate) fn insert(&mut self, key: GroupKey, summary: GroupSummary) {
        if self.map.insert(key.clone(), summary).is_none() {
            self.order.push(key);
        }
    }

    /// Number of groups.
    #[must_use]
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// Check if there are no groups.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Look up one group's summary.
    #[must_use]
    pub fn get(&self, key: &GroupKey) -> Option<&GroupSummary> {
        self.map.get(key)
    }

    /// Iterate groups in first-seen order.
    pub fn iter(&self) -> impl Iterator<Item = (&GroupKey, &GroupSummary)> + '_ {
        self.order.iter().map(move |key| (key, &self.map[key]))
    }

    /// Iterate group keys in first-seen order.
    pub fn keys(&self) -> impl Iterator<Item = &GroupKey> + '_ {
        self.order.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregate::KeySpec;
    use crate::record::BenchmarkRecord;

    fn key(algorithm: &str) -> GroupKey {
        GroupKey::from_record(
            &BenchmarkRecord::new(algorithm, "-O0", "int", 1, 0.0),
            &KeySpec::new(&[crate::aggregate::Field::Algorithm]),
        )
    }

    fn summary(count: usize, values: &[f64]) -> GroupSummary {
        let mut acc = Welford::new();
        for &v in values {
            acc.push(v);
        }
        assert_eq!(acc.count(), count);
        GroupSummary::from_accumulator(&acc)
    }

    #[test]
    fn test_insert_preserves_order() {
        let mut summaries = Summaries::with_capacity(2);
        summaries.insert(key("zeta"), summary(1, &[0.5]));
        summaries.insert(key("alpha"), summary(2, &[0.1, 0.2]));

        let names: Vec<_> = summaries
            .keys()
            .map(|k| k.algorithm().unwrap().to_string())
            .collect();
        assert_eq!(names, vec!["zeta", "alpha"]);
    }

    #[test]
    fn test_get_by_key() {
        let mut summaries = Summaries::with_capacity(1);
        summaries.insert(key("heap"), summary(2, &[0.1, 0.3]));

        let found = summaries.get(&key("heap")).unwrap();
        assert_eq!(found.count(), 2);
        assert!((found.mean_time() - 0.2).abs() < 1e-12);
        assert!(summaries.get(&key("bubble")).is_none());
    }

    #[test]
    fn test_reinsert_does_not_duplicate_order() {
        let mut summaries = Summaries::with_capacity(1);
        summaries.insert(key("heap"), summary(1, &[0.1]));
        summaries.insert(key("heap"), summary(2, &[0.1, 0.2]));
        assert_eq!(summaries.len(), 1);
        assert_eq!(summaries.get(&key("heap")).unwrap().count(), 2);
    }
}

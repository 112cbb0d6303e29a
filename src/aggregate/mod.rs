//! Grouped aggregation of benchmark records
//!
//! Partitions the record set by a caller-selected key tuple and reduces
//! each partition to summary statistics (count, mean, sample standard
//! deviation) in a single pass.
//!
//! ## Determinism
//!
//! For a fixed store and key spec the output is exactly reproducible: the
//! per-group arithmetic consumes records in ingestion order, and the
//! resulting [`Summaries`] iterate groups in first-seen order for display.
//!
//! ## Usage
//!
//! ```rust
//! use medir::aggregate::{summarize, Field, KeySpec};
//! use medir::record::{BenchmarkRecord, RecordStore};
//!
//! let mut store = RecordStore::new();
//! store.ingest([
//!     BenchmarkRecord::new("heap", "-O2", "int", 1_000, 0.010),
//!     BenchmarkRecord::new("heap", "-O2", "int", 1_000, 0.012),
//! ])?;
//!
//! let summaries = summarize(&store, &KeySpec::new(&[Field::Algorithm, Field::Size]));
//! let (_, summary) = summaries.iter().next().unwrap();
//! assert_eq!(summary.count(), 2);
//! assert!((summary.mean_time() - 0.011).abs() < 1e-12);
//! # Ok::<(), medir::Error>(())
//! ```

mod key;
mod summary;
mod welford;

pub use key::{Field, GroupKey, KeySpec};
pub use summary::{GroupSummary, Summaries};
pub use welford::Welford;

use rustc_hash::FxHashMap;
use tracing::debug;

use crate::record::RecordStore;

/// Partition the store by `spec` and reduce each partition to a
/// [`GroupSummary`].
///
/// A partition holding a single record reports `std_dev = NaN`: the sample
/// standard deviation of one observation is undefined, and callers must
/// treat NaN as "insufficient data", not zero variance.
#[must_use]
pub fn summarize(store: &RecordStore, spec: &KeySpec) -> Summaries {
    let mut order: Vec<GroupKey> = Vec::new();
    let mut accumulators: FxHashMap<GroupKey, Welford> = FxHashMap::default();

    for record in store.records() {
        let key = GroupKey::from_record(record, spec);
        accumulators
            .entry(key.clone())
            .or_insert_with(|| {
                order.push(key);
                Welford::new()
            })
            .push(record.time());
    }

    debug!(
        records = store.len(),
        groups = order.len(),
        "summarized record store"
    );

    let mut summaries = Summaries::with_capacity(order.len());
    for key in order {
        let welford = &accumulators[&key];
        summaries.insert(key, GroupSummary::from_accumulator(welford));
    }
    summaries
}

//! Relative speedup between paired configurations
//!
//! Pairs a baseline group with a treatment group that differ in exactly one
//! dimension (optimization level, algorithm variant, or data type) while
//! every other grouping field is held equal, and reports
//! `speedup = baseline_mean / treatment_mean` per pairing.
//!
//! A pairing is skipped - not zeroed - when either side is missing, either
//! mean is NaN, or either mean is zero (division guard). Emission follows
//! baseline grouping order; ranking is the caller's concern.
//!
//! ## Usage
//!
//! ```rust
//! use medir::record::{BenchmarkRecord, RecordStore};
//! use medir::speedup::{speedups, Dimension, SpeedupSpec};
//!
//! let mut store = RecordStore::new();
//! store.ingest([
//!     BenchmarkRecord::new("merge_serial", "-O2", "int", 1_000, 0.08),
//!     BenchmarkRecord::new("merge_parallel", "-O2", "int", 1_000, 0.02),
//! ])?;
//!
//! let spec = SpeedupSpec::new(Dimension::Algorithm, "merge_serial", "merge_parallel");
//! let samples = speedups(&store, &spec)?;
//! assert!((samples[0].speedup() - 4.0).abs() < 1e-12);
//! # Ok::<(), medir::Error>(())
//! ```

use rustc_hash::FxHashMap;
use serde::Serialize;
use tracing::debug;

use crate::aggregate::{Field, GroupKey, KeySpec, Welford};
use crate::error::{Error, Result};
use crate::record::{BenchmarkRecord, RecordStore};

/// The record field that varies between baseline and treatment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dimension {
    /// Compare algorithm variants (e.g., serial vs parallel merge sort)
    Algorithm,
    /// Compare build configurations (e.g., -O0 vs -O3)
    Optimization,
    /// Compare value domains (e.g., int vs double)
    DataType,
}

impl Dimension {
    /// The grouping field this dimension corresponds to.
    #[must_use]
    pub const fn field(self) -> Field {
        match self {
            Self::Algorithm => Field::Algorithm,
            Self::Optimization => Field::Optimization,
            Self::DataType => Field::DataType,
        }
    }

    fn value_of(self, record: &BenchmarkRecord) -> &str {
        match self {
            Self::Algorithm => record.algorithm(),
            Self::Optimization => record.optimization(),
            Self::DataType => record.data_type(),
        }
    }
}

/// One baseline/treatment comparison request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpeedupSpec {
    dimension: Dimension,
    baseline: String,
    treatment: String,
    group_by: KeySpec,
}

impl SpeedupSpec {
    /// Compare `baseline` against `treatment` along `dimension`, holding
    /// every other grouping field equal.
    #[must_use]
    pub fn new(
        dimension: Dimension,
        baseline: impl Into<String>,
        treatment: impl Into<String>,
    ) -> Self {
        Self {
            dimension,
            baseline: baseline.into(),
            treatment: treatment.into(),
            group_by: KeySpec::FULL.without(dimension.field()),
        }
    }

    /// Override the held-equal fields (e.g., drop `Size` to compare means
    /// pooled across sizes). Must not contain the varied dimension.
    #[must_use]
    pub const fn group_by(mut self, spec: KeySpec) -> Self {
        self.group_by = spec;
        self
    }

    /// The varied dimension.
    #[must_use]
    pub const fn dimension(&self) -> Dimension {
        self.dimension
    }

    /// The baseline value of the varied dimension.
    #[must_use]
    pub fn baseline(&self) -> &str {
        &self.baseline
    }

    /// The treatment value of the varied dimension.
    #[must_use]
    pub fn treatment(&self) -> &str {
        &self.treatment
    }
}

/// One emitted speedup pairing.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SpeedupSample {
    key: GroupKey,
    baseline_mean: f64,
    treatment_mean: f64,
    speedup: f64,
}

impl SpeedupSample {
    /// The held-equal grouping key both sides share.
    #[must_use]
    pub const fn key(&self) -> &GroupKey {
        &self.key
    }

    /// Baseline mean time in seconds.
    #[must_use]
    pub const fn baseline_mean(&self) -> f64 {
        self.baseline_mean
    }

    /// Treatment mean time in seconds.
    #[must_use]
    pub const fn treatment_mean(&self) -> f64 {
        self.treatment_mean
    }

    /// `baseline_mean / treatment_mean`; above 1.0 means the treatment is
    /// faster.
    #[must_use]
    pub const fn speedup(&self) -> f64 {
        self.speedup
    }
}

/// Compute speedup samples for every held-equal field combination present
/// in the baseline data.
///
/// # Errors
///
/// Returns [`Error::InvalidInput`] when the held-equal spec contains the
/// varied dimension itself.
pub fn speedups(store: &RecordStore, spec: &SpeedupSpec) -> Result<Vec<SpeedupSample>> {
    if spec.group_by.contains(spec.dimension.field()) {
        return Err(Error::InvalidInput(format!(
            "held-equal fields must not contain the varied dimension {:?}",
            spec.dimension
        )));
    }

    let mut order: Vec<GroupKey> = Vec::new();
    let mut baseline: FxHashMap<GroupKey, Welford> = FxHashMap::default();
    let mut treatment: FxHashMap<GroupKey, Welford> = FxHashMap::default();

    for record in store.records() {
        let value = spec.dimension.value_of(record);
        let side = if value == spec.baseline {
            &mut baseline
        } else if value == spec.treatment {
            &mut treatment
        } else {
            continue;
        };

        let key = GroupKey::from_record(record, &spec.group_by);
        side.entry(key.clone())
            .or_insert_with(|| {
                if value == spec.baseline {
                    order.push(key);
                }
                Welford::new()
            })
            .push(record.time());
    }

    let mut samples = Vec::new();
    for key in order {
        let Some(base_acc) = baseline.get(&key) else {
            continue;
        };
        let Some(treat_acc) = treatment.get(&key) else {
            continue;
        };

        let baseline_mean = base_acc.mean();
        let treatment_mean = treat_acc.mean();
        // Division guard: both means must be finite and strictly positive
        if !baseline_mean.is_finite()
            || !treatment_mean.is_finite()
            || baseline_mean <= 0.0
            || treatment_mean <= 0.0
        {
            continue;
        }

        samples.push(SpeedupSample {
            key,
            baseline_mean,
            treatment_mean,
            speedup: baseline_mean / treatment_mean,
        });
    }

    debug!(
        baseline = spec.baseline.as_str(),
        treatment = spec.treatment.as_str(),
        emitted = samples.len(),
        "speedup pairing complete"
    );
    Ok(samples)
}

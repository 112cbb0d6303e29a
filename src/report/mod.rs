//! Derived output tables and report assembly
//!
//! Runs the whole analysis pipeline over one sealed store snapshot and
//! collects the derived tables external collaborators consume: group
//! summaries, complexity estimates, speedup samples, and an overall
//! per-algorithm ranking. Every row type is serde-serializable; writing a
//! particular file format (CSV, JSON, charts) is the collaborator's
//! responsibility, and the plain-text rendering returns a `String` rather
//! than printing.

use std::fmt::Write as _;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::debug;

use crate::aggregate::{summarize, Field, GroupKey, GroupSummary, KeySpec};
use crate::complexity::{estimate_all, ComplexityEstimate, ComplexityLabeler};
use crate::error::Result;
use crate::rank::{rank, Metric, SortOrder};
use crate::record::RecordStore;
use crate::speedup::{speedups, SpeedupSample, SpeedupSpec};

/// One group-summary output row.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SummaryRow {
    /// Algorithm, when part of the grouping key
    pub algorithm: Option<String>,
    /// Optimization configuration, when part of the grouping key
    pub optimization: Option<String>,
    /// Data type, when part of the grouping key
    pub data_type: Option<String>,
    /// Size, when part of the grouping key
    pub size: Option<u64>,
    /// Number of records in the group
    pub count: usize,
    /// Mean elapsed time in seconds
    pub mean_time: f64,
    /// Sample standard deviation (NaN when count < 2)
    pub std_dev: f64,
}

impl SummaryRow {
    fn new(key: &GroupKey, summary: &GroupSummary) -> Self {
        Self {
            algorithm: key.algorithm().map(ToString::to_string),
            optimization: key.optimization().map(ToString::to_string),
            data_type: key.data_type().map(ToString::to_string),
            size: key.size(),
            count: summary.count(),
            mean_time: summary.mean_time(),
            std_dev: summary.std_dev(),
        }
    }
}

/// One complexity-estimate output row.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ComplexityRow {
    /// Algorithm identifier
    pub algorithm: String,
    /// Optimization configuration identifier
    pub optimization: String,
    /// Data-type identifier
    pub data_type: String,
    /// Empirical complexity exponent (log-log regression slope)
    pub exponent: f64,
    /// Goodness of fit in [0, 1]
    pub r_squared: f64,
    /// Number of distinct sizes used by the fit
    pub sample_count: usize,
}

impl ComplexityRow {
    fn new(key: &GroupKey, estimate: &ComplexityEstimate) -> Self {
        Self {
            algorithm: key.algorithm().unwrap_or_default().to_string(),
            optimization: key.optimization().unwrap_or_default().to_string(),
            data_type: key.data_type().unwrap_or_default().to_string(),
            exponent: estimate.exponent(),
            r_squared: estimate.r_squared(),
            sample_count: estimate.sample_count(),
        }
    }
}

/// One speedup output row.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SpeedupRow {
    /// Baseline value of the varied dimension
    pub baseline: String,
    /// Treatment value of the varied dimension
    pub treatment: String,
    /// Held-equal algorithm, when grouped on
    pub algorithm: Option<String>,
    /// Held-equal optimization, when grouped on
    pub optimization: Option<String>,
    /// Held-equal data type, when grouped on
    pub data_type: Option<String>,
    /// Held-equal size, when grouped on
    pub size: Option<u64>,
    /// Baseline mean time in seconds
    pub baseline_mean: f64,
    /// Treatment mean time in seconds
    pub treatment_mean: f64,
    /// Speedup ratio (baseline / treatment)
    pub speedup: f64,
}

impl SpeedupRow {
    fn new(spec: &SpeedupSpec, sample: &SpeedupSample) -> Self {
        let key = sample.key();
        Self {
            baseline: spec.baseline().to_string(),
            treatment: spec.treatment().to_string(),
            algorithm: key.algorithm().map(ToString::to_string),
            optimization: key.optimization().map(ToString::to_string),
            data_type: key.data_type().map(ToString::to_string),
            size: key.size(),
            baseline_mean: sample.baseline_mean(),
            treatment_mean: sample.treatment_mean(),
            speedup: sample.speedup(),
        }
    }
}

/// One overall-ranking row (per-algorithm mean time, fastest first).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankingRow {
    /// Algorithm identifier
    pub algorithm: String,
    /// Mean time across every record of the algorithm
    pub mean_time: f64,
}

/// Configuration for one report build.
#[derive(Debug, Clone)]
pub struct AnalysisConfig {
    summary_key: KeySpec,
    comparisons: Vec<SpeedupSpec>,
    labeler: ComplexityLabeler,
    ranking_depth: usize,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            summary_key: KeySpec::FULL,
            comparisons: Vec::new(),
            labeler: ComplexityLabeler::default(),
            ranking_depth: 10,
        }
    }
}

impl AnalysisConfig {
    /// Create a config with defaults: full summary key, no comparisons,
    /// canonical label bands, ranking depth 10.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the grouping key for the summary table.
    #[must_use]
    pub const fn summary_key(mut self, spec: KeySpec) -> Self {
        self.summary_key = spec;
        self
    }

    /// Add a speedup comparison to the report.
    #[must_use]
    pub fn comparison(mut self, spec: SpeedupSpec) -> Self {
        self.comparisons.push(spec);
        self
    }

    /// Replace the complexity labeling policy.
    #[must_use]
    pub fn labeler(mut self, labeler: ComplexityLabeler) -> Self {
        self.labeler = labeler;
        self
    }

    /// Set how many algorithms the overall ranking keeps.
    #[must_use]
    pub const fn ranking_depth(mut self, depth: usize) -> Self {
        self.ranking_depth = depth;
        self
    }
}

/// Full analysis over one store snapshot: the three derived tables plus the
/// overall ranking, stamped with the build time.
#[derive(Debug, Clone, Serialize)]
pub struct AnalysisReport {
    generated_at: DateTime<Utc>,
    record_count: usize,
    summaries: Vec<SummaryRow>,
    ranking: Vec<RankingRow>,
    estimates: Vec<ComplexityRow>,
    speedups: Vec<SpeedupRow>,
}

impl AnalysisReport {
    /// Run the pipeline and assemble the report.
    ///
    /// An empty store produces a report with empty tables; sparse groups
    /// are skipped by the estimator and the pairing guard as usual.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::InvalidInput`] when a configured comparison
    /// holds its own varied dimension equal.
    pub fn build(store: &RecordStore, config: &AnalysisConfig) -> Result<Self> {
        let summaries: Vec<SummaryRow> = summarize(store, &config.summary_key)
            .iter()
            .map(|(key, summary)| SummaryRow::new(key, summary))
            .collect();

        let by_algorithm = summarize(store, &KeySpec::new(&[Field::Algorithm]));
        let ranking: Vec<RankingRow> = rank(
            &by_algorithm,
            Metric::MeanTime,
            config.ranking_depth,
            SortOrder::Ascending,
        )
        .into_iter()
        .map(|(key, mean_time)| RankingRow {
            algorithm: key.algorithm().unwrap_or_default().to_string(),
            mean_time,
        })
        .collect();

        let estimates: Vec<ComplexityRow> = estimate_all(store)
            .iter()
            .map(|(key, estimate)| ComplexityRow::new(key, estimate))
            .collect();

        let mut speedup_rows: Vec<SpeedupRow> = Vec::new();
        for spec in &config.comparisons {
            for sample in speedups(store, spec)? {
                speedup_rows.push(SpeedupRow::new(spec, &sample));
            }
        }

        debug!(
            summaries = summaries.len(),
            estimates = estimates.len(),
            speedups = speedup_rows.len(),
            "analysis report assembled"
        );

        Ok(Self {
            generated_at: Utc::now(),
            record_count: store.len(),
            summaries,
            ranking,
            estimates,
            speedups: speedup_rows,
        })
    }

    /// When the report was built.
    #[must_use]
    pub const fn generated_at(&self) -> DateTime<Utc> {
        self.generated_at
    }

    /// Number of accepted records the report covers.
    #[must_use]
    pub const fn record_count(&self) -> usize {
        self.record_count
    }

    /// Group-summary table.
    #[must_use]
    pub fn summaries(&self) -> &[SummaryRow] {
        &self.summaries
    }

    /// Overall per-algorithm ranking, fastest first.
    #[must_use]
    pub fn ranking(&self) -> &[RankingRow] {
        &self.ranking
    }

    /// Complexity-estimate table.
    #[must_use]
    pub fn estimates(&self) -> &[ComplexityRow] {
        &self.estimates
    }

    /// Speedup table.
    #[must_use]
    pub fn speedups(&self) -> &[SpeedupRow] {
        &self.speedups
    }

    /// Render the report as plain text.
    ///
    /// The labeler turns fitted exponents into class names; pass
    /// [`ComplexityLabeler::default`] for the canonical bands.
    #[must_use]
    pub fn render_text(&self, labeler: &ComplexityLabeler) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "=== Benchmark Analysis Report ===");
        let _ = writeln!(out, "records analyzed: {}", self.record_count);

        if !self.ranking.is_empty() {
            let _ = writeln!(out, "\nOverall Performance Ranking (mean time):");
            for (position, row) in self.ranking.iter().enumerate() {
                let _ = writeln!(
                    out,
                    "{:2}. {:<20} {:.6}s",
                    position + 1,
                    row.algorithm,
                    row.mean_time
                );
            }
        }

        if !self.estimates.is_empty() {
            let _ = writeln!(out, "\nEmpirical Time Complexity:");
            for row in &self.estimates {
                let _ = writeln!(
                    out,
                    "{:<20} ({:<6}, {:<6}): O(n^{:.3}), inferred {}, R^2={:.3}",
                    row.algorithm,
                    row.optimization,
                    row.data_type,
                    row.exponent,
                    labeler.label(row.exponent),
                    row.r_squared
                );
            }
        }

        if !self.speedups.is_empty() {
            let _ = writeln!(out, "\nSpeedups:");
            for row in &self.speedups {
                let mut held: Vec<String> = Vec::new();
                if let Some(a) = &row.algorithm {
                    held.push(a.clone());
                }
                if let Some(o) = &row.optimization {
                    held.push(o.clone());
                }
                if let Some(d) = &row.data_type {
                    held.push(d.clone());
                }
                if let Some(s) = row.size {
                    held.push(s.to_string());
                }
                let _ = writeln!(
                    out,
                    "{} -> {} [{}]: {:.2}x",
                    row.baseline,
                    row.treatment,
                    held.join("/"),
                    row.speedup
                );
            }
        }

        out
    }
}

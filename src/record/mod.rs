//! Benchmark Record Schema and Store
//!
//! This module provides the ingestion layer of the analysis engine: the
//! validated record type and the in-memory store one analysis run operates
//! on.
//!
//! ## Schema Overview
//!
//! ```text
//! RecordStore (1) ──< BenchmarkRecord (N)
//!                         │
//!                         └── {algorithm, optimization, data_type, size, time}
//! ```
//!
//! ## Usage
//!
//! ```rust
//! use medir::record::{BenchmarkRecord, RecordStore};
//!
//! let mut store = RecordStore::new();
//! let report = store.ingest([
//!     BenchmarkRecord::new("merge_serial", "-O2", "int", 1_000, 0.004),
//!     BenchmarkRecord::new("merge_serial", "-O2", "int", 0, 0.004), // rejected
//! ])?;
//!
//! assert_eq!(report.accepted(), 1);
//! assert_eq!(report.rejected().len(), 1);
//!
//! // Freeze the store for the analysis run
//! store.seal();
//! # Ok::<(), medir::Error>(())
//! ```

mod benchmark_record;
mod store;

pub use benchmark_record::BenchmarkRecord;
pub use store::{IngestReport, RecordStore, RejectedRecord};

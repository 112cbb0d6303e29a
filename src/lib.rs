//! # Medir: Benchmark Result Analysis Engine
//!
//! Medir ingests per-run benchmark timing records and derives aggregated
//! statistics, empirical time-complexity estimates, and relative-speedup
//! tables, ready for external reporting and plotting collaborators.
//!
//! ## Design Principles (Toyota Way Aligned)
//!
//! - **Jidoka**: validation at the ingestion gate; bad records are rejected,
//!   good records keep flowing
//! - **Genchi Genbutsu**: complexity classes are estimated from measured
//!   data (log-log regression), not assumed from theory
//! - **Muda elimination**: one pass over the record set per analysis stage
//!
//! ## Pipeline
//!
//! ```text
//! BenchmarkRecord* ──> RecordStore ──> summarize() ──┬──> estimate_all()
//!                                                    ├──> speedups()
//!                                                    └──> rank() / AnalysisReport
//! ```
//!
//! ## Example Usage
//!
//! ```rust
//! use medir::record::{BenchmarkRecord, RecordStore};
//! use medir::complexity::estimate;
//!
//! let mut store = RecordStore::new();
//! store.ingest([
//!     BenchmarkRecord::new("quick_basic", "-O2", "int", 100, 0.01),
//!     BenchmarkRecord::new("quick_basic", "-O2", "int", 1_000, 0.1),
//!     BenchmarkRecord::new("quick_basic", "-O2", "int", 10_000, 1.0),
//! ])?;
//!
//! let fit = estimate(&store, "quick_basic", "-O2", "int").unwrap();
//! assert!((fit.exponent() - 1.0).abs() < 1e-9);
//! # Ok::<(), medir::Error>(())
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]

pub mod aggregate;
pub mod complexity;
pub mod error;
pub mod rank;
pub mod record;
pub mod report;
pub mod speedup;

pub use error::{Error, Result, ValidationError};

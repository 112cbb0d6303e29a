//! Demo: build an analysis report from JSON benchmark records.
//!
//! Reads a JSON array of records (a path argument, or a built-in sample)
//! and prints the text report plus the complexity table as JSON.
//!
//! Run with: `cargo run --example complexity_report [records.json]`
//! Set `RUST_LOG=medir=debug` to watch the pipeline stages.

use anyhow::{Context, Result};
use medir::complexity::ComplexityLabeler;
use medir::record::{BenchmarkRecord, RecordStore};
use medir::report::{AnalysisConfig, AnalysisReport};
use medir::speedup::{Dimension, SpeedupSpec};
use tracing_subscriber::EnvFilter;

static SAMPLE: &str = r#"[
  {"algorithm": "quick_median", "optimization": "-O0", "data_type": "int", "size": 1000,   "time": 0.00021},
  {"algorithm": "quick_median", "optimization": "-O0", "data_type": "int", "size": 10000,  "time": 0.00254},
  {"algorithm": "quick_median", "optimization": "-O0", "data_type": "int", "size": 100000, "time": 0.03017},
  {"algorithm": "quick_median", "optimization": "-O3", "data_type": "int", "size": 1000,   "time": 0.00008},
  {"algorithm": "quick_median", "optimization": "-O3", "data_type": "int", "size": 10000,  "time": 0.00095},
  {"algorithm": "quick_median", "optimization": "-O3", "data_type": "int", "size": 100000, "time": 0.01122},
  {"algorithm": "bubble",       "optimization": "-O0", "data_type": "int", "size": 1000,   "time": 0.00282},
  {"algorithm": "bubble",       "optimization": "-O0", "data_type": "int", "size": 10000,  "time": 0.29147},
  {"algorithm": "bubble",       "optimization": "-O0", "data_type": "int", "size": 100000, "time": 30.55621},
  {"algorithm": "bubble",       "optimization": "-O3", "data_type": "int", "size": 1000,   "time": 0.00094},
  {"algorithm": "bubble",       "optimization": "-O3", "data_type": "int", "size": 10000,  "time": 0.09713},
  {"algorithm": "bubble",       "optimization": "-O3", "data_type": "int", "size": 100000, "time": 10.18412}
]"#;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let records: Vec<BenchmarkRecord> = match std::env::args().nth(1) {
        Some(path) => {
            let raw = std::fs::read_to_string(&path).with_context(|| format!("reading {path}"))?;
            serde_json::from_str(&raw).with_context(|| format!("decoding {path}"))?
        }
        None => serde_json::from_str(SAMPLE).context("decoding built-in sample")?,
    };

    let mut store = RecordStore::new();
    let ingest = store.ingest(records)?;
    if !ingest.is_clean() {
        eprintln!("dropped {} invalid record(s)", ingest.rejected().len());
    }
    store.seal();

    let config = AnalysisConfig::new()
        .comparison(SpeedupSpec::new(Dimension::Optimization, "-O0", "-O3"));
    let report = AnalysisReport::build(&store, &config)?;

    println!("{}", report.render_text(&ComplexityLabeler::default()));
    println!("complexity table as JSON:");
    println!("{}", serde_json::to_string_pretty(report.estimates())?);
    Ok(())
}

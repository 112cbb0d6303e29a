//! Benchmark Record - one measured run

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// Benchmark Record represents a single measured run.
///
/// One record is produced per (algorithm, optimization, data type, size)
/// execution; repeated runs of the same configuration produce multiple
/// records that the aggregator later reduces to summary statistics.
///
/// Records are immutable once ingested. The serialized field names match
/// the tabular input format exactly (`algorithm`, `optimization`,
/// `data_type`, `size`, `time`); unrecognized extra fields are ignored by
/// the decoder.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BenchmarkRecord {
    algorithm: String,
    optimization: String,
    data_type: String,
    size: u64,
    time: f64,
}

impl BenchmarkRecord {
    /// Create a new benchmark record.
    ///
    /// # Arguments
    ///
    /// * `algorithm` - Algorithm identifier (e.g., "quick_median")
    /// * `optimization` - Build configuration identifier (e.g., "-O2")
    /// * `data_type` - Value domain measured (e.g., "int", "double")
    /// * `size` - Number of elements processed
    /// * `time` - Elapsed seconds
    ///
    /// Validation happens at ingestion, not construction, so that a whole
    /// batch can be ingested with per-record accept/reject reporting.
    #[must_use]
    pub fn new(
        algorithm: impl Into<String>,
        optimization: impl Into<String>,
        data_type: impl Into<String>,
        size: u64,
        time: f64,
    ) -> Self {
        Self {
            algorithm: algorithm.into(),
            optimization: optimization.into(),
            data_type: data_type.into(),
            size,
            time,
        }
    }

    /// Check the record invariant: `size > 0`, `time >= 0` and finite.
    ///
    /// # Errors
    ///
    /// Returns the first violated [`ValidationError`] clause.
    pub fn validate(&self) -> std::result::Result<(), ValidationError> {
        if self.size == 0 {
            return Err(ValidationError::ZeroSize);
        }
        if self.time.is_nan() || self.time.is_infinite() {
            return Err(ValidationError::NonFiniteTime(self.time));
        }
        if self.time < 0.0 {
            return Err(ValidationError::NegativeTime(self.time));
        }
        Ok(())
    }

    /// Get the algorithm identifier.
    #[must_use]
    pub fn algorithm(&self) -> &str {
        &self.algorithm
    }

    /// Get the build/optimization configuration identifier.
    #[must_use]
    pub fn optimization(&self) -> &str {
        &self.optimization
    }

    /// Get the value-domain identifier.
    #[must_use]
    pub fn data_type(&self) -> &str {
        &self.data_type
    }

    /// Get the number of elements processed.
    #[must_use]
    pub const fn size(&self) -> u64 {
        self.size
    }

    /// Get the elapsed time in seconds.
    #[must_use]
    pub const fn time(&self) -> f64 {
        self.time
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_new() {
        let record = BenchmarkRecord::new("bubble", "-O0", "int", 1000, 0.25);
        assert_eq!(record.algorithm(), "bubble");
        assert_eq!(record.optimization(), "-O0");
        assert_eq!(record.data_type(), "int");
        assert_eq!(record.size(), 1000);
        assert!((record.time() - 0.25).abs() < f64::EPSILON);
    }

    #[test]
    fn test_record_validate_ok() {
        let record = BenchmarkRecord::new("bubble", "-O0", "int", 1, 0.0);
        assert!(record.validate().is_ok());
    }

    #[test]
    fn test_record_validate_zero_size() {
        let record = BenchmarkRecord::new("bubble", "-O0", "int", 0, 0.25);
        assert_eq!(record.validate(), Err(ValidationError::ZeroSize));
    }

    #[test]
    fn test_record_validate_negative_time() {
        let record = BenchmarkRecord::new("bubble", "-O0", "int", 10, -0.1);
        assert_eq!(record.validate(), Err(ValidationError::NegativeTime(-0.1)));
    }

    #[test]
    fn test_record_validate_nan_time() {
        let record = BenchmarkRecord::new("bubble", "-O0", "int", 10, f64::NAN);
        assert!(matches!(
            record.validate(),
            Err(ValidationError::NonFiniteTime(_))
        ));
    }

    #[test]
    fn test_record_deserialize_ignores_extra_fields() {
        let json = r#"{
            "algorithm": "heap",
            "optimization": "-O3",
            "data_type": "double",
            "size": 500,
            "time": 0.002,
            "host": "bench-runner-07"
        }"#;
        let record: BenchmarkRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.algorithm(), "heap");
        assert_eq!(record.size(), 500);
    }

    #[test]
    fn test_record_deserialize_missing_field_fails() {
        let json = r#"{"algorithm": "heap", "size": 500, "time": 0.002}"#;
        assert!(serde_json::from_str::<BenchmarkRecord>(json).is_err());
    }
}

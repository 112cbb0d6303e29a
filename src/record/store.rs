//! Record Store - in-memory storage for one analysis run
//!
//! The store owns the record collection exclusively for the duration of a
//! run. Ingestion is partial-success: invalid records are rejected and
//! reported, valid records keep flowing (Jidoka - stop the defect, not the
//! line). Once sealed, the store is read-only and every derived table is
//! computed from the same snapshot.

use tracing::{debug, warn};

use super::BenchmarkRecord;
use crate::aggregate::GroupKey;
use crate::error::{Error, Result, ValidationError};

/// In-memory store for validated benchmark records.
///
/// Records keep their ingestion order, which downstream grouping uses as
/// the display order for derived tables.
#[derive(Debug, Default)]
pub struct RecordStore {
    records: Vec<BenchmarkRecord>,
    sealed: bool,
}

/// One rejected record with the invariant clause it violated.
#[derive(Debug, Clone, PartialEq)]
pub struct RejectedRecord {
    index: usize,
    record: BenchmarkRecord,
    reason: ValidationError,
}

impl RejectedRecord {
    /// Position of the record in the ingested sequence.
    #[must_use]
    pub const fn index(&self) -> usize {
        self.index
    }

    /// The rejected record itself.
    #[must_use]
    pub const fn record(&self) -> &BenchmarkRecord {
        &self.record
    }

    /// The violated validation clause.
    #[must_use]
    pub const fn reason(&self) -> ValidationError {
        self.reason
    }
}

/// Outcome of one `ingest` call: how many records were accepted, and which
/// were rejected and why.
#[derive(Debug, Default)]
pub struct IngestReport {
    accepted: usize,
    rejected: Vec<RejectedRecord>,
}

impl IngestReport {
    /// Number of records accepted into the store.
    #[must_use]
    pub const fn accepted(&self) -> usize {
        self.accepted
    }

    /// Records rejected by validation, in input order.
    #[must_use]
    pub fn rejected(&self) -> &[RejectedRecord] {
        &self.rejected
    }

    /// True when every record in the batch was accepted.
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.rejected.is_empty()
    }
}

impl RecordStore {
    /// Create a new empty record store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of accepted records in the store.
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Check if the store holds no records.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// All accepted records, in ingestion order.
    #[must_use]
    pub fn records(&self) -> &[BenchmarkRecord] {
        &self.records
    }

    /// Ingest an ordered sequence of records.
    ///
    /// Each record is validated against the `size > 0` / `time >= 0`
    /// invariant. Offenders are rejected and listed in the returned
    /// [`IngestReport`]; the remainder of the sequence is still ingested.
    ///
    /// # Errors
    ///
    /// Returns [`Error::StoreSealed`] if the store was already sealed.
    /// Validation failures are never errors at this level.
    pub fn ingest(
        &mut self,
        records: impl IntoIterator<Item = BenchmarkRecord>,
    ) -> Result<IngestReport> {
        if self.sealed {
            return Err(Error::StoreSealed);
        }

        let mut report = IngestReport::default();
        for (index, record) in records.into_iter().enumerate() {
            match record.validate() {
                Ok(()) => {
                    self.records.push(record);
                    report.accepted += 1;
                }
                Err(reason) => {
                    warn!(
                        index,
                        algorithm = record.algorithm(),
                        %reason,
                        "rejected benchmark record"
                    );
                    report.rejected.push(RejectedRecord {
                        index,
                        record,
                        reason,
                    });
                }
            }
        }

        debug!(
            accepted = report.accepted,
            rejected = report.rejected.len(),
            total = self.records.len(),
            "ingested record batch"
        );
        Ok(report)
    }

    /// Seal the store: ingestion for this run is complete.
    ///
    /// Derived tables computed after sealing all see the same snapshot.
    pub fn seal(&mut self) {
        self.sealed = true;
    }

    /// Check whether the store has been sealed.
    #[must_use]
    pub const fn is_sealed(&self) -> bool {
        self.sealed
    }

    /// Query records by arbitrary predicate.
    pub fn filter<P>(&self, predicate: P) -> Vec<&BenchmarkRecord>
    where
        P: Fn(&BenchmarkRecord) -> bool,
    {
        self.records.iter().filter(|r| predicate(r)).collect()
    }

    /// Query records matching a key subset exactly.
    ///
    /// Fields the key leaves unset match every record.
    #[must_use]
    pub fn matching(&self, key: &GroupKey) -> Vec<&BenchmarkRecord> {
        self.filter(|record| key.matches(record))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregate::{Field, KeySpec};

    fn sample_records() -> Vec<BenchmarkRecord> {
        vec![
            BenchmarkRecord::new("bubble", "-O0", "int", 100, 0.5),
            BenchmarkRecord::new("bubble", "-O0", "int", 0, 0.5), // invalid size
            BenchmarkRecord::new("quick_basic", "-O2", "double", 100, -1.0), // invalid time
            BenchmarkRecord::new("quick_basic", "-O2", "double", 100, 0.01),
        ]
    }

    #[test]
    fn test_store_default() {
        let store = RecordStore::new();
        assert!(store.is_empty());
        assert_eq!(store.len(), 0);
        assert!(!store.is_sealed());
    }

    #[test]
    fn test_ingest_partial_success() {
        let mut store = RecordStore::new();
        let report = store.ingest(sample_records()).unwrap();

        assert_eq!(report.accepted(), 2);
        assert_eq!(report.rejected().len(), 2);
        assert!(!report.is_clean());
        assert_eq!(store.len(), 2);

        // Rejects carry the input position and the violated clause
        assert_eq!(report.rejected()[0].index(), 1);
        assert_eq!(report.rejected()[0].reason(), ValidationError::ZeroSize);
        assert_eq!(report.rejected()[1].index(), 2);
        assert_eq!(
            report.rejected()[1].reason(),
            ValidationError::NegativeTime(-1.0)
        );
    }

    #[test]
    fn test_ingest_after_seal_fails() {
        let mut store = RecordStore::new();
        store.ingest(sample_records()).unwrap();
        store.seal();
        assert!(store.is_sealed());

        let result = store.ingest([BenchmarkRecord::new("heap", "-O1", "int", 10, 0.1)]);
        assert!(matches!(result, Err(Error::StoreSealed)));
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn test_filter_by_predicate() {
        let mut store = RecordStore::new();
        store.ingest(sample_records()).unwrap();

        let bubbles = store.filter(|r| r.algorithm() == "bubble");
        assert_eq!(bubbles.len(), 1);
        assert_eq!(bubbles[0].size(), 100);
    }

    #[test]
    fn test_matching_key_subset() {
        let mut store = RecordStore::new();
        store.ingest(sample_records()).unwrap();

        let spec = KeySpec::new(&[Field::Algorithm]);
        let key = GroupKey::from_record(
            &BenchmarkRecord::new("quick_basic", "-O9", "float", 7, 0.0),
            &spec,
        );
        let matched = store.matching(&key);
        assert_eq!(matched.len(), 1);
        assert_eq!(matched[0].data_type(), "double");
    }
}

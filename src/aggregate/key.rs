//! Group keys - typed field tuples used to partition records

use std::fmt;

use serde::Serialize;

use crate::record::BenchmarkRecord;

/// One groupable record field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    /// Algorithm identifier
    Algorithm,
    /// Build/optimization configuration identifier
    Optimization,
    /// Value-domain identifier
    DataType,
    /// Number of elements processed
    Size,
}

/// Selection of the fields that define group equivalence classes.
///
/// Order-insensitive: `[Algorithm, Size]` and `[Size, Algorithm]` describe
/// the same partition. Duplicate fields fold into one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct KeySpec {
    algorithm: bool,
    optimization: bool,
    data_type: bool,
    size: bool,
}

impl KeySpec {
    /// Group by nothing: all records fall into one group.
    pub const EMPTY: Self = Self {
        algorithm: false,
        optimization: false,
        data_type: false,
        size: false,
    };

    /// Group by every field.
    pub const FULL: Self = Self {
        algorithm: true,
        optimization: true,
        data_type: true,
        size: true,
    };

    /// Build a spec from a field list.
    #[must_use]
    pub fn new(fields: &[Field]) -> Self {
        let mut spec = Self::EMPTY;
        for &field in fields {
            spec = spec.with(field);
        }
        spec
    }

    /// Add a field to the selection.
    #[must_use]
    pub const fn with(mut self, field: Field) -> Self {
        match field {
            Field::Algorithm => self.algorithm = true,
            Field::Optimization => self.optimization = true,
            Field::DataType => self.data_type = true,
            Field::Size => self.size = true,
        }
        self
    }

    /// Remove a field from the selection.
    #[must_use]
    pub const fn without(mut self, field: Field) -> Self {
        match field {
            Field::Algorithm => self.algorithm = false,
            Field::Optimization => self.optimization = false,
            Field::DataType => self.data_type = false,
            Field::Size => self.size = false,
        }
        self
    }

    /// Check whether a field participates in the selection.
    #[must_use]
    pub const fn contains(&self, field: Field) -> bool {
        match field {
            Field::Algorithm => self.algorithm,
            Field::Optimization => self.optimization,
            Field::DataType => self.data_type,
            Field::Size => self.size,
        }
    }

    /// Check whether no field is selected.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        !(self.algorithm || self.optimization || self.data_type || self.size)
    }
}

/// A concrete key value: the selected fields of one record.
///
/// Fields outside the originating [`KeySpec`] are `None` and match any
/// record value. Equality is exact-match on all selected fields, which
/// makes `GroupKey` usable directly as a map key.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize)]
pub struct GroupKey {
    algorithm: Option<String>,
    optimization: Option<String>,
    data_type: Option<String>,
    size: Option<u64>,
}

impl GroupKey {
    /// Extract the key of `record` under `spec`.
    #[must_use]
    pub fn from_record(record: &BenchmarkRecord, spec: &KeySpec) -> Self {
        Self {
            algorithm: spec
                .contains(Field::Algorithm)
                .then(|| record.algorithm().to_string()),
            optimization: spec
                .contains(Field::Optimization)
                .then(|| record.optimization().to_string()),
            data_type: spec
                .contains(Field::DataType)
                .then(|| record.data_type().to_string()),
            size: spec.contains(Field::Size).then(|| record.size()),
        }
    }

    /// Key selecting one (algorithm, optimization, data type) triple, size
    /// left open.
    #[must_use]
    pub fn triple(
        algorithm: impl Into<String>,
        optimization: impl Into<String>,
        data_type: impl Into<String>,
    ) -> Self {
        Self {
            algorithm: Some(algorithm.into()),
            optimization: Some(optimization.into()),
            data_type: Some(data_type.into()),
            size: None,
        }
    }

    /// Check whether `record` matches every selected field of this key.
    #[must_use]
    pub fn matches(&self, record: &BenchmarkRecord) -> bool {
        self.algorithm
            .as_deref()
            .map_or(true, |a| a == record.algorithm())
            && self
                .optimization
                .as_deref()
                .map_or(true, |o| o == record.optimization())
            && self
                .data_type
                .as_deref()
                .map_or(true, |d| d == record.data_type())
            && self.size.map_or(true, |s| s == record.size())
    }

    /// Selected algorithm, if any.
    #[must_use]
    pub fn algorithm(&self) -> Option<&str> {
        self.algorithm.as_deref()
    }

    /// Selected optimization configuration, if any.
    #[must_use]
    pub fn optimization(&self) -> Option<&str> {
        self.optimization.as_deref()
    }

    /// Selected data type, if any.
    #[must_use]
    pub fn data_type(&self) -> Option<&str> {
        self.data_type.as_deref()
    }

    /// Selected size, if any.
    #[must_use]
    pub const fn size(&self) -> Option<u64> {
        self.size
    }
}

impl fmt::Display for GroupKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut parts: Vec<String> = Vec::with_capacity(4);
        if let Some(a) = &self.algorithm {
            parts.push(a.clone());
        }
        if let Some(o) = &self.optimization {
            parts.push(o.clone());
        }
        if let Some(d) = &self.data_type {
            parts.push(d.clone());
        }
        if let Some(s) = self.size {
            parts.push(s.to_string());
        }
        if parts.is_empty() {
            write!(f, "(all)")
        } else {
            write!(f, "{}", parts.join("/"))
        }
    }
}
